//! Transient user-facing messages produced by session transitions.

use crate::error::CatalogError;
use serde::Serialize;
use strum_macros::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NoticeTone {
    Error,
    Success,
    Info,
}

/// A message for the user. `tone` only styles it; `failed` records whether
/// the operation behind it went wrong.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
    pub status: Option<u16>,
    pub tone: NoticeTone,
    pub failed: bool,
}

impl Notice {
    pub fn new(message: impl Into<String>, status: Option<u16>) -> Self {
        let message = message.into();
        let tone = classify(&message, status);
        Self {
            message,
            status,
            tone,
            failed: false,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Some(200))
    }

    /// A locally detected problem, shown as an error regardless of wording.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            tone: NoticeTone::Error,
            failed: true,
        }
    }

    /// Prefers the service's own message; falls back to `fallback`.
    pub fn from_error(err: &CatalogError, fallback: &str) -> Self {
        let message = err.service_message().unwrap_or(fallback);
        Self {
            failed: true,
            ..Self::new(message, err.status())
        }
    }
}

fn classify(message: &str, status: Option<u16>) -> NoticeTone {
    let lowered = message.to_lowercase();
    if status.is_some_and(|s| (400..500).contains(&s))
        || lowered.contains("fail")
        || lowered.contains("error")
    {
        NoticeTone::Error
    } else if status == Some(200) || lowered.contains("success") {
        NoticeTone::Success
    } else {
        NoticeTone::Info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tone_follows_status_then_wording() {
        assert_eq!(Notice::new("Not found", Some(404)).tone, NoticeTone::Error);
        assert_eq!(Notice::new("Search failed", None).tone, NoticeTone::Error);
        assert_eq!(Notice::success("Deleted successfully").tone, NoticeTone::Success);
        assert_eq!(Notice::new("Created successfully", None).tone, NoticeTone::Success);
        assert_eq!(Notice::new("Loading", None).tone, NoticeTone::Info);
        assert_eq!(Notice::new("gateway down", Some(502)).tone, NoticeTone::Info);
    }

    #[test]
    fn from_error_prefers_service_message() {
        let err = CatalogError::from_status(400, Some("minPrice must be positive".into()));
        let notice = Notice::from_error(&err, "Filter failed");
        assert_eq!(notice.message, "minPrice must be positive");
        assert_eq!(notice.tone, NoticeTone::Error);

        let notice = Notice::from_error(
            &CatalogError::unreachable("connection refused"),
            "Search failed",
        );
        assert_eq!(notice.message, "Search failed");
        assert_eq!(notice.status, None);

        let bare = CatalogError::Unavailable {
            status: Some(500),
            message: None,
        };
        assert_eq!(Notice::from_error(&bare, "Search failed").message, "Search failed");
    }

    #[test]
    fn service_failure_with_neutral_wording_is_still_a_failure() {
        let err = CatalogError::from_status(503, Some("Service Unavailable".into()));
        let notice = Notice::from_error(&err, "Failed to load data");
        assert_eq!(notice.message, "Service Unavailable");
        assert_eq!(notice.status, Some(503));
        assert_eq!(notice.tone, NoticeTone::Info);
        assert!(notice.failed);

        assert!(Notice::error("Page size must be one of [5, 10, 20, 50]").failed);
        assert!(!Notice::success("Deleted successfully").failed);
        assert!(!Notice::new("Loading", None).failed);
    }
}
