use crate::taxonomy::PropertyGroup;
use crate::taxonomy::PropertyType;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Transport failure (`status` is `None`) or a 5xx answer.
    #[error("catalog service unavailable{}", describe(*status, message.as_deref()))]
    Unavailable {
        status: Option<u16>,
        message: Option<String>,
    },

    /// The service answered with a 4xx status.
    #[error("request rejected{}", describe(Some(*status), message.as_deref()))]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    #[error("listing {id} is not present in the canonical catalog")]
    ReconciliationMiss { id: String },

    #[error("property type {property_type} is not offered under {group}")]
    TypeNotInGroup {
        property_type: PropertyType,
        group: PropertyGroup,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

fn describe(status: Option<u16>, message: Option<&str>) -> String {
    match (status, message.filter(|m| !m.trim().is_empty())) {
        (Some(status), Some(message)) => format!(" ({status}): {message}"),
        (Some(status), None) => format!(" ({status})"),
        (None, Some(message)) => format!(": {message}"),
        (None, None) => String::new(),
    }
}

impl CatalogError {
    pub fn unreachable(message: impl Into<String>) -> Self {
        CatalogError::Unavailable {
            status: None,
            message: Some(message.into()),
        }
    }

    /// Classifies a non-success HTTP answer.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        if (400..500).contains(&status) {
            CatalogError::Rejected { status, message }
        } else {
            CatalogError::Unavailable {
                status: Some(status),
                message,
            }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            CatalogError::Unavailable { status, .. } => *status,
            CatalogError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The human-readable message the service attached to its answer, if any.
    /// Transport failures never carry one.
    pub fn service_message(&self) -> Option<&str> {
        let message = match self {
            CatalogError::Unavailable {
                status: Some(_),
                message,
            }
            | CatalogError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        };
        message.filter(|m| !m.trim().is_empty())
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, CatalogError::Rejected { .. })
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
