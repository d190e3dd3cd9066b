//! Client-side keyword narrowing applied to whatever the active mode shows.

use crate::listing::Listing;
use crate::reconcile::ReconciledRecord;
use crate::reconcile::RecordCategory;

/// Lower-cased, trimmed needle. `None` means "match everything".
pub fn normalize_keyword(raw: &str) -> Option<String> {
    let needle = raw.trim().to_lowercase();
    (!needle.is_empty()).then_some(needle)
}

/// Lower-cased searchable text of a listing on its own, as the catalog
/// service matches keywords.
pub fn listing_text(listing: &Listing) -> String {
    let data = &listing.data;
    let optional = |value: Option<String>| value.unwrap_or_default();
    let parts = [
        listing.id.clone(),
        data.owner_full_name.clone(),
        data.address.clone(),
        data.email.clone(),
        optional(listing.what_use.clone()),
        optional(listing.room_count.map(|v| v.to_string())),
        optional(listing.floor_count.map(|v| v.to_string())),
        optional(listing.yard_area.map(decimal_text)),
        decimal_text(data.area),
        optional(data.price().map(decimal_text)),
    ];
    parts.join(" ").to_lowercase()
}

/// Decimal fields as the catalog service prints them: whole values keep a
/// trailing `.0` and magnitudes outside `[1e-3, 1e7)` use `1.2E7` notation.
fn decimal_text(value: f64) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }
    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        return if value.fract() == 0.0 {
            format!("{value:.1}")
        } else {
            value.to_string()
        };
    }
    let scientific = format!("{value:e}");
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => format!("{mantissa}E{exponent}"),
        Some((mantissa, exponent)) => format!("{mantissa}.0E{exponent}"),
        None => scientific,
    }
}

/// [`listing_text`] plus the record's category labels.
pub fn listing_haystack(listing: &Listing, category: RecordCategory) -> String {
    format!(
        "{} {} {}",
        category.ownership_label(),
        category.type_label(),
        listing_text(listing)
    )
}

pub fn matches_keyword(record: &ReconciledRecord, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(needle) => listing_haystack(&record.listing, record.category).contains(needle),
    }
}
