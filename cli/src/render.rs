//! Plain-text output for pages, bounds, summaries and notices.

use std::fmt::Write as _;

use estate_catalog::Bounds;
use estate_catalog::CatalogSummary;
use estate_catalog::Category;
use estate_catalog::ModeKind;
use estate_catalog::Notice;
use estate_catalog::NoticeTone;
use estate_catalog::PageView;
use estate_catalog::ReconciledRecord;
use owo_colors::OwoColorize;

pub fn print_page(view: &PageView) {
    let mode = match view.mode {
        ModeKind::All => "All listings",
        ModeKind::Search => "Search results",
        ModeKind::Filter => "Filter results",
    };
    println!(
        "{} {mode}: page {}/{} ({} total, {} per page)",
        "▶".bright_blue(),
        view.index + 1,
        view.page_count.max(1),
        view.total,
        view.size
    );
    if view.records.is_empty() {
        println!("{} No listings", "✗".bright_red());
        return;
    }
    for record in &view.records {
        println!("  {}", record_line(record));
    }
}

pub fn record_line(record: &ReconciledRecord) -> String {
    let listing = &record.listing;
    let category = format!(
        "{}/{}",
        record.category.ownership_label(),
        record.category.type_label()
    );
    let mut line = format!(
        "{:<10} {:<17} {} | {} | {} | area {}",
        listing.id,
        category,
        listing.data.address,
        listing.data.owner_full_name,
        listing.data.email,
        listing.data.area
    );
    if let Some(price) = listing.data.price() {
        let _ = write!(line, " | price {price}");
    }
    if let Some(mortgage) = listing.data.mortgage_price {
        let _ = write!(line, " | mortgage {mortgage}");
    }
    if let Some(rooms) = listing.room_count {
        let _ = write!(line, " | rooms {rooms}");
    }
    if let Some(floors) = listing.floor_count {
        let _ = write!(line, " | floors {floors}");
    }
    if let Some(yard) = listing.yard_area {
        let _ = write!(line, " | yard {yard}");
    }
    if let Some(what_use) = &listing.what_use {
        let _ = write!(line, " | use {what_use}");
    }
    line
}

pub fn print_bounds(category: Category, bounds: Option<&Bounds>) {
    println!("{} Bounds for {category}", "▶".bright_blue());
    let Some(bounds) = bounds.filter(|bounds| !bounds.is_empty()) else {
        println!("{} No bounds reported", "✗".bright_red());
        return;
    };
    for (field, envelope) in bounds.iter() {
        let max = if envelope.is_unbounded_above() {
            "unbounded".to_string()
        } else {
            envelope.max.to_string()
        };
        println!("  {:<15} {} .. {max}", field.label(), envelope.min);
    }
}

pub fn print_summary(summary: &CatalogSummary) {
    println!("{} Catalog summary", "▶".bright_blue());
    for (category, count) in &summary.by_category {
        let label = category.to_string();
        println!("  {label:<17} {count}");
    }
    println!("  sale total: {}", summary.sale.bright_cyan());
    println!("  rent total: {}", summary.rent.bright_cyan());
    println!("  total: {}", summary.total.bright_cyan());
}

pub fn print_notice(notice: &Notice) {
    let marker = match notice.tone {
        NoticeTone::Success => "✓".bright_green().to_string(),
        NoticeTone::Error => "✗".bright_red().to_string(),
        NoticeTone::Info => "•".bright_blue().to_string(),
    };
    match notice.status {
        Some(status) => println!("{marker} {} ({status})", notice.message),
        None => println!("{marker} {}", notice.message),
    }
}
