use color_eyre::Result;

use kassabok_core::audit::partition;
use kassabok_core::{FilterSet, Record};

use crate::format::format_amount;
use crate::session::Session;
use crate::storage::StorageBackend;

/// Print the filtered table of complete entries plus totals. Incomplete
/// entries never show up here; they are surfaced with a pointer to
/// `audit` instead.
pub fn show(
    session: &mut Session,
    backend: &dyn StorageBackend,
    filter: &FilterSet,
    currency: &str,
) -> Result<()> {
    let dataset = session.dataset(backend);
    let split = partition(&dataset);
    let visible: Vec<&Record> = filter.apply(&split.complete);

    if visible.is_empty() {
        println!("No expense records match.");
    } else {
        println!(
            "{:<12} {:<8} {:<16} {:<20} {:<14} {:>14}",
            "Date", "Type", "Category", "Item", "Shop", "Price"
        );
        for row in &visible {
            println!(
                "{:<12} {:<8} {:<16} {:<20} {:<14} {:>14}",
                row.cell(kassabok_core::Column::Date),
                row.cell(kassabok_core::Column::ExpenseType),
                truncate(&row.category, 16),
                truncate(&row.item, 20),
                truncate(&row.shop, 14),
                format_amount(row.price_paid, row.currency.code()),
            );
        }

        let total: f64 = visible.iter().map(|r| r.price_paid).sum();
        println!();
        println!(
            "{} entries, total {}",
            visible.len(),
            format_amount(total, currency)
        );
    }

    if !split.incomplete.is_empty() {
        println!(
            "{} incomplete entries are hidden. Run `kassabok audit` to review them.",
            split.incomplete.len()
        );
    }
    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}
