use color_eyre::Result;

use kassabok_core::analysis::{
    category_efficiency, forecast_next_month, monthly_totals, percent_change, top_categories,
    what_if_savings,
};

use crate::format::{format_amount, format_percent_change};
use crate::session::Session;
use crate::storage::StorageBackend;

/// Monthly trend report: totals, month-over-month change, a next-month
/// forecast, category rankings and an optional what-if reduction.
pub fn forecast(
    session: &mut Session,
    backend: &dyn StorageBackend,
    currency: &str,
    reduce_category: Option<&str>,
    reduce_pct: f64,
) -> Result<()> {
    let dataset = session.dataset(backend);
    let totals = monthly_totals(dataset.rows());

    if totals.is_empty() {
        println!("No monthly data available.");
        return Ok(());
    }

    println!("Monthly spending:");
    for point in &totals {
        println!("  {}  {}", point.month, format_amount(point.total, currency));
    }
    println!();

    match percent_change(&totals) {
        Some(change) => println!(
            "Change vs previous month: {}",
            format_percent_change(change)
        ),
        None => println!("Not enough months to compute a change."),
    }

    match forecast_next_month(&totals) {
        Some(next) => println!("Forecast (next month): {}", format_amount(next, currency)),
        None => println!("Need at least 2 months of data to forecast."),
    }

    let latest = &totals[totals.len() - 1].month;
    let top = top_categories(dataset.rows(), latest, 3);
    if !top.is_empty() {
        println!();
        println!("Top categories in {latest}:");
        for (rank, (category, total)) in top.iter().enumerate() {
            println!(
                "  {}. {category}: {}",
                rank + 1,
                format_amount(*total, currency)
            );
        }
    }

    let efficiency = category_efficiency(dataset.rows());
    if !efficiency.is_empty() {
        println!();
        println!("Spend per purchase:");
        for score in &efficiency {
            println!(
                "  {:<20} {} over {} purchases",
                score.category,
                format_amount(score.efficiency, currency),
                score.purchases
            );
        }
    }

    if let Some(category) = reduce_category {
        let (savings, new_total) = what_if_savings(dataset.rows(), category, reduce_pct);
        println!();
        println!(
            "What-if: cutting {category:?} by {reduce_pct:.0}% saves {} (new total {}).",
            format_amount(savings, currency),
            format_amount(new_total, currency)
        );
    }
    Ok(())
}
