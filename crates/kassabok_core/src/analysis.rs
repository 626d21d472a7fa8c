//! Read-only spending analysis
//!
//! Everything here is a pure function over complete rows; incomplete rows
//! are excluded exactly as they are from every other aggregated view. None
//! of this feeds back into the dataset.

use std::collections::BTreeMap;

use crate::date::year_month;
use crate::model::Record;

/// Total spend for one `YYYY-MM` month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotal {
    pub month: String,
    pub total: f64,
}

/// Per-category aggregate over the whole dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpend {
    pub category: String,
    pub total: f64,
    pub purchases: usize,
    /// Spend per purchase.
    pub efficiency: f64,
}

/// Monthly totals in chronological order. Complete rows only.
pub fn monthly_totals(rows: &[Record]) -> Vec<MonthlyTotal> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for row in rows.iter().filter(|r| r.is_complete()) {
        if let Some(date) = row.date {
            *totals.entry(year_month(date)).or_insert(0.0) += row.price_paid;
        }
    }
    totals
        .into_iter()
        .map(|(month, total)| MonthlyTotal { month, total })
        .collect()
}

/// Percent change of the latest month versus the one before it. Needs two
/// months; a zero previous month reads as no change rather than a blowup.
pub fn percent_change(totals: &[MonthlyTotal]) -> Option<f64> {
    if totals.len() < 2 {
        return None;
    }
    let last = totals[totals.len() - 1].total;
    let prev = totals[totals.len() - 2].total;
    if prev == 0.0 {
        return Some(0.0);
    }
    Some((last - prev) / prev * 100.0)
}

// Holt's linear smoothing constants. Fixed rather than fitted: spending
// series here are short, and a level-weighted configuration tracks the
// recent months without chasing noise in the trend term.
const LEVEL_ALPHA: f64 = 0.5;
const TREND_BETA: f64 = 0.3;

/// One-step-ahead forecast of the next month's total using Holt's linear
/// (trend-only) exponential smoothing. Needs at least two months.
pub fn forecast_next_month(totals: &[MonthlyTotal]) -> Option<f64> {
    if totals.len() < 2 {
        return None;
    }

    let mut level = totals[0].total;
    let mut trend = totals[1].total - totals[0].total;
    for point in &totals[1..] {
        let prev_level = level;
        level = LEVEL_ALPHA * point.total + (1.0 - LEVEL_ALPHA) * (level + trend);
        trend = TREND_BETA * (level - prev_level) + (1.0 - TREND_BETA) * trend;
    }
    Some(level + trend)
}

/// Top `n` categories by spend within one `YYYY-MM` month.
pub fn top_categories(rows: &[Record], month: &str, n: usize) -> Vec<(String, f64)> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for row in rows.iter().filter(|r| r.is_complete()) {
        let Some(date) = row.date else { continue };
        if year_month(date) != month {
            continue;
        }
        *totals.entry(row.category.clone()).or_insert(0.0) += row.price_paid;
    }

    let mut ranked: Vec<(String, f64)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(n);
    ranked
}

/// Spend-per-purchase score for every category, highest first.
pub fn category_efficiency(rows: &[Record]) -> Vec<CategorySpend> {
    let mut agg: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for row in rows.iter().filter(|r| r.is_complete()) {
        let entry = agg.entry(row.category.clone()).or_insert((0.0, 0));
        entry.0 += row.price_paid;
        entry.1 += 1;
    }

    let mut scores: Vec<CategorySpend> = agg
        .into_iter()
        .map(|(category, (total, purchases))| CategorySpend {
            category,
            total,
            purchases,
            efficiency: if purchases > 0 {
                total / purchases as f64
            } else {
                0.0
            },
        })
        .collect();
    scores.sort_by(|a, b| b.efficiency.total_cmp(&a.efficiency));
    scores
}

/// What-if: reduce spend in categories containing `category_match`
/// (case-insensitive) by `reduction_pct` percent. Returns the projected
/// savings and the new overall total.
pub fn what_if_savings(rows: &[Record], category_match: &str, reduction_pct: f64) -> (f64, f64) {
    let needle = category_match.to_lowercase();
    let complete: Vec<&Record> = rows.iter().filter(|r| r.is_complete()).collect();

    let total: f64 = complete.iter().map(|r| r.price_paid).sum();
    let matched: f64 = complete
        .iter()
        .filter(|r| r.category.to_lowercase().contains(&needle))
        .map(|r| r.price_paid)
        .sum();

    let savings = matched * (reduction_pct / 100.0);
    (savings, total - savings)
}
