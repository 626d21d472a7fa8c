//! Browse filters
//!
//! A `FilterSet` is the sidebar state: multi-select facets, a price range
//! and a date range, combined with AND semantics. An empty facet means "no
//! restriction". Filters do not themselves hide incomplete rows (that rule
//! belongs to aggregation), but a date-range restriction only ever matches
//! rows that have a date.

use jiff::civil::Date;

use crate::model::{ExpenseType, Record};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    pub expense_types: Vec<ExpenseType>,
    pub categories: Vec<String>,
    pub subcategories: Vec<String>,
    pub items: Vec<String>,
    pub brands: Vec<String>,
    pub shops: Vec<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub date_from: Option<Date>,
    pub date_to: Option<Date>,
}

impl FilterSet {
    pub fn new() -> FilterSet {
        FilterSet::default()
    }

    /// True when no restriction is active.
    pub fn is_empty(&self) -> bool {
        *self == FilterSet::default()
    }

    pub fn matches(&self, record: &Record) -> bool {
        if !self.expense_types.is_empty() {
            match record.expense_type {
                Some(t) if self.expense_types.contains(&t) => {}
                _ => return false,
            }
        }
        if !facet_matches(&self.categories, &record.category)
            || !facet_matches(&self.subcategories, &record.subcategory)
            || !facet_matches(&self.items, &record.item)
            || !facet_matches(&self.brands, &record.brand)
            || !facet_matches(&self.shops, &record.shop)
        {
            return false;
        }
        if let Some(min) = self.price_min {
            if record.price_paid < min {
                return false;
            }
        }
        if let Some(max) = self.price_max {
            if record.price_paid > max {
                return false;
            }
        }
        if self.date_from.is_some() || self.date_to.is_some() {
            let Some(date) = record.date else {
                return false;
            };
            if self.date_from.is_some_and(|from| date < from) {
                return false;
            }
            if self.date_to.is_some_and(|to| date > to) {
                return false;
            }
        }
        true
    }

    /// Apply to a row slice, preserving order.
    pub fn apply<'a>(&self, rows: &'a [Record]) -> Vec<&'a Record> {
        rows.iter().filter(|r| self.matches(r)).collect()
    }
}

fn facet_matches(selected: &[String], value: &str) -> bool {
    selected.is_empty() || selected.iter().any(|s| s == value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    fn record(category: &str, shop: &str, price: f64) -> Record {
        let mut r = Record::empty();
        r.date = Some(date(2024, 6, 10));
        r.expense_type = Some(ExpenseType::Goods);
        r.category = category.to_string();
        r.shop = shop.to_string();
        r.price_paid = price;
        r
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = FilterSet::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&record("Food", "ICA", 50.0)));
    }

    #[test]
    fn test_facets_and_price_range_combine() {
        let filter = FilterSet {
            categories: vec!["Food".to_string()],
            price_min: Some(10.0),
            price_max: Some(100.0),
            ..FilterSet::default()
        };
        assert!(filter.matches(&record("Food", "ICA", 50.0)));
        assert!(!filter.matches(&record("Travel", "SL", 50.0)));
        assert!(!filter.matches(&record("Food", "ICA", 150.0)));
    }

    #[test]
    fn test_date_range_excludes_dateless_rows() {
        let filter = FilterSet {
            date_from: Some(date(2024, 1, 1)),
            ..FilterSet::default()
        };
        let mut dateless = record("Food", "ICA", 50.0);
        dateless.date = None;
        assert!(!filter.matches(&dateless));
        assert!(filter.matches(&record("Food", "ICA", 50.0)));
    }
}
