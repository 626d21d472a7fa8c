//! Edit scopes
//!
//! A scope names the contiguous slice of the dataset an edit session works
//! on: a year, a month within a year, or an arbitrary filter set. Period
//! scopes go by the record date, so rows without one never fall inside a
//! period; they are reached through the completeness auditor instead.

use crate::filter::FilterSet;
use crate::model::Record;

#[derive(Debug, Clone, PartialEq)]
pub enum Scope {
    /// A whole year, or one month of it.
    Period { year: i16, month: Option<i8> },
    /// Whatever the active filters select.
    Filter(FilterSet),
}

impl Scope {
    pub fn year(year: i16) -> Scope {
        Scope::Period { year, month: None }
    }

    pub fn month(year: i16, month: i8) -> Scope {
        Scope::Period {
            year,
            month: Some(month),
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Scope::Period { year, month } => match record.date {
                Some(date) => {
                    date.year() == *year && month.is_none_or(|m| date.month() == m)
                }
                None => false,
            },
            Scope::Filter(filter) => filter.matches(record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExpenseType, Record};
    use jiff::civil::date;

    fn dated(y: i16, m: i8, d: i8) -> Record {
        let mut r = Record::empty();
        r.date = Some(date(y, m, d));
        r.expense_type = Some(ExpenseType::Goods);
        r
    }

    #[test]
    fn test_year_scope() {
        let scope = Scope::year(2024);
        assert!(scope.matches(&dated(2024, 1, 1)));
        assert!(scope.matches(&dated(2024, 12, 31)));
        assert!(!scope.matches(&dated(2023, 12, 31)));
    }

    #[test]
    fn test_month_scope() {
        let scope = Scope::month(2024, 3);
        assert!(scope.matches(&dated(2024, 3, 15)));
        assert!(!scope.matches(&dated(2024, 4, 1)));
    }

    #[test]
    fn test_period_scope_skips_dateless_rows() {
        let mut dateless = dated(2024, 3, 15);
        dateless.date = None;
        assert!(!Scope::year(2024).matches(&dateless));
    }
}
