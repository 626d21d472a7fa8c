//! Shared row constructors for the integration tests.

use jiff::civil::date;

use crate::model::{Currency, ExpenseType, Record};

/// A fully populated, complete record.
pub fn full_record(item: &str, price: f64) -> Record {
    let mut record = Record::empty();
    record.date = Some(date(2024, 4, 12));
    record.expense_type = Some(ExpenseType::Goods);
    record.category = "Groceries".to_string();
    record.subcategory = "Dairy".to_string();
    record.item = item.to_string();
    record.brand = "Arla".to_string();
    record.shop = "ICA".to_string();
    record.price_paid = price;
    record.currency = Currency::Sek;
    record.quantity = Some(2.0);
    record.quantity_unit = "Count".to_string();
    record
}

/// A minimal complete record with only the required fields set.
pub fn sparse_record(y: i16, m: i8, d: i8) -> Record {
    let mut record = Record::empty();
    record.date = Some(date(y, m, d));
    record.expense_type = Some(ExpenseType::Service);
    record
}
