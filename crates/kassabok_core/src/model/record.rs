//! Expense record type
//!
//! A `Record` is one transaction line item. Text fields use the empty string
//! for "absent" (that is what a blank spreadsheet cell round-trips to);
//! date, quantity and the derived price-per-unit are genuinely optional.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::model::ids::RowId;
use crate::model::schema::Column;

/// Whether a purchase was a physical good or a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseType {
    Goods,
    Service,
}

impl ExpenseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseType::Goods => "Goods",
            ExpenseType::Service => "Service",
        }
    }

    /// Case-insensitive parse; anything unrecognized is treated as absent.
    pub fn parse(s: &str) -> Option<ExpenseType> {
        match s.trim().to_ascii_lowercase().as_str() {
            "goods" => Some(ExpenseType::Goods),
            "service" => Some(ExpenseType::Service),
            _ => None,
        }
    }
}

/// Settlement currency of a record.
///
/// Imports never fail on an unknown code: it is preserved verbatim in
/// `Other` so the row survives a round-trip untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    Sek,
    Inr,
    Usd,
    Eur,
    Other(String),
}

impl Currency {
    pub fn code(&self) -> &str {
        match self {
            Currency::Sek => "SEK",
            Currency::Inr => "INR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Other(code) => code,
        }
    }

    /// Parse a currency cell. Never fails; blank cells become the given
    /// default and unknown codes are kept as-is.
    pub fn parse(s: &str, default: &Currency) -> Currency {
        let code = s.trim();
        if code.is_empty() {
            return default.clone();
        }
        match code.to_ascii_uppercase().as_str() {
            "SEK" => Currency::Sek,
            "INR" => Currency::Inr,
            "USD" => Currency::Usd,
            "EUR" => Currency::Eur,
            other => Currency::Other(other.to_string()),
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Sek
    }
}

/// One expense line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Dataset-assigned identity; `RowId::UNASSIGNED` until adopted.
    pub id: RowId,
    pub date: Option<Date>,
    pub expense_type: Option<ExpenseType>,
    pub category: String,
    pub subcategory: String,
    pub item: String,
    pub brand: String,
    pub shop: String,
    /// Price paid in the settlement currency. Blank cells coerce to zero.
    pub price_paid: f64,
    pub currency: Currency,
    pub quantity: Option<f64>,
    pub quantity_unit: String,
    /// Derived: `price_paid / quantity` when quantity is positive.
    pub price_per_unit: Option<f64>,
}

impl Record {
    /// A fully absent row, the starting point for the importer and for
    /// manual entry, which fill in whatever the source provides.
    pub fn empty() -> Record {
        Record {
            id: RowId::UNASSIGNED,
            date: None,
            expense_type: None,
            category: String::new(),
            subcategory: String::new(),
            item: String::new(),
            brand: String::new(),
            shop: String::new(),
            price_paid: 0.0,
            currency: Currency::default(),
            quantity: None,
            quantity_unit: String::new(),
            price_per_unit: None,
        }
    }

    /// A record is complete when both Date and ExpenseType are present.
    /// Incomplete records stay in storage but are excluded from every
    /// aggregated view until fixed.
    pub fn is_complete(&self) -> bool {
        self.date.is_some() && self.expense_type.is_some()
    }

    /// Backfill the derived price-per-unit: computed only when it is absent
    /// and both inputs are usable. A zero or missing quantity leaves the
    /// field untouched, never a division fault.
    pub fn backfill_price_per_unit(&mut self) {
        if self.price_per_unit.is_some() {
            return;
        }
        if let Some(quantity) = self.quantity {
            if quantity > 0.0 {
                self.price_per_unit = Some(round2(self.price_paid / quantity));
            }
        }
    }

    /// Forced recompute used on save of an edited subset: any edit to the
    /// inputs must be reflected, so an existing value is overwritten rather
    /// than kept stale.
    pub fn recompute_price_per_unit(&mut self) {
        match self.quantity {
            Some(quantity) if quantity > 0.0 => {
                self.price_per_unit = Some(round2(self.price_paid / quantity));
            }
            _ => self.price_per_unit = None,
        }
    }

    /// Render one schema cell as the canonical storage string.
    pub fn cell(&self, column: Column) -> String {
        match column {
            Column::Date => self.date.map(|d| d.to_string()).unwrap_or_default(),
            Column::ExpenseType => self
                .expense_type
                .map(|t| t.as_str().to_string())
                .unwrap_or_default(),
            Column::Category => self.category.clone(),
            Column::Subcategory => self.subcategory.clone(),
            Column::Item => self.item.clone(),
            Column::Brand => self.brand.clone(),
            Column::Shop => self.shop.clone(),
            Column::PricePaid => self.price_paid.to_string(),
            Column::Currency => self.currency.code().to_string(),
            Column::Quantity => self.quantity.map(|q| q.to_string()).unwrap_or_default(),
            Column::QuantityUnit => self.quantity_unit.clone(),
            Column::PricePerUnit => self
                .price_per_unit
                .map(|p| p.to_string())
                .unwrap_or_default(),
        }
    }

    /// All twelve schema cells in canonical order.
    pub fn cells(&self) -> Vec<String> {
        Column::ALL.iter().map(|&c| self.cell(c)).collect()
    }

    /// Field-level equality ignoring identity. Used by the diff computation:
    /// a row whose id survives an edit session but whose cells changed is
    /// "changed", not "replaced".
    pub fn same_content(&self, other: &Record) -> bool {
        self.date == other.date
            && self.expense_type == other.expense_type
            && self.category == other.category
            && self.subcategory == other.subcategory
            && self.item == other.item
            && self.brand == other.brand
            && self.shop == other.shop
            && self.price_paid == other.price_paid
            && self.currency == other.currency
            && self.quantity == other.quantity
            && self.quantity_unit == other.quantity_unit
            && self.price_per_unit == other.price_per_unit
    }
}

/// Round to two decimals, the precision the storage layout carries for
/// derived unit prices.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
