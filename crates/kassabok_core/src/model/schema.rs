//! The fixed column schema
//!
//! Every load and import reprojects rows onto this set of columns: schema
//! columns missing from the source are filled with null, source columns not
//! in the schema are dropped. The drop is a deliberate narrowing, not data
//! loss: the storage layout (header row + one row per record) only ever
//! carries these twelve columns, in this order.

/// One of the twelve recognized expense-record columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Date,
    ExpenseType,
    Category,
    Subcategory,
    Item,
    Brand,
    Shop,
    PricePaid,
    Currency,
    Quantity,
    QuantityUnit,
    PricePerUnit,
}

impl Column {
    /// All schema columns in canonical storage order.
    pub const ALL: [Column; 12] = [
        Column::Date,
        Column::ExpenseType,
        Column::Category,
        Column::Subcategory,
        Column::Item,
        Column::Brand,
        Column::Shop,
        Column::PricePaid,
        Column::Currency,
        Column::Quantity,
        Column::QuantityUnit,
        Column::PricePerUnit,
    ];

    /// Header name as written to and read from the backing store.
    pub fn name(&self) -> &'static str {
        match self {
            Column::Date => "Date",
            Column::ExpenseType => "ExpenseType",
            Column::Category => "Category",
            Column::Subcategory => "Subcategory",
            Column::Item => "Item",
            Column::Brand => "Brand",
            Column::Shop => "Shop",
            Column::PricePaid => "PricePaid",
            Column::Currency => "Currency",
            Column::Quantity => "Quantity",
            Column::QuantityUnit => "QuantityUnit",
            Column::PricePerUnit => "PricePerUnit",
        }
    }

    /// Match a header cell against the schema. Surrounding whitespace is
    /// ignored; unknown headers yield `None` and the caller drops the column.
    pub fn parse(header: &str) -> Option<Column> {
        let trimmed = header.trim();
        Column::ALL.iter().copied().find(|c| c.name() == trimmed)
    }
}

/// The canonical header row.
pub fn header_row() -> Vec<&'static str> {
    Column::ALL.iter().map(|c| c.name()).collect()
}
