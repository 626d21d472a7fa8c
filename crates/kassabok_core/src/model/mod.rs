mod ids;
mod record;
mod schema;

pub use ids::RowId;
pub use record::{Currency, ExpenseType, Record};
pub use schema::{Column, header_row};
