//! Expense dataset synchronization library
//!
//! This crate is the data core of the kassabok expense tracker. It owns the
//! tabular model and every operation that has real invariants:
//! - The fixed twelve-column schema and typed expense records
//! - Load-time reprojection and normalization (schema padding, date
//!   coercion, derived price-per-unit backfill)
//! - CSV/spreadsheet import and export that round-trip
//! - Append-only merging of imported rows (deliberately not idempotent)
//! - Completeness auditing with identity-preserving repair
//! - Scoped edit sessions that splice a changed subset back into the full
//!   dataset without touching anything outside the scope
//! - Read-only monthly/category analysis with a simple trend forecast
//!
//! Storage backends, caching and the session version counter live in the
//! application crate; this crate only ever sees in-memory rows and byte
//! buffers.

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod analysis;
pub mod audit;
pub mod dataset;
pub mod date;
pub mod editor;
pub mod error;
pub mod export;
pub mod filter;
pub mod importer;
pub mod merge;
pub mod scope;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use dataset::Dataset;
pub use editor::{EditSession, EditState, RowDiff};
pub use error::{ExportError, ImportError};
pub use filter::FilterSet;
pub use model::{Column, Currency, ExpenseType, Record, RowId};
pub use scope::Scope;
