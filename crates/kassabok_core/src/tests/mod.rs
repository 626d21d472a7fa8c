//! Integration tests for the dataset synchronization core
//!
//! Tests are organized by topic:
//! - `importing` - Schema reprojection, coercion, import failure modes
//! - `roundtrip` - Export-then-import equality for both formats
//! - `merging` - Append semantics and deliberate non-idempotence
//! - `editing` - Scoped edit sessions, diffs, splice isolation
//! - `helpers` - Shared row constructors

mod editing;
mod helpers;
mod importing;
mod roundtrip;
