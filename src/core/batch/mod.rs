//! Batch write execution
//!
//! Generic chunking, bounded-size atomic commits, and retry with linear
//! backoff for lists of storage mutations. No domain knowledge lives here.

mod executor;
mod types;


pub use executor::{BatchExecutor, BatchRunConfig, BatchRunReport, run_batch};
pub use types::{BatchOperation, DocumentRef, FieldWrite, OperationKind};
