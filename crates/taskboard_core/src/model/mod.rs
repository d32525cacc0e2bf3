//! Task board domain model.
//!
//! # Responsibility
//! - Define the task record and the ordered collection that owns it.
//! - Turn every committed mutation into a synchronous `ModelEvent`.
//!
//! # Invariants
//! - The collection is the only owner of its tasks.
//! - Rows are addressed by position; there is no stable task ID.

pub mod list;
pub mod task;
