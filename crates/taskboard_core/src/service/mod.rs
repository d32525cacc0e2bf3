//! Board use-case layer.
//!
//! # Responsibility
//! - Aggregate statistics over the list model.
//! - Keep UI/FFI layers decoupled from collection details.

pub mod task_controller;
