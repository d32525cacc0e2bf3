//! Flutter bridge surface for the task board core.

pub mod api;
