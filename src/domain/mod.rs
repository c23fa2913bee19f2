//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, status, timestamps, errors)
//! - `scheduling` - Enrollments, sessions and the weekly recurrence expander

pub mod foundation;
pub mod scheduling;
