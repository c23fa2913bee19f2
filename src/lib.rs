//! Tutor Scheduler - weekly session generation for a tutoring platform
//!
//! Expands standing weekly enrollments into concrete, dated sessions for a
//! window, skipping slots that are already booked and resolving wall-clock
//! times across daylight-saving transitions in a configured reference
//! timezone.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
