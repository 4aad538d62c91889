//! Rule-based comparison of two questionnaire submissions.
//!
//! The library classifies each shared answer, runs the matching scale analyzer, and
//! assembles a [`comparisons::ComparisonReport`] that callers serialize for storage or
//! display.

pub mod comparisons;
pub mod config;
pub mod error;
pub mod forms;
pub mod submission;
pub mod telemetry;
