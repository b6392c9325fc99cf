//! The year-in-review reduction engine.
//!
//! One report build is one pure computation: normalize each entry
//! ([`normalize`]), fold the qualifying ones into running totals
//! ([`accumulator`]), derive the report's aggregate fields ([`finalize`]),
//! classify a persona ([`persona`]), and assemble the final structure
//! ([`report`]). No I/O, no suspension points, no shared state between
//! concurrent builds.

pub mod accumulator;
pub mod finalize;
pub mod normalize;
pub mod persona;
pub mod report;

// Re-exports
pub use finalize::{ActivitySummary, MonthOverview, OverallStats};
pub use normalize::ProgressSnapshot;
pub use persona::{Persona, PersonaInputs, PersonaSummary};
pub use report::{Highlights, OngoingLists, Report, build_report};
