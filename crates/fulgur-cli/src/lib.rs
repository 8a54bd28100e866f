//! Library half of the Fulgur command-line runner.
//!
//! Split out of the binary so the job pipeline can be exercised from
//! integration tests.

pub mod config;
pub mod runner;
