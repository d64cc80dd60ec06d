//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claims triage test suite.
//!
//! # Modules
//!
//! - `fixtures`: Canned extraction payloads and FNOL documents
//! - `builders`: Builder for claims with sensible defaults
//! - `assertions`: Assertion helpers for decisions
//! - `generators`: Property-based test data generators
//!
//! Depending on this crate switches on the `mock` feature of
//! `domain_claims`, so its scripted ports are available to every suite.

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;

pub use domain_claims::ports::mock::{ScriptedExtractionPort, ScriptedReasoningPort};
