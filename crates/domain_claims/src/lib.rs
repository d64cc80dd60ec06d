//! Claim Decision Pipeline
//!
//! This crate turns the text of a First Notice of Loss (FNOL) into a routing
//! decision: the extracted claim, the mandatory fields it lacks, the queue
//! it belongs in, and an explanation.
//!
//! # Pipeline
//!
//! ```text
//! document text
//!     -> extraction (model, retried)      -> Claim
//!     -> mandatory-field validation       -> missing fields
//!     -> ordered routing rules            -> Route
//!     -> reasoning (model, retried, fallback) -> explanation
//!     -> Decision
//! ```
//!
//! Validation and routing are total functions and never fail. Only the
//! extraction stage can end a request early.

pub mod claim;
pub mod schema;
pub mod validation;
pub mod routing;
pub mod reasoning;
pub mod decision;
pub mod ports;
pub mod orchestrator;
pub mod pipeline;
pub mod error;

pub use claim::{AssetDetails, Claim, IncidentInformation, InvolvedParties, PolicyInformation};
pub use schema::{EmptinessPolicy, FieldPath, MandatoryFieldSpec, STANDARD_MANDATORY_FIELDS};
pub use validation::FieldValidator;
pub use routing::{Route, RouteTrigger, RoutingConfig, RoutingEngine, RoutingOutcome, RoutingRule};
pub use reasoning::{fallback_reasoning, Reasoning, ReasoningSource};
pub use decision::Decision;
pub use ports::{ExtractionPort, ReasoningPort};
pub use orchestrator::ResilientOrchestrator;
pub use pipeline::ClaimPipeline;
pub use error::{ClaimError, MalformedClaimError};
