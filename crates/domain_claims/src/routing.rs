//! Claim routing rules
//!
//! Routing is an ordered list of rules evaluated first-match-wins. Each
//! rule pairs a predicate with the route it assigns; the predicate also
//! reports *why* it matched so the decision can be explained later without
//! re-deriving it.
//!
//! # Standard rule order
//!
//! ```text
//! 1. completeness_gate     missing mandatory fields      -> Manual review
//! 2. fast_track            damage < threshold            -> Fast-track
//! 3. investigation         description has a keyword     -> Investigation Flag
//! 4. injury_specialist     claim type is "injury"        -> Specialist Queue
//! 5. standard_processing   always                        -> Standard Processing
//! ```
//!
//! The completeness gate runs first: an incomplete claim is never
//! fast-tracked, whatever its damage amount or description.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::claim::Claim;

/// Default damage threshold below which complete claims are fast-tracked
pub const DEFAULT_FAST_TRACK_THRESHOLD: Decimal = dec!(25000);

/// Default description keywords that flag a claim for investigation
pub const DEFAULT_INVESTIGATION_KEYWORDS: [&str; 3] = ["fraud", "inconsistent", "staged"];

/// Processing queue assigned to a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    #[serde(rename = "Fast-track")]
    FastTrack,
    #[serde(rename = "Manual review")]
    ManualReview,
    #[serde(rename = "Investigation Flag")]
    InvestigationFlag,
    #[serde(rename = "Specialist Queue")]
    SpecialistQueue,
    #[serde(rename = "Standard Processing")]
    StandardProcessing,
}

impl Route {
    /// All routes, in standard rule order
    pub const ALL: [Route; 5] = [
        Route::ManualReview,
        Route::FastTrack,
        Route::InvestigationFlag,
        Route::SpecialistQueue,
        Route::StandardProcessing,
    ];

    /// Display name used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::FastTrack => "Fast-track",
            Route::ManualReview => "Manual review",
            Route::InvestigationFlag => "Investigation Flag",
            Route::SpecialistQueue => "Specialist Queue",
            Route::StandardProcessing => "Standard Processing",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The condition that made a rule match
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTrigger {
    /// Mandatory fields were missing
    MissingFields(Vec<String>),
    /// Estimated damage fell under the fast-track threshold
    DamageBelowThreshold { damage: Decimal, threshold: Decimal },
    /// The incident description contained an investigation keyword
    InvestigationKeyword(String),
    /// The claim type was injury
    InjuryClaimType,
    /// No earlier rule applied
    Default,
}

/// Inputs visible to routing predicates
#[derive(Debug, Clone, Copy)]
pub struct RoutingContext<'a> {
    pub claim: &'a Claim,
    pub missing_fields: &'a [String],
}

type Predicate = Box<dyn Fn(&RoutingContext<'_>) -> Option<RouteTrigger> + Send + Sync>;

/// A single routing rule
pub struct RoutingRule {
    name: &'static str,
    route: Route,
    predicate: Predicate,
}

impl fmt::Debug for RoutingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingRule")
            .field("name", &self.name)
            .field("route", &self.route)
            .finish()
    }
}

impl RoutingRule {
    /// Creates a rule from a predicate that returns its trigger on match
    pub fn new<P>(name: &'static str, route: Route, predicate: P) -> Self
    where
        P: Fn(&RoutingContext<'_>) -> Option<RouteTrigger> + Send + Sync + 'static,
    {
        Self {
            name,
            route,
            predicate: Box::new(predicate),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Evaluates the predicate
    pub fn matches(&self, context: &RoutingContext<'_>) -> Option<RouteTrigger> {
        (self.predicate)(context)
    }

    /// Any missing mandatory field forces manual review
    pub fn completeness_gate() -> Self {
        Self::new("completeness_gate", Route::ManualReview, |ctx| {
            (!ctx.missing_fields.is_empty())
                .then(|| RouteTrigger::MissingFields(ctx.missing_fields.to_vec()))
        })
    }

    /// Damage strictly below `threshold` is fast-tracked
    pub fn fast_track(threshold: Decimal) -> Self {
        Self::new("fast_track", Route::FastTrack, move |ctx| {
            let damage = ctx.claim.estimated_damage()?;
            (damage < threshold).then_some(RouteTrigger::DamageBelowThreshold { damage, threshold })
        })
    }

    /// A description containing any keyword, ignoring case, is investigated
    pub fn investigation<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        Self::new("investigation", Route::InvestigationFlag, move |ctx| {
            let description = ctx.claim.description()?.to_lowercase();
            keywords
                .iter()
                .find(|keyword| description.contains(keyword.as_str()))
                .map(|keyword| RouteTrigger::InvestigationKeyword(keyword.clone()))
        })
    }

    /// Injury claims go to the specialist queue
    pub fn injury_specialist() -> Self {
        Self::new("injury_specialist", Route::SpecialistQueue, |ctx| {
            let claim_type = ctx.claim.claim_type.as_deref()?;
            claim_type
                .trim()
                .eq_ignore_ascii_case("injury")
                .then_some(RouteTrigger::InjuryClaimType)
        })
    }

    /// Catch-all
    pub fn standard_processing() -> Self {
        Self::new("standard_processing", Route::StandardProcessing, |_| {
            Some(RouteTrigger::Default)
        })
    }
}

/// Tunable inputs of the standard rule set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingConfig {
    pub fast_track_threshold: Decimal,
    pub investigation_keywords: Vec<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            fast_track_threshold: DEFAULT_FAST_TRACK_THRESHOLD,
            investigation_keywords: DEFAULT_INVESTIGATION_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

/// Result of routing a claim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingOutcome {
    pub route: Route,
    pub trigger: RouteTrigger,
    /// Name of the rule that matched
    pub rule: &'static str,
}

/// First-match-wins rule engine
#[derive(Debug)]
pub struct RoutingEngine {
    rules: Vec<RoutingRule>,
}

impl RoutingEngine {
    /// The five standard rules in their fixed priority order
    pub fn standard(config: &RoutingConfig) -> Self {
        Self::from_rules(vec![
            RoutingRule::completeness_gate(),
            RoutingRule::fast_track(config.fast_track_threshold),
            RoutingRule::investigation(&config.investigation_keywords),
            RoutingRule::injury_specialist(),
            RoutingRule::standard_processing(),
        ])
    }

    /// An engine evaluating `rules` in the given order
    pub fn from_rules(rules: Vec<RoutingRule>) -> Self {
        Self { rules }
    }

    /// Rule names in evaluation order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(RoutingRule::name).collect()
    }

    /// Routes a claim, reporting which rule matched and why
    ///
    /// Always returns exactly one route. If no rule matches (a custom rule
    /// list without a catch-all) the claim goes to standard processing.
    pub fn evaluate(&self, claim: &Claim, missing_fields: &[String]) -> RoutingOutcome {
        let context = RoutingContext { claim, missing_fields };

        let outcome = self
            .rules
            .iter()
            .find_map(|rule| {
                rule.matches(&context).map(|trigger| RoutingOutcome {
                    route: rule.route(),
                    trigger,
                    rule: rule.name(),
                })
            })
            .unwrap_or(RoutingOutcome {
                route: Route::StandardProcessing,
                trigger: RouteTrigger::Default,
                rule: "standard_processing",
            });

        info!(
            rule = outcome.rule,
            route = %outcome.route,
            missing_count = missing_fields.len(),
            "Claim routed"
        );
        outcome
    }

    /// Routes a claim
    pub fn route(&self, claim: &Claim, missing_fields: &[String]) -> Route {
        self.evaluate(claim, missing_fields).route
    }
}

impl Default for RoutingEngine {
    fn default() -> Self {
        Self::standard(&RoutingConfig::default())
    }
}
