//! Custom Test Assertions
//!
//! Assertion helpers for decisions that print the whole decision on failure.

use domain_claims::decision::Decision;
use domain_claims::routing::Route;
use domain_claims::schema::STANDARD_MANDATORY_FIELDS;

/// Asserts the decision's route
///
/// # Panics
///
/// Panics with the full decision if the route differs
pub fn assert_route(decision: &Decision, expected: Route) {
    assert_eq!(
        decision.route(),
        expected,
        "Unexpected route {}, expected {}; decision: {:?}",
        decision.route(),
        expected,
        decision
    );
}

/// Asserts the decision carries a non-blank explanation
pub fn assert_has_reasoning(decision: &Decision) {
    assert!(
        !decision.reasoning().trim().is_empty(),
        "Expected non-empty reasoning, decision: {:?}",
        decision
    );
}

/// Asserts that `missing` lists standard mandatory paths in their declared order
pub fn assert_in_mandatory_order(missing: &[String]) {
    let positions: Vec<usize> = missing
        .iter()
        .map(|path| {
            STANDARD_MANDATORY_FIELDS
                .iter()
                .position(|p| p == path)
                .unwrap_or_else(|| panic!("{path} is not a standard mandatory field"))
        })
        .collect();

    assert!(
        positions.windows(2).all(|w| w[0] < w[1]),
        "Missing fields out of declared order: {:?}",
        missing
    );
}
