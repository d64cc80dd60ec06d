//! Mandatory field specification
//!
//! Which claim fields must be present is policy, not structure: the set
//! lives here as data so it can change without touching the [`Claim`] shape.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::claim::Claim;
use crate::error::ClaimError;

/// Paths whose absence forces a claim into manual review
pub const STANDARD_MANDATORY_FIELDS: [&str; 8] = [
    "policy_information.policy_number",
    "policy_information.policyholder_name",
    "incident_information.date",
    "incident_information.location",
    "incident_information.description",
    "involved_parties.claimant",
    "asset_details.estimated_damage",
    "claim_type",
];

/// A dotted path into the claim structure, e.g. `asset_details.estimated_damage`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    dotted: String,
    segments: Vec<String>,
}

impl FieldPath {
    /// Parses a dotted path, rejecting paths the claim does not have
    pub fn parse(dotted: &str) -> Result<Self, ClaimError> {
        let dotted = dotted.trim();
        if !Claim::is_leaf_path(dotted) {
            return Err(ClaimError::UnknownFieldPath(dotted.to_string()));
        }
        Ok(Self::known(dotted))
    }

    fn known(dotted: &str) -> Self {
        Self {
            dotted: dotted.to_string(),
            segments: dotted.split('.').map(str::to_string).collect(),
        }
    }

    /// The path as written
    pub fn as_str(&self) -> &str {
        &self.dotted
    }

    /// The path split on `.`
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted)
    }
}

/// Ordered set of mandatory field paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MandatoryFieldSpec {
    paths: Vec<FieldPath>,
}

impl MandatoryFieldSpec {
    /// Builds a specification from dotted paths
    ///
    /// Order is preserved; repeated paths keep their first position.
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::UnknownFieldPath` for a path the claim cannot carry.
    pub fn new<I, S>(paths: I) -> Result<Self, ClaimError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed: Vec<FieldPath> = Vec::new();
        for path in paths {
            let path = FieldPath::parse(path.as_ref())?;
            if !parsed.contains(&path) {
                parsed.push(path);
            }
        }
        Ok(Self { paths: parsed })
    }

    /// The eight fields every FNOL must carry
    pub fn standard() -> Self {
        Self {
            paths: STANDARD_MANDATORY_FIELDS.iter().map(|p| FieldPath::known(p)).collect(),
        }
    }

    pub fn paths(&self) -> &[FieldPath] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Default for MandatoryFieldSpec {
    fn default() -> Self {
        Self::standard()
    }
}

/// What counts as "empty" for a mandatory field
///
/// Absence, blank text and empty lists are always missing. Whether an
/// explicit zero amount (a total-loss denial, a zero-value claim) is missing
/// is a business decision, so it is a switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptinessPolicy {
    pub zero_amount_is_missing: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_spec_order() {
        let spec = MandatoryFieldSpec::standard();
        let paths: Vec<&str> = spec.paths().iter().map(FieldPath::as_str).collect();
        assert_eq!(paths, STANDARD_MANDATORY_FIELDS.to_vec());
    }

    #[test]
    fn test_unknown_path_rejected() {
        let err = MandatoryFieldSpec::new(["policy_information.colour"]).unwrap_err();
        assert!(matches!(err, ClaimError::UnknownFieldPath(p) if p == "policy_information.colour"));
    }

    #[test]
    fn test_duplicates_collapse_in_place() {
        let spec = MandatoryFieldSpec::new(["claim_type", "attachments", "claim_type"]).unwrap();
        let paths: Vec<&str> = spec.paths().iter().map(FieldPath::as_str).collect();
        assert_eq!(paths, vec!["claim_type", "attachments"]);
    }

    #[test]
    fn test_field_path_segments() {
        let path = FieldPath::parse(" asset_details.estimated_damage ").unwrap();
        assert_eq!(path.segments(), ["asset_details", "estimated_damage"]);
        assert_eq!(path.to_string(), "asset_details.estimated_damage");
    }
}
