//! Mandatory field validation
//!
//! Resolves every path of a [`MandatoryFieldSpec`] against a claim and
//! reports the ones that are missing, in declaration order. Validation
//! never fails; an incomplete claim is a routing input, not an error.

use rust_decimal::Decimal;
use tracing::debug;

use crate::claim::{Claim, FieldValue};
use crate::schema::{EmptinessPolicy, MandatoryFieldSpec};

/// Validator for mandatory claim fields
///
/// # Examples
///
/// ```rust
/// use domain_claims::claim::Claim;
/// use domain_claims::validation::FieldValidator;
///
/// let missing = FieldValidator::standard().validate(&Claim::default());
/// assert_eq!(missing.len(), 8);
/// assert_eq!(missing[0], "policy_information.policy_number");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldValidator {
    spec: MandatoryFieldSpec,
    policy: EmptinessPolicy,
}

impl FieldValidator {
    /// Creates a validator for the given specification and emptiness policy
    pub fn new(spec: MandatoryFieldSpec, policy: EmptinessPolicy) -> Self {
        Self { spec, policy }
    }

    /// The standard eight mandatory fields, explicit zero amounts present
    pub fn standard() -> Self {
        Self::default()
    }

    pub fn spec(&self) -> &MandatoryFieldSpec {
        &self.spec
    }

    pub fn policy(&self) -> EmptinessPolicy {
        self.policy
    }

    /// Returns the dotted paths of every missing mandatory field
    ///
    /// The result follows the mandatory-field order and is empty when the
    /// claim is complete.
    pub fn validate(&self, claim: &Claim) -> Vec<String> {
        let missing: Vec<String> = self
            .spec
            .paths()
            .iter()
            .filter(|path| !self.is_present(claim.field(path)))
            .map(|path| path.as_str().to_string())
            .collect();

        debug!(
            checked = self.spec.len(),
            missing_count = missing.len(),
            "Mandatory field validation complete"
        );
        missing
    }

    fn is_present(&self, value: Option<FieldValue<'_>>) -> bool {
        match value {
            None => false,
            Some(FieldValue::Text(text)) => !text.trim().is_empty(),
            Some(FieldValue::List(items)) => !items.is_empty(),
            Some(FieldValue::Amount(amount)) => {
                !(self.policy.zero_amount_is_missing && amount == Decimal::ZERO)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::AssetDetails;
    use rust_decimal_macros::dec;

    fn claim_with_damage(damage: Decimal) -> Claim {
        Claim {
            asset_details: Some(AssetDetails {
                estimated_damage: Some(damage),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_damage_present_by_default() {
        let missing = FieldValidator::standard().validate(&claim_with_damage(dec!(0)));
        assert!(!missing.contains(&"asset_details.estimated_damage".to_string()));
    }

    #[test]
    fn test_zero_damage_missing_when_configured() {
        let validator = FieldValidator::new(
            MandatoryFieldSpec::standard(),
            EmptinessPolicy { zero_amount_is_missing: true },
        );
        let missing = validator.validate(&claim_with_damage(dec!(0.00)));
        assert!(missing.contains(&"asset_details.estimated_damage".to_string()));
    }

    #[test]
    fn test_blank_text_is_missing() {
        let claim = Claim {
            claim_type: Some("   ".to_string()),
            ..Default::default()
        };
        let missing = FieldValidator::standard().validate(&claim);
        assert!(missing.contains(&"claim_type".to_string()));
    }
}
