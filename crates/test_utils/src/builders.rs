//! Test Data Builders
//!
//! Provides a builder for claims. A fresh builder yields a claim with every
//! mandatory field filled in and routed to standard processing, so tests
//! only state the fields they care about.

use domain_claims::claim::{
    AssetDetails, Claim, IncidentInformation, InvolvedParties, PolicyInformation,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Builder for constructing test claims
#[derive(Debug, Clone)]
pub struct ClaimBuilder {
    claim: Claim,
}

impl Default for ClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimBuilder {
    /// Creates a builder for a complete claim above the fast-track threshold
    pub fn new() -> Self {
        Self {
            claim: Claim {
                policy_information: Some(PolicyInformation {
                    policy_number: Some("POL-2024-001234".to_string()),
                    policyholder_name: Some("Jordan Lee".to_string()),
                    effective_dates: None,
                }),
                incident_information: Some(IncidentInformation {
                    date: Some("2024-03-15".to_string()),
                    time: None,
                    location: Some("Springfield".to_string()),
                    description: Some("Rear-ended while parked".to_string()),
                }),
                involved_parties: Some(InvolvedParties {
                    claimant: Some("Jordan Lee".to_string()),
                    third_parties: None,
                    contact_details: None,
                }),
                asset_details: Some(AssetDetails {
                    asset_type: Some("vehicle".to_string()),
                    asset_id: None,
                    estimated_damage: Some(dec!(30000)),
                }),
                claim_type: Some("auto".to_string()),
                attachments: None,
                initial_estimate: None,
            },
        }
    }

    /// Creates a builder for a claim with nothing filled in
    pub fn empty() -> Self {
        Self {
            claim: Claim::default(),
        }
    }

    /// Sets the policy number
    pub fn with_policy_number(mut self, number: impl Into<String>) -> Self {
        self.policy().policy_number = Some(number.into());
        self
    }

    /// Removes the policy number
    pub fn without_policy_number(mut self) -> Self {
        self.policy().policy_number = None;
        self
    }

    /// Sets the estimated damage
    pub fn with_damage(mut self, damage: Decimal) -> Self {
        self.assets().estimated_damage = Some(damage);
        self
    }

    /// Removes the estimated damage
    pub fn without_damage(mut self) -> Self {
        self.assets().estimated_damage = None;
        self
    }

    /// Sets the incident description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.incident().description = Some(description.into());
        self
    }

    /// Removes the incident description
    pub fn without_description(mut self) -> Self {
        self.incident().description = None;
        self
    }

    /// Sets the claim type
    pub fn with_claim_type(mut self, claim_type: impl Into<String>) -> Self {
        self.claim.claim_type = Some(claim_type.into());
        self
    }

    /// Removes the claim type
    pub fn without_claim_type(mut self) -> Self {
        self.claim.claim_type = None;
        self
    }

    /// Sets the claimant
    pub fn with_claimant(mut self, claimant: impl Into<String>) -> Self {
        self.parties().claimant = Some(claimant.into());
        self
    }

    /// Sets attachment filenames
    pub fn with_attachments<I, S>(mut self, attachments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.claim.attachments = Some(attachments.into_iter().map(Into::into).collect());
        self
    }

    /// Builds the claim
    pub fn build(self) -> Claim {
        self.claim
    }

    fn policy(&mut self) -> &mut PolicyInformation {
        self.claim.policy_information.get_or_insert_with(Default::default)
    }

    fn incident(&mut self) -> &mut IncidentInformation {
        self.claim.incident_information.get_or_insert_with(Default::default)
    }

    fn parties(&mut self) -> &mut InvolvedParties {
        self.claim.involved_parties.get_or_insert_with(Default::default)
    }

    fn assets(&mut self) -> &mut AssetDetails {
        self.claim.asset_details.get_or_insert_with(Default::default)
    }
}
