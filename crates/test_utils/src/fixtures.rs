//! Pre-built Test Fixtures
//!
//! Canned extraction payloads, shaped as the extraction model returns them,
//! and short FNOL documents for end-to-end tests.

use serde_json::{json, Value};

/// Extraction payload fixtures
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// A complete auto claim under the fast-track threshold
    pub fn fast_track_auto() -> Value {
        json!({
            "policy_information": {
                "policy_number": "POL-2024-001234",
                "policyholder_name": "Jordan Lee",
                "effective_dates": "2024-01-01 to 2024-12-31"
            },
            "incident_information": {
                "date": "2024-03-15",
                "time": "14:30",
                "location": "Main St & 5th Ave, Springfield",
                "description": "Vehicle collision at intersection"
            },
            "involved_parties": {
                "claimant": "Jordan Lee",
                "third_parties": ["Sam Rivera"],
                "contact_details": "jordan.lee@example.com"
            },
            "asset_details": {
                "asset_type": "vehicle",
                "asset_id": "VIN-1HGCM82633A004352",
                "estimated_damage": 15000
            },
            "claim_type": "auto",
            "attachments": ["photos.zip", "police_report.pdf"]
        })
    }

    /// Missing policy number and damage, description mentions staging
    pub fn incomplete_staged() -> Value {
        json!({
            "policy_information": {
                "policyholder_name": "Jordan Lee"
            },
            "incident_information": {
                "date": "2024-03-15",
                "location": "Warehouse district",
                "description": "Witness says the crash looked staged"
            },
            "involved_parties": {
                "claimant": "Jordan Lee"
            },
            "asset_details": {
                "asset_type": "vehicle"
            },
            "claim_type": "auto"
        })
    }

    /// A complete injury claim above the threshold with a clean description
    pub fn injury_specialist() -> Value {
        json!({
            "policy_information": {
                "policy_number": "POL-2024-009876",
                "policyholder_name": "Alex Morgan"
            },
            "incident_information": {
                "date": "2024-05-02",
                "location": "Riverside Park",
                "description": "Slipped on wet stairs and fractured a wrist"
            },
            "involved_parties": {
                "claimant": "Alex Morgan"
            },
            "asset_details": {
                "estimated_damage": 50000
            },
            "claim_type": "injury"
        })
    }

    /// A complete claim above the threshold flagged for investigation
    pub fn suspicious_property() -> Value {
        json!({
            "policy_information": {
                "policy_number": "POL-2023-004455",
                "policyholder_name": "Casey Park"
            },
            "incident_information": {
                "date": "2024-02-11",
                "location": "14 Elm Road",
                "description": "Inconsistent accounts of how the fire started"
            },
            "involved_parties": {
                "claimant": "Casey Park"
            },
            "asset_details": {
                "asset_type": "property",
                "estimated_damage": "120000.50"
            },
            "claim_type": "property"
        })
    }

    /// A payload the schema cannot coerce
    pub fn malformed_damage() -> Value {
        json!({
            "asset_details": {
                "estimated_damage": {"amount": 100}
            }
        })
    }
}

/// Plain-text FNOL documents
pub struct DocumentFixtures;

impl DocumentFixtures {
    pub fn fnol_text() -> &'static str {
        "FIRST NOTICE OF LOSS\n\
         Policy Number: POL-2024-001234\n\
         Policyholder: Jordan Lee\n\
         Date of Loss: 2024-03-15\n\
         Location: Main St & 5th Ave, Springfield\n\
         Description: Vehicle collision at intersection\n\
         Estimated Damage: $15,000\n\
         Claim Type: auto\n"
    }
}
