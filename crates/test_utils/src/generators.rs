//! Property-Based Test Generators
//!
//! Provides proptest strategies for claims and their routing inputs.

use domain_claims::claim::{
    AssetDetails, Claim, IncidentInformation, InvolvedParties, PolicyInformation,
};
use domain_claims::schema::STANDARD_MANDATORY_FIELDS;
use proptest::prelude::*;
use proptest::sample::subsequence;
use rust_decimal::Decimal;

/// Strategy for damage amounts between 0 and 1,000,000 with cents
pub fn damage_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for damage strictly below a positive `threshold`
pub fn damage_below_strategy(threshold: Decimal) -> impl Strategy<Value = Decimal> {
    damage_strategy().prop_map(move |d| d % threshold)
}

/// Strategy for damage at or above `threshold`
pub fn damage_at_or_above_strategy(threshold: Decimal) -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(move |cents| threshold + Decimal::new(cents, 2))
}

/// Strategy for non-blank descriptions that never contain an investigation keyword
pub fn clean_description_strategy() -> impl Strategy<Value = String> {
    "[a-eg-z][a-eg-z ]{0,59}".prop_filter("no investigation keyword", |s| {
        let lower = s.to_lowercase();
        !["fraud", "inconsistent", "staged"].iter().any(|k| lower.contains(k))
    })
}

/// Strategy for descriptions embedding a keyword in random case
pub fn suspicious_description_strategy() -> impl Strategy<Value = String> {
    (
        "[a-z ]{0,20}",
        prop_oneof![Just("fraud"), Just("inconsistent"), Just("staged")],
        any::<bool>(),
        "[a-z ]{0,20}",
    )
        .prop_map(|(prefix, keyword, upper, suffix)| {
            let keyword = if upper { keyword.to_uppercase() } else { keyword.to_string() };
            format!("{prefix}{keyword}{suffix}")
        })
}

/// Strategy for free-form claim types, including case variants of "injury"
pub fn claim_type_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("auto".to_string()),
        Just("property".to_string()),
        Just("injury".to_string()),
        Just("INJURY".to_string()),
        Just("Injury".to_string()),
        "[a-z]{1,12}",
    ]
}

/// Strategy for a non-empty, ordered subset of the standard mandatory paths
pub fn missing_fields_strategy() -> impl Strategy<Value = Vec<String>> {
    subsequence(STANDARD_MANDATORY_FIELDS.to_vec(), 1..=STANDARD_MANDATORY_FIELDS.len())
        .prop_map(|paths| paths.into_iter().map(str::to_string).collect())
}

fn text() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop_oneof![Just(String::new()), Just("  ".to_string()), "[A-Za-z0-9 ]{1,24}"])
}

fn amount() -> impl Strategy<Value = Option<Decimal>> {
    prop::option::of(damage_strategy())
}

/// Strategy for arbitrary claims, any field may be absent or blank
pub fn claim_strategy() -> impl Strategy<Value = Claim> {
    let policy = prop::option::of((text(), text(), text()).prop_map(
        |(policy_number, policyholder_name, effective_dates)| PolicyInformation {
            policy_number,
            policyholder_name,
            effective_dates,
        },
    ));
    let incident = prop::option::of(
        (text(), text(), text(), prop::option::of(prop_oneof![
            clean_description_strategy(),
            suspicious_description_strategy(),
        ]))
            .prop_map(|(date, time, location, description)| IncidentInformation {
                date,
                time,
                location,
                description,
            }),
    );
    let parties = prop::option::of(
        (text(), prop::option::of(prop::collection::vec("[A-Za-z ]{1,12}", 0..3)), text())
            .prop_map(|(claimant, third_parties, contact_details)| InvolvedParties {
                claimant,
                third_parties,
                contact_details,
            }),
    );
    let assets = prop::option::of((text(), text(), amount()).prop_map(
        |(asset_type, asset_id, estimated_damage)| AssetDetails {
            asset_type,
            asset_id,
            estimated_damage,
        },
    ));

    (
        policy,
        incident,
        parties,
        assets,
        prop::option::of(claim_type_strategy()),
        amount(),
    )
        .prop_map(
            |(policy_information, incident_information, involved_parties, asset_details, claim_type, initial_estimate)| {
                Claim {
                    policy_information,
                    incident_information,
                    involved_parties,
                    asset_details,
                    claim_type,
                    attachments: None,
                    initial_estimate,
                }
            },
        )
}
