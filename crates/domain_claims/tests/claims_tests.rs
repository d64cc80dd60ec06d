//! Tests for claim coercion, mandatory-field validation and routing

use proptest::prelude::*;
use rust_decimal_macros::dec;
use serde_json::json;

use domain_claims::claim::Claim;
use domain_claims::reasoning::fallback_reasoning;
use domain_claims::routing::{Route, RouteTrigger, RoutingConfig, RoutingEngine, RoutingRule};
use domain_claims::schema::{EmptinessPolicy, MandatoryFieldSpec};
use domain_claims::validation::FieldValidator;

use test_utils::{
    assert_in_mandatory_order, claim_strategy, claim_type_strategy, clean_description_strategy,
    damage_at_or_above_strategy, damage_below_strategy, damage_strategy, missing_fields_strategy,
    suspicious_description_strategy, ClaimBuilder, ClaimFixtures,
};

// ============================================================================
// Coercion Tests
// ============================================================================

mod coercion_tests {
    use super::*;

    #[test]
    fn test_fixture_payloads_coerce() {
        for payload in [
            ClaimFixtures::fast_track_auto(),
            ClaimFixtures::incomplete_staged(),
            ClaimFixtures::injury_specialist(),
            ClaimFixtures::suspicious_property(),
        ] {
            assert!(Claim::coerce(payload).is_ok());
        }
    }

    #[test]
    fn test_numeric_string_damage_accepted() {
        let claim = Claim::coerce(ClaimFixtures::suspicious_property()).unwrap();
        assert_eq!(claim.estimated_damage(), Some(dec!(120000.50)));
    }

    #[test]
    fn test_null_groups_are_absent() {
        let claim = Claim::coerce(json!({
            "policy_information": null,
            "claim_type": "auto"
        }))
        .unwrap();
        assert!(claim.policy_information.is_none());
        assert_eq!(claim.claim_type.as_deref(), Some("auto"));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let claim = Claim::coerce(json!({ "claim_type": "auto", "confidence": 0.9 })).unwrap();
        assert_eq!(claim.claim_type.as_deref(), Some("auto"));
    }

    #[test]
    fn test_malformed_damage_reports_path() {
        let err = Claim::coerce(ClaimFixtures::malformed_damage()).unwrap_err();
        assert_eq!(err.path, "asset_details.estimated_damage");
        assert_eq!(err.found, "object");
    }

    #[test]
    fn test_out_of_range_damage_reported_as_number() {
        let err = Claim::coerce(json!({ "asset_details": { "estimated_damage": 1e30 } })).unwrap_err();
        assert_eq!(err.path, "asset_details.estimated_damage");
        assert_eq!(err.expected, "a number");
        assert_eq!(err.found, "number");
    }

    #[test]
    fn test_unparsable_damage_string_reported_as_string() {
        let err = Claim::coerce(json!({ "asset_details": { "estimated_damage": "about ten grand" } }))
            .unwrap_err();
        assert_eq!(err.path, "asset_details.estimated_damage");
        assert_eq!(err.found, "string");
    }

    #[test]
    fn test_group_of_wrong_type_reports_group() {
        let err = Claim::coerce(json!({ "involved_parties": "Jordan Lee" })).unwrap_err();
        assert_eq!(err.path, "involved_parties");
    }

    #[test]
    fn test_list_item_of_wrong_type_reports_index() {
        let err = Claim::coerce(json!({ "attachments": ["a.pdf", 7] })).unwrap_err();
        assert_eq!(err.path, "attachments[1]");
    }

    #[test]
    fn test_serialized_claim_omits_absent_fields() {
        let claim = Claim::coerce(ClaimFixtures::incomplete_staged()).unwrap();
        let value = serde_json::to_value(&claim).unwrap();

        assert!(value["policy_information"].get("policy_number").is_none());
        assert!(value["asset_details"].get("estimated_damage").is_none());
        assert_eq!(value["claim_type"], "auto");
    }

    #[test]
    fn test_serialized_damage_is_a_number() {
        let claim = Claim::coerce(ClaimFixtures::fast_track_auto()).unwrap();
        let value = serde_json::to_value(&claim).unwrap();
        assert!(value["asset_details"]["estimated_damage"].is_number());
    }
}

// ============================================================================
// Validation Tests
// ============================================================================

mod validation_tests {
    use super::*;

    #[test]
    fn test_complete_claim_has_no_missing_fields() {
        let missing = FieldValidator::standard().validate(&ClaimBuilder::new().build());
        assert!(missing.is_empty());
    }

    #[test]
    fn test_empty_claim_misses_every_mandatory_field_in_order() {
        let missing = FieldValidator::standard().validate(&ClaimBuilder::empty().build());
        assert_eq!(missing.len(), 8);
        assert_in_mandatory_order(&missing);
    }

    #[test]
    fn test_missing_fields_reported_in_spec_order() {
        let claim = ClaimBuilder::new()
            .without_claim_type()
            .without_damage()
            .without_policy_number()
            .build();

        assert_eq!(
            FieldValidator::standard().validate(&claim),
            vec![
                "policy_information.policy_number",
                "asset_details.estimated_damage",
                "claim_type",
            ]
        );
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let claim = ClaimBuilder::new().with_policy_number("").build();
        assert_eq!(
            FieldValidator::standard().validate(&claim),
            vec!["policy_information.policy_number"]
        );
    }

    #[test]
    fn test_zero_damage_policy_is_configurable() {
        let claim = ClaimBuilder::new().with_damage(dec!(0)).build();

        assert!(FieldValidator::standard().validate(&claim).is_empty());

        let strict = FieldValidator::new(
            MandatoryFieldSpec::standard(),
            EmptinessPolicy { zero_amount_is_missing: true },
        );
        assert_eq!(strict.validate(&claim), vec!["asset_details.estimated_damage"]);
    }

    #[test]
    fn test_custom_spec_controls_what_is_checked() {
        let spec = MandatoryFieldSpec::new(["attachments", "claim_type"]).unwrap();
        let validator = FieldValidator::new(spec, EmptinessPolicy::default());

        let missing = validator.validate(&ClaimBuilder::new().build());
        assert_eq!(missing, vec!["attachments"]);

        let with_files = ClaimBuilder::new().with_attachments(["photo.jpg"]).build();
        assert!(validator.validate(&with_files).is_empty());
    }

    #[test]
    fn test_empty_attachment_list_counts_as_missing() {
        let spec = MandatoryFieldSpec::new(["attachments"]).unwrap();
        let validator = FieldValidator::new(spec, EmptinessPolicy::default());
        let claim = ClaimBuilder::new().with_attachments(Vec::<String>::new()).build();
        assert_eq!(validator.validate(&claim), vec!["attachments"]);
    }

    proptest! {
        #[test]
        fn test_validation_is_idempotent(claim in claim_strategy()) {
            let validator = FieldValidator::standard();
            let first = validator.validate(&claim);
            let second = validator.validate(&claim);
            prop_assert_eq!(&first, &second);
            assert_in_mandatory_order(&first);
        }
    }
}

// ============================================================================
// Routing Tests
// ============================================================================

mod routing_tests {
    use super::*;

    fn route(claim: &Claim) -> Route {
        let missing = FieldValidator::standard().validate(claim);
        RoutingEngine::default().route(claim, &missing)
    }

    #[test]
    fn test_example_fast_track() {
        let claim = Claim::coerce(ClaimFixtures::fast_track_auto()).unwrap();
        let missing = FieldValidator::standard().validate(&claim);

        assert!(missing.is_empty());
        assert_eq!(RoutingEngine::default().route(&claim, &missing), Route::FastTrack);
    }

    #[test]
    fn test_example_incomplete_staged_goes_to_manual_review() {
        let claim = Claim::coerce(ClaimFixtures::incomplete_staged()).unwrap();
        let missing = FieldValidator::standard().validate(&claim);

        assert_eq!(
            missing,
            vec!["policy_information.policy_number", "asset_details.estimated_damage"]
        );
        assert_eq!(RoutingEngine::default().route(&claim, &missing), Route::ManualReview);
    }

    #[test]
    fn test_example_injury_goes_to_specialist() {
        let claim = Claim::coerce(ClaimFixtures::injury_specialist()).unwrap();
        assert_eq!(route(&claim), Route::SpecialistQueue);
    }

    #[test]
    fn test_suspicious_property_is_flagged() {
        let claim = Claim::coerce(ClaimFixtures::suspicious_property()).unwrap();
        assert_eq!(route(&claim), Route::InvestigationFlag);
    }

    #[test]
    fn test_incomplete_cheap_claim_never_fast_tracked() {
        let claim = ClaimBuilder::new().with_damage(dec!(100)).without_claim_type().build();
        assert_eq!(route(&claim), Route::ManualReview);
    }

    #[test]
    fn test_fast_track_beats_investigation() {
        let claim = ClaimBuilder::new()
            .with_damage(dec!(5000))
            .with_description("possible fraud")
            .build();
        assert_eq!(route(&claim), Route::FastTrack);
    }

    #[test]
    fn test_investigation_beats_injury() {
        let claim = ClaimBuilder::new()
            .with_claim_type("injury")
            .with_description("Inconsistent statements from the claimant")
            .build();
        assert_eq!(route(&claim), Route::InvestigationFlag);
    }

    #[test]
    fn test_injury_match_ignores_case_and_whitespace() {
        let claim = ClaimBuilder::new().with_claim_type("  INJURY ").build();
        assert_eq!(route(&claim), Route::SpecialistQueue);
    }

    #[test]
    fn test_injury_must_match_exactly() {
        let claim = ClaimBuilder::new().with_claim_type("personal injury").build();
        assert_eq!(route(&claim), Route::StandardProcessing);
    }

    #[test]
    fn test_absent_damage_falls_through() {
        // Damage is not mandatory under a custom spec, so routing sees no amount
        let spec = MandatoryFieldSpec::new(["claim_type"]).unwrap();
        let validator = FieldValidator::new(spec, EmptinessPolicy::default());
        let claim = ClaimBuilder::new().without_damage().build();

        let missing = validator.validate(&claim);
        assert_eq!(RoutingEngine::default().route(&claim, &missing), Route::StandardProcessing);
    }

    #[test]
    fn test_custom_threshold_and_keywords() {
        let engine = RoutingEngine::standard(&RoutingConfig {
            fast_track_threshold: dec!(1000),
            investigation_keywords: vec!["Arson".to_string(), "  ".to_string()],
        });

        let cheap = ClaimBuilder::new().with_damage(dec!(999)).build();
        assert_eq!(engine.route(&cheap, &[]), Route::FastTrack);

        let arson = ClaimBuilder::new()
            .with_damage(dec!(5000))
            .with_description("Suspected arson in garage")
            .build();
        let outcome = engine.evaluate(&arson, &[]);
        assert_eq!(outcome.route, Route::InvestigationFlag);
        assert_eq!(outcome.trigger, RouteTrigger::InvestigationKeyword("arson".to_string()));

        let staged = ClaimBuilder::new().with_description("looks staged").build();
        assert_eq!(engine.route(&staged, &[]), Route::StandardProcessing);
    }

    #[test]
    fn test_outcome_reports_missing_fields_trigger() {
        let missing = vec!["claim_type".to_string()];
        let outcome = RoutingEngine::default().evaluate(&ClaimBuilder::new().build(), &missing);

        assert_eq!(outcome.rule, "completeness_gate");
        assert_eq!(outcome.trigger, RouteTrigger::MissingFields(missing));
    }

    #[test]
    fn test_rules_are_reorderable() {
        let engine = RoutingEngine::from_rules(vec![
            RoutingRule::injury_specialist(),
            RoutingRule::completeness_gate(),
        ]);
        let claim = ClaimBuilder::new().with_claim_type("injury").build();
        let missing = vec!["policy_information.policy_number".to_string()];

        assert_eq!(engine.route(&claim, &missing), Route::SpecialistQueue);
        assert_eq!(engine.rule_names(), vec!["injury_specialist", "completeness_gate"]);
    }

    #[test]
    fn test_fallback_reasoning_mentions_trigger() {
        let claim = ClaimBuilder::new().with_damage(dec!(15000)).build();
        let outcome = RoutingEngine::default().evaluate(&claim, &[]);
        let text = fallback_reasoning(&outcome);

        assert!(text.contains("Fast-track"));
        assert!(text.contains("15000"));
    }

    proptest! {
        #[test]
        fn test_missing_fields_always_manual_review(
            claim in claim_strategy(),
            missing in missing_fields_strategy(),
        ) {
            prop_assert_eq!(RoutingEngine::default().route(&claim, &missing), Route::ManualReview);
        }

        #[test]
        fn test_complete_cheap_claims_fast_tracked(
            damage in damage_below_strategy(dec!(25000)),
            description in prop_oneof![clean_description_strategy(), suspicious_description_strategy()],
            claim_type in claim_type_strategy(),
        ) {
            let claim = ClaimBuilder::new()
                .with_damage(damage)
                .with_description(description)
                .with_claim_type(claim_type)
                .build();
            prop_assert_eq!(RoutingEngine::default().route(&claim, &[]), Route::FastTrack);
        }

        #[test]
        fn test_keyword_claims_flagged(
            damage in damage_at_or_above_strategy(dec!(25000)),
            description in suspicious_description_strategy(),
            claim_type in claim_type_strategy(),
        ) {
            let claim = ClaimBuilder::new()
                .with_damage(damage)
                .with_description(description)
                .with_claim_type(claim_type)
                .build();
            prop_assert_eq!(RoutingEngine::default().route(&claim, &[]), Route::InvestigationFlag);
        }

        #[test]
        fn test_clean_injury_claims_go_to_specialist(
            damage in damage_at_or_above_strategy(dec!(25000)),
            description in clean_description_strategy(),
        ) {
            let claim = ClaimBuilder::new()
                .with_damage(damage)
                .with_description(description)
                .with_claim_type("Injury")
                .build();
            prop_assert_eq!(RoutingEngine::default().route(&claim, &[]), Route::SpecialistQueue);
        }

        #[test]
        fn test_routing_is_total(claim in claim_strategy(), damage in damage_strategy()) {
            let claim = Claim {
                initial_estimate: Some(damage),
                ..claim
            };
            let missing = FieldValidator::standard().validate(&claim);
            let route = RoutingEngine::default().route(&claim, &missing);

            prop_assert!(Route::ALL.contains(&route));
            if !missing.is_empty() {
                prop_assert_eq!(route, Route::ManualReview);
            }
        }
    }
}
