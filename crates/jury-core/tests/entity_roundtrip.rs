//! Serde roundtrip and JsonSchema validation tests for the exchanged entity types.

use chrono::Utc;
use jury_core::entities::*;
use jury_core::enums::*;
use jury_core::identity::JurorIdentity;
use jury_core::responses::ProgressStats;
use jury_core::scoring::{CriteriaScores, ScoreDraft};
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

roundtrip_and_validate!(
    contestant_roundtrip,
    Contestant,
    Contestant {
        id: "c-0193".into(),
        name: "Anaïse Pierre".into(),
        category: Some("Chant".into()),
        location: Some("Jacmel".into()),
        bio: Some("Twoubadou singer and guitarist.".into()),
        talents: vec!["vocals".into(), "guitar".into()],
        photo_url: None,
        status: ContestantStatus::Active,
    }
);

roundtrip_and_validate!(
    vote_upsert_roundtrip,
    VoteUpsert,
    VoteUpsert {
        jury_member_id: "jm-17".into(),
        contestant_id: "c-0193".into(),
        score: 6.8,
        criteria_scores: CriteriaScores {
            technique: 7,
            creativity: 7,
            stage_presence: 7,
            originality: 6,
        },
        comment: "Confident, a little rushed in the second half.".into(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    jury_vote_record_roundtrip,
    JuryVoteRecord,
    JuryVoteRecord {
        jury_member_id: "jm-17".into(),
        contestant_id: "c-0193".into(),
        score: 7.5,
        criteria_scores: None,
        comment: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    score_draft_roundtrip,
    ScoreDraft,
    ScoreDraft::fresh("c-0193")
);

roundtrip_and_validate!(
    juror_identity_roundtrip,
    JurorIdentity,
    JurorIdentity {
        user_id: "user_2x".into(),
        jury_member_id: "jm-17".into(),
        display_name: "marie".into(),
        email: Some("marie@jury.ht".into()),
    }
);

roundtrip_and_validate!(progress_roundtrip, ProgressStats, ProgressStats::new(3, 8));

#[test]
fn criteria_scores_serialize_with_backend_keys() {
    let value = serde_json::to_value(CriteriaScores::default()).unwrap();
    let keys: Vec<&str> = value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    for criterion in Criterion::ALL {
        assert!(keys.contains(&criterion.key()), "missing {criterion}");
    }
    assert_eq!(keys.len(), Criterion::ALL.len());
}

#[test]
fn upsert_into_record_keeps_original_creation_time() {
    let created = Utc::now() - chrono::TimeDelta::days(1);
    let upsert = VoteUpsert {
        jury_member_id: "jm-17".into(),
        contestant_id: "c-1".into(),
        score: 5.0,
        criteria_scores: CriteriaScores::default(),
        comment: String::new(),
        updated_at: Utc::now(),
    };
    let updated_at = upsert.updated_at;
    let record = upsert.into_record(Some(created));
    assert_eq!(record.created_at, created);
    assert_eq!(record.updated_at, updated_at);
}
