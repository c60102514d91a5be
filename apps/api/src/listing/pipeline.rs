//! Generation Pipeline — primary call, per-field repair, single length revision.
//!
//! Flow: primary prompt → parse → repair each missing field (fixed order) →
//!       revise mls_description once if outside its length band → result.
//!
//! Every model call is awaited before the next one starts. Nothing is cached
//! between calls or between generations.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::listing::models::{
    char_count, GenerationResult, ListingInput, OutputField, REQUIRED_FIELDS,
};
use crate::listing::parser::{extract_json, Draft};
use crate::listing::prompt_builder::{
    build_length_revision_prompt, build_primary_prompt, build_repair_prompt, build_shared_context,
};
use crate::llm_client::prompts::COPYWRITER_SYSTEM;
use crate::llm_client::CompletionModel;

pub const REPAIR_TEMPERATURE: f32 = 0.45;

/// What to do when a repair call returns text that is not JSON.
/// Transport errors abort under either policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RepairFailurePolicy {
    /// Abort the whole generation.
    #[default]
    Abort,
    /// Log it and leave the field empty.
    LeaveEmpty,
}

impl FromStr for RepairFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(RepairFailurePolicy::Abort),
            "leave_empty" => Ok(RepairFailurePolicy::LeaveEmpty),
            other => Err(format!("unknown repair failure policy '{other}'")),
        }
    }
}

impl fmt::Display for RepairFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepairFailurePolicy::Abort => f.write_str("abort"),
            RepairFailurePolicy::LeaveEmpty => f.write_str("leave_empty"),
        }
    }
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub result: GenerationResult,
    /// Fields that were missing after the primary call and present after repair.
    pub repaired_fields: Vec<OutputField>,
    /// True when a length revision call was issued, whether or not it helped.
    pub length_revised: bool,
    pub model_calls: u32,
}

// ────────────────────────────────────────────────────────────────────────────
// Field helpers
// ────────────────────────────────────────────────────────────────────────────

/// A field is present iff it is a string that is non-empty after trimming.
pub fn is_present(draft: &Draft, field: OutputField) -> bool {
    draft
        .get(field.key())
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty())
}

/// Required fields that are absent, non-string or blank, in repair order.
pub fn missing_fields(draft: &Draft) -> Vec<OutputField> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|f| !is_present(draft, *f))
        .collect()
}

/// Field-level merge: keys in `updates` fill absent or unusable entries in
/// `draft`. A key that already holds a usable string is left untouched.
pub fn merge_preserving(draft: &mut Draft, updates: Draft) {
    for (key, value) in updates {
        let existing_usable = draft
            .get(&key)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.trim().is_empty());

        if !existing_usable {
            draft.insert(key, value);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the generation state machine for one listing.
///
/// Parse and transport errors from the primary call are fatal. Repair failures
/// follow `policy`. The length stage never fails on unparseable output.
pub async fn generate_listing(
    llm: &dyn CompletionModel,
    input: &ListingInput,
    policy: RepairFailurePolicy,
) -> Result<GenerationReport, AppError> {
    let mut calls = 0u32;

    // Step 1: primary call
    let primary_prompt = build_primary_prompt(input);
    let raw = call_model(
        llm,
        &primary_prompt,
        input.detail_level.primary_temperature(),
        &mut calls,
    )
    .await?;
    let mut draft = extract_json(&raw)?;

    // Step 2: validate and repair
    let repaired_fields = repair_missing(llm, input, &mut draft, policy, &mut calls).await?;

    // Step 3: length enforcement
    let length_revised = enforce_length(llm, input, &mut draft, &mut calls).await?;

    let result = GenerationResult::from_draft(&draft);
    let bounds = input.length_bounds();
    let final_len = char_count(&result.mls_description);
    if bounds.contains(final_len) {
        info!(
            "Generation complete: mls_description {} chars (limit {}), {} model calls",
            final_len, bounds.max, calls
        );
    } else {
        warn!(
            "Generation complete with mls_description out of range: {} chars (want {}..={})",
            final_len, bounds.min, bounds.max
        );
    }

    Ok(GenerationReport {
        result,
        repaired_fields,
        length_revised,
        model_calls: calls,
    })
}

/// Issues one repair call per missing field, in `REQUIRED_FIELDS` order.
async fn repair_missing(
    llm: &dyn CompletionModel,
    input: &ListingInput,
    draft: &mut Draft,
    policy: RepairFailurePolicy,
    calls: &mut u32,
) -> Result<Vec<OutputField>, AppError> {
    let missing = missing_fields(draft);
    if missing.is_empty() {
        return Ok(Vec::new());
    }

    info!(
        "Primary response missing {} field(s): {:?}",
        missing.len(),
        missing.iter().map(|f| f.key()).collect::<Vec<_>>()
    );

    let shared_context = build_shared_context(input);
    let mut repaired = Vec::new();

    for field in missing {
        let prompt = build_repair_prompt(input, field, &shared_context);
        let raw = call_model(llm, &prompt, REPAIR_TEMPERATURE, calls).await?;

        match extract_json(&raw) {
            Ok(partial) => merge_preserving(draft, partial),
            Err(e) if policy == RepairFailurePolicy::LeaveEmpty => {
                warn!("Repair of '{}' returned unparseable output, leaving empty: {e}", field.key());
                continue;
            }
            Err(e) => return Err(e.into()),
        }

        if is_present(draft, field) {
            repaired.push(field);
        } else {
            warn!("Repair of '{}' did not produce a usable value", field.key());
        }
    }

    Ok(repaired)
}

/// Issues at most one revision when mls_description falls outside its band.
/// Returns whether a revision call was made.
async fn enforce_length(
    llm: &dyn CompletionModel,
    input: &ListingInput,
    draft: &mut Draft,
    calls: &mut u32,
) -> Result<bool, AppError> {
    let bounds = input.length_bounds();
    let current = draft
        .get(OutputField::MlsDescription.key())
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
        .to_string();
    let current_len = char_count(&current);

    if bounds.contains(current_len) {
        return Ok(false);
    }

    info!(
        "mls_description is {} chars, outside {}..={}, requesting one revision",
        current_len, bounds.min, bounds.max
    );

    let prompt = build_length_revision_prompt(input, &current);
    let raw = call_model(
        llm,
        &prompt,
        input.detail_level.revision_temperature(),
        calls,
    )
    .await?;

    let revised = match extract_json(&raw) {
        Ok(revision) => revision
            .get(OutputField::MlsDescription.key())
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        Err(e) => {
            warn!("Length revision returned unparseable output, keeping draft: {e}");
            String::new()
        }
    };

    if revised.is_empty() {
        warn!("Length revision produced no text, keeping the current draft");
    } else {
        info!(
            "Length revision: {} → {} chars",
            current_len,
            char_count(&revised)
        );
        draft.insert(
            OutputField::MlsDescription.key().to_string(),
            Value::String(revised),
        );
    }

    Ok(true)
}

async fn call_model(
    llm: &dyn CompletionModel,
    prompt: &str,
    temperature: f32,
    calls: &mut u32,
) -> Result<String, AppError> {
    *calls += 1;
    debug!("Model call #{} at temperature {}", calls, temperature);
    Ok(llm.complete(COPYWRITER_SYSTEM, prompt, temperature).await?)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::models::{DetailLevel, PropertyType, Tone};
    use crate::llm_client::testing::ScriptedModel;
    use crate::llm_client::LlmError;
    use serde_json::json;

    fn input(detail_level: DetailLevel) -> ListingInput {
        ListingInput {
            address: "123 Main St".to_string(),
            city: "San Diego".to_string(),
            state: "CA".to_string(),
            zip_code: "92101".to_string(),
            beds: Some(3.0),
            baths: Some(2.0),
            sqft: Some(1600),
            lot_size: Some(5000),
            year_built: Some(1995),
            property_type: PropertyType::SingleFamily,
            price: Some(799_000),
            keywords: vec!["pool".to_string()],
            upgrades_bullets: "- Outdoor Living: Pool (in-ground)".to_string(),
            neighborhood_notes: "Near parks".to_string(),
            target_buyer_profile: "Move-up buyers".to_string(),
            tone: Tone::Professional,
            mls_char_limit: 1000,
            detail_level,
            highlight_features: Vec::new(),
        }
    }

    fn text_of_len(n: usize) -> String {
        "a".repeat(n)
    }

    fn full_response(desc_len: usize) -> String {
        json!({
            "mls_description": text_of_len(desc_len),
            "social_caption": "Sunny home near the park.",
            "instagram_hashtags": "#home #sandiego",
            "video_script_60s": "Welcome home."
        })
        .to_string()
    }

    fn draft(value: serde_json::Value) -> Draft {
        value.as_object().cloned().unwrap()
    }

    // ── field helpers ────────────────────────────────────────────────────────

    #[test]
    fn test_merge_adds_without_dropping() {
        let mut d = draft(json!({"x": "old"}));
        merge_preserving(&mut d, draft(json!({"y": "new"})));
        assert_eq!(Value::Object(d), json!({"x": "old", "y": "new"}));
    }

    #[test]
    fn test_merge_keeps_usable_value_and_fills_unusable_one() {
        let mut d = draft(json!({"x": "old", "y": "  ", "z": 5}));
        merge_preserving(&mut d, draft(json!({"x": "new", "y": "filled", "z": "text"})));
        assert_eq!(d["x"], json!("old"));
        assert_eq!(d["y"], json!("filled"));
        assert_eq!(d["z"], json!("text"));
    }

    #[test]
    fn test_merge_never_blanks_a_valid_field() {
        let mut d = draft(json!({"x": "old", "y": ""}));
        merge_preserving(&mut d, draft(json!({"x": "  ", "y": null})));
        assert_eq!(d["x"], json!("old"));
        assert_eq!(d["y"], json!(null));
    }

    #[test]
    fn test_missing_fields_detects_absent_blank_and_non_string() {
        let d = draft(json!({
            "mls_description": "ok",
            "social_caption": "   ",
            "instagram_hashtags": ["#a"]
        }));
        assert_eq!(
            missing_fields(&d),
            vec![
                OutputField::SocialCaption,
                OutputField::InstagramHashtags,
                OutputField::VideoScript60s
            ]
        );
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            "abort".parse::<RepairFailurePolicy>(),
            Ok(RepairFailurePolicy::Abort)
        );
        assert_eq!(
            " Leave_Empty ".parse::<RepairFailurePolicy>(),
            Ok(RepairFailurePolicy::LeaveEmpty)
        );
        assert!("retry".parse::<RepairFailurePolicy>().is_err());
        assert_eq!(RepairFailurePolicy::default(), RepairFailurePolicy::Abort);
    }

    // ── pipeline ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_complete_primary_makes_no_extra_calls() {
        let model = ScriptedModel::new().reply(full_response(950));
        let report = generate_listing(
            &model,
            &input(DetailLevel::Standard),
            RepairFailurePolicy::Abort,
        )
        .await
        .unwrap();

        assert_eq!(model.call_count(), 1);
        assert_eq!(report.model_calls, 1);
        assert!(report.repaired_fields.is_empty());
        assert!(!report.length_revised);
        assert_eq!(report.result.social_caption, "Sunny home near the park.");
    }

    #[tokio::test]
    async fn test_primary_temperature_follows_detail_level() {
        for (level, expected) in [
            (DetailLevel::Standard, 0.5),
            (DetailLevel::Descriptive, 0.65),
            (DetailLevel::Concise, 0.35),
        ] {
            let model = ScriptedModel::new().reply(full_response(950));
            generate_listing(&model, &input(level), RepairFailurePolicy::Abort)
                .await
                .unwrap();
            let calls = model.calls();
            assert_eq!(calls[0].temperature, expected);
            assert_eq!(calls[0].system, COPYWRITER_SYSTEM);
        }
    }

    #[tokio::test]
    async fn test_only_description_triggers_three_repairs_in_order() {
        let model = ScriptedModel::new()
            .reply(json!({"mls_description": text_of_len(950)}).to_string())
            .reply(r#"{"social_caption": "Caption."}"#)
            .reply(r##"{"instagram_hashtags": "#a #b"}"##)
            .reply(r#"{"video_script_60s": "Script."}"#);

        let report = generate_listing(
            &model,
            &input(DetailLevel::Standard),
            RepairFailurePolicy::Abort,
        )
        .await
        .unwrap();

        let calls = model.calls();
        assert_eq!(calls.len(), 4);
        assert!(calls[1].user.contains("\"social_caption\""));
        assert!(calls[2].user.contains("\"instagram_hashtags\""));
        assert!(calls[3].user.contains("\"video_script_60s\""));
        for call in &calls[1..] {
            assert_eq!(call.temperature, REPAIR_TEMPERATURE);
        }

        assert_eq!(
            report.repaired_fields,
            vec![
                OutputField::SocialCaption,
                OutputField::InstagramHashtags,
                OutputField::VideoScript60s
            ]
        );
        assert_eq!(report.result.mls_description, text_of_len(950));
        assert_eq!(report.result.social_caption, "Caption.");
        assert_eq!(report.result.instagram_hashtags, "#a #b");
        assert_eq!(report.result.video_script_60s, "Script.");
        assert!(!report.length_revised);
    }

    #[tokio::test]
    async fn test_repair_does_not_clobber_valid_fields() {
        let model = ScriptedModel::new()
            .reply(
                json!({
                    "mls_description": text_of_len(950),
                    "social_caption": "Original caption.",
                    "instagram_hashtags": "#a",
                })
                .to_string(),
            )
            // Model over-delivers: returns the requested key plus a blank caption
            .reply(r#"{"video_script_60s": "Script.", "social_caption": ""}"#);

        let report = generate_listing(
            &model,
            &input(DetailLevel::Standard),
            RepairFailurePolicy::Abort,
        )
        .await
        .unwrap();

        assert_eq!(model.call_count(), 2);
        assert_eq!(report.result.social_caption, "Original caption.");
        assert_eq!(report.result.video_script_60s, "Script.");
    }

    #[tokio::test]
    async fn test_repair_extra_keys_cannot_rewrite_valid_fields() {
        let model = ScriptedModel::new()
            .reply(
                json!({
                    "mls_description": text_of_len(950),
                    "social_caption": "Original caption.",
                    "instagram_hashtags": "#a",
                })
                .to_string(),
            )
            .reply(
                json!({
                    "video_script_60s": "Script.",
                    "social_caption": "Rewritten caption.",
                    "mls_description": "Short."
                })
                .to_string(),
            );

        let report = generate_listing(
            &model,
            &input(DetailLevel::Standard),
            RepairFailurePolicy::Abort,
        )
        .await
        .unwrap();

        assert_eq!(model.call_count(), 2);
        assert_eq!(report.result.social_caption, "Original caption.");
        assert_eq!(report.result.mls_description, text_of_len(950));
        assert_eq!(report.result.video_script_60s, "Script.");
        assert!(!report.length_revised);
    }

    #[tokio::test]
    async fn test_short_description_triggers_exactly_one_revision() {
        let model = ScriptedModel::new()
            .reply(full_response(850))
            .reply(json!({"mls_description": text_of_len(920)}).to_string());

        let report = generate_listing(
            &model,
            &input(DetailLevel::Descriptive),
            RepairFailurePolicy::Abort,
        )
        .await
        .unwrap();

        let calls = model.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[1].user.contains("Current (length 850):"));
        assert_eq!(calls[1].temperature, 0.5);
        assert!(report.length_revised);
        assert_eq!(report.result.mls_description.len(), 920);
    }

    #[tokio::test]
    async fn test_concise_revision_uses_lower_temperature() {
        let model = ScriptedModel::new()
            .reply(full_response(1200))
            .reply(json!({"mls_description": text_of_len(950)}).to_string());

        generate_listing(
            &model,
            &input(DetailLevel::Concise),
            RepairFailurePolicy::Abort,
        )
        .await
        .unwrap();

        assert_eq!(model.calls()[1].temperature, 0.35);
    }

    #[tokio::test]
    async fn test_revision_still_out_of_range_is_accepted_without_retry() {
        let model = ScriptedModel::new()
            .reply(full_response(400))
            .reply(json!({"mls_description": text_of_len(600)}).to_string());

        let report = generate_listing(
            &model,
            &input(DetailLevel::Standard),
            RepairFailurePolicy::Abort,
        )
        .await
        .unwrap();

        assert_eq!(model.call_count(), 2);
        assert_eq!(report.result.mls_description.len(), 600);
    }

    #[tokio::test]
    async fn test_empty_revision_keeps_original_draft() {
        let model = ScriptedModel::new()
            .reply(full_response(850))
            .reply(r#"{"mls_description": "   "}"#);

        let report = generate_listing(
            &model,
            &input(DetailLevel::Standard),
            RepairFailurePolicy::Abort,
        )
        .await
        .unwrap();

        assert!(report.length_revised);
        assert_eq!(report.result.mls_description, text_of_len(850));
    }

    #[tokio::test]
    async fn test_unparseable_revision_keeps_original_draft() {
        let model = ScriptedModel::new()
            .reply(full_response(850))
            .reply("Sorry, I can't do that.");

        let report = generate_listing(
            &model,
            &input(DetailLevel::Standard),
            RepairFailurePolicy::Abort,
        )
        .await
        .unwrap();

        assert_eq!(report.result.mls_description, text_of_len(850));
    }

    #[tokio::test]
    async fn test_primary_parse_failure_is_fatal() {
        let model = ScriptedModel::new().reply("I am not JSON");

        let err = generate_listing(
            &model,
            &input(DetailLevel::Standard),
            RepairFailurePolicy::LeaveEmpty,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Parse(_)));
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn test_primary_transport_failure_is_fatal() {
        let model = ScriptedModel::new().fail(LlmError::Api {
            status: 401,
            message: "bad key".to_string(),
        });

        let err = generate_listing(
            &model,
            &input(DetailLevel::Standard),
            RepairFailurePolicy::Abort,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Llm(LlmError::Api { status: 401, .. })));
    }

    #[tokio::test]
    async fn test_repair_parse_failure_aborts_under_abort_policy() {
        let model = ScriptedModel::new()
            .reply(json!({"mls_description": text_of_len(950)}).to_string())
            .reply("no json here")
            .reply(r##"{"instagram_hashtags": "#a"}"##);

        let err = generate_listing(
            &model,
            &input(DetailLevel::Standard),
            RepairFailurePolicy::Abort,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Parse(_)));
        assert_eq!(model.call_count(), 2);
    }

    #[tokio::test]
    async fn test_repair_parse_failure_leaves_field_empty_under_leave_empty_policy() {
        let model = ScriptedModel::new()
            .reply(json!({"mls_description": text_of_len(950)}).to_string())
            .reply("no json here")
            .reply(r##"{"instagram_hashtags": "#a"}"##)
            .reply(r#"{"video_script_60s": "Script."}"#);

        let report = generate_listing(
            &model,
            &input(DetailLevel::Standard),
            RepairFailurePolicy::LeaveEmpty,
        )
        .await
        .unwrap();

        assert_eq!(model.call_count(), 4);
        assert_eq!(report.result.social_caption, "");
        assert_eq!(report.result.instagram_hashtags, "#a");
        assert_eq!(
            report.repaired_fields,
            vec![OutputField::InstagramHashtags, OutputField::VideoScript60s]
        );
    }

    #[tokio::test]
    async fn test_repair_transport_failure_aborts_under_any_policy() {
        let model = ScriptedModel::new()
            .reply(json!({"mls_description": text_of_len(950)}).to_string())
            .fail(LlmError::EmptyContent);

        let err = generate_listing(
            &model,
            &input(DetailLevel::Standard),
            RepairFailurePolicy::LeaveEmpty,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Llm(_)));
    }

    #[tokio::test]
    async fn test_missing_description_is_repaired_then_length_checked() {
        let model = ScriptedModel::new()
            .reply(
                json!({
                    "social_caption": "Caption.",
                    "instagram_hashtags": "#a",
                    "video_script_60s": "Script."
                })
                .to_string(),
            )
            .reply(json!({"mls_description": text_of_len(700)}).to_string())
            .reply(json!({"mls_description": text_of_len(910)}).to_string());

        let report = generate_listing(
            &model,
            &input(DetailLevel::Standard),
            RepairFailurePolicy::Abort,
        )
        .await
        .unwrap();

        let calls = model.calls();
        assert_eq!(calls.len(), 3);
        assert!(calls[1].user.contains("between 900 and 1000 characters"));
        assert!(calls[2].user.contains("Current (length 700):"));
        assert_eq!(report.repaired_fields, vec![OutputField::MlsDescription]);
        assert!(report.length_revised);
        assert_eq!(report.result.mls_description.len(), 910);
        assert_eq!(report.model_calls, 3);
    }

    #[tokio::test]
    async fn test_worst_case_is_six_calls() {
        let model = ScriptedModel::new()
            .reply("{}")
            .reply(json!({"mls_description": text_of_len(100)}).to_string())
            .reply(r#"{"social_caption": "c"}"#)
            .reply(r##"{"instagram_hashtags": "#h"}"##)
            .reply(r#"{"video_script_60s": "v"}"#)
            .reply(json!({"mls_description": text_of_len(950)}).to_string());

        let report = generate_listing(
            &model,
            &input(DetailLevel::Standard),
            RepairFailurePolicy::Abort,
        )
        .await
        .unwrap();

        assert_eq!(model.call_count(), 6);
        assert_eq!(report.model_calls, 6);
        assert_eq!(report.repaired_fields.len(), 4);
    }
}
