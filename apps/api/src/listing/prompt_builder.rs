//! Prompt Builder — renders the primary, repair and length-revision prompts
//! from a `ListingInput`.

use crate::listing::models::{
    char_count, ListingInput, OutputField, HIGHLIGHT_FEATURE_LIMIT,
};
use crate::listing::prompts::{
    LENGTH_REVISION_TEMPLATE, PRIMARY_PROMPT_TEMPLATE, REPAIR_INSTAGRAM_HASHTAGS,
    REPAIR_MLS_DESCRIPTION, REPAIR_PROMPT_TEMPLATE, REPAIR_SOCIAL_CAPTION, REPAIR_VIDEO_SCRIPT,
    SHARED_CONTEXT_TEMPLATE,
};
use crate::listing::reducer::format_half_step;
use crate::llm_client::prompts::COMPLIANCE_RULES;

const NOT_PROVIDED: &str = "Not provided";

/// Builds the primary generation prompt requesting all four fields.
pub fn build_primary_prompt(input: &ListingInput) -> String {
    let bounds = input.length_bounds();
    let highlights = input
        .highlight_features
        .iter()
        .take(HIGHLIGHT_FEATURE_LIMIT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let highlights = if highlights.is_empty() {
        "None".to_string()
    } else {
        highlights
    };

    let mut values = context_values(input);
    values.extend([
        ("min_chars", bounds.min.to_string()),
        ("max_chars", bounds.max.to_string()),
        ("highlight_features", highlights),
        ("target_buyer_profile", input.target_buyer_profile.clone()),
        ("detail_guidance", input.detail_level.guidance().to_string()),
        ("compliance_rules", COMPLIANCE_RULES.to_string()),
    ]);

    fill_template(PRIMARY_PROMPT_TEMPLATE, &values)
}

/// Property context shared by the repair prompts. Lists every highlight feature.
pub fn build_shared_context(input: &ListingInput) -> String {
    let mut values = context_values(input);
    values.push(("highlight_features", input.highlight_features.join(", ")));
    fill_template(SHARED_CONTEXT_TEMPLATE, &values)
}

/// Builds the single-key repair prompt for `field`.
pub fn build_repair_prompt(input: &ListingInput, field: OutputField, shared_context: &str) -> String {
    let bounds = input.length_bounds();
    let instructions = match field {
        OutputField::MlsDescription => fill_template(
            REPAIR_MLS_DESCRIPTION,
            &[
                ("min_chars", bounds.min.to_string()),
                ("max_chars", bounds.max.to_string()),
            ],
        ),
        OutputField::SocialCaption => fill_template(
            REPAIR_SOCIAL_CAPTION,
            &[("tone_lower", input.tone.as_str().to_lowercase())],
        ),
        OutputField::InstagramHashtags => REPAIR_INSTAGRAM_HASHTAGS.to_string(),
        OutputField::VideoScript60s => REPAIR_VIDEO_SCRIPT.to_string(),
    };

    fill_template(
        REPAIR_PROMPT_TEMPLATE,
        &[
            ("shared_context", shared_context.to_string()),
            ("field_instructions", instructions),
        ],
    )
}

/// Builds the revision prompt carrying the current draft and its length.
pub fn build_length_revision_prompt(input: &ListingInput, current: &str) -> String {
    let bounds = input.length_bounds();
    fill_template(
        LENGTH_REVISION_TEMPLATE,
        &[
            ("min_chars", bounds.min.to_string()),
            ("max_chars", bounds.max.to_string()),
            ("current_len", char_count(current).to_string()),
            ("current", current.trim().to_string()),
        ],
    )
}

/// Single-pass `{name}` substitution. Unknown placeholders and literal JSON
/// braces are left as-is, and substituted values are never re-scanned.
pub fn fill_template(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replacement = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (value, close))
        });

        match replacement {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn context_values(input: &ListingInput) -> Vec<(&'static str, String)> {
    vec![
        ("address", input.address.clone()),
        ("city", input.city.clone()),
        ("state", input.state.clone()),
        ("zip_code", input.zip_code.clone()),
        ("property_type", input.property_type.to_string()),
        ("beds", display_opt(input.beds.map(format_half_step))),
        ("baths", display_opt(input.baths.map(format_half_step))),
        ("sqft", display_opt(input.sqft)),
        ("lot_size", display_opt(input.lot_size)),
        ("year_built", display_opt(input.year_built)),
        ("price", display_opt(input.price)),
        ("keywords", input.keywords.join(", ")),
        ("upgrades_bullets", input.upgrades_bullets.clone()),
        ("neighborhood_notes", input.neighborhood_notes.clone()),
        ("tone", input.tone.to_string()),
    ]
}

fn display_opt<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_PROVIDED.to_string())
}
