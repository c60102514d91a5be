//! Axum route handlers for the Listing API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::listing::models::{char_count, GenerationResult, ListingRequest, OutputField};
use crate::listing::pipeline::generate_listing;
use crate::listing::reducer::{reduce, split_extra_keywords, DerivedInputs};
use crate::listing::taxonomy::{FEATURE_TAXONOMY, HEADLINE_DEFAULTS};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct TaxonomyGroupResponse {
    pub name: &'static str,
    pub labels: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct TaxonomyResponse {
    pub groups: Vec<TaxonomyGroupResponse>,
    pub headline_defaults: &'static [&'static str],
}

/// Read-only projection of the reducer output.
#[derive(Debug, Serialize)]
pub struct DerivedPreview {
    pub upgrades_bullets: String,
    pub keywords: String,
    pub keyword_count: usize,
}

impl From<&DerivedInputs> for DerivedPreview {
    fn from(derived: &DerivedInputs) -> Self {
        Self {
            upgrades_bullets: derived.upgrades_bullets.clone(),
            keywords: derived.keywords_joined(),
            keyword_count: derived.keywords.len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    #[serde(flatten)]
    pub result: GenerationResult,
    pub mls_char_count: usize,
    pub mls_char_limit: u32,
    pub within_length_bounds: bool,
    pub repaired_fields: Vec<OutputField>,
    pub length_revised: bool,
    pub derived: DerivedPreview,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/taxonomy
///
/// Feature groups in declaration order with their checkbox labels.
pub async fn handle_taxonomy() -> Json<TaxonomyResponse> {
    Json(TaxonomyResponse {
        groups: FEATURE_TAXONOMY
            .iter()
            .map(|g| TaxonomyGroupResponse {
                name: g.name,
                labels: g.features.iter().map(|f| f.label).collect(),
            })
            .collect(),
        headline_defaults: HEADLINE_DEFAULTS,
    })
}

/// POST /api/v1/listings/preview
///
/// Runs only the selection reducer. No model calls.
pub async fn handle_preview(
    payload: Result<Json<ListingRequest>, JsonRejection>,
) -> Result<Json<DerivedPreview>, AppError> {
    let Json(request) = payload?;
    request.facts.validate()?;
    let derived = derive_inputs(&request);
    Ok(Json(DerivedPreview::from(&derived)))
}

/// POST /api/v1/listings/generate
///
/// Full pipeline: validate → reduce → primary call → repair → length revision.
/// Fatal model errors return an error body and no partial copy.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<ListingRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(request) = payload?;
    request.validate()?;

    let derived = derive_inputs(&request);
    let preview = DerivedPreview::from(&derived);
    let input = request.into_listing_input(derived);

    info!(
        "Generating listing copy for {}, {} ({} keywords, limit {})",
        input.address,
        input.city,
        input.keywords.len(),
        input.mls_char_limit
    );

    let report = generate_listing(
        state.llm.as_ref(),
        &input,
        state.config.repair_failure_policy,
    )
    .await?;

    let mls_char_count = char_count(&report.result.mls_description);

    Ok(Json(GenerateResponse {
        mls_char_count,
        mls_char_limit: input.mls_char_limit,
        within_length_bounds: input.length_bounds().contains(mls_char_count),
        repaired_fields: report.repaired_fields,
        length_revised: report.length_revised,
        result: report.result,
        derived: preview,
    }))
}

fn derive_inputs(request: &ListingRequest) -> DerivedInputs {
    reduce(
        &request.selections,
        &request.facts,
        &split_extra_keywords(&request.extra_keywords),
        &request.custom_upgrades,
    )
}
