//! Listing data model: request payloads, the immutable `ListingInput` handed to
//! the prompt builder, option sets, and the four-field `GenerationResult`.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::listing::reducer::DerivedInputs;

pub const MIN_MLS_CHAR_LIMIT: u32 = 500;
pub const MAX_MLS_CHAR_LIMIT: u32 = 1800;
pub const DEFAULT_MLS_CHAR_LIMIT: u32 = 1800;

/// Number of highlight features the primary prompt emphasises.
pub const HIGHLIGHT_FEATURE_LIMIT: usize = 6;

/// Group name → selected labels, in user-selection order.
pub type Selections = HashMap<String, Vec<String>>;

// ────────────────────────────────────────────────────────────────────────────
// Option sets
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    #[default]
    #[serde(rename = "Single Family")]
    SingleFamily,
    Condo,
    Townhome,
    #[serde(rename = "Multi-Unit")]
    MultiUnit,
    Luxury,
    Investment,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::SingleFamily => "Single Family",
            PropertyType::Condo => "Condo",
            PropertyType::Townhome => "Townhome",
            PropertyType::MultiUnit => "Multi-Unit",
            PropertyType::Luxury => "Luxury",
            PropertyType::Investment => "Investment",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    Professional,
    #[serde(rename = "Warm & Inviting")]
    WarmAndInviting,
    Luxury,
    #[serde(rename = "Investor-Focused")]
    InvestorFocused,
    #[serde(rename = "Coastal Vibes")]
    CoastalVibes,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::WarmAndInviting => "Warm & Inviting",
            Tone::Luxury => "Luxury",
            Tone::InvestorFocused => "Investor-Focused",
            Tone::CoastalVibes => "Coastal Vibes",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much of the allowed MLS length band the copy should use.
/// Also drives sampling temperature for the primary and revision calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetailLevel {
    Concise,
    Standard,
    #[default]
    Descriptive,
}

impl DetailLevel {
    /// Advisory length guidance embedded in the primary prompt.
    pub fn guidance(&self) -> &'static str {
        match self {
            DetailLevel::Concise => {
                "Aim for the LOWER end of the allowed range. Use concise, information-dense sentences."
            }
            DetailLevel::Descriptive => {
                "Aim for the UPPER end of the allowed range. Add specific, factual details drawn from inputs."
            }
            DetailLevel::Standard => {
                "Aim for the MIDDLE of the allowed range with balanced specificity and clarity."
            }
        }
    }

    pub fn primary_temperature(&self) -> f32 {
        match self {
            DetailLevel::Standard => 0.5,
            DetailLevel::Descriptive => 0.65,
            DetailLevel::Concise => 0.35,
        }
    }

    pub fn revision_temperature(&self) -> f32 {
        match self {
            DetailLevel::Concise => 0.35,
            _ => 0.5,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Length contract
// ────────────────────────────────────────────────────────────────────────────

/// Inclusive character band for the MLS description: 90%..=100% of the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

impl LengthBounds {
    pub fn for_limit(mls_char_limit: u32) -> Self {
        let max = mls_char_limit as usize;
        Self {
            min: max * 9 / 10,
            max,
        }
    }

    pub fn contains(&self, len: usize) -> bool {
        (self.min..=self.max).contains(&len)
    }
}

/// Character count of the trimmed text, in Unicode scalar values.
pub fn char_count(text: &str) -> usize {
    text.trim().chars().count()
}

// ────────────────────────────────────────────────────────────────────────────
// Inputs
// ────────────────────────────────────────────────────────────────────────────

/// Numeric and categorical facts the reducer turns into keyword tokens.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyFacts {
    #[serde(default)]
    pub beds: Option<f64>,
    #[serde(default)]
    pub baths: Option<f64>,
    #[serde(default)]
    pub sqft: Option<i64>,
    #[serde(default)]
    pub lot_size: Option<i64>,
    #[serde(default)]
    pub year_built: Option<i64>,
    #[serde(default)]
    pub property_type: PropertyType,
}

impl PropertyFacts {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_half_step("beds", self.beds)?;
        validate_half_step("baths", self.baths)?;
        validate_non_negative("sqft", self.sqft)?;
        validate_non_negative("lot_size", self.lot_size)?;
        validate_non_negative("year_built", self.year_built)
    }
}

fn validate_non_negative(field: &str, value: Option<i64>) -> Result<(), AppError> {
    match value {
        Some(v) if v < 0 => Err(AppError::Validation(format!(
            "{field} must be a non-negative number"
        ))),
        _ => Ok(()),
    }
}

fn validate_half_step(field: &str, value: Option<f64>) -> Result<(), AppError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(AppError::Validation(format!(
            "{field} must be a non-negative number"
        ))),
        Some(v) if (v * 2.0).fract() != 0.0 => Err(AppError::Validation(format!(
            "{field} must be in steps of 0.5"
        ))),
        _ => Ok(()),
    }
}

/// Request body shared by the preview and generate endpoints.
///
/// Preview only needs the facts and selections; generate additionally
/// requires the address block.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingRequest {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(flatten)]
    pub facts: PropertyFacts,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub detail_level: DetailLevel,
    #[serde(default = "default_mls_char_limit")]
    pub mls_char_limit: u32,
    #[serde(default)]
    pub selections: Selections,
    /// Free-text keywords separated by commas, semicolons or newlines.
    #[serde(default)]
    pub extra_keywords: String,
    /// Extra upgrade lines rendered as their own bullets.
    #[serde(default)]
    pub custom_upgrades: Vec<String>,
    #[serde(default)]
    pub neighborhood_notes: String,
    #[serde(default)]
    pub target_buyer_profile: String,
    #[serde(default)]
    pub highlight_features: Vec<String>,
}

fn default_mls_char_limit() -> u32 {
    DEFAULT_MLS_CHAR_LIMIT
}

impl ListingRequest {
    /// Full validation for a generation request.
    pub fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zip_code", &self.zip_code),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{field} cannot be empty")));
            }
        }

        if !(MIN_MLS_CHAR_LIMIT..=MAX_MLS_CHAR_LIMIT).contains(&self.mls_char_limit) {
            return Err(AppError::Validation(format!(
                "mls_char_limit must be between {MIN_MLS_CHAR_LIMIT} and {MAX_MLS_CHAR_LIMIT}"
            )));
        }

        validate_non_negative("price", self.price)?;
        self.facts.validate()
    }

    /// Freezes the request into the immutable generation input.
    pub fn into_listing_input(self, derived: DerivedInputs) -> ListingInput {
        ListingInput {
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            zip_code: self.zip_code.trim().to_string(),
            beds: self.facts.beds,
            baths: self.facts.baths,
            sqft: self.facts.sqft,
            lot_size: self.facts.lot_size,
            year_built: self.facts.year_built,
            property_type: self.facts.property_type,
            price: self.price,
            keywords: derived.keywords,
            upgrades_bullets: derived.upgrades_bullets,
            neighborhood_notes: self.neighborhood_notes,
            target_buyer_profile: self.target_buyer_profile,
            tone: self.tone,
            mls_char_limit: self.mls_char_limit,
            detail_level: self.detail_level,
            highlight_features: self
                .highlight_features
                .into_iter()
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty())
                .collect(),
        }
    }
}

/// Everything the prompt builder needs for one generation. Never mutated.
#[derive(Debug, Clone)]
pub struct ListingInput {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub beds: Option<f64>,
    pub baths: Option<f64>,
    pub sqft: Option<i64>,
    pub lot_size: Option<i64>,
    pub year_built: Option<i64>,
    pub property_type: PropertyType,
    pub price: Option<i64>,
    /// Derived: deduplicated, lowercase, at most 60 entries.
    pub keywords: Vec<String>,
    /// Derived: at most 30 bullet lines.
    pub upgrades_bullets: String,
    pub neighborhood_notes: String,
    pub target_buyer_profile: String,
    pub tone: Tone,
    pub mls_char_limit: u32,
    pub detail_level: DetailLevel,
    /// Priority order; the first six are emphasised.
    pub highlight_features: Vec<String>,
}

impl ListingInput {
    pub fn length_bounds(&self) -> LengthBounds {
        LengthBounds::for_limit(self.mls_char_limit)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

/// The four fields every generation must produce, in repair order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputField {
    MlsDescription,
    SocialCaption,
    InstagramHashtags,
    #[serde(rename = "video_script_60s")]
    VideoScript60s,
}

pub const REQUIRED_FIELDS: [OutputField; 4] = [
    OutputField::MlsDescription,
    OutputField::SocialCaption,
    OutputField::InstagramHashtags,
    OutputField::VideoScript60s,
];

impl OutputField {
    /// JSON key the model is asked to produce.
    pub fn key(&self) -> &'static str {
        match self {
            OutputField::MlsDescription => "mls_description",
            OutputField::SocialCaption => "social_caption",
            OutputField::InstagramHashtags => "instagram_hashtags",
            OutputField::VideoScript60s => "video_script_60s",
        }
    }
}

/// Final copy returned to the client. Unrecoverable fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    pub mls_description: String,
    pub social_caption: String,
    pub instagram_hashtags: String,
    pub video_script_60s: String,
}

impl GenerationResult {
    /// Builds the result from a draft object. Non-string values count as empty.
    pub fn from_draft(draft: &serde_json::Map<String, serde_json::Value>) -> Self {
        let field = |f: OutputField| {
            draft
                .get(f.key())
                .and_then(|v| v.as_str())
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };

        Self {
            mls_description: field(OutputField::MlsDescription),
            social_caption: field(OutputField::SocialCaption),
            instagram_hashtags: field(OutputField::InstagramHashtags),
            video_script_60s: field(OutputField::VideoScript60s),
        }
    }
}
