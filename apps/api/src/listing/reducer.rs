//! Selection Reducer — turns checkbox selections and property facts into the
//! SEO keyword list and the upgrades bullet block fed to the prompt.
//!
//! Pure functions only. Same input, same output, order included.

use std::collections::HashSet;

use crate::listing::models::{PropertyFacts, Selections};
use crate::listing::taxonomy::{group_index, keywords_for};

pub const MAX_KEYWORDS: usize = 60;
pub const MAX_BULLET_LINES: usize = 30;

/// Output of the reducer. Both fields are free of normalized duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedInputs {
    pub keywords: Vec<String>,
    pub upgrades_bullets: String,
}

impl DerivedInputs {
    /// Comma-joined keyword list for display.
    pub fn keywords_joined(&self) -> String {
        self.keywords.join(", ")
    }
}

/// Derives keywords and bullets from one form submission.
pub fn reduce(
    selections: &Selections,
    facts: &PropertyFacts,
    extra_keywords: &[String],
    custom_lines: &[String],
) -> DerivedInputs {
    DerivedInputs {
        keywords: build_keywords(selections, facts, extra_keywords),
        upgrades_bullets: build_upgrades_bullets(selections, custom_lines),
    }
}

/// Expands selections, appends fact tokens and extras, then normalizes,
/// deduplicates (first occurrence wins) and caps at `MAX_KEYWORDS`.
pub fn build_keywords(
    selections: &Selections,
    facts: &PropertyFacts,
    extra_keywords: &[String],
) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();

    for (group, labels) in ordered_groups(selections) {
        for label in labels {
            match keywords_for(group, label) {
                Some(variants) => tokens.extend(variants.iter().map(|v| v.to_string())),
                None => tokens.push(label.clone()),
            }
        }
    }

    tokens.extend(fact_tokens(facts));

    tokens.extend(
        extra_keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(str::to_string),
    );

    let mut seen = HashSet::new();
    tokens
        .iter()
        .map(|t| normalize_token(t))
        .filter(|t| !t.is_empty() && seen.insert(t.clone()))
        .take(MAX_KEYWORDS)
        .collect()
}

/// One `- {group}: a, b` line per non-empty group, then custom lines.
/// Capped at `MAX_BULLET_LINES`.
pub fn build_upgrades_bullets(selections: &Selections, custom_lines: &[String]) -> String {
    let mut lines: Vec<String> = Vec::new();

    for (group, labels) in ordered_groups(selections) {
        let mut seen = HashSet::new();
        let labels: Vec<&str> = labels
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty() && seen.insert(normalize_token(l)))
            .collect();
        if labels.is_empty() {
            continue;
        }
        lines.push(format!("- {}: {}", group, labels.join(", ")));
    }

    for raw in custom_lines {
        let value = collapse_whitespace(raw);
        if !value.is_empty() {
            lines.push(format!("- {value}"));
        }
    }

    let mut seen = HashSet::new();
    lines
        .into_iter()
        .filter(|line| seen.insert(normalize_token(line)))
        .take(MAX_BULLET_LINES)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Splits the free-text extras field on commas, semicolons and newlines.
pub fn split_extra_keywords(raw: &str) -> Vec<String> {
    raw.split([',', ';', '\n', '\r'])
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Collapses internal whitespace, strips surrounding `,`, `;` and spaces, lowercases.
pub fn normalize_token(token: &str) -> String {
    collapse_whitespace(token)
        .trim_matches(|c| c == ',' || c == ';' || c == ' ')
        .to_lowercase()
}

/// Half-step counts keep at least one decimal place: `2.0`, `2.5`.
pub fn format_half_step(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Bedrooms are omitted at zero; bathrooms are kept at zero.
fn fact_tokens(facts: &PropertyFacts) -> Vec<String> {
    let mut tokens = Vec::new();

    if let Some(beds) = facts.beds.filter(|b| *b != 0.0) {
        tokens.push(format!("{} bedrooms", beds.trunc() as i64));
    }
    if let Some(baths) = facts.baths {
        tokens.push(format!("{} bathrooms", format_half_step(baths)));
    }
    if let Some(sqft) = facts.sqft.filter(|v| *v != 0) {
        tokens.push(format!("{sqft} sqft"));
    }
    if let Some(lot) = facts.lot_size.filter(|v| *v != 0) {
        tokens.push(format!("{lot} sf lot"));
    }
    if let Some(year) = facts.year_built.filter(|v| *v != 0) {
        tokens.push(format!("built {year}"));
    }
    tokens.push(facts.property_type.as_str().to_lowercase());

    tokens
}

/// Taxonomy groups in declaration order, then unknown groups alphabetically.
fn ordered_groups(selections: &Selections) -> Vec<(&str, &[String])> {
    let mut groups: Vec<(Option<usize>, &str, &[String])> = selections
        .iter()
        .map(|(name, labels)| (group_index(name), name.as_str(), labels.as_slice()))
        .collect();

    groups.sort_by(|a, b| match (a.0, b.0) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.1.cmp(b.1),
    });

    groups
        .into_iter()
        .map(|(_, name, labels)| (name, labels))
        .collect()
}
