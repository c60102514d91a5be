// Shared prompt constants.
// Each service that needs model calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt used for every listing-copy call.
pub const COPYWRITER_SYSTEM: &str =
    "You are a meticulous, compliant real estate listing copywriter.";

/// Compliance rules appended to generation prompts. Enforcement is left to the model.
pub const COMPLIANCE_RULES: &str = "\
- No exaggerated claims; avoid steering; no terms implying a protected class.
- Replace subjective school/safety claims with neutral proximity phrasing (\u{201c}near local schools,\u{201d} \u{201c}close to parks\u{201d}).";
