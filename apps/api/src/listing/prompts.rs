// All prompt templates for the listing module.
// Placeholders are `{name}` and are filled by `prompt_builder::fill_template`.

/// Primary generation prompt. Requests all four fields in one JSON object.
pub const PRIMARY_PROMPT_TEMPLATE: &str = r##"You are an expert real estate copywriter for MLS, Zillow/Redfin, and social media.
Write compelling, accurate, compliant copy. Avoid fair-housing issues and prohibited wording.

Return ONLY valid JSON with these keys:
- "mls_description": string (between {min_chars} and {max_chars} characters, no emojis)
- "social_caption": string (1–2 sentences, approachable, no hashtags)
- "instagram_hashtags": string (10–18 space-separated hashtags, no commas)
- "video_script_60s": string (a 45–60 second walkthrough script; short sentences; easy to read aloud)

Context:
- Address: {address}, {city}, {state} {zip_code}
- Property Type: {property_type}
- Beds/Baths: {beds} bd / {baths} ba
- Interior Sq Ft: {sqft}
- Lot Size: {lot_size}
- Year Built: {year_built}
- Price: {price}
- SEO Keywords to weave in: {keywords}
- Upgrades/Features (bulleted):
{upgrades_bullets}
- Neighborhood notes (neutral proximity phrasing): {neighborhood_notes}
- Highlight features to emphasize early: {highlight_features}
- Target buyer profile: {target_buyer_profile}
- Tone: {tone}

Rules:
- MLS description MUST be between {min_chars} and {max_chars} characters, counted as raw characters (not words).
- {detail_guidance}
- Emphasize the highlight features in the first 1–2 sentences if applicable.
- Use the upgrades/features and neighborhood notes to reach the target length—be specific and factual.
{compliance_rules}
- Plain language; avoid fluff/clichés; vary sentence length.
- For the video script: opening hook, 3–5 key features, 1 lifestyle/neighborhood beat, soft CTA (“Schedule a tour to see it in person.”). No phone numbers.

Output JSON example:
{
  "mls_description": "…",
  "social_caption": "…",
  "instagram_hashtags": "#sandiegorealestate #listings …",
  "video_script_60s": "…"
}"##;

/// Compact property context shared by every repair prompt.
pub const SHARED_CONTEXT_TEMPLATE: &str = r#"Address: {address}, {city}, {state} {zip_code}
Type: {property_type}
Beds/Baths: {beds} bd / {baths} ba | Sq Ft: {sqft} | Lot: {lot_size} | Year: {year_built} | Price: {price}
Keywords: {keywords}
Upgrades (bulleted):
{upgrades_bullets}
Neighborhood: {neighborhood_notes}
Highlight features: {highlight_features}
Tone: {tone}"#;

/// Wrapper for a single-field repair. `{field_instructions}` is one of the
/// `REPAIR_*` fragments below.
pub const REPAIR_PROMPT_TEMPLATE: &str = r#"Using this property context:
{shared_context}

{field_instructions}"#;

pub const REPAIR_MLS_DESCRIPTION: &str = r#"Write ONLY JSON with:
{"mls_description": "<MLS description between {min_chars} and {max_chars} characters, no emojis>"}
Be specific and compliant. Replace subjective school/safety claims with neutral proximity phrasing."#;

pub const REPAIR_SOCIAL_CAPTION: &str = r#"Write ONLY JSON with:
{"social_caption": "<1–2 sentence caption (no hashtags) in a friendly {tone_lower} tone>"}"#;

pub const REPAIR_INSTAGRAM_HASHTAGS: &str = r#"Write ONLY JSON with:
{"instagram_hashtags": "<10–18 space-separated Instagram hashtags, no commas>"}
Prefer local + lifestyle + property-type tags. No emojis."#;

pub const REPAIR_VIDEO_SCRIPT: &str = r#"Write ONLY JSON with:
{"video_script_60s": "<45–60 second walkthrough script. Hook, 3–5 key features, 1 lifestyle/neighborhood beat, soft CTA. No phone numbers.>"}
Use short sentences that read well on camera."#;

/// Single revision pass for an out-of-band MLS description.
pub const LENGTH_REVISION_TEMPLATE: &str = r#"Revise the following MLS description to be between {min_chars} and {max_chars} characters.
Keep meaning and compliance. Add concrete, factual property details where helpful.
Return ONLY JSON with this single key:
{"mls_description": "…"}

Current (length {current_len}):
<<<{current}>>>"#;
