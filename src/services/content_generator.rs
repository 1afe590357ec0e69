//! Landing page copy, ad-copy variants, email sequences and compliance review
//!
//! Every generator builds a deterministic prompt, asks for a strict JSON
//! schema and returns the decoded record unchanged.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::entities::sea_orm_active_enums::Niche;
use crate::error::AppResult;
use crate::services::copy_library::{self, bullet_list};
use crate::services::llm::{CompletionRequest, JsonSchema, TextGenerator, de_whole_number, generate_structured};

pub const DEFAULT_VARIATION_COUNT: u32 = 5;

// ---------------------------------------------------------------------------
// Headline + three paragraphs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct HeadlineCopyInput {
    pub product_name: String,
    pub product_description: String,
    pub niche: Niche,
    pub mechanism: Option<String>,
    pub target_audience: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandingPageCopy {
    pub headline: String,
    pub paragraph1: String,
    pub paragraph2: String,
    pub paragraph3: String,
}

pub fn headline_prompt(input: &HeadlineCopyInput) -> String {
    let mut context = String::new();
    if let Some(mechanism) = &input.mechanism {
        context.push_str(&format!("Mechanism/Hook: {}\n", mechanism));
    }
    if let Some(audience) = &input.target_audience {
        context.push_str(&format!("Target Audience: {}\n", audience));
    }

    format!(
        r#"You are an expert direct response copywriter. Based on the description below, write a high-converting affiliate landing page with:

Product Information:
{description}

Product Name: {name}
Niche: {niche}
{context}
Example hooks that perform well in this niche (inspiration only, do not copy):
{hooks}

Generate the following:

1. Headline (one sentence, curiosity-driven and specific to the niche and mechanism)

2. Ad Copy (Three Paragraphs):

Paragraph 1: Authority Discovery
Briefly explain how an authority figure (e.g., scientist, doctor, craftsman, researcher) discovered the method or insight. Include the mechanism or unique hook and the core benefit. Openers in this style:
{authority}

Paragraph 2: Social Proof
Mention that thousands of people are already using it and experiencing the benefit. Stay vague and compliant (no income/medical claims). For example:
{social_proof}

Paragraph 3: Call to Action
Invite the reader to watch a video to learn how it works and how it could help them too. Keep it simple and curiosity-based. For example:
{ctas}

Rules:
- No promises, guarantees, or bold claims
- Don't invent new mechanisms or names
- Keep it emotional, compliant, and built to convert
- Use niche-appropriate language
- Focus on curiosity and education, not hype
- Prefer phrasing such as:
{benefits}

Return your response in this exact JSON format:
{{
  "headline": "your headline here",
  "paragraph1": "authority discovery paragraph",
  "paragraph2": "social proof paragraph",
  "paragraph3": "call to action paragraph"
}}"#,
        description = input.product_description,
        name = input.product_name,
        niche = input.niche,
        context = context,
        hooks = bullet_list(copy_library::niche_hooks(input.niche)),
        authority = bullet_list(copy_library::AUTHORITY_INTRODUCTIONS.values()),
        social_proof = bullet_list(copy_library::SOCIAL_PROOF_STATEMENTS.values()),
        ctas = bullet_list(copy_library::EDUCATIONAL_CTAS.values()),
        benefits = bullet_list(copy_library::BENEFIT_FOCUSED_LANGUAGE.values()),
    )
}

pub async fn generate_headline_and_copy(
    llm: &dyn TextGenerator,
    input: &HeadlineCopyInput,
) -> AppResult<LandingPageCopy> {
    tracing::info!(product = %input.product_name, niche = %input.niche, "Generating landing page copy");

    let schema = JsonSchema {
        name: "landing_page_copy",
        schema: json!({
            "type": "object",
            "properties": {
                "headline": { "type": "string", "description": "The main headline" },
                "paragraph1": { "type": "string", "description": "Authority discovery paragraph" },
                "paragraph2": { "type": "string", "description": "Social proof paragraph" },
                "paragraph3": { "type": "string", "description": "Call to action paragraph" },
            },
            "required": ["headline", "paragraph1", "paragraph2", "paragraph3"],
            "additionalProperties": false,
        }),
    };

    generate_structured(
        llm,
        CompletionRequest::structured(
            "You are an expert direct response copywriter specializing in compliant, high-converting affiliate marketing copy.",
            headline_prompt(input),
            schema,
        ),
    )
    .await
}

// ---------------------------------------------------------------------------
// Ad-copy variations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AdCopyInput {
    pub product_name: String,
    pub niche: Niche,
    pub base_headline: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlineVariation {
    pub headline: String,
    pub hook_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdCopyVariations {
    pub variations: Vec<HeadlineVariation>,
}

pub fn variations_prompt(input: &AdCopyInput) -> String {
    format!(
        r#"You are an expert direct response copywriter. Generate {count} different headline variations for A/B testing based on this original headline:

Original Headline: "{headline}"
Product: {product}
Niche: {niche}

Hooks that resonate in this niche:
{hooks}

Create {count} variations that:
- Test different emotional hooks (curiosity, urgency, authority, social proof, benefit-focused)
- Maintain compliance (no guarantees or bold claims)
- Stay specific to the niche
- Are roughly the same length as the original

Return your response in this exact JSON format:
{{
  "variations": [
    {{"headline": "variation 1", "hook_type": "curiosity"}},
    {{"headline": "variation 2", "hook_type": "authority"}},
    ...
  ]
}}"#,
        count = input.count,
        headline = input.base_headline,
        product = input.product_name,
        niche = input.niche,
        hooks = bullet_list(copy_library::niche_hooks(input.niche)),
    )
}

pub async fn generate_ad_copy_variations(
    llm: &dyn TextGenerator,
    input: &AdCopyInput,
) -> AppResult<AdCopyVariations> {
    tracing::info!(product = %input.product_name, count = input.count, "Generating headline variations");

    let schema = JsonSchema {
        name: "headline_variations",
        schema: json!({
            "type": "object",
            "properties": {
                "variations": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "headline": { "type": "string" },
                            "hook_type": { "type": "string" },
                        },
                        "required": ["headline", "hook_type"],
                        "additionalProperties": false,
                    },
                },
            },
            "required": ["variations"],
            "additionalProperties": false,
        }),
    };

    generate_structured(
        llm,
        CompletionRequest::structured(
            "You are an expert direct response copywriter specializing in A/B testing and conversion optimization.",
            variations_prompt(input),
            schema,
        ),
    )
    .await
}

// ---------------------------------------------------------------------------
// Email sequence
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct EmailSequenceInput {
    pub product_name: String,
    pub product_description: String,
    pub niche: Niche,
    pub email_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailDraft {
    #[serde(deserialize_with = "de_whole_number")]
    pub day: i32,
    pub subject: String,
    pub preheader: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailSequenceDraft {
    pub emails: Vec<EmailDraft>,
}

pub fn email_sequence_prompt(input: &EmailSequenceInput) -> String {
    format!(
        r#"You are an expert email marketer. Create a {count}-email nurture sequence for this product:

Product: {product}
Description: {description}
Niche: {niche}

Create {count} emails that:
- Build trust and educate the reader
- Address common objections
- Use storytelling and social proof
- Maintain compliance (no guarantees or medical/income claims)
- Lead to the sales page naturally
- Each email should be sent 1-2 days apart

Useful ways to open an objection-handling email:
{agitation}

Compliance-safe transitions:
{transitions}

For each email, provide:
- Subject line (curiosity-driven, 50 chars or less)
- Preheader text (complement the subject, 80 chars or less)
- Email body (3-5 paragraphs, conversational tone)

Return your response in this exact JSON format:
{{
  "emails": [
    {{
      "day": 1,
      "subject": "subject line",
      "preheader": "preheader text",
      "body": "full email body with paragraphs separated by \n\n"
    }},
    ...
  ]
}}"#,
        count = input.email_count,
        product = input.product_name,
        description = input.product_description,
        niche = input.niche,
        agitation = bullet_list(copy_library::PROBLEM_AGITATION_PHRASES.values()),
        transitions = bullet_list(copy_library::COMPLIANCE_SAFE_TRANSITIONS.values()),
    )
}

pub async fn generate_email_sequence(
    llm: &dyn TextGenerator,
    input: &EmailSequenceInput,
) -> AppResult<EmailSequenceDraft> {
    tracing::info!(product = %input.product_name, emails = input.email_count, "Generating email sequence");

    let schema = JsonSchema {
        name: "email_sequence",
        schema: json!({
            "type": "object",
            "properties": {
                "emails": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "day": { "type": "number" },
                            "subject": { "type": "string" },
                            "preheader": { "type": "string" },
                            "body": { "type": "string" },
                        },
                        "required": ["day", "subject", "preheader", "body"],
                        "additionalProperties": false,
                    },
                },
            },
            "required": ["emails"],
            "additionalProperties": false,
        }),
    };

    generate_structured(
        llm,
        CompletionRequest::structured(
            "You are an expert email marketer specializing in nurture sequences and conversion optimization.",
            email_sequence_prompt(input),
            schema,
        ),
    )
    .await
}

// ---------------------------------------------------------------------------
// Compliance check
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceIssue {
    #[serde(rename = "type")]
    pub issue_type: String,
    pub text: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub is_compliant: bool,
    pub issues: Vec<ComplianceIssue>,
    #[serde(deserialize_with = "de_whole_number")]
    pub overall_score: i32,
    pub summary: String,
}

pub fn compliance_prompt(text: &str, niche: Niche) -> String {
    format!(
        r#"You are a compliance expert for affiliate marketing. Review this copy for compliance issues:

Copy to Review:
{text}

Niche: {niche}

Check for:
1. Income claims or guarantees (not allowed)
2. Medical claims or cure promises (not allowed)
3. Unrealistic promises or guarantees
4. Invented mechanisms or fake credentials
5. Pressure tactics or false scarcity
6. Any FTC violations

When suggesting fixes, prefer phrasing such as:
{benefits}

Return your response in this exact JSON format:
{{
  "is_compliant": true/false,
  "issues": [
    {{"type": "income_claim", "text": "problematic text", "suggestion": "how to fix it"}},
    ...
  ],
  "overall_score": 0-100,
  "summary": "brief summary of compliance status"
}}"#,
        text = text,
        niche = niche,
        benefits = bullet_list(copy_library::BENEFIT_FOCUSED_LANGUAGE.values()),
    )
}

pub async fn check_compliance(llm: &dyn TextGenerator, text: &str, niche: Niche) -> AppResult<ComplianceReport> {
    tracing::info!(niche = %niche, chars = text.len(), "Running compliance check");

    let schema = JsonSchema {
        name: "compliance_check",
        schema: json!({
            "type": "object",
            "properties": {
                "is_compliant": { "type": "boolean" },
                "issues": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "type": { "type": "string" },
                            "text": { "type": "string" },
                            "suggestion": { "type": "string" },
                        },
                        "required": ["type", "text", "suggestion"],
                        "additionalProperties": false,
                    },
                },
                "overall_score": { "type": "number" },
                "summary": { "type": "string" },
            },
            "required": ["is_compliant", "issues", "overall_score", "summary"],
            "additionalProperties": false,
        }),
    };

    generate_structured(
        llm,
        CompletionRequest::structured(
            "You are a compliance expert specializing in FTC regulations and affiliate marketing guidelines.",
            compliance_prompt(text, niche),
            schema,
        ),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::fakes::FakeTextGenerator;

    fn headline_input(niche: Niche) -> HeadlineCopyInput {
        HeadlineCopyInput {
            product_name: "Ted's Woodworking".to_string(),
            product_description: "16,000 plans with step-by-step instructions.".to_string(),
            niche,
            mechanism: Some("Blueprint system".to_string()),
            target_audience: None,
        }
    }

    #[test]
    fn test_headline_prompt_is_deterministic_and_seasoned() {
        let input = headline_input(Niche::Woodworking);
        let a = headline_prompt(&input);
        let b = headline_prompt(&input);

        assert_eq!(a, b);
        assert!(a.contains("Mechanism/Hook: Blueprint system"));
        assert!(!a.contains("Target Audience:"));
        assert!(a.contains("without expensive tools"));
    }

    #[tokio::test]
    async fn test_headline_copy_parsed() {
        let llm = FakeTextGenerator::replying(
            r#"{"headline":"H","paragraph1":"p1","paragraph2":"p2","paragraph3":"p3"}"#,
        );

        let copy = generate_headline_and_copy(&llm, &headline_input(Niche::Health)).await.unwrap();
        assert_eq!(copy.headline, "H");
        assert_eq!(copy.paragraph3, "p3");

        let request = llm.last_request().unwrap();
        assert_eq!(request.schema.unwrap().name, "landing_page_copy");
    }

    #[tokio::test]
    async fn test_missing_content_fails() {
        let llm = FakeTextGenerator::empty();
        let err = check_compliance(&llm, "Guaranteed to cure everything", Niche::Health)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Generation(ref msg) if msg == "No content generated"));
    }

    #[tokio::test]
    async fn test_compliance_report_parsed() {
        let llm = FakeTextGenerator::replying(
            r#"{"is_compliant":false,"issues":[{"type":"medical_claim","text":"cure","suggestion":"may help support"}],"overall_score":35,"summary":"Contains a cure claim"}"#,
        );

        let report = check_compliance(&llm, "This will cure you", Niche::Health).await.unwrap();
        assert!(!report.is_compliant);
        assert_eq!(report.issues[0].issue_type, "medical_claim");
        assert_eq!(report.overall_score, 35);
    }

    #[tokio::test]
    async fn test_email_sequence_days_accept_floats() {
        let llm = FakeTextGenerator::replying(
            r#"{"emails":[{"day":1.0,"subject":"s1","preheader":"p1","body":"b1"},{"day":3,"subject":"s2","preheader":"p2","body":"b2"}]}"#,
        );
        let input = EmailSequenceInput {
            product_name: "Lost Generator".to_string(),
            product_description: "DIY backup power".to_string(),
            niche: Niche::Prepping,
            email_count: 2,
        };

        let draft = generate_email_sequence(&llm, &input).await.unwrap();
        assert_eq!(draft.emails.len(), 2);
        assert_eq!(draft.emails[0].day, 1);
        assert_eq!(draft.emails[1].day, 3);
        assert!(llm.last_user_prompt().contains("2-email nurture sequence"));
    }

    #[tokio::test]
    async fn test_variations_prompt_mentions_count() {
        let llm = FakeTextGenerator::replying(r#"{"variations":[{"headline":"A","hook_type":"curiosity"}]}"#);
        let input = AdCopyInput {
            product_name: "Neuro Energizer".to_string(),
            niche: Niche::Manifestation,
            base_headline: "The real secret".to_string(),
            count: DEFAULT_VARIATION_COUNT,
        };

        let result = generate_ad_copy_variations(&llm, &input).await.unwrap();
        assert_eq!(result.variations.len(), 1);
        assert!(llm.last_user_prompt().contains("Generate 5 different headline variations"));
    }
}
