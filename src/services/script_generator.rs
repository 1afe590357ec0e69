//! YouTube ad script generation from four fixed prompt templates

use serde::{Deserialize, Serialize};

use crate::entities::sea_orm_active_enums::Niche;
use crate::error::{AppError, AppResult};
use crate::services::copy_library::{MECHANISM_INTRODUCTIONS, bullet_list};
use crate::services::llm::{CompletionRequest, TextGenerator};

pub const MIN_PRODUCT_INFO_CHARS: usize = 20;
pub const MAX_PRODUCT_INFO_CHARS: usize = 1000;
const TARGET_WORD_COUNT: &str = "240-320 words";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptTemplate {
    Manifestation,
    Survival,
    Woodworking,
    Universal,
}

/// The fixed text blocks one template contributes to a prompt
#[derive(Debug)]
pub struct TemplateText {
    pub system: &'static str,
    pub structure: &'static str,
    pub guidelines: &'static str,
    pub tone: &'static str,
}

impl PromptTemplate {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptTemplate::Manifestation => "manifestation",
            PromptTemplate::Survival => "survival",
            PromptTemplate::Woodworking => "woodworking",
            PromptTemplate::Universal => "universal",
        }
    }

    /// Explicit selector wins; otherwise the niche default, then universal
    pub fn select(explicit: Option<PromptTemplate>, niche: Niche) -> PromptTemplate {
        explicit.unwrap_or(match niche {
            Niche::Manifestation => PromptTemplate::Manifestation,
            Niche::Prepping => PromptTemplate::Survival,
            Niche::Woodworking => PromptTemplate::Woodworking,
            _ => PromptTemplate::Universal,
        })
    }

    pub fn text(&self) -> &'static TemplateText {
        match self {
            PromptTemplate::Manifestation => &MANIFESTATION,
            PromptTemplate::Survival => &SURVIVAL,
            PromptTemplate::Woodworking => &WOODWORKING,
            PromptTemplate::Universal => &UNIVERSAL,
        }
    }
}

static MANIFESTATION: TemplateText = TemplateText {
    system: "You are an expert YouTube ad copywriter specializing in brain enhancement and manifestation offers. Your task is to write a compliant, curiosity-driven YouTube ad script that converts cold traffic and passes YouTube's strict compliance filters.",
    structure: r#"1. Qualify the Audience / Open Loop: Ask a question about why typical manifestation techniques don't work. Dispel a belief (e.g., "It's not just about positive thinking"). Tease a new method based on real science or internal reprogramming.

2. What's in It for Them: Explain what this method may unlock: clarity, motivation, or focus. Describe the emotional transformation, not material outcomes.

3. Call Out Audience + Agitate: Speak to people who've tried vision boards, affirmations, or journaling with no success. Empathize with their frustration.

4. Establish Authority + Mechanism: Introduce the expert, researcher, or origin of the discovery. Briefly explain the mechanism (e.g., sound-based protocol, brainwave alignment).

5. Provide the Solution / New Opportunity: Describe how this technique works and how it differs from traditional methods.

6. Call to Action #1: Direct viewers to watch a free video explaining how the method works.

7. Value Perception: Show how past methods missed the deeper root of change. Emphasize simplicity and internal alignment.

8. Social Proof / Benefits: Mention users or early adopters who've experienced calm, clarity, or improved focus. Use compliant language like "many report" or "early feedback suggests."

9. Call to Action #2 / Soft Urgency: Encourage them to click now to see the presentation while it's still online."#,
    guidelines: r#"- Use words like "may support", "could improve", "many people report"
- Never guarantee results, speed, wealth, or success
- Avoid references to curing depression, trauma, anxiety, etc.
- Avoid phrases like "instantly attract," "manifest thousands," or "reprogram in 5 minutes"
- Stay science-backed and education-forward
- Final CTA must direct to an educational resource, never a "buy now""#,
    tone: "Scientific, thoughtful, curiosity-driven",
};

static SURVIVAL: TemplateText = TemplateText {
    system: "You are an expert YouTube ad copywriter specializing in preparedness and alternative energy offers. Your task is to write a compliant YouTube ad script for a prepping/survival product that educates and empowers without fear-mongering.",
    structure: r#"1. Qualify the Audience / Open Loop: Ask: "What happens if the grid fails?" Dispel the belief that energy independence requires expensive solar tech. Tease a small, smart, DIY method.

2. What's in It for Them: Share how the method may support self-reliance, reduce stress, or improve emergency readiness. Mention non-electric survival benefits where relevant.

3. Call Out Audience + Agitate: Address homeowners, campers, preppers. Mention the fear of being unprepared or reliant on unstable infrastructure.

4. Establish Authority + Mechanism: Introduce the creator: an engineer, off-grid expert, or inventor. Explain the simple mechanism (e.g., repurposed energy design, battery hack, off-grid system).

5. Provide the Solution / New Opportunity: Explain how this system supports continuous power without complex installs.

6. Call to Action #1: Direct them to an educational video that shows how it works.

7. Value Perception: Compare to solar/gas generators and show cost, convenience, or speed advantages.

8. Social Proof / Benefits: Share that many people are already using this for camping, emergency prep, or daily backup. Use phrases like "people are turning to this", or "early adopters say".

9. Call to Action #2 / Soft Urgency: Reinforce that this free video may not be available forever and it's worth seeing now."#,
    guidelines: r#"- No claims of cutting power bills in half or "run your whole house"
- Use language like "many are turning to..." or "could provide backup support"
- Focus on learning, building, and personal readiness, not promises
- Never suggest you'll survive every disaster; focus on peace of mind and preparedness skills
- Tone should be practical, clear, and calm, not fear-mongering or doomsday"#,
    tone: "Calm, empowering, education-focused",
};

static WOODWORKING: TemplateText = TemplateText {
    system: "You are an expert YouTube ad copywriter specializing in woodworking and DIY offers. Your task is to write a compliant, high-converting YouTube ad script that appeals to beginners and hobbyists.",
    structure: r#"1. Qualify the Audience / Open Loop: Ask a curiosity-driven question related to woodworking struggles. Dispel a myth (e.g., "You need expensive tools"). Introduce a little-known system that makes building easy and fun.

2. What's in It for Them: Explain how this system simplifies building and helps users complete real, useful projects. Highlight benefits like confidence, cost savings, and creative satisfaction.

3. Call Out Audience + Agitate: Address common frustrations: complex instructions, failed builds, wasted materials. Speak to beginners, hobbyists, or anyone who has felt stuck or overwhelmed.

4. Establish Authority + Mechanism: Introduce the expert who created this system. Briefly explain the mechanism (e.g., easy-to-follow blueprints, project planner, material guides).

5. Provide the Solution / New Opportunity: Show how this approach creates a completely different experience from trial-and-error learning.

6. Call to Action #1: Invite viewers to watch a free step-by-step video or training to see how it works.

7. Value Perception: Compare it to messy YouTube tutorials or expensive pro tools. Emphasize clarity, guidance, and accessibility.

8. Social Proof / Benefits: Share that many people are already using this to create shelves, tables, benches, and more.

9. Call to Action #2 / Soft Urgency: Encourage viewers to click now to watch the presentation while it's still available."#,
    guidelines: r#"- Use soft language like "may help", "could support", "many people find"
- Avoid specific timeframes, guarantees, or financial claims
- Do not reference "income," "results in X days," or "guaranteed success"
- Focus on personal development, creativity, and practical skill-building
- Include expert or creator's credentials if provided
- Keep the tone warm, clear, and educational, never hypey or salesy
- Final CTA must focus on watching a free educational video, no hard sells"#,
    tone: "Friendly, helpful, empowering",
};

static UNIVERSAL: TemplateText = TemplateText {
    system: "You are an expert YouTube ad copywriter. Your task is to write a compliant, curiosity-driven YouTube ad script for the provided offer that converts cold traffic and passes YouTube's compliance filters.",
    structure: r#"1. Qualify the Audience / Open Loop: Start with a question or bold statement about a common struggle in the niche. Dispel a myth or belief most people have. Tease a unique method or surprising discovery.

2. What's in It for Them: Describe how this method may help, emotionally or practically. Show what users could experience if it works for them.

3. Call Out Audience + Agitate Pain Points: Speak directly to the audience. Highlight daily frustrations or challenges. Make them feel understood.

4. Establish Authority + Mechanism: Introduce the expert who discovered this method. Briefly explain the mechanism or process behind the results (without hype).

5. Provide the Solution / New Opportunity: Explain how this method works and how it's different from what they've tried. Position it as a simple new opportunity.

6. Call to Action #1: Tell them exactly what to do: watch the video, learn more, or discover how it works.

7. Value Perception: Explain why past solutions didn't work. Highlight why this is easier, smarter, or more natural.

8. Social Proof / Benefits: Mention how others are using it or how it's spreading quickly. Use soft language like "many report," "thousands are turning to..."

9. Call to Action #2 / Soft Urgency: Reinforce the benefit of taking action now and that the video or demo may not be up for long."#,
    guidelines: r#"- Use soft, compliant phrasing: "may help," "could support," "many people find"
- Do NOT guarantee results, specific timeframes, or outcome claims
- Do NOT mention money, income, or health cures unless provided by compliant testimonial context
- Always frame offer as educational, valuable, curiosity-driven
- End with clear, soft CTA inviting to watch free presentation or learn how it works"#,
    tone: "Educational, helpful, curiosity-driven, emotionally engaging",
};

#[derive(Debug, Clone)]
pub struct ScriptInput {
    pub niche: Niche,
    pub product_info: String,
    pub template: Option<PromptTemplate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedScript {
    pub script: String,
    pub word_count: usize,
    pub template: PromptTemplate,
}

pub fn validate_product_info(info: &str) -> AppResult<()> {
    let chars = info.trim().chars().count();
    if chars < MIN_PRODUCT_INFO_CHARS {
        return Err(AppError::Validation(format!(
            "Product information must be at least {} characters",
            MIN_PRODUCT_INFO_CHARS
        )));
    }
    if chars > MAX_PRODUCT_INFO_CHARS {
        return Err(AppError::Validation(format!(
            "Product information must be at most {} characters",
            MAX_PRODUCT_INFO_CHARS
        )));
    }
    Ok(())
}

pub fn script_prompt(product_info: &str, template: PromptTemplate) -> String {
    let text = template.text();
    format!(
        r#"Product Information:
{info}

Write a YouTube ad script following this structure:
{structure}

Mechanism phrasing that stays compliant:
{mechanisms}

Guidelines:
{guidelines}

Tone: {tone}
Word Count: {words}

Generate the script now. Output only the script text, no additional commentary."#,
        info = product_info.trim(),
        structure = text.structure,
        mechanisms = bullet_list(MECHANISM_INTRODUCTIONS.values()),
        guidelines = text.guidelines,
        tone = text.tone,
        words = TARGET_WORD_COUNT,
    )
}

pub fn word_count(script: &str) -> usize {
    script.split_whitespace().count()
}

pub async fn generate_script(llm: &dyn TextGenerator, input: &ScriptInput) -> AppResult<GeneratedScript> {
    validate_product_info(&input.product_info)?;

    let template = PromptTemplate::select(input.template, input.niche);
    tracing::info!(niche = %input.niche, template = template.as_str(), "Generating ad script");

    let request = CompletionRequest::text(template.text().system, script_prompt(&input.product_info, template));
    let content = llm
        .complete(request)
        .await
        .map_err(|e| e.into_app_error("Script generation failed"))?;

    let script = content.map(|c| c.trim().to_string()).unwrap_or_default();
    if script.is_empty() {
        return Err(AppError::Generation(
            "Script generation failed: No content generated".to_string(),
        ));
    }

    Ok(GeneratedScript {
        word_count: word_count(&script),
        script,
        template,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::FakeTextGenerator;

    const PRODUCT: &str = "Step-by-step plans for sixteen thousand woodworking projects.";

    #[test]
    fn test_template_selection() {
        assert_eq!(PromptTemplate::select(None, Niche::Woodworking), PromptTemplate::Woodworking);
        assert_eq!(PromptTemplate::select(None, Niche::Prepping), PromptTemplate::Survival);
        assert_eq!(PromptTemplate::select(None, Niche::Manifestation), PromptTemplate::Manifestation);
        assert_eq!(PromptTemplate::select(None, Niche::Finance), PromptTemplate::Universal);
        assert_eq!(PromptTemplate::select(None, Niche::Other), PromptTemplate::Universal);
        assert_eq!(
            PromptTemplate::select(Some(PromptTemplate::Survival), Niche::Woodworking),
            PromptTemplate::Survival
        );
    }

    #[tokio::test]
    async fn test_woodworking_prompt_carries_woodworking_guidelines() {
        let llm = FakeTextGenerator::replying("  Ever wondered why your builds wobble?  ");
        let input = ScriptInput {
            niche: Niche::Woodworking,
            product_info: PRODUCT.to_string(),
            template: None,
        };

        let result = generate_script(&llm, &input).await.unwrap();
        assert_eq!(result.script, "Ever wondered why your builds wobble?");
        assert_eq!(result.word_count, 6);
        assert_eq!(result.template, PromptTemplate::Woodworking);

        let prompt = llm.last_user_prompt();
        assert!(prompt.contains("You need expensive tools"));
        assert!(prompt.contains("Keep the tone warm, clear, and educational"));
        assert!(prompt.contains("Word Count: 240-320 words"));
        assert!(!prompt.contains("End with clear, soft CTA inviting to watch free presentation"));
        assert!(llm.last_system_prompt().contains("woodworking and DIY offers"));
    }

    #[tokio::test]
    async fn test_finance_falls_back_to_universal() {
        let llm = FakeTextGenerator::replying("script body");
        let input = ScriptInput {
            niche: Niche::Finance,
            product_info: "A budgeting course for first-time investors.".to_string(),
            template: None,
        };

        let result = generate_script(&llm, &input).await.unwrap();
        assert_eq!(result.template, PromptTemplate::Universal);
        assert!(llm.last_user_prompt().contains("End with clear, soft CTA inviting to watch free presentation"));
        assert!(llm.last_user_prompt().contains("Tone: Educational, helpful, curiosity-driven, emotionally engaging"));
    }

    #[tokio::test]
    async fn test_short_product_info_rejected_without_call() {
        let llm = FakeTextGenerator::replying("unused");
        let input = ScriptInput {
            niche: Niche::Health,
            product_info: "too short".to_string(),
            template: None,
        };

        let err = generate_script(&llm, &input).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(llm.calls(), 0);
    }

    #[test]
    fn test_long_product_info_rejected() {
        assert!(validate_product_info(&"a".repeat(1001)).is_err());
        assert!(validate_product_info(&"a".repeat(1000)).is_ok());
    }

    #[tokio::test]
    async fn test_provider_failure_is_wrapped() {
        let llm = FakeTextGenerator::failing("rate limited");
        let input = ScriptInput {
            niche: Niche::Health,
            product_info: PRODUCT.to_string(),
            template: None,
        };

        let err = generate_script(&llm, &input).await.unwrap_err();
        assert!(matches!(err, AppError::Generation(ref m) if m == "Script generation failed: rate limited"));
    }

    #[test]
    fn test_word_count_splits_on_any_whitespace() {
        assert_eq!(word_count("one  two\nthree\tfour"), 4);
        assert_eq!(word_count(""), 0);
    }
}
