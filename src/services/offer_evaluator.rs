//! Scores an offer from its stored ClickBank statistics
//!
//! Evaluation is all-or-nothing: the offer row is touched only after a
//! complete structured answer has been decoded, and then by a single UPDATE.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveEnum, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::entities::offers;
use crate::entities::sea_orm_active_enums::RecommendationStatus;
use crate::error::{AppError, AppResult};
use crate::services::llm::{CompletionRequest, JsonSchema, TextGenerator, de_whole_number, generate_structured};
use crate::store;

const SYSTEM_PROMPT: &str =
    "You are a ClickBank affiliate marketing expert specializing in offer evaluation and selection.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Recommended,
    Caution,
    Avoid,
}

impl From<Recommendation> for RecommendationStatus {
    fn from(r: Recommendation) -> Self {
        match r {
            Recommendation::Recommended => RecommendationStatus::Recommended,
            Recommendation::Caution => RecommendationStatus::Caution,
            Recommendation::Avoid => RecommendationStatus::Avoid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferEvaluation {
    #[serde(deserialize_with = "de_whole_number")]
    pub overall_score: i32,
    pub recommendation: Recommendation,
    pub gravity_analysis: String,
    pub earnings_analysis: String,
    pub niche_analysis: String,
    pub competition_analysis: String,
    pub profit_potential: String,
    pub action_items: Vec<String>,
    pub summary: String,
}

fn dollars(cents: Option<i32>) -> Decimal {
    Decimal::new(cents.unwrap_or(0) as i64, 2)
}

pub fn evaluation_prompt(offer: &offers::Model) -> String {
    let description = offer
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .map(|d| format!("Description: {}\n", d))
        .unwrap_or_default();

    format!(
        r#"You are a ClickBank affiliate marketing expert. Evaluate this offer based on the 5-step framework:

Product: {name}
Niche: {niche}
Gravity Score: {gravity}
Avg Earnings Per Sale: ${eps}
Avg Conversion Value: ${acv}
{description}
Evaluation Criteria:
1. Gravity Score (ideal: 50-200, avoid <20 or >500)
2. Avg $/Conversion (ideal: $100+, caution <$30)
3. Niche alignment and market demand
4. Competition level
5. Overall profit potential

Provide:
- Overall score (0-100)
- Recommendation status (recommended/caution/avoid)
- Detailed analysis for each criterion
- Action items for promoting this offer"#,
        name = offer.product_name,
        niche = offer.niche,
        gravity = offer.gravity.unwrap_or(0),
        eps = dollars(offer.avg_earnings_per_sale),
        acv = dollars(offer.avg_conversion_value),
        description = description,
    )
}

fn evaluation_schema() -> JsonSchema {
    JsonSchema {
        name: "offer_evaluation",
        schema: json!({
            "type": "object",
            "properties": {
                "overall_score": { "type": "number" },
                "recommendation": { "type": "string", "enum": ["recommended", "caution", "avoid"] },
                "gravity_analysis": { "type": "string" },
                "earnings_analysis": { "type": "string" },
                "niche_analysis": { "type": "string" },
                "competition_analysis": { "type": "string" },
                "profit_potential": { "type": "string" },
                "action_items": { "type": "array", "items": { "type": "string" } },
                "summary": { "type": "string" }
            },
            "required": [
                "overall_score", "recommendation", "gravity_analysis", "earnings_analysis",
                "niche_analysis", "competition_analysis", "profit_potential", "action_items", "summary"
            ],
            "additionalProperties": false
        }),
    }
}

/// Ask the collaborator for an evaluation. Scores outside 0..=100 are clamped.
pub async fn evaluate(llm: &dyn TextGenerator, offer: &offers::Model) -> AppResult<OfferEvaluation> {
    let request = CompletionRequest::structured(SYSTEM_PROMPT, evaluation_prompt(offer), evaluation_schema());
    let mut evaluation: OfferEvaluation = generate_structured(llm, request).await?;
    evaluation.overall_score = evaluation.overall_score.clamp(0, 100);
    Ok(evaluation)
}

/// Write score, recommendation and payload in one statement
pub async fn persist_evaluation(
    db: &DatabaseConnection,
    user_id: i32,
    offer_id: i32,
    evaluation: &OfferEvaluation,
) -> AppResult<()> {
    let payload = serde_json::to_value(evaluation)
        .map_err(|e| AppError::Generation(format!("Invalid evaluation payload: {}", e)))?;
    let status: RecommendationStatus = evaluation.recommendation.into();

    let result = offers::Entity::update_many()
        .col_expr(offers::Column::EvaluationScore, Expr::value(Some(evaluation.overall_score)))
        .col_expr(offers::Column::RecommendationStatus, Expr::value(status.to_value()))
        .col_expr(offers::Column::Evaluation, Expr::value(Some(payload)))
        .col_expr(offers::Column::UpdatedAt, Expr::value(Utc::now().naive_utc()))
        .filter(offers::Column::Id.eq(offer_id))
        .filter(offers::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Offer"));
    }
    Ok(())
}

pub async fn evaluate_offer(
    db: &DatabaseConnection,
    llm: &dyn TextGenerator,
    user_id: i32,
    offer_id: i32,
) -> AppResult<OfferEvaluation> {
    let offer = store::offers::find(Some(db), user_id, offer_id)
        .await?
        .ok_or(AppError::NotFound("Offer"))?;

    tracing::info!(offer_id, product = %offer.product_name, "Evaluating offer");

    let evaluation = evaluate(llm, &offer).await?;
    persist_evaluation(db, user_id, offer_id, &evaluation).await?;

    tracing::info!(
        offer_id,
        score = evaluation.overall_score,
        recommendation = ?evaluation.recommendation,
        "Offer evaluated"
    );

    Ok(evaluation)
}
