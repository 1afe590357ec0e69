use serde::{Deserialize, Serialize};

use crate::entities::sea_orm_active_enums::Niche;
use crate::entities::{email_sequences, emails};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSequenceRequest {
    pub name: String,
    pub niche: Niche,
    pub description: Option<String>,
    pub offer_id: Option<i32>,
    pub email_count: i32,
    pub days_between_emails: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSequenceRequest {
    pub offer_id: i32,
    pub email_count: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSequenceResponse {
    pub success: bool,
    pub sequence_id: i32,
}

/// A sequence with its emails ordered by day
#[derive(Debug, Clone, Serialize)]
pub struct SequenceWithEmails {
    #[serde(flatten)]
    pub sequence: email_sequences::Model,
    pub emails: Vec<emails::Model>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComplianceCheckRequest {
    pub text: String,
    pub niche: Niche,
}
