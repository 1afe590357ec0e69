use serde::{Deserialize, Serialize};

use crate::entities::offers;
use crate::entities::sea_orm_active_enums::{Niche, OfferSource, OfferStatus};
use crate::services::product_import::ProductInfo;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferRequest {
    pub product_name: String,
    pub vendor: String,
    pub niche: Niche,
    pub source: Option<OfferSource>,
    pub clickbank_id: Option<String>,
    pub source_url: Option<String>,
    pub gravity: Option<i32>,
    /// Cents
    pub avg_earnings_per_sale: Option<i32>,
    /// Cents
    pub avg_conversion_value: Option<i32>,
    /// Basis points
    pub commission_rate: Option<i32>,
    /// Basis points
    pub rebill_rate: Option<i32>,
    pub sales_page_url: Option<String>,
    pub affiliate_page_url: Option<String>,
    pub description: Option<String>,
    pub target_audience: Option<String>,
    pub notes: Option<String>,
}

impl CreateOfferRequest {
    /// Offer draft from an imported sales page
    pub fn from_import(url: &str, info: &ProductInfo) -> Self {
        Self {
            product_name: info.product_name.clone(),
            vendor: info.vendor.clone(),
            niche: info.niche,
            source: Some(OfferSource::Custom),
            clickbank_id: None,
            source_url: Some(url.to_string()),
            gravity: None,
            avg_earnings_per_sale: None,
            avg_conversion_value: None,
            commission_rate: None,
            rebill_rate: None,
            sales_page_url: Some(url.to_string()),
            affiliate_page_url: None,
            description: Some(info.description.clone()),
            target_audience: Some(info.target_audience.clone()),
            notes: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOfferRequest {
    pub product_name: Option<String>,
    pub vendor: Option<String>,
    pub niche: Option<Niche>,
    pub gravity: Option<i32>,
    pub avg_earnings_per_sale: Option<i32>,
    pub avg_conversion_value: Option<i32>,
    pub commission_rate: Option<i32>,
    pub rebill_rate: Option<i32>,
    pub sales_page_url: Option<String>,
    pub affiliate_page_url: Option<String>,
    pub description: Option<String>,
    pub target_audience: Option<String>,
    pub notes: Option<String>,
    pub status: Option<OfferStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImportOfferRequest {
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportOfferResponse {
    pub offer: offers::Model,
    pub product: ProductInfo,
}
