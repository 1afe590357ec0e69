//! UTM tracking links

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingParams {
    pub base_url: String,
    pub utm_source: String,
    pub utm_medium: String,
    pub utm_campaign: String,
    #[serde(default)]
    pub utm_term: Option<String>,
    #[serde(default)]
    pub utm_content: Option<String>,
}

/// Set `name` the way `URLSearchParams.set` does: the first existing pair is
/// replaced in place, later duplicates dropped, otherwise appended.
fn set_param(pairs: &mut Vec<(String, String)>, name: &str, value: &str) {
    let mut replaced = false;
    pairs.retain_mut(|(k, v)| {
        if k != name {
            return true;
        }
        if replaced {
            return false;
        }
        *v = value.to_string();
        replaced = true;
        true
    });
    if !replaced {
        pairs.push((name.to_string(), value.to_string()));
    }
}

pub fn build_tracking_url(params: &TrackingParams) -> AppResult<String> {
    let mut url = Url::parse(params.base_url.trim())
        .map_err(|e| AppError::Validation(format!("Invalid base URL: {}", e)))?;

    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    set_param(&mut pairs, "utm_source", &params.utm_source);
    set_param(&mut pairs, "utm_medium", &params.utm_medium);
    set_param(&mut pairs, "utm_campaign", &params.utm_campaign);

    for (name, value) in [("utm_term", &params.utm_term), ("utm_content", &params.utm_content)] {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            set_param(&mut pairs, name, value);
        }
    }

    url.query_pairs_mut().clear().extend_pairs(pairs.iter());
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn params() -> TrackingParams {
        TrackingParams {
            base_url: "https://example.com/offer".to_string(),
            utm_source: "manifestation".to_string(),
            utm_medium: "youtube".to_string(),
            utm_campaign: "test".to_string(),
            utm_term: Some("video-1".to_string()),
            utm_content: None,
        }
    }

    fn query(url: &str) -> HashMap<String, String> {
        Url::parse(url).unwrap().query_pairs().into_owned().collect()
    }

    #[test]
    fn test_supplied_params_present_and_content_absent() {
        let out = build_tracking_url(&params()).unwrap();
        let q = query(&out);

        assert_eq!(q["utm_source"], "manifestation");
        assert_eq!(q["utm_medium"], "youtube");
        assert_eq!(q["utm_campaign"], "test");
        assert_eq!(q["utm_term"], "video-1");
        assert!(!q.contains_key("utm_content"));
        assert!(out.starts_with("https://example.com/offer?"));
    }

    #[test]
    fn test_round_trip_with_existing_query() {
        let mut p = params();
        p.base_url = "https://example.com/a/b?hop=abc&utm_source=old".to_string();
        p.utm_campaign = "spring sale & more".to_string();
        p.utm_content = Some("thumb-b".to_string());

        let q = query(&build_tracking_url(&p).unwrap());
        assert_eq!(q["hop"], "abc");
        assert_eq!(q["utm_source"], "manifestation");
        assert_eq!(q["utm_campaign"], "spring sale & more");
        assert_eq!(q["utm_content"], "thumb-b");
        assert_eq!(q.len(), 6);
    }

    #[test]
    fn test_identical_inputs_identical_output() {
        assert_eq!(build_tracking_url(&params()).unwrap(), build_tracking_url(&params()).unwrap());
    }

    #[test]
    fn test_empty_optional_values_skipped() {
        let mut p = params();
        p.utm_term = Some(String::new());
        let q = query(&build_tracking_url(&p).unwrap());
        assert!(!q.contains_key("utm_term"));
    }

    #[test]
    fn test_relative_url_rejected() {
        let mut p = params();
        p.base_url = "/offer".to_string();
        assert!(matches!(build_tracking_url(&p), Err(AppError::Validation(_))));
    }
}
