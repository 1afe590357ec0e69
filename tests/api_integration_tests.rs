mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};

use crate::common::{get, post_json, send, test_app};

#[tokio::test]
async fn test_health_reports_missing_database() {
    let app = test_app("");
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let (status, json) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], false);
}

#[tokio::test]
async fn test_requests_without_user_are_rejected() {
    let app = test_app("");

    for header in [None, Some("abc"), Some("0"), Some("-3")] {
        let mut builder = Request::builder().uri("/api/offers");
        if let Some(value) = header {
            builder = builder.header("x-user-id", value);
        }
        let (status, json) = send(&app.router, builder.body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED, "header {:?}", header);
        assert_eq!(json["code"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn test_reads_without_database_are_empty() {
    let app = test_app("");

    for uri in [
        "/api/offers",
        "/api/landing-pages",
        "/api/email-sequences",
        "/api/performance",
        "/api/niche-strategies?niche=woodworking",
        "/api/video-projects",
        "/api/voices",
    ] {
        let (status, json) = send(&app.router, get(uri)).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(json, json!([]), "{}", uri);
    }

    let (status, _) = send(&app.router, get("/api/offers/1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = send(&app.router, get("/api/offers/1/performance/summary")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, Value::Null);
}

#[tokio::test]
async fn test_writes_without_database_fail() {
    let app = test_app("");
    let body = json!({
        "productName": "Wealth DNA Code",
        "vendor": "wealthdna",
        "niche": "manifestation"
    });

    let (status, json) = send(&app.router, post_json("/api/offers", body)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Database not available");
    assert_eq!(json["code"], "DATABASE_ERROR");
}

#[tokio::test]
async fn test_tracking_url_without_project() {
    let app = test_app("");
    let body = json!({
        "baseUrl": "https://example.com/offer?hop=abc&utm_source=old",
        "utmSource": "woodworking",
        "utmMedium": "youtube",
        "utmCampaign": "shed plans",
        "utmContent": ""
    });

    let (status, json) = send(&app.router, post_json("/api/video/tracking-url", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["trackingUrl"],
        "https://example.com/offer?hop=abc&utm_source=woodworking&utm_medium=youtube&utm_campaign=shed+plans"
    );
}

#[tokio::test]
async fn test_tracking_url_rejects_relative_base() {
    let app = test_app("");
    let body = json!({
        "baseUrl": "/offer",
        "utmSource": "a",
        "utmMedium": "b",
        "utmCampaign": "c"
    });

    let (status, json) = send(&app.router, post_json("/api/video/tracking-url", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_generate_script_counts_words() {
    let app = test_app("  Most people never notice this.\n\nHere is why it matters.  ");
    let body = json!({
        "niche": "prepping",
        "productInfo": "A 72-hour grid-down checklist for families living in suburbs."
    });

    let (status, json) = send(&app.router, post_json("/api/video/script", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["script"], "Most people never notice this.\n\nHere is why it matters.");
    assert_eq!(json["wordCount"], 10);
    assert_eq!(json["template"], "survival");
    assert_eq!(*app.llm.calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn test_generate_script_rejects_short_product_info() {
    let app = test_app("unused");
    let body = json!({ "niche": "woodworking", "productInfo": "too short" });

    let (status, json) = send(&app.router, post_json("/api/video/script", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(*app.llm.calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_generate_script_empty_reply_is_generation_error() {
    let app = test_app("   ");
    let body = json!({
        "niche": "finance",
        "productInfo": "A budgeting course for people starting their first job."
    });

    let (status, json) = send(&app.router, post_json("/api/video/script", body)).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "GENERATION_FAILED");
}

#[tokio::test]
async fn test_list_models() {
    let app = test_app("");

    let (status, json) = send(&app.router, get("/api/video/models")).await;

    assert_eq!(status, StatusCode::OK);
    let models: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["model"].as_str().unwrap())
        .collect();
    assert_eq!(models, vec!["veo3", "veo3.1_fast", "gen4_turbo"]);
}

#[tokio::test]
async fn test_gen4_without_thumbnail_makes_no_provider_call() {
    let app = test_app("");
    let body = json!({
        "script": "Build a sturdy garden bench this weekend.",
        "niche": "woodworking",
        "model": "gen4_turbo"
    });

    let (status, json) = send(&app.router, post_json("/api/video/generate", body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "PRECONDITION_FAILED");
    assert!(app.video.submissions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_generate_video_stores_output() {
    let app = test_app("");
    let body = json!({
        "script": "Build a sturdy garden bench this weekend.",
        "niche": "woodworking",
        "model": "veo3.1_fast"
    });

    let (status, json) = send(&app.router, post_json("/api/video/generate", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["videoUrl"], "https://provider.example/out.mp4");
    assert_eq!(json["taskId"], "task-123");
    assert_eq!(json["model"], "veo3.1_fast");
    let key = json["storageKey"].as_str().unwrap();
    assert!(key.starts_with("videos/runway/veo3.1_fast/"), "{}", key);
    assert!(key.ends_with(".mp4"));
    assert_eq!(app.video.submissions.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_generate_video_with_project_needs_database() {
    let app = test_app("");
    let body = json!({
        "script": "Build a sturdy garden bench this weekend.",
        "niche": "woodworking",
        "model": "veo3",
        "projectId": 4
    });

    let (status, json) = send(&app.router, post_json("/api/video/generate", body)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Database not available");
    assert!(app.video.submissions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_voiceover_and_voice_listing() {
    let app = test_app("");
    let body = json!({
        "text": "Here is the script to narrate.",
        "voiceId": "voice-1",
        "stability": 0.4
    });

    let (status, json) = send(&app.router, post_json("/api/video/voiceover", body)).await;

    assert_eq!(status, StatusCode::OK);
    let key = json["audioKey"].as_str().unwrap();
    assert!(key.starts_with("voiceovers/") && key.ends_with(".mp3"), "{}", key);
    assert_eq!(json["audioUrl"], format!("https://cdn.example/{}", key));

    let (status, json) = send(&app.router, get("/api/video/voices")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json[0]["voice_id"], "voice-1");
}

#[tokio::test]
async fn test_voiceover_rejects_out_of_range_settings() {
    let app = test_app("");
    let body = json!({ "text": "Narrate me.", "voiceId": "voice-1", "style": 1.5 });

    let (status, _) = send(&app.router, post_json("/api/video/voiceover", body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_compliance_check() {
    let reply = json!({
        "is_compliant": false,
        "issues": [{
            "type": "income_claim",
            "text": "earn $10,000 a month",
            "suggestion": "Describe the method without promising earnings"
        }],
        "overall_score": 42,
        "summary": "Contains an income claim"
    });
    let app = test_app(&reply.to_string());
    let body = json!({ "text": "Earn $10,000 a month with this secret.", "niche": "manifestation" });

    let (status, json) = send(&app.router, post_json("/api/compliance/check", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["is_compliant"], false);
    assert_eq!(json["overall_score"], 42);
    assert_eq!(json["issues"][0]["type"], "income_claim");
}

#[tokio::test]
async fn test_video_thumbnail_without_project() {
    let app = test_app("");
    let body = json!({
        "niche": "manifestation",
        "productInfo": "A 7-minute morning audio ritual"
    });

    let (status, json) = send(&app.router, post_json("/api/video/thumbnail", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["imageUrl"], "https://images.example/tmp.png");
    let key = json["storageKey"].as_str().unwrap();
    assert!(key.starts_with("thumbnails/manifestation/"), "{}", key);
    assert!(key.ends_with(".png"));
    assert_eq!(json["storageUrl"], format!("https://cdn.example/{}", key));

    let prompts = app.images.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("photorealistic"));
}

#[tokio::test]
async fn test_offer_thumbnail_needs_a_known_offer() {
    let app = test_app("");
    let body = json!({ "offerId": 3, "benefit": "Sleep through the night" });

    let (status, json) = send(&app.router, post_json("/api/landing-pages/thumbnail", body)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Offer not found");
    assert!(app.images.prompts.lock().unwrap().is_empty());
}
