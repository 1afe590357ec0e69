//! Video projects and the script, voice-over, video and tracking steps

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::AppState;
use crate::entities::sea_orm_active_enums::ProjectStatus;
use crate::entities::{video_projects, voices};
use crate::error::{AppError, AppResult};
use crate::handlers::auth::CurrentUser;
use crate::models::common::SuccessResponse;
use crate::models::video::{
    CreateProjectRequest, CreateVoiceRequest, GenerateVideoRequest, ScriptRequest, TrackingUrlRequest,
    TrackingUrlResponse, UpdateProjectRequest, UpdateVoiceRequest, VideoThumbnailRequest, VoiceoverRequest,
};
use crate::services::image_generation::{self, Thumbnail, ThumbnailInput};
use crate::services::script_generator::{self, GeneratedScript, ScriptInput};
use crate::services::tracking_url;
use crate::services::video_synthesis::{self, GeneratedVideo, ModelInfo, VideoModel};
use crate::services::voice_synthesis::{self, ProviderVoice, VoiceOver, VoiceSettings};
use crate::store;

pub async fn list_projects(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<video_projects::Model>>> {
    Ok(Json(store::video_projects::list(state.db(), user.id()).await?))
}

pub async fn get_project(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<video_projects::Model>> {
    store::video_projects::find(state.db(), user.id(), id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Video project"))
}

pub async fn create_project(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<video_projects::Model>)> {
    let db = store::require(state.db())?;
    let project = store::video_projects::create(db, user.id(), payload).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn update_project(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProjectRequest>,
) -> AppResult<Json<video_projects::Model>> {
    let db = store::require(state.db())?;
    Ok(Json(store::video_projects::update(db, user.id(), id, payload).await?))
}

pub async fn delete_project(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
) -> AppResult<Json<SuccessResponse>> {
    let db = store::require(state.db())?;
    store::video_projects::delete(db, user.id(), id).await?;
    Ok(Json(SuccessResponse::ok()))
}

pub async fn generate_script(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(payload): Json<ScriptRequest>,
) -> AppResult<Json<GeneratedScript>> {
    let input = ScriptInput {
        niche: payload.niche,
        product_info: payload.product_info,
        template: payload.prompt_template,
    };
    Ok(Json(script_generator::generate_script(state.llm.as_ref(), &input).await?))
}

/// Synthesize and store a voice-over. With a project id the project records
/// the audio afterwards and the cached voice's usage count goes up.
pub async fn generate_voiceover(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<VoiceoverRequest>,
) -> AppResult<Json<VoiceOver>> {
    let settings = VoiceSettings::new(payload.stability, payload.similarity_boost, payload.style)?;

    let db = match payload.project_id {
        Some(project_id) => {
            let db = store::require(state.db())?;
            store::video_projects::find(Some(db), user.id(), project_id)
                .await?
                .ok_or(AppError::NotFound("Video project"))?;
            Some(db)
        }
        None => None,
    };

    let voiceover = voice_synthesis::generate_voiceover(
        state.speech.as_ref(),
        state.blobs.as_ref(),
        &payload.text,
        &payload.voice_id,
        settings,
    )
    .await?;

    if let (Some(db), Some(project_id)) = (db, payload.project_id) {
        store::video_projects::record_voiceover(
            db,
            user.id(),
            project_id,
            &voiceover.audio_url,
            &payload.voice_id,
            payload.voice_name,
        )
        .await?;
    }

    if let Some(db) = state.db() {
        if let Err(e) = store::voices::record_usage(db, user.id(), &payload.voice_id).await {
            tracing::warn!(voice_id = %payload.voice_id, error = %e, "Failed to record voice usage");
        }
    }

    Ok(Json(voiceover))
}

pub async fn list_provider_voices(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> AppResult<Json<Vec<ProviderVoice>>> {
    Ok(Json(voice_synthesis::list_voices(state.speech.as_ref()).await?))
}

pub async fn list_cached_voices(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<voices::Model>>> {
    Ok(Json(store::voices::list(state.db(), user.id()).await?))
}

pub async fn create_cached_voice(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateVoiceRequest>,
) -> AppResult<(StatusCode, Json<voices::Model>)> {
    let db = store::require(state.db())?;
    let voice = store::voices::create(db, user.id(), payload).await?;
    Ok((StatusCode::CREATED, Json(voice)))
}

pub async fn update_cached_voice(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateVoiceRequest>,
) -> AppResult<Json<voices::Model>> {
    let db = store::require(state.db())?;
    Ok(Json(store::voices::update(db, user.id(), id, payload).await?))
}

/// Blocks until the provider task finishes. Inputs are validated before a
/// project passed along is touched. The project is then marked `generating`
/// and gets its previous status back if generation fails.
pub async fn generate_video(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<GenerateVideoRequest>,
) -> AppResult<Json<GeneratedVideo>> {
    let request = video_synthesis::prepare_request(
        &payload.script,
        payload.niche,
        payload.model,
        payload.thumbnail_url.as_deref(),
    )?;

    let project = match payload.project_id {
        Some(project_id) => {
            let db = store::require(state.db())?;
            let previous = store::video_projects::find(Some(db), user.id(), project_id)
                .await?
                .ok_or(AppError::NotFound("Video project"))?
                .status;
            store::video_projects::set_status(db, user.id(), project_id, ProjectStatus::Generating).await?;
            Some((db, project_id, previous))
        }
        None => None,
    };

    let result = video_synthesis::run_generation(state.video.as_ref(), state.blobs.as_ref(), &request).await;

    match (result, project) {
        (Ok(video), Some((db, project_id, _))) => {
            store::video_projects::record_video(db, user.id(), project_id, &video).await?;
            Ok(Json(video))
        }
        (Ok(video), None) => Ok(Json(video)),
        (Err(e), Some((db, project_id, previous))) => {
            if let Err(reset) = store::video_projects::set_status(db, user.id(), project_id, previous).await {
                tracing::error!(project_id, error = %reset, "Failed to restore project status");
            }
            Err(e)
        }
        (Err(e), None) => Err(e),
    }
}

/// With a project id the stored image becomes the project's thumbnail
pub async fn generate_thumbnail(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<VideoThumbnailRequest>,
) -> AppResult<Json<Thumbnail>> {
    let project = match payload.project_id {
        Some(project_id) => {
            let db = store::require(state.db())?;
            store::video_projects::find(Some(db), user.id(), project_id)
                .await?
                .ok_or(AppError::NotFound("Video project"))?;
            Some((db, project_id))
        }
        None => None,
    };

    let input = ThumbnailInput {
        niche: payload.niche,
        product_info: payload.product_info,
        style: payload.style,
        mechanism: None,
        benefit: None,
    };
    let thumbnail =
        image_generation::generate_thumbnail(state.images.as_ref(), state.blobs.as_ref(), &input).await?;

    if let Some((db, project_id)) = project {
        store::video_projects::record_thumbnail(db, user.id(), project_id, &thumbnail.storage_url).await?;
    }

    Ok(Json(thumbnail))
}

pub async fn list_models(_user: CurrentUser) -> Json<Vec<ModelInfo>> {
    Json(VideoModel::ALL.into_iter().map(video_synthesis::model_info).collect())
}

pub async fn build_tracking_url(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<TrackingUrlRequest>,
) -> AppResult<Json<TrackingUrlResponse>> {
    let url = tracking_url::build_tracking_url(&payload.params)?;

    if let Some(project_id) = payload.project_id {
        let db = store::require(state.db())?;
        store::video_projects::record_tracking(db, user.id(), project_id, &url, &payload.params).await?;
    }

    Ok(Json(TrackingUrlResponse { tracking_url: url }))
}
