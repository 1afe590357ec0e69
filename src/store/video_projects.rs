use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

use super::now;
use crate::entities::prelude::VideoProjects;
use crate::entities::sea_orm_active_enums::ProjectStatus;
use crate::entities::video_projects;
use crate::error::{AppError, AppResult};
use crate::models::video::{CreateProjectRequest, UpdateProjectRequest};
use crate::services::script_generator::word_count;
use crate::services::tracking_url::TrackingParams;
use crate::services::video_synthesis::GeneratedVideo;

pub async fn list(db: Option<&DatabaseConnection>, user_id: i32) -> AppResult<Vec<video_projects::Model>> {
    let Some(db) = db else { return Ok(Vec::new()) };

    Ok(VideoProjects::find()
        .filter(video_projects::Column::UserId.eq(user_id))
        .order_by_desc(video_projects::Column::CreatedAt)
        .all(db)
        .await?)
}

pub async fn find(
    db: Option<&DatabaseConnection>,
    user_id: i32,
    id: i32,
) -> AppResult<Option<video_projects::Model>> {
    let Some(db) = db else { return Ok(None) };

    Ok(VideoProjects::find_by_id(id)
        .filter(video_projects::Column::UserId.eq(user_id))
        .one(db)
        .await?)
}

async fn find_owned(db: &DatabaseConnection, user_id: i32, id: i32) -> AppResult<video_projects::Model> {
    find(Some(db), user_id, id)
        .await?
        .ok_or(AppError::NotFound("Video project"))
}

pub async fn create(
    db: &DatabaseConnection,
    user_id: i32,
    req: CreateProjectRequest,
) -> AppResult<video_projects::Model> {
    super::offers::find(Some(db), user_id, req.offer_id)
        .await?
        .ok_or(AppError::NotFound("Offer"))?;

    let ts = now();
    let project = video_projects::ActiveModel {
        user_id: Set(user_id),
        offer_id: Set(req.offer_id),
        title: Set(req.title),
        niche: Set(req.niche),
        script_word_count: Set(Some(word_count(&req.script) as i32)),
        script: Set(req.script),
        prompt_template: Set(req.prompt_template.map(|t| t.as_str().to_string())),
        voiceover_url: Set(None),
        voice_id: Set(None),
        voice_name: Set(None),
        video_url: Set(None),
        thumbnail_url: Set(None),
        duration: Set(None),
        video_model: Set(None),
        video_task_id: Set(None),
        tracking_url: Set(None),
        utm_source: Set(None),
        utm_medium: Set(None),
        utm_campaign: Set(None),
        utm_term: Set(None),
        utm_content: Set(None),
        views: Set(0),
        clicks: Set(0),
        conversions: Set(0),
        ad_spend: Set(0),
        revenue: Set(0),
        status: Set(ProjectStatus::Draft),
        published_at: Set(None),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    };

    let project = project.insert(db).await?;
    tracing::info!(project_id = project.id, offer_id = project.offer_id, "Video project created");
    Ok(project)
}

pub async fn update(
    db: &DatabaseConnection,
    user_id: i32,
    id: i32,
    req: UpdateProjectRequest,
) -> AppResult<video_projects::Model> {
    let existing = find_owned(db, user_id, id).await?;

    let counters = [
        ("views", req.views.map(i64::from)),
        ("clicks", req.clicks.map(i64::from)),
        ("conversions", req.conversions.map(i64::from)),
        ("adSpend", req.ad_spend),
        ("revenue", req.revenue),
    ];
    if let Some((name, _)) = counters.iter().find(|(_, v)| v.is_some_and(|v| v < 0)) {
        return Err(AppError::Validation(format!("{} must not be negative", name)));
    }

    let ts = now();
    let mut project = existing.into_active_model();
    if let Some(v) = req.title {
        project.title = Set(v);
    }
    if let Some(v) = req.script {
        project.script_word_count = Set(Some(word_count(&v) as i32));
        project.script = Set(v);
    }
    if req.thumbnail_url.is_some() {
        project.thumbnail_url = Set(req.thumbnail_url);
    }
    if let Some(v) = req.views {
        project.views = Set(v);
    }
    if let Some(v) = req.clicks {
        project.clicks = Set(v);
    }
    if let Some(v) = req.conversions {
        project.conversions = Set(v);
    }
    if let Some(v) = req.ad_spend {
        project.ad_spend = Set(v);
    }
    if let Some(v) = req.revenue {
        project.revenue = Set(v);
    }
    if let Some(status) = req.status {
        project.status = Set(status);
        if status == ProjectStatus::Published {
            project.published_at = Set(Some(ts));
        }
    }
    project.updated_at = Set(ts);

    Ok(project.update(db).await?)
}

pub async fn delete(db: &DatabaseConnection, user_id: i32, id: i32) -> AppResult<()> {
    let result = VideoProjects::delete_many()
        .filter(video_projects::Column::Id.eq(id))
        .filter(video_projects::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Video project"));
    }
    Ok(())
}

pub async fn record_voiceover(
    db: &DatabaseConnection,
    user_id: i32,
    id: i32,
    voiceover_url: &str,
    voice_id: &str,
    voice_name: Option<String>,
) -> AppResult<video_projects::Model> {
    let mut project = find_owned(db, user_id, id).await?.into_active_model();
    project.voiceover_url = Set(Some(voiceover_url.to_string()));
    project.voice_id = Set(Some(voice_id.to_string()));
    project.voice_name = Set(voice_name);
    project.updated_at = Set(now());

    Ok(project.update(db).await?)
}

pub async fn set_status(
    db: &DatabaseConnection,
    user_id: i32,
    id: i32,
    status: ProjectStatus,
) -> AppResult<video_projects::Model> {
    let mut project = find_owned(db, user_id, id).await?.into_active_model();
    project.status = Set(status);
    project.updated_at = Set(now());

    Ok(project.update(db).await?)
}

pub async fn record_video(
    db: &DatabaseConnection,
    user_id: i32,
    id: i32,
    video: &GeneratedVideo,
) -> AppResult<video_projects::Model> {
    let mut project = find_owned(db, user_id, id).await?.into_active_model();
    project.video_url = Set(Some(video.storage_url.clone()));
    project.duration = Set(Some(video.duration as i32));
    project.video_model = Set(Some(video.model.as_str().to_string()));
    project.video_task_id = Set(Some(video.task_id.clone()));
    project.status = Set(ProjectStatus::Ready);
    project.updated_at = Set(now());

    Ok(project.update(db).await?)
}

pub async fn record_thumbnail(
    db: &DatabaseConnection,
    user_id: i32,
    id: i32,
    thumbnail_url: &str,
) -> AppResult<video_projects::Model> {
    let mut project = find_owned(db, user_id, id).await?.into_active_model();
    project.thumbnail_url = Set(Some(thumbnail_url.to_string()));
    project.updated_at = Set(now());

    Ok(project.update(db).await?)
}

pub async fn record_tracking(
    db: &DatabaseConnection,
    user_id: i32,
    id: i32,
    tracking_url: &str,
    params: &TrackingParams,
) -> AppResult<video_projects::Model> {
    let mut project = find_owned(db, user_id, id).await?.into_active_model();
    project.tracking_url = Set(Some(tracking_url.to_string()));
    project.utm_source = Set(Some(params.utm_source.clone()));
    project.utm_medium = Set(Some(params.utm_medium.clone()));
    project.utm_campaign = Set(Some(params.utm_campaign.clone()));
    project.utm_term = Set(params.utm_term.clone().filter(|v| !v.is_empty()));
    project.utm_content = Set(params.utm_content.clone().filter(|v| !v.is_empty()));
    project.updated_at = Set(now());

    Ok(project.update(db).await?)
}
