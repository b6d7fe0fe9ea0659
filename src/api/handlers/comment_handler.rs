//! Comment handlers for projects and sub-projects.
//!
//! The two collections share one implementation; the thin wrappers pin the
//! parent collection.

use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentManager;
use crate::api::AppState;
use crate::domain::{Attachment, Comment};
use crate::errors::AppResult;
use crate::infra::repositories::CommentScope;
use crate::services::CommentInput;
use crate::types::{ApiResponse, Created, NoContent};

/// Attachment reference in a comment request; the file itself goes through
/// the upload endpoint first.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AttachmentRequest {
    #[schema(example = "offer.pdf")]
    pub file_name: String,
    #[schema(example = "application/pdf")]
    pub file_type: String,
    #[schema(example = "/uploads/3f2a-offer.pdf")]
    pub file_url: String,
}

impl From<AttachmentRequest> for Attachment {
    fn from(req: AttachmentRequest) -> Self {
        Self {
            file_name: req.file_name,
            file_type: req.file_type,
            file_url: req.file_url,
        }
    }
}

/// Comment creation request; needs text, an attachment, or both
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentRequest {
    pub text: Option<String>,
    pub attachment: Option<AttachmentRequest>,
}

/// Comment text update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCommentRequest {
    pub text: Option<String>,
}

/// Comment routes, nested under `/api/comments`.
pub fn comment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/projects/:project_id",
            get(list_project_comments).post(create_project_comment),
        )
        .route(
            "/projects/:project_id/:comment_id",
            axum::routing::put(update_project_comment).delete(delete_project_comment),
        )
        .route(
            "/subprojects/:subproject_id",
            get(list_subproject_comments).post(create_subproject_comment),
        )
        .route(
            "/subprojects/:subproject_id/:comment_id",
            axum::routing::put(update_subproject_comment).delete(delete_subproject_comment),
        )
}

async fn list_impl(
    state: AppState,
    current: CurrentManager,
    scope: CommentScope,
    parent_id: i32,
) -> AppResult<ApiResponse<Vec<Comment>>> {
    let comments = state
        .services
        .comments()
        .list(current.actor(), scope, parent_id)
        .await?;
    Ok(ApiResponse::success(comments))
}

async fn create_impl(
    state: AppState,
    current: CurrentManager,
    scope: CommentScope,
    parent_id: i32,
    payload: CreateCommentRequest,
) -> AppResult<Created<Comment>> {
    let comment = state
        .services
        .comments()
        .create(
            current.actor(),
            scope,
            parent_id,
            CommentInput {
                text: payload.text,
                attachment: payload.attachment.map(Attachment::from),
            },
        )
        .await?;
    Ok(Created(comment))
}

async fn update_impl(
    state: AppState,
    current: CurrentManager,
    scope: CommentScope,
    parent_id: i32,
    comment_id: i32,
    payload: UpdateCommentRequest,
) -> AppResult<ApiResponse<Comment>> {
    let comment = state
        .services
        .comments()
        .update(current.actor(), scope, parent_id, comment_id, payload.text)
        .await?;
    Ok(ApiResponse::success(comment))
}

async fn delete_impl(
    state: AppState,
    current: CurrentManager,
    scope: CommentScope,
    parent_id: i32,
    comment_id: i32,
) -> AppResult<NoContent> {
    state
        .services
        .comments()
        .delete(current.actor(), scope, parent_id, comment_id)
        .await?;
    Ok(NoContent)
}

/// List comments on a project
#[utoipa::path(
    get,
    path = "/api/comments/projects/{project_id}",
    tag = "Comments",
    security(("bearer_auth" = [])),
    params(("project_id" = i32, Path, description = "Project id")),
    responses(
        (status = 200, description = "Comment list", body = [Comment]),
        (status = 404, description = "Project not found or out of scope")
    )
)]
pub async fn list_project_comments(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path(project_id): Path<i32>,
) -> AppResult<ApiResponse<Vec<Comment>>> {
    list_impl(state, current, CommentScope::Project, project_id).await
}

/// Add a comment to a project
#[utoipa::path(
    post,
    path = "/api/comments/projects/{project_id}",
    tag = "Comments",
    security(("bearer_auth" = [])),
    params(("project_id" = i32, Path, description = "Project id")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = Comment),
        (status = 400, description = "Comment needs text or an attachment"),
        (status = 404, description = "Project not found or out of scope")
    )
)]
pub async fn create_project_comment(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path(project_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<CreateCommentRequest>,
) -> AppResult<Created<Comment>> {
    create_impl(state, current, CommentScope::Project, project_id, payload).await
}

/// Edit a project comment (author or admin only)
#[utoipa::path(
    put,
    path = "/api/comments/projects/{project_id}/{comment_id}",
    tag = "Comments",
    security(("bearer_auth" = [])),
    params(
        ("project_id" = i32, Path, description = "Project id"),
        ("comment_id" = i32, Path, description = "Comment id")
    ),
    responses(
        (status = 200, description = "Comment updated", body = Comment),
        (status = 403, description = "Requester is not the author"),
        (status = 404, description = "Comment or project not found")
    )
)]
pub async fn update_project_comment(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path((project_id, comment_id)): Path<(i32, i32)>,
    ValidatedJson(payload): ValidatedJson<UpdateCommentRequest>,
) -> AppResult<ApiResponse<Comment>> {
    update_impl(
        state,
        current,
        CommentScope::Project,
        project_id,
        comment_id,
        payload,
    )
    .await
}

/// Delete a project comment (author or admin only)
#[utoipa::path(
    delete,
    path = "/api/comments/projects/{project_id}/{comment_id}",
    tag = "Comments",
    security(("bearer_auth" = [])),
    params(
        ("project_id" = i32, Path, description = "Project id"),
        ("comment_id" = i32, Path, description = "Comment id")
    ),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 403, description = "Requester is not the author"),
        (status = 404, description = "Comment or project not found")
    )
)]
pub async fn delete_project_comment(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path((project_id, comment_id)): Path<(i32, i32)>,
) -> AppResult<NoContent> {
    delete_impl(state, current, CommentScope::Project, project_id, comment_id).await
}

/// List comments on a sub-project
#[utoipa::path(
    get,
    path = "/api/comments/subprojects/{subproject_id}",
    tag = "Comments",
    security(("bearer_auth" = [])),
    params(("subproject_id" = i32, Path, description = "Sub-project id")),
    responses(
        (status = 200, description = "Comment list", body = [Comment]),
        (status = 404, description = "Sub-project not found or parent out of scope")
    )
)]
pub async fn list_subproject_comments(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path(subproject_id): Path<i32>,
) -> AppResult<ApiResponse<Vec<Comment>>> {
    list_impl(state, current, CommentScope::SubProject, subproject_id).await
}

/// Add a comment to a sub-project
#[utoipa::path(
    post,
    path = "/api/comments/subprojects/{subproject_id}",
    tag = "Comments",
    security(("bearer_auth" = [])),
    params(("subproject_id" = i32, Path, description = "Sub-project id")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = Comment),
        (status = 400, description = "Comment needs text or an attachment"),
        (status = 404, description = "Sub-project not found or parent out of scope")
    )
)]
pub async fn create_subproject_comment(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path(subproject_id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<CreateCommentRequest>,
) -> AppResult<Created<Comment>> {
    create_impl(
        state,
        current,
        CommentScope::SubProject,
        subproject_id,
        payload,
    )
    .await
}

/// Edit a sub-project comment (author or admin only)
#[utoipa::path(
    put,
    path = "/api/comments/subprojects/{subproject_id}/{comment_id}",
    tag = "Comments",
    security(("bearer_auth" = [])),
    params(
        ("subproject_id" = i32, Path, description = "Sub-project id"),
        ("comment_id" = i32, Path, description = "Comment id")
    ),
    responses(
        (status = 200, description = "Comment updated", body = Comment),
        (status = 403, description = "Requester is not the author"),
        (status = 404, description = "Comment or sub-project not found")
    )
)]
pub async fn update_subproject_comment(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path((subproject_id, comment_id)): Path<(i32, i32)>,
    ValidatedJson(payload): ValidatedJson<UpdateCommentRequest>,
) -> AppResult<ApiResponse<Comment>> {
    update_impl(
        state,
        current,
        CommentScope::SubProject,
        subproject_id,
        comment_id,
        payload,
    )
    .await
}

/// Delete a sub-project comment (author or admin only)
#[utoipa::path(
    delete,
    path = "/api/comments/subprojects/{subproject_id}/{comment_id}",
    tag = "Comments",
    security(("bearer_auth" = [])),
    params(
        ("subproject_id" = i32, Path, description = "Sub-project id"),
        ("comment_id" = i32, Path, description = "Comment id")
    ),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 403, description = "Requester is not the author"),
        (status = 404, description = "Comment or sub-project not found")
    )
)]
pub async fn delete_subproject_comment(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentManager>,
    Path((subproject_id, comment_id)): Path<(i32, i32)>,
) -> AppResult<NoContent> {
    delete_impl(
        state,
        current,
        CommentScope::SubProject,
        subproject_id,
        comment_id,
    )
    .await
}
