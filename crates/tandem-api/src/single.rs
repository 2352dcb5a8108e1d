use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::debug;

use tandem_types::api::{
    AcceptRequest, ChatView, DeleteRequest, DetailQuery, InviteRequest, UpdateDisturbRequest,
    UpdateNicknameRequest,
};

use crate::error::ApiError;
use crate::state::AppState;
use crate::validate::Validate;

pub async fn invite(
    State(state): State<AppState>,
    Json(req): Json<InviteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate().map_err(ApiError::Invalid)?;

    let view = state
        .chats
        .invite(req.inviter_id, req.invitee_id, req.invitee_nickname, req.inviter_disturb)
        .await?;

    debug!(pairing_id = view.pairing_id, "single chat invited");
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn accept(
    State(state): State<AppState>,
    Json(req): Json<AcceptRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate().map_err(ApiError::Invalid)?;

    let view = state
        .chats
        .accept(req.pairing_id, req.invitee_id, req.inviter_nickname, req.invitee_disturb)
        .await?;

    Ok(Json(view))
}

/// Both update endpoints write the caller's full viewpoint (nickname for the
/// other party plus own disturb flag); the request echoes the field it is
/// not changing. The response is the store's post-update view, never the
/// request echoed back.
pub async fn update_nickname(
    State(state): State<AppState>,
    Json(req): Json<UpdateNicknameRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate().map_err(ApiError::Invalid)?;

    let view = update_viewpoint(
        &state,
        req.pairing_id,
        req.is_inviter,
        req.user_id,
        req.nickname,
        req.disturb,
    )
    .await?;
    Ok(Json(view))
}

pub async fn update_disturb(
    State(state): State<AppState>,
    Json(req): Json<UpdateDisturbRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate().map_err(ApiError::Invalid)?;

    let view = update_viewpoint(
        &state,
        req.pairing_id,
        req.is_inviter,
        req.user_id,
        req.nickname,
        req.disturb,
    )
    .await?;
    Ok(Json(view))
}

async fn update_viewpoint(
    state: &AppState,
    pairing_id: i64,
    is_inviter: bool,
    user_id: i64,
    nickname: String,
    disturb: i64,
) -> Result<ChatView, ApiError> {
    let view = if is_inviter {
        ChatView::Inviter(
            state
                .chats
                .update_by_inviter(pairing_id, user_id, nickname, disturb)
                .await?,
        )
    } else {
        ChatView::Invitee(
            state
                .chats
                .update_by_invitee(pairing_id, user_id, nickname, disturb)
                .await?,
        )
    };
    Ok(view)
}

pub async fn detail(
    State(state): State<AppState>,
    Query(query): Query<DetailQuery>,
) -> Result<impl IntoResponse, ApiError> {
    query.validate().map_err(ApiError::Invalid)?;

    let view = if query.is_inviter {
        ChatView::Inviter(
            state
                .chats
                .detail_for_inviter(query.pairing_id, query.user_id)
                .await?,
        )
    } else {
        ChatView::Invitee(
            state
                .chats
                .detail_for_invitee(query.pairing_id, query.user_id)
                .await?,
        )
    };

    Ok(Json(view))
}

pub async fn remove(
    State(state): State<AppState>,
    Json(req): Json<DeleteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate().map_err(ApiError::Invalid)?;

    state
        .chats
        .delete(req.pairing_id, req.inviter_id, req.invitee_id)
        .await?;

    debug!(pairing_id = req.pairing_id, "single chat deleted");
    Ok(StatusCode::OK)
}
