//! Vault operations: authenticated CRUD over encrypted secret records.
//!
//! The tenant id comes exclusively from the verified token via the
//! [`Tenant`] extractor — never from request fields. These handlers never
//! touch plaintext or call the envelope cipher; they manage records the
//! server cannot read.

use {
    axum::{
        Json, Router,
        extract::{Path, State},
        routing::{get, post},
    },
    lockbox_protocol::{SecretContent, SecretMeta, SecretPayload, decode_content, encode_content},
    uuid::Uuid,
};

use crate::{
    auth_middleware::Tenant,
    error::ApiError,
    state::AppState,
    storage::{NewSecret, SecretMetaRecord},
};

/// Build the `/api/secrets/*` router. Must be mounted behind
/// [`require_auth`](crate::auth_middleware::require_auth).
pub fn secret_router() -> Router<AppState> {
    Router::new()
        .route("/", post(add_handler).get(list_handler))
        .route(
            "/{id}",
            get(get_handler).put(edit_handler).delete(delete_handler),
        )
}

async fn add_handler(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Json(payload): Json<SecretPayload>,
) -> Result<Json<SecretMeta>, ApiError> {
    let secret = decode_payload(payload)?;
    let meta = state.secrets.add(tenant, secret).await?;
    Ok(Json(to_wire_meta(meta)))
}

async fn get_handler(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Path(id): Path<Uuid>,
) -> Result<Json<SecretContent>, ApiError> {
    let record = state.secrets.get(tenant, id).await?;
    Ok(Json(SecretContent {
        meta: to_wire_meta(record.meta),
        content: encode_content(&record.content),
    }))
}

async fn delete_handler(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.secrets.delete(tenant, id).await?;
    Ok(Json(serde_json::json!({ "id": id })))
}

async fn list_handler(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
) -> Result<Json<Vec<SecretMeta>>, ApiError> {
    let records = state.secrets.list(tenant).await?;
    Ok(Json(records.into_iter().map(to_wire_meta).collect()))
}

async fn edit_handler(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Path(id): Path<Uuid>,
    Json(payload): Json<SecretPayload>,
) -> Result<Json<SecretMeta>, ApiError> {
    let secret = decode_payload(payload)?;
    let meta = state.secrets.update(tenant, id, secret).await?;
    Ok(Json(to_wire_meta(meta)))
}

fn decode_payload(payload: SecretPayload) -> Result<NewSecret, ApiError> {
    if payload.name.is_empty() {
        return Err(ApiError::bad_request("secret name is required"));
    }
    let content = decode_content(&payload.content)
        .map_err(|_| ApiError::bad_request("content is not valid base64"))?;
    Ok(NewSecret {
        name: payload.name,
        kind: payload.kind,
        content,
    })
}

fn to_wire_meta(meta: SecretMetaRecord) -> SecretMeta {
    SecretMeta {
        id: meta.id,
        name: meta.name,
        kind: meta.kind,
        created: meta.created,
        updated: meta.updated,
    }
}
