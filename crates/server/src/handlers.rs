//! Request handlers
//!
//! Every successful entry operation answers with the same body shape:
//! the affected entries plus the global revision at the time of the call.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::Json;
use revkv::{Entry, Page, Revision, Revisioned, Store, UpsertPayload};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;

/// Response body for entry operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntriesBody {
    /// Entries touched or listed by the request
    pub kvs: Vec<Entry>,
    /// Global revision after the request
    pub revision: Revision,
}

impl From<Revisioned<Entry>> for EntriesBody {
    fn from(r: Revisioned<Entry>) -> Self {
        Self {
            kvs: vec![r.value],
            revision: r.revision,
        }
    }
}

impl From<Revisioned<Page>> for EntriesBody {
    fn from(r: Revisioned<Page>) -> Self {
        Self {
            kvs: r.value.entries,
            revision: r.revision,
        }
    }
}

/// Response body for `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthBody {
    /// Always `"ok"` when the server answers
    pub status: String,
    /// Live entries
    pub entries: usize,
    /// Current global revision
    pub revision: Revision,
}

/// `?cas=` on upserts
#[derive(Debug, Default, Deserialize)]
pub struct CasQuery {
    /// Raw CAS token
    pub cas: Option<String>,
}

/// `?page=` on listings
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Raw page number
    pub page: Option<String>,
}

/// `PUT /entries/:key`
pub async fn put_entry(
    State(store): State<Store>,
    Path(key): Path<String>,
    Query(query): Query<CasQuery>,
    body: Bytes,
) -> Result<Json<EntriesBody>, ApiError> {
    let payload = UpsertPayload::from_json(&body)?;
    if let Some(body_key) = payload.key.as_deref() {
        if body_key != key {
            debug!(%key, body_key, "ignoring key in body");
        }
    }

    let input = payload.into_input()?;
    let written = store.upsert(&key, query.cas.as_deref(), input)?;
    debug!(%key, revision = %written.revision, cas = ?query.cas, "upsert");
    Ok(Json(written.into()))
}

/// `GET /entries/:key`
pub async fn get_entry(
    State(store): State<Store>,
    Path(key): Path<String>,
) -> Result<Json<EntriesBody>, ApiError> {
    Ok(Json(store.get(&key)?.into()))
}

/// `DELETE /entries/:key`
pub async fn delete_entry(
    State(store): State<Store>,
    Path(key): Path<String>,
) -> Result<Json<EntriesBody>, ApiError> {
    let removed = store.delete(&key)?;
    debug!(%key, "delete");
    Ok(Json(removed.into()))
}

/// `GET /entries?page=N`
pub async fn list_entries(
    State(store): State<Store>,
    Query(query): Query<PageQuery>,
) -> Result<Json<EntriesBody>, ApiError> {
    Ok(Json(store.list(query.page.as_deref())?.into()))
}

/// `GET /health`
pub async fn health(State(store): State<Store>) -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok".to_owned(),
        entries: store.len(),
        revision: store.revision(),
    })
}
