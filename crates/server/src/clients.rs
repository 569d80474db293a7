//! Clients API endpoints

use api_types::client::{ClientUpdate, ClientView, ClientsResponse};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState, user};
use engine::{Client, UpdateClientCmd};

pub(crate) fn client_view(client: Client) -> ClientView {
    ClientView {
        id: client.id,
        contact_name: client.contact_name,
        company_name: client.company_name,
        email: client.email,
        phone: client.phone,
        address: client.address,
        created_at: client.created_at,
    }
}

pub async fn list(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<ClientsResponse>, ServerError> {
    let clients = state
        .engine
        .clients()
        .await?
        .into_iter()
        .map(client_view)
        .collect();

    Ok(Json(ClientsResponse { clients }))
}

pub async fn get(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClientView>, ServerError> {
    let client = state.engine.client(id).await?;
    Ok(Json(client_view(client)))
}

pub async fn update(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ClientUpdate>,
) -> Result<Json<ClientView>, ServerError> {
    let cmd = UpdateClientCmd {
        client_id: id,
        contact_name: payload.contact_name,
        company_name: payload.company_name,
        email: payload.email,
        phone: payload.phone,
        address: payload.address,
    };

    let client = state.engine.update_client(cmd).await?;
    Ok(Json(client_view(client)))
}

pub async fn delete(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_client(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
