//! Statistics API endpoints

use api_types::stats::Statistics;
use axum::{Extension, Json, extract::State};

use crate::{ServerError, server::ServerState, user};

/// Handle requests for dashboard statistics
pub async fn get_stats(
    _: Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Statistics>, ServerError> {
    let stats = state.engine.statistics().await?;

    Ok(Json(Statistics {
        active_quotations: stats.active_quotations,
        quoted_total: stats.quoted_total.to_string(),
        clients: stats.clients,
    }))
}
