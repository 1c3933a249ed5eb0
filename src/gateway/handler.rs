use axum::{Json, extract::State};
use tracing::{debug, instrument};

use crate::formatter::{Statement, format_statement};
use crate::gateway::error::GatewayError;
use crate::gateway::payload::ScreenRequest;
use crate::gateway::state::HandlerState;
use crate::scorer::RemoteScorer;
use crate::store::{Record, RecordStore};

/// `POST /api/v1/screenings`: screen one statement.
///
/// Returns the display envelope for the stored (or freshly scored) output.
/// Whitespace-only input is rejected before the broker runs.
#[instrument(skip(state, request))]
pub async fn screen_handler<S, C>(
    State(state): State<HandlerState<S, C>>,
    Json(request): Json<ScreenRequest>,
) -> Result<Json<Statement>, GatewayError>
where
    S: RecordStore + 'static,
    C: RemoteScorer + 'static,
{
    let input = request.input.trim();
    if input.is_empty() {
        return Err(GatewayError::InvalidRequest(
            "input must not be empty".to_string(),
        ));
    }

    debug!(input_len = input.len(), "Processing screening request");

    let output = state.broker.process_input(input).await?;

    Ok(Json(format_statement(&output)))
}

/// `GET /api/v1/screenings`: list every persisted record.
#[instrument(skip(state))]
pub async fn records_handler<S, C>(
    State(state): State<HandlerState<S, C>>,
) -> Result<Json<Vec<Record>>, GatewayError>
where
    S: RecordStore + 'static,
    C: RemoteScorer + 'static,
{
    let records = state.broker.view_all_records()?;

    Ok(Json(records))
}
