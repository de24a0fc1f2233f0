//! HTML table views over whole tables.

use crate::errors::{AppError, ResultExt};
use crate::handlers::AppState;
use crate::models::{ChariotLicence, ChariotViewRow, Citizen, Relationship, SpeedingFine};
use axum::{extract::State, response::Html};
use std::sync::Arc;

const CITIZEN_COLUMNS: &[&str] = &["citizenId", "firstname", "house", "age", "chariotLicence"];
const RELATIONSHIP_COLUMNS: &[&str] = &["fromCitizenId", "toCitizenId", "relationshipType"];
const CHARIOT_COLUMNS: &[&str] = &["licenceNumber", "model", "finesOwing", "vin"];
const SPEEDING_COLUMNS: &[&str] = &[
    "id",
    "licenceNumber",
    "citizenId",
    "speed",
    "fineAmount",
    "paid",
    "paymentCard",
];

/// GET /apis/citizens-view
pub async fn citizens_view(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    tracing::info!("GET /apis/citizens-view");

    let rows = state
        .storage
        .fetch_all::<Citizen>("SELECT * FROM citizens", &[])
        .await?;

    Ok(Html(state.views.render_table(
        "Citizens",
        CITIZEN_COLUMNS,
        &rows,
    )?))
}

/// GET /apis/citizens/relationships-view
pub async fn relationships_view(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, AppError> {
    tracing::info!("GET /apis/citizens/relationships-view");

    let rows = state
        .storage
        .fetch_all::<Relationship>("SELECT * FROM relationships", &[])
        .await?;

    Ok(Html(state.views.render_table(
        "Relationships",
        RELATIONSHIP_COLUMNS,
        &rows,
    )?))
}

/// GET /apis/chariots-view
///
/// Aggregates fines once per licence, one query per row. If any row's
/// aggregation fails the whole page fails.
pub async fn chariots_view(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    tracing::info!("GET /apis/chariots-view");

    let chariots = state
        .storage
        .fetch_all::<ChariotLicence>("SELECT * FROM chariot_licences", &[])
        .await?;

    let mut rows = Vec::with_capacity(chariots.len());
    for chariot in chariots {
        let fines_owing = state
            .fines
            .total_unpaid_fines(&chariot.licence_number)
            .await
            .with_context(|| format!("aggregating fines for {}", chariot.licence_number))?;

        rows.push(ChariotViewRow {
            licence_number: chariot.licence_number,
            model: chariot.model,
            fines_owing,
            vin: chariot.vin,
        });
    }

    Ok(Html(state.views.render_table(
        "Chariot Licences",
        CHARIOT_COLUMNS,
        &rows,
    )?))
}

/// GET /apis/speeding-view
pub async fn speeding_view(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    tracing::info!("GET /apis/speeding-view");

    let rows = state
        .storage
        .fetch_all::<SpeedingFine>("SELECT * FROM speeding_fines", &[])
        .await?;

    Ok(Html(state.views.render_table(
        "Speeding Fines",
        SPEEDING_COLUMNS,
        &rows,
    )?))
}
