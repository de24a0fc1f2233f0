use crate::config::Config;
use crate::db_storage::Storage;
use crate::errors::AppError;
use crate::fines::FinesAggregator;
use crate::models::*;
use crate::views::Views;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::Serialize;
use serde_json::json;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Read accessor over the registry store.
    pub storage: Storage,
    /// Unpaid fines aggregation over the same store.
    pub fines: FinesAggregator,
    /// HTML table renderer.
    pub views: Views,
}

impl AppState {
    pub fn new(config: Config, pool: SqlitePool) -> Result<Self, AppError> {
        let storage = Storage::new(pool);
        Ok(Self {
            config,
            fines: FinesAggregator::new(storage.clone()),
            storage,
            views: Views::new()?,
        })
    }
}

/// Citizen lookup outcome. A miss is still answered with 200.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CitizenLookup {
    Found(Citizen),
    Missing { error: String },
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "chariot-registry",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /
///
/// Landing page linking the table views and listing the API URL templates.
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(links_page(&state.config.public_base_url))
}

/// GET /apis
pub async fn api_index(State(state): State<Arc<AppState>>) -> Json<ApiIndex> {
    Json(api_urls(&state.config.public_base_url))
}

/// GET /apis/citizens?citizenId=
///
/// Unknown citizens yield `{"error": "Citizen not found"}` with status 200,
/// unlike the licence lookup which answers 404.
pub async fn get_citizen(
    State(state): State<Arc<AppState>>,
    params: Result<Query<CitizenQueryParams>, QueryRejection>,
) -> Result<Json<CitizenLookup>, AppError> {
    let Query(params) = params?;
    let citizen_id = required(&params.citizen_id, "citizenId")?;
    tracing::info!("GET /apis/citizens - citizenId: {}", citizen_id);

    let citizen = state
        .storage
        .fetch_one::<Citizen>("SELECT * FROM citizens WHERE citizenId = ?", &[citizen_id])
        .await?;

    Ok(Json(match citizen {
        Some(citizen) => CitizenLookup::Found(citizen),
        None => CitizenLookup::Missing {
            error: "Citizen not found".to_string(),
        },
    }))
}

/// GET /apis/citizens/relationships?citizenId=
///
/// Outgoing relationships of a citizen; empty when there are none.
pub async fn get_relationships(
    State(state): State<Arc<AppState>>,
    params: Result<Query<CitizenQueryParams>, QueryRejection>,
) -> Result<Json<Vec<Relationship>>, AppError> {
    let Query(params) = params?;
    let citizen_id = required(&params.citizen_id, "citizenId")?;
    tracing::info!("GET /apis/citizens/relationships - citizenId: {}", citizen_id);

    let rows = state
        .storage
        .fetch_all::<Relationship>(
            "SELECT * FROM relationships WHERE fromCitizenId = ?",
            &[citizen_id],
        )
        .await?;

    Ok(Json(rows))
}

/// GET /apis/licences/chariots?licenceNumber=
///
/// Licence record with `finesOwing` merged in, or 404 when the licence does
/// not exist.
pub async fn get_chariot_licence(
    State(state): State<Arc<AppState>>,
    params: Result<Query<LicenceQueryParams>, QueryRejection>,
) -> Result<Json<ChariotWithFines>, AppError> {
    let Query(params) = params?;
    let licence_number = required(&params.licence_number, "licenceNumber")?;
    tracing::info!("GET /apis/licences/chariots - licenceNumber: {}", licence_number);

    let licence = state
        .storage
        .fetch_one::<ChariotLicence>(
            "SELECT * FROM chariot_licences WHERE licenceNumber = ?",
            &[licence_number],
        )
        .await?
        .ok_or_else(|| AppError::NotFound("Chariot not found".to_string()))?;

    let fines_owing = state.fines.total_unpaid_fines(licence_number).await?;

    Ok(Json(ChariotWithFines {
        licence,
        fines_owing,
    }))
}

/// GET /apis/fines/speeding?licenceNumber=
pub async fn get_speeding_fines(
    State(state): State<Arc<AppState>>,
    params: Result<Query<LicenceQueryParams>, QueryRejection>,
) -> Result<Json<Vec<SpeedingFine>>, AppError> {
    let Query(params) = params?;
    let licence_number = required(&params.licence_number, "licenceNumber")?;
    tracing::info!("GET /apis/fines/speeding - licenceNumber: {}", licence_number);

    let rows = state
        .storage
        .fetch_all::<SpeedingFine>(
            "SELECT * FROM speeding_fines WHERE licenceNumber = ?",
            &[licence_number],
        )
        .await?;

    Ok(Json(rows))
}

/// GET /apis/fines/parking?licenceNumber=
pub async fn get_parking_fines(
    State(state): State<Arc<AppState>>,
    params: Result<Query<LicenceQueryParams>, QueryRejection>,
) -> Result<Json<Vec<ParkingFine>>, AppError> {
    let Query(params) = params?;
    let licence_number = required(&params.licence_number, "licenceNumber")?;
    tracing::info!("GET /apis/fines/parking - licenceNumber: {}", licence_number);

    let rows = state
        .storage
        .fetch_all::<ParkingFine>(
            "SELECT * FROM parking_fines WHERE licenceNumber = ?",
            &[licence_number],
        )
        .await?;

    Ok(Json(rows))
}

/// Identifier parameters are rejected before any store access when absent or blank.
fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, AppError> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("Missing '{}' parameter", name)))
}

/// URL templates for every JSON resource, rooted at `base`.
pub fn api_urls(base: &str) -> ApiIndex {
    ApiIndex {
        citizens: format!("{base}/citizens?citizenId=<citizenId>"),
        relationships: format!("{base}/citizens/relationships?citizenId=<citizenId>"),
        chariot_licences: format!("{base}/licences/chariots?licenceNumber=<licenceNumber>"),
        parking_fines: format!("{base}/fines/parking?licenceNumber=<licenceNumber>"),
        speeding_fines: format!("{base}/fines/speeding?licenceNumber=<licenceNumber>"),
    }
}

/// Landing page HTML, rooted at `base`.
pub fn links_page(base: &str) -> String {
    let view_links = [
        ("View Citizens Table", format!("{base}/citizens-view")),
        ("View Chariots Table", format!("{base}/chariots-view")),
        ("View Speeding Table", format!("{base}/speeding-view")),
        (
            "View Relationships Table",
            format!("{base}/citizens/relationships-view"),
        ),
    ];

    let api_templates = [
        format!("{base}/citizens?citizenId=<i>{{{{citizenId}}}}</i>"),
        format!("{base}/citizens/relationships?citizenId=<i>{{{{citizenId}}}}</i>"),
        format!("{base}/licences/chariots?licenceNumber=<i>{{{{licenceNumber}}}}</i>"),
        format!("{base}/fines/speeding?licenceNumber=<i>{{{{licenceNumber}}}}</i>"),
    ];

    let links = view_links
        .iter()
        .map(|(label, url)| format!("<li><a href=\"{url}\">{label}</a></li>"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>API &amp; Table Views</title></head>
<body>
  <h1>Viewable tables backing resources:</h1>
  <ul>
{links}
  </ul>

  <h1>API resources:</h1>
  <pre>{templates}</pre>
</body>
</html>
"#,
        templates = api_templates.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://registry.example/apis";

    #[test]
    fn api_urls_are_rooted_at_base() {
        let index = api_urls(BASE);
        assert_eq!(
            index.citizens,
            "https://registry.example/apis/citizens?citizenId=<citizenId>"
        );
        assert_eq!(
            index.parking_fines,
            "https://registry.example/apis/fines/parking?licenceNumber=<licenceNumber>"
        );
    }

    #[test]
    fn links_page_lists_every_view() {
        let html = links_page(BASE);
        for view in [
            "citizens-view",
            "chariots-view",
            "speeding-view",
            "citizens/relationships-view",
        ] {
            assert!(html.contains(&format!("href=\"{BASE}/{view}\"")), "{view}");
        }
        assert!(html.contains("citizenId=<i>{{citizenId}}</i>"));
    }

    #[test]
    fn blank_identifier_is_rejected() {
        assert!(required(&None, "citizenId").is_err());
        assert!(required(&Some("  ".to_string()), "citizenId").is_err());
        assert_eq!(required(&Some("C1".to_string()), "citizenId").unwrap(), "C1");
    }
}
