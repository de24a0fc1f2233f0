use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ============ Database Models ============

/// A registered citizen.
///
/// The store is populated externally, so every non-key column may be NULL
/// and passes through as `null`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Citizen {
    pub citizen_id: String,
    pub firstname: Option<String>,
    pub house: Option<String>,
    pub age: Option<i64>,
    /// Licence number of the chariot this citizen holds, if any.
    pub chariot_licence: Option<String>,
}

/// Directed relationship between two citizens. The same pair may appear
/// more than once.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Relationship {
    pub from_citizen_id: Option<String>,
    pub to_citizen_id: Option<String>,
    pub relationship_type: Option<String>,
}

/// Chariot registration, keyed by licence number.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct ChariotLicence {
    pub licence_number: String,
    pub model: Option<String>,
    pub vin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct ParkingFine {
    pub id: i64,
    pub licence_number: Option<String>,
    pub location: Option<String>,
    pub fine_amount: Option<i64>,
    pub paid: Option<bool>,
    pub payment_card: Option<String>,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct SpeedingFine {
    pub id: i64,
    pub licence_number: Option<String>,
    pub citizen_id: Option<String>,
    pub speed: Option<i64>,
    pub fine_amount: Option<i64>,
    pub paid: Option<bool>,
    pub payment_card: Option<String>,
}

/// Single-column aggregation result.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct FinesTotal {
    pub total: i64,
}

// ============ API Models ============

/// Licence record merged with its unpaid fines total.
///
/// Serializes flat: `{licenceNumber, model, vin, finesOwing}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChariotWithFines {
    #[serde(flatten)]
    pub licence: ChariotLicence,
    pub fines_owing: i64,
}

/// Row shape of the chariots table view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChariotViewRow {
    pub licence_number: String,
    pub model: Option<String>,
    pub fines_owing: i64,
    pub vin: Option<String>,
}

/// `?citizenId=` query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitizenQueryParams {
    pub citizen_id: Option<String>,
}

/// `?licenceNumber=` query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenceQueryParams {
    pub licence_number: Option<String>,
}

/// URL templates advertised by `GET /apis`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiIndex {
    pub citizens: String,
    pub relationships: String,
    pub chariot_licences: String,
    pub parking_fines: String,
    pub speeding_fines: String,
}

/// Body returned by the echo endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct EchoResponse {
    pub method: String,
    pub url: String,
    pub parameters: serde_json::Map<String, serde_json::Value>,
    pub query: serde_json::Map<String, serde_json::Value>,
    pub headers: serde_json::Map<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chariot_with_fines_serializes_flat() {
        let merged = ChariotWithFines {
            licence: ChariotLicence {
                licence_number: "LC-1".to_string(),
                model: Some("Quadriga".to_string()),
                vin: Some("VIN-1".to_string()),
            },
            fines_owing: 0,
        };
        assert_eq!(
            serde_json::to_value(&merged).unwrap(),
            json!({
                "licenceNumber": "LC-1",
                "model": "Quadriga",
                "vin": "VIN-1",
                "finesOwing": 0
            })
        );
    }

    #[test]
    fn null_columns_serialize_as_null() {
        let licence = ChariotLicence {
            licence_number: "LC-2".to_string(),
            model: Some("Biga".to_string()),
            vin: None,
        };
        assert_eq!(
            serde_json::to_value(&licence).unwrap(),
            json!({ "licenceNumber": "LC-2", "model": "Biga", "vin": null })
        );
    }

    #[test]
    fn query_params_use_camel_case_names() {
        let params: LicenceQueryParams =
            serde_json::from_value(json!({ "licenceNumber": "LC-9" })).unwrap();
        assert_eq!(params.licence_number.as_deref(), Some("LC-9"));
    }
}
