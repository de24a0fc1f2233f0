//! Unpaid fines aggregation.
//!
//! The total is recomputed on every call and never cached.

use crate::db_storage::Storage;
use crate::errors::AppError;
use crate::models::FinesTotal;

/// Unpaid parking and speeding amounts for one licence, summed in a single
/// statement so both categories are read from the same snapshot. An empty
/// union sums to 0.
const TOTAL_UNPAID_FINES_SQL: &str = r#"
    SELECT IFNULL(SUM(fineAmount), 0) AS total
    FROM (
        SELECT fineAmount FROM parking_fines WHERE licenceNumber = ? AND paid = 0
        UNION ALL
        SELECT fineAmount FROM speeding_fines WHERE licenceNumber = ? AND paid = 0
    )
"#;

/// Computes the amount still owing on a licence.
#[derive(Clone)]
pub struct FinesAggregator {
    storage: Storage,
}

impl FinesAggregator {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Sum of `fineAmount` over every unpaid parking and speeding fine that
    /// references `licence_number`. Licences without fines owe 0.
    pub async fn total_unpaid_fines(&self, licence_number: &str) -> Result<i64, AppError> {
        let total = self
            .storage
            .fetch_one::<FinesTotal>(TOTAL_UNPAID_FINES_SQL, &[licence_number, licence_number])
            .await?
            .map(|row| row.total)
            .unwrap_or(0);

        tracing::debug!("Unpaid fines for {}: {}", licence_number, total);
        Ok(total)
    }
}
