use crate::errors::AppError;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, SqlitePool};

/// Read accessor over the registry store.
///
/// Every call checks a connection out of the pool for the duration of one
/// statement and hands it back afterwards. Failures surface as
/// [`AppError::DatabaseError`]; nothing here retries.
#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Run `sql` with positional `params` and return the first row, if any.
    pub async fn fetch_one<'q, T>(
        &self,
        sql: &'q str,
        params: &[&'q str],
    ) -> Result<Option<T>, AppError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        tracing::debug!("fetch_one: {} {:?}", compact(sql), params);

        let mut query = sqlx::query_as::<_, T>(sql);
        for param in params {
            query = query.bind(*param);
        }

        query
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::DatabaseError)
    }

    /// Run `sql` with positional `params` and materialize every row.
    pub async fn fetch_all<'q, T>(&self, sql: &'q str, params: &[&'q str]) -> Result<Vec<T>, AppError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        tracing::debug!("fetch_all: {} {:?}", compact(sql), params);

        let mut query = sqlx::query_as::<_, T>(sql);
        for param in params {
            query = query.bind(*param);
        }

        query
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::DatabaseError)
    }
}

/// Collapse whitespace so multi-line statements log on one line.
fn compact(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::Citizen;

    #[tokio::test]
    async fn fetch_one_returns_none_for_missing_row() {
        let db = Database::in_memory().await.unwrap();
        let storage = Storage::new(db.pool.clone());

        let citizen: Option<Citizen> = storage
            .fetch_one("SELECT * FROM citizens WHERE citizenId = ?", &["nobody"])
            .await
            .unwrap();
        assert!(citizen.is_none());
    }

    #[tokio::test]
    async fn fetch_all_materializes_rows_in_order() {
        let db = Database::in_memory().await.unwrap();
        sqlx::query(
            "INSERT INTO citizens (citizenId, firstname, house, age, chariotLicence) VALUES
             ('C1', 'Marcus', 'Aurelii', 41, 'LC-1'),
             ('C2', 'Livia', 'Drusi', 35, NULL)",
        )
        .execute(&db.pool)
        .await
        .unwrap();
        let storage = Storage::new(db.pool.clone());

        let citizens: Vec<Citizen> = storage
            .fetch_all("SELECT * FROM citizens ORDER BY citizenId", &[])
            .await
            .unwrap();
        assert_eq!(citizens.len(), 2);
        assert_eq!(citizens[0].firstname.as_deref(), Some("Marcus"));
        assert_eq!(citizens[1].chariot_licence, None);
    }

    #[tokio::test]
    async fn rejected_query_is_a_database_error() {
        let db = Database::in_memory().await.unwrap();
        let storage = Storage::new(db.pool.clone());

        let result: Result<Vec<Citizen>, AppError> =
            storage.fetch_all("SELECT * FROM no_such_table", &[]).await;
        assert!(matches!(result, Err(AppError::DatabaseError(_))));
    }

    #[test]
    fn compact_joins_lines() {
        assert_eq!(compact("SELECT *\n   FROM citizens\n"), "SELECT * FROM citizens");
    }
}
