use crate::errors::AppError;
use serde::Serialize;
use serde_json::Value;
use tera::{Context, Tera};

const TABLE_TEMPLATE: &str = "table.html";

/// HTML renderer for the table views.
///
/// Templates are embedded at compile time; `.html` templates are autoescaped
/// by Tera, so cell values are safe to come straight from the store.
#[derive(Clone)]
pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> Result<Self, AppError> {
        let mut tera = Tera::default();
        tera.add_raw_template(TABLE_TEMPLATE, include_str!("../templates/table.html"))?;
        Ok(Self { tera })
    }

    /// Render one `<tr>` per record and one cell per column name, in column
    /// order. Columns missing from a record render as empty cells.
    pub fn render_table<T: Serialize>(
        &self,
        title: &str,
        columns: &[&str],
        records: &[T],
    ) -> Result<String, AppError> {
        let rows = records
            .iter()
            .map(|record| project_row(record, columns))
            .collect::<Result<Vec<_>, _>>()?;

        let mut context = Context::new();
        context.insert("title", title);
        context.insert("columns", columns);
        context.insert("rows", &rows);

        Ok(self.tera.render(TABLE_TEMPLATE, &context)?)
    }
}

fn project_row<T: Serialize>(record: &T, columns: &[&str]) -> Result<Vec<String>, AppError> {
    let value = serde_json::to_value(record)
        .map_err(|e| AppError::InternalError(format!("Row serialization failed: {}", e)))?;

    Ok(columns
        .iter()
        .map(|column| cell_text(value.get(*column)))
        .collect())
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
