use rust_decimal::Decimal;
use sqlx::{postgres::PgRow, Column, PgPool, Row, TypeInfo};

/// An ordered result table from one SQL statement. Lives only for the
/// duration of a dashboard render.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Execute one complete SQL statement and stringify the result table.
///
/// Canned scripts are trusted, version-controlled text; ad hoc statements
/// are the caller's responsibility. Column values are decoded by runtime
/// type inspection since each canned script has its own shape.
pub async fn run_query(pool: &PgPool, sql: &str) -> Result<QueryResult, sqlx::Error> {
    let rows = sqlx::query(sql).fetch_all(pool).await?;

    let columns = match rows.first() {
        Some(row) => row
            .columns()
            .iter()
            .map(|col| col.name().to_string())
            .collect(),
        None => Vec::new(),
    };

    let rows = rows
        .iter()
        .map(|row| {
            (0..row.columns().len())
                .map(|idx| render_value(row, idx))
                .collect()
        })
        .collect();

    Ok(QueryResult { columns, rows })
}

fn render_value(row: &PgRow, idx: usize) -> String {
    let type_name = row.columns()[idx].type_info().name().to_string();
    match type_name.as_str() {
        "TEXT" | "VARCHAR" | "BPCHAR" | "CHAR" | "NAME" => decode::<String>(row, idx),
        "INT2" => decode::<i16>(row, idx),
        "INT4" => decode::<i32>(row, idx),
        "INT8" => decode::<i64>(row, idx),
        "FLOAT4" => decode::<f32>(row, idx),
        "FLOAT8" => decode::<f64>(row, idx),
        "NUMERIC" => decode::<Decimal>(row, idx),
        "BOOL" => decode::<bool>(row, idx),
        other => {
            log::warn!("Unhandled column type in query result: {}", other);
            String::new()
        }
    }
}

fn decode<'r, T>(row: &'r PgRow, idx: usize) -> String
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres> + ToString,
{
    match row.try_get::<Option<T>, _>(idx) {
        Ok(Some(value)) => value.to_string(),
        Ok(None) => String::new(),
        Err(e) => {
            log::warn!("Failed to decode query result column {}: {:?}", idx, e);
            String::new()
        }
    }
}
