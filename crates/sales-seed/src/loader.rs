use sqlx::postgres::PgPool;

use crate::cli::validate_table_name;
use crate::data::datasets::SaleRow;
use crate::error::{SeedError, SeedResult};

pub const INSERT_COLUMNS: [&str; 11] = [
    "sale_date",
    "customer_id",
    "product_id",
    "store_id",
    "quantity",
    "unit_price",
    "discount",
    "total_amount",
    "payment_type",
    "status",
    "remarks",
];

/// Builds the parameterized single-row insert. `table` must already be a
/// validated identifier; values are always bound, never interpolated.
pub fn insert_statement(table: &str) -> String {
    let placeholders = (1..=INSERT_COLUMNS.len())
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {table} ({}) VALUES ({placeholders})",
        INSERT_COLUMNS.join(", ")
    )
}

/// Inserts every row inside one transaction and commits once.
///
/// Returns the number of inserted rows. An error on any row, or an affected
/// row total that differs from `rows.len()`, rolls the whole batch back.
pub async fn insert_rows(pool: &PgPool, table: &str, rows: &[SaleRow]) -> SeedResult<u64> {
    validate_table_name(table)?;
    let sql = insert_statement(table);
    let mut tx = pool.begin().await?;
    let mut inserted = 0_u64;

    for (idx, row) in rows.iter().enumerate() {
        let outcome = sqlx::query(&sql)
            .bind(row.sale_date.naive_utc())
            .bind(row.customer_id)
            .bind(row.product_id)
            .bind(row.store_id)
            .bind(row.quantity)
            .bind(row.unit_price)
            .bind(row.discount)
            .bind(row.total_amount)
            .bind(&row.payment_type)
            .bind(&row.status)
            .bind(&row.remarks)
            .execute(&mut *tx)
            .await;
        match outcome {
            Ok(done) => inserted += done.rows_affected(),
            Err(error) => {
                tracing::warn!(row = idx, %error, "insert failed, rolling back batch");
                if let Err(rollback_error) = tx.rollback().await {
                    tracing::warn!(%rollback_error, "rollback failed");
                }
                return Err(error.into());
            }
        }
    }

    let expected = rows.len() as u64;
    if inserted != expected {
        tracing::warn!(expected, inserted, "affected row count mismatch, rolling back batch");
        tx.rollback().await?;
        return Err(SeedError::RowCountMismatch {
            expected,
            actual: inserted,
        });
    }

    tx.commit().await?;
    tracing::info!(table, rows = inserted, "batch committed");
    Ok(inserted)
}

pub async fn count_rows(pool: &PgPool, table: &str) -> SeedResult<i64> {
    validate_table_name(table)?;
    let count: i64 = sqlx::query_scalar(&format!("SELECT count(*) FROM {table}"))
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn server_version(pool: &PgPool) -> SeedResult<String> {
    let version: String = sqlx::query_scalar("SHOW server_version")
        .fetch_one(pool)
        .await?;
    Ok(version)
}
