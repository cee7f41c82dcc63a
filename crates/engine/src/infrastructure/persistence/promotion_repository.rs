//! SQLite-backed promotion storage.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use promo_domain::{Promotion, PromotionId};
use rust_decimal::{Decimal, RoundingStrategy};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{PromotionRepo, RepoError};

/// Total digits allowed in `discount_percentage`.
const DISCOUNT_PRECISION: u32 = 5;
/// Digits after the decimal point in `discount_percentage`.
const DISCOUNT_SCALE: u32 = 2;

const SELECT_COLUMNS: &str =
    "SELECT id, name, discount_percentage, start_date, end_date, status FROM promotion";

/// SQLite implementation of [`PromotionRepo`].
///
/// The decimal column is kept as canonical text so the stored scale is
/// exactly what the API returns.
pub struct SqlitePromotionRepo {
    pool: SqlitePool,
}

impl SqlitePromotionRepo {
    /// Open a pool on `database_url` and make sure the table exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, RepoError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| RepoError::database("promotion.connect", e))?;

        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self, RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS promotion (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                discount_percentage TEXT NOT NULL,
                start_date DATE NOT NULL,
                end_date DATE NOT NULL,
                status VARCHAR(50) NOT NULL CHECK (length(status) <= 50)
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("promotion.schema", e))?;

        tracing::debug!("Promotion table ready");
        Ok(Self { pool })
    }

    async fn insert(&self, promotion: &Promotion, discount: Decimal) -> Result<Promotion, RepoError> {
        let result = sqlx::query(
            r#"
            INSERT INTO promotion (name, discount_percentage, start_date, end_date, status)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&promotion.name)
        .bind(discount.to_string())
        .bind(promotion.start_date)
        .bind(promotion.end_date)
        .bind(&promotion.status)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("promotion.insert", e))?;

        let id = PromotionId::from_i64(result.last_insert_rowid());
        Ok(Promotion {
            discount_percentage: discount,
            ..promotion.clone()
        }
        .with_id(id))
    }

    /// Returns `false` when no row carries `id`.
    async fn update(
        &self,
        id: PromotionId,
        promotion: &Promotion,
        discount: Decimal,
    ) -> Result<bool, RepoError> {
        let result = sqlx::query(
            r#"
            UPDATE promotion
            SET name = ?, discount_percentage = ?, start_date = ?, end_date = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(&promotion.name)
        .bind(discount.to_string())
        .bind(promotion.start_date)
        .bind(promotion.end_date)
        .bind(&promotion.status)
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("promotion.update", e))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl PromotionRepo for SqlitePromotionRepo {
    async fn find_all(&self) -> Result<Vec<Promotion>, RepoError> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("promotion.find_all", e))?;

        rows.iter().map(row_to_promotion).collect()
    }

    async fn find_by_id(&self, id: PromotionId) -> Result<Option<Promotion>, RepoError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("promotion.find_by_id", e))?;

        row.as_ref().map(row_to_promotion).transpose()
    }

    async fn save(&self, promotion: &Promotion) -> Result<Promotion, RepoError> {
        let discount = fit_discount_column(promotion.discount_percentage)?;

        if let Some(id) = promotion.id {
            if self.update(id, promotion, discount).await? {
                return Ok(Promotion {
                    discount_percentage: discount,
                    ..promotion.clone()
                });
            }
        }

        self.insert(promotion, discount).await
    }

    async fn delete_by_id(&self, id: PromotionId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM promotion WHERE id = ?")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("promotion.delete_by_id", e))?;
        Ok(())
    }
}

fn row_to_promotion(row: &SqliteRow) -> Result<Promotion, RepoError> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| RepoError::database("promotion.decode", e))?;
    let name: String = row
        .try_get("name")
        .map_err(|e| RepoError::database("promotion.decode", e))?;
    let discount: String = row
        .try_get("discount_percentage")
        .map_err(|e| RepoError::database("promotion.decode", e))?;
    let start_date: NaiveDate = row
        .try_get("start_date")
        .map_err(|e| RepoError::database("promotion.decode", e))?;
    let end_date: NaiveDate = row
        .try_get("end_date")
        .map_err(|e| RepoError::database("promotion.decode", e))?;
    let status: String = row
        .try_get("status")
        .map_err(|e| RepoError::database("promotion.decode", e))?;

    let discount_percentage = Decimal::from_str(&discount).map_err(|e| {
        RepoError::serialization(format!("invalid discount_percentage {discount:?}: {e}"))
    })?;

    Ok(Promotion {
        id: Some(PromotionId::from_i64(id)),
        name,
        discount_percentage,
        start_date,
        end_date,
        status,
    })
}

/// Coerce a value into the `NUMERIC(5,2)` shape of `discount_percentage`.
///
/// Extra fractional digits are rounded half away from zero. A value whose
/// rounded form needs more than three integer digits is rejected.
pub(crate) fn fit_discount_column(value: Decimal) -> Result<Decimal, RepoError> {
    let mut rounded =
        value.round_dp_with_strategy(DISCOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISCOUNT_SCALE);

    let limit = Decimal::from(10_i64.pow(DISCOUNT_PRECISION - DISCOUNT_SCALE));
    if rounded.abs() >= limit {
        return Err(RepoError::constraint(format!(
            "discount_percentage {value} exceeds NUMERIC({DISCOUNT_PRECISION},{DISCOUNT_SCALE})"
        )));
    }

    Ok(rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).expect("decimal")
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn summer_sale() -> Promotion {
        Promotion::new(
            "Summer Sale",
            dec("15.00"),
            date(2024, 6, 1),
            date(2024, 6, 30),
            "ACTIVE",
        )
    }

    async fn open_repo(dir: &tempfile::TempDir) -> SqlitePromotionRepo {
        let url = format!(
            "sqlite:{}?mode=rwc",
            dir.path().join("promotions.db").to_string_lossy()
        );
        SqlitePromotionRepo::connect(&url, 1)
            .await
            .expect("open repo")
    }

    #[test]
    fn discount_keeps_two_decimal_places() {
        assert_eq!(fit_discount_column(dec("15")).expect("fits").to_string(), "15.00");
        assert_eq!(fit_discount_column(dec("15.5")).expect("fits").to_string(), "15.50");
        assert_eq!(fit_discount_column(dec("999.99")).expect("fits").to_string(), "999.99");
    }

    #[test]
    fn discount_rounds_half_away_from_zero() {
        assert_eq!(fit_discount_column(dec("15.005")).expect("fits").to_string(), "15.01");
        assert_eq!(fit_discount_column(dec("15.004")).expect("fits").to_string(), "15.00");
        assert_eq!(fit_discount_column(dec("-12.345")).expect("fits").to_string(), "-12.35");
    }

    #[test]
    fn discount_with_more_than_three_integer_digits_is_rejected() {
        assert!(matches!(
            fit_discount_column(dec("1000")),
            Err(RepoError::ConstraintViolation(_))
        ));
        // Rounding can push a value over the limit.
        assert!(matches!(
            fit_discount_column(dec("999.995")),
            Err(RepoError::ConstraintViolation(_))
        ));
        assert!(fit_discount_column(dec("999.994")).is_ok());
    }

    #[tokio::test]
    async fn save_without_id_inserts_and_assigns_id() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir).await;

        let saved = repo.save(&summer_sale()).await.expect("save");

        let id = saved.id.expect("generated id");
        assert!(id.as_i64() > 0);
        assert_eq!(saved.name, "Summer Sale");

        let fetched = repo
            .find_by_id(id)
            .await
            .expect("find")
            .expect("stored row");
        assert_eq!(fetched, saved);
    }

    #[tokio::test]
    async fn save_with_existing_id_overwrites_row() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir).await;

        let saved = repo.save(&summer_sale()).await.expect("save");
        let mut changed = saved.clone();
        changed.status = "EXPIRED".to_string();
        changed.discount_percentage = dec("20");

        let updated = repo.save(&changed).await.expect("update");

        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.discount_percentage.to_string(), "20.00");
        let all = repo.find_all().await.expect("find all");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].status, "EXPIRED");
    }

    #[tokio::test]
    async fn save_with_unknown_id_inserts_new_row() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir).await;

        let first = repo.save(&summer_sale()).await.expect("save");
        let ghost = summer_sale().with_id(PromotionId::from_i64(4242));

        let saved = repo.save(&ghost).await.expect("save");

        assert_ne!(saved.id, Some(PromotionId::from_i64(4242)));
        assert_ne!(saved.id, first.id);
        assert_eq!(repo.find_all().await.expect("find all").len(), 2);
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_missing_row() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir).await;

        let found = repo
            .find_by_id(PromotionId::from_i64(1))
            .await
            .expect("find");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn delete_removes_row_and_ignores_missing_ids() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir).await;

        let saved = repo.save(&summer_sale()).await.expect("save");
        let id = saved.id.expect("id");

        repo.delete_by_id(id).await.expect("delete");
        assert!(repo.find_by_id(id).await.expect("find").is_none());

        repo.delete_by_id(id).await.expect("second delete is a no-op");
        repo.delete_by_id(PromotionId::from_i64(999))
            .await
            .expect("missing id is a no-op");
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir).await;

        let first = repo.save(&summer_sale()).await.expect("save");
        repo.delete_by_id(first.id.expect("id"))
            .await
            .expect("delete");
        let second = repo.save(&summer_sale()).await.expect("save");

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn find_all_on_empty_table_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir).await;

        assert!(repo.find_all().await.expect("find all").is_empty());
    }

    #[tokio::test]
    async fn status_longer_than_fifty_chars_is_rejected_by_storage() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = open_repo(&dir).await;

        let mut promotion = summer_sale();
        promotion.status = "X".repeat(51);

        let result = repo.save(&promotion).await;
        assert!(matches!(result, Err(RepoError::Database { .. })));

        promotion.status = "X".repeat(50);
        repo.save(&promotion).await.expect("fifty chars fit");
    }

    #[tokio::test]
    async fn rows_persist_across_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");

        let id = {
            let repo = open_repo(&dir).await;
            repo.save(&summer_sale())
                .await
                .expect("save")
                .id
                .expect("id")
        };

        let repo = open_repo(&dir).await;
        let fetched = repo
            .find_by_id(id)
            .await
            .expect("find")
            .expect("row survives reopen");
        assert_eq!(fetched.name, "Summer Sale");
        assert_eq!(fetched.discount_percentage.to_string(), "15.00");
        assert_eq!(fetched.start_date, date(2024, 6, 1));
    }
}
