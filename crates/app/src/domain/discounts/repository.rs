//! Discounts Repository

use std::error::Error;

use async_trait::async_trait;
use jiff::civil::Date;
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use mockall::automock;
use rebate::{
    discounts::{Discount, DiscountKind, DiscountType},
    windows::DiscountWindow,
};
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::discounts::{
        data::{DiscountUpdate, NewDiscount},
        records::{DiscountRecord, DiscountUuid, ProductUuid},
    },
};

const LIST_DISCOUNTS_SQL: &str = include_str!("sql/list_discounts.sql");
const GET_DISCOUNT_SQL: &str = include_str!("sql/get_discount.sql");
const CREATE_DISCOUNT_SQL: &str = include_str!("sql/create_discount.sql");
const UPDATE_DISCOUNT_SQL: &str = include_str!("sql/update_discount.sql");
const TOGGLE_DISCOUNT_SQL: &str = include_str!("sql/toggle_discount.sql");
const REPLACE_END_DATE_SQL: &str = include_str!("sql/replace_end_date.sql");
const DELETE_DISCOUNT_SQL: &str = include_str!("sql/delete_discount.sql");

/// Storage for product discounts.
#[automock]
#[async_trait]
pub trait DiscountsRepository: Send + Sync {
    /// Live discounts, optionally for one product, ordered by start date.
    async fn list_discounts(
        &self,
        product: Option<ProductUuid>,
    ) -> Result<Vec<DiscountRecord>, sqlx::Error>;

    /// A single live discount.
    async fn get_discount(&self, discount: DiscountUuid) -> Result<DiscountRecord, sqlx::Error>;

    /// Insert a new, active discount.
    async fn create_discount(&self, discount: NewDiscount)
    -> Result<DiscountRecord, sqlx::Error>;

    /// Replace a discount's type, amount and window.
    async fn update_discount(
        &self,
        discount: DiscountUuid,
        update: DiscountUpdate,
    ) -> Result<DiscountRecord, sqlx::Error>;

    /// Flip the active flag in place.
    async fn toggle_discount(&self, discount: DiscountUuid) -> Result<DiscountRecord, sqlx::Error>;

    /// Move the end date from `expected_end` to `new_end`.
    ///
    /// Returns `None` when the stored end date no longer equals
    /// `expected_end`.
    async fn replace_end_date(
        &self,
        discount: DiscountUuid,
        expected_end: Date,
        new_end: Date,
    ) -> Result<Option<DiscountRecord>, sqlx::Error>;

    /// Soft-delete a discount, returning the number of rows affected.
    async fn delete_discount(&self, discount: DiscountUuid) -> Result<u64, sqlx::Error>;
}

/// `PostgreSQL` discounts repository.
#[derive(Debug, Clone)]
pub struct PgDiscountsRepository {
    db: Db,
}

impl PgDiscountsRepository {
    /// Repository backed by `db`.
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DiscountsRepository for PgDiscountsRepository {
    async fn list_discounts(
        &self,
        product: Option<ProductUuid>,
    ) -> Result<Vec<DiscountRecord>, sqlx::Error> {
        query_as::<Postgres, DiscountRecord>(LIST_DISCOUNTS_SQL)
            .bind(product.map(ProductUuid::into_uuid))
            .fetch_all(self.db.pool())
            .await
    }

    async fn get_discount(&self, discount: DiscountUuid) -> Result<DiscountRecord, sqlx::Error> {
        query_as::<Postgres, DiscountRecord>(GET_DISCOUNT_SQL)
            .bind(discount.into_uuid())
            .fetch_one(self.db.pool())
            .await
    }

    async fn create_discount(
        &self,
        discount: NewDiscount,
    ) -> Result<DiscountRecord, sqlx::Error> {
        let (discount_type, amount) = kind_columns(&discount.kind);

        query_as::<Postgres, DiscountRecord>(CREATE_DISCOUNT_SQL)
            .bind(discount.uuid.into_uuid())
            .bind(discount.product_uuid.into_uuid())
            .bind(discount_type)
            .bind(amount)
            .bind(SqlxDate::from(discount.start))
            .bind(SqlxDate::from(discount.end))
            .fetch_one(self.db.pool())
            .await
    }

    async fn update_discount(
        &self,
        discount: DiscountUuid,
        update: DiscountUpdate,
    ) -> Result<DiscountRecord, sqlx::Error> {
        let (discount_type, amount) = kind_columns(&update.kind);

        query_as::<Postgres, DiscountRecord>(UPDATE_DISCOUNT_SQL)
            .bind(discount.into_uuid())
            .bind(discount_type)
            .bind(amount)
            .bind(SqlxDate::from(update.start))
            .bind(SqlxDate::from(update.end))
            .fetch_one(self.db.pool())
            .await
    }

    async fn toggle_discount(&self, discount: DiscountUuid) -> Result<DiscountRecord, sqlx::Error> {
        query_as::<Postgres, DiscountRecord>(TOGGLE_DISCOUNT_SQL)
            .bind(discount.into_uuid())
            .fetch_one(self.db.pool())
            .await
    }

    async fn replace_end_date(
        &self,
        discount: DiscountUuid,
        expected_end: Date,
        new_end: Date,
    ) -> Result<Option<DiscountRecord>, sqlx::Error> {
        query_as::<Postgres, DiscountRecord>(REPLACE_END_DATE_SQL)
            .bind(discount.into_uuid())
            .bind(SqlxDate::from(expected_end))
            .bind(SqlxDate::from(new_end))
            .fetch_optional(self.db.pool())
            .await
    }

    async fn delete_discount(&self, discount: DiscountUuid) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_DISCOUNT_SQL)
            .bind(discount.into_uuid())
            .execute(self.db.pool())
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn kind_columns(kind: &DiscountKind) -> (&'static str, Decimal) {
    let amount = match *kind {
        DiscountKind::Percent(percent) => percent,
        DiscountKind::Fixed(minor) => Decimal::from(minor),
    };

    (kind.as_str(), amount)
}

fn decode_error(index: &str, source: impl Into<Box<dyn Error + Send + Sync>>) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: source.into(),
    }
}

impl<'r> FromRow<'r, PgRow> for DiscountRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let discount_type = row
            .try_get::<&str, _>("discount_type")?
            .parse::<DiscountType>()
            .map_err(|error| decode_error("discount_type", error))?;

        let amount: Decimal = row.try_get("amount")?;

        let kind = discount_type
            .with_amount(amount)
            .ok_or_else(|| decode_error("amount", format!("invalid {discount_type} amount {amount}")))?;

        let window = DiscountWindow::new(
            row.try_get::<SqlxDate, _>("start_date")?.to_jiff(),
            row.try_get::<SqlxDate, _>("end_date")?.to_jiff(),
        )
        .map_err(|error| decode_error("end_date", error))?;

        Ok(Self {
            uuid: DiscountUuid::from_uuid(row.try_get::<Uuid, _>("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get::<Uuid, _>("product_uuid")?),
            discount: Discount::from_parts(kind, window, row.try_get("active")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
