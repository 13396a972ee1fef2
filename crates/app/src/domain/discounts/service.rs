//! Discounts service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::civil::Date;
use mockall::automock;
use rebate::{
    discounts::Discount,
    engine::{self, LineApplication},
    windows::{DiscountWindow, InvalidWindow},
};
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::discounts::{
        data::{
            BestDiscount, DiscountFilter, DiscountUpdate, NewDiscount, OrderLine, StatusSummary,
        },
        errors::DiscountsServiceError,
        records::{DiscountRecord, DiscountUuid, ProductUuid},
        repository::{DiscountsRepository, PgDiscountsRepository},
    },
    policy::{Action, Actor, PermissionPolicy, Policy},
};

/// Discounts service backed by a [`DiscountsRepository`].
#[derive(Clone)]
pub struct PgDiscountsService {
    repository: Arc<dyn DiscountsRepository>,
    policy: Arc<dyn Policy>,
    currency: &'static Currency,
}

impl PgDiscountsService {
    /// Service over `PostgreSQL`, gated by [`PermissionPolicy`].
    #[must_use]
    pub fn new(db: Db, currency: &'static Currency) -> Self {
        Self::with_repository(
            Arc::new(PgDiscountsRepository::new(db)),
            Arc::new(PermissionPolicy),
            currency,
        )
    }

    /// Service over any repository and policy.
    #[must_use]
    pub fn with_repository(
        repository: Arc<dyn DiscountsRepository>,
        policy: Arc<dyn Policy>,
        currency: &'static Currency,
    ) -> Self {
        Self {
            repository,
            policy,
            currency,
        }
    }

    fn authorize(
        &self,
        actor: &Actor,
        action: Action,
        discount: Option<&DiscountRecord>,
    ) -> Result<(), DiscountsServiceError> {
        if self.policy.allows(actor, action, discount) {
            return Ok(());
        }

        warn!(
            actor = actor.id(),
            %action,
            discount_uuid = ?discount.map(|record| record.uuid),
            "discount action denied"
        );

        Err(DiscountsServiceError::Forbidden)
    }

    async fn authorized_discount(
        &self,
        actor: &Actor,
        action: Action,
        discount: DiscountUuid,
    ) -> Result<DiscountRecord, DiscountsServiceError> {
        let record = self.repository.get_discount(discount).await?;

        self.authorize(actor, action, Some(&record))?;

        Ok(record)
    }

    async fn replace_end_date(
        &self,
        record: &DiscountRecord,
        changed: &Discount,
    ) -> Result<DiscountRecord, DiscountsServiceError> {
        let expected_end = record.discount.window().end();
        let new_end = changed.window().end();

        if expected_end == new_end {
            return Ok(record.clone());
        }

        self.repository
            .replace_end_date(record.uuid, expected_end, new_end)
            .await?
            .ok_or_else(|| {
                warn!(discount_uuid = %record.uuid, %expected_end, "end date changed concurrently");

                DiscountsServiceError::Conflict
            })
    }

    fn money(&self, minor: i64) -> Money<'static, Currency> {
        Money::from_minor(minor, self.currency)
    }

    fn reject_window(uuid: DiscountUuid, error: InvalidWindow) -> DiscountsServiceError {
        warn!(discount_uuid = %uuid, %error, "rejected window change");

        DiscountsServiceError::InvalidWindow(error)
    }
}

#[async_trait]
impl DiscountsService for PgDiscountsService {
    async fn list_discounts(
        &self,
        actor: &Actor,
        filter: DiscountFilter,
    ) -> Result<Vec<DiscountRecord>, DiscountsServiceError> {
        self.authorize(actor, Action::List, None)?;

        let records = self.repository.list_discounts(filter.product).await?;

        Ok(records
            .into_iter()
            .filter(|record| {
                filter
                    .status
                    .is_none_or(|status| record.status(filter.at) == status)
            })
            .collect())
    }

    async fn get_discount(
        &self,
        actor: &Actor,
        discount: DiscountUuid,
    ) -> Result<DiscountRecord, DiscountsServiceError> {
        self.authorized_discount(actor, Action::Show, discount).await
    }

    async fn create_discount(
        &self,
        actor: &Actor,
        discount: NewDiscount,
    ) -> Result<DiscountRecord, DiscountsServiceError> {
        self.authorize(actor, Action::Create, None)?;

        // Range checks happen here; storage trusts what it is given.
        Discount::new(discount.kind, DiscountWindow::new(discount.start, discount.end)?)?;

        let created = self.repository.create_discount(discount).await?;

        info!(
            actor = actor.id(),
            discount_uuid = %created.uuid,
            product_uuid = %created.product_uuid,
            "created discount"
        );

        Ok(created)
    }

    async fn update_discount(
        &self,
        actor: &Actor,
        discount: DiscountUuid,
        update: DiscountUpdate,
    ) -> Result<DiscountRecord, DiscountsServiceError> {
        let record = self.authorized_discount(actor, Action::Update, discount).await?;

        record
            .discount
            .with_window(DiscountWindow::new(update.start, update.end)?)
            .with_kind(update.kind)?;

        let updated = self.repository.update_discount(discount, update).await?;

        info!(actor = actor.id(), discount_uuid = %discount, "updated discount terms");

        Ok(updated)
    }

    async fn toggle_discount(
        &self,
        actor: &Actor,
        discount: DiscountUuid,
    ) -> Result<DiscountRecord, DiscountsServiceError> {
        self.authorized_discount(actor, Action::Toggle, discount).await?;

        let toggled = self.repository.toggle_discount(discount).await?;

        info!(
            actor = actor.id(),
            discount_uuid = %discount,
            active = toggled.discount.is_active(),
            "toggled discount"
        );

        Ok(toggled)
    }

    async fn delete_discount(
        &self,
        actor: &Actor,
        discount: DiscountUuid,
    ) -> Result<(), DiscountsServiceError> {
        self.authorized_discount(actor, Action::Delete, discount).await?;

        let rows_affected = self.repository.delete_discount(discount).await?;

        if rows_affected == 0 {
            return Err(DiscountsServiceError::NotFound);
        }

        info!(actor = actor.id(), discount_uuid = %discount, "deleted discount");

        Ok(())
    }

    async fn extend_discount(
        &self,
        actor: &Actor,
        discount: DiscountUuid,
        new_end: Date,
    ) -> Result<DiscountRecord, DiscountsServiceError> {
        let record = self.authorized_discount(actor, Action::Extend, discount).await?;

        let extended = engine::extend(&record.discount, new_end)
            .map_err(|error| Self::reject_window(discount, error))?;

        let updated = self.replace_end_date(&record, &extended).await?;

        info!(actor = actor.id(), discount_uuid = %discount, %new_end, "extended discount");

        Ok(updated)
    }

    async fn shorten_discount(
        &self,
        actor: &Actor,
        discount: DiscountUuid,
        new_end: Date,
        today: Date,
    ) -> Result<DiscountRecord, DiscountsServiceError> {
        let record = self.authorized_discount(actor, Action::Shorten, discount).await?;

        let shortened = engine::shorten_as_of(&record.discount, new_end, today)
            .map_err(|error| Self::reject_window(discount, error))?;

        let updated = self.replace_end_date(&record, &shortened).await?;

        info!(actor = actor.id(), discount_uuid = %discount, %new_end, "shortened discount");

        Ok(updated)
    }

    async fn calculate_discount(
        &self,
        actor: &Actor,
        discount: DiscountUuid,
        unit_price: i64,
        quantity: Decimal,
    ) -> Result<Money<'static, Currency>, DiscountsServiceError> {
        let record = self.authorized_discount(actor, Action::Quote, discount).await?;

        Ok(engine::calculate(&record.discount, &self.money(unit_price), quantity))
    }

    async fn validate_discount(
        &self,
        actor: &Actor,
        discount: DiscountUuid,
        quantity: Decimal,
        total_amount: i64,
        as_of: Date,
    ) -> Result<bool, DiscountsServiceError> {
        let record = self.authorized_discount(actor, Action::Quote, discount).await?;

        Ok(engine::validate(
            &record.discount,
            quantity,
            &self.money(total_amount),
            as_of,
        ))
    }

    async fn apply_discount(
        &self,
        actor: &Actor,
        discount: DiscountUuid,
        line: OrderLine,
    ) -> Result<LineApplication<'static>, DiscountsServiceError> {
        let record = self.authorized_discount(actor, Action::Quote, discount).await?;

        Ok(engine::apply_to_line(
            &record.discount,
            &self.money(line.unit_price),
            line.quantity,
            line.as_of,
        ))
    }

    async fn best_discount(
        &self,
        actor: &Actor,
        product: ProductUuid,
        line: OrderLine,
    ) -> Result<Option<BestDiscount>, DiscountsServiceError> {
        self.authorize(actor, Action::Quote, None)?;

        let records = self.repository.list_discounts(Some(product)).await?;
        let discounts: Vec<Discount> = records.iter().map(|record| record.discount).collect();

        let Some((position, application)) = engine::best_for_line(
            &discounts,
            &self.money(line.unit_price),
            line.quantity,
            line.as_of,
        ) else {
            return Ok(None);
        };

        Ok(records
            .into_iter()
            .nth(position)
            .map(|record| BestDiscount {
                record,
                application,
            }))
    }

    async fn summarize_discounts(
        &self,
        actor: &Actor,
        at: Date,
    ) -> Result<StatusSummary, DiscountsServiceError> {
        self.authorize(actor, Action::List, None)?;

        let records = self.repository.list_discounts(None).await?;

        Ok(records.iter().map(|record| record.status(at)).collect())
    }
}

#[automock]
#[async_trait]
pub trait DiscountsService: Send + Sync {
    /// Lists live discounts matching the filter.
    async fn list_discounts(
        &self,
        actor: &Actor,
        filter: DiscountFilter,
    ) -> Result<Vec<DiscountRecord>, DiscountsServiceError>;

    /// Retrieve a single discount.
    async fn get_discount(
        &self,
        actor: &Actor,
        discount: DiscountUuid,
    ) -> Result<DiscountRecord, DiscountsServiceError>;

    /// Creates a new, active discount.
    async fn create_discount(
        &self,
        actor: &Actor,
        discount: NewDiscount,
    ) -> Result<DiscountRecord, DiscountsServiceError>;

    /// Replaces a discount's type, amount and window.
    async fn update_discount(
        &self,
        actor: &Actor,
        discount: DiscountUuid,
        update: DiscountUpdate,
    ) -> Result<DiscountRecord, DiscountsServiceError>;

    /// Flips a discount's active flag.
    async fn toggle_discount(
        &self,
        actor: &Actor,
        discount: DiscountUuid,
    ) -> Result<DiscountRecord, DiscountsServiceError>;

    /// Soft-deletes a discount.
    async fn delete_discount(
        &self,
        actor: &Actor,
        discount: DiscountUuid,
    ) -> Result<(), DiscountsServiceError>;

    /// Moves a discount's end date later.
    async fn extend_discount(
        &self,
        actor: &Actor,
        discount: DiscountUuid,
        new_end: Date,
    ) -> Result<DiscountRecord, DiscountsServiceError>;

    /// Moves a discount's end date earlier, never before `today` while it is
    /// running.
    async fn shorten_discount(
        &self,
        actor: &Actor,
        discount: DiscountUuid,
        new_end: Date,
        today: Date,
    ) -> Result<DiscountRecord, DiscountsServiceError>;

    /// Amount the discount takes off `quantity` units at `unit_price` minor
    /// units, ignoring validity.
    async fn calculate_discount(
        &self,
        actor: &Actor,
        discount: DiscountUuid,
        unit_price: i64,
        quantity: Decimal,
    ) -> Result<Money<'static, Currency>, DiscountsServiceError>;

    /// Whether the discount may be applied to a line.
    async fn validate_discount(
        &self,
        actor: &Actor,
        discount: DiscountUuid,
        quantity: Decimal,
        total_amount: i64,
        as_of: Date,
    ) -> Result<bool, DiscountsServiceError>;

    /// Applies the discount to an order line.
    async fn apply_discount(
        &self,
        actor: &Actor,
        discount: DiscountUuid,
        line: OrderLine,
    ) -> Result<LineApplication<'static>, DiscountsServiceError>;

    /// Picks the product's discount that takes the most off the line.
    ///
    /// Returns `None` when no discount for the product is currently valid.
    async fn best_discount(
        &self,
        actor: &Actor,
        product: ProductUuid,
        line: OrderLine,
    ) -> Result<Option<BestDiscount>, DiscountsServiceError>;

    /// Counts live discounts per derived status as of `at`.
    async fn summarize_discounts(
        &self,
        actor: &Actor,
        at: Date,
    ) -> Result<StatusSummary, DiscountsServiceError>;
}
