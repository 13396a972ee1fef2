//! Discount Models

use jiff::civil::Date;
use rebate::discounts::DiscountKind;
use rebate_app::domain::discounts::records::DiscountRecord;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DiscountResponse {
    /// The unique identifier of the discount
    pub uuid: Uuid,

    /// The product the discount applies to
    pub product_uuid: Uuid,

    /// Either `percent` or `fixed`
    pub discount_type: String,

    /// Percentage points, or minor units taken off each unit
    pub amount: String,

    /// First day the discount applies (`YYYY-MM-DD`)
    pub start_date: String,

    /// Last day the discount applies (`YYYY-MM-DD`)
    pub end_date: String,

    /// Whether the discount is switched on
    pub active: bool,

    /// Derived status on the reference date
    pub status: String,

    /// The date and time the discount was created
    pub created_at: String,

    /// The date and time the discount was last updated
    pub updated_at: String,
}

impl DiscountResponse {
    /// Render a record with its status derived as of `at`.
    pub(crate) fn from_record(record: &DiscountRecord, at: Date) -> Self {
        let discount = &record.discount;

        let amount = match *discount.kind() {
            DiscountKind::Percent(percent) => percent.normalize().to_string(),
            DiscountKind::Fixed(minor) => minor.to_string(),
        };

        Self {
            uuid: record.uuid.into(),
            product_uuid: record.product_uuid.into(),
            discount_type: discount.kind().as_str().to_string(),
            amount,
            start_date: discount.window().start().to_string(),
            end_date: discount.window().end().to_string(),
            active: discount.is_active(),
            status: record.status(at).to_string(),
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}

/// Collect responses for several records.
pub(crate) fn responses(records: &[DiscountRecord], at: Date) -> Vec<DiscountResponse> {
    records
        .iter()
        .map(|record| DiscountResponse::from_record(record, at))
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use jiff::{Timestamp, civil::date};
    use rebate::{
        discounts::{Discount, DiscountKind},
        windows::DiscountWindow,
    };
    use rebate_app::domain::discounts::records::{DiscountUuid, ProductUuid};
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    pub(crate) fn make_discount(uuid: DiscountUuid, kind: DiscountKind) -> TestResult<DiscountRecord> {
        let window = DiscountWindow::new(date(2024, 1, 1), date(2024, 1, 31))?;

        Ok(DiscountRecord {
            uuid,
            product_uuid: ProductUuid::new(),
            discount: Discount::new(kind, window)?,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            deleted_at: None,
        })
    }

    #[test]
    fn response_derives_status_from_reference_date() -> TestResult {
        let record = make_discount(DiscountUuid::new(), DiscountKind::Fixed(5_00))?;

        let before = DiscountResponse::from_record(&record, date(2023, 12, 31));
        let during = DiscountResponse::from_record(&record, date(2024, 1, 31));

        assert_eq!(before.status, "upcoming");
        assert_eq!(during.status, "current");
        assert_eq!(during.discount_type, "fixed");
        assert_eq!(during.amount, "500");
        assert_eq!(during.start_date, "2024-01-01");
        assert_eq!(during.end_date, "2024-01-31");

        Ok(())
    }

    #[test]
    fn percent_amounts_drop_trailing_zeros() -> TestResult {
        let record = make_discount(
            DiscountUuid::new(),
            DiscountKind::Percent(Decimal::new(12_50, 2)),
        )?;

        let response = DiscountResponse::from_record(&record, date(2024, 1, 10));

        assert_eq!(response.discount_type, "percent");
        assert_eq!(response.amount, "12.5");

        Ok(())
    }
}
