//! Discount Records

use jiff::{Timestamp, civil::Date};
use rebate::{
    discounts::Discount,
    status::{DiscountStatus, status},
};

use crate::uuids::TypedUuid;

/// Discount UUID
pub type DiscountUuid = TypedUuid<DiscountRecord>;

/// Product the discount applies to
#[derive(Debug)]
pub struct ProductRecord;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Discount Record
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountRecord {
    /// Discount identifier
    pub uuid: DiscountUuid,

    /// Product the discount applies to
    pub product_uuid: ProductUuid,

    /// Terms, window and active flag
    pub discount: Discount,

    /// Creation time
    pub created_at: Timestamp,

    /// Last modification time
    pub updated_at: Timestamp,

    /// Soft-deletion time
    pub deleted_at: Option<Timestamp>,
}

impl DiscountRecord {
    /// Derived status as of `date`.
    pub fn status(&self, date: Date) -> DiscountStatus {
        status(&self.discount, date)
    }
}
