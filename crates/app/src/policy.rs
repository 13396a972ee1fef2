//! Authorization policy for product discounts.
//!
//! The engine knows nothing about who is asking; the service consults a
//! [`Policy`] before every operation.

use std::{fmt, str::FromStr};

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::domain::discounts::records::DiscountRecord;

/// Unknown permission name
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown permission: {0}")]
pub struct UnknownPermission(pub String);

/// A named capability an actor may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Permission {
    /// Browse discounts and their summary
    Access,

    /// View a single discount and price lines with it
    Show,

    /// Create discounts
    Create,

    /// Change terms, toggle, extend or shorten discounts
    Edit,

    /// Remove discounts
    Delete,
}

impl Permission {
    /// Every permission
    pub const ALL: [Self; 5] = [
        Self::Access,
        Self::Show,
        Self::Create,
        Self::Edit,
        Self::Delete,
    ];

    /// Stable permission name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "product_discount_access",
            Self::Show => "product_discount_show",
            Self::Create => "product_discount_create",
            Self::Edit => "product_discount_edit",
            Self::Delete => "product_discount_delete",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|permission| permission.as_str() == s)
            .ok_or_else(|| UnknownPermission(s.to_string()))
    }
}

/// Operations the service guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// List discounts or summarise them
    List,

    /// Read one discount
    Show,

    /// Create a discount
    Create,

    /// Replace a discount's terms
    Update,

    /// Flip the active flag
    Toggle,

    /// Push the end date later
    Extend,

    /// Pull the end date earlier
    Shorten,

    /// Soft-delete a discount
    Delete,

    /// Calculate, validate or apply against an order line
    Quote,
}

impl Action {
    /// Permission an actor needs to perform this action.
    pub const fn required_permission(self) -> Permission {
        match self {
            Self::List => Permission::Access,
            Self::Show | Self::Quote => Permission::Show,
            Self::Create => Permission::Create,
            Self::Update | Self::Toggle | Self::Extend | Self::Shorten => Permission::Edit,
            Self::Delete => Permission::Delete,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::List => "list",
            Self::Show => "show",
            Self::Create => "create",
            Self::Update => "update",
            Self::Toggle => "toggle",
            Self::Extend => "extend",
            Self::Shorten => "shorten",
            Self::Delete => "delete",
            Self::Quote => "quote",
        })
    }
}

/// The principal performing an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    id: String,
    permissions: FxHashSet<Permission>,
}

impl Actor {
    /// Actor with the given identifier and permissions.
    pub fn new(id: impl Into<String>, permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            id: id.into(),
            permissions: permissions.into_iter().collect(),
        }
    }

    /// Operator actor holding every permission, used by the CLI.
    pub fn system() -> Self {
        Self::new("system", Permission::ALL)
    }

    /// Parse a comma separated permission list, e.g.
    /// `product_discount_access,product_discount_show`.
    ///
    /// Blank entries are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first unrecognised permission.
    pub fn with_permission_list(id: impl Into<String>, list: &str) -> Result<Self, UnknownPermission> {
        let permissions = list
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::parse)
            .collect::<Result<FxHashSet<Permission>, _>>()?;

        Ok(Self {
            id: id.into(),
            permissions,
        })
    }

    /// Actor identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the actor holds `permission`.
    pub fn has(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

/// Capability check consulted by the discounts service.
pub trait Policy: Send + Sync {
    /// Whether `actor` may perform `action`, optionally on a specific discount.
    fn allows(&self, actor: &Actor, action: Action, discount: Option<&DiscountRecord>) -> bool;
}

/// Grants an action when the actor holds its required permission.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionPolicy;

impl Policy for PermissionPolicy {
    fn allows(&self, actor: &Actor, action: Action, _discount: Option<&DiscountRecord>) -> bool {
        actor.has(action.required_permission())
    }
}
