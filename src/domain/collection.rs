//! Document collections served by the storefront handler groups.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A named set of documents sharing one handler group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Storefront customers and administrators.
    User,
    /// Catalog items.
    Product,
    /// Catalog categories.
    Category,
    /// Product brands.
    Brand,
    /// Contact-form submissions.
    Contact,
    /// Shopping carts.
    Cart,
    /// Placed orders.
    Order,
    /// Product reviews.
    Review,
    /// User profile details.
    Profile,
}

impl Collection {
    /// Every collection, in route table order.
    pub const ALL: [Self; 9] = [
        Self::User,
        Self::Product,
        Self::Category,
        Self::Brand,
        Self::Contact,
        Self::Cart,
        Self::Order,
        Self::Review,
        Self::Profile,
    ];

    /// Storage name, also the last segment of the mount prefix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Product => "product",
            Self::Category => "category",
            Self::Brand => "brand",
            Self::Contact => "contact",
            Self::Cart => "cart",
            Self::Order => "order",
            Self::Review => "review",
            Self::Profile => "profile",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
