//! Permission catalog
//!
//! The fixed, ordered list of access-control capabilities and the path
//! prefixes they guard. Loaded into the binary as constants; never mutated
//! at runtime.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A recognised access-control capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// The admin dashboard overview.
    Dashboard,

    /// Menu item management.
    Menu,

    /// Menu category management.
    Category,

    /// Order history and management.
    Orders,

    /// User account management.
    Users,

    /// Store settings.
    Settings,
}

impl Permission {
    /// Every permission, in display order.
    pub const ALL: [Permission; 6] = [
        Permission::Dashboard,
        Permission::Menu,
        Permission::Category,
        Permission::Orders,
        Permission::Users,
        Permission::Settings,
    ];

    /// The canonical key, as stored on user records.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Permission::Dashboard => "dashboard",
            Permission::Menu => "menu",
            Permission::Category => "category",
            Permission::Orders => "orders",
            Permission::Users => "users",
            Permission::Settings => "settings",
        }
    }

    /// A short label for admin screens.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Permission::Dashboard => "Dashboard",
            Permission::Menu => "Menu",
            Permission::Category => "Categories",
            Permission::Orders => "Orders",
            Permission::Users => "Users",
            Permission::Settings => "Settings",
        }
    }

    /// A longer description for admin screens.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Permission::Dashboard => "View the sales dashboard and reports",
            Permission::Menu => "Create, edit and remove menu items",
            Permission::Category => "Create, edit and remove menu categories",
            Permission::Orders => "View and manage customer orders",
            Permission::Users => "Create and manage staff accounts",
            Permission::Settings => "Change store-wide settings",
        }
    }

    /// Parses a stored permission key.
    ///
    /// Unknown keys yield `None`; callers treat that as an unrecognised
    /// capability and deny.
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        Permission::ALL
            .into_iter()
            .find(|permission| permission.key() == key)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Path prefixes and the permission guarding them.
///
/// Lookups take the longest matching prefix, so `/admin/menu` shadows
/// `/admin` for menu routes. Paths matching no prefix are unguarded.
pub(crate) const PATH_RULES: [(&str, Permission); 6] = [
    ("/admin", Permission::Dashboard),
    ("/admin/menu", Permission::Menu),
    ("/admin/category", Permission::Category),
    ("/admin/orders", Permission::Orders),
    ("/admin/users", Permission::Users),
    ("/admin/settings", Permission::Settings),
];
