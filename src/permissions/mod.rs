//! Permission evaluation
//!
//! The central authority for "may this user perform this action or reach
//! this path". Everything here is a pure function over its arguments and
//! the static [`catalog`]; nothing errors. Invalid or missing input always
//! resolves to the most restrictive answer (deny, empty set, unrestricted
//! path), never the most permissive one.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub mod catalog;

pub use catalog::Permission;

use catalog::PATH_RULES;

/// A user's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access to every capability, regardless of stored grants.
    Admin,

    /// Access limited to the user's explicit grants.
    Staff,
}

impl Role {
    /// The canonical key, as stored on user records.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
        }
    }

    /// Parses a stored role key. Unknown keys yield `None`.
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "admin" => Some(Role::Admin),
            "staff" => Some(Role::Staff),
            _ => None,
        }
    }

    /// The permissions granted to a newly created account with this role.
    ///
    /// Staff accounts start with the day-to-day capabilities and pick up
    /// `users`/`settings` only by explicit grant.
    #[must_use]
    pub fn default_permissions(self) -> FxHashSet<Permission> {
        match self {
            Role::Admin => Permission::ALL.into_iter().collect(),
            Role::Staff => [
                Permission::Dashboard,
                Permission::Menu,
                Permission::Category,
                Permission::Orders,
            ]
            .into_iter()
            .collect(),
        }
    }
}

/// An authenticated user, as seen by the evaluator.
///
/// Only the role and the explicit grant set matter here; identity and
/// credentials belong to the surrounding application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    role: Role,
    grants: FxHashSet<Permission>,
}

impl User {
    /// Creates a user with an explicit grant set.
    #[must_use]
    pub fn new(role: Role, grants: impl IntoIterator<Item = Permission>) -> Self {
        User {
            role,
            grants: grants.into_iter().collect(),
        }
    }

    /// Creates a user carrying the default grants for its role.
    #[must_use]
    pub fn with_default_permissions(role: Role) -> Self {
        User {
            grants: role.default_permissions(),
            role,
        }
    }

    /// The user's role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// The user's explicit grants.
    #[must_use]
    pub fn grants(&self) -> &FxHashSet<Permission> {
        &self.grants
    }

    /// Decides whether this user holds `permission`.
    ///
    /// Admins pass unconditionally: the role grants everything even when
    /// the stored grant set is empty or stale. This branch sits ahead of
    /// the grant lookup on purpose; do not fold it into the data.
    #[must_use]
    pub fn can(&self, permission: Permission) -> bool {
        if self.role == Role::Admin {
            return true;
        }

        let granted = self.grants.contains(&permission);

        if !granted {
            debug!(
                role = self.role.key(),
                permission = permission.key(),
                "permission denied"
            );
        }

        granted
    }
}

/// Decides whether `user` holds the permission named by `key`.
///
/// Denies when the user is absent or the key is not in the catalog;
/// otherwise defers to [`User::can`].
#[must_use]
pub fn has_permission(user: Option<&User>, key: &str) -> bool {
    let Some(user) = user else {
        return false;
    };

    let Some(permission) = Permission::parse(key) else {
        return false;
    };

    user.can(permission)
}

/// Resolves the permission guarding `path`, if any.
///
/// Matches whole path segments against the catalog's prefix rules and
/// takes the longest match, so `/admin/menu/42` resolves to `menu` rather
/// than `dashboard`. `None` means the path is unguarded; callers must
/// treat that as "no restriction", not as a denial.
#[must_use]
pub fn required_permission(path: &str) -> Option<Permission> {
    PATH_RULES
        .iter()
        .filter(|(prefix, _)| path == *prefix || prefix_matches(path, prefix))
        .max_by_key(|(prefix, _)| prefix.len())
        .map(|&(_, permission)| permission)
}

/// True when `path` continues `prefix` at a segment boundary.
fn prefix_matches(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with('/'))
}

/// Decides whether `user` may reach `path`.
///
/// Unguarded paths are open to everyone, authenticated or not. Guarded
/// paths require the mapped permission, with the usual admin bypass.
#[must_use]
pub fn can_access_path(user: Option<&User>, path: &str) -> bool {
    let Some(permission) = required_permission(path) else {
        return true;
    };

    user.is_some_and(|user| user.can(permission))
}

/// The default grant set for a stored role key.
///
/// Unknown role keys yield the empty set.
#[must_use]
pub fn default_permissions_for(role_key: &str) -> FxHashSet<Permission> {
    Role::parse(role_key).map_or_else(FxHashSet::default, Role::default_permissions)
}

/// Checks that every key in `keys` names a catalog permission.
///
/// Used both as a data-integrity check before writing a user record and as
/// a form-validation rule.
#[must_use]
pub fn validate_permissions<S: AsRef<str>>(keys: &[S]) -> bool {
    keys.iter()
        .all(|key| Permission::parse(key.as_ref()).is_some())
}
