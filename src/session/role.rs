//! Role hierarchy.
//!
//! The backend stores roles as open strings; only three are recognized,
//! ordered by privilege. Anything else parses to `None` and fails every
//! check; unknown roles get no access, not an error.

use crate::net::types::User;

/// Recognized roles, least privileged first. The derived ordering is the
/// permission hierarchy: `Operator < Manager < Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Operator,
    Manager,
    Admin,
}

impl Role {
    /// Parse a wire role string. Case-sensitive exact match.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "admin" => Some(Self::Admin),
            "manager" => Some(Self::Manager),
            "operator" => Some(Self::Operator),
            _ => None,
        }
    }

    /// Wire name of this role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Operator => "operator",
        }
    }

    /// Whether this role carries at least the privileges of `required`.
    #[must_use]
    pub fn meets_minimum(self, required: Self) -> bool {
        self >= required
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed role of a user record, if recognized.
#[must_use]
pub fn user_role(user: &User) -> Option<Role> {
    Role::parse(&user.role)
}

/// Membership test against a route's required role set. An absent or
/// unrecognized role fails any non-empty set.
#[must_use]
pub fn has_role(user: Option<&User>, roles: &[Role]) -> bool {
    match user.and_then(user_role) {
        Some(role) => roles.contains(&role),
        None => false,
    }
}

#[cfg(test)]
#[path = "role_test.rs"]
mod role_test;
