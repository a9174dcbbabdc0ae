//! Account roles.

use serde::{Deserialize, Serialize};

/// Role carried by a user record and inside JWT claims.
///
/// The backend currently issues `admin` and `user`; anything else is kept
/// verbatim so a new backend role does not break token decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access to catalog management.
    Admin,
    /// Regular account without admin rights.
    User,
    /// Role string this client does not know about.
    #[serde(untagged)]
    Other(String),
}

impl Role {
    /// Whether this role grants access to the admin back office.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::User => write!(f, "user"),
            Self::Other(role) => write!(f, "{role}"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_known_roles_deserialize() {
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
        assert!(role.is_admin());

        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::User);
        assert!(!role.is_admin());
    }

    #[test]
    fn test_unknown_role_is_preserved() {
        let role: Role = serde_json::from_str("\"auditor\"").unwrap();
        assert_eq!(role, Role::Other("auditor".to_owned()));
        assert_eq!(role.to_string(), "auditor");
    }

    #[test]
    fn test_display() {
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!(Role::User.to_string(), "user");
    }
}
