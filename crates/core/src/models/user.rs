//! The signed-in user as reported by the identity provider.

use serde::{Deserialize, Serialize};

use crate::roles::Role;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl CurrentUser {
    /// Name shown as comment author: full name, falling back to email.
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }

    pub fn is_agency(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_email() {
        let user = CurrentUser {
            email: "ana@sol.com".into(),
            full_name: Some("  ".into()),
            role: Role::User,
        };
        assert_eq!(user.display_name(), "ana@sol.com");
    }

    #[test]
    fn missing_role_defaults_to_user() {
        let user: CurrentUser =
            serde_json::from_value(serde_json::json!({"email": "a@b.com"})).unwrap();
        assert_eq!(user.role, Role::User);
        assert!(!user.is_agency());
    }
}
