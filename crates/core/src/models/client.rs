//! Client entity model and DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::not_blank;
use crate::status::ClientStatus;
use crate::types::ClientId;

/// A managed brand, as stored in the `Client` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    #[serde(default)]
    pub company_name: String,
    /// Login email of the client user; links identity to this record.
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub status: ClientStatus,
    #[serde(default)]
    pub company_objective: Option<String>,
    #[serde(default)]
    pub products_services: Option<String>,
    #[serde(default)]
    pub target_audience: Option<String>,
    #[serde(default)]
    pub brand_voice: Option<String>,
    #[serde(default)]
    pub brand_voice_custom: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Store-assigned creation time, kept verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
}

impl Client {
    pub fn is_active(&self) -> bool {
        self.status == ClientStatus::Active
    }

    /// First letter of the company name, uppercased, for avatar fallbacks.
    pub fn initial(&self) -> char {
        self.company_name
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('C')
    }

    /// Whether the login email matches, ignoring ASCII case.
    pub fn belongs_to(&self, email: &str) -> bool {
        !email.is_empty() && self.user_email.eq_ignore_ascii_case(email)
    }
}

/// DTO for creating a new client.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateClient {
    #[validate(custom(function = "not_blank"))]
    pub company_name: String,
    #[validate(email)]
    pub user_email: String,
    /// Defaults to `active` if omitted.
    #[serde(default)]
    pub status: ClientStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_objective: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products_services: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_voice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_voice_custom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// DTO for updating an existing client. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateClient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub user_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ClientStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_objective: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products_services: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_voice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_voice_custom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// The subset of client fields a client user may edit on their own profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub company_objective: Option<String>,
    #[serde(default)]
    pub products_services: Option<String>,
    #[serde(default)]
    pub target_audience: Option<String>,
    #[serde(default)]
    pub brand_voice: Option<String>,
    #[serde(default)]
    pub brand_voice_custom: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl From<ProfileUpdate> for UpdateClient {
    fn from(profile: ProfileUpdate) -> Self {
        UpdateClient {
            company_objective: profile.company_objective,
            products_services: profile.products_services,
            target_audience: profile.target_audience,
            brand_voice: profile.brand_voice,
            brand_voice_custom: profile.brand_voice_custom,
            logo_url: profile.logo_url,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, email: &str) -> CreateClient {
        CreateClient {
            company_name: name.to_string(),
            user_email: email.to_string(),
            status: ClientStatus::Active,
            company_objective: None,
            products_services: None,
            target_audience: None,
            brand_voice: None,
            brand_voice_custom: None,
            logo_url: None,
        }
    }

    #[test]
    fn valid_client_passes() {
        assert!(create("Padaria Sol", "contato@sol.com").validate().is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        let errors = create("   ", "contato@sol.com").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("company_name"));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let errors = create("Padaria Sol", "not-an-email").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("user_email"));
    }

    #[test]
    fn sparse_record_deserializes_with_defaults() {
        let client: Client =
            serde_json::from_value(serde_json::json!({"id": "c1", "company_name": "Sol"})).unwrap();
        assert_eq!(client.status, ClientStatus::Active);
        assert!(client.logo_url.is_none());
        assert_eq!(client.initial(), 'S');
    }

    #[test]
    fn initial_falls_back_for_empty_name() {
        let client: Client = serde_json::from_value(serde_json::json!({"id": "c1"})).unwrap();
        assert_eq!(client.initial(), 'C');
    }

    #[test]
    fn belongs_to_ignores_case_and_rejects_empty() {
        let client: Client = serde_json::from_value(
            serde_json::json!({"id": "c1", "user_email": "Owner@Sol.com"}),
        )
        .unwrap();
        assert!(client.belongs_to("owner@sol.com"));
        assert!(!client.belongs_to(""));
    }

    #[test]
    fn update_serializes_only_set_fields() {
        let update = UpdateClient {
            status: Some(ClientStatus::Inactive),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"status": "inactive"})
        );
    }

    #[test]
    fn profile_update_never_touches_identity_fields() {
        let update: UpdateClient = ProfileUpdate {
            target_audience: Some("Families".into()),
            ..Default::default()
        }
        .into();
        assert!(update.company_name.is_none());
        assert!(update.user_email.is_none());
        assert!(update.status.is_none());
        assert_eq!(update.target_audience.as_deref(), Some("Families"));
    }
}
