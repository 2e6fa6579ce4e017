//! Client update patch and builder.

use chrono::NaiveDate;
use cn_core::enums::ClientStatus;
use cn_core::errors::CoreError;
use cn_core::validation::{NAME_MAX_LEN, email, max_len, required_text};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "cn_core::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub client_code: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "cn_core::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "cn_core::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "cn_core::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_of_birth: Option<Option<NaiveDate>>,
    #[serde(
        default,
        deserialize_with = "cn_core::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub initial_assessment_date: Option<Option<NaiveDate>>,
    #[serde(
        default,
        deserialize_with = "cn_core::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub address1: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "cn_core::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub address2: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "cn_core::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub city: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "cn_core::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub postcode: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "cn_core::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub emergency_contact_name: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "cn_core::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub emergency_contact_relationship: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "cn_core::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub emergency_contact_phone: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "cn_core::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub gp_name: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "cn_core::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub gp_practice: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "cn_core::nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub gp_phone: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ClientStatus>,
}

/// Length limit check for a patched nullable text field.
fn patched_len(field: &str, value: Option<&Option<String>>, max: usize) -> Result<(), CoreError> {
    max_len(field, value.and_then(Option::as_deref), max)
}

impl ClientUpdate {
    /// Check only the fields present in the patch.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for the first field that fails.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(ref first_name) = self.first_name {
            required_text("first_name", first_name, NAME_MAX_LEN)?;
        }
        if let Some(ref last_name) = self.last_name {
            required_text("last_name", last_name, NAME_MAX_LEN)?;
        }
        if let Some(address) = self
            .email
            .as_ref()
            .and_then(Option::as_deref)
            .filter(|a| !a.trim().is_empty())
        {
            email("email", address)?;
        }
        patched_len("client_code", self.client_code.as_ref(), 50)?;
        patched_len("phone", self.phone.as_ref(), 50)?;
        patched_len("address1", self.address1.as_ref(), 255)?;
        patched_len("address2", self.address2.as_ref(), 255)?;
        patched_len("city", self.city.as_ref(), 100)?;
        patched_len("postcode", self.postcode.as_ref(), 20)?;
        patched_len("emergency_contact_name", self.emergency_contact_name.as_ref(), 100)?;
        patched_len(
            "emergency_contact_relationship",
            self.emergency_contact_relationship.as_ref(),
            100,
        )?;
        patched_len("emergency_contact_phone", self.emergency_contact_phone.as_ref(), 50)?;
        patched_len("gp_name", self.gp_name.as_ref(), 100)?;
        patched_len("gp_practice", self.gp_practice.as_ref(), 255)?;
        patched_len("gp_phone", self.gp_phone.as_ref(), 50)
    }
}

pub struct ClientUpdateBuilder(ClientUpdate);

impl ClientUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ClientUpdate::default())
    }

    #[must_use]
    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.0.first_name = Some(first_name.into());
        self
    }

    #[must_use]
    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.0.last_name = Some(last_name.into());
        self
    }

    #[must_use]
    pub fn client_code(mut self, client_code: Option<String>) -> Self {
        self.0.client_code = Some(client_code);
        self
    }

    #[must_use]
    pub fn email(mut self, email: Option<String>) -> Self {
        self.0.email = Some(email);
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: Option<String>) -> Self {
        self.0.phone = Some(phone);
        self
    }

    #[must_use]
    pub fn date_of_birth(mut self, date_of_birth: Option<NaiveDate>) -> Self {
        self.0.date_of_birth = Some(date_of_birth);
        self
    }

    #[must_use]
    pub fn city(mut self, city: Option<String>) -> Self {
        self.0.city = Some(city);
        self
    }

    #[must_use]
    pub fn gp_name(mut self, gp_name: Option<String>) -> Self {
        self.0.gp_name = Some(gp_name);
        self
    }

    #[must_use]
    pub fn status(mut self, status: ClientStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn build(self) -> ClientUpdate {
        self.0
    }
}

impl Default for ClientUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn absent_and_null_are_distinct() {
        let patch: ClientUpdate =
            serde_json::from_str(r#"{"phone": null, "city": "York"}"#).unwrap();
        assert_eq!(patch.phone, Some(None));
        assert_eq!(patch.city, Some(Some("York".into())));
        assert_eq!(patch.email, None);
        assert_eq!(patch.first_name, None);
    }

    #[test]
    fn serializes_only_changed_fields() {
        let patch = ClientUpdateBuilder::new()
            .last_name("Lovelace")
            .phone(None)
            .build();
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"last_name": "Lovelace", "phone": null}));
    }

    #[test]
    fn validate_checks_present_fields_only() {
        assert!(ClientUpdate::default().validate().is_ok());

        let blank = ClientUpdateBuilder::new().first_name("  ").build();
        assert!(blank.validate().is_err());

        let bad_email = ClientUpdateBuilder::new().email(Some("nope".into())).build();
        assert!(bad_email.validate().is_err());

        let cleared_email = ClientUpdateBuilder::new().email(None).build();
        assert!(cleared_email.validate().is_ok());

        let blank_email = ClientUpdateBuilder::new().email(Some(String::new())).build();
        assert!(blank_email.validate().is_ok());
    }
}
