//! Shipping address captured by the checkout form.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Country preselected in a fresh checkout form.
pub const DEFAULT_COUNTRY: &str = "USA";

/// A postal address as the order endpoint expects it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    /// Recipient full name. Required.
    #[serde(default)]
    pub name: String,
    /// Street line. Required.
    #[serde(default)]
    pub street: String,
    /// City. Required.
    #[serde(default)]
    pub city: String,
    /// Country. Required.
    #[serde(default)]
    pub country: String,
    /// Postal/ZIP code.
    #[serde(default)]
    pub zip_code: String,
    /// Phone number.
    #[serde(default)]
    pub phone: String,
}

impl ShippingAddress {
    /// Create an address from the required fields.
    pub fn new(
        name: impl Into<String>,
        street: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            street: street.into(),
            city: city.into(),
            country: country.into(),
            zip_code: String::new(),
            phone: String::new(),
        }
    }

    /// Set the ZIP code.
    pub fn with_zip_code(mut self, zip_code: impl Into<String>) -> Self {
        self.zip_code = zip_code.into();
        self
    }

    /// Set the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Names of required fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("street", &self.street),
            ("city", &self.city),
            ("country", &self.country),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Check if every required field is filled in.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Fail with the missing required fields, if any.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::MissingShippingFields(missing))
        }
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        [&self.street, &self.city, &self.zip_code, &self.country]
            .into_iter()
            .filter(|part| !part.trim().is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for ShippingAddress {
    fn default() -> Self {
        Self::new("", "", "", DEFAULT_COUNTRY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_preselects_country() {
        let addr = ShippingAddress::default();
        assert_eq!(addr.country, "USA");
        assert_eq!(addr.missing_fields(), vec!["name", "street", "city"]);
    }

    #[test]
    fn test_whitespace_counts_as_missing() {
        let addr = ShippingAddress::new("Jane", "   ", "Boston", "USA");
        assert_eq!(
            addr.validate(),
            Err(CommerceError::MissingShippingFields(vec!["street"]))
        );
    }

    #[test]
    fn test_optional_fields_not_required() {
        let addr = ShippingAddress::new("Jane", "1 Main St", "Boston", "USA");
        assert!(addr.is_complete());
        assert!(addr.zip_code.is_empty());
    }

    #[test]
    fn test_wire_field_names() {
        let addr = ShippingAddress::new("Jane", "1 Main St", "Boston", "USA").with_zip_code("02101");
        let json = serde_json::to_value(&addr).unwrap();
        assert_eq!(json["zipCode"], "02101");
        assert_eq!(json["phone"], "");
    }

    #[test]
    fn test_one_line() {
        let addr = ShippingAddress::new("Jane", "1 Main St", "Boston", "USA");
        assert_eq!(addr.one_line(), "1 Main St, Boston, USA");
    }
}
