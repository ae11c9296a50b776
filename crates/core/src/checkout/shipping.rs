//! Shipping address form.

use serde::{Deserialize, Serialize};

/// A field of the shipping form.
///
/// Serialized with the form's camelCase names, which are also the names the
/// field validator matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShippingField {
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    City,
    State,
    ZipCode,
    Country,
}

impl ShippingField {
    /// Fields that must validate before leaving the shipping step.
    pub const REQUIRED: [Self; 8] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Phone,
        Self::Address,
        Self::City,
        Self::State,
        Self::ZipCode,
    ];

    /// Form name of the field, as understood by the validator.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::City => "city",
            Self::State => "state",
            Self::ZipCode => "zipCode",
            Self::Country => "country",
        }
    }

    /// Names of [`Self::REQUIRED`].
    #[must_use]
    pub fn required_names() -> [&'static str; 8] {
        Self::REQUIRED.map(Self::name)
    }
}

impl std::str::FromStr for ShippingField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::REQUIRED
            .into_iter()
            .chain(std::iter::once(Self::Country))
            .find(|field| field.name() == s)
            .ok_or_else(|| format!("unknown shipping field: {s}"))
    }
}

/// Shipping details as entered. Validity is derived, never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl Default for ShippingInfo {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: "US".to_owned(),
        }
    }
}

impl ShippingInfo {
    /// Current value of a field.
    #[must_use]
    pub fn get(&self, field: ShippingField) -> &str {
        match field {
            ShippingField::FirstName => &self.first_name,
            ShippingField::LastName => &self.last_name,
            ShippingField::Email => &self.email,
            ShippingField::Phone => &self.phone,
            ShippingField::Address => &self.address,
            ShippingField::City => &self.city,
            ShippingField::State => &self.state,
            ShippingField::ZipCode => &self.zip_code,
            ShippingField::Country => &self.country,
        }
    }

    /// Replace a field's value.
    pub fn set(&mut self, field: ShippingField, value: String) {
        let slot = match field {
            ShippingField::FirstName => &mut self.first_name,
            ShippingField::LastName => &mut self.last_name,
            ShippingField::Email => &mut self.email,
            ShippingField::Phone => &mut self.phone,
            ShippingField::Address => &mut self.address,
            ShippingField::City => &mut self.city,
            ShippingField::State => &mut self.state,
            ShippingField::ZipCode => &mut self.zip_code,
            ShippingField::Country => &mut self.country,
        };
        *slot = value;
    }

    /// "First Last" for the review step.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// "City, ST 12345" for the review step.
    #[must_use]
    pub fn city_line(&self) -> String {
        format!("{}, {} {}", self.city, self.state, self.zip_code)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_country_is_us() {
        let info = ShippingInfo::default();
        assert_eq!(info.country, "US");
        assert!(info.first_name.is_empty());
    }

    #[test]
    fn test_set_and_get() {
        let mut info = ShippingInfo::default();
        info.set(ShippingField::ZipCode, "10001".to_owned());
        assert_eq!(info.get(ShippingField::ZipCode), "10001");
        assert_eq!(info.zip_code, "10001");
    }

    #[test]
    fn test_field_names_parse() {
        assert_eq!("zipCode".parse::<ShippingField>().unwrap(), ShippingField::ZipCode);
        assert_eq!("country".parse::<ShippingField>().unwrap(), ShippingField::Country);
        assert!("ZipCode".parse::<ShippingField>().is_err());
    }

    #[test]
    fn test_required_excludes_country() {
        assert!(!ShippingField::REQUIRED.contains(&ShippingField::Country));
        assert_eq!(ShippingField::required_names()[7], "zipCode");
    }

    #[test]
    fn test_serde_uses_form_names() {
        let json = serde_json::to_string(&ShippingField::FirstName).unwrap();
        assert_eq!(json, "\"firstName\"");
    }

    #[test]
    fn test_review_lines() {
        let mut info = ShippingInfo::default();
        info.set(ShippingField::FirstName, "John".to_owned());
        info.set(ShippingField::LastName, "Doe".to_owned());
        info.set(ShippingField::City, "New York".to_owned());
        info.set(ShippingField::State, "NY".to_owned());
        info.set(ShippingField::ZipCode, "10001".to_owned());
        assert_eq!(info.full_name(), "John Doe");
        assert_eq!(info.city_line(), "New York, NY 10001");
    }
}
