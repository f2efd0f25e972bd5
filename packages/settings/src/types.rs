// ABOUTME: Type definitions for the club data record
// ABOUTME: Fields, raw form input, and the sanitized stored record

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SettingsError;
use crate::html::HtmlSafe;
use crate::sanitize::{sanitize_text_field, sanitize_textarea_field};

/// The three fields of the club record, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClubField {
    Phone,
    Email,
    Address,
}

impl ClubField {
    pub const ALL: [ClubField; 3] = [ClubField::Phone, ClubField::Email, ClubField::Address];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClubField::Phone => "phone",
            ClubField::Email => "email",
            ClubField::Address => "address",
        }
    }

    /// DOM id of the form control
    pub fn input_id(&self) -> &'static str {
        match self {
            ClubField::Phone => "vdm_phone",
            ClubField::Email => "vdm_email",
            ClubField::Address => "vdm_address",
        }
    }

    /// Row label shown next to the control
    pub fn title(&self) -> &'static str {
        match self {
            ClubField::Phone => "Telefonnummer",
            ClubField::Email => "E-Mail",
            ClubField::Address => "Addresse",
        }
    }

    pub fn input_kind(&self) -> InputKind {
        match self {
            ClubField::Phone | ClubField::Email => InputKind::Text,
            ClubField::Address => InputKind::Textarea,
        }
    }
}

impl FromStr for ClubField {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "phone" => Ok(ClubField::Phone),
            "email" => Ok(ClubField::Email),
            "address" => Ok(ClubField::Address),
            _ => Err(SettingsError::UnknownField(s.to_string())),
        }
    }
}

/// Form control used to edit a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Textarea,
}

/// Text that has passed through a sanitizer and can be stored as-is.
///
/// It is plain text, not HTML: render paths must go through
/// [`SanitizedText::to_html`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SanitizedText(String);

impl SanitizedText {
    pub fn single_line(raw: &str) -> Self {
        Self(sanitize_text_field(raw))
    }

    pub fn multi_line(raw: &str) -> Self {
        Self(sanitize_textarea_field(raw))
    }

    /// Wrap a value read back from storage, which was sanitized when written
    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_html(&self) -> HtmlSafe {
        HtmlSafe::escape(&self.0)
    }
}

/// Raw form submission. Every field is optional; a missing field clears the
/// stored value on save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClubSettingsInput {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl ClubSettingsInput {
    /// Read a submission from an arbitrary JSON value. Strings are taken
    /// as-is, numbers and booleans are stringified, anything else counts as
    /// missing.
    pub fn from_value(raw: &Value) -> Self {
        let get = |field: ClubField| -> Option<String> {
            match raw.get(field.as_str())? {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            }
        };

        Self {
            phone: get(ClubField::Phone),
            email: get(ClubField::Email),
            address: get(ClubField::Address),
        }
    }

    pub fn get(&self, field: ClubField) -> Option<&str> {
        match field {
            ClubField::Phone => self.phone.as_deref(),
            ClubField::Email => self.email.as_deref(),
            ClubField::Address => self.address.as_deref(),
        }
    }

    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        for field in ClubField::ALL {
            if let Some(value) = self.get(field) {
                map.insert(field.as_str().to_string(), Value::String(value.to_string()));
            }
        }
        Value::Object(map)
    }
}

/// The persisted club record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClubSettings {
    pub phone: SanitizedText,
    pub email: SanitizedText,
    pub address: SanitizedText,
}

impl ClubSettings {
    /// Build from a stored record. A missing record, a non-object value, or a
    /// missing or non-string key all yield empty fields.
    pub fn from_stored(stored: Option<&Value>) -> Self {
        let get = |field: ClubField| -> SanitizedText {
            stored
                .and_then(|value| value.get(field.as_str()))
                .and_then(Value::as_str)
                .map(|s| SanitizedText::from_stored(s.to_string()))
                .unwrap_or_default()
        };

        Self {
            phone: get(ClubField::Phone),
            email: get(ClubField::Email),
            address: get(ClubField::Address),
        }
    }

    pub fn get(&self, field: ClubField) -> &SanitizedText {
        match field {
            ClubField::Phone => &self.phone,
            ClubField::Email => &self.email,
            ClubField::Address => &self.address,
        }
    }

    pub fn is_empty(&self) -> bool {
        ClubField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Persisted layout: an object with exactly `phone`, `address` and `email`
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        for field in ClubField::ALL {
            map.insert(
                field.as_str().to_string(),
                Value::String(self.get(field).as_str().to_string()),
            );
        }
        Value::Object(map)
    }

    /// Feed the stored values back in as a submission
    pub fn to_input(&self) -> ClubSettingsInput {
        ClubSettingsInput {
            phone: Some(self.phone.as_str().to_string()),
            email: Some(self.email.as_str().to_string()),
            address: Some(self.address.as_str().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_parsing() {
        assert_eq!("phone".parse::<ClubField>().unwrap(), ClubField::Phone);
        assert_eq!("address".parse::<ClubField>().unwrap(), ClubField::Address);
        assert!(matches!(
            "fax".parse::<ClubField>(),
            Err(SettingsError::UnknownField(name)) if name == "fax"
        ));
        assert!("Phone".parse::<ClubField>().is_err());
    }

    #[test]
    fn test_field_metadata() {
        assert_eq!(ClubField::Phone.input_id(), "vdm_phone");
        assert_eq!(ClubField::Email.input_kind(), InputKind::Text);
        assert_eq!(ClubField::Address.input_kind(), InputKind::Textarea);
        assert_eq!(ClubField::Address.title(), "Addresse");
    }

    #[test]
    fn test_input_missing_keys_deserialize_to_none() {
        let input: ClubSettingsInput = serde_json::from_value(json!({"phone": "123"})).unwrap();
        assert_eq!(input.phone.as_deref(), Some("123"));
        assert_eq!(input.email, None);
        assert_eq!(input.address, None);
    }

    #[test]
    fn test_input_from_value_is_lenient() {
        let input = ClubSettingsInput::from_value(&json!({
            "phone": 4930123,
            "email": ["not", "a", "string"],
            "address": "Am See 3"
        }));
        assert_eq!(input.phone.as_deref(), Some("4930123"));
        assert_eq!(input.email, None);
        assert_eq!(input.address.as_deref(), Some("Am See 3"));

        assert_eq!(
            ClubSettingsInput::from_value(&json!("scalar")),
            ClubSettingsInput::default()
        );
    }

    #[test]
    fn test_from_stored_defaults() {
        assert!(ClubSettings::from_stored(None).is_empty());
        assert!(ClubSettings::from_stored(Some(&json!(42))).is_empty());

        let settings = ClubSettings::from_stored(Some(&json!({"phone": "1", "email": null})));
        assert_eq!(settings.phone.as_str(), "1");
        assert_eq!(settings.email.as_str(), "");
        assert_eq!(settings.address.as_str(), "");
    }

    #[test]
    fn test_to_value_has_all_keys() {
        let value = ClubSettings::default().to_value();
        assert_eq!(value, json!({"phone": "", "email": "", "address": ""}));
    }

    #[test]
    fn test_sanitized_text_to_html() {
        let text = SanitizedText::from_stored("Tom & <Jerry>".to_string());
        assert_eq!(text.to_html().as_str(), "Tom &amp; &lt;Jerry&gt;");
    }
}
