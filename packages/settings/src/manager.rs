// ABOUTME: Lifecycle of the singleton club record
// ABOUTME: Load, sanitize-and-save, field access, and render projections over an option store

use std::collections::BTreeMap;
use std::sync::Arc;

use clubdata_config::constants::{OPTION_NAME, SHORTCODE_TAG};
use clubdata_storage::OptionStore;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::admin::render_admin_page;
use crate::error::SettingsResult;
use crate::html::HtmlSafe;
use crate::render::{render_form_fields, render_fragment, FormField};
use crate::sanitize::ClubSettingsSanitizer;
use crate::shortcode::expand_shortcodes;
use crate::types::{ClubField, ClubSettings, ClubSettingsInput};

/// Result of the field accessor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ClubData {
    /// One escaped field value
    Field(HtmlSafe),
    /// Every stored field, escaped. Empty when no record exists.
    All(BTreeMap<String, HtmlSafe>),
}

impl ClubData {
    /// Text form: the single value, or an empty string for a mapping
    pub fn as_field_str(&self) -> &str {
        match self {
            ClubData::Field(value) => value.as_str(),
            ClubData::All(_) => "",
        }
    }
}

/// Escaped view of a stored record.
///
/// A requested field that is present in the record yields that value alone.
/// Anything else (no field, an unknown name, a field missing from the record)
/// yields the whole record as a mapping, which is empty when nothing is stored.
pub fn field_value(stored: Option<&Value>, field: Option<&str>) -> ClubData {
    let record = stored.and_then(Value::as_object);

    if let (Some(record), Some(name)) = (record, field.filter(|f| !f.is_empty())) {
        if let Some(value) = record.get(name).and_then(Value::as_str) {
            return ClubData::Field(HtmlSafe::escape(value));
        }
    }

    let all = record
        .map(|record| {
            record
                .iter()
                .filter_map(|(key, value)| {
                    value
                        .as_str()
                        .map(|v| (key.clone(), HtmlSafe::escape(v)))
                })
                .collect()
        })
        .unwrap_or_default();

    ClubData::All(all)
}

/// Owns access to the club record in an option store
#[derive(Clone)]
pub struct ClubSettingsManager {
    store: Arc<dyn OptionStore>,
    option_name: String,
}

impl ClubSettingsManager {
    pub fn new(store: Arc<dyn OptionStore>) -> Self {
        Self::with_option_name(store, OPTION_NAME)
    }

    pub fn with_option_name(store: Arc<dyn OptionStore>, option_name: impl Into<String>) -> Self {
        Self {
            store,
            option_name: option_name.into(),
        }
    }

    pub fn option_name(&self) -> &str {
        &self.option_name
    }

    /// Current record; empty fields if nothing was ever saved
    pub async fn load(&self) -> SettingsResult<ClubSettings> {
        debug!("Loading club record from option: {}", self.option_name);
        let stored = self.store.get_option(&self.option_name).await?;
        Ok(ClubSettings::from_stored(stored.as_ref()))
    }

    /// Replace the record with the sanitized submission and return what was stored
    pub async fn save(&self, input: &ClubSettingsInput) -> SettingsResult<ClubSettings> {
        self.save_raw(&input.to_value()).await
    }

    /// Like [`ClubSettingsManager::save`] for an untyped submission
    pub async fn save_raw(&self, raw: &Value) -> SettingsResult<ClubSettings> {
        let stored = self
            .store
            .set_named_record(&self.option_name, raw, &ClubSettingsSanitizer)
            .await?;

        let settings = ClubSettings::from_stored(Some(&stored));
        info!(
            option = %self.option_name,
            phone_set = !settings.phone.is_empty(),
            email_set = !settings.email.is_empty(),
            address_set = !settings.address.is_empty(),
            "Saved club record"
        );
        Ok(settings)
    }

    /// Remove the stored record. Returns whether one existed.
    pub async fn clear(&self) -> SettingsResult<bool> {
        let removed = self.store.delete_option(&self.option_name).await?;
        info!(option = %self.option_name, removed, "Cleared club record");
        Ok(removed)
    }

    /// Escaped field access, see [`field_value`]
    pub async fn field(&self, field: Option<&str>) -> SettingsResult<ClubData> {
        let stored = self.store.get_option(&self.option_name).await?;
        Ok(field_value(stored.as_ref(), field))
    }

    /// Escaped value of one known field; empty when unset
    pub async fn field_text(&self, field: ClubField) -> SettingsResult<HtmlSafe> {
        Ok(self.load().await?.get(field).to_html())
    }

    pub async fn render_form(&self) -> SettingsResult<Vec<FormField>> {
        Ok(render_form_fields(&self.load().await?))
    }

    pub async fn render_admin_page(
        &self,
        form_action: &str,
        settings_updated: bool,
    ) -> SettingsResult<HtmlSafe> {
        Ok(render_admin_page(
            &self.load().await?,
            form_action,
            settings_updated,
        ))
    }

    /// The public fragment for the current record
    pub async fn shortcode(&self) -> SettingsResult<HtmlSafe> {
        Ok(render_fragment(&self.load().await?))
    }

    /// Expand every `[clubdata]` tag in `document`
    pub async fn expand(&self, document: &str) -> SettingsResult<String> {
        let fragment = self.shortcode().await?;
        Ok(expand_shortcodes(document, SHORTCODE_TAG, &fragment))
    }
}
