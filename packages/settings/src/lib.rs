// ABOUTME: Club data settings record for the admin page and public templates
// ABOUTME: Sanitizes submissions before storage and escapes every value on render

pub mod admin;
pub mod error;
pub mod html;
pub mod links;
pub mod manager;
pub mod render;
pub mod sanitize;
pub mod shortcode;
pub mod types;

// Re-export main types
pub use admin::{
    admin_menu_entry, admin_stylesheet, render_admin_page, render_login_page, AdminMenuEntry,
    StylesheetAsset,
};
pub use error::{SettingsError, SettingsResult};
pub use html::HtmlSafe;
pub use links::{mail_link, phone_digits, tel_link};
pub use manager::{field_value, ClubData, ClubSettingsManager};
pub use render::{render_form_fields, render_fragment, FormField};
pub use sanitize::{
    sanitize_email, sanitize_settings, sanitize_text_field, sanitize_textarea_field,
    ClubSettingsSanitizer,
};
pub use shortcode::expand_shortcodes;
pub use types::{ClubField, ClubSettings, ClubSettingsInput, InputKind, SanitizedText};
