// ABOUTME: Environment variable names and fixed identifiers
// ABOUTME: Centralized definitions shared by storage, settings and the admin server

// Database Configuration
pub const CLUBDATA_DATABASE_URL: &str = "CLUBDATA_DATABASE_URL";

// Server Configuration
pub const CLUBDATA_API_HOST: &str = "CLUBDATA_API_HOST";
pub const CLUBDATA_API_PORT: &str = "CLUBDATA_API_PORT";

// Admin Authorization
pub const CLUBDATA_API_TOKEN: &str = "CLUBDATA_API_TOKEN";
pub const CLUBDATA_DEV_MODE: &str = "CLUBDATA_DEV_MODE";

// Defaults
pub const DEFAULT_DATABASE_URL: &str = "sqlite://clubdata.db?mode=rwc";
pub const DEFAULT_API_HOST: &str = "127.0.0.1";
pub const DEFAULT_API_PORT: u16 = 4010;

/// Name of the persisted option holding the club record
pub const OPTION_NAME: &str = "vdm_clubdata";

/// Settings group submitted together with the form
pub const SETTINGS_GROUP: &str = "vdm_settings_group";

/// Section the three fields are rendered in
pub const SETTINGS_SECTION: &str = "vdm_main_section";

/// Notice shown on the settings page after a successful save
pub const SAVED_NOTICE: &str = "Einstellungen gespeichert.";

/// Admin page slug
pub const PAGE_SLUG: &str = "clubdata";

/// Hook name of the admin page, used to scope asset loading
pub const ADMIN_PAGE_HOOK: &str = "toplevel_page_clubdata";

/// Shortcode tag replaced by the public fragment
pub const SHORTCODE_TAG: &str = "clubdata";

/// Capability required to manage the record
pub const REQUIRED_CAPABILITY: &str = "manage_options";

// Admin Page Labels
pub const PAGE_TITLE: &str = "Vereinsdaten";
pub const MENU_TITLE: &str = "Vereinsdaten";
pub const MENU_ICON: &str = "dashicons-admin-site-alt";
pub const MENU_POSITION: u32 = 25;
pub const SUBMIT_LABEL: &str = "Vereinsdaten speichern";

// Admin Stylesheet
pub const STYLESHEET_HANDLE: &str = "vdm-admin-style";
pub const STYLESHEET_PATH: &str = "admin-style.css";
