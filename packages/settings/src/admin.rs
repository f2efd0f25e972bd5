// ABOUTME: Admin page markup, menu registration data and stylesheet scoping
// ABOUTME: Wraps the form field descriptors into the settings page

use clubdata_config::constants::{
    ADMIN_PAGE_HOOK, MENU_ICON, MENU_POSITION, MENU_TITLE, PAGE_SLUG, PAGE_TITLE,
    REQUIRED_CAPABILITY, SAVED_NOTICE, SETTINGS_GROUP, SETTINGS_SECTION, STYLESHEET_HANDLE,
    STYLESHEET_PATH, SUBMIT_LABEL,
};
use serde::Serialize;

use crate::html::HtmlSafe;
use crate::render::render_form_fields;
use crate::types::ClubSettings;

/// Data the host needs to register the admin menu entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminMenuEntry {
    pub page_title: &'static str,
    pub menu_title: &'static str,
    pub capability: &'static str,
    pub slug: &'static str,
    pub icon: &'static str,
    pub position: u32,
}

pub fn admin_menu_entry() -> AdminMenuEntry {
    AdminMenuEntry {
        page_title: PAGE_TITLE,
        menu_title: MENU_TITLE,
        capability: REQUIRED_CAPABILITY,
        slug: PAGE_SLUG,
        icon: MENU_ICON,
        position: MENU_POSITION,
    }
}

/// Admin stylesheet to enqueue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StylesheetAsset {
    pub handle: &'static str,
    pub path: &'static str,
}

/// The stylesheet is only loaded on this module's own admin page
pub fn admin_stylesheet(hook: &str) -> Option<StylesheetAsset> {
    if hook != ADMIN_PAGE_HOOK {
        return None;
    }

    Some(StylesheetAsset {
        handle: STYLESHEET_HANDLE,
        path: STYLESHEET_PATH,
    })
}

/// Full settings page: title, one table row per field, submit button.
/// The form posts to `form_action`. `settings_updated` adds the saved notice
/// the host shows after redirecting back from a save.
pub fn render_admin_page(
    current: &ClubSettings,
    form_action: &str,
    settings_updated: bool,
) -> HtmlSafe {
    let title = HtmlSafe::escape(PAGE_TITLE);
    let mut out = String::new();

    out.push_str("<div class=\"wrap vdm-admin-wrap\">\n");
    out.push_str(&format!(
        "<h1><span class=\"vdm-admin-icon\"><span class=\"dashicons {}\"></span></span>{}</h1>\n",
        HtmlSafe::escape(MENU_ICON),
        title
    ));
    if settings_updated {
        out.push_str(&format!(
            "<div id=\"setting-error-settings_updated\" class=\"notice notice-success settings-error is-dismissible\"><p><strong>{}</strong></p></div>\n",
            HtmlSafe::escape(SAVED_NOTICE)
        ));
    }
    out.push_str("<div class=\"vdm-admin-content\">\n");
    out.push_str(&format!(
        "<form action=\"{}\" method=\"post\">\n",
        HtmlSafe::escape(form_action)
    ));
    out.push_str(&format!(
        "<input type=\"hidden\" name=\"option_page\" value=\"{}\">\n",
        HtmlSafe::escape(SETTINGS_GROUP)
    ));
    out.push_str(&format!(
        "<div id=\"{}\" class=\"vdm-settings-section\">\n",
        HtmlSafe::escape(SETTINGS_SECTION)
    ));
    out.push_str(&format!("<h2>{}</h2>\n", title));
    out.push_str("<table class=\"form-table\" role=\"presentation\">\n");

    for field in render_form_fields(current) {
        out.push_str(&format!(
            "<tr><th scope=\"row\"><label for=\"{}\">{}</label></th><td>{}</td></tr>\n",
            field.id,
            HtmlSafe::escape(field.title),
            field.to_html()
        ));
    }

    out.push_str("</table>\n</div>\n");
    out.push_str(&format!(
        "<p class=\"submit\"><input type=\"submit\" name=\"submit\" id=\"submit\" class=\"button button-primary\" value=\"{}\"></p>\n",
        HtmlSafe::escape(SUBMIT_LABEL)
    ));
    out.push_str("</form>\n</div>\n</div>\n");

    HtmlSafe::from_markup(out)
}

/// Token entry form shown to browsers before they can open the settings page
pub fn render_login_page(form_action: &str) -> HtmlSafe {
    let mut out = String::from("<div class=\"wrap vdm-admin-wrap\">\n");
    out.push_str(&format!("<h1>{}</h1>\n", HtmlSafe::escape(PAGE_TITLE)));
    out.push_str(&format!(
        "<form action=\"{}\" method=\"post\">\n",
        HtmlSafe::escape(form_action)
    ));
    out.push_str("<p><label for=\"token\">API-Token</label> <input type=\"password\" class=\"regular-text\" id=\"token\" name=\"token\" autocomplete=\"current-password\"></p>\n");
    out.push_str("<p class=\"submit\"><input type=\"submit\" class=\"button button-primary\" value=\"Anmelden\"></p>\n");
    out.push_str("</form>\n</div>\n");

    HtmlSafe::from_markup(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitize::sanitize_settings;
    use crate::types::ClubSettingsInput;

    #[test]
    fn test_stylesheet_only_on_own_page() {
        let asset = admin_stylesheet("toplevel_page_clubdata").unwrap();
        assert_eq!(asset.handle, "vdm-admin-style");
        assert_eq!(asset.path, "admin-style.css");

        assert!(admin_stylesheet("index.php").is_none());
        assert!(admin_stylesheet("").is_none());
    }

    #[test]
    fn test_menu_entry() {
        let entry = admin_menu_entry();
        assert_eq!(entry.slug, "clubdata");
        assert_eq!(entry.capability, "manage_options");
        assert_eq!(entry.position, 25);
    }

    #[test]
    fn test_admin_page_contains_every_field() {
        let current = sanitize_settings(&ClubSettingsInput {
            phone: Some("030 1234".to_string()),
            email: Some("info@verein.de".to_string()),
            address: Some("Am See 3\n12345 Berlin".to_string()),
        });

        let html = render_admin_page(&current, "options.php", false);
        let text = html.as_str();

        assert!(text.contains("<label for=\"vdm_phone\">Telefonnummer</label>"));
        assert!(text.contains("name=\"vdm_clubdata[email]\" value=\"info@verein.de\""));
        assert!(text.contains(">Am See 3\n12345 Berlin</textarea>"));
        assert!(text.contains("value=\"vdm_settings_group\""));
        assert!(text.contains("<form action=\"options.php\" method=\"post\">"));
        assert!(text.contains("value=\"Vereinsdaten speichern\""));
        assert!(text.contains("<div id=\"vdm_main_section\" class=\"vdm-settings-section\">"));
        assert!(!text.contains("notice-success"));
    }

    #[test]
    fn test_login_page_posts_token() {
        let html = render_login_page("/admin/login");
        let text = html.as_str();

        assert!(text.contains("<form action=\"/admin/login\" method=\"post\">"));
        assert!(text.contains("type=\"password\""));
        assert!(text.contains("name=\"token\""));
    }

    #[test]
    fn test_admin_page_saved_notice() {
        let html = render_admin_page(&ClubSettings::default(), "options.php", true);
        let text = html.as_str();

        let notice = text.find("notice-success").unwrap();
        assert!(text[..notice].contains("</h1>"));
        assert!(text.contains("<p><strong>Einstellungen gespeichert.</strong></p>"));
    }

    #[test]
    fn test_admin_page_escapes_values() {
        let current = ClubSettings {
            phone: crate::types::SanitizedText::from_stored("\"><script>".to_string()),
            ..ClubSettings::default()
        };

        let html = render_admin_page(&current, "/admin/clubdata?x=\"y\"", false);
        assert!(html.as_str().contains("action=\"/admin/clubdata?x=&quot;y&quot;\""));
        assert!(!html.as_str().contains("<script>"));
        assert!(html.as_str().contains("value=\"&quot;&gt;&lt;script&gt;\""));
    }
}
