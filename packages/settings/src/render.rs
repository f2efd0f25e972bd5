// ABOUTME: Render projections of the club record
// ABOUTME: Editable form field descriptors and the public display fragment

use clubdata_config::constants::OPTION_NAME;
use serde::Serialize;

use crate::html::HtmlSafe;
use crate::links::phone_digits;
use crate::types::{ClubField, ClubSettings, InputKind};

/// One editable field of the settings form, value already escaped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub name: ClubField,
    pub id: &'static str,
    pub title: &'static str,
    pub kind: InputKind,
    pub value: HtmlSafe,
}

impl FormField {
    /// Name of the submitted form parameter, e.g. `vdm_clubdata[phone]`
    pub fn input_name(&self) -> String {
        format!("{}[{}]", OPTION_NAME, self.name.as_str())
    }

    pub fn to_html(&self) -> HtmlSafe {
        let markup = match self.kind {
            InputKind::Text => format!(
                r#"<input type="text" class="regular-text" id="{}" name="{}" value="{}">"#,
                self.id,
                self.input_name(),
                self.value
            ),
            InputKind::Textarea => format!(
                r#"<textarea class="large-text" id="{}" name="{}" rows="4">{}</textarea>"#,
                self.id,
                self.input_name(),
                self.value
            ),
        };
        HtmlSafe::from_markup(markup)
    }
}

/// Field descriptors for the settings form, in display order (phone, email, address)
pub fn render_form_fields(current: &ClubSettings) -> Vec<FormField> {
    ClubField::ALL
        .into_iter()
        .map(|field| {
            let kind = field.input_kind();
            let raw = current.get(field).as_str();
            let value = match kind {
                InputKind::Text => HtmlSafe::escape(raw),
                InputKind::Textarea => HtmlSafe::escape_textarea(raw),
            };

            FormField {
                name: field,
                id: field.input_id(),
                title: field.title(),
                kind,
                value,
            }
        })
        .collect()
}

/// Public display fragment.
///
/// Blocks appear in fixed order (address, email, phone) and only for
/// non-empty fields. Email is shown as text without a link.
pub fn render_fragment(current: &ClubSettings) -> HtmlSafe {
    let mut out = String::from("<div class=\"clubdata\">\n");

    if !current.address.is_empty() {
        out.push_str("<div class=\"address\">\n");
        out.push_str(current.address.to_html().paragraphs().as_str());
        out.push_str("</div>\n");
    }

    if !current.email.is_empty() {
        out.push_str("<div class=\"email\">\n");
        out.push_str(current.email.to_html().paragraphs().as_str());
        out.push_str("</div>\n");
    }

    if !current.phone.is_empty() {
        let target = HtmlSafe::escape(&phone_digits(current.phone.as_str()));
        out.push_str(&format!(
            "<p class=\"phone\"><strong>Tel.:</strong> <a href=\"tel:{}\">{}</a></p>\n",
            target,
            current.phone.to_html()
        ));
    }

    out.push_str("</div>\n");
    HtmlSafe::from_markup(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitize::sanitize_settings;
    use crate::types::ClubSettingsInput;
    use pretty_assertions::assert_eq;

    fn settings(phone: &str, email: &str, address: &str) -> ClubSettings {
        sanitize_settings(&ClubSettingsInput {
            phone: Some(phone.to_string()),
            email: Some(email.to_string()),
            address: Some(address.to_string()),
        })
    }

    #[test]
    fn test_form_fields_order_and_kinds() {
        let fields = render_form_fields(&ClubSettings::default());
        let names: Vec<_> = fields.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            vec![ClubField::Phone, ClubField::Email, ClubField::Address]
        );
        assert_eq!(fields[0].kind, InputKind::Text);
        assert_eq!(fields[1].kind, InputKind::Text);
        assert_eq!(fields[2].kind, InputKind::Textarea);
        assert!(fields.iter().all(|f| f.value.is_empty()));
    }

    #[test]
    fn test_form_field_values_are_escaped() {
        let current = settings("030 \"1\"", "a&b@verein.de", "1 < 2\n&amp;");
        let fields = render_form_fields(&current);

        assert_eq!(fields[0].value.as_str(), "030 &quot;1&quot;");
        assert_eq!(fields[1].value.as_str(), "a&amp;b@verein.de");
        assert_eq!(fields[2].value.as_str(), "1 &amp;lt; 2\n&amp;amp;");
    }

    #[test]
    fn test_form_field_markup() {
        let fields = render_form_fields(&settings("030", "", "Am See 3"));

        assert_eq!(
            fields[0].to_html().as_str(),
            r#"<input type="text" class="regular-text" id="vdm_phone" name="vdm_clubdata[phone]" value="030">"#
        );
        assert_eq!(
            fields[2].to_html().as_str(),
            r#"<textarea class="large-text" id="vdm_address" name="vdm_clubdata[address]" rows="4">Am See 3</textarea>"#
        );
    }

    #[test]
    fn test_fragment_empty_record() {
        let html = render_fragment(&ClubSettings::default());
        assert_eq!(html.as_str(), "<div class=\"clubdata\">\n</div>\n");
    }

    #[test]
    fn test_fragment_address_only() {
        let html = render_fragment(&settings("", "", "Line1\n\nLine2"));
        assert_eq!(
            html.as_str(),
            "<div class=\"clubdata\">\n<div class=\"address\">\n<p>Line1</p>\n<p>Line2</p>\n</div>\n</div>\n"
        );
        assert!(!html.as_str().contains("class=\"email\""));
        assert!(!html.as_str().contains("class=\"phone\""));
    }

    #[test]
    fn test_fragment_block_order() {
        let html = render_fragment(&settings("+49 30 1", "info@verein.de", "Am See 3"));
        let text = html.as_str();

        let address = text.find("class=\"address\"").unwrap();
        let email = text.find("class=\"email\"").unwrap();
        let phone = text.find("class=\"phone\"").unwrap();
        assert!(address < email && email < phone);
    }

    #[test]
    fn test_fragment_phone_link() {
        let html = render_fragment(&settings("+49 (30) 123-456", "", ""));
        assert_eq!(
            html.as_str(),
            "<div class=\"clubdata\">\n<p class=\"phone\"><strong>Tel.:</strong> <a href=\"tel:+4930123456\">+49 (30) 123-456</a></p>\n</div>\n"
        );
    }

    #[test]
    fn test_fragment_email_is_not_linked() {
        let html = render_fragment(&settings("", "info@verein.de", ""));
        assert_eq!(
            html.as_str(),
            "<div class=\"clubdata\">\n<div class=\"email\">\n<p>info@verein.de</p>\n</div>\n</div>\n"
        );
        assert!(!html.as_str().contains("mailto:"));
    }

    #[test]
    fn test_fragment_escapes_stored_markup() {
        let current = ClubSettings {
            address: crate::types::SanitizedText::from_stored(
                "<script>alert(1)</script>".to_string(),
            ),
            ..ClubSettings::default()
        };

        let html = render_fragment(&current);
        assert!(html.as_str().contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.as_str().contains("<script>"));
    }
}
