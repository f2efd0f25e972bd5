// ABOUTME: tel: and mailto: link targets derived from stored values
// ABOUTME: Phone numbers keep digits and plus signs only

use crate::sanitize::sanitize_email;

pub const TEL_SCHEME: &str = "tel:";
pub const MAILTO_SCHEME: &str = "mailto:";

/// Digits and `+` of a phone number, everything else removed
pub fn phone_digits(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// `tel:` link for a phone number, or an empty string if it has no digits
pub fn tel_link(phone: &str) -> String {
    let digits = phone_digits(phone);
    if digits.is_empty() {
        String::new()
    } else {
        format!("{}{}", TEL_SCHEME, digits)
    }
}

/// `mailto:` link for an email address, or an empty string if there is none.
///
/// The address goes through the email sanitizer, so a value that cannot be an
/// address at all yields a bare `mailto:`.
pub fn mail_link(email: &str) -> String {
    if email.is_empty() {
        String::new()
    } else {
        format!("{}{}", MAILTO_SCHEME, sanitize_email(email))
    }
}
