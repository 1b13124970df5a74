use reqwest::Url;

use crate::config::SupportConfig;

const WHATSAPP_BASE: &str = "https://wa.me/";

/// WhatsApp deep-link with the support message prefilled
///
/// `None` when no support number is configured.
pub fn whatsapp_link(support: &SupportConfig) -> Option<Url> {
    let number: String = support
        .whatsapp_number
        .as_deref()?
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    if number.is_empty() {
        return None;
    }

    let base = format!("{}{}", WHATSAPP_BASE, number);
    match Url::parse_with_params(&base, &[("text", support.message.as_str())]) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::warn!(error = %e, "Could not build support link");
            None
        }
    }
}
