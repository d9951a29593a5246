//! HTML rendering of contact notifications.

use askama::Template;
use serde::Serialize;

use super::error::NotifyError;
use super::payload::{ApplianceSummary, ContactNotification, InverterSizingSnapshot};
use crate::config::NotifyConfig;

const NOT_PROVIDED: &str = "Not provided";
const NOT_AVAILABLE: &str = "N/A";

/// Message body accepted by the transactional email provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Notification body with every fallback already resolved.
#[derive(Template)]
#[template(path = "contact_notification.html")]
struct ContactEmail<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    location: &'a str,
    contact_method: &'a str,
    message: &'a str,
    sizing: Option<SizingLines<'a>>,
}

struct SizingLines<'a> {
    total_load: String,
    required_kva: String,
    recommended_kva: String,
    appliances: &'a [ApplianceSummary],
}

impl<'a> ContactEmail<'a> {
    fn new(request: &'a ContactNotification) -> Self {
        Self {
            name: &request.name,
            email: optional(request.email.as_deref()),
            phone: optional(request.phone.as_deref()),
            location: optional(request.location.as_deref()),
            contact_method: &request.contact_method,
            message: &request.message,
            sizing: request.inverter_sizing.as_ref().map(SizingLines::new),
        }
    }
}

impl<'a> SizingLines<'a> {
    fn new(sizing: &'a InverterSizingSnapshot) -> Self {
        Self {
            total_load: number(sizing.total_wattage()),
            required_kva: number(sizing.required_kva()),
            recommended_kva: number(sizing.recommended_kva()),
            appliances: &sizing.appliances,
        }
    }
}

/// Addresses and subject come from `config`, the body from `request`.
///
/// # Errors
///
/// Returns [`NotifyError::Render`] if the template fails to render.
pub fn build_email(
    request: &ContactNotification,
    config: &NotifyConfig,
) -> Result<OutboundEmail, NotifyError> {
    Ok(OutboundEmail {
        from: config.from.clone(),
        to: config.to.clone(),
        subject: format!("New Contact: {} - {}", request.name, config.subject_tag),
        html: format_email_html(request)?,
    })
}

/// Renders the notification body. User-supplied text is HTML-escaped.
///
/// # Errors
///
/// Returns [`NotifyError::Render`] if the template fails to render.
pub fn format_email_html(request: &ContactNotification) -> Result<String, NotifyError> {
    Ok(ContactEmail::new(request).render()?)
}

/// Blank optional fields read as missing.
fn optional(value: Option<&str>) -> &str {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => NOT_PROVIDED,
    }
}

fn number(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}
