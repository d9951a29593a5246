//! Contact notifications: request payload, email rendering and delivery.

#[cfg(feature = "api")]
pub mod email;
mod error;
#[cfg(feature = "api")]
pub mod mailer;
pub mod payload;

#[cfg(feature = "api")]
pub use email::{OutboundEmail, build_email, format_email_html};
pub use error::NotifyError;
#[cfg(feature = "api")]
pub use mailer::{Mailer, ResendMailer};
pub use payload::{ApplianceSummary, Calculations, ContactNotification, InverterSizingSnapshot};
