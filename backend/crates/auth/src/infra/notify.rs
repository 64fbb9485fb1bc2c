use crate::domain::notifier::Notifier;
use crate::domain::value_object::OtpPurpose;

/// Development notifier that writes deliveries to the log instead of
/// an outbound channel. Codes themselves are never logged.
#[derive(Debug, Clone, Default)]
pub struct DevNotifier;

impl Notifier for DevNotifier {
    async fn deliver_otp(&self, destination: &str, code: &str, purpose: OtpPurpose) -> bool {
        tracing::info!(
            destination,
            purpose = %purpose,
            code_len = code.len(),
            "otp delivery (dev mode)"
        );
        true
    }

    async fn deliver_security_alert(&self, destination: &str, event: &str) -> bool {
        tracing::info!(destination, event, "security alert (dev mode)");
        true
    }
}
