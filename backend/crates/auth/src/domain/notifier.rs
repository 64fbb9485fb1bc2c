use crate::domain::value_object::OtpPurpose;

/// Outbound delivery of codes and security notices.
///
/// Delivery is best-effort and reported as a plain bool; the caller
/// decides whether a failed handoff is fatal for its flow.
#[trait_variant::make(Notifier: Send)]
pub trait LocalNotifier {
    async fn deliver_otp(&self, destination: &str, code: &str, purpose: OtpPurpose) -> bool;

    async fn deliver_security_alert(&self, destination: &str, event: &str) -> bool;
}
