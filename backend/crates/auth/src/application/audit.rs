use crate::domain::repository::AuditLogRepository;

/// Appends an audit entry, logging instead of failing when the store
/// rejects it. The audit trail observes operations; it never vetoes
/// them.
pub(crate) async fn record_action<L>(
    audit: &L,
    user_id: i64,
    action: &str,
    details: serde_json::Value,
) where
    L: AuditLogRepository,
{
    if let Err(err) = audit.append_audit_entry(user_id, action, details).await {
        tracing::warn!(user_id, action, error = %err, "failed to append audit entry");
    }
}
