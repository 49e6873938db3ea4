use serde::Serialize;
use tracing::info;

/// A structured record of one change to the document.
///
/// Emitted through `tracing` after the change has been persisted, giving an
/// application-level trail of what happened to which record.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeEvent {
    pub action: &'static str,
    pub resource_type: &'static str,
    pub resource_id: String,
    pub details: Option<serde_json::Value>,
}

impl ChangeEvent {
    pub fn new(
        action: &'static str,
        resource_type: &'static str,
        resource_id: impl ToString,
    ) -> Self {
        Self {
            action,
            resource_type,
            resource_id: resource_id.to_string(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        info!(
            change.action = self.action,
            change.resource_type = self.resource_type,
            change.resource_id = %self.resource_id,
            change.details = %details,
            "document changed"
        );
    }
}
