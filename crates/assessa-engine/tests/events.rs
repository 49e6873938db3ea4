use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::Registry;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use assessa_core::models::profile::NewProfile;
use assessa_engine::Engine;
use assessa_instruments::catalog::Catalog;
use assessa_storage::MemoryStore;

/// Collects `(action, resource_type, resource_id)` for every change event.
#[derive(Clone, Default)]
struct ChangeLog(Arc<Mutex<Vec<(String, String, String)>>>);

#[derive(Default)]
struct ChangeFields {
    action: Option<String>,
    resource_type: Option<String>,
    resource_id: Option<String>,
}

impl Visit for ChangeFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.record(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.record(field, format!("{value:?}"));
    }
}

impl ChangeFields {
    fn record(&mut self, field: &Field, value: String) {
        match field.name() {
            "change.action" => self.action = Some(value),
            "change.resource_type" => self.resource_type = Some(value),
            "change.resource_id" => self.resource_id = Some(value),
            _ => {}
        }
    }
}

impl<S: Subscriber> Layer<S> for ChangeLog {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = ChangeFields::default();
        event.record(&mut fields);
        if let (Some(action), Some(resource_type), Some(resource_id)) =
            (fields.action, fields.resource_type, fields.resource_id)
        {
            self.0
                .lock()
                .unwrap()
                .push((action, resource_type, resource_id));
        }
    }
}

#[test]
fn selecting_a_profile_emits_a_change_event() {
    let log = ChangeLog::default();
    let subscriber = Registry::default().with(log.clone());

    let (profile, last_used) = tracing::subscriber::with_default(subscriber, || {
        let mut engine = Engine::new(MemoryStore::new(), Catalog::standard())
            .with_clock(|| "2026-03-01T09:00:00Z".parse().unwrap());
        let profile = engine
            .create_profile(NewProfile {
                name: "Ana".to_string(),
                ..Default::default()
            })
            .unwrap();
        engine.select_profile(profile.id).unwrap();
        let last_used = engine.profile(profile.id).unwrap().last_used;
        (profile, last_used)
    });

    let id = profile.id.to_string();
    let events = log.0.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            ("create".to_string(), "profile".to_string(), id.clone()),
            ("select".to_string(), "profile".to_string(), id),
        ]
    );
    assert_eq!(last_used, "2026-03-01T09:00:00Z".parse::<jiff::Timestamp>().unwrap());
}
