use std::collections::BTreeMap;

use jiff::Timestamp;
use serde_json::{Value, json};
use uuid::Uuid;

use assessa_core::models::document::Document;
use assessa_core::models::profile::{NewProfile, Profile, ProfileUpdate};
use assessa_core::models::result::TestResult;
use assessa_core::models::settings::Settings;
use assessa_export::backup::{self, Backup};
use assessa_export::report::{self, ReportPayload};
use assessa_instruments::catalog::Catalog;
use assessa_storage::{DocumentStore, load_document, save_document};

use crate::error::EngineError;
use crate::events::ChangeEvent;
use crate::ledger::{self, Submission};
use crate::query::{self, ResultFilter, Series, Summary};
use crate::registry::{self, ProfileDeletion};

type Clock = Box<dyn Fn() -> Timestamp + Send + Sync>;

/// The assessment engine bound to a store and a catalog.
///
/// Every successful mutating call ends in exactly one whole-document save.
/// Calls are synchronous and the engine assumes it is the only writer.
pub struct Engine<S: DocumentStore> {
    store: S,
    catalog: Catalog,
    clock: Clock,
}

impl<S: DocumentStore> Engine<S> {
    pub fn new(store: S, catalog: Catalog) -> Self {
        Self {
            store,
            catalog,
            clock: Box::new(Timestamp::now),
        }
    }

    /// Replace the wall clock, e.g. to pin "now" in tests.
    pub fn with_clock(mut self, clock: impl Fn() -> Timestamp + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn now(&self) -> Timestamp {
        (self.clock)()
    }

    /// The current document, seeding it on first access.
    pub fn document(&mut self) -> Result<Document, EngineError> {
        Ok(load_document(&mut self.store)?)
    }

    /// Load, apply `change`, save. Nothing is written if `change` fails.
    fn mutate<T>(
        &mut self,
        change: impl FnOnce(&mut Document, &Catalog, Timestamp) -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        let now = self.now();
        let mut document = load_document(&mut self.store)?;
        let output = change(&mut document, &self.catalog, now)?;
        save_document(&mut self.store, &document)?;
        Ok(output)
    }

    // Profiles

    pub fn create_profile(&mut self, input: NewProfile) -> Result<Profile, EngineError> {
        let profile = self.mutate(|doc, _, now| registry::create_profile(doc, input, now))?;
        ChangeEvent::new("create", "profile", profile.id)
            .with_details(json!({ "anonymous": profile.is_anonymous }))
            .emit();
        Ok(profile)
    }

    pub fn select_profile(&mut self, id: Uuid) -> Result<Profile, EngineError> {
        let profile = self.mutate(|doc, _, now| registry::select_profile(doc, id, now))?;
        ChangeEvent::new("select", "profile", id).emit();
        Ok(profile)
    }

    pub fn update_profile(
        &mut self,
        id: Uuid,
        update: ProfileUpdate,
    ) -> Result<Profile, EngineError> {
        let profile = self.mutate(|doc, _, _| registry::update_profile(doc, id, update))?;
        ChangeEvent::new("update", "profile", id).emit();
        Ok(profile)
    }

    /// Delete a profile and its results in a single save. Deleting an absent
    /// id writes nothing and reports nothing removed.
    pub fn delete_profile(&mut self, id: Uuid) -> Result<ProfileDeletion, EngineError> {
        let mut document = load_document(&mut self.store)?;
        let deletion = registry::delete_profile(&mut document, id);

        if !deletion.profile_removed && deletion.results_removed == 0 {
            tracing::debug!(profile_id = %id, "delete of absent profile ignored");
            return Ok(deletion);
        }

        save_document(&mut self.store, &document)?;
        ChangeEvent::new("delete", "profile", id)
            .with_details(json!({ "resultsRemoved": deletion.results_removed }))
            .emit();
        Ok(deletion)
    }

    pub fn profile(&mut self, id: Uuid) -> Result<Profile, EngineError> {
        let document = self.document()?;
        registry::find_profile(&document, id).cloned()
    }

    pub fn profiles(&mut self) -> Result<Vec<Profile>, EngineError> {
        Ok(self.document()?.profiles)
    }

    pub fn result_count(&mut self, profile_id: Uuid) -> Result<usize, EngineError> {
        let document = self.document()?;
        Ok(ledger::result_count(&document, profile_id))
    }

    // Results

    pub fn record_result(&mut self, submission: Submission) -> Result<TestResult, EngineError> {
        let result = self.mutate(|doc, catalog, now| {
            ledger::record_result(doc, catalog, submission, now)
        })?;
        ChangeEvent::new("create", "test_result", result.id)
            .with_details(json!({
                "profileId": result.profile_id,
                "testType": result.test_type,
                "total": result.scores.total,
            }))
            .emit();
        Ok(result)
    }

    /// Results in insertion order, optionally for one profile only.
    pub fn results(&mut self, profile_id: Option<Uuid>) -> Result<Vec<TestResult>, EngineError> {
        let document = self.document()?;
        Ok(ledger::results_for(&document, profile_id)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Filtered results, newest first.
    pub fn history(&mut self, filter: &ResultFilter) -> Result<Vec<TestResult>, EngineError> {
        let now = self.now();
        let document = self.document()?;
        Ok(query::filter(&document.test_results, filter, now)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Filtered results partitioned by instrument, each group newest first.
    pub fn groups(
        &mut self,
        filter: &ResultFilter,
    ) -> Result<BTreeMap<String, Vec<TestResult>>, EngineError> {
        let now = self.now();
        let document = self.document()?;
        let filtered = query::filter(&document.test_results, filter, now);
        Ok(query::group_by_instrument(&filtered)
            .into_iter()
            .map(|(test_type, group)| (test_type, group.into_iter().cloned().collect()))
            .collect())
    }

    pub fn summary(&mut self, filter: &ResultFilter) -> Result<Summary, EngineError> {
        let now = self.now();
        let document = self.document()?;
        let filtered = query::filter(&document.test_results, filter, now);
        Ok(query::summarize(&filtered))
    }

    /// One oldest-first chart series per instrument.
    pub fn chart_series(
        &mut self,
        filter: &ResultFilter,
    ) -> Result<BTreeMap<String, Series>, EngineError> {
        let now = self.now();
        let document = self.document()?;
        let filtered = query::filter(&document.test_results, filter, now);
        Ok(query::group_by_instrument(&filtered)
            .into_iter()
            .map(|(test_type, group)| (test_type, query::series_for(&group)))
            .collect())
    }

    // Settings

    pub fn settings(&mut self) -> Result<Settings, EngineError> {
        Ok(self.document()?.settings)
    }

    pub fn setting(&mut self, path: &str) -> Result<Option<Value>, EngineError> {
        Ok(self.document()?.settings.get(path)?)
    }

    /// Set one settings leaf by dotted path (e.g. `"audio.backgroundMusic"`).
    pub fn update_setting(&mut self, path: &str, value: Value) -> Result<Settings, EngineError> {
        let settings = self.mutate(|doc, _, _| {
            doc.settings.set(path, value)?;
            Ok(doc.settings.clone())
        })?;
        ChangeEvent::new("update", "setting", path).emit();
        Ok(settings)
    }

    // Export

    /// Serialize the whole document for backup, recording the export time in
    /// the document itself.
    pub fn export_backup(&mut self) -> Result<Backup, EngineError> {
        let exported = self.mutate(|doc, _, now| {
            doc.last_backup = Some(now);
            Ok(backup::backup(doc, now)?)
        })?;
        ChangeEvent::new("export", "document", &exported.file_name).emit();
        Ok(exported)
    }

    /// Validate a backup payload and, only if it is well-formed, replace the
    /// stored document with it.
    pub fn restore_backup(&mut self, payload: &str) -> Result<Document, EngineError> {
        let document = backup::restore(payload)?;
        save_document(&mut self.store, &document)?;
        ChangeEvent::new("restore", "document", &document.version)
            .with_details(json!({
                "profiles": document.profiles.len(),
                "results": document.test_results.len(),
            }))
            .emit();
        Ok(document)
    }

    /// Report payload over the filtered history, newest first.
    pub fn report(&mut self, filter: &ResultFilter) -> Result<ReportPayload, EngineError> {
        let now = self.now();
        let document = self.document()?;
        let filtered = query::filter(&document.test_results, filter, now);
        Ok(report::build_report(
            filtered,
            &document.profiles,
            &self.catalog,
            now,
        ))
    }

    /// Discard everything and start over from a freshly seeded document.
    pub fn reset(&mut self) -> Result<Document, EngineError> {
        let document = Document::default();
        save_document(&mut self.store, &document)?;
        ChangeEvent::new("reset", "document", &document.version).emit();
        Ok(document)
    }
}
