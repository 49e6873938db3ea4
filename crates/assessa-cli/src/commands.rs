use std::path::Path;

use eyre::{Result, WrapErr, bail};
use serde::Serialize;
use serde_json::{Value, json};
use uuid::Uuid;

use assessa_core::files;
use assessa_core::models::profile::{Demographics, NewProfile, Profile, ProfileUpdate};
use assessa_engine::Engine;
use assessa_engine::ledger::{self, Submission};
use assessa_engine::query::ResultFilter;
use assessa_export::render;
use assessa_instruments::Instrument;
use assessa_instruments::scoring::Answers;
use assessa_storage::FileStore;

use crate::DemographicsArgs;

type CliEngine = Engine<FileStore>;

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileListing {
    #[serde(flatten)]
    profile: Profile,
    result_count: usize,
}

pub fn profiles(engine: &mut CliEngine) -> Result<()> {
    let document = engine.document()?;
    let listings: Vec<ProfileListing> = document
        .profiles
        .iter()
        .map(|profile| ProfileListing {
            profile: profile.clone(),
            result_count: ledger::result_count(&document, profile.id),
        })
        .collect();
    print_json(&listings)
}

pub fn create_profile(
    engine: &mut CliEngine,
    name: String,
    is_anonymous: bool,
    demographics: DemographicsArgs,
) -> Result<()> {
    let input = NewProfile {
        name,
        is_anonymous,
        demographics: demographics.apply_to(Demographics::default()),
    };
    print_json(&engine.create_profile(input)?)
}

pub fn select_profile(engine: &mut CliEngine, id: Uuid) -> Result<()> {
    print_json(&engine.select_profile(id)?)
}

pub fn edit_profile(
    engine: &mut CliEngine,
    id: Uuid,
    name: Option<String>,
    is_anonymous: Option<bool>,
    demographics: DemographicsArgs,
) -> Result<()> {
    // Demographic flags patch the stored values rather than replacing them.
    let demographics = if demographics.is_empty() {
        None
    } else {
        let current = engine.profile(id)?.demographics;
        Some(demographics.apply_to(current))
    };

    let update = ProfileUpdate {
        name,
        is_anonymous,
        demographics,
    };
    print_json(&engine.update_profile(id, update)?)
}

pub fn delete_profile(engine: &mut CliEngine, id: Uuid) -> Result<()> {
    print_json(&engine.delete_profile(id)?)
}

pub fn instruments(engine: &CliEngine) -> Result<()> {
    let definitions: Vec<Value> = engine
        .catalog()
        .iter()
        .map(|instrument| -> Result<Value> {
            let mut value = serde_json::to_value(instrument.to_definition())?;
            value["maxTotal"] = json!(instrument.max_total());
            Ok(value)
        })
        .collect::<Result<_>>()?;
    print_json(&definitions)
}

pub fn record(
    engine: &mut CliEngine,
    profile_id: Uuid,
    test_type: String,
    answers: Vec<u32>,
    context_note: String,
) -> Result<()> {
    let submission = Submission {
        profile_id,
        test_type,
        answers: Answers::from_values(answers),
        context_note,
    };
    print_json(&engine.record_result(submission)?)
}

pub fn history(engine: &mut CliEngine, filter: ResultFilter) -> Result<()> {
    print_json(&engine.history(&filter)?)
}

pub fn summary(engine: &mut CliEngine, filter: ResultFilter) -> Result<()> {
    print_json(&engine.summary(&filter)?)
}

pub fn series(engine: &mut CliEngine, filter: ResultFilter) -> Result<()> {
    print_json(&engine.chart_series(&filter)?)
}

pub fn settings_get(engine: &mut CliEngine, path: Option<String>) -> Result<()> {
    match path {
        None => print_json(&engine.settings()?),
        Some(path) => match engine.setting(&path)? {
            Some(value) => print_json(&value),
            None => bail!("no setting at '{path}'"),
        },
    }
}

pub fn settings_set(engine: &mut CliEngine, path: &str, raw: String) -> Result<()> {
    let value = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
    print_json(&engine.update_setting(path, value)?)
}

pub fn export(engine: &mut CliEngine, out_dir: &Path) -> Result<()> {
    let backup = engine.export_backup()?;
    let path = out_dir.join(&backup.file_name);
    std::fs::write(&path, &backup.contents)
        .wrap_err_with(|| format!("failed to write backup to {}", path.display()))?;

    print_json(&json!({
        "file": path,
        "exportedAt": backup.exported_at,
    }))
}

pub fn restore(engine: &mut CliEngine, file: &Path) -> Result<()> {
    let payload = std::fs::read_to_string(file)
        .wrap_err_with(|| format!("failed to read backup {}", file.display()))?;
    let document = engine.restore_backup(&payload)?;

    print_json(&json!({
        "profiles": document.profiles.len(),
        "testResults": document.test_results.len(),
        "version": document.version,
    }))
}

pub fn report(
    engine: &mut CliEngine,
    filter: ResultFilter,
    format: &str,
    out_dir: Option<&Path>,
) -> Result<()> {
    let payload = engine.report(&filter)?;

    let (body, extension) = match format {
        "json" => (serde_json::to_string_pretty(&payload)?, "json"),
        "text" => (render::render_text(&payload)?, "txt"),
        other => bail!("unknown report format '{other}' (expected json or text)"),
    };

    match out_dir {
        None => {
            print!("{body}");
            Ok(())
        }
        Some(dir) => {
            let path = dir.join(files::report(payload.generated_at, extension));
            std::fs::write(&path, body)
                .wrap_err_with(|| format!("failed to write report to {}", path.display()))?;
            print_json(&json!({ "file": path }))
        }
    }
}

pub fn reset(engine: &mut CliEngine, confirmed: bool) -> Result<()> {
    if !confirmed {
        bail!("refusing to delete all data without --yes");
    }
    let document = engine.reset()?;
    print_json(&json!({ "version": document.version }))
}

impl DemographicsArgs {
    fn is_empty(&self) -> bool {
        self.birth_date.is_none()
            && self.pronouns.is_none()
            && self.height.is_none()
            && self.weight.is_none()
            && self.occupation.is_none()
            && self.goals.is_none()
    }

    /// Overlay the flags that were given onto `base`.
    fn apply_to(self, base: Demographics) -> Demographics {
        Demographics {
            birth_date: self.birth_date.or(base.birth_date),
            pronouns: self.pronouns.or(base.pronouns),
            height: self.height.or(base.height),
            weight: self.weight.or(base.weight),
            occupation: self.occupation.or(base.occupation),
            goals: self.goals.or(base.goals),
        }
    }
}
