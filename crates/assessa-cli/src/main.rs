//! assessa CLI: a thin JSON-in, JSON-out surface over the assessment engine.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use eyre::Result;
use jiff::civil::Date;
use uuid::Uuid;

use assessa_engine::Engine;
use assessa_engine::query::{ResultFilter, Timeframe};
use assessa_instruments::catalog::Catalog;
use assessa_storage::FileStore;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "assessa", version, about = "Local self-assessment tracker")]
struct Cli {
    /// Directory holding the persisted document
    #[arg(long, env = "ASSESSA_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List profiles with their result counts
    Profiles,

    /// Create a profile
    CreateProfile {
        /// Display name (blank becomes "Anonymous")
        #[arg(default_value = "")]
        name: String,

        /// Keep no demographics for this profile
        #[arg(long)]
        anonymous: bool,

        #[command(flatten)]
        demographics: DemographicsArgs,
    },

    /// Mark a profile as in use
    SelectProfile { id: Uuid },

    /// Edit a profile's name, anonymity, or demographics
    EditProfile {
        id: Uuid,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        anonymous: Option<bool>,

        #[command(flatten)]
        demographics: DemographicsArgs,
    },

    /// Delete a profile and all of its results
    DeleteProfile { id: Uuid },

    /// List the available instruments
    Instruments,

    /// Score and record a completed questionnaire
    Record {
        #[arg(long)]
        profile: Uuid,

        /// Instrument id, e.g. "PHQ-9"
        #[arg(long = "test")]
        test_type: String,

        /// Selected option values in question order, comma-separated
        #[arg(long, value_delimiter = ',', required = true)]
        answers: Vec<u32>,

        /// What was going on at the time
        #[arg(long, default_value = "")]
        note: String,
    },

    /// Results matching a filter, newest first
    History(FilterArgs),

    /// Headline numbers for the filtered results
    Summary(FilterArgs),

    /// Per-instrument chart series, oldest first
    Series(FilterArgs),

    /// Read or change settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Write a full backup file
    Export {
        /// Directory to write the backup into
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Replace all data with the contents of a backup file
    Restore { file: PathBuf },

    /// Build a results report
    Report {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output format: json, text
        #[arg(long, default_value = "json")]
        format: String,

        /// Directory to write the report into instead of stdout
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Delete all profiles, results, and settings
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print all settings, or one value by dotted path
    Get { path: Option<String> },

    /// Set one value by dotted path, e.g. `audio.musicVolume 0.8`
    Set {
        path: String,

        /// JSON value; anything that isn't valid JSON is taken as a string
        value: String,
    },
}

#[derive(Args)]
struct FilterArgs {
    #[arg(long)]
    profile: Option<Uuid>,

    /// "all" or a number of days
    #[arg(long, default_value = "all")]
    timeframe: Timeframe,
}

impl From<FilterArgs> for ResultFilter {
    fn from(args: FilterArgs) -> Self {
        ResultFilter {
            profile_id: args.profile,
            timeframe: args.timeframe,
        }
    }
}

#[derive(Args)]
struct DemographicsArgs {
    /// YYYY-MM-DD
    #[arg(long)]
    birth_date: Option<Date>,

    #[arg(long)]
    pronouns: Option<String>,

    /// Centimetres
    #[arg(long)]
    height: Option<u32>,

    /// Kilograms
    #[arg(long)]
    weight: Option<u32>,

    #[arg(long)]
    occupation: Option<String>,

    #[arg(long)]
    goals: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    // stdout carries JSON only; logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let data_dir = config::data_dir(cli.data_dir)?;
    let store = FileStore::new(config::document_path(&data_dir));
    let mut engine = Engine::new(store, Catalog::standard());
    tracing::debug!(data_dir = %data_dir.display(), "engine ready");

    match cli.command {
        Commands::Profiles => commands::profiles(&mut engine),
        Commands::CreateProfile {
            name,
            anonymous,
            demographics,
        } => commands::create_profile(&mut engine, name, anonymous, demographics),
        Commands::SelectProfile { id } => commands::select_profile(&mut engine, id),
        Commands::EditProfile {
            id,
            name,
            anonymous,
            demographics,
        } => commands::edit_profile(&mut engine, id, name, anonymous, demographics),
        Commands::DeleteProfile { id } => commands::delete_profile(&mut engine, id),
        Commands::Instruments => commands::instruments(&engine),
        Commands::Record {
            profile,
            test_type,
            answers,
            note,
        } => commands::record(&mut engine, profile, test_type, answers, note),
        Commands::History(filter) => commands::history(&mut engine, filter.into()),
        Commands::Summary(filter) => commands::summary(&mut engine, filter.into()),
        Commands::Series(filter) => commands::series(&mut engine, filter.into()),
        Commands::Settings { action } => match action {
            SettingsAction::Get { path } => commands::settings_get(&mut engine, path),
            SettingsAction::Set { path, value } => {
                commands::settings_set(&mut engine, &path, value)
            }
        },
        Commands::Export { out_dir } => commands::export(&mut engine, &out_dir),
        Commands::Restore { file } => commands::restore(&mut engine, &file),
        Commands::Report {
            filter,
            format,
            out_dir,
        } => commands::report(&mut engine, filter.into(), &format, out_dir.as_deref()),
        Commands::Reset { yes } => commands::reset(&mut engine, yes),
    }
}
