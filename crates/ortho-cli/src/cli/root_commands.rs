use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Import literature records from a JSON Lines file.
    Import(ImportArgs),
    /// Recompute every derived table in one transaction.
    Regenerate,
    /// Drop all data and re-seed the reference conditions.
    Reset(ResetArgs),
    /// Score treatment necessity for a patient.
    Score(ScoreArgs),
    /// Economic summary for a patient age.
    Economic(EconomicArgs),
    /// Reference conditions, most severe first.
    Conditions,
    /// Imported research records.
    Records(RecordsArgs),
    /// Findings extracted at import.
    Findings(ConditionFilterArgs),
    /// Age risk profiles.
    Risk,
    /// Treatment effects per condition.
    Effects(ConditionFilterArgs),
    /// Timing benefits per age cohort.
    Timing(AgeFilterArgs),
    /// Future scenarios with and without treatment.
    Scenarios(AgeFilterArgs),
    /// Run the text extractors on a sample without touching the store.
    Extract(ExtractArgs),
    /// Print the JSON schema of an import record or other type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// JSON Lines file, or `-` for stdin.
    pub file: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct ResetArgs {
    /// Confirm dropping every record and derived table.
    #[arg(long)]
    pub yes: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ScoreArgs {
    /// Patient age in years.
    #[arg(long)]
    pub age: u32,
    /// Condition id, code or name. Repeat or separate with commas.
    #[arg(long = "condition", value_delimiter = ',')]
    pub conditions: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct EconomicArgs {
    /// Patient age in years.
    #[arg(long)]
    pub age: u32,
}

#[derive(Clone, Debug, Args)]
pub struct RecordsArgs {
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct ConditionFilterArgs {
    /// Condition id, code or name.
    #[arg(long)]
    pub condition: Option<String>,
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct AgeFilterArgs {
    /// Only rows whose age range contains this age.
    #[arg(long)]
    pub age: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct ExtractArgs {
    /// Abstract or free text to analyse.
    pub text: String,
    /// Optional title, searched together with the text.
    #[arg(long)]
    pub title: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Type name (see `--list`).
    #[arg(default_value = "import_record")]
    pub type_name: String,
    /// List the registered type names.
    #[arg(long)]
    pub list: bool,
    /// Validate every line of a JSON Lines file against the schema.
    #[arg(long, value_name = "FILE")]
    pub check: Option<PathBuf>,
}
