use ortho_core::enums::EffectDirection;
use ortho_core::import::ImportRecord;
use ortho_synth::enrich::{Enrichment, enrich};
use ortho_synth::extract::{age_range, extract_signal};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExtractArgs;
use crate::output::output;

/// What an import would derive from a title and abstract.
#[derive(Debug, Serialize)]
struct ExtractResponse {
    #[serde(flatten)]
    enrichment: Enrichment,
    effect_value: Option<f64>,
    effect_direction: EffectDirection,
    age_min: u32,
    age_max: u32,
}

fn analyse(args: &ExtractArgs) -> ExtractResponse {
    let record = ImportRecord {
        title: args.title.clone().unwrap_or_default(),
        abstract_text: Some(args.text.clone()),
        ..ImportRecord::default()
    };
    let enrichment = enrich(&record);
    let signal = extract_signal(&enrichment.risk_description);
    let (age_min, age_max) = age_range(Some(&enrichment.target_age_group));

    ExtractResponse {
        effect_value: signal.value,
        effect_direction: signal.direction,
        age_min,
        age_max,
        enrichment,
    }
}

/// Handle `ortho extract <text>`.
pub fn handle(args: &ExtractArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&analyse(args), flags.format)
}
