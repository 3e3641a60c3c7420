//! Read-only views over the reference, record and derived tables.

use ortho_core::entities::{
    AgeRiskProfile, DentalCondition, Finding, FutureScenario, ResearchRecord, TimingBenefit,
    TreatmentEffect,
};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{AgeFilterArgs, ConditionFilterArgs, RecordsArgs};
use crate::commands::shared::condition::resolve_condition_id;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ConditionListResponse {
    conditions: Vec<DentalCondition>,
}

#[derive(Debug, Serialize)]
struct RecordListResponse {
    records: Vec<ResearchRecord>,
}

#[derive(Debug, Serialize)]
struct FindingListResponse {
    findings: Vec<Finding>,
}

#[derive(Debug, Serialize)]
struct RiskListResponse {
    risk_profiles: Vec<AgeRiskProfile>,
}

#[derive(Debug, Serialize)]
struct EffectListResponse {
    treatment_effects: Vec<TreatmentEffect>,
}

#[derive(Debug, Serialize)]
struct TimingListResponse {
    timing_benefits: Vec<TimingBenefit>,
}

#[derive(Debug, Serialize)]
struct ScenarioListResponse {
    future_scenarios: Vec<FutureScenario>,
}

fn limit_for(local: Option<u32>, ctx: &AppContext, flags: &GlobalFlags) -> u32 {
    effective_limit(local, flags.limit, ctx.config.general.default_limit)
}

async fn condition_filter(
    raw: Option<&str>,
    ctx: &AppContext,
) -> anyhow::Result<Option<i64>> {
    match raw {
        Some(raw) => Ok(Some(resolve_condition_id(&ctx.service, raw).await?)),
        None => Ok(None),
    }
}

/// Handle `ortho conditions`.
pub async fn conditions(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let conditions = ctx.service.list_conditions().await?;
    output(&ConditionListResponse { conditions }, flags.format)
}

/// Handle `ortho records`.
pub async fn records(
    args: &RecordsArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let records = ctx
        .service
        .list_records(limit_for(args.limit, ctx, flags))
        .await?;
    output(&RecordListResponse { records }, flags.format)
}

/// Handle `ortho findings [--condition C]`.
pub async fn findings(
    args: &ConditionFilterArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let condition = condition_filter(args.condition.as_deref(), ctx).await?;
    let findings = ctx
        .service
        .list_findings(condition, limit_for(args.limit, ctx, flags))
        .await?;
    output(&FindingListResponse { findings }, flags.format)
}

/// Handle `ortho risk`.
pub async fn risk(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let risk_profiles = ctx.service.list_risk_profiles().await?;
    output(&RiskListResponse { risk_profiles }, flags.format)
}

/// Handle `ortho effects [--condition C]`.
pub async fn effects(
    args: &ConditionFilterArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let condition = condition_filter(args.condition.as_deref(), ctx).await?;
    let mut treatment_effects = ctx.service.list_treatment_effects(condition).await?;
    if let Some(limit) = args.limit.or(flags.limit) {
        treatment_effects.truncate(usize::try_from(limit)?);
    }
    output(&EffectListResponse { treatment_effects }, flags.format)
}

/// Handle `ortho timing [--age N]`.
pub async fn timing(
    args: &AgeFilterArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let timing_benefits = ctx.service.list_timing_benefits(args.age).await?;
    output(&TimingListResponse { timing_benefits }, flags.format)
}

/// Handle `ortho scenarios [--age N]`.
pub async fn scenarios(
    args: &AgeFilterArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let future_scenarios = ctx.service.list_future_scenarios(args.age).await?;
    output(&ScenarioListResponse { future_scenarios }, flags.format)
}
