use crate::output::{format_days_ahead, print_json, print_skipped, print_table};
use anyhow::Context;
use chrono::NaiveDate;
use clap::Subcommand;
use golive_core::{
    clock::Clock,
    config::Config,
    engagement::Engagement,
    pipeline, portfolio,
    store::{EngagementSource, YamlEngagementStore},
};
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum EngagementSubcommand {
    /// Register a new engagement
    Add {
        /// Engagement id (lowercase slug, also the file name)
        id: String,
        /// Display name of the engagement
        #[arg(long)]
        name: String,
        /// Client company
        #[arg(long, default_value = "")]
        company: String,
        /// Pipeline phase the engagement is currently in
        #[arg(long, default_value = "handover")]
        phase: String,
        /// Committed go-live date (YYYY-MM-DD)
        #[arg(long)]
        target: Option<NaiveDate>,
    },

    /// List all engagements
    List,

    /// Show one engagement's phase history and prerequisites
    Show { id: String },

    /// Forecast a single engagement
    Predict { id: String },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(
    root: &Path,
    clock: &dyn Clock,
    subcmd: EngagementSubcommand,
    json: bool,
) -> anyhow::Result<()> {
    let store = YamlEngagementStore::open(root)?;
    match subcmd {
        EngagementSubcommand::Add {
            id,
            name,
            company,
            phase,
            target,
        } => add(&store, &id, &name, &company, &phase, target, json),
        EngagementSubcommand::List => list(&store, json),
        EngagementSubcommand::Show { id } => show(&store, &id, json),
        EngagementSubcommand::Predict { id } => predict(&store, clock, &id, json),
    }
}

// ---------------------------------------------------------------------------
// add
// ---------------------------------------------------------------------------

fn add(
    store: &YamlEngagementStore,
    id: &str,
    name: &str,
    company: &str,
    phase: &str,
    target: Option<NaiveDate>,
    json: bool,
) -> anyhow::Result<()> {
    pipeline::require(phase)?;
    let mut engagement = Engagement::new(id, name, company, phase);
    engagement.target_go_live_date = target;
    store
        .create(&engagement)
        .with_context(|| format!("failed to create engagement '{id}'"))?;

    if json {
        print_json(&engagement)?;
    } else {
        println!("Created engagement '{id}' in phase {phase}");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

fn list(store: &YamlEngagementStore, json: bool) -> anyhow::Result<()> {
    let snapshot = store.snapshot().context("failed to read engagements")?;

    if json {
        let value = serde_json::json!({
            "engagements": snapshot.engagements,
            "rejected": snapshot.rejected,
        });
        print_json(&value)?;
        return Ok(());
    }

    if snapshot.engagements.is_empty() {
        println!("No engagements.");
    } else {
        let rows = snapshot
            .engagements
            .iter()
            .map(|e| {
                vec![
                    e.id.clone(),
                    e.name.clone(),
                    e.company_name.clone(),
                    e.current_phase.clone(),
                    format!("{}/{}", e.completed_phase_count(), pipeline::len()),
                    e.target_go_live_date
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ]
            })
            .collect();
        print_table(
            &["ID", "NAME", "COMPANY", "PHASE", "DONE", "TARGET"],
            rows,
        );
    }
    print_skipped(&snapshot.rejected);
    Ok(())
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(store: &YamlEngagementStore, id: &str, json: bool) -> anyhow::Result<()> {
    let engagement = store.load(id)?;

    if json {
        print_json(&engagement)?;
        return Ok(());
    }

    println!("Engagement: {} ({})", engagement.name, engagement.id);
    if !engagement.company_name.is_empty() {
        println!("Company:    {}", engagement.company_name);
    }
    println!("Phase:      {}", engagement.current_phase);
    println!(
        "Target:     {}",
        engagement
            .target_go_live_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "none".to_string())
    );

    println!();
    let rows = pipeline::phases()
        .iter()
        .map(|phase| {
            let record = engagement.record_for(phase.key);
            vec![
                phase.order.to_string(),
                phase.key.to_string(),
                record
                    .map(|r| r.status.to_string())
                    .unwrap_or_else(|| "not_started".to_string()),
                record
                    .map(|r| r.planned_days())
                    .unwrap_or(f64::from(phase.default_planned_days))
                    .to_string(),
                record
                    .and_then(|r| r.started_at)
                    .map(|t| t.date_naive().to_string())
                    .unwrap_or_else(|| "-".to_string()),
                record
                    .and_then(|r| r.completed_at)
                    .map(|t| t.date_naive().to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    print_table(
        &["#", "PHASE", "STATUS", "PLANNED", "STARTED", "COMPLETED"],
        rows,
    );

    if !engagement.prerequisites.is_empty() {
        println!();
        println!("Prerequisites:");
        for p in &engagement.prerequisites {
            let gate = p
                .blocks_phase
                .as_deref()
                .map(|k| format!(" (gates {k})"))
                .unwrap_or_default();
            println!("  [{}] {}{}", p.status, p.title, gate);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// predict
// ---------------------------------------------------------------------------

fn predict(
    store: &YamlEngagementStore,
    clock: &dyn Clock,
    id: &str,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load(store.root()).context("failed to load config")?;
    config.ensure_valid()?;
    let engagement = store.load(id)?;
    let prediction = portfolio::predict(&engagement, &config.forecast, clock.now())?;

    if json {
        print_json(&prediction)?;
        return Ok(());
    }

    println!("Engagement:  {} ({})", prediction.engagement_name, prediction.engagement_id);
    println!("Phase:       {}", prediction.current_phase);
    println!(
        "Progress:    {}/{} phases ({}%)",
        prediction.completed_phases, prediction.total_phases, prediction.progress_percent
    );
    println!("Velocity:    {:.2}", prediction.velocity_ratio);
    println!("Blockers:    {}", prediction.blocker_count);
    println!("Predicted:   {}", prediction.predicted_go_live);
    println!(
        "Target:      {}",
        prediction
            .target_go_live
            .map(|d| d.to_string())
            .unwrap_or_else(|| "none".to_string())
    );
    println!("Days ahead:  {}", format_days_ahead(prediction.days_ahead));
    println!("Risk:        {}", prediction.risk_status);
    Ok(())
}
