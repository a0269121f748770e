use crate::output::{format_days_ahead, print_json, print_skipped, print_table};
use anyhow::Context;
use golive_core::{
    clock::Clock,
    config::Config,
    portfolio::{self, PredictionResult},
    store::YamlEngagementStore,
    types::RiskStatus,
};
use std::path::Path;

pub fn run(
    root: &Path,
    clock: &dyn Clock,
    only: Option<RiskStatus>,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    config.ensure_valid()?;
    let store = YamlEngagementStore::open(root)?;
    let mut report = portfolio::forecast(&store, &config.forecast, clock)
        .context("failed to calculate deadline predictions")?;

    if let Some(status) = only {
        report.predictions.retain(|p| p.risk_status == status);
    }

    if json {
        print_json(&report)?;
        return Ok(());
    }

    if report.predictions.is_empty() {
        println!("No engagements to forecast.");
    } else {
        let rows = report.predictions.iter().map(row).collect();
        print_table(
            &[
                "ENGAGEMENT",
                "COMPANY",
                "PHASE",
                "PROGRESS",
                "VELOCITY",
                "PREDICTED",
                "TARGET",
                "AHEAD",
                "BLOCKERS",
                "RISK",
            ],
            rows,
        );
    }

    let s = report.summary;
    println!();
    println!(
        "Total: {} | Likely delayed: {} | At risk: {} | No target: {} | On track: {}",
        s.total, s.likely_delayed, s.at_risk, s.no_target, s.on_track
    );
    print_skipped(&report.skipped);
    Ok(())
}

fn row(p: &PredictionResult) -> Vec<String> {
    vec![
        p.engagement_id.clone(),
        p.company_name.clone(),
        p.current_phase.clone(),
        format!("{}/{} ({}%)", p.completed_phases, p.total_phases, p.progress_percent),
        format!("{:.2}", p.velocity_ratio),
        p.predicted_go_live.to_string(),
        p.target_go_live
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string()),
        format_days_ahead(p.days_ahead),
        p.blocker_count.to_string(),
        p.risk_status.to_string(),
    ]
}
