use anyhow::Context;
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use debtdash_core::domain::record::RiskLevel;
use debtdash_core::domain::snapshot::DashboardSnapshot;

#[derive(Debug, Parser)]
#[command(name = "debtdash_report")]
struct Args {
    /// Path to the debts CSV. Defaults to the CSV_PATH environment variable.
    #[arg(long)]
    csv: Option<String>,

    /// As-of date (YYYY-MM-DD) for days-since-last-payment. Defaults to today
    /// in EAT; pin it for reproducible reports.
    #[arg(long)]
    as_of_date: Option<String>,

    /// Print the full snapshot as pretty JSON instead of a log summary.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = debtdash_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let csv_path = match args.csv.as_deref() {
        Some(p) => p.to_string(),
        None => settings.require_csv_path()?.to_string(),
    };

    let as_of_date =
        debtdash_core::time::resolve_as_of_date(args.as_of_date.as_deref(), chrono::Utc::now())?;

    let records =
        match debtdash_core::ingest::csv::load_records(Path::new(&csv_path), as_of_date) {
            Ok(records) => records,
            Err(e) => {
                sentry_anyhow::capture_anyhow(&e);
                return Err(e);
            }
        };

    let snapshot = DashboardSnapshot::new(as_of_date, chrono::Utc::now(), records);

    if args.json {
        let out = serde_json::to_string_pretty(&snapshot)
            .context("failed to serialize snapshot")?;
        println!("{out}");
        return Ok(());
    }

    let count_of = |level: RiskLevel| {
        snapshot
            .records
            .iter()
            .filter(|r| r.risk_level == level)
            .count()
    };

    tracing::info!(
        %as_of_date,
        rows = snapshot.records.len(),
        high = count_of(RiskLevel::High),
        medium = count_of(RiskLevel::Medium),
        low = count_of(RiskLevel::Low),
        "debt recovery report"
    );
    tracing::info!(
        total_amount_owed = snapshot.kpis.total_amount_owed,
        high_risk_clients = snapshot.kpis.high_risk_clients,
        avg_days_overdue = snapshot.kpis.avg_days_overdue,
        recovery_potential = snapshot.kpis.recovery_potential,
        "kpis"
    );

    Ok(())
}

fn init_sentry(settings: &debtdash_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
