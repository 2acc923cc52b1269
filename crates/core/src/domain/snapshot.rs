use crate::domain::record::{ClientRecord, RiskLevel};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub as_of_date: NaiveDate,
    pub generated_at: DateTime<Utc>,
    pub kpis: Kpis,
    pub records: Vec<ClientRecord>,
}

impl DashboardSnapshot {
    /// Records must be non-empty (the loader guarantees it); `records` keeps
    /// the original CSV order.
    pub fn new(
        as_of_date: NaiveDate,
        generated_at: DateTime<Utc>,
        records: Vec<ClientRecord>,
    ) -> Self {
        let kpis = Kpis::compute(&records);
        Self {
            as_of_date,
            generated_at,
            kpis,
            records,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kpis {
    pub total_amount_owed: f64,
    pub high_risk_clients: usize,
    pub avg_days_overdue: f64,
    /// Sum of amounts owed by clients not currently rated High.
    pub recovery_potential: f64,
}

impl Kpis {
    pub fn compute(records: &[ClientRecord]) -> Self {
        let total_amount_owed: f64 = records.iter().map(|r| r.amount_owed).sum();
        let high_risk_clients = records
            .iter()
            .filter(|r| r.risk_level == RiskLevel::High)
            .count();
        let total_days: i64 = records.iter().map(|r| r.days_overdue).sum();
        let avg_days_overdue = if records.is_empty() {
            0.0
        } else {
            (total_days as f64) / (records.len() as f64)
        };
        let recovery_potential: f64 = records
            .iter()
            .filter(|r| r.risk_level != RiskLevel::High)
            .map(|r| r.amount_owed)
            .sum();

        Self {
            total_amount_owed,
            high_risk_clients,
            avg_days_overdue,
            recovery_potential,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskFilter {
    All,
    Level(RiskLevel),
}

impl RiskFilter {
    /// The dropdown values: "all" plus the three level labels.
    pub fn parse(s: &str) -> Option<Self> {
        if s.trim() == "all" {
            return Some(Self::All);
        }
        RiskLevel::parse(s).map(Self::Level)
    }
}

/// Visible-row rule for the client table: everything for `All`, the equality
/// subset otherwise. Order is preserved.
pub fn filter_records(records: &[ClientRecord], filter: RiskFilter) -> Vec<ClientRecord> {
    match filter {
        RiskFilter::All => records.to_vec(),
        RiskFilter::Level(level) => records
            .iter()
            .filter(|r| r.risk_level == level)
            .cloned()
            .collect(),
    }
}
