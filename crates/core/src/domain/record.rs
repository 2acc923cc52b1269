use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Exact label match only; unknown labels are the caller's problem
    /// (the loader falls back to `Low` and warns).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRecord {
    pub client_name: String,
    pub amount_owed: f64,
    pub days_overdue: i64,
    pub risk_level: RiskLevel,
    pub last_payment_date: NaiveDate,
    pub due_date: NaiveDate,
    pub days_since_last_payment: i64,
    pub risk_score: f64,
}
