use crate::domain::record::{ClientRecord, RiskLevel};
use crate::domain::score::risk_score;
use anyhow::{ensure, Context};
use chrono::NaiveDate;
use serde::Deserialize;

// US-style dates, as written by the upstream ledger export.
const DATE_FORMAT: &str = "%m/%d/%Y";

/// One CSV row as exported, before any validation. Field names follow the
/// fixed column headers of the export.
#[derive(Debug, Clone, Deserialize)]
pub struct RawClientRow {
    #[serde(rename = "Client Name")]
    pub client_name: String,
    #[serde(rename = "Amount Owed (KES)")]
    pub amount_owed: String,
    #[serde(rename = "Days Overdue")]
    pub days_overdue: String,
    #[serde(rename = "Risk Level")]
    pub risk_level: String,
    #[serde(rename = "Last Payment Date")]
    pub last_payment_date: String,
    #[serde(rename = "Due Date")]
    pub due_date: String,
}

impl RawClientRow {
    /// Validate the row and derive the per-client metrics
    /// (days since last payment against `as_of_date`, risk score).
    pub fn validate_and_into_record(self, as_of_date: NaiveDate) -> anyhow::Result<ClientRecord> {
        let client_name = self.client_name.trim().to_string();
        ensure!(!client_name.is_empty(), "client name must be non-empty");

        let amount_owed: f64 = self
            .amount_owed
            .trim()
            .parse()
            .with_context(|| format!("invalid amount owed: {:?}", self.amount_owed))?;
        ensure!(
            amount_owed >= 0.0 && amount_owed.is_finite(),
            "amount owed must be a non-negative number (got {amount_owed})"
        );

        let days_overdue: i64 = self
            .days_overdue
            .trim()
            .parse()
            .with_context(|| format!("invalid days overdue: {:?}", self.days_overdue))?;
        ensure!(
            days_overdue >= 0,
            "days overdue must be non-negative (got {days_overdue})"
        );

        let risk_level = match RiskLevel::parse(&self.risk_level) {
            Some(level) => level,
            None => {
                // The scorer treats anything unrecognized as the 20-point base,
                // so normalize to Low rather than rejecting the row.
                tracing::warn!(
                    label = %self.risk_level,
                    client = %client_name,
                    "unrecognized risk level; treating as Low"
                );
                RiskLevel::Low
            }
        };

        let last_payment_date = parse_date(&self.last_payment_date)
            .with_context(|| format!("invalid last payment date for {client_name}"))?;
        let due_date = parse_date(&self.due_date)
            .with_context(|| format!("invalid due date for {client_name}"))?;

        let days_since_last_payment = (as_of_date - last_payment_date).num_days();
        let risk_score = risk_score(risk_level, days_overdue, amount_owed);

        Ok(ClientRecord {
            client_name,
            amount_owed,
            days_overdue,
            risk_level,
            last_payment_date,
            due_date,
            days_since_last_payment,
            risk_score,
        })
    }
}

fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .with_context(|| format!("expected MM/DD/YYYY, got {s:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_row() -> RawClientRow {
        RawClientRow {
            client_name: "Acme Ltd".to_string(),
            amount_owed: "150000".to_string(),
            days_overdue: "45".to_string(),
            risk_level: "High".to_string(),
            last_payment_date: "03/14/2025".to_string(),
            due_date: "02/01/2025".to_string(),
        }
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 12).unwrap()
    }

    #[test]
    fn converts_valid_row_and_derives_metrics() {
        let record = raw_row().validate_and_into_record(as_of()).unwrap();
        assert_eq!(record.client_name, "Acme Ltd");
        assert_eq!(record.amount_owed, 150000.0);
        assert_eq!(record.days_overdue, 45);
        assert_eq!(record.risk_level, RiskLevel::High);
        assert_eq!(
            record.last_payment_date,
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
        );
        // 2025-03-14 -> 2025-06-12 is 90 days.
        assert_eq!(record.days_since_last_payment, 90);
        assert_eq!(
            record.risk_score,
            risk_score(RiskLevel::High, 45, 150000.0)
        );
    }

    #[test]
    fn rejects_malformed_date() {
        let mut row = raw_row();
        row.due_date = "2025-02-01".to_string();
        assert!(row.validate_and_into_record(as_of()).is_err());
    }

    #[test]
    fn rejects_non_numeric_amount() {
        let mut row = raw_row();
        row.amount_owed = "KES 150,000".to_string();
        assert!(row.validate_and_into_record(as_of()).is_err());
    }

    #[test]
    fn rejects_negative_days_overdue() {
        let mut row = raw_row();
        row.days_overdue = "-3".to_string();
        assert!(row.validate_and_into_record(as_of()).is_err());
    }

    #[test]
    fn rejects_negative_amount() {
        let mut row = raw_row();
        row.amount_owed = "-1".to_string();
        assert!(row.validate_and_into_record(as_of()).is_err());
    }

    #[test]
    fn unknown_risk_label_falls_back_to_low() {
        let mut row = raw_row();
        row.risk_level = "Severe".to_string();
        let record = row.validate_and_into_record(as_of()).unwrap();
        assert_eq!(record.risk_level, RiskLevel::Low);
        assert_eq!(record.risk_score, risk_score(RiskLevel::Low, 45, 150000.0));
    }

    #[test]
    fn future_last_payment_gives_negative_days_since() {
        let mut row = raw_row();
        row.last_payment_date = "07/01/2025".to_string();
        let record = row.validate_and_into_record(as_of()).unwrap();
        assert_eq!(record.days_since_last_payment, -19);
    }
}
