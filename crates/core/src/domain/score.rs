use crate::domain::record::RiskLevel;

// Days overdue are scaled in months; cap at 3x.
const DAYS_FACTOR_SCALE: f64 = 30.0;
const DAYS_FACTOR_CAP: f64 = 3.0;

// Amounts are scaled in 100k KES units; cap at 2x.
const AMOUNT_FACTOR_SCALE: f64 = 100_000.0;
const AMOUNT_FACTOR_CAP: f64 = 2.0;

const DAYS_WEIGHT: f64 = 0.3;
const AMOUNT_WEIGHT: f64 = 0.2;

const MAX_SCORE: f64 = 100.0;

fn base_score(level: RiskLevel) -> f64 {
    match level {
        RiskLevel::High => 80.0,
        RiskLevel::Medium => 50.0,
        RiskLevel::Low => 20.0,
    }
}

/// Composite 0..=100 risk score. Inputs must be non-negative; the loader
/// rejects negative amounts and day counts before scoring.
pub fn risk_score(level: RiskLevel, days_overdue: i64, amount_owed: f64) -> f64 {
    let days_factor = ((days_overdue as f64) / DAYS_FACTOR_SCALE).min(DAYS_FACTOR_CAP);
    let amount_factor = (amount_owed / AMOUNT_FACTOR_SCALE).min(AMOUNT_FACTOR_CAP);

    let score = base_score(level) * (1.0 + DAYS_WEIGHT * days_factor + AMOUNT_WEIGHT * amount_factor);
    score.min(MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_factors_capped_saturates_at_100() {
        // days_factor = 3, amount_factor = 2 -> 80 * (1 + 0.9 + 0.4) = 184 -> 100.
        assert_eq!(risk_score(RiskLevel::High, 90, 200_000.0), 100.0);
    }

    #[test]
    fn low_with_zero_factors_is_base_20() {
        assert_eq!(risk_score(RiskLevel::Low, 0, 0.0), 20.0);
    }

    #[test]
    fn medium_with_zero_factors_is_base_50() {
        assert_eq!(risk_score(RiskLevel::Medium, 0, 0.0), 50.0);
    }

    #[test]
    fn thirty_days_counts_as_one_month_factor() {
        // 50 * (1 + 0.3*1 + 0.2*0.5) = 50 * 1.4 = 70.
        let s = risk_score(RiskLevel::Medium, 30, 50_000.0);
        assert!((s - 70.0).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn monotone_in_days_overdue() {
        let amounts = [0.0, 50_000.0, 500_000.0];
        for level in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High] {
            for amount in amounts {
                let mut prev = f64::NEG_INFINITY;
                for days in [0, 1, 15, 30, 60, 90, 120, 1000] {
                    let s = risk_score(level, days, amount);
                    assert!(s >= prev, "score dropped at days={days}");
                    prev = s;
                }
            }
        }
    }

    #[test]
    fn monotone_in_amount_owed() {
        let days = [0, 30, 90, 365];
        for level in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High] {
            for d in days {
                let mut prev = f64::NEG_INFINITY;
                for amount in [0.0, 10_000.0, 100_000.0, 200_000.0, 5_000_000.0] {
                    let s = risk_score(level, d, amount);
                    assert!(s >= prev, "score dropped at amount={amount}");
                    prev = s;
                }
            }
        }
    }

    #[test]
    fn score_stays_in_range_across_grid() {
        for level in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High] {
            for days in [0, 7, 29, 30, 31, 90, 10_000] {
                for amount in [0.0, 1.0, 99_999.0, 100_000.0, 1e9] {
                    let s = risk_score(level, days, amount);
                    assert!((0.0..=100.0).contains(&s), "out of range: {s}");
                }
            }
        }
    }
}
