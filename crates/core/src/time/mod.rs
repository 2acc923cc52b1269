use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};

// The ledger is denominated in KES and kept on Nairobi time (EAT, no DST).
const EAT_OFFSET_SECS: i32 = 3 * 3600;

/// The date that days-since-last-payment is measured against. An explicit
/// `YYYY-MM-DD` argument wins; otherwise the current EAT calendar date.
pub fn resolve_as_of_date(
    as_of_date_arg: Option<&str>,
    now_utc: DateTime<Utc>,
) -> anyhow::Result<NaiveDate> {
    if let Some(s) = as_of_date_arg {
        return NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid as-of date {s:?}, expected YYYY-MM-DD"));
    }

    let eat = chrono::FixedOffset::east_opt(EAT_OFFSET_SECS).context("invalid EAT offset")?;
    Ok(now_utc.with_timezone(&eat).date_naive())
}
