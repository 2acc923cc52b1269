use crate::domain::record::ClientRecord;
use crate::ingest::types::RawClientRow;
use anyhow::Context;
use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;

/// Load, validate and score the whole debts CSV. Any malformed row aborts the
/// load; there is no partial ingest.
pub fn load_records(path: &Path, as_of_date: NaiveDate) -> anyhow::Result<Vec<ClientRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    load_records_from_reader(file, as_of_date)
        .with_context(|| format!("failed to load {}", path.display()))
}

pub fn load_records_from_reader<R: Read>(
    reader: R,
    as_of_date: NaiveDate,
) -> anyhow::Result<Vec<ClientRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let mut out = Vec::new();
    for (idx, row) in rdr.deserialize::<RawClientRow>().enumerate() {
        // Header row is consumed by the reader; idx 0 is the first data row.
        let row = row.with_context(|| format!("row {}: malformed CSV record", idx + 1))?;
        let record = row
            .validate_and_into_record(as_of_date)
            .with_context(|| format!("row {}: invalid debt record", idx + 1))?;
        out.push(record);
    }

    anyhow::ensure!(!out.is_empty(), "CSV contains no debt records");
    Ok(out)
}
