use crate::locations::error::LocationError;
use crate::types::location::LocationRecord;
use log::info;

/// Parses the input location table (CSV bytes with a header row) into the
/// ordered list of trial locations to process.
///
/// Column order does not matter and extra columns are ignored; `trial_id`,
/// `latitude` and `longitude` must be present. The row order of the table is
/// the processing order of the batch.
pub fn parse_locations(bytes: &[u8]) -> Result<Vec<LocationRecord>, LocationError> {
    let mut reader = csv::Reader::from_reader(bytes);
    let records = reader
        .deserialize::<LocationRecord>()
        .collect::<Result<Vec<_>, _>>()?;
    info!("Loaded {} trial locations", records.len());
    Ok(records)
}
