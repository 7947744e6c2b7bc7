use crate::storage::error::PersistError;
use crate::types::date_range::DateRange;
use crate::types::observation::LocationDataset;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::task;

/// Builds the output artifact name for one location.
///
/// The pattern `weather<startYear>_<stopYear>_daily_<trialId>.csv` is what
/// downstream consumers key on, so its shape must not change.
pub fn artifact_name(range: &DateRange, trial_id: &str) -> String {
    format!(
        "weather{}_{}_daily_{}.csv",
        range.start_year(),
        range.stop_year(),
        trial_id
    )
}

/// Serializes a dataset to CSV bytes: a header row plus one row per day.
///
/// Serialization is deterministic, so re-running a batch over identical
/// upstream responses reproduces byte-identical artifacts.
pub fn dataset_to_csv(name: &str, dataset: &LocationDataset) -> Result<Vec<u8>, PersistError> {
    let mut buffer = Vec::new();
    let mut writer = csv::Writer::from_writer(&mut buffer);
    for observation in dataset.observations() {
        writer
            .serialize(observation)
            .map_err(|e| PersistError::CsvSerialize(name.to_string(), e))?;
    }
    writer
        .flush()
        .map_err(|e| PersistError::CsvFlush(name.to_string(), e))?;
    drop(writer);
    Ok(buffer)
}

/// Stages artifact bytes to `<dir>/<name>` through a temporary file that is
/// renamed into place, so an interrupted write never leaves a partial
/// artifact under the final name.
pub async fn stage_locally(
    dir: &Path,
    name: &str,
    bytes: Vec<u8>,
) -> Result<PathBuf, PersistError> {
    let dir = dir.to_path_buf();
    let final_path = dir.join(name);

    task::spawn_blocking(move || {
        std::fs::create_dir_all(&dir).map_err(|e| PersistError::StagingIo(dir.clone(), e))?;
        let mut temp_file =
            NamedTempFile::new_in(&dir).map_err(|e| PersistError::StagingIo(dir.clone(), e))?;
        temp_file
            .write_all(&bytes)
            .map_err(|e| PersistError::StagingIo(final_path.clone(), e))?;
        temp_file
            .flush()
            .map_err(|e| PersistError::StagingIo(final_path.clone(), e))?;
        temp_file
            .persist(&final_path)
            .map_err(|e| PersistError::StagingPersist(final_path.clone(), e.error))?;
        Ok(final_path)
    })
    .await?
}
