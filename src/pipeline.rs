//! The batch orchestrator: drives the interval paginator over every trial
//! location, serializes each completed dataset into a named artifact, and
//! isolates per-location failures so one bad trial never sinks the batch.

use crate::error::HarvestError;
use crate::storage::artifact::{artifact_name, dataset_to_csv, stage_locally};
use crate::storage::object_store::ObjectStore;
use crate::types::date_range::DateRange;
use crate::types::location::LocationRecord;
use crate::weather_api::client::DailyHistorySource;
use crate::weather_api::paginator::fetch_daily_range;
use bon::bon;
use log::{debug, error, info};
use std::path::PathBuf;
use std::sync::Arc;

/// Where artifacts go: the local staging directory plus the remote bucket and
/// key prefix.
#[derive(Debug, Clone)]
pub struct ArtifactLayout {
    output_bucket: String,
    key_prefix: String,
    staging_dir: PathBuf,
}

impl ArtifactLayout {
    pub fn new(
        output_bucket: impl Into<String>,
        key_prefix: impl Into<String>,
        staging_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            output_bucket: output_bucket.into(),
            key_prefix: key_prefix.into(),
            staging_dir: staging_dir.into(),
        }
    }

    /// Remote key for an artifact name: `<prefix><name>`, inserting a `/`
    /// when the prefix does not already end with one.
    pub fn object_key(&self, name: &str) -> String {
        if self.key_prefix.is_empty() {
            name.to_string()
        } else if self.key_prefix.ends_with('/') {
            format!("{}{}", self.key_prefix, name)
        } else {
            format!("{}/{}", self.key_prefix, name)
        }
    }
}

/// Outcome of one location in the batch, in input order.
#[derive(Debug)]
pub enum LocationOutcome {
    /// The artifact was staged locally and uploaded.
    Stored {
        index: usize,
        trial_id: String,
        key: String,
        days: usize,
    },
    /// Something failed for this location; the batch moved on.
    Failed {
        index: usize,
        trial_id: String,
        error: HarvestError,
    },
}

impl LocationOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, LocationOutcome::Failed { .. })
    }
}

/// The batch pipeline: one paginated fetch and one stored artifact per trial
/// location.
///
/// Both collaborators are injected at construction and shared read-only for
/// the whole run: the history source already carries its authorization, and
/// the store owns the connection to the bucket. Locations are processed
/// strictly one at a time, in input order.
///
/// # Examples
///
/// ```no_run
/// # use std::sync::Arc;
/// # use std::time::Duration;
/// # use chrono::NaiveDate;
/// # use weather_harvest::{
/// #     build_authorized_client, AccessToken, ArtifactLayout, DateRange, Harvester,
/// #     HistoryClient, S3ObjectStore,
/// # };
/// # async fn run(token: AccessToken) -> anyhow::Result<()> {
/// let http = build_authorized_client(&token, Duration::from_secs(30))?;
/// let harvester = Harvester::builder()
///     .source(Arc::new(HistoryClient::new(
///         http,
///         "https://api.weather.com/v3",
///         "m",
///         "TWC",
///     )))
///     .store(Arc::new(S3ObjectStore::from_env().await))
///     .layout(ArtifactLayout::new("weather-archive", "daily/", "query_results"))
///     .build();
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2001, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2009, 12, 31).unwrap(),
/// );
/// let outcomes = harvester.run(&[], range).await;
/// assert!(outcomes.is_empty());
/// # Ok(())
/// # }
/// ```
pub struct Harvester {
    source: Arc<dyn DailyHistorySource>,
    store: Arc<dyn ObjectStore>,
    layout: ArtifactLayout,
}

#[bon]
impl Harvester {
    #[builder]
    pub fn new(
        source: Arc<dyn DailyHistorySource>,
        store: Arc<dyn ObjectStore>,
        layout: ArtifactLayout,
    ) -> Self {
        Self {
            source,
            store,
            layout,
        }
    }

    /// Runs the whole batch: every location, one at a time, in input order.
    ///
    /// Never aborts early. A location that fails in any step (pagination,
    /// serialization, staging, upload) is recorded as
    /// [`LocationOutcome::Failed`] with its 0-based index and the loop moves
    /// on; siblings are unaffected. The returned vector holds exactly one
    /// outcome per input location.
    pub async fn run(
        &self,
        locations: &[LocationRecord],
        range: DateRange,
    ) -> Vec<LocationOutcome> {
        info!(
            "Starting batch of {} locations over {}",
            locations.len(),
            range
        );
        let mut outcomes = Vec::with_capacity(locations.len());

        for (index, location) in locations.iter().enumerate() {
            match self.harvest_one(location, range).await {
                Ok((key, days)) => {
                    info!(
                        "Stored {} days for trial {} at {}",
                        days, location.trial_id, key
                    );
                    outcomes.push(LocationOutcome::Stored {
                        index,
                        trial_id: location.trial_id.clone(),
                        key,
                        days,
                    });
                }
                Err(e) => {
                    error!(
                        "Location {} (trial {}) failed: {}",
                        index, location.trial_id, e
                    );
                    outcomes.push(LocationOutcome::Failed {
                        index,
                        trial_id: location.trial_id.clone(),
                        error: e,
                    });
                }
            }
        }

        let failed = outcomes.iter().filter(|o| o.is_failure()).count();
        info!(
            "Batch finished: {} stored, {} failed",
            outcomes.len() - failed,
            failed
        );
        outcomes
    }

    /// Fetches, serializes, stages and uploads one location's dataset.
    async fn harvest_one(
        &self,
        location: &LocationRecord,
        range: DateRange,
    ) -> Result<(String, usize), HarvestError> {
        let dataset = fetch_daily_range(self.source.as_ref(), location.lat_lon(), range).await?;

        let name = artifact_name(&range, &location.trial_id);
        let bytes = dataset_to_csv(&name, &dataset)?;

        let staged = stage_locally(&self.layout.staging_dir, &name, bytes.clone()).await?;
        debug!("Staged {} at {}", name, staged.display());

        let key = self.layout.object_key(&name);
        self.store
            .upload(&self.layout.output_bucket, &key, bytes)
            .await?;

        Ok((key, dataset.len()))
    }
}
