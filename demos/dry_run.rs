//! Runs the whole pipeline against a synthetic weather source and an
//! in-memory object store. No credentials, bucket or network needed:
//!
//! ```sh
//! cargo run --example dry_run
//! ```

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use weather_harvest::{
    ArtifactLayout, DailyHistorySource, DailyObservation, DateRange, Harvester, HistoryPage,
    LatLon, LocationOutcome, LocationRecord, ObjectStore, PersistError, QueryError,
};

/// Makes up plausible weather, serving at most 90 days per page so the
/// paginator has real work to do.
struct SyntheticWeather;

#[async_trait]
impl DailyHistorySource for SyntheticWeather {
    async fn fetch_page(
        &self,
        point: LatLon,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<HistoryPage, QueryError> {
        let coverage_end = (from + Days::new(89)).min(to);
        let mut observations = Vec::new();
        let mut day = from;
        while day <= coverage_end {
            observations.push(DailyObservation {
                date: day,
                max_temperature: Some(15.0 + point.0.sin() * 10.0),
                total_precipitation: Some(1.2),
                avg_wind_speed: Some(9.7),
                avg_relative_humidity: Some(71.0),
                data_source: "TWC".to_string(),
            });
            day = day + Days::new(1);
        }
        Ok(HistoryPage {
            observations,
            coverage_end,
        })
    }
}

#[derive(Default)]
struct MemoryStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn download(&self, _bucket: &str, key: &str) -> Result<Vec<u8>, PersistError> {
        Ok(self
            .objects
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .unwrap_or_default())
    }

    async fn upload(&self, bucket: &str, key: &str, bytes: Vec<u8>) -> Result<(), PersistError> {
        println!("uploaded s3://{}/{} ({} bytes)", bucket, key, bytes.len());
        self.objects.lock().unwrap().insert(key.to_string(), bytes);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let staging = tempfile::tempdir()?;

    let harvester = Harvester::builder()
        .source(Arc::new(SyntheticWeather))
        .store(Arc::new(MemoryStore::default()))
        .layout(ArtifactLayout::new(
            "demo-bucket",
            "daily/",
            staging.path(),
        ))
        .build();

    let locations = vec![
        LocationRecord {
            trial_id: "T001".to_string(),
            latitude: 51.97,
            longitude: 5.67,
        },
        LocationRecord {
            trial_id: "T002".to_string(),
            latitude: 45.52,
            longitude: -122.68,
        },
    ];
    let range = DateRange::new(
        NaiveDate::from_ymd_opt(2008, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2009, 12, 31).unwrap(),
    );

    for outcome in harvester.run(&locations, range).await {
        match outcome {
            LocationOutcome::Stored {
                trial_id,
                key,
                days,
                ..
            } => println!("{}: {} days -> {}", trial_id, days, key),
            LocationOutcome::Failed {
                trial_id, error, ..
            } => println!("{}: failed: {}", trial_id, error),
        }
    }

    Ok(())
}
