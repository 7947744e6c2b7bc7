use crate::types::date_range::DateRange;
use crate::types::location::LatLon;
use crate::types::observation::LocationDataset;
use crate::weather_api::client::DailyHistorySource;
use crate::weather_api::error::QueryError;
use chrono::Days;
use log::{debug, warn};

/// Stitches bounded daily-history pages into one continuous dataset.
///
/// Walks a cursor from `range.start()` towards `range.stop()`, requesting the
/// remaining window on every iteration and advancing the cursor to the day
/// after the coverage end each page reports. Termination is guaranteed: the
/// cursor strictly increases, and a page whose reported coverage lies before
/// the cursor fails with [`QueryError::PaginationStalled`] instead of looping.
///
/// An empty range (stop at or before start) returns an empty dataset without
/// issuing a single request. Any transport or parse failure aborts this
/// location immediately; no partial dataset is returned.
pub async fn fetch_daily_range(
    source: &dyn DailyHistorySource,
    point: LatLon,
    range: DateRange,
) -> Result<LocationDataset, QueryError> {
    let mut dataset = LocationDataset::new();
    let mut cursor = range.start();

    while cursor < range.stop() {
        let page = source.fetch_page(point, cursor, range.stop()).await?;

        if page.coverage_end < cursor {
            return Err(QueryError::PaginationStalled {
                cursor,
                coverage_end: page.coverage_end,
            });
        }
        if page.observations.is_empty() {
            warn!(
                "Empty daily-history page for {} covering {} to {}",
                point, cursor, page.coverage_end
            );
        } else {
            debug!(
                "Got {} observations for {} covering {} to {}",
                page.observations.len(),
                point,
                cursor,
                page.coverage_end
            );
        }

        dataset.append_page(page.observations);
        cursor = page
            .coverage_end
            .checked_add_days(Days::new(1))
            .ok_or(QueryError::CoverageOverflow(page.coverage_end))?;
    }

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::observation::DailyObservation;
    use crate::weather_api::response::HistoryPage;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn observation(day: NaiveDate) -> DailyObservation {
        DailyObservation {
            date: day,
            max_temperature: Some(10.0),
            total_precipitation: Some(0.0),
            avg_wind_speed: Some(14.0),
            avg_relative_humidity: Some(80.0),
            data_source: "TWC".to_string(),
        }
    }

    fn page(first: NaiveDate, last: NaiveDate) -> HistoryPage {
        let mut observations = Vec::new();
        let mut day = first;
        while day <= last {
            observations.push(observation(day));
            day = day.succ_opt().unwrap();
        }
        HistoryPage {
            observations,
            coverage_end: last,
        }
    }

    /// Serves a scripted sequence of pages and records each requested window.
    struct ScriptedSource {
        pages: Mutex<VecDeque<Result<HistoryPage, QueryError>>>,
        requests: Mutex<Vec<(NaiveDate, NaiveDate)>>,
    }

    impl ScriptedSource {
        fn new(pages: Vec<Result<HistoryPage, QueryError>>) -> Self {
            Self {
                pages: Mutex::new(pages.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<(NaiveDate, NaiveDate)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DailyHistorySource for ScriptedSource {
        async fn fetch_page(
            &self,
            _point: LatLon,
            from: NaiveDate,
            to: NaiveDate,
        ) -> Result<HistoryPage, QueryError> {
            self.requests.lock().unwrap().push((from, to));
            self.pages
                .lock()
                .unwrap()
                .pop_front()
                .expect("paginator requested more pages than scripted")
        }
    }

    fn assert_contiguous(dataset: &LocationDataset, first: NaiveDate, last: NaiveDate) {
        let dates: Vec<NaiveDate> = dataset
            .observations()
            .iter()
            .map(|obs| obs.date)
            .collect();
        assert_eq!(dates.first(), Some(&first), "dataset starts at {}", first);
        assert_eq!(dates.last(), Some(&last), "dataset ends at {}", last);
        for pair in dates.windows(2) {
            assert_eq!(
                pair[1],
                pair[0].succ_opt().unwrap(),
                "gap or duplicate between {} and {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[tokio::test]
    async fn single_page_covers_the_whole_range() -> Result<(), QueryError> {
        let source = ScriptedSource::new(vec![Ok(page(date(2001, 1, 1), date(2001, 1, 10)))]);
        let range = DateRange::new(date(2001, 1, 1), date(2001, 1, 10));

        let dataset = fetch_daily_range(&source, LatLon(51.97, 5.67), range).await?;

        assert_contiguous(&dataset, date(2001, 1, 1), date(2001, 1, 10));
        assert_eq!(source.requests(), vec![(date(2001, 1, 1), date(2001, 1, 10))]);
        Ok(())
    }

    #[tokio::test]
    async fn cursor_advances_past_each_reported_coverage_end() -> Result<(), QueryError> {
        // Second page restates the boundary day the first one ended on, the
        // way a sloppy upstream would; the accumulator must not keep it twice.
        let source = ScriptedSource::new(vec![
            Ok(page(date(2001, 1, 1), date(2001, 1, 4))),
            Ok(page(date(2001, 1, 4), date(2001, 1, 10))),
        ]);
        let range = DateRange::new(date(2001, 1, 1), date(2001, 1, 10));

        let dataset = fetch_daily_range(&source, LatLon(51.97, 5.67), range).await?;

        assert_contiguous(&dataset, date(2001, 1, 1), date(2001, 1, 10));
        assert_eq!(dataset.len(), 10);
        assert_eq!(
            source.requests(),
            vec![
                (date(2001, 1, 1), date(2001, 1, 10)),
                (date(2001, 1, 5), date(2001, 1, 10)),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn empty_range_issues_zero_requests() -> Result<(), QueryError> {
        let source = ScriptedSource::new(Vec::new());
        let day = date(2005, 6, 15);

        let dataset =
            fetch_daily_range(&source, LatLon(51.97, 5.67), DateRange::new(day, day)).await?;
        assert!(dataset.is_empty());

        let inverted = DateRange::new(day, date(2005, 6, 1));
        let dataset = fetch_daily_range(&source, LatLon(51.97, 5.67), inverted).await?;
        assert!(dataset.is_empty());

        assert!(source.requests().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn stale_coverage_end_fails_instead_of_looping() {
        let stale = HistoryPage {
            observations: Vec::new(),
            coverage_end: date(2005, 5, 31),
        };
        let source = ScriptedSource::new(vec![Ok(stale)]);
        let range = DateRange::new(date(2005, 6, 1), date(2005, 6, 30));

        let result = fetch_daily_range(&source, LatLon(51.97, 5.67), range).await;

        assert!(matches!(
            result,
            Err(QueryError::PaginationStalled { cursor, coverage_end })
                if cursor == date(2005, 6, 1) && coverage_end == date(2005, 5, 31)
        ));
        assert_eq!(source.requests().len(), 1);
    }

    #[tokio::test]
    async fn empty_page_with_advancing_coverage_keeps_going() -> Result<(), QueryError> {
        // Upstream has nothing for the first day but still reports coverage,
        // so the paginator moves on instead of failing.
        let gap = HistoryPage {
            observations: Vec::new(),
            coverage_end: date(2001, 3, 1),
        };
        let source = ScriptedSource::new(vec![
            Ok(gap),
            Ok(page(date(2001, 3, 2), date(2001, 3, 4))),
        ]);
        let range = DateRange::new(date(2001, 3, 1), date(2001, 3, 4));

        let dataset = fetch_daily_range(&source, LatLon(51.97, 5.67), range).await?;

        assert_contiguous(&dataset, date(2001, 3, 2), date(2001, 3, 4));
        assert_eq!(
            source.requests(),
            vec![
                (date(2001, 3, 1), date(2001, 3, 4)),
                (date(2001, 3, 2), date(2001, 3, 4)),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn coverage_equal_to_cursor_still_advances() -> Result<(), QueryError> {
        // One day of coverage per page is slow but legal; three pages walk a
        // three-day range.
        let source = ScriptedSource::new(vec![
            Ok(page(date(2001, 1, 1), date(2001, 1, 1))),
            Ok(page(date(2001, 1, 2), date(2001, 1, 2))),
            Ok(page(date(2001, 1, 3), date(2001, 1, 3))),
        ]);
        let range = DateRange::new(date(2001, 1, 1), date(2001, 1, 4));

        let dataset = fetch_daily_range(&source, LatLon(51.97, 5.67), range).await?;

        assert_contiguous(&dataset, date(2001, 1, 1), date(2001, 1, 3));
        assert_eq!(source.requests().len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn transport_failure_aborts_the_location() {
        let parse_error = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let source = ScriptedSource::new(vec![Err(QueryError::ResponseParse {
            geocode: "51.97,5.67".to_string(),
            source: parse_error,
        })]);
        let range = DateRange::new(date(2001, 1, 1), date(2001, 12, 31));

        let result = fetch_daily_range(&source, LatLon(51.97, 5.67), range).await;

        assert!(matches!(result, Err(QueryError::ResponseParse { .. })));
        assert_eq!(source.requests().len(), 1);
    }
}
