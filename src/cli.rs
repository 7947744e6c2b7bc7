use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use weather_harvest::DateRange;

/// Batch-download daily weather history for every trial location in the
/// input table and archive one CSV per location.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// OAuth2 token endpoint for the client-credentials grant.
    #[clap(long, env = "AUTH_TOKEN_URL")]
    pub token_url: String,

    /// OAuth2 client id.
    #[clap(long, env = "WEATHER_CLIENT_ID")]
    pub client_id: String,

    /// OAuth2 client secret.
    #[clap(long, env = "WEATHER_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: String,

    /// Base URL of the weather API.
    #[clap(long, env = "WEATHER_API_URL", default_value = "https://api.weather.com/v3")]
    pub api_url: String,

    /// Unit system to request ("m" is metric).
    #[clap(long, default_value = "m")]
    pub units: String,

    /// Upstream grid set to query.
    #[clap(long, default_value = "TWC")]
    pub data_source: String,

    /// Bucket holding the input location table.
    #[clap(long, env = "LOCATIONS_BUCKET")]
    pub locations_bucket: String,

    /// Key of the input location table (CSV with trial_id, latitude, longitude).
    #[clap(long, env = "LOCATIONS_KEY")]
    pub locations_key: String,

    /// Bucket that receives the output artifacts.
    #[clap(long, env = "OUTPUT_BUCKET")]
    pub output_bucket: String,

    /// Key prefix for the output artifacts.
    #[clap(long, env = "OUTPUT_PREFIX", default_value = "")]
    pub output_prefix: String,

    /// Local directory artifacts are staged in before upload.
    #[clap(long, default_value = "query_results")]
    pub staging_dir: PathBuf,

    /// First year of the requested window.
    #[clap(long)]
    pub start_year: i32,

    /// Last year of the requested window.
    #[clap(long)]
    pub stop_year: i32,

    /// Month and day (MM-DD) the window opens on.
    #[clap(long, default_value = "01-01")]
    pub start_day: String,

    /// Month and day (MM-DD) the window closes on.
    #[clap(long, default_value = "12-31")]
    pub stop_day: String,

    /// Per-request timeout in seconds.
    #[clap(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Log at debug level.
    #[clap(long, short)]
    pub verbose: bool,
}

impl Cli {
    /// Assembles the harvest window from the year flags and the optional
    /// month-day bounds.
    pub fn date_range(&self) -> anyhow::Result<DateRange> {
        let start = parse_bound(self.start_year, &self.start_day)
            .with_context(|| format!("Invalid start bound {}-{}", self.start_year, self.start_day))?;
        let stop = parse_bound(self.stop_year, &self.stop_day)
            .with_context(|| format!("Invalid stop bound {}-{}", self.stop_year, self.stop_day))?;
        Ok(DateRange::new(start, stop))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_bound(year: i32, month_day: &str) -> anyhow::Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(&format!("{}-{}", year, month_day), "%Y-%m-%d")?;
    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_args() -> Vec<&'static str> {
        vec![
            "weather-harvest",
            "--token-url",
            "https://auth.example.com/as/token.oauth2",
            "--client-id",
            "my-project",
            "--client-secret",
            "hunter2",
            "--locations-bucket",
            "trial-data",
            "--locations-key",
            "locations/sites.csv",
            "--output-bucket",
            "weather-archive",
            "--start-year",
            "2001",
            "--stop-year",
            "2009",
        ]
    }

    #[test]
    fn defaults_fill_in_the_window_bounds() {
        let cli = Cli::parse_from(minimal_args());
        let range = cli.date_range().unwrap();

        assert_eq!(range.start(), NaiveDate::from_ymd_opt(2001, 1, 1).unwrap());
        assert_eq!(range.stop(), NaiveDate::from_ymd_opt(2009, 12, 31).unwrap());
        assert_eq!(cli.units, "m");
        assert_eq!(cli.data_source, "TWC");
        assert_eq!(cli.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn explicit_month_day_bounds_override_the_defaults() {
        let mut args = minimal_args();
        args.extend(["--start-day", "03-15", "--stop-day", "10-01"]);
        let cli = Cli::parse_from(args);
        let range = cli.date_range().unwrap();

        assert_eq!(range.start(), NaiveDate::from_ymd_opt(2001, 3, 15).unwrap());
        assert_eq!(range.stop(), NaiveDate::from_ymd_opt(2009, 10, 1).unwrap());
    }

    #[test]
    fn nonsense_month_day_bounds_are_rejected() {
        let mut args = minimal_args();
        args.extend(["--start-day", "13-40"]);
        let cli = Cli::parse_from(args);
        assert!(cli.date_range().is_err());
    }
}
