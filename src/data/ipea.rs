//! Ipeadata OData API integration for the monthly macro series.

use std::time::Duration;

use chrono::{DateTime, Datelike, NaiveDate};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::{AnalysisConfig, Indicator, Series};
use crate::error::AppError;

const DEFAULT_BASE_URL: &str = "http://www.ipeadata.gov.br/api/odata4";
const BASE_URL_ENV: &str = "IPEADATA_BASE_URL";

/// The three normalized input series of one run.
#[derive(Debug, Clone)]
pub struct SourceData {
    pub price: Series,
    pub unemployment: Series,
    pub expectations: Series,
}

impl SourceData {
    pub fn get(&self, indicator: Indicator) -> &Series {
        match indicator {
            Indicator::PriceIndex => &self.price,
            Indicator::Unemployment => &self.unemployment,
            Indicator::Expectations => &self.expectations,
        }
    }
}

/// One row as returned by the API, before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawObservation {
    #[serde(rename = "SERCODIGO", default)]
    pub code: String,
    #[serde(rename = "VALDATA")]
    pub raw_date: String,
    #[serde(rename = "VALVALOR")]
    pub value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ValuesResponse {
    value: Vec<RawObservation>,
}

pub struct IpeaClient {
    client: Client,
    base_url: String,
}

impl IpeaClient {
    /// Build a client, honouring `IPEADATA_BASE_URL` from the environment or `.env`.
    pub fn from_env(timeout: Duration) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url, timeout)
    }

    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch and normalize all three inputs for `config`.
    pub fn fetch_all(&self, config: &AnalysisConfig) -> Result<SourceData, AppError> {
        let fetch = |indicator: Indicator| -> Result<Series, AppError> {
            let min_year = config.min_year(indicator)?;
            self.fetch_series(indicator, min_year)
        };

        Ok(SourceData {
            price: fetch(Indicator::PriceIndex)?,
            unemployment: fetch(Indicator::Unemployment)?,
            expectations: fetch(Indicator::Expectations)?,
        })
    }

    /// Fetch `indicator` for every year strictly after `min_year`, ascending by date.
    pub fn fetch_series(&self, indicator: Indicator, min_year: i32) -> Result<Series, AppError> {
        let series_id = indicator.series_id();
        let raw = self.fetch_raw(series_id, min_year)?;
        let series = normalize(indicator, raw, min_year)?;
        log::info!(
            "fetched {series_id} ({}): {} observations after {min_year}",
            indicator.label(),
            series.len()
        );
        Ok(series)
    }

    fn fetch_raw(&self, series_id: &str, min_year: i32) -> Result<Vec<RawObservation>, AppError> {
        // Built by hand: OData expects `$filter` and `%20`, not form encoding.
        let url = format!(
            "{}/ValoresSerie(SERCODIGO='{series_id}')?$filter=year(VALDATA)%20gt%20{min_year}",
            self.base_url
        );
        log::debug!("GET {url}");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| AppError::acquisition(series_id, format!("request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::acquisition(
                series_id,
                format!("request failed with status {}", resp.status()),
            ));
        }

        let body: ValuesResponse = resp
            .json()
            .map_err(|e| AppError::acquisition(series_id, format!("failed to parse response: {e}")))?;

        Ok(body.value)
    }
}

/// Turn raw rows into an ascending `(date, value)` series.
///
/// Rows without a value are skipped, the year filter is re-applied locally,
/// and duplicate dates are rejected.
pub fn normalize(indicator: Indicator, raw: Vec<RawObservation>, min_year: i32) -> Result<Series, AppError> {
    let series_id = indicator.series_id();
    let mut skipped = 0usize;
    let mut points = Vec::with_capacity(raw.len());

    for obs in raw {
        if !obs.code.is_empty() && obs.code != series_id {
            return Err(AppError::acquisition(
                series_id,
                format!("response contains rows for {}", obs.code),
            ));
        }
        let date = parse_date(&obs.raw_date).ok_or_else(|| {
            AppError::acquisition(series_id, format!("invalid date '{}'", obs.raw_date))
        })?;
        if date.year() <= min_year {
            continue;
        }
        match obs.value.filter(|v| v.is_finite()) {
            Some(value) => points.push((date, value)),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        log::warn!("{series_id}: skipped {skipped} observations without a value");
    }

    points.sort_by_key(|(d, _)| *d);
    if let Some(pair) = points.windows(2).find(|w| w[0].0 == w[1].0) {
        return Err(AppError::acquisition(
            series_id,
            format!("duplicate observation for {}", pair[0].0),
        ));
    }

    Ok(Series::new(indicator.label(), points))
}

/// Parse the API's timestamp (`2012-11-01T00:00:00-02:00`) to its local date.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(trimmed.get(..10)?, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "@odata.context": "http://www.ipeadata.gov.br/api/odata4/$metadata#ValoresSerie",
        "value": [
            {"SERCODIGO": "PNADC12_TDESOC12", "VALDATA": "2012-12-01T00:00:00-02:00", "VALVALOR": 6.9, "NIVNOME": "", "TERCODIGO": ""},
            {"SERCODIGO": "PNADC12_TDESOC12", "VALDATA": "2012-11-01T00:00:00-02:00", "VALVALOR": 7.0, "NIVNOME": "", "TERCODIGO": ""},
            {"SERCODIGO": "PNADC12_TDESOC12", "VALDATA": "2013-01-01T00:00:00-02:00", "VALVALOR": null, "NIVNOME": "", "TERCODIGO": ""},
            {"SERCODIGO": "PNADC12_TDESOC12", "VALDATA": "2011-06-01T00:00:00-03:00", "VALVALOR": 6.2, "NIVNOME": "", "TERCODIGO": ""}
        ]
    }"#;

    fn d(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    #[test]
    fn normalizes_recorded_payload() {
        let body: ValuesResponse = serde_json::from_str(PAYLOAD).unwrap();
        let series = normalize(Indicator::Unemployment, body.value, 2011).unwrap();

        // 2011 row is filtered locally, the null row is skipped, order is ascending.
        assert_eq!(series.points, vec![(d(2012, 11), 7.0), (d(2012, 12), 6.9)]);
        assert_eq!(series.name, "unemployment");
    }

    #[test]
    fn parses_offset_timestamps_to_local_date() {
        assert_eq!(parse_date("2012-11-01T00:00:00-02:00"), Some(d(2012, 11)));
        assert_eq!(parse_date("2023-12-01"), Some(d(2023, 12)));
        assert_eq!(parse_date("12/2023"), None);
    }

    #[test]
    fn duplicate_dates_are_an_acquisition_error() {
        let raw = vec![
            RawObservation {
                code: "BM12_IPCAEXP1212".into(),
                raw_date: "2020-01-01T00:00:00-03:00".into(),
                value: Some(4.0),
            },
            RawObservation {
                code: "BM12_IPCAEXP1212".into(),
                raw_date: "2020-01-01T00:00:00-03:00".into(),
                value: Some(4.1),
            },
        ];
        let err = normalize(Indicator::Expectations, raw, 2011).unwrap_err();
        assert!(err.to_string().contains("BM12_IPCAEXP1212"));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn unparsable_date_names_the_series() {
        let raw = vec![RawObservation {
            code: String::new(),
            raw_date: "garbage".into(),
            value: Some(1.0),
        }];
        let err = normalize(Indicator::PriceIndex, raw, 2010).unwrap_err();
        assert!(matches!(err, AppError::Acquisition { ref series_id, .. } if series_id == "PRECOS12_IPCA12"));
    }

    #[test]
    fn unreachable_source_reports_the_identifier() {
        let client = IpeaClient::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        let err = client.fetch_series(Indicator::Expectations, 2011).unwrap_err();
        assert!(matches!(err, AppError::Acquisition { ref series_id, .. } if series_id == "BM12_IPCAEXP1212"));
    }
}
