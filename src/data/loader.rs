use crate::data::bar::PriceBar;
use crate::error::ValidationError;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

//header names accepted for the close column
const CLOSE_HEADERS: [&str; 3] = ["Close/Last", "Close", "close"];

//one raw row; nasdaq exports ("Date,Close/Last,Volume,Open,High,Low") and
//plain lowercase ohlcv headers both map onto it
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(rename = "Date", alias = "date", alias = "timestamp")]
    date: String,
    #[serde(rename = "Close/Last", alias = "Close", alias = "close")]
    close: String,
    #[serde(rename = "Open", alias = "open", default)]
    open: Option<String>,
    #[serde(rename = "High", alias = "high", default)]
    high: Option<String>,
    #[serde(rename = "Low", alias = "low", default)]
    low: Option<String>,
    #[serde(rename = "Volume", alias = "volume", default)]
    volume: Option<String>,
}

//loads price bars from a csv file, keeping file order
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<PriceBar>> {
    let path = path.as_ref();
    let reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_path(path)
        .context(format!("Failed to open CSV file: {:?}", path))?;

    let bars = read_bars(reader)?;
    debug!(path = ?path, bars = bars.len(), "loaded price file");
    Ok(bars)
}

//loads price bars from any reader (used for in-memory data)
pub fn load_csv_from_reader<R: std::io::Read>(input: R) -> Result<Vec<PriceBar>> {
    let reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(input);
    read_bars(reader)
}

fn read_bars<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<PriceBar>> {
    let headers = reader.headers().context("Failed to read CSV header")?.clone();
    ensure_close_column(&headers)?;

    let mut bars = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let line = index + 2;
        let record: CsvRecord =
            result.context(format!("Failed to parse CSV record at line {}", line))?;

        let timestamp = parse_timestamp(&record.date).context(format!(
            "Failed to parse date '{}' at line {}",
            record.date, line
        ))?;

        let close = parse_price(&record.close)
            .context(format!("Failed to parse close at line {}", line))?;
        let open = parse_optional_price(record.open.as_deref(), close)
            .context(format!("Failed to parse open at line {}", line))?;
        let high = parse_optional_price(record.high.as_deref(), close.max(open))
            .context(format!("Failed to parse high at line {}", line))?;
        let low = parse_optional_price(record.low.as_deref(), close.min(open))
            .context(format!("Failed to parse low at line {}", line))?;
        let volume = match record.volume.as_deref() {
            Some(raw) if !raw.is_empty() => parse_volume(raw)
                .context(format!("Failed to parse volume at line {}", line))?,
            _ => 0,
        };

        let bar = PriceBar::new(timestamp, open, high, low, close, volume)
            .context(format!("Invalid bar at line {}", line))?;
        bars.push(bar);
    }

    if bars.is_empty() {
        warn!("price file contained a header but no bars");
    }

    Ok(bars)
}

fn ensure_close_column(headers: &StringRecord) -> Result<()> {
    if headers
        .iter()
        .any(|h| CLOSE_HEADERS.iter().any(|c| h.trim() == *c))
    {
        Ok(())
    } else {
        Err(ValidationError::missing_field(CLOSE_HEADERS[0], 0).into())
    }
}

//strips currency symbols and thousands separators ("$1,234.50" -> 1234.5)
pub fn parse_price(raw: &str) -> Result<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    cleaned
        .trim()
        .parse::<f64>()
        .map_err(|e| anyhow!("invalid price '{}': {}", raw, e))
}

fn parse_optional_price(raw: Option<&str>, fallback: f64) -> Result<f64> {
    match raw {
        Some(value) if !value.trim().is_empty() => parse_price(value),
        _ => Ok(fallback),
    }
}

//strips thousands separators and parses as an integer share count
pub fn parse_volume(raw: &str) -> Result<u64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    cleaned
        .parse::<u64>()
        .map_err(|e| anyhow!("invalid volume '{}': {}", raw, e))
}

//accepts MM/DD/YYYY, YYYY-MM-DD and rfc3339
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    for format in ["%m/%d/%Y", "%Y-%m-%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            let midnight = date
                .and_hms_opt(0, 0, 0)
                .ok_or_else(|| anyhow!("invalid time for date '{}'", raw))?;
            return Ok(midnight.and_utc());
        }
    }

    Err(anyhow!("unrecognized date format '{}'", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    const NASDAQ: &str = "Date,Close/Last,Volume,Open,High,Low
03/01/2024,$512.85,\"76,805,900\",$508.98,$513.29,$508.56
02/29/2024,$508.08,\"93,670,080\",$508.07,$509.74,$505.35
";

    #[test]
    fn parses_nasdaq_export_in_file_order() {
        let bars = load_csv_from_reader(NASDAQ.as_bytes()).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, 512.85);
        assert_eq!(bars[0].volume, 76_805_900);
        assert_eq!(bars[0].timestamp.day(), 1);
        assert_eq!(bars[1].timestamp.day(), 29);
        assert_eq!(bars[1].low, 505.35);
    }

    #[test]
    fn parses_lowercase_header_with_missing_optional_columns() {
        let data = "timestamp,close\n2024-01-02,100\n2024-01-03,101.5\n";
        let bars = load_csv_from_reader(data.as_bytes()).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].open, 101.5);
        assert_eq!(bars[1].volume, 0);
        assert_eq!(
            bars[0].timestamp,
            Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn missing_close_column_is_a_validation_error() {
        let data = "Date,Open\n01/02/2024,100\n";
        let err = load_csv_from_reader(data.as_bytes()).unwrap_err();
        let validation = err.downcast_ref::<ValidationError>().unwrap();
        assert!(matches!(
            validation,
            ValidationError::MissingField { field, .. } if field == "Close/Last"
        ));
    }

    #[test]
    fn price_and_volume_normalization() {
        assert_eq!(parse_price(" $1,234.50 ").unwrap(), 1234.5);
        assert_eq!(parse_volume("1,000,000").unwrap(), 1_000_000);
        assert!(parse_price("n/a").is_err());
        assert!(parse_volume("12.5").is_err());
    }

    #[test]
    fn timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("02/29/2024").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-02-29").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-02-29T00:00:00Z").unwrap(), expected);
        assert!(parse_timestamp("29.02.2024").is_err());
    }
}
