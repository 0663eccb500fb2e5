#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
pub use rsisim::data::PriceBar;

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

//one bar per day from the start date, in the given order
pub fn series_from_closes(closes: &[f64]) -> Vec<PriceBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| PriceBar::from_close(start() + Duration::days(i as i64), c))
        .collect()
}

//renders closes as a nasdaq export, newest row first
pub fn nasdaq_csv(closes_newest_first: &[f64]) -> String {
    let newest = start() + Duration::days(closes_newest_first.len() as i64);
    let mut out = String::from("Date,Close/Last,Volume,Open,High,Low\n");
    for (i, close) in closes_newest_first.iter().enumerate() {
        let date = newest - Duration::days(i as i64);
        out.push_str(&format!(
            "{},${:.2},\"1,000,000\",${:.2},${:.2},${:.2}\n",
            date.format("%m/%d/%Y"),
            close,
            close,
            close,
            close
        ));
    }
    out
}
