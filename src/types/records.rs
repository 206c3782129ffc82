//! Response record types serialized by the HTTP adapter.
//!
//! Field names (and serde renames) reproduce the JSON keys the API has
//! always emitted, so the structs double as the wire contract.

use chrono::NaiveDate;
use serde::Serialize;

/// One `{date, tobs}` pair from the precipitation listing.
///
/// `NaiveDate` serializes as `"YYYY-MM-DD"`, matching the stored date format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrecipitationRecord {
    /// Observation date.
    pub date: NaiveDate,
    /// Temperature observation for that reading.
    pub tobs: f64,
}

/// One temperature observation from the most-active-station listing.
///
/// The capitalized JSON keys (`Date`, `Station`, `Temperature`) are part of
/// the existing API surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TobsRecord {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Station")]
    pub station: String,
    /// Temperature observation truncated to a whole degree.
    #[serde(rename = "Temperature")]
    pub temperature: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precipitation_record_serializes_with_lowercase_keys() {
        let record = PrecipitationRecord {
            date: NaiveDate::from_ymd_opt(2017, 8, 22).unwrap(),
            tobs: 79.0,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "2017-08-22");
        assert_eq!(json["tobs"], 79.0);
    }

    #[test]
    fn tobs_record_serializes_with_capitalized_keys() {
        let record = TobsRecord {
            date: NaiveDate::from_ymd_opt(2017, 8, 23).unwrap(),
            station: "USC00519281".to_string(),
            temperature: 76,
        };
        let json = serde_json::to_string(&record).unwrap();
        // Key order is part of the historical output: Date, Station, Temperature.
        assert_eq!(
            json,
            r#"{"Date":"2017-08-23","Station":"USC00519281","Temperature":76}"#
        );
    }
}
