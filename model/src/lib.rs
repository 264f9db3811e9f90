//! Domain model for the plant dashboard.
//!
//! Holds the sensor reading types shared between the controllers and the UI,
//! and the ranking function that derives the "latest vs. history" view from a
//! reading collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One sample of environmental sensor values, as returned by the readings API.
///
/// Readings are immutable once received. A collection only ever grows by
/// appending new readings; consumers must re-rank by timestamp before use
/// because insertion order carries no meaning.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    pub light: f64,

    /// Temperature in °C.
    pub temperature: f64,

    /// Soil moisture in percent.
    pub soil_moisture: f64,

    /// Relative humidity in percent.
    pub humidity: f64,

    pub timestamp: DateTime<Utc>,
}

/// The body of a reading submission.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewReading {
    pub email: String,
    pub light: f64,
    pub temperature: f64,
    pub soil_moisture: f64,
    pub humidity: f64,
}

impl NewReading {
    /// The fixed demo payload posted by the dashboard's sample button.
    ///
    /// This is explicitly a demo action, not a real sensor integration.
    pub fn sample(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            light: 700.0,
            temperature: 23.5,
            soil_moisture: 40.0,
            humidity: 60.0,
        }
    }
}

/// The derived view of a reading collection: the most recent reading and the
/// remaining history in descending timestamp order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ranked {
    /// The reading with the maximum timestamp, if any.
    pub latest: Option<SensorReading>,

    /// All other readings, newest first.
    pub history: Vec<SensorReading>,
}

/// Ranks a reading collection by timestamp, newest first.
///
/// Pure function; callers recompute it whenever the collection changes rather
/// than caching the result. Readings with equal timestamps keep their original
/// arrival order (stable sort), which makes the result deterministic.
pub fn rank(readings: &[SensorReading]) -> Ranked {
    let mut sorted = readings.to_vec();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let mut iter = sorted.into_iter();
    Ranked {
        latest: iter.next(),
        history: iter.collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reading(day: u32, light: f64) -> SensorReading {
        SensorReading {
            light,
            temperature: 22.0,
            soil_moisture: 35.0,
            humidity: 55.0,
            timestamp: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn empty_collection_has_no_latest() {
        let ranked = rank(&[]);
        assert!(ranked.latest.is_none());
        assert!(ranked.history.is_empty());
    }

    #[test]
    fn latest_has_maximum_timestamp() {
        let readings = vec![reading(2, 100.0), reading(5, 200.0), reading(3, 300.0)];
        let ranked = rank(&readings);

        let latest = ranked.latest.unwrap();
        assert_eq!(latest.timestamp, reading(5, 0.0).timestamp);
        for older in &ranked.history {
            assert!(latest.timestamp >= older.timestamp);
        }
    }

    #[test]
    fn history_is_descending() {
        let readings = vec![reading(1, 0.0), reading(4, 0.0), reading(2, 0.0)];
        let ranked = rank(&readings);

        let days: Vec<u32> = ranked
            .history
            .iter()
            .map(|r| chrono::Datelike::day(&r.timestamp))
            .collect();
        assert_eq!(days, vec![2, 1]);
    }

    #[test]
    fn ranking_is_idempotent() {
        let readings = vec![reading(2, 100.0), reading(5, 200.0), reading(3, 300.0)];
        let once = rank(&readings);

        let mut flattened = Vec::new();
        flattened.extend(once.latest.clone());
        flattened.extend(once.history.clone());

        let twice = rank(&flattened);
        assert_eq!(once, twice);
    }

    #[test]
    fn equal_timestamps_keep_arrival_order() {
        let readings = vec![reading(1, 1.0), reading(1, 2.0), reading(1, 3.0)];
        let ranked = rank(&readings);

        assert_eq!(ranked.latest.unwrap().light, 1.0);
        let lights: Vec<f64> = ranked.history.iter().map(|r| r.light).collect();
        assert_eq!(lights, vec![2.0, 3.0]);
    }

    #[test]
    fn reading_parses_wire_format() {
        let reading: SensorReading = serde_json::from_str(
            r#"{"light":500,"temperature":22,"soilMoisture":35,"humidity":55,"timestamp":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(reading.light, 500.0);
        assert_eq!(reading.soil_moisture, 35.0);
        assert_eq!(
            reading.timestamp,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn sample_payload_serializes_camel_case() {
        let body = serde_json::to_value(NewReading::sample("user@example.com")).unwrap();
        assert_eq!(body["email"], "user@example.com");
        assert_eq!(body["light"], 700.0);
        assert_eq!(body["soilMoisture"], 40.0);
        assert_eq!(body["humidity"], 60.0);
    }
}
