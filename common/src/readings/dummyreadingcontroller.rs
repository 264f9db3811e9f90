use serde::Deserialize;

use plant_dashboard_model::{NewReading, SensorReading};

use crate::readings::readingcontroller::{ReadingController, ReadingError};

/// Reading controller backed by an embedded fixture. Used when no API URL is
/// configured, and as the scripted collaborator in tests.
#[derive(Deserialize, Default)]
pub struct DummyReadingController {
    readings: Vec<SensorReading>,
}

impl DummyReadingController {
    pub fn new() -> Result<Self, serde_json::Error> {
        let json_data = std::include_str!("./dummyreadings.json");

        serde_json::from_str::<Self>(json_data)
    }
}

impl ReadingController for DummyReadingController {
    fn fetch_readings(&self, email: &str) -> Result<Vec<SensorReading>, ReadingError> {
        log::debug!("Serving fixture readings for {email}");
        Ok(self.readings.clone())
    }

    fn submit_reading(&self, reading: &NewReading) -> Result<SensorReading, ReadingError> {
        Ok(SensorReading {
            light: reading.light,
            temperature: reading.temperature,
            soil_moisture: reading.soil_moisture,
            humidity: reading.humidity,
            timestamp: chrono::Utc::now(),
        })
    }
}

#[test]
fn test_dummy_reading_controller() {
    let controller = DummyReadingController::new().unwrap();
    let readings = controller.fetch_readings("plant@example.com").unwrap();

    assert_eq!(readings.len(), 3);

    let submitted = controller
        .submit_reading(&NewReading::sample("plant@example.com"))
        .unwrap();
    assert_eq!(submitted.light, 700.0);
}
