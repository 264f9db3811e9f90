use plant_dashboard_model::{NewReading, SensorReading};

use crate::readings::readingcontroller::{
    ReadingController, ReadingError, ReadingsResponse, SubmitResponse,
};

/// Reading controller talking to the remote plants API.
///
/// Uses a blocking client; callers that must not stall (the UI thread) run
/// the calls on a worker thread and collect the outcome via
/// [`ValueStore`](crate::ValueStore).
pub struct ApiReadingController {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl ApiReadingController {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            base_url,
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl ReadingController for ApiReadingController {
    fn fetch_readings(&self, email: &str) -> Result<Vec<SensorReading>, ReadingError> {
        let url = format!("{}/api/plants/{}", self.base_url, email);
        let response: ReadingsResponse = self.client.get(&url).send()?.json()?;
        log::debug!("Fetch response from {url}: {response:?}");

        if response.success {
            Ok(response.readings)
        } else {
            Err(ReadingError::api(response.message))
        }
    }

    fn submit_reading(&self, reading: &NewReading) -> Result<SensorReading, ReadingError> {
        let url = format!("{}/api/plants", self.base_url);
        let response: SubmitResponse = self.client.post(&url).json(reading).send()?.json()?;
        log::debug!("Submit response from {url}: {response:?}");

        if !response.success {
            return Err(ReadingError::api(response.message));
        }

        response
            .reading
            .ok_or_else(|| ReadingError::api(Some("success response without a reading".into())))
    }
}

#[test]
fn test_base_url_normalization() {
    let controller = ApiReadingController::new("http://localhost:5001/");
    assert_eq!(controller.base_url, "http://localhost:5001");
}

#[test]
fn test_response_envelopes() {
    let failure: ReadingsResponse = serde_json::from_str(r#"{"success":false,"message":"db error"}"#).unwrap();
    assert!(!failure.success);
    assert!(failure.readings.is_empty());
    assert_eq!(failure.message.as_deref(), Some("db error"));

    let success: SubmitResponse = serde_json::from_str(
        r#"{"success":true,"reading":{"light":700,"temperature":23.5,"soilMoisture":40,"humidity":60,"timestamp":"2024-01-02T00:00:00Z"}}"#,
    )
    .unwrap();
    assert!(success.success);
    assert_eq!(success.reading.unwrap().light, 700.0);
}
