use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use plant_dashboard_model::{NewReading, SensorReading};

/// The response of the fetch endpoint (`GET /api/plants/{email}`).
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ReadingsResponse {
    pub success: bool,

    #[serde(default)]
    pub readings: Vec<SensorReading>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The response of the submit endpoint (`POST /api/plants`).
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SubmitResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading: Option<SensorReading>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Error, Debug)]
pub enum ReadingError {
    /// The API answered structurally but flagged the request as failed.
    #[error("API error: {message}")]
    Api { message: String },

    /// The request never produced a structurally valid response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ReadingError {
    pub(crate) fn api(message: Option<String>) -> Self {
        Self::Api {
            message: message.unwrap_or_else(|| "no message".into()),
        }
    }
}

pub type ReadingControllerPointer = Box<dyn ReadingController + Send>;
pub type ReadingControllerSharedPointer = Arc<Mutex<ReadingControllerPointer>>;

/// The reading controller trait that provides sensor readings for a user.
pub trait ReadingController {
    /// Fetches all readings belonging to `email`.
    fn fetch_readings(&self, email: &str) -> Result<Vec<SensorReading>, ReadingError>;

    /// Submits a new reading and returns the record as stored by the server.
    fn submit_reading(&self, reading: &NewReading) -> Result<SensorReading, ReadingError>;
}
