//! The dashboard component, headless.
//!
//! Owns the session, the reading collection and the submission busy flag.
//! Network I/O is split-phase: `begin_*` hands the caller a request to run
//! (typically on a worker thread) and `complete_*`/`apply` feeds the outcome
//! back. That keeps the whole contract testable without a UI or a server, and
//! lets the UI layer decide where the blocking calls run.

use plant_dashboard_model::{rank, NewReading, Ranked, SensorReading};

use crate::readings::ReadingError;
use crate::session::{CredentialStore, Session, SessionError};

pub struct Dashboard {
    session: Option<Session>,
    readings: Vec<SensorReading>,
    fetch_issued: bool,
    posting: bool,
}

impl Dashboard {
    /// Activates the dashboard: reads the credential once from `store`.
    ///
    /// A missing credential is silent, a malformed one is logged; both leave
    /// the session inactive, so no fetch is ever issued and submission stays
    /// unavailable.
    pub fn new(store: &dyn CredentialStore) -> Self {
        let session = match Session::from_store(store) {
            Ok(session) => Some(session),
            Err(SessionError::CredentialMissing) => None,
            Err(e) => {
                log::error!("Cannot decode credential: {e}");
                None
            }
        };

        Self {
            session,
            readings: Vec::new(),
            fetch_issued: false,
            posting: false,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The identifier the initial fetch should run for.
    ///
    /// Returns `Some` exactly once per activation, and only while a session
    /// is active.
    pub fn begin_fetch(&mut self) -> Option<String> {
        if self.fetch_issued {
            return None;
        }

        let session = self.session.as_ref()?;
        self.fetch_issued = true;
        Some(session.email().to_string())
    }

    /// Applies the outcome of the initial fetch.
    ///
    /// On success the collection is replaced with the server's; on failure
    /// the diagnostic is logged and prior state is kept. Fetch failures are
    /// never surfaced to the user.
    pub fn complete_fetch(&mut self, outcome: Result<Vec<SensorReading>, ReadingError>) {
        match outcome {
            Ok(readings) => self.readings = readings,
            Err(e) => log::error!("Fetching readings failed: {e}"),
        }
    }

    /// Starts a sample submission.
    ///
    /// Returns the payload to send, or `None` (a no-op) when no session is
    /// active or a submission is already outstanding. The busy flag is set
    /// until [`complete_post`](Self::complete_post) runs, so rapid repeated
    /// activation produces exactly one request.
    pub fn begin_post(&mut self) -> Option<NewReading> {
        if self.posting {
            log::debug!("Submission already outstanding, ignoring");
            return None;
        }

        let session = self.session.as_ref()?;
        self.posting = true;
        Some(NewReading::sample(session.email()))
    }

    /// Applies the outcome of a submission and clears the busy flag.
    ///
    /// On success the server-returned reading is prepended, growing the
    /// collection by exactly one. On failure the error is handed back for the
    /// caller to surface as a blocking notification; the collection stays
    /// unchanged.
    pub fn complete_post(
        &mut self,
        outcome: Result<SensorReading, ReadingError>,
    ) -> Result<(), ReadingError> {
        self.posting = false;
        let reading = outcome?;
        self.readings.insert(0, reading);
        Ok(())
    }

    pub fn is_posting(&self) -> bool {
        self.posting
    }

    /// The derived latest/history view, recomputed on every call.
    pub fn ranked(&self) -> Ranked {
        rank(&self.readings)
    }
}
