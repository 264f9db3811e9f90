// Prevent console window in addition to Slint window in Windows release builds when, e.g., starting the app via file manager. Ignored on other platforms.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

slint::include_modules!();

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use plant_dashboard_common::dashboard::Dashboard;
use plant_dashboard_common::readings::{
    ApiReadingController, DummyReadingController, ReadingControllerPointer,
    ReadingControllerSharedPointer, ReadingError,
};
use plant_dashboard_common::session::{FileCredentialStore, MemoryCredentialStore};
use plant_dashboard_common::ValueStore;
use plant_dashboard_model::{Ranked, SensorReading};

type FetchOutcome = Result<Vec<SensorReading>, ReadingError>;
type SubmitOutcome = Result<SensorReading, ReadingError>;

/// Our App struct that holds the UI, the headless dashboard and the reading
/// controller.
///
/// Network requests run on worker threads; their outcomes travel through
/// [`ValueStore`]s which a UI timer polls and applies on the event loop
/// thread. An outcome that arrives after the window is gone is simply never
/// applied, so late responses cannot touch stale state.
struct App {
    ui: AppWindow,
    controller: ReadingControllerSharedPointer,
    dashboard: Rc<RefCell<Dashboard>>,
    timer: slint::Timer,
    fetch_outcome: ValueStore<FetchOutcome>,
    submit_outcome: ValueStore<SubmitOutcome>,
}

impl App {
    const POLL_INTERVAL: std::time::Duration = std::time::Duration::from_millis(100);

    /// Create a new App struct.
    ///
    /// Reads the credential once from the platform store and activates the
    /// dashboard. Without a decodable credential the session stays inactive:
    /// no fetch is issued and the submit button stays disabled.
    fn new() -> anyhow::Result<Self> {
        // Make a new AppWindow
        let ui = AppWindow::new()?;

        // If the PLANT_API_URL environment variable is set, talk to the remote
        // readings API, otherwise fall back to the embedded fixture.
        let controller: ReadingControllerPointer = match std::env::var("PLANT_API_URL") {
            Ok(url) => {
                log::info!("Using readings API at {url}");
                Box::new(ApiReadingController::new(url))
            }
            Err(_) => {
                log::info!("PLANT_API_URL not set, using fixture readings");
                Box::new(DummyReadingController::new()?)
            }
        };

        // The controller is shared between worker threads, so we wrap it in an Arc<Mutex>.
        let controller = Arc::new(Mutex::new(controller));

        let dashboard = match FileCredentialStore::open() {
            Some(store) => Dashboard::new(&store),
            None => {
                log::warn!("No config directory found, starting without a session");
                Dashboard::new(&MemoryCredentialStore::default())
            }
        };

        ui.global::<ViewModel>()
            .set_session_active(dashboard.session().is_some());
        sync_view(&ui, &dashboard.ranked());

        Ok(Self {
            ui,
            controller,
            dashboard: Rc::new(RefCell::new(dashboard)),
            timer: slint::Timer::default(),
            fetch_outcome: ValueStore::default(),
            submit_outcome: ValueStore::default(),
        })
    }

    /// Run the App: issue the one-shot fetch, wire the callbacks, start the
    /// outcome poller and enter the event loop.
    fn run(&mut self) -> anyhow::Result<()> {
        self.spawn_initial_fetch();
        self.wire_callbacks();
        self.start_outcome_poller();

        // Run the UI (and map an error to an anyhow::Error).
        self.ui.run().map_err(|e| e.into())
    }

    /// The initial fetch runs exactly once per activation, and only while a
    /// session is active.
    fn spawn_initial_fetch(&self) {
        let Some(email) = self.dashboard.borrow_mut().begin_fetch() else {
            return;
        };

        let controller = self.controller.clone();
        let outcome = self.fetch_outcome.clone();
        std::thread::spawn(move || {
            let result = controller.lock().unwrap().fetch_readings(&email);
            outcome.set(result);
        });
    }

    fn wire_callbacks(&self) {
        let ui_handle = self.ui.as_weak();
        let dashboard = self.dashboard.clone();
        let controller = self.controller.clone();
        let submit_outcome = self.submit_outcome.clone();

        self.ui.global::<ViewModel>().on_post_sample(move || {
            // A no-op while a submission is outstanding or without a session.
            let Some(payload) = dashboard.borrow_mut().begin_post() else {
                return;
            };

            let ui = ui_handle.unwrap();
            ui.global::<ViewModel>().set_posting(true);

            let controller = controller.clone();
            let outcome = submit_outcome.clone();
            std::thread::spawn(move || {
                let result = controller.lock().unwrap().submit_reading(&payload);
                outcome.set(result);
            });
        });

        let ui_handle = self.ui.as_weak();
        self.ui.global::<ViewModel>().on_dismiss_error(move || {
            let ui = ui_handle.unwrap();
            ui.global::<ViewModel>().set_error_message("".into());
        });
    }

    /// Polls the outcome stores and applies them on the UI thread.
    fn start_outcome_poller(&self) {
        let ui_handle = self.ui.as_weak();
        let dashboard = self.dashboard.clone();
        let fetch_outcome = self.fetch_outcome.clone();
        let submit_outcome = self.submit_outcome.clone();

        self.timer
            .start(slint::TimerMode::Repeated, Self::POLL_INTERVAL, move || {
                let ui = ui_handle.unwrap();

                if let Some(outcome) = fetch_outcome.take() {
                    dashboard.borrow_mut().complete_fetch(outcome);
                    sync_view(&ui, &dashboard.borrow().ranked());
                }

                if let Some(outcome) = submit_outcome.take() {
                    let applied = dashboard.borrow_mut().complete_post(outcome);
                    let model = ui.global::<ViewModel>();
                    model.set_posting(false);

                    if let Err(e) = applied {
                        log::error!("Posting reading failed: {e}");
                        model.set_error_message(e.to_string().into());
                    }

                    sync_view(&ui, &dashboard.borrow().ranked());
                }
            });
    }
}

/// Pushes the derived latest/history view into the UI.
fn sync_view(ui: &AppWindow, ranked: &Ranked) {
    let model = ui.global::<ViewModel>();

    match &ranked.latest {
        Some(latest) => {
            model.set_current(latest.into());
            model.set_have_data(true);
        }
        None => model.set_have_data(false),
    }

    let records: Vec<ReadingRecord> = ranked.history.iter().map(ReadingRecord::from).collect();
    model.set_history(slint::ModelRc::from(Rc::new(slint::VecModel::from(records))));
}

/// Convert a sensor reading into a UI record.
impl From<&SensorReading> for ReadingRecord {
    fn from(reading: &SensorReading) -> Self {
        Self {
            light: reading.light as f32,
            temperature: reading.temperature as f32,
            soil_moisture: reading.soil_moisture as f32,
            humidity: reading.humidity as f32,
            // Display the timestamp in local time
            timestamp: slint::SharedString::from(
                reading
                    .timestamp
                    .with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string(),
            ),
        }
    }
}

/// A minimal main function that initializes the App and runs it.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut app = App::new()?;

    app.run()
}
