//! Session state machine and event loop.
//!
//! The session is single-threaded and event-driven: a pure `update`
//! function consumes events (keys, ticks, prediction outcomes) and returns
//! at most one command for the runtime to carry out. The only suspension
//! point is the prediction request itself, which runs on a spawned task and
//! reports back over a channel, so the UI keeps rendering while a request
//! is outstanding.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use geopredict_core::{
    InputForm, LocationQuery, PredictionResult, PredictionService, ResultSlot, ServiceError,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const SPINNER_TICK: Duration = Duration::from_millis(120);

/// Which view the session is currently on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Input,
    Result,
}

/// Focusable fields of the input form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    City,
    Latitude,
    Longitude,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::City => Field::Latitude,
            Field::Latitude => Field::Longitude,
            Field::Longitude => Field::City,
        }
    }

    fn prev(self) -> Self {
        match self {
            Field::City => Field::Longitude,
            Field::Latitude => Field::City,
            Field::Longitude => Field::Latitude,
        }
    }
}

/// Inputs to the state machine.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Prediction {
        seq: u64,
        outcome: Result<PredictionResult, ServiceError>,
    },
}

/// Effects the runtime must carry out after an update.
#[derive(Debug, PartialEq)]
pub enum Command {
    None,
    Predict { seq: u64, query: LocationQuery },
}

/// Everything the UI needs to render.
pub struct App {
    pub screen: Screen,
    pub form: InputForm,
    pub focus: Field,
    pub slot: ResultSlot,
    pub in_flight: bool,
    pub submit_error: Option<String>,
    pub spinner_frame: usize,
    pub should_quit: bool,
    request_seq: u64,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            screen: Screen::Input,
            form: InputForm::new(),
            focus: Field::City,
            slot: ResultSlot::new(),
            in_flight: false,
            submit_error: None,
            spinner_frame: 0,
            should_quit: false,
            request_seq: 0,
        }
    }

    /// Pure state transition: one event in, at most one command out.
    pub fn update(&mut self, event: AppEvent) -> Command {
        match event {
            AppEvent::Tick => {
                if self.in_flight {
                    self.spinner_frame = self.spinner_frame.wrapping_add(1);
                }
                Command::None
            }
            AppEvent::Prediction { seq, outcome } => self.on_prediction(seq, outcome),
            AppEvent::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    return Command::None;
                }
                if key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    self.should_quit = true;
                    return Command::None;
                }
                match self.screen {
                    Screen::Input => self.on_input_key(key),
                    Screen::Result => self.on_result_key(key),
                }
            }
        }
    }

    fn on_prediction(
        &mut self,
        seq: u64,
        outcome: Result<PredictionResult, ServiceError>,
    ) -> Command {
        if seq != self.request_seq {
            // Aborted or superseded; the late completion is dropped.
            debug!(seq, current = self.request_seq, "dropping stale prediction outcome");
            return Command::None;
        }

        self.in_flight = false;
        match outcome {
            Ok(result) => {
                info!(
                    status = %result.status_label,
                    confidence = result.confidence,
                    "prediction succeeded"
                );
                match self.slot.store(&result) {
                    Ok(()) => {
                        self.submit_error = None;
                        self.screen = Screen::Result;
                    }
                    Err(err) => self.submit_error = Some(err.to_string()),
                }
            }
            Err(err) => {
                warn!(error = %err, "prediction failed");
                self.submit_error = Some(err.to_string());
            }
        }
        Command::None
    }

    fn on_input_key(&mut self, key: KeyEvent) -> Command {
        if self.in_flight {
            // Input is locked while a request is outstanding; Esc aborts it.
            if key.code == KeyCode::Esc {
                self.abort_request();
            }
            return Command::None;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Enter => return self.submit(),
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                // Jump to the result view without submitting; with nothing
                // transferred it renders the "no data" placeholder.
                self.screen = Screen::Result;
            }
            KeyCode::Backspace => self.edit(|text| {
                text.pop();
            }),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.edit(|text| text.push(c));
            }
            _ => {}
        }
        Command::None
    }

    fn on_result_key(&mut self, key: KeyEvent) -> Command {
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') => {
                // Returning to input discards the transferred result.
                self.slot.clear();
                self.submit_error = None;
                self.screen = Screen::Input;
            }
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
        Command::None
    }

    /// At most one request in flight; further submits are ignored until the
    /// outstanding one resolves or is aborted.
    fn submit(&mut self) -> Command {
        if self.in_flight || !self.form.is_submit_ready() {
            return Command::None;
        }

        match self.form.build_query() {
            Ok(query) => {
                self.request_seq += 1;
                self.in_flight = true;
                self.submit_error = None;
                info!(location = %query.describe(), "submitting location");
                Command::Predict {
                    seq: self.request_seq,
                    query,
                }
            }
            Err(err) => {
                self.submit_error = Some(err.to_string());
                Command::None
            }
        }
    }

    fn abort_request(&mut self) {
        // Bumping the sequence makes any late completion a no-op.
        self.request_seq += 1;
        self.in_flight = false;
        self.submit_error = Some("Request aborted.".to_string());
        debug!("outstanding prediction aborted");
    }

    fn edit(&mut self, apply: impl FnOnce(&mut String)) {
        let mut text = match self.focus {
            Field::City => self.form.city.clone(),
            Field::Latitude => self.form.latitude.clone(),
            Field::Longitude => self.form.longitude.clone(),
        };
        apply(&mut text);
        match self.focus {
            Field::City => self.form.set_city(text),
            Field::Latitude => self.form.set_latitude(text),
            Field::Longitude => self.form.set_longitude(text),
        }
        self.submit_error = None;
    }
}

pub async fn run(service: impl PredictionService + 'static) -> anyhow::Result<()> {
    let mut terminal = setup_terminal().context("failed to initialize terminal")?;
    let service: Arc<dyn PredictionService> = Arc::new(service);
    let result = run_loop(&mut terminal, service).await;
    restore_terminal(&mut terminal).context("failed to restore terminal")?;
    result
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    service: Arc<dyn PredictionService>,
) -> anyhow::Result<()> {
    let mut app = App::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(SPINNER_TICK);

    loop {
        terminal.draw(|frame| crate::ui::render(frame, &app))?;

        let event = tokio::select! {
            maybe = events.next() => match maybe {
                Some(Ok(Event::Key(key))) => AppEvent::Key(key),
                Some(Ok(_)) => continue,
                Some(Err(err)) => return Err(err).context("terminal event stream failed"),
                None => break,
            },
            maybe = rx.recv() => match maybe {
                Some(outcome) => outcome,
                None => continue,
            },
            _ = ticker.tick() => AppEvent::Tick,
        };

        dispatch(app.update(event), &service, &tx);

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Carry out a command from `update`: the prediction runs on a spawned
/// task and reports back over the channel, tagged with its sequence.
fn dispatch(
    command: Command,
    service: &Arc<dyn PredictionService>,
    tx: &mpsc::UnboundedSender<AppEvent>,
) {
    match command {
        Command::None => {}
        Command::Predict { seq, query } => {
            let service = Arc::clone(service);
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = service.predict(&query).await;
                let _ = tx.send(AppEvent::Prediction { seq, outcome });
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use geopredict_core::gauge::compute_geometry;
    use geopredict_core::{TransferError, WeatherDetails};

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> AppEvent {
        AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.update(key(KeyCode::Char(c)));
        }
    }

    fn nairobi_result() -> PredictionResult {
        PredictionResult {
            status_label: "No Landslide".to_string(),
            confidence: 72.5,
            details: WeatherDetails {
                temperature: Some(24.0),
                humidity: Some(60.0),
                wind_speed: Some(12.5),
                rainfall: Some(3.0),
                pressure: Some(1013.0),
                visibility: Some(10.0),
            },
            requested_at: Utc::now(),
        }
    }

    fn submit_city(app: &mut App, city: &str) -> Command {
        type_text(app, city);
        app.update(key(KeyCode::Enter))
    }

    #[test]
    fn typing_a_coordinate_clears_the_city() {
        let mut app = App::new();
        type_text(&mut app, "Nairobi");
        assert_eq!(app.form.city, "Nairobi");

        app.update(key(KeyCode::Tab));
        type_text(&mut app, "-1.28");

        assert!(app.form.city.is_empty());
        assert_eq!(app.form.latitude, "-1.28");
    }

    #[test]
    fn submit_produces_a_predict_command() {
        let mut app = App::new();
        let command = submit_city(&mut app, "Nairobi");

        assert!(app.in_flight);
        assert!(matches!(
            command,
            Command::Predict {
                seq: 1,
                query: LocationQuery::City { .. }
            }
        ));
    }

    #[test]
    fn submit_with_nothing_entered_is_ignored() {
        let mut app = App::new();
        assert_eq!(app.update(key(KeyCode::Enter)), Command::None);
        assert!(!app.in_flight);
    }

    #[test]
    fn second_submit_while_in_flight_is_ignored() {
        let mut app = App::new();
        submit_city(&mut app, "Nairobi");

        let second = app.update(key(KeyCode::Enter));
        assert_eq!(second, Command::None);
        assert!(app.in_flight);
    }

    #[test]
    fn input_is_locked_while_in_flight() {
        let mut app = App::new();
        submit_city(&mut app, "Nairobi");

        app.update(key(KeyCode::Char('x')));
        assert_eq!(app.form.city, "Nairobi", "edits are ignored mid-request");
    }

    #[test]
    fn successful_outcome_transfers_and_navigates() {
        let mut app = App::new();
        let Command::Predict { seq, .. } = submit_city(&mut app, "Nairobi") else {
            panic!("expected a predict command");
        };

        let result = nairobi_result();
        app.update(AppEvent::Prediction {
            seq,
            outcome: Ok(result.clone()),
        });

        assert_eq!(app.screen, Screen::Result);
        assert!(!app.in_flight);
        assert_eq!(app.slot.load().expect("slot populated"), result);

        // Needle lands where the scenario expects it.
        let geometry = compute_geometry(result.confidence);
        assert!((geometry.needle_angle - 0.8639).abs() < 1e-4);
    }

    #[test]
    fn failed_outcome_stays_on_input_with_a_message() {
        let mut app = App::new();
        let Command::Predict { seq, .. } = submit_city(&mut app, "Nairobi") else {
            panic!("expected a predict command");
        };

        app.update(AppEvent::Prediction {
            seq,
            outcome: Err(ServiceError::Timeout(10)),
        });

        assert_eq!(app.screen, Screen::Input);
        assert!(!app.in_flight);
        assert!(app.submit_error.as_deref().unwrap_or("").contains("10 seconds"));
        assert!(app.slot.is_empty());
    }

    #[test]
    fn stale_outcome_is_dropped() {
        let mut app = App::new();
        submit_city(&mut app, "Nairobi");

        app.update(AppEvent::Prediction {
            seq: 0,
            outcome: Ok(nairobi_result()),
        });

        assert_eq!(app.screen, Screen::Input, "old sequence must not navigate");
        assert!(app.in_flight, "the live request is still outstanding");
        assert!(app.slot.is_empty());
    }

    #[test]
    fn esc_aborts_an_outstanding_request() {
        let mut app = App::new();
        let Command::Predict { seq, .. } = submit_city(&mut app, "Nairobi") else {
            panic!("expected a predict command");
        };

        app.update(key(KeyCode::Esc));
        assert!(!app.in_flight);
        assert!(!app.should_quit, "esc mid-request aborts, it does not quit");

        // The aborted request completing later changes nothing.
        app.update(AppEvent::Prediction {
            seq,
            outcome: Ok(nairobi_result()),
        });
        assert_eq!(app.screen, Screen::Input);
        assert!(app.slot.is_empty());
    }

    #[test]
    fn direct_visit_to_result_reports_missing_result() {
        let mut app = App::new();
        app.update(ctrl('r'));

        assert_eq!(app.screen, Screen::Result);
        assert!(matches!(app.slot.load(), Err(TransferError::MissingResult)));
    }

    #[test]
    fn going_back_clears_the_slot() {
        let mut app = App::new();
        let Command::Predict { seq, .. } = submit_city(&mut app, "Nairobi") else {
            panic!("expected a predict command");
        };
        app.update(AppEvent::Prediction {
            seq,
            outcome: Ok(nairobi_result()),
        });
        assert_eq!(app.screen, Screen::Result);

        app.update(key(KeyCode::Char('b')));

        assert_eq!(app.screen, Screen::Input);
        assert!(app.slot.is_empty());

        // A later visit to the result view reliably reports "no result".
        app.update(ctrl('r'));
        assert!(matches!(app.slot.load(), Err(TransferError::MissingResult)));
    }

    /// Service double answering every query with one fixed result.
    #[derive(Debug)]
    struct FixedOutcomeService(PredictionResult);

    #[async_trait::async_trait]
    impl PredictionService for FixedOutcomeService {
        async fn predict(
            &self,
            _query: &LocationQuery,
        ) -> Result<PredictionResult, ServiceError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn predict_command_round_trips_through_the_channel() {
        let expected = nairobi_result();
        let service: Arc<dyn PredictionService> =
            Arc::new(FixedOutcomeService(expected.clone()));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut app = App::new();
        let command = submit_city(&mut app, "Nairobi");
        assert!(matches!(command, Command::Predict { .. }));

        dispatch(command, &service, &tx);

        let event = rx.recv().await.expect("outcome should be delivered");
        app.update(event);

        assert_eq!(app.screen, Screen::Result);
        assert!(!app.in_flight);
        assert_eq!(app.slot.load().expect("slot populated"), expected);
    }

    #[test]
    fn tick_advances_the_spinner_only_in_flight() {
        let mut app = App::new();
        app.update(AppEvent::Tick);
        assert_eq!(app.spinner_frame, 0);

        submit_city(&mut app, "Nairobi");
        app.update(AppEvent::Tick);
        assert_eq!(app.spinner_frame, 1);
    }
}
