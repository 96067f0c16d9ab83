use crossterm::event::KeyCode;
use log::{info, warn};
use qnn::{
    configs::TrainingConfig,
    decision::{ConnectionManager, Decision, DEFAULT_WEIGHT},
};

use super::slider::Slider;

pub const DEFAULT_CLIENT: &str = "Device_001";
pub const SIGNAL_MIN: f32 = -2.0;
pub const SIGNAL_MAX: f32 = 2.0;
pub const SIGNAL_DEFAULT: f32 = 0.5;
pub const SIGNAL_STEP: f32 = 0.01;
const PAGE_STEPS: i32 = 10;
const MAX_NAME_LEN: usize = 32;

pub enum Action {
    None,
    Quit,
}

/// The widget receiving key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    ClientName,
    Signal,
    Button,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::ClientName => Focus::Signal,
            Focus::Signal => Focus::Button,
            Focus::Button => Focus::ClientName,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::ClientName => Focus::Button,
            Focus::Signal => Focus::ClientName,
            Focus::Button => Focus::Signal,
        }
    }
}

/// Where the connection manager's weight came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightSource {
    Preset,
    Trained,
}

/// The outcome of the last processed connection request.
#[derive(Debug, Clone)]
pub struct RequestResult {
    pub client: String,
    pub signal: f32,
    pub decision: Decision,
}

/// A status line shown under the controls.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Info(String),
    Error(String),
}

pub struct DashboardState {
    pub client_name: String,
    pub signal: Slider,
    pub focus: Focus,
    pub result: Option<RequestResult>,
    pub weight_source: WeightSource,
    pub status: Option<Status>,
    pub requests: usize,
    manager: ConnectionManager,
    network: TrainingConfig,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            client_name: DEFAULT_CLIENT.to_string(),
            signal: Slider::new(SIGNAL_MIN, SIGNAL_MAX, SIGNAL_DEFAULT, SIGNAL_STEP),
            focus: Focus::Signal,
            result: None,
            weight_source: WeightSource::Preset,
            status: None,
            requests: 0,
            manager: ConnectionManager::default(),
            network: TrainingConfig::network(),
        }
    }

    pub fn weight(&self) -> f32 {
        self.manager.weight()
    }

    /// Runs the circuit once for the current client and signal.
    pub fn process(&mut self) {
        let client = self.client_name.trim().to_string();
        let signal = self.signal.value();

        match self.manager.decide(signal) {
            Ok(decision) => {
                info!(
                    "request from {client}: signal={signal} score={} verdict={}",
                    decision.score, decision.verdict
                );
                self.requests += 1;
                self.status = None;
                self.result = Some(RequestResult {
                    client,
                    signal,
                    decision,
                });
            }
            Err(e) => {
                warn!("circuit evaluation failed: {e}");
                self.status = Some(Status::Error(format!("evaluation failed: {e}")));
            }
        }
    }

    /// Trains a fresh weight on a simulated network and deploys it.
    pub fn retrain(&mut self) {
        match trainer::train_network_weight(&self.network) {
            Ok(weight) => {
                info!("deployed trained weight {weight}");
                self.manager.set_weight(weight);
                self.weight_source = WeightSource::Trained;
                self.status = Some(Status::Info(format!(
                    "trained on {} simulated clients, weight = {weight:.4}",
                    self.network.data.train_samples
                )));
            }
            Err(e) => {
                warn!("training failed: {e}");
                self.status = Some(Status::Error(format!("training failed: {e}")));
            }
        }
    }

    /// Goes back to the preset weight.
    pub fn reset_weight(&mut self) {
        self.manager.set_weight(DEFAULT_WEIGHT);
        self.weight_source = WeightSource::Preset;
        self.status = Some(Status::Info(format!(
            "using preset weight {DEFAULT_WEIGHT}"
        )));
    }
}

pub fn handle_key(state: &mut DashboardState, key: KeyCode) -> Action {
    match key {
        KeyCode::Tab => {
            state.focus = state.focus.next();
            return Action::None;
        }
        KeyCode::BackTab => {
            state.focus = state.focus.prev();
            return Action::None;
        }
        _ => {}
    }

    match state.focus {
        Focus::ClientName => handle_name(state, key),
        Focus::Signal => handle_signal(state, key),
        Focus::Button => handle_button(state, key),
    }
}

fn handle_name(state: &mut DashboardState, key: KeyCode) -> Action {
    match key {
        KeyCode::Char(c) => {
            if state.client_name.chars().count() < MAX_NAME_LEN {
                state.client_name.push(c);
            }
        }
        KeyCode::Backspace => {
            state.client_name.pop();
        }
        KeyCode::Enter | KeyCode::Esc => state.focus = Focus::Signal,
        _ => {}
    }

    Action::None
}

fn handle_signal(state: &mut DashboardState, key: KeyCode) -> Action {
    match key {
        KeyCode::Left | KeyCode::Char('h') => state.signal.nudge(-1),
        KeyCode::Right | KeyCode::Char('l') => state.signal.nudge(1),
        KeyCode::PageDown | KeyCode::Down | KeyCode::Char('j') => state.signal.nudge(-PAGE_STEPS),
        KeyCode::PageUp | KeyCode::Up | KeyCode::Char('k') => state.signal.nudge(PAGE_STEPS),
        KeyCode::Home => state.signal.set(SIGNAL_MIN),
        KeyCode::End => state.signal.set(SIGNAL_MAX),
        KeyCode::Enter => state.process(),
        other => return handle_global(state, other),
    }

    Action::None
}

fn handle_button(state: &mut DashboardState, key: KeyCode) -> Action {
    match key {
        KeyCode::Enter | KeyCode::Char(' ') => {
            state.process();
            Action::None
        }
        other => handle_global(state, other),
    }
}

fn handle_global(state: &mut DashboardState, key: KeyCode) -> Action {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('t') => {
            state.retrain();
            Action::None
        }
        KeyCode::Char('r') => {
            state.reset_weight();
            Action::None
        }
        _ => Action::None,
    }
}
