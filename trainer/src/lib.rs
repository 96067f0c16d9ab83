use std::{
    fmt::{self, Display},
    io::Write,
    str::FromStr,
};

use log::{debug, info};
use qnn::{
    QnnErr, Result,
    configs::{ModelKind, TrainingConfig},
    dataset::SignalGen,
    decision::{ConnectionManager, Decision},
    training::{Trainer, TrainerBuilder},
};

/// The signal the network run probes the trained connection manager with.
pub const PROBE_SIGNAL: f32 = 0.8;

/// Which standalone run to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Classifier,
    Network,
}

impl Mode {
    /// The preset config for this run.
    pub fn config(self) -> TrainingConfig {
        match self {
            Mode::Classifier => TrainingConfig::classifier(),
            Mode::Network => TrainingConfig::network(),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "classifier" => Ok(Mode::Classifier),
            "network" => Ok(Mode::Network),
            other => Err(format!(
                "Unknown mode: {other}. You must use 'classifier' or 'network'."
            )),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Classifier => f.write_str("classifier"),
            Mode::Network => f.write_str("network"),
        }
    }
}

/// The outcome of the two-qubit classifier run.
#[derive(Debug, Clone)]
pub struct ClassifierReport {
    /// `(epoch, cost)` for every epoch.
    pub costs: Vec<(usize, f32)>,
    pub weights: Vec<f32>,
    /// Fraction of the test samples classified correctly, in `[0, 1]`.
    pub accuracy: f32,
}

/// The outcome of the connection manager run.
#[derive(Debug, Clone, Copy)]
pub struct NetworkReport {
    pub weight: f32,
    pub probe: f32,
    pub decision: Decision,
}

/// Trains the two-qubit classifier on noisy signals and measures its accuracy on fresh ones.
///
/// Progress lines go to `out`, a line every `log_every` epochs.
///
/// # Errors
/// Returns an error if the config is invalid or writing to `out` fails.
pub fn run_classifier<W: Write>(
    config: &TrainingConfig,
    out: &mut W,
) -> Result<ClassifierReport> {
    let mut rng = config.rng();
    let signal_gen = SignalGen::new(config.data.noise_std)?;
    let train = signal_gen.sample(&mut rng, config.data.train_samples);
    info!(
        "generated {} training samples with noise std {}",
        train.len(),
        config.data.noise_std
    );

    let mut trainer = TrainerBuilder::new().build(config)?;
    let log_every = config.log_every.get();

    writeln!(out, "Starting Training...")?;

    let mut costs = Vec::with_capacity(config.epochs);
    for epoch in 0..config.epochs {
        let cost = trainer.step_and_cost(&train)?;
        if epoch % log_every == 0 {
            writeln!(out, "Epoch {epoch} | Cost: {cost:.4}")?;
        }
        costs.push((epoch, cost));
    }

    let weights = trainer.weights().to_vec();
    writeln!(out)?;
    writeln!(out, "Final Learned Weights: {weights:?}")?;

    let test = signal_gen.sample(&mut rng, config.data.test_samples);
    let accuracy = trainer.accuracy(&test)?;
    writeln!(out, "Test Accuracy: {:.1}%", accuracy * 100.)?;
    info!("classifier run finished: accuracy={accuracy}");

    Ok(ClassifierReport {
        costs,
        weights,
        accuracy,
    })
}

/// Simulates a wireless network, trains the one-qubit connection manager on it and
/// returns the learned weight.
///
/// # Errors
/// Returns an error if the config is invalid or is not a one-qubit run.
pub fn train_network_weight(config: &TrainingConfig) -> Result<f32> {
    if config.model != ModelKind::SingleQubit {
        return Err(QnnErr::InvalidConfig(format!(
            "the connection manager needs a single_qubit model, got {:?}",
            config.model
        )));
    }

    let mut rng = config.rng();
    let signal_gen = SignalGen::new(config.data.noise_std)?;
    let clients = signal_gen.sample(&mut rng, config.data.train_samples);
    info!("simulated {} client connection attempts", clients.len());

    let mut trainer = TrainerBuilder::new().build(config)?;
    let log_every = config.log_every.get();
    trainer.fit(&clients, config.epochs, &mut |epoch, cost| {
        if epoch % log_every == 0 {
            debug!("iteration {epoch}: cost={cost:.4}");
        }
    })?;

    Ok(trainer.weights()[0])
}

/// Trains the connection manager and asks it about a client with signal `probe`.
///
/// # Errors
/// Returns an error if training fails or writing to `out` fails.
pub fn run_network<W: Write>(
    config: &TrainingConfig,
    probe: f32,
    out: &mut W,
) -> Result<NetworkReport> {
    let weight = train_network_weight(config)?;
    info!("learned connection rule weight: {weight}");

    let manager = ConnectionManager::new(weight);
    let decision = manager.decide(probe)?;
    writeln!(out, "Decision for Client Signal {probe}: {}", decision.verdict)?;

    Ok(NetworkReport {
        weight,
        probe,
        decision,
    })
}
