use std::{
    env,
    io::{self, Write},
    process,
};

use anyhow::{Context, Result};
use log::info;
use qnn::configs::TrainingConfig;
use trainer::{Mode, PROBE_SIGNAL};

const CONFIG_VAR: &str = "QNN_CONFIG";

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mode = match args.get(1).map(|arg| arg.parse::<Mode>()) {
        None => Mode::default(),
        Some(Ok(mode)) => mode,
        Some(Err(e)) => {
            eprintln!("{e}");
            eprintln!("Usage: {} [classifier|network]", args[0]);
            process::exit(1);
        }
    };

    let config = match env::var(CONFIG_VAR) {
        Ok(path) => {
            info!("loading config from {path}");
            TrainingConfig::from_json_file_with(&path, mode.config())
                .with_context(|| format!("failed to load config '{path}'"))?
        }
        Err(_) => mode.config(),
    };
    info!("running {mode} with seed {:?}", config.seed);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match mode {
        Mode::Classifier => {
            trainer::run_classifier(&config, &mut out)?;
        }
        Mode::Network => {
            trainer::run_network(&config, PROBE_SIGNAL, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}
