use qnn::{
    configs::{OptimizerConfig, TrainingConfig},
    decision::Verdict,
};
use trainer::{Mode, PROBE_SIGNAL};

fn seeded(mode: Mode, seed: u64) -> TrainingConfig {
    TrainingConfig {
        seed: Some(seed),
        ..mode.config()
    }
}

#[test]
fn classifier_prints_progress_and_accuracy() {
    let config = seeded(Mode::Classifier, 42);
    let mut out = Vec::new();

    let report = trainer::run_classifier(&config, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "Starting Training...");
    let epoch_lines: Vec<_> = lines.iter().filter(|l| l.starts_with("Epoch ")).collect();
    assert_eq!(epoch_lines.len(), 4);
    assert!(epoch_lines[0].starts_with("Epoch 0 | Cost: "));
    assert!(epoch_lines[3].starts_with("Epoch 15 | Cost: "));

    assert!(text.contains("Final Learned Weights: "));
    assert!(lines.last().unwrap().starts_with("Test Accuracy: "));
    assert!(lines.last().unwrap().ends_with('%'));

    assert_eq!(report.costs.len(), 20);
    assert_eq!(report.weights.len(), 2);
    assert!((0. ..=1.).contains(&report.accuracy));
}

#[test]
fn classifier_is_reproducible_with_a_seed() {
    let config = seeded(Mode::Classifier, 5);
    let (mut a, mut b) = (Vec::new(), Vec::new());

    trainer::run_classifier(&config, &mut a).unwrap();
    trainer::run_classifier(&config, &mut b).unwrap();

    assert_eq!(a, b);
}

#[test]
fn network_prints_a_verdict_for_the_probe() {
    let config = seeded(Mode::Network, 13);
    let mut out = Vec::new();

    let report = trainer::run_network(&config, PROBE_SIGNAL, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(report.probe, PROBE_SIGNAL);
    assert_eq!(report.decision.verdict, Verdict::from_score(report.decision.score));
    assert_eq!(
        text.trim_end(),
        format!("Decision for Client Signal 0.8: {}", report.decision.verdict)
    );
}

#[test]
fn seed_override_keeps_the_network_preset() {
    let config =
        TrainingConfig::from_json_str_with(r#"{ "seed": 3 }"#, Mode::Network.config()).unwrap();
    let mut out = Vec::new();

    let report = trainer::run_network(&config, PROBE_SIGNAL, &mut out).unwrap();

    assert!(report.weight.is_finite());
    assert!(String::from_utf8(out).unwrap().starts_with("Decision for Client Signal 0.8: "));
}

#[test]
fn degenerate_adam_decay_fails_instead_of_training_nan() {
    let config = TrainingConfig {
        optimizer: OptimizerConfig::Adam {
            learning_rate: 0.1,
            beta1: 1.0,
            beta2: 0.99,
            epsilon: 1e-8,
        },
        ..seeded(Mode::Network, 2)
    };

    assert!(trainer::train_network_weight(&config).is_err());
}

#[test]
fn network_run_needs_a_single_qubit() {
    let config = seeded(Mode::Classifier, 1);
    assert!(trainer::train_network_weight(&config).is_err());
}

#[test]
fn modes_parse_from_args() {
    assert_eq!("classifier".parse::<Mode>().unwrap(), Mode::Classifier);
    assert_eq!("network".parse::<Mode>().unwrap(), Mode::Network);
    assert!("server".parse::<Mode>().is_err());
    assert_eq!(Mode::default(), Mode::Classifier);
}
