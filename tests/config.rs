use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use x_score::config::{ConfigError, ScoringConfig};
use x_score::labels::Locale;
use x_score::scoring::{Action, AudienceNetwork};

const ENV_VARS: [&str; 4] = [
    "XSCORE_CONFIG_PATH",
    "XSCORE_BASELINE_FLOOR",
    "XSCORE_ASSUMED_NETWORK",
    "XSCORE_LOCALE",
];

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Holds the process-wide env lock and clears the override variables.
fn env_guard() -> MutexGuard<'static, ()> {
    let guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    for name in ENV_VARS {
        std::env::remove_var(name);
    }
    guard
}

fn scratch_dir(test: &str) -> PathBuf {
    std::env::temp_dir().join(format!("x-score-{}-{}", test, std::process::id()))
}

#[test]
fn partial_toml_keeps_defaults() {
    let config: ScoringConfig = toml::from_str(
        r#"
        [weights]
        reply = 20.0

        [boost]
        assumed_network = "in_network"

        [labels]
        locale = "ja"
        "#,
    )
    .expect("valid config");

    assert_eq!(config.weights.reply, 20.0);
    assert_eq!(config.weights.favorite, 0.5);
    assert_eq!(config.boost.assumed_network, AudienceNetwork::InNetwork);
    assert_eq!(config.boost.out_of_network, 2.0);
    assert_eq!(config.estimator.baseline_floor, 1_000);
    assert_eq!(config.labels.locale, Locale::Ja);
    assert_eq!(config.labels.label(Action::Repost), "リポスト");
}

#[test]
fn written_config_reads_back() {
    let dir = scratch_dir("roundtrip");
    let path = dir.join("nested/scoring.toml");
    let mut config = ScoringConfig::default();
    config.estimator.baseline_floor = 2_500;
    config
        .labels
        .overrides
        .insert("dwell".to_string(), "Read time".to_string());

    config.write(&path).expect("write config");
    let loaded = ScoringConfig::from_file(&path).expect("read config");

    assert_eq!(loaded, config);
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn malformed_config_reports_path() {
    let path = scratch_dir("malformed").join("broken.toml");
    std::fs::create_dir_all(path.parent().expect("parent dir")).expect("create dir");
    std::fs::write(&path, "[weights\nreply = ").expect("write broken config");

    let err = ScoringConfig::from_file(&path).expect_err("parse failure");

    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("broken.toml"));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let _env = env_guard();
    let path = scratch_dir("missing").join("does-not-exist.toml");

    let (config, resolved) = ScoringConfig::load(Some(path.clone())).expect("load defaults");

    assert_eq!(resolved, Some(path));
    assert_eq!(config.weights, ScoringConfig::default().weights);
}

#[test]
fn env_overrides_replace_file_values() {
    let _env = env_guard();
    let path = scratch_dir("env").join("scoring.toml");
    std::fs::create_dir_all(path.parent().expect("parent dir")).expect("create dir");
    std::fs::write(&path, "[estimator]\nbaseline_floor = 500\n").expect("write config");
    std::env::set_var("XSCORE_CONFIG_PATH", &path);
    std::env::set_var("XSCORE_BASELINE_FLOOR", "2500");
    std::env::set_var("XSCORE_ASSUMED_NETWORK", "in_network");
    std::env::set_var("XSCORE_LOCALE", "ja");

    let (config, resolved) = ScoringConfig::load(None).expect("load config");

    assert_eq!(resolved, Some(path.clone()));
    assert_eq!(config.estimator.baseline_floor, 2_500);
    assert_eq!(config.boost.assumed_network, AudienceNetwork::InNetwork);
    assert_eq!(config.labels.locale, Locale::Ja);
    for name in ENV_VARS {
        std::env::remove_var(name);
    }
    let _ = std::fs::remove_dir_all(path.parent().expect("parent dir"));
}

#[test]
fn unparseable_env_values_keep_defaults() {
    let _env = env_guard();
    std::env::set_var(
        "XSCORE_CONFIG_PATH",
        scratch_dir("env-bad").join("absent.toml"),
    );
    std::env::set_var("XSCORE_BASELINE_FLOOR", "lots");
    std::env::set_var("XSCORE_ASSUMED_NETWORK", "sideways");
    std::env::set_var("XSCORE_LOCALE", "klingon");

    let (config, _) = ScoringConfig::load(None).expect("load config");

    assert_eq!(config.estimator.baseline_floor, 1_000);
    assert_eq!(config.boost.assumed_network, AudienceNetwork::OutOfNetwork);
    assert_eq!(config.labels.locale, Locale::En);
    for name in ENV_VARS {
        std::env::remove_var(name);
    }
}

#[test]
fn unknown_label_override_still_loads() {
    let _env = env_guard();
    let path = scratch_dir("labels").join("scoring.toml");
    std::fs::create_dir_all(path.parent().expect("parent dir")).expect("create dir");
    std::fs::write(
        &path,
        "[labels.overrides]\nfavourite = \"Fav\"\ndwell = \"Read time\"\n",
    )
    .expect("write config");

    let (config, _) = ScoringConfig::load(Some(path.clone())).expect("load config");

    assert_eq!(config.labels.unknown_override_keys(), vec!["favourite"]);
    assert_eq!(config.labels.label(Action::Dwell), "Read time");
    assert_eq!(config.labels.label(Action::Favorite), "Like");
    let _ = std::fs::remove_dir_all(path.parent().expect("parent dir"));
}
