use tco_calculator::config::{self, Config, OutputFormat};

#[test]
fn missing_config_is_created_with_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let cfg = config::load_or_default(&path).expect("load");
    assert!(path.exists());
    assert_eq!(cfg.output, OutputFormat::Text);
    assert_eq!(cfg.defaults.discount_rate, 0.04);
    assert_eq!(cfg.defaults.annual_distance_travel, 80_000.0);
    assert!(cfg.database.trucks.ends_with("db_trucks.json"));
}

#[test]
fn saved_config_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let mut cfg = Config::default();
    cfg.output = OutputFormat::Json;
    cfg.defaults.discount_rate = 0.07;
    cfg.database.ships = "elsewhere/ships.json".into();
    cfg.save(&path).expect("save");

    let loaded = config::load_or_default(&path).expect("reload");
    assert_eq!(loaded.output, OutputFormat::Json);
    assert_eq!(loaded.defaults.discount_rate, 0.07);
    assert!(loaded.database.ships.ends_with("ships.json"));
}

#[test]
fn partial_config_fills_tables() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "output = \"Json\"\n").expect("write");
    let cfg = config::load_or_default(&path).expect("load");
    assert_eq!(cfg.output, OutputFormat::Json);
    assert_eq!(cfg.defaults.discount_rate, 0.04);
}

#[test]
fn malformed_config_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "output = 3\n").expect("write");
    assert!(matches!(
        config::load_or_default(&path),
        Err(config::ConfigError::Parse { .. })
    ));
}

#[test]
fn config_without_output_uses_text() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[database]\ntrucks = \"t.json\"\nships = \"s.json\"\n")
        .expect("write");
    let cfg = config::load_or_default(&path).expect("load");
    assert_eq!(cfg.output, OutputFormat::Text);
    assert!(cfg.database.trucks.ends_with("t.json"));
}

#[test]
fn parse_error_names_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "output = [\n").expect("write");
    let err = config::load_or_default(&path).unwrap_err();
    assert!(err.to_string().contains("broken.toml"));
}
