use quizzybee::presentation::{Environment, LlmProvider, ScaffoldConfig, Settings};

#[test]
fn given_no_settings_file_when_loading_then_defaults_apply() {
    let settings = Settings::load(Environment::Test).unwrap();

    assert_eq!(settings.generation.default_count, 5);
    assert!(settings.server.max_upload_mb > 0);
    assert!(settings.llm.timeout_secs > 0);
    assert!(settings.sessions.idle_ttl_secs > settings.llm.timeout_secs);
    assert!(settings.sessions.sweep_interval_secs > 0);
}

#[test]
fn given_scaffold_enabled_when_applied_then_provider_forced_to_mock() {
    let mut llm = Settings::load(Environment::Test).unwrap().llm;
    let scaffold = ScaffoldConfig {
        enabled: true,
        mock_response_delay_ms: 250,
    };

    scaffold.apply(&mut llm);

    assert_eq!(llm.provider, LlmProvider::Mock);
    assert_eq!(scaffold.mock_delay().as_millis(), 250);
}

#[test]
fn given_scaffold_disabled_when_applied_then_provider_unchanged() {
    let mut llm = Settings::load(Environment::Test).unwrap().llm;
    let before = llm.provider;

    ScaffoldConfig::default().apply(&mut llm);

    assert_eq!(llm.provider, before);
}
