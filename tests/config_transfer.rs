mod support;

use cc_switch_web_lib::shared::app_key::AppKey;
use cc_switch_web_lib::store::Aggregate;
use cc_switch_web_lib::{mcp, prompts, providers, settings};
use serde_json::json;

#[test]
fn export_import_round_trip_is_identical() {
    let env = support::TestEnv::new();
    let store = env.store();

    providers::add(
        &store,
        AppKey::Claude,
        json!({
            "name": "Anthropic",
            "settingsConfig": {"env": {"ANTHROPIC_AUTH_TOKEN": "sk-1"}, "vendorExtra": 7}
        }),
    )
    .expect("add claude provider");
    providers::add(
        &store,
        AppKey::Codex,
        json!({"name": "Codex", "settingsConfig": {"auth": {"OPENAI_API_KEY": "sk-2"}}}),
    )
    .expect("add codex provider");

    // Dangling current pointer must survive the round trip literally.
    providers::switch(&store, AppKey::Gemini, "gemini-ghost").expect("switch gemini");

    mcp::add(
        &store,
        json!({"name": "exa", "server": {"type": "stdio", "command": "npx"}}),
    )
    .expect("add mcp server");
    prompts::add(
        &store,
        AppKey::Claude,
        json!({"name": "default", "content": "Be concise.", "enabled": true}),
    )
    .expect("add prompt");
    settings::update(
        &store,
        settings::SettingsPatch {
            theme: Some("dark".to_string()),
            ..Default::default()
        },
    )
    .expect("update settings");

    let exported = serde_json::to_value(store.read()).expect("export");

    // Import into a second, empty store: full overwrite, no merge.
    let other_home = tempfile::tempdir().expect("tempdir");
    let other = cc_switch_web_lib::store::Store::new(other_home.path().join("data.json"));
    let aggregate: Aggregate = serde_json::from_value(exported.clone()).expect("parse aggregate");
    other.replace(aggregate).expect("import");

    let re_exported = serde_json::to_value(other.read()).expect("re-export");
    assert_eq!(exported, re_exported);
    assert_eq!(re_exported["gemini"]["current"], "gemini-ghost");
    assert_eq!(re_exported["settings"]["theme"], "dark");
}

#[test]
fn import_replaces_existing_state_wholesale() {
    let env = support::TestEnv::new();
    let store = env.store();

    providers::add(&store, AppKey::Claude, json!({"name": "Old"})).expect("seed");

    let incoming: Aggregate = serde_json::from_value(json!({
        "claude": {"providers": {}, "current": ""},
        "codex": {"providers": {}, "current": ""},
        "gemini": {"providers": {}, "current": ""},
        "mcp": {"servers": {}},
        "prompts": {"claude": {}, "codex": {}, "gemini": {}},
        "settings": {"language": "en", "theme": "light", "autoSync": true}
    }))
    .expect("parse incoming");

    store.replace(incoming).expect("import");

    let claude = providers::list(&store, AppKey::Claude).expect("claude providers");
    assert!(claude.as_object().unwrap().is_empty());
    assert_eq!(settings::get(&store).language, "en");
    assert!(settings::get(&store).auto_sync);
}

#[test]
fn partial_aggregate_payload_fills_missing_sections_with_defaults() {
    let env = support::TestEnv::new();
    let store = env.store();

    let incoming: Aggregate =
        serde_json::from_value(json!({"claude": {"providers": {}, "current": "claude-x"}}))
            .expect("parse partial aggregate");
    store.replace(incoming).expect("import");

    assert_eq!(providers::current(&store, AppKey::Claude), "claude-x");
    assert_eq!(settings::get(&store).language, "zh");
}

#[test]
fn corrupt_data_file_reads_as_default_aggregate() {
    let env = support::TestEnv::new();
    let store = env.store();

    providers::add(&store, AppKey::Claude, json!({"name": "P"})).expect("seed");
    std::fs::write(store.data_path(), b"{ truncated").expect("corrupt file");

    let aggregate = store.read();
    assert!(aggregate.claude.providers.is_empty());
    assert_eq!(aggregate.settings.theme, "system");
}
