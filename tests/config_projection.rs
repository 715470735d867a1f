mod support;

use cc_switch_web_lib::providers;
use cc_switch_web_lib::shared::app_key::AppKey;
use serde_json::{json, Value};

fn read_json(path: &std::path::Path) -> Value {
    let bytes = std::fs::read(path).expect("read file");
    serde_json::from_slice(&bytes).expect("parse json")
}

#[test]
fn claude_switch_merges_env_additively() {
    let env = support::TestEnv::new();
    let store = env.store();

    let settings_path = env.claude_settings_path();
    std::fs::create_dir_all(settings_path.parent().unwrap()).expect("mkdir");
    std::fs::write(
        &settings_path,
        serde_json::to_vec_pretty(&json!({
            "env": {"ANTHROPIC_AUTH_TOKEN": "sk-old"},
            "permissions": {"allow": ["Bash"]}
        }))
        .unwrap(),
    )
    .expect("seed settings");

    let id = providers::add(
        &store,
        AppKey::Claude,
        json!({
            "name": "Proxy",
            "settingsConfig": {"env": {"ANTHROPIC_BASE_URL": "https://proxy.example.com"}}
        }),
    )
    .expect("add provider");

    providers::switch(&store, AppKey::Claude, &id).expect("switch");

    let settings = read_json(&settings_path);
    // Additive merge: the pre-existing token and unrelated keys survive.
    assert_eq!(settings["env"]["ANTHROPIC_AUTH_TOKEN"], "sk-old");
    assert_eq!(settings["env"]["ANTHROPIC_BASE_URL"], "https://proxy.example.com");
    assert_eq!(settings["permissions"]["allow"][0], "Bash");

    assert_eq!(providers::current(&store, AppKey::Claude), id);
}

#[test]
fn claude_switch_creates_settings_file_when_absent() {
    let env = support::TestEnv::new();
    let store = env.store();

    let id = providers::add(
        &store,
        AppKey::Claude,
        json!({
            "name": "P",
            "settingsConfig": {"env": {
                "ANTHROPIC_AUTH_TOKEN": "sk-new",
                "ANTHROPIC_MODEL": "claude-sonnet-4-5"
            }}
        }),
    )
    .expect("add provider");

    providers::switch(&store, AppKey::Claude, &id).expect("switch");

    let settings = read_json(&env.claude_settings_path());
    assert_eq!(settings["env"]["ANTHROPIC_AUTH_TOKEN"], "sk-new");
    assert_eq!(settings["env"]["ANTHROPIC_MODEL"], "claude-sonnet-4-5");
}

#[test]
fn claude_switch_skips_empty_env_values() {
    let env = support::TestEnv::new();
    let store = env.store();

    let settings_path = env.claude_settings_path();
    std::fs::create_dir_all(settings_path.parent().unwrap()).expect("mkdir");
    std::fs::write(
        &settings_path,
        serde_json::to_vec_pretty(&json!({"env": {"ANTHROPIC_MODEL": "m-old"}})).unwrap(),
    )
    .expect("seed settings");

    let id = providers::add(
        &store,
        AppKey::Claude,
        json!({"name": "P", "settingsConfig": {"env": {"ANTHROPIC_MODEL": ""}}}),
    )
    .expect("add provider");

    providers::switch(&store, AppKey::Claude, &id).expect("switch");

    let settings = read_json(&settings_path);
    assert_eq!(settings["env"]["ANTHROPIC_MODEL"], "m-old");
}

#[test]
fn codex_switch_merges_auth_and_config_toml() {
    let env = support::TestEnv::new();
    let store = env.store();

    let auth_path = env.codex_auth_path();
    let config_path = env.codex_config_path();
    std::fs::create_dir_all(auth_path.parent().unwrap()).expect("mkdir");
    std::fs::write(
        &auth_path,
        serde_json::to_vec_pretty(&json!({
            "OPENAI_API_KEY": "sk-old",
            "tokens": {"id_token": "t1"}
        }))
        .unwrap(),
    )
    .expect("seed auth");
    std::fs::write(
        &config_path,
        "model = \"gpt-5\"\n\n[mcp_servers.exa]\ntype = \"stdio\"\n",
    )
    .expect("seed config");

    let id = providers::add(
        &store,
        AppKey::Codex,
        json!({
            "name": "Relay",
            "settingsConfig": {
                "auth": {"OPENAI_API_KEY": "sk-new"},
                "config": "model = \"gpt-5-codex\"\nmodel_provider = \"relay\"\n"
            }
        }),
    )
    .expect("add provider");

    providers::switch(&store, AppKey::Codex, &id).expect("switch");

    let auth = read_json(&auth_path);
    assert_eq!(auth["OPENAI_API_KEY"], "sk-new");
    assert_eq!(auth["tokens"]["id_token"], "t1");

    let config = std::fs::read_to_string(&config_path).expect("read config.toml");
    assert!(config.contains("model = \"gpt-5-codex\""), "{config}");
    assert!(config.contains("model_provider = \"relay\""), "{config}");
    assert!(config.contains("[mcp_servers.exa]"), "{config}");
}

#[test]
fn codex_switch_without_config_text_leaves_config_toml_alone() {
    let env = support::TestEnv::new();
    let store = env.store();

    let id = providers::add(
        &store,
        AppKey::Codex,
        json!({"name": "AuthOnly", "settingsConfig": {"auth": {"OPENAI_API_KEY": "sk-x"}}}),
    )
    .expect("add provider");

    providers::switch(&store, AppKey::Codex, &id).expect("switch");

    assert!(env.codex_auth_path().exists());
    assert!(!env.codex_config_path().exists());
}

#[test]
fn gemini_switch_touches_no_external_files() {
    let env = support::TestEnv::new();
    let store = env.store();

    let id = providers::add(
        &store,
        AppKey::Gemini,
        json!({"name": "G", "settingsConfig": {"env": "GEMINI_API_KEY=k"}}),
    )
    .expect("add provider");

    providers::switch(&store, AppKey::Gemini, &id).expect("switch");

    assert_eq!(providers::current(&store, AppKey::Gemini), id);
    assert!(!env.claude_settings_path().exists());
    assert!(!env.codex_auth_path().exists());
}
