mod support;

use cc_switch_web_lib::prompts;
use cc_switch_web_lib::shared::app_key::AppKey;
use serde_json::json;

#[test]
fn add_then_list_scoped_per_app() {
    let env = support::TestEnv::new();
    let store = env.store();

    let id = prompts::add(
        &store,
        AppKey::Claude,
        json!({"name": "default", "content": "Be concise.", "description": "house style"}),
    )
    .expect("add prompt");

    assert!(id.starts_with("prompt-"));

    let map = prompts::list(&store, AppKey::Claude).expect("list prompts");
    assert_eq!(map[&id]["name"], "default");
    assert_eq!(map[&id]["enabled"], false);
    assert!(map[&id]["createdAt"].as_i64().unwrap() > 0);

    let other = prompts::list(&store, AppKey::Codex).expect("list codex prompts");
    assert!(other.as_object().unwrap().is_empty());
}

#[test]
fn enabling_one_prompt_disables_siblings() {
    let env = support::TestEnv::new();
    let store = env.store();

    let id1 = prompts::add(
        &store,
        AppKey::Claude,
        json!({"name": "p1", "content": "one", "enabled": true}),
    )
    .expect("add p1");
    let id2 = prompts::add(
        &store,
        AppKey::Claude,
        json!({"name": "p2", "content": "two"}),
    )
    .expect("add p2");

    prompts::update(&store, AppKey::Claude, &id2, json!({"enabled": true})).expect("enable p2");

    let map = prompts::list(&store, AppKey::Claude).expect("list prompts");
    assert_eq!(map[&id1]["enabled"], false);
    assert_eq!(map[&id2]["enabled"], true);
}

#[test]
fn sibling_toggle_does_not_cross_apps() {
    let env = support::TestEnv::new();
    let store = env.store();

    let claude_id = prompts::add(
        &store,
        AppKey::Claude,
        json!({"name": "c", "content": "x", "enabled": true}),
    )
    .expect("add claude prompt");

    prompts::add(
        &store,
        AppKey::Codex,
        json!({"name": "d", "content": "y", "enabled": true}),
    )
    .expect("add codex prompt");

    let map = prompts::list(&store, AppKey::Claude).expect("list claude prompts");
    assert_eq!(map[&claude_id]["enabled"], true);
}

#[test]
fn update_merges_fields_and_bumps_updated_at() {
    let env = support::TestEnv::new();
    let store = env.store();

    let id = prompts::add(
        &store,
        AppKey::Gemini,
        json!({"name": "g", "content": "old"}),
    )
    .expect("add prompt");

    prompts::update(&store, AppKey::Gemini, &id, json!({"content": "new"})).expect("update prompt");

    let map = prompts::list(&store, AppKey::Gemini).expect("list prompts");
    assert_eq!(map[&id]["name"], "g");
    assert_eq!(map[&id]["content"], "new");
    assert!(map[&id]["updatedAt"].as_i64().unwrap() >= map[&id]["createdAt"].as_i64().unwrap());
}

#[test]
fn delete_missing_prompt_is_not_found() {
    let env = support::TestEnv::new();
    let store = env.store();

    let err = prompts::delete(&store, AppKey::Claude, "prompt-missing").expect_err("delete");
    assert_eq!(err.code(), "STORE_NOT_FOUND");
}
