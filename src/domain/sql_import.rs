//! Usage: Legacy SQLite-dump import: scrape `INSERT` statements for the
//! `providers` / `mcp_servers` / `prompts` tables and rebuild the store
//! contents with a destructive full replace.

mod scan;

pub use scan::{extract_rows, parse_value, RowIter, SqlRow, SqlValue};

use crate::domain::mcp::{McpApps, McpServer, McpServerSpec};
use crate::domain::prompts::Prompt;
use crate::domain::providers::{AppConfig, Provider, ProviderCategory};
use crate::infra::store::{Aggregate, Store};
use crate::shared::app_key::AppKey;
use crate::shared::error::AppResult;
use crate::shared::ids::new_scoped_id;
use crate::shared::time::now_unix_millis;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Rows matched by the extractor per table. A row that is later skipped for a
/// parse failure still counts; callers cannot tell "imported" from "skipped"
/// here, which matches the UI's historical expectations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlImportCounts {
    pub providers: u32,
    pub mcp_servers: u32,
    pub prompts: u32,
}

pub fn import_from_sql(store: &Store, sql: &str) -> AppResult<SqlImportCounts> {
    let mut counts = SqlImportCounts::default();

    store.mutate(|aggregate| {
        // Full replace: discard every category the dump covers before merging.
        aggregate.claude = AppConfig::default();
        aggregate.codex = AppConfig::default();
        aggregate.gemini = AppConfig::default();
        aggregate.mcp.servers.clear();
        aggregate.prompts = Default::default();

        for row in extract_rows(sql, "providers") {
            counts.providers += 1;
            if let Err(err) = merge_provider_row(aggregate, &row) {
                tracing::warn!("skipping providers row: {}", err);
            }
        }

        for row in extract_rows(sql, "mcp_servers") {
            counts.mcp_servers += 1;
            if let Err(err) = merge_mcp_row(aggregate, &row) {
                tracing::warn!("skipping mcp_servers row: {}", err);
            }
        }

        for row in extract_rows(sql, "prompts") {
            counts.prompts += 1;
            if let Err(err) = merge_prompt_row(aggregate, &row) {
                tracing::warn!("skipping prompts row: {}", err);
            }
        }

        Ok(())
    })?;

    Ok(counts)
}

fn require_text<'r>(row: &'r SqlRow, column: &str) -> AppResult<&'r str> {
    let value = row.text(column);
    if value.is_empty() {
        return Err(format!("IMPORT_ERROR: column {column} is empty").into());
    }
    Ok(value)
}

fn parse_category(raw: &str) -> ProviderCategory {
    match raw {
        "official" => ProviderCategory::Official,
        "third_party" => ProviderCategory::ThirdParty,
        _ => ProviderCategory::Custom,
    }
}

fn merge_provider_row(aggregate: &mut Aggregate, row: &SqlRow) -> AppResult<()> {
    let app = AppKey::parse(require_text(row, "app_type")?)?;
    require_text(row, "id")?;

    match app {
        AppKey::Claude => merge_provider_into(&mut aggregate.claude, app, row),
        AppKey::Codex => merge_provider_into(&mut aggregate.codex, app, row),
        AppKey::Gemini => merge_provider_into(&mut aggregate.gemini, app, row),
    }
}

fn merge_provider_into<C>(config: &mut AppConfig<C>, app: AppKey, row: &SqlRow) -> AppResult<()>
where
    C: DeserializeOwned + Default,
{
    let raw_config = row.text("settings_config");
    let settings_config: C = if raw_config.trim().is_empty() {
        C::default()
    } else {
        serde_json::from_str(raw_config)
            .map_err(|e| format!("IMPORT_ERROR: invalid settings_config json: {e}"))?
    };

    // Fresh scoped id: legacy row ids are never reused, so re-imports cannot
    // collide with anything created since.
    let id = new_scoped_id(app.as_str());
    config.providers.insert(
        id.clone(),
        Provider {
            id: id.clone(),
            name: row.text("name").to_string(),
            website_url: row.opt_text("website_url"),
            notes: row.opt_text("notes"),
            settings_config,
            category: parse_category(row.text("category")),
            created_at: Some(row.int("created_at").unwrap_or_else(now_unix_millis)),
        },
    );

    if row.flag("is_current") {
        config.current = id;
    }
    Ok(())
}

fn merge_mcp_row(aggregate: &mut Aggregate, row: &SqlRow) -> AppResult<()> {
    require_text(row, "id")?;

    let config: Value = serde_json::from_str(row.text("server_config"))
        .map_err(|e| format!("IMPORT_ERROR: invalid server_config json: {e}"))?;

    let server = match config.get("server") {
        Some(spec) => serde_json::from_value::<McpServerSpec>(spec.clone())
            .map_err(|e| format!("IMPORT_ERROR: invalid server spec: {e}"))?,
        None => McpServerSpec::empty_stdio(),
    };
    let enabled = config.get("enabled").and_then(Value::as_bool).unwrap_or(true);

    // tags degrade to empty on absence or bad json, not to a skipped row.
    let tags = serde_json::from_str::<Vec<String>>(row.text("tags")).unwrap_or_default();

    let id = new_scoped_id("mcp");
    aggregate.mcp.servers.insert(
        id.clone(),
        McpServer {
            id,
            name: row.text("name").to_string(),
            enabled,
            apps: McpApps {
                claude: row.flag("claude_enabled"),
                codex: row.flag("codex_enabled"),
                gemini: row.flag("gemini_enabled"),
            },
            server,
            description: row.opt_text("description"),
            homepage: row.opt_text("homepage"),
            docs: row.opt_text("docs"),
            tags,
        },
    );
    Ok(())
}

fn merge_prompt_row(aggregate: &mut Aggregate, row: &SqlRow) -> AppResult<()> {
    let app = AppKey::parse(require_text(row, "app_type")?)?;
    require_text(row, "id")?;

    let id = new_scoped_id("prompt");
    aggregate.prompts.for_app_mut(app).insert(
        id.clone(),
        Prompt {
            id,
            name: row.text("name").to_string(),
            content: row.text("content").to_string(),
            description: row.opt_text("description"),
            enabled: row.flag("enabled"),
            created_at: row.int("created_at"),
            updated_at: row.int("updated_at"),
        },
    );
    Ok(())
}
