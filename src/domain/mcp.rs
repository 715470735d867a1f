//! Usage: MCP server definitions (stdio process / HTTP endpoint) with per-app enablement.

use crate::infra::store::Store;
use crate::shared::error::{AppError, AppResult};
use crate::shared::ids::new_scoped_id;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpApps {
    #[serde(default)]
    pub claude: bool,
    #[serde(default)]
    pub codex: bool,
    #[serde(default)]
    pub gemini: bool,
}

/// Transport spec. The tag is immutable after creation; `command` / `url`
/// requiredness is carried by the variant shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum McpServerSpec {
    Stdio {
        command: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        env: Option<BTreeMap<String, String>>,
    },
    Http { url: String },
}

impl McpServerSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Stdio { .. } => "stdio",
            Self::Http { .. } => "http",
        }
    }

    pub fn empty_stdio() -> Self {
        Self::Stdio {
            command: String::new(),
            args: Vec::new(),
            env: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpServer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub apps: McpApps,
    pub server: McpServerSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpServerInput {
    pub name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub apps: McpApps,
    pub server: McpServerSpec,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub docs: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpServerPatch {
    pub name: Option<String>,
    pub enabled: Option<bool>,
    pub apps: Option<McpApps>,
    pub server: Option<McpServerSpec>,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub docs: Option<String>,
    pub tags: Option<Vec<String>>,
}

fn to_json<T: Serialize>(value: &T) -> AppResult<Value> {
    serde_json::to_value(value).map_err(|e| format!("SYSTEM_ERROR: failed to serialize: {e}").into())
}

pub fn list(store: &Store) -> AppResult<Value> {
    to_json(&store.read().mcp.servers)
}

pub fn add(store: &Store, input: Value) -> AppResult<String> {
    let input: McpServerInput = serde_json::from_value(input)
        .map_err(|e| format!("SEC_INVALID_INPUT: invalid mcp server payload: {e}"))?;

    let id = new_scoped_id("mcp");
    store.mutate(|aggregate| {
        aggregate.mcp.servers.insert(
            id.clone(),
            McpServer {
                id: id.clone(),
                name: input.name,
                enabled: input.enabled,
                apps: input.apps,
                server: input.server,
                description: input.description,
                homepage: input.homepage,
                docs: input.docs,
                tags: input.tags,
            },
        );
        Ok(())
    })?;

    Ok(id)
}

/// Shallow merge of the patch, including the per-app enablement toggle.
/// Changing `server.type` is rejected; the transport is fixed at creation.
pub fn update(store: &Store, id: &str, patch: Value) -> AppResult<()> {
    let patch: McpServerPatch = serde_json::from_value(patch)
        .map_err(|e| format!("SEC_INVALID_INPUT: invalid mcp server payload: {e}"))?;

    store.mutate(|aggregate| {
        let Some(existing) = aggregate.mcp.servers.get_mut(id) else {
            return Err(AppError::from("STORE_NOT_FOUND: Server not found"));
        };

        if let Some(server) = patch.server {
            if server.kind() != existing.server.kind() {
                return Err(format!(
                    "SEC_INVALID_INPUT: server type is immutable, expected {}",
                    existing.server.kind()
                )
                .into());
            }
            existing.server = server;
        }
        if let Some(name) = patch.name {
            existing.name = name;
        }
        if let Some(enabled) = patch.enabled {
            existing.enabled = enabled;
        }
        if let Some(apps) = patch.apps {
            existing.apps = apps;
        }
        if let Some(description) = patch.description {
            existing.description = Some(description);
        }
        if let Some(homepage) = patch.homepage {
            existing.homepage = Some(homepage);
        }
        if let Some(docs) = patch.docs {
            existing.docs = Some(docs);
        }
        if let Some(tags) = patch.tags {
            existing.tags = tags;
        }
        Ok(())
    })
}

pub fn delete(store: &Store, id: &str) -> AppResult<()> {
    store.mutate(|aggregate| {
        if aggregate.mcp.servers.remove(id).is_none() {
            return Err(AppError::from("STORE_NOT_FOUND: Server not found"));
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn spec_tag_round_trips() {
        let stdio: McpServerSpec =
            serde_json::from_value(json!({"type": "stdio", "command": "npx", "args": ["-y", "exa-mcp"]}))
                .expect("stdio spec");
        assert_eq!(stdio.kind(), "stdio");

        let http: McpServerSpec =
            serde_json::from_value(json!({"type": "http", "url": "https://mcp.example.com"}))
                .expect("http spec");
        assert_eq!(http.kind(), "http");
        assert_eq!(serde_json::to_value(&http).expect("value")["type"], "http");
    }

    #[test]
    fn stdio_spec_requires_command() {
        let err = serde_json::from_value::<McpServerSpec>(json!({"type": "stdio"}));
        assert!(err.is_err());
    }

    #[test]
    fn http_spec_requires_url() {
        let err = serde_json::from_value::<McpServerSpec>(json!({"type": "http"}));
        assert!(err.is_err());
    }

    #[test]
    fn input_enabled_defaults_to_true() {
        let input: McpServerInput = serde_json::from_value(
            json!({"name": "exa", "server": {"type": "http", "url": "https://mcp.example.com"}}),
        )
        .expect("input");
        assert!(input.enabled);
        assert!(!input.apps.claude);
    }
}
