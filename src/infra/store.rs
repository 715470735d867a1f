//! Usage: Single-blob JSON persistence for the whole aggregate (providers / MCP / prompts / settings).
//!
//! Every mutation is a read-modify-write of the full aggregate under one mutex;
//! an absent or unreadable data file reads as the empty default shape.

use crate::domain::mcp::McpServer;
use crate::domain::prompts::Prompt;
use crate::domain::providers::{
    AppConfig, ClaudeProviderConfig, CodexProviderConfig, GeminiProviderConfig,
};
use crate::domain::settings::UserSettings;
use crate::infra::app_paths;
use crate::infra::fs_util::write_file_atomic;
use crate::shared::app_key::AppKey;
use crate::shared::error::{store_err, AppResult};
use crate::shared::mutex_ext::MutexExt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct McpSection {
    pub servers: BTreeMap<String, McpServer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptsSection {
    pub claude: BTreeMap<String, Prompt>,
    pub codex: BTreeMap<String, Prompt>,
    pub gemini: BTreeMap<String, Prompt>,
}

impl PromptsSection {
    pub fn for_app(&self, app: AppKey) -> &BTreeMap<String, Prompt> {
        match app {
            AppKey::Claude => &self.claude,
            AppKey::Codex => &self.codex,
            AppKey::Gemini => &self.gemini,
        }
    }

    pub fn for_app_mut(&mut self, app: AppKey) -> &mut BTreeMap<String, Prompt> {
        match app {
            AppKey::Claude => &mut self.claude,
            AppKey::Codex => &mut self.codex,
            AppKey::Gemini => &mut self.gemini,
        }
    }
}

/// The aggregate root. Owned exclusively by the [`Store`]; read and rewritten
/// as one unit on every mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Aggregate {
    pub claude: AppConfig<ClaudeProviderConfig>,
    pub codex: AppConfig<CodexProviderConfig>,
    pub gemini: AppConfig<GeminiProviderConfig>,
    pub mcp: McpSection,
    pub prompts: PromptsSection,
    pub settings: UserSettings,
}

pub struct Store {
    data_path: PathBuf,
    write_lock: Mutex<()>,
}

impl Store {
    pub fn new(data_path: PathBuf) -> Self {
        Self {
            data_path,
            write_lock: Mutex::new(()),
        }
    }

    /// Store rooted at `$CC_SWITCH_DATA_DIR` (default `~/.cc-switch`).
    pub fn open_default() -> AppResult<Self> {
        Ok(Self::new(app_paths::data_file_path()?))
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Load the aggregate. Absent or unparseable data reads as the default
    /// shape; read failures are never surfaced.
    pub fn read(&self) -> Aggregate {
        read_aggregate(&self.data_path)
    }

    /// Read-modify-write the whole aggregate. The closure's error aborts the
    /// write; nothing is persisted unless it returns `Ok`.
    pub fn mutate<F>(&self, apply: F) -> AppResult<()>
    where
        F: FnOnce(&mut Aggregate) -> AppResult<()>,
    {
        let _guard = self.write_lock.lock_or_recover();
        let mut aggregate = read_aggregate(&self.data_path);
        apply(&mut aggregate)?;
        write_aggregate(&self.data_path, &aggregate)
    }

    /// Replace the aggregate wholesale (config import).
    pub fn replace(&self, aggregate: Aggregate) -> AppResult<()> {
        let _guard = self.write_lock.lock_or_recover();
        write_aggregate(&self.data_path, &aggregate)
    }
}

fn read_aggregate(path: &Path) -> Aggregate {
    let Ok(bytes) = std::fs::read(path) else {
        return Aggregate::default();
    };

    match serde_json::from_slice::<Aggregate>(&bytes) {
        Ok(aggregate) => aggregate,
        Err(err) => {
            tracing::warn!(path = %path.display(), "数据文件解析失败，使用空配置: {}", err);
            Aggregate::default()
        }
    }
}

fn write_aggregate(path: &Path, aggregate: &Aggregate) -> AppResult<()> {
    let bytes = serde_json::to_vec_pretty(aggregate)
        .map_err(|e| store_err!("failed to serialize aggregate: {e}"))?;
    write_file_atomic(path, &bytes).map_err(|e| store_err!("{e}"))
}
