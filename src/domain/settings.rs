//! Usage: Tool-wide user settings (language / theme / auto-sync).

use crate::infra::store::Store;
use crate::shared::error::AppResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    pub language: String,
    pub theme: String,
    pub auto_sync: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            language: "zh".to_string(),
            theme: "system".to_string(),
            auto_sync: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub language: Option<String>,
    pub theme: Option<String>,
    pub auto_sync: Option<bool>,
}

pub fn get(store: &Store) -> UserSettings {
    store.read().settings
}

pub fn update(store: &Store, patch: SettingsPatch) -> AppResult<()> {
    store.mutate(|aggregate| {
        if let Some(language) = patch.language {
            aggregate.settings.language = language;
        }
        if let Some(theme) = patch.theme {
            aggregate.settings.theme = theme;
        }
        if let Some(auto_sync) = patch.auto_sync {
            aggregate.settings.auto_sync = auto_sync;
        }
        Ok(())
    })
}
