use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock};

use cc_switch_web_lib::store::Store;
use tempfile::TempDir;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .expect("lock test env")
}

#[derive(Default)]
struct EnvRestore {
    saved: Vec<(&'static str, Option<OsString>)>,
}

impl EnvRestore {
    fn save_once(&mut self, key: &'static str) {
        if self.saved.iter().any(|(k, _)| *k == key) {
            return;
        }
        self.saved.push((key, std::env::var_os(key)));
    }

    fn set_var(&mut self, key: &'static str, value: impl Into<OsString>) {
        self.save_once(key);
        std::env::set_var(key, value.into());
    }

    fn remove_var(&mut self, key: &'static str) {
        self.save_once(key);
        std::env::remove_var(key);
    }
}

impl Drop for EnvRestore {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..).rev() {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}

pub struct TestEnv {
    _lock: MutexGuard<'static, ()>,
    _env: EnvRestore,
    home: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let lock = env_lock();
        let home = tempfile::tempdir().expect("tempdir");

        let mut env = EnvRestore::default();
        let home_os = home.path().as_os_str().to_os_string();

        env.set_var("HOME", home_os.clone());
        // Windows fallback env for home resolution.
        env.set_var("USERPROFILE", home_os);

        // Keep the aggregate inside the isolated HOME.
        env.set_var("CC_SWITCH_DATA_DIR", home.path().join("cc-switch-data"));

        // Default to ~/.codex for deterministic path behavior.
        env.remove_var("CODEX_HOME");

        Self {
            _lock: lock,
            _env: env,
            home,
        }
    }

    pub fn store(&self) -> Store {
        Store::open_default().expect("open store")
    }

    #[allow(dead_code)]
    pub fn home_dir(&self) -> &Path {
        self.home.path()
    }

    #[allow(dead_code)]
    pub fn claude_settings_path(&self) -> PathBuf {
        self.home.path().join(".claude").join("settings.json")
    }

    #[allow(dead_code)]
    pub fn codex_auth_path(&self) -> PathBuf {
        self.home.path().join(".codex").join("auth.json")
    }

    #[allow(dead_code)]
    pub fn codex_config_path(&self) -> PathBuf {
        self.home.path().join(".codex").join("config.toml")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
