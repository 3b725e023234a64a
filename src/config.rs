use std::sync::LazyLock;

use derive_from_env::FromEnv;

#[derive(FromEnv)]
#[from_env(prefix = "USLOG")]
#[allow(non_snake_case)]
pub struct UslogConfig {
    /// Path of the append-mode log file. Empty means log to stderr.
    #[from_env(default = "")]
    pub FILE: String,
}

pub static USLOG_CONFIG: LazyLock<UslogConfig> = LazyLock::new(|| UslogConfig::from_env().unwrap());
