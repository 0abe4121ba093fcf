use dirs::config_dir;
use once_cell::sync::Lazy;
use std::path::PathBuf;

pub const CONFIG_ENV: &str = "BAND_SITE_CONFIG";

static CONFIG_ROOT: Lazy<PathBuf> = Lazy::new(|| {
    let base = config_dir()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    base.join("band-site")
});

pub fn config_root() -> PathBuf {
    CONFIG_ROOT.clone()
}

/// `$BAND_SITE_CONFIG` when set, otherwise `config.json` under the user config dir.
pub fn config_path() -> PathBuf {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => config_root().join("config.json"),
    }
}
