use config::{Config, ConfigError, File, FileFormat};
use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::defaults::DEFAULT_BACKEND_BASE_URL;

/// Name of the repository-local config file.
pub const LOCAL_CONFIG_FILE: &str = ".flakechartconfig";

/// System-wide config path (XDG_CONFIG_HOME or ~/.config/flake-chart/config.toml)
pub fn system_config_path() -> Option<PathBuf> {
    if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME") {
        return Some(
            Path::new(&xdg_config_home)
                .join("flake-chart")
                .join("config.toml"),
        );
    }
    dirs_next::home_dir().map(|home| home.join(".config").join("flake-chart").join("config.toml"))
}

/// Closest local config file, searching upward from the working directory.
pub fn find_local_config_path() -> Option<PathBuf> {
    let mut current_dir = env::current_dir().ok()?;
    loop {
        let candidate = current_dir.join(LOCAL_CONFIG_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current_dir.pop() {
            return None;
        }
    }
}

/// Read hierarchical configuration (system -> local override)
pub fn read_hierarchical_config() -> Result<Config, ConfigError> {
    let mut builder = Config::builder();

    if let Some(system_config_path) = system_config_path() {
        builder = builder.add_source(
            File::from(system_config_path)
                .format(FileFormat::Toml)
                .required(false),
        );
    }

    if let Some(local_path) = find_local_config_path() {
        builder = builder.add_source(
            File::from(local_path)
                .format(FileFormat::Toml)
                .required(false),
        );
    }

    builder.build()
}

fn read_config() -> Option<Config> {
    match read_hierarchical_config() {
        Ok(config) => Some(config),
        Err(e) => {
            log::warn!("Could not read configuration: {}", e);
            None
        }
    }
}

/// Returns the backend base URL from config, or the built-in default.
pub fn backend_base_url() -> String {
    read_config()
        .and_then(|config| config.get_string("backend.base_url").ok())
        .unwrap_or_else(|| DEFAULT_BACKEND_BASE_URL.to_string())
}

/// Returns the request timeout from config. No timeout if not set.
pub fn backend_timeout() -> Option<Duration> {
    let seconds = read_config()?.get_int("backend.timeout_seconds").ok()?;
    match u64::try_from(seconds) {
        Ok(seconds) if seconds > 0 => Some(Duration::from_secs(seconds)),
        _ => {
            log::warn!("Ignoring non-positive backend.timeout_seconds: {}", seconds);
            None
        }
    }
}

/// Returns the page title from config, if set.
pub fn report_title() -> Option<String> {
    read_config()?.get_string("report.title").ok()
}

/// Returns the custom CSS path from config, if set.
pub fn report_custom_css_path() -> Option<PathBuf> {
    read_config()?
        .get_string("report.custom_css")
        .ok()
        .map(PathBuf::from)
}

#[cfg(test)]
mod test {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    /// Runs `f` with HOME and the working directory pointing into a fresh
    /// temporary directory.
    fn with_isolated_home<F, R>(f: F) -> R
    where
        F: FnOnce(&Path) -> R,
    {
        let temp_dir = TempDir::new().unwrap();
        let original_home = env::var("HOME").ok();
        let original_xdg = env::var("XDG_CONFIG_HOME").ok();
        let original_dir = env::current_dir().unwrap();

        env::set_var("HOME", temp_dir.path());
        env::remove_var("XDG_CONFIG_HOME");
        env::set_current_dir(temp_dir.path()).unwrap();

        let result = f(temp_dir.path());

        env::set_current_dir(original_dir).unwrap();
        if let Some(home) = original_home {
            env::set_var("HOME", home);
        } else {
            env::remove_var("HOME");
        }
        if let Some(xdg) = original_xdg {
            env::set_var("XDG_CONFIG_HOME", xdg);
        } else {
            env::remove_var("XDG_CONFIG_HOME");
        }

        result
    }

    #[test]
    #[serial]
    fn test_hierarchical_config() {
        with_isolated_home(|home| {
            // Nothing configured
            assert_eq!(backend_base_url(), DEFAULT_BACKEND_BASE_URL);
            assert_eq!(backend_timeout(), None);
            assert_eq!(report_title(), None);
            assert_eq!(report_custom_css_path(), None);

            // System config
            let system_dir = home.join(".config").join("flake-chart");
            fs::create_dir_all(&system_dir).unwrap();
            fs::write(
                system_dir.join("config.toml"),
                "[backend]\nbase_url = \"http://system:8080\"\ntimeout_seconds = 30\n\n[report]\ntitle = \"System\"\n",
            )
            .unwrap();
            assert_eq!(backend_base_url(), "http://system:8080");
            assert_eq!(backend_timeout(), Some(Duration::from_secs(30)));
            assert_eq!(report_title().as_deref(), Some("System"));

            // Local config in a parent directory overrides the system config
            let nested = home.join("repo").join("sub");
            fs::create_dir_all(&nested).unwrap();
            fs::write(
                home.join("repo").join(LOCAL_CONFIG_FILE),
                "[backend]\nbase_url = \"http://local:9090\"\ntimeout_seconds = 0\n\n[report]\ncustom_css = \"style.css\"\n",
            )
            .unwrap();
            env::set_current_dir(&nested).unwrap();
            assert_eq!(backend_base_url(), "http://local:9090");
            assert_eq!(backend_timeout(), None);
            assert_eq!(report_title().as_deref(), Some("System"));
            assert_eq!(report_custom_css_path(), Some(PathBuf::from("style.css")));
            assert_eq!(
                find_local_config_path(),
                Some(home.join("repo").join(LOCAL_CONFIG_FILE))
            );

            // Broken local config falls back to defaults
            fs::write(home.join("repo").join(LOCAL_CONFIG_FILE), "[backend\n").unwrap();
            assert_eq!(backend_base_url(), DEFAULT_BACKEND_BASE_URL);
        });
    }

    #[test]
    #[serial]
    fn test_xdg_config_home_is_preferred() {
        let original = env::var("XDG_CONFIG_HOME").ok();
        env::set_var("XDG_CONFIG_HOME", "/tmp/xdg");
        assert_eq!(
            system_config_path(),
            Some(PathBuf::from("/tmp/xdg/flake-chart/config.toml"))
        );
        match original {
            Some(xdg) => env::set_var("XDG_CONFIG_HOME", xdg),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }
    }
}
