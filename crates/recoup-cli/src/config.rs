// Copyright 2026 the recoup authors
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use recoup_app::Section;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_VERSION: i64 = 1;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub portfolio: Portfolio,
    #[serde(default)]
    pub upload: Upload,
    #[serde(default)]
    pub ui: Ui,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            portfolio: Portfolio::default(),
            upload: Upload::default(),
            ui: Ui::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Portfolio {
    pub records_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Upload {
    pub spool_dir: Option<String>,
    pub max_document_size: Option<i64>,
}

impl Default for Upload {
    fn default() -> Self {
        Self {
            spool_dir: None,
            max_document_size: Some(recoup_data::MAX_DOCUMENT_SIZE),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub start_section: Option<String>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            start_section: Some(Section::Portfolio.label().to_owned()),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("RECOUP_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set RECOUP_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(recoup_data::APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [portfolio], [upload], and [ui]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(max_size) = self.upload.max_document_size
            && max_size <= 0
        {
            bail!(
                "upload.max_document_size in {} must be positive, got {}",
                path.display(),
                max_size
            );
        }

        if let Some(section) = &self.ui.start_section
            && Section::parse(section).is_none()
        {
            bail!(
                "ui.start_section in {} is {:?}; use one of the section names (for example \"portfolio\")",
                path.display(),
                section
            );
        }

        Ok(())
    }

    pub fn records_path(&self) -> Option<PathBuf> {
        self.portfolio.records_path.as_ref().map(PathBuf::from)
    }

    pub fn spool_dir(&self) -> Result<PathBuf> {
        match &self.upload.spool_dir {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => recoup_data::default_spool_dir(),
        }
    }

    pub fn max_document_size(&self) -> i64 {
        self.upload
            .max_document_size
            .unwrap_or(recoup_data::MAX_DOCUMENT_SIZE)
    }

    pub fn start_section(&self) -> Section {
        self.ui
            .start_section
            .as_deref()
            .and_then(Section::parse)
            .unwrap_or(Section::Portfolio)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# recoup config\n# Place this file at: {}\n\nversion = 1\n\n[portfolio]\n# Optional. Default is the built-in seed portfolio.\n# records_path = \"/absolute/path/to/records.json\"\n\n[upload]\n# Optional. Default is platform data dir (for example ~/.local/share/recoup/spool)\n# spool_dir = \"/absolute/path/to/spool\"\nmax_document_size = {}\n\n[ui]\nstart_section = \"portfolio\"\n",
            path.display(),
            recoup_data::MAX_DOCUMENT_SIZE,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use anyhow::Result;
    use recoup_app::Section;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert!(config.records_path().is_none());
        assert_eq!(config.start_section(), Section::Portfolio);
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[portfolio]\nrecords_path = \"/tmp/records.json\"\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[portfolio], [upload], and [ui]"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 9\n")?;
        let error = Config::load(&path).expect_err("future version should fail");
        assert!(error.to_string().contains("unsupported config version 9"));
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn v1_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[portfolio]\nrecords_path = \"/data/records.json\"\n[upload]\nspool_dir = \"/data/spool\"\nmax_document_size = 1024\n[ui]\nstart_section = \"dashboard\"\n",
        )?;
        let config = Config::load(&path)?;
        assert_eq!(config.records_path(), Some(PathBuf::from("/data/records.json")));
        assert_eq!(config.spool_dir()?, PathBuf::from("/data/spool"));
        assert_eq!(config.max_document_size(), 1024);
        assert_eq!(config.start_section(), Section::Dashboard);
        Ok(())
    }

    #[test]
    fn non_positive_document_size_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[upload]\nmax_document_size = 0\n")?;
        let error = Config::load(&path).expect_err("zero size should fail");
        assert!(error.to_string().contains("must be positive"));
        Ok(())
    }

    #[test]
    fn unknown_start_section_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\nstart_section = \"mainframe\"\n")?;
        let error = Config::load(&path).expect_err("unknown section should fail");
        assert!(error.to_string().contains("ui.start_section"));
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("RECOUP_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("RECOUP_CONFIG_PATH");
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn default_path_uses_config_toml_suffix_when_no_env_override() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var("RECOUP_CONFIG_PATH");
        }
        let path = Config::default_path()?;
        assert!(path.ends_with("config.toml"));
        Ok(())
    }

    #[test]
    fn spool_dir_prefers_config_over_env_override() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) = write_config("version = 1\n[upload]\nspool_dir = \"/explicit/spool\"\n")?;
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("RECOUP_SPOOL_DIR", "/from/env/spool");
        }
        let config = Config::load(&path)?;
        let resolved = config.spool_dir()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("RECOUP_SPOOL_DIR");
        }
        assert_eq!(resolved, PathBuf::from("/explicit/spool"));
        Ok(())
    }

    #[test]
    fn example_config_includes_required_sections() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        assert!(example.contains("[portfolio]"));
        assert!(example.contains("[upload]"));
        assert!(example.contains("[ui]"));
        let parsed: toml::Value = toml::from_str(&example)?;
        assert_eq!(parsed.get("version").and_then(toml::Value::as_integer), Some(1));
        Ok(())
    }
}
