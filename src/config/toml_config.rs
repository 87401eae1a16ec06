use crate::core::resolver::DEFAULT_SUFFIX_OVERRIDES;
use crate::domain::model::{
    PreviewLimits, DEFAULT_MAIN_FOLDER_TITLE, DEFAULT_PREFERRED_PARENT_TITLE,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SorterError};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_suffix, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub domains: DomainsConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    pub main_folder_title: Option<String>,
    pub preferred_parent_title: Option<String>,
    /// Skips the positional parent lookup when set.
    pub target_parent_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainsConfig {
    /// Replaces the built-in suffix list.
    pub suffix_overrides: Option<Vec<String>>,
    /// Added on top of the active suffix list.
    pub extra_suffixes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewConfig {
    pub max_domains: Option<usize>,
    pub max_items_per_domain: Option<usize>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SorterError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SorterError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` placeholders with environment values; unset ones stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SorterError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(title) = &self.sync.main_folder_title {
            validate_non_empty_string("sync.main_folder_title", title)?;
        }
        if let Some(title) = &self.sync.preferred_parent_title {
            validate_non_empty_string("sync.preferred_parent_title", title)?;
        }
        if let Some(id) = &self.sync.target_parent_id {
            validate_non_empty_string("sync.target_parent_id", id)?;
        }

        for suffix in self.domains.suffix_overrides.iter().flatten() {
            validate_suffix("domains.suffix_overrides", suffix)?;
        }
        for suffix in self.domains.extra_suffixes.iter().flatten() {
            validate_suffix("domains.extra_suffixes", suffix)?;
        }

        if let Some(max) = self.preview.max_domains {
            validate_positive_number("preview.max_domains", max, 1)?;
        }
        if let Some(max) = self.preview.max_items_per_domain {
            validate_positive_number("preview.max_items_per_domain", max, 1)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn main_folder_title(&self) -> &str {
        self.sync
            .main_folder_title
            .as_deref()
            .unwrap_or(DEFAULT_MAIN_FOLDER_TITLE)
    }

    fn preferred_parent_title(&self) -> &str {
        self.sync
            .preferred_parent_title
            .as_deref()
            .unwrap_or(DEFAULT_PREFERRED_PARENT_TITLE)
    }

    fn target_parent_id(&self) -> Option<&str> {
        self.sync.target_parent_id.as_deref()
    }

    fn suffix_overrides(&self) -> Vec<String> {
        let mut suffixes = match &self.domains.suffix_overrides {
            Some(list) => list.clone(),
            None => DEFAULT_SUFFIX_OVERRIDES.iter().map(|s| s.to_string()).collect(),
        };
        suffixes.extend(self.domains.extra_suffixes.iter().flatten().cloned());
        suffixes
    }

    fn preview_limits(&self) -> PreviewLimits {
        let defaults = PreviewLimits::default();
        PreviewLimits {
            max_domains: self.preview.max_domains.unwrap_or(defaults.max_domains),
            max_items_per_domain: self
                .preview
                .max_items_per_domain
                .unwrap_or(defaults.max_items_per_domain),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
