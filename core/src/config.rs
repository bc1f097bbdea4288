use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, Result, TemplateError};
use crate::runtime::Runtime;

pub const PROJECT_NAME_PLACEHOLDER: &str = "{{project_name}}";
pub const RUNTIME_PLACEHOLDER: &str = "{{runtime}}";

/// Names a YAML file holding the template values.
pub const CONFIG_PATH_ENV: &str = "TEMPLATE_CONFIG_PATH";
/// Holds the template values as inline YAML.
pub const CONFIG_ENV: &str = "TEMPLATE_CONFIG";

/// Values the project generator substitutes into the handler.
///
/// They are resolved once when the process starts and never per request. Missing
/// fields keep their literal placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub project_name: String,
    pub runtime: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            project_name: PROJECT_NAME_PLACEHOLDER.to_string(),
            runtime: RUNTIME_PLACEHOLDER.to_string(),
        }
    }
}

/// Loads the template values from the process environment.
///
/// `TEMPLATE_CONFIG_PATH` wins over `TEMPLATE_CONFIG`; with neither set the
/// placeholders stay literal.
pub fn load_config() -> Result<TemplateConfig> {
    let path = std::env::var(CONFIG_PATH_ENV).ok();
    let inline = std::env::var(CONFIG_ENV).ok();
    load_config_from(path.as_deref(), inline.as_deref())
}

/// Resolves and normalizes the template values, naming the source on failure.
pub fn load_config_from(path: Option<&str>, inline: Option<&str>) -> Result<TemplateConfig> {
    let origin = match (path, inline) {
        (Some(path), _) => path.to_string(),
        (None, Some(_)) => CONFIG_ENV.to_string(),
        (None, None) => "defaults".to_string(),
    };

    TemplateConfig::resolve(path, inline)
        .and_then(TemplateConfig::normalized)
        .map_err(|e| {
            TemplateError::Config(ConfigError::LoadFailed {
                origin,
                error: e.into(),
            })
        })
}

impl TemplateConfig {
    pub fn for_runtime(project_name: impl Into<String>, runtime: Runtime) -> Self {
        Self {
            project_name: project_name.into(),
            runtime: runtime.to_string(),
        }
    }

    pub fn resolve(path: Option<&str>, inline: Option<&str>) -> anyhow::Result<Self> {
        match (path, inline) {
            (Some(path), _) => Self::from_file(path),
            (None, Some(yaml)) => Self::from_yaml_str(yaml),
            (None, None) => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read template config {}: {}", path, e))?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config: TemplateConfig = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.project_name.trim().is_empty() {
            return Err(anyhow::anyhow!("Project name cannot be empty"));
        }
        if self.runtime.trim().is_empty() {
            return Err(anyhow::anyhow!("Runtime cannot be empty"));
        }
        self.parsed_runtime()?;
        Ok(())
    }

    /// `None` while the runtime is still the placeholder.
    pub fn parsed_runtime(&self) -> anyhow::Result<Option<Runtime>> {
        if self.runtime == RUNTIME_PLACEHOLDER {
            return Ok(None);
        }
        Ok(Some(self.runtime.parse::<Runtime>()?))
    }

    /// Validates, then rewrites a known runtime to its display name (`python` -> `Python`).
    pub fn normalized(self) -> anyhow::Result<Self> {
        self.validate()?;
        match self.parsed_runtime()? {
            Some(runtime) => Ok(Self::for_runtime(self.project_name, runtime)),
            None => Ok(self),
        }
    }

    /// True while either value is still the generator's literal placeholder.
    pub fn has_placeholders(&self) -> bool {
        self.project_name == PROJECT_NAME_PLACEHOLDER || self.runtime == RUNTIME_PLACEHOLDER
    }

    pub fn greeting(&self) -> String {
        format!("Hello from {} in {}", self.project_name, self.runtime)
    }
}
