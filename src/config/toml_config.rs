use crate::domain::model::{
    DatasetFiles, DEFAULT_CLUSTERS_FILE, DEFAULT_COUNTRY_CODE_MAP_FILE,
    DEFAULT_COUNTRY_TO_COUNTRY_FILE,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AtlasError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AtlasConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_root")]
    pub root: String,
    #[serde(default = "default_country_to_country_file")]
    pub country_to_country_file: String,
    #[serde(default = "default_clusters_file")]
    pub clusters_file: String,
    #[serde(default = "default_country_code_map_file")]
    pub country_code_map_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            country_to_country_file: default_country_to_country_file(),
            clusters_file: default_clusters_file(),
            country_code_map_file: default_country_code_map_file(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

fn default_root() -> String {
    "./data".to_string()
}

fn default_country_to_country_file() -> String {
    DEFAULT_COUNTRY_TO_COUNTRY_FILE.to_string()
}

fn default_clusters_file() -> String {
    DEFAULT_CLUSTERS_FILE.to_string()
}

fn default_country_code_map_file() -> String {
    DEFAULT_COUNTRY_CODE_MAP_FILE.to_string()
}

impl AtlasConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AtlasError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AtlasError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_ROOT})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AtlasError::ConfigValidationError {
            field: "environment".to_string(),
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("data.root", &self.data.root)?;

        validation::validate_dataset_file_name(
            "data.country_to_country_file",
            &self.data.country_to_country_file,
        )?;
        validation::validate_dataset_file_name("data.clusters_file", &self.data.clusters_file)?;
        validation::validate_dataset_file_name(
            "data.country_code_map_file",
            &self.data.country_code_map_file,
        )?;

        validation::validate_distinct(
            "data",
            &[
                self.data.country_to_country_file.as_str(),
                self.data.clusters_file.as_str(),
                self.data.country_code_map_file.as_str(),
            ],
        )?;

        Ok(())
    }
}

impl ConfigProvider for AtlasConfig {
    fn data_root(&self) -> &str {
        &self.data.root
    }

    fn dataset_files(&self) -> DatasetFiles {
        DatasetFiles {
            country_to_country: self.data.country_to_country_file.clone(),
            clusters: self.data.clusters_file.clone(),
            country_code_map: self.data.country_code_map_file.clone(),
        }
    }
}

impl Validate for AtlasConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
