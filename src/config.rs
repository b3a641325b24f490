use crate::error::{AdvisorError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// カタログパスを上書きする環境変数
pub const CATALOG_ENV: &str = "TOOLSTACK_CATALOG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 組織の活動データ（JSON）
    pub details_path: Option<PathBuf>,
    /// 候補ツールカタログ（JSON/XLSX）
    pub catalog_path: Option<PathBuf>,
    /// ユーザー優先度（JSON）
    pub preference_path: Option<PathBuf>,
    /// 支払い方法フィルタを適用するか
    pub apply_payment_filter: bool,
    pub report_title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            details_path: None,
            catalog_path: None,
            preference_path: None,
            apply_payment_filter: true,
            report_title: "Recommendation Report".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AdvisorError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("toolstack-advisor").join("config.json"))
    }

    /// カタログパス（環境変数を優先）
    pub fn catalog_path(&self) -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CATALOG_ENV) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        self.catalog_path.clone()
    }

    pub fn set_catalog_path(&mut self, path: PathBuf) -> Result<()> {
        self.catalog_path = Some(path);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.apply_payment_filter);
        assert_eq!(config.report_title, "Recommendation Report");
        assert!(config.details_path.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"catalog_path": "catalog.xlsx"}"#).unwrap();
        assert_eq!(config.catalog_path, Some(PathBuf::from("catalog.xlsx")));
        assert!(config.apply_payment_filter);
    }
}
