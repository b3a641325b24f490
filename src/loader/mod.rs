//! 入力ファイルの読み込み
//!
//! - 組織の活動データ: ウィザードが保存したJSON（レコード配列）
//! - 候補カタログ: JSON（ツール名 → レコード）またはExcel
//! - ユーザー優先度: JSON（ファイルがなければ優先度なし）

pub mod catalog_xlsx;

use crate::error::{AdvisorError, Result};
use std::path::Path;
use toolstack_common::{Catalog, OrganizationLandscape, UserPreference};

/// Excelとして読む拡張子
const EXCEL_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

fn read_existing(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(AdvisorError::FileNotFound(path.display().to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// 組織の活動データを読み込み
pub fn load_landscape(path: &Path) -> Result<OrganizationLandscape> {
    let content = read_existing(path)?;
    let landscape = OrganizationLandscape::from_json(&content)
        .map_err(|e| AdvisorError::InvalidDetails(format!("{}: {}", path.display(), e)))?;

    if landscape.is_empty() {
        return Err(AdvisorError::NoActivities(path.display().to_string()));
    }

    tracing::info!(
        path = %path.display(),
        tools = landscape.tools().count(),
        activities = landscape.all_activity_keys().len(),
        "landscape loaded"
    );
    Ok(landscape)
}

/// 候補カタログを読み込み（拡張子で形式を判定）
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let catalog = if extension == "json" {
        let content = read_existing(path)?;
        Catalog::from_json(&content)
            .map_err(|e| AdvisorError::InvalidCatalog(format!("{}: {}", path.display(), e)))?
    } else if EXCEL_EXTENSIONS.contains(&extension.as_str()) {
        if !path.exists() {
            return Err(AdvisorError::FileNotFound(path.display().to_string()));
        }
        catalog_xlsx::read_catalog(path)?
    } else {
        return Err(AdvisorError::InvalidCatalog(format!(
            "未対応の形式です: {} (json/xlsx)",
            path.display()
        )));
    };

    if catalog.is_empty() {
        tracing::warn!(path = %path.display(), "catalog has no tools");
    } else {
        tracing::info!(path = %path.display(), tools = catalog.len(), "catalog loaded");
    }
    Ok(catalog)
}

/// ユーザー優先度を読み込み（未指定・ファイルなしは `None`）
pub fn load_preference(path: Option<&Path>) -> Result<Option<UserPreference>> {
    let Some(path) = path else {
        return Ok(None);
    };
    if !path.exists() {
        tracing::info!(path = %path.display(), "preference file not found, using zero weights");
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    Ok(UserPreference::from_json(&content)?)
}
