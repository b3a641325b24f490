pub mod text;
pub mod excel;

use crate::cli::ReportFormat;
use crate::error::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use toolstack_common::{OrganizationLandscape, StrategyOutcome};

/// JSONレポート
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub title: &'a str,
    pub generated_at: String,
    pub outcomes: &'a [StrategyOutcome],
}

impl<'a> Report<'a> {
    pub fn new(title: &'a str, outcomes: &'a [StrategyOutcome]) -> Self {
        Self {
            title,
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            outcomes,
        }
    }
}

fn output_path_for_format(output: &Path, title: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", file_stem_for(title), extension))
    } else {
        output.to_path_buf()
    }
}

/// タイトルをファイル名に使える形に変換
fn file_stem_for(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    if stem.is_empty() {
        "recommendation_report".into()
    } else {
        stem
    }
}

/// 推薦結果を出力
///
/// テキストで出力先なしの場合は標準出力へ。ファイルに書いた場合はそのパスを返す。
pub fn export_report(
    outcomes: &[StrategyOutcome],
    landscape: &OrganizationLandscape,
    format: &ReportFormat,
    output: Option<&Path>,
    title: &str,
) -> Result<Option<PathBuf>> {
    match format {
        ReportFormat::Text => {
            let rendered = text::render_report(outcomes, landscape, title);
            match output {
                Some(output) => {
                    let path = output_path_for_format(output, title, "txt");
                    std::fs::write(&path, rendered)?;
                    Ok(Some(path))
                }
                None => {
                    print!("{}", rendered);
                    Ok(None)
                }
            }
        }
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&Report::new(title, outcomes))?;
            match output {
                Some(output) => {
                    let path = output_path_for_format(output, title, "json");
                    std::fs::write(&path, json)?;
                    Ok(Some(path))
                }
                None => {
                    println!("{}", json);
                    Ok(None)
                }
            }
        }
        ReportFormat::Excel => {
            let output = output.unwrap_or_else(|| Path::new("."));
            let path = output_path_for_format(output, title, "xlsx");
            excel::generate_excel(outcomes, landscape, &path, title)?;
            Ok(Some(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem_for() {
        assert_eq!(file_stem_for("Recommendation Report"), "recommendation_report");
        assert_eq!(file_stem_for("  "), "recommendation_report");
    }

    #[test]
    fn test_output_path_keeps_explicit_file() {
        let path = output_path_for_format(Path::new("out/report.xlsx"), "Title", "xlsx");
        assert_eq!(path, PathBuf::from("out/report.xlsx"));
    }

    #[test]
    fn test_output_path_for_directory() {
        let path = output_path_for_format(Path::new("reports"), "My Report", "json");
        assert_eq!(path, PathBuf::from("reports/my_report.json"));
    }
}
