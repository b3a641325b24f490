use clap::{Parser, Subcommand};
use std::path::PathBuf;
use toolstack_common::Strategy;

#[derive(Parser)]
#[command(name = "toolstack")]
#[command(about = "組織のITツール構成から推薦ツールスタックを算出", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 推薦ツールスタックを算出してレポートを出力
    Recommend {
        /// 組織の活動データ（JSON）
        #[arg(short, long)]
        details: Option<PathBuf>,

        /// 候補ツールカタログ（JSON/XLSX）
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// ユーザー優先度（JSON）
        #[arg(short, long)]
        preference: Option<PathBuf>,

        /// 割当戦略 (total/one-by-one/forced/all)
        #[arg(short, long, default_value = "all")]
        strategy: StrategySelection,

        /// 出力形式 (text/json/excel)
        #[arg(short, long, default_value = "text")]
        format: ReportFormat,

        /// 出力ファイル/ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// レポートタイトル
        #[arg(short, long)]
        title: Option<String>,

        /// 支払い方法を考慮しない
        #[arg(long)]
        no_payment_filter: bool,
    },

    /// 要求活動と現行ツールの優先度を表示
    Inspect {
        /// 組織の活動データ（JSON）
        #[arg(short, long)]
        details: Option<PathBuf>,
    },

    /// 設定管理
    Config {
        /// 既定のカタログパスを設定
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Debug, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Excel,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "excel" | "xlsx" => Ok(ReportFormat::Excel),
            _ => Err(format!("Unknown format: {}. Use text, json, or excel", s)),
        }
    }
}

/// 実行する戦略
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StrategySelection {
    #[default]
    All,
    Only(Strategy),
}

impl StrategySelection {
    pub fn strategies(&self) -> Vec<Strategy> {
        match self {
            StrategySelection::All => Strategy::ALL.to_vec(),
            StrategySelection::Only(strategy) => vec![*strategy],
        }
    }
}

impl std::str::FromStr for StrategySelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(StrategySelection::All),
            "total" | "total-score" => Ok(StrategySelection::Only(Strategy::TotalScore)),
            "one-by-one" | "onebyone" | "exchange" => Ok(StrategySelection::Only(Strategy::OneByOne)),
            "forced" | "forced-exchange" => Ok(StrategySelection::Only(Strategy::ForcedExchange)),
            _ => Err(format!(
                "Unknown strategy: {}. Use total, one-by-one, forced, or all",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_format_from_str() {
        assert!(matches!("XLSX".parse::<ReportFormat>(), Ok(ReportFormat::Excel)));
        assert!(matches!("json".parse::<ReportFormat>(), Ok(ReportFormat::Json)));
        assert!("pdf".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_strategy_selection_from_str() {
        assert_eq!("all".parse::<StrategySelection>().unwrap().strategies().len(), 3);
        assert_eq!(
            "forced".parse::<StrategySelection>().unwrap(),
            StrategySelection::Only(Strategy::ForcedExchange)
        );
        assert!("random".parse::<StrategySelection>().is_err());
    }

    #[test]
    fn test_cli_parses_recommend() {
        let cli = Cli::try_parse_from([
            "toolstack",
            "recommend",
            "--details",
            "details.json",
            "--catalog",
            "catalog.xlsx",
            "--strategy",
            "one-by-one",
            "--format",
            "json",
        ])
        .expect("パース失敗");

        match cli.command {
            Commands::Recommend { details, strategy, format, .. } => {
                assert_eq!(details, Some(PathBuf::from("details.json")));
                assert_eq!(strategy, StrategySelection::Only(Strategy::OneByOne));
                assert!(matches!(format, ReportFormat::Json));
            }
            _ => panic!("unexpected command"),
        }
    }
}
