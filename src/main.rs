use anyhow::Context;
use clap::Parser;
use toolstack_advisor::{cli, config, error, export, loader};
use cli::{Cli, Commands};
use config::Config;
use std::path::PathBuf;
use toolstack_common::recommend;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// 指定パス → 設定の既定値の順で解決
fn resolve(arg: Option<PathBuf>, configured: Option<PathBuf>, what: &str) -> error::Result<PathBuf> {
    arg.or(configured).ok_or_else(|| {
        error::AdvisorError::Config(format!(
            "{}のパスが指定されていません（引数または設定ファイルで指定してください）",
            what
        ))
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load().context("設定ファイルの読み込みに失敗しました")?;

    match cli.command {
        Commands::Recommend {
            details,
            catalog,
            preference,
            strategy,
            format,
            output,
            title,
            no_payment_filter,
        } => {
            let details_path = resolve(details, config.details_path.clone(), "活動データ")?;
            let catalog_path = resolve(catalog, config.catalog_path(), "カタログ")?;
            let preference_path = preference.or_else(|| config.preference_path.clone());

            let landscape = loader::load_landscape(&details_path)
                .with_context(|| format!("活動データ: {}", details_path.display()))?;
            let catalog = loader::load_catalog(&catalog_path)
                .with_context(|| format!("カタログ: {}", catalog_path.display()))?;
            let mut user_preference = loader::load_preference(preference_path.as_deref())?;

            if no_payment_filter || !config.apply_payment_filter {
                user_preference = user_preference.map(|p| p.without_payment_filter());
            }

            let outcomes: Vec<_> = strategy
                .strategies()
                .into_iter()
                .map(|s| recommend(s, &landscape, &catalog, user_preference.as_ref()))
                .collect();

            let title = title.unwrap_or_else(|| config.report_title.clone());
            if let Some(path) =
                export::export_report(&outcomes, &landscape, &format, output.as_deref(), &title)?
            {
                println!("✔ レポート出力: {}", path.display());
            }
        }

        Commands::Inspect { details } => {
            let details_path = resolve(details, config.details_path.clone(), "活動データ")?;
            let landscape = loader::load_landscape(&details_path)?;
            print!("{}", export::text::render_inspection(&landscape));
        }

        Commands::Config { set_catalog, show } => {
            let mut config = config;

            if let Some(path) = set_catalog {
                config.set_catalog_path(path)?;
                println!("✔ カタログパスを設定しました");
            }

            if show {
                let display = |p: &Option<PathBuf>| {
                    p.as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "未設定".into())
                };
                println!("設定:");
                println!("  活動データ: {}", display(&config.details_path));
                println!("  カタログ: {}", display(&config.catalog_path()));
                println!("  優先度: {}", display(&config.preference_path));
                println!(
                    "  支払い方法フィルタ: {}",
                    if config.apply_payment_filter { "有効" } else { "無効" }
                );
                println!("  レポートタイトル: {}", config.report_title);
            }
        }
    }

    Ok(())
}
