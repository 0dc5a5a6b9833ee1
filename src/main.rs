use clap::Parser;
use mammo_pipeline::config::{CliConfig, Command};
use mammo_pipeline::core::{archive, tree, DatasetDownloader, DatasetSlug};
use mammo_pipeline::utils::logger;
use mammo_pipeline::{DatasetFetcher, KaggleDownloader, PipelineError};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting mammo-pipeline CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config).await {
        tracing::error!("❌ Command failed: {} (Category: {:?})", e, e.category());
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }
}

// 下載與解壓縮失敗只記錄日誌，不影響結束碼；只有設定錯誤會回傳 Err
async fn run(config: &CliConfig) -> Result<(), PipelineError> {
    let file = config.load_file()?;

    match &config.command {
        Command::Download { slug, data_dir } => {
            let settings = config.dataset_settings(slug.as_deref(), data_dir.as_deref(), &file)?;
            let downloader = KaggleDownloader::new(settings.kaggle_api_base);
            let slug = DatasetSlug::new(settings.slug);

            if let Ok(path) = downloader.download(&slug, &settings.data_dir).await {
                println!("📁 Archive saved to: {}", path.display());
            }
        }
        Command::Extract { archive: zip_path, to } => {
            if let Ok(stats) = archive::extract(zip_path, to) {
                println!(
                    "✅ Extracted {} entries ({} bytes) to {}",
                    stats.entries,
                    stats.bytes_written,
                    stats.destination.display()
                );
            }
        }
        Command::Tree { path } => tree::print_tree(path)?,
        Command::Fetch {
            slug,
            data_dir,
            tree: show_tree,
        } => {
            let settings = config.dataset_settings(slug.as_deref(), data_dir.as_deref(), &file)?;
            let fetcher = DatasetFetcher::new(KaggleDownloader::new(settings.kaggle_api_base));
            let slug = DatasetSlug::new(settings.slug);

            match fetcher.ensure_dataset(&slug, &settings.data_dir).await {
                Some(path) => {
                    println!("✅ Dataset ready at: {}", path.display());
                    if *show_tree {
                        tree::print_tree(&path)?;
                    }
                }
                None => eprintln!("❌ Could not download {}", slug),
            }
        }
    }

    Ok(())
}
