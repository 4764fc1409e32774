use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use devlog::cli::Cli;
use devlog::storage::FileStorage;
use devlog::ui::Tui;
use devlog::{init_logging, Config, EntryStore, ViewController};
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config = Config::load_from(cli.config.clone())
        .and_then(|config| config.with_data_dir(cli.data_dir.clone()))
        .map_err(|e| eyre!("Failed to load config: {}", e))?;

    init_logging(cli.verbosity(), &config.log_file())?;
    info!(data_dir = %config.data_dir().display(), "devlog is running");

    let store = EntryStore::load(Box::new(FileStorage::new(config.data_dir())));
    let mut controller = ViewController::new(store);
    controller.load();

    let mut tui = Tui::new(config.export_dir())?;
    tui.run(&mut controller).await?;

    Ok(())
}
