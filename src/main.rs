use anyhow::{Context, Result};
use meal_planner::cli::{parse_args, Command};
use meal_planner::store::JsonStore;
use meal_planner::{menu, server};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEBUG_LOG_FILE: &str = "debug.log";

/// Menu mode writes log lines to a file in the data directory so they
/// never land in the middle of an interactive screen.
fn init_file_logging(store: &JsonStore) -> Result<()> {
    let path = store.root().join(DEBUG_LOG_FILE);
    let log_file = std::fs::File::create(&path)
        .with_context(|| format!("failed to create log file at {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = parse_args();
    let store = JsonStore::new(&cli.data_dir);

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            init_file_logging(&store)?;
            info!(
                "starting meal planner v{} (text menu, data dir {})",
                env!("CARGO_PKG_VERSION"),
                store.root().display()
            );
            menu::run(&store)
        }
        Command::Serve { port } => {
            init_stderr_logging();
            info!(
                "starting meal planner v{} (GUI server, data dir {})",
                env!("CARGO_PKG_VERSION"),
                store.root().display()
            );
            server::serve(store, port).await
        }
    }
}
