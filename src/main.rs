use clap::Parser;
use pastecycle::bootstrap::{self, tracing::init_tracing_subscriber};
use pastecycle::cli::{Cli, Command};
use pc_core::ports::AppDirsPort;
use pc_platform::DirsAppDirsAdapter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let dirs = DirsAppDirsAdapter::new().get_app_dirs()?;

    if let Err(err) = init_tracing_subscriber(&dirs.logs_dir()) {
        eprintln!("Failed to initialize tracing: {err}");
    }

    let config_path = cli.config.clone().unwrap_or_else(|| dirs.config_file());
    let config = bootstrap::load_config(config_path)?;
    let paths = bootstrap::resolve_paths(&config, &dirs);

    match cli.resolved_command() {
        Command::Run => bootstrap::run_app(config, paths),
        command => bootstrap::run_command(config, paths, command),
    }
}
