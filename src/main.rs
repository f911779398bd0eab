use clap::Parser;

use visit_flattener::cli::Cli;
use visit_flattener::config::{get_config, init_config};
use visit_flattener::runtime::modes::{self, Mode};
use visit_flattener::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config(cli.config.as_deref());

    let config = get_config();
    let _guard = init_logging(&config.logging)?;

    match modes::detect_mode(cli.command.as_ref()) {
        Mode::Server => modes::run_server().await,
        Mode::Cli => {
            let Some(command) = cli.command else {
                return Ok(());
            };
            if let Err(e) = modes::run_cli(command) {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
        Mode::Unknown => {
            anyhow::bail!("No execution mode available; enable the `server` or `cli` feature")
        }
    }
}
