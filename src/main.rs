use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use citycast_core::{AppError, Config};
use citycast_ui::{render, run_lines, DisplayState, WeatherController};
use citycast_weather::{OpenMeteo, PlaceQuery};
use tokio::io::BufReader;

/// Current weather for a city, looked up by name.
///
/// Without --city, reads one place name per line from stdin.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Look up a single city and exit
    #[arg(long)]
    city: Option<String>,

    /// Print the summary as JSON instead of panels (single lookup only)
    #[arg(long, requires = "city")]
    json: bool,

    /// Config file (default: <config dir>/citycast/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            // Logging may not be up yet when config fails, so the detail goes
            // to stderr directly.
            eprintln!("{}", e.user_message());
            eprintln!("  {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode, AppError> {
    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .map_err(AppError::from_config_load)?;

    citycast_core::init(&config.logging.level)?;
    config.ensure_valid().map_err(AppError::from_config_load)?;

    let source = OpenMeteo::new(&config.weather, &config.ui)?;
    let mut controller = WeatherController::new(Arc::new(source));

    match args.city {
        Some(city) => lookup_once(&mut controller, &city, args.json).await,
        None => interactive(&mut controller).await,
    }
}

async fn lookup_once(
    controller: &mut WeatherController,
    city: &str,
    json: bool,
) -> Result<ExitCode, AppError> {
    let Some(query) = PlaceQuery::parse(city) else {
        tracing::info!("Empty city name, nothing to look up");
        return Ok(ExitCode::SUCCESS);
    };

    controller.submit(query);
    let state = controller.settle().await;

    match (state, json) {
        (DisplayState::Ready { summary, .. }, true) => {
            let text = serde_json::to_string_pretty(summary).map_err(anyhow::Error::from)?;
            println!("{text}");
            Ok(ExitCode::SUCCESS)
        }
        (DisplayState::Ready { .. }, false) => {
            print!("{}", render(state));
            Ok(ExitCode::SUCCESS)
        }
        _ => {
            eprint!("{}", render(state));
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Read place names from stdin and print every state change as it happens.
/// A new line supersedes a lookup that is still running.
async fn interactive(controller: &mut WeatherController) -> Result<ExitCode, AppError> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_lines(controller, stdin, &mut stdout).await?;
    Ok(ExitCode::SUCCESS)
}
