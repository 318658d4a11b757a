//! `prreview` 바이너리 진입점.

use std::process::ExitCode;

use prreview::domain::review::ReviewOutcome;
use prreview::interface::cli::{Cli, CliAction};
use prreview::interface::composition::AppComposition;
use prreview::interface::server;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    // .env가 없어도 실행 환경변수만으로 동작한다.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let action = Cli::parse_action();
    let composition = AppComposition::default();

    match action {
        CliAction::InspectConfig => match composition.inspect_config_usecase().execute() {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("error: {err:#}");
                ExitCode::FAILURE
            }
        },
        CliAction::Review(options) => match composition.review_usecase().execute(options).await {
            Ok(ReviewOutcome::NoChanges) => {
                info!("nothing to review");
                ExitCode::SUCCESS
            }
            Ok(ReviewOutcome::Published { attempts }) => {
                info!(attempts, "review delivered");
                ExitCode::SUCCESS
            }
            Err(err) => {
                error!(error = %format!("{err:#}"), "review failed");
                ExitCode::FAILURE
            }
        },
        CliAction::Serve { port } => match server::serve(composition, port).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                error!(error = %format!("{err:#}"), "review service failed");
                ExitCode::FAILURE
            }
        },
    }
}
