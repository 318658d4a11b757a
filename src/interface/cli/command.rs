//! CLI 명령 파싱 모듈.

use clap::{Parser, Subcommand};

use crate::domain::review::RunOptions;

#[derive(Debug, Parser)]
#[command(name = "prreview")]
#[command(version)]
#[command(about = "LLM-assisted review comments for GitHub pull requests")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Review the pull request referenced by GITHUB_EVENT_PATH (default)
    Review {
        /// Print markdown to stdout, do not post
        #[arg(long)]
        dry_run: bool,
    },
    /// Run the HTTP review service (POST /review)
    Serve {
        /// Listen port (overrides PORT and server.port)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Show effective merged config
    Config,
}

#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    Review(RunOptions),
    Serve { port: Option<u16> },
    InspectConfig,
}

impl Cli {
    /// 인자를 파싱한다. 사용법 오류는 clap이 종료 코드 2로 처리한다.
    pub fn parse_action() -> CliAction {
        Cli::parse().into_action()
    }

    fn into_action(self) -> CliAction {
        match self.command {
            None => CliAction::Review(RunOptions { dry_run: false }),
            Some(Commands::Review { dry_run }) => CliAction::Review(RunOptions { dry_run }),
            Some(Commands::Serve { port }) => CliAction::Serve { port },
            Some(Commands::Config) => CliAction::InspectConfig,
        }
    }
}
