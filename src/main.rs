use std::path::PathBuf;

use annexfour::commands::scan::ScanOptions;
use annexfour::commands::{execute_login, execute_scan};
use annexfour::config::Settings;
use annexfour::error::AppError;
use annexfour::prompt::TerminalPrompter;
use annexfour::runtime::Docker;
use clap::{ArgAction, Args, Parser, Subcommand};
use log::LevelFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            for line in err.report() {
                eprintln!("{line}");
            }
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32, AppError> {
    let settings = Settings::from_env()?;
    let mut prompter = TerminalPrompter;

    match cli.command {
        Commands::Login => {
            execute_login(&settings.store, &mut prompter)?;
            Ok(0)
        }
        Commands::Scan(args) => {
            let options =
                ScanOptions { path: args.path, token: args.token, project_name: args.project_name };
            execute_scan(options, &settings, &Docker::default(), &mut prompter)
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();
}

#[derive(Parser)]
#[command(name = "annexfour", version, about = "AnnexFour Compliance Scanner Wrapper")]
struct Cli {
    /// Print debug logs to stderr.
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Authenticate with Annexfour Platform
    Login,
    /// Run compliance scan on the current or specified directory
    Scan(ScanArgs),
}

#[derive(Args)]
struct ScanArgs {
    /// API Token (overrides config)
    #[arg(short = 't', long = "token", value_name = "TOKEN")]
    token: Option<String>,

    /// Project Name
    #[arg(short = 'p', long = "project-name", value_name = "NAME")]
    project_name: Option<String>,

    /// Directory to scan (defaults to the current directory).
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,
}
