use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use log::{error, info};

use archavisto::{
    Catalog, Config, Logging, PROJECT_NAME, PROJECT_VERSION, TerminalPrompter, check_connectivity,
    config::ENV_PRIVATE_TOKEN, fetch_catalog, init_configuration, print_banner, render_script,
    run_wizard, show_configuration, write_script,
};

/// Exit status asking the login script to stop without provisioning
const EXIT_SKIPPED: u8 = 1;
/// Exit status reported when the machine has no network access
const EXIT_OFFLINE: u8 = 42;

#[derive(Parser)]
#[command(version = PROJECT_VERSION, about, long_about = None)]
pub struct UserArgs {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    run: RunArgs,

    /// Verbose
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct RunArgs {
    /// Print the generated script instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Read the package catalog from a local JSON file
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Do not probe network connectivity before starting
    #[arg(long)]
    skip_network_check: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Show Config
    #[command(visible_alias = "show-config")]
    ShowConfiguration,

    /// Write the effective configuration to the config directory
    #[command(visible_alias = "init-config")]
    InitConfiguration,
}

fn init_logging(verbose: bool, debug_mode: bool) -> Result<()> {
    let logging = Logging::new().with_debug_mode(debug_mode);

    if verbose {
        logging.start()
    } else {
        let file_name = format!("{PROJECT_NAME}.log");
        logging.with_file(file_name).start()
    }
}

fn load_catalog(args: &RunArgs, config: &Config) -> Result<Catalog> {
    if let Some(path) = args.catalog.as_ref().or(config.catalog_file.as_ref()) {
        info!("using local catalog {}", path.display());
        return Catalog::from_file(path);
    }

    let token = Config::private_token();
    if token.is_empty() {
        bail!(
            "Missing the {ENV_PRIVATE_TOKEN} environment variable, cannot fetch the packages json file"
        );
    }

    fetch_catalog(&config.catalog_url, &token).context(
        "Error while fetching the packages json file, it may be an internal Gitlab issue, \
         please contact a DevOps internal member or IT for support",
    )
}

/// Runs the wizard and writes the provisioning script.
fn provision(args: &RunArgs, config: &Config) -> Result<ExitCode> {
    if config.skip_file.exists() {
        println!(
            "{}",
            format!(
                "Skipping script execution due to skip file {}",
                config.skip_file.display()
            )
            .yellow()
        );
        return Ok(ExitCode::from(EXIT_SKIPPED));
    }

    print_banner();

    if !args.skip_network_check {
        println!("Checking network connectivity...");
        if let Err(e) = check_connectivity(&config.connectivity_url) {
            error!("connectivity check failed: {e:#}");
            eprintln!(
                "{}",
                "Unable to join Internet. Check your network connection and try again.".red()
            );
            return Ok(ExitCode::from(EXIT_OFFLINE));
        }
        println!("Network OK \u{2714}");
    }

    let catalog = load_catalog(args, config)?;

    let mut prompter = TerminalPrompter::new();
    let answers = run_wizard(&mut prompter, config, &catalog).context("Prompt failed")?;

    let script = render_script(&answers.script_data(config));

    if args.dry_run {
        print!("{script}");
    } else {
        write_script(&config.script_file, &script)?;
        println!("Script written to {}", config.script_file.display());
    }

    Ok(ExitCode::SUCCESS)
}

fn run(args: UserArgs) -> Result<ExitCode> {
    let config = Config::load()?;

    init_logging(args.verbose, config.debug)?;

    match args.command {
        None => provision(&args.run, &config),
        Some(Command::ShowConfiguration) => show_configuration().map(|()| ExitCode::SUCCESS),
        Some(Command::InitConfiguration) => init_configuration().map(|()| ExitCode::SUCCESS),
    }
}

fn main() -> ExitCode {
    let args = UserArgs::parse();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            eprintln!("{}", format!("{e:#}").red());
            ExitCode::FAILURE
        }
    }
}
