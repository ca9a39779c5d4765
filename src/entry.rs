use std::sync::Arc;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::{debug, warn};

use crate::args::{Command, TesterArgs};
use crate::config::{apply_config, load_config};
use crate::error::AppResult;
use crate::format::run_format_json;
use crate::http::{ReqwestTransport, RunSettings, build_client, run_load_test};
use crate::logger::init_logging;
use crate::report::print_report;

/// Parses the command line and runs the selected mode.
///
/// # Errors
///
/// Returns an error for invalid arguments or configuration, when the HTTP
/// client cannot be built, or when the JSON formatter cannot read or parse
/// its input. Individual request failures never surface here.
pub fn run() -> AppResult<()> {
    let matches = TesterArgs::command().get_matches();
    let mut args = TesterArgs::from_arg_matches(&matches)?;

    init_logging(args.verbose, args.no_color);

    if let Some(command) = args.command.take() {
        return match command {
            Command::FormatJson(format_args) => run_format_json(&format_args),
        };
    }

    let settings = resolve_settings(&mut args, &matches)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(settings))
}

fn resolve_settings(args: &mut TesterArgs, matches: &ArgMatches) -> AppResult<RunSettings> {
    if let Some(config) = load_config(args.config.as_deref())? {
        debug!("Applying config file values");
        apply_config(args, matches, &config)?;
    }
    let settings = RunSettings::from_args(args)?;
    if settings.auth_token.is_none() {
        warn!("No auth token set; requests are sent without an Authorization header.");
    }
    Ok(settings)
}

async fn run_async(settings: RunSettings) -> AppResult<()> {
    let client = build_client(&settings)?;
    let transport = Arc::new(ReqwestTransport::new(client));
    let settings = Arc::new(settings);

    println!("Starting load test against {}", settings.url);
    println!(
        "Sending {} requests with {} concurrent workers",
        settings.requests, settings.concurrency
    );

    let report = run_load_test(Arc::clone(&settings), transport).await;

    println!();
    print_report(&report, settings.debug);
    Ok(())
}
