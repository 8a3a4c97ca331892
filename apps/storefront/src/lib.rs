//! # Storefront Library
//!
//! Core library for the storefront command line tool.
//! `main.rs` only calls [`run`]; everything else lives here so it can be
//! tested without spawning a process.
//!
//! ## Module Organization
//! ```text
//! storefront_lib/
//! ├── lib.rs          ◄─── You are here (logging, config, dispatch)
//! ├── cli.rs          ◄─── clap definitions
//! ├── state/
//! │   ├── mod.rs      ◄─── State exports
//! │   ├── cart.rs     ◄─── Opens the file store and loads the cart
//! │   └── config.rs   ◄─── StorefrontConfig (env driven)
//! ├── commands/
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── forms.rs    ◄─── Contact / newsletter validation
//! │   ├── reviews.rs  ◄─── Review listing and approval
//! │   └── site.rs     ◄─── Presale status
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::Parser;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::{CartCommand, Cli, Command, FormCommand, ReviewsCommand, SiteCommand};
use error::ApiError;
use state::{open_cart, StorefrontConfig};

/// Runs the command line tool.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Invocation                                        │
/// │                                                                         │
/// │  1. Parse Arguments ──────────────────────────────────────────────────► │
/// │     • clap derive, --help / --version handled here                      │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • RUST_LOG overrides the default                                    │
/// │                                                                         │
/// │  3. Load Configuration ───────────────────────────────────────────────► │
/// │     • STOREFRONT_* variables, then --data-dir                           │
/// │                                                                         │
/// │  4. Execute Command ──────────────────────────────────────────────────► │
/// │     • Cart commands open the file store and load the cart               │
/// │                                                                         │
/// │  5. Print Result ─────────────────────────────────────────────────────► │
/// │     • JSON on stdout; ApiError JSON and exit status 1 on failure        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = StorefrontConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }
    info!(cart_key = %config.cart_key, "storefront starting");

    let today = Local::now().date_naive();
    match execute(cli.command, &config, today) {
        Ok(output) => {
            print_json(&output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "command failed");
            print_json(&err);
            ExitCode::FAILURE
        }
    }
}

/// Runs one command and returns what should be printed.
pub fn execute(
    command: Command,
    config: &StorefrontConfig,
    today: NaiveDate,
) -> Result<serde_json::Value, ApiError> {
    use commands::{cart, forms, reviews, site};

    let output = match command {
        Command::Cart(command) => {
            let mut store_cart = open_cart(config)?;
            match command {
                CartCommand::Show => to_json(cart::get_cart(&store_cart, config))?,
                CartCommand::Add {
                    id,
                    quantity,
                    price,
                } => to_json(cart::add_to_cart(
                    &mut store_cart,
                    config,
                    &id,
                    quantity,
                    price,
                )?)?,
                CartCommand::Remove { id } => {
                    to_json(cart::remove_from_cart(&mut store_cart, config, &id))?
                }
                CartCommand::Set { id, quantity } => to_json(cart::update_cart_item(
                    &mut store_cart,
                    config,
                    &id,
                    quantity,
                )?)?,
                CartCommand::Clear => to_json(cart::clear_cart(&mut store_cart, config))?,
                CartCommand::Checkout => to_json(cart::checkout(&store_cart)?)?,
            }
        }
        Command::Form(FormCommand::Contact(args)) => {
            to_json(forms::submit_contact(&config.validator(), args.into()))?
        }
        Command::Form(FormCommand::Newsletter(args)) => {
            to_json(forms::submit_newsletter(&config.validator(), args.into()))?
        }
        Command::Reviews(ReviewsCommand::List { file }) => to_json(reviews::list_reviews(&file)?)?,
        Command::Reviews(ReviewsCommand::Approve(args)) => {
            to_json(reviews::approve_review(&args.into(), today)?)?
        }
        Command::Site(SiteCommand::Status) => to_json(site::site_status(config, today))?,
    };

    Ok(output)
}

fn to_json(value: impl Serialize) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(|err| ApiError::internal(err.to_string()))
}

fn print_json(value: &impl Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(err) => error!(%err, "failed to render output"),
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - Default: `warn,storefront=info`
/// - `--verbose`: `info,storefront=debug`
/// - `RUST_LOG` always wins
///
/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "info,storefront=debug"
    } else {
        "warn,storefront=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
