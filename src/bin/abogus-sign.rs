//! abogus signing binary

use abogus::exit_codes::{EXIT_CONFIG_ERROR, EXIT_INVALID_ARGS, EXIT_PANIC, EXIT_SUCCESS, exit_code_for};
use abogus::signature::defaults::{DEFAULT_USER_AGENT, ENV_JSON_OUTPUT, ENV_USER_AGENT};
use abogus::{OutputFormat, QueryBuilder, SignOptions, SignedQuery, Signer, utils};
use anyhow::Context;
use clap::Parser;
use std::{env, panic, process};

const VERSION: &str = abogus::version::VERSION;

#[derive(Parser, Debug)]
#[command(version = VERSION, about = "Compute a_bogus request signatures")]
struct Args {
    /// Query string to sign as-is (otherwise the canonical query is built)
    #[arg(short, long)]
    query: Option<String>,

    /// Extra or overriding query parameter (key=value), repeatable
    #[arg(short, long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,

    /// User agent string (defaults to ABOGUS_USER_AGENT, then a desktop Chrome UA)
    #[arg(short, long)]
    user_agent: Option<String>,

    /// Suffix hashed with the query (overrides ABOGUS_SUFFIX)
    #[arg(long)]
    suffix: Option<String>,

    /// Key-derivation arguments as a,b,c (overrides ABOGUS_ARGUMENTS)
    #[arg(long)]
    arguments: Option<String>,

    /// Print {"query": ..., "a_bogus": ...} instead of plain text
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error, json:<level>)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() {
    // Set up panic handler to return specific exit code
    panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC: {}", panic_info);
        process::exit(EXIT_PANIC);
    }));

    let result = panic::catch_unwind(run);

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(_) => {
            eprintln!("Fatal: Unhandled panic in abogus-sign");
            process::exit(EXIT_PANIC);
        }
    }
}

fn run() -> i32 {
    // Handle --version before clap
    if env::args().nth(1).as_deref() == Some("--version") {
        println!("abogus-sign {}", abogus::version::full_version());
        return EXIT_SUCCESS;
    }

    let args = Args::parse();

    if let Some(ref level) = args.log_level {
        abogus::logger::JsonLogger::init_with_level(level, "CLI --log-level");
    } else {
        abogus::logger::JsonLogger::init();
    }

    let mut options = match SignOptions::from_env() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Config error: {e}");
            return EXIT_CONFIG_ERROR;
        }
    };

    if let Err(e) = apply_overrides(&args, &mut options) {
        eprintln!("Argument error: {e:#}");
        return EXIT_INVALID_ARGS;
    }

    let user_agent = args
        .user_agent
        .clone()
        .or_else(|| env::var(ENV_USER_AGENT).ok())
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

    let signed = match build_query(&args, &user_agent) {
        Ok(query) => match Signer::new().sign_with(&query, &user_agent, &options) {
            Ok(token) => SignedQuery { query, token },
            Err(e) => {
                eprintln!("Sign error: {e}");
                return exit_code_for(&e);
            }
        },
        Err(e) => {
            eprintln!("Argument error: {e:#}");
            return EXIT_INVALID_ARGS;
        }
    };

    let format = if args.json || utils::is_env_true(ENV_JSON_OUTPUT) {
        OutputFormat::Json
    } else if args.query.is_some() {
        OutputFormat::Token
    } else {
        OutputFormat::Query
    };

    match signed.write_to(&mut std::io::stdout().lock(), format) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Output error: {e}");
            exit_code_for(&e)
        }
    }
}

fn apply_overrides(args: &Args, options: &mut SignOptions) -> anyhow::Result<()> {
    if let Some(ref suffix) = args.suffix {
        options.suffix = suffix.clone();
    }
    if let Some(ref raw) = args.arguments {
        options.arguments =
            abogus::parse_arguments(raw).with_context(|| format!("--arguments {raw}"))?;
    }
    Ok(())
}

fn build_query(args: &Args, user_agent: &str) -> anyhow::Result<String> {
    if let Some(ref query) = args.query {
        return Ok(query.clone());
    }

    let mut builder = QueryBuilder::canonical().with_user_agent(user_agent);
    for raw in &args.params {
        let (key, value) =
            utils::split_pair(raw).with_context(|| format!("--param expects KEY=VALUE, got '{raw}'"))?;
        builder.set(key, value);
    }
    let builder = builder.ensure_ms_token(&mut rand::thread_rng());

    Ok(builder.build())
}
