//! chatcmd CLI entry point.

use std::env;
use std::process::ExitCode;

use chatcmd_runtime::{Repl, RegistryConfig};
use tracing_subscriber::EnvFilter;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    show_help: bool,
    show_version: bool,
    trace: bool,
    seed: Option<u64>,
    actor: Option<String>,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "--trace" => config.trace = true,
            "--seed" => {
                i += 1;
                let value = args.get(i).ok_or("--seed requires a value")?;
                config.seed = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid --seed value: {value}"))?,
                );
            }
            "--as" => {
                i += 1;
                let value = args.get(i).ok_or("--as requires a name")?;
                config.actor = Some(value.clone());
            }
            arg => return Err(format!("unknown option: {arg}").into()),
        }
        i += 1;
    }

    Ok(config)
}

fn init_tracing(trace: bool) {
    let filter = if trace {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("chatcmd {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    init_tracing(config.trace);

    let registry_config = RegistryConfig::default().with_rng_seed(config.seed);
    let mut repl = Repl::new(registry_config)?;

    if let Some(name) = &config.actor {
        if !repl.act_as(name) {
            return Err(format!("no actor named {name}").into());
        }
    }

    repl.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mchatcmd\x1b[0m - Chat command parser playground

\x1b[1mUSAGE:\x1b[0m
    chatcmd [OPTIONS]

\x1b[1mOPTIONS:\x1b[0m
    -h, --help         Print help information
    -V, --version      Print version information
    --seed N           Seed the @r selector for reproducible picks
    --as NAME          Start acting as the named actor
    --trace            Log every parse stage (overrides RUST_LOG)

\x1b[1mREPL COMMANDS:\x1b[0m
    !give <item> [amount]      Demo commands start with !
    help                       List commands and their usage
    who                        List actors
    as <name>                  Act as another actor
    quit                       Exit
    Ctrl+D                     Exit REPL
    Ctrl+C                     Cancel current input"
    );
}
