//! Command-line interface for wincmd
//! Tokenizes and normalizes Windows command lines.
//!
//! Usage:
//!   wincmd tokens `[cmdline]`                      - Print the lexer's tokens, one per line
//!   wincmd normalize `[cmdline]`                   - Print the normalized command line
//!   wincmd inspect `[cmdline]` [--format `<format>`] - Print the parsed command (simple, tokens, tree, json)
//!   wincmd paths `[cmdline]` [--nested] [--normalized]
//!   wincmd args `[cmdline]` [--nested]
//!   wincmd values `[cmdline]` [--nested]
//!
//! Global options: --arch x86|x86_64, --config `<file>`.
//! Without a command line argument every line of stdin is processed.

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io::{self, BufRead};
use std::process::exit;
use tracing_subscriber::EnvFilter;
use wincmd::wincmd::config::{Loader, WincmdConfig};
use wincmd::{CommandLineProcessor, Error, OutputFormat};

fn cmdline_arg() -> Arg {
    Arg::new("cmdline")
        .help("Command line to process; read from stdin, one per line, when omitted")
        .index(1)
}

fn nested_arg() -> Arg {
    Arg::new("nested")
        .long("nested")
        .short('n')
        .help("Include results from nested quoted commands")
        .action(ArgAction::SetTrue)
}

fn cli() -> Command {
    Command::new("wincmd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tokenize and normalize Windows command lines")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("arch")
                .long("arch")
                .help("Path alias profile")
                .value_parser(["x86", "x86_64"])
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("TOML file layered over the built-in defaults")
                .global(true),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the lexer's tokens, one per line")
                .arg(cmdline_arg()),
        )
        .subcommand(
            Command::new("normalize")
                .about("Print the normalized command line")
                .arg(cmdline_arg()),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the parsed command line")
                .arg(cmdline_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (simple, tokens, tree, json); defaults to the configured one"),
                ),
        )
        .subcommand(
            Command::new("paths")
                .about("List the paths in the command line")
                .arg(cmdline_arg())
                .arg(nested_arg())
                .arg(
                    Arg::new("normalized")
                        .long("normalized")
                        .help("Print paths in their normalized form")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("args")
                .about("List the flags in the command line")
                .arg(cmdline_arg())
                .arg(nested_arg()),
        )
        .subcommand(
            Command::new("values")
                .about("List the normalized values in the command line")
                .arg(cmdline_arg())
                .arg(nested_arg()),
        )
}

fn main() {
    init_tracing();

    let matches = cli().get_matches();
    let Some((name, sub_matches)) = matches.subcommand() else {
        unreachable!()
    };

    let config = load_config(sub_matches).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        exit(1);
    });
    let processor = CommandLineProcessor::from_config(&config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        exit(1);
    });

    let handler = |raw: &str| handle_command(name, sub_matches, &config, &processor, raw);
    let ok = match sub_matches.get_one::<String>("cmdline") {
        Some(raw) => report(handler(raw.as_str())),
        None => handle_stdin(handler),
    };
    if !ok {
        exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<WincmdConfig, Error> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(arch) = matches.get_one::<String>("arch") {
        loader = loader.set_override("normalizer.architecture", arch.as_str())?;
    }
    Ok(loader.build()?)
}

/// Process every stdin line, reporting failures as they happen.
fn handle_stdin(handler: impl Fn(&str) -> Result<Vec<String>, Error>) -> bool {
    let mut ok = true;
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                report(Err(e.into()));
                return false;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        ok &= report(handler(&line));
    }
    ok
}

fn report(result: Result<Vec<String>, Error>) -> bool {
    match result {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
            true
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            false
        }
    }
}

fn handle_command(
    name: &str,
    matches: &ArgMatches,
    config: &WincmdConfig,
    processor: &CommandLineProcessor,
    raw: &str,
) -> Result<Vec<String>, Error> {
    let nested = || matches.get_flag("nested");
    let lines = match name {
        "tokens" => wincmd::tokenize(raw)?,
        "normalize" => vec![processor.normalize(raw)?],
        "inspect" => {
            let format = match matches.get_one::<String>("format") {
                Some(format) => format.parse::<OutputFormat>()?,
                None => config.output.format,
            };
            vec![processor.process(raw, format)?]
        }
        "paths" if matches.get_flag("normalized") => processor.normalized_paths(raw, nested())?,
        "paths" => processor.paths(raw, nested())?,
        "args" => processor.args(raw, nested())?,
        "values" => processor.values(raw, nested())?,
        _ => unreachable!(),
    };
    Ok(lines)
}
