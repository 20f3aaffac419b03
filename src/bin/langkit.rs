//! Command-line interface for langkit
//!
//! Usage:
//!   langkit tokens `<path>` [--format simple|json] [--rules `<rules.yaml>`]  - Dump the token stream
//!   langkit parse `<path>` [--format json|tree]                           - Parse and dump the AST
//!   langkit list-formats                                                - List processing formats

use clap::{Arg, ArgMatches, Command};
use std::process;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use langkit::lexing::LexerConfig;
use langkit::processor::{
    available_formats, process_source, process_tokens, ProcessingError, ProcessingSpec,
};

fn main() {
    let matches = Command::new("langkit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tokenize and parse sources of the langkit demo language")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .help("Log verbosity (error, warn, info, debug, trace)")
                .default_value("warn"),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream of a file")
                .arg(
                    Arg::new("path")
                        .help("Path to the source file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["simple", "json"])
                        .default_value("simple"),
                )
                .arg(
                    Arg::new("rules")
                        .long("rules")
                        .short('r')
                        .help("YAML rule set to use instead of the built-in language"),
                ),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a file and print its syntax tree")
                .arg(
                    Arg::new("path")
                        .help("Path to the source file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["json", "tree"])
                        .default_value("tree"),
                ),
        )
        .subcommand(Command::new("list-formats").about("List available processing formats"))
        .get_matches();

    init_logging(&matches);

    match matches.subcommand() {
        Some(("tokens", tokens_matches)) => handle_tokens_command(tokens_matches),
        Some(("parse", parse_matches)) => handle_parse_command(parse_matches),
        Some(("list-formats", _)) => handle_list_formats_command(),
        _ => unreachable!(),
    }
}

fn init_logging(matches: &ArgMatches) {
    let level = match matches
        .get_one::<String>("log-level")
        .map(String::as_str)
        .unwrap_or("warn")
    {
        "error" => Level::ERROR,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::WARN,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install logger: {}", e);
    }
}

fn read_source(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file {}: {}", path, e);
        process::exit(1);
    })
}

fn exit_with(error: ProcessingError, source: &str, path: &str) -> ! {
    eprint!("{}", error.render(source, path));
    process::exit(1);
}

/// Handle the tokens command
fn handle_tokens_command(matches: &ArgMatches) {
    let path = matches.get_one::<String>("path").unwrap();
    let format = matches.get_one::<String>("format").unwrap();
    let source = read_source(path);

    let result = match matches.get_one::<String>("rules") {
        Some(rules) => {
            debug!(rules = %rules, "loading rule set");
            let spec = ProcessingSpec::from_string(&format!("token-{}", format));
            spec.and_then(|spec| {
                let lexer = LexerConfig::load(rules)?.build()?;
                process_tokens(&lexer, &source, path, spec.format)
            })
        }
        None => ProcessingSpec::from_string(&format!("token-{}", format))
            .and_then(|spec| process_source(&source, path, &spec)),
    };

    match result {
        Ok(output) => print!("{}", output),
        Err(e) => exit_with(e, &source, path),
    }
}

/// Handle the parse command
fn handle_parse_command(matches: &ArgMatches) {
    let path = matches.get_one::<String>("path").unwrap();
    let format = matches.get_one::<String>("format").unwrap();
    let source = read_source(path);

    let result = ProcessingSpec::from_string(&format!("ast-{}", format))
        .and_then(|spec| process_source(&source, path, &spec));
    match result {
        Ok(output) => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
        }
        Err(e) => exit_with(e, &source, path),
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available processing formats:\n");
    for format in available_formats() {
        println!("  {}", format);
    }
}
