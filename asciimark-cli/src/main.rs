// Command-line interface for asciimark
//
// This binary rewrites the ASCII-math escapes of markdown documents into math nodes and prints
// the resulting mdast tree as JSON, ready for a downstream renderer.
//
// Usage:
//  asciimark <input> [--from <format>] [--output <file>]            - Rewrite a document (default)
//  asciimark convert <input> [--from <format>] [--output <file>]    - Same as above (explicit)
//  asciimark inspect <input> [<transform>]                          - Execute a transform (defaults to "math-summary")
//  asciimark tex <expression> [--display]                           - Convert a single expression
//  asciimark --list-transforms                                      - List available transforms
//
// Configuration:
//
// Settings come from the embedded defaults, then ./asciimark.toml if present, then --config.
// --prefix, --inline-open and --inline-close override the escape settings of all of them.

mod cli;
mod transforms;

use asciimark::engine::{AsciiMath, MathEngine};
use asciimark::Options;
use asciimark_config::{AsciiMarkConfig, ConfigError, Loader};
use clap::ArgMatches;
use cli::build_cli;
use std::fs;

const SUBCOMMANDS: &[&str] = &["convert", "inspect", "tex", "help"];

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            if args.len() > 1
                && !args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&args[1].as_str())
            {
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-transforms") {
        handle_list_transforms_command();
        return;
    }

    let config = load_cli_config(&matches);
    let options = Options::from(&config);

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let Some(path) = sub_matches.get_one::<String>("path") else {
                fail("path is required");
            };
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or("math-summary");
            handle_inspect_command(path, transform, &options);
        }
        Some(("convert", sub_matches)) => {
            let Some(input) = sub_matches.get_one::<String>("input") else {
                fail("input is required");
            };
            let from = sub_matches
                .get_one::<String>("from")
                .map(|s| s.as_str())
                .unwrap_or_else(|| transforms::detect_input_format(input));
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, from, output, &options, &config);
        }
        Some(("tex", sub_matches)) => {
            let Some(expression) = sub_matches.get_one::<String>("expression") else {
                fail("expression is required");
            };
            handle_tex_command(expression, sub_matches.get_flag("display"), &options);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

/// Handle the inspect command
fn handle_inspect_command(path: &str, transform: &str, options: &Options) {
    let source = read_input(path);
    let from = transforms::detect_input_format(path);

    let output =
        transforms::execute_transform(&source, from, transform, options).unwrap_or_else(|e| {
            eprintln!("Execution error: {e}");
            std::process::exit(1);
        });

    print!("{output}");
    if !output.is_empty() && !output.ends_with('\n') {
        println!();
    }
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: &str,
    output: Option<&str>,
    options: &Options,
    config: &AsciiMarkConfig,
) {
    let source = read_input(input);
    log::debug!("converting '{input}' as {from}");

    let tree = transforms::load_tree(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    let tree = transforms::rewrite_tree(tree, options).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    let json = transforms::tree_to_json(&tree, config.output.pretty).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });

    match output {
        Some(path) => {
            fs::write(path, format!("{json}\n")).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => println!("{json}"),
    }
}

/// Handle the tex command
fn handle_tex_command(expression: &str, display: bool, options: &Options) {
    let engine = AsciiMath::new(&options.clone().with_display(display).engine());
    match engine.to_tex(expression) {
        Ok(tex) => println!("{tex}"),
        Err(e) => {
            eprintln!("Conversion error: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle the list-transforms command
fn handle_list_transforms_command() {
    println!("Available transforms:\n");
    println!("  mdast-json    - The parsed tree, before rewriting");
    println!("  rewrite-json  - The tree after rewriting");
    println!("  math-summary  - One line per math node: kind, source, TeX\n");

    println!("Input formats:");
    for format_name in transforms::INPUT_FORMATS {
        println!("  {format_name}");
    }
}

fn read_input(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

fn load_cli_config(matches: &ArgMatches) -> AsciiMarkConfig {
    let loader = Loader::new().with_optional_file("asciimark.toml");
    let loader = match matches.get_one::<String>("config") {
        Some(path) => {
            log::debug!("layering configuration file '{path}'");
            loader.with_file(path)
        }
        None => loader,
    };

    let config = apply_config_overrides(loader, matches)
        .and_then(Loader::build)
        .unwrap_or_else(|err| {
            eprintln!("Failed to load configuration: {err}");
            std::process::exit(1);
        });
    log::debug!("resolved escape settings: {:?}", Options::from(&config).escape());
    config
}

fn apply_config_overrides(
    mut loader: Loader,
    matches: &ArgMatches,
) -> Result<Loader, ConfigError> {
    if let Some(prefixes) = matches.get_many::<String>("prefix") {
        let prefixes: Vec<String> = prefixes.cloned().collect();
        loader = loader.set_override("escape.prefixes", prefixes)?;
    }
    if let Some(open) = matches.get_one::<String>("inline-open") {
        loader = loader.set_override("escape.inline_open", open.as_str())?;
    }
    if let Some(close) = matches.get_one::<String>("inline-close") {
        loader = loader.set_override("escape.inline_close", close.as_str())?;
    }
    Ok(loader)
}
