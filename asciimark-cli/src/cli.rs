// Command line definition, shared with build.rs for shell completions.
//
// build.rs pulls this file in with include!, so it only depends on clap and must not use
// inner doc comments or crate paths.

use clap::{Arg, ArgAction, Command, ValueHint};

/// All available inspect transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["mdast-json", "rewrite-json", "math-summary"];

/// Input formats accepted by `--from`.
pub const INPUT_FORMATS: &[&str] = &["markdown", "json"];

pub fn build_cli() -> Command {
    Command::new("asciimark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rewrite ASCII-math in markdown into math nodes")
        .long_about(
            "asciimark finds ASCII-math in markdown code and replaces it with math nodes.\n\n\
            Escapes:\n  \
            - code blocks tagged with a prefix (```am or ```asciimath by default)\n  \
            - code spans wrapped in the inline markers (`$...$` by default)\n\n\
            Commands:\n  \
            - convert: Rewrite a document and print the tree as JSON\n  \
            - inspect: View the tree before or after rewriting\n  \
            - tex:     Convert a single expression to TeX\n\n\
            Examples:\n  \
            asciimark notes.md                          # Rewritten mdast JSON on stdout\n  \
            asciimark notes.md -o notes.json            # Write it to a file\n  \
            asciimark inspect notes.md                  # One line per math node\n  \
            asciimark notes.md --prefix math            # Only ```math blocks\n  \
            asciimark tex 'sum_(i=1)^n i'               # TeX for one expression",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an asciimark.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .value_name("LANG")
                .help("Code block language treated as ASCII-math (repeatable)")
                .action(ArgAction::Append)
                .global(true),
        )
        .arg(
            Arg::new("inline-open")
                .long("inline-open")
                .value_name("MARKER")
                .help("Opening inline marker, written with its backtick fence (default: `$)")
                .allow_hyphen_values(true)
                .global(true),
        )
        .arg(
            Arg::new("inline-close")
                .long("inline-close")
                .value_name("MARKER")
                .help("Closing inline marker, written with its backtick fence (default: $`)")
                .allow_hyphen_values(true)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Rewrite a document and print the tree as JSON (default command)")
                .long_about(
                    "Parse a document, rewrite its ASCII-math escapes and print the tree as JSON.\n\n\
                    Input formats:\n  \
                    - markdown: Markdown source (default)\n  \
                    - json:     An mdast tree as JSON (.json)\n\n\
                    The input format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\
                    Set output.pretty = false in the configuration for compact JSON.\n\n\
                    Examples:\n  \
                    asciimark convert notes.md                 # JSON on stdout\n  \
                    asciimark convert tree.json -o out.json    # Rewrite an existing mdast tree\n  \
                    asciimark notes.md                         # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Input format (auto-detected from file extension if not specified)")
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            INPUT_FORMATS,
                        ))
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect a document before or after rewriting")
                .long_about(
                    "View a document at different processing stages.\n\n\
                    Transforms:\n  \
                    - mdast-json:    The parsed tree, before rewriting\n  \
                    - rewrite-json:  The tree after rewriting\n  \
                    - math-summary:  One line per math node: kind, source, TeX (default)\n\n\
                    Examples:\n  \
                    asciimark inspect notes.md                # Math summary\n  \
                    asciimark inspect notes.md mdast-json     # Tree as parsed",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the document")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply. Defaults to 'math-summary'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("tex")
                .about("Convert a single ASCII-math expression to TeX")
                .arg(
                    Arg::new("expression")
                        .help("ASCII-math source")
                        .required(true)
                        .allow_hyphen_values(true)
                        .index(1),
                )
                .arg(
                    Arg::new("display")
                        .long("display")
                        .help("Prefix the output with \\displaystyle")
                        .action(ArgAction::SetTrue),
                ),
        )
}
