//! Purpose: `rejig` CLI entry point and command dispatch.
//! Role: Binary crate root; parses args, runs commands, emits text/JSON on stdout.
//! Invariants: Diagnostic trees and flattened documents go to stdout only.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::collections::BTreeSet;
use std::error::Error as StdError;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use clap::{error::ErrorKind as ClapErrorKind, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::aot::Shell;
use serde_json::{json, Map, Value as JsonValue};
use tracing_subscriber::EnvFilter;

mod color_value;

use color_value::colorize_value;
use rejig::api::{
    detail, dump, dump_json, load, to_exit_code, DumpOptions, Error, ErrorKind, Node, Value,
    DEFAULT_INDENT,
};

#[derive(Parser)]
#[command(
    name = "rejig",
    version,
    about = "Map JSON records to navigable node trees and back"
)]
struct Cli {
    /// When to use ANSI color on terminal output.
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, global = true)]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(
        about = "Load a JSON document and print its node tree",
        long_about = r#"Load a JSON document into an object-node tree and print an
indented diagnostic dump of every attribute.

Keys named with --protect keep their value as a raw record one level
down; nested records inside a raw value are re-checked against the
same set."#,
        after_help = r#"EXAMPLES
  $ rejig tree save.json
  $ rejig tree save.json --protect inventory --indent 2
  $ cat save.json | rejig tree"#
    )]
    Tree {
        /// JSON file to read; stdin when omitted.
        file: Option<PathBuf>,
        /// Key name left raw instead of node-converted; repeatable.
        #[arg(long = "protect", value_name = "KEY")]
        protect: Vec<String>,
        /// Spaces per nesting level.
        #[arg(long, default_value_t = DEFAULT_INDENT)]
        indent: usize,
    },
    #[command(
        about = "Load a JSON document, flatten it back, and emit JSON",
        after_help = r#"EXAMPLES
  $ rejig flat save.json
  $ rejig flat save.json --protect inventory --pretty"#
    )]
    Flat {
        /// JSON file to read; stdin when omitted.
        file: Option<PathBuf>,
        /// Key name left raw instead of node-converted; repeatable.
        #[arg(long = "protect", value_name = "KEY")]
        protect: Vec<String>,
        /// Pretty-print, colorized on a terminal.
        #[arg(long)]
        pretty: bool,
    },
    #[command(about = "Generate shell completions")]
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                let message = err
                    .to_string()
                    .lines()
                    .next()
                    .unwrap_or("invalid arguments")
                    .to_string();
                return Err((
                    Error::new(ErrorKind::InvalidInput)
                        .with_message(message)
                        .with_hint("Run `rejig --help` for usage."),
                    ColorMode::Auto,
                ));
            }
        },
    };

    init_tracing();
    let color_mode = cli.color;
    dispatch_command(cli.command, color_mode).map_err(|err| (err, color_mode))
}

fn dispatch_command(command: Command, color_mode: ColorMode) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "rejig", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Tree {
            file,
            protect,
            indent,
        } => {
            let node = load_document(file.as_deref(), &protect)?;
            let stdout = io::stdout();
            let mut out = stdout.lock();
            detail(&node, &mut out, indent).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to write tree")
                    .with_source(err)
            })?;
            Ok(RunOutcome::ok())
        }
        Command::Flat {
            file,
            protect,
            pretty,
        } => {
            let node = load_document(file.as_deref(), &protect)?;
            let value = Value::Node(node);
            if pretty {
                let use_color = color_mode.use_color(io::stdout().is_terminal());
                let flat = dump(&value, &DumpOptions::default())?;
                println!("{}", colorize_value(&flat, use_color));
            } else {
                println!("{}", dump_json(&value, &DumpOptions::default())?);
            }
            Ok(RunOutcome::ok())
        }
    }
}

fn load_document(file: Option<&Path>, protect: &[String]) -> Result<Node, Error> {
    let text = read_document(file)?;
    let parsed: JsonValue = serde_json::from_str(&text).map_err(|err| {
        Error::new(ErrorKind::InvalidInput)
            .with_message("input is not valid JSON")
            .with_source(err)
    })?;
    let protected: BTreeSet<String> = protect.iter().cloned().collect();
    load(Value::from(parsed), &protected)
}

fn read_document(file: Option<&Path>) -> Result<String, Error> {
    match file {
        Some(path) => fs::read_to_string(path).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message(format!("failed to read {}", path.display()))
                .with_source(err)
        }),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to read stdin")
                    .with_source(err)
            })?;
            Ok(text)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::InvalidInput => "invalid input".to_string(),
        ErrorKind::UnsupportedType => "unsupported type".to_string(),
        ErrorKind::SerializationConflict => "serialization conflict".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> JsonValue {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(key) = err.key() {
        inner.insert("key".to_string(), json!(key));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), JsonValue::Object(inner));
    JsonValue::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(key) = err.key() {
        lines.push(format!(
            "{} {key}",
            colorize_label("key:", use_color, AnsiColor::Yellow)
        ));
    }
    for cause in error_causes(err) {
        lines.push(format!(
            "{} {cause}",
            colorize_label("cause:", use_color, AnsiColor::Yellow)
        ));
    }
    lines.join("\n")
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}
