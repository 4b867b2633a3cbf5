//! fen-diagram CLI
//!
//! Usage:
//!   fen-diagram [OPTIONS] [DIRECTIVE]
//!
//! Options:
//!   -f, --file <FILE>          Read the directive from a file
//!   -s, --stylesheet <FILE>    Stylesheet file for colors and glyphs (TOML format)
//!   --legacy                   Read the multi-line fen:/orientation:/annotations: form
//!   --key-scope <fen|diagram>  What the printed slot key is computed over
//!   --print-key                Print the slot key before the SVG
//!   -h, --help                 Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use fen_diagram::{
    render_with_config, strip_type_tag, Grammar, KeyScope, RenderConfig, RenderError,
    Stylesheet, SvgConfig,
};

#[derive(Parser)]
#[command(name = "fen-diagram")]
#[command(about = "Render chess diagrams from FEN notation to SVG")]
struct Cli {
    /// Directive such as `<fen>@black@e2-e4 g7` (reads stdin if omitted)
    directive: Option<String>,

    /// Read the directive from a file
    #[arg(short, long, conflicts_with = "directive")]
    file: Option<PathBuf>,

    /// Stylesheet file for colors and glyphs (TOML format)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Force the multi-line legacy notation
    #[arg(long)]
    legacy: bool,

    /// What the slot key is computed over
    #[arg(long, value_enum, default_value_t = KeyScopeArg::Fen)]
    key_scope: KeyScopeArg,

    /// Print the slot key on its own line before the SVG
    #[arg(long)]
    print_key: bool,

    /// Emit the SVG on a single line
    #[arg(long)]
    compact: bool,

    /// Prepend an XML declaration
    #[arg(long)]
    standalone: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum KeyScopeArg {
    Fen,
    Diagram,
}

impl From<KeyScopeArg> for KeyScope {
    fn from(arg: KeyScopeArg) -> Self {
        match arg {
            KeyScopeArg::Fen => KeyScope::Fen,
            KeyScopeArg::Diagram => KeyScope::Diagram,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(
            &std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default(),
        ))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.directive.is_none() && cli.file.is_none() && io::stdin().is_terminal() {
        print_intro();
        return ExitCode::SUCCESS;
    }

    let stylesheet = match &cli.stylesheet {
        Some(path) => match Stylesheet::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading stylesheet '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Stylesheet::default(),
    };

    let (source, filename) = match (&cli.directive, &cli.file) {
        (Some(text), _) => (text.clone(), "<directive>".to_string()),
        (None, Some(path)) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        (None, None) => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading from stdin: {}", e);
                return ExitCode::FAILURE;
            }
            (buffer, "<stdin>".to_string())
        }
    };

    let mut config = RenderConfig::new()
        .with_stylesheet(stylesheet)
        .with_key_scope(cli.key_scope.into())
        .with_svg(
            SvgConfig::new()
                .with_pretty_print(!cli.compact)
                .with_standalone(cli.standalone),
        );
    if cli.legacy {
        config = config.with_grammar(Grammar::Legacy);
    }

    // A directive file usually ends with a newline that is not part of it.
    let source = if cli.legacy {
        source
    } else {
        source.trim_end().to_string()
    };

    match render_with_config(&source, &config) {
        Ok(Some(result)) => {
            if cli.print_key {
                println!("{}", result.key);
            }
            println!("{}", result.svg);
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("Directive skipped: unrecognized orientation");
            ExitCode::FAILURE
        }
        Err(RenderError::Notation(e)) => {
            eprint!("{}", e.format(strip_type_tag(&source), &filename));
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG`-style directives; warnings and errors only when none are given.
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives)
}

fn print_intro() {
    println!(
        r#"fen-diagram - Render chess diagrams from FEN notation to SVG

USAGE:
    fen-diagram [OPTIONS] [DIRECTIVE]
    echo '<directive>' | fen-diagram

DIRECTIVE:
    <fen>[@<orientation>[@<annotations>]]

    orientation    white (default) or black
    annotations    space-separated squares to highlight (g7)
                   and arrows between two squares (e2-e4)

LEGACY FORM (--legacy, or detected from a leading "fen:" or several lines):
    fen: <fen>
    orientation: black
    annotations: Hg7 Ae2-e4

OPTIONS:
    -f, --file         Read the directive from a file
    -s, --stylesheet   Custom colors and glyphs (TOML file)
    --key-scope        fen (default) or diagram
    --print-key        Print the slot key before the SVG
    --compact          Single-line SVG
    --standalone       Prepend an XML declaration
    -h, --help         Print help

QUICK START:
    fen-diagram 'rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR@white@e2-e4 g7' > board.svg

Set RUST_LOG=debug to trace how a directive is decoded."#
    );
}
