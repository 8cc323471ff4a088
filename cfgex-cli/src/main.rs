use std::io::Read;
use std::path::Path;
use std::process;

use cfgex_core::codec::{self, Format};
use cfgex_core::{CompileOptions, Compiler, DEFAULT_MAX_DEPTH, compile_debug};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

#[derive(Parser)]
#[command(name = "cfgex")]
#[command(about = "Cfgex - Compile JSON/YAML pattern configurations into regular expressions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a pattern file to a regex
    Compile {
        /// Pattern file, or `-` for stdin
        input: String,
        /// The file holds a list of top-level patterns
        #[arg(short, long)]
        list: bool,
        /// Show a compilation report (single patterns only)
        #[arg(short, long, conflicts_with = "list")]
        debug: bool,
        /// Deepest nesting accepted
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
    /// Re-encode a pattern file as JSON or YAML
    Convert {
        /// Pattern file, or `-` for stdin
        input: String,
        /// Output format
        #[arg(short, long, value_enum)]
        to: OutputFormat,
    },
    /// Check that a pattern file decodes and compiles
    Check {
        /// Pattern file, or `-` for stdin
        input: String,
        /// The file holds a list of top-level patterns
        #[arg(short, long)]
        list: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Format::Json,
            OutputFormat::Yaml => Format::Yaml,
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            input,
            list,
            debug,
            max_depth,
        } => cmd_compile(&input, list, debug, CompileOptions { max_depth }),
        Commands::Convert { input, to } => cmd_convert(&input, to.into()),
        Commands::Check { input, list } => cmd_check(&input, list),
    }
}

/// Install a stderr subscriber when `CFGEX_LOG` or `RUST_LOG` is set
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_env("CFGEX_LOG").or_else(|_| EnvFilter::try_from_default_env());
    if let Ok(filter) = filter {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(filter)
            .init();
    }
}

fn fail(error: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), error);
    process::exit(1);
}

fn read_input(input: &str) -> String {
    let result = if input == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).map(|_| text)
    } else {
        std::fs::read_to_string(Path::new(input))
    };

    match result {
        Ok(text) => {
            tracing::debug!(input, bytes = text.len(), "read pattern source");
            text
        }
        Err(e) => fail(format!("cannot read {}: {}", input, e)),
    }
}

fn compile_text(text: &str, list: bool, options: CompileOptions) -> cfgex_core::Result<String> {
    let compiler = Compiler::with_options(options);
    if list {
        let patterns = codec::decode_list(text)?;
        compiler.compile_all(&patterns)
    } else {
        let pattern = codec::decode(text)?;
        compiler.compile(&pattern)
    }
}

fn cmd_compile(input: &str, list: bool, debug: bool, options: CompileOptions) {
    let text = read_input(input);

    if debug {
        match compile_debug(&text, options) {
            Ok(report) => println!("{}", report),
            Err(e) => fail(e),
        }
        return;
    }

    match compile_text(&text, list, options) {
        Ok(regex) => println!("{}", regex),
        Err(e) => fail(e),
    }
}

fn cmd_convert(input: &str, to: Format) {
    let text = read_input(input);

    match codec::convert(&text, to) {
        Ok(output) => println!("{}", output.trim_end()),
        Err(e) => fail(e),
    }
}

fn cmd_check(input: &str, list: bool) {
    let text = read_input(input);

    match compile_text(&text, list, CompileOptions::default()) {
        Ok(regex) => {
            println!("{} {}", "✓ Valid:".green().bold(), input);
            println!("  Output: {}", regex.cyan());
        }
        Err(e) => {
            println!("{} {}", "✗ Invalid:".red().bold(), input);
            fail(e);
        }
    }
}
