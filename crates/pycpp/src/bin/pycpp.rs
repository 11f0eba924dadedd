use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use pycpp::console::{Diagnostic, OutputMode, ast_json, render_tokens, render_tree};
use pycpp::{TranspileConfig, Transpiler};
use pycpp_core::config::{INDENT_WIDTH_ENV, TAB_WIDTH_ENV};
use tracing_subscriber::EnvFilter;

/// Variable holding a tracing filter directive, e.g. `PYCPP_LOG=pycpp_parser=trace`.
const LOG_ENV: &str = "PYCPP_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "pycpp",
    version,
    about = "Transpile statically annotated Python into C++"
)]
struct Cli {
    /// Spaces per nesting level in the emitted C++
    #[arg(long, global = true)]
    indent_width: Option<usize>,
    /// Columns a tab advances to when measuring source indentation
    #[arg(long, global = true)]
    tab_width: Option<usize>,
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Plain output, no colour
    #[arg(long, global = true, conflicts_with = "json")]
    plain: bool,
    /// JSON output
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the token stream of a source file
    Tokens {
        /// Source file, or `-` for stdin
        input: PathBuf,
    },
    /// Print the symbol table and syntax tree of a source file
    Ast {
        /// Source file, or `-` for stdin
        input: PathBuf,
    },
    /// Translate a source file to C++
    Emit {
        /// Source file, or `-` for stdin
        input: PathBuf,
        /// Write the C++ here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        if self.plain {
            OutputMode::Plain
        } else if self.json {
            OutputMode::Json
        } else {
            OutputMode::detect()
        }
    }

    /// Flags first; the environment only fills settings no flag supplies.
    fn config(&self) -> Result<TranspileConfig> {
        let mut config = TranspileConfig::from_lookup(|key| match key {
            INDENT_WIDTH_ENV if self.indent_width.is_some() => None,
            TAB_WIDTH_ENV if self.tab_width.is_some() => None,
            _ => std::env::var(key).ok(),
        })
        .map_err(pycpp::Error::from)?;
        if let Some(width) = self.indent_width {
            config = config.indent_width(width);
        }
        if let Some(width) = self.tab_width {
            config = config.tab_width(width);
        }
        config.validate().map_err(pycpp::Error::from)?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mode = cli.output_mode();
    tracing::debug!(
        mode = %mode,
        agent = OutputMode::is_agent_environment(),
        "selected output mode"
    );

    match run(&cli, mode) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}

/// Logs go to stderr so stdout carries only program output.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn run(cli: &Cli, mode: OutputMode) -> Result<ExitCode> {
    let transpiler = Transpiler::new(cli.config()?);

    match &cli.command {
        Commands::Tokens { input } => {
            let source = read_source(input)?;
            match transpiler.tokens(&source) {
                Ok(tokens) => println!("{}", render_tokens(&tokens, mode)),
                Err(err) => return report(err, &source, input, mode),
            }
        }
        Commands::Ast { input } => {
            let source = read_source(input)?;
            match transpiler.parse(&source) {
                Ok((symbols, program)) => {
                    if mode.is_structured() {
                        println!("{:#}", ast_json(&symbols, &program));
                    } else {
                        println!("{}", render_tree(&symbols, &program));
                    }
                }
                Err(err) => return report(err, &source, input, mode),
            }
        }
        Commands::Emit { input, output } => {
            let source = read_source(input)?;
            let cpp = match transpiler.transpile(&source) {
                Ok(cpp) => cpp,
                Err(err) => return report(err, &source, input, mode),
            };
            match output {
                Some(path) => {
                    fs::write(path, &cpp)
                        .with_context(|| format!("writing {}", path.display()))?;
                    tracing::info!(path = %path.display(), bytes = cpp.len(), "wrote C++");
                }
                None => print!("{cpp}"),
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn read_source(input: &Path) -> Result<String> {
    if input.as_os_str() == "-" {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("reading stdin")?;
        return Ok(source);
    }
    fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))
}

/// Print a diagnostic for errors in the input program; anything else is
/// passed up as a failure of the environment.
fn report(err: pycpp::Error, source: &str, input: &Path, mode: OutputMode) -> Result<ExitCode> {
    if !err.is_source_error() {
        return Err(err.into());
    }
    let diagnostic = Diagnostic::from_error(&err)
        .with_source(source)
        .with_path(input.display().to_string());
    eprintln!("{}", diagnostic.render(mode));
    Ok(ExitCode::from(1))
}
