//! Command-line interface for the flowsmith utility
//!
//! Renders state-machine JSON as Mermaid flowchart text and checks machines
//! for transitions to undeclared states.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use flowsmith::core::logging::{init_logging, FORMAT_ENV, LEVEL_ENV};
use flowsmith::plugins::state::{render_machine, StateMachine, StyleTable};
use flowsmith::{ArrowStyle, Curve, Direction, FlowchartOption, LineStyle, Shape};

/// Flowsmith - Render state machines as Mermaid flowcharts
#[derive(Parser)]
#[command(name = "flowsmith")]
#[command(about = "A Rust utility to turn state-machine descriptions into Mermaid flowchart text")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a state machine as a Mermaid flowchart
    Machine {
        /// Input file containing the machine JSON (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Style table JSON mapping state types and tags to classes and shapes
        #[arg(short, long)]
        styles: Option<PathBuf>,

        /// Output file for the flowchart text (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check a state machine for transitions to undeclared states
    Check {
        /// Input file containing the machine JSON (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// List shapes, curves, arrow and line styles, and flowchart options
    Shapes {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Keyword sets accepted by the library
#[derive(Debug, Serialize)]
struct Vocabulary {
    shapes: Vec<&'static str>,
    directions: Vec<&'static str>,
    curves: Vec<&'static str>,
    arrow_styles: Vec<&'static str>,
    line_styles: Vec<&'static str>,
    flowchart_options: Vec<&'static str>,
}

impl Vocabulary {
    fn collect() -> Self {
        Self {
            shapes: Shape::names(),
            directions: Direction::ALL.iter().map(Direction::as_str).collect(),
            curves: Curve::names(),
            arrow_styles: ArrowStyle::names(),
            line_styles: LineStyle::names(),
            flowchart_options: FlowchartOption::names(),
        }
    }

    fn sections(&self) -> [(&'static str, &[&'static str]); 6] {
        [
            ("Shapes", self.shapes.as_slice()),
            ("Directions", self.directions.as_slice()),
            ("Curves", self.curves.as_slice()),
            ("Arrow styles", self.arrow_styles.as_slice()),
            ("Line styles", self.line_styles.as_slice()),
            ("Flowchart options", self.flowchart_options.as_slice()),
        ]
    }
}

/// Main CLI application
pub struct FlowsmithApp {
    default_table: StyleTable,
}

impl FlowsmithApp {
    /// Create a new application instance with the built-in style table
    pub fn new() -> Self {
        Self::with_table(StyleTable::default())
    }

    /// Create a new application instance with a different fallback table
    pub fn with_table(default_table: StyleTable) -> Self {
        Self { default_table }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level = std::env::var(LEVEL_ENV)
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| cli.log_level.as_str().to_string());
        let log_format = std::env::var(FORMAT_ENV)
            .ok()
            .unwrap_or_else(|| cli.log_format.as_str().to_string());

        if let Err(e) = init_logging(Some(&log_level), Some(&log_format)) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Flowsmith v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Machine {
                input,
                styles,
                output,
            } => self.machine_command(input, styles, output, cli.verbose),
            Commands::Check { input } => self.check_command(input, cli.verbose),
            Commands::Shapes { json } => self.shapes_command(json, cli.verbose),
        }
    }

    /// Handle the machine command
    fn machine_command(
        &self,
        input: Option<PathBuf>,
        styles: Option<PathBuf>,
        output: Option<PathBuf>,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let machine = StateMachine::from_json(&content).context("Failed to parse state machine")?;
        let text = match styles {
            Some(path) => {
                let table = self.load_table(&path)?;
                render_machine(&machine, &table)?
            }
            None => render_machine(&machine, &self.default_table)?,
        };

        info!(machine = %machine.id, bytes = text.len(), "Rendered state machine");
        if verbose {
            eprintln!("Rendered {} states", machine.states.len());
        }
        self.write_output(output, &text)
    }

    /// Handle the check command
    fn check_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let machine = StateMachine::from_json(&content).context("Failed to parse state machine")?;
        let dangling = machine.dangling_targets();
        if dangling.is_empty() {
            let transitions: usize = machine.states.values().map(|s| s.on.len()).sum();
            println!(
                "✓ Valid state machine '{}' ({} states, {} transitions)",
                machine.id,
                machine.states.len(),
                transitions
            );
            return Ok(());
        }

        for target in &dangling {
            println!(
                "✗ {} --{}--> {}: target state is not declared",
                target.state, target.event, target.target
            );
        }
        Err(anyhow!(
            "{} transition(s) in '{}' target undeclared states",
            dangling.len(),
            machine.id
        ))
    }

    /// Handle the shapes command
    fn shapes_command(&self, json: bool, verbose: bool) -> Result<()> {
        if verbose {
            eprintln!("Listing supported keywords");
        }

        let vocabulary = Vocabulary::collect();
        if json {
            println!("{}", serde_json::to_string_pretty(&vocabulary)?);
        } else {
            for (index, (title, names)) in vocabulary.sections().iter().enumerate() {
                if index > 0 {
                    println!();
                }
                println!("{}:", title);
                for name in names.iter() {
                    println!("  {}", name);
                }
            }
        }
        Ok(())
    }

    fn load_table(&self, path: &Path) -> Result<StyleTable> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read style table '{}': {}", path.display(), e))?;
        debug!(path = %path.display(), "Loading style table");
        StyleTable::from_json(&content)
            .with_context(|| format!("Invalid style table '{}'", path.display()))
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    ///
    /// Stdout always ends with a newline; files get the text unchanged.
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(content.as_bytes())?;
                if !content.is_empty() && !content.ends_with('\n') {
                    stdout.write_all(b"\n")?;
                }
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

impl Default for FlowsmithApp {
    fn default() -> Self {
        Self::new()
    }
}
