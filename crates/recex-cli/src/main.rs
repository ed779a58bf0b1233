//! Recursion explorer CLI.
//!
//! Provides the `recex` binary, which traces the built-in demo programs
//! through the execution recorder and prints records or step queries as
//! JSON on stdout. Logs go to stderr and are filtered with `RUST_LOG`.

mod demos;

use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use recex_core::Vars;
use recex_trace::{
    ExecutionRecord, FrameSnapshot, ProgramError, Recorder, RecorderConfig, TraceError,
};

use demos::Demo;

/// Trace and replay recursive programs.
#[derive(Parser)]
#[command(name = "recex", about = "Trace and replay recursive programs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List the built-in demo programs.
    List,

    /// Trace a demo and print the full execution record.
    Trace {
        /// Demo name (see `recex list`).
        demo: String,

        /// Input passed to the demo (default: the demo's own).
        #[arg(short, long)]
        input: Option<u32>,

        /// Print single-line JSON.
        #[arg(long)]
        compact: bool,
    },

    /// Trace a demo and print the stack and visible variables at one step.
    Step {
        /// Demo name (see `recex list`).
        demo: String,

        /// 0-based step index; out-of-range values clamp.
        #[arg(short, long, allow_hyphen_values = true)]
        step: i64,

        /// Input passed to the demo (default: the demo's own).
        #[arg(short, long)]
        input: Option<u32>,
    },

    /// Trace a demo and print summary statistics.
    Stats {
        /// Demo name (see `recex list`).
        demo: String,

        /// Input passed to the demo (default: the demo's own).
        #[arg(short, long)]
        input: Option<u32>,
    },
}

/// Output of the `step` subcommand.
#[derive(Serialize)]
struct StepView {
    step: i64,
    total_steps: usize,
    stack: Vec<FrameSnapshot>,
    variables: Option<Vars>,
    next_stack: Vec<FrameSnapshot>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::List => run_list(),
        Commands::Trace {
            demo,
            input,
            compact,
        } => run_trace(&demo, input, compact),
        Commands::Step { demo, step, input } => run_step(&demo, step, input),
        Commands::Stats { demo, input } => run_stats(&demo, input),
    };
    process::exit(exit_code);
}

fn run_list() -> i32 {
    for demo in demos::DEMOS {
        println!(
            "{:<16} {} (default input {}, max {})",
            demo.name, demo.description, demo.default_input, demo.max_input
        );
    }
    0
}

/// Execute the trace subcommand.
///
/// Returns exit code: 0 = success, 1 = usage error, 2 = trace failure,
/// 3 = serialization failure.
fn run_trace(name: &str, input: Option<u32>, compact: bool) -> i32 {
    let record = match load(name, input) {
        Ok(record) => record,
        Err(code) => return code,
    };
    let json = if compact {
        serde_json::to_string(&record)
    } else {
        serde_json::to_string_pretty(&record)
    };
    emit(json)
}

fn run_step(name: &str, step: i64, input: Option<u32>) -> i32 {
    let record = match load(name, input) {
        Ok(record) => record,
        Err(code) => return code,
    };
    let view = StepView {
        step,
        total_steps: record.total_steps(),
        stack: record.stack_at_step(step),
        variables: record.variables_at_step(step),
        next_stack: record.stack_at_next_step(step),
    };
    emit(serde_json::to_string_pretty(&view))
}

fn run_stats(name: &str, input: Option<u32>) -> i32 {
    let record = match load(name, input) {
        Ok(record) => record,
        Err(code) => return code,
    };
    emit(serde_json::to_string_pretty(&record.stats()))
}

/// Resolves the demo and input, then traces it. On failure prints the error
/// and returns the exit code to use.
fn load(name: &str, input: Option<u32>) -> Result<ExecutionRecord, i32> {
    let Some(demo) = demos::find(name) else {
        eprintln!("Error: unknown demo '{}' (try `recex list`)", name);
        return Err(1);
    };
    let input = input.unwrap_or(demo.default_input);

    tracing::info!(demo = demo.name, input, "tracing demo");
    trace_demo(demo, input).map_err(|e| {
        eprintln!("Error: {}", e);
        2
    })
}

fn trace_demo(demo: &Demo, input: u32) -> Result<ExecutionRecord, TraceError> {
    Recorder::run(RecorderConfig::default(), |api| {
        if input > demo.max_input {
            return Err(ProgramError::from(format!(
                "input {} exceeds the limit of {} for '{}'",
                input, demo.max_input, demo.name
            )));
        }
        (demo.run)(api, input);
        Ok(())
    })
}

fn emit(json: serde_json::Result<String>) -> i32 {
    match json {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(e) => {
            eprintln!("Error: failed to serialize output: {}", e);
            3
        }
    }
}
