//! # Codesmith CLI
//!
//! Command-line interface for iterative code generation: describe a coding
//! task, let the model generate a candidate, run it, and let the model
//! critique the result until a candidate is accepted.
//!
//! Usage:
//!   codesmith <task>
//!   codesmith --provider anthropic <task>
//!   codesmith
//!
//! Examples:
//!   codesmith "Write a function that reverses a string"
//!   codesmith -a 5 -t 30 "Parse a CSV file and print the column sums"
//!   codesmith --provider local --model llama3 "FizzBuzz up to 50"
//!
//! Credentials come from the environment: OPENAI_API_KEY for the default
//! provider, ANTHROPIC_API_KEY for --provider anthropic.

use clap::{Parser, ValueEnum};
use codesmith_agent::{Agent, AgentConfig, RunOutcome};
use codesmith_core::{
    AnthropicProvider, ExecutorConfig, LlmProvider, OpenAIProvider, ProviderConfig,
};
use colored::Colorize;
use std::io::Write;

#[derive(Parser)]
#[command(name = "codesmith")]
#[command(author, version, about = "Iterative code generation, execution, and refinement")]
struct Cli {
    /// Coding task (prompted interactively when omitted)
    #[arg(trailing_var_arg = true)]
    task: Vec<String>,

    /// Model provider backend
    #[arg(short, long, value_enum, default_value_t = ProviderKind::Openai)]
    provider: ProviderKind,

    /// Model to use (provider default when omitted)
    #[arg(short, long)]
    model: Option<String>,

    /// Base URL for --provider local (OpenAI-compatible endpoint)
    #[arg(long, default_value = "http://localhost:11434/v1")]
    base_url: String,

    /// Maximum generate/execute/evaluate attempts
    #[arg(short = 'a', long, default_value = "3")]
    max_attempts: usize,

    /// Interpreter used to run candidate code
    #[arg(short, long, default_value = "python3")]
    interpreter: String,

    /// Wall-clock timeout for a single candidate run, in seconds
    #[arg(short, long, default_value = "10")]
    timeout: u64,

    /// Quiet mode - only print the final code
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProviderKind {
    Openai,
    Anthropic,
    Local,
}

fn prompt_for_task() -> String {
    print!("Enter your coding task: ");
    let _ = std::io::stdout().flush();

    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        return String::new();
    }
    line.trim().to_string()
}

fn require_env(var: &str) -> String {
    match std::env::var(var) {
        Ok(value) if !value.is_empty() => value,
        _ => {
            eprintln!("{}", format!("Please set the {} environment variable", var).red());
            std::process::exit(1);
        }
    }
}

async fn run_task<P: LlmProvider>(provider: P, cli: &Cli, task: &str) {
    let config = AgentConfig {
        max_attempts: cli.max_attempts,
        verbose: !cli.quiet,
        executor: ExecutorConfig {
            interpreter: cli.interpreter.clone(),
            timeout_secs: cli.timeout,
            ..Default::default()
        },
        ..Default::default()
    };

    let mut agent = Agent::with_config(provider, config);

    match agent.run(task).await {
        Ok(RunOutcome::Solved(solution)) => {
            if cli.quiet {
                println!("{}", solution.code);
            } else {
                let usage = agent.usage();
                println!(
                    "\nAccepted on attempt {} ({} model calls, {} tokens)",
                    solution.attempt,
                    usage.total_calls,
                    usage.total_tokens()
                );
            }
        }
        Ok(RunOutcome::Exhausted { attempts }) => {
            eprintln!(
                "{}",
                format!("No accepted solution after {} attempts", attempts).red()
            );
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let task = if cli.task.is_empty() {
        prompt_for_task()
    } else {
        cli.task.join(" ")
    };

    if task.is_empty() {
        eprintln!("Error: No task provided.");
        eprintln!("Usage: codesmith [OPTIONS] <TASK>...");
        eprintln!("\nExamples:");
        eprintln!("  codesmith \"Write a function that reverses a string\"");
        eprintln!("  codesmith --provider anthropic \"FizzBuzz up to 50\"");
        eprintln!("  codesmith --help");
        std::process::exit(1);
    }

    match cli.provider {
        ProviderKind::Openai => {
            let mut config = ProviderConfig::openai(require_env("OPENAI_API_KEY"));
            if let Some(model) = &cli.model {
                config = config.with_model(model);
            }
            run_task(OpenAIProvider::new(config), &cli, &task).await;
        }
        ProviderKind::Anthropic => {
            let mut config = ProviderConfig::anthropic(require_env("ANTHROPIC_API_KEY"));
            if let Some(model) = &cli.model {
                config = config.with_model(model);
            }
            run_task(AnthropicProvider::new(config), &cli, &task).await;
        }
        ProviderKind::Local => {
            let model = cli.model.clone().unwrap_or_else(|| "llama3".to_string());
            let config = ProviderConfig::local(&cli.base_url, model);
            run_task(OpenAIProvider::new(config), &cli, &task).await;
        }
    }
}
