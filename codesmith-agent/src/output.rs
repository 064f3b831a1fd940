//! Console reporting for the agent loop
//!
//! All methods are no-ops unless the console is verbose, so `--quiet`
//! callers get nothing but the final code.

use codesmith_core::{Evaluation, ExecutionOutcome};
use colored::Colorize;

const WIDTH: usize = 80;

/// Verbosity-gated console output
#[derive(Debug, Clone)]
pub struct Console {
    verbose: bool,
}

impl Console {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Print the run banner
    pub fn banner(&self, text: &str) {
        if self.verbose {
            println!("\n{}", text.magenta().bold());
        }
    }

    /// Print the attempt counter
    pub fn attempt(&self, attempt: usize, max: usize) {
        if self.verbose {
            println!("\n{}", format!("Attempt {}/{}", attempt, max).magenta());
        }
    }

    /// Print a step in the process
    pub fn step(&self, title: &str, body: &str) {
        if self.verbose {
            println!("\n{} {}", "▶".yellow().bold(), format!("{}:", title).yellow().bold());
            println!("{}", body);
        }
    }

    /// Print the model's reasoning in a ruled block
    pub fn thinking(&self, text: &str) {
        if self.verbose {
            println!("\n{}", "=".repeat(WIDTH));
            println!("{}", "Thinking Process:".cyan().bold());
            println!("{}", "-".repeat(WIDTH));
            println!("{}", text);
            println!("{}\n", "=".repeat(WIDTH));
        }
    }

    /// Print the candidate with line numbers, then a clean copy
    pub fn code_preview(&self, code: &str) {
        if !self.verbose {
            return;
        }
        let code = code.trim();
        let lines: Vec<&str> = code.lines().collect();
        let num_width = lines.len().to_string().len();

        println!("\n{}", "+".repeat(WIDTH));
        println!("{}", "Code Preview (with line numbers):".blue().bold());
        println!("{}", "+".repeat(WIDTH));
        for (i, line) in lines.iter().enumerate() {
            println!("{:>width$} │ {}", i + 1, line, width = num_width);
        }

        println!("\n{}", "+".repeat(WIDTH));
        println!("{}", "Clean Code (for copying):".green().bold());
        println!("{}", "+".repeat(WIDTH));
        println!("{}", code);
        println!("{}\n", "+".repeat(WIDTH));
    }

    /// Print captured stdout (green) and stderr (red)
    pub fn execution(&self, outcome: &ExecutionOutcome) {
        if !self.verbose {
            return;
        }
        if !outcome.stdout.trim().is_empty() {
            println!("{}", "Output:".green().bold());
            println!("{}", outcome.stdout.green());
        }
        if !outcome.stderr.trim().is_empty() {
            println!("{}", "Error:".red().bold());
            println!("{}", outcome.stderr.red());
        }
    }

    /// Print an error block
    pub fn error_block(&self, text: &str) {
        if self.verbose {
            println!("{}", text.red());
        }
    }

    /// Print the model's raw response when the verdict fails to parse
    pub fn parse_failure(&self, raw: &str) {
        if self.verbose {
            println!("\n{} {}", "▶".red().bold(), "Raw Evaluation Response:".red().bold());
            println!("{}", raw.red());
        }
    }

    /// Print the technical evaluation summary
    pub fn evaluation(&self, evaluation: &Evaluation) {
        if !self.verbose {
            return;
        }
        let header = if evaluation.success {
            "Technical Evaluation:".green().bold()
        } else {
            "Technical Evaluation:".yellow().bold()
        };
        let feedback = &evaluation.feedback;

        println!("\n{} {}", "▶".yellow().bold(), header);
        println!("Success: {}", evaluation.success);
        println!("\nAnalysis: {}", feedback.technical_analysis);
        println!("\nFailure Points: {}", join_or_none(&feedback.failure_points));
        println!("\nSuggestions: {}", join_or_none(&feedback.suggestions));
        println!("\nPerformance: {}", feedback.performance_notes);
        println!("\nEdge Cases: {}", join_or_none(&feedback.edge_cases));
    }

    /// Print the accepted solution
    pub fn final_solution(&self, code: &str) {
        if self.verbose {
            println!("\n{}", "Final Solution:".green().bold());
            self.code_preview(code);
        }
    }

    /// Print the exhaustion notice
    pub fn exhausted(&self, max: usize) {
        if self.verbose {
            println!(
                "\n{}",
                format!("Max attempts ({}) reached without success", max)
                    .red()
                    .bold()
            );
        }
    }

    /// Print the size of a model response
    pub fn response_chars(&self, len: usize) {
        if self.verbose {
            println!("   Response: {} chars", len);
        }
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_or_none() {
        assert_eq!(join_or_none(&[]), "None");
        assert_eq!(
            join_or_none(&["a".to_string(), "b".to_string()]),
            "a, b"
        );
    }

    #[test]
    fn test_quiet_console_is_silent() {
        // Methods must not panic and print nothing when not verbose
        let console = Console::new(false);
        console.banner("banner");
        console.attempt(1, 3);
        console.code_preview("print('OK')");
        console.exhausted(3);
        assert!(!console.verbose());
    }
}
