//! Rendering prompts from a task description
//!
//! Three prompt pairs drive one attempt: reasoning (analyze the problem,
//! optionally with the previous attempt's feedback), generation (produce
//! runnable code from the reasoning), and evaluation (critique the candidate
//! against its captured output and answer with a JSON verdict).

use crate::error::{self, Result};
use crate::executor::ExecutionOutcome;

const REASONING_SYSTEM: &str = "\
You are a Python programmer. Analyze the problem technically, considering:
- Input/output specifications
- Edge cases and potential failure points
- Performance considerations
- Implementation constraints
If provided, analyze previous failure feedback to avoid similar issues.";

const GENERATION_SYSTEM: &str = "\
You are a Python programmer. Generate clean, efficient, and well-commented \
code based on the given reasoning and requirements. The code has to execute \
without asking for any user input.
Follow these output guidelines:
- Print test results in a clean, structured way
- Avoid printing intermediate results unless necessary
- If using assertions, catch AssertionError and print a clean summary
- Format the output to be easily readable
IMPORTANT: Do not include markdown formatting or ```python blocks. Provide \
only the raw Python code.";

const EVALUATION_SYSTEM: &str = r#"You are a technical code reviewer. Evaluate the code implementation and its output.
Respond with a JSON object of the following structure:
{
    "success": boolean,
    "feedback": {
        "technical_analysis": "Detailed technical analysis of the implementation",
        "failure_points": ["List of specific technical issues if any"],
        "suggestions": ["Specific technical improvements"],
        "performance_notes": "Notes about code efficiency and performance",
        "edge_cases": ["Edge cases that might cause issues"]
    }
}
Focus on technical aspects like algorithm choice, error handling, edge cases, and performance.
Return ONLY the JSON object. No markdown, no explanation."#;

/// Builds the prompts for one task
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    task: String,
}

impl PromptBuilder {
    /// Create a builder for a task description.
    ///
    /// The only validation is non-empty input.
    pub fn new(task: impl Into<String>) -> Result<Self> {
        let task = task.into();
        let trimmed = task.trim();
        if trimmed.is_empty() {
            return Err(error::task_empty().with_operation("prompt::new"));
        }
        Ok(Self {
            task: trimmed.to_string(),
        })
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn reasoning_system(&self) -> &'static str {
        REASONING_SYSTEM
    }

    /// The reasoning prompt, threading the previous attempt's feedback
    pub fn reasoning(&self, prior_feedback: Option<&str>) -> String {
        let mut out = format!(
            "Technically analyze this problem and provide a detailed solution approach: {}",
            self.task
        );
        if let Some(feedback) = prior_feedback {
            out.push_str("\n\nPrevious attempt failed with the following technical feedback:\n");
            out.push_str(feedback);
            out.push_str("\nConsider this feedback while planning the solution.");
        }
        out
    }

    pub fn generation_system(&self) -> &'static str {
        GENERATION_SYSTEM
    }

    /// The generation prompt, embedding the reasoning
    pub fn generation(&self, reasoning: &str) -> String {
        format!(
            "Based on this reasoning:\n{}\n\nGenerate Python code that: {}",
            reasoning, self.task
        )
    }

    pub fn evaluation_system(&self) -> &'static str {
        EVALUATION_SYSTEM
    }

    /// The evaluation prompt, embedding the candidate and its execution
    /// result verbatim
    pub fn evaluation(&self, code: &str, outcome: &ExecutionOutcome) -> String {
        format!(
            "Instruction: {}\nCode:\n{}\nOutput:\n{}\n\nProvide a technical evaluation of this implementation.",
            self.task,
            code,
            outcome.summary()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn outcome(stdout: &str, stderr: &str, exit_code: i32) -> ExecutionOutcome {
        ExecutionOutcome {
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            exit_code,
            timed_out: false,
        }
    }

    #[test]
    fn test_rejects_empty_task() {
        let err = PromptBuilder::new("   \n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TaskEmpty);
    }

    #[test]
    fn test_task_is_trimmed() {
        let builder = PromptBuilder::new("  reverse a string  ").unwrap();
        assert_eq!(builder.task(), "reverse a string");
    }

    #[test]
    fn test_reasoning_without_feedback() {
        let builder = PromptBuilder::new("reverse a string").unwrap();
        let prompt = builder.reasoning(None);
        assert!(prompt.contains("reverse a string"));
        assert!(!prompt.contains("Previous attempt"));
    }

    #[test]
    fn test_reasoning_threads_feedback() {
        let builder = PromptBuilder::new("reverse a string").unwrap();
        let prompt = builder.reasoning(Some("misses unicode input"));
        assert!(prompt.contains("Previous attempt failed"));
        assert!(prompt.contains("misses unicode input"));
    }

    #[test]
    fn test_generation_embeds_reasoning_and_task() {
        let builder = PromptBuilder::new("reverse a string").unwrap();
        let prompt = builder.generation("Use slicing with a negative step.");
        assert!(prompt.contains("Use slicing with a negative step."));
        assert!(prompt.contains("reverse a string"));
    }

    #[test]
    fn test_evaluation_embeds_candidate_and_result_verbatim() {
        let builder = PromptBuilder::new("reverse a string").unwrap();
        let code = "def reverse(s):\n    return s[::-1]\nprint('OK')";
        let run = outcome("OK\n", "", 0);
        let prompt = builder.evaluation(code, &run);

        assert!(prompt.contains(code));
        assert!(prompt.contains("OK\n"));
        assert!(prompt.contains("exit code: 0"));
    }

    #[test]
    fn test_evaluation_includes_stderr() {
        let builder = PromptBuilder::new("reverse a string").unwrap();
        let run = outcome("", "Traceback: NameError\n", 1);
        let prompt = builder.evaluation("print(x)", &run);
        assert!(prompt.contains("Traceback: NameError"));
        assert!(prompt.contains("exit code: 1"));
    }
}
