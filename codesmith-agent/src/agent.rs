//! Agent implementation - orchestrates the generate/execute/evaluate loop

use crate::output::Console;
use codesmith_core::{
    error, extract_code, ChatMessage, CompletionRequest, Error, Evaluation, ExecutionOutcome,
    Executor, ExecutorConfig, LlmProvider, PromptBuilder, Result, UsageTracker,
};
use std::time::Duration;

/// Configuration for the agent
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Maximum generate/execute/evaluate attempts per task
    pub max_attempts: usize,
    /// Enable the console narrative
    pub verbose: bool,
    /// Sampling temperature for reasoning and generation
    pub generation_temperature: f32,
    /// Sampling temperature for evaluation
    pub evaluation_temperature: f32,
    /// Pause after a rejected attempt
    pub pause_between_attempts: Duration,
    /// Executor settings (interpreter, timeout)
    pub executor: ExecutorConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            verbose: true,
            generation_temperature: 0.7,
            evaluation_temperature: 0.3,
            pause_between_attempts: Duration::from_secs(1),
            executor: ExecutorConfig::default(),
        }
    }
}

/// An accepted candidate solution
#[derive(Debug, Clone)]
pub struct Solution {
    /// The candidate source text
    pub code: String,
    /// Which attempt produced it (1-based)
    pub attempt: usize,
    /// The verdict that accepted it
    pub evaluation: Evaluation,
}

/// How a run ended
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// A candidate was accepted by the evaluator
    Solved(Solution),
    /// The attempt budget ran out without an accepted candidate
    Exhausted { attempts: usize },
}

/// The agent orchestrator - manages the generate <-> execute <-> evaluate loop
pub struct Agent<P: LlmProvider> {
    provider: P,
    executor: Executor,
    config: AgentConfig,
    console: Console,
    usage: UsageTracker,
    /// Technical feedback from the last rejected attempt
    last_feedback: Option<String>,
}

impl<P: LlmProvider> Agent<P> {
    /// Create a new agent with default configuration
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, AgentConfig::default())
    }

    /// Create a new agent with custom configuration
    pub fn with_config(provider: P, config: AgentConfig) -> Self {
        let executor = Executor::with_config(config.executor.clone());
        let console = Console::new(config.verbose);
        Self {
            provider,
            executor,
            config,
            console,
            usage: UsageTracker::new(),
            last_feedback: None,
        }
    }

    /// Get the underlying provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Get accumulated token usage
    pub fn usage(&self) -> &UsageTracker {
        &self.usage
    }

    /// Run a task until a candidate is accepted or attempts run out
    pub async fn run(&mut self, task: &str) -> Result<RunOutcome> {
        let prompts = PromptBuilder::new(task)?;
        self.last_feedback = None;

        self.console.banner("Starting iterative code generation");

        for attempt in 1..=self.config.max_attempts {
            self.console.attempt(attempt, self.config.max_attempts);

            let code = self.generate(&prompts).await?;
            self.console.code_preview(&code);

            self.console.step("Executing code", "Running the generated code");
            let outcome = self.executor.run(&code).await?;
            self.console.execution(&outcome);

            if !outcome.success() {
                // No verdict for a crashed candidate; move straight on
                self.console.error_block(&outcome.stderr);
                continue;
            }

            let evaluation = self.evaluate(&prompts, &code, &outcome).await?;
            self.console.evaluation(&evaluation);

            if evaluation.success {
                self.console.final_solution(&code);
                return Ok(RunOutcome::Solved(Solution {
                    code,
                    attempt,
                    evaluation,
                }));
            }

            self.last_feedback = Some(evaluation.feedback.to_context());
            tokio::time::sleep(self.config.pause_between_attempts).await;
        }

        self.console.exhausted(self.config.max_attempts);
        Ok(RunOutcome::Exhausted {
            attempts: self.config.max_attempts,
        })
    }

    /// Reason about the task, then generate a candidate from the reasoning
    async fn generate(&mut self, prompts: &PromptBuilder) -> Result<String> {
        self.console.step("Analyzing problem", prompts.task());

        let reasoning_prompt = prompts.reasoning(self.last_feedback.as_deref());
        let reasoning = self
            .complete_with(
                prompts.reasoning_system(),
                &reasoning_prompt,
                self.config.generation_temperature,
            )
            .await?;
        self.console.thinking(&reasoning);

        self.console
            .step("Generating code", "Based on the analysis, crafting solution...");
        let raw = self
            .complete_with(
                prompts.generation_system(),
                &prompts.generation(&reasoning),
                self.config.generation_temperature,
            )
            .await?;

        Ok(extract_code(&raw).to_string())
    }

    /// Ask the model to critique the candidate against its captured output
    async fn evaluate(
        &mut self,
        prompts: &PromptBuilder,
        code: &str,
        outcome: &ExecutionOutcome,
    ) -> Result<Evaluation> {
        self.console
            .step("Evaluating", "Reviewing the implementation and its output");

        let raw = self
            .complete_with(
                prompts.evaluation_system(),
                &prompts.evaluation(code, outcome),
                self.config.evaluation_temperature,
            )
            .await?;

        Ok(match Evaluation::parse(&raw) {
            Ok(evaluation) => evaluation,
            Err(_) => {
                self.console.parse_failure(&raw);
                Evaluation::unparsable()
            }
        })
    }

    /// One completion call with usage tracking
    async fn complete_with(
        &mut self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> Result<String> {
        let request = CompletionRequest::new(vec![
            ChatMessage::system(system),
            ChatMessage::user(user),
        ])
        .with_temperature(temperature);

        let response = self
            .provider
            .complete(request)
            .await
            .map_err(|e| Error::from(e).with_operation("agent::complete"))?;

        self.usage.track(&response.model, &response.usage);

        let content = response
            .content
            .ok_or_else(|| error::empty_completion().with_operation("agent::complete"))?;
        self.console.response_chars(content.len());
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codesmith_core::{
        CompletionResponse, ErrorKind, FinishReason, ProviderError, StreamReceiver, Usage,
    };
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// A provider that plays back a fixed script of responses and records
    /// every request it receives.
    struct MockProvider {
        responses: Mutex<VecDeque<String>>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl MockProvider {
        fn new(responses: &[&str]) -> Self {
            Self {
                responses: Mutex::new(responses.iter().map(|s| s.to_string()).collect()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl LlmProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        fn models(&self) -> Vec<String> {
            vec!["mock".into()]
        }

        fn default_model(&self) -> &str {
            "mock"
        }

        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> std::result::Result<CompletionResponse, ProviderError> {
            self.requests.lock().unwrap().push(request);
            let content = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| ProviderError::Other("mock script exhausted".into()))?;

            Ok(CompletionResponse {
                id: "mock".into(),
                model: "mock".into(),
                content: Some(content),
                finish_reason: FinishReason::Stop,
                usage: Usage {
                    prompt_tokens: 10,
                    completion_tokens: 5,
                    total_tokens: 15,
                },
            })
        }

        async fn stream(
            &self,
            _request: CompletionRequest,
        ) -> std::result::Result<StreamReceiver, ProviderError> {
            Err(ProviderError::Other("mock does not stream".into()))
        }
    }

    fn test_config() -> AgentConfig {
        AgentConfig {
            verbose: false,
            pause_between_attempts: Duration::from_millis(0),
            executor: ExecutorConfig {
                interpreter: "sh".to_string(),
                suffix: ".sh".to_string(),
                timeout_secs: 10,
            },
            ..Default::default()
        }
    }

    const ACCEPT: &str = r#"{"success": true, "feedback": {"technical_analysis": "Correct."}}"#;
    const REJECT: &str = r#"{"success": false, "feedback": {"technical_analysis": "needs edge cases", "failure_points": ["empty input untested"]}}"#;

    #[tokio::test]
    async fn test_single_attempt_success() {
        let provider = MockProvider::new(&["Plan: just echo.", "echo OK", ACCEPT]);
        let mut agent = Agent::with_config(provider, test_config());

        let outcome = agent.run("print OK").await.unwrap();
        let solution = match outcome {
            RunOutcome::Solved(s) => s,
            other => panic!("expected solved, got {:?}", other),
        };
        assert_eq!(solution.attempt, 1);
        assert_eq!(solution.code, "echo OK");
        assert!(solution.evaluation.success);

        // reasoning + generation + evaluation, nothing more
        assert_eq!(agent.provider().requests().len(), 3);
        assert_eq!(agent.usage().total_calls, 3);
    }

    #[tokio::test]
    async fn test_evaluation_prompt_embeds_candidate_and_result() {
        let provider = MockProvider::new(&["Plan.", "echo OK", ACCEPT]);
        let mut agent = Agent::with_config(provider, test_config());
        agent.run("print OK").await.unwrap();

        let requests = agent.provider().requests();
        let eval_request = &requests[2];
        let user = &eval_request.messages[1].content;
        assert!(user.contains("echo OK"), "candidate missing: {}", user);
        assert!(user.contains("OK\n"), "captured stdout missing: {}", user);
        assert!(user.contains("exit code: 0"));
    }

    #[tokio::test]
    async fn test_rejected_attempt_threads_feedback() {
        let provider = MockProvider::new(&[
            "Plan one.",
            "echo OK",
            REJECT,
            "Plan two.",
            "echo OK",
            ACCEPT,
        ]);
        let mut agent = Agent::with_config(provider, test_config());

        let outcome = agent.run("print OK").await.unwrap();
        let solution = match outcome {
            RunOutcome::Solved(s) => s,
            other => panic!("expected solved, got {:?}", other),
        };
        assert_eq!(solution.attempt, 2);

        // The second reasoning prompt carries the first verdict's feedback
        let requests = agent.provider().requests();
        let second_reasoning = &requests[3].messages[1].content;
        assert!(second_reasoning.contains("Previous attempt failed"));
        assert!(second_reasoning.contains("needs edge cases"));
        assert!(second_reasoning.contains("empty input untested"));
    }

    #[tokio::test]
    async fn test_execution_failure_skips_evaluation() {
        let provider = MockProvider::new(&[
            "Plan one.",
            "echo broken >&2\nexit 7",
            "Plan two.",
            "echo OK",
            ACCEPT,
        ]);
        let mut agent = Agent::with_config(provider, test_config());

        let outcome = agent.run("print OK").await.unwrap();
        assert!(matches!(outcome, RunOutcome::Solved(ref s) if s.attempt == 2));

        // Five calls: the crashed candidate never reached the evaluator
        assert_eq!(agent.provider().requests().len(), 5);
    }

    #[tokio::test]
    async fn test_exhausts_attempt_budget() {
        let provider = MockProvider::new(&[
            "Plan.", "echo OK", REJECT, "Plan.", "echo OK", REJECT, "Plan.", "echo OK", REJECT,
        ]);
        let mut agent = Agent::with_config(provider, test_config());

        let outcome = agent.run("print OK").await.unwrap();
        assert!(matches!(outcome, RunOutcome::Exhausted { attempts: 3 }));
    }

    #[tokio::test]
    async fn test_unparsable_verdict_counts_as_rejection() {
        let provider = MockProvider::new(&[
            "Plan.",
            "echo OK",
            "Looks good to me!",
            "Plan.",
            "echo OK",
            ACCEPT,
        ]);
        let mut agent = Agent::with_config(provider, test_config());

        let outcome = agent.run("print OK").await.unwrap();
        assert!(matches!(outcome, RunOutcome::Solved(ref s) if s.attempt == 2));
    }

    #[tokio::test]
    async fn test_empty_task_is_rejected() {
        let provider = MockProvider::new(&[]);
        let mut agent = Agent::with_config(provider, test_config());

        let err = agent.run("   ").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TaskEmpty);
        assert!(agent.provider().requests().is_empty());
    }
}
