//! # codesmith-agent
//!
//! The agent drives the generate <-> execute <-> evaluate loop:
//! 1. User provides a task description
//! 2. LLM reasons about an approach, then generates candidate code
//! 3. The executor runs the candidate and captures stdout/stderr/exit status
//! 4. LLM critiques the candidate against its captured output
//! 5. Iterate with the feedback until a candidate is accepted or the
//!    attempt budget runs out

mod agent;
mod output;

pub use agent::{Agent, AgentConfig, RunOutcome, Solution};
pub use output::Console;
