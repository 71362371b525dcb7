use std::collections::VecDeque;
use std::sync::{LazyLock, Mutex};
use std::time::Duration;

use regex::Regex;

use crate::application::ports::{LlmClient, LlmClientError};

static REQUESTED_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Please generate (\d+)").unwrap());

/// Offline stand-in for the generation service.
///
/// Without scripted responses it answers every prompt with well-formed items
/// in the layout the prompt asks for, as many as requested.
#[derive(Default)]
pub struct MockLlmClient {
    delay: Duration,
    scripted: Mutex<VecDeque<Result<String, LlmClientError>>>,
    prompts: Mutex<Vec<String>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    /// Responses returned in order before falling back to canned output.
    pub fn scripted(responses: Vec<Result<String, LlmClientError>>) -> Self {
        Self {
            scripted: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn canned(prompt: &str) -> String {
        let count = REQUESTED_COUNT
            .captures(prompt)
            .and_then(|c| c[1].parse::<usize>().ok())
            .unwrap_or(1);

        let is_mcq = prompt.contains("multiple-choice");
        (1..=count)
            .map(|i| {
                if is_mcq {
                    format!(
                        "## MCQ\nQuestion: Sample question {i}?\nA) First\nB) Second\nC) Third\nD) Fourth\nCorrect Answer: A"
                    )
                } else {
                    format!("## Note {i}\nSample note {i} summarising the text.")
                }
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmClientError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let next = self.scripted.lock().ok().and_then(|mut s| s.pop_front());
        match next {
            Some(response) => response,
            None => Ok(Self::canned(prompt)),
        }
    }
}
