use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::application::ports::{CaptureError, CaptureRequest, Renderer, Screenshot};
use crate::domain::JobUrl;

use super::encoding::{blank_png, encode_screenshot};

/// What the fake renderer does for one call.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    Succeed,
    Fail(CaptureError),
    Panic,
    Hang,
}

/// Deterministic renderer for scaffold runs and tests. Outcomes can be scripted per URL;
/// once a script runs out the default outcome applies.
pub struct MockRenderer {
    delay: Duration,
    default_outcome: MockOutcome,
    scripts: Mutex<HashMap<String, VecDeque<MockOutcome>>>,
    calls: Mutex<Vec<String>>,
}

impl MockRenderer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            default_outcome: MockOutcome::Succeed,
            scripts: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_default(mut self, outcome: MockOutcome) -> Self {
        self.default_outcome = outcome;
        self
    }

    pub fn script(self, url: &str, outcomes: impl IntoIterator<Item = MockOutcome>) -> Self {
        self.scripts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(normalize(url))
            .or_default()
            .extend(outcomes);
        self
    }

    /// URLs in the order they were captured.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self, url: &str) -> usize {
        let key = normalize(url);
        self.calls().iter().filter(|call| **call == key).count()
    }

    fn next_outcome(&self, url: &str) -> MockOutcome {
        self.scripts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(url)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| self.default_outcome.clone())
    }
}

#[async_trait::async_trait]
impl Renderer for MockRenderer {
    async fn capture(&self, request: &CaptureRequest) -> Result<Screenshot, CaptureError> {
        let url = request.url.as_str().to_string();
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.clone());
        let outcome = self.next_outcome(&url);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match outcome {
            MockOutcome::Succeed => {
                let png = blank_png(request.viewport.width, request.viewport.height)?;
                encode_screenshot(&png, request.format)
            }
            MockOutcome::Fail(error) => Err(error),
            MockOutcome::Panic => panic!("mock renderer crashed on {url}"),
            MockOutcome::Hang => std::future::pending().await,
        }
    }
}

fn normalize(url: &str) -> String {
    JobUrl::parse(url)
        .map(|parsed| parsed.as_str().to_string())
        .unwrap_or_else(|_| url.to_string())
}
