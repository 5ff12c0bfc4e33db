//! Newsletter signup form feedback.
//!
//! Submitting shows a busy button, waits on the subscriber, then shows
//! success for a few seconds before restoring the original label. There is
//! no real endpoint behind the site's form; [`SimulatedSubscriber`] stands in
//! for one.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
#[error("Subscription failed: {0}")]
pub struct SubscribeError(pub String);

/// Backend that accepts an email address.
#[async_trait]
pub trait Subscriber: Send + Sync {
    async fn subscribe(&self, email: &str) -> Result<(), SubscribeError>;
}

/// Accepts every address after a fixed delay.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedSubscriber {
    pub delay: Duration,
}

impl Default for SimulatedSubscriber {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(1),
        }
    }
}

#[async_trait]
impl Subscriber for SimulatedSubscriber {
    async fn subscribe(&self, _email: &str) -> Result<(), SubscribeError> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// How long feedback stays on screen.
#[derive(Debug, Clone, Copy)]
pub struct NewsletterTiming {
    pub reset_after: Duration,
}

impl Default for NewsletterTiming {
    fn default() -> Self {
        Self {
            reset_after: Duration::from_secs(3),
        }
    }
}

/// Rendered state of the submit button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub label: String,
    pub disabled: bool,
    /// Whether the success accent background is applied.
    pub accent: bool,
}

/// The signup form: email input plus submit button.
#[derive(Debug, Clone)]
pub struct NewsletterForm {
    pub email: String,
    button: ButtonState,
    original_label: String,
    timing: NewsletterTiming,
}

impl NewsletterForm {
    pub fn new(button_label: impl Into<String>) -> Self {
        let label = button_label.into();
        Self {
            email: String::new(),
            button: ButtonState {
                label: label.clone(),
                disabled: false,
                accent: false,
            },
            original_label: label,
            timing: NewsletterTiming::default(),
        }
    }

    pub fn with_timing(mut self, timing: NewsletterTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn button(&self) -> &ButtonState {
        &self.button
    }

    /// Put the button in its busy state and return the address to submit.
    pub fn begin_submit(&mut self) -> String {
        self.button.label = "Subscribing...".to_string();
        self.button.disabled = true;
        self.email.clone()
    }

    /// Apply the subscriber's answer.
    pub fn finish_submit(&mut self, result: Result<(), SubscribeError>) {
        match result {
            Ok(()) => {
                self.button.label = "Subscribed!".to_string();
                self.button.accent = true;
                self.email.clear();
            }
            Err(e) => {
                error!("Newsletter subscription failed: {}", e);
                self.button.label = "Try Again".to_string();
                self.button.disabled = false;
            }
        }
    }

    /// Restore the button after a successful submission.
    pub fn reset(&mut self) {
        self.button = ButtonState {
            label: self.original_label.clone(),
            disabled: false,
            accent: false,
        };
    }

    /// Run a whole submission, including the delayed reset after success.
    /// Returns whether the subscription went through.
    pub async fn submit(&mut self, subscriber: &dyn Subscriber) -> bool {
        let email = self.begin_submit();
        let result = subscriber.subscribe(&email).await;
        let ok = result.is_ok();
        self.finish_submit(result);

        if ok {
            tokio::time::sleep(self.timing.reset_after).await;
            self.reset();
        }
        ok
    }
}
