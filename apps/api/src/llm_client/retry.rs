//! Backoff state machine for a generation chain.
//!
//! A chain is the initial request plus every retry for one trigger. The
//! state is an immutable `Attempt` value threaded through the dispatch
//! loop; `advance` is the only transition and is pure, so the
//! Pending → Retrying → Succeeded | Failed machine is testable without a
//! transport.

use std::time::Duration;

/// Retry knobs for one chain: 3 retries starting at 1s by default,
/// doubling the delay before each subsequent attempt.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn first_attempt(&self) -> Attempt {
        Attempt {
            retries_remaining: self.max_retries,
            delay: self.initial_delay,
        }
    }
}

/// Chain state carried between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    pub retries_remaining: u32,
    /// Delay to sleep before the next call, if one is warranted.
    pub delay: Duration,
}

/// Classification of a finished call, as seen by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Succeeded,
    /// Rate limited or transport-level failure.
    Retryable,
    /// Any other failure; the chain must not continue.
    Terminal,
}

/// Next step for the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Chain is done; hand the response up.
    Succeeded,
    /// Non-retryable failure, or the backoff budget is consumed.
    Failed,
    /// Sleep `wait`, then call again carrying `next`.
    RetryAfter { wait: Duration, next: Attempt },
}

pub fn advance(attempt: Attempt, outcome: AttemptOutcome) -> Transition {
    match outcome {
        AttemptOutcome::Succeeded => Transition::Succeeded,
        AttemptOutcome::Terminal => Transition::Failed,
        AttemptOutcome::Retryable if attempt.retries_remaining == 0 => Transition::Failed,
        AttemptOutcome::Retryable => Transition::RetryAfter {
            wait: attempt.delay,
            next: Attempt {
                retries_remaining: attempt.retries_remaining - 1,
                delay: attempt.delay * 2,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_starts_at_one_second() {
        let first = RetryPolicy::default().first_attempt();
        assert_eq!(first.retries_remaining, 3);
        assert_eq!(first.delay, Duration::from_millis(1000));
    }

    #[test]
    fn test_retryable_failures_double_delay_until_exhausted() {
        let mut attempt = RetryPolicy::default().first_attempt();
        let mut waits = Vec::new();
        loop {
            match advance(attempt, AttemptOutcome::Retryable) {
                Transition::RetryAfter { wait, next } => {
                    waits.push(wait);
                    attempt = next;
                }
                Transition::Failed => break,
                Transition::Succeeded => unreachable!("retryable outcome cannot succeed"),
            }
        }
        assert_eq!(
            waits,
            [
                Duration::from_millis(1000),
                Duration::from_millis(2000),
                Duration::from_millis(4000),
            ]
        );
    }

    #[test]
    fn test_terminal_outcome_fails_with_budget_left() {
        let attempt = RetryPolicy::default().first_attempt();
        assert_eq!(advance(attempt, AttemptOutcome::Terminal), Transition::Failed);
    }

    #[test]
    fn test_success_ends_chain() {
        let attempt = Attempt {
            retries_remaining: 0,
            delay: Duration::from_millis(4000),
        };
        assert_eq!(advance(attempt, AttemptOutcome::Succeeded), Transition::Succeeded);
    }
}
