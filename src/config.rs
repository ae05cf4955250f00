//! Completion run configuration and resource budgeting

use std::time::{Duration, Instant};
use thiserror::Error;

/// Configuration for a completion run
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// Maximum number of budget steps (rewrite and unification attempts);
    /// 0 means no limit
    pub max_steps: usize,
    /// Wall-clock bound for the whole run
    pub timeout: Duration,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        CompletionConfig {
            max_steps: 0, // 0 means no limit
            timeout: Duration::from_secs(60),
        }
    }
}

/// The resource budget ran out; the run's state is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BudgetExhausted {
    #[error("step budget exhausted")]
    Steps,
    #[error("time budget exhausted")]
    Time,
}

/// How many budget charges pass between deadline polls. Reading the clock on
/// every charge would dominate the actual work.
const DEADLINE_POLL_INTERVAL: u32 = 1024;

/// A step counter plus a wall-clock deadline, threaded through the
/// completion loop. Every rewrite attempt and unification attempt charges
/// one step; the deadline is polled periodically from the same path.
#[derive(Debug)]
pub(crate) struct Budget {
    steps_remaining: Option<usize>,
    deadline: Option<Instant>,
    charges: u32,
}

impl Budget {
    /// A budget that never runs out (for the unbounded public entry points)
    pub(crate) fn unlimited() -> Self {
        Budget {
            steps_remaining: None,
            deadline: None,
            charges: 0,
        }
    }

    pub(crate) fn new(config: &CompletionConfig) -> Self {
        Budget {
            steps_remaining: if config.max_steps == 0 {
                None
            } else {
                Some(config.max_steps)
            },
            deadline: Some(Instant::now() + config.timeout),
            charges: 0,
        }
    }

    /// Spend one step; fails once the counter or the clock runs out
    pub(crate) fn charge(&mut self) -> Result<(), BudgetExhausted> {
        if let Some(remaining) = self.steps_remaining.as_mut() {
            if *remaining == 0 {
                return Err(BudgetExhausted::Steps);
            }
            *remaining -= 1;
        }
        if let Some(deadline) = self.deadline {
            if self.charges % DEADLINE_POLL_INTERVAL == 0 && Instant::now() >= deadline {
                return Err(BudgetExhausted::Time);
            }
        }
        self.charges = self.charges.wrapping_add(1);
        Ok(())
    }
}
