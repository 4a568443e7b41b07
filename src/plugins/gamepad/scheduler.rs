//! Cancellable poll scheduling for the gamepad plugin

use serde::{Deserialize, Serialize};

/// How often the gamepad is read
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PollingModel {
    /// On every frame tick
    #[default]
    Frame,
    /// At most once per interval, in milliseconds
    Interval(u64),
}

/// Decides on each frame tick whether a poll is due
///
/// A stopped scheduler never reports a poll as due; it has to be started
/// again explicitly, e.g. when the gamepad reconnects.
#[derive(Debug, Clone)]
pub struct PollScheduler {
    model: PollingModel,
    running: bool,
    last_poll_ms: Option<i64>,
}

impl PollScheduler {
    pub fn new(model: PollingModel) -> Self {
        Self {
            model,
            running: false,
            last_poll_ms: None,
        }
    }

    pub fn model(&self) -> PollingModel {
        self.model
    }

    pub fn start(&mut self) {
        self.running = true;
        self.last_poll_ms = None;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns true and records the poll if one is due at `now_ms`.
    pub fn due(&mut self, now_ms: i64) -> bool {
        if !self.running {
            return false;
        }

        let due = match (self.model, self.last_poll_ms) {
            (PollingModel::Frame, _) => true,
            (PollingModel::Interval(_), None) => true,
            (PollingModel::Interval(interval), Some(last)) => {
                now_ms.saturating_sub(last) >= interval as i64
            }
        };
        if due {
            self.last_poll_ms = Some(now_ms);
        }
        due
    }
}
