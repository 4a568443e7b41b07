//! Background runner that owns a joystick inside a tokio task
//!
//! Hosts with an async event loop hand their input to the runner through a
//! command channel instead of calling [`Joystick::handle_input`] directly. The
//! runner also generates the frame heartbeat that polling plugins rely on.
//!
//! # State Machine
//!
//! ```text
//! Idle ──► Running ──► Stopped
//!  (start)    (shutdown signal or closed channel)
//! ```

use crate::config::RunnerSettings;
use crate::geometry::Layout;
use crate::joystick::{InputEvent, Joystick, JoystickError};
use chrono::{DateTime, Local};
use statum::{machine, state};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

/// Work sent to a running joystick
#[derive(Debug, Clone, PartialEq)]
pub enum JoystickCommand {
    Input(InputEvent),
    /// The host measured (or re-measured) base and handle
    Layout(Layout),
}

/// Counters reported when the runner stops
#[derive(Debug, Clone, Default)]
pub struct RunnerStats {
    pub started_at: Option<DateTime<Local>>,
    pub stopped_at: Option<DateTime<Local>>,
    pub commands: u64,
    pub frames: u64,
    /// Move events handed to the callback over the runner's lifetime
    pub emitted: u64,
}

impl RunnerStats {
    pub fn uptime_ms(&self) -> Option<i64> {
        match (self.started_at, self.stopped_at) {
            (Some(start), Some(stop)) => Some((stop - start).num_milliseconds()),
            _ => None,
        }
    }
}

#[state]
#[derive(Debug, Clone)]
pub enum RunnerState {
    Idle,
    Running,
    Stopped,
}

#[machine]
pub struct JoystickRunner<S: RunnerState> {
    joystick: Joystick,
    commands: mpsc::Receiver<JoystickCommand>,
    settings: RunnerSettings,
    stats: RunnerStats,
}

impl<S: RunnerState> JoystickRunner<S> {
    pub fn joystick(&self) -> &Joystick {
        &self.joystick
    }

    pub fn stats(&self) -> &RunnerStats {
        &self.stats
    }

    fn apply(&mut self, command: JoystickCommand) {
        self.stats.commands += 1;
        match command {
            JoystickCommand::Input(event) => self.joystick.handle_input(&event),
            JoystickCommand::Layout(layout) => self.joystick.set_layout(layout),
        }
    }
}

impl JoystickRunner<Idle> {
    pub fn create(
        joystick: Joystick,
        commands: mpsc::Receiver<JoystickCommand>,
        settings: RunnerSettings,
    ) -> Self {
        debug!("Creating joystick runner with settings: {:?}", settings);
        Self::new(joystick, commands, settings, RunnerStats::default())
    }

    /// Starts the joystick and its plugins.
    pub fn start(mut self) -> JoystickRunner<Running> {
        info!(
            "Starting joystick runner with {} plugins",
            self.joystick.plugin_count()
        );
        self.joystick.start();
        self.stats.started_at = Some(Local::now());
        self.transition()
    }
}

impl JoystickRunner<Running> {
    /// Applies commands and ticks frames until `shutdown_rx` fires or every
    /// sender is dropped. Commands still queued at that point are applied
    /// before returning.
    pub async fn run_until_shutdown(
        mut self,
        mut shutdown_rx: oneshot::Receiver<()>,
    ) -> JoystickRunner<Stopped> {
        let mut frames =
            tokio::time::interval(Duration::from_millis(self.settings.frame_interval_ms));
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = &mut shutdown_rx => {
                    info!("Shutdown signal received for joystick runner");
                    break;
                }

                command = self.commands.recv() => {
                    match command {
                        Some(command) => self.apply(command),
                        None => {
                            info!("All command senders dropped, stopping joystick runner");
                            break;
                        }
                    }
                }

                _ = frames.tick() => {
                    self.stats.frames += 1;
                    self.joystick.handle_input(&InputEvent::Frame);
                }
            }
        }

        let mut drained = 0;
        while let Ok(command) = self.commands.try_recv() {
            self.apply(command);
            drained += 1;
        }
        if drained > 0 {
            debug!("Applied {} pending commands before stopping", drained);
        }

        self.transition()
    }
}

impl JoystickRunner<Stopped> {
    /// Stops the joystick and returns it with the final counters.
    pub fn finish(mut self) -> (Joystick, RunnerStats) {
        self.joystick.stop();
        self.stats.stopped_at = Some(Local::now());
        self.stats.emitted = self.joystick.emitted_events();

        info!(
            "Joystick runner stopped after {}ms: {} commands, {} frames, {} move events",
            self.stats.uptime_ms().unwrap_or_default(),
            self.stats.commands,
            self.stats.frames,
            self.stats.emitted
        );
        (self.joystick, self.stats)
    }
}

/// Handle to a joystick running in a tokio task
pub struct JoystickHandle {
    sender: mpsc::Sender<JoystickCommand>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task_handle: Option<JoinHandle<(Joystick, RunnerStats)>>,
}

impl JoystickHandle {
    /// Moves `joystick` into a new task and starts it. Must be called from
    /// within a tokio runtime.
    pub fn spawn(joystick: Joystick, settings: RunnerSettings) -> Result<Self, JoystickError> {
        if settings.frame_interval_ms == 0 || settings.command_buffer == 0 {
            return Err(JoystickError::Runner(format!(
                "Invalid runner settings: {:?}",
                settings
            )));
        }

        let (sender, receiver) = mpsc::channel(settings.command_buffer);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let runner = JoystickRunner::create(joystick, receiver, settings).start();
        let task_handle = tokio::spawn(async move {
            let stopped = runner.run_until_shutdown(shutdown_rx).await;
            stopped.finish()
        });

        info!("Joystick runner spawned");
        Ok(Self {
            sender,
            shutdown_tx: Some(shutdown_tx),
            task_handle: Some(task_handle),
        })
    }

    pub fn sender(&self) -> mpsc::Sender<JoystickCommand> {
        self.sender.clone()
    }

    pub async fn send(&self, command: JoystickCommand) -> Result<(), JoystickError> {
        self.sender.send(command).await.map_err(|e| {
            error!("Failed to send joystick command: {}", e);
            JoystickError::Channel(format!("Failed to send joystick command: {}", e))
        })
    }

    pub async fn input(&self, event: InputEvent) -> Result<(), JoystickError> {
        self.send(JoystickCommand::Input(event)).await
    }

    /// Signals the task to stop and waits for it, handing back the joystick.
    pub async fn shutdown(&mut self) -> Result<(Joystick, RunnerStats), JoystickError> {
        debug!("Sending shutdown signal to joystick runner");
        if let Some(tx) = self.shutdown_tx.take() {
            if tx.send(()).is_err() {
                warn!("Joystick runner already terminated");
            }
        }

        match self.task_handle.take() {
            Some(handle) => handle.await.map_err(|e| {
                error!("Joystick runner task panicked: {}", e);
                JoystickError::Runner(format!("Joystick runner task panicked: {}", e))
            }),
            None => Err(JoystickError::Runner(
                "Joystick runner already shut down".to_string(),
            )),
        }
    }
}
