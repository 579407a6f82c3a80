use std::collections::HashMap;
use tracing::trace;
use uuid::Uuid;

use super::telemetry::command::TrackedCommand;
use crate::config::TelemetryConfig;

pub const MAX_TRACKED_COMMANDS: usize = 200;
pub const MAX_TRACKED_PER_COMMAND: usize = 25;

/// Ordered, capped log of tracked commands.
#[derive(Debug, Default, Clone)]
pub struct CommandLog {
    commands: Vec<TrackedCommand>,
    per_command: HashMap<String, usize>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends unless either cap is reached. Both checks and the push happen
    /// under the same `&mut` borrow.
    pub fn try_append(&mut self, command: TrackedCommand) -> bool {
        if self.commands.len() >= MAX_TRACKED_COMMANDS {
            trace!("Tracked command log full, dropping {}", command.name);
            return false;
        }

        let count = self.per_command.entry(command.name.clone()).or_insert(0);
        if *count >= MAX_TRACKED_PER_COMMAND {
            trace!("Per-command limit reached, dropping {}", command.name);
            return false;
        }

        *count += 1;
        self.commands.push(command);
        true
    }

    pub fn commands(&self) -> &[TrackedCommand] {
        &self.commands
    }

    pub fn count_for(&self, name: &str) -> usize {
        self.per_command.get(name).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.per_command.clear();
    }
}

/// Per-session state read and written by instrumented commands.
#[derive(Debug, Clone)]
pub struct ScriptRunContext {
    pub session_id: Uuid,
    pub gather_usage_stats: bool,
    pub fragment_ids_this_run: Vec<String>,
    // Set while a tracked command runs so its inner calls stay untracked.
    pub(crate) command_tracking_deactivated: bool,
    tracked_commands: CommandLog,
    default_gather_usage_stats: bool,
}

impl ScriptRunContext {
    pub fn new(gather_usage_stats: bool) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            gather_usage_stats,
            fragment_ids_this_run: Vec::new(),
            command_tracking_deactivated: false,
            tracked_commands: CommandLog::new(),
            default_gather_usage_stats: gather_usage_stats,
        }
    }

    pub fn from_config(config: &TelemetryConfig) -> Self {
        Self::new(config.gather_usage_stats)
    }

    /// Clears the log and restores the defaults this context was created with.
    pub fn reset(&mut self) {
        self.tracked_commands.clear();
        self.gather_usage_stats = self.default_gather_usage_stats;
        self.fragment_ids_this_run.clear();
        self.command_tracking_deactivated = false;
    }

    pub fn track(&mut self, command: TrackedCommand) -> bool {
        self.tracked_commands.try_append(command)
    }

    pub fn tracked_commands(&self) -> &[TrackedCommand] {
        self.tracked_commands.commands()
    }

    pub fn command_log(&self) -> &CommandLog {
        &self.tracked_commands
    }

    pub fn is_fragment_run(&self) -> bool {
        !self.fragment_ids_this_run.is_empty()
    }

    pub fn is_tracking_suppressed(&self) -> bool {
        self.command_tracking_deactivated
    }
}

impl Default for ScriptRunContext {
    fn default() -> Self {
        Self::from_config(&TelemetryConfig::default())
    }
}
