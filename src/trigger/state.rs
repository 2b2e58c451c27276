// src/trigger/state.rs

//! Pure refresh state machine.
//!
//! Consumes settings-change notifications and timer ticks, and produces
//! commands for the async driver in [`driver`](crate::trigger::driver).
//! No channels, timers, or IO here, so the transition table can be unit
//! tested on its own.

use std::time::Duration;

use crate::config::{ScriptSettings, SettingsChange};

/// Auto-refresh scheduling state for one consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    /// No schedule decision applied yet.
    Idle,
    /// Periodic ticks at the given interval.
    Scheduled(Duration),
    /// Auto refresh switched off.
    Disabled,
}

/// Events fed into the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    Changed(SettingsChange),
    Tick,
}

/// Commands for the async driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerCommand {
    /// (Re)start the periodic ticker at this interval.
    RestartTicker(Duration),
    /// Stop the periodic ticker.
    StopTicker,
    /// Attempt one execution, subject to the execution gate.
    RunScript,
}

/// The settings fields the state machine looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleView {
    pub auto_refresh_enabled: bool,
    pub interval: Duration,
}

impl From<&ScriptSettings> for ScheduleView {
    fn from(settings: &ScriptSettings) -> Self {
        Self {
            auto_refresh_enabled: settings.auto_refresh_enabled,
            interval: settings.refresh_interval(),
        }
    }
}

#[derive(Debug)]
pub struct TriggerStateMachine {
    state: RefreshState,
}

impl TriggerStateMachine {
    pub fn new() -> Self {
        Self {
            state: RefreshState::Idle,
        }
    }

    pub fn state(&self) -> RefreshState {
        self.state
    }

    /// Apply the current schedule settings, e.g. at driver startup.
    pub fn apply_schedule(&mut self, view: ScheduleView) -> Vec<TriggerCommand> {
        if view.auto_refresh_enabled {
            self.state = RefreshState::Scheduled(view.interval);
            vec![TriggerCommand::RestartTicker(view.interval)]
        } else {
            self.state = RefreshState::Disabled;
            vec![TriggerCommand::StopTicker]
        }
    }

    /// Advance on one event.
    ///
    /// Every event yields exactly one `RunScript` attempt; schedule-shaped
    /// events additionally reconfigure the ticker.
    pub fn step(&mut self, event: TriggerEvent, view: ScheduleView) -> Vec<TriggerCommand> {
        match event {
            TriggerEvent::Tick
            | TriggerEvent::Changed(SettingsChange::ScriptChanged)
            | TriggerEvent::Changed(SettingsChange::InterpreterChanged) => {
                vec![TriggerCommand::RunScript]
            }
            TriggerEvent::Changed(SettingsChange::AutoRefreshToggled)
            | TriggerEvent::Changed(SettingsChange::IntervalChanged) => {
                let mut commands = self.apply_schedule(view);
                commands.push(TriggerCommand::RunScript);
                commands
            }
        }
    }
}

impl Default for TriggerStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
