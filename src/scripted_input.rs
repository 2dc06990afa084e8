//! Scripted input playback for headless runs.
//!
//! A script is a JSON list of timed steps. Movement and look values hold for
//! the step's duration; `interact`/`alternate` fire as edges on the first
//! tick of the step only, matching the press-not-held semantics of the
//! player controller.

use crate::input::ActionState;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize)]
struct ScriptedInputFile {
    steps: Vec<ScriptedStep>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct ScriptedStep {
    duration: f32,
    #[serde(default)]
    move_x: f32,
    #[serde(default)]
    move_z: f32,
    #[serde(default)]
    look_x: f32,
    #[serde(default)]
    look_y: f32,
    #[serde(default)]
    interact: bool,
    #[serde(default)]
    alternate: bool,
}

impl ScriptedStep {
    fn to_action(&self, entering: bool) -> ActionState {
        ActionState {
            move_x: self.move_x,
            move_z: self.move_z,
            look_x: self.look_x,
            look_y: self.look_y,
            interact_pressed: entering && self.interact,
            alternate_pressed: entering && self.alternate,
        }
    }
}

/// Replays a step script one tick at a time.
pub struct ScriptedInputPlayer {
    steps: Vec<ScriptedStep>,
    index: usize,
    time_in_step: f32,
    step_started: bool,
}

impl ScriptedInputPlayer {
    /// Load a script from a JSON file.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse a script from a JSON string.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let file: ScriptedInputFile = serde_json::from_str(json)?;
        if file.steps.is_empty() {
            anyhow::bail!("scripted input file contains no steps");
        }
        Ok(Self {
            steps: file.steps,
            index: 0,
            time_in_step: 0.0,
            step_started: false,
        })
    }

    /// Whether the script has run out of steps.
    pub fn finished(&self) -> bool {
        self.index >= self.steps.len()
    }

    /// Produce the action state for the next tick of length `dt`.
    pub fn advance(&mut self, dt: f32) -> ActionState {
        if self.finished() {
            return ActionState::idle();
        }

        let entering = !self.step_started;
        self.step_started = true;
        let action = self.steps[self.index].to_action(entering);

        self.time_in_step += dt;
        while self.index < self.steps.len() && self.time_in_step >= self.steps[self.index].duration
        {
            self.time_in_step -= self.steps[self.index].duration;
            self.index += 1;
            self.step_started = false;
        }

        action
    }
}
