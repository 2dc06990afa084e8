//! Per-tick input snapshot fed to the player controller.

/// Everything the player controller reads in one tick.
///
/// Movement and look values are held per tick; `interact_pressed` and
/// `alternate_pressed` are edges (press, not held).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActionState {
    /// Strafe input, +1 right / -1 left.
    pub move_x: f32,
    /// Walk input, +1 forward / -1 back.
    pub move_z: f32,
    /// Horizontal look delta for this tick.
    pub look_x: f32,
    /// Vertical look delta for this tick.
    pub look_y: f32,
    /// Interact key pressed this tick.
    pub interact_pressed: bool,
    /// Alternate-interact key pressed this tick.
    pub alternate_pressed: bool,
}

impl ActionState {
    /// Snapshot with no input at all.
    pub fn idle() -> Self {
        Self::default()
    }
}
