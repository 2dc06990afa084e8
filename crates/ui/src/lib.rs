#![warn(missing_docs)]
//! HUD state (crosshair and interaction prompt).
//!
//! Rendering is out of scope; this crate only tracks what would be on
//! screen so the interaction core can toggle it and tests can observe it.

/// Crosshair + prompt state.
///
/// The crosshair and the prompt are mutually exclusive: focusing an
/// interactable swaps the crosshair for a prompt line, losing focus swaps
/// back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    crosshair_visible: bool,
    prompt: Option<String>,
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

impl Hud {
    /// Create a HUD showing only the crosshair.
    pub fn new() -> Self {
        Self {
            crosshair_visible: true,
            prompt: None,
        }
    }

    /// Show an interaction prompt, hiding the crosshair.
    pub fn show_prompt(&mut self, text: impl Into<String>) {
        self.crosshair_visible = false;
        self.prompt = Some(text.into());
    }

    /// Clear the prompt and restore the crosshair.
    pub fn clear_prompt(&mut self) {
        self.crosshair_visible = true;
        self.prompt = None;
    }

    /// Whether the crosshair is currently shown.
    pub fn crosshair_visible(&self) -> bool {
        self.crosshair_visible
    }

    /// Current prompt text, if any.
    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_crosshair() {
        let hud = Hud::new();
        assert!(hud.crosshair_visible());
        assert!(hud.prompt().is_none());
    }

    #[test]
    fn prompt_swaps_crosshair() {
        let mut hud = Hud::new();
        hud.show_prompt("Open the door [E]");
        assert!(!hud.crosshair_visible());
        assert_eq!(hud.prompt(), Some("Open the door [E]"));

        hud.clear_prompt();
        assert!(hud.crosshair_visible());
        assert!(hud.prompt().is_none());
    }

    #[test]
    fn latest_prompt_wins() {
        let mut hud = Hud::new();
        hud.show_prompt("Open the door [E]");
        hud.show_prompt("Pick up the key [E]");
        assert_eq!(hud.prompt(), Some("Pick up the key [E]"));
    }
}
