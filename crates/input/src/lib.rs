//! Keyboard input reduced to the vehicle's control intents.
//!
//! Key-down sets a held control, key-up clears it. The light control toggles
//! on key-down instead of following the key, and ignores key-up and OS key
//! repeat.

use std::collections::HashSet;

/// Control intents read by the simulation each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub ascend: bool,
    pub descend: bool,
    /// Searchlight on/off. Starts on.
    pub light_on: bool,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            forward: false,
            backward: false,
            turn_left: false,
            turn_right: false,
            ascend: false,
            descend: false,
            light_on: true,
        }
    }
}

impl ControlState {
    /// No movement intents, light on.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Forward/backward thrust axis: +1, -1, or 0 when neither or both are held.
    pub fn thrust_axis(&self) -> f32 {
        axis(self.forward, self.backward)
    }

    /// Yaw axis: +1 turning left, -1 turning right.
    pub fn turn_axis(&self) -> f32 {
        axis(self.turn_left, self.turn_right)
    }

    /// Vertical axis: +1 ascending, -1 descending.
    pub fn vertical_axis(&self) -> f32 {
        axis(self.ascend, self.descend)
    }

    /// Whether the propulsion unit is being driven (forward or backward held).
    pub fn is_thrusting(&self) -> bool {
        self.forward || self.backward
    }

    fn set(&mut self, control: Control, held: bool) {
        match control {
            Control::Forward => self.forward = held,
            Control::Backward => self.backward = held,
            Control::TurnLeft => self.turn_left = held,
            Control::TurnRight => self.turn_right = held,
            Control::Ascend => self.ascend = held,
            Control::Descend => self.descend = held,
            Control::ToggleLight => {}
        }
    }
}

#[inline]
fn axis(positive: bool, negative: bool) -> f32 {
    (positive as i8 - negative as i8) as f32
}

/// A bindable control intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    Ascend,
    Descend,
    ToggleLight,
}

/// Key to control mapping.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<(KeyCode, Control)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            bindings: vec![
                (KeyCode::KeyW, Control::Forward),
                (KeyCode::KeyS, Control::Backward),
                (KeyCode::KeyA, Control::TurnLeft),
                (KeyCode::KeyD, Control::TurnRight),
                (KeyCode::ArrowUp, Control::Ascend),
                (KeyCode::ArrowDown, Control::Descend),
                (KeyCode::KeyF, Control::ToggleLight),
            ],
        }
    }
}

impl KeyBindings {
    /// Bind `key` to `control`, replacing any previous binding for that key.
    pub fn bind(&mut self, key: KeyCode, control: Control) {
        self.bindings.retain(|(k, _)| *k != key);
        self.bindings.push((key, control));
    }

    /// Look up the control bound to a key.
    pub fn control_for(&self, key: KeyCode) -> Option<Control> {
        self.bindings
            .iter()
            .find(|(k, _)| *k == key)
            .map(|&(_, control)| control)
    }
}

/// Turns key events into a [`ControlState`].
#[derive(Debug, Default)]
pub struct InputState {
    bindings: KeyBindings,
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    controls: ControlState,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Default::default()
        }
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        let Some(control) = self.bindings.control_for(key) else {
            return;
        };
        match state {
            ElementState::Pressed => {
                // A held key re-reports Pressed on OS key repeat; only the first edge counts.
                let first_press = self.keys_held.insert(key);
                if control == Control::ToggleLight {
                    if first_press {
                        self.controls.light_on = !self.controls.light_on;
                        log::debug!("searchlight {}", if self.controls.light_on { "on" } else { "off" });
                    }
                } else {
                    self.controls.set(control, true);
                }
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
                // Another held key bound to the same control keeps it active.
                let still_held = self
                    .keys_held
                    .iter()
                    .any(|&k| self.bindings.control_for(k) == Some(control));
                if !still_held {
                    self.controls.set(control, false);
                }
            }
        }
    }

    /// Release every held control (window lost focus). The light keeps its state.
    pub fn release_all(&mut self) {
        self.keys_held.clear();
        self.controls = ControlState {
            light_on: self.controls.light_on,
            ..ControlState::idle()
        };
    }

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Snapshot of the current control intents.
    pub fn controls(&self) -> ControlState {
        self.controls
    }
}

// Re-export for convenience
pub use winit::event::ElementState;
pub use winit::keyboard::KeyCode;

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut InputState, key: KeyCode) {
        input.process_keyboard(key, ElementState::Pressed);
    }

    fn release(input: &mut InputState, key: KeyCode) {
        input.process_keyboard(key, ElementState::Released);
    }

    #[test]
    fn held_controls_follow_key_state() {
        let mut input = InputState::new();
        press(&mut input, KeyCode::KeyW);
        press(&mut input, KeyCode::ArrowDown);
        let c = input.controls();
        assert!(c.forward && c.descend);
        assert!(!c.backward && !c.ascend);

        release(&mut input, KeyCode::KeyW);
        assert!(!input.controls().forward);
        assert!(input.controls().descend);
    }

    #[test]
    fn light_toggles_on_key_down_only() {
        let mut input = InputState::new();
        assert!(input.controls().light_on);

        press(&mut input, KeyCode::KeyF);
        assert!(!input.controls().light_on);
        release(&mut input, KeyCode::KeyF);
        assert!(!input.controls().light_on);

        press(&mut input, KeyCode::KeyF);
        assert!(input.controls().light_on);
    }

    #[test]
    fn key_repeat_does_not_retoggle_light() {
        let mut input = InputState::new();
        press(&mut input, KeyCode::KeyF);
        press(&mut input, KeyCode::KeyF);
        press(&mut input, KeyCode::KeyF);
        assert!(!input.controls().light_on);
    }

    #[test]
    fn opposing_intents_cancel_on_the_axis() {
        let mut input = InputState::new();
        press(&mut input, KeyCode::KeyW);
        press(&mut input, KeyCode::KeyS);
        let c = input.controls();
        assert!(c.forward && c.backward);
        assert_eq!(c.thrust_axis(), 0.0);
        assert!(c.is_thrusting());
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let mut input = InputState::new();
        press(&mut input, KeyCode::KeyQ);
        assert_eq!(input.controls(), ControlState::idle());
        assert!(!input.is_key_held(KeyCode::KeyQ));
    }

    #[test]
    fn rebinding_replaces_previous_control() {
        let mut bindings = KeyBindings::default();
        bindings.bind(KeyCode::KeyW, Control::Ascend);
        let mut input = InputState::with_bindings(bindings);
        press(&mut input, KeyCode::KeyW);
        assert!(input.controls().ascend);
        assert!(!input.controls().forward);
    }

    #[test]
    fn release_all_keeps_light() {
        let mut input = InputState::new();
        press(&mut input, KeyCode::KeyF);
        press(&mut input, KeyCode::KeyA);
        input.release_all();
        let c = input.controls();
        assert!(!c.turn_left);
        assert!(!c.light_on);
    }

    #[test]
    fn shared_control_stays_on_while_any_key_holds_it() {
        let mut bindings = KeyBindings::default();
        bindings.bind(KeyCode::KeyI, Control::Forward);
        let mut input = InputState::with_bindings(bindings);
        press(&mut input, KeyCode::KeyW);
        press(&mut input, KeyCode::KeyI);

        release(&mut input, KeyCode::KeyI);
        assert!(input.is_key_held(KeyCode::KeyW));
        assert!(input.controls().forward);

        release(&mut input, KeyCode::KeyW);
        assert!(!input.controls().forward);
    }
}
