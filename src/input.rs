//! Keyboard and pointer state fed into the simulation.
//!
//! The app updates [`InputState`] from winit key events and queues
//! [`PlatformEvent`]s; the simulation reads the held keys and drains the
//! queue once per tick.

use glam::Vec2;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Directional keys currently held.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    /// Record a key press or release. Returns false for keys we ignore.
    pub fn set_key(&mut self, key: PhysicalKey, pressed: bool) -> bool {
        let PhysicalKey::Code(code) = key else {
            return false;
        };
        let slot = match code {
            KeyCode::KeyW | KeyCode::ArrowUp => &mut self.up,
            KeyCode::KeyS | KeyCode::ArrowDown => &mut self.down,
            KeyCode::KeyA | KeyCode::ArrowLeft => &mut self.left,
            KeyCode::KeyD | KeyCode::ArrowRight => &mut self.right,
            _ => return false,
        };
        *slot = pressed;
        true
    }

    /// Signed unit sum of held directions. Not normalized.
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }

    /// Forget held keys, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Discrete events drained at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlatformEvent {
    /// Pointer moved; position in virtual screen pixels.
    PointerMoved(Vec2),
    Quit,
}

/// Map a physical window position onto the virtual screen.
pub fn to_virtual(physical: Vec2, window_px: Vec2, virtual_size: Vec2) -> Vec2 {
    if window_px.x <= 0.0 || window_px.y <= 0.0 {
        return physical;
    }
    physical * virtual_size / window_px
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_and_arrows_share_slots() {
        let mut input = InputState::default();
        assert!(input.set_key(PhysicalKey::Code(KeyCode::KeyD), true));
        assert!(input.set_key(PhysicalKey::Code(KeyCode::ArrowUp), true));
        assert_eq!(input.direction(), Vec2::new(1.0, -1.0));

        input.set_key(PhysicalKey::Code(KeyCode::ArrowRight), false);
        assert_eq!(input.direction(), Vec2::new(0.0, -1.0));

        assert!(!input.set_key(PhysicalKey::Code(KeyCode::Space), true));
    }

    #[test]
    fn only_direction_keys_are_tracked() {
        let mut input = InputState::default();
        assert!(!input.set_key(PhysicalKey::Code(KeyCode::Escape), true));
        assert!(!input.set_key(PhysicalKey::Code(KeyCode::Space), true));
        assert_eq!(input.direction(), Vec2::ZERO);
    }

    #[test]
    fn opposite_keys_cancel() {
        let input = InputState {
            left: true,
            right: true,
            up: true,
            down: false,
        };
        assert_eq!(input.direction(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn virtual_mapping_scales_by_window_size() {
        let v = to_virtual(
            Vec2::new(1280.0, 480.0),
            Vec2::new(1280.0, 960.0),
            Vec2::new(640.0, 480.0),
        );
        assert_eq!(v, Vec2::new(640.0, 240.0));
    }
}
