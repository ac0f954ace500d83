//! Window and loop configuration.

use crate::frame_loop::Key;

/// What the viewport follows when the window is resized.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ViewportPolicy {
    /// Viewport matches the reported drawable size.
    #[default]
    Track,
    /// Viewport stays at the configured window size, whatever is reported.
    Fixed,
}

impl ViewportPolicy {
    /// Viewport for a resize to `reported`, given the window's configured size.
    #[must_use]
    pub fn viewport(self, reported: [u32; 2], configured: [u32; 2]) -> [u32; 2] {
        match self {
            ViewportPolicy::Track => reported,
            ViewportPolicy::Fixed => configured,
        }
    }
}

/// Window/context configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    /// Window title.
    pub title: String,
    /// Initial drawable size in physical pixels, `[width, height]`.
    pub size: [u32; 2],
    /// Requested OpenGL core-profile version, `(major, minor)`.
    pub gl_version: (u8, u8),
    /// Key that closes the window.
    pub quit_key: Key,
    /// Color the frame is cleared to, RGBA.
    pub clear_color: [f32; 4],
    /// Resize behavior.
    pub viewport_policy: ViewportPolicy,
    /// Sync buffer swaps to the display refresh.
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "GARBAGE".to_string(),
            size: [800, 600],
            gl_version: (3, 3),
            quit_key: Key::Escape,
            clear_color: [0.5, 0.5, 0.5, 0.5],
            viewport_policy: ViewportPolicy::Track,
            vsync: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_window() {
        let config = WindowConfig::default();
        assert_eq!(config.title, "GARBAGE");
        assert_eq!(config.size, [800, 600]);
        assert_eq!(config.gl_version, (3, 3));
        assert_eq!(config.quit_key, Key::Escape);
        assert_eq!(config.viewport_policy, ViewportPolicy::Track);
    }

    #[test]
    fn track_follows_resize() {
        let v = ViewportPolicy::Track.viewport([1024, 768], [800, 600]);
        assert_eq!(v, [1024, 768]);
    }

    #[test]
    fn fixed_ignores_resize() {
        let v = ViewportPolicy::Fixed.viewport([1024, 768], [800, 600]);
        assert_eq!(v, [800, 600]);
    }
}
