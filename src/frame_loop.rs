//! Render loop state machine.
//!
//! The loop knows nothing about glutin: the window layer translates platform
//! events into [`LoopEvent`]s and hands over something that can draw and
//! present as a [`FrameTarget`].

use crate::config::{ViewportPolicy, WindowConfig};
use crate::error::Result;

/// Loop lifecycle. The only transition is `Running` → `Closing`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    /// Frames are drawn and presented.
    Running,
    /// A close was requested; the next frame check stops the loop.
    Closing,
}

/// Keys the loop can tell apart.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Key {
    /// Escape.
    Escape,
    /// The `Q` key.
    Q,
    /// Anything else.
    Other,
}

/// Platform-independent input to the loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopEvent {
    /// A key changed state.
    Key {
        /// Which key.
        key: Key,
        /// `true` on press, `false` on release.
        pressed: bool,
    },
    /// The window manager asked the window to close.
    CloseRequested,
    /// The drawable was resized to the given physical size.
    Resized {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
    /// Events are drained; time to run one iteration.
    FrameDue,
}

/// What the caller should do after handling an event.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopControl {
    /// Keep pumping events.
    Continue,
    /// Leave the event loop and tear down.
    Exit,
}

/// Something a frame can be drawn into.
pub trait FrameTarget {
    /// Set the drawable viewport, in pixels.
    fn set_viewport(&mut self, width: u32, height: u32);

    /// Clear the color buffer and issue the frame's single draw call.
    fn draw(&mut self);

    /// Swap the back buffer to the screen.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Present`](crate::Error::Present) if the swap fails.
    fn present(&mut self) -> Result<()>;
}

/// Drives a [`FrameTarget`] from [`LoopEvent`]s.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    state: LoopState,
    quit_key: Key,
    quit_held: bool,
    viewport_policy: ViewportPolicy,
    window_size: [u32; 2],
    frames: u64,
}

impl FrameLoop {
    /// A running loop for a window created from `config`.
    #[must_use]
    pub fn new(config: &WindowConfig) -> Self {
        Self {
            state: LoopState::Running,
            quit_key: config.quit_key,
            quit_held: false,
            viewport_policy: config.viewport_policy,
            window_size: config.size,
            frames: 0,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Frames presented so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Mark the window as closing. Idempotent.
    pub fn request_close(&mut self) {
        if self.state == LoopState::Running {
            log::info!("close requested after {} frames", self.frames);
        }
        self.state = LoopState::Closing;
    }

    /// Handle one event.
    ///
    /// On [`LoopEvent::FrameDue`] the loop checks the close flag first. While
    /// running it processes input, draws, and presents exactly once, in that
    /// order. A quit key seen during input processing still lets the current
    /// frame finish; the next `FrameDue` returns [`LoopControl::Exit`] without
    /// drawing.
    ///
    /// # Errors
    ///
    /// Propagates the target's present failure. The loop is left `Closing`.
    pub fn handle<T: FrameTarget>(
        &mut self,
        event: LoopEvent,
        target: &mut T,
    ) -> Result<LoopControl> {
        match event {
            LoopEvent::Key { key, pressed } if key == self.quit_key => {
                self.quit_held = pressed;
            }
            LoopEvent::Key { .. } => {}
            LoopEvent::CloseRequested => self.request_close(),
            LoopEvent::Resized { width, height } => {
                let [w, h] = self.viewport_policy.viewport([width, height], self.window_size);
                log::debug!("resized to {width}x{height}, viewport {w}x{h}");
                target.set_viewport(w, h);
            }
            LoopEvent::FrameDue => {
                if self.state == LoopState::Closing {
                    return Ok(LoopControl::Exit);
                }

                self.process_input();
                target.draw();
                if let Err(e) = target.present() {
                    self.state = LoopState::Closing;
                    return Err(e);
                }
                self.frames += 1;
            }
        }

        Ok(LoopControl::Continue)
    }

    fn process_input(&mut self) {
        if self.quit_held {
            self.request_close();
        }
    }
}
