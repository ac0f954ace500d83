//! Window + context bootstrap and the platform side of the render loop.
//!
//! Owns the glutin event loop and windowed context, translates platform
//! events into [`LoopEvent`]s, and wires the [`FrameLoop`] to a
//! [`ShapeRenderer`].

use std::sync::Arc;

use glow::HasContext;
use glutin::dpi::PhysicalSize;
use glutin::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use glutin::event_loop::{ControlFlow, EventLoop};
use glutin::platform::run_return::EventLoopExtRunReturn;
use glutin::window::WindowBuilder;
use glutin::{Api, ContextBuilder, GlProfile, GlRequest, PossiblyCurrent, WindowedContext};

use crate::config::WindowConfig;
use crate::demo::Demo;
use crate::error::{Error, Result};
use crate::frame_loop::{FrameLoop, FrameTarget, Key, LoopControl, LoopEvent};
use crate::render::ShapeRenderer;

type GlWindow = WindowedContext<PossiblyCurrent>;

/// Open the window, draw `demo` until it is closed, and release everything.
///
/// Shader text is loaded and compiled, and the mesh uploaded, before the
/// first frame; nothing is recreated per frame.
///
/// # Errors
///
/// Any [`Error`] ends the run. Bootstrap, shader, and link failures happen
/// before the window shows a frame; a failed buffer swap stops the loop.
pub fn run(demo: &Demo, config: &WindowConfig) -> Result<()> {
    log::info!("starting {} demo", demo.name);
    for path in demo.source_files() {
        log::debug!("reading shader source {}", path.display());
    }
    let (vertex_src, fragment_src) = demo.load_sources()?;

    let mut event_loop = EventLoop::new();
    let context = create_context(&event_loop, config)?;
    let gl = Arc::new(unsafe { load_gl(&context, config.gl_version) }?);

    let renderer = unsafe {
        ShapeRenderer::new(
            Arc::clone(&gl),
            &demo.shape,
            &vertex_src,
            &fragment_src,
            config.clear_color,
        )
    }?;
    unsafe { renderer.set_viewport(config.size[0], config.size[1]) };
    log::debug!("{} draws with {:?}", demo.name, renderer.draw_call());

    let mut frame_loop = FrameLoop::new(config);
    let mut target = GlTarget {
        context: &context,
        renderer: &renderer,
    };
    let mut outcome = Ok(());

    event_loop.run_return(|event, _, control_flow| {
        let Some(event) = translate_event(&event) else {
            return;
        };

        if let LoopEvent::Resized { width, height } = event {
            context.resize(PhysicalSize::new(width, height));
        }

        match frame_loop.handle(event, &mut target) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => *control_flow = ControlFlow::Exit,
            Err(e) => {
                outcome = Err(e);
                *control_flow = ControlFlow::Exit;
            }
        }
    });

    unsafe { renderer.destroy() };
    log::info!("{} closed after {} frames", demo.name, frame_loop.frames());

    outcome
}

/// Create the window and a core-profile context of the requested version,
/// and make it current on this thread.
fn create_context(event_loop: &EventLoop<()>, config: &WindowConfig) -> Result<GlWindow> {
    let [width, height] = config.size;
    let window = WindowBuilder::new()
        .with_title(config.title.as_str())
        .with_inner_size(PhysicalSize::new(width, height));

    let context = ContextBuilder::new()
        .with_gl(GlRequest::Specific(Api::OpenGl, config.gl_version))
        .with_gl_profile(GlProfile::Core)
        .with_vsync(config.vsync)
        .build_windowed(window, event_loop)
        .map_err(|e| Error::WindowCreation(e.to_string()))?;

    let context = unsafe { context.make_current() }
        .map_err(|(_, e)| Error::ContextCurrent(e.to_string()))?;

    Ok(context)
}

/// Load GL function pointers and confirm the driver gave us what we asked for.
///
/// # Safety
///
/// `context` must be current on the calling thread.
unsafe fn load_gl(context: &GlWindow, requested: (u8, u8)) -> Result<glow::Context> {
    let gl = unsafe { glow::Context::from_loader_function(|s| context.get_proc_address(s)) };

    let version = gl.version();
    check_version(requested, (version.major, version.minor), version.is_embedded)?;

    unsafe {
        log::info!(
            "OpenGL {} ({}, {})",
            gl.get_parameter_string(glow::VERSION),
            gl.get_parameter_string(glow::VENDOR),
            gl.get_parameter_string(glow::RENDERER),
        );
    }

    Ok(gl)
}

/// A desktop context at or above the requested version passes.
fn check_version(requested: (u8, u8), found: (u32, u32), is_embedded: bool) -> Result<()> {
    let wanted = (u32::from(requested.0), u32::from(requested.1));
    if is_embedded || found < wanted {
        return Err(Error::GlLoader { requested, found });
    }
    Ok(())
}

/// The live window as a frame target.
struct GlTarget<'a> {
    context: &'a GlWindow,
    renderer: &'a ShapeRenderer,
}

impl FrameTarget for GlTarget<'_> {
    fn set_viewport(&mut self, width: u32, height: u32) {
        unsafe { self.renderer.set_viewport(width, height) };
    }

    fn draw(&mut self) {
        unsafe { self.renderer.draw_frame() };
    }

    fn present(&mut self) -> Result<()> {
        self.context
            .swap_buffers()
            .map_err(|e| Error::Present(e.to_string()))
    }
}

fn translate_event(event: &Event<'_, ()>) -> Option<LoopEvent> {
    match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => Some(LoopEvent::CloseRequested),
            WindowEvent::Resized(size) => Some(LoopEvent::Resized {
                width: size.width,
                height: size.height,
            }),
            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        virtual_keycode: Some(code),
                        state,
                        ..
                    },
                ..
            } => Some(LoopEvent::Key {
                key: map_key(*code),
                pressed: *state == ElementState::Pressed,
            }),
            _ => None,
        },
        Event::MainEventsCleared => Some(LoopEvent::FrameDue),
        _ => None,
    }
}

fn map_key(code: VirtualKeyCode) -> Key {
    match code {
        VirtualKeyCode::Escape => Key::Escape,
        VirtualKeyCode::Q => Key::Q,
        _ => Key::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glutin::window::WindowId;

    fn window_event(event: WindowEvent<'static>) -> Event<'static, ()> {
        Event::WindowEvent {
            window_id: unsafe { WindowId::dummy() },
            event,
        }
    }

    #[test]
    fn maps_quit_keys() {
        assert_eq!(map_key(VirtualKeyCode::Escape), Key::Escape);
        assert_eq!(map_key(VirtualKeyCode::Q), Key::Q);
        assert_eq!(map_key(VirtualKeyCode::Space), Key::Other);
    }

    #[test]
    fn translates_close_and_resize() {
        assert_eq!(
            translate_event(&window_event(WindowEvent::CloseRequested)),
            Some(LoopEvent::CloseRequested)
        );
        assert_eq!(
            translate_event(&window_event(WindowEvent::Resized(PhysicalSize::new(
                1024, 768
            )))),
            Some(LoopEvent::Resized {
                width: 1024,
                height: 768
            })
        );
    }

    #[test]
    fn main_events_cleared_is_a_frame() {
        assert_eq!(
            translate_event(&Event::MainEventsCleared),
            Some(LoopEvent::FrameDue)
        );
        assert_eq!(translate_event(&Event::RedrawEventsCleared), None);
    }

    #[test]
    fn version_check_accepts_equal_or_newer() {
        assert!(check_version((3, 3), (3, 3), false).is_ok());
        assert!(check_version((3, 3), (4, 6), false).is_ok());
    }

    #[test]
    fn version_check_rejects_older_or_embedded() {
        assert!(matches!(
            check_version((3, 3), (3, 1), false),
            Err(Error::GlLoader {
                requested: (3, 3),
                found: (3, 1)
            })
        ));
        assert!(check_version((3, 3), (3, 3), true).is_err());
    }
}
