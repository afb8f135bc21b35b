use std::io::Write;
use std::rc::Rc;

use anyhow::{Context, Result};
use glutin_egl_sys::egl;
use glutin_egl_sys::egl::types::{EGLDisplay, EGLint};

use super::ContextInit;
use super::egl::Egl;
use super::gl::{self, Gl};

/// A desktop OpenGL context bound to a memory-backed pbuffer surface.
///
/// Construction runs the whole bring-up sequence and only returns once the
/// context is current on the calling thread, so every method may issue GL
/// calls. Handles are never destroyed explicitly; the driver reclaims them at
/// process exit.
pub struct OffscreenContext {
    egl: Rc<Egl>,
    gl: Gl,

    display: EGLDisplay,

    /// EGL version reported by `eglInitialize`.
    version: (EGLint, EGLint),
}

impl OffscreenContext {
    /// Brings up a context on the default display.
    pub fn new(egl: Rc<Egl>, init: &ContextInit) -> Result<Self> {
        let display = egl
            .get_display(egl::DEFAULT_DISPLAY)
            .context("failed to get the default EGL display")?;
        Self::on_display(egl, display, init)
    }

    /// Brings up a context on an already obtained (uninitialized) display.
    pub(crate) fn on_display(egl: Rc<Egl>, display: EGLDisplay, init: &ContextInit) -> Result<Self> {
        let version = egl
            .initialize(display)
            .context("failed to initialize the EGL display")?;
        log::debug!("EGL {}.{} initialized", version.0, version.1);

        let config = egl
            .choose_config(display, &init.config.attrib_list())
            .context("no framebuffer configuration matches the request")?;

        let surface = egl
            .create_pbuffer_surface(display, config, &init.pbuffer_attribs()?)
            .context("failed to create pbuffer surface")?;

        egl.bind_api(egl::OPENGL_API)
            .context("desktop OpenGL is not supported by this EGL")?;

        let context = egl
            .create_context(display, config, egl::NO_CONTEXT, None)
            .context("failed to create OpenGL context")?;

        egl.make_current(display, surface, surface, context)
            .context("failed to make the context current")?;
        log::debug!("context made current ({}x{} pbuffer)", init.width, init.height);

        let gl = Gl::load(&init.gl_libraries, &egl)?;

        Ok(Self {
            egl,
            gl,
            display,
            version,
        })
    }

    /// Prints vendor, version, GLSL version and renderer, one line each.
    ///
    /// Each line is flushed as soon as its string is read.
    pub fn write_renderer_info<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        gl::write_renderer_strings(out, |name| self.gl.string(name))
            .context("failed to print renderer strings")
    }

    /// `(major, minor)` EGL version of the display.
    pub fn egl_version(&self) -> (EGLint, EGLint) {
        self.version
    }

    /// Vendor string of the EGL implementation behind the display.
    pub fn egl_vendor(&self) -> Option<String> {
        self.egl.query_string(self.display, egl::VENDOR)
    }

    /// Client APIs the display supports (e.g. "OpenGL OpenGL_ES").
    pub fn client_apis(&self) -> Option<String> {
        self.egl.query_string(self.display, egl::CLIENT_APIS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::LibraryCandidates;

    #[test]
    #[ignore = "requires an EGL driver with desktop OpenGL"]
    fn bootstraps_default_display() {
        let init = ContextInit::default();
        let egl = Rc::new(Egl::load(&LibraryCandidates::egl()).unwrap());
        let ctx = OffscreenContext::new(egl, &init).unwrap();
        assert!(ctx.egl_version().0 >= 1);

        let mut out = Vec::<u8>::new();
        ctx.write_renderer_info(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Vendor: "));
        assert!(lines[3].starts_with("Renderer: "));
    }
}
