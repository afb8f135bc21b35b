use anyhow::Result;

use glutin_egl_sys::egl;
use glutin_egl_sys::egl::types::EGLint;

use crate::loader::LibraryCandidates;

/// Environment variable naming an EGL library to try before the defaults.
pub const EGL_LIBRARY_ENV: &str = "EGLPROBE_EGL_LIBRARY";

/// Environment variable naming an OpenGL library to try before the defaults.
pub const GL_LIBRARY_ENV: &str = "EGLPROBE_GL_LIBRARY";

/// Framebuffer configuration requested from `eglChooseConfig`.
///
/// Only these channel sizes vary; the surface type is always pbuffer and the
/// renderable type always desktop OpenGL.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ConfigRequest {
    pub blue_size: EGLint,
    pub green_size: EGLint,
    pub red_size: EGLint,
    pub depth_size: EGLint,
}

impl Default for ConfigRequest {
    fn default() -> Self {
        Self {
            blue_size: 8,
            green_size: 8,
            red_size: 8,
            depth_size: 24,
        }
    }
}

impl ConfigRequest {
    /// `EGL_NONE`-terminated attribute list.
    pub fn attrib_list(&self) -> Vec<EGLint> {
        vec![
            egl::SURFACE_TYPE as EGLint,
            egl::PBUFFER_BIT as EGLint,
            egl::BLUE_SIZE as EGLint,
            self.blue_size,
            egl::GREEN_SIZE as EGLint,
            self.green_size,
            egl::RED_SIZE as EGLint,
            self.red_size,
            egl::DEPTH_SIZE as EGLint,
            self.depth_size,
            egl::RENDERABLE_TYPE as EGLint,
            egl::OPENGL_BIT as EGLint,
            egl::NONE as EGLint,
        ]
    }
}

/// Initialization parameters for the off-screen context.
#[derive(Debug, Clone)]
pub struct ContextInit {
    /// Pbuffer width in pixels.
    pub width: u32,

    /// Pbuffer height in pixels.
    pub height: u32,

    pub config: ConfigRequest,

    /// EGL library names, tried in order.
    pub egl_libraries: LibraryCandidates,

    /// OpenGL library names used to resolve `glGetString`.
    ///
    /// When none loads, `eglGetProcAddress` is asked instead.
    pub gl_libraries: LibraryCandidates,
}

impl Default for ContextInit {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            config: ConfigRequest::default(),
            egl_libraries: LibraryCandidates::egl(),
            gl_libraries: LibraryCandidates::gl(),
        }
    }
}

impl ContextInit {
    /// Defaults plus library overrides from [`EGL_LIBRARY_ENV`] and [`GL_LIBRARY_ENV`].
    pub fn from_env() -> Self {
        Self::default().with_library_overrides(
            std::env::var(EGL_LIBRARY_ENV).ok(),
            std::env::var(GL_LIBRARY_ENV).ok(),
        )
    }

    /// Puts the given library names ahead of the current candidates.
    ///
    /// Empty strings are ignored.
    pub fn with_library_overrides(mut self, egl: Option<String>, gl: Option<String>) -> Self {
        if let Some(name) = egl.filter(|n| !n.is_empty()) {
            self.egl_libraries = self.egl_libraries.preferring(name);
        }
        if let Some(name) = gl.filter(|n| !n.is_empty()) {
            self.gl_libraries = self.gl_libraries.preferring(name);
        }
        self
    }

    /// `EGL_NONE`-terminated pbuffer attribute list.
    pub fn pbuffer_attribs(&self) -> Result<Vec<EGLint>> {
        anyhow::ensure!(self.width > 0 && self.height > 0, "pbuffer has zero size");

        let width = EGLint::try_from(self.width)?;
        let height = EGLint::try_from(self.height)?;
        Ok(vec![egl::WIDTH as EGLint, width, egl::HEIGHT as EGLint, height, egl::NONE as EGLint])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_attribs() {
        assert_eq!(
            ConfigRequest::default().attrib_list(),
            vec![
                egl::SURFACE_TYPE as EGLint, egl::PBUFFER_BIT as EGLint,
                egl::BLUE_SIZE as EGLint, 8,
                egl::GREEN_SIZE as EGLint, 8,
                egl::RED_SIZE as EGLint, 8,
                egl::DEPTH_SIZE as EGLint, 24,
                egl::RENDERABLE_TYPE as EGLint, egl::OPENGL_BIT as EGLint,
                egl::NONE as EGLint,
            ]
        );
    }

    #[test]
    fn default_pbuffer_is_256_square() {
        let init = ContextInit::default();
        assert_eq!(
            init.pbuffer_attribs().unwrap(),
            vec![egl::WIDTH as EGLint, 256, egl::HEIGHT as EGLint, 256, egl::NONE as EGLint]
        );
    }

    #[test]
    fn zero_sized_pbuffer_is_rejected() {
        let init = ContextInit { height: 0, ..ContextInit::default() };
        assert!(init.pbuffer_attribs().is_err());
    }

    #[test]
    fn oversized_pbuffer_is_rejected() {
        let init = ContextInit { width: u32::MAX, ..ContextInit::default() };
        assert!(init.pbuffer_attribs().is_err());
    }

    #[test]
    fn overrides_go_first() {
        let init = ContextInit::default()
            .with_library_overrides(Some("/opt/vendor/libEGL.so".into()), Some(String::new()));
        assert_eq!(init.egl_libraries.names().next(), Some("/opt/vendor/libEGL.so"));
        assert_eq!(init.gl_libraries, LibraryCandidates::gl());
    }
}
