use std::fmt;

use glutin_egl_sys::egl;
use glutin_egl_sys::egl::types::{EGLenum, EGLint};

/// A failed EGL call together with the `eglGetError` code it left behind.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EglError {
    pub call: &'static str,
    pub code: EGLint,
}

impl EglError {
    pub fn new(call: &'static str, code: EGLint) -> Self {
        Self { call, code }
    }

    /// Symbolic name of the error code, if it is a known one.
    pub fn code_name(&self) -> Option<&'static str> {
        Some(match self.code as EGLenum {
            egl::SUCCESS => "EGL_SUCCESS",
            egl::NOT_INITIALIZED => "EGL_NOT_INITIALIZED",
            egl::BAD_ACCESS => "EGL_BAD_ACCESS",
            egl::BAD_ALLOC => "EGL_BAD_ALLOC",
            egl::BAD_ATTRIBUTE => "EGL_BAD_ATTRIBUTE",
            egl::BAD_CONFIG => "EGL_BAD_CONFIG",
            egl::BAD_CONTEXT => "EGL_BAD_CONTEXT",
            egl::BAD_CURRENT_SURFACE => "EGL_BAD_CURRENT_SURFACE",
            egl::BAD_DISPLAY => "EGL_BAD_DISPLAY",
            egl::BAD_MATCH => "EGL_BAD_MATCH",
            egl::BAD_NATIVE_PIXMAP => "EGL_BAD_NATIVE_PIXMAP",
            egl::BAD_NATIVE_WINDOW => "EGL_BAD_NATIVE_WINDOW",
            egl::BAD_PARAMETER => "EGL_BAD_PARAMETER",
            egl::BAD_SURFACE => "EGL_BAD_SURFACE",
            egl::CONTEXT_LOST => "EGL_CONTEXT_LOST",
            egl::BAD_DEVICE_EXT => "EGL_BAD_DEVICE_EXT",
            _ => return None,
        })
    }
}

impl fmt::Display for EglError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code_name() {
            Some(name) => write!(f, "{} failed: {} ({:#06x})", self.call, name, self.code),
            None => write!(f, "{} failed: unknown EGL error {:#06x}", self.call, self.code),
        }
    }
}

impl std::error::Error for EglError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_known_codes() {
        let err = EglError::new("eglMakeCurrent", egl::BAD_MATCH as EGLint);
        assert_eq!(err.to_string(), "eglMakeCurrent failed: EGL_BAD_MATCH (0x3009)");
    }

    #[test]
    fn display_falls_back_to_hex() {
        let err = EglError::new("eglInitialize", 0x4242);
        assert_eq!(err.code_name(), None);
        assert_eq!(err.to_string(), "eglInitialize failed: unknown EGL error 0x4242");
    }

    #[test]
    fn device_extension_code_is_known() {
        assert_eq!(
            EglError::new("eglQueryDevicesEXT", egl::BAD_DEVICE_EXT as EGLint).code_name(),
            Some("EGL_BAD_DEVICE_EXT")
        );
    }
}
