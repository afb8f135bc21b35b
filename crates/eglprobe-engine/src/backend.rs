//! Backend availability and bring-up.
//!
//! [`Backend::probe`] replaces process-wide "is EGL usable" flags with an
//! explicit [`BackendStatus`] that callers inspect before rendering.

use std::rc::Rc;

use anyhow::{Context, Result};

use crate::device::{ContextInit, Egl, OffscreenContext};

/// Windowing features of the off-screen backend. It has no windows, so every
/// entry is unsupported.
pub const CAPABILITIES: [(&str, bool); 11] = [
    ("Window position get/set", false),
    ("Window size get/set", false),
    ("Multiple windows", false),
    ("Mouse scroll events", false),
    ("Non-decorated window", false),
    ("Non-sizeable window", false),
    ("Fullscreen mode", false),
    ("Unicode processing", false),
    ("Set GL version", false),
    ("Set GL profile", false),
    ("Share GL context", false),
];

/// Result of probing for the EGL backend.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct BackendStatus {
    /// An EGL library was found and exports every required entry point.
    pub available: bool,

    /// `"major.minor"` once a display has been initialized.
    pub version: Option<String>,

    /// A context has been brought up through this backend.
    pub initialized: bool,
}

pub struct Backend {
    egl: Option<Rc<Egl>>,
    status: BackendStatus,
}

impl Backend {
    /// Loads EGL from `init.egl_libraries`.
    ///
    /// A library that is simply absent yields an unavailable backend. A
    /// library that opens but is unusable is an error, after printing
    /// guidance for the operator.
    pub fn probe(init: &ContextInit) -> Result<Self> {
        match Egl::load(&init.egl_libraries) {
            Ok(egl) => {
                log::info!("imported EGL from {}", egl.library_name());
                Ok(Self {
                    egl: Some(Rc::new(egl)),
                    status: BackendStatus {
                        available: true,
                        ..BackendStatus::default()
                    },
                })
            }
            Err(err) if err.is_not_found() => {
                log::warn!("EGL backend unavailable: {err}");
                Ok(Self::unavailable())
            }
            Err(err) => {
                log::error!("Unable to load OpenGL libraries. Make sure you use a GPU-enabled backend.");
                log::error!("Enable hardware (GPU) acceleration for this runtime and try again.");
                Err(anyhow::Error::new(err).context("failed to load EGL"))
            }
        }
    }

    /// A backend with no EGL behind it.
    pub fn unavailable() -> Self {
        Self {
            egl: None,
            status: BackendStatus::default(),
        }
    }

    pub fn status(&self) -> &BackendStatus {
        &self.status
    }

    /// Shared handle to the loaded library.
    pub fn egl(&self) -> Option<Rc<Egl>> {
        self.egl.clone()
    }

    /// Brings up an off-screen context on the default display.
    pub fn bootstrap(&mut self, init: &ContextInit) -> Result<OffscreenContext> {
        let egl = self.egl().context("EGL backend is not available")?;
        let ctx = OffscreenContext::new(egl, init)?;

        let (major, minor) = ctx.egl_version();
        self.status.version = Some(format!("{major}.{minor}"));
        self.status.initialized = true;

        Ok(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::LibraryCandidates;

    fn missing_egl() -> ContextInit {
        ContextInit {
            egl_libraries: LibraryCandidates::new(["libeglprobe-missing-egl.so.9"]),
            ..ContextInit::default()
        }
    }

    #[test]
    fn missing_library_is_unavailable_not_an_error() {
        let backend = Backend::probe(&missing_egl()).unwrap();
        assert_eq!(backend.status(), &BackendStatus::default());
        assert!(backend.egl().is_none());
    }

    #[test]
    fn bootstrap_requires_availability() {
        let init = missing_egl();
        let mut backend = Backend::probe(&init).unwrap();
        let err = backend.bootstrap(&init).err().unwrap();
        assert_eq!(err.to_string(), "EGL backend is not available");
        assert!(!backend.status().initialized);
        assert_eq!(backend.status().version, None);
    }

    #[test]
    fn offscreen_backend_has_no_window_capabilities() {
        assert!(CAPABILITIES.iter().all(|&(_, supported)| !supported));
        assert!(CAPABILITIES.iter().any(|&(name, _)| name == "Share GL context"));
    }

    #[test]
    #[ignore = "requires an EGL driver with desktop OpenGL"]
    fn bootstrap_records_version() {
        let init = ContextInit::default();
        let mut backend = Backend::probe(&init).unwrap();
        assert!(backend.status().available);

        backend.bootstrap(&init).unwrap();
        assert!(backend.status().initialized);
        assert!(backend.status().version.is_some());
    }
}
