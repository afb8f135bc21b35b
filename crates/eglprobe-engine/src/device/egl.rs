//! EGL entry points loaded into the `glutin_egl_sys` binding table.

use std::ffi::{CStr, CString, c_void};

use glutin_egl_sys::egl;
use glutin_egl_sys::egl::types::{
    EGLConfig, EGLContext, EGLDisplay, EGLNativeDisplayType, EGLSurface, EGLenum, EGLint,
};

use super::EglError;
use crate::loader::{self, LibraryCandidates, LoadError, LoadedLibrary};

/// A loaded EGL library and its generated function table.
///
/// Handles passed to the wrappers must have been produced by the same `Egl`.
pub struct Egl {
    api: egl::Egl,

    /// Keeps the addresses in `api` valid.
    library: LoadedLibrary,
}

impl Egl {
    /// Opens the first loadable candidate and fills the function table.
    ///
    /// Core entry points come straight from the library; anything it does not
    /// export (device and platform extensions) is asked of `eglGetProcAddress`.
    pub fn load(candidates: &LibraryCandidates) -> Result<Self, LoadError> {
        let library = loader::open_first(candidates)?;

        let exported = egl::Egl::load_with(|symbol| library.symbol_address(symbol.as_bytes()));
        if !exported.GetProcAddress.is_loaded() {
            return Err(LoadError::MissingSymbol {
                library: library.name.clone(),
                symbol: "eglGetProcAddress",
            });
        }

        let api = egl::Egl::load_with(|symbol| {
            let address = library.symbol_address(symbol.as_bytes());
            if !address.is_null() {
                return address;
            }
            let Ok(name) = CString::new(symbol) else {
                return std::ptr::null();
            };
            // SAFETY: name is NUL-terminated; the table only stores the result.
            unsafe { exported.GetProcAddress(name.as_ptr()) as *const c_void }
        });

        let required = [
            ("eglGetDisplay", api.GetDisplay.is_loaded()),
            ("eglInitialize", api.Initialize.is_loaded()),
            ("eglChooseConfig", api.ChooseConfig.is_loaded()),
            ("eglCreatePbufferSurface", api.CreatePbufferSurface.is_loaded()),
            ("eglBindAPI", api.BindAPI.is_loaded()),
            ("eglCreateContext", api.CreateContext.is_loaded()),
            ("eglMakeCurrent", api.MakeCurrent.is_loaded()),
            ("eglGetError", api.GetError.is_loaded()),
            ("eglQueryString", api.QueryString.is_loaded()),
        ];
        if let Some(&(symbol, _)) = required.iter().find(|(_, loaded)| !loaded) {
            return Err(LoadError::MissingSymbol {
                library: library.name.clone(),
                symbol,
            });
        }

        Ok(Self { api, library })
    }

    /// Name of the library file that was opened.
    pub fn library_name(&self) -> &str {
        &self.library.name
    }

    /// The generated table, for extension entry points.
    pub(crate) fn api(&self) -> &egl::Egl {
        &self.api
    }

    /// Last error recorded on the calling thread.
    pub fn error_code(&self) -> EGLint {
        // SAFETY: eglGetError takes no arguments; presence checked in `load`.
        unsafe { self.api.GetError() }
    }

    pub(crate) fn fail(&self, call: &'static str) -> EglError {
        EglError::new(call, self.error_code())
    }

    pub(crate) fn get_display(&self, native: EGLNativeDisplayType) -> Result<EGLDisplay, EglError> {
        // SAFETY: EGL_DEFAULT_DISPLAY or a platform handle owned by the caller.
        let display = unsafe { self.api.GetDisplay(native) };
        if display == egl::NO_DISPLAY {
            return Err(self.fail("eglGetDisplay"));
        }
        Ok(display)
    }

    pub(crate) fn initialize(&self, display: EGLDisplay) -> Result<(EGLint, EGLint), EglError> {
        let (mut major, mut minor) = (0, 0);
        // SAFETY: out-pointers reference live locals.
        let ok = unsafe { self.api.Initialize(display, &mut major, &mut minor) };
        if ok == egl::FALSE {
            return Err(self.fail("eglInitialize"));
        }
        Ok((major, minor))
    }

    /// Asks for a single configuration matching `attribs` (EGL_NONE-terminated).
    pub(crate) fn choose_config(
        &self,
        display: EGLDisplay,
        attribs: &[EGLint],
    ) -> Result<EGLConfig, EglError> {
        debug_assert_eq!(attribs.last(), Some(&(egl::NONE as EGLint)));

        let mut config: EGLConfig = std::ptr::null();
        let mut num_configs: EGLint = 0;
        // SAFETY: attribs is terminated; config has room for exactly one entry.
        let ok = unsafe {
            self.api
                .ChooseConfig(display, attribs.as_ptr(), &mut config, 1, &mut num_configs)
        };
        if ok == egl::FALSE {
            return Err(self.fail("eglChooseConfig"));
        }
        if num_configs < 1 {
            return Err(EglError::new("eglChooseConfig", egl::BAD_CONFIG as EGLint));
        }
        Ok(config)
    }

    pub(crate) fn create_pbuffer_surface(
        &self,
        display: EGLDisplay,
        config: EGLConfig,
        attribs: &[EGLint],
    ) -> Result<EGLSurface, EglError> {
        debug_assert_eq!(attribs.last(), Some(&(egl::NONE as EGLint)));

        // SAFETY: display and config come from this library; attribs is terminated.
        let surface = unsafe { self.api.CreatePbufferSurface(display, config, attribs.as_ptr()) };
        if surface == egl::NO_SURFACE {
            return Err(self.fail("eglCreatePbufferSurface"));
        }
        Ok(surface)
    }

    pub(crate) fn bind_api(&self, api: EGLenum) -> Result<(), EglError> {
        // SAFETY: plain enum argument.
        let ok = unsafe { self.api.BindAPI(api) };
        if ok == egl::FALSE {
            return Err(self.fail("eglBindAPI"));
        }
        Ok(())
    }

    /// `attribs` of `None` passes NULL, requesting every default.
    pub(crate) fn create_context(
        &self,
        display: EGLDisplay,
        config: EGLConfig,
        share: EGLContext,
        attribs: Option<&[EGLint]>,
    ) -> Result<EGLContext, EglError> {
        let attribs = attribs.map_or(std::ptr::null(), <[EGLint]>::as_ptr);
        // SAFETY: handles come from this library; attribs is NULL or terminated.
        let context = unsafe { self.api.CreateContext(display, config, share, attribs) };
        if context == egl::NO_CONTEXT {
            return Err(self.fail("eglCreateContext"));
        }
        Ok(context)
    }

    pub(crate) fn make_current(
        &self,
        display: EGLDisplay,
        draw: EGLSurface,
        read: EGLSurface,
        context: EGLContext,
    ) -> Result<(), EglError> {
        // SAFETY: handles come from this library.
        let ok = unsafe { self.api.MakeCurrent(display, draw, read, context) };
        if ok == egl::FALSE {
            return Err(self.fail("eglMakeCurrent"));
        }
        Ok(())
    }

    /// `eglQueryString`; pass `egl::NO_DISPLAY` for client extensions.
    pub(crate) fn query_string(&self, display: EGLDisplay, name: EGLenum) -> Option<String> {
        // SAFETY: the returned string is static for the display's lifetime.
        unsafe {
            let raw = self.api.QueryString(display, name as EGLint);
            if raw.is_null() {
                // Querying client extensions on EGL < 1.5 sets EGL_BAD_DISPLAY.
                let _ = self.error_code();
                return None;
            }
            Some(CStr::from_ptr(raw).to_string_lossy().into_owned())
        }
    }

    /// Looks up a core or extension entry point; null when unknown.
    pub(crate) fn get_proc_address(&self, name: &CStr) -> *const c_void {
        // SAFETY: name is NUL-terminated; presence checked in `load`.
        unsafe { self.api.GetProcAddress(name.as_ptr()) as *const c_void }
    }
}

/// Returns `true` when `name` appears in a space-separated extension list.
pub fn has_extension(extensions: &str, name: &str) -> bool {
    extensions.split_ascii_whitespace().any(|ext| ext == name)
}
