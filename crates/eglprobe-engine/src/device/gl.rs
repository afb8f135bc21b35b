use std::ffi::{CStr, c_void};
use std::io::{self, Write};

use anyhow::{Result, bail};
use glow::HasContext;

use super::egl::Egl;
use crate::loader::{self, LibraryCandidates, LoadedLibrary};

/// Printed labels and their `glGetString` names, in output order.
pub(crate) const RENDERER_STRINGS: [(&str, u32); 4] = [
    ("Vendor", glow::VENDOR),
    ("Opengl version", glow::VERSION),
    ("GLSL Version", glow::SHADING_LANGUAGE_VERSION),
    ("Renderer", glow::RENDERER),
];

/// Desktop OpenGL entry points for the context current on this thread.
pub(crate) struct Gl {
    context: glow::Context,

    /// `None` when every entry point came from `eglGetProcAddress`.
    _library: Option<LoadedLibrary>,
}

impl Gl {
    /// Loads GL for the current context.
    ///
    /// Symbols are taken from the first loadable GL library, then from
    /// `eglGetProcAddress`. Must run after `eglMakeCurrent`.
    pub(crate) fn load(candidates: &LibraryCandidates, egl: &Egl) -> Result<Self> {
        let library = match loader::open_first(candidates) {
            Ok(library) => Some(library),
            Err(err) => {
                log::debug!("{err}; asking EGL for GL entry points");
                None
            }
        };

        let lookup = |name: &CStr| -> *const c_void {
            if let Some(library) = &library {
                let address = library.symbol_address(name.to_bytes());
                if !address.is_null() {
                    return address;
                }
            }
            egl.get_proc_address(name)
        };

        if lookup(c"glGetString").is_null() {
            bail!("glGetString is not available from any GL library or eglGetProcAddress");
        }

        // SAFETY: a context is current on this thread and glGetString resolves.
        let context = unsafe { glow::Context::from_loader_function_cstr(lookup) };
        Ok(Self {
            context,
            _library: library,
        })
    }

    /// `glGetString(name)` for one of [`RENDERER_STRINGS`].
    ///
    /// Panics when the driver returns text that is not UTF-8.
    pub(crate) fn string(&self, name: u32) -> String {
        // SAFETY: the context is current and `name` is a valid glGetString enum.
        unsafe { self.context.get_parameter_string(name) }
    }
}

/// Fetches and prints each renderer string in turn.
///
/// A line is written and flushed before the next string is fetched, so the
/// lines already printed survive a later failure.
pub(crate) fn write_renderer_strings<W, F>(out: &mut W, mut fetch: F) -> io::Result<()>
where
    W: Write + ?Sized,
    F: FnMut(u32) -> String,
{
    for (label, name) in RENDERER_STRINGS {
        let value = fetch(name);
        writeln!(out, "{label}: {value}")?;
        out.flush()?;
    }
    Ok(())
}
