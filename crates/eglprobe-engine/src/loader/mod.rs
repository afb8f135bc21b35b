//! Shared-library discovery.
//!
//! Native libraries are located by trying an ordered list of file names with
//! the platform loader; the first name that opens wins.

mod candidates;
mod error;

pub use candidates::LibraryCandidates;
pub use error::LoadError;

use std::ffi::c_void;

/// A shared library opened from one of its candidate names.
pub struct LoadedLibrary {
    /// Candidate name that was accepted by the loader.
    pub name: String,
    pub library: libloading::Library,
}

impl LoadedLibrary {
    /// Address of `symbol`, or null when the library does not export it.
    ///
    /// The address is handed to generated binding tables, which cast it to the
    /// declared signature and treat null as "not loaded".
    pub fn symbol_address(&self, symbol: &[u8]) -> *const c_void {
        // SAFETY: the symbol is read as an untyped address, never called here.
        match unsafe { self.library.get::<*const c_void>(symbol) } {
            Ok(address) => *address,
            Err(err) => {
                log::trace!("{}: {err}", self.name);
                std::ptr::null()
            }
        }
    }
}

/// Opens the first library in `candidates` that the platform loader accepts.
///
/// Returns [`LoadError::NotFound`] with every attempted name when none opens.
pub fn open_first(candidates: &LibraryCandidates) -> Result<LoadedLibrary, LoadError> {
    let mut last = None;

    for name in candidates.names() {
        // SAFETY: loading a graphics driver runs its initializers; the
        // candidates are well-known system libraries.
        match unsafe { libloading::Library::new(name) } {
            Ok(library) => {
                log::debug!("loaded {name}");
                return Ok(LoadedLibrary {
                    name: name.to_owned(),
                    library,
                });
            }
            Err(err) => {
                log::trace!("{name}: {err}");
                last = Some(err);
            }
        }
    }

    Err(LoadError::NotFound {
        tried: candidates.names().map(str::to_owned).collect(),
        last,
    })
}
