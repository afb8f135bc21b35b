//! eglprobe engine crate.
//!
//! Loads EGL at runtime, brings up an off-screen OpenGL context backed by a
//! pbuffer and enumerates EGL devices.

pub mod backend;
pub mod device;
pub mod loader;
pub mod logging;
pub mod platform;
