//! EGL display, pbuffer surface and OpenGL context management.
//!
//! This module is responsible for:
//! - loading the EGL and OpenGL entry points from the system libraries
//! - bringing up an off-screen context (display, config, pbuffer, context)
//! - listing EGL devices and opening a context on a specific one

mod context;
pub mod egl;
mod enumeration;
mod error;
mod gl;
mod init;

pub use context::OffscreenContext;
pub use egl::Egl;
pub use enumeration::{
    DeviceEnumeration, EglDevice, VISIBLE_DEVICE_ENV, device_diagnostic, parse_visible_device,
    select_device,
};
pub use error::EglError;
pub use init::{ConfigRequest, ContextInit, EGL_LIBRARY_ENV, GL_LIBRARY_ENV};
