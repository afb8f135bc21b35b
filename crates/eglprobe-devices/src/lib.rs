//! EGL device enumeration by driving a helper executable.
//!
//! The helper (`EGL_options.o` by default) prints a diagnostic such as
//! `"egl-options: using device 0 of 2 available EGL devices"` on stderr. This
//! crate reads the count from it, then reruns the helper once per device with
//! `EGL_VISIBLE_DEVICE` set.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`diag`] | `parse_device_count` |
//! | [`error`] | `DiagnosticError` |
//! | [`helper`] | `HelperConfig`, `Launcher`, `ProcessLauncher` |
//! | [`enumerate`] | `enumerate_devices` |
//!
//! # Quick start
//!
//! ```rust
//! use eglprobe_devices::parse_device_count;
//!
//! assert_eq!(parse_device_count("Found 3 of 9 devices").unwrap(), 9);
//! assert!(parse_device_count("no devices").is_err());
//! ```

pub mod diag;
pub mod enumerate;
pub mod error;
pub mod helper;

pub use diag::parse_device_count;
pub use enumerate::enumerate_devices;
pub use error::DiagnosticError;
pub use helper::{HelperConfig, Launcher, ProcessLauncher};
