//! Process-level selection of the off-screen binding.

/// Variable read by OpenGL binding layers to pick their windowing backend.
pub const PLATFORM_ENV: &str = "PYOPENGL_PLATFORM";

/// Value selecting the EGL (off-screen) backend.
pub const OFFSCREEN_PLATFORM: &str = "egl";

/// Exports [`PLATFORM_ENV`]=[`OFFSCREEN_PLATFORM`] so this process and every
/// child it spawns use the off-screen binding.
///
/// # Safety
///
/// Mutates the process environment; call before any other thread exists and
/// before any graphics library is loaded.
pub unsafe fn select_offscreen_platform() {
    // SAFETY: upheld by the caller.
    unsafe { std::env::set_var(PLATFORM_ENV, OFFSCREEN_PLATFORM) };
    log::debug!("{PLATFORM_ENV}={OFFSCREEN_PLATFORM}");
}
