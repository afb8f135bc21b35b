use anyhow::Result;
use eglprobe_engine::backend::{Backend, CAPABILITIES};
use eglprobe_engine::device::ContextInit;
use eglprobe_engine::logging::{LoggingConfig, init_logging};
use eglprobe_engine::platform;

fn main() -> Result<()> {
    // SAFETY: first statement of main; no other threads exist yet.
    unsafe { platform::select_offscreen_platform() };
    init_logging(LoggingConfig::default());

    let init = ContextInit::from_env();
    let mut backend = Backend::probe(&init)?;
    if !backend.status().available {
        log::warn!("no usable EGL library; nothing to probe");
        return Ok(());
    }

    for (feature, supported) in CAPABILITIES {
        log::debug!("{feature}: {supported}");
    }

    let ctx = backend.bootstrap(&init)?;
    log::debug!("backend status: {:?}", backend.status());

    ctx.write_renderer_info(&mut std::io::stdout().lock())?;
    println!("done.");
    Ok(())
}
