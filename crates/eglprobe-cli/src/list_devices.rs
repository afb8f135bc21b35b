use anyhow::Result;
use eglprobe_devices::{HelperConfig, ProcessLauncher, enumerate_devices};
use eglprobe_engine::logging::{LoggingConfig, init_logging};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = HelperConfig::from_env();
    log::debug!("helper: {}", config.executable.display());

    let mut launcher = ProcessLauncher::new(config);
    let stdout = std::io::stdout();
    enumerate_devices(&mut launcher, &mut stdout.lock())?;
    Ok(())
}
