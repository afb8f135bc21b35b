//! Helper for `list-egl-devices`: reports the device count on stderr and
//! describes the device chosen by `EGL_VISIBLE_DEVICE` on stdout.

use std::rc::Rc;

use anyhow::Result;
use eglprobe_engine::device::{
    ContextInit, DeviceEnumeration, Egl, VISIBLE_DEVICE_ENV, device_diagnostic,
    parse_visible_device, select_device,
};
use eglprobe_engine::logging::{LoggingConfig, init_logging};

fn main() -> Result<()> {
    // stderr carries the device-count diagnostic; keep other output off it.
    init_logging(LoggingConfig::quiet());

    let init = ContextInit::from_env();
    let egl = Rc::new(Egl::load(&init.egl_libraries)?);
    let enumeration = DeviceEnumeration::new(Rc::clone(&egl))?;
    let devices = enumeration.devices()?;

    let selected = parse_visible_device(std::env::var(VISIBLE_DEVICE_ENV).ok().as_deref())?;
    eprintln!("{}", device_diagnostic(selected, devices.len()));

    let device = select_device(&devices, selected)?;
    println!("device: {}", device.index);
    if let Some(node) = &device.drm_node {
        println!("DRM node: {node}");
    }

    let ctx = enumeration.open_context(device, &init)?;
    let (major, minor) = ctx.egl_version();
    println!("EGL version: {major}.{minor}");
    if let Some(vendor) = ctx.egl_vendor() {
        println!("EGL vendor: {vendor}");
    }
    if let Some(apis) = ctx.client_apis() {
        println!("client APIs: {apis}");
    }
    ctx.write_renderer_info(&mut std::io::stdout().lock())?;
    Ok(())
}
