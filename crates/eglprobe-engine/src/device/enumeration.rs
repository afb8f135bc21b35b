//! Device discovery through `EGL_EXT_device_enumeration`.

use std::ffi::{CStr, c_void};
use std::rc::Rc;

use anyhow::{Context, Result, bail};
use glutin_egl_sys::egl;
use glutin_egl_sys::egl::types::{EGLDeviceEXT, EGLint};

use super::egl::{Egl, has_extension};
use super::{ContextInit, EglError, OffscreenContext};

/// Environment variable selecting the device the helper reports on.
pub const VISIBLE_DEVICE_ENV: &str = "EGL_VISIBLE_DEVICE";

/// One enumerated EGL device.
#[derive(Debug, Clone)]
pub struct EglDevice {
    pub index: usize,

    /// DRM node (e.g. `/dev/dri/card0`) when the driver exposes one.
    pub drm_node: Option<String>,

    handle: EGLDeviceEXT,
}

/// Lists EGL devices and opens a platform display on each.
pub struct DeviceEnumeration {
    egl: Rc<Egl>,
}

impl DeviceEnumeration {
    /// Checks that the EGL client exposes the device extensions.
    pub fn new(egl: Rc<Egl>) -> Result<Self> {
        let extensions = egl
            .query_string(egl::NO_DISPLAY, egl::EXTENSIONS)
            .context("EGL does not report client extensions")?;
        log::debug!("client extensions: {extensions}");

        for required in ["EGL_EXT_device_enumeration", "EGL_EXT_platform_device"] {
            // EGL_EXT_device_base bundles enumeration with the device query.
            if !has_extension(&extensions, required)
                && !(required == "EGL_EXT_device_enumeration"
                    && has_extension(&extensions, "EGL_EXT_device_base"))
            {
                bail!("EGL client extension {required} is not supported");
            }
        }

        let api = egl.api();
        if !api.QueryDevicesEXT.is_loaded() {
            bail!("eglQueryDevicesEXT is missing");
        }
        if !api.GetPlatformDisplayEXT.is_loaded() {
            bail!("eglGetPlatformDisplayEXT is missing");
        }

        Ok(Self { egl })
    }

    /// Lists every device in driver order.
    pub fn devices(&self) -> Result<Vec<EglDevice>> {
        let api = self.egl.api();

        let mut count: EGLint = 0;
        // SAFETY: a zero-sized query only writes the count.
        let ok = unsafe { api.QueryDevicesEXT(0, std::ptr::null_mut(), &mut count) };
        if ok == egl::FALSE {
            return Err(self.egl.fail("eglQueryDevicesEXT").into());
        }

        let mut handles: Vec<EGLDeviceEXT> = Vec::with_capacity(usize::try_from(count)?);
        // SAFETY: the buffer has room for `count` entries and the driver
        // reports how many it wrote.
        unsafe {
            let ok = api.QueryDevicesEXT(count, handles.as_mut_ptr(), &mut count);
            if ok == egl::FALSE {
                return Err(self.egl.fail("eglQueryDevicesEXT").into());
            }
            handles.set_len(usize::try_from(count)?.min(handles.capacity()));
        }

        Ok(handles
            .into_iter()
            .enumerate()
            .map(|(index, handle)| EglDevice {
                index,
                drm_node: self.device_string(handle, egl::DRM_DEVICE_FILE_EXT as EGLint),
                handle,
            })
            .collect())
    }

    /// Opens the device's platform display and bootstraps a context on it.
    pub fn open_context(&self, device: &EglDevice, init: &ContextInit) -> Result<OffscreenContext> {
        // SAFETY: the handle came from eglQueryDevicesEXT on this library.
        let display = unsafe {
            self.egl.api().GetPlatformDisplayEXT(
                egl::PLATFORM_DEVICE_EXT,
                device.handle as *mut c_void,
                std::ptr::null(),
            )
        };
        if display == egl::NO_DISPLAY {
            return Err(EglError::new("eglGetPlatformDisplayEXT", self.egl.error_code()))
                .with_context(|| format!("failed to open display for device {}", device.index));
        }

        OffscreenContext::on_display(Rc::clone(&self.egl), display, init)
            .with_context(|| format!("failed to bootstrap device {}", device.index))
    }

    fn device_string(&self, device: EGLDeviceEXT, name: EGLint) -> Option<String> {
        let api = self.egl.api();
        if !api.QueryDeviceStringEXT.is_loaded() {
            return None;
        }
        // SAFETY: device came from eglQueryDevicesEXT.
        let raw = unsafe { api.QueryDeviceStringEXT(device, name) };
        if raw.is_null() {
            // Unsupported names set EGL_BAD_PARAMETER; clear it.
            let _ = self.egl.error_code();
            return None;
        }
        // SAFETY: non-null device strings are NUL-terminated and static.
        Some(unsafe { CStr::from_ptr(raw) }.to_string_lossy().into_owned())
    }
}

/// Parses the value of [`VISIBLE_DEVICE_ENV`]; unset selects device 0.
pub fn parse_visible_device(value: Option<&str>) -> Result<usize> {
    match value.map(str::trim) {
        None | Some("") => Ok(0),
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{VISIBLE_DEVICE_ENV}={raw:?} is not a device index")),
    }
}

/// Picks the device at `selected`, reporting the total in the error.
pub fn select_device(devices: &[EglDevice], selected: usize) -> Result<&EglDevice> {
    devices.get(selected).with_context(|| {
        format!("device {selected} requested but only {} enumerated", devices.len())
    })
}

/// One-line stderr diagnostic that the enumerator parses (`… of N …`).
pub fn device_diagnostic(selected: usize, total: usize) -> String {
    format!("egl-options: using device {selected} of {total} available EGL devices")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake(index: usize) -> EglDevice {
        EglDevice {
            index,
            drm_node: None,
            handle: std::ptr::null_mut::<c_void>() as EGLDeviceEXT,
        }
    }

    #[test]
    fn visible_device_defaults_to_zero() {
        assert_eq!(parse_visible_device(None).unwrap(), 0);
        assert_eq!(parse_visible_device(Some("")).unwrap(), 0);
    }

    #[test]
    fn visible_device_parses_index() {
        assert_eq!(parse_visible_device(Some("2")).unwrap(), 2);
        assert_eq!(parse_visible_device(Some(" 11\n")).unwrap(), 11);
    }

    #[test]
    fn visible_device_rejects_garbage() {
        let err = parse_visible_device(Some("gpu1")).unwrap_err();
        assert!(err.to_string().contains("EGL_VISIBLE_DEVICE"));
        assert!(parse_visible_device(Some("-1")).is_err());
    }

    #[test]
    fn select_device_in_range() {
        let devices = [fake(0), fake(1)];
        assert_eq!(select_device(&devices, 1).unwrap().index, 1);
    }

    #[test]
    fn select_device_out_of_range() {
        let devices = [fake(0)];
        let err = select_device(&devices, 3).unwrap_err();
        assert_eq!(err.to_string(), "device 3 requested but only 1 enumerated");
    }

    #[test]
    fn diagnostic_has_exactly_one_marker() {
        let text = device_diagnostic(1, 4);
        assert_eq!(text.matches(" of ").count(), 1);
        assert!(text.contains(" of 4 "));
    }
}
