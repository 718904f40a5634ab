use crate::error::Result;

/// The HID operations a Finch session needs from its transport.
///
/// Releasing the device is done by dropping the value.
pub trait HidTransport {
    /// Writes one output report. `data[0]` is the report id.
    ///
    /// Returns the number of bytes the transport accepted, which may be zero.
    fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// Reads one input report into `buf`, waiting at most `timeout_ms`.
    ///
    /// Returns `Ok(0)` and leaves `buf` untouched when nothing arrived in time.
    fn read_timeout(&mut self, buf: &mut [u8], timeout_ms: i32) -> Result<usize>;
}

impl<T: HidTransport + ?Sized> HidTransport for &mut T {
    fn write(&mut self, data: &[u8]) -> Result<usize> {
        (**self).write(data)
    }

    fn read_timeout(&mut self, buf: &mut [u8], timeout_ms: i32) -> Result<usize> {
        (**self).read_timeout(buf, timeout_ms)
    }
}

impl<T: HidTransport + ?Sized> HidTransport for Box<T> {
    fn write(&mut self, data: &[u8]) -> Result<usize> {
        (**self).write(data)
    }

    fn read_timeout(&mut self, buf: &mut [u8], timeout_ms: i32) -> Result<usize> {
        (**self).read_timeout(buf, timeout_ms)
    }
}

#[cfg(feature = "hidapi")]
mod hid {
    use hidapi::{HidApi, HidDevice};
    use log::debug;

    use super::HidTransport;
    use crate::config::Config;
    use crate::constants::{PRODUCT_ID, VENDOR_ID};
    use crate::error::{Error, Result};
    use crate::Finch;

    impl HidTransport for HidDevice {
        fn write(&mut self, data: &[u8]) -> Result<usize> {
            HidDevice::write(self, data).map_err(|e| Error::WriteFailure(e.to_string()))
        }

        fn read_timeout(&mut self, buf: &mut [u8], timeout_ms: i32) -> Result<usize> {
            HidDevice::read_timeout(self, buf, timeout_ms)
                .map_err(|e| Error::ReadFailure(e.to_string()))
        }
    }

    /// Opens the first HID device matching the Finch vendor and product ids.
    pub(crate) fn open_device() -> Result<HidDevice> {
        let api = HidApi::new().map_err(|e| Error::OpenFailure(e.to_string()))?;

        let present = api
            .device_list()
            .any(|info| info.vendor_id() == VENDOR_ID && info.product_id() == PRODUCT_ID);
        if !present {
            debug!(
                "No HID device with VID {:04X} PID {:04X}",
                VENDOR_ID, PRODUCT_ID
            );
            return Err(Error::DeviceNotFound);
        }

        api.open(VENDOR_ID, PRODUCT_ID)
            .map_err(|e| Error::OpenFailure(e.to_string()))
    }

    impl Finch<HidDevice> {
        /// Connects to the Finch with the default configuration.
        pub fn open() -> Result<Self> {
            Self::open_with_config(Config::default())
        }

        /// Connects to the Finch.
        ///
        /// Fails with `Error::DeviceNotFound` if no Finch is plugged in and
        /// `Error::OpenFailure` if the HID layer refuses to open it.
        pub fn open_with_config(config: Config) -> Result<Self> {
            let device = open_device()?;
            debug!("Opened Finch {:04X}:{:04X}", VENDOR_ID, PRODUCT_ID);
            Ok(Finch::new(device, config))
        }
    }
}
