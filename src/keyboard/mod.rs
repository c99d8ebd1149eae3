pub(crate) mod k320;

use crate::consts;

use std::time::Duration;

use anyhow::{ensure, Context as _, Result};
use log::debug;
use rusb::{Context, DeviceHandle, Error::Timeout};
use strum_macros::Display;

/// Where the HID report id byte lives on the wire.
///
/// The stock software bakes a leading zero byte into every command
/// literal and ships 64 byte frames; other firmware revisions want the
/// report id supplied by the transport ahead of the full 64 byte payload
/// (65 bytes on the wire). Same commands either way, only the framing
/// differs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display, clap::ValueEnum)]
#[strum(serialize_all = "lowercase")]
pub enum Framing {
    /// report id is the first byte of the 64 byte frame
    #[default]
    Embedded,
    /// report id is prepended to the padded 64 byte payload
    Prefixed,
}

impl Framing {
    /// Pads a command with zero bytes up to the fixed frame size and
    /// places the report id according to the variant.
    pub fn frame(&self, cmd: &[u8]) -> Vec<u8> {
        let mut msg = match self {
            Framing::Embedded => {
                let mut msg = vec![consts::REPORT_ID];
                msg.extend_from_slice(cmd);
                msg
            }
            Framing::Prefixed => cmd.to_vec(),
        };
        msg.resize(consts::PACKET_SIZE, 0);
        if let Framing::Prefixed = self {
            msg.insert(0, consts::REPORT_ID);
        }
        msg
    }
}

/// Raw HID channel the protocol driver talks through. Production code
/// uses [`UsbTransport`]; driver tests substitute a scripted stub.
pub trait Transport {
    fn write(&mut self, msg: &[u8]) -> Result<()>;

    /// Reads one response frame. A timeout is not an error, it simply
    /// yields zero bytes.
    fn read(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize>;
}

/// Interrupt transfers on the claimed HID interface of the keyboard. The
/// interface is handed back to the kernel on drop, on every exit path.
pub struct UsbTransport {
    handle: DeviceHandle<Context>,
    interface: u8,
    out_endpoint: u8,
    in_endpoint: u8,
}

impl UsbTransport {
    pub fn new(
        handle: DeviceHandle<Context>,
        interface: u8,
        out_endpoint: u8,
        in_endpoint: u8,
    ) -> Self {
        Self {
            handle,
            interface,
            out_endpoint,
            in_endpoint,
        }
    }
}

impl Transport for UsbTransport {
    fn write(&mut self, msg: &[u8]) -> Result<()> {
        debug!("-> {:02x?}", msg);
        let written = self
            .handle
            .write_interrupt(self.out_endpoint, msg, consts::TIMEOUT)
            .context("write interrupt")?;
        ensure!(written == msg.len(), "not all data written");
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        match self.handle.read_interrupt(self.in_endpoint, buf, timeout) {
            Ok(read) => Ok(read),
            Err(Timeout) => {
                debug!("timeout on read");
                Ok(0)
            }
            Err(e) => Err(e).context("read interrupt"),
        }
    }
}

impl Drop for UsbTransport {
    fn drop(&mut self) {
        let _ = self.handle.release_interface(self.interface);
    }
}

#[cfg(test)]
mod tests {
    use super::Framing;
    use crate::consts;
    use crate::messages::Messages;

    #[test]
    fn embedded_framing_is_64_bytes() {
        let frame = Framing::Embedded.frame(&Messages::keepalive());
        assert_eq!(frame.len(), consts::PACKET_SIZE);
        assert_eq!(&frame[..4], &[0x00, 0x03, 0x07, 0xe3]);
        assert!(frame[4..].iter().all(|b| *b == 0), "zero padded");
    }

    #[test]
    fn prefixed_framing_is_65_bytes() {
        let frame = Framing::Prefixed.frame(&Messages::keepalive());
        assert_eq!(frame.len(), consts::PACKET_SIZE + 1);
        assert_eq!(&frame[..4], &[0x00, 0x03, 0x07, 0xe3]);
        assert!(frame[4..].iter().all(|b| *b == 0), "zero padded");
    }
}
