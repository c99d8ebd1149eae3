use crate::consts;
use crate::keymap::Keymap;
use crate::messages::Messages;

use super::{Framing, Transport};

use anyhow::{ensure, Result};
use log::{debug, info};

/// Protocol driver for the Taurus K320.
///
/// The firmware accepts exactly one ordered command stream per run:
/// keepalive, reset, sixteen write commands, save, keepalive, disconnect.
/// It processes one frame at a time, so every write must be acknowledged
/// before the next one goes out. Nothing is retried; a bad
/// acknowledgement aborts the run on the spot, which can leave the
/// device partially reprogrammed.
pub struct KeyboardK320<T> {
    transport: T,
    framing: Framing,
}

impl<T: Transport> KeyboardK320<T> {
    pub fn new(transport: T, framing: Framing) -> Self {
        Self { transport, framing }
    }

    /// Runs the full reprogram sequence for `keymap`.
    pub fn program(&mut self, keymap: &Keymap) -> Result<()> {
        let chunks = Messages::chunks(keymap);

        self.send(&Messages::keepalive())?;
        self.send(&Messages::reset())?;

        for (i, chunk) in chunks.iter().enumerate() {
            let resp = self.send(&Messages::write_chunk(i.try_into()?, chunk))?;
            ensure!(
                resp == Messages::write_ack(),
                "bad response to write command {i}: {resp:02x?}"
            );
        }

        self.send(&Messages::save())?;
        self.send(&Messages::keepalive())?;
        self.send(&Messages::disconnect())?;

        info!("keymap written and saved");
        Ok(())
    }

    /// One command round trip: frame and write, then read the response
    /// with its trailing zero padding stripped. Responses to control
    /// commands are only logged; the caller validates write
    /// acknowledgements.
    fn send(&mut self, cmd: &[u8]) -> Result<Vec<u8>> {
        self.transport.write(&self.framing.frame(cmd))?;

        let mut buf = vec![0u8; consts::PACKET_SIZE];
        let read = self.transport.read(&mut buf, consts::TIMEOUT)?;
        buf.truncate(read);
        while buf.last() == Some(&0) {
            buf.pop();
        }
        debug!("<- {:02x?}", buf);
        Ok(buf)
    }
}
