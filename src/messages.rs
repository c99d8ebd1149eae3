use crate::consts;
use crate::keycode::KeyCode;
use crate::keymap::Keymap;

pub struct Messages {}

impl Messages {
    /// Signals host presence; sent when the sequence starts and again
    /// right before disconnecting
    ///
    pub fn keepalive() -> Vec<u8> {
        vec![0x03, 0x07, 0xe3]
    }

    /// Clears the on-board mapping table before new chunks are written
    ///
    pub fn reset() -> Vec<u8> {
        vec![0x03, 0x05, 0x80, 0x04, 0xff]
    }

    /// Commits the written mapping to nvram
    ///
    pub fn save() -> Vec<u8> {
        vec![0x03, 0x05, 0x82]
    }

    /// Sent when the host is done talking to the device
    ///
    pub fn disconnect() -> Vec<u8> {
        vec![0x03, 0x19, 0x88]
    }

    /// Write command carrying one encoded chunk of the keymap
    ///
    /// # Arguments
    /// `index` - The chunk index, 0 to [`consts::NUM_CHUNKS`] - 1
    /// `chunk` - The encoded chunk, see [`Messages::chunks`]
    ///
    pub fn write_chunk(index: u8, chunk: &[u8]) -> Vec<u8> {
        let mut msg = vec![0x03, 0x05, 0x81, 0x0f, 0x00, 0x00, index];
        msg.extend_from_slice(chunk);
        msg
    }

    /// Acknowledgement the device must echo for every write command,
    /// after trailing zero padding has been stripped. The chunk index is
    /// not echoed back.
    ///
    pub fn write_ack() -> Vec<u8> {
        vec![0x83, 0x05, 0x81, 0x0f, 0x00, 0x00, 0x00, 0x68]
    }

    /// Serializes key codes as consecutive big-endian u32 values. Only
    /// the low byte is ever populated for named keys, the firmware wants
    /// the codes widened anyway.
    pub fn encode_chunk(codes: &[KeyCode]) -> Vec<u8> {
        let mut data = Vec::with_capacity(codes.len() * 4);
        for code in codes {
            data.extend_from_slice(&code.value().to_be_bytes());
        }
        data
    }

    /// Splits a keymap into the encoded chunks for the write commands:
    /// [`consts::NUM_CHUNKS`] groups of [`consts::CHUNK_KEYS`] codes, the
    /// last group holding only six. The final chunk additionally gets the
    /// fixed [`consts::TRAILER`] appended, byte for byte what the stock
    /// software sends.
    pub fn chunks(keymap: &Keymap) -> Vec<Vec<u8>> {
        let mut chunks: Vec<Vec<u8>> = keymap
            .codes()
            .chunks(consts::CHUNK_KEYS)
            .map(Self::encode_chunk)
            .collect();
        if let Some(last) = chunks.last_mut() {
            last.extend_from_slice(&consts::TRAILER);
        }
        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::Messages;
    use crate::consts;
    use crate::keycode::{KeyCode, KeyName};
    use crate::keymap::Keymap;

    fn test_keymap() -> Keymap {
        let mut codes = vec![KeyCode::Named(KeyName::A); consts::NUM_KEYS];
        codes[0] = KeyCode::Named(KeyName::LCtrl);
        codes[125] = KeyCode::Named(KeyName::Space);
        Keymap::new(codes).unwrap()
    }

    #[test]
    fn control_commands() {
        assert_eq!(Messages::keepalive(), vec![0x03, 0x07, 0xe3]);
        assert_eq!(Messages::reset(), vec![0x03, 0x05, 0x80, 0x04, 0xff]);
        assert_eq!(Messages::save(), vec![0x03, 0x05, 0x82]);
        assert_eq!(Messages::disconnect(), vec![0x03, 0x19, 0x88]);
    }

    #[test]
    fn chunk_codes_are_big_endian() {
        let data = Messages::encode_chunk(&[
            KeyCode::Named(KeyName::Enter),
            KeyCode::Raw(0xdeadbeef),
        ]);
        assert_eq!(
            data,
            vec![0x00, 0x00, 0x00, 0x28, 0xde, 0xad, 0xbe, 0xef]
        );
    }

    #[test]
    fn write_command_layout() {
        let chunk = Messages::encode_chunk(&[KeyCode::Named(KeyName::A); 8]);
        let msg = Messages::write_chunk(3, &chunk);
        assert_eq!(&msg[..7], &[0x03, 0x05, 0x81, 0x0f, 0x00, 0x00, 0x03]);
        assert_eq!(msg.len(), 7 + 32, "checking msg size");
        assert_eq!(msg[10], 0x04, "first key code");
    }

    #[test]
    fn keymap_splits_into_sixteen_chunks() {
        let chunks = Messages::chunks(&test_keymap());
        assert_eq!(chunks.len(), consts::NUM_CHUNKS);
        for chunk in &chunks[..15] {
            assert_eq!(chunk.len(), 32, "full chunk size");
        }
        // six codes plus the trailer
        assert_eq!(chunks[15].len(), 28, "final chunk size");
    }

    #[test]
    fn final_chunk_ends_with_trailer() {
        let chunks = Messages::chunks(&test_keymap());
        let last = &chunks[15];
        assert_eq!(&last[last.len() - 4..], &consts::TRAILER);
        // the six real codes are still in front of it
        assert_eq!(&last[20..24], &[0x00, 0x00, 0x00, 0x2c], "Space");
    }

    /// Full path from a tab separated file to the wire chunks
    #[test]
    fn end_to_end_encoding() -> anyhow::Result<()> {
        let mut tokens = vec!["LShift"];
        tokens.extend(std::iter::repeat("a").take(124));
        tokens.push("Enter");
        let text = tokens
            .chunks(consts::ROW_LENGTH)
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n");

        let keymap = Keymap::from_reader(text.as_bytes())?;
        let chunks = Messages::chunks(&keymap);
        assert_eq!(chunks.len(), consts::NUM_CHUNKS);
        assert_eq!(&chunks[0][..4], &[0x00, 0x00, 0x00, 0xe1], "LShift first");
        assert_eq!(&chunks[15][24..], &consts::TRAILER);
        Ok(())
    }
}
