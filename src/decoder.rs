use crate::consts;
use crate::keycode::KeyCode;

pub struct Decoder {}

impl Decoder {
    /// Recovers the flat code sequence from encoded write chunks, for
    /// diagnostic display only (never fed back to the device). Each chunk
    /// is read as up to [`consts::CHUNK_KEYS`] big-endian u32 groups, so
    /// the trailer of the final chunk shows up as one extra raw value.
    pub fn decode_chunks(chunks: &[Vec<u8>]) -> Vec<KeyCode> {
        let mut codes = Vec::new();
        for chunk in chunks {
            let n = consts::CHUNK_KEYS.min(chunk.len() / 4);
            for group in chunk.chunks_exact(4).take(n) {
                let value = u32::from_be_bytes([group[0], group[1], group[2], group[3]]);
                codes.push(KeyCode::from_value(value));
            }
        }
        codes
    }
}

#[cfg(test)]
mod tests {
    use super::Decoder;
    use crate::consts;
    use crate::keycode::{KeyCode, KeyName};
    use crate::keymap::Keymap;
    use crate::messages::Messages;
    use strum::IntoEnumIterator as _;

    #[test]
    fn decode_reproduces_the_keymap() -> anyhow::Result<()> {
        // cycle through every named key plus some raw codes
        let names: Vec<KeyName> = KeyName::iter().collect();
        let codes: Vec<KeyCode> = (0..consts::NUM_KEYS)
            .map(|i| {
                if i % 10 == 9 {
                    KeyCode::Raw(0xdd)
                } else {
                    KeyCode::Named(names[i % names.len()])
                }
            })
            .collect();
        let keymap = Keymap::new(codes.clone())?;

        let decoded = Decoder::decode_chunks(&Messages::chunks(&keymap));

        // everything round-trips; the trailer slot comes out as one extra
        // raw value at the end
        assert_eq!(decoded.len(), consts::NUM_KEYS + 1);
        assert_eq!(&decoded[..consts::NUM_KEYS], &codes[..]);
        assert_eq!(decoded[consts::NUM_KEYS], KeyCode::Raw(0x78563412));
        Ok(())
    }

    #[test]
    fn short_chunks_decode_whole_groups_only() {
        // 7 bytes: one full group, the dangling tail is dropped
        let chunks = vec![vec![0x00, 0x00, 0x00, 0x28, 0xff, 0xff, 0xff]];
        let decoded = Decoder::decode_chunks(&chunks);
        assert_eq!(decoded, vec![KeyCode::Named(KeyName::Enter)]);
    }
}
