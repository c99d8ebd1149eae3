use crate::consts;
use crate::keycode::KeyCode;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, ensure, Context, Result};

/// Full keymap of the keyboard: one code per physical key position, in
/// row-major order matching the physical layout. Always exactly
/// [`consts::NUM_KEYS`] entries; anything else is rejected before any
/// device traffic happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap(Vec<KeyCode>);

impl Keymap {
    pub fn new(codes: Vec<KeyCode>) -> Result<Self> {
        ensure!(
            codes.len() == consts::NUM_KEYS,
            "keymap has {} keys, expected {} - invalid file?",
            codes.len(),
            consts::NUM_KEYS
        );
        Ok(Self(codes))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("open keymap file {}", path.display()))?;
        Self::from_reader(BufReader::new(file))
    }

    /// Reads the tab separated keymap format: key names or `<hex>h`
    /// literals, [`consts::NUM_KEYS`] tokens in total.
    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        let mut codes = Vec::with_capacity(consts::NUM_KEYS);
        for (line_nr, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("read keymap line {line_nr}"))?;
            let mut fields: Vec<&str> = line.split('\t').collect();
            // ignore tailing tabs (useful when reformatting)
            while fields.last() == Some(&"") {
                fields.pop();
            }
            for field in fields {
                let token = field.trim();
                let code = KeyCode::from_str(token)
                    .map_err(|_| anyhow!("[{line_nr}]: invalid key '{token}'"))?;
                codes.push(code);
            }
        }
        Self::new(codes)
    }

    pub fn codes(&self) -> &[KeyCode] {
        &self.0
    }
}
