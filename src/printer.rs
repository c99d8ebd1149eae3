use crate::consts;
use crate::keycode::KeyCode;

use itertools::Itertools as _;

pub struct Printer {}

impl Printer {
    /// Renders key codes as the physical key grid, [`consts::ROW_LENGTH`]
    /// positions per row, names right-aligned like the stock software
    /// prints them.
    pub fn grid(codes: &[KeyCode]) -> String {
        let mut out = String::new();
        for row in &codes.iter().chunks(consts::ROW_LENGTH) {
            let line = row.map(|code| format!("{:>10}", code.to_string())).join("\t");
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::Printer;
    use crate::consts;
    use crate::keycode::{KeyCode, KeyName};

    #[test]
    fn grid_wraps_at_row_length() {
        let codes = vec![KeyCode::Named(KeyName::A); consts::ROW_LENGTH + 1];
        let grid = Printer::grid(&codes);
        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].split('\t').count(), consts::ROW_LENGTH);
        assert_eq!(lines[1].split('\t').count(), 1);
    }

    #[test]
    fn cells_show_name_or_hex() {
        let codes = vec![KeyCode::Named(KeyName::Enter), KeyCode::Raw(0xdd)];
        let grid = Printer::grid(&codes);
        assert_eq!(grid, format!("{:>10}\t{:>10}\n", "Enter", "ddh"));
    }
}
