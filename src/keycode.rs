use crate::parse;

use std::{fmt::Display, str::FromStr};

use num::{FromPrimitive as _, ToPrimitive as _};
use num_derive::{FromPrimitive, ToPrimitive};
use strum_macros::{Display, EnumIter, EnumString};

/// Named subset of the HID usage codes the keyboard firmware knows about.
///
/// Code values follow the HID usage table for the keyboard page. The two
/// codes the stock software both labels "Roll" are kept apart here as
/// `Roll` (0x47) and `Break` (0x48). Digit 0 has no entry, the contiguous
/// digit run only covers 1-9; use the raw `27h` literal for that key.
#[derive(
    Debug, FromPrimitive, ToPrimitive, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, Display,
)]
#[repr(u8)]
#[strum(ascii_case_insensitive)]
pub enum KeyName {
    #[strum(serialize = "a")]
    A = 0x04,
    #[strum(serialize = "b")]
    B,
    #[strum(serialize = "c")]
    C,
    #[strum(serialize = "d")]
    D,
    #[strum(serialize = "e")]
    E,
    #[strum(serialize = "f")]
    F,
    #[strum(serialize = "g")]
    G,
    #[strum(serialize = "h")]
    H,
    #[strum(serialize = "i")]
    I,
    #[strum(serialize = "j")]
    J,
    #[strum(serialize = "k")]
    K,
    #[strum(serialize = "l")]
    L,
    #[strum(serialize = "m")]
    M,
    #[strum(serialize = "n")]
    N,
    #[strum(serialize = "o")]
    O,
    #[strum(serialize = "p")]
    P,
    #[strum(serialize = "q")]
    Q,
    #[strum(serialize = "r")]
    R,
    #[strum(serialize = "s")]
    S,
    #[strum(serialize = "t")]
    T,
    #[strum(serialize = "u")]
    U,
    #[strum(serialize = "v")]
    V,
    #[strum(serialize = "w")]
    W,
    #[strum(serialize = "x")]
    X,
    #[strum(serialize = "y")]
    Y,
    #[strum(serialize = "z")]
    Z,
    #[strum(serialize = "1")]
    N1 = 0x1e,
    #[strum(serialize = "2")]
    N2,
    #[strum(serialize = "3")]
    N3,
    #[strum(serialize = "4")]
    N4,
    #[strum(serialize = "5")]
    N5,
    #[strum(serialize = "6")]
    N6,
    #[strum(serialize = "7")]
    N7,
    #[strum(serialize = "8")]
    N8,
    #[strum(serialize = "9")]
    N9,
    Enter = 0x28,
    Backspace = 0x2a,
    Tab = 0x2b,
    Space = 0x2c,
    CapsLock = 0x39,
    #[strum(serialize = "f1")]
    F1 = 0x3a,
    #[strum(serialize = "f2")]
    F2,
    #[strum(serialize = "f3")]
    F3,
    #[strum(serialize = "f4")]
    F4,
    #[strum(serialize = "f5")]
    F5,
    #[strum(serialize = "f6")]
    F6,
    #[strum(serialize = "f7")]
    F7,
    #[strum(serialize = "f8")]
    F8,
    #[strum(serialize = "f9")]
    F9,
    #[strum(serialize = "f10")]
    F10,
    #[strum(serialize = "f11")]
    F11,
    #[strum(serialize = "f12")]
    F12,
    Print = 0x46,
    Roll = 0x47,
    Break = 0x48,
    Insert = 0x49,
    #[strum(to_string = "Home", serialize = "Pos1")]
    Home = 0x4a,
    PageUp = 0x4b,
    Delete = 0x4c,
    End = 0x4d,
    PageDown = 0x4e,
    Right = 0x4f,
    Left = 0x50,
    Down = 0x51,
    Up = 0x52,
    LCtrl = 0xe0,
    LShift = 0xe1,
    LAlt = 0xe2,
    LWindows = 0xe3,
    RCtrl = 0xe4,
    RShift = 0xe5,
    RAlt = 0xe6,
    RWindows = 0xe7,
}

/// One key position's code: either a named table entry or a raw HID
/// usage code that has no name in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Named(KeyName),
    Raw(u32),
}

impl KeyCode {
    /// The numeric value that goes on the wire
    pub fn value(&self) -> u32 {
        match self {
            KeyCode::Named(name) => name.to_u32().unwrap(),
            KeyCode::Raw(code) => *code,
        }
    }

    /// Prefers the table name when one exists for the value
    pub fn from_value(value: u32) -> Self {
        match KeyName::from_u32(value) {
            Some(name) => KeyCode::Named(name),
            None => KeyCode::Raw(value),
        }
    }
}

impl From<KeyName> for KeyCode {
    fn from(name: KeyName) -> Self {
        Self::Named(name)
    }
}

impl Display for KeyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyCode::Named(name) => write!(f, "{}", name),
            KeyCode::Raw(code) => write!(f, "{:02x}h", code),
        }
    }
}

impl FromStr for KeyCode {
    type Err = nom::error::Error<String>;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        parse::from_str(parse::key, s)
    }
}
