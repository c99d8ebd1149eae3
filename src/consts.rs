use std::time::Duration;

pub const VENDOR_ID: u16 = 0x2f68;

/// DURGOD Taurus K320
pub const PRODUCT_ID: u16 = 0x0082;

/// The keymap is programmed through the third HID interface
pub const INTERFACE_NUMBER: u8 = 2;

/// Timeout for one USB transfer
///
pub const TIMEOUT: Duration = Duration::from_millis(500);

/// Size of one protocol frame (in bytes), report id not included
///
pub const PACKET_SIZE: usize = 64;

/// HID report id, constant for this device
///
pub const REPORT_ID: u8 = 0x00;

/// Number of physical key positions on the keyboard
///
pub const NUM_KEYS: usize = 126;

/// Key codes carried by one write command
///
pub const CHUNK_KEYS: usize = 8;

/// Write commands needed for a full keymap (126 = 15 * 8 + 6)
///
pub const NUM_CHUNKS: usize = 16;

/// The stock software terminates the final write chunk with this literal
/// in place of the unused key slots
///
pub const TRAILER: [u8; 4] = [0x78, 0x56, 0x34, 0x12];

/// Columns per row when printing a keymap grid
///
pub const ROW_LENGTH: usize = 21;
