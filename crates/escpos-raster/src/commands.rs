//! ESC/POS command bytes used by the 24-dot bit-image sequence.
//!
//! Layout of one print job:
//! `ESC @`, `ESC 3 24`, then per band `ESC * 33 nL nH` + payload + `LF`,
//! and finally `ESC 3 30`.

/// Escape prefix for every command.
pub const ESC: u8 = 0x1b;

/// Line feed; advances the paper by the current line spacing.
pub const LF: u8 = 0x0a;

// -- Command IDs (byte following ESC) --
const CMD_INITIALIZE: u8 = b'@';
const CMD_LINE_SPACING: u8 = b'3';
const CMD_BIT_IMAGE: u8 = b'*';

/// `ESC *` mode byte for 24-dot double-density.
pub const MODE_24_DOT_DOUBLE_DENSITY: u8 = 33;

/// Dot rows covered by one print-head pass.
pub const BAND_HEIGHT: u32 = 24;

/// Bytes per column in one band (24 rows / 8 bits).
pub const BYTES_PER_COLUMN: usize = (BAND_HEIGHT / 8) as usize;

/// Printer default line spacing in dots, restored after the image.
pub const DEFAULT_LINE_SPACING: u8 = 30;

/// Length of `ESC * m nL nH`.
pub const BIT_IMAGE_HEADER_LEN: usize = 5;

/// `ESC @`: reset the printer.
pub fn initialize() -> [u8; 2] {
    [ESC, CMD_INITIALIZE]
}

/// `ESC 3 n`: set line spacing to `n` dots.
pub fn set_line_spacing(dots: u8) -> [u8; 3] {
    [ESC, CMD_LINE_SPACING, dots]
}

/// `ESC * 33 nL nH`: start a 24-dot double-density band `width` columns wide.
///
/// The column count is always little-endian.
pub fn bit_image_header(width: u16) -> [u8; BIT_IMAGE_HEADER_LEN] {
    let [lo, hi] = width.to_le_bytes();
    [ESC, CMD_BIT_IMAGE, MODE_24_DOT_DOUBLE_DENSITY, lo, hi]
}
