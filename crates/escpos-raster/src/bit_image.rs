//! 24-dot bit-image band encoder.
//!
//! The bitmap is cut into bands of 24 dot rows. Each band is sent column by
//! column, three bytes per column, the most significant bit of each byte being
//! the topmost dot of its 8-row slice.

use image_processor::DotBitmap;
use tracing::debug;

use crate::commands::{
    BAND_HEIGHT, BIT_IMAGE_HEADER_LEN, BYTES_PER_COLUMN, DEFAULT_LINE_SPACING, LF,
    bit_image_header, initialize, set_line_spacing,
};
use crate::{EscPosError, Result};

/// Bytes before the first band (`ESC @` + `ESC 3 24`).
const PREAMBLE_LEN: usize = 5;

/// Bytes after the last band (`ESC 3 30`).
const POSTAMBLE_LEN: usize = 3;

/// Number of 24-row bands needed for `height` dot rows.
pub fn band_count(height: u32) -> usize {
    height.div_ceil(BAND_HEIGHT) as usize
}

/// Header plus payload of one band, excluding the trailing line feed.
pub fn band_len(width: u32) -> usize {
    BIT_IMAGE_HEADER_LEN + BYTES_PER_COLUMN * width as usize
}

/// Exact size of the stream produced by [`encode_bitmap`].
pub fn encoded_len(width: u32, height: u32) -> usize {
    PREAMBLE_LEN + band_count(height) * (band_len(width) + 1) + POSTAMBLE_LEN
}

/// Append the column payload of the band starting at dot row `offset`.
///
/// Rows at or past the bitmap height are padded with blank dots.
pub fn pack_band(bitmap: &DotBitmap, offset: u32, out: &mut Vec<u8>) {
    for x in 0..bitmap.width() {
        for k in 0..BYTES_PER_COLUMN as u32 {
            let mut slice: u8 = 0;
            for b in 0..8 {
                let y = offset + k * 8 + b;
                if bitmap.get(x, y) {
                    slice |= 1 << (7 - b);
                }
            }
            out.push(slice);
        }
    }
}

/// Serialize a dot bitmap into the full bit-image command stream.
///
/// Nothing is produced unless the whole stream can be built.
pub fn encode_bitmap(bitmap: &DotBitmap) -> Result<Vec<u8>> {
    let (width, height) = (bitmap.width(), bitmap.height());
    let columns = u16::try_from(width).map_err(|_| EscPosError::WidthOutOfRange(width))?;

    let mut buf = Vec::with_capacity(encoded_len(width, height));
    buf.extend_from_slice(&initialize());
    buf.extend_from_slice(&set_line_spacing(BAND_HEIGHT as u8));

    let mut offset = 0;
    while offset < height {
        buf.extend_from_slice(&bit_image_header(columns));
        pack_band(bitmap, offset, &mut buf);
        buf.push(LF);
        offset += BAND_HEIGHT;
    }

    buf.extend_from_slice(&set_line_spacing(DEFAULT_LINE_SPACING));

    debug!(
        width,
        height,
        bands = band_count(height),
        bytes = buf.len(),
        "Encoded bit-image stream"
    );
    Ok(buf)
}
