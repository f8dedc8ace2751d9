//! 8-bit BMP decoder.
//!
//! Reads the file header, info header, palette and pixel array from an
//! in-memory byte slice. Any short section is a hard error; nothing is
//! zero-filled.

use alloc::vec::Vec;

use enough::Stop;
use log::{debug, trace, warn};

use super::header::{FILE_HEADER_LEN, FileHeader, INFO_HEADER_LEN, InfoHeader};
use super::{
    CONTIGUOUS_PIXEL_OFFSET, IndexedBitmap, PixelDataLocation, SUPPORTED_BITS_PER_PIXEL,
    pixel_data_len,
};
use crate::error::{BitmapError, Section};
use crate::limits::Limits;
use crate::palette::{PALETTE_BYTES, Palette};

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn set_position(&mut self, pos: usize, section: Section) -> Result<(), BitmapError> {
        if pos > self.data.len() {
            return Err(BitmapError::UnexpectedEof(section));
        }
        self.pos = pos;
        Ok(())
    }

    fn read_fixed_bytes<const N: usize>(
        &mut self,
        section: Section,
    ) -> Result<[u8; N], BitmapError> {
        if self.remaining() < N {
            return Err(BitmapError::UnexpectedEof(section));
        }
        let mut buf = [0u8; N];
        buf.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        Ok(buf)
    }

    fn read_slice(&mut self, n: usize, section: Section) -> Result<&'a [u8], BitmapError> {
        if self.remaining() < n {
            return Err(BitmapError::UnexpectedEof(section));
        }
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }
}

// ── Full decode ─────────────────────────────────────────────────────

/// Decode an 8-bit palettized BMP.
pub(crate) fn decode_bmp(
    data: &[u8],
    location: PixelDataLocation,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<IndexedBitmap, BitmapError> {
    let mut cursor = Cursor::new(data);

    let file_header =
        FileHeader::from_bytes(&cursor.read_fixed_bytes::<FILE_HEADER_LEN>(Section::FileHeader)?);
    if !file_header.has_bmp_signature() {
        return Err(BitmapError::UnrecognizedFormat);
    }

    let info_header =
        InfoHeader::from_bytes(&cursor.read_fixed_bytes::<INFO_HEADER_LEN>(Section::InfoHeader)?);
    if info_header.bits_per_pixel != SUPPORTED_BITS_PER_PIXEL {
        return Err(BitmapError::UnsupportedBitDepth(info_header.bits_per_pixel));
    }
    debug!(
        "BMP {}x{} ({}), header size {}, compression {}",
        info_header.width,
        info_header.abs_height(),
        if info_header.is_top_down() {
            "top-down"
        } else {
            "bottom-up"
        },
        info_header.header_size,
        info_header.compression,
    );

    let palette = Palette::from_bytes(&cursor.read_fixed_bytes::<PALETTE_BYTES>(Section::Palette)?);
    stop.check()?;

    let pixel_size = match limits {
        Some(limits) => limits.check(&info_header)?,
        None => pixel_data_len(info_header.width, info_header.height)?,
    };
    trace!("row stride {:?}, pixel data {pixel_size} bytes", super::row_stride(info_header.width));

    let gap = locate_pixel_data(&mut cursor, &file_header, location)?;

    let raw = cursor.read_slice(pixel_size, Section::PixelData)?;
    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(pixel_size)
        .map_err(|_| BitmapError::AllocationFailed { bytes: pixel_size })?;
    pixels.extend_from_slice(raw);

    if cursor.remaining() > 0 {
        debug!("ignoring {} trailing bytes after pixel data", cursor.remaining());
    }

    Ok(IndexedBitmap {
        file_header,
        info_header,
        palette,
        gap,
        pixels,
    })
}

/// Position the cursor at the start of the pixel array and return the bytes
/// skipped to get there.
fn locate_pixel_data(
    cursor: &mut Cursor<'_>,
    file_header: &FileHeader,
    location: PixelDataLocation,
) -> Result<Vec<u8>, BitmapError> {
    let offset = file_header.pixel_data_offset as usize;
    match location {
        PixelDataLocation::Contiguous => {
            if offset != CONTIGUOUS_PIXEL_OFFSET {
                warn!(
                    "header pixel data offset {offset} differs from {CONTIGUOUS_PIXEL_OFFSET}; \
                     reading pixel data directly after the palette"
                );
            }
            Ok(Vec::new())
        }
        PixelDataLocation::HeaderOffset => {
            if offset < CONTIGUOUS_PIXEL_OFFSET {
                return Err(BitmapError::InvalidHeader(alloc::format!(
                    "pixel data offset {offset} overlaps the headers and palette \
                     (must be at least {CONTIGUOUS_PIXEL_OFFSET})"
                )));
            }
            let start = cursor.pos;
            cursor.set_position(offset, Section::PixelData)?;
            Ok(cursor.data[start..offset].to_vec())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use enough::Unstoppable;

    fn minimal(width: u32, height: u32) -> Vec<u8> {
        let size = pixel_data_len(width, height).unwrap();
        let mut out = vec![0u8; CONTIGUOUS_PIXEL_OFFSET + size];
        out[0..2].copy_from_slice(b"BM");
        let total_len = out.len() as u32;
        out[2..6].copy_from_slice(&total_len.to_le_bytes());
        out[10..14].copy_from_slice(&(CONTIGUOUS_PIXEL_OFFSET as u32).to_le_bytes());
        out[14..18].copy_from_slice(&40u32.to_le_bytes());
        out[18..22].copy_from_slice(&width.to_le_bytes());
        out[22..26].copy_from_slice(&height.to_le_bytes());
        out[26..28].copy_from_slice(&1u16.to_le_bytes());
        out[28..30].copy_from_slice(&8u16.to_le_bytes());
        out
    }

    #[test]
    fn empty_input_is_truncated_file_header() {
        let err = decode_bmp(&[], PixelDataLocation::Contiguous, None, &Unstoppable).unwrap_err();
        assert!(matches!(err, BitmapError::UnexpectedEof(Section::FileHeader)));
    }

    #[test]
    fn short_palette_is_truncated() {
        let data = minimal(1, 1);
        let err = decode_bmp(&data[..600], PixelDataLocation::Contiguous, None, &Unstoppable)
            .unwrap_err();
        assert!(matches!(err, BitmapError::UnexpectedEof(Section::Palette)));
    }

    #[test]
    fn short_pixel_data_is_truncated() {
        let data = minimal(5, 2);
        let err = decode_bmp(
            &data[..data.len() - 1],
            PixelDataLocation::Contiguous,
            None,
            &Unstoppable,
        )
        .unwrap_err();
        assert!(matches!(err, BitmapError::UnexpectedEof(Section::PixelData)));
    }

    #[test]
    fn header_offset_below_palette_end_is_rejected() {
        let mut data = minimal(4, 1);
        data[10..14].copy_from_slice(&54u32.to_le_bytes());
        let err =
            decode_bmp(&data, PixelDataLocation::HeaderOffset, None, &Unstoppable).unwrap_err();
        assert!(matches!(err, BitmapError::InvalidHeader(_)));
        // The same file still decodes when the offset is ignored.
        assert!(decode_bmp(&data, PixelDataLocation::Contiguous, None, &Unstoppable).is_ok());
    }

    #[test]
    fn header_offset_past_end_is_truncated() {
        let mut data = minimal(4, 1);
        data[10..14].copy_from_slice(&5000u32.to_le_bytes());
        let err =
            decode_bmp(&data, PixelDataLocation::HeaderOffset, None, &Unstoppable).unwrap_err();
        assert!(matches!(err, BitmapError::UnexpectedEof(Section::PixelData)));
    }
}
