//! 8-bit BMP encoder: writes the sections back exactly as they were read.

use crate::error::BitmapError;
use alloc::vec::Vec;
use enough::Stop;

use super::IndexedBitmap;

/// Check that the pixel buffer matches the header geometry.
fn validate(bitmap: &IndexedBitmap) -> Result<usize, BitmapError> {
    let expected = bitmap.pixel_data_len()?;
    if bitmap.pixels.len() < expected {
        return Err(BitmapError::BufferTooSmall {
            needed: expected,
            actual: bitmap.pixels.len(),
        });
    }
    if bitmap.pixels.len() > expected {
        return Err(BitmapError::InvalidData(alloc::format!(
            "pixel buffer holds {} bytes but a {}x{} image needs {expected}",
            bitmap.pixels.len(),
            bitmap.width(),
            bitmap.height(),
        )));
    }
    Ok(expected)
}

/// Encode to an in-memory BMP.
pub(crate) fn encode_bmp(bitmap: &IndexedBitmap, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    validate(bitmap)?;
    let mut out = Vec::with_capacity(bitmap.encoded_len()?);

    out.extend_from_slice(&bitmap.file_header.to_bytes());
    out.extend_from_slice(&bitmap.info_header.to_bytes());
    out.extend_from_slice(&bitmap.palette.to_bytes());
    stop.check()?;
    out.extend_from_slice(&bitmap.gap);
    out.extend_from_slice(&bitmap.pixels);

    Ok(out)
}

/// Encode straight into a writer, section by section.
pub(crate) fn write_bmp<W: std::io::Write>(
    bitmap: &IndexedBitmap,
    sink: &mut W,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    validate(bitmap)?;

    sink.write_all(&bitmap.file_header.to_bytes())?;
    sink.write_all(&bitmap.info_header.to_bytes())?;
    sink.write_all(&bitmap.palette.to_bytes())?;
    stop.check()?;
    sink.write_all(&bitmap.gap)?;
    sink.write_all(&bitmap.pixels)?;
    sink.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmp::{FileHeader, InfoHeader};
    use crate::palette::Palette;
    use alloc::vec;
    use enough::Unstoppable;

    fn bitmap(width: u32, height: u32, pixels: Vec<u8>) -> IndexedBitmap {
        IndexedBitmap {
            file_header: FileHeader {
                signature: *b"BM",
                ..Default::default()
            },
            info_header: InfoHeader {
                header_size: 40,
                width,
                height,
                color_planes: 1,
                bits_per_pixel: 8,
                ..Default::default()
            },
            palette: Palette::default(),
            gap: Vec::new(),
            pixels,
        }
    }

    #[test]
    fn rejects_short_pixel_buffer() {
        let err = encode_bmp(&bitmap(5, 2, vec![0; 15]), &Unstoppable).unwrap_err();
        assert!(matches!(
            err,
            BitmapError::BufferTooSmall {
                needed: 16,
                actual: 15
            }
        ));
    }

    #[test]
    fn rejects_oversized_pixel_buffer() {
        let err = encode_bmp(&bitmap(5, 2, vec![0; 17]), &Unstoppable).unwrap_err();
        assert!(matches!(err, BitmapError::InvalidData(_)));
    }

    #[test]
    fn output_length_is_sections_plus_pixels() {
        let out = encode_bmp(&bitmap(5, 2, vec![7; 16]), &Unstoppable).unwrap();
        assert_eq!(out.len(), 1078 + 16);
        assert_eq!(&out[..2], b"BM");
        assert!(out[1078..].iter().all(|&b| b == 7));
    }

    #[test]
    fn writer_matches_in_memory_encoding() {
        let bmp = bitmap(3, 3, (0..12).collect());
        let mut sink = Vec::new();
        write_bmp(&bmp, &mut sink, &Unstoppable).unwrap();
        assert_eq!(sink, encode_bmp(&bmp, &Unstoppable).unwrap());
    }
}
