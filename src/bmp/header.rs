//! Fixed-size BMP headers.
//!
//! Both headers are read and written field by field in little-endian order,
//! so the in-memory layout of these structs never matters.

/// Size of `BITMAPFILEHEADER` on disk.
pub const FILE_HEADER_LEN: usize = 14;
/// Size of `BITMAPINFOHEADER` on disk.
pub const INFO_HEADER_LEN: usize = 40;
/// The two signature bytes at the start of a Windows bitmap.
pub const BMP_SIGNATURE: [u8; 2] = *b"BM";
/// The only bit depth this crate handles.
pub const SUPPORTED_BITS_PER_PIXEL: u16 = 8;

#[inline]
fn u16_at(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

#[inline]
fn u32_at(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// The 14 byte header at the start of every BMP file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FileHeader {
    /// Expected to be `b"BM"`.
    pub signature: [u8; 2],
    /// Total file size as recorded by the writer. Not checked against the
    /// actual input length.
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Byte offset of the pixel array from the start of the file.
    pub pixel_data_offset: u32,
}

impl FileHeader {
    pub fn from_bytes(b: &[u8; FILE_HEADER_LEN]) -> Self {
        Self {
            signature: [b[0], b[1]],
            file_size: u32_at(b, 2),
            reserved1: u16_at(b, 6),
            reserved2: u16_at(b, 8),
            pixel_data_offset: u32_at(b, 10),
        }
    }

    pub fn to_bytes(&self) -> [u8; FILE_HEADER_LEN] {
        let mut b = [0u8; FILE_HEADER_LEN];
        b[0..2].copy_from_slice(&self.signature);
        b[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        b[6..8].copy_from_slice(&self.reserved1.to_le_bytes());
        b[8..10].copy_from_slice(&self.reserved2.to_le_bytes());
        b[10..14].copy_from_slice(&self.pixel_data_offset.to_le_bytes());
        b
    }

    /// Whether the signature is `BM` (0x4D42 read as a little-endian `u16`).
    pub fn has_bmp_signature(&self) -> bool {
        self.signature == BMP_SIGNATURE
    }
}

/// The 40 byte `BITMAPINFOHEADER`.
///
/// Everything except `bits_per_pixel`, `width` and `height` is carried
/// through untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InfoHeader {
    /// Expected to be 40.
    pub header_size: u32,
    pub width: u32,
    /// Raw height field.
    ///
    /// Reinterpreted as `i32` this is positive for bottom-up images and
    /// negative for top-down ones. See [`InfoHeader::abs_height`].
    pub height: u32,
    /// Expected to be 1.
    pub color_planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_data_size: u32,
    pub x_pixels_per_meter: u32,
    pub y_pixels_per_meter: u32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl InfoHeader {
    pub fn from_bytes(b: &[u8; INFO_HEADER_LEN]) -> Self {
        Self {
            header_size: u32_at(b, 0),
            width: u32_at(b, 4),
            height: u32_at(b, 8),
            color_planes: u16_at(b, 12),
            bits_per_pixel: u16_at(b, 14),
            compression: u32_at(b, 16),
            image_data_size: u32_at(b, 20),
            x_pixels_per_meter: u32_at(b, 24),
            y_pixels_per_meter: u32_at(b, 28),
            colors_used: u32_at(b, 32),
            colors_important: u32_at(b, 36),
        }
    }

    pub fn to_bytes(&self) -> [u8; INFO_HEADER_LEN] {
        let mut b = [0u8; INFO_HEADER_LEN];
        b[0..4].copy_from_slice(&self.header_size.to_le_bytes());
        b[4..8].copy_from_slice(&self.width.to_le_bytes());
        b[8..12].copy_from_slice(&self.height.to_le_bytes());
        b[12..14].copy_from_slice(&self.color_planes.to_le_bytes());
        b[14..16].copy_from_slice(&self.bits_per_pixel.to_le_bytes());
        b[16..20].copy_from_slice(&self.compression.to_le_bytes());
        b[20..24].copy_from_slice(&self.image_data_size.to_le_bytes());
        b[24..28].copy_from_slice(&self.x_pixels_per_meter.to_le_bytes());
        b[28..32].copy_from_slice(&self.y_pixels_per_meter.to_le_bytes());
        b[32..36].copy_from_slice(&self.colors_used.to_le_bytes());
        b[36..40].copy_from_slice(&self.colors_important.to_le_bytes());
        b
    }

    /// Number of pixel rows, ignoring the top-down sign.
    #[inline]
    pub fn abs_height(&self) -> u32 {
        (self.height as i32).unsigned_abs()
    }

    /// Whether rows are stored top row first (negative height).
    #[inline]
    pub fn is_top_down(&self) -> bool {
        (self.height as i32) < 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_header_field_offsets() {
        let mut raw = [0u8; FILE_HEADER_LEN];
        raw[0..2].copy_from_slice(b"BM");
        raw[2..6].copy_from_slice(&0x0102_0304u32.to_le_bytes());
        raw[6..8].copy_from_slice(&0xAAAAu16.to_le_bytes());
        raw[8..10].copy_from_slice(&0x5555u16.to_le_bytes());
        raw[10..14].copy_from_slice(&1078u32.to_le_bytes());

        let h = FileHeader::from_bytes(&raw);
        assert!(h.has_bmp_signature());
        assert_eq!(u16::from_le_bytes(h.signature), 0x4D42);
        assert_eq!(h.file_size, 0x0102_0304);
        assert_eq!(h.reserved1, 0xAAAA);
        assert_eq!(h.reserved2, 0x5555);
        assert_eq!(h.pixel_data_offset, 1078);
        assert_eq!(h.to_bytes(), raw);
    }

    #[test]
    fn info_header_preserves_every_byte() {
        let mut raw = [0u8; INFO_HEADER_LEN];
        for (i, b) in raw.iter_mut().enumerate() {
            *b = i as u8 ^ 0x5A;
        }
        assert_eq!(InfoHeader::from_bytes(&raw).to_bytes(), raw);
    }

    #[test]
    fn negative_height_is_top_down() {
        let h = InfoHeader {
            height: (-7i32) as u32,
            ..Default::default()
        };
        assert!(h.is_top_down());
        assert_eq!(h.abs_height(), 7);

        let h = InfoHeader {
            height: 7,
            ..Default::default()
        };
        assert!(!h.is_top_down());
        assert_eq!(h.abs_height(), 7);
    }
}
