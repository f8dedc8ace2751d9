use crate::bmp::{IndexedBitmap, PixelDataLocation};
use crate::error::BitmapError;
use crate::limits::Limits;
use enough::Stop;

/// Builder for decoding an 8-bit BMP from bytes.
///
/// ```no_run
/// use graybmp::{DecodeRequest, PixelDataLocation, Unstoppable};
///
/// let data: &[u8] = &[]; // your BMP bytes
/// let bitmap = DecodeRequest::new(data)
///     .pixel_data_location(PixelDataLocation::HeaderOffset)
///     .decode(Unstoppable)?;
/// println!("{}x{}", bitmap.width(), bitmap.height());
/// # Ok::<(), graybmp::BitmapError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    location: PixelDataLocation,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            location: PixelDataLocation::default(),
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Choose how the start of the pixel array is found.
    /// Defaults to [`PixelDataLocation::Contiguous`].
    pub fn pixel_data_location(mut self, location: PixelDataLocation) -> Self {
        self.location = location;
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<IndexedBitmap, BitmapError> {
        crate::bmp::decode_bmp(self.data, self.location, self.limits, &stop)
    }
}

/// Decode with default settings (contiguous layout, no limits).
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<IndexedBitmap, BitmapError> {
    DecodeRequest::new(data).decode(stop)
}
