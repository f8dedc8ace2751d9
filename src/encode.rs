use crate::bmp::IndexedBitmap;
use crate::error::BitmapError;
use alloc::vec::Vec;
use enough::Stop;

/// Builder for encoding an [`IndexedBitmap`].
#[derive(Clone, Copy, Debug)]
pub struct EncodeRequest<'a> {
    bitmap: &'a IndexedBitmap,
}

impl<'a> EncodeRequest<'a> {
    pub fn new(bitmap: &'a IndexedBitmap) -> Self {
        Self { bitmap }
    }

    /// Encode into a freshly allocated buffer.
    pub fn encode(self, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
        crate::bmp::encode_bmp(self.bitmap, &stop)
    }

    /// Encode into `sink`. Fails with [`BitmapError::Io`] if the sink
    /// rejects any byte.
    pub fn write_to<W: std::io::Write>(
        self,
        sink: &mut W,
        stop: impl Stop,
    ) -> Result<(), BitmapError> {
        crate::bmp::write_bmp(self.bitmap, sink, &stop)
    }
}

/// Encode a bitmap to BMP bytes.
pub fn encode_bmp(bitmap: &IndexedBitmap, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
    EncodeRequest::new(bitmap).encode(stop)
}
