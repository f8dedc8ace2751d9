//! The 256 entry color table of an 8-bit BMP and its grayscale transform.

/// Number of entries in an 8-bit color table.
pub const PALETTE_LEN: usize = 256;
/// On-disk size of one entry.
pub const PALETTE_ENTRY_LEN: usize = 4;
/// On-disk size of the whole color table.
pub const PALETTE_BYTES: usize = PALETTE_LEN * PALETTE_ENTRY_LEN;

/// One color table slot, stored as `[blue, green, red, reserved]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PaletteEntry {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    pub reserved: u8,
}

impl PaletteEntry {
    pub const fn new(blue: u8, green: u8, red: u8, reserved: u8) -> Self {
        Self {
            blue,
            green,
            red,
            reserved,
        }
    }

    pub const fn from_bytes(b: [u8; PALETTE_ENTRY_LEN]) -> Self {
        Self::new(b[0], b[1], b[2], b[3])
    }

    pub const fn to_bytes(self) -> [u8; PALETTE_ENTRY_LEN] {
        [self.blue, self.green, self.red, self.reserved]
    }

    /// Unweighted mean of the three channels, truncated.
    #[inline]
    pub const fn gray_level(self) -> u8 {
        // 765 / 3 = 255, so the quotient always fits in a byte.
        ((self.red as u16 + self.green as u16 + self.blue as u16) / 3) as u8
    }

    #[inline]
    pub const fn is_gray(self) -> bool {
        self.red == self.green && self.green == self.blue
    }

    /// Replace the color channels with their gray level. `reserved` is kept.
    #[inline]
    pub fn make_gray(&mut self) {
        let gray = self.gray_level();
        self.red = gray;
        self.green = gray;
        self.blue = gray;
    }
}

/// An ordered 256 entry color table. Pixel bytes index into it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Palette {
    entries: [PaletteEntry; PALETTE_LEN],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            entries: [PaletteEntry::default(); PALETTE_LEN],
        }
    }
}

impl Palette {
    pub fn from_entries(entries: [PaletteEntry; PALETTE_LEN]) -> Self {
        Self { entries }
    }

    pub fn from_bytes(b: &[u8; PALETTE_BYTES]) -> Self {
        let mut entries = [PaletteEntry::default(); PALETTE_LEN];
        for (entry, raw) in entries.iter_mut().zip(b.chunks_exact(PALETTE_ENTRY_LEN)) {
            *entry = PaletteEntry::new(raw[0], raw[1], raw[2], raw[3]);
        }
        Self { entries }
    }

    pub fn to_bytes(&self) -> [u8; PALETTE_BYTES] {
        let mut b = [0u8; PALETTE_BYTES];
        for (raw, entry) in b.chunks_exact_mut(PALETTE_ENTRY_LEN).zip(&self.entries) {
            raw.copy_from_slice(&entry.to_bytes());
        }
        b
    }

    pub fn entries(&self) -> &[PaletteEntry; PALETTE_LEN] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [PaletteEntry; PALETTE_LEN] {
        &mut self.entries
    }

    /// Convert every entry to gray in place.
    ///
    /// Each entry becomes `(r + g + b) / 3` on all three color channels;
    /// the reserved byte, entry order and pixel data are left alone.
    /// Applying this twice is the same as applying it once.
    pub fn to_grayscale(&mut self) {
        self.entries.iter_mut().for_each(PaletteEntry::make_gray);
    }

    pub fn is_grayscale(&self) -> bool {
        self.entries.iter().all(|e| e.is_gray())
    }
}

impl core::ops::Index<u8> for Palette {
    type Output = PaletteEntry;

    fn index(&self, index: u8) -> &PaletteEntry {
        &self.entries[usize::from(index)]
    }
}
