#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must never panic, whichever way the pixel data is located
    let _ = graybmp::decode_bmp(data, enough::Unstoppable);
    let _ = graybmp::DecodeRequest::new(data)
        .pixel_data_location(graybmp::PixelDataLocation::HeaderOffset)
        .decode(enough::Unstoppable);
});
