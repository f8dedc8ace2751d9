#![no_main]
use libfuzzer_sys::fuzz_target;
use graybmp::*;

fuzz_target!(|data: &[u8]| {
    let Ok(mut bitmap) = decode_bmp(data, enough::Unstoppable) else {
        return;
    };

    // Without a transform the encoder must reproduce the consumed prefix exactly
    let encoded = encode_bmp(&bitmap, enough::Unstoppable).expect("decoded bitmap must encode");
    assert_eq!(encoded, &data[..encoded.len()], "roundtrip byte mismatch");

    bitmap.to_grayscale();
    assert!(bitmap.palette.is_grayscale());
    let grayed = encode_bmp(&bitmap, enough::Unstoppable).expect("grayed bitmap must encode");
    assert_eq!(grayed.len(), encoded.len());
    assert_eq!(&grayed[..54], &encoded[..54]);
    assert_eq!(&grayed[1078..], &encoded[1078..]);

    let mut twice = bitmap.clone();
    twice.to_grayscale();
    assert_eq!(twice, bitmap);
});
