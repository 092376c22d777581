#![no_main]
use libfuzzer_sys::fuzz_target;

use bmpglyph::{DecodeRequest, Glyphs, Limits};

fuzz_target!(|data: &[u8]| {
    // Header probe and full decode must never panic
    let _ = bmpglyph::probe(data);

    let limits = Limits {
        max_memory_bytes: Some(64 * 1024 * 1024),
        ..Default::default()
    };
    if let Ok(decoded) = DecodeRequest::new(std::io::Cursor::new(data))
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    {
        let _ = decoded.render(Glyphs::default(), enough::Unstoppable);
        let _ = decoded.encode(enough::Unstoppable);
    }
});
