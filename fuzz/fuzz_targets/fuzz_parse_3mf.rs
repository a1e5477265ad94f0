#![no_main]

use libfuzzer_sys::fuzz_target;
use slicemeta::diagnostics::NullSink;
use slicemeta::{ParserConfig, parse_3mf};
use std::io::Cursor;
use std::sync::Arc;

fuzz_target!(|data: &[u8]| {
    // ZIP extraction -> manifest XML -> plate preview -> embedded G-code
    let config = ParserConfig::new().with_sink(Arc::new(NullSink));
    let _ = parse_3mf(Cursor::new(data), &config);
});
