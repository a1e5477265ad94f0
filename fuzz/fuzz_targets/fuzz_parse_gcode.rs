#![no_main]

use libfuzzer_sys::fuzz_target;
use slicemeta::diagnostics::NullSink;
use slicemeta::{ParserConfig, parse_gcode};
use std::sync::Arc;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes, including invalid UTF-8 and unterminated blocks
    let config = ParserConfig::new().with_sink(Arc::new(NullSink));
    let _ = parse_gcode(data, &config);
});
