#![no_main]

use cadence::syntax::{lexer, parser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(tokens) = lexer::lex(s) {
            // Malformed input must surface as a syntax error, never as an internal one or a panic
            if let Err(err) = parser::parse(&tokens) {
                assert!(!err.is_internal(), "internal error on lexer output: {err}");
            }
        }
    }
});
