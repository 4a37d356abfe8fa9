#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Pattern files and binary detection must accept any input
    let patterns = acmatch::utils::parse_pattern_lines(data);
    let _ = acmatch::build(&patterns);
    let _ = acmatch::utils::is_binary(data);
});
