#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    patterns: Vec<Vec<u8>>,
    text: Vec<u8>,
}

fuzz_target!(|input: Input| {
    // Construction may reject the set but must never panic
    let Ok(ac) = acmatch::build(&input.patterns) else {
        return;
    };

    let found = ac.search(&input.text).unwrap();
    assert!(found.windows(2).all(|w| w[0].end <= w[1].end));

    for m in &found {
        let span = ac.span(m);
        assert_eq!(&input.text[span], &input.patterns[m.pattern][..]);
    }

    let expected: usize = input
        .patterns
        .iter()
        .map(|p| input.text.windows(p.len()).filter(|w| w == p).count())
        .sum();
    assert_eq!(found.len(), expected);
});
