#![no_main]
use libfuzzer_sys::fuzz_target;
use pegrat::ParseConfig;
use pegrat_tools::grammars::lambda_term;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    // Unmemoized parsing is exponential in nesting depth.
    if input.chars().count() > 24 {
        return;
    }
    let Ok((exp, _)) = lambda_term() else {
        return;
    };

    let full = exp.parse_located_with(input, &ParseConfig::default());
    let none = exp.parse_located_with(input, &ParseConfig::without_memoization());
    match (full, none) {
        (Ok(full), Ok(none)) => {
            assert_eq!(full.value, none.value);
            assert_eq!(full.location.end(), none.location.end());
            assert_eq!(exp.rule().recognize(input, &ParseConfig::default()), Some(full.location.end()));
        }
        (Err(full), Err(none)) => assert_eq!(full, none),
        (full, none) => panic!("memo strategies disagree: {full:?} vs {none:?}"),
    }
});
