#![no_main]

use libfuzzer_sys::fuzz_target;

use csvarmor_core::{
    Config, Mode, QuoteScanner, Sanitizer, StreamState, Translator, FIELD_SENTINEL,
    RECORD_SENTINEL,
};

fuzz_target!(|data: &[u8]| {
    let config = Config::default();

    // Sanitize must never panic and must preserve length
    let mut sanitized = data.to_vec();
    let mut translator = Translator::new(&config).unwrap();
    translator.translate(&mut sanitized);
    assert_eq!(sanitized.len(), data.len());

    // The bulk-scan path and the per-byte automaton must agree
    let mut naive = data.to_vec();
    Sanitizer::new(&config).translate(StreamState::new(), &mut naive);
    let mut fast = data.to_vec();
    QuoteScanner::new(&config).translate(&mut fast);
    assert_eq!(naive, fast);

    // Round-trip holds whenever the input carries no sentinel bytes
    if !data
        .iter()
        .any(|&b| b == FIELD_SENTINEL || b == RECORD_SENTINEL)
    {
        let restore_config = Config {
            mode: Mode::Restore,
            ..config
        };
        let mut restored = sanitized.clone();
        Translator::new(&restore_config)
            .unwrap()
            .translate(&mut restored);
        assert_eq!(restored, data);
    }
});
