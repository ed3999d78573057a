#![no_main]

use kedqr_core::envelope::{open, EnvelopeError, SealedEnvelope};
use libfuzzer_sys::fuzz_target;

const PIN: [u8; 4] = [1, 2, 3, 4];

fuzz_target!(|data: &[u8]| {
    // from_bytes must never panic; it should always return Ok or Err
    let parsed = SealedEnvelope::from_bytes(data);
    if let Ok(envelope) = &parsed {
        // a structurally valid envelope serializes back to the same bytes
        assert_eq!(envelope.to_bytes(), data);
        let _ = envelope.plaintext_len();
    }

    // open agrees with the structural parse and never panics
    match open(&PIN, data) {
        Ok(plaintext) => {
            let envelope = parsed.expect("open succeeded on an unparseable envelope");
            assert_eq!(plaintext.len(), envelope.plaintext_len());
        }
        Err(EnvelopeError::Authentication) => assert!(parsed.is_ok()),
        Err(e) => assert_eq!(parsed.err(), Some(e)),
    }
});
