#![no_main]

use kedqr_bech32::{convert_and_encode, decode, decode_and_convert};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // decode must never panic on arbitrary text
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = decode(s);

        // anything that decodes must re-encode to its lowercase form
        if let Ok((hrp, bytes)) = decode_and_convert(s) {
            let encoded = convert_and_encode(&hrp, &bytes).unwrap();
            assert_eq!(encoded, s.to_ascii_lowercase());
        }
    }

    // and with the secret key prefix to reach the data checks
    let prefixed = format!("ed25519e_sk1{}", String::from_utf8_lossy(data));
    let _ = decode_and_convert(&prefixed);
});
