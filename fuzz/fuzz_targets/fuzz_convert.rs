#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let out = xmlmapper::convert(s);
        match serde_json::from_str::<serde_json::Value>(&out) {
            Ok(v) if v.is_object() => {}
            other => panic!(
                "Output is not a JSON object!\nInput: {:?}\nOutput: {}\nParsed: {:?}",
                s, out, other
            ),
        }
    }
});
