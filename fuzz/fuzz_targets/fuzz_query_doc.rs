#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Arbitrary documents must be rejected with an error, never a panic
    if let Ok(doc) = solrq::QueryDoc::from_json(data) {
        if let Ok(query) = doc.into_query() {
            let _ = query.to_string();
        }
    }
});
