#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use solrq::{Proximity, Q, Range, Value};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    field: &'a str,
    text: &'a str,
    other: &'a str,
    distance: i64,
    safe: bool,
}

fuzz_target!(|input: Input| {
    let escaped = solrq::escape(input.text);
    // Escaping only ever adds backslashes
    assert!(escaped.len() >= input.text.len());

    let value = Value::with_safety(input.text, input.safe);
    let range = Range::new(input.text, input.other);
    let proximity = Proximity::with_safety(input.other, input.distance, input.safe);

    let query = (Q::term(input.field, value) & Q::term(input.field, range))
        | !Q::term(input.field, proximity);
    let _ = query.to_string();
});
