//! Integration tests for the public query building API.
//!
//! These tests pin down the exact strings produced for the documented
//! usage patterns: implicit and explicit operators, boosting, constant
//! scores, negation, value escaping, temporal values, ranges and proximity.

use chrono::{FixedOffset, NaiveDate, TimeDelta, TimeZone};
use solrq::{
    ANY, Boundaries, Factor, Operator, Proximity, Q, QOperator, QueryDoc, Range, SolrqError, Value,
};

fn assert_compiles(query: &Q, expected: &str) {
    assert_eq!(query.to_string(), expected);
    assert_eq!(query.compile(false), expected);
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_query_simple() {
    assert_compiles(&Q::term("foo", "bar"), "foo:bar");
}

#[test]
fn test_query_and_implicit() {
    let query = Q::terms([("foo", "bar"), ("bar", "foo")]);
    assert_compiles(&query, "foo:bar AND bar:foo");
}

#[test]
fn test_query_and_explicit() {
    let query = Q::term("foo", "bar") & Q::term("bar", "foo");
    assert_compiles(&query, "foo:bar AND bar:foo");
}

#[test]
fn test_query_or_explicit() {
    let query = Q::term("foo", "bar") | Q::term("bar", "foo");
    assert_compiles(&query, "foo:bar OR bar:foo");
}

#[test]
fn test_query_or_semi_implicit() {
    let query = Q::terms_with_op([("foo", "bar"), ("bar", "foo")], Operator::Or).unwrap();
    assert_compiles(&query, "foo:bar OR bar:foo");
}

#[test]
fn test_query_boost() {
    assert_compiles(&(Q::term("foo", "bar") ^ 2), "foo:bar^2");
    assert_compiles(&(Q::term("foo", "bar") ^ 2.0), "foo:bar^2.0");

    let query = Q::term("foo", "bar") ^ 3 | Q::term("bar", "baz") ^ 4;
    assert_compiles(&query, "(foo:bar^3) OR (bar:baz^4)");

    let query = (Q::term("foo", "bar") | Q::term("bar", "baz")) ^ 3;
    assert_compiles(&query, "(foo:bar OR bar:baz)^3");

    let query = (Q::term("a", "b") & Q::term("c", "d")) ^ 1 | Q::term("e", "f") ^ 2;
    assert_compiles(&query, "((a:b AND c:d)^1) OR (e:f^2)");
}

#[test]
fn test_constant_score() {
    assert_compiles(&Q::term("foo", "bar").constant_score(2), "foo:bar^=2");
    assert_compiles(&Q::term("foo", "bar").constant_score(2.0), "foo:bar^=2.0");

    let query = Q::term("foo", "bar").constant_score(3) | Q::term("bar", "baz").constant_score(4);
    assert_compiles(&query, "(foo:bar^=3) OR (bar:baz^=4)");

    let query = (Q::term("foo", "bar") | Q::term("bar", "baz")).constant_score(3);
    assert_compiles(&query, "(foo:bar OR bar:baz)^=3");

    let query = (Q::term("a", "b") & Q::term("c", "d")).constant_score(1)
        | Q::term("e", "f").constant_score(2);
    assert_compiles(&query, "((a:b AND c:d)^=1) OR (e:f^=2)");
}

#[test]
fn test_query_not_simple() {
    assert_compiles(&!Q::term("foo", "bar"), "!foo:bar");
}

#[test]
fn test_query_not_and_explicit() {
    let query = !(Q::term("foo", "bar") & Q::term("bar", "foo"));
    assert_compiles(&query, "!(foo:bar AND bar:foo)");
}

#[test]
fn test_extra_parens_wrap_root() {
    let query = Q::term("a", "b") | Q::term("c", "d");
    assert_eq!(query.compile(true), "(a:b OR c:d)");
    assert_eq!(Q::term("a", "b").compile(true), "a:b");
}

#[test]
fn test_usage_with_wildcards() {
    assert_compiles(&Q::term("*_t", "text"), "*_t:text");
}

#[test]
fn test_can_escape_special_characters() {
    assert_eq!(Q::term("foo", "\\").to_string(), "foo:\\\\");
}

#[test]
fn test_query_invalid_initialization() {
    let err = Q::build(vec![Q::empty()], vec![("text", "*")], Operator::And).unwrap_err();
    assert!(matches!(err, SolrqError::ConflictingArguments));
    assert!(err.is_usage_error());
}

#[test]
fn test_children_arity_is_checked() {
    let err = Q::with_children(vec![Q::term("a", "b"), Q::term("c", "d")], Operator::Not)
        .unwrap_err();
    assert!(matches!(err, SolrqError::InvalidArity { got: 2, .. }));

    let query = Q::with_children(vec![Q::term("a", "b")], Operator::Boost(Factor::Int(5))).unwrap();
    assert_compiles(&query, "a:b^5");
}

#[test]
fn test_empty_operands_compile_to_valid_queries() {
    assert_compiles(&(Q::empty() & Q::term("a", "b")), "a:b");
    assert_compiles(&(Q::term("a", "b") | Q::empty()), "a:b");
    assert_compiles(&!Q::empty(), "");
    assert_compiles(
        &Q::with_children(vec![Q::empty()], Operator::Boost(Factor::Int(2))).unwrap(),
        "",
    );

    let query = QueryDoc::from_json(r#"{"or": [{"and": []}, {"term": {"field": "a", "value": "b"}}]}"#)
        .and_then(QueryDoc::into_query)
        .unwrap();
    assert_compiles(&query, "a:b");
}

#[test]
fn test_float_rendering() {
    assert_eq!(Value::new(1e-5).to_string(), "1e\\-05");
    assert_compiles(&(Q::term("a", "b") ^ f64::NAN), "a:b^nan");
    assert_compiles(&(Q::term("a", "b") ^ f64::INFINITY), "a:b^inf");
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_qoperator_invalid_invert_call() {
    let err = QOperator::not_(&["a:b", "c:d"]).unwrap_err();
    assert!(err.is_usage_error());
}

#[test]
fn test_operator_invalid_boost_call() {
    assert!(QOperator::boost(&["a:b", "c:d"], 1).unwrap_err().is_usage_error());

    let err = Factor::from_json(&serde_json::json!({"not": "a number"})).unwrap_err();
    assert!(err.is_type_error());
}

#[test]
fn test_operator_invalid_constant_score_call() {
    let err = QOperator::constant_score(&["a:b", "c:d"], 1).unwrap_err();
    assert!(err.is_usage_error());

    let err = "heavy".parse::<Factor>().unwrap_err();
    assert!(err.is_type_error());
}

#[test]
fn test_qoperator_joins() {
    assert_eq!(QOperator::and_(&["a:b", "c:d"]), "a:b AND c:d");
    assert_eq!(QOperator::or_(&["a:b", "c:d"]), "a:b OR c:d");
    assert_eq!(QOperator::not_(&["a:b"]).unwrap(), "!a:b");
    assert_eq!(QOperator::boost(&["a:b"], 1.5).unwrap(), "a:b^1.5");
    assert_eq!(QOperator::constant_score(&["a:b"], 0).unwrap(), "a:b^=0");
}

// ============================================================================
// Values
// ============================================================================

#[test]
fn test_value() {
    assert_eq!(Value::new("foo bar").to_string(), "foo\\ bar");
    assert_eq!(Value::new("\"foo bar\"").to_string(), "\\\"foo\\ bar\\\"");
    assert_eq!(Value::safe("\"foo bar\"").to_string(), "\"foo bar\"");
}

#[test]
fn test_value_nonlocalized_datetimes() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();

    let dt = date.and_hms_micro_opt(8, 15, 30, 123_456).unwrap();
    assert_eq!(Value::new(dt).to_string(), "\"2024-03-09T08:15:30.123456Z\"");

    let dt = date.and_hms_opt(8, 15, 30).unwrap();
    assert_eq!(Value::new(dt).to_string(), "\"2024-03-09T08:15:30Z\"");
}

#[test]
fn test_value_localized_datetimes() {
    let zone = FixedOffset::east_opt(2 * 3600).unwrap();
    let dt = zone.with_ymd_and_hms(2024, 3, 9, 8, 15, 30).single().unwrap();
    assert_eq!(Value::new(dt).to_string(), "\"2024-03-09T08:15:30.000000Z\"");
}

#[test]
fn test_value_timedelta() {
    let delta = TimeDelta::days(1) + TimeDelta::minutes(1) + TimeDelta::milliseconds(3);
    assert_eq!(Value::new(delta).to_string(), "NOW+1DAYS+60SECONDS+3MILLISECONDS");

    assert_eq!(
        Value::new(-TimeDelta::days(1)).to_string(),
        "NOW-1DAYS+0SECONDS+0MILLISECONDS"
    );
    assert_eq!(Value::new(TimeDelta::zero()).to_string(), "NOW");

    let delta = TimeDelta::days(1);
    assert_eq!(Value::safe(delta).to_string(), delta.to_string());
}

#[test]
fn test_value_repr() {
    assert_eq!(Value::new("foobar").repr(), "<Value: foobar>");
    assert_eq!(Q::term("foo", "bar").repr(), "<Q: foo:bar>");
}

// ============================================================================
// Ranges
// ============================================================================

#[test]
fn test_range() {
    assert_eq!(Range::new(ANY, ANY).to_string(), "[\\* TO \\*]");
    assert_eq!(Range::new(Value::any(), Value::any()).to_string(), "[* TO *]");
    assert_eq!(
        Range::with_options("*", "*", Some(true), Boundaries::Inclusive).to_string(),
        "[* TO *]"
    );
    assert_eq!(
        Range::with_options("*", "*", Some(false), Boundaries::Inclusive).to_string(),
        "[\\* TO \\*]"
    );

    let td_to = TimeDelta::days(2) + TimeDelta::minutes(1);
    let td_from = -td_to;

    let expected = format!("[{} TO {}]", Value::new(td_from), Value::new(td_to));
    assert_eq!(Range::new(td_from, td_to).to_string(), expected);
    assert_eq!(
        Range::new(Value::new(td_from), Value::new(td_to)).to_string(),
        expected
    );

    let expected = format!("[{} TO {}]", td_from, td_to);
    assert_eq!(
        Range::with_options(td_from, td_to, Some(true), Boundaries::Inclusive).to_string(),
        expected
    );
    assert_eq!(
        Range::new(Value::safe(td_from), Value::safe(td_to)).to_string(),
        expected
    );
}

#[test]
fn test_range_boundaries_unsupported() {
    for token in ["<>", "anything"] {
        let err = Range::with_boundaries(1, 2, None, token).unwrap_err();
        assert!(matches!(err, SolrqError::InvalidBoundaries { .. }));
    }
}

#[test]
fn test_range_boundaries() {
    let cases = [
        ("inclusive", "[0 TO 1]"),
        ("exclusive", "{0 TO 1}"),
        ("ee", "{0 TO 1}"),
        ("ii", "[0 TO 1]"),
        ("ei", "{0 TO 1]"),
        ("ie", "[0 TO 1}"),
        ("{}", "{0 TO 1}"),
        ("[]", "[0 TO 1]"),
        ("{]", "{0 TO 1]"),
        ("[}", "[0 TO 1}"),
    ];

    for (token, expected) in cases {
        let range = Range::with_boundaries(0, 1, None, token).unwrap();
        assert_eq!(range.to_string(), expected, "boundaries {:?}", token);
    }
}

#[test]
fn test_special() {
    assert_eq!(Range::set().to_string(), "[* TO *]");
    assert_eq!(Value::any().to_string(), "*");
    assert_eq!(Q::term("tag", Range::set()).to_string(), "tag:[* TO *]");
}

// ============================================================================
// Proximity
// ============================================================================

#[test]
fn test_proximity() {
    assert_eq!(Proximity::new("foo bar", 12).to_string(), "\"foo\\ bar\"~12");
    assert_eq!(
        Proximity::with_safety("foo bar", 12, true).to_string(),
        "\"foo bar\"~12"
    );
    assert_eq!(
        Proximity::with_safety(Value::safe("foo bar"), 12, true).to_string(),
        "\"foo bar\"~12"
    );
}

#[test]
fn test_proximity_term() {
    let query = Q::term("title", Proximity::new("fat cat", 3)) ^ 2;
    assert_compiles(&query, "title:\"fat\\ cat\"~3^2");
}
