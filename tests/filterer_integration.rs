//! End-to-end filtering through the public API

use serde_json::{json, Map, Value};
use sluice::filters::{aggregate, membership};
use sluice::testing::{failing, CountingFilter};
use sluice::{
    assert_filtered, assert_rejected, filter_value, filter_with_aliases, Aliases, Error,
    FieldRule, FilterOptions, Filterer, Specification, Step,
};

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {}", other),
    }
}

#[test]
fn test_signup_form() {
    let spec = json!({
        "username": {"required": true, "filters": [["string", false, 3, 20]]},
        "email": {"required": true, "filters": [["email"]]},
        "age": [["uint", false, 13, 130]],
        "newsletter": {"default": false, "filters": [["bool"]]},
        "interests": [["explode"], ["ofScalars", [["in", ["music", "sport", "code"]]]]],
    });
    let input = json!({
        "username": "river",
        "email": "river@example.org",
        "age": " 34 ",
        "interests": "code,music",
    });

    let response = filter_value(&spec, &input, &Value::Null).unwrap();
    assert_filtered!(
        response,
        json!({
            "username": "river",
            "email": "river@example.org",
            "age": 34,
            "newsletter": false,
            "interests": ["code", "music"],
        })
    );
}

#[test]
fn test_signup_form_reports_every_problem() {
    let spec = json!({
        "username": {"required": true, "filters": [["string", false, 3, 20]]},
        "email": {"required": true, "filters": [["email"]]},
        "age": [["uint", false, 13, 130]],
    });
    let input = json!({"username": "ab", "age": "12", "referrer": "ad"});

    let response = filter_value(&spec, &input, &Value::Null).unwrap();
    assert_rejected!(
        response,
        "Field 'username' with value 'ab' failed filtering, message 'Value 'ab' with length '2' \
         is less than '3' or greater than '20''\n\
         Field 'email' was required and not present\n\
         Field 'age' with value '12' failed filtering, message '12 is less than 13'\n\
         Field 'referrer' with value 'ad' is unknown"
    );
    assert_eq!(response.unknowns(), &object(json!({"referrer": "ad"})));
}

#[test]
fn test_integer_edge_cases() {
    let spec = json!({"n": [["int"]]});
    let run = |n: Value| filter_value(&spec, &json!({ "n": n }), &Value::Null).unwrap();

    assert_filtered!(run(json!("  +123 ")), json!({"n": 123}));
    assert_rejected!(
        run(json!("9223372036854775808")),
        "Field 'n' with value '9223372036854775808' failed filtering, message \
         '9223372036854775808 was greater than a max int of 9223372036854775807'"
    );
    assert_rejected!(
        run(json!("-9223372036854775809")),
        "Field 'n' with value '-9223372036854775809' failed filtering, message \
         '-9223372036854775809 was less than a min int of -9223372036854775808'"
    );
}

#[test]
fn test_float_edge_cases() {
    let spec = json!({"f": [["float"]]});
    let run = |f: Value| filter_value(&spec, &json!({ "f": f }), &Value::Null).unwrap();

    assert_rejected!(
        run(json!("0x1A")),
        "Field 'f' with value '0x1A' failed filtering, message '0x1A is hex format'"
    );

    let negative = run(json!("-0"));
    let positive = run(json!("0"));
    let negative = &negative.filtered_value().unwrap()["f"];
    let positive = &positive.filtered_value().unwrap()["f"];
    assert_eq!(negative.to_string(), "-0.0");
    assert_eq!(positive.to_string(), "0.0");
}

#[test]
fn test_membership_strictness() {
    let strict = json!({"v": [["in", [0]]]});
    let loose = json!({"v": [["in", [0], false]]});
    let input = json!({"v": "0"});

    assert_rejected!(
        filter_value(&strict, &input, &Value::Null).unwrap(),
        "Field 'v' with value '0' failed filtering, message 'Value '0' is not in array [0]'"
    );
    assert_filtered!(
        filter_value(&loose, &input, &Value::Null).unwrap(),
        json!({"v": "0"})
    );
}

#[test]
fn test_short_circuit_with_custom_error() {
    let after = CountingFilter::new();
    let spec = Specification::new().field(
        "code",
        FieldRule::new()
            .step(Step::alias("string"))
            .step(Step::function(failing("rejected")))
            .step(Step::function(after.clone()))
            .error("'{value}' is not a valid code"),
    );
    let response = filter_with_aliases(
        &spec,
        &object(json!({"code": "AB-1"})),
        FilterOptions::new(),
        &Aliases::builtin(),
    )
    .unwrap();

    assert_rejected!(response, "'AB-1' is not a valid code");
    assert_eq!(after.calls(), 0);
}

#[test]
fn test_lazy_membership_in_a_filterer() {
    let allowed = std::sync::Arc::new(std::sync::Mutex::new(vec![json!("eu")]));
    let source = std::sync::Arc::clone(&allowed);
    let filterer = Filterer::new(Specification::new().field(
        "region",
        FieldRule::new().step(Step::function(membership::one_of_lazy(move || {
            source.lock().unwrap().clone()
        }))),
    ));
    let input = object(json!({"region": "us"}));

    assert!(filterer.invoke(&input).is_err());
    allowed.lock().unwrap().push(json!("us"));
    assert_eq!(filterer.invoke(&input).unwrap(), input);
}

#[test]
fn test_nested_specifications() {
    let line = Specification::new()
        .field("sku", FieldRule::new().step(Step::alias("string")).required(true))
        .field(
            "qty",
            FieldRule::new().step(Step::alias("uint").args([json!(false), json!(1)])),
        );
    let ship_to = json!({"country": [["string", false, 2, 2]]});
    let order = Filterer::new(
        Specification::new()
            .field(
                "lines",
                FieldRule::new().step(Step::function(aggregate::each_mapping(line))),
            )
            .field(
                "ship_to",
                FieldRule::new().step(Step::alias("ofArray").arg(ship_to)),
            ),
    );

    let filtered = order
        .invoke(&object(json!({
            "lines": [{"sku": "A1", "qty": "2"}, {"sku": "B7", "qty": 1}],
            "ship_to": {"country": "NZ"},
        })))
        .unwrap();
    assert_eq!(
        filtered["lines"],
        json!([{"sku": "A1", "qty": 2}, {"sku": "B7", "qty": 1}])
    );

    let err = order
        .invoke(&object(json!({"lines": [{"qty": "0"}, 5]})))
        .unwrap_err();
    assert_eq!(
        err,
        Error::filter(
            "Field 'lines' with value '[{\"qty\":\"0\"},5]' failed filtering, message \
             'Field 'sku' was required and not present\n\
             Field 'qty' with value '0' failed filtering, message '0 is less than 1'\n\
             Value at position '1' was not an array'"
        )
    );
}

#[test]
fn test_flatten_then_check_count() {
    let spec = json!({"ids": [["flatten"], ["array", 1, 3], ["ofScalars", [["uint"]]]]});

    assert_filtered!(
        filter_value(&spec, &json!({"ids": [["1"], [["2"]]]}), &Value::Null).unwrap(),
        json!({"ids": [1, 2]})
    );
    assert_rejected!(
        filter_value(&spec, &json!({"ids": [[1, 2], [3, [4]]]}), &Value::Null).unwrap(),
        "Field 'ids' with value '[1,2,3,4]' failed filtering, message 'value count of 4 is \
         greater than 3'"
    );
}

#[test]
fn test_dates() {
    let spec = json!({"at": [["date", false, "+01:00"]], "zone": [["timezone"]]});
    assert_filtered!(
        filter_value(
            &spec,
            &json!({"at": "2024-06-01 08:30:00", "zone": "z"}),
            &Value::Null
        )
        .unwrap(),
        json!({"at": "2024-06-01T08:30:00+01:00", "zone": "UTC"})
    );
}

#[test]
fn test_broken_specifications_raise() {
    assert_eq!(
        filter_value(&json!({"a": [["missing"]]}), &json!({"a": 1}), &Value::Null).unwrap_err(),
        Error::domain("Function 'missing' for field 'a' is not callable")
    );
    assert!(matches!(
        filter_value(&json!({"a": [[{}]]}), &json!({"a": 1}), &Value::Null),
        Err(Error::Domain(_))
    ));
    assert!(matches!(
        filter_value(&json!({"a": [["int", "yes"]]}), &json!({"a": 1}), &Value::Null),
        Err(Error::Configuration(_))
    ));
}

#[test]
fn test_unresolved_alias_after_failure_is_never_reached() {
    let spec = json!({"a": [["int"], ["missing"]]});
    let response = filter_value(&spec, &json!({"a": "x"}), &Value::Null).unwrap();
    assert_rejected!(response);
}
