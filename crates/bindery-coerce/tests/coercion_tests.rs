//! Scoring and conversion through the process-wide registry

use std::sync::Arc;
use std::thread;

use bindery_coerce::registry::{self, convert, score};
use bindery_coerce::{CoerceError, Coercion, NativeObject, NativeValue, Score, Value, ValueRef};
use bindery_types::{builtins, NativeType, Primitive};

fn int() -> NativeType {
    builtins::primitive(Primitive::Int)
}

fn v(value: Value) -> ValueRef {
    value.into_ref()
}

// ============================================================================
// Numeric
// ============================================================================

#[test]
fn test_text_scores_four_worse_than_number() {
    let targets = [
        builtins::primitive(Primitive::Byte),
        builtins::primitive(Primitive::Short),
        int(),
        builtins::primitive(Primitive::Long),
        builtins::boxed(Primitive::Double),
    ];
    for target in &targets {
        let from_number = score(&Value::from(42), target);
        let from_text = score(&Value::text("42"), target);
        assert_eq!(from_text.get(), from_number.get() + 4, "target {}", target);
    }
    assert_eq!(score(&Value::text("abc"), &int()), Score::UNCOERCIBLE);
}

#[test]
fn test_wrapper_and_primitive_share_strategy() {
    for p in Primitive::ALL {
        let wrapper = builtins::boxed(p);
        assert_eq!(builtins::unboxed(&wrapper), Some(p));
        let a = registry::lookup(&builtins::primitive(p));
        let b = registry::lookup(&wrapper);
        assert!(Arc::ptr_eq(&a, &b), "{}", p.name());
    }
    assert_eq!(builtins::unboxed(&builtins::number()), None);
}

#[test]
fn test_numeric_round_trip() {
    assert_eq!(convert(&v(Value::from(5)), &int()), Ok(NativeValue::Int(5)));
    assert_eq!(
        convert(&v(Value::from(5)), &builtins::boxed(Primitive::Int)),
        Ok(NativeValue::Int(5))
    );
    assert_eq!(
        convert(&v(Value::from(-3)), &builtins::primitive(Primitive::Byte)),
        Ok(NativeValue::Byte(-3))
    );
    assert_eq!(
        convert(&v(Value::from(65)), &builtins::primitive(Primitive::Char)),
        Ok(NativeValue::Char(65))
    );
    assert_eq!(
        convert(&v(Value::from(1i64 << 40)), &builtins::primitive(Primitive::Long)),
        Ok(NativeValue::Long(1 << 40))
    );
    assert_eq!(
        convert(&v(Value::from(0.5)), &builtins::primitive(Primitive::Float)),
        Ok(NativeValue::Float(0.5))
    );
    assert_eq!(
        convert(&v(Value::text(" 12 ")), &int()),
        Ok(NativeValue::Int(12))
    );
}

#[test]
fn test_numeric_rejects_non_numbers() {
    let err = convert(&v(Value::Boolean(true)), &int()).unwrap_err();
    assert_eq!(
        err,
        CoerceError::Uncoercible {
            value: "boolean".to_string(),
            target: "int".to_string(),
        }
    );
    assert!(convert(&v(Value::Nil), &int()).is_err());
    assert!(convert(&v(Value::text("x1")), &builtins::boxed(Primitive::Long)).is_err());
}

// ============================================================================
// Boolean
// ============================================================================

#[test]
fn test_boolean_scores_and_truthiness() {
    let target = builtins::primitive(Primitive::Boolean);
    assert_eq!(score(&Value::Boolean(false), &target), Score::EXACT);
    assert_eq!(score(&Value::from(0), &target).get(), 1);
    assert_eq!(score(&Value::Nil, &target).get(), 1);
    assert_eq!(convert(&v(Value::from(0)), &target), Ok(NativeValue::Boolean(true)));
    assert_eq!(convert(&v(Value::Nil), &target), Ok(NativeValue::Boolean(false)));
}

// ============================================================================
// Text
// ============================================================================

#[test]
fn test_text_and_bytes() {
    let text = builtins::text();
    let bytes = builtins::bytes();
    let valid = Value::text("héllo");
    let invalid = Value::bytes(&[0x68, 0xff, 0x00]);

    assert_eq!(score(&valid, &text), Score::EXACT);
    assert_eq!(score(&valid, &bytes).get(), 1);
    assert_eq!(score(&invalid, &bytes), Score::EXACT);
    assert_eq!(score(&invalid, &text), Score::WRONG_TYPE);

    assert_eq!(
        convert(&v(invalid), &bytes),
        Ok(NativeValue::Bytes(vec![0x68, 0xff, 0x00]))
    );
    assert_eq!(
        convert(&v(valid), &text),
        Ok(NativeValue::Text("héllo".to_string()))
    );
}

#[test]
fn test_text_from_other_kinds() {
    assert_eq!(score(&Value::from(5), &builtins::text()), Score::WRONG_TYPE);
    assert_eq!(score(&Value::from(5), &builtins::bytes()), Score::UNCOERCIBLE);
    assert_eq!(
        convert(&v(Value::from(5)), &builtins::text()),
        Ok(NativeValue::Text("5".to_string()))
    );
}

// ============================================================================
// Nil
// ============================================================================

#[test]
fn test_nil_against_reference_types() {
    let widget = NativeType::class("co.Widget", None, &[]);
    let targets = [
        builtins::text(),
        builtins::bytes(),
        NativeType::array_of(&int()),
        NativeType::array_of(&builtins::text()),
        builtins::object(),
        widget,
    ];
    for target in &targets {
        assert_eq!(score(&Value::Nil, target), Score::NULL_VALUE, "target {}", target);
        assert_eq!(convert(&v(Value::Nil), target), Ok(NativeValue::Null));
    }
}

// ============================================================================
// Array
// ============================================================================

#[test]
fn test_empty_table_matches_any_array() {
    let widget = NativeType::class("co.Gadget", None, &[]);
    for element in [int(), builtins::text(), widget] {
        let target = NativeType::array_of(&element);
        assert_eq!(score(&Value::table(vec![]), &target), Score::EXACT);
        let converted = convert(&v(Value::table(vec![])), &target).unwrap();
        let array = converted.as_array().unwrap();
        assert!(array.is_empty());
        assert_eq!(array.element, element);
    }
}

#[test]
fn test_table_to_array() {
    let target = NativeType::array_of(&int());
    let table = Value::table(vec![Value::from(1), Value::from(2), Value::text("3")]);
    assert_eq!(score(&table, &target).get(), 1);
    let converted = convert(&v(table), &target).unwrap();
    let array = converted.as_array().unwrap();
    assert_eq!(
        array.items,
        vec![NativeValue::Int(1), NativeValue::Int(2), NativeValue::Int(3)]
    );
    let ints: Vec<i32> = array.items.iter().filter_map(NativeValue::as_i32).collect();
    assert_eq!(ints, vec![1, 2, 3]);
}

#[test]
fn test_table_scored_by_first_element() {
    let target = NativeType::array_of(&int());
    // Only the first element is sampled
    let table = Value::table(vec![Value::from(1), Value::Boolean(true)]);
    assert_eq!(score(&table, &target).get(), 1);
    let err = convert(&v(table), &target).unwrap_err();
    assert_eq!(
        err,
        CoerceError::ElementUncoercible {
            index: 2,
            target: "int".to_string(),
        }
    );

    let bad_head = Value::table(vec![Value::Boolean(true)]);
    assert_eq!(score(&bad_head, &target), Score::UNCOERCIBLE);
}

#[test]
fn test_nested_table_to_matrix() {
    let target = NativeType::array_of(&NativeType::array_of(&int()));
    let table = Value::table(vec![
        Value::table(vec![Value::from(1), Value::from(2)]),
        Value::table(vec![]),
    ]);
    let converted = convert(&v(table), &target).unwrap();
    let rows = converted.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows.items[0].as_array().unwrap().len(), 2);
    assert!(rows.items[1].as_array().unwrap().is_empty());
}

#[test]
fn test_wrapped_array_scored_by_element_distance() {
    let base = NativeType::class("co.Base", None, &[]);
    let derived = NativeType::class("co.Derived", Some(&base), &[]);
    let other = NativeType::class("co.Other", None, &[]);
    let wrapped = Value::userdata(NativeObject::new(&NativeType::array_of(&derived), ()));

    assert_eq!(score(&wrapped, &NativeType::array_of(&derived)), Score::EXACT);
    assert_eq!(score(&wrapped, &NativeType::array_of(&base)).get(), 1);
    assert_eq!(
        score(&wrapped, &NativeType::array_of(&other)),
        Score::UNCOERCIBLE
    );

    // A non-array object has no element type
    let plain = Value::userdata(NativeObject::new(&derived, ()));
    assert_eq!(
        score(&plain, &NativeType::array_of(&derived)),
        Score::UNCOERCIBLE
    );

    let handle = v(wrapped);
    let converted = convert(&handle, &NativeType::array_of(&base)).unwrap();
    let original = handle.userdata().unwrap();
    assert!(converted.as_object().unwrap().ptr_eq(original));
}

// ============================================================================
// Object
// ============================================================================

#[test]
fn test_object_scores_by_natural_representation() {
    let object = builtins::object();
    let number = builtins::number();
    let comparable = builtins::comparable();

    // Integer -> Number -> Object
    assert_eq!(score(&Value::from(5), &object).get(), 2);
    assert_eq!(score(&Value::from(5), &number).get(), 1);
    assert_eq!(score(&Value::from(5), &comparable).get(), 1);
    assert_eq!(score(&Value::text("x"), &object).get(), 1);
    assert_eq!(score(&Value::text("x"), &builtins::char_sequence()).get(), 1);
    assert_eq!(score(&Value::Boolean(true), &object).get(), 1);
    assert_eq!(score(&Value::Boolean(true), &number), Score::UNCOERCIBLE);
    assert_eq!(
        score(&Value::Function("print".into()), &object).get(),
        1
    );
}

#[test]
fn test_object_conversion() {
    let object = builtins::object();
    assert_eq!(convert(&v(Value::from(5)), &object), Ok(NativeValue::Int(5)));
    assert_eq!(
        convert(&v(Value::from(1i64 << 40)), &object),
        Ok(NativeValue::Long(1 << 40))
    );
    assert_eq!(convert(&v(Value::from(2.5)), &object), Ok(NativeValue::Double(2.5)));
    assert_eq!(
        convert(&v(Value::text("hi")), &object),
        Ok(NativeValue::Text("hi".to_string()))
    );

    let table = v(Value::table(vec![Value::from(1)]));
    let passed = convert(&table, &object).unwrap();
    assert_eq!(passed, NativeValue::Script(table.clone()));
}

#[test]
fn test_userdata_against_class_hierarchy() {
    let shape = NativeType::interface("co.Shape", &[]);
    let base = NativeType::class("co.Polygon", None, &[shape.clone()]);
    let square = NativeType::class("co.Square", Some(&base), &[]);
    let unrelated = NativeType::class("co.Cloud", None, &[]);

    let value = v(Value::userdata(NativeObject::new(&square, 4u32)));
    assert_eq!(score(value.as_ref(), &square), Score::EXACT);
    assert_eq!(score(value.as_ref(), &base).get(), 1);
    assert_eq!(score(value.as_ref(), &shape).get(), 2);
    assert_eq!(score(value.as_ref(), &builtins::object()).get(), 2);
    assert_eq!(score(value.as_ref(), &unrelated), Score::UNCOERCIBLE);

    let converted = convert(&value, &base).unwrap();
    assert_eq!(converted.as_object().unwrap().downcast_ref::<u32>(), Some(&4));
    assert!(matches!(
        convert(&value, &unrelated),
        Err(CoerceError::Uncoercible { .. })
    ));
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_lazy_strategies() {
    let ty = NativeType::class("co.Lazy", None, &[]);
    let array = NativeType::array_of(&ty);
    assert!(!registry::global().contains(&array));

    let strategy = registry::lookup(&array);
    assert_eq!(strategy.to_string(), "ArrayCoercion(co.Lazy)");
    assert!(registry::global().contains(&array));
    assert!(registry::global().contains(&ty));
    assert!(matches!(*registry::lookup(&ty), Coercion::Object(_)));
}

#[test]
fn test_concurrent_lookup_converges() {
    let ty = NativeType::class("co.Contended", None, &[]);
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let ty = ty.clone();
            thread::spawn(move || registry::lookup(&NativeType::array_of(&ty)))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for r in &results[1..] {
        assert!(Arc::ptr_eq(&results[0], r));
    }
}
