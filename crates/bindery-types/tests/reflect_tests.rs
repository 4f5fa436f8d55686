//! Reflective enumeration of declared and inherited members

use bindery_types::builtins;
use bindery_types::reflect::{
    lineage, public_constructors, public_fields, public_member_types, public_methods,
};
use bindery_types::{ClassBuilder, Modifiers, NativeType, Primitive};

fn int() -> NativeType {
    NativeType::primitive(Primitive::Int)
}

#[test]
fn test_lineage_order() {
    let iface = NativeType::interface("lin.Shape", &[]);
    let base = NativeType::class("lin.Base", None, &[]);
    let derived = NativeType::class("lin.Derived", Some(&base), &[iface.clone()]);

    let names: Vec<String> = lineage(&derived)
        .iter()
        .map(|t| t.name().to_string())
        .collect();
    assert_eq!(names, vec!["lin.Derived", "lin.Base", "Object", "lin.Shape"]);
}

#[test]
fn test_only_public_fields() {
    let ty = ClassBuilder::class("rf.Fields", None, &[])
        .field("open", &int(), Modifiers::public())
        .field("hidden", &int(), Modifiers::private())
        .field("family", &int(), Modifiers::protected())
        .field("CONST", &int(), Modifiers::public().with_static().with_final())
        .build()
        .unwrap();

    let names: Vec<String> = public_fields(&ty).iter().map(|f| f.name.clone()).collect();
    assert_eq!(names, vec!["open", "CONST"]);
}

#[test]
fn test_inherited_fields_and_hiding() {
    let base = ClassBuilder::class("rf.BaseF", None, &[])
        .field("id", &int(), Modifiers::public())
        .field("label", &builtins::text(), Modifiers::public())
        .build()
        .unwrap();
    let derived = ClassBuilder::class("rf.DerivedF", Some(&base), &[])
        .field("label", &int(), Modifiers::public())
        .build()
        .unwrap();

    let fields = public_fields(&derived);
    assert_eq!(fields.len(), 2);
    let label = fields.iter().find(|f| f.name == "label").unwrap();
    assert_eq!(label.declaring, derived.id());
    assert!(fields.iter().any(|f| f.name == "id" && f.declaring == base.id()));
}

#[test]
fn test_overridden_methods_reported_once() {
    let base = ClassBuilder::class("rf.BaseM", None, &[])
        .method("run", &[], None, Modifiers::public())
        .method("run", &[int()], None, Modifiers::public())
        .method("secret", &[], None, Modifiers::private())
        .build()
        .unwrap();
    let derived = ClassBuilder::class("rf.DerivedM", Some(&base), &[])
        .method("run", &[], None, Modifiers::public())
        .build()
        .unwrap();

    let methods = public_methods(&derived);
    assert_eq!(methods.len(), 2);
    assert_eq!(methods[0].declaring, derived.id());
    assert_eq!(methods[0].parameters.len(), 0);
    assert_eq!(methods[1].declaring, base.id());
    assert_eq!(methods[1].parameters.len(), 1);
}

#[test]
fn test_constructors_not_inherited() {
    let base = ClassBuilder::class("rf.BaseC", None, &[])
        .constructor(&[], Modifiers::public())
        .build()
        .unwrap();
    let derived = ClassBuilder::class("rf.DerivedC", Some(&base), &[])
        .constructor(&[int()], Modifiers::public())
        .constructor(&[int(), int()], Modifiers::private())
        .build()
        .unwrap();

    let ctors = public_constructors(&derived);
    assert_eq!(ctors.len(), 1);
    assert_eq!(ctors[0].parameters, vec![int()]);
    assert_eq!(public_constructors(&base).len(), 1);
}

#[test]
fn test_member_types() {
    let inner = NativeType::class("rf.Outer$Inner", None, &[]);
    let hidden = NativeType::class("rf.Outer$Hidden", None, &[]);
    let outer = ClassBuilder::class("rf.Outer", None, &[])
        .nested(&inner, Modifiers::public().with_static())
        .nested(&hidden, Modifiers::private())
        .build()
        .unwrap();
    let sub = NativeType::class("rf.SubOuter", Some(&outer), &[]);

    assert_eq!(public_member_types(&outer), vec![inner.clone()]);
    assert_eq!(public_member_types(&sub), vec![inner]);
}

#[test]
fn test_undeclared_type_is_empty() {
    let bare = NativeType::class("rf.Bare", None, &[]);
    assert!(public_fields(&bare).is_empty());
    assert!(public_methods(&bare).is_empty());
    assert!(public_constructors(&bare).is_empty());
    assert!(public_member_types(&bare).is_empty());
}
