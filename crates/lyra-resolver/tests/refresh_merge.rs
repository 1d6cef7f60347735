//! Refresh semantics: merges preserve the identity of surviving members,
//! report change only when the member set changes, and recover from
//! unreadable metadata.

use lyra_ast::{SourceClass, SourceConstructor, SourceMethod};
use lyra_core::{ClassKind, Modifiers, TypeDesc};
use lyra_resolver::{JavaType, Resolver};
use lyra_stub::minimal_jdk;
use pretty_assertions::assert_eq;

fn point_v1() -> SourceClass {
    SourceClass::new("com.example", "Point")
        .with_field("x", Some(TypeDesc::name("int")))
        .with_field("y", Some(TypeDesc::name("int")))
        .with_method(
            SourceMethod::new("translate", Some(TypeDesc::name("void")))
                .with_param("dx", Some(TypeDesc::name("int")))
                .with_param("dy", Some(TypeDesc::name("int"))),
        )
}

#[test]
fn merge_preserves_identity_of_surviving_members() {
    let mut r = Resolver::new(minimal_jdk());
    let point = r.class_for_source(&point_v1());

    let fields = r.fields_of(point);
    let x_before = fields
        .iter()
        .copied()
        .find(|&f| r.field(f).name == "x")
        .unwrap();
    let y_before = fields
        .iter()
        .copied()
        .find(|&f| r.field(f).name == "y")
        .unwrap();
    let translate_before = r.methods_of(point)[0];
    assert_eq!(
        r.method(translate_before).id,
        "com.example.Point.translate(int,int)"
    );

    // edit: drop y, add z, keep x and translate as they were
    let v2 = SourceClass::new("com.example", "Point")
        .with_field("x", Some(TypeDesc::name("int")))
        .with_field("z", Some(TypeDesc::name("int")))
        .with_method(
            SourceMethod::new("translate", Some(TypeDesc::name("void")))
                .with_param("dx", Some(TypeDesc::name("int")))
                .with_param("dy", Some(TypeDesc::name("int"))),
        );
    assert_eq!(r.class_for_source(&v2), point);
    assert!(r.refresh(point));

    let fields = r.fields_of(point);
    let x_after = fields
        .iter()
        .copied()
        .find(|&f| r.field(f).name == "x")
        .unwrap();
    assert_eq!(x_after, x_before, "surviving field keeps its record");
    assert!(!fields.contains(&y_before), "stale member dropped");
    assert!(fields.iter().any(|&f| r.field(f).name == "z"));
    assert_eq!(r.methods_of(point)[0], translate_before);
}

#[test]
fn detail_only_edits_report_no_change() {
    let mut r = Resolver::new(minimal_jdk());
    let point = r.class_for_source(&point_v1());
    r.refresh(point);
    let fields_before = r.fields_of(point);

    let mut v2 = point_v1();
    v2.fields[0].modifiers = Modifiers::PRIVATE | Modifiers::FINAL;
    r.class_for_source(&v2);
    assert!(!r.refresh(point), "same member set, changed must be false");

    let fields_after = r.fields_of(point);
    assert_eq!(fields_after, fields_before);
    let x = fields_after[0];
    assert_eq!(r.field(x).modifiers, Modifiers::PRIVATE | Modifiers::FINAL);
}

#[test]
fn source_classes_get_a_default_constructor() {
    let mut r = Resolver::new(minimal_jdk());
    let point = r.class_for_source(&point_v1());
    let ctors = r.constructors_of(point);
    assert_eq!(ctors.len(), 1);
    assert_eq!(r.constructor(ctors[0]).id, "com.example.Point()");

    // a declared constructor replaces the synthesized one
    let v2 = point_v1().with_constructor(
        SourceConstructor::new()
            .with_param("x", Some(TypeDesc::name("int")))
            .with_param("y", Some(TypeDesc::name("int"))),
    );
    r.class_for_source(&v2);
    r.refresh(point);
    let ctors = r.constructors_of(point);
    assert_eq!(ctors.len(), 1);
    assert_eq!(r.constructor(ctors[0]).id, "com.example.Point(int,int)");
}

#[test]
fn enum_constants_become_static_final_fields() {
    let mut r = Resolver::new(minimal_jdk());
    let source = SourceClass::new("com.example", "Direction")
        .with_kind(ClassKind::Enum)
        .with_enum_constant("NORTH")
        .with_enum_constant("SOUTH");
    let direction = r.class_for_source(&source);

    let fields = r.fields_of(direction);
    assert_eq!(fields.len(), 2);
    for &f in &fields {
        let field = r.field(f);
        assert!(field.is_enum_constant);
        assert!(field.modifiers.is_static() && field.modifiers.is_final());
        assert_eq!(field.ty, Some(JavaType::Class(direction)));
    }
    assert_eq!(r.field(fields[0]).id, "com.example.Direction.NORTH");
}

#[test]
fn half_typed_members_fall_back_to_object() {
    let mut r = Resolver::new(minimal_jdk());
    let source = SourceClass::new("com.example", "Draft")
        .with_field("pending", None)
        .with_method(SourceMethod::new("use", None).with_param("arg", None));
    let draft = r.class_for_source(&source);

    let fields = r.fields_of(draft);
    assert_eq!(r.field(fields[0]).ty, None, "untyped field stays open");

    let methods = r.methods_of(draft);
    let object = r.class_for_name("java.lang.Object").unwrap();
    let method = r.method(methods[0]);
    assert_eq!(method.id, "com.example.Draft.use(java.lang.Object)");
    assert_eq!(method.params, vec![JavaType::Class(object)]);
    assert_eq!(method.return_type, Some(JavaType::Class(object)));
}

#[test]
fn nested_source_classes_resolve_through_the_outer() {
    let mut r = Resolver::new(minimal_jdk());
    let source = SourceClass::new("com.example", "Outer")
        .with_inner_class(SourceClass::new("", "Inner").with_field("flag", Some(TypeDesc::name("boolean"))));
    let outer = r.class_for_source(&source);

    let inner = r.inner_classes_of(outer);
    assert_eq!(inner.len(), 1);
    assert_eq!(r.class(inner[0]).name, "com.example.Outer$Inner");
    assert_eq!(r.class(inner[0]).enclosing, Some(outer));
    assert_eq!(r.fields_of(inner[0]).len(), 1);
}

#[test]
fn unreadable_metadata_drops_members_and_retries() {
    let mut provider = minimal_jdk();
    provider.deny("java.lang.String");
    let mut r = Resolver::new(provider);

    // the class itself still resolves; its members do not, this session
    let string = r.class_for_name("java.lang.String").unwrap();
    assert!(r.methods_of(string).is_empty());
    assert!(r.fields_of(string).is_empty());

    // identity survives the outage
    assert_eq!(r.class_for_name("java.lang.String"), Some(string));
}

#[test]
fn unknown_supertype_leaves_the_class_usable() {
    let mut r = Resolver::new(minimal_jdk());
    let source = SourceClass::new("com.example", "Orphan")
        .with_super(TypeDesc::name("com.example.Missing"))
        .with_field("x", Some(TypeDesc::name("int")));
    let orphan = r.class_for_source(&source);

    assert_eq!(r.super_class_of(orphan), None);
    assert_eq!(r.fields_of(orphan).len(), 1);
}
