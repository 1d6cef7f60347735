//! Identity-cache behavior: equal lookups yield identical ids, and the ids
//! follow the deterministic naming scheme.

use lyra_resolver::{Decl, JavaType, Resolver};
use lyra_stub::minimal_jdk;
use pretty_assertions::assert_eq;

#[test]
fn class_lookup_is_identity_stable() {
    let mut r = Resolver::new(minimal_jdk());
    let first = r.class_for_name("java.lang.String").unwrap();
    let second = r.class_for_name("java.lang.String").unwrap();
    assert_eq!(first, second);

    // unqualified names fall back to java.lang and share the identity
    let short = r.class_for_name("String").unwrap();
    assert_eq!(short, first);

    assert_eq!(r.class_for_name("com.example.NoSuchClass"), None);
}

#[test]
fn fresh_class_members_carry_scheme_ids() {
    let mut r = Resolver::new(minimal_jdk());
    let string = r.class_for_name("java.lang.String").unwrap();
    let methods = r.methods_of(string);

    let length = methods
        .iter()
        .find(|&&m| r.method(m).name == "length")
        .copied()
        .unwrap();
    assert_eq!(r.method(length).id, "java.lang.String.length()");

    let substring = methods
        .iter()
        .find(|&&m| r.method(m).name == "substring")
        .copied()
        .unwrap();
    assert_eq!(r.method(substring).id, "java.lang.String.substring(int,int)");

    let ctors = r.constructors_of(string);
    assert!(ctors.iter().any(|&c| r.constructor(c).id == "java.lang.String(char[])"));
}

#[test]
fn parameterized_types_intern_by_shape() {
    let mut r = Resolver::new(minimal_jdk());
    let list = r.class_for_name("java.util.List").unwrap();
    let string = r.class_for_name("java.lang.String").unwrap();

    let a = r.parameterized_type_for(list, vec![JavaType::Class(string)]);
    let b = r.parameterized_type_for(list, vec![JavaType::Class(string)]);
    assert_eq!(a, b);
    assert_eq!(r.type_name(a), "java.util.List<java.lang.String>");

    // no arguments means the raw class itself
    assert_eq!(r.parameterized_type_for(list, vec![]), JavaType::Class(list));
}

#[test]
fn array_classes_are_synthesized_with_length() {
    let mut r = Resolver::new(minimal_jdk());
    let string = r.class_for_name("java.lang.String").unwrap();
    let by_name = r.class_for_name("java.lang.String[]").unwrap();
    let by_component = r.array_class_for(string);
    assert_eq!(by_name, by_component);
    assert!(r.class(by_name).is_array);
    assert_eq!(r.class(by_name).array_component, Some(string));

    let fields = r.fields_of(by_name);
    assert_eq!(fields.len(), 1);
    let length = r.field(fields[0]);
    assert_eq!(length.name, "length");
    assert_eq!(length.id, "java.lang.String[].length");

    let int = r.class_for_name("int").unwrap();
    assert_eq!(r.field(fields[0]).ty, Some(JavaType::Class(int)));
}

#[test]
fn packages_build_a_tree_with_children() {
    let mut r = Resolver::new(minimal_jdk());
    let util = r.package_for_name("java.util").unwrap();
    let java = r.package_for_name("java").unwrap();
    assert_eq!(r.package(util).parent, Some(java));
    assert_eq!(r.package(util).simple_name, "util");

    let list = r.class_for_name("java.util.List").unwrap();
    let children = r.package_children_of(util);
    assert!(children.contains(&Decl::Class(list)));

    assert_eq!(r.package_for_name("com.nowhere"), None);
}

#[test]
fn session_literals_exist_without_globals() {
    let r = Resolver::new(minimal_jdk());
    let names: Vec<&str> = r
        .global_literals()
        .iter()
        .map(|&lv| r.local_var_decl(lv).name.as_str())
        .collect();
    assert_eq!(names, vec!["true", "false", "null", "this", "super"]);

    // two sessions never share literal records
    let other = Resolver::new(minimal_jdk());
    assert_eq!(other.global_literals().len(), 5);
}

#[test]
fn primitives_resolve_without_a_provider_entry() {
    let mut r = Resolver::new(minimal_jdk());
    let int = r.class_for_name("int").unwrap();
    assert!(r.class(int).is_primitive);
    assert_eq!(r.class_for_name("int"), Some(int));
}
