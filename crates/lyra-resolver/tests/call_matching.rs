//! Overload rating, dispatch search and override resolution.

use lyra_ast::{SourceClass, SourceMethod};
use lyra_core::{ClassKind, TypeDesc};
use lyra_resolver::generics::resolve_type_var_for_call;
use lyra_resolver::overload::{
    best_constructor, best_method, compatible_methods_all, match_rating, super_method,
};
use lyra_resolver::{Callable, ClassId, JavaType, MethodId, Resolver};
use lyra_stub::minimal_jdk;
use pretty_assertions::assert_eq;

fn class(r: &mut Resolver, name: &str) -> ClassId {
    r.class_for_name(name).unwrap()
}

fn declared_method(r: &mut Resolver, class: ClassId, name: &str) -> MethodId {
    r.methods_of(class)
        .into_iter()
        .find(|&m| r.method(m).name == name)
        .unwrap()
}

#[test]
fn exact_beats_assignable_beats_unknown() {
    let mut r = Resolver::new(minimal_jdk());
    let string = class(&mut r, "java.lang.String");
    let object = class(&mut r, "java.lang.Object");
    let equals = declared_method(&mut r, object, "equals");
    let call = Callable::Method(equals);

    let exact = match_rating(&mut r, call, &[Some(JavaType::Class(object))]);
    let assignable = match_rating(&mut r, call, &[Some(JavaType::Class(string))]);
    let unknown = match_rating(&mut r, call, &[None]);
    assert_eq!(exact, 1000);
    assert_eq!(assignable, 100);
    assert_eq!(unknown, 10);
    assert!(exact > assignable && assignable > unknown);
}

#[test]
fn incompatible_call_matches_nothing() {
    let mut r = Resolver::new(minimal_jdk());
    let string = class(&mut r, "java.lang.String");
    let runnable = class(&mut r, "java.lang.Runnable");

    // charAt(int) will not take a Runnable
    let concat = declared_method(&mut r, string, "charAt");
    assert_eq!(
        match_rating(&mut r, Callable::Method(concat), &[Some(JavaType::Class(runnable))]),
        0
    );
    assert_eq!(
        best_method(&mut r, string, "charAt", &[Some(JavaType::Class(runnable))]),
        None
    );

    // arity mismatch rejects too
    assert_eq!(best_method(&mut r, string, "length", &[None]), None);
}

#[test]
fn zero_parameter_exact_match_rates_flat() {
    let mut r = Resolver::new(minimal_jdk());
    let string = class(&mut r, "java.lang.String");
    let length = declared_method(&mut r, string, "length");
    assert_eq!(match_rating(&mut r, Callable::Method(length), &[]), 1000);
}

#[test]
fn variable_arity_equivalence() {
    let mut r = Resolver::new(minimal_jdk());
    let string = class(&mut r, "java.lang.String");
    let integer = class(&mut r, "java.lang.Integer");
    let object_array = class(&mut r, "java.lang.Object[]");
    let format = declared_method(&mut r, string, "format");
    let call = Callable::Method(format);

    let spread = match_rating(
        &mut r,
        call,
        &[
            Some(JavaType::Class(string)),
            Some(JavaType::Class(string)),
            Some(JavaType::Class(integer)),
        ],
    );
    let arrayed = match_rating(
        &mut r,
        call,
        &[Some(JavaType::Class(string)), Some(JavaType::Class(object_array))],
    );
    assert!(spread > 0);
    assert_eq!(spread, arrayed, "spread and collected calls rate alike");

    // empty variable slot is legal but rates below any real match
    let empty = match_rating(&mut r, call, &[Some(JavaType::Class(string))]);
    assert!(empty > 0 && empty < spread);

    // one known-unassignable trailing argument rejects the whole call
    let runnable = class(&mut r, "java.lang.Runnable");
    let bad_fixed = match_rating(
        &mut r,
        call,
        &[Some(JavaType::Class(runnable)), Some(JavaType::Class(string))],
    );
    assert_eq!(bad_fixed, 0);
}

#[test]
fn dispatch_search_dedupes_overridden_methods() {
    let mut r = Resolver::new(minimal_jdk());
    let string = class(&mut r, "java.lang.String");
    let int = class(&mut r, "int");

    // declared on both String and CharSequence; only the override survives
    let candidates =
        compatible_methods_all(&mut r, string, "charAt", &[Some(JavaType::Class(int))]);
    assert_eq!(candidates.len(), 1);
    assert_eq!(r.method(candidates[0]).id, "java.lang.String.charAt(int)");
}

#[test]
fn interface_receivers_fall_back_to_object_methods() {
    let mut r = Resolver::new(minimal_jdk());
    let runnable = class(&mut r, "java.lang.Runnable");
    let found = best_method(&mut r, runnable, "hashCode", &[]).unwrap();
    assert_eq!(r.method(found).id, "java.lang.Object.hashCode()");
}

#[test]
fn override_found_in_source_superclass() {
    let mut r = Resolver::new(minimal_jdk());
    let a = r.class_for_source(
        &SourceClass::new("com.example", "A")
            .with_method(SourceMethod::new("run", Some(TypeDesc::name("void")))),
    );
    let b = r.class_for_source(
        &SourceClass::new("com.example", "B")
            .with_super(TypeDesc::name("com.example.A"))
            .with_method(SourceMethod::new("run", Some(TypeDesc::name("void")))),
    );

    let a_run = declared_method(&mut r, a, "run");
    let b_run = declared_method(&mut r, b, "run");
    assert_eq!(super_method(&mut r, b_run), Some(a_run));
    assert_eq!(super_method(&mut r, a_run), None);

    // the cached answer is stable
    assert_eq!(super_method(&mut r, b_run), Some(a_run));

    // dispatch from B prefers the override
    assert_eq!(best_method(&mut r, b, "run", &[]), Some(b_run));
}

#[test]
fn override_found_through_interfaces() {
    let mut r = Resolver::new(minimal_jdk());
    let task = r.class_for_source(
        &SourceClass::new("com.example", "Task")
            .with_interface(TypeDesc::name("java.lang.Runnable"))
            .with_method(SourceMethod::new("run", Some(TypeDesc::name("void")))),
    );
    let runnable = class(&mut r, "java.lang.Runnable");
    let iface_run = declared_method(&mut r, runnable, "run");
    let task_run = declared_method(&mut r, task, "run");
    assert_eq!(super_method(&mut r, task_run), Some(iface_run));
}

#[test]
fn interfaces_do_not_shadow_the_superclass_chain() {
    let mut r = Resolver::new(minimal_jdk());
    let base = r.class_for_source(
        &SourceClass::new("com.example", "Base")
            .with_method(SourceMethod::new("run", Some(TypeDesc::name("void")))),
    );
    let both = r.class_for_source(
        &SourceClass::new("com.example", "Both")
            .with_super(TypeDesc::name("com.example.Base"))
            .with_interface(TypeDesc::name("java.lang.Runnable"))
            .with_method(SourceMethod::new("run", Some(TypeDesc::name("void")))),
    );
    let base_run = declared_method(&mut r, base, "run");
    let both_run = declared_method(&mut r, both, "run");
    // superclass chain wins over the interface declaration
    assert_eq!(super_method(&mut r, both_run), Some(base_run));
}

#[test]
fn best_constructor_by_rating() {
    let mut r = Resolver::new(minimal_jdk());
    let integer = class(&mut r, "java.lang.Integer");
    let int = class(&mut r, "int");
    let string = class(&mut r, "java.lang.String");

    let found = best_constructor(&mut r, integer, &[Some(JavaType::Class(int))]).unwrap();
    assert_eq!(r.constructor(found).id, "java.lang.Integer(int)");
    assert_eq!(
        best_constructor(&mut r, integer, &[Some(JavaType::Class(string))]),
        None
    );
}

#[test]
fn generic_parameter_resolves_from_the_call() {
    let mut r = Resolver::new(minimal_jdk());
    let list = class(&mut r, "java.util.List");
    let string = class(&mut r, "java.lang.String");
    let add = declared_method(&mut r, list, "add");
    let e = r
        .type_params_of(list)
        .into_iter()
        .find(|&tv| r.type_var(tv).name == "E")
        .unwrap();

    let resolved = resolve_type_var_for_call(
        &mut r,
        e,
        Callable::Method(add),
        &[Some(JavaType::Class(string))],
    );
    assert_eq!(resolved, JavaType::Class(string));
}

#[test]
fn cyclic_type_parameter_bounds_read_as_object() {
    let mut r = Resolver::new(minimal_jdk());
    let cyc = r.class_for_source(
        &SourceClass::new("com.example", "Cyc")
            .with_type_param("T", Some(TypeDesc::variable("U")))
            .with_type_param("U", Some(TypeDesc::variable("T")))
            .with_method(
                SourceMethod::new("accept", Some(TypeDesc::name("void")))
                    .with_param("value", Some(TypeDesc::variable("T"))),
            ),
    );
    let string = class(&mut r, "java.lang.String");
    let object = class(&mut r, "java.lang.Object");

    let t = r
        .type_params_of(cyc)
        .into_iter()
        .find(|&tv| r.type_var(tv).name == "T")
        .unwrap();
    assert_eq!(r.eval_class(JavaType::Variable(t)), Some(object));

    // rating terminates and treats the parameter as Object
    let accept = declared_method(&mut r, cyc, "accept");
    let rating =
        match_rating(&mut r, Callable::Method(accept), &[Some(JavaType::Class(string))]);
    assert_eq!(rating, 100);
}

#[test]
fn source_enum_dispatches_like_any_class() {
    let mut r = Resolver::new(minimal_jdk());
    let color = r.class_for_source(
        &SourceClass::new("com.example", "Color")
            .with_kind(ClassKind::Enum)
            .with_enum_constant("RED")
            .with_method(SourceMethod::new("name", Some(TypeDesc::name("java.lang.String")))),
    );
    let found = best_method(&mut r, color, "name", &[]).unwrap();
    assert_eq!(r.method(found).id, "com.example.Color.name()");
}
