//! Assignability and common-ancestor queries over resolved classes.

use std::collections::{HashSet, VecDeque};

use lyra_core::ClassKind;

use crate::decl::ClassId;
use crate::Resolver;

/// The numeric widening ladder, narrowest first. `boolean`, `byte` and
/// `void` take no part in widening.
const WIDENING: &[&str] = &["char", "short", "int", "long", "float", "double"];

fn widening_rank(name: &str) -> Option<usize> {
    WIDENING.iter().position(|&w| w == name)
}

/// Can a value of `source` be assigned to a slot of `target`?
///
/// `source: None` is the null literal, assignable to anything but a
/// primitive. Primitive targets accept the widening ladder with boxed
/// sources unboxed first; primitive sources are boxed before the reference
/// walk. Interface targets additionally search the source's interface
/// graph.
pub fn is_assignable(resolver: &mut Resolver, target: ClassId, source: Option<ClassId>) -> bool {
    let Some(source) = source else {
        return !resolver.class(target).is_primitive;
    };
    if target == source {
        return true;
    }
    let target_name = resolver.class(target).name.clone();
    let source_name = resolver.class(source).name.clone();

    if resolver.class(target).is_primitive {
        let source_prim = if resolver.class(source).is_primitive {
            Some(source_name)
        } else {
            lyra_core::unboxed_name(&source_name).map(String::from)
        };
        let Some(source_prim) = source_prim else {
            return false;
        };
        if target_name == source_prim {
            return true;
        }
        return match (widening_rank(&target_name), widening_rank(&source_prim)) {
            (Some(t), Some(s)) => t >= s,
            _ => false,
        };
    }

    let source = if resolver.class(source).is_primitive {
        match lyra_core::boxed_name(&source_name).and_then(|b| resolver.class_for_name(b)) {
            Some(boxed) => boxed,
            None => return false,
        }
    } else {
        source
    };
    if target == source || target_name == "java.lang.Object" {
        return true;
    }

    if resolver.class(target).is_array && resolver.class(source).is_array {
        if let (Some(t), Some(s)) = (
            resolver.class(target).array_component,
            resolver.class(source).array_component,
        ) {
            if resolver.class(t).is_primitive || resolver.class(s).is_primitive {
                return t == s;
            }
            return is_assignable(resolver, t, Some(s));
        }
    }

    let target_is_interface = resolver.class(target).kind == ClassKind::Interface;
    let mut queue = VecDeque::from([source]);
    let mut seen = HashSet::new();
    while let Some(class) = queue.pop_front() {
        if !seen.insert(class) {
            continue;
        }
        if class == target {
            return true;
        }
        if let Some(sup) = resolver.super_class_of(class) {
            queue.push_back(sup);
        }
        if target_is_interface {
            queue.extend(resolver.interfaces_of(class));
        }
    }
    false
}

/// The nearest class both arguments are assignable to: the wider primitive
/// for two ladder primitives, otherwise the first class of `a`'s superclass
/// chain that `b` also reaches, with `java.lang.Object` as the backstop.
pub fn common_ancestor(resolver: &mut Resolver, a: ClassId, b: ClassId) -> ClassId {
    if a == b {
        return a;
    }
    let a_prim = resolver.class(a).is_primitive;
    let b_prim = resolver.class(b).is_primitive;
    if a_prim && b_prim {
        let a_name = resolver.class(a).name.clone();
        let b_name = resolver.class(b).name.clone();
        if let (Some(ra), Some(rb)) = (widening_rank(&a_name), widening_rank(&b_name)) {
            return if ra >= rb { a } else { b };
        }
        return resolver.object_class();
    }
    if a_prim != b_prim {
        let (prim, other) = if a_prim { (a, b) } else { (b, a) };
        let prim_name = resolver.class(prim).name.clone();
        if let Some(boxed) =
            lyra_core::boxed_name(&prim_name).and_then(|n| resolver.class_for_name(n))
        {
            return common_ancestor(resolver, boxed, other);
        }
        return resolver.object_class();
    }

    let mut chain = Vec::new();
    let mut current = Some(a);
    while let Some(class) = current {
        if chain.contains(&class) {
            break;
        }
        chain.push(class);
        current = resolver.super_class_of(class);
    }
    let mut current = Some(b);
    let mut seen = HashSet::new();
    while let Some(class) = current {
        if !seen.insert(class) {
            break;
        }
        if chain.contains(&class) {
            return class;
        }
        current = resolver.super_class_of(class);
    }
    resolver.object_class()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyra_stub::minimal_jdk;

    fn class(r: &mut Resolver, name: &str) -> ClassId {
        r.class_for_name(name).unwrap()
    }

    #[test]
    fn assignability_is_reflexive() {
        let mut r = Resolver::new(minimal_jdk());
        for name in ["java.lang.String", "int", "java.lang.String[]"] {
            let c = class(&mut r, name);
            assert!(is_assignable(&mut r, c, Some(c)), "{name}");
        }
    }

    #[test]
    fn null_is_assignable_to_references_only() {
        let mut r = Resolver::new(minimal_jdk());
        let string = class(&mut r, "java.lang.String");
        let int = class(&mut r, "int");
        assert!(is_assignable(&mut r, string, None));
        assert!(!is_assignable(&mut r, int, None));
    }

    #[test]
    fn widening_ladder() {
        let mut r = Resolver::new(minimal_jdk());
        let int = class(&mut r, "int");
        let long = class(&mut r, "long");
        let double = class(&mut r, "double");
        let char_ = class(&mut r, "char");
        let byte = class(&mut r, "byte");
        assert!(is_assignable(&mut r, long, Some(int)));
        assert!(is_assignable(&mut r, double, Some(char_)));
        assert!(!is_assignable(&mut r, int, Some(long)));
        // byte stands apart from the ladder
        assert!(!is_assignable(&mut r, int, Some(byte)));
        assert!(is_assignable(&mut r, byte, Some(byte)));
    }

    #[test]
    fn boxing_both_ways() {
        let mut r = Resolver::new(minimal_jdk());
        let int = class(&mut r, "int");
        let integer = class(&mut r, "java.lang.Integer");
        let number = class(&mut r, "java.lang.Number");
        assert!(is_assignable(&mut r, integer, Some(int)));
        assert!(is_assignable(&mut r, int, Some(integer)));
        // boxed source keeps its reference conversions
        assert!(is_assignable(&mut r, number, Some(int)));
    }

    #[test]
    fn interface_targets_search_the_interface_graph() {
        let mut r = Resolver::new(minimal_jdk());
        let string = class(&mut r, "java.lang.String");
        let char_seq = class(&mut r, "java.lang.CharSequence");
        let runnable = class(&mut r, "java.lang.Runnable");
        assert!(is_assignable(&mut r, char_seq, Some(string)));
        assert!(!is_assignable(&mut r, runnable, Some(string)));
    }

    #[test]
    fn object_accepts_everything() {
        let mut r = Resolver::new(minimal_jdk());
        let object = class(&mut r, "java.lang.Object");
        let array = class(&mut r, "java.lang.String[]");
        assert!(is_assignable(&mut r, object, Some(array)));
    }

    #[test]
    fn arrays_compare_by_component() {
        let mut r = Resolver::new(minimal_jdk());
        let object_arr = class(&mut r, "java.lang.Object[]");
        let string_arr = class(&mut r, "java.lang.String[]");
        let int_arr = class(&mut r, "int[]");
        let long_arr = class(&mut r, "long[]");
        assert!(is_assignable(&mut r, object_arr, Some(string_arr)));
        assert!(!is_assignable(&mut r, string_arr, Some(object_arr)));
        // primitive components never widen
        assert!(!is_assignable(&mut r, long_arr, Some(int_arr)));
    }

    #[test]
    fn common_ancestors() {
        let mut r = Resolver::new(minimal_jdk());
        let int = class(&mut r, "int");
        let double = class(&mut r, "double");
        let integer = class(&mut r, "java.lang.Integer");
        let long_boxed = class(&mut r, "java.lang.Long");
        let number = class(&mut r, "java.lang.Number");
        let string = class(&mut r, "java.lang.String");
        let object = class(&mut r, "java.lang.Object");
        assert_eq!(common_ancestor(&mut r, int, double), double);
        assert_eq!(common_ancestor(&mut r, integer, long_boxed), number);
        assert_eq!(common_ancestor(&mut r, string, integer), object);
        assert_eq!(common_ancestor(&mut r, string, string), string);
    }
}
