//! Call matching: rating candidates against argument lists and finding the
//! method a declaration overrides.
//!
//! Ratings are coarse on purpose. An identical parameter is worth 1000, an
//! assignable one 100, an unknown argument 10, and one known-unassignable
//! argument rejects the candidate outright, so a single exact parameter
//! outranks any pile of merely-assignable ones.

use std::collections::{HashSet, VecDeque};

use lyra_core::ClassKind;

use crate::class::Callable;
use crate::decl::{ClassId, ConstructorId, JavaType, MethodId};
use crate::subtyping::is_assignable;
use crate::Resolver;

/// Rates how well an argument list fits a callable. Zero rejects.
/// `None` arguments are unresolved expressions and score a token 10.
pub fn match_rating(
    resolver: &mut Resolver,
    callable: Callable,
    args: &[Option<JavaType>],
) -> u32 {
    let params = resolver.callable_params(callable);
    if !resolver.callable_is_varargs(callable) || params.is_empty() {
        if args.len() != params.len() {
            return 0;
        }
        if params.is_empty() {
            return 1000;
        }
        let mut rating = 0;
        for (param, arg) in params.iter().zip(args) {
            match rate_param(resolver, *param, *arg) {
                Some(points) => rating += points,
                None => return 0,
            }
        }
        rating
    } else {
        let fixed = params.len() - 1;
        if args.len() < fixed {
            return 0;
        }
        let mut rating = 0;
        for (param, arg) in params[..fixed].iter().zip(&args[..fixed]) {
            match rate_param(resolver, *param, *arg) {
                Some(points) => rating += points,
                None => return 0,
            }
        }
        let vararg_param = params[fixed];
        let trailing = &args[fixed..];
        if trailing.is_empty() {
            // legal call with an empty variable slot
            return rating + 10;
        }
        if trailing.len() == 1 {
            if let Some(arg) = trailing[0] {
                // a lone array argument can feed the array parameter whole
                if let Some(points) = rate_param(resolver, vararg_param, Some(arg)) {
                    if points >= 100 {
                        return rating + 1000;
                    }
                }
            }
        }
        let Some(component) = resolver.component_type_of(vararg_param) else {
            return 0;
        };
        for arg in trailing {
            if rate_param(resolver, component, *arg).is_none() {
                return 0;
            }
        }
        // flat, so spreading the arguments rates the same as passing the
        // array they would be collected into
        rating + 1000
    }
}

fn rate_param(resolver: &mut Resolver, param: JavaType, arg: Option<JavaType>) -> Option<u32> {
    let Some(arg) = arg else {
        return Some(10);
    };
    if arg == param {
        return Some(1000);
    }
    let param_class = resolver.eval_class(param)?;
    let arg_class = resolver.eval_class(arg)?;
    if param_class == arg_class {
        return Some(1000);
    }
    if is_assignable(resolver, param_class, Some(arg_class)) {
        Some(100)
    } else {
        None
    }
}

/// The declared methods of one class compatible with the call.
pub fn compatible_methods(
    resolver: &mut Resolver,
    class: ClassId,
    name: &str,
    args: &[Option<JavaType>],
) -> Vec<MethodId> {
    let mut out = Vec::new();
    for method in resolver.methods_of(class) {
        if resolver.method(method).name != name {
            continue;
        }
        if match_rating(resolver, Callable::Method(method), args) > 0 {
            out.push(method);
        }
    }
    out
}

/// Compatible methods of the class and its superclass chain.
pub fn compatible_methods_deep(
    resolver: &mut Resolver,
    class: ClassId,
    name: &str,
    args: &[Option<JavaType>],
) -> Vec<MethodId> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    let mut current = Some(class);
    while let Some(c) = current {
        if !seen.insert(c) {
            break;
        }
        for m in compatible_methods(resolver, c, name, args) {
            if !out.contains(&m) {
                out.push(m);
            }
        }
        current = resolver.super_class_of(c);
    }
    out
}

/// Compatible methods from everywhere a call could dispatch: the superclass
/// chain first, then the transitive interface graph, then `java.lang.Object`
/// when the receiver is an interface. A method whose override is already in
/// the list is dropped.
pub fn compatible_methods_all(
    resolver: &mut Resolver,
    class: ClassId,
    name: &str,
    args: &[Option<JavaType>],
) -> Vec<MethodId> {
    let mut out = compatible_methods_deep(resolver, class, name, args);

    let mut queue = VecDeque::from([class]);
    let mut seen = HashSet::new();
    while let Some(c) = queue.pop_front() {
        if !seen.insert(c) {
            continue;
        }
        for iface in resolver.interfaces_of(c) {
            for m in compatible_methods(resolver, iface, name, args) {
                if !out.contains(&m) {
                    out.push(m);
                }
            }
            queue.push_back(iface);
        }
        if let Some(sup) = resolver.super_class_of(c) {
            queue.push_back(sup);
        }
    }

    if resolver.class(class).kind == ClassKind::Interface {
        let object = resolver.object_class();
        for m in compatible_methods(resolver, object, name, args) {
            if !out.contains(&m) {
                out.push(m);
            }
        }
    }

    // drop methods shadowed by an override already present
    let candidates = out.clone();
    for m in candidates {
        let mut sup = super_method(resolver, m);
        while let Some(s) = sup {
            out.retain(|&x| x != s);
            sup = super_method(resolver, s);
        }
    }
    out
}

/// The best-rated dispatchable method; earlier declarations win ties.
pub fn best_method(
    resolver: &mut Resolver,
    class: ClassId,
    name: &str,
    args: &[Option<JavaType>],
) -> Option<MethodId> {
    let mut best = None;
    let mut best_rating = 0;
    for method in compatible_methods_all(resolver, class, name, args) {
        let rating = match_rating(resolver, Callable::Method(method), args);
        if rating > best_rating {
            best_rating = rating;
            best = Some(method);
        }
    }
    best
}

/// The best-rated declared constructor; earlier declarations win ties.
pub fn best_constructor(
    resolver: &mut Resolver,
    class: ClassId,
    args: &[Option<JavaType>],
) -> Option<ConstructorId> {
    let mut best = None;
    let mut best_rating = 0;
    for ctor in resolver.constructors_of(class) {
        let rating = match_rating(resolver, Callable::Constructor(ctor), args);
        if rating > best_rating {
            best_rating = rating;
            best = Some(ctor);
        }
    }
    best
}

/// The method this one overrides, if any: the nearest same-signature method
/// up the superclass chain, then through the interface graph. Computed once
/// and cached on the method record.
pub fn super_method(resolver: &mut Resolver, method: MethodId) -> Option<MethodId> {
    if let Some(cached) = resolver.method(method).super_method {
        return cached;
    }
    let found = find_super_method(resolver, method);
    resolver.method_mut(method).super_method = Some(found);
    found
}

fn find_super_method(resolver: &mut Resolver, method: MethodId) -> Option<MethodId> {
    let name = resolver.method(method).name.clone();
    let declaring = resolver.method(method).declaring;
    let signature = param_eval_classes(resolver, Callable::Method(method));

    let mut seen = HashSet::from([declaring]);
    let mut current = resolver.super_class_of(declaring);
    while let Some(c) = current {
        if !seen.insert(c) {
            break;
        }
        if let Some(m) = declared_with_signature(resolver, c, &name, &signature) {
            return Some(m);
        }
        current = resolver.super_class_of(c);
    }

    let mut queue = VecDeque::from([declaring]);
    let mut seen = HashSet::new();
    while let Some(c) = queue.pop_front() {
        if !seen.insert(c) {
            continue;
        }
        if c != declaring && resolver.class(c).kind == ClassKind::Interface {
            if let Some(m) = declared_with_signature(resolver, c, &name, &signature) {
                return Some(m);
            }
        }
        queue.extend(resolver.interfaces_of(c));
        if let Some(sup) = resolver.super_class_of(c) {
            queue.push_back(sup);
        }
    }
    None
}

/// The constructor of the superclass with the same parameter signature.
pub fn super_constructor(resolver: &mut Resolver, ctor: ConstructorId) -> Option<ConstructorId> {
    if let Some(cached) = resolver.constructor(ctor).super_constructor {
        return cached;
    }
    let declaring = resolver.constructor(ctor).declaring;
    let signature = param_eval_classes(resolver, Callable::Constructor(ctor));
    let mut found = None;
    let mut seen = HashSet::from([declaring]);
    let mut current = resolver.super_class_of(declaring);
    'outer: while let Some(c) = current {
        if !seen.insert(c) {
            break;
        }
        for candidate in resolver.constructors_of(c) {
            if param_eval_classes(resolver, Callable::Constructor(candidate)) == signature {
                found = Some(candidate);
                break 'outer;
            }
        }
        current = resolver.super_class_of(c);
    }
    resolver.constructor_mut(ctor).super_constructor = Some(found);
    found
}

fn declared_with_signature(
    resolver: &mut Resolver,
    class: ClassId,
    name: &str,
    signature: &[Option<ClassId>],
) -> Option<MethodId> {
    for method in resolver.methods_of(class) {
        if resolver.method(method).name != name {
            continue;
        }
        if param_eval_classes(resolver, Callable::Method(method)) == signature {
            return Some(method);
        }
    }
    None
}

/// Parameter signatures compare at the eval-class level, so `List<String>`
/// and `List<E>` line up the way erasure makes them at runtime.
fn param_eval_classes(resolver: &mut Resolver, callable: Callable) -> Vec<Option<ClassId>> {
    resolver
        .callable_params(callable)
        .into_iter()
        .map(|p| resolver.eval_class(p))
        .collect()
}
