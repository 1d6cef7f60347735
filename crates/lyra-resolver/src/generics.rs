//! Type-variable resolution against concrete call sites.
//!
//! Everything here is best-effort: the code under analysis is half-written
//! most of the time, so a shape mismatch or an unknown argument is skipped,
//! and a variable nothing constrains falls back to its declared bound.

use std::collections::{HashMap, HashSet};

use crate::class::Callable;
use crate::decl::{ClassId, JavaType, ParamTypeId, TypeVarId};
use crate::Resolver;

/// Resolves a type variable by lockstep scan of parameter and argument
/// types. The first parameter that mentions the variable decides; if none
/// does, the variable's declared bound wins.
pub fn resolve_type_var(
    resolver: &mut Resolver,
    tv: TypeVarId,
    params: &[JavaType],
    args: &[Option<JavaType>],
) -> JavaType {
    for (param, arg) in params.iter().zip(args) {
        let Some(arg) = *arg else { continue };
        if let Some(found) = resolve_in_pair(resolver, tv, *param, arg) {
            return found;
        }
    }
    bound_type(resolver, tv)
}

/// [`resolve_type_var`] against a call, with variable-arity normalization:
/// a call short of the variable slot drops it, a call overflowing it gets
/// its trailing arguments collapsed into one synthetic array argument.
pub fn resolve_type_var_for_call(
    resolver: &mut Resolver,
    tv: TypeVarId,
    callable: Callable,
    args: &[Option<JavaType>],
) -> JavaType {
    let mut params = resolver.callable_params(callable);
    let mut args = args.to_vec();
    if resolver.callable_is_varargs(callable) && !params.is_empty() {
        let fixed = params.len() - 1;
        if args.len() < params.len() {
            params.truncate(fixed);
            args.truncate(fixed);
        } else {
            let single_array = args.len() == params.len()
                && matches!(args[fixed], Some(ty) if resolver.component_type_of(ty).is_some());
            if !single_array {
                let component = args[fixed..].iter().flatten().copied().next();
                let collapsed = component.map(|c| resolver.array_type_for(c));
                args.truncate(fixed);
                args.push(collapsed);
            }
        }
    }
    resolve_type_var(resolver, tv, &params, &args)
}

fn resolve_in_pair(
    resolver: &mut Resolver,
    tv: TypeVarId,
    param: JavaType,
    arg: JavaType,
) -> Option<JavaType> {
    match param {
        JavaType::Variable(v) => {
            // Variables match by name, the way they are spelled at the
            // declaration site.
            if resolver.type_var(v).name == resolver.type_var(tv).name {
                Some(arg)
            } else {
                None
            }
        }
        JavaType::Parameterized(p) => {
            let (raw, param_args) = {
                let decl = resolver.param_type(p);
                (decl.raw, decl.args.clone())
            };
            // View the argument as a parameterization of the same raw class;
            // a shape that does not line up is skipped, not an error.
            let mut visited = HashSet::new();
            let arg_args = args_for_ancestor(resolver, arg, raw, &mut visited)?;
            if param_args.len() != arg_args.len() {
                return None;
            }
            for (pa, aa) in param_args.iter().zip(arg_args.iter()) {
                if let Some(found) = resolve_in_pair(resolver, tv, *pa, *aa) {
                    return Some(found);
                }
            }
            None
        }
        JavaType::Array(a) => {
            let component = resolver.array_type(a).component;
            let arg_component = resolver.component_type_of(arg)?;
            resolve_in_pair(resolver, tv, component, arg_component)
        }
        JavaType::Class(_) => None,
    }
}

fn bound_type(resolver: &mut Resolver, tv: TypeVarId) -> JavaType {
    match resolver.eval_class(JavaType::Variable(tv)) {
        Some(class) => JavaType::Class(class),
        None => JavaType::Class(resolver.object_class()),
    }
}

/// Rewrites a type, replacing the mapped type variables. Parameterizations
/// and generic arrays are re-interned with their substituted pieces.
pub fn substitute(
    resolver: &mut Resolver,
    ty: JavaType,
    map: &HashMap<TypeVarId, JavaType>,
) -> JavaType {
    match ty {
        JavaType::Variable(v) => map.get(&v).copied().unwrap_or(ty),
        JavaType::Parameterized(p) => {
            let (raw, args) = {
                let decl = resolver.param_type(p);
                (decl.raw, decl.args.clone())
            };
            let new_args: Vec<JavaType> =
                args.iter().map(|a| substitute(resolver, *a, map)).collect();
            if new_args == args {
                ty
            } else {
                resolver.parameterized_type_for(raw, new_args)
            }
        }
        JavaType::Array(a) => {
            let component = resolver.array_type(a).component;
            let new_component = substitute(resolver, component, map);
            if new_component == component {
                ty
            } else {
                resolver.array_type_for(new_component)
            }
        }
        JavaType::Class(_) => ty,
    }
}

/// Translates a type declared against `declaring`'s type parameters into the
/// parameter space of a concrete subtype, e.g. the `T` of
/// `Function<T,R>.apply` seen through a `Function<String,Integer>` value.
/// Types that mention no parameter of `declaring` come back unchanged.
pub fn translate_to_subclass(
    resolver: &mut Resolver,
    ty: JavaType,
    declaring: ClassId,
    subtype: JavaType,
) -> JavaType {
    let mut visited = HashSet::new();
    let Some(resolved_args) = args_for_ancestor(resolver, subtype, declaring, &mut visited) else {
        return ty;
    };
    let type_params = resolver.type_params_of(declaring);
    let map: HashMap<TypeVarId, JavaType> =
        type_params.into_iter().zip(resolved_args).collect();
    substitute(resolver, ty, &map)
}

/// The positional argument a parameterization supplies for a type variable,
/// searching the raw class's own parameter list first, then its generic
/// supertype and interfaces.
pub fn resolved_type_in_parameterization(
    resolver: &mut Resolver,
    pt: ParamTypeId,
    tv: TypeVarId,
) -> Option<JavaType> {
    let mut visited = HashSet::new();
    resolved_in_parameterization_impl(resolver, pt, tv, &mut visited)
}

fn resolved_in_parameterization_impl(
    resolver: &mut Resolver,
    pt: ParamTypeId,
    tv: TypeVarId,
    visited: &mut HashSet<ParamTypeId>,
) -> Option<JavaType> {
    if !visited.insert(pt) {
        return None;
    }
    let (raw, args) = {
        let decl = resolver.param_type(pt);
        (decl.raw, decl.args.clone())
    };
    let name = resolver.type_var(tv).name.clone();
    let params = resolver.type_params_of(raw);
    if let Some(pos) = params
        .iter()
        .position(|&p| resolver.type_var(p).name == name)
    {
        return args.get(pos).copied();
    }
    let map: HashMap<TypeVarId, JavaType> = params.into_iter().zip(args).collect();
    let mut supers = Vec::new();
    if let Some(st) = resolver.super_type_of(raw) {
        supers.push(st);
    }
    supers.extend(resolver.interface_types_of(raw));
    for sup in supers {
        let substituted = substitute(resolver, sup, &map);
        if let JavaType::Parameterized(sp) = substituted {
            if let Some(found) = resolved_in_parameterization_impl(resolver, sp, tv, visited) {
                return Some(found);
            }
        }
    }
    None
}

/// How `ty` parameterizes `ancestor`: the ordered type arguments `ancestor`
/// receives when reached through `ty`'s supertype graph. Unparameterized
/// steps leave the ancestor's own variables in place.
fn args_for_ancestor(
    resolver: &mut Resolver,
    ty: JavaType,
    ancestor: ClassId,
    visited: &mut HashSet<ClassId>,
) -> Option<Vec<JavaType>> {
    let (raw, map) = match ty {
        JavaType::Parameterized(p) => {
            let (raw, args) = {
                let decl = resolver.param_type(p);
                (decl.raw, decl.args.clone())
            };
            let params = resolver.type_params_of(raw);
            let map: HashMap<TypeVarId, JavaType> =
                params.into_iter().zip(args).collect();
            (raw, map)
        }
        JavaType::Class(c) => (c, HashMap::new()),
        _ => return None,
    };
    if raw == ancestor {
        let params = resolver.type_params_of(raw);
        return Some(
            params
                .into_iter()
                .map(|p| map.get(&p).copied().unwrap_or(JavaType::Variable(p)))
                .collect(),
        );
    }
    if !visited.insert(raw) {
        return None;
    }
    let mut supers = Vec::new();
    if let Some(st) = resolver.super_type_of(raw) {
        supers.push(st);
    }
    supers.extend(resolver.interface_types_of(raw));
    for sup in supers {
        let substituted = substitute(resolver, sup, &map);
        if let Some(found) = args_for_ancestor(resolver, substituted, ancestor, visited) {
            return Some(found);
        }
    }
    None
}
