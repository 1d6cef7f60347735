//! Content updaters: how a class record's members get (re)read.
//!
//! Every non-synthesized class carries one updater, chosen at creation:
//! [`StubUpdater`] re-reads a compiled stub from the provider,
//! [`SourceUpdater`] re-reads a parsed source tree. Both normalize into one
//! [`ClassSpec`] shape and run the same merge, which is what keeps member
//! identity stable: a member whose deterministic id survives the refresh
//! keeps its record (updated in place), new ids get fresh records, stale ids
//! drop out of the class. The refresh reports change only when the member
//! *set* changed, not when a surviving member's details did.

use lyra_ast::SourceClass;
use lyra_core::{ids, ClassKind, Modifiers, TypeDesc};
use lyra_stub::ClassStub;

use crate::class::{ConstructorDecl, FieldDecl, MethodDecl, TypeScope, TypeVarOwner};
use crate::decl::{ClassId, JavaType, TypeVarId};
use crate::Resolver;

pub trait ContentUpdater {
    /// Re-reads the class content and merges it into the resolver's records.
    /// Returns whether any member was added or removed.
    fn refresh(&mut self, resolver: &mut Resolver, class: ClassId) -> bool;
}

/// Updater for compiled classes: content comes from the provider's stub.
pub struct StubUpdater;

impl ContentUpdater for StubUpdater {
    fn refresh(&mut self, resolver: &mut Resolver, class: ClassId) -> bool {
        let name = resolver.class(class).name.clone();
        let stub = match resolver.provider().class_stub(&name) {
            Ok(Some(stub)) => stub,
            // Vanished from the classpath, likely mid-rebuild. Keep what we
            // have; a later refresh picks up the rebuilt class.
            Ok(None) => return false,
            Err(err) => {
                tracing::warn!(class = %name, error = %err, "metadata read failed, retrying next refresh");
                let record = resolver.class_mut(class);
                let had_members = !record.fields.is_empty()
                    || !record.methods.is_empty()
                    || !record.constructors.is_empty();
                record.fields.clear();
                record.methods.clear();
                record.constructors.clear();
                record.populated = false;
                return had_members;
            }
        };
        let spec = spec_from_stub(&stub);
        apply_spec(resolver, class, spec)
    }
}

/// Updater for editable classes: content comes from a parsed tree, swapped
/// out wholesale whenever the file is re-parsed.
pub struct SourceUpdater {
    source: SourceClass,
}

impl SourceUpdater {
    pub(crate) fn new(source: SourceClass) -> SourceUpdater {
        SourceUpdater { source }
    }
}

impl ContentUpdater for SourceUpdater {
    fn refresh(&mut self, resolver: &mut Resolver, class: ClassId) -> bool {
        let spec = spec_from_source(&self.source);
        apply_spec(resolver, class, spec)
    }
}

/// The normalized content both updaters produce.
struct ClassSpec {
    modifiers: Modifiers,
    kind: ClassKind,
    super_desc: Option<TypeDesc>,
    interfaces: Vec<TypeDesc>,
    type_params: Vec<(String, Option<TypeDesc>)>,
    inner: InnerClasses,
    fields: Vec<FieldSpec>,
    methods: Vec<MethodSpec>,
    constructors: Vec<CtorSpec>,
}

enum InnerClasses {
    Named(Vec<String>),
    Parsed(Vec<SourceClass>),
}

struct FieldSpec {
    name: String,
    modifiers: Modifiers,
    ty: Option<TypeDesc>,
    is_enum_constant: bool,
}

struct MethodSpec {
    name: String,
    modifiers: Modifiers,
    type_params: Vec<(String, Option<TypeDesc>)>,
    params: Vec<TypeDesc>,
    return_type: Option<TypeDesc>,
    is_varargs: bool,
    is_default: bool,
}

struct CtorSpec {
    modifiers: Modifiers,
    type_params: Vec<(String, Option<TypeDesc>)>,
    params: Vec<TypeDesc>,
    is_varargs: bool,
}

fn spec_from_stub(stub: &ClassStub) -> ClassSpec {
    let enum_ty = TypeDesc::name(stub.name.clone());
    let fields = stub
        .fields
        .iter()
        .map(|f| FieldSpec {
            name: f.name.clone(),
            modifiers: f.modifiers,
            ty: Some(f.ty.clone()),
            // Compiled enums declare their constants as static final fields
            // of the enum type.
            is_enum_constant: stub.kind == ClassKind::Enum
                && f.modifiers.is_static()
                && f.modifiers.is_final()
                && f.ty == enum_ty,
        })
        .collect();
    let methods = stub
        .methods
        .iter()
        .map(|m| MethodSpec {
            name: m.name.clone(),
            modifiers: m.modifiers,
            type_params: m
                .type_params
                .iter()
                .map(|tp| (tp.name.clone(), tp.bound.clone()))
                .collect(),
            params: m.params.clone(),
            return_type: Some(m.return_type.clone()),
            is_varargs: m.is_varargs,
            is_default: m.is_default,
        })
        .collect();
    let constructors = stub
        .constructors
        .iter()
        .map(|c| CtorSpec {
            modifiers: c.modifiers,
            type_params: c
                .type_params
                .iter()
                .map(|tp| (tp.name.clone(), tp.bound.clone()))
                .collect(),
            params: c.params.clone(),
            is_varargs: c.is_varargs,
        })
        .collect();
    ClassSpec {
        modifiers: stub.modifiers,
        kind: stub.kind,
        super_desc: stub.super_class.clone(),
        interfaces: stub.interfaces.clone(),
        type_params: stub
            .type_params
            .iter()
            .map(|tp| (tp.name.clone(), tp.bound.clone()))
            .collect(),
        inner: InnerClasses::Named(stub.inner_classes.clone()),
        fields,
        methods,
        constructors,
    }
}

fn spec_from_source(source: &SourceClass) -> ClassSpec {
    let name = source.qualified_name();
    let object = TypeDesc::name("java.lang.Object");
    let mut fields: Vec<FieldSpec> = source
        .enum_constants
        .iter()
        .map(|constant| FieldSpec {
            name: constant.clone(),
            modifiers: Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL,
            ty: Some(TypeDesc::name(name.clone())),
            is_enum_constant: true,
        })
        .collect();
    fields.extend(source.fields.iter().map(|f| FieldSpec {
        name: f.name.clone(),
        modifiers: f.modifiers,
        ty: f.ty.clone(),
        is_enum_constant: false,
    }));
    let methods = source
        .methods
        .iter()
        .map(|m| MethodSpec {
            name: m.name.clone(),
            modifiers: m.modifiers,
            type_params: m
                .type_params
                .iter()
                .map(|tp| (tp.name.clone(), tp.bound.clone()))
                .collect(),
            // Half-typed parameter and return types read as Object so the
            // member keeps a stable id while the user finishes the line.
            params: m
                .params
                .iter()
                .map(|p| p.ty.clone().unwrap_or_else(|| object.clone()))
                .collect(),
            return_type: m.return_type.clone().or_else(|| Some(object.clone())),
            is_varargs: m.is_varargs,
            is_default: false,
        })
        .collect();
    let mut constructors: Vec<CtorSpec> = source
        .constructors
        .iter()
        .map(|c| CtorSpec {
            modifiers: c.modifiers,
            type_params: c
                .type_params
                .iter()
                .map(|tp| (tp.name.clone(), tp.bound.clone()))
                .collect(),
            params: c
                .params
                .iter()
                .map(|p| p.ty.clone().unwrap_or_else(|| object.clone()))
                .collect(),
            is_varargs: c.is_varargs,
        })
        .collect();
    if constructors.is_empty() && source.kind == ClassKind::Class {
        constructors.push(CtorSpec {
            modifiers: Modifiers::PUBLIC,
            type_params: Vec::new(),
            params: Vec::new(),
            is_varargs: false,
        });
    }
    let super_desc = match (&source.super_type, source.kind) {
        (Some(st), _) => Some(st.clone()),
        (None, ClassKind::Enum) => Some(TypeDesc::name("java.lang.Enum")),
        (None, _) => Some(object),
    };
    ClassSpec {
        modifiers: source.modifiers,
        kind: source.kind,
        super_desc,
        interfaces: source.interfaces.clone(),
        type_params: source
            .type_params
            .iter()
            .map(|tp| (tp.name.clone(), tp.bound.clone()))
            .collect(),
        inner: InnerClasses::Parsed(source.inner_classes.clone()),
        fields,
        methods,
        constructors,
    }
}

fn apply_spec(resolver: &mut Resolver, class: ClassId, spec: ClassSpec) -> bool {
    let class_name = resolver.class(class).name.clone();
    {
        let record = resolver.class_mut(class);
        record.modifiers = spec.modifiers;
        record.kind = spec.kind;
        if record.name != "java.lang.Object" {
            record.super_desc = spec.super_desc;
        }
        record.interface_descs = spec.interfaces;
    }
    let type_params: Vec<TypeVarId> = spec
        .type_params
        .iter()
        .map(|(name, bound)| {
            resolver.intern_type_var(TypeVarOwner::Class(class), &class_name, name, bound.clone())
        })
        .collect();
    resolver.class_mut(class).type_params = type_params;

    let inner: Vec<ClassId> = match spec.inner {
        InnerClasses::Named(names) => names
            .iter()
            .filter_map(|name| resolver.class_for_name(name))
            .collect(),
        InnerClasses::Parsed(sources) => sources
            .iter()
            .map(|source| resolver.class_for_source(source))
            .collect(),
    };
    resolver.class_mut(class).inner_classes = inner;

    let mut changed = merge_fields(resolver, class, &class_name, spec.fields);
    changed |= merge_methods(resolver, class, &class_name, spec.methods);
    changed |= merge_constructors(resolver, class, &class_name, spec.constructors);
    changed
}

fn merge_fields(
    resolver: &mut Resolver,
    class: ClassId,
    class_name: &str,
    specs: Vec<FieldSpec>,
) -> bool {
    let old = resolver.class(class).fields.clone();
    let mut kept = Vec::with_capacity(specs.len());
    let mut added = false;
    for spec in specs {
        let id_str = ids::field_id(class_name, &spec.name);
        if kept.iter().any(|&f| resolver.field(f).id == id_str) {
            continue; // duplicate declaration mid-edit
        }
        let ty = spec
            .ty
            .as_ref()
            .and_then(|desc| resolver.type_for_desc(desc, TypeScope::Class(class)));
        match old.iter().copied().find(|&f| resolver.field(f).id == id_str) {
            Some(fid) => {
                let field = resolver.field_mut(fid);
                field.modifiers = spec.modifiers;
                field.ty = ty;
                field.is_enum_constant = spec.is_enum_constant;
                kept.push(fid);
            }
            None => {
                added = true;
                let fid = resolver.push_field(FieldDecl {
                    id: id_str,
                    name: spec.name,
                    declaring: class,
                    modifiers: spec.modifiers,
                    ty,
                    is_enum_constant: spec.is_enum_constant,
                });
                kept.push(fid);
            }
        }
    }
    let removed = old.iter().any(|f| !kept.contains(f));
    resolver.class_mut(class).fields = kept;
    added || removed
}

fn merge_methods(
    resolver: &mut Resolver,
    class: ClassId,
    class_name: &str,
    specs: Vec<MethodSpec>,
) -> bool {
    let old = resolver.class(class).methods.clone();
    let mut kept = Vec::with_capacity(specs.len());
    let mut added = false;
    for spec in specs {
        let param_ids: Vec<String> = spec.params.iter().map(TypeDesc::display_name).collect();
        let id_str = ids::method_id(class_name, &spec.name, &param_ids);
        if kept.iter().any(|&m| resolver.method(m).id == id_str) {
            continue;
        }
        let mid = match old.iter().copied().find(|&m| resolver.method(m).id == id_str) {
            Some(mid) => mid,
            None => {
                added = true;
                resolver.push_method(MethodDecl {
                    id: id_str.clone(),
                    name: spec.name.clone(),
                    declaring: class,
                    modifiers: spec.modifiers,
                    type_params: Vec::new(),
                    params: Vec::new(),
                    return_type: None,
                    is_varargs: false,
                    is_default: false,
                    super_method: None,
                })
            }
        };
        let type_params: Vec<TypeVarId> = spec
            .type_params
            .iter()
            .map(|(name, bound)| {
                resolver.intern_type_var(TypeVarOwner::Method(mid), &id_str, name, bound.clone())
            })
            .collect();
        resolver.method_mut(mid).type_params = type_params;
        let scope = TypeScope::Method(mid);
        let params: Vec<JavaType> = spec
            .params
            .iter()
            .map(|desc| type_or_object(resolver, desc, scope))
            .collect();
        let return_type = spec
            .return_type
            .as_ref()
            .and_then(|desc| resolver.type_for_desc(desc, scope));
        let method = resolver.method_mut(mid);
        method.modifiers = spec.modifiers;
        method.params = params;
        method.return_type = return_type;
        method.is_varargs = spec.is_varargs;
        method.is_default = spec.is_default;
        // The supertype may have changed; recompute the override lazily.
        method.super_method = None;
        kept.push(mid);
    }
    let removed = old.iter().any(|m| !kept.contains(m));
    resolver.class_mut(class).methods = kept;
    added || removed
}

fn merge_constructors(
    resolver: &mut Resolver,
    class: ClassId,
    class_name: &str,
    specs: Vec<CtorSpec>,
) -> bool {
    let simple_name = resolver.class(class).simple_name.clone();
    let old = resolver.class(class).constructors.clone();
    let mut kept = Vec::with_capacity(specs.len());
    let mut added = false;
    for spec in specs {
        let param_ids: Vec<String> = spec.params.iter().map(TypeDesc::display_name).collect();
        let id_str = ids::constructor_id(class_name, &param_ids);
        if kept.iter().any(|&c| resolver.constructor(c).id == id_str) {
            continue;
        }
        let cid = match old
            .iter()
            .copied()
            .find(|&c| resolver.constructor(c).id == id_str)
        {
            Some(cid) => cid,
            None => {
                added = true;
                resolver.push_constructor(ConstructorDecl {
                    id: id_str.clone(),
                    name: simple_name.clone(),
                    declaring: class,
                    modifiers: spec.modifiers,
                    type_params: Vec::new(),
                    params: Vec::new(),
                    is_varargs: false,
                    super_constructor: None,
                })
            }
        };
        let type_params: Vec<TypeVarId> = spec
            .type_params
            .iter()
            .map(|(name, bound)| {
                resolver.intern_type_var(TypeVarOwner::Constructor(cid), &id_str, name, bound.clone())
            })
            .collect();
        resolver.constructor_mut(cid).type_params = type_params;
        let scope = TypeScope::Constructor(cid);
        let params: Vec<JavaType> = spec
            .params
            .iter()
            .map(|desc| type_or_object(resolver, desc, scope))
            .collect();
        let ctor = resolver.constructor_mut(cid);
        ctor.modifiers = spec.modifiers;
        ctor.params = params;
        ctor.is_varargs = spec.is_varargs;
        ctor.super_constructor = None;
        kept.push(cid);
    }
    let removed = old.iter().any(|c| !kept.contains(c));
    resolver.class_mut(class).constructors = kept;
    added || removed
}

fn type_or_object(resolver: &mut Resolver, desc: &TypeDesc, scope: TypeScope) -> JavaType {
    match resolver.type_for_desc(desc, scope) {
        Some(ty) => ty,
        None => JavaType::Class(resolver.object_class()),
    }
}
