//! The per-session identity cache.
//!
//! A [`Resolver`] owns every declaration record of one analysis session in
//! typed arenas and hands out copyable ids. The identity contract: any
//! `*_for` lookup called twice with equivalent input yields the same id, and
//! there is never more than one live record per deterministic id string.
//! Everything is populated lazily; a class is first interned as an empty
//! shell (registered in the name cache before its content is read, so
//! re-entrant lookups during population terminate) and filled in by its
//! content updater on first member access.

use std::collections::HashMap;

use lyra_ast::SourceClass;
use lyra_core::{ids, ClassKind, Modifiers, TypeDesc};
use lyra_stub::{ClassProvider, PackageEntry};

use crate::class::{
    ArrayTypeDecl, Callable, ClassDecl, ClassOrigin, ConstructorDecl, FieldDecl, MethodDecl,
    PackageDecl, ParamTypeDecl, TypeScope, TypeVarDecl, TypeVarOwner,
};
use crate::decl::{
    ArrayTypeId, ClassId, ConstructorId, Decl, FieldId, JavaType, LocalVarDecl, LocalVarId,
    MethodId, PackageId, ParamTypeId, TypeVarId,
};
use crate::update::{ContentUpdater, SourceUpdater, StubUpdater};

pub struct Resolver {
    provider: Box<dyn ClassProvider>,
    classes: Vec<ClassDecl>,
    fields: Vec<FieldDecl>,
    methods: Vec<MethodDecl>,
    constructors: Vec<ConstructorDecl>,
    packages: Vec<PackageDecl>,
    type_vars: Vec<TypeVarDecl>,
    param_types: Vec<ParamTypeDecl>,
    array_types: Vec<ArrayTypeDecl>,
    local_vars: Vec<LocalVarDecl>,
    class_by_name: HashMap<String, ClassId>,
    package_by_name: HashMap<String, PackageId>,
    type_var_by_id: HashMap<String, TypeVarId>,
    param_type_by_id: HashMap<String, ParamTypeId>,
    array_type_by_id: HashMap<String, ArrayTypeId>,
    updaters: HashMap<ClassId, Box<dyn ContentUpdater>>,
    literals: Vec<LocalVarId>,
}

impl Resolver {
    /// Starts a session over the given class source.
    ///
    /// The literal words (`true`, `false`, `null`, `this`, `super`) are
    /// minted here as session-scoped local variables, so nothing about the
    /// session leaks through globals.
    pub fn new(provider: impl ClassProvider + 'static) -> Resolver {
        let mut resolver = Resolver {
            provider: Box::new(provider),
            classes: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            packages: Vec::new(),
            type_vars: Vec::new(),
            param_types: Vec::new(),
            array_types: Vec::new(),
            local_vars: Vec::new(),
            class_by_name: HashMap::new(),
            package_by_name: HashMap::new(),
            type_var_by_id: HashMap::new(),
            param_type_by_id: HashMap::new(),
            array_type_by_id: HashMap::new(),
            updaters: HashMap::new(),
            literals: Vec::new(),
        };
        let boolean = resolver.synthesize_primitive("boolean");
        let boolean = Some(JavaType::Class(boolean));
        for (name, ty) in [
            ("true", boolean),
            ("false", boolean),
            ("null", None),
            ("this", None),
            ("super", None),
        ] {
            let id = resolver.local_var(name, ty, format!("lyra.session.{name}"));
            resolver.literals.push(id);
        }
        resolver
    }

    pub(crate) fn provider(&self) -> &dyn ClassProvider {
        self.provider.as_ref()
    }

    // ---- record access ----

    pub fn class(&self, id: ClassId) -> &ClassDecl {
        &self.classes[id.index()]
    }

    pub fn field(&self, id: FieldId) -> &FieldDecl {
        &self.fields[id.index()]
    }

    pub fn method(&self, id: MethodId) -> &MethodDecl {
        &self.methods[id.index()]
    }

    pub fn constructor(&self, id: ConstructorId) -> &ConstructorDecl {
        &self.constructors[id.index()]
    }

    pub fn package(&self, id: PackageId) -> &PackageDecl {
        &self.packages[id.index()]
    }

    pub fn type_var(&self, id: TypeVarId) -> &TypeVarDecl {
        &self.type_vars[id.index()]
    }

    pub fn param_type(&self, id: ParamTypeId) -> &ParamTypeDecl {
        &self.param_types[id.index()]
    }

    pub fn array_type(&self, id: ArrayTypeId) -> &ArrayTypeDecl {
        &self.array_types[id.index()]
    }

    pub fn local_var_decl(&self, id: LocalVarId) -> &LocalVarDecl {
        &self.local_vars[id.index()]
    }

    pub(crate) fn class_mut(&mut self, id: ClassId) -> &mut ClassDecl {
        &mut self.classes[id.index()]
    }

    pub(crate) fn field_mut(&mut self, id: FieldId) -> &mut FieldDecl {
        &mut self.fields[id.index()]
    }

    pub(crate) fn method_mut(&mut self, id: MethodId) -> &mut MethodDecl {
        &mut self.methods[id.index()]
    }

    pub(crate) fn constructor_mut(&mut self, id: ConstructorId) -> &mut ConstructorDecl {
        &mut self.constructors[id.index()]
    }

    pub(crate) fn push_field(&mut self, decl: FieldDecl) -> FieldId {
        let id = FieldId(self.fields.len() as u32);
        self.fields.push(decl);
        id
    }

    pub(crate) fn push_method(&mut self, decl: MethodDecl) -> MethodId {
        let id = MethodId(self.methods.len() as u32);
        self.methods.push(decl);
        id
    }

    pub(crate) fn push_constructor(&mut self, decl: ConstructorDecl) -> ConstructorId {
        let id = ConstructorId(self.constructors.len() as u32);
        self.constructors.push(decl);
        id
    }

    /// The display/id name of a type handle.
    pub fn type_name(&self, ty: JavaType) -> String {
        match ty {
            JavaType::Class(id) => self.classes[id.index()].name.clone(),
            JavaType::Parameterized(id) => self.param_types[id.index()].name.clone(),
            JavaType::Variable(id) => self.type_vars[id.index()].name.clone(),
            JavaType::Array(id) => self.array_types[id.index()].name.clone(),
        }
    }

    // ---- class lookup ----

    /// Resolves a class by qualified name.
    ///
    /// Primitives and `Comp[]` array spellings are synthesized on first use;
    /// unqualified names are retried under `java.lang.`. Unknown names are
    /// `None`, never an error.
    pub fn class_for_name(&mut self, name: &str) -> Option<ClassId> {
        if let Some(&id) = self.class_by_name.get(name) {
            return Some(id);
        }
        if lyra_core::is_primitive_name(name) {
            return Some(self.synthesize_primitive(name));
        }
        if let Some(component) = name.strip_suffix("[]") {
            let component = self.class_for_name(component)?;
            return Some(self.array_class_for(component));
        }
        match self.provider.class_stub(name) {
            Ok(Some(_)) => Some(self.register_shell(name)),
            Ok(None) => {
                if !name.contains('.') {
                    let in_lang = format!("java.lang.{name}");
                    if let Some(id) = self.class_for_name(&in_lang) {
                        self.class_by_name.insert(name.to_string(), id);
                        return Some(id);
                    }
                }
                None
            }
            Err(err) => {
                // The provider knows the name but cannot read its metadata.
                // Intern the shell anyway; the updater retries on refresh.
                tracing::warn!(name, error = %err, "class metadata unreadable");
                Some(self.register_shell(name))
            }
        }
    }

    /// Resolves (or re-binds) an editable class backed by a parsed tree.
    ///
    /// The qualified name keeps its identity across calls; handing in a newly
    /// parsed tree swaps the class's content source and marks it for
    /// re-population on next access.
    pub fn class_for_source(&mut self, source: &SourceClass) -> ClassId {
        let name = source.qualified_name();
        let id = match self.class_by_name.get(&name) {
            Some(&id) => id,
            None => {
                tracing::debug!(name = %name, "interning source class");
                let (package, enclosing) = self.owner_of(&name);
                let decl = ClassDecl {
                    id: name.clone(),
                    name: name.clone(),
                    simple_name: source.simple_name.clone(),
                    modifiers: source.modifiers,
                    kind: source.kind,
                    origin: ClassOrigin::Source,
                    package,
                    enclosing,
                    is_primitive: false,
                    is_array: false,
                    array_component: None,
                    super_desc: Some(TypeDesc::name("java.lang.Object")),
                    interface_descs: Vec::new(),
                    type_params: Vec::new(),
                    fields: Vec::new(),
                    methods: Vec::new(),
                    constructors: Vec::new(),
                    inner_classes: Vec::new(),
                    populated: false,
                };
                self.register_class(decl)
            }
        };
        let class = self.class_mut(id);
        class.origin = ClassOrigin::Source;
        class.populated = false;
        self.updaters.insert(id, Box::new(SourceUpdater::new(source.clone())));
        id
    }

    fn register_shell(&mut self, name: &str) -> ClassId {
        tracing::debug!(name, "interning compiled class");
        let (package, enclosing) = self.owner_of(name);
        let decl = ClassDecl {
            id: name.to_string(),
            name: name.to_string(),
            simple_name: lyra_core::simple_name(name).to_string(),
            modifiers: Modifiers::PUBLIC,
            kind: ClassKind::Class,
            origin: ClassOrigin::Compiled,
            package,
            enclosing,
            is_primitive: false,
            is_array: false,
            array_component: None,
            super_desc: (name != "java.lang.Object").then(|| TypeDesc::name("java.lang.Object")),
            interface_descs: Vec::new(),
            type_params: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            inner_classes: Vec::new(),
            populated: false,
        };
        let id = self.register_class(decl);
        self.updaters.insert(id, Box::new(StubUpdater));
        id
    }

    fn register_class(&mut self, decl: ClassDecl) -> ClassId {
        if self.class_by_name.contains_key(&decl.name) {
            tracing::error!(name = %decl.name, "second class record for one id");
            panic!("identity violation: duplicate class record `{}`", decl.name);
        }
        let id = ClassId(self.classes.len() as u32);
        self.class_by_name.insert(decl.name.clone(), id);
        self.classes.push(decl);
        id
    }

    /// Package and enclosing-class back-references for a qualified name.
    fn owner_of(&mut self, name: &str) -> (Option<PackageId>, Option<ClassId>) {
        if let Some(dollar) = name.rfind('$') {
            let outer = name[..dollar].to_string();
            let enclosing = self.class_for_name(&outer);
            let package = enclosing.and_then(|c| self.classes[c.index()].package);
            (package, enclosing)
        } else if let Some(dot) = name.rfind('.') {
            let package = name[..dot].to_string();
            (Some(self.intern_package(&package)), None)
        } else {
            (Some(self.intern_package("")), None)
        }
    }

    fn synthesize_primitive(&mut self, name: &str) -> ClassId {
        if let Some(&id) = self.class_by_name.get(name) {
            return id;
        }
        let decl = ClassDecl {
            id: name.to_string(),
            name: name.to_string(),
            simple_name: name.to_string(),
            modifiers: Modifiers::PUBLIC | Modifiers::FINAL,
            kind: ClassKind::Class,
            origin: ClassOrigin::Synthesized,
            package: None,
            enclosing: None,
            is_primitive: true,
            is_array: false,
            array_component: None,
            super_desc: None,
            interface_descs: Vec::new(),
            type_params: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            inner_classes: Vec::new(),
            populated: true,
        };
        self.register_class(decl)
    }

    /// The array class over a component class. Synthesized once per
    /// component, carrying the `length` field; never refreshed.
    pub fn array_class_for(&mut self, component: ClassId) -> ClassId {
        let name = ids::array_id(&self.classes[component.index()].name);
        if let Some(&id) = self.class_by_name.get(&name) {
            return id;
        }
        let int_class = self.synthesize_primitive("int");
        let package = self.classes[component.index()].package;
        let decl = ClassDecl {
            id: name.clone(),
            name: name.clone(),
            simple_name: format!("{}[]", self.classes[component.index()].simple_name),
            modifiers: Modifiers::PUBLIC | Modifiers::FINAL,
            kind: ClassKind::Class,
            origin: ClassOrigin::Synthesized,
            package,
            enclosing: None,
            is_primitive: false,
            is_array: true,
            array_component: Some(component),
            super_desc: Some(TypeDesc::name("java.lang.Object")),
            interface_descs: Vec::new(),
            type_params: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            inner_classes: Vec::new(),
            populated: true,
        };
        let id = self.register_class(decl);
        let length = self.push_field(FieldDecl {
            id: ids::field_id(&name, "length"),
            name: "length".to_string(),
            declaring: id,
            modifiers: Modifiers::PUBLIC | Modifiers::FINAL,
            ty: Some(JavaType::Class(int_class)),
            is_enum_constant: false,
        });
        self.classes[id.index()].fields.push(length);
        id
    }

    // ---- packages ----

    /// Resolves a package by qualified name; the root package is `""`.
    ///
    /// A package is known if the provider lists children for it or some
    /// already-interned class lives under it.
    pub fn package_for_name(&mut self, name: &str) -> Option<PackageId> {
        if let Some(&id) = self.package_by_name.get(name) {
            return Some(id);
        }
        if name.is_empty() {
            return Some(self.intern_package(""));
        }
        let known = !self.provider.package_children(name).is_empty()
            || self
                .class_by_name
                .keys()
                .any(|c| c.len() > name.len() && c.starts_with(name) && c.as_bytes()[name.len()] == b'.');
        if !known {
            return None;
        }
        Some(self.intern_package(name))
    }

    fn intern_package(&mut self, name: &str) -> PackageId {
        if let Some(&id) = self.package_by_name.get(name) {
            return id;
        }
        let parent = if name.is_empty() {
            None
        } else {
            let parent_name = name.rfind('.').map(|dot| &name[..dot]).unwrap_or("");
            Some(self.intern_package(parent_name))
        };
        let id = PackageId(self.packages.len() as u32);
        self.packages.push(PackageDecl {
            id: name.to_string(),
            name: name.to_string(),
            simple_name: lyra_core::simple_name(name).to_string(),
            parent,
        });
        self.package_by_name.insert(name.to_string(), id);
        id
    }

    /// Enumerates a package's direct children from the provider.
    pub fn package_children_of(&mut self, package: PackageId) -> Vec<Decl> {
        let name = self.packages[package.index()].name.clone();
        let mut children = Vec::new();
        for entry in self.provider.package_children(&name) {
            match entry {
                PackageEntry::Package(p) => {
                    let id = self.intern_package(&p);
                    children.push(Decl::Package(id));
                }
                PackageEntry::Class(c) => {
                    if let Some(id) = self.class_for_name(&c) {
                        children.push(Decl::Class(id));
                    }
                }
            }
        }
        children
    }

    // ---- type interning ----

    /// Resolves a structural descriptor to a type handle.
    ///
    /// Type-variable references resolve by name against the scope (the
    /// executable's own variables first, then its class and enclosing
    /// classes). Wildcards collapse to their bound. Unresolvable
    /// parameterization arguments degrade to `java.lang.Object` so one
    /// unknown name does not sink the whole type.
    pub fn type_for_desc(&mut self, desc: &TypeDesc, scope: TypeScope) -> Option<JavaType> {
        match desc {
            TypeDesc::Name(name) => self.class_for_name(name).map(JavaType::Class),
            TypeDesc::Array(component) => {
                let component = self.type_for_desc(component, scope)?;
                Some(self.array_type_for(component))
            }
            TypeDesc::Parameterized { raw, args } => {
                let raw = self.class_for_name(raw)?;
                let mut arg_types = Vec::with_capacity(args.len());
                for arg in args {
                    let ty = match self.type_for_desc(arg, scope) {
                        Some(ty) => ty,
                        None => self.object_type()?,
                    };
                    arg_types.push(ty);
                }
                Some(self.parameterized_type_for(raw, arg_types))
            }
            TypeDesc::Variable(name) => {
                Some(JavaType::Variable(self.type_var_in_scope(name, scope)?))
            }
            TypeDesc::Wildcard(bound) => match bound {
                Some(bound) => self.type_for_desc(bound, scope),
                None => self.object_type(),
            },
        }
    }

    /// The parameterization of `raw` with the given arguments, interned by
    /// shape. No arguments means the raw type itself.
    pub fn parameterized_type_for(&mut self, raw: ClassId, args: Vec<JavaType>) -> JavaType {
        if args.is_empty() {
            return JavaType::Class(raw);
        }
        let raw_name = self.classes[raw.index()].name.clone();
        let arg_names: Vec<String> = args.iter().map(|a| self.type_name(*a)).collect();
        let id_str = ids::parameterized_id(&raw_name, &arg_names);
        if let Some(&id) = self.param_type_by_id.get(&id_str) {
            return JavaType::Parameterized(id);
        }
        let id = ParamTypeId(self.param_types.len() as u32);
        self.param_types.push(ParamTypeDecl {
            id: id_str.clone(),
            name: id_str.clone(),
            raw,
            args,
        });
        self.param_type_by_id.insert(id_str, id);
        JavaType::Parameterized(id)
    }

    /// The array type over any component. Class components yield the array
    /// class; generic components yield an interned generic array type.
    pub fn array_type_for(&mut self, component: JavaType) -> JavaType {
        match component {
            JavaType::Class(c) => JavaType::Class(self.array_class_for(c)),
            other => {
                let name = ids::array_id(&self.type_name(other));
                if let Some(&id) = self.array_type_by_id.get(&name) {
                    return JavaType::Array(id);
                }
                let id = ArrayTypeId(self.array_types.len() as u32);
                self.array_types.push(ArrayTypeDecl {
                    id: name.clone(),
                    name: name.clone(),
                    component: other,
                });
                self.array_type_by_id.insert(name, id);
                JavaType::Array(id)
            }
        }
    }

    pub(crate) fn intern_type_var(
        &mut self,
        owner: TypeVarOwner,
        owner_id: &str,
        name: &str,
        bound: Option<TypeDesc>,
    ) -> TypeVarId {
        let id_str = ids::type_var_id(owner_id, name);
        if let Some(&tv) = self.type_var_by_id.get(&id_str) {
            let decl = &mut self.type_vars[tv.index()];
            decl.owner = owner;
            decl.bound = bound;
            return tv;
        }
        let tv = TypeVarId(self.type_vars.len() as u32);
        self.type_vars.push(TypeVarDecl {
            id: id_str.clone(),
            name: name.to_string(),
            owner,
            bound,
        });
        self.type_var_by_id.insert(id_str, tv);
        tv
    }

    fn type_var_in_scope(&mut self, name: &str, scope: TypeScope) -> Option<TypeVarId> {
        match scope {
            TypeScope::None => None,
            TypeScope::Class(class) => self.class_type_var(class, name),
            TypeScope::Method(m) => {
                let found = self.methods[m.index()]
                    .type_params
                    .iter()
                    .copied()
                    .find(|tv| self.type_vars[tv.index()].name == name);
                if found.is_some() {
                    return found;
                }
                let declaring = self.methods[m.index()].declaring;
                self.class_type_var(declaring, name)
            }
            TypeScope::Constructor(c) => {
                let found = self.constructors[c.index()]
                    .type_params
                    .iter()
                    .copied()
                    .find(|tv| self.type_vars[tv.index()].name == name);
                if found.is_some() {
                    return found;
                }
                let declaring = self.constructors[c.index()].declaring;
                self.class_type_var(declaring, name)
            }
        }
    }

    fn class_type_var(&mut self, mut class: ClassId, name: &str) -> Option<TypeVarId> {
        loop {
            self.ensure_populated(class);
            let found = self.classes[class.index()]
                .type_params
                .iter()
                .copied()
                .find(|tv| self.type_vars[tv.index()].name == name);
            if found.is_some() {
                return found;
            }
            class = self.classes[class.index()].enclosing?;
        }
    }

    /// `java.lang.Object`, synthesized when even the provider does not know
    /// it, so degraded classpaths still have a top type to fall back on.
    pub fn object_class(&mut self) -> ClassId {
        if let Some(id) = self.class_for_name("java.lang.Object") {
            return id;
        }
        let decl = ClassDecl {
            id: "java.lang.Object".to_string(),
            name: "java.lang.Object".to_string(),
            simple_name: "Object".to_string(),
            modifiers: Modifiers::PUBLIC,
            kind: ClassKind::Class,
            origin: ClassOrigin::Synthesized,
            package: Some(self.intern_package("java.lang")),
            enclosing: None,
            is_primitive: false,
            is_array: false,
            array_component: None,
            super_desc: None,
            interface_descs: Vec::new(),
            type_params: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            inner_classes: Vec::new(),
            populated: true,
        };
        self.register_class(decl)
    }

    fn object_type(&mut self) -> Option<JavaType> {
        Some(JavaType::Class(self.object_class()))
    }

    // ---- locals and literals ----

    /// Mints a local-variable record. The id is caller-supplied; the
    /// resolver never merges locals.
    pub fn local_var(
        &mut self,
        name: impl Into<String>,
        ty: Option<JavaType>,
        id: impl Into<String>,
    ) -> LocalVarId {
        let lv = LocalVarId(self.local_vars.len() as u32);
        self.local_vars.push(LocalVarDecl {
            id: id.into(),
            name: name.into(),
            ty,
        });
        lv
    }

    /// The session literal set: `true`, `false`, `null`, `this`, `super`.
    pub fn global_literals(&self) -> &[LocalVarId] {
        &self.literals
    }

    // ---- refresh and member access ----

    /// Re-reads a class's content from its source and merges it into the
    /// existing records. Returns whether any member was added or removed.
    pub fn refresh(&mut self, class: ClassId) -> bool {
        self.classes[class.index()].populated = true;
        let Some(mut updater) = self.updaters.remove(&class) else {
            return false;
        };
        let changed = updater.refresh(self, class);
        self.updaters.insert(class, updater);
        changed
    }

    pub(crate) fn ensure_populated(&mut self, class: ClassId) {
        if !self.classes[class.index()].populated {
            self.refresh(class);
        }
    }

    pub fn fields_of(&mut self, class: ClassId) -> Vec<FieldId> {
        self.ensure_populated(class);
        self.classes[class.index()].fields.clone()
    }

    pub fn methods_of(&mut self, class: ClassId) -> Vec<MethodId> {
        self.ensure_populated(class);
        self.classes[class.index()].methods.clone()
    }

    pub fn constructors_of(&mut self, class: ClassId) -> Vec<ConstructorId> {
        self.ensure_populated(class);
        self.classes[class.index()].constructors.clone()
    }

    pub fn inner_classes_of(&mut self, class: ClassId) -> Vec<ClassId> {
        self.ensure_populated(class);
        self.classes[class.index()].inner_classes.clone()
    }

    pub fn type_params_of(&mut self, class: ClassId) -> Vec<TypeVarId> {
        self.ensure_populated(class);
        self.classes[class.index()].type_params.clone()
    }

    /// The resolved superclass, walking through the generic supertype.
    pub fn super_class_of(&mut self, class: ClassId) -> Option<ClassId> {
        let ty = self.super_type_of(class)?;
        self.eval_class(ty)
    }

    /// The generic supertype as declared (`extends ArrayList<String>` keeps
    /// its arguments).
    pub fn super_type_of(&mut self, class: ClassId) -> Option<JavaType> {
        self.ensure_populated(class);
        let desc = self.classes[class.index()].super_desc.clone()?;
        self.type_for_desc(&desc, TypeScope::Class(class))
    }

    /// Implemented interfaces, resolved to their raw classes.
    pub fn interfaces_of(&mut self, class: ClassId) -> Vec<ClassId> {
        self.interface_types_of(class)
            .into_iter()
            .filter_map(|ty| self.eval_class(ty))
            .collect()
    }

    /// Implemented interfaces with their generic arguments intact.
    pub fn interface_types_of(&mut self, class: ClassId) -> Vec<JavaType> {
        self.ensure_populated(class);
        let descs = self.classes[class.index()].interface_descs.clone();
        descs
            .iter()
            .filter_map(|desc| self.type_for_desc(desc, TypeScope::Class(class)))
            .collect()
    }

    /// The component type of an array class or generic array type.
    pub fn component_type_of(&mut self, ty: JavaType) -> Option<JavaType> {
        match ty {
            JavaType::Class(c) => self.classes[c.index()].array_component.map(JavaType::Class),
            JavaType::Array(a) => Some(self.array_types[a.index()].component),
            _ => None,
        }
    }

    // ---- evaluation ----

    /// What a declaration evaluates to when referenced in an expression.
    pub fn eval_type(&self, decl: Decl) -> Option<JavaType> {
        match decl {
            Decl::Class(c) => Some(JavaType::Class(c)),
            Decl::Field(f) => self.fields[f.index()].ty,
            Decl::Method(m) => self.methods[m.index()].return_type,
            Decl::Constructor(c) => Some(JavaType::Class(self.constructors[c.index()].declaring)),
            Decl::LocalVar(l) => self.local_vars[l.index()].ty,
            Decl::ParamType(p) => Some(JavaType::Parameterized(p)),
            Decl::TypeVar(t) => Some(JavaType::Variable(t)),
            Decl::ArrayType(a) => Some(JavaType::Array(a)),
            Decl::Package(_) | Decl::Word(_) => None,
        }
    }

    /// The most basic class behind a type: raw class of a parameterization,
    /// bound of a type variable, array class of a generic array.
    pub fn eval_class(&mut self, ty: JavaType) -> Option<ClassId> {
        let mut seen = Vec::new();
        self.eval_class_impl(ty, &mut seen)
    }

    fn eval_class_impl(&mut self, ty: JavaType, seen: &mut Vec<TypeVarId>) -> Option<ClassId> {
        match ty {
            JavaType::Class(c) => Some(c),
            JavaType::Parameterized(p) => Some(self.param_types[p.index()].raw),
            JavaType::Variable(v) => {
                // Bound chains can be cyclic while the user edits
                // (`T extends U, U extends T`); a revisited variable reads
                // as Object.
                if seen.contains(&v) {
                    return self.class_for_name("java.lang.Object");
                }
                seen.push(v);
                let bound = self.type_vars[v.index()].bound.clone();
                let scope = match self.type_vars[v.index()].owner {
                    TypeVarOwner::Class(c) => TypeScope::Class(c),
                    TypeVarOwner::Method(m) => TypeScope::Method(m),
                    TypeVarOwner::Constructor(c) => TypeScope::Constructor(c),
                };
                match bound {
                    Some(desc) => {
                        let bound_ty = self.type_for_desc(&desc, scope)?;
                        self.eval_class_impl(bound_ty, seen)
                    }
                    None => self.class_for_name("java.lang.Object"),
                }
            }
            JavaType::Array(a) => {
                let component = self.array_types[a.index()].component;
                let component_class = self.eval_class_impl(component, seen)?;
                Some(self.array_class_for(component_class))
            }
        }
    }

    // ---- callables ----

    pub fn callable_declaring(&self, callable: Callable) -> ClassId {
        match callable {
            Callable::Method(m) => self.methods[m.index()].declaring,
            Callable::Constructor(c) => self.constructors[c.index()].declaring,
        }
    }

    pub fn callable_params(&self, callable: Callable) -> Vec<JavaType> {
        match callable {
            Callable::Method(m) => self.methods[m.index()].params.clone(),
            Callable::Constructor(c) => self.constructors[c.index()].params.clone(),
        }
    }

    pub fn callable_type_params(&self, callable: Callable) -> Vec<TypeVarId> {
        match callable {
            Callable::Method(m) => self.methods[m.index()].type_params.clone(),
            Callable::Constructor(c) => self.constructors[c.index()].type_params.clone(),
        }
    }

    pub fn callable_is_varargs(&self, callable: Callable) -> bool {
        match callable {
            Callable::Method(m) => self.methods[m.index()].is_varargs,
            Callable::Constructor(c) => self.constructors[c.index()].is_varargs,
        }
    }
}
