//! Declaration records stored in the resolver's arenas.

use lyra_core::{ClassKind, Modifiers, TypeDesc};

use crate::decl::{
    ClassId, ConstructorId, FieldId, JavaType, MethodId, PackageId, TypeVarId,
};

/// Where a class record's content comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassOrigin {
    /// Compiled class read through a `ClassProvider` stub.
    Compiled,
    /// Editable class backed by a parsed source tree.
    Source,
    /// Primitive or array record synthesized by the resolver itself.
    Synthesized,
}

/// One class record.
///
/// Supertype and interfaces are kept as structural descriptors and resolved
/// through the resolver on demand, so a class can refer to types that do not
/// exist yet while the user is still writing them.
#[derive(Debug)]
pub struct ClassDecl {
    /// Deterministic id: the qualified name, arrays as `Comp[]`.
    pub id: String,
    pub name: String,
    pub simple_name: String,
    pub modifiers: Modifiers,
    pub kind: ClassKind,
    pub origin: ClassOrigin,
    pub package: Option<PackageId>,
    pub enclosing: Option<ClassId>,
    pub is_primitive: bool,
    pub is_array: bool,
    pub array_component: Option<ClassId>,
    /// Generic extends-clause reference; `None` only for `java.lang.Object`,
    /// primitives and unpopulated shells.
    pub super_desc: Option<TypeDesc>,
    pub interface_descs: Vec<TypeDesc>,
    pub type_params: Vec<TypeVarId>,
    pub fields: Vec<FieldId>,
    pub methods: Vec<MethodId>,
    pub constructors: Vec<ConstructorId>,
    pub inner_classes: Vec<ClassId>,
    /// False for shells whose members have not been read yet; member
    /// accessors trigger a refresh when they see it.
    pub populated: bool,
}

#[derive(Debug)]
pub struct FieldDecl {
    pub id: String,
    pub name: String,
    pub declaring: ClassId,
    pub modifiers: Modifiers,
    /// `None` while the declared type fails to parse or resolve.
    pub ty: Option<JavaType>,
    pub is_enum_constant: bool,
}

#[derive(Debug)]
pub struct MethodDecl {
    pub id: String,
    pub name: String,
    pub declaring: ClassId,
    pub modifiers: Modifiers,
    pub type_params: Vec<TypeVarId>,
    pub params: Vec<JavaType>,
    /// `None` while the declared return type fails to parse or resolve.
    pub return_type: Option<JavaType>,
    pub is_varargs: bool,
    pub is_default: bool,
    /// Override cache: outer `None` = not computed yet, inner `None` = the
    /// search ran and found nothing.
    pub super_method: Option<Option<MethodId>>,
}

#[derive(Debug)]
pub struct ConstructorDecl {
    pub id: String,
    /// Constructors are named after their class.
    pub name: String,
    pub declaring: ClassId,
    pub modifiers: Modifiers,
    pub type_params: Vec<TypeVarId>,
    pub params: Vec<JavaType>,
    pub is_varargs: bool,
    pub super_constructor: Option<Option<ConstructorId>>,
}

/// What declares a type variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeVarOwner {
    Class(ClassId),
    Method(MethodId),
    Constructor(ConstructorId),
}

#[derive(Debug)]
pub struct TypeVarDecl {
    pub id: String,
    pub name: String,
    pub owner: TypeVarOwner,
    /// Upper bound descriptor; `None` reads as `java.lang.Object`.
    pub bound: Option<TypeDesc>,
}

/// A parameterization of a generic class, interned by shape.
#[derive(Debug)]
pub struct ParamTypeDecl {
    pub id: String,
    pub name: String,
    pub raw: ClassId,
    pub args: Vec<JavaType>,
}

/// A generic array type, used only when the component is itself generic.
#[derive(Debug)]
pub struct ArrayTypeDecl {
    pub id: String,
    pub name: String,
    pub component: JavaType,
}

#[derive(Debug)]
pub struct PackageDecl {
    pub id: String,
    pub name: String,
    pub simple_name: String,
    pub parent: Option<PackageId>,
}

/// A method or constructor, for code shared by call matching and generic
/// resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Callable {
    Method(MethodId),
    Constructor(ConstructorId),
}

/// Lexical scope for resolving type-variable references by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeScope {
    #[default]
    None,
    Class(ClassId),
    Method(MethodId),
    Constructor(ConstructorId),
}
