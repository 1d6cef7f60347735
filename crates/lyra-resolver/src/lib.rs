//! The Lyra symbol-resolution and type engine.
//!
//! One [`Resolver`] is one analysis session: an identity cache of every
//! class, member, package and type the session has touched, fed from two
//! kinds of content source (compiled stubs through a
//! [`lyra_stub::ClassProvider`], parsed trees through
//! [`lyra_ast::SourceClass`]) and refreshed in place so that ids held by the
//! editor stay valid across edits. On top of the cache sit the query layers:
//! generic type-variable resolution ([`generics`]), overload and override
//! matching ([`overload`]) and assignability ([`subtyping`]).
//!
//! The engine is resilient by default. Names that do not resolve are `None`,
//! unreadable metadata is logged and retried, half-typed declarations fall
//! back to `java.lang.Object`; the only panic is handing the resolver two
//! records for one id, which is a programming defect.

mod class;
mod decl;
pub mod generics;
pub mod overload;
mod resolver;
pub mod subtyping;
mod update;

pub use class::{
    ArrayTypeDecl, Callable, ClassDecl, ClassOrigin, ConstructorDecl, FieldDecl, MethodDecl,
    PackageDecl, ParamTypeDecl, TypeScope, TypeVarDecl, TypeVarOwner,
};
pub use decl::{
    reserved_word, words_of_kind, ArrayTypeId, ClassId, ConstructorId, Decl, DeclKind, FieldId,
    JavaType, LocalVarDecl, LocalVarId, MethodId, PackageId, ParamTypeId, TypeVarId, Word,
    WordKind, RESERVED_WORDS,
};
pub use resolver::Resolver;
pub use update::{ContentUpdater, SourceUpdater, StubUpdater};
