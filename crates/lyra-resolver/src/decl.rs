//! Declaration handles and the reserved-word table.
//!
//! Every declaration lives in an arena owned by the [`Resolver`] and is
//! referred to by a `u32` newtype id. Handle equality is id equality, and the
//! resolver guarantees one record per deterministic id string, so comparing
//! handles is the identity comparison the rest of the engine relies on.
//!
//! [`Resolver`]: crate::Resolver

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub(crate) u32);

        impl $name {
            #[inline]
            pub(crate) fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

arena_id!(ClassId);
arena_id!(FieldId);
arena_id!(MethodId);
arena_id!(ConstructorId);
arena_id!(PackageId);
arena_id!(TypeVarId);
arena_id!(ParamTypeId);
arena_id!(ArrayTypeId);
arena_id!(LocalVarId);

/// A resolved type handle.
///
/// Plain classes (including primitives and array classes) are `Class`;
/// `Array` is reserved for generic arrays whose component is itself a type
/// variable or parameterization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JavaType {
    Class(ClassId),
    Parameterized(ParamTypeId),
    Variable(TypeVarId),
    Array(ArrayTypeId),
}

/// A handle to any declaration the engine can hand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decl {
    Class(ClassId),
    Field(FieldId),
    Method(MethodId),
    Constructor(ConstructorId),
    Package(PackageId),
    LocalVar(LocalVarId),
    ParamType(ParamTypeId),
    TypeVar(TypeVarId),
    ArrayType(ArrayTypeId),
    Word(&'static Word),
}

/// The tag of a [`Decl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Class,
    Field,
    Method,
    Constructor,
    Package,
    LocalVar,
    ParamType,
    TypeVar,
    ArrayType,
    Word,
}

impl Decl {
    pub fn kind(self) -> DeclKind {
        match self {
            Decl::Class(_) => DeclKind::Class,
            Decl::Field(_) => DeclKind::Field,
            Decl::Method(_) => DeclKind::Method,
            Decl::Constructor(_) => DeclKind::Constructor,
            Decl::Package(_) => DeclKind::Package,
            Decl::LocalVar(_) => DeclKind::LocalVar,
            Decl::ParamType(_) => DeclKind::ParamType,
            Decl::TypeVar(_) => DeclKind::TypeVar,
            Decl::ArrayType(_) => DeclKind::ArrayType,
            Decl::Word(_) => DeclKind::Word,
        }
    }
}

impl From<JavaType> for Decl {
    fn from(ty: JavaType) -> Decl {
        match ty {
            JavaType::Class(id) => Decl::Class(id),
            JavaType::Parameterized(id) => Decl::ParamType(id),
            JavaType::Variable(id) => Decl::TypeVar(id),
            JavaType::Array(id) => Decl::ArrayType(id),
        }
    }
}

/// A local variable, REPL binding or session literal.
///
/// Local variables are caller-identified: the editor supplies the id, and the
/// resolver never merges or dedupes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalVarDecl {
    pub id: String,
    pub name: String,
    pub ty: Option<JavaType>,
}

/// The flavor of a reserved word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordKind {
    Modifier,
    Declaration,
    Statement,
}

/// A Java reserved word, offered alongside declarations in completion.
#[derive(Debug, PartialEq, Eq)]
pub struct Word {
    pub name: &'static str,
    pub kind: WordKind,
}

const fn word(name: &'static str, kind: WordKind) -> Word {
    Word { name, kind }
}

/// Every reserved word the engine knows, grouped by kind.
pub static RESERVED_WORDS: &[Word] = &[
    word("abstract", WordKind::Modifier),
    word("default", WordKind::Modifier),
    word("final", WordKind::Modifier),
    word("native", WordKind::Modifier),
    word("private", WordKind::Modifier),
    word("protected", WordKind::Modifier),
    word("public", WordKind::Modifier),
    word("static", WordKind::Modifier),
    word("synchronized", WordKind::Modifier),
    word("transient", WordKind::Modifier),
    word("volatile", WordKind::Modifier),
    word("class", WordKind::Declaration),
    word("enum", WordKind::Declaration),
    word("extends", WordKind::Declaration),
    word("implements", WordKind::Declaration),
    word("import", WordKind::Declaration),
    word("interface", WordKind::Declaration),
    word("package", WordKind::Declaration),
    word("throws", WordKind::Declaration),
    word("var", WordKind::Declaration),
    word("void", WordKind::Declaration),
    word("assert", WordKind::Statement),
    word("break", WordKind::Statement),
    word("case", WordKind::Statement),
    word("catch", WordKind::Statement),
    word("continue", WordKind::Statement),
    word("do", WordKind::Statement),
    word("else", WordKind::Statement),
    word("finally", WordKind::Statement),
    word("for", WordKind::Statement),
    word("if", WordKind::Statement),
    word("instanceof", WordKind::Statement),
    word("new", WordKind::Statement),
    word("return", WordKind::Statement),
    word("switch", WordKind::Statement),
    word("throw", WordKind::Statement),
    word("try", WordKind::Statement),
    word("while", WordKind::Statement),
];

/// Looks up a reserved word by spelling.
pub fn reserved_word(name: &str) -> Option<&'static Word> {
    RESERVED_WORDS.iter().find(|w| w.name == name)
}

/// All reserved words of one kind, for completion lists.
pub fn words_of_kind(kind: WordKind) -> impl Iterator<Item = &'static Word> {
    RESERVED_WORDS.iter().filter(move |w| w.kind == kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_word_lookup() {
        assert_eq!(reserved_word("class").map(|w| w.kind), Some(WordKind::Declaration));
        assert_eq!(reserved_word("while").map(|w| w.kind), Some(WordKind::Statement));
        assert_eq!(reserved_word("public").map(|w| w.kind), Some(WordKind::Modifier));
        assert_eq!(reserved_word("goto"), None);
    }

    #[test]
    fn decl_kind_tags() {
        assert_eq!(Decl::Class(ClassId(0)).kind(), DeclKind::Class);
        assert_eq!(Decl::from(JavaType::Variable(TypeVarId(3))).kind(), DeclKind::TypeVar);
    }
}
