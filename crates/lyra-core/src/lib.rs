//! Shared leaf types for the Lyra engine.
//!
//! This crate holds the pieces every other Lyra crate agrees on: Java modifier
//! bits, the class-kind tag, the deterministic id scheme used as the sole
//! identity key for declarations, and the [`TypeDesc`] descriptor tree by
//! which external sources (compiled-class providers, the parser) describe
//! types without touching the resolver's interned type graph.

pub mod ids;
mod modifiers;
mod type_desc;

pub use modifiers::Modifiers;
pub use type_desc::TypeDesc;

use serde::{Deserialize, Serialize};

/// The flavor of a class declaration.
///
/// Arrays and primitives are not kinds: they are synthesized class records
/// flagged separately, matching how the JVM reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

impl Default for ClassKind {
    fn default() -> Self {
        ClassKind::Class
    }
}

/// Returns whether `name` names a Java primitive type (or `void`).
pub fn is_primitive_name(name: &str) -> bool {
    matches!(
        name,
        "boolean" | "byte" | "char" | "short" | "int" | "long" | "float" | "double" | "void"
    )
}

/// Returns the boxed counterpart of a primitive type name.
pub fn boxed_name(primitive: &str) -> Option<&'static str> {
    Some(match primitive {
        "boolean" => "java.lang.Boolean",
        "byte" => "java.lang.Byte",
        "char" => "java.lang.Character",
        "short" => "java.lang.Short",
        "int" => "java.lang.Integer",
        "long" => "java.lang.Long",
        "float" => "java.lang.Float",
        "double" => "java.lang.Double",
        "void" => "java.lang.Void",
        _ => return None,
    })
}

/// Returns the primitive counterpart of a boxed type name.
pub fn unboxed_name(boxed: &str) -> Option<&'static str> {
    Some(match boxed {
        "java.lang.Boolean" => "boolean",
        "java.lang.Byte" => "byte",
        "java.lang.Character" => "char",
        "java.lang.Short" => "short",
        "java.lang.Integer" => "int",
        "java.lang.Long" => "long",
        "java.lang.Float" => "float",
        "java.lang.Double" => "double",
        "java.lang.Void" => "void",
        _ => return None,
    })
}

/// Returns the simple name of a qualified class name.
///
/// Handles both package separators (`.`) and nested-class separators (`$`):
/// `java.util.Map$Entry` yields `Entry`.
pub fn simple_name(qualified: &str) -> &str {
    let after_dot = qualified.rsplit('.').next().unwrap_or(qualified);
    after_dot.rsplit('$').next().unwrap_or(after_dot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_name_handles_nested_classes() {
        assert_eq!(simple_name("java.lang.String"), "String");
        assert_eq!(simple_name("java.util.Map$Entry"), "Entry");
        assert_eq!(simple_name("int"), "int");
    }

    #[test]
    fn boxing_round_trips() {
        assert_eq!(boxed_name("int"), Some("java.lang.Integer"));
        assert_eq!(unboxed_name("java.lang.Integer"), Some("int"));
        assert_eq!(boxed_name("java.lang.String"), None);
    }
}
