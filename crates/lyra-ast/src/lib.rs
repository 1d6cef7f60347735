//! The parsed-source surface of the Lyra engine.
//!
//! A [`SourceClass`] is the narrow view of a class declaration that the
//! resolver's source content updater reads out of a syntax tree. It is a
//! read model, not an AST: expressions, statements and trivia never appear
//! here. Types are structural [`TypeDesc`] references, and any of them may be
//! `None` where the source is still incomplete — the updater substitutes
//! `java.lang.Object` so analysis keeps going while the user types.

use lyra_core::{ClassKind, Modifiers, TypeDesc};
use serde::{Deserialize, Serialize};

/// One class declaration as read from a parsed source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceClass {
    pub simple_name: String,
    /// Qualified package name, empty for the default package.
    pub package: String,
    /// Qualified name of the enclosing class, for nested declarations.
    pub enclosing: Option<String>,
    pub modifiers: Modifiers,
    pub kind: ClassKind,
    /// Extends clause; `None` reads as `java.lang.Object`.
    pub super_type: Option<TypeDesc>,
    pub interfaces: Vec<TypeDesc>,
    pub type_params: Vec<SourceTypeParam>,
    /// Declared enum constants, in declaration order.
    pub enum_constants: Vec<String>,
    pub fields: Vec<SourceField>,
    pub methods: Vec<SourceMethod>,
    pub constructors: Vec<SourceConstructor>,
    pub inner_classes: Vec<SourceClass>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTypeParam {
    pub name: String,
    pub bound: Option<TypeDesc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceField {
    pub name: String,
    pub modifiers: Modifiers,
    /// `None` while the declared type fails to parse or resolve.
    pub ty: Option<TypeDesc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMethod {
    pub name: String,
    pub modifiers: Modifiers,
    pub type_params: Vec<SourceTypeParam>,
    pub params: Vec<SourceParam>,
    /// `None` while the return type fails to parse or resolve.
    pub return_type: Option<TypeDesc>,
    pub is_varargs: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConstructor {
    pub modifiers: Modifiers,
    pub type_params: Vec<SourceTypeParam>,
    pub params: Vec<SourceParam>,
    pub is_varargs: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceParam {
    pub name: String,
    pub ty: Option<TypeDesc>,
}

impl SourceClass {
    /// Starts a public class declaration in the given package.
    pub fn new(package: impl Into<String>, simple_name: impl Into<String>) -> SourceClass {
        SourceClass {
            simple_name: simple_name.into(),
            package: package.into(),
            enclosing: None,
            modifiers: Modifiers::PUBLIC,
            kind: ClassKind::Class,
            super_type: None,
            interfaces: Vec::new(),
            type_params: Vec::new(),
            enum_constants: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            inner_classes: Vec::new(),
        }
    }

    /// Qualified name: `package.Simple`, or `Outer$Simple` when nested.
    pub fn qualified_name(&self) -> String {
        if let Some(enclosing) = &self.enclosing {
            return format!("{enclosing}${}", self.simple_name);
        }
        if self.package.is_empty() {
            self.simple_name.clone()
        } else {
            format!("{}.{}", self.package, self.simple_name)
        }
    }

    pub fn with_kind(mut self, kind: ClassKind) -> SourceClass {
        self.kind = kind;
        self
    }

    pub fn with_super(mut self, super_type: TypeDesc) -> SourceClass {
        self.super_type = Some(super_type);
        self
    }

    pub fn with_interface(mut self, interface: TypeDesc) -> SourceClass {
        self.interfaces.push(interface);
        self
    }

    pub fn with_type_param(
        mut self,
        name: impl Into<String>,
        bound: Option<TypeDesc>,
    ) -> SourceClass {
        self.type_params.push(SourceTypeParam {
            name: name.into(),
            bound,
        });
        self
    }

    pub fn with_enum_constant(mut self, name: impl Into<String>) -> SourceClass {
        self.enum_constants.push(name.into());
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, ty: Option<TypeDesc>) -> SourceClass {
        self.fields.push(SourceField {
            name: name.into(),
            modifiers: Modifiers::PUBLIC,
            ty,
        });
        self
    }

    pub fn with_method(mut self, method: SourceMethod) -> SourceClass {
        self.methods.push(method);
        self
    }

    pub fn with_constructor(mut self, constructor: SourceConstructor) -> SourceClass {
        self.constructors.push(constructor);
        self
    }

    pub fn with_inner_class(mut self, mut inner: SourceClass) -> SourceClass {
        inner.enclosing = Some(self.qualified_name());
        inner.package = self.package.clone();
        self.inner_classes.push(inner);
        self
    }
}

impl SourceMethod {
    pub fn new(name: impl Into<String>, return_type: Option<TypeDesc>) -> SourceMethod {
        SourceMethod {
            name: name.into(),
            modifiers: Modifiers::PUBLIC,
            type_params: Vec::new(),
            params: Vec::new(),
            return_type,
            is_varargs: false,
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, ty: Option<TypeDesc>) -> SourceMethod {
        self.params.push(SourceParam {
            name: name.into(),
            ty,
        });
        self
    }

    pub fn with_type_param(
        mut self,
        name: impl Into<String>,
        bound: Option<TypeDesc>,
    ) -> SourceMethod {
        self.type_params.push(SourceTypeParam {
            name: name.into(),
            bound,
        });
        self
    }

    pub fn varargs(mut self) -> SourceMethod {
        self.is_varargs = true;
        self
    }
}

impl SourceConstructor {
    pub fn new() -> SourceConstructor {
        SourceConstructor {
            modifiers: Modifiers::PUBLIC,
            type_params: Vec::new(),
            params: Vec::new(),
            is_varargs: false,
        }
    }

    pub fn with_param(
        mut self,
        name: impl Into<String>,
        ty: Option<TypeDesc>,
    ) -> SourceConstructor {
        self.params.push(SourceParam {
            name: name.into(),
            ty,
        });
        self
    }
}

impl Default for SourceConstructor {
    fn default() -> SourceConstructor {
        SourceConstructor::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn qualified_names() {
        let outer = SourceClass::new("com.example", "Outer");
        assert_eq!(outer.qualified_name(), "com.example.Outer");

        let with_inner = outer.with_inner_class(SourceClass::new("", "Inner"));
        assert_eq!(
            with_inner.inner_classes[0].qualified_name(),
            "com.example.Outer$Inner"
        );

        assert_eq!(SourceClass::new("", "Scratch").qualified_name(), "Scratch");
    }

    #[test]
    fn incomplete_member_types_are_representable() {
        let class = SourceClass::new("com.example", "Draft")
            .with_field("pending", None)
            .with_method(SourceMethod::new("run", None).with_param("arg", None));
        assert_eq!(class.fields[0].ty, None);
        assert_eq!(class.methods[0].return_type, None);
        assert_eq!(class.methods[0].params[0].ty, None);
    }
}
