use lyra_core::{ClassKind, Modifiers, TypeDesc};
use serde::{Deserialize, Serialize};

/// A structural snapshot of one compiled class.
///
/// Inner classes are listed by qualified name only; the resolver pulls their
/// own stubs on demand. Enum constants appear as ordinary static fields, the
/// way compiled enums declare them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassStub {
    /// Qualified name, nested classes separated with `$`.
    pub name: String,
    pub modifiers: Modifiers,
    pub kind: ClassKind,
    /// Generic supertype reference, `None` only for `java.lang.Object`.
    pub super_class: Option<TypeDesc>,
    pub interfaces: Vec<TypeDesc>,
    pub type_params: Vec<TypeParamStub>,
    pub inner_classes: Vec<String>,
    pub fields: Vec<FieldStub>,
    pub methods: Vec<MethodStub>,
    pub constructors: Vec<ConstructorStub>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParamStub {
    pub name: String,
    /// Upper bound; `None` reads as `java.lang.Object`.
    pub bound: Option<TypeDesc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldStub {
    pub name: String,
    pub modifiers: Modifiers,
    pub ty: TypeDesc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodStub {
    pub name: String,
    pub modifiers: Modifiers,
    pub type_params: Vec<TypeParamStub>,
    pub params: Vec<TypeDesc>,
    pub return_type: TypeDesc,
    pub is_varargs: bool,
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorStub {
    pub modifiers: Modifiers,
    pub type_params: Vec<TypeParamStub>,
    pub params: Vec<TypeDesc>,
    pub is_varargs: bool,
}

impl ClassStub {
    /// Starts a public class stub extending `java.lang.Object`.
    pub fn new(name: impl Into<String>) -> ClassStub {
        let name = name.into();
        let super_class = if name == "java.lang.Object" {
            None
        } else {
            Some(TypeDesc::name("java.lang.Object"))
        };
        ClassStub {
            name,
            modifiers: Modifiers::PUBLIC,
            kind: ClassKind::Class,
            super_class,
            interfaces: Vec::new(),
            type_params: Vec::new(),
            inner_classes: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
        }
    }

    /// Starts a public interface stub.
    pub fn interface(name: impl Into<String>) -> ClassStub {
        let mut stub = ClassStub::new(name);
        stub.kind = ClassKind::Interface;
        stub.modifiers = Modifiers::PUBLIC | Modifiers::ABSTRACT;
        stub.super_class = Some(TypeDesc::name("java.lang.Object"));
        stub
    }

    pub fn with_kind(mut self, kind: ClassKind) -> ClassStub {
        self.kind = kind;
        self
    }

    pub fn with_super(mut self, super_class: TypeDesc) -> ClassStub {
        self.super_class = Some(super_class);
        self
    }

    pub fn with_interface(mut self, interface: TypeDesc) -> ClassStub {
        self.interfaces.push(interface);
        self
    }

    pub fn with_type_param(mut self, name: impl Into<String>, bound: Option<TypeDesc>) -> ClassStub {
        self.type_params.push(TypeParamStub {
            name: name.into(),
            bound,
        });
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, ty: TypeDesc) -> ClassStub {
        self.fields.push(FieldStub {
            name: name.into(),
            modifiers: Modifiers::PUBLIC,
            ty,
        });
        self
    }

    pub fn with_method(
        mut self,
        name: impl Into<String>,
        params: Vec<TypeDesc>,
        return_type: TypeDesc,
    ) -> ClassStub {
        self.methods.push(MethodStub {
            name: name.into(),
            modifiers: Modifiers::PUBLIC,
            type_params: Vec::new(),
            params,
            return_type,
            is_varargs: false,
            is_default: false,
        });
        self
    }

    pub fn with_method_stub(mut self, method: MethodStub) -> ClassStub {
        self.methods.push(method);
        self
    }

    pub fn with_constructor(mut self, params: Vec<TypeDesc>) -> ClassStub {
        self.constructors.push(ConstructorStub {
            modifiers: Modifiers::PUBLIC,
            type_params: Vec::new(),
            params,
            is_varargs: false,
        });
        self
    }

    pub fn with_inner_class(mut self, name: impl Into<String>) -> ClassStub {
        self.inner_classes.push(name.into());
        self
    }
}

impl MethodStub {
    pub fn new(
        name: impl Into<String>,
        params: Vec<TypeDesc>,
        return_type: TypeDesc,
    ) -> MethodStub {
        MethodStub {
            name: name.into(),
            modifiers: Modifiers::PUBLIC,
            type_params: Vec::new(),
            params,
            return_type,
            is_varargs: false,
            is_default: false,
        }
    }

    pub fn varargs(mut self) -> MethodStub {
        self.is_varargs = true;
        self
    }

    pub fn static_(mut self) -> MethodStub {
        self.modifiers = self.modifiers | Modifiers::STATIC;
        self
    }

    pub fn default_(mut self) -> MethodStub {
        self.is_default = true;
        self
    }

    pub fn with_type_param(mut self, name: impl Into<String>, bound: Option<TypeDesc>) -> MethodStub {
        self.type_params.push(TypeParamStub {
            name: name.into(),
            bound,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn object_stub_has_no_super() {
        assert_eq!(ClassStub::new("java.lang.Object").super_class, None);
        assert!(ClassStub::new("com.example.Foo").super_class.is_some());
    }

    #[test]
    fn interface_stub_is_abstract() {
        let stub = ClassStub::interface("java.lang.Runnable");
        assert_eq!(stub.kind, ClassKind::Interface);
        assert!(stub.modifiers.is_abstract());
    }
}
