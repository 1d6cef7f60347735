use serde::{Deserialize, Serialize};

/// A structural description of a Java type as an external source spells it.
///
/// This is the exchange shape between the engine and its collaborators
/// (compiled-class stubs, the parsed-source read model). Descriptors carry no
/// identity; the resolver interns them into its own type graph on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeDesc {
    /// A class or primitive referenced by qualified name (`java.lang.String`,
    /// `int`). Array classes may also be spelled inline as `Comp[]`.
    Name(String),
    /// An array of the component type.
    Array(Box<TypeDesc>),
    /// A parameterized type: raw type name plus ordered type arguments.
    Parameterized { raw: String, args: Vec<TypeDesc> },
    /// A type variable, resolved by name against the enclosing class or
    /// executable when the descriptor is interned.
    Variable(String),
    /// A wildcard, carried as its most useful bound (`? extends T` as `T`,
    /// unbounded as `None`). The resolver collapses wildcards to the bound.
    Wildcard(Option<Box<TypeDesc>>),
}

impl TypeDesc {
    pub fn name(name: impl Into<String>) -> TypeDesc {
        TypeDesc::Name(name.into())
    }

    pub fn array(component: TypeDesc) -> TypeDesc {
        TypeDesc::Array(Box::new(component))
    }

    pub fn parameterized(raw: impl Into<String>, args: Vec<TypeDesc>) -> TypeDesc {
        TypeDesc::Parameterized {
            raw: raw.into(),
            args,
        }
    }

    pub fn variable(name: impl Into<String>) -> TypeDesc {
        TypeDesc::Variable(name.into())
    }

    /// The display name of this descriptor, matching the id scheme's naming
    /// for the corresponding resolved type.
    pub fn display_name(&self) -> String {
        match self {
            TypeDesc::Name(name) => name.clone(),
            TypeDesc::Array(component) => format!("{}[]", component.display_name()),
            TypeDesc::Parameterized { raw, args } => {
                if args.is_empty() {
                    raw.clone()
                } else {
                    let args: Vec<String> = args.iter().map(TypeDesc::display_name).collect();
                    format!("{}<{}>", raw, args.join(","))
                }
            }
            TypeDesc::Variable(name) => name.clone(),
            TypeDesc::Wildcard(Some(bound)) => bound.display_name(),
            TypeDesc::Wildcard(None) => "java.lang.Object".to_string(),
        }
    }
}
