use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};

use lyra_core::{Modifiers, TypeDesc};

use crate::{
    ClassProvider, ClassStub, InvokeError, MethodStub, PackageEntry, Reflect, StubError, Value,
};

type InvokeFn = Box<dyn Fn(Option<&dyn Any>, &[&dyn Any]) -> Result<Value, InvokeError>>;

/// An in-memory [`ClassProvider`] and [`Reflect`] substitute.
///
/// This is the backing store for generated offline reflection tables and the
/// standard test fixture. Package listings are derived from the registered
/// class names, so inserting `java.util.List` makes both the `java` and
/// `java.util` packages visible.
#[derive(Default)]
pub struct MemoryProvider {
    classes: BTreeMap<String, ClassStub>,
    invokers: BTreeMap<String, InvokeFn>,
    denied: BTreeSet<String>,
}

impl MemoryProvider {
    pub fn new() -> MemoryProvider {
        MemoryProvider::default()
    }

    /// Registers a class stub, replacing any previous stub with the same name.
    pub fn insert(&mut self, stub: ClassStub) {
        self.classes.insert(stub.name.clone(), stub);
    }

    /// Removes a class stub, as if the class vanished from the classpath.
    pub fn remove(&mut self, name: &str) -> Option<ClassStub> {
        self.classes.remove(name)
    }

    /// Returns a mutable handle to a registered stub.
    pub fn stub_mut(&mut self, name: &str) -> Option<&mut ClassStub> {
        self.classes.get_mut(name)
    }

    /// Marks a class so metadata reads fail with [`StubError::AccessDenied`].
    pub fn deny(&mut self, name: impl Into<String>) {
        self.denied.insert(name.into());
    }

    /// Clears a previous [`MemoryProvider::deny`] mark.
    pub fn allow(&mut self, name: &str) {
        self.denied.remove(name);
    }

    /// Serializes the class table, so generated offline tables can ship as
    /// data files next to the app.
    pub fn export_classes(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.classes)
    }

    /// Replaces the class table with a previously exported one. Invoke
    /// handlers are code and must be re-registered separately.
    pub fn import_classes(&mut self, json: &str) -> serde_json::Result<()> {
        self.classes = serde_json::from_str(json)?;
        Ok(())
    }

    /// Registers an invoke handler for a member id.
    pub fn register_invoker(
        &mut self,
        member_id: impl Into<String>,
        invoker: impl Fn(Option<&dyn Any>, &[&dyn Any]) -> Result<Value, InvokeError> + 'static,
    ) {
        self.invokers.insert(member_id.into(), Box::new(invoker));
    }
}

impl ClassProvider for MemoryProvider {
    fn class_stub(&self, name: &str) -> Result<Option<ClassStub>, StubError> {
        if self.denied.contains(name) {
            return Err(StubError::AccessDenied(name.to_string()));
        }
        Ok(self.classes.get(name).cloned())
    }

    fn package_children(&self, package: &str) -> Vec<PackageEntry> {
        let prefix = if package.is_empty() {
            String::new()
        } else {
            format!("{package}.")
        };

        let mut packages = BTreeSet::new();
        let mut classes = Vec::new();
        for name in self.classes.keys() {
            let Some(rest) = name.strip_prefix(&prefix) else {
                continue;
            };
            match rest.find('.') {
                Some(dot) => {
                    packages.insert(format!("{prefix}{}", &rest[..dot]));
                }
                // Nested classes are reachable through their outer class, not
                // through the package listing.
                None if !rest.contains('$') => classes.push(name.clone()),
                None => {}
            }
        }

        let mut children: Vec<PackageEntry> =
            packages.into_iter().map(PackageEntry::Package).collect();
        children.extend(classes.into_iter().map(PackageEntry::Class));
        children
    }
}

impl Reflect for MemoryProvider {
    fn invoke(
        &self,
        member_id: &str,
        receiver: Option<&dyn Any>,
        args: &[&dyn Any],
    ) -> Result<Value, InvokeError> {
        let invoker = self
            .invokers
            .get(member_id)
            .ok_or_else(|| InvokeError::UnknownMember(member_id.to_string()))?;
        invoker(receiver, args)
    }
}

/// A minimal `java.*` subset large enough for the engine's own tests and for
/// bootstrapping an analysis session without a real classpath.
pub fn minimal_jdk() -> MemoryProvider {
    let mut provider = MemoryProvider::new();

    let object = TypeDesc::name("java.lang.Object");
    let string = TypeDesc::name("java.lang.String");

    provider.insert(
        ClassStub::new("java.lang.Object")
            .with_constructor(vec![])
            .with_method("equals", vec![object.clone()], TypeDesc::name("boolean"))
            .with_method("hashCode", vec![], TypeDesc::name("int"))
            .with_method("toString", vec![], string.clone())
            .with_method("getClass", vec![], TypeDesc::name("java.lang.Class")),
    );

    provider.insert(ClassStub::new("java.lang.Class"));

    provider.insert(
        ClassStub::interface("java.lang.CharSequence")
            .with_method("length", vec![], TypeDesc::name("int"))
            .with_method("charAt", vec![TypeDesc::name("int")], TypeDesc::name("char")),
    );

    provider.insert(
        ClassStub::interface("java.lang.Comparable")
            .with_type_param("T", None)
            .with_method("compareTo", vec![TypeDesc::variable("T")], TypeDesc::name("int")),
    );

    provider.insert(
        ClassStub::interface("java.lang.Runnable").with_method("run", vec![], TypeDesc::name("void")),
    );

    let mut string_stub = ClassStub::new("java.lang.String")
        .with_interface(TypeDesc::parameterized("java.lang.Comparable", vec![string.clone()]))
        .with_interface(TypeDesc::name("java.lang.CharSequence"))
        .with_constructor(vec![])
        .with_constructor(vec![TypeDesc::array(TypeDesc::name("char"))])
        .with_method("length", vec![], TypeDesc::name("int"))
        .with_method("charAt", vec![TypeDesc::name("int")], TypeDesc::name("char"))
        .with_method(
            "substring",
            vec![TypeDesc::name("int"), TypeDesc::name("int")],
            string.clone(),
        )
        .with_method("concat", vec![string.clone()], string.clone())
        .with_method("isEmpty", vec![], TypeDesc::name("boolean"));
    string_stub.modifiers = Modifiers::PUBLIC | Modifiers::FINAL;
    string_stub = string_stub.with_method_stub(
        MethodStub::new(
            "format",
            vec![string.clone(), TypeDesc::array(object.clone())],
            string.clone(),
        )
        .static_()
        .varargs(),
    );
    provider.insert(string_stub);

    provider.insert(
        ClassStub::new("java.lang.Number")
            .with_method("intValue", vec![], TypeDesc::name("int"))
            .with_method("doubleValue", vec![], TypeDesc::name("double")),
    );

    let number = TypeDesc::name("java.lang.Number");
    for (boxed, primitive) in [
        ("java.lang.Integer", "int"),
        ("java.lang.Long", "long"),
        ("java.lang.Short", "short"),
        ("java.lang.Byte", "byte"),
        ("java.lang.Float", "float"),
        ("java.lang.Double", "double"),
    ] {
        provider.insert(
            ClassStub::new(boxed)
                .with_super(number.clone())
                .with_interface(TypeDesc::parameterized(
                    "java.lang.Comparable",
                    vec![TypeDesc::name(boxed)],
                ))
                .with_constructor(vec![TypeDesc::name(primitive)])
                .with_field("MAX_VALUE", TypeDesc::name(primitive)),
        );
    }
    provider.insert(
        ClassStub::new("java.lang.Boolean").with_constructor(vec![TypeDesc::name("boolean")]),
    );
    provider.insert(
        ClassStub::new("java.lang.Character").with_constructor(vec![TypeDesc::name("char")]),
    );

    provider.insert(
        ClassStub::interface("java.util.Collection")
            .with_type_param("E", None)
            .with_method("size", vec![], TypeDesc::name("int"))
            .with_method("add", vec![TypeDesc::variable("E")], TypeDesc::name("boolean")),
    );

    provider.insert(
        ClassStub::interface("java.util.List")
            .with_type_param("E", None)
            .with_interface(TypeDesc::parameterized(
                "java.util.Collection",
                vec![TypeDesc::variable("E")],
            ))
            .with_method("get", vec![TypeDesc::name("int")], TypeDesc::variable("E"))
            .with_method("add", vec![TypeDesc::variable("E")], TypeDesc::name("boolean")),
    );

    provider.insert(
        ClassStub::new("java.util.ArrayList")
            .with_type_param("E", None)
            .with_interface(TypeDesc::parameterized(
                "java.util.List",
                vec![TypeDesc::variable("E")],
            ))
            .with_constructor(vec![]),
    );

    provider.insert(
        ClassStub::interface("java.util.function.Function")
            .with_type_param("T", None)
            .with_type_param("R", None)
            .with_method("apply", vec![TypeDesc::variable("T")], TypeDesc::variable("R")),
    );

    provider
}
