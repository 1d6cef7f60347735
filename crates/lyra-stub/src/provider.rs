use std::any::Any;

use thiserror::Error;

use crate::ClassStub;

/// An opaque runtime value passed through the reflective invoke boundary.
pub type Value = Box<dyn Any>;

/// Errors raised by a [`ClassProvider`] while reading class metadata.
///
/// "Class not found" is not an error: providers answer that with `Ok(None)`,
/// since unknown names are routine while the user edits incomplete code.
#[derive(Debug, Error)]
pub enum StubError {
    #[error("access to metadata for `{0}` denied")]
    AccessDenied(String),
    #[error("malformed metadata for `{name}`: {reason}")]
    Malformed { name: String, reason: String },
}

/// Errors raised by the offline substitute's invoke dispatch.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("no invoker registered for member id `{0}`")]
    UnknownMember(String),
    #[error("invocation of `{member_id}` failed: {reason}")]
    Failed { member_id: String, reason: String },
}

/// One entry of a package listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageEntry {
    /// Qualified sub-package name.
    Package(String),
    /// Qualified top-level class name.
    Class(String),
}

/// The compiled-class collaborator contract.
///
/// Implementations are expected to be cheap to query repeatedly; the resolver
/// re-reads stubs on every refresh and does its own caching of the results.
pub trait ClassProvider {
    /// Returns the stub for a fully qualified class name, or `Ok(None)` if no
    /// such class exists on this provider's classpath.
    fn class_stub(&self, name: &str) -> Result<Option<ClassStub>, StubError>;

    /// Enumerates the direct children (classes and sub-packages) of a
    /// package. The root package is the empty string.
    fn package_children(&self, package: &str) -> Vec<PackageEntry> {
        let _ = package;
        Vec::new()
    }
}

/// The offline reflection substitute: a [`ClassProvider`] that can also
/// invoke members through a generated lookup table keyed by member id.
///
/// Member ids use the formats from [`lyra_core::ids`]:
/// `Class.method(Param,Param)` for methods, `Class.field` for fields and
/// `Class(Param,...)` for constructors.
pub trait Reflect: ClassProvider {
    fn invoke(
        &self,
        member_id: &str,
        receiver: Option<&dyn Any>,
        args: &[&dyn Any],
    ) -> Result<Value, InvokeError>;
}
