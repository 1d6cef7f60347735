//! The compiled-class surface of the Lyra engine.
//!
//! A [`ClassStub`] is everything the engine needs to know about one compiled
//! class: modifiers, supertype, interfaces, type parameters and declared
//! members, all described structurally via [`lyra_core::TypeDesc`]. Stubs are
//! produced by a [`ClassProvider`] — live reflection, a classfile reader, or
//! the offline [`Reflect`] substitute for platforms without reflection — and
//! consumed by the resolver's compiled-source content updater.

mod memory;
mod provider;
mod stub;

pub use memory::{minimal_jdk, MemoryProvider};
pub use provider::{ClassProvider, InvokeError, PackageEntry, Reflect, StubError, Value};
pub use stub::{ClassStub, ConstructorStub, FieldStub, MethodStub, TypeParamStub};
