//! The deterministic id scheme for declarations.
//!
//! Ids are the sole identity/equality key for every declaration the engine
//! hands out, and double as the offline reflection substitute's dispatch key,
//! so the format is a bit-stable contract:
//!
//! - class: the qualified name (`java.lang.String`), arrays as `Comp[]`
//! - field: `ClassId.fieldName`
//! - method: `ClassId.methodName(ParamId,ParamId,...)`
//! - constructor: `ClassId(ParamId,...)`
//! - type variable: `OwnerId.Name`
//! - parameterized type: `RawId<ArgName,ArgName>`

/// Returns the id for an array class with the given component id.
pub fn array_id(component_id: &str) -> String {
    format!("{component_id}[]")
}

/// Returns the id for a field of the given class.
pub fn field_id(class_id: &str, field_name: &str) -> String {
    format!("{class_id}.{field_name}")
}

/// Returns the id for a method of the given class.
pub fn method_id(class_id: &str, method_name: &str, param_ids: &[impl AsRef<str>]) -> String {
    format!(
        "{class_id}.{method_name}({})",
        join_ids(param_ids)
    )
}

/// Returns the id for a constructor of the given class.
pub fn constructor_id(class_id: &str, param_ids: &[impl AsRef<str>]) -> String {
    format!("{class_id}({})", join_ids(param_ids))
}

/// Returns the id for a type variable declared on a class or executable.
pub fn type_var_id(owner_id: &str, var_name: &str) -> String {
    format!("{owner_id}.{var_name}")
}

/// Returns the id for a parameterized type.
///
/// A parameterization with no arguments is just the raw type.
pub fn parameterized_id(raw_id: &str, arg_names: &[impl AsRef<str>]) -> String {
    if arg_names.is_empty() {
        return raw_id.to_string();
    }
    format!("{raw_id}<{}>", join_ids(arg_names))
}

fn join_ids(ids: &[impl AsRef<str>]) -> String {
    let mut out = String::new();
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(id.as_ref());
    }
    out
}
