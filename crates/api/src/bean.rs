//! Bean accessor conventions.
//!
//! A setter is `setXxx` with exactly one parameter, a getter is `getXxx` with
//! no parameters and a non-void return, or `isXxx` returning `boolean`.

use crate::types::TypeRef;

const SETTER_PREFIX: &str = "set";
const GETTER_PREFIX: &str = "get";
const IS_PREFIX: &str = "is";

/// Lower-case the first character, leaving the rest untouched.
pub fn uncapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Property written by a setter, or `None` if the method is not a setter.
pub fn setter_property_name(method_name: &str, parameter_count: usize) -> Option<String> {
    if parameter_count != 1 {
        return None;
    }
    accessor_suffix(method_name, SETTER_PREFIX).map(uncapitalize)
}

/// Property read by a getter, or `None` if the method is not a getter.
pub fn getter_property_name(
    method_name: &str,
    parameter_count: usize,
    return_type: &TypeRef,
) -> Option<String> {
    if parameter_count != 0 || return_type.is_void() {
        return None;
    }
    if let Some(suffix) = accessor_suffix(method_name, GETTER_PREFIX) {
        return Some(uncapitalize(suffix));
    }
    if return_type.is_boolean() {
        return accessor_suffix(method_name, IS_PREFIX).map(uncapitalize);
    }
    None
}

fn accessor_suffix<'a>(method_name: &'a str, prefix: &str) -> Option<&'a str> {
    method_name
        .strip_prefix(prefix)
        .filter(|suffix| !suffix.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setter_detection() {
        assert_eq!(setter_property_name("setName", 1), Some("name".to_string()));
        assert_eq!(setter_property_name("setURL", 1), Some("uRL".to_string()));
        assert_eq!(setter_property_name("set", 1), None);
        assert_eq!(setter_property_name("setName", 2), None);
        assert_eq!(setter_property_name("reset", 1), None);
    }

    #[test]
    fn test_getter_detection() {
        let string = TypeRef::new("java.lang.String");
        let boolean = TypeRef::new("boolean");
        assert_eq!(getter_property_name("getName", 0, &string), Some("name".to_string()));
        assert_eq!(getter_property_name("isActive", 0, &boolean), Some("active".to_string()));
        assert_eq!(getter_property_name("isActive", 0, &string), None);
        assert_eq!(getter_property_name("getName", 0, &TypeRef::void()), None);
        assert_eq!(getter_property_name("getName", 1, &string), None);
        assert_eq!(getter_property_name("get", 0, &string), None);
    }
}
