//! Cross-reference checks over prop type trees
//!
//! Schema validation guarantees shape; the checks here walk the validated
//! prop trees depth-first and verify everything the schema cannot: that
//! all referenced string keys resolve, that type-dependent fields are
//! present, and that structural type searches terminate on
//! self-referential shapes.

use std::collections::{HashMap, HashSet};

use crate::error::{MetaError, Result};
use crate::meta::{PropMeta, PropType, TypeDef};
use crate::strings::StringTable;

fn require_string(strings: &StringTable, key: &str, location: String) -> Result<()> {
    if strings.has_key(key) {
        Ok(())
    } else {
        Err(MetaError::UnknownStringKey {
            key: key.to_string(),
            location,
        })
    }
}

/// Depth-first validation of every string key reachable from a prop.
///
/// Array element paths extend as `prop.[]`, shape field paths as
/// `prop.field`, so a failure names the exact position in the tree.
pub fn check_prop_strings(prop_path: &str, prop: &PropMeta, strings: &StringTable) -> Result<()> {
    if let Some(key) = &prop.text_key {
        require_string(strings, key, format!("textKey of prop '{prop_path}'"))?;
    }

    if let Some(key) = &prop.description_text_key {
        require_string(
            strings,
            key,
            format!("descriptionTextKey of prop '{prop_path}'"),
        )?;
    }

    match prop.prop_type() {
        PropType::OneOf => {
            let options = prop.options.as_ref().ok_or_else(|| MetaError::MissingField {
                field: "options",
                location: format!("prop '{prop_path}' of type 'oneOf'"),
            })?;

            for (i, option) in options.iter().enumerate() {
                require_string(
                    strings,
                    &option.text_key,
                    format!("option {i} of prop '{prop_path}'"),
                )?;
            }
        }

        PropType::ArrayOf => {
            let of_type = prop.of_type.as_ref().ok_or_else(|| MetaError::MissingField {
                field: "ofType",
                location: format!("prop '{prop_path}' of type 'arrayOf'"),
            })?;

            check_prop_strings(&format!("{prop_path}.[]"), of_type, strings)?;
        }

        PropType::Shape => {
            let fields = prop.fields.as_ref().ok_or_else(|| MetaError::MissingField {
                field: "fields",
                location: format!("prop '{prop_path}' of type 'shape'"),
            })?;

            for (field_name, field) in fields {
                check_prop_strings(&format!("{prop_path}.{field_name}"), field, strings)?;
            }
        }

        PropType::String => {
            if let Some(key) = prop.static_default_text_key() {
                require_string(strings, key, format!("defaultTextKey of prop '{prop_path}'"))?;
            }
        }

        _ => {}
    }

    Ok(())
}

/// Validate string keys reachable from a library-level type definition.
pub fn check_typedef_strings(type_name: &str, typedef: &TypeDef, strings: &StringTable) -> Result<()> {
    match typedef.prop_type() {
        PropType::OneOf => {
            let options = typedef.options.as_ref().ok_or_else(|| MetaError::MissingField {
                field: "options",
                location: format!("type '{type_name}' (oneOf)"),
            })?;

            for (i, option) in options.iter().enumerate() {
                require_string(
                    strings,
                    &option.text_key,
                    format!("option {i} of type '{type_name}'"),
                )?;
            }
        }

        PropType::ArrayOf => {
            let of_type = typedef.of_type.as_ref().ok_or_else(|| MetaError::MissingField {
                field: "ofType",
                location: format!("type '{type_name}' (arrayOf)"),
            })?;

            check_prop_strings("[]", of_type, strings)?;
        }

        PropType::Shape => {
            let fields = typedef.fields.as_ref().ok_or_else(|| MetaError::MissingField {
                field: "fields",
                location: format!("type '{type_name}' (shape)"),
            })?;

            for (field_name, field) in fields {
                check_prop_strings(field_name, field, strings)?;
            }
        }

        _ => {}
    }

    Ok(())
}

/// Whether a prop tree structurally contains a sub-field whose type is
/// `target`.
///
/// Custom type names resolve through the `types` table. Type tables built
/// from generated sources (GraphQL introspection and the like) may contain
/// self-referential shapes, so the search keeps a visited set keyed by
/// declared type name and treats a revisit as "not found" instead of
/// recursing unboundedly. The result is deterministic for a given table.
pub fn shape_contains_type(
    prop: &PropMeta,
    target: &str,
    types: &HashMap<String, TypeDef>,
) -> bool {
    let mut visited = HashSet::new();
    prop_contains(prop, target, types, &mut visited)
}

fn prop_contains(
    prop: &PropMeta,
    target: &str,
    types: &HashMap<String, TypeDef>,
    visited: &mut HashSet<String>,
) -> bool {
    if prop.type_name == target {
        return true;
    }

    match prop.prop_type() {
        PropType::ArrayOf => prop
            .of_type
            .as_deref()
            .is_some_and(|of| prop_contains(of, target, types, visited)),

        PropType::Shape => prop.fields.as_ref().is_some_and(|fields| {
            fields
                .values()
                .any(|field| prop_contains(field, target, types, visited))
        }),

        PropType::Custom(name) => {
            if !visited.insert(name.to_string()) {
                // Already examined this type on the current search.
                return false;
            }
            types
                .get(name)
                .is_some_and(|typedef| typedef_contains(typedef, target, types, visited))
        }

        _ => false,
    }
}

fn typedef_contains(
    typedef: &TypeDef,
    target: &str,
    types: &HashMap<String, TypeDef>,
    visited: &mut HashSet<String>,
) -> bool {
    match typedef.prop_type() {
        PropType::ArrayOf => typedef
            .of_type
            .as_deref()
            .is_some_and(|of| prop_contains(of, target, types, visited)),

        PropType::Shape => typedef.fields.as_ref().is_some_and(|fields| {
            fields
                .values()
                .any(|field| prop_contains(field, target, types, visited))
        }),

        _ => false,
    }
}
