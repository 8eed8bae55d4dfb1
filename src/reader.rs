//! Component metadata reading
//!
//! Reads one component's metadata marker directory: the metadata file
//! itself, plus optional sibling strings and custom-types files. The
//! custom types table is only loaded when a prop actually references a
//! non-internal type name, and the loaded table lives exactly as long as
//! the read — there is no cross-read cache.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::constants::{META_FILE, STRINGS_FILE, TYPES_FILE};
use crate::error::{MetaError, Result};
use crate::fsread::read_json_file;
use crate::meta::{ComponentKind, ComponentMeta, TypeDef};
use crate::schema::CompiledSchemas;
use crate::strings::StringTable;
use crate::typecheck::{check_prop_strings, check_typedef_strings};

/// Read and validate the sibling strings file, if present.
pub async fn read_strings(
    meta_dir: &Path,
    schemas: &CompiledSchemas,
) -> Result<Option<StringTable>> {
    let strings_file = meta_dir.join(STRINGS_FILE);
    let Some(value) = read_json_file(&strings_file).await? else {
        return Ok(None);
    };

    let violations = schemas.check_strings(&value);
    if !violations.is_empty() {
        return Err(MetaError::InvalidMetadata {
            file: strings_file,
            violations,
        });
    }

    Ok(Some(serde_json::from_value(value)?))
}

/// Read and validate the sibling custom-types file, if present.
///
/// Every loaded type definition is cross-checked against the owning
/// component's string table.
pub async fn read_typedefs(
    meta_dir: &Path,
    strings: &StringTable,
    schemas: &CompiledSchemas,
) -> Result<Option<HashMap<String, TypeDef>>> {
    let types_file = meta_dir.join(TYPES_FILE);
    let Some(value) = read_json_file(&types_file).await? else {
        return Ok(None);
    };

    let violations = schemas.check_typedefs(&value);
    if !violations.is_empty() {
        return Err(MetaError::InvalidMetadata {
            file: types_file,
            violations,
        });
    }

    let types: HashMap<String, TypeDef> = serde_json::from_value(value)?;

    for (type_name, typedef) in &types {
        check_typedef_strings(type_name, typedef, strings)?;
    }

    Ok(Some(types))
}

/// Read one component's metadata from its marker directory.
///
/// Returns `Ok(None)` when the metadata file is absent, which the caller
/// treats as "no component here". Everything else either yields a fully
/// validated [`ComponentMeta`] with defaults filled, or fails.
pub async fn read_component_meta(
    meta_dir: &Path,
    schemas: &CompiledSchemas,
) -> Result<Option<ComponentMeta>> {
    let meta_file = meta_dir.join(META_FILE);
    let Some(value) = read_json_file(&meta_file).await? else {
        return Ok(None);
    };

    let violations = schemas.check_component_meta(&value);
    if !violations.is_empty() {
        return Err(MetaError::InvalidMetadata {
            file: meta_file,
            violations,
        });
    }

    let mut meta: ComponentMeta = serde_json::from_value(value)?;
    debug!(component = %meta.display_name, dir = %meta_dir.display(), "read component metadata");

    // Strings may be inline; otherwise the sibling file is consulted,
    // defaulting to an empty table.
    let strings = match meta.strings.take() {
        Some(inline) => inline,
        None => read_strings(meta_dir, schemas).await?.unwrap_or_default(),
    };

    for group in &meta.prop_groups {
        if !strings.has_key(&group.text_key) {
            return Err(MetaError::UnknownStringKey {
                key: group.text_key.clone(),
                location: format!(
                    "prop groups list of component '{}'",
                    meta.display_name
                ),
            });
        }
    }

    // The types table is loaded on the first non-internal type reference
    // and carried through the rest of the prop loop.
    let mut types = meta.types.take();

    for (prop_name, prop_meta) in &meta.props {
        if let Some(group) = &prop_meta.group {
            let group_defined = meta.prop_groups.iter().any(|g| &g.name == group);
            if !group_defined {
                return Err(MetaError::UnknownPropGroup {
                    group: group.clone(),
                    prop: prop_name.clone(),
                    component: meta.display_name.clone(),
                });
            }
        }

        if prop_meta.prop_type().is_internal() {
            check_prop_strings(prop_name, prop_meta, &strings)?;
        } else {
            if types.is_none() {
                types = Some(
                    read_typedefs(meta_dir, &strings, schemas)
                        .await?
                        .unwrap_or_default(),
                );
            }

            let known = types
                .as_ref()
                .is_some_and(|table| table.contains_key(&prop_meta.type_name));
            if !known {
                return Err(MetaError::UnknownType {
                    name: prop_meta.type_name.clone(),
                });
            }
        }
    }

    if meta.kind == ComponentKind::Composite {
        check_layouts(&meta, &strings)?;
    }

    meta.types = types;
    meta.strings = Some(strings);

    Ok(Some(meta))
}

fn check_layouts(meta: &ComponentMeta, strings: &StringTable) -> Result<()> {
    let layouts = match &meta.layouts {
        Some(layouts) if !layouts.is_empty() => layouts,
        _ => {
            return Err(MetaError::MissingField {
                field: "layouts",
                location: format!("composite component '{}'", meta.display_name),
            });
        }
    };

    for (i, layout) in layouts.iter().enumerate() {
        let layout_loc =
            |what: &str| format!("{what} of layout {i} of component '{}'", meta.display_name);

        if let Some(key) = &layout.text_key {
            if !strings.has_key(key) {
                return Err(MetaError::UnknownStringKey {
                    key: key.clone(),
                    location: layout_loc("textKey"),
                });
            }
        }

        if let Some(key) = &layout.description_text_key {
            if !strings.has_key(key) {
                return Err(MetaError::UnknownStringKey {
                    key: key.clone(),
                    location: layout_loc("descriptionTextKey"),
                });
            }
        }

        for (j, region) in layout.regions.iter().enumerate() {
            let region_loc = |what: &str| {
                format!(
                    "{what} of region {j} of layout {i} of component '{}'",
                    meta.display_name
                )
            };

            if !strings.has_key(&region.text_key) {
                return Err(MetaError::UnknownStringKey {
                    key: region.text_key.clone(),
                    location: region_loc("textKey"),
                });
            }

            if !strings.has_key(&region.description_text_key) {
                return Err(MetaError::UnknownStringKey {
                    key: region.description_text_key.clone(),
                    location: region_loc("descriptionTextKey"),
                });
            }
        }
    }

    Ok(())
}
