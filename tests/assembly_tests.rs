//! Integration tests for library manifest assembly
//!
//! Each test builds a real library tree in a temp directory and runs the
//! full pipeline against it.

use std::fs;
use std::path::Path;

use serde_json::json;
use tempfile::{tempdir, TempDir};

use component_metadata::{
    gather_metadata, read_component_meta, CompiledSchemas, ComponentKind, MetaError,
};

fn write_json(path: &Path, value: &serde_json::Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

/// A library root with one declared component group and its string.
fn library_root() -> TempDir {
    let dir = tempdir().unwrap();
    write_json(
        &dir.path().join("library.json"),
        &json!({
            "namespace": "acme-ui",
            "globalStyle": false,
            "componentGroups": {
                "inputs": { "textKey": "group_inputs" }
            },
            "strings": {
                "group_inputs": { "en": "Inputs" }
            }
        }),
    );
    dir
}

/// Write a component at `rel` under the root, with its strings file
/// covering every key the metadata references.
fn write_component(root: &Path, rel: &str, meta: serde_json::Value) {
    let meta_dir = root.join(rel).join(".meta");
    let mut string_keys = vec!["label"];
    if let Some(extra) = meta.get("descriptionTextKey").and_then(|v| v.as_str()) {
        string_keys.push(extra);
    }

    let mut strings = serde_json::Map::new();
    for key in string_keys {
        strings.insert(key.to_string(), json!({ "en": "text" }));
    }

    write_json(&meta_dir.join("meta.json"), &meta);
    write_json(
        &meta_dir.join("strings.json"),
        &serde_json::Value::Object(strings),
    );
}

fn atomic(name: &str) -> serde_json::Value {
    json!({
        "displayName": name,
        "textKey": "label",
        "kind": "atomic"
    })
}

#[tokio::test]
async fn test_tree_walk_discovers_all_depths() {
    let root = library_root();

    // Components at depths 1, 2 and 3, with non-component noise around.
    write_component(root.path(), "Button", atomic("Button"));
    write_component(root.path(), "forms/TextField", atomic("TextField"));
    write_component(root.path(), "data/grid/DataGrid", atomic("DataGrid"));
    fs::create_dir_all(root.path().join("docs")).unwrap();
    fs::create_dir_all(root.path().join("forms/helpers")).unwrap();
    fs::write(root.path().join("README.md"), "readme").unwrap();

    let manifest = gather_metadata(root.path()).await.unwrap();

    assert_eq!(manifest.namespace, "acme-ui");
    assert_eq!(manifest.components.len(), 3);
    assert!(manifest.component("Button").is_some());
    assert!(manifest.component("TextField").is_some());
    assert!(manifest.component("DataGrid").is_some());
}

#[tokio::test]
async fn test_walk_stops_at_marker_directories() {
    let root = library_root();

    // A component's internal files are not re-scanned: the nested
    // component under Panel must not be discovered.
    write_component(root.path(), "Panel", atomic("Panel"));
    write_component(root.path(), "Panel/Inner", atomic("Inner"));

    let manifest = gather_metadata(root.path()).await.unwrap();

    assert_eq!(manifest.components.len(), 1);
    assert!(manifest.component("Panel").is_some());
    assert!(manifest.component("Inner").is_none());
}

#[tokio::test]
async fn test_read_component_meta_round_trip_with_defaults() {
    let root = library_root();
    write_component(root.path(), "Button", atomic("Button"));

    let schemas = CompiledSchemas::new();
    let meta = read_component_meta(&root.path().join("Button/.meta"), &schemas)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(meta.display_name, "Button");
    assert_eq!(meta.text_key, "label");
    assert_eq!(meta.kind, ComponentKind::Atomic);
    // Defaults filled, nothing else invented.
    assert!(meta.props.is_empty());
    assert!(meta.prop_groups.is_empty());
    assert!(meta.strings.as_ref().unwrap().has_key("label"));
    assert!(meta.types.is_none());
    assert!(meta.layouts.is_none());
}

#[tokio::test]
async fn test_missing_string_key_is_fatal_and_named() {
    let root = library_root();
    write_component(
        root.path(),
        "Button",
        json!({
            "displayName": "Button",
            "textKey": "label",
            "kind": "atomic",
            "props": {
                "title": { "type": "string", "textKey": "nonexistent_key" }
            }
        }),
    );

    let err = gather_metadata(root.path()).await.unwrap_err();
    assert!(err.to_string().contains("acme-ui"));
    match err.root_cause() {
        MetaError::UnknownStringKey { key, location } => {
            assert_eq!(key, "nonexistent_key");
            assert!(location.contains("'title'"));
        }
        other => panic!("expected UnknownStringKey, got {other:?}"),
    }
}

#[tokio::test]
async fn test_composite_requires_layouts() {
    let root = library_root();
    write_component(
        root.path(),
        "Split",
        json!({
            "displayName": "Split",
            "textKey": "label",
            "kind": "composite"
        }),
    );

    let err = gather_metadata(root.path()).await.unwrap_err();
    assert!(matches!(
        err.root_cause(),
        MetaError::MissingField { field: "layouts", .. }
    ));
}

#[tokio::test]
async fn test_composite_rejects_empty_layouts() {
    let root = library_root();
    write_component(
        root.path(),
        "Split",
        json!({
            "displayName": "Split",
            "textKey": "label",
            "kind": "composite",
            "layouts": []
        }),
    );

    let err = gather_metadata(root.path()).await.unwrap_err();
    assert!(matches!(
        err.root_cause(),
        MetaError::MissingField { field: "layouts", .. }
    ));
}

#[tokio::test]
async fn test_atomic_does_not_require_layouts() {
    let root = library_root();
    write_component(root.path(), "Button", atomic("Button"));

    let manifest = gather_metadata(root.path()).await.unwrap();
    assert!(manifest.component("Button").unwrap().layouts.is_none());
}

#[tokio::test]
async fn test_composite_with_valid_layouts() {
    let root = library_root();
    let meta_dir = root.path().join("Split/.meta");
    write_json(
        &meta_dir.join("meta.json"),
        &json!({
            "displayName": "Split",
            "textKey": "label",
            "kind": "composite",
            "layouts": [{
                "textKey": "layout_default",
                "regions": [{
                    "component": "Pane",
                    "textKey": "region_main",
                    "descriptionTextKey": "region_main_desc",
                    "defaultEnabled": true
                }]
            }]
        }),
    );
    write_json(
        &meta_dir.join("strings.json"),
        &json!({
            "label": { "en": "Split" },
            "layout_default": { "en": "Default" },
            "region_main": { "en": "Main" },
            "region_main_desc": { "en": "Main region" }
        }),
    );

    let manifest = gather_metadata(root.path()).await.unwrap();
    let split = manifest.component("Split").unwrap();
    assert_eq!(split.kind, ComponentKind::Composite);
    assert_eq!(split.layouts.as_ref().unwrap()[0].regions.len(), 1);
}

#[tokio::test]
async fn test_prop_group_referential_integrity() {
    let root = library_root();
    let broken = json!({
        "displayName": "Button",
        "textKey": "label",
        "kind": "atomic",
        "props": {
            "x": { "type": "string", "group": "g" }
        }
    });
    write_component(root.path(), "Button", broken);

    let err = gather_metadata(root.path()).await.unwrap_err();
    assert!(matches!(
        err.root_cause(),
        MetaError::UnknownPropGroup { group, .. } if group == "g"
    ));

    // Declaring the group (with a resolvable textKey) fixes assembly.
    let meta_dir = root.path().join("Button/.meta");
    write_json(
        &meta_dir.join("meta.json"),
        &json!({
            "displayName": "Button",
            "textKey": "label",
            "kind": "atomic",
            "propGroups": [{ "name": "g", "textKey": "group_label" }],
            "props": {
                "x": { "type": "string", "group": "g" }
            }
        }),
    );
    write_json(
        &meta_dir.join("strings.json"),
        &json!({
            "label": { "en": "Button" },
            "group_label": { "en": "Group" }
        }),
    );

    let manifest = gather_metadata(root.path()).await.unwrap();
    assert!(manifest.component("Button").is_some());
}

#[tokio::test]
async fn test_undefined_component_group() {
    let root = library_root();
    write_component(
        root.path(),
        "Button",
        json!({
            "displayName": "Button",
            "textKey": "label",
            "kind": "atomic",
            "group": "outputs"
        }),
    );

    let err = gather_metadata(root.path()).await.unwrap_err();
    match err.root_cause() {
        MetaError::UndefinedComponentGroup { component, group } => {
            assert_eq!(component, "Button");
            assert_eq!(group, "outputs");
        }
        other => panic!("expected UndefinedComponentGroup, got {other:?}"),
    }
}

#[tokio::test]
async fn test_defined_component_group_succeeds() {
    let root = library_root();
    write_component(
        root.path(),
        "Button",
        json!({
            "displayName": "Button",
            "textKey": "label",
            "kind": "atomic",
            "group": "inputs"
        }),
    );

    let manifest = gather_metadata(root.path()).await.unwrap();
    assert_eq!(manifest.components_in_group("inputs").len(), 1);
}

#[tokio::test]
async fn test_not_a_component_library() {
    let dir = tempdir().unwrap();
    let err = gather_metadata(dir.path()).await.unwrap_err();
    assert!(matches!(err, MetaError::NotAComponentLibrary));
}

#[tokio::test]
async fn test_package_descriptor_fallback() {
    let dir = tempdir().unwrap();
    write_json(
        &dir.path().join("package.json"),
        &json!({
            "name": "@acme/ui",
            "version": "1.0.0",
            "componentLibrary": {
                "namespace": "acme-ui",
                "globalStyle": true
            }
        }),
    );
    write_component(dir.path(), "Button", atomic("Button"));

    let manifest = gather_metadata(dir.path()).await.unwrap();
    assert_eq!(manifest.namespace, "acme-ui");
    assert!(manifest.global_style);
    assert_eq!(manifest.components.len(), 1);
}

#[tokio::test]
async fn test_package_descriptor_without_library_key() {
    let dir = tempdir().unwrap();
    write_json(
        &dir.path().join("package.json"),
        &json!({ "name": "@acme/other" }),
    );

    let err = gather_metadata(dir.path()).await.unwrap_err();
    assert!(matches!(err, MetaError::NotAComponentLibrary));
}

#[tokio::test]
async fn test_invalid_main_metadata() {
    let dir = tempdir().unwrap();
    write_json(
        &dir.path().join("library.json"),
        &json!({ "globalStyle": false }),
    );

    let err = gather_metadata(dir.path()).await.unwrap_err();
    assert!(matches!(err, MetaError::InvalidMainMetadata { .. }));
}

#[tokio::test]
async fn test_inline_components_skip_walk() {
    let dir = tempdir().unwrap();
    write_json(
        &dir.path().join("library.json"),
        &json!({
            "namespace": "acme-ui",
            "globalStyle": false,
            "components": {
                "Button": {
                    "displayName": "Button",
                    "textKey": "label",
                    "kind": "atomic"
                }
            }
        }),
    );
    // A component directory that would be discovered by a walk.
    write_component(dir.path(), "Ignored", atomic("Ignored"));

    let manifest = gather_metadata(dir.path()).await.unwrap();
    assert_eq!(manifest.components.len(), 1);
    assert!(manifest.component("Button").is_some());
    assert!(manifest.component("Ignored").is_none());
}

#[tokio::test]
async fn test_inline_component_with_undefined_group() {
    let dir = tempdir().unwrap();
    write_json(
        &dir.path().join("library.json"),
        &json!({
            "namespace": "acme-ui",
            "globalStyle": false,
            "components": {
                "Button": {
                    "displayName": "Button",
                    "textKey": "label",
                    "kind": "atomic",
                    "group": "nowhere"
                }
            }
        }),
    );

    let err = gather_metadata(dir.path()).await.unwrap_err();
    assert!(matches!(
        err.root_cause(),
        MetaError::UndefinedComponentGroup { .. }
    ));
}

#[tokio::test]
async fn test_duplicate_display_name_fails() {
    let root = library_root();
    write_component(root.path(), "a/Button", atomic("Button"));
    write_component(root.path(), "b/Button", atomic("Button"));

    let err = gather_metadata(root.path()).await.unwrap_err();
    assert!(matches!(
        err.root_cause(),
        MetaError::DuplicateComponent { name } if name == "Button"
    ));
}

#[tokio::test]
async fn test_malformed_component_metadata() {
    let root = library_root();
    let meta_dir = root.path().join("Button/.meta");
    fs::create_dir_all(&meta_dir).unwrap();
    fs::write(meta_dir.join("meta.json"), "{broken").unwrap();

    let err = gather_metadata(root.path()).await.unwrap_err();
    assert!(err.to_string().contains("acme-ui"));
    assert!(matches!(
        err.root_cause(),
        MetaError::MalformedMetadata { .. }
    ));
}

#[tokio::test]
async fn test_unknown_metadata_key_is_fatal() {
    let root = library_root();
    let mut meta = atomic("Button");
    meta["unexpectedKey"] = json!(true);
    write_component(root.path(), "Button", meta);

    let err = gather_metadata(root.path()).await.unwrap_err();
    match err.root_cause() {
        MetaError::InvalidMetadata { violations, .. } => {
            assert!(!violations.is_empty());
        }
        other => panic!("expected InvalidMetadata, got {other:?}"),
    }
}

#[tokio::test]
async fn test_custom_types_resolved_through_sibling_file() {
    let root = library_root();
    let meta_dir = root.path().join("Chart/.meta");
    write_json(
        &meta_dir.join("meta.json"),
        &json!({
            "displayName": "Chart",
            "textKey": "label",
            "kind": "atomic",
            "props": {
                "origin": { "type": "Point" }
            }
        }),
    );
    write_json(&meta_dir.join("strings.json"), &json!({ "label": { "en": "Chart" } }));
    write_json(
        &meta_dir.join("types.json"),
        &json!({
            "Point": {
                "type": "shape",
                "fields": {
                    "x": { "type": "float" },
                    "y": { "type": "float" }
                }
            }
        }),
    );

    let manifest = gather_metadata(root.path()).await.unwrap();
    let chart = manifest.component("Chart").unwrap();
    assert!(chart.types.as_ref().unwrap().contains_key("Point"));
}

#[tokio::test]
async fn test_marker_without_meta_file_is_not_a_component() {
    let root = library_root();
    fs::create_dir_all(root.path().join("Empty/.meta")).unwrap();
    write_component(root.path(), "Button", atomic("Button"));

    let manifest = gather_metadata(root.path()).await.unwrap();
    assert_eq!(manifest.components.len(), 1);
}
