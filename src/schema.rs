//! Declarative shape contracts for metadata documents
//!
//! Every metadata file is validated against one of these JSON Schemas
//! before it is deserialized into the typed model. The prop schema is
//! genuinely recursive: `fields.*` and `ofType` both point back at the
//! prop definition, because shapes and arrays nest arbitrarily deep.
//!
//! Schemas are compiled once per assembly run into a [`CompiledSchemas`]
//! context object and shared by reference through the readers.

use jsonschema::JSONSchema;
use serde_json::{json, Value};

use crate::error::SchemaViolation;

/// Value sources a prop may declare.
const SOURCE_NAMES: [&str; 6] = [
    "static",
    "data",
    "const",
    "designer",
    "actions",
    "interpolations",
];

/// Shared definitions referenced from the schema documents. Each document
/// embeds this map under `definitions` so that internal `$ref` pointers
/// resolve within the document itself.
fn definitions() -> Value {
    json!({
        "stringTable": {
            "type": "object",
            "additionalProperties": {
                "type": "object",
                "additionalProperties": { "type": "string" }
            }
        },

        "optionList": {
            "type": "array",
            "minItems": 1,
            "items": {
                "type": "object",
                "additionalProperties": false,
                "required": ["value", "textKey"],
                "properties": {
                    "value": {},
                    "textKey": { "type": "string", "minLength": 1 }
                }
            }
        },

        "sourceConfigs": {
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "static": {
                    "type": "object",
                    "additionalProperties": false,
                    "properties": {
                        "default": {},
                        "defaultTextKey": { "type": "string" },
                        "defaultNum": { "type": "integer" },
                        "minItems": { "type": "integer" },
                        "maxItems": { "type": "integer" }
                    }
                },
                "data": { "type": "object" },
                "const": {
                    "type": "object",
                    "additionalProperties": false,
                    "properties": {
                        "value": {},
                        "constId": { "type": "string" }
                    }
                },
                "designer": {
                    "type": "object",
                    "additionalProperties": false,
                    "properties": {
                        "wrapper": { "type": "string" }
                    }
                },
                "actions": { "type": "object" },
                "interpolations": {
                    "type": "object",
                    "additionalProperties": false,
                    "required": ["name"],
                    "properties": {
                        "name": { "type": "string", "minLength": 1 }
                    }
                }
            }
        },

        "prop": {
            "type": "object",
            "additionalProperties": false,
            "required": ["type"],
            "properties": {
                "textKey": { "type": "string" },
                "descriptionTextKey": { "type": "string" },
                "group": { "type": "string", "minLength": 1 },
                "type": { "type": "string", "minLength": 1 },
                "source": {
                    "type": "array",
                    "minItems": 1,
                    "uniqueItems": true,
                    "items": { "type": "string", "enum": SOURCE_NAMES }
                },
                "sourceConfigs": { "$ref": "#/definitions/sourceConfigs" },
                "ofType": { "$ref": "#/definitions/prop" },
                "fields": {
                    "type": "object",
                    "additionalProperties": { "$ref": "#/definitions/prop" }
                },
                "options": { "$ref": "#/definitions/optionList" }
            }
        },

        "typeTable": {
            "type": "object",
            "additionalProperties": {
                "type": "object",
                "additionalProperties": false,
                "required": ["type"],
                "properties": {
                    "type": { "type": "string", "enum": ["oneOf", "arrayOf", "shape"] },
                    "ofType": { "$ref": "#/definitions/prop" },
                    "fields": {
                        "type": "object",
                        "additionalProperties": { "$ref": "#/definitions/prop" }
                    },
                    "options": { "$ref": "#/definitions/optionList" }
                }
            }
        },

        "layout": {
            "type": "object",
            "additionalProperties": false,
            "required": ["regions"],
            "properties": {
                "textKey": { "type": "string", "minLength": 1 },
                "descriptionTextKey": { "type": "string", "minLength": 1 },
                "icon": { "type": "string", "minLength": 1 },
                "regions": {
                    "type": "array",
                    "minItems": 1,
                    "items": {
                        "type": "object",
                        "additionalProperties": false,
                        "required": [
                            "component",
                            "textKey",
                            "descriptionTextKey",
                            "defaultEnabled"
                        ],
                        "properties": {
                            "component": { "type": "string", "minLength": 1 },
                            "textKey": { "type": "string", "minLength": 1 },
                            "descriptionTextKey": { "type": "string", "minLength": 1 },
                            "defaultEnabled": { "type": "boolean" },
                            "props": { "type": "object" }
                        }
                    }
                }
            }
        },

        "componentMeta": {
            "type": "object",
            "additionalProperties": false,
            "required": ["displayName", "textKey", "kind"],
            "properties": {
                "displayName": { "type": "string", "minLength": 1 },
                "textKey": { "type": "string", "minLength": 1 },
                "descriptionTextKey": { "type": "string" },
                "group": { "type": "string", "minLength": 1 },
                "kind": {
                    "type": "string",
                    "enum": ["atomic", "container", "composite"]
                },
                "hidden": { "type": "boolean" },
                "icon": { "type": "string", "minLength": 1 },
                "props": {
                    "type": "object",
                    "additionalProperties": { "$ref": "#/definitions/prop" }
                },
                "propGroups": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "additionalProperties": false,
                        "required": ["name", "textKey"],
                        "properties": {
                            "name": { "type": "string", "minLength": 1 },
                            "textKey": { "type": "string", "minLength": 1 }
                        }
                    }
                },
                "types": { "$ref": "#/definitions/typeTable" },
                "strings": { "$ref": "#/definitions/stringTable" },
                // Emptiness is checked by the reader so that a composite
                // component with no layouts reports the missing field
                // rather than a shape violation.
                "layouts": {
                    "type": "array",
                    "items": { "$ref": "#/definitions/layout" }
                }
            }
        }
    })
}

fn with_definitions(mut root: Value) -> Value {
    root["$schema"] = json!("http://json-schema.org/draft-07/schema#");
    root["definitions"] = definitions();
    root
}

/// Schema for a component metadata file. Unknown keys are fatal.
fn component_meta_schema() -> Value {
    let defs = definitions();
    with_definitions(defs["componentMeta"].clone())
}

/// Schema for a standalone custom-types file.
fn typedefs_schema() -> Value {
    let defs = definitions();
    with_definitions(defs["typeTable"].clone())
}

/// Schema for a standalone strings file.
fn strings_schema() -> Value {
    let defs = definitions();
    with_definitions(defs["stringTable"].clone())
}

/// Schema for the library main metadata. Unlike component metadata,
/// unknown keys are tolerated here; package descriptors carry unrelated
/// fields next to the library section.
fn main_meta_schema() -> Value {
    with_definitions(json!({
        "type": "object",
        "required": ["namespace", "globalStyle"],
        "properties": {
            "namespace": { "type": "string", "minLength": 1 },
            "globalStyle": { "type": "boolean" },
            "loaders": {
                "type": "object",
                "additionalProperties": {
                    "type": "array",
                    "minItems": 1,
                    "items": { "type": "string", "minLength": 1 }
                }
            },
            "import": {
                "type": "array",
                "uniqueItems": true,
                "items": { "type": "string", "minLength": 1 }
            },
            "components": {
                "type": "object",
                "additionalProperties": { "$ref": "#/definitions/componentMeta" }
            },
            "componentGroups": {
                "type": "object",
                "additionalProperties": {
                    "type": "object",
                    "additionalProperties": false,
                    "required": ["textKey"],
                    "properties": {
                        "textKey": { "type": "string", "minLength": 1 },
                        "descriptionTextKey": { "type": "string", "minLength": 1 }
                    }
                }
            },
            "strings": { "$ref": "#/definitions/stringTable" }
        }
    }))
}

fn compile(schema: Value) -> JSONSchema {
    // Schema documents are literals; compilation cannot fail at runtime.
    JSONSchema::compile(&schema).expect("schema literal is valid")
}

fn check(schema: &JSONSchema, instance: &Value) -> Vec<SchemaViolation> {
    match schema.validate(instance) {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .map(|err| SchemaViolation {
                path: err.instance_path.to_string(),
                message: err.to_string(),
            })
            .collect(),
    }
}

/// The compiled shape contracts for one assembly run.
pub struct CompiledSchemas {
    component_meta: JSONSchema,
    typedefs: JSONSchema,
    strings: JSONSchema,
    main_meta: JSONSchema,
}

impl CompiledSchemas {
    pub fn new() -> Self {
        Self {
            component_meta: compile(component_meta_schema()),
            typedefs: compile(typedefs_schema()),
            strings: compile(strings_schema()),
            main_meta: compile(main_meta_schema()),
        }
    }

    /// Validate a component metadata document.
    pub fn check_component_meta(&self, instance: &Value) -> Vec<SchemaViolation> {
        check(&self.component_meta, instance)
    }

    /// Validate a standalone custom-types document.
    pub fn check_typedefs(&self, instance: &Value) -> Vec<SchemaViolation> {
        check(&self.typedefs, instance)
    }

    /// Validate a standalone strings document.
    pub fn check_strings(&self, instance: &Value) -> Vec<SchemaViolation> {
        check(&self.strings, instance)
    }

    /// Validate a library main metadata document.
    pub fn check_main_meta(&self, instance: &Value) -> Vec<SchemaViolation> {
        check(&self.main_meta, instance)
    }
}

impl Default for CompiledSchemas {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_meta() -> Value {
        json!({
            "displayName": "Card",
            "textKey": "card",
            "kind": "atomic"
        })
    }

    #[test]
    fn test_minimal_component_meta_is_valid() {
        let schemas = CompiledSchemas::new();
        assert!(schemas.check_component_meta(&minimal_meta()).is_empty());
    }

    #[test]
    fn test_unknown_key_is_a_violation() {
        let schemas = CompiledSchemas::new();
        let mut meta = minimal_meta();
        meta["unexpected"] = json!(true);

        let violations = schemas.check_component_meta(&meta);
        assert!(!violations.is_empty());
    }

    #[test]
    fn test_missing_required_key() {
        let schemas = CompiledSchemas::new();
        let violations = schemas.check_component_meta(&json!({
            "displayName": "Card",
            "kind": "atomic"
        }));
        assert!(violations.iter().any(|v| v.message.contains("textKey")));
    }

    #[test]
    fn test_recursive_prop_schema() {
        let schemas = CompiledSchemas::new();
        let mut meta = minimal_meta();
        meta["props"] = json!({
            "matrix": {
                "type": "arrayOf",
                "ofType": {
                    "type": "shape",
                    "fields": {
                        "x": { "type": "float" },
                        "nested": { "type": "arrayOf", "ofType": { "type": "int" } }
                    }
                }
            }
        });
        assert!(schemas.check_component_meta(&meta).is_empty());
    }

    #[test]
    fn test_options_require_at_least_one_entry() {
        let schemas = CompiledSchemas::new();
        let mut meta = minimal_meta();
        meta["props"] = json!({
            "align": { "type": "oneOf", "options": [] }
        });
        assert!(!schemas.check_component_meta(&meta).is_empty());
    }

    #[test]
    fn test_invalid_source_name() {
        let schemas = CompiledSchemas::new();
        let mut meta = minimal_meta();
        meta["props"] = json!({
            "title": { "type": "string", "source": ["telepathy"] }
        });
        assert!(!schemas.check_component_meta(&meta).is_empty());
    }

    #[test]
    fn test_main_meta_requires_namespace() {
        let schemas = CompiledSchemas::new();
        let violations = schemas.check_main_meta(&json!({ "globalStyle": false }));
        assert!(!violations.is_empty());

        let ok = schemas.check_main_meta(&json!({
            "namespace": "acme-ui",
            "globalStyle": false,
            "componentGroups": {
                "inputs": { "textKey": "group_inputs" }
            }
        }));
        assert!(ok.is_empty());
    }

    #[test]
    fn test_main_meta_tolerates_unknown_keys() {
        let schemas = CompiledSchemas::new();
        let ok = schemas.check_main_meta(&json!({
            "namespace": "acme-ui",
            "globalStyle": true,
            "somethingElse": 42
        }));
        assert!(ok.is_empty());
    }

    #[test]
    fn test_typedef_table_restricts_kinds() {
        let schemas = CompiledSchemas::new();
        let bad = schemas.check_typedefs(&json!({
            "Point": { "type": "string" }
        }));
        assert!(!bad.is_empty());

        let ok = schemas.check_typedefs(&json!({
            "Point": {
                "type": "shape",
                "fields": {
                    "x": { "type": "float" },
                    "y": { "type": "float" }
                }
            }
        }));
        assert!(ok.is_empty());
    }

    #[test]
    fn test_region_requires_all_keys() {
        let schemas = CompiledSchemas::new();
        let mut meta = minimal_meta();
        meta["kind"] = json!("composite");
        meta["layouts"] = json!([
            { "regions": [{ "component": "Main", "textKey": "main" }] }
        ]);
        assert!(!schemas.check_component_meta(&meta).is_empty());
    }
}
