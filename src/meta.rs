//! Component metadata data model
//!
//! These are the typed forms of the on-disk JSON documents: the library
//! main metadata, per-component metadata, prop declarations and custom
//! type definitions. Instances are only constructed after the raw JSON
//! has passed schema validation, so deserialization here cannot observe
//! shape errors, only the validated vocabulary.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::strings::StringTable;

/// Component kind, controlling placement rules and layout requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// No children
    Atomic,
    /// Arbitrary children
    Container,
    /// Children constrained to declared layout regions
    Composite,
}

/// Allowed origin of a prop's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Static,
    Data,
    Const,
    Designer,
    Actions,
    Interpolations,
}

/// The fixed internal type vocabulary, with everything else treated as a
/// reference into the custom types table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropType<'a> {
    String,
    Int,
    Float,
    Bool,
    Object,
    OneOf,
    Func,
    Component,
    Shape,
    ArrayOf,
    Custom(&'a str),
}

impl<'a> PropType<'a> {
    pub fn parse(name: &'a str) -> Self {
        match name {
            "string" => PropType::String,
            "int" => PropType::Int,
            "float" => PropType::Float,
            "bool" => PropType::Bool,
            "object" => PropType::Object,
            "oneOf" => PropType::OneOf,
            "func" => PropType::Func,
            "component" => PropType::Component,
            "shape" => PropType::Shape,
            "arrayOf" => PropType::ArrayOf,
            other => PropType::Custom(other),
        }
    }

    pub fn is_internal(&self) -> bool {
        !matches!(self, PropType::Custom(_))
    }
}

/// One option of a `oneOf` prop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionMeta {
    pub value: serde_json::Value,
    #[serde(rename = "textKey")]
    pub text_key: String,
}

/// Configuration for the `static` value source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticSourceConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    /// For `string`-typed props: default text resolved through the
    /// component's string table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_text_key: Option<String>,
    /// For `arrayOf`-typed props: initial item count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_num: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<i64>,
}

/// Configuration for the `const` value source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstSourceConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub const_id: Option<String>,
}

/// Configuration for the `designer` value source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignerSourceConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrapper: Option<String>,
}

/// Configuration for the `interpolations` value source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpolationsSourceConfig {
    pub name: String,
}

/// Per-source configuration for a prop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceConfigs {
    #[serde(rename = "static", skip_serializing_if = "Option::is_none")]
    pub static_: Option<StaticSourceConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(rename = "const", skip_serializing_if = "Option::is_none")]
    pub const_: Option<ConstSourceConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designer: Option<DesignerSourceConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpolations: Option<InterpolationsSourceConfig>,
}

/// One prop's declared type and source contract. Recursive through
/// `ofType` (arrays) and `fields` (shapes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_text_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Vec<ValueSource>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_configs: Option<SourceConfigs>,
    /// Required when `type` is `arrayOf`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub of_type: Option<Box<PropMeta>>,
    /// Required when `type` is `shape`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<HashMap<String, PropMeta>>,
    /// Required when `type` is `oneOf`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<OptionMeta>>,
}

impl PropMeta {
    pub fn prop_type(&self) -> PropType<'_> {
        PropType::parse(&self.type_name)
    }

    /// The `static` source config's `defaultTextKey`, if the prop allows
    /// the `static` source and declares one.
    pub fn static_default_text_key(&self) -> Option<&str> {
        let allows_static = self
            .source
            .as_ref()
            .is_some_and(|s| s.contains(&ValueSource::Static));
        if !allows_static {
            return None;
        }
        self.source_configs
            .as_ref()?
            .static_
            .as_ref()?
            .default_text_key
            .as_deref()
    }
}

/// Library-level named, reusable type definition. Restricted by schema to
/// `oneOf`, `arrayOf` and `shape`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDef {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub of_type: Option<Box<PropMeta>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<HashMap<String, PropMeta>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<OptionMeta>>,
}

impl TypeDef {
    pub fn prop_type(&self) -> PropType<'_> {
        PropType::parse(&self.type_name)
    }
}

/// Entry of a component's `propGroups` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropGroup {
    pub name: String,
    pub text_key: String,
}

/// A region of a composite component's layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub component: String,
    pub text_key: String,
    pub description_text_key: String,
    pub default_enabled: bool,
    /// Opaque prop overrides for the region's component, passed through
    /// without semantic validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<serde_json::Value>,
}

/// One layout of a composite component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_text_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub regions: Vec<Region>,
}

/// One component's declared contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMeta {
    pub display_name: String,
    pub text_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_text_key: Option<String>,
    /// Must name an entry of the library's `componentGroups`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub kind: ComponentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub props: HashMap<String, PropMeta>,
    #[serde(default)]
    pub prop_groups: Vec<PropGroup>,
    /// Custom types table; lazily loaded from a sibling file when a prop
    /// references a non-internal type name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<HashMap<String, TypeDef>>,
    /// Filled from a sibling strings file when not inline. Always present
    /// after a successful read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strings: Option<StringTable>,
    /// Required (non-empty) when `kind` is `composite`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layouts: Option<Vec<Layout>>,
}

/// Entry of the library's `componentGroups` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentGroup {
    pub text_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_text_key: Option<String>,
}

/// The library's main metadata document, as found in the main metadata
/// file or under the package descriptor key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainMeta {
    pub namespace: String,
    pub global_style: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaders: Option<HashMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import: Option<Vec<String>>,
    /// When present, component discovery is skipped entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<HashMap<String, ComponentMeta>>,
    #[serde(default)]
    pub component_groups: HashMap<String, ComponentGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strings: Option<StringTable>,
}

/// The assembled, validated manifest of one component library.
///
/// Constructed once per assembly run and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryManifest {
    pub namespace: String,
    pub global_style: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaders: Option<HashMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import: Option<Vec<String>>,
    pub components: HashMap<String, ComponentMeta>,
    pub component_groups: HashMap<String, ComponentGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strings: Option<StringTable>,
}

impl LibraryManifest {
    pub fn component(&self, display_name: &str) -> Option<&ComponentMeta> {
        self.components.get(display_name)
    }

    /// Components belonging to a palette group, in no particular order.
    pub fn components_in_group(&self, group: &str) -> Vec<&ComponentMeta> {
        self.components
            .values()
            .filter(|c| c.group.as_deref() == Some(group))
            .collect()
    }
}
