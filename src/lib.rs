//! Component Metadata Assembly Pipeline
//!
//! Given a directory tree representing a UI component library, this crate
//! discovers per-component metadata, validates it against declarative
//! schemas, resolves cross-references (string keys, custom types, prop
//! groups, layout regions) and produces a single validated in-memory
//! manifest for the surrounding application (palette grouping, prop
//! editors, type-compatibility checks).
//!
//! ## Features
//!
//! - **Schema Validation**: every metadata document is checked against a
//!   JSON Schema before deserialization, with structured violation lists
//! - **String Resolution**: all user-facing labels resolve through
//!   per-component or per-library string tables, with no silent fallback
//! - **Concurrent Discovery**: independent subtrees are walked
//!   concurrently; completion order never affects the manifest
//! - **All-or-Nothing Assembly**: one invalid component aborts the whole
//!   library, with errors wrapped in progressively wider context
//!
//! ## Library layout
//!
//! ```text
//! my-library/
//! ├── library.json          <- main metadata (or package.json key)
//! ├── Button/
//! │   └── .meta/
//! │       ├── meta.json     <- component metadata
//! │       ├── strings.json  <- optional localized strings
//! │       └── types.json    <- optional custom type definitions
//! └── forms/
//!     └── TextField/
//!         └── .meta/
//!             └── meta.json
//! ```

pub mod assembler;
pub mod config;
pub mod constants;
pub mod error;
pub mod fsread;
pub mod meta;
pub mod reader;
pub mod schema;
pub mod strings;
pub mod typecheck;

pub use assembler::gather_metadata;
pub use config::MetaConfig;
pub use error::{MetaError, Result, SchemaViolation};
pub use fsread::FileReadResult;
pub use meta::{
    ComponentKind, ComponentMeta, LibraryManifest, PropMeta, PropType, TypeDef,
};
pub use reader::read_component_meta;
pub use schema::CompiledSchemas;
pub use strings::StringTable;
pub use typecheck::shape_contains_type;
