//! Library-convention file names
//!
//! These are discovery conventions, not part of the semantic contract:
//! a component library announces itself with a main metadata file (or a
//! key inside its package descriptor) and marks each component directory
//! with a metadata subdirectory.

/// Name of the per-component metadata marker directory.
pub const META_DIR: &str = ".meta";

/// Component metadata file inside the marker directory.
pub const META_FILE: &str = "meta.json";

/// Optional sibling strings file inside the marker directory.
pub const STRINGS_FILE: &str = "strings.json";

/// Optional sibling custom-types file inside the marker directory.
pub const TYPES_FILE: &str = "types.json";

/// Main library metadata file at the library root.
pub const MAIN_META_FILE: &str = "library.json";

/// Package descriptor consulted when the main metadata file is absent.
pub const PACKAGE_FILE: &str = "package.json";

/// Key inside the package descriptor holding the main metadata.
pub const PACKAGE_KEY: &str = "componentLibrary";
