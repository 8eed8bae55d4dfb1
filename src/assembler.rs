//! Library tree walking and manifest assembly
//!
//! `gather_metadata` is the pipeline's entry point: it loads and validates
//! the library's main metadata, then (unless components are inlined)
//! walks the directory tree for metadata marker directories and merges
//! every discovered component into one manifest. Assembly is
//! all-or-nothing: the first error aborts the run and nothing is
//! published.
//!
//! Sibling subtrees are independent, so they are walked concurrently and
//! their completion order never affects the resulting manifest.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use futures::future::{try_join_all, BoxFuture, FutureExt};
use tracing::{debug, info};

use crate::constants::{MAIN_META_FILE, META_DIR, PACKAGE_FILE, PACKAGE_KEY};
use crate::error::{MetaError, Result};
use crate::fsread::{is_directory, read_json_file};
use crate::meta::{ComponentGroup, ComponentMeta, LibraryManifest, MainMeta};
use crate::reader::read_component_meta;
use crate::schema::CompiledSchemas;

/// Assemble the manifest of the component library rooted at `library_root`.
///
/// The returned manifest is complete and validated; on any failure the
/// error carries the library namespace plus the originating location.
pub async fn gather_metadata(library_root: impl AsRef<Path>) -> Result<LibraryManifest> {
    let root = library_root.as_ref();
    let schemas = CompiledSchemas::new();

    let main_value = read_main_meta(root).await?;

    let violations = schemas.check_main_meta(&main_value);
    if !violations.is_empty() {
        return Err(MetaError::InvalidMainMetadata { violations });
    }

    let main: MainMeta = serde_json::from_value(main_value)?;
    let namespace = main.namespace.clone();

    let components = match main.components {
        Some(inline) => {
            debug!(namespace = %namespace, "components inlined in main metadata, skipping walk");
            for meta in inline.values() {
                check_component_group(meta, &main.component_groups)?;
            }
            inline
        }
        None => {
            let discovered = walk_subtree(root.to_path_buf(), &schemas)
                .await
                .map_err(|err| err.in_namespace(&namespace))?;

            let mut components = HashMap::with_capacity(discovered.len());
            for meta in discovered {
                merge_component(&mut components, meta, &main.component_groups)
                    .map_err(|err| err.in_namespace(&namespace))?;
            }
            components
        }
    };

    info!(
        namespace = %namespace,
        components = components.len(),
        "assembled library manifest"
    );

    Ok(LibraryManifest {
        namespace,
        global_style: main.global_style,
        loaders: main.loaders,
        import: main.import,
        components,
        component_groups: main.component_groups,
        strings: main.strings,
    })
}

/// Load the raw main metadata: the main file at the library root, falling
/// back to the library key inside the package descriptor.
async fn read_main_meta(root: &Path) -> Result<serde_json::Value> {
    if let Some(value) = read_json_file(&root.join(MAIN_META_FILE)).await? {
        return Ok(value);
    }

    if let Some(package) = read_json_file(&root.join(PACKAGE_FILE)).await? {
        if let Some(value) = package.get(PACKAGE_KEY) {
            return Ok(value.clone());
        }
    }

    Err(MetaError::NotAComponentLibrary)
}

fn check_component_group(
    meta: &ComponentMeta,
    groups: &HashMap<String, ComponentGroup>,
) -> Result<()> {
    if let Some(group) = &meta.group {
        if !groups.contains_key(group) {
            return Err(MetaError::UndefinedComponentGroup {
                component: meta.display_name.clone(),
                group: group.clone(),
            });
        }
    }
    Ok(())
}

fn merge_component(
    components: &mut HashMap<String, ComponentMeta>,
    meta: ComponentMeta,
    groups: &HashMap<String, ComponentGroup>,
) -> Result<()> {
    check_component_group(&meta, groups)?;

    if components.contains_key(&meta.display_name) {
        return Err(MetaError::DuplicateComponent {
            name: meta.display_name,
        });
    }

    components.insert(meta.display_name.clone(), meta);
    Ok(())
}

/// Walk one directory subtree for component metadata.
///
/// A directory containing the metadata marker is a component: it is read
/// and its children are never scanned for nested components. Otherwise
/// all child directories (minus the marker name itself) are walked
/// concurrently.
fn walk_subtree(dir: PathBuf, schemas: &CompiledSchemas) -> BoxFuture<'_, Result<Vec<ComponentMeta>>> {
    async move {
        let marker = dir.join(META_DIR);
        if is_directory(&marker).await? {
            debug!(dir = %dir.display(), "found metadata marker");
            return Ok(read_component_meta(&marker, schemas)
                .await?
                .into_iter()
                .collect());
        }

        let mut children = Vec::new();
        let mut entries = tokio::fs::read_dir(&dir).await.map_err(|source| MetaError::Io {
            file: dir.clone(),
            source,
        })?;

        while let Some(entry) = entries.next_entry().await.map_err(|source| MetaError::Io {
            file: dir.clone(),
            source,
        })? {
            if entry.file_name() == META_DIR {
                continue;
            }

            let path = entry.path();
            if is_directory(&path).await? {
                children.push(path);
            }
        }

        let results = try_join_all(
            children
                .into_iter()
                .map(|child| walk_subtree(child, schemas)),
        )
        .await?;

        Ok(results.into_iter().flatten().collect())
    }
    .boxed()
}
