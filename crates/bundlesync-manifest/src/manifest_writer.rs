//! Manifest persistence
//!
//! The document is written to a temporary file next to the manifest and then
//! renamed over it, so readers never see a half-written manifest. A symlinked
//! manifest is updated at its target and keeps its permissions.

use crate::errors::SyncError;
use crate::manifest::ManifestDocument;
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Result of a write attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistStatus {
    Written,
    /// Rendered content matched the file; nothing was touched
    Unchanged,
}

/// Read a manifest document from `manifest_path`
pub fn read_from_path(manifest_path: &Path) -> Result<ManifestDocument, SyncError> {
    let document = ManifestDocument::load_from_path(manifest_path)?;
    debug!("Loaded {} library entries", document.len());
    Ok(document)
}

/// Serialize `document` and atomically replace `output_path` with it
pub fn write_to_path(
    document: &ManifestDocument,
    output_path: &Path,
) -> Result<PersistStatus, SyncError> {
    let content = document.to_yaml_string()?;

    if fs::read_to_string(output_path).is_ok_and(|current| current == content) {
        debug!("Manifest {:?} already up to date", output_path);
        return Ok(PersistStatus::Unchanged);
    }

    let target = fs::canonicalize(output_path).unwrap_or_else(|_| output_path.to_path_buf());
    let temp_path = temp_path_for(&target);
    if let Err(source) = write_atomic(&temp_path, &target, &content) {
        let _ = fs::remove_file(&temp_path);
        return Err(SyncError::Persist {
            path: output_path.to_path_buf(),
            source,
        });
    }

    info!("Manifest written to {:?}", output_path);
    Ok(PersistStatus::Written)
}

fn write_atomic(temp_path: &Path, path: &Path, content: &str) -> std::io::Result<()> {
    {
        let file = fs::File::create(temp_path)?;
        let mut writer = std::io::BufWriter::new(file);
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
    }
    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(temp_path, metadata.permissions())?;
    }
    fs::rename(temp_path, path)
}

/// `<dir>/<file name>.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("manifest"), |n| n.to_os_string());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use crate::manifest_writer::*;
    use crate::types::LibraryDescriptor;
    use tempfile::TempDir;

    fn sample_document() -> ManifestDocument {
        let mut document =
            ManifestDocument::parse("widget: {}\n", Path::new("widget.libraries.yml"))
                .unwrap_or_default();
        let descriptor = LibraryDescriptor::from_keys(&["dist/widget.".to_string()], &[], None);
        assert!(document.replace_entry(None, &descriptor).is_ok());
        document
    }

    #[test]
    fn test_write_and_read_custom_path() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let manifest_path = temp_dir.path().join("widget.libraries.yml");
        let document = sample_document();

        let status = write_to_path(&document, &manifest_path);
        assert!(matches!(status, Ok(PersistStatus::Written)));

        let loaded = read_from_path(&manifest_path);
        assert!(loaded.is_ok(), "Failed to read manifest");
        assert_eq!(loaded.unwrap_or_default(), document);
        assert!(!temp_path_for(&manifest_path).exists());
    }

    #[test]
    fn test_unchanged_content_not_rewritten() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let manifest_path = temp_dir.path().join("widget.libraries.yml");
        let document = sample_document();

        assert!(write_to_path(&document, &manifest_path).is_ok());
        let status = write_to_path(&document, &manifest_path);
        assert!(matches!(status, Ok(PersistStatus::Unchanged)));
    }

    #[test]
    fn test_unwritable_target_is_persist_error() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let manifest_path = temp_dir.path().join("missing").join("widget.libraries.yml");

        let status = write_to_path(&sample_document(), &manifest_path);
        assert!(matches!(status, Err(SyncError::Persist { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_manifest_written_through_link() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let shared = temp_dir.path().join("shared.libraries.yml");
        let link = temp_dir.path().join("widget.libraries.yml");
        assert!(fs::write(&shared, "widget: {}\n").is_ok());
        assert!(std::os::unix::fs::symlink(&shared, &link).is_ok());

        let document = sample_document();
        assert!(matches!(
            write_to_path(&document, &link),
            Ok(PersistStatus::Written)
        ));

        assert!(fs::symlink_metadata(&link).is_ok_and(|m| m.file_type().is_symlink()));
        let shared_content = fs::read_to_string(&shared).unwrap_or_default();
        assert_eq!(Some(shared_content), document.to_yaml_string().ok());
        assert!(!temp_path_for(&shared).exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_rewrite_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let manifest_path = temp_dir.path().join("widget.libraries.yml");
        assert!(fs::write(&manifest_path, "widget: {}\n").is_ok());
        assert!(fs::set_permissions(&manifest_path, fs::Permissions::from_mode(0o640)).is_ok());

        assert!(write_to_path(&sample_document(), &manifest_path).is_ok());

        let mode = fs::metadata(&manifest_path).map(|m| m.permissions().mode() & 0o777);
        assert!(mode.is_ok_and(|m| m == 0o640));
    }

    #[test]
    fn test_temp_path_keeps_extension() {
        assert_eq!(
            temp_path_for(Path::new("/m/widget.libraries.yml")),
            PathBuf::from("/m/widget.libraries.yml.tmp")
        );
    }
}
