//! # File I/O Module
//!
//! Project file operations:
//! - **Atomic saves**: Write to a temp file, sync, rename over the target
//! - **Version validation**: Reject files written by an incompatible schema
//! - **Project locks**: Keep two processes from writing the same file
//!
//! A lock lives next to the project as `<name>.lock`. The OS-level lock on
//! that file is what excludes other writers; the JSON inside only tells
//! them who holds it. The file itself is never deleted, so every process
//! always locks the same file.
//!
//! ## File Format
//!
//! Projects are saved as pretty-printed JSON (`.json`).
//!
//! ## Example
//!
//! ```rust,no_run
//! use statics_core::file_io::{load_project, save_project};
//! use statics_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new("Engineer", "Warehouse roof");
//! let path = Path::new("roof.json");
//!
//! save_project(&project, path)?;
//! let loaded = load_project(path)?;
//! assert_eq!(loaded.meta.title, "Warehouse roof");
//! # Ok::<(), statics_core::errors::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::project::{Project, SCHEMA_VERSION};

/// Temp file used while saving, next to the target
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Who holds a project lock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockHolder {
    pub user_id: String,
    pub pid: u32,
    pub locked_at: DateTime<Utc>,
}

/// Exclusive lock on a project file, released when dropped.
pub struct ProjectLock {
    file: File,
    pub holder: LockHolder,
}

impl ProjectLock {
    /// Take the lock without waiting.
    ///
    /// Fails with [`CalcError::FileLocked`] while another handle holds it.
    /// A lock file left behind by a process that died is taken over, since
    /// its OS lock went away with the process.
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CalcResult<Self> {
        let lock_path = lock_path_for(path);
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| CalcError::file_error("open lock", lock_path.display().to_string(), e.to_string()))?;

        if file.try_lock_exclusive().is_err() {
            let (locked_by, locked_at) = match read_holder(&lock_path) {
                Some(h) => (format!("{} (pid {})", h.user_id, h.pid), h.locked_at.to_rfc3339()),
                None => ("another process".to_string(), "unknown".to_string()),
            };
            return Err(CalcError::file_locked(path.display().to_string(), locked_by, locked_at));
        }

        let holder = LockHolder {
            user_id: user_id.into(),
            pid: std::process::id(),
            locked_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&holder).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })?;
        file.set_len(0)
            .and_then(|_| file.write_all(json.as_bytes()))
            .and_then(|_| file.sync_all())
            .map_err(|e| CalcError::file_error("write lock", lock_path.display().to_string(), e.to_string()))?;

        debug!(path = %path.display(), user = %holder.user_id, "acquired project lock");
        Ok(ProjectLock { file, holder })
    }

    /// Current holder of a project's lock, if anyone holds it
    pub fn holder_of(path: &Path) -> Option<LockHolder> {
        let lock_path = lock_path_for(path);
        let file = File::open(&lock_path).ok()?;
        if file.try_lock_exclusive().is_ok() {
            // Nobody else has it; closing the handle releases it again
            return None;
        }
        read_holder(&lock_path)
    }
}

impl Drop for ProjectLock {
    fn drop(&mut self) {
        // Clear the holder while still locked; closing the handle unlocks
        let _ = self.file.set_len(0);
    }
}

fn lock_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".lock");
    path.with_file_name(name)
}

fn read_holder(lock_path: &Path) -> Option<LockHolder> {
    let contents = fs::read_to_string(lock_path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Save a project to a file with atomic write semantics.
///
/// 1. Serialize project to JSON
/// 2. Write to a temporary file (`<name>.tmp`)
/// 3. Sync to disk (fsync)
/// 4. Rename over the target (atomic on most filesystems)
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(project).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    drop(tmp_file);

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), items = project.items.len(), "saved project");
    Ok(())
}

/// Load a project from a file.
///
/// # Returns
///
/// * `Ok(Project)` - Successfully loaded project
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let project = parse_project(&contents).map_err(|e| match e {
        CalcError::SerializationError { reason } => CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), reason),
        },
        other => other,
    })?;

    debug!(path = %path.display(), items = project.items.len(), "loaded project");
    Ok(project)
}

/// Parse project JSON and validate its schema version
pub fn parse_project(json: &str) -> CalcResult<Project> {
    let project: Project = serde_json::from_str(json).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;
    validate_version(&project.meta.version)?;
    Ok(project)
}

/// Validate that a file version is compatible with the current schema.
///
/// The major version must match. While the schema is 0.x, a file with a
/// newer minor version is rejected as well.
pub fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let parse = |v: &str| -> Option<Vec<u32>> { v.split('.').map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version).ok_or_else(mismatch)?;
    let current_parts = parse(SCHEMA_VERSION).ok_or_else(mismatch)?;

    match (file_parts.as_slice(), current_parts.as_slice()) {
        ([file_major, file_rest @ ..], [major, rest @ ..]) if file_major == major => {
            if *major == 0 {
                if let (Some(file_minor), Some(minor)) = (file_rest.first(), rest.first()) {
                    if file_minor > minor {
                        return Err(mismatch());
                    }
                }
            }
            Ok(())
        }
        _ => Err(mismatch()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{BeamPreset, Preset, TrussPreset};
    use std::env::temp_dir;

    fn temp_project_path(name: &str) -> PathBuf {
        temp_dir().join(format!("statics_test_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_tmp_path_generation() {
        let tmp = tmp_path_for(Path::new("/path/to/project.json"));
        assert_eq!(tmp, Path::new("/path/to/project.json.tmp"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_project_path("roundtrip");

        let mut project = Project::new("Test Engineer", "Roundtrip");
        project.add_item(Preset::Beam(BeamPreset::Overhang).to_item());
        project.add_item(Preset::Truss(TrussPreset::Pratt).to_item());
        save_project(&project, &path).unwrap();

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded, project);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_project_path("atomic");

        let project = Project::new("Test", "Atomic");
        save_project(&project, &path).unwrap();

        assert!(!tmp_path_for(&path).exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_lock_excludes_second_holder() {
        let path = temp_project_path("locked");

        let lock = ProjectLock::acquire(&path, "first").unwrap();
        assert_eq!(lock.holder.pid, std::process::id());

        let err = ProjectLock::acquire(&path, "second").err().unwrap();
        assert_eq!(err.error_code(), "FILE_LOCKED");
        assert!(err.to_string().contains("first"));

        let holder = ProjectLock::holder_of(&path).unwrap();
        assert_eq!(holder.user_id, "first");

        drop(lock);
        assert!(ProjectLock::holder_of(&path).is_none());
        assert_eq!(fs::read_to_string(lock_path_for(&path)).unwrap(), "");

        let again = ProjectLock::acquire(&path, "second").unwrap();
        assert_eq!(again.holder.user_id, "second");

        drop(again);
        let _ = fs::remove_file(lock_path_for(&path));
    }

    /// A handle opened while the lock was held still contends for the same
    /// file after release
    #[test]
    fn test_released_lock_file_stays_shared() {
        let path = temp_project_path("shared");

        let lock = ProjectLock::acquire(&path, "first").unwrap();
        let early = File::open(lock_path_for(&path)).unwrap();
        drop(lock);

        early.try_lock_exclusive().unwrap();
        let err = ProjectLock::acquire(&path, "second").err().unwrap();
        assert_eq!(err.error_code(), "FILE_LOCKED");

        drop(early);
        assert!(ProjectLock::acquire(&path, "second").is_ok());
        let _ = fs::remove_file(lock_path_for(&path));
    }

    #[test]
    fn test_leftover_lock_file_is_taken_over() {
        let path = temp_project_path("leftover");
        fs::write(lock_path_for(&path), "{ stale").unwrap();

        let lock = ProjectLock::acquire(&path, "engineer").unwrap();
        assert_eq!(read_holder(&lock_path_for(&path)), Some(lock.holder.clone()));

        drop(lock);
        let _ = fs::remove_file(lock_path_for(&path));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_project(&temp_project_path("does_not_exist")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_invalid_json() {
        let path = temp_project_path("invalid");
        fs::write(&path, "{ not json").unwrap();

        let err = load_project(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.0").is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("0.0.9").is_ok());

        // Different major should fail
        assert!(validate_version("1.0.0").is_err());

        // Newer minor (in 0.x) should fail
        assert!(validate_version("0.2.0").is_err());

        assert!(validate_version("").is_err());
        assert!(validate_version("zero.one").is_err());
    }

    #[test]
    fn test_parse_rejects_newer_schema() {
        let mut project = Project::new("E", "T");
        project.meta.version = "0.9.0".to_string();
        let json = serde_json::to_string(&project).unwrap();
        assert!(matches!(parse_project(&json), Err(CalcError::VersionMismatch { .. })));
    }
}
