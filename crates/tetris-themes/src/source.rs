//! Where theme JSON comes from and where packed bytes go.
//!
//! Conversion jobs only see a `ThemeSource`; the binary hands them a
//! `LocalThemeSource` rooted at `--dir` or the working directory.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Read access to theme files plus a single output sink, keyed by the
/// relative names a job uses (`theme_03.json`, `themes.bin`).
pub trait ThemeSource {
    /// Check if a theme file exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read theme file contents as string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Replace `path` with `bytes`, creating it if needed.
    fn write_output(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}

/// Default implementation using the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalThemeSource {
    base_dir: PathBuf,
}

impl LocalThemeSource {
    /// Resolve relative paths against `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve relative paths against the process working directory.
    pub fn current_dir() -> io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Absolute paths are returned unchanged.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.base_dir.join(path)
    }
}

impl ThemeSource for LocalThemeSource {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(self.resolve(path))
    }

    /// Writes go to a temp file next to the destination which is then
    /// renamed over it, so readers never see a half-written output.
    ///
    /// An existing output keeps its permissions; a new one gets the usual
    /// umask-derived mode rather than the temp file's private 0600.
    fn write_output(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        let target = self.resolve(path);
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = new_output_file(dir)?;
        match fs::metadata(&target) {
            Ok(existing) => tmp.as_file().set_permissions(existing.permissions())?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&target).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(unix)]
fn new_output_file(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    // 0666 is narrowed by the process umask at creation, like File::create
    tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn new_output_file(dir: &Path) -> io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_paths_resolve_against_base_dir() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::write(temp_dir.path().join("theme_00.json"), "{}").unwrap();

        let source = LocalThemeSource::new(temp_dir.path());
        assert!(source.exists(Path::new("theme_00.json")));
        assert!(!source.exists(Path::new("theme_01.json")));
        assert_eq!(
            source.read_to_string(Path::new("theme_00.json")).unwrap(),
            "{}"
        );
    }

    #[test]
    fn test_directories_are_not_theme_files() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::create_dir(temp_dir.path().join("theme_00.json")).unwrap();

        let source = LocalThemeSource::new(temp_dir.path());
        assert!(!source.exists(Path::new("theme_00.json")));
    }

    #[test]
    fn test_write_output_overwrites_existing_file() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let out = temp_dir.path().join("themes.bin");
        std::fs::write(&out, b"old contents that are longer").unwrap();

        let source = LocalThemeSource::new(temp_dir.path());
        source
            .write_output(Path::new("themes.bin"), &[0xC0, 0xFF])
            .unwrap();

        assert_eq!(std::fs::read(&out).unwrap(), vec![0xC0, 0xFF]);
        // no temp files left behind
        let leftovers = std::fs::read_dir(temp_dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_absolute_path_ignores_base_dir() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let abs = temp_dir.path().join("abs.bin");

        let source = LocalThemeSource::new("/nonexistent-base");
        source.write_output(&abs, &[0xC3]).unwrap();
        assert_eq!(std::fs::read(abs).unwrap(), vec![0xC3]);
    }

    #[cfg(unix)]
    fn mode(path: &Path) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        std::fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[cfg(unix)]
    #[test]
    fn test_write_output_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let out = temp_dir.path().join("themes.bin");
        std::fs::write(&out, [0xAB]).unwrap();
        std::fs::set_permissions(&out, std::fs::Permissions::from_mode(0o644)).unwrap();

        let source = LocalThemeSource::new(temp_dir.path());
        source.write_output(Path::new("themes.bin"), &[0xC0]).unwrap();
        assert_eq!(mode(&out), 0o644);
        source.write_output(Path::new("themes.bin"), &[0xFF]).unwrap();
        assert_eq!(mode(&out), 0o644);
        assert_eq!(std::fs::read(&out).unwrap(), vec![0xFF]);
    }

    #[cfg(unix)]
    #[test]
    fn test_new_output_gets_default_file_mode() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let plain = temp_dir.path().join("plain.bin");
        std::fs::File::create(&plain).unwrap();

        let source = LocalThemeSource::new(temp_dir.path());
        source.write_output(Path::new("themes.bin"), &[0xC0]).unwrap();
        assert_eq!(mode(&temp_dir.path().join("themes.bin")), mode(&plain));
    }
}
