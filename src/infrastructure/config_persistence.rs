use super::ini_document::IniDocument;
use crate::domain::errors::{ParseError, PersistError};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Reads and rewrites the backing config file as a whole document.
#[derive(Debug, Clone)]
pub struct ConfigPersistence {
    file_path: PathBuf,
}

impl ConfigPersistence {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn load(&self) -> Result<IniDocument, ParseError> {
        let content = fs::read_to_string(&self.file_path).map_err(|source| ParseError::Read {
            path: self.file_path.clone(),
            source,
        })?;
        IniDocument::parse(&content)
    }

    /// Rewrite the whole file.
    ///
    /// The new content replaces the file a symlink points at, keeps the
    /// original permissions, and is refused when the file is read-only.
    pub fn save(&self, document: &IniDocument) -> Result<(), PersistError> {
        let persist_err = |source| PersistError {
            path: self.file_path.clone(),
            source,
        };

        let target = self.resolve_target().map_err(persist_err)?;
        let permissions = match fs::metadata(&target) {
            Ok(metadata) => Some(metadata.permissions()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(persist_err(e)),
        };
        if permissions.as_ref().is_some_and(|p| p.readonly()) {
            return Err(persist_err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "config file is read-only",
            )));
        }

        // Atomic write: write to temp file then rename
        let temp_path = Self::temp_path(&target);
        if let Err(source) = Self::write_temp(&temp_path, permissions, &document.render())
            .and_then(|()| fs::rename(&temp_path, &target))
        {
            let _ = fs::remove_file(&temp_path);
            return Err(persist_err(source));
        }

        info!("Saved config to {:?}", self.file_path);
        Ok(())
    }

    /// Follow symlinks so the link itself survives the rename.
    fn resolve_target(&self) -> io::Result<PathBuf> {
        match fs::canonicalize(&self.file_path) {
            Ok(target) => Ok(target),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(self.file_path.clone()),
            Err(e) => Err(e),
        }
    }

    // Permissions are applied before any content is written
    fn write_temp(path: &Path, permissions: Option<fs::Permissions>, content: &str) -> io::Result<()> {
        let mut file = fs::File::create(path)?;
        if let Some(permissions) = permissions {
            fs::set_permissions(path, permissions)?;
        }
        file.write_all(content.as_bytes())?;
        file.sync_all()
    }

    fn temp_path(target: &Path) -> PathBuf {
        let mut name = target
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        target.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load() {
        let tmp = TempDir::new().expect("temp dir");
        let path = tmp.path().join("bot.ini");
        fs::write(&path, "[general]\n# keep me\nname = alpha\n").unwrap();

        let persistence = ConfigPersistence::new(&path);
        let mut doc = persistence.load().unwrap();
        doc.set("general", "name", "beta");
        persistence.save(&doc).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "[general]\n# keep me\nname = beta\n");
        assert!(!tmp.path().join("bot.ini.tmp").exists());
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let tmp = TempDir::new().expect("temp dir");
        let persistence = ConfigPersistence::new(tmp.path().join("absent.ini"));
        assert!(matches!(persistence.load(), Err(ParseError::Read { .. })));
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let tmp = TempDir::new().expect("temp dir");
        let persistence = ConfigPersistence::new(tmp.path().join("gone").join("bot.ini"));
        let err = persistence.save(&IniDocument::default()).unwrap_err();
        assert!(err.path.ends_with("gone/bot.ini"));
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().expect("temp dir");
        let path = tmp.path().join("bot.ini");
        fs::write(&path, "[IB]\npassword = hunter2\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();

        let persistence = ConfigPersistence::new(&path);
        let mut doc = persistence.load().unwrap();
        doc.set("IB", "password", "changed");
        persistence.save(&doc).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn test_save_refuses_read_only_file() {
        let tmp = TempDir::new().expect("temp dir");
        let path = tmp.path().join("bot.ini");
        fs::write(&path, "[general]\nname = alpha\n").unwrap();

        let persistence = ConfigPersistence::new(&path);
        let mut doc = persistence.load().unwrap();
        let mut permissions = fs::metadata(&path).unwrap().permissions();
        permissions.set_readonly(true);
        fs::set_permissions(&path, permissions).unwrap();

        doc.set("general", "name", "beta");
        let err = persistence.save(&doc).unwrap_err();
        assert_eq!(err.source.kind(), io::ErrorKind::PermissionDenied);
        assert_eq!(fs::read_to_string(&path).unwrap(), "[general]\nname = alpha\n");
        assert!(!tmp.path().join("bot.ini.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_save_through_symlink_keeps_link() {
        let tmp = TempDir::new().expect("temp dir");
        let real = tmp.path().join("real.ini");
        let link = tmp.path().join("bot.ini");
        fs::write(&real, "[general]\nname = alpha\n").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let persistence = ConfigPersistence::new(&link);
        let mut doc = persistence.load().unwrap();
        doc.set("general", "name", "beta");
        persistence.save(&doc).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "[general]\nname = beta\n");
    }
}
