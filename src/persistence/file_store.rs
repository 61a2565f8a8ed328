use super::KeyValueStore;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Ein Verzeichnis, eine Datei pro Schlüssel.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Öffnet (und erzeugt bei Bedarf) das Cache-Verzeichnis.
    pub fn open(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Cache-Verzeichnis {} nicht anlegbar", dir.display()))?;
        Ok(Self { dir })
    }

    /// Cache-Verzeichnis.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Schlüssel sind interne Konstanten, trotzdem keine Pfadtrenner zulassen
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(file_name)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Lesen von {} fehlgeschlagen", path.display())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, value)
            .with_context(|| format!("Schreiben von {} fehlgeschlagen", tmp.display()))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("Umbenennen nach {} fehlgeschlagen", path.display()))?;
        Ok(())
    }
}
