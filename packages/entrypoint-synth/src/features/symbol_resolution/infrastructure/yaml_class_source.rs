//! Lazy class loader over a directory of YAML class models
//!
//! Class `a.b.C` lives in `<root>/a/b/C.yaml`. Files are only read when the
//! class is first requested.

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::features::symbol_resolution::domain::{ClassSymbol, ResolveError, ResolveResult};
use crate::features::symbol_resolution::ports::ClassSource;

const EXTENSION: &str = "yaml";

#[derive(Debug, Clone)]
pub struct YamlClassSource {
    root: PathBuf,
}

impl YamlClassSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, class_name: &str) -> PathBuf {
        let mut path = self.root.clone();
        for segment in class_name.split('.') {
            path.push(segment);
        }
        path.set_extension(EXTENSION);
        path
    }

    fn class_name_for(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?.with_extension("");
        let segments: Vec<_> = relative
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<_>>()?;
        Some(segments.join("."))
    }
}

impl ClassSource for YamlClassSource {
    fn find_class(&self, name: &str) -> ResolveResult<Option<ClassSymbol>> {
        let path = self.path_for(name);
        if !path.is_file() {
            return Ok(None);
        }

        debug!("Reading class model {}", path.display());
        let text = std::fs::read_to_string(&path).map_err(|source| ResolveError::Io {
            class_name: name.to_string(),
            path: path.clone(),
            source,
        })?;

        let class: ClassSymbol =
            serde_yaml::from_str(&text).map_err(|err| ResolveError::Malformed {
                class_name: name.to_string(),
                reason: err.to_string(),
            })?;
        Ok(Some(class))
    }

    fn available_classes(&self) -> ResolveResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|err| ResolveError::Io {
                class_name: String::new(),
                path: err.path().map(Path::to_path_buf).unwrap_or_else(|| self.root.clone()),
                source: err.into(),
            })?;
            let path = entry.path();
            if entry.file_type().is_file()
                && path.extension().and_then(|e| e.to_str()) == Some(EXTENSION)
            {
                if let Some(name) = self.class_name_for(path) {
                    names.push(name);
                }
            }
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_model(root: &Path, relative: &str, body: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    #[test]
    fn test_path_mapping() {
        let source = YamlClassSource::new("/models");
        assert_eq!(
            source.path_for("com.acme.Controller"),
            PathBuf::from("/models/com/acme/Controller.yaml")
        );
    }

    #[test]
    fn test_find_and_list() {
        let dir = TempDir::new().unwrap();
        write_model(
            dir.path(),
            "com/acme/Controller.yaml",
            "name: com.acme.Controller\nmethods:\n  - name: <init>\n",
        );
        write_model(dir.path(), "com/acme/Service.yaml", "name: com.acme.Service\n");

        let source = YamlClassSource::new(dir.path());
        let class = source.find_class("com.acme.Controller").unwrap().unwrap();
        assert_eq!(class.methods.len(), 1);
        assert!(source.find_class("com.acme.Missing").unwrap().is_none());

        assert_eq!(
            source.available_classes().unwrap(),
            vec!["com.acme.Controller", "com.acme.Service"]
        );
    }

    #[test]
    fn test_malformed_model() {
        let dir = TempDir::new().unwrap();
        write_model(dir.path(), "a/Bad.yaml", "name: [unclosed\n");

        let source = YamlClassSource::new(dir.path());
        let err = source.find_class("a.Bad").unwrap_err();
        assert!(matches!(err, ResolveError::Malformed { .. }));
    }
}
