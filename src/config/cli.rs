use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }

    fn resolve(&self, path: &str) -> String {
        Path::new(&self.base_path).join(path).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_file_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        storage
            .write_file("nested/forward.conf", "forward=x\n香港".as_bytes())
            .await
            .unwrap();

        let full = temp_dir.path().join("nested/forward.conf");
        assert_eq!(fs::read_to_string(&full).unwrap(), "forward=x\n香港");
        assert_eq!(
            storage.resolve("nested/forward.conf"),
            full.display().to_string()
        );
    }

    #[tokio::test]
    async fn test_absolute_filename_ignores_base_path() {
        let base = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        let target = other.path().join("out.txt");
        let storage = LocalStorage::new(base.path().to_str().unwrap().to_string());

        storage
            .write_file(target.to_str().unwrap(), b"data")
            .await
            .unwrap();

        assert!(target.exists());
        assert_eq!(storage.resolve(target.to_str().unwrap()), target.display().to_string());
    }
}
