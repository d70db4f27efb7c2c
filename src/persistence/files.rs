use crate::persistence::PersistenceError;
use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const FLOW_DIR_NAME: &str = ".flow";

/// Get the flow directory - checks for local .flow first, then falls back to global ~/.flow
pub fn get_flow_dir() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_flow(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(FLOW_DIR_NAME))
}

/// Find local .flow directory by walking up the directory tree
fn find_local_flow(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let flow_dir = current.join(FLOW_DIR_NAME);
        if flow_dir.is_dir() {
            return Some(flow_dir);
        }
        current = current.parent()?;
    }
}

/// Ensure the flow directory exists
pub fn ensure_flow_dir() -> Result<PathBuf> {
    let dir = get_flow_dir()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .flow directory in the current directory
pub fn init_local_flow() -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Could not determine current directory")?;
    let flow_dir = current_dir.join(FLOW_DIR_NAME);

    if flow_dir.exists() {
        return Err(PersistenceError::AlreadyInitialized(flow_dir).into());
    }

    fs::create_dir_all(&flow_dir)
        .with_context(|| format!("Failed to create directory: {}", flow_dir.display()))?;

    Ok(flow_dir)
}

pub fn queue_file() -> Result<PathBuf> {
    Ok(ensure_flow_dir()?.join("queue.json"))
}

pub fn settings_file() -> Result<PathBuf> {
    Ok(ensure_flow_dir()?.join("settings.json"))
}

pub fn log_file() -> Result<PathBuf> {
    Ok(ensure_flow_dir()?.join("flow.log"))
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path.parent().context("File path has no parent directory")?;

    let mut temp_file = NamedTempFile::new_in(dir).context("Failed to create temporary file")?;

    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;

    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}

/// Read file content, return empty string if file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(String::new());
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_flow_dir() {
        let dir = get_flow_dir().unwrap();
        assert!(dir.to_string_lossy().contains(".flow"));
    }

    #[test]
    fn test_find_local_flow_walks_up() {
        let temp_dir = tempfile::tempdir().unwrap();
        let flow_dir = temp_dir.path().join(".flow");
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&flow_dir).unwrap();
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_local_flow(&nested), Some(flow_dir));
    }

    #[test]
    fn test_atomic_write_and_read() {
        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("test.txt");

        atomic_write(&test_file, "Hello, world!").unwrap();
        assert_eq!(read_file(&test_file).unwrap(), "Hello, world!");

        atomic_write(&test_file, "Replaced").unwrap();
        assert_eq!(read_file(&test_file).unwrap(), "Replaced");
    }

    #[test]
    fn test_read_nonexistent_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let content = read_file(temp_dir.path().join("nonexistent.txt")).unwrap();
        assert_eq!(content, "");
    }
}
