//! PID file

use anyhow::{Context, Result};
use log::debug;
use std::path::Path;

/// Write the current process id to `path` as decimal text
pub fn write(path: &Path) -> Result<()> {
    let pid = std::process::id();
    std::fs::write(path, pid.to_string())
        .with_context(|| format!("Failed to write pid file: {}", path.display()))?;
    debug!("Wrote pid {} to {}", pid, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_own_pid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hug-status.pid");

        write(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, std::process::id().to_string());
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("hug-status.pid");

        let err = write(&path).unwrap_err();
        assert!(err.to_string().contains("hug-status.pid"));
    }
}
