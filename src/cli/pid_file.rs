//! PID file management for the running indicator

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process;

use super::ipc::runtime_dir;

const PID_FILE_NAME: &str = "share-indicator.pid";

/// Single-instance guard for `run`
pub struct PidFile {
    path: PathBuf,
    owned: bool,
}

impl PidFile {
    /// Create a new PID file manager in the runtime directory
    pub fn new() -> Self {
        Self::with_path(runtime_dir().join(PID_FILE_NAME))
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            owned: false,
        }
    }

    /// Get the PID file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Check if another indicator is already running.
    ///
    /// A PID file naming a dead process is removed.
    pub fn is_running(&self) -> Option<u32> {
        let mut file = File::open(&self.path).ok()?;

        let mut contents = String::new();
        file.read_to_string(&mut contents).ok()?;
        let pid: u32 = contents.trim().parse().ok()?;

        if pid == process::id() {
            return None;
        }

        match process_alive(pid) {
            Some(true) => Some(pid),
            Some(false) => {
                // Stale PID file
                let _ = fs::remove_file(&self.path);
                None
            }
            None => None,
        }
    }

    /// Acquire the PID file (fails if another indicator is running)
    pub fn acquire(&mut self) -> Result<(), PidFileError> {
        if let Some(pid) = self.is_running() {
            return Err(PidFileError::AlreadyRunning(pid));
        }

        let mut file = File::create(&self.path).map_err(|e| {
            PidFileError::WriteFailed(format!("Failed to create PID file: {}", e))
        })?;

        write!(file, "{}", process::id())
            .map_err(|e| PidFileError::WriteFailed(format!("Failed to write PID: {}", e)))?;

        self.owned = true;
        Ok(())
    }

    /// Release the PID file if this process wrote it
    pub fn release(&mut self) -> Result<(), PidFileError> {
        if self.owned && self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                PidFileError::RemoveFailed(format!("Failed to remove PID file: {}", e))
            })?;
        }
        self.owned = false;
        Ok(())
    }
}

impl Default for PidFile {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PidFile {
    fn drop(&mut self) {
        let _ = self.release();
    }
}

/// Whether `pid` names a live process; `None` when it cannot be determined
#[cfg(unix)]
fn process_alive(pid: u32) -> Option<bool> {
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    let pid = i32::try_from(pid).ok()?;
    // Signal 0 checks existence without delivering anything
    match kill(Pid::from_raw(pid), None::<nix::sys::signal::Signal>) {
        Ok(()) | Err(nix::errno::Errno::EPERM) => Some(true),
        Err(nix::errno::Errno::ESRCH) => Some(false),
        Err(_) => None,
    }
}

#[cfg(windows)]
fn process_alive(pid: u32) -> Option<bool> {
    use windows_sys::Win32::Foundation::{CloseHandle, STILL_ACTIVE};
    use windows_sys::Win32::System::Threading::{
        GetExitCodeProcess, OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION,
    };

    // SAFETY: the handle is checked for null and closed before returning
    unsafe {
        let handle = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, 0, pid);
        if handle.is_null() {
            return Some(false);
        }
        let mut code: u32 = 0;
        let ok = GetExitCodeProcess(handle, &mut code);
        CloseHandle(handle);
        if ok == 0 {
            return None;
        }
        Some(code == STILL_ACTIVE as u32)
    }
}

/// PID file errors
#[derive(Debug, thiserror::Error)]
pub enum PidFileError {
    #[error("Another indicator is already running (PID: {0})")]
    AlreadyRunning(u32),

    #[error("Failed to write PID file: {0}")]
    WriteFailed(String),

    #[error("Failed to remove PID file: {0}")]
    RemoveFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_runtime_dir() {
        let pid_file = PidFile::new();
        assert_eq!(pid_file.path(), &runtime_dir().join(PID_FILE_NAME));
    }

    #[test]
    fn is_running_returns_none_for_nonexistent_file() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = PidFile::with_path(dir.path().join("nonexistent.pid"));
        assert!(pid_file.is_running().is_none());
    }

    #[test]
    fn acquire_and_release() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("indicator.pid");
        let mut pid_file = PidFile::with_path(&path);

        pid_file.acquire().unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, process::id().to_string());

        pid_file.release().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn garbage_pid_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("indicator.pid");
        fs::write(&path, "not-a-pid").unwrap();

        let mut pid_file = PidFile::with_path(&path);
        assert!(pid_file.is_running().is_none());
        pid_file.acquire().unwrap();
    }

    #[test]
    fn release_leaves_foreign_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("indicator.pid");
        fs::write(&path, "1").unwrap();

        let mut pid_file = PidFile::with_path(&path);
        pid_file.release().unwrap();
        assert!(path.exists());
    }
}
