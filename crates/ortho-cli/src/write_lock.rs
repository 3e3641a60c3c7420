//! Cross-process lock serialising import, regenerate and reset.
//!
//! The lock is a `synthesis.lock` file next to the database holding the
//! owner's pid. A lock whose pid is no longer running is reclaimed.

use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const LOCK_FILE_NAME: &str = "synthesis.lock";

const LOCK_WAIT_TIMEOUT: Duration = Duration::from_secs(300);
const LOCK_RETRY_DELAY: Duration = Duration::from_millis(250);

pub struct WriteLockGuard {
    path: PathBuf,
}

impl Drop for WriteLockGuard {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Lock file location for the database at `db_path`.
pub fn lock_path_for(db_path: &Path) -> PathBuf {
    db_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .join(LOCK_FILE_NAME)
}

pub async fn acquire_for_store(db_path: &Path) -> anyhow::Result<WriteLockGuard> {
    let lock_path = lock_path_for(db_path);
    let started = std::time::Instant::now();

    loop {
        match try_acquire(&lock_path) {
            Ok(guard) => return Ok(guard),
            Err(LockState::HeldBy(pid)) => {
                if started.elapsed() >= LOCK_WAIT_TIMEOUT {
                    anyhow::bail!(
                        "another synthesis run is in progress (pid {pid}); try again after it finishes"
                    );
                }
                tracing::debug!(pid, "waiting for synthesis lock");
                tokio::time::sleep(LOCK_RETRY_DELAY).await;
            }
            Err(LockState::Stale) => {
                tracing::warn!(path = %lock_path.display(), "reclaiming stale synthesis lock");
                let _ = std::fs::remove_file(&lock_path);
            }
            Err(LockState::Unknown) => {
                if started.elapsed() >= LOCK_WAIT_TIMEOUT {
                    anyhow::bail!(
                        "could not acquire synthesis lock at {}; remove it if no ortho process is running",
                        lock_path.display()
                    );
                }
                tokio::time::sleep(LOCK_RETRY_DELAY).await;
            }
        }
    }
}

#[derive(Debug)]
enum LockState {
    HeldBy(u32),
    Stale,
    Unknown,
}

fn try_acquire(lock_path: &Path) -> Result<WriteLockGuard, LockState> {
    if let Some(parent) = lock_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    match OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(lock_path)
    {
        Ok(mut file) => {
            let pid = std::process::id();
            let _ = writeln!(file, "{pid}");
            Ok(WriteLockGuard {
                path: lock_path.to_path_buf(),
            })
        }
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
            let mut pid_buf = String::new();
            if OpenOptions::new()
                .read(true)
                .open(lock_path)
                .and_then(|mut file| file.read_to_string(&mut pid_buf))
                .is_err()
            {
                return Err(LockState::Unknown);
            }

            match pid_buf.trim().parse::<u32>().ok() {
                Some(pid) if is_process_running(pid) => Err(LockState::HeldBy(pid)),
                Some(_) => Err(LockState::Stale),
                None => Err(LockState::Unknown),
            }
        }
        Err(_) => Err(LockState::Unknown),
    }
}

fn is_process_running(pid: u32) -> bool {
    std::process::Command::new("kill")
        .arg("-0")
        .arg(pid.to_string())
        .status()
        .is_ok_and(|status| status.success())
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use pretty_assertions::assert_eq;

    use super::{LockState, acquire_for_store, lock_path_for, try_acquire};

    #[test]
    fn lock_sits_next_to_the_database() {
        assert_eq!(
            lock_path_for(Path::new(".ortho/evidence.db")),
            PathBuf::from(".ortho/synthesis.lock")
        );
        assert_eq!(
            lock_path_for(Path::new("evidence.db")),
            PathBuf::from("./synthesis.lock")
        );
    }

    #[test]
    fn acquires_and_releases_lock_file() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let lock_path = temp.path().join("data/synthesis.lock");

        let guard = try_acquire(&lock_path).expect("lock should acquire");
        assert!(lock_path.is_file());
        drop(guard);
        assert!(!lock_path.exists());
    }

    #[test]
    fn live_holder_blocks_second_acquire() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let lock_path = temp.path().join("synthesis.lock");

        let _guard = try_acquire(&lock_path).expect("lock should acquire");
        assert!(matches!(try_acquire(&lock_path), Err(LockState::HeldBy(_))));
    }

    #[test]
    fn garbage_lock_is_unknown() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let lock_path = temp.path().join("synthesis.lock");
        std::fs::write(&lock_path, "not-a-pid\n").unwrap();
        assert!(matches!(try_acquire(&lock_path), Err(LockState::Unknown)));
    }

    #[tokio::test]
    async fn dead_pid_lock_is_reclaimed() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let db_path = temp.path().join("evidence.db");
        // Far above any pid_max, so never a running process.
        std::fs::write(temp.path().join("synthesis.lock"), "999999999\n").unwrap();

        let guard = acquire_for_store(&db_path).await.expect("stale lock should be reclaimed");
        let contents = std::fs::read_to_string(temp.path().join("synthesis.lock")).unwrap();
        assert_eq!(contents.trim(), std::process::id().to_string());
        drop(guard);
    }
}
