// high_score.rs

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

const FILE_NAME: &str = "slipstream_best.txt";

/// Where the single persisted scalar lives: next to the executable, or the
/// working directory when the exe path is unavailable.
pub fn default_path() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(FILE_NAME))
}

/// Reads the persisted best score; any failure means "no best yet".
pub fn load(path: &Path) -> u32 {
    match fs::read_to_string(path) {
        Ok(text) => text.trim().parse().unwrap_or_else(|_| {
            warn!("unreadable best score in {:?}, starting from 0", path);
            0
        }),
        Err(_) => 0,
    }
}

/// Persists a new best score; failure is logged and ignored so score
/// keeping can never take the game down.
pub fn store(path: &Path, score: u32) {
    if let Err(err) = fs::write(path, format!("{}\n", score)) {
        warn!("could not persist best score to {:?}: {}", path, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        env::temp_dir().join(format!("slipstream_test_{}_{}", std::process::id(), name))
    }

    #[test]
    fn round_trips_a_score() {
        let path = scratch_file("roundtrip");
        store(&path, 4321);
        assert_eq!(load(&path), 4321);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_or_garbage_files_read_as_zero() {
        let path = scratch_file("missing");
        let _ = fs::remove_file(&path);
        assert_eq!(load(&path), 0);

        let path = scratch_file("garbage");
        fs::write(&path, "not a number").unwrap();
        assert_eq!(load(&path), 0);
        let _ = fs::remove_file(&path);
    }
}
