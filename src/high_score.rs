use std::{fs, io, path::PathBuf};

use log::{debug, error, warn};

/// Durable home of the single high score value. Both operations are best
/// effort: a store that cannot be read reports 0, and a failed write is only
/// logged.
pub trait HighScoreStore {
    fn load(&self) -> u32;
    fn save(&mut self, high_score: u32);
}

/// Keeps the high score as a decimal integer in a text file.
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileHighScoreStore { path: path.into() }
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self) -> u32 {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no high score at {}, starting from 0", self.path.display());
                return 0;
            },
            Err(e) => {
                error!("error loading high score from {}: {}", self.path.display(), e);
                return 0;
            },
        };

        content.trim().parse().unwrap_or_else(|e| {
            warn!("ignoring malformed high score in {}: {}", self.path.display(), e);
            0
        })
    }

    fn save(&mut self, high_score: u32) {
        if let Err(e) = fs::write(&self.path, high_score.to_string()) {
            error!("error saving high score to {}: {}", self.path.display(), e);
        }
    }
}

/// Session-only store, for runs that should not touch the disk.
#[derive(Debug, Default)]
pub struct MemoryHighScoreStore {
    value: u32,
}

impl MemoryHighScoreStore {
    #[cfg(test)]
    pub fn with_value(value: u32) -> Self {
        MemoryHighScoreStore { value }
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self) -> u32 {
        self.value
    }

    fn save(&mut self, high_score: u32) {
        self.value = high_score;
    }
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for Box<S> {
    fn load(&self) -> u32 {
        (**self).load()
    }

    fn save(&mut self, high_score: u32) {
        (**self).save(high_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("snake-{}-{}", std::process::id(), name));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn missing_file_reads_as_zero() {
        let store = FileHighScoreStore::new(scratch_file("missing"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn saved_value_is_loaded_back() {
        let path = scratch_file("saved");
        let mut store = FileHighScoreStore::new(&path);
        store.save(17);

        assert_eq!(fs::read_to_string(&path).unwrap(), "17");
        assert_eq!(FileHighScoreStore::new(&path).load(), 17);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn garbage_reads_as_zero() {
        let path = scratch_file("garbage");
        fs::write(&path, "not a number").unwrap();

        assert_eq!(FileHighScoreStore::new(&path).load(), 0);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let path = scratch_file("whitespace");
        fs::write(&path, " 42\n").unwrap();

        assert_eq!(FileHighScoreStore::new(&path).load(), 42);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn failed_write_is_not_fatal() {
        let dir = scratch_file("dir-in-the-way");
        fs::create_dir_all(&dir).unwrap();

        // Writing to a path that is a directory fails; save must only log.
        let mut store = FileHighScoreStore::new(&dir);
        store.save(3);
        assert_eq!(store.load(), 0);
        fs::remove_dir(&dir).unwrap();
    }

    #[test]
    fn memory_store_keeps_the_last_value() {
        let mut store = MemoryHighScoreStore::with_value(5);
        assert_eq!(store.load(), 5);
        store.save(6);
        store.save(7);
        assert_eq!(store.load(), 7);
    }

    #[test]
    fn boxed_stores_forward() {
        let mut store: Box<dyn HighScoreStore> = Box::new(MemoryHighScoreStore::default());
        store.save(12);
        assert_eq!(store.load(), 12);
    }
}
