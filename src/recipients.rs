use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use teloxide::types::ChatId;

/// Flat-file list of chat ids, one decimal integer per line. Append-only:
/// there is no removal path. Read-then-append is fine here because the bot is
/// the only writer and runs single-threaded.
pub struct RecipientStore {
    path: PathBuf,
}

impl RecipientStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        RecipientStore { path: path.into() }
    }

    /// A missing file is an empty store, not an error. Lines that do not
    /// parse as an integer are skipped.
    pub fn load(&self) -> io::Result<HashSet<ChatId>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(HashSet::new()),
            Err(e) => return Err(e),
        };
        Ok(contents
            .lines()
            .filter_map(|line| line.trim().parse::<i64>().ok())
            .map(ChatId)
            .collect())
    }

    /// Appends the id unless it is already stored. Returns whether a new line
    /// was written.
    pub fn save(&self, id: ChatId) -> io::Result<bool> {
        if self.load()?.contains(&id) {
            return Ok(false);
        }
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{}", id.0)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> RecipientStore {
        RecipientStore::new(dir.path().join("chat_ids.txt"))
    }

    #[test]
    fn missing_file_loads_as_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_is_idempotent_per_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.save(ChatId(111)).unwrap());
        assert!(!store.save(ChatId(111)).unwrap());
        assert!(store.save(ChatId(222)).unwrap());

        let contents = fs::read_to_string(dir.path().join("chat_ids.txt")).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert_eq!(store.load().unwrap(), HashSet::from([ChatId(111), ChatId(222)]));
    }

    #[test]
    fn prefix_of_a_stored_id_is_still_saved() {
        // 11 is a substring of 117 but a distinct recipient.
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.save(ChatId(117)).unwrap());
        assert!(store.save(ChatId(11)).unwrap());
        assert_eq!(store.load().unwrap().len(), 2);
    }

    #[test]
    fn unparsable_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat_ids.txt");
        fs::write(&path, "111\nnot-a-number\n\n 222 \n").unwrap();

        let store = RecipientStore::new(&path);
        assert_eq!(store.load().unwrap(), HashSet::from([ChatId(111), ChatId(222)]));
    }
}
