use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::index::PrefixIndex;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Import a newline-delimited word file into the index. Blank lines are
/// ignored. Returns the number of words inserted and skipped.
pub fn import_words(
    file_path: &Path,
    index: &PrefixIndex,
) -> Result<(usize, usize), ImportError> {
    log::info!("importing words from {} ...", file_path.display());

    let reader = BufReader::new(File::open(file_path)?);

    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            words.push(line);
        }
    }

    let (inserted, skipped) = index.insert_batch(&words);
    log::info!(
        "imported {} words, skipped {} duplicates ({} total)",
        inserted,
        skipped,
        index.len()
    );

    Ok((inserted, skipped))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::store::JsonStore;

    #[test]
    fn import_skips_blanks_and_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("words.txt");
        fs::write(&src, "apple\n\n  Apple \nbanana\r\n   \napricot\n").unwrap();

        let data = dir.path().join("data.json");
        let idx = PrefixIndex::open(JsonStore::new(&data));
        assert_eq!(import_words(&src, &idx).unwrap(), (3, 1));
        assert_eq!(idx.autocomplete("ap"), vec!["apple", "apricot"]);

        let reopened = PrefixIndex::open(JsonStore::new(&data));
        assert_eq!(reopened.words(), vec!["apple", "banana", "apricot"]);
    }

    #[test]
    fn import_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let idx = PrefixIndex::open(JsonStore::new(dir.path().join("data.json")));
        assert!(import_words(&dir.path().join("nope.txt"), &idx).is_err());
        assert!(idx.is_empty());
    }
}
