//! Removal of a single profile block from a store file.

use std::fs::{self, OpenOptions};
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use super::{raw_lines, StoreError};

/// How a profile's header line may be spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    /// `[name]`
    Bare,
    /// `[profile name]`, the config file's spelling for non-default profiles.
    Prefixed,
}

impl HeaderStyle {
    pub fn render(self, profile_name: &str) -> String {
        match self {
            HeaderStyle::Bare => format!("[{profile_name}]"),
            HeaderStyle::Prefixed => format!("[profile {profile_name}]"),
        }
    }
}

/// Shape of a profile block in one store file: which header spellings
/// introduce it and how many lines follow the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLayout {
    pub headers: Vec<HeaderStyle>,
    pub body_lines: usize,
}

impl BlockLayout {
    pub fn new(headers: Vec<HeaderStyle>, body_lines: usize) -> Self {
        Self {
            headers,
            body_lines,
        }
    }

    /// `[name]` followed by the key id and secret lines.
    pub fn credentials() -> Self {
        Self::new(vec![HeaderStyle::Bare], 2)
    }

    /// `[name]` or `[profile name]` followed by one settings line.
    pub fn config() -> Self {
        Self::new(vec![HeaderStyle::Bare, HeaderStyle::Prefixed], 1)
    }

    pub fn with_body_lines(mut self, body_lines: usize) -> Self {
        self.body_lines = body_lines;
        self
    }

    fn header_lines(&self, profile_name: &str) -> Vec<String> {
        self.headers
            .iter()
            .map(|style| style.render(profile_name))
            .collect()
    }
}

/// Remove every block for `profile_name` from the file at `path` and rewrite it.
///
/// A matching header is dropped together with the next `layout.body_lines`
/// lines, whatever they contain. Everything else is copied byte for byte, so
/// the only change to unrelated content is newline normalization (`\r\n` and
/// a missing final newline both become `\n`). The file is rewritten even when
/// nothing matched. Returns the number of blocks removed.
///
/// The file must already exist; it is never created.
pub fn remove_block(
    path: &Path,
    profile_name: &str,
    layout: &BlockLayout,
) -> Result<usize, StoreError> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|e| StoreError::io(path, e))?;

    let headers = layout.header_lines(profile_name);
    let mut lines = raw_lines(BufReader::new(file));
    let mut kept = Vec::new();
    let mut removed = 0;

    while let Some(line) = lines.next() {
        let line = line.map_err(|e| StoreError::io(path, e))?;

        if headers.iter().any(|header| header.as_bytes() == line) {
            removed += 1;
            for _ in 0..layout.body_lines {
                match lines.next() {
                    Some(skipped) => {
                        skipped.map_err(|e| StoreError::io(path, e))?;
                    }
                    None => break,
                }
            }
            continue;
        }

        kept.extend_from_slice(&line);
        kept.push(b'\n');
    }
    // Close the read handle before rewriting.
    drop(lines);

    fs::write(path, kept).map_err(|e| StoreError::io(path, e))?;
    debug!(
        path = %path.display(),
        profile = %profile_name,
        removed,
        "Rewrote store file"
    );

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_header_rendering() {
        assert_eq!(HeaderStyle::Bare.render("dev"), "[dev]");
        assert_eq!(HeaderStyle::Prefixed.render("dev"), "[profile dev]");
    }

    #[test]
    fn test_removes_credentials_block() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "credentials",
            "[a]\naws_access_key_id = 1\naws_secret_access_key = 1\n\
             [b]\naws_access_key_id = 2\naws_secret_access_key = 2\n\
             [c]\naws_access_key_id = 3\naws_secret_access_key = 3\n",
        );

        let removed = remove_block(&path, "b", &BlockLayout::credentials()).unwrap();

        assert_eq!(removed, 1);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[a]\naws_access_key_id = 1\naws_secret_access_key = 1\n\
             [c]\naws_access_key_id = 3\naws_secret_access_key = 3\n"
        );
    }

    #[test]
    fn test_config_accepts_both_header_spellings() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "config",
            "[default]\nregion = us-east-1\n[profile b]\nregion = eu-west-1\n[b]\noutput = json\n[profile c]\nregion = ap-south-1\n",
        );

        let removed = remove_block(&path, "b", &BlockLayout::config()).unwrap();

        assert_eq!(removed, 2);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[default]\nregion = us-east-1\n[profile c]\nregion = ap-south-1\n"
        );
    }

    #[test]
    fn test_header_must_match_exactly() {
        let dir = TempDir::new().unwrap();
        let content = "[bb]\nregion = x\n[ b ]\nregion = y\n";
        let path = write(&dir, "config", content);

        let removed = remove_block(&path, "b", &BlockLayout::config()).unwrap();

        assert_eq!(removed, 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_absent_profile_rewrites_identical_content() {
        let dir = TempDir::new().unwrap();
        let content = "[a]\naws_access_key_id = 1\naws_secret_access_key = 1\n\n";
        let path = write(&dir, "credentials", content);

        assert_eq!(remove_block(&path, "zzz", &BlockLayout::credentials()).unwrap(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_missing_final_newline_is_normalized() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "credentials", "[a]\r\nx = 1");

        remove_block(&path, "zzz", &BlockLayout::credentials()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[a]\nx = 1\n");
    }

    #[test]
    fn test_header_near_end_of_file_consumes_what_remains() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "credentials", "[keep]\nk = 1\nk = 2\n[tail]\nonly-one-line\n");

        let removed = remove_block(&path, "tail", &BlockLayout::credentials()).unwrap();

        assert_eq!(removed, 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "[keep]\nk = 1\nk = 2\n");
    }

    #[test]
    fn test_body_lines_are_configurable() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "config",
            "[profile a]\nregion = x\noutput = json\n[profile b]\nregion = y\noutput = text\n",
        );
        let layout = BlockLayout::config().with_body_lines(2);

        remove_block(&path, "a", &layout).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[profile b]\nregion = y\noutput = text\n"
        );
    }

    #[test]
    fn test_non_utf8_lines_are_copied_unchanged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config");
        fs::write(
            &path,
            b"# caf\xe9 note\n[profile a]\nregion = x\n[profile b]\nregion = \xff\n",
        )
        .unwrap();

        let removed = remove_block(&path, "a", &BlockLayout::config()).unwrap();

        assert_eq!(removed, 1);
        assert_eq!(
            fs::read(&path).unwrap(),
            b"# caf\xe9 note\n[profile b]\nregion = \xff\n"
        );
    }

    #[test]
    fn test_missing_file_is_not_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials");

        let err = remove_block(&path, "a", &BlockLayout::credentials()).unwrap_err();

        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
        assert!(!path.exists());
    }
}
