//! Line-oriented parser for the shared credentials file.
//!
//! The format has no block terminator, so fields are associated with the most
//! recent header positionally. The secret-key line is the commit point: a
//! block is only emitted once it has been seen.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use super::{raw_lines, StoreError};
use crate::models::Profile;

const ACCESS_KEY_ID: &[u8] = b"aws_access_key_id";
const ACCESS_KEY_ID_PREFIX: &[u8] = b"aws_access_key_id = ";
const SECRET_ACCESS_KEY: &[u8] = b"aws_secret_access_key";
const SECRET_ACCESS_KEY_PREFIX: &[u8] = b"aws_secret_access_key = ";

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Header(&'a [u8]),
    AccessKeyId(&'a [u8]),
    SecretAccessKey(&'a [u8]),
    Other,
}

impl<'a> Line<'a> {
    fn classify(line: &'a [u8]) -> Self {
        if line.starts_with(b"[") {
            Line::Header(trim_brackets(line))
        } else if line.starts_with(ACCESS_KEY_ID) {
            Line::AccessKeyId(line.strip_prefix(ACCESS_KEY_ID_PREFIX).unwrap_or(line))
        } else if line.starts_with(SECRET_ACCESS_KEY) {
            Line::SecretAccessKey(line.strip_prefix(SECRET_ACCESS_KEY_PREFIX).unwrap_or(line))
        } else {
            Line::Other
        }
    }
}

/// Strip every leading and trailing `[` or `]`.
fn trim_brackets(mut line: &[u8]) -> &[u8] {
    while let [b'[' | b']', rest @ ..] = line {
        line = rest;
    }
    while let [rest @ .., b'[' | b']'] = line {
        line = rest;
    }
    line
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Seeking,
    HaveName {
        name: String,
    },
    HaveKeyId {
        name: String,
        access_key_id: String,
    },
}

impl State {
    /// Advance on one line, returning a profile when a block closes.
    fn step(self, line: Line<'_>) -> (State, Option<Profile>) {
        match (self, line) {
            (_, Line::Header(name)) => (State::HaveName { name: text(name) }, None),
            (State::HaveName { name } | State::HaveKeyId { name, .. }, Line::AccessKeyId(key)) => (
                State::HaveKeyId {
                    name,
                    access_key_id: text(key),
                },
                None,
            ),
            (State::HaveName { name }, Line::SecretAccessKey(secret)) => {
                (State::Seeking, Some(Profile::new(name, "", text(secret))))
            }
            (
                State::HaveKeyId {
                    name,
                    access_key_id,
                },
                Line::SecretAccessKey(secret),
            ) => (
                State::Seeking,
                Some(Profile::new(name, access_key_id, text(secret))),
            ),
            (state, _) => (state, None),
        }
    }
}

/// Parse every complete profile block in the file at `path`, in file order.
pub fn parse_profiles(path: &Path) -> Result<Vec<Profile>, StoreError> {
    let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    let profiles = parse_profiles_from(BufReader::new(file), path)?;
    debug!(path = %path.display(), count = profiles.len(), "Parsed credentials file");
    Ok(profiles)
}

/// Parse profiles from an already-open reader. `origin` is only used to
/// label errors.
pub fn parse_profiles_from<R: BufRead>(
    reader: R,
    origin: &Path,
) -> Result<Vec<Profile>, StoreError> {
    let mut profiles: Vec<Profile> = Vec::new();
    let mut state = State::default();

    for line in raw_lines(reader) {
        let line = line.map_err(|e| StoreError::io(origin, e))?;
        let (next, finished) = state.step(Line::classify(&line));
        state = next;

        if let Some(profile) = finished {
            // Last block under a name wins.
            if let Some(pos) = profiles.iter().position(|p| p.name == profile.name) {
                debug!(profile = %profile.name, "Duplicate profile block replaces earlier one");
                profiles.remove(pos);
            }
            profiles.push(profile);
        }
    }

    if !matches!(state, State::Seeking) {
        debug!(path = %origin.display(), "Dropping unterminated profile block at end of file");
    }

    Ok(profiles)
}
