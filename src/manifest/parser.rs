//! Line-oriented manifest parser
//!
//! Turns a stream of `Name: value` lines into an [`AttributeStore`].

use crate::schema::{self, AttributeId};
use crate::store::AttributeStore;
use crate::{BbamiError, Result};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Why a line contributed nothing to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No `:` on the line
    NoSeparator,
    /// Nothing after the separator
    EmptyValue,
    /// Name is not part of the schema
    UnknownName,
}

/// Outcome of parsing a single manifest line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine<'a> {
    Entry { id: AttributeId, value: Cow<'a, str> },
    Skipped(SkipReason),
}

/// Split a raw line into `(name, value)` without consulting the schema
///
/// One trailing `\n` or `\r\n` is stripped, the name is everything before
/// the first `:`, and exactly one leading space is dropped from the value.
/// Returns `None` for lines without a separator.
pub fn split_line(line: &[u8]) -> Option<(&[u8], &[u8])> {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    let colon = line.iter().position(|&b| b == b':')?;
    let (name, rest) = (&line[..colon], &line[colon + 1..]);
    let value = rest.strip_prefix(b" ").unwrap_or(rest);
    Some((name, value))
}

/// Parse one manifest line against the schema
///
/// Lines are raw bytes; only values of recognized names are decoded, and
/// invalid UTF-8 in them is replaced with U+FFFD.
pub fn parse_line(line: &[u8]) -> ParsedLine<'_> {
    let Some((name, value)) = split_line(line) else {
        return ParsedLine::Skipped(SkipReason::NoSeparator);
    };
    if value.is_empty() {
        return ParsedLine::Skipped(SkipReason::EmptyValue);
    }
    match schema::resolve_bytes(name) {
        Some(id) => ParsedLine::Entry {
            id,
            value: String::from_utf8_lossy(value),
        },
        None => ParsedLine::Skipped(SkipReason::UnknownName),
    }
}

/// Builds an [`AttributeStore`] one line at a time
///
/// The store is owned exclusively by the loader until [`finish`] hands it
/// to the caller.
///
/// [`finish`]: ManifestLoader::finish
#[derive(Debug, Default)]
pub struct ManifestLoader {
    store: AttributeStore,
    lines: usize,
    skipped: usize,
}

impl ManifestLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw line
    ///
    /// Malformed lines are dropped silently; only ingestion failures
    /// (allocation) are errors.
    pub fn feed(&mut self, line: impl AsRef<[u8]>) -> Result<()> {
        self.lines += 1;
        match parse_line(line.as_ref()) {
            ParsedLine::Entry { id, value } => self.store.ingest(id, &value),
            ParsedLine::Skipped(reason) => {
                self.skipped += 1;
                tracing::trace!(line = self.lines, ?reason, "Skipping manifest line");
                Ok(())
            }
        }
    }

    /// Number of lines fed so far
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Number of lines that contributed nothing
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Hand over the populated store
    pub fn finish(self) -> AttributeStore {
        self.store
    }
}

/// Load a store from a sequence of lines
///
/// Stops at the first error from the line source or from ingestion; no
/// partial store is returned in that case.
pub fn load_lines<I, S>(lines: I) -> Result<AttributeStore>
where
    I: IntoIterator<Item = std::io::Result<S>>,
    S: AsRef<[u8]>,
{
    let mut loader = ManifestLoader::new();
    for line in lines {
        loader.feed(line?)?;
    }
    Ok(finish(loader))
}

/// Load a store from manifest text already in memory
pub fn load_str(content: &str) -> Result<AttributeStore> {
    load_lines(content.lines().map(Ok::<_, std::io::Error>))
}

/// Load a store from any buffered reader
///
/// Lines are read as raw bytes, so text in other encodings on unknown
/// lines never fails the load.
pub fn load_reader<R: BufRead>(mut reader: R) -> Result<AttributeStore> {
    let mut loader = ManifestLoader::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        loader.feed(&buf)?;
    }
    Ok(finish(loader))
}

fn finish(loader: ManifestLoader) -> AttributeStore {
    tracing::debug!(
        lines = loader.lines(),
        skipped = loader.skipped(),
        "Manifest lines consumed"
    );
    loader.finish()
}

/// Load a store from a manifest file
pub fn load_file(path: &Path) -> Result<AttributeStore> {
    let with_path = |source| BbamiError::ManifestIo {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(with_path)?;
    let store = load_reader(BufReader::new(file)).map_err(|e| match e {
        BbamiError::Io(source) => with_path(source),
        other => other,
    })?;
    tracing::info!(
        path = %path.display(),
        attributes = store.populated(),
        "Loaded manifest"
    );
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_MANIFEST: &str = "\
Application-Name: Example
Package-Version: 1.0.0
Package-Version: 1.0.1
Unknown-Field: ignored
Application-Name:
";

    #[test]
    fn test_split_line() {
        let author: &[u8] = b"Author";
        assert_eq!(split_line(b"Author: Jane\n"), Some((author, &b"Jane"[..])));
        assert_eq!(split_line(b"Author: Jane\r\n"), Some((author, &b"Jane"[..])));
        assert_eq!(split_line(b"Author:Jane"), Some((author, &b"Jane"[..])));
        assert_eq!(split_line(b"Author:  Jane"), Some((author, &b" Jane"[..])));
        assert_eq!(split_line(b"Author:"), Some((author, &b""[..])));
        assert_eq!(split_line(b"Author: "), Some((author, &b""[..])));
        assert_eq!(split_line(b"no separator here"), None);
    }

    #[test]
    fn test_split_strips_only_one_terminator() {
        let author: &[u8] = b"Author";
        assert_eq!(split_line(b"Author: Jane\r\r"), Some((author, &b"Jane\r"[..])));
        assert_eq!(split_line(b"Author: Jane\n\n"), Some((author, &b"Jane\n"[..])));
        assert_eq!(split_line(b"Author: Jane\r"), Some((author, &b"Jane"[..])));
    }

    #[test]
    fn test_split_on_first_colon_only() {
        assert_eq!(
            split_line(b"Entry-Point: bin/app:main"),
            Some((&b"Entry-Point"[..], &b"bin/app:main"[..]))
        );
        assert_eq!(
            split_line(b"Archive-Asset-SHA-512-Digest: a:b:c\n"),
            Some((&b"Archive-Asset-SHA-512-Digest"[..], &b"a:b:c"[..]))
        );
    }

    #[test]
    fn test_extra_carriage_return_stays_in_value() {
        let store = load_reader(&b"Author: Jane\r\r\n"[..]).unwrap();
        assert_eq!(store.query(AttributeId::Author, 0).unwrap(), "Jane\r");
    }

    #[test]
    fn test_parse_line_skip_reasons() {
        assert_eq!(
            parse_line(b"just text"),
            ParsedLine::Skipped(SkipReason::NoSeparator)
        );
        assert_eq!(
            parse_line(b"Author: \n"),
            ParsedLine::Skipped(SkipReason::EmptyValue)
        );
        assert_eq!(
            parse_line(b"X-Custom: value"),
            ParsedLine::Skipped(SkipReason::UnknownName)
        );
        // Name must match exactly, surrounding whitespace included
        assert_eq!(
            parse_line(b" Author: Jane"),
            ParsedLine::Skipped(SkipReason::UnknownName)
        );
        assert_eq!(
            parse_line(b"Author: Jane"),
            ParsedLine::Entry {
                id: AttributeId::Author,
                value: "Jane".into()
            }
        );
    }

    #[test]
    fn test_load_example_manifest() {
        let store = load_str(EXAMPLE_MANIFEST).unwrap();

        assert_eq!(store.count(AttributeId::ApplicationName).unwrap(), 1);
        assert_eq!(store.query(AttributeId::ApplicationName, 0).unwrap(), "Example");

        assert_eq!(store.count(AttributeId::PackageVersion).unwrap(), 2);
        assert_eq!(store.query(AttributeId::PackageVersion, 0).unwrap(), "1.0.0");
        assert_eq!(store.query(AttributeId::PackageVersion, 1).unwrap(), "1.0.1");

        assert_eq!(store.populated(), 2);
    }

    #[test]
    fn test_loader_counts_skipped_lines() {
        let mut loader = ManifestLoader::new();
        for line in EXAMPLE_MANIFEST.lines() {
            loader.feed(line).unwrap();
        }
        assert_eq!(loader.lines(), 5);
        assert_eq!(loader.skipped(), 2);
    }

    #[test]
    fn test_load_reader_keeps_line_terminators_out_of_values() {
        let input = "Author: Jane\r\nPackage-Id: pkg\n";
        let store = load_reader(input.as_bytes()).unwrap();
        assert_eq!(store.query(AttributeId::Author, 0).unwrap(), "Jane");
        assert_eq!(store.query(AttributeId::PackageId, 0).unwrap(), "pkg");
    }

    #[test]
    fn test_line_source_error_aborts_load() {
        let lines: Vec<std::io::Result<&str>> = vec![
            Ok("Author: Jane"),
            Err(std::io::Error::new(std::io::ErrorKind::Other, "boom")),
            Ok("Package-Id: never-read"),
        ];
        let err = load_lines(lines).unwrap_err();
        assert!(matches!(err, BbamiError::Io(_)));
    }

    #[test]
    fn test_non_utf8_unknown_line_is_dropped() {
        let input: &[u8] = b"Application-Name: Example\nX-Comment: caf\xe9\nPackage-Version: 1.0.0\n";
        let store = load_reader(input).unwrap();
        assert_eq!(store.query(AttributeId::ApplicationName, 0).unwrap(), "Example");
        assert_eq!(store.query(AttributeId::PackageVersion, 0).unwrap(), "1.0.0");
        assert_eq!(store.populated(), 2);
    }

    #[test]
    fn test_non_utf8_value_is_decoded_lossily() {
        let input: &[u8] = b"Author: Jos\xe9\n";
        let store = load_reader(input).unwrap();
        assert_eq!(store.query(AttributeId::Author, 0).unwrap(), "Jos\u{FFFD}");
    }

    #[test]
    fn test_long_lines_are_not_split() {
        let digest = "f".repeat(4096);
        let input = format!("Archive-Asset-SHA-512-Digest: {digest}\n");
        let store = load_str(&input).unwrap();
        assert_eq!(
            store.query(AttributeId::ArchiveAssetSha512Digest, 0).unwrap(),
            digest
        );
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_file(Path::new("/definitely/not/here/MANIFEST.MF")).unwrap_err();
        match err {
            BbamiError::ManifestIo { path, .. } => {
                assert_eq!(path, Path::new("/definitely/not/here/MANIFEST.MF"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
