//! The fingerprint text format: `<w0><SEP><w1><SEP>...<wK-1>`, used both as
//! the intermediate hash-line format and as the `hashes.hash` SQLite column.

use crate::error::ParseError;
use crate::model::PHash;
use smallvec::SmallVec;
use std::fmt;

/// The hash print delimiter. The original tooling uses `,`.
pub const HASH_PRINT_DELIMITER: char = ',';

/// Encode a fingerprint as `<w0>,<w1>,...,<wK-1>`.
pub fn encode(hash: &PHash) -> String {
    let mut out = String::new();
    encode_into(hash, &mut out).expect("String formatting never fails");
    out
}

pub(crate) fn encode_into(hash: &PHash, out: &mut impl fmt::Write) -> fmt::Result {
    for (i, word) in hash.words().iter().enumerate() {
        if i > 0 {
            out.write_char(HASH_PRINT_DELIMITER)?;
        }
        write!(out, "{word}")?;
    }
    Ok(())
}

/// Decode a fingerprint, requiring it have exactly `expected_words` words if
/// given (the store is expected to be internally consistent — a mismatch is
/// a fatal parse error, not a silent truncation).
pub fn decode(data: &str, expected_words: Option<usize>) -> Result<PHash, ParseError> {
    let mut words: SmallVec<[u64; 4]> = SmallVec::new();

    for (index, token) in data.split(HASH_PRINT_DELIMITER).enumerate() {
        let word = token
            .trim()
            .parse::<u64>()
            .map_err(|_| ParseError::InvalidWord {
                index,
                value: token.to_string(),
            })?;
        words.push(word);
    }

    if let Some(expected) = expected_words {
        if words.len() != expected {
            return Err(ParseError::WordCountMismatch {
                found: words.len(),
                expected,
            });
        }
    }

    Ok(PHash::from_words(words))
}

/// Split a `<fingerprint>\t<path>` hash line.
pub fn split_hash_line(line: &str) -> Result<(&str, &str), ParseError> {
    line.split_once('\t')
        .ok_or_else(|| ParseError::MalformedLine(line.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_every_bit() {
        let original = PHash::from_words(SmallVec::from_slice(&[0xDEAD_BEEF_u64, 0, u64::MAX]));
        let text = encode(&original);
        let decoded = decode(&text, Some(3)).unwrap();
        assert_eq!(original, decoded);
    }

    #[test]
    fn rejects_non_numeric_word() {
        let err = decode("12,abc,34", None).unwrap_err();
        assert!(matches!(err, ParseError::InvalidWord { index: 1, .. }));
    }

    #[test]
    fn rejects_wrong_word_count() {
        let err = decode("1,2,3", Some(2)).unwrap_err();
        assert!(matches!(
            err,
            ParseError::WordCountMismatch {
                found: 3,
                expected: 2
            }
        ));
    }

    #[test]
    fn splits_hash_line() {
        let (hash, path) = split_hash_line("1,2,3\t/tmp/a.jpg").unwrap();
        assert_eq!(hash, "1,2,3");
        assert_eq!(path, "/tmp/a.jpg");
    }

    #[test]
    fn rejects_line_without_tab() {
        assert!(split_hash_line("no-tab-here").is_err());
    }
}
