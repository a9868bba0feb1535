//! # Sample-file parser
//!
//! Reads a comma-delimited sample file into its header field names and the raw field
//! values of every data row.
//!
//! ## Line grammar
//! -----------------
//! * A line whose first non-blank character is `#` is a **header** line. Its remainder is a
//!   comma-separated list of field names.
//! * Blank lines are ignored.
//! * Every other line is a **data** line, split with [`intelligent_split`]: bracketed groups
//!   such as `[0.1, 0.2]` are kept as one field even though they contain commas.
//!
//! ## Validation
//! -----------------
//! * The first header line listing exactly the fields of the [`Schema`] is used; if no header
//!   matches, parsing fails with [`NeoMlError::MissingHeader`].
//! * Every data line must split into exactly as many fields as the header, for every record
//!   kind; otherwise parsing fails with [`NeoMlError::FieldCountMismatch`].
use camino::Utf8Path;
use itertools::Itertools;

use crate::{neo_ml_errors::NeoMlError, schema::Schema};

/// One data line of a sample file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    /// 1-based line number in the source file.
    pub line: usize,
    pub fields: Vec<String>,
}

/// Header and data rows of a sample file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFile {
    /// Field names in file order.
    pub header: Vec<String>,
    pub rows: Vec<ParsedRow>,
}

/// Split a data line on commas, keeping bracketed groups intact.
///
/// Runs enclosed in balanced `[` … `]` are atomic (nested brackets are allowed); the
/// remainder is split on commas. Every token is trimmed and empty fragments are dropped.
///
/// Arguments
/// -----------------
/// * `line`: one data line, with or without its trailing newline.
///
/// Return
/// ----------
/// * The field values in order.
///
/// Examples
/// -----------------
/// ```
/// use neo_ml::sample_data::parser::intelligent_split;
///
/// assert_eq!(intelligent_split("A,[1,2,3],B"), vec!["A", "[1,2,3]", "B"]);
/// assert_eq!(intelligent_split(" a , [0.5, 1.0] , None "), vec!["a", "[0.5, 1.0]", "None"]);
/// ```
pub fn intelligent_split(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    let mut push_token = |current: &mut String| {
        let token = current.trim();
        if !token.is_empty() {
            tokens.push(token.to_string());
        }
        current.clear();
    };

    for c in line.chars() {
        match c {
            '[' => {
                depth += 1;
                current.push(c);
            }
            ']' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => push_token(&mut current),
            _ => current.push(c),
        }
    }
    push_token(&mut current);

    tokens
}

/// Field names listed on a header line, or `None` if the line is not a header.
pub fn header_fields(line: &str) -> Option<Vec<String>> {
    let rest = line.trim_start().strip_prefix('#')?;
    Some(
        rest.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
    )
}

/// Read a whole text file, distinguishing a missing file from an unreadable one.
pub fn read_file(path: &Utf8Path) -> Result<String, NeoMlError> {
    if !path.is_file() {
        return Err(NeoMlError::FileNotFound(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|source| NeoMlError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse the text of a sample file against `schema`.
///
/// See the [module documentation](self) for the line grammar and the validation rules.
pub fn parse_sample_str(content: &str, schema: &Schema) -> Result<ParsedFile, NeoMlError> {
    let header = content
        .lines()
        .filter_map(header_fields)
        .find(|fields| schema.matches_header(fields))
        .ok_or_else(|| NeoMlError::MissingHeader {
            kind: schema.kind,
            expected: schema.field_names().join(", "),
        })?;

    let rows = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty() && header_fields(line).is_none())
        .map(|(idx, line)| {
            let fields = intelligent_split(line);
            if fields.len() != header.len() {
                return Err(NeoMlError::FieldCountMismatch {
                    kind: schema.kind,
                    line: idx + 1,
                    expected: header.len(),
                    found: fields.len(),
                });
            }
            Ok(ParsedRow {
                line: idx + 1,
                fields,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ParsedFile { header, rows })
}

/// Read and parse a sample file against `schema`.
///
/// Errors
/// ----------
/// * [`NeoMlError::FileNotFound`] / [`NeoMlError::FileRead`] on access problems,
/// * [`NeoMlError::MissingHeader`] / [`NeoMlError::FieldCountMismatch`] on structural problems.
pub fn parse_sample_file(path: &Utf8Path, schema: &Schema) -> Result<ParsedFile, NeoMlError> {
    let content = read_file(path)?;
    let parsed = parse_sample_str(&content, schema)?;
    log::debug!(
        "parsed {} {} rows from {path}",
        parsed.rows.len(),
        schema.kind
    );
    Ok(parsed)
}

#[cfg(test)]
mod parser_test {
    use super::*;
    use crate::schema::{OBJECT_SCHEMA, TRACKLET_SCHEMA};

    #[test]
    fn test_intelligent_split_keeps_brackets() {
        assert_eq!(intelligent_split("A,[1,2,3],B"), vec!["A", "[1,2,3]", "B"]);
        assert_eq!(
            intelligent_split("x , [[1,2],[3]] , y"),
            vec!["x", "[[1,2],[3]]", "y"]
        );
        assert_eq!(intelligent_split("[]"), vec!["[]"]);
    }

    #[test]
    fn test_intelligent_split_drops_empty_fragments() {
        assert_eq!(intelligent_split("A,,B,"), vec!["A", "B"]);
        assert!(intelligent_split("   ").is_empty());
    }

    #[test]
    fn test_header_fields() {
        assert_eq!(
            header_fields("# trkID , objectID"),
            Some(vec!["trkID".to_string(), "objectID".to_string()])
        );
        assert_eq!(header_fields("  #a,b"), Some(vec!["a".into(), "b".into()]));
        assert_eq!(header_fields("a,b"), None);
    }

    #[test]
    fn test_parse_tracklet_rows() {
        let content = "# some free comment\n\
                       # meanAngRate , objectID , rms , trkID , vecAngRate , vecAngSepn\n\
                       1e-7 , K17A00000Z , None , t1 , [1e-7] , [0.001]\n\
                       \n\
                       None , K17A00000Z , None , t2 , [] , []\n";
        let parsed = parse_sample_str(content, &TRACKLET_SCHEMA).unwrap();

        assert_eq!(parsed.header.len(), 6);
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0].line, 3);
        assert_eq!(parsed.rows[0].fields[4], "[1e-7]");
        assert_eq!(parsed.rows[1].line, 5);
    }

    #[test]
    fn test_missing_header() {
        let content = "# trkID , objectID\nt1 , o1\n";
        let err = parse_sample_str(content, &TRACKLET_SCHEMA).unwrap_err();
        assert!(matches!(err, NeoMlError::MissingHeader { .. }));
    }

    #[test]
    fn test_field_count_checked_for_tracklets_too() {
        let content = "# meanAngRate , objectID , rms , trkID , vecAngRate , vecAngSepn\n\
                       1e-7 , K17A00000Z , None , t1 , 1e-7 , 2e-7 , 0.001\n";
        let err = parse_sample_str(content, &TRACKLET_SCHEMA).unwrap_err();
        assert_eq!(
            err,
            NeoMlError::FieldCountMismatch {
                kind: TRACKLET_SCHEMA.kind,
                line: 2,
                expected: 6,
                found: 7,
            }
        );
    }

    #[test]
    fn test_missing_file() {
        let err = parse_sample_file(Utf8Path::new("does/not/exist.csv"), &OBJECT_SCHEMA)
            .unwrap_err();
        assert_eq!(err, NeoMlError::FileNotFound("does/not/exist.csv".into()));
    }
}
