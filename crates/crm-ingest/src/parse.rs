//! Tabular parsing of decoded text.

use std::borrow::Cow;

use csv::ReaderBuilder;

use crate::decode::{DecodeStrategy, Decoded, decode_bytes, decode_with_label};
use crate::error::Result;
use crate::sniff::{Dialect, sniff_or_default};

/// One parsed row: cell strings in file order.
pub type Row = Vec<String>;

/// Parse `text` into rows using `dialect`.
///
/// Row 0 is the header. Rows keep their physical length, so short and long
/// rows can be reported by the caller. Fully empty lines are not rows.
pub fn parse_rows(text: &str, dialect: &Dialect) -> Result<Vec<Row>> {
    let text = skip_initial_space(text, dialect);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(dialect.delimiter)
        .quote(dialect.quote)
        .double_quote(dialect.double_quote)
        .escape(dialect.escape)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum FieldState {
    Start,
    Unquoted,
    Quoted,
    QuoteInQuoted,
    Escaped,
}

/// Drop spaces at the start of each field, outside quoted regions.
///
/// Runs before the CSV reader so that a quote after `, ` still opens a field.
fn skip_initial_space<'a>(text: &'a str, dialect: &Dialect) -> Cow<'a, str> {
    if !dialect.skip_initial_space {
        return Cow::Borrowed(text);
    }
    let delimiter = char::from(dialect.delimiter);
    let quote = char::from(dialect.quote);
    let escape = dialect.escape.map(char::from);

    let mut out = String::with_capacity(text.len());
    let mut state = FieldState::Start;
    for c in text.chars() {
        state = match state {
            FieldState::Start if c == ' ' => continue,
            FieldState::Start if c == quote => FieldState::Quoted,
            FieldState::Quoted if escape == Some(c) => FieldState::Escaped,
            FieldState::Quoted if c == quote => FieldState::QuoteInQuoted,
            FieldState::Quoted => FieldState::Quoted,
            FieldState::Escaped => FieldState::Quoted,
            FieldState::QuoteInQuoted if c == quote && dialect.double_quote => {
                FieldState::Quoted
            }
            _ if c == delimiter || c == '\n' || c == '\r' => FieldState::Start,
            _ => FieldState::Unquoted,
        };
        out.push(c);
    }
    Cow::Owned(out)
}

/// A decoded and parsed import file.
#[derive(Debug, Clone)]
pub struct Table {
    pub rows: Vec<Row>,
    pub dialect: Dialect,
    /// Name of the encoding the bytes were decoded with.
    pub encoding: &'static str,
}

impl Table {
    /// Header row, if any.
    pub fn header(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Rows after the header.
    pub fn data_rows(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// True when there is a header and at least one data row.
    pub fn has_data(&self) -> bool {
        self.rows.len() >= 2
    }
}

/// Sniff and parse already-decoded text.
pub fn read_table(text: &str) -> Result<Table> {
    read_decoded(&Decoded {
        text: text.to_string(),
        encoding: "UTF-8",
        strategy: DecodeStrategy::Utf8,
        lossy: false,
    })
}

/// Decode, sniff and parse raw bytes. `encoding` forces a label.
pub fn read_table_bytes(bytes: &[u8], encoding: Option<&str>) -> Result<Table> {
    let decoded = match encoding {
        Some(label) => decode_with_label(bytes, label),
        None => decode_bytes(bytes),
    };
    read_decoded(&decoded)
}

fn read_decoded(decoded: &Decoded) -> Result<Table> {
    let text = decoded.text.strip_prefix('\u{feff}').unwrap_or(&decoded.text);
    let dialect = sniff_or_default(text);
    let rows = parse_rows(text, &dialect)?;
    tracing::debug!(
        rows = rows.len(),
        encoding = decoded.encoding,
        delimiter = %dialect.delimiter_name(),
        "parsed table"
    );
    Ok(Table {
        rows,
        dialect,
        encoding: decoded.encoding,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quoted_fields() {
        let rows = parse_rows(
            "First Name,Organization\n\"Ada\",\"Engines, Ltd\"\n",
            &Dialect::default(),
        )
        .unwrap();
        assert_eq!(rows, vec![
            vec!["First Name".to_string(), "Organization".to_string()],
            vec!["Ada".to_string(), "Engines, Ltd".to_string()],
        ]);
    }

    #[test]
    fn keeps_ragged_rows() {
        let rows = parse_rows("a,b,c\n1,2\n1,2,3,4\n", &Dialect::default()).unwrap();
        assert_eq!(rows[1].len(), 2);
        assert_eq!(rows[2].len(), 4);
    }

    #[test]
    fn delimiter_only_rows_are_kept() {
        let rows = parse_rows("a,b\n,\n\n1,2\n", &Dialect::default()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec!["".to_string(), "".to_string()]);
    }

    #[test]
    fn doubled_quotes_unescape() {
        let rows = parse_rows("a\n\"say \"\"hi\"\"\"\n", &Dialect::default()).unwrap();
        assert_eq!(rows[1], vec!["say \"hi\"".to_string()]);
    }

    #[test]
    fn quoted_fields_after_spaced_delimiters() {
        let table =
            read_table("\"First Name\", \"Organization\"\n\"Ada\", \"Engines, Ltd\"\n").unwrap();
        assert!(table.dialect.skip_initial_space);
        assert_eq!(table.rows, vec![
            vec!["First Name".to_string(), "Organization".to_string()],
            vec!["Ada".to_string(), "Engines, Ltd".to_string()],
        ]);
    }

    #[test]
    fn initial_space_inside_quotes_is_kept() {
        let dialect = Dialect {
            skip_initial_space: true,
            ..Dialect::default()
        };
        let rows = parse_rows("a, b\n\"x,  y\",   z\n  lead, \"say \"\"hi\"\", ok\"\n", &dialect)
            .unwrap();
        assert_eq!(rows[0], vec!["a".to_string(), "b".to_string()]);
        assert_eq!(rows[1], vec!["x,  y".to_string(), "z".to_string()]);
        assert_eq!(rows[2], vec!["lead".to_string(), "say \"hi\", ok".to_string()]);
    }

    #[test]
    fn read_table_sniffs_semicolons() {
        let table = read_table("First Name;Organization\nAda;Engines\n").unwrap();
        assert_eq!(table.dialect.delimiter, b';');
        assert_eq!(table.header().unwrap().len(), 2);
        assert_eq!(table.data_rows().len(), 1);
        assert!(table.has_data());
    }

    #[test]
    fn header_only_has_no_data() {
        let table = read_table("First Name,Organization\n").unwrap();
        assert!(!table.has_data());
        assert!(table.data_rows().is_empty());
        let empty = read_table("").unwrap();
        assert!(empty.header().is_none());
    }

    #[test]
    fn read_table_bytes_decodes_legacy_text() {
        let table = read_table_bytes(b"First Name,Organization\nJos\xE9,Acme\n", None).unwrap();
        assert_eq!(table.encoding, "windows-1252");
        assert_eq!(table.data_rows()[0][0], "José");
    }
}
