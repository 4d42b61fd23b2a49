//! Lead import ingestion.
//!
//! Turns raw upload bytes into rows of cell strings:
//!
//! - **Decoding**: UTF-8 first, then legacy fallbacks, never failing
//! - **Dialect sniffing**: delimiter and quoting from the header line
//! - **Parsing**: CSV records via the `csv` crate, ragged rows preserved
//!
//! # Example
//!
//! ```ignore
//! use crm_ingest::read_table_bytes;
//!
//! let table = read_table_bytes(b"First Name;Organization\nAda;Engines\n", None)?;
//! assert_eq!(table.dialect.delimiter, b';');
//! ```

mod decode;
mod error;
mod parse;
mod reader;
mod sniff;

// === Error Types ===
pub use error::{IngestError, Result};

// === Decoding ===
pub use decode::{DEFAULT_CHAIN, DecodeStrategy, Decoded, decode_bytes, decode_with_label};

// === Dialect ===
pub use sniff::{DELIMITER_CANDIDATES, Dialect, SniffError, first_line, sniff, sniff_or_default};

// === Parsing ===
pub use parse::{Row, Table, parse_rows, read_table, read_table_bytes};

// === File Reading ===
pub use reader::{MAX_CSV_FILE_SIZE, check_file_size_with_limit, read_file_bytes};
