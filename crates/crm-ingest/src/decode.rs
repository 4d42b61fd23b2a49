//! Byte decoding with an explicit fallback chain.
//!
//! Uploaded files arrive in whatever encoding the spreadsheet tool used.
//! Decoding tries each [`DecodeStrategy`] in order and ends with a lossy
//! legacy decode, so [`decode_bytes`] always produces text.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

/// One step of the decode chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStrategy {
    /// Encoding named by a leading byte order mark, decoded strictly.
    Bom,
    /// Strict UTF-8.
    Utf8,
    /// Strict Windows-1252 (a superset of printable Latin-1).
    Windows1252,
    /// Windows-1252 with replacement characters; never fails.
    Windows1252Lossy,
    /// Caller-selected encoding label, decoded with replacement.
    Forced,
}

/// Strategies tried before the lossy fallback.
pub const DEFAULT_CHAIN: [DecodeStrategy; 3] = [
    DecodeStrategy::Bom,
    DecodeStrategy::Utf8,
    DecodeStrategy::Windows1252,
];

/// Decoded text plus how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    /// Canonical name of the encoding that produced `text`.
    pub encoding: &'static str,
    pub strategy: DecodeStrategy,
    /// True if malformed sequences were replaced.
    pub lossy: bool,
}

impl DecodeStrategy {
    /// Attempt this strategy. `None` means "try the next one".
    pub fn try_decode(self, bytes: &[u8]) -> Option<Decoded> {
        match self {
            Self::Bom => {
                let (encoding, bom_len) = Encoding::for_bom(bytes)?;
                strict(encoding, &bytes[bom_len..], self)
            }
            Self::Utf8 => strict(UTF_8, bytes, self),
            Self::Windows1252 => strict(WINDOWS_1252, bytes, self),
            Self::Windows1252Lossy => {
                let (text, lossy) = WINDOWS_1252.decode_without_bom_handling(bytes);
                Some(Decoded {
                    text: text.into_owned(),
                    encoding: WINDOWS_1252.name(),
                    strategy: self,
                    lossy,
                })
            }
            Self::Forced => None,
        }
    }
}

fn strict(encoding: &'static Encoding, bytes: &[u8], strategy: DecodeStrategy) -> Option<Decoded> {
    let text = encoding.decode_without_bom_handling_and_without_replacement(bytes)?;
    Some(Decoded {
        text: text.into_owned(),
        encoding: encoding.name(),
        strategy,
        lossy: false,
    })
}

/// Decode bytes through [`DEFAULT_CHAIN`], falling back to a lossy decode.
pub fn decode_bytes(bytes: &[u8]) -> Decoded {
    for strategy in DEFAULT_CHAIN {
        if let Some(decoded) = strategy.try_decode(bytes) {
            tracing::debug!(encoding = decoded.encoding, ?strategy, "decoded input");
            return decoded;
        }
        tracing::trace!(?strategy, "decode strategy rejected input");
    }
    let decoded = lossy_fallback(bytes);
    tracing::warn!(
        encoding = decoded.encoding,
        "input is not valid in any supported encoding; characters were replaced"
    );
    decoded
}

/// Decode with an explicit encoding label (e.g. `latin1`, `utf-16le`).
///
/// Unknown labels fall back to [`decode_bytes`]. A byte order mark still wins
/// over the label.
pub fn decode_with_label(bytes: &[u8], label: &str) -> Decoded {
    let Some(encoding) = Encoding::for_label(label.trim().as_bytes()) else {
        tracing::warn!(label, "unknown encoding label, detecting instead");
        return decode_bytes(bytes);
    };
    let (text, used, lossy) = encoding.decode(bytes);
    if lossy {
        tracing::warn!(encoding = used.name(), "malformed input replaced while decoding");
    }
    Decoded {
        text: text.into_owned(),
        encoding: used.name(),
        strategy: DecodeStrategy::Forced,
        lossy,
    }
}

fn lossy_fallback(bytes: &[u8]) -> Decoded {
    match DecodeStrategy::Windows1252Lossy.try_decode(bytes) {
        Some(decoded) => decoded,
        None => Decoded {
            text: String::from_utf8_lossy(bytes).into_owned(),
            encoding: UTF_8.name(),
            strategy: DecodeStrategy::Windows1252Lossy,
            lossy: true,
        },
    }
}
