use crate::domain::model::{DecodedText, TextEncoding};
use crate::utils::error::{ConvertError, Result};
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;

// Subscription providers often drop the trailing `=` and leave junk in the
// unused low bits of the last symbol.
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

fn is_base64_symbol(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'+' || b == b'/'
}

/// Keeps alphabet symbols up to the first padded quad and drops the rest.
/// A `=` that cannot close a quad (fewer than two symbols before it) is ignored.
fn collect_symbols(raw: &[u8]) -> Vec<u8> {
    let mut symbols = Vec::with_capacity(raw.len());
    let mut quad_pos = 0usize;
    let mut pads = 0usize;

    for &b in raw {
        if b == b'=' {
            if quad_pos >= 2 {
                pads += 1;
                if quad_pos + pads >= 4 {
                    break;
                }
            }
        } else if is_base64_symbol(b) {
            symbols.push(b);
            quad_pos = (quad_pos + 1) % 4;
        }
    }

    symbols
}

/// Decodes one base64 layer. Bytes outside the standard alphabet
/// (line breaks, spaces) are discarded, and decoding stops at the end
/// of the first padded quad.
pub fn decode_base64(raw: &[u8]) -> Result<Vec<u8>> {
    let symbols = collect_symbols(raw);
    tracing::debug!(
        "decoding {} base64 symbols out of {} payload bytes",
        symbols.len(),
        raw.len()
    );

    LENIENT_STANDARD
        .decode(&symbols)
        .map_err(|e| ConvertError::InvalidEncoding {
            reason: e.to_string(),
        })
}

/// UTF-8 first, then Latin-1, which accepts any byte sequence.
pub fn decode_text(bytes: Vec<u8>) -> DecodedText {
    match String::from_utf8(bytes) {
        Ok(text) => DecodedText {
            text,
            encoding: TextEncoding::Utf8,
        },
        Err(e) => {
            tracing::warn!("payload is not valid UTF-8 ({}), falling back to Latin-1", e);
            let text = e.into_bytes().into_iter().map(char::from).collect();
            DecodedText {
                text,
                encoding: TextEncoding::Latin1,
            }
        }
    }
}

pub fn decode_payload(raw: &[u8]) -> Result<DecodedText> {
    let bytes = decode_base64(raw)?;
    Ok(decode_text(bytes))
}
