//! Character-encoding handling for Epsilon replies.
//!
//! Epsilon declares its XML as `x-sjis-cp932`, a label no decoder recognizes.
//! Raw payloads go through [`normalize_encoding_label`] first, then
//! [`decode_payload`] turns them into UTF-8 using the declared encoding.
//! Free-text attributes such as `err_detail` are additionally percent-encoded
//! CP932 bytes; [`decode_legacy_text`] unwraps those.

use std::borrow::Cow;

use encoding_rs::{Encoding, SHIFT_JIS, UTF_8};

use crate::error::GatewayError;

/// Encoding label Epsilon writes into its XML declaration.
pub const VENDOR_LABEL: &[u8] = b"x-sjis-cp932";

/// Recognized label substituted for [`VENDOR_LABEL`]. Resolves to the
/// Shift_JIS decoder, which covers the CP932 extensions.
pub const NORMALIZED_LABEL: &[u8] = b"windows-31j";

/// Replace the vendor's encoding label in the XML declaration.
///
/// Only the declaration is touched; the label appearing in document content
/// is left alone. Payloads without the label are returned borrowed.
pub fn normalize_encoding_label(raw: &[u8]) -> Cow<'_, [u8]> {
    let Some(decl_end) = declaration_end(raw) else {
        return Cow::Borrowed(raw);
    };
    let Some(pos) = find_ignore_ascii_case(&raw[..decl_end], VENDOR_LABEL) else {
        return Cow::Borrowed(raw);
    };

    let mut out = Vec::with_capacity(raw.len());
    out.extend_from_slice(&raw[..pos]);
    out.extend_from_slice(NORMALIZED_LABEL);
    out.extend_from_slice(&raw[pos + VENDOR_LABEL.len()..]);
    Cow::Owned(out)
}

/// Encoding label from the XML declaration, if the payload has one.
pub fn declared_label(raw: &[u8]) -> Option<&[u8]> {
    let decl = &raw[..declaration_end(raw)?];
    let attr = find_ignore_ascii_case(decl, b"encoding")?;
    let rest = &decl[attr + b"encoding".len()..];

    let eq = rest.iter().position(|b| !b.is_ascii_whitespace())?;
    if rest[eq] != b'=' {
        return None;
    }
    let rest = &rest[eq + 1..];
    let open = rest.iter().position(|b| !b.is_ascii_whitespace())?;
    let quote = rest[open];
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let value = &rest[open + 1..];
    let close = value.iter().position(|&b| b == quote)?;
    Some(&value[..close])
}

/// Decode a raw reply body to UTF-8.
///
/// The vendor label is normalized first. Bodies without a declaration are
/// treated as UTF-8; an unknown label is a [`GatewayError::MalformedResponse`].
pub fn decode_payload(raw: &[u8]) -> Result<String, GatewayError> {
    let normalized = normalize_encoding_label(raw);

    let encoding = match declared_label(&normalized) {
        Some(label) => Encoding::for_label(label).ok_or_else(|| {
            GatewayError::MalformedResponse(format!(
                "unsupported encoding label: {}",
                String::from_utf8_lossy(label)
            ))
        })?,
        None => UTF_8,
    };

    let (text, actual, had_errors) = encoding.decode(&normalized);
    if had_errors {
        tracing::warn!(
            encoding = actual.name(),
            "reply contained bytes invalid for its encoding; replaced"
        );
    }
    Ok(text.into_owned())
}

/// Percent-decode `value` and transcode the resulting CP932 bytes to UTF-8.
pub fn decode_legacy_text(value: &str) -> String {
    let bytes = urlencoding::decode_binary(value.as_bytes());
    let (text, had_errors) = SHIFT_JIS.decode_without_bom_handling(&bytes);
    if had_errors {
        tracing::warn!(value, "legacy text contained invalid CP932 sequences");
    }
    text.into_owned()
}

/// Index just past the `?>` closing a leading XML declaration.
fn declaration_end(raw: &[u8]) -> Option<usize> {
    let start = if raw.starts_with(b"\xEF\xBB\xBF") { 3 } else { 0 };
    let body = &raw[start..];
    let offset = body.iter().position(|b| !b.is_ascii_whitespace())?;
    if !body[offset..].starts_with(b"<?xml") {
        return None;
    }
    let close = body[offset..].windows(2).position(|w| w == b"?>")?;
    Some(start + offset + close + 2)
}

fn find_ignore_ascii_case(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
}
