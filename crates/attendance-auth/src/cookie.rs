// Cookie handling for HttpOnly authentication cookies
//
// A string-level codec: `parse` takes the raw `Cookie:` request header and
// `serialize` produces a `Set-Cookie` header line. Handlers stay in control
// of how headers are attached to the response.

use std::collections::HashMap;

/// Cookie name for the in-flight OAuth flow state (10 minute lifetime).
pub const FLOW_COOKIE_NAME: &str = "flow-oauth";

/// Cookie name for the signed session credential (7 day lifetime).
pub const SESSION_COOKIE_NAME: &str = "session";

/// SameSite policy emitted on serialized cookies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "Strict",
            Self::Lax => "Lax",
            Self::None => "None",
        }
    }
}

/// Attribute overrides for [`serialize`].
///
/// Every `None` field falls back to the hardened default: `Path=/`,
/// `HttpOnly`, `Secure`, `SameSite=Lax`, and no `Max-Age` attribute at all.
#[derive(Debug, Clone, Default)]
pub struct CookieOptions {
    /// `Max-Age` in seconds. Emitted only when set; `Some(0)` expires the
    /// cookie immediately, which is how logout clears it.
    pub max_age: Option<i64>,
    pub path: Option<String>,
    pub http_only: Option<bool>,
    pub secure: Option<bool>,
    pub same_site: Option<SameSite>,
}

/// Parse a raw `Cookie:` header value into a name → value map.
///
/// Splits on `;`, trims each segment, and splits the segment on the first
/// `=` (later `=` characters stay in the value). Values are URL-decoded.
/// Malformed segments degrade silently: empty names are skipped, a segment
/// without `=` yields an empty value, an undecodable value is kept raw, and
/// duplicate names keep the last occurrence.
pub fn parse(header: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();
    for segment in header.split(';') {
        let segment = segment.trim();
        let (name, raw_value) = match segment.split_once('=') {
            Some((name, rest)) => (name, rest),
            None => (segment, ""),
        };
        if name.is_empty() {
            continue;
        }
        let value = match urlencoding::decode(raw_value) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => raw_value.to_string(),
        };
        cookies.insert(name.to_string(), value);
    }
    cookies
}

/// Serialize a cookie into a `Set-Cookie` header line.
///
/// The value is URL-encoded, so arbitrary strings (JSON included) survive
/// the trip through [`parse`]. Always produces a well-formed header line.
pub fn serialize(name: &str, value: &str, options: &CookieOptions) -> String {
    let mut parts = vec![format!("{}={}", name, urlencoding::encode(value))];
    if let Some(max_age) = options.max_age {
        parts.push(format!("Max-Age={}", max_age));
    }
    parts.push(format!("Path={}", options.path.as_deref().unwrap_or("/")));
    if options.http_only.unwrap_or(true) {
        parts.push("HttpOnly".to_string());
    }
    if options.secure.unwrap_or(true) {
        parts.push("Secure".to_string());
    }
    parts.push(format!(
        "SameSite={}",
        options.same_site.unwrap_or(SameSite::Lax).as_str()
    ));
    parts.join("; ")
}
