use thiserror::Error;

/// Upper bound on the raw body kept inside a [`DecodeError`].
pub const MAX_PAYLOAD_BYTES: usize = 2048;

/// A response body that did not match the expected schema.
///
/// `path` points at the offending node in JSONPath-ish notation, e.g.
/// `$.items[0].items["mains"].items[0].itemDetails.itemId`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to decode {resource} at {path}: {reason}")]
pub struct DecodeError {
    pub resource: &'static str,
    pub path: String,
    pub reason: String,
    /// Raw response body, truncated to [`MAX_PAYLOAD_BYTES`].
    pub payload: String,
}

impl DecodeError {
    pub(crate) fn new(resource: &'static str, path: String, reason: String, body: &[u8]) -> Self {
        Self {
            resource,
            path,
            reason,
            payload: truncate_payload(body),
        }
    }
}

/// Errors returned by [`crate::OutpostClient`] fetches.
#[derive(Debug, Error)]
pub enum FetchError {
    /// A path parameter was empty, so no request was sent.
    #[error("cannot fetch {resource}: scanned identifier {field} is empty")]
    MissingIdentifier {
        resource: &'static str,
        field: &'static str,
    },

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status. The body was not decoded.
    #[error("unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The response decoded but carried `"status": false`.
    #[error("{resource} request rejected by the API (status=false)")]
    Rejected { resource: &'static str },

    /// The menu response listed no merchants.
    #[error("menu catalog for merchant {merchant_id} contains no merchants")]
    EmptyCatalog { merchant_id: String },
}

impl FetchError {
    /// HTTP status code, when the failure was a non-2xx response.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Lossy UTF-8 view of `body`, cut to [`MAX_PAYLOAD_BYTES`] on a char boundary.
pub(crate) fn truncate_payload(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.len() <= MAX_PAYLOAD_BYTES {
        return text.into_owned();
    }
    let mut end = MAX_PAYLOAD_BYTES;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &text[..end])
}
