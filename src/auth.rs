use sha2::{Digest, Sha256};

/// Checksum authentication for the BigBlueButton API
pub struct BbbAuth;

impl BbbAuth {
    /// Generate the checksum for a BigBlueButton API request.
    ///
    /// The server recomputes SHA-256 over `action || query_string || secret`
    /// and compares hex digests, so `query_string` must be the exact
    /// serialized form that goes on the wire: fixed key order, URL-encoded
    /// values, pairs joined by `&`. This function does not re-serialize or
    /// re-order anything.
    pub fn generate_checksum(action: &str, query_string: &str, secret: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(action.as_bytes());
        hasher.update(query_string.as_bytes());
        hasher.update(secret.as_bytes());

        // Lowercase hex, the only form the server accepts
        hex::encode(hasher.finalize())
    }
}
