//! Share links: `https://{host}/shared/{token}`.

const SHARED_PREFIX: &str = "/shared/";

/// Always https so the secret is never sent in clear text.
pub fn share_url(host: &str, message_token: &str) -> String {
    format!("https://{}{}{}", host.trim_end_matches('/'), SHARED_PREFIX, message_token)
}

/// Extracts the message token from a `/shared/{token}` request path.
pub fn token_from_shared_path(path: &str) -> Option<&str> {
    path.strip_prefix(SHARED_PREFIX)
        .map(|token| token.trim_end_matches('/'))
        .filter(|token| !token.is_empty() && !token.contains('/'))
}
