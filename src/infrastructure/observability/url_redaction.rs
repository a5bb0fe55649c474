use url::Url;

const REDACTED: &str = "REDACTED";
const SENSITIVE_KEYS: [&str; 7] = [
    "api_key", "apikey", "key", "password", "secret", "token", "access_token",
];

/// Renders a URL for logs with credentials and secret-looking query values masked.
pub fn redact_url(url: &Url) -> String {
    let mut redacted = url.clone();

    if !redacted.username().is_empty() || redacted.password().is_some() {
        let _ = redacted.set_username(REDACTED);
        let _ = redacted.set_password(None);
    }

    if redacted.query().is_some() {
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| {
                let value = if is_sensitive(&k) {
                    REDACTED.to_string()
                } else {
                    v.into_owned()
                };
                (k.into_owned(), value)
            })
            .collect();
        redacted.query_pairs_mut().clear().extend_pairs(pairs);
    }

    redacted.to_string()
}

fn is_sensitive(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    SENSITIVE_KEYS.iter().any(|k| key == *k)
}
