/// Mask a credential for logging, keeping a short prefix for recognition.
///
/// Keys of eight characters or fewer are hidden entirely.
pub fn scrub_secret(secret: &str) -> String {
    const VISIBLE: usize = 8;
    match secret.char_indices().nth(VISIBLE) {
        Some((cut, _)) => format!("{}...[REDACTED]", &secret[..cut]),
        None => "[REDACTED]".to_string(),
    }
}

/// Replace every occurrence of `secret` in `message` with its masked form.
pub fn scrub_message(message: &str, secret: &str) -> String {
    if secret.is_empty() {
        return message.to_string();
    }
    message.replace(secret, &scrub_secret(secret))
}
