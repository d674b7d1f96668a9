const MAX_VISIBLE_LENGTH: usize = 200;

const SENSITIVE_PARAMS: [&str; 8] = [
    "sig",
    "signature",
    "token",
    "key",
    "api_key",
    "access_token",
    "x-amz-signature",
    "x-amz-credential",
];

/// Makes a URL safe to log: credential-bearing query values are redacted and
/// overly long values are cut.
pub fn sanitize_url(url: &str) -> String {
    let trimmed = url.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let redacted = match trimmed.split_once('?') {
        Some((base, query)) => format!("{}?{}", base, redact_query(query)),
        None => trimmed.to_string(),
    };

    truncate(&redacted)
}

fn redact_query(query: &str) -> String {
    query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((name, _)) if is_sensitive(name) => format!("{}=[REDACTED]", name),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn is_sensitive(name: &str) -> bool {
    SENSITIVE_PARAMS
        .iter()
        .any(|p| name.eq_ignore_ascii_case(p))
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_VISIBLE_LENGTH {
        return text.to_string();
    }
    let visible: String = text.chars().take(MAX_VISIBLE_LENGTH).collect();
    format!("{}... ({} chars total)", visible, text.chars().count())
}
