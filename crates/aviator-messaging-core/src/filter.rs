//! Contact-info detection
//!
//! A best-effort heuristic, not a security boundary: four patterns covering
//! email addresses, phone numbers (separator variants and long digit runs),
//! Telegram handles/links, and WhatsApp references.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").unwrap()
});

// Candidate phone sequences; a match only counts when it carries 10+ digits
// so prices and dates slip through.
static PHONE_CANDIDATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\d[\d\-.\s()]{7,}\d").unwrap());

static TELEGRAM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(t\.me/\S+|telegram|(^|\s)@[A-Za-z0-9_]{5,})").unwrap()
});

static WHATSAPP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(whats\s?app|wa\.me/\S+)").unwrap());

/// Contact-info filter applied to every outgoing message
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactInfoFilter;

impl ContactInfoFilter {
    /// Create a filter
    pub fn new() -> Self {
        Self
    }

    /// Return the reason a message body is flagged, or `None` if clean
    pub fn detect(&self, body: &str) -> Option<&'static str> {
        if EMAIL_RE.is_match(body) {
            return Some("contains an email address");
        }
        if PHONE_CANDIDATE_RE
            .find_iter(body)
            .any(|m| m.as_str().chars().filter(char::is_ascii_digit).count() >= 10)
        {
            return Some("contains a phone number");
        }
        if TELEGRAM_RE.is_match(body) {
            return Some("contains a Telegram reference");
        }
        if WHATSAPP_RE.is_match(body) {
            return Some("contains a WhatsApp reference");
        }
        None
    }
}
