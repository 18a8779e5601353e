//! Best-effort heuristics over search titles and snippets.
//!
//! None of these fail: when nothing matches they return a readable
//! placeholder such as [`NO_PHONE`] or [`NO_ADDRESS`].

use super::records::BookingPlatform;
use regex::Regex;
use std::sync::LazyLock;

pub const NO_PHONE: &str = "Contact for number";
pub const NO_ADDRESS: &str = "Contact for address";
pub const DEFAULT_SPECIALTY: &str = "Specialist";

const KNOWN_SPECIALTIES: &[&str] = &[
    "Neurologist",
    "Geriatrician",
    "Psychiatrist",
    "General Physician",
    "Neurosurgeon",
    "Mental Health Specialist",
    "Memory Specialist",
    "Brain Specialist",
    "Dementia Specialist",
];

const ADDRESS_INDICATORS: &[&str] = &[
    "located at",
    "address:",
    "located in",
    "clinic in",
    "hospital in",
];

const VALID_LISTING_KEYWORDS: &[&str] = &[
    "doctor",
    "dr.",
    "clinic",
    "hospital",
    "specialist",
    "consultant",
];

const INVALID_LISTING_KEYWORDS: &[&str] = &["news", "article", "report", "research", "pdf", "study"];

const FACILITY_KEYWORDS: &[&str] = &[
    "hospital",
    "clinic",
    "medical center",
    "healthcare",
    "doctor",
];

const MIN_NAME_LEN: usize = 5;

static PDF_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[PDF\]|\(PDF\)").unwrap());

static TITLE_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+[-–—]\s+.*$|\s*\|.*$").unwrap());

static MARKETING_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:Best|Top|Leading)\s+").unwrap());

static DR_SPACING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Dr\.\s*").unwrap());

static SPECIALTY_PHRASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:specialist|consultant|expert)\s+in\s+([^,.]+)").unwrap());

static LOCAL_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\+92|0)[-(]?\d{3}[)-]?\d{7,8}").unwrap());

static GENERIC_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\(?\d{3}\)?[-\s.]?\d{3}[-\s.]?\d{4,6}").unwrap());

static IN_PLACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bin\s+([^,.]+(?:,[^,.]+)*)").unwrap());

/// Cleans a search-result title down to the doctor or facility name.
///
/// Drops `[PDF]` markers, everything after a ` - ` or `|` separator, the
/// marketing words "Best", "Top" and "Leading", and normalizes `Dr.` spacing.
/// Applying it to its own output changes nothing.
pub fn clean_title(title: &str) -> String {
    let mut current = title.trim().to_string();
    // Removing one marker can expose another, so run to a fixed point.
    // Every pass that changes the string shortens it, except the single
    // `Dr.` spacing fix, so this terminates.
    loop {
        let next = clean_title_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_title_once(title: &str) -> String {
    let title = PDF_MARKER_RE.replace_all(title, "");
    let title = TITLE_SUFFIX_RE.replace(&title, "");
    let title = MARKETING_PREFIX_RE.replace_all(&title, "");
    let title = DR_SPACING_RE.replace_all(&title, "Dr. ");
    title.trim().to_string()
}

/// First component of a "City, Country" style location.
pub fn extract_city(location: &str) -> String {
    location.split(',').next().unwrap_or_default().trim().to_string()
}

/// Picks a specialty out of a snippet, falling back to [`DEFAULT_SPECIALTY`].
pub fn extract_specialty(text: &str) -> String {
    let lower = text.to_lowercase();

    if let Some(known) = KNOWN_SPECIALTIES
        .iter()
        .find(|specialty| lower.contains(&specialty.to_lowercase()))
    {
        return known.to_string();
    }

    SPECIALTY_PHRASE_RE
        .captures(&lower)
        .and_then(|caps| caps.get(1))
        .map(|m| title_case(m.as_str().trim()))
        .filter(|specialty| !specialty.is_empty())
        .unwrap_or_else(|| DEFAULT_SPECIALTY.to_string())
}

/// First Pakistani-format number, else the first generic one, else [`NO_PHONE`].
pub fn extract_phone(text: &str) -> String {
    [&*LOCAL_PHONE_RE, &*GENERIC_PHONE_RE]
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| NO_PHONE.to_string())
}

pub fn extract_address(text: &str) -> String {
    // ASCII lowering keeps byte offsets aligned with `text`.
    let lower = text.to_ascii_lowercase();

    for indicator in ADDRESS_INDICATORS {
        let Some(found) = lower.find(indicator) else {
            continue;
        };
        let start = found + indicator.len();
        if let Some(len) = text[start..].find('.') {
            return text[start..start + len].trim().to_string();
        }
    }

    IN_PLACE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|address| !address.is_empty())
        .unwrap_or_else(|| NO_ADDRESS.to_string())
}

/// Whether a directory hit looks like an actual doctor rather than news or research.
pub fn is_valid_doctor_listing(name: &str, snippet: &str) -> bool {
    let name_lower = name.to_lowercase();
    let snippet_lower = snippet.to_lowercase();

    let looks_medical = VALID_LISTING_KEYWORDS
        .iter()
        .any(|kw| name_lower.contains(kw) || snippet_lower.contains(kw));
    let disqualified = INVALID_LISTING_KEYWORDS
        .iter()
        .any(|kw| name_lower.contains(kw));

    looks_medical && !disqualified && name.chars().count() > MIN_NAME_LEN
}

pub fn is_valid_medical_facility(title: &str) -> bool {
    let lower = title.to_lowercase();
    FACILITY_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Booking platform hosting `link`, if any.
pub fn detect_platform(link: &str) -> Option<BookingPlatform> {
    let lower = link.to_ascii_lowercase();
    BookingPlatform::ALL
        .into_iter()
        .find(|platform| lower.contains(platform.domain()))
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
