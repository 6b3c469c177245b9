//! Field extractors.
//!
//! Each extractor pulls one attribute out of a bounded text window. They never
//! fail: a missing attribute is `None`, or the documented default for
//! locations and sizes.

use std::sync::OnceLock;

use regex::Regex;

use crate::descriptor::Vec3;
use crate::vocabulary::{Location, Size};

/// `<digits> <unit>`, the pattern that both gates lines and yields durations.
fn duration_regex() -> &'static Regex {
    static DURATION_RE: OnceLock<Regex> = OnceLock::new();
    DURATION_RE.get_or_init(|| {
        Regex::new(r"(?i)([0-9]+)\s+(?:⏲|seconds?|segundos)").expect("duration regex should compile")
    })
}

/// Generic web URL. Host labels may be a single character (`x.com`).
fn url_regex() -> &'static Regex {
    static URL_RE: OnceLock<Regex> = OnceLock::new();
    URL_RE.get_or_init(|| {
        Regex::new(
            r"https?://[-a-zA-Z0-9@:%._\+~#=]{1,256}\.[a-z]{2,6}\b[-a-zA-Z0-9@:%_\+.~#?&/=]*",
        )
        .expect("url regex should compile")
    })
}

fn quote_regex() -> &'static Regex {
    static QUOTE_RE: OnceLock<Regex> = OnceLock::new();
    QUOTE_RE.get_or_init(|| Regex::new(r#"".*""#).expect("quote regex should compile"))
}

fn location_regex() -> &'static Regex {
    static LOCATION_RE: OnceLock<Regex> = OnceLock::new();
    LOCATION_RE.get_or_init(|| {
        Regex::new(r"(?i)right|left|behind|front|above|below|atrás|frente|izquierda|derecha|arriba|abajo")
            .expect("location regex should compile")
    })
}

fn size_regex() -> &'static Regex {
    static SIZE_RE: OnceLock<Regex> = OnceLock::new();
    SIZE_RE.get_or_init(|| {
        Regex::new(r"(?i)tiny|small|large|huge|diminuto|pequeño|grande|enorme")
            .expect("size regex should compile")
    })
}

fn background_regex() -> &'static Regex {
    static BACKGROUND_RE: OnceLock<Regex> = OnceLock::new();
    BACKGROUND_RE.get_or_init(|| {
        Regex::new(r"(?i)(#[a-f0-9]{3,6}|\w+) background").expect("background regex should compile")
    })
}

fn fondo_regex() -> &'static Regex {
    static FONDO_RE: OnceLock<Regex> = OnceLock::new();
    FONDO_RE.get_or_init(|| {
        Regex::new(r"(?i)fondo (#[a-f0-9]{3,6})").expect("fondo regex should compile")
    })
}

/// True when the text declares a duration anywhere.
pub fn has_duration(text: &str) -> bool {
    duration_regex().is_match(text)
}

/// Seconds from the first `<digits> <unit>` in the window.
///
/// Returns `None` when there is no such expression or the number does not fit
/// in a `u64`.
pub fn duration(window: &str) -> Option<u64> {
    duration_regex()
        .captures(window)
        .and_then(|capture| capture.get(1))
        .and_then(|digits| digits.as_str().parse::<u64>().ok())
}

/// Color named right before the word "background": a hex code or a bare word.
pub fn background_color(window: &str) -> Option<String> {
    background_regex()
        .captures(window)
        .and_then(|capture| capture.get(1))
        .map(|color| color.as_str().to_owned())
}

/// Hex color following the Spanish "fondo". Word colors are not recognized
/// for this alias.
pub fn fondo_color(window: &str) -> Option<String> {
    fondo_regex()
        .captures(window)
        .and_then(|capture| capture.get(1))
        .map(|color| color.as_str().to_owned())
}

/// First HTTP(S) URL in the window.
pub fn url(window: &str) -> Option<String> {
    url_regex().find(window).map(|m| m.as_str().to_owned())
}

/// First HTTP(S) URL in the window ending with `suffix`.
pub fn url_with_suffix(window: &str, suffix: &str) -> Option<String> {
    url_regex()
        .find_iter(window)
        .map(|m| m.as_str())
        .find(|candidate| candidate.ends_with(suffix))
        .map(str::to_owned)
}

/// Everything between the first and the last double quote, with any inner
/// quotes removed.
pub fn quote(window: &str) -> Option<String> {
    quote_regex()
        .find(window)
        .map(|m| m.as_str().replace('"', ""))
}

/// Final dot-separated segment of a URL.
pub fn extension(url: &str) -> String {
    url.rsplit('.').next().unwrap_or(url).to_owned()
}

/// First location word in the window, or `Front` when there is none.
pub fn location(window: &str) -> Location {
    location_regex()
        .find(window)
        .and_then(|m| Location::from_word(m.as_str()))
        .unwrap_or_default()
}

/// Anchor position for the first location word, see [`Location::position`].
pub fn position(window: &str, width: f64, height: f64) -> Vec3 {
    location(window).position(width, height)
}

pub fn rotation(window: &str) -> Vec3 {
    location(window).rotation()
}

/// First size word in the window, or `Normal` when there is none.
pub fn size(window: &str) -> Size {
    size_regex()
        .find(window)
        .and_then(|m| Size::from_word(m.as_str()))
        .unwrap_or_default()
}

pub fn scale(window: &str) -> Vec3 {
    size(window).scale()
}
