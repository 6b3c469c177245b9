//! Entity keyword scanner.
//!
//! Finds entity keywords in a line, left to right. A keyword only counts when
//! it stands alone: it must be preceded by the start of the line or a
//! delimiter, and followed by the end of the line or a delimiter. Delimiters
//! are whitespace and `; . , :`.
//!
//! Keywords are matched without regard to case. Where several keywords could
//! start at the same position, the first one in table order whose right
//! boundary holds wins, so "video esfera" is preferred over "video".

use serde::{Deserialize, Serialize};

/// Logical kind of an entity keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Audio,
    Panorama,
    Image,
    Text,
    Videosphere,
    Video,
    Duration,
    Voiceover,
    Chart,
    Background,
    /// Spanish background alias. Takes a hex code after the keyword rather
    /// than a color before it.
    Fondo,
    Model,
}

/// Keyword table in match priority order.
const KEYWORDS: &[(&str, EntityKind)] = &[
    ("audio", EntityKind::Audio),
    ("sound", EntityKind::Audio),
    ("🔊", EntityKind::Audio),
    ("panorama", EntityKind::Panorama),
    ("🌅", EntityKind::Panorama),
    ("image", EntityKind::Image),
    ("foto", EntityKind::Image),
    ("picture", EntityKind::Image),
    ("text", EntityKind::Text),
    ("texto", EntityKind::Text),
    ("📝", EntityKind::Text),
    ("videosphere", EntityKind::Videosphere),
    ("video esfera", EntityKind::Videosphere),
    ("🎥", EntityKind::Videosphere),
    ("video", EntityKind::Video),
    ("seconds", EntityKind::Duration),
    ("second", EntityKind::Duration),
    ("segundos", EntityKind::Duration),
    ("⏲", EntityKind::Duration),
    ("voiceover", EntityKind::Voiceover),
    ("voz en off", EntityKind::Voiceover),
    ("📢", EntityKind::Voiceover),
    ("chart", EntityKind::Chart),
    ("gráfico", EntityKind::Chart),
    ("📊", EntityKind::Chart),
    ("background", EntityKind::Background),
    ("fondo", EntityKind::Fondo),
    ("model", EntityKind::Model),
    ("modelo", EntityKind::Model),
];

/// How delimiters between keywords are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    /// The delimiter after a keyword may also open the next keyword, so
    /// `audio,video` yields two tokens.
    #[default]
    BoundaryPreserving,
    /// The delimiter after a keyword is consumed by it. Two keywords separated
    /// by a single delimiter yield only the first. Kept for scripts authored
    /// against that behavior.
    Legacy,
}

/// One keyword occurrence in a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityToken {
    pub kind: EntityKind,
    /// Keyword text exactly as written in the line.
    pub keyword: String,
    /// Byte offset where the match begins. This is the leading delimiter when
    /// there is one, otherwise the keyword itself at the start of the line.
    pub match_offset: usize,
    /// Byte offset of the first keyword character.
    pub keyword_offset: usize,
}

impl EntityToken {
    /// Byte offset just past the keyword.
    pub fn keyword_end(&self) -> usize {
        self.keyword_offset + self.keyword.len()
    }
}

pub fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, ';' | '.' | ',' | ':')
}

/// Length in bytes of `keyword` matched case-insensitively at the start of
/// `text`, if it matches.
fn match_keyword(text: &str, keyword: &str) -> Option<usize> {
    let mut consumed = 0;
    let mut chars = text.chars();
    for expected in keyword.chars() {
        let actual = chars.next()?;
        if actual != expected && !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
        consumed += actual.len_utf8();
    }
    Some(consumed)
}

/// Keyword starting exactly at `at` whose right boundary holds.
fn keyword_at(line: &str, at: usize) -> Option<(EntityKind, usize)> {
    let rest = &line[at..];
    KEYWORDS.iter().find_map(|&(keyword, kind)| {
        let len = match_keyword(rest, keyword)?;
        let closed = rest[len..].chars().next().map_or(true, is_delimiter);
        closed.then_some((kind, len))
    })
}

/// Scan a line for entity keywords, in order of appearance.
pub fn scan(line: &str, mode: ScanMode) -> Vec<EntityToken> {
    let mut tokens = Vec::new();
    // Earliest byte at which the next match (delimiter included) may begin.
    let mut search_from = 0;
    let mut previous: Option<char> = None;

    for (at, c) in line.char_indices() {
        let opener = match previous {
            None => Some(at),
            Some(p) if is_delimiter(p) => Some(at - p.len_utf8()),
            Some(_) => None,
        };
        previous = Some(c);

        let Some(match_offset) = opener.filter(|&offset| offset >= search_from) else {
            continue;
        };
        let Some((kind, len)) = keyword_at(line, at) else {
            continue;
        };

        let token = EntityToken {
            kind,
            keyword: line[at..at + len].to_owned(),
            match_offset,
            keyword_offset: at,
        };
        log::trace!("scanned {:?} '{}' at {}", token.kind, token.keyword, at);

        let end = token.keyword_end();
        search_from = match mode {
            ScanMode::BoundaryPreserving => end,
            ScanMode::Legacy => line[end..].chars().next().map_or(end, |d| end + d.len_utf8()),
        };
        tokens.push(token);
    }

    tokens
}
