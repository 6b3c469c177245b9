//! Per-kind attribute extraction.
//!
//! Turns one scanned token into a descriptor. Durations and backgrounds read
//! the backward window; every other kind reads the forward window. A failure
//! in one token never affects its siblings.

use crate::descriptor::{EntityDescriptor, MediaContent, Vec3};
use crate::diagnostics::DiagnosticKind;
use crate::extract;
use crate::scanner::{EntityKind, EntityToken};
use crate::window;

/// Footprint used to anchor charts.
const CHART_FOOTPRINT: (f64, f64) = (10.0, 10.0);

/// Width used to anchor text panels.
const TEXT_WIDTH: f64 = 14.0;

/// Caption characters per unit of text panel height.
const TEXT_CHARS_PER_UNIT: f64 = 30.0;

/// Text is authored at five times the media scale.
const TEXT_SCALE_FACTOR: f64 = 5.0;

/// Models stand on the floor rather than at eye level.
const MODEL_GROUND_OFFSET: f64 = 3.0;

/// Result of dispatching one token.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub descriptor: Option<EntityDescriptor>,
    pub issue: Option<DiagnosticKind>,
}

impl Dispatch {
    fn emit(descriptor: EntityDescriptor) -> Self {
        Self {
            descriptor: Some(descriptor),
            issue: None,
        }
    }

    fn dropped(issue: DiagnosticKind) -> Self {
        Self {
            descriptor: None,
            issue: Some(issue),
        }
    }

    fn with_issue_if(mut self, missing: bool, issue: DiagnosticKind) -> Self {
        if missing {
            self.issue = Some(issue);
        }
        self
    }
}

/// Extract the descriptor for `tokens[index]` from `line`.
pub fn dispatch(line: &str, tokens: &[EntityToken], index: usize) -> Dispatch {
    let backward = || window::backward(line, tokens, index);
    let forward = || window::forward(line, tokens, index);

    match tokens[index].kind {
        EntityKind::Duration => match extract::duration(backward()) {
            Some(value) => Dispatch::emit(EntityDescriptor::Duration { value }),
            None => Dispatch::dropped(DiagnosticKind::MissingDuration),
        },
        EntityKind::Background => background(extract::background_color(backward())),
        EntityKind::Fondo => background(extract::fondo_color(forward())),
        EntityKind::Audio => audio(forward()),
        EntityKind::Voiceover => voiceover(forward()),
        EntityKind::Chart => chart(forward()),
        EntityKind::Panorama => panorama(forward()),
        EntityKind::Video => video(forward()),
        EntityKind::Videosphere => videosphere(forward()),
        EntityKind::Image => image(forward()),
        EntityKind::Text => text(forward()),
        EntityKind::Model => model(forward()),
    }
}

fn background(color: Option<String>) -> Dispatch {
    match color {
        Some(color) => Dispatch::emit(EntityDescriptor::Background { color }),
        None => Dispatch::dropped(DiagnosticKind::MissingColor),
    }
}

fn audio(window: &str) -> Dispatch {
    let src = extract::url(window);
    let missing = src.is_none();
    Dispatch::emit(EntityDescriptor::Audio {
        src,
        position: extract::position(window, 0.0, 0.0),
    })
    .with_issue_if(missing, DiagnosticKind::MissingSource)
}

fn voiceover(window: &str) -> Dispatch {
    let text = extract::quote(window);
    let missing = text.is_none();
    Dispatch::emit(EntityDescriptor::Voiceover { text })
        .with_issue_if(missing, DiagnosticKind::MissingCaption)
}

fn chart(window: &str) -> Dispatch {
    let src = extract::url(window);
    let missing = src.is_none();
    let (width, height) = CHART_FOOTPRINT;
    Dispatch::emit(EntityDescriptor::Chart {
        src,
        position: extract::position(window, width, height),
        rotation: extract::rotation(window),
        scale: extract::scale(window),
    })
    .with_issue_if(missing, DiagnosticKind::MissingSource)
}

fn panorama(window: &str) -> Dispatch {
    let content = MediaContent::from_parts(extract::url(window), || extract::quote(window));
    let missing = content.is_none();
    Dispatch::emit(EntityDescriptor::Panorama { content })
        .with_issue_if(missing, DiagnosticKind::MissingSource)
}

fn video(window: &str) -> Dispatch {
    let src = extract::url(window);
    let missing = src.is_none();
    Dispatch::emit(EntityDescriptor::Video {
        src,
        position: extract::position(window, 0.0, 0.0),
        scale: extract::scale(window),
        rotation: extract::rotation(window),
    })
    .with_issue_if(missing, DiagnosticKind::MissingSource)
}

fn videosphere(window: &str) -> Dispatch {
    let src = extract::url(window);
    let missing = src.is_none();
    Dispatch::emit(EntityDescriptor::Videosphere { src })
        .with_issue_if(missing, DiagnosticKind::MissingSource)
}

fn image(window: &str) -> Dispatch {
    let content = MediaContent::from_parts(extract::url(window), || extract::quote(window));
    let missing = content.is_none();
    Dispatch::emit(EntityDescriptor::Image {
        content,
        position: extract::position(window, 0.0, 0.0),
        scale: extract::scale(window),
        rotation: extract::rotation(window),
    })
    .with_issue_if(missing, DiagnosticKind::MissingSource)
}

fn text(window: &str) -> Dispatch {
    let text = extract::quote(window);
    // A missing caption occupies no height.
    let caption_len = text.as_deref().map_or(0, |t| t.chars().count());
    let height = caption_len as f64 / TEXT_CHARS_PER_UNIT;
    let missing = text.is_none();
    Dispatch::emit(EntityDescriptor::Text {
        text,
        position: extract::position(window, TEXT_WIDTH, height),
        scale: extract::scale(window) * TEXT_SCALE_FACTOR,
        rotation: extract::rotation(window),
    })
    .with_issue_if(missing, DiagnosticKind::MissingCaption)
}

fn model(window: &str) -> Dispatch {
    let (src, mtl, extension) = match extract::url_with_suffix(window, ".obj") {
        Some(obj) => (
            Some(obj),
            extract::url_with_suffix(window, ".mtl"),
            Some("obj".to_owned()),
        ),
        None => {
            let src = extract::url(window);
            let extension = src.as_deref().map(extract::extension);
            (src, None, extension)
        }
    };
    let missing = src.is_none();
    let position = extract::position(window, 0.0, 0.0) - Vec3::new(0.0, MODEL_GROUND_OFFSET, 0.0);
    Dispatch::emit(EntityDescriptor::Model {
        src,
        mtl,
        extension,
        position,
        scale: extract::scale(window),
        rotation: extract::rotation(window),
    })
    .with_issue_if(missing, DiagnosticKind::MissingSource)
}
