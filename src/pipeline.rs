//! Line filter and pipeline driver.
//!
//! A script is a list of narration beats, one per line. Only lines that state
//! how long they last ("5 seconds", "3 segundos", "4 ⏲") are beats; every
//! other line is commentary and produces nothing. Each beat is scanned for
//! entity keywords and every keyword becomes at most one descriptor.
//!
//! Compilation is a pure function of the input text. It never fails.

use serde::Serialize;

use crate::config::CompileOptions;
use crate::descriptor::EntityDescriptor;
use crate::diagnostics::{DiagnosticKind, ExtractionDiagnostic};
use crate::dispatcher::dispatch;
use crate::extract;
use crate::scanner::scan;

/// A qualifying line of the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptLine<'a> {
    /// 1-based position of the line in the full script.
    pub number: usize,
    pub text: &'a str,
}

/// Descriptors for every beat plus diagnostics for anything dropped or
/// incomplete along the way.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompileReport {
    /// One entry per qualifying line, in script order.
    pub lines: Vec<Vec<EntityDescriptor>>,
    pub diagnostics: Vec<ExtractionDiagnostic>,
}

/// Lines of the script that declare a duration, in their original order.
pub fn filter_lines(script: &str) -> Vec<ScriptLine<'_>> {
    script
        .split('\n')
        .enumerate()
        .filter_map(|(index, text)| {
            if extract::has_duration(text) {
                Some(ScriptLine { number: index + 1, text })
            } else {
                log::debug!("line {}: no duration, skipped", index + 1);
                None
            }
        })
        .collect()
}

/// Compile a single line, regardless of whether it declares a duration.
pub fn compile_line(line: &str, options: &CompileOptions) -> Vec<EntityDescriptor> {
    let mut diagnostics = Vec::new();
    compile_script_line(ScriptLine { number: 1, text: line }, options, &mut diagnostics)
}

fn compile_script_line(
    line: ScriptLine<'_>,
    options: &CompileOptions,
    diagnostics: &mut Vec<ExtractionDiagnostic>,
) -> Vec<EntityDescriptor> {
    let tokens = scan(line.text, options.scan_mode);
    let mut descriptors = Vec::with_capacity(tokens.len());

    for (index, token) in tokens.iter().enumerate() {
        let outcome = dispatch(line.text, &tokens, index);

        if let Some(kind) = outcome.issue {
            let diagnostic = ExtractionDiagnostic::new(kind, line.number, line.text, token);
            log::debug!(
                "line {} col {}: {} ({})",
                diagnostic.location.line,
                diagnostic.location.column,
                diagnostic.message,
                if kind.drops_descriptor() { "dropped" } else { "incomplete" }
            );
            diagnostics.push(diagnostic);
        }

        match outcome.descriptor {
            Some(descriptor) => descriptors.push(descriptor),
            None => debug_assert!(outcome.issue.is_some_and(DiagnosticKind::drops_descriptor)),
        }
    }

    descriptors
}

/// Compile a script and collect diagnostics.
pub fn compile_with_report(script: &str, options: &CompileOptions) -> CompileReport {
    let mut report = CompileReport::default();

    for line in filter_lines(script) {
        let descriptors = compile_script_line(line, options, &mut report.diagnostics);
        report.lines.push(descriptors);
    }

    log::info!(
        "compiled {} beats, {} descriptors, {} diagnostics",
        report.lines.len(),
        report.lines.iter().map(Vec::len).sum::<usize>(),
        report.diagnostics.len()
    );
    report
}

/// Compile a script with the given options.
pub fn compile_with(script: &str, options: &CompileOptions) -> Vec<Vec<EntityDescriptor>> {
    compile_with_report(script, options).lines
}

/// Compile a script with default options.
pub fn compile(script: &str) -> Vec<Vec<EntityDescriptor>> {
    compile_with(script, &CompileOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Vec3;

    #[test]
    fn test_lines_without_duration_are_dropped() {
        assert!(filter_lines("no time here").is_empty());
        assert!(compile("no time here").is_empty());
        assert!(compile("texto \"hola\" derecha").is_empty());
        assert!(compile("").is_empty());
    }

    #[test]
    fn test_filter_keeps_order_and_line_numbers() {
        let script = "intro\n5 seconds audio\ncomment\n3 segundos fondo #fff\n";
        let lines = filter_lines(script);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], ScriptLine { number: 2, text: "5 seconds audio" });
        assert_eq!(lines[1].number, 4);
    }

    #[test]
    fn test_one_entry_per_qualifying_line() {
        let script = "5 seconds audio https://x.com/a.mp3 left\nnotes\n3 seconds red background";
        let out = compile(script);
        assert_eq!(out.len(), 2);

        assert_eq!(out[0][0], EntityDescriptor::Duration { value: 5 });
        assert_eq!(
            out[0][1],
            EntityDescriptor::Audio {
                src: Some("https://x.com/a.mp3".to_string()),
                position: Vec3::new(-8.0, 1.6, 0.0),
            }
        );
        assert_eq!(
            out[1],
            vec![
                EntityDescriptor::Duration { value: 3 },
                EntityDescriptor::Background { color: "red".to_string() },
            ]
        );
    }

    #[test]
    fn test_duration_only_line() {
        let out = compile("wait 5 seconds");
        assert_eq!(out, vec![vec![EntityDescriptor::Duration { value: 5 }]]);
    }

    #[test]
    fn test_report_locates_dropped_entities() {
        let script = "title\n5 seconds fondo azul, 📢";
        let report = compile_with_report(script, &CompileOptions::default());
        assert_eq!(report.lines.len(), 1);
        assert_eq!(report.lines[0].len(), 2);

        let kinds: Vec<DiagnosticKind> = report.diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![DiagnosticKind::MissingColor, DiagnosticKind::MissingCaption]);
        assert_eq!(report.diagnostics[0].location.line, 2);
        assert_eq!(report.diagnostics[0].location.column, 11);

        // Only the dropping kind removes a descriptor from the line.
        let dropped = report.diagnostics.iter().filter(|d| d.kind.drops_descriptor()).count();
        assert_eq!(dropped, 1);
        assert_eq!(report.lines[0][1].type_name(), "voiceover");
    }

    #[test]
    fn test_failure_does_not_affect_siblings() {
        let out = compile("5 seconds background image https://x.com/i.png");
        assert_eq!(out[0].len(), 2);
        assert_eq!(out[0][0], EntityDescriptor::Duration { value: 5 });
        assert_eq!(out[0][1].type_name(), "image");
        assert_eq!(out[0][1].src(), Some("https://x.com/i.png"));
    }

    #[test]
    fn test_scan_mode_changes_adjacent_detection() {
        let script = "5 seconds audio,video https://x.com/v.mp4";
        let modern = compile_with(script, &CompileOptions::default());
        let legacy = compile_with(script, &CompileOptions::legacy());
        assert_eq!(modern[0].len(), 3);
        assert_eq!(modern[0][1].type_name(), "audio");
        assert_eq!(modern[0][2].type_name(), "video");
        // The space after "seconds" is consumed, so "audio" has no opener.
        assert_eq!(legacy[0].len(), 2);
        assert_eq!(legacy[0][1].type_name(), "video");

        let script = "5 seconds, audio,video https://x.com/v.mp4";
        let legacy = compile_with(script, &CompileOptions::legacy());
        assert_eq!(legacy[0].len(), 2);
        assert_eq!(legacy[0][1].type_name(), "audio");
        assert_eq!(compile(script)[0].len(), 3);
    }

    #[test]
    fn test_compile_is_idempotent() {
        let script = "4 segundos imagen foto https://x.com/i.png izquierda grande\n2 ⏲ 🔊 https://x.com/s.ogg";
        assert_eq!(compile(script), compile(script));
    }

    #[test]
    fn test_default_placement_is_front() {
        let out = compile("5 seconds video https://x.com/v.mp4");
        match &out[0][1] {
            EntityDescriptor::Video { position, rotation, scale, .. } => {
                assert_eq!(*position, Vec3::new(0.0, 1.6, -8.0));
                assert_eq!(*rotation, Vec3::ZERO);
                assert_eq!(*scale, Vec3::ONE);
            }
            other => panic!("Expected video, got {:?}", other),
        }
    }

    #[test]
    fn test_compile_line_ignores_gate() {
        let out = compile_line("texto \"hola\" derecha", &CompileOptions::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].type_name(), "text");
    }
}
