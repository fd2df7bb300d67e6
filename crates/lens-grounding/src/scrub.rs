//! Citation rewriting: scrubbing ungrounded ids and binding links.
//!
//! Both rewrites are pure functions of the text, the grounded set, and (for
//! binding) the registry's URLs. Applying either one twice gives the same
//! result as applying it once.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use lens_core::{ReportNode, SourceId};

use crate::SourceRegistry;
use crate::citation::{CitationMark, scan};

/// Remove every citation of an id outside `grounded`.
///
/// A single-id mark that survives is kept verbatim. A grouped mark keeps its
/// grounded ids as individual `[N]` marks. A bound mark is kept verbatim only
/// when all of its ids are grounded.
///
/// Removing a mark can join the text around it into a new mark (`[[9]1]`
/// becomes `[1]`), so passes repeat until the text stops changing. A pass
/// that changes the text either drops at least one digit or leaves only
/// marks that the next pass keeps verbatim, so the loop ends.
#[must_use]
pub fn scrub(text: &str, grounded: &BTreeSet<SourceId>) -> String {
    let mut current = scrub_pass(text, grounded);
    loop {
        let next = scrub_pass(&current, grounded);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Scrub, then turn each surviving citation into `[N](url)`.
///
/// Ids whose evidence has no URL stay as plain `[N]`. An already bound mark
/// is re-bound to the registry's current URL.
#[must_use]
pub fn bind(text: &str, grounded: &BTreeSet<SourceId>, registry: &SourceRegistry) -> String {
    let scrubbed = scrub(text, grounded);
    rewrite(&scrubbed, |out, _, mark| {
        for id in retained(mark, grounded) {
            match registry.url_of(id).map(|url| escape_link_target(url.trim())) {
                Some(target) if !target.is_empty() => {
                    let _ = write!(out, "[{id}]({target})");
                }
                _ => {
                    let _ = write!(out, "[{id}]");
                }
            }
        }
    })
}

/// [`scrub`] applied to every string leaf of a report.
#[must_use]
pub fn scrub_report(report: ReportNode, grounded: &BTreeSet<SourceId>) -> ReportNode {
    report.map_text(&mut |text| scrub(&text, grounded))
}

/// [`bind`] applied to every string leaf of a report.
#[must_use]
pub fn bind_report(
    report: ReportNode,
    grounded: &BTreeSet<SourceId>,
    registry: &SourceRegistry,
) -> ReportNode {
    report.map_text(&mut |text| bind(&text, grounded, registry))
}

fn scrub_pass(text: &str, grounded: &BTreeSet<SourceId>) -> String {
    rewrite(text, |out, source, mark| scrub_mark(out, source, mark, grounded))
}

/// Copy `text`, letting `render` write a replacement for each mark.
fn rewrite<F>(text: &str, mut render: F) -> String
where
    F: FnMut(&mut String, &str, &CitationMark),
{
    let marks = scan(text);
    if marks.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for mark in &marks {
        out.push_str(&text[last..mark.span.start]);
        render(&mut out, text, mark);
        last = mark.span.end;
    }
    out.push_str(&text[last..]);
    out
}

fn scrub_mark(out: &mut String, source: &str, mark: &CitationMark, grounded: &BTreeSet<SourceId>) {
    let kept = retained(mark, grounded);
    if kept.is_empty() {
        return;
    }
    let intact = kept.len() == mark.ids.len();
    if intact && (mark.ids.len() == 1 || mark.is_bound()) {
        out.push_str(&source[mark.span.clone()]);
        return;
    }
    for id in kept {
        let _ = write!(out, "[{id}]");
    }
}

/// Grounded ids of a mark in written order, first occurrence only.
fn retained(mark: &CitationMark, grounded: &BTreeSet<SourceId>) -> Vec<SourceId> {
    let mut kept: Vec<SourceId> = Vec::with_capacity(mark.ids.len());
    for id in mark.source_ids() {
        if grounded.contains(&id) && !kept.contains(&id) {
            kept.push(id);
        }
    }
    kept
}

/// Make a URL safe to embed as a link target.
fn escape_link_target(url: &str) -> String {
    let mut escaped = String::with_capacity(url.len());
    for ch in url.chars() {
        match ch {
            '(' => escaped.push_str("%28"),
            ')' => escaped.push_str("%29"),
            '[' => escaped.push_str("%5B"),
            ']' => escaped.push_str("%5D"),
            c if c.is_whitespace() => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    let _ = write!(escaped, "%{byte:02X}");
                }
            }
            c => escaped.push(c),
        }
    }
    escaped
}
