//! Citation mark grammar and validation.
//!
//! A mark is a bracketed, comma-separated list of decimal ids, optionally
//! followed by a bound link:
//!
//! ```text
//! mark  = "[" ws* id ws* ( "," ws* id ws* )* "]" link?
//! link  = "(" target ")"
//! ws    = " " | "\t"
//! ```
//!
//! `target` is one or more characters other than whitespace, brackets, and
//! parentheses. Anything that does not match, such as `[Source ID: 3]` or a
//! markdown link with a text label, is plain text.

use std::collections::BTreeSet;
use std::ops::Range;

use lens_core::{ReportNode, SourceId};

/// One citation mark found in a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationMark {
    /// Byte span of the whole mark, link included.
    pub span: Range<usize>,
    /// Ids in written order. `None` for an id too large to ever be assigned.
    pub ids: Vec<Option<SourceId>>,
    /// Byte span of the link target, if the mark is bound.
    pub link: Option<Range<usize>>,
}

impl CitationMark {
    /// Ids that can name a source.
    pub fn source_ids(&self) -> impl Iterator<Item = SourceId> + '_ {
        self.ids.iter().flatten().copied()
    }

    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.link.is_some()
    }
}

/// Find every citation mark in `text`, left to right, non-overlapping.
#[must_use]
pub fn scan(text: &str) -> Vec<CitationMark> {
    let bytes = text.as_bytes();
    let mut marks = Vec::new();
    let mut pos = 0;

    while let Some(offset) = text[pos..].find('[') {
        let start = pos + offset;
        match parse_mark(bytes, start) {
            Some(mark) => {
                pos = mark.span.end;
                marks.push(mark);
            }
            None => pos = start + 1,
        }
    }
    marks
}

fn parse_mark(bytes: &[u8], start: usize) -> Option<CitationMark> {
    let mut i = start + 1;
    let mut ids = Vec::new();

    loop {
        i = skip_ws(bytes, i);
        let digits = i;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        if i == digits {
            return None;
        }
        ids.push(parse_id(&bytes[digits..i]));
        i = skip_ws(bytes, i);
        match bytes.get(i)? {
            b',' => i += 1,
            b']' => {
                i += 1;
                break;
            }
            _ => return None,
        }
    }

    let link = parse_link(bytes, i);
    let end = link.as_ref().map_or(i, |target| target.end + 1);
    Some(CitationMark {
        span: start..end,
        ids,
        link,
    })
}

fn skip_ws(bytes: &[u8], mut i: usize) -> usize {
    while matches!(bytes.get(i), Some(b' ' | b'\t')) {
        i += 1;
    }
    i
}

/// Decimal digits to an id. Overflowing and zero values are never assigned.
fn parse_id(digits: &[u8]) -> Option<SourceId> {
    let value = digits.iter().try_fold(0u32, |acc, &d| {
        acc.checked_mul(10)?.checked_add(u32::from(d - b'0'))
    })?;
    (value != 0).then_some(SourceId::new(value))
}

fn parse_link(bytes: &[u8], open: usize) -> Option<Range<usize>> {
    if bytes.get(open) != Some(&b'(') {
        return None;
    }
    let start = open + 1;
    let mut i = start;
    while bytes
        .get(i)
        .is_some_and(|&b| !b.is_ascii_whitespace() && !matches!(b, b'(' | b')' | b'[' | b']'))
    {
        i += 1;
    }
    (i > start && bytes.get(i) == Some(&b')')).then_some(start..i)
}

/// Every id cited anywhere in `report`.
#[must_use]
pub fn mentioned_ids(report: &ReportNode) -> BTreeSet<SourceId> {
    let mut ids = BTreeSet::new();
    report.for_each_text(&mut |text| {
        for mark in scan(text) {
            ids.extend(mark.source_ids());
        }
    });
    ids
}

/// Result of checking a report's citations against the evidence given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Ids cited anywhere in the report.
    pub mentioned_ids: BTreeSet<SourceId>,
    /// The subset of `mentioned_ids` that name evidence the generator was given.
    pub grounded_ids: BTreeSet<SourceId>,
}

impl ValidationOutcome {
    /// Cited ids with no registered evidence behind them.
    pub fn ungrounded_ids(&self) -> impl Iterator<Item = SourceId> + '_ {
        self.mentioned_ids.difference(&self.grounded_ids).copied()
    }
}

/// Check a report's citations against the ids handed to the generator.
///
/// `given` is the set of ids that had a context block. Registered evidence
/// outside it was never shown to the generator and cannot be cited. The
/// report's own list of cited ids is not consulted: only marks that appear
/// in the text count.
#[must_use]
pub fn validate(report: &ReportNode, given: &BTreeSet<SourceId>) -> ValidationOutcome {
    let mentioned_ids = mentioned_ids(report);
    let grounded_ids = mentioned_ids.intersection(given).copied().collect();
    ValidationOutcome {
        mentioned_ids,
        grounded_ids,
    }
}
