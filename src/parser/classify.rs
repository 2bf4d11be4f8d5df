//! Turn one pattern match into a [`DocRecord`].

use super::span;
use crate::error::{Error, Result};
use crate::model::{Category, DocRecord};
use std::ops::Range;
use tree_sitter::QueryMatch;

/// Role of a named capture inside a documentation pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureKind {
    /// One node of the leading comment run.
    Comment,
    /// The whole declaration node.
    Primary,
    /// The declared identifier.
    Name,
}

impl CaptureKind {
    /// Resolve a capture name declared by the pattern for `category`.
    pub fn from_capture_name(name: &str, category: Category) -> Result<Self> {
        match name {
            "comment" => Ok(CaptureKind::Comment),
            "name" => Ok(CaptureKind::Name),
            _ if name == category.primary_capture() => Ok(CaptureKind::Primary),
            _ => Err(Error::UnexpectedCapture {
                category,
                capture: name.to_string(),
            }),
        }
    }
}

/// A classified match, keyed by its declaration and identifier spans.
///
/// One declaration can declare several names (`typedef int s32, i32;`),
/// each reported by its own match.
#[derive(Debug)]
pub struct Classified<'src> {
    pub decl: Range<usize>,
    pub ident: Range<usize>,
    pub record: DocRecord<'src>,
}

impl Classified<'_> {
    fn comment_len(&self) -> usize {
        self.record.leading_comment.map_or(0, str::len)
    }

    /// Declaration and identifier spans, as `(start, end)` pairs.
    pub fn key(&self) -> ((usize, usize), (usize, usize)) {
        (
            (self.decl.start, self.decl.end),
            (self.ident.start, self.ident.end),
        )
    }

    /// True when `self` documents the same name with a longer comment run.
    pub fn supersedes(&self, other: &Classified<'_>) -> bool {
        self.key() == other.key() && self.comment_len() > other.comment_len()
    }
}

/// Partition the captures of `m` into comment run, declaration and name.
///
/// `kinds` maps capture index to role and must come from the same query
/// that produced `m`.
pub fn classify<'src>(
    m: &QueryMatch<'_, '_>,
    kinds: &[CaptureKind],
    source: &'src str,
) -> Classified<'src> {
    let mut name = "";
    let mut signature = "";
    let mut decl = 0..0;
    let mut ident = 0..0;
    let mut line = 0;
    let mut comments: Vec<Range<usize>> = Vec::new();

    for capture in m.captures {
        let node = capture.node;
        match kinds[capture.index as usize] {
            CaptureKind::Comment => comments.push(node.byte_range()),
            CaptureKind::Primary => {
                decl = node.byte_range();
                signature = span::extract(source, decl.clone());
                line = node.start_position().row + 1;
            }
            CaptureKind::Name => {
                ident = node.byte_range();
                name = span::extract(source, ident.clone());
            }
        }
    }

    comments.sort_by_key(|r| r.start);
    let leading_comment =
        adjacent_run(source, &comments, decl.start).map(|run| span::extract(source, run));

    Classified {
        decl,
        ident,
        record: DocRecord {
            name,
            signature,
            leading_comment,
            line,
        },
    }
}

/// Byte range covering the comments that sit directly above `decl_start`.
///
/// Walks backwards from the declaration and stops at the first comment that
/// is separated by a blank line or other text, or that trails code on its
/// line. Comments sharing a line join the run once the first of them starts
/// the line.
fn adjacent_run(source: &str, comments: &[Range<usize>], decl_start: usize) -> Option<Range<usize>> {
    let end = comments.last()?.end;
    let mut next_start = decl_start;
    let mut run_start = None;

    for (i, comment) in comments.iter().enumerate().rev() {
        if comment.end > next_start || !span::is_tight_gap(&source[comment.end..next_start]) {
            break;
        }
        next_start = comment.start;
        if span::starts_line(source, comment.start) {
            run_start = Some(comment.start);
        } else if !i.checked_sub(1).is_some_and(|prev| follows_on_line(source, &comments[prev], comment)) {
            break;
        }
    }

    run_start.map(|start| start..end)
}

/// True when only blanks separate `prev` from `comment` on one line.
fn follows_on_line(source: &str, prev: &Range<usize>, comment: &Range<usize>) -> bool {
    prev.end <= comment.start && {
        let gap = &source[prev.end..comment.start];
        gap.trim().is_empty() && !gap.contains('\n')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_names_resolve_per_category() {
        assert_eq!(
            CaptureKind::from_capture_name("func", Category::Function).unwrap(),
            CaptureKind::Primary
        );
        assert_eq!(
            CaptureKind::from_capture_name("struct", Category::TypeAlias).unwrap(),
            CaptureKind::Primary
        );
        assert_eq!(
            CaptureKind::from_capture_name("def", Category::Macro).unwrap(),
            CaptureKind::Primary
        );
        assert_eq!(
            CaptureKind::from_capture_name("comment", Category::Macro).unwrap(),
            CaptureKind::Comment
        );
        assert_eq!(
            CaptureKind::from_capture_name("name", Category::Function).unwrap(),
            CaptureKind::Name
        );
    }

    #[test]
    fn foreign_primary_capture_is_rejected() {
        let err = CaptureKind::from_capture_name("func", Category::Macro).unwrap_err();
        assert!(matches!(err, Error::UnexpectedCapture { .. }));
        assert!(err.to_string().contains("@func"));
    }

    #[test]
    fn run_covers_consecutive_comments() {
        let src = "// a\n// b\nint f(void);";
        let comments = vec![0..4, 5..9];
        assert_eq!(adjacent_run(src, &comments, 10), Some(0..9));
    }

    #[test]
    fn run_stops_at_blank_line() {
        let src = "// a\n\n// b\nint f(void);";
        let comments = vec![0..4, 6..10];
        assert_eq!(adjacent_run(src, &comments, 11), Some(6..10));
    }

    #[test]
    fn run_is_absent_when_declaration_is_detached() {
        let src = "// a\n\nint f(void);";
        assert_eq!(adjacent_run(src, &[0..4], 6), None);
    }

    #[test]
    fn trailing_comment_is_not_leading() {
        let src = "int x; // x\nint f(void);";
        assert_eq!(adjacent_run(src, &[7..11], 12), None);
    }

    #[test]
    fn comments_sharing_a_line_form_one_run() {
        let src = "/* c */ /* d */\nvoid g(void);";
        assert_eq!(adjacent_run(src, &[0..7, 8..15], 16), Some(0..15));
    }

    #[test]
    fn same_line_comments_after_code_are_trailing() {
        let src = "int x; /* a */ /* b */\nvoid f(void);";
        assert_eq!(adjacent_run(src, &[7..14, 15..22], 23), None);
    }

    #[test]
    fn line_leading_run_survives_trailing_group_above() {
        let src = "int x; /* a */\n// b\nvoid f(void);";
        assert_eq!(adjacent_run(src, &[7..14, 15..19], 20), Some(15..19));
    }

    #[test]
    fn no_comments_no_run() {
        assert_eq!(adjacent_run("int f(void);", &[], 0), None);
    }
}
