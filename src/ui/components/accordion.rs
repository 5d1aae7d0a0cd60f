use std::ops::Range;

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::quiz::QuizView;
use crate::search::{SearchSession, SegmentKind};
use crate::session::Accordion;
use crate::ui::style::Theme;

const OPEN_ICON: &str = "▾ ";
const CLOSED_ICON: &str = "▸ ";
const HEADER_INDENT: &str = "  ";
const CHOICE_INDENT: &str = "    ";
const CORRECT_MARK: &str = " ✓";

/// Inputs for laying out the question list.
pub struct ListContext<'a> {
    pub view: &'a QuizView,
    pub search: &'a SearchSession,
    pub accordion: &'a Accordion,
    /// Block under the list cursor, when the list has focus.
    pub cursor: Option<usize>,
    pub theme: &'a Theme,
    pub width: u16,
}

/// Wrapped list lines plus the line span covered by each block.
#[derive(Debug, Default)]
pub struct ListLines {
    pub lines: Vec<Line<'static>>,
    pub block_rows: Vec<Range<usize>>,
}

impl ListLines {
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// First visible line that centres `block` in a viewport of `height` rows.
    #[must_use]
    pub fn centred_offset(&self, block: usize, height: usize) -> usize {
        let Some(rows) = self.block_rows.get(block) else {
            return 0;
        };
        let block_height = rows.len();
        let max_offset = self.lines.len().saturating_sub(height);
        let offset = if block_height >= height {
            rows.start
        } else {
            rows.start.saturating_sub((height - block_height) / 2)
        };
        offset.min(max_offset)
    }

    /// Smallest change to `offset` that keeps the header of `block` visible.
    #[must_use]
    pub fn keep_visible(&self, block: usize, offset: usize, height: usize) -> usize {
        let Some(rows) = self.block_rows.get(block) else {
            return offset;
        };
        if height == 0 {
            return offset;
        }
        if rows.start < offset {
            rows.start
        } else if rows.start >= offset + height {
            rows.start + 1 - height
        } else {
            offset
        }
    }
}

/// Lay out every block as wrapped, styled lines.
#[must_use]
pub fn build_list(context: &ListContext<'_>) -> ListLines {
    let width = usize::from(context.width.max(1));
    let theme = context.theme;
    let mut list = ListLines::default();

    for (index, block) in context.view.blocks.iter().enumerate() {
        let start = list.lines.len();
        let open = context.accordion.is_open(index);
        let base = if context.cursor == Some(index) {
            theme.cursor_style()
        } else {
            theme.header_style()
        };

        let header: Vec<(&str, Style)> = context
            .search
            .segments(index)
            .into_iter()
            .map(|segment| {
                let style = match segment.kind {
                    SegmentKind::Plain => base,
                    SegmentKind::Marker => base.patch(theme.marker_style()),
                    SegmentKind::ActiveMarker => base.patch(theme.active_marker_style()),
                };
                (segment.text, style)
            })
            .collect();
        let icon = if open { OPEN_ICON } else { CLOSED_ICON };
        list.lines.extend(wrap_pieces(
            &header,
            width,
            (icon, base),
            (HEADER_INDENT, base),
        ));

        if open {
            for choice in &block.choices {
                let (style, mark) = if choice.correct {
                    (theme.correct_style(), CORRECT_MARK)
                } else {
                    (theme.empty_style(), "")
                };
                let pieces = [(choice.text.as_str(), style), (mark, style)];
                list.lines.extend(wrap_pieces(
                    &pieces,
                    width,
                    (CHOICE_INDENT, Style::default()),
                    (CHOICE_INDENT, Style::default()),
                ));
            }
        }

        list.block_rows.push(start..list.lines.len());
    }

    list
}

/// Greedy character wrap of styled `pieces` into lines of at most `width`
/// columns. The first line starts with `first`, later lines with `rest`.
/// A line always takes at least one character, so very narrow widths still
/// make progress.
fn wrap_pieces(
    pieces: &[(&str, Style)],
    width: usize,
    first: (&str, Style),
    rest: (&str, Style),
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut spans = vec![Span::styled(first.0.to_string(), first.1)];
    let mut used = first.0.width();
    let mut has_content = false;

    for &(text, style) in pieces {
        let mut run = String::new();
        for ch in text.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if has_content && used + ch_width > width {
                if !run.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut run), style));
                }
                lines.push(Line::from(std::mem::take(&mut spans)));
                spans.push(Span::styled(rest.0.to_string(), rest.1));
                used = rest.0.width();
            }
            run.push(ch);
            used += ch_width;
            has_content = true;
        }
        if !run.is_empty() {
            spans.push(Span::styled(run, style));
        }
    }

    lines.push(Line::from(spans));
    lines
}
