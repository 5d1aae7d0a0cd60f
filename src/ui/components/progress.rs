use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use throbber_widgets_tui::{Throbber, ThrobberState};

/// Spinner followed by `label`, both in `style`.
#[must_use]
pub fn spinner_line(label: &str, state: &ThrobberState, style: Style) -> Line<'static> {
    let spinner = Throbber::default().style(style).throbber_style(style);
    let mut line = Line::default();
    line.spans.push(spinner.to_symbol_span(state));
    line.spans.push(Span::styled(label.to_string(), style));
    line
}

/// Draw `line` flush against the right edge of the first row of `area`.
///
/// The line is pushed right so it keeps two columns clear of whatever is
/// already drawn on that row, and is clipped rather than overlapping it.
pub fn render_trailing(frame: &mut Frame, area: Rect, line: &Line<'_>) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let line_width = u16::try_from(line.width()).unwrap_or(u16::MAX);
    if line_width == 0 {
        return;
    }

    let buffer = frame.buffer_mut();
    let mut start_x = if line_width >= area.width {
        area.left()
    } else {
        area.right().saturating_sub(line_width)
    };

    let row = area.top();
    let mut last_char_x: Option<u16> = None;
    for x in area.left()..area.right() {
        if let Some(cell) = buffer.cell((x, row))
            && !cell.symbol().trim().is_empty()
        {
            last_char_x = Some(x);
        }
    }

    if let Some(last_x) = last_char_x {
        let min_start = last_x.saturating_add(3);
        if min_start > start_x {
            start_x = min_start;
        }
    }

    if start_x >= area.right() {
        return;
    }

    let max_width = area.right().saturating_sub(start_x).min(line_width);
    if max_width == 0 {
        return;
    }

    buffer.set_line(start_x, row, line, max_width);
}
