use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::App;
use super::components::{ListContext, build_list, render_trailing, spinner_line};
use super::state::Focus;
use crate::session::Screen;

const AUTH_HINTS: &str = "Enter fetch · Esc quit · F12 logs";
const LOADING_HINTS: &str = "Esc cancel · F12 logs";
const CONTENT_HINTS: &str =
    "Enter/F3 next · Shift-F3 previous · Tab focus · Space toggle · Esc back · F12 logs";
const LOADING_LABEL: &str = " Fetching quiz…";
const FIND_PROMPT: &str = "Find: ";

impl<'a> App<'a> {
    pub(crate) fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area().inner(Margin {
            vertical: 0,
            horizontal: 1,
        });

        let (main, logs) = if self.show_logs {
            let split = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(area);
            (split[0], Some(split[1]))
        } else {
            (area, None)
        };

        match self.session.screen() {
            Screen::Auth | Screen::Loading => self.draw_auth(frame, main),
            Screen::Content => self.draw_content(frame, main),
        }

        if let Some(logs) = logs {
            self.logs.render(frame, logs, &self.theme);
        }
    }

    fn draw_auth(&mut self, frame: &mut Frame, area: Rect) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let title = Paragraph::new("quizpeek").style(self.theme.title_style());
        frame.render_widget(title, layout[0]);

        let loading = self.session.screen() == Screen::Loading;
        let border_style = if self.session.error().is_some() {
            self.theme.invalid_border_style()
        } else {
            self.theme.border_style()
        };
        let frame_block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(" Quiz identifier ", self.theme.prompt_style()))
            .border_style(border_style);
        let inner = frame_block.inner(layout[2]);
        frame.render_widget(frame_block, layout[2]);
        self.identifier_input.set_focused(!loading);
        self.identifier_input.render(frame, inner);

        let status = if loading {
            spinner_line(LOADING_LABEL, &self.throbber_state, self.theme.empty_style())
        } else if let Some(error) = self.session.error() {
            Line::styled(error.to_string(), self.theme.error_style())
        } else {
            Line::default()
        };
        frame.render_widget(Paragraph::new(status), layout[3]);

        let hints = if loading { LOADING_HINTS } else { AUTH_HINTS };
        frame.render_widget(
            Paragraph::new(hints).style(self.theme.empty_style()),
            layout[5],
        );
    }

    fn draw_content(&mut self, frame: &mut Frame, area: Rect) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        let title = self
            .session
            .view()
            .map(|view| view.title.clone())
            .unwrap_or_default();
        frame.render_widget(
            Paragraph::new(title).style(self.theme.title_style()),
            layout[0],
        );

        self.draw_query_row(frame, layout[1]);
        frame.render_widget(
            Paragraph::new("─".repeat(usize::from(layout[2].width)))
                .style(self.theme.border_style()),
            layout[2],
        );
        self.draw_list(frame, layout[3]);
        frame.render_widget(
            Paragraph::new(CONTENT_HINTS).style(self.theme.empty_style()),
            layout[4],
        );
    }

    fn draw_query_row(&mut self, frame: &mut Frame, area: Rect) {
        let prompt_width = FIND_PROMPT.len() as u16;
        let row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(prompt_width), Constraint::Min(1)])
            .split(area);

        frame.render_widget(
            Paragraph::new(FIND_PROMPT).style(self.theme.prompt_style()),
            row[0],
        );
        self.query_input.set_focused(self.focus == Focus::Query);
        self.query_input.render(frame, row[1]);

        if let Some(counter) = self.session.search().counter() {
            let line = Line::styled(counter.to_string(), self.theme.empty_style());
            render_trailing(frame, row[1], &line);
        }
    }

    fn draw_list(&mut self, frame: &mut Frame, area: Rect) {
        let Some(view) = self.session.view() else {
            return;
        };
        if view.is_empty() {
            let empty = Paragraph::new("No questions")
                .alignment(Alignment::Center)
                .style(self.theme.empty_style());
            frame.render_widget(Clear, area);
            frame.render_widget(empty, area);
            return;
        }

        let list = build_list(&ListContext {
            view,
            search: self.session.search(),
            accordion: self.session.accordion(),
            cursor: (self.focus == Focus::List).then_some(self.cursor),
            theme: &self.theme,
            width: area.width,
        });

        let height = usize::from(area.height);
        let mut offset = match self.scroll.centre_on.take() {
            Some(block) => list.centred_offset(block, height),
            None if self.focus == Focus::List => {
                list.keep_visible(self.cursor, self.scroll.offset, height)
            }
            None => self.scroll.offset,
        };
        offset = offset.min(list.len().saturating_sub(height));
        self.scroll.offset = offset;

        let visible: Vec<Line<'static>> = list.lines.into_iter().skip(offset).take(height).collect();
        frame.render_widget(Paragraph::new(visible), area);
    }
}
