//! Main UI Application
//!
//! Two panes: the selected loadout on the left, the filtered browse list on
//! the right, with the filter bar above it and the shareable address in the
//! footer.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::catalog::{CatalogItem, CharacterClass, ItemKind};
use crate::session::Session;
use super::widgets::{ItemListWidget, class_color, render_key_help};

/// Which pane receives list navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Browse,
    Selected,
}

/// Main UI application
pub struct App {
    focus: Focus,
    /// Cursor in the browse list
    browse_cursor: usize,
    /// Cursor in the selected panel (skills first, then perks)
    selected_cursor: usize,
}

impl App {
    pub fn new() -> Self {
        Self {
            focus: Focus::Browse,
            browse_cursor: 0,
            selected_cursor: 0,
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn browse_cursor(&self) -> usize {
        self.browse_cursor
    }

    pub fn selected_cursor(&self) -> usize {
        self.selected_cursor
    }

    /// Handle keyboard input, returns true if should quit
    pub fn handle_input(&mut self, key: KeyEvent, session: &mut Session) -> Result<bool> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Browse => Focus::Selected,
                    Focus::Selected => Focus::Browse,
                };
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(session, -1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(session, 1),
            KeyCode::Home => self.set_cursor(0),
            KeyCode::End => {
                let len = self.focused_len(session);
                self.set_cursor(len.saturating_sub(1));
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.focus {
                Focus::Browse => self.toggle_highlighted(session),
                Focus::Selected => self.remove_highlighted(session),
            },
            KeyCode::Char('d') | KeyCode::Delete | KeyCode::Backspace => {
                if self.focus == Focus::Selected {
                    self.remove_highlighted(session);
                }
            }
            KeyCode::Char('0') => session.clear_class_filter(),
            KeyCode::Char(c @ '1'..='8') => {
                let index = c as usize - '1' as usize;
                session.toggle_class(CharacterClass::ALL[index]);
            }
            KeyCode::Char('t') => session.cycle_type_filter(),
            _ => {}
        }

        self.clamp_cursors(session);
        Ok(false)
    }

    fn focused_len(&self, session: &Session) -> usize {
        match self.focus {
            Focus::Browse => session.visible_items().len(),
            Focus::Selected => selected_entries(session).len(),
        }
    }

    fn set_cursor(&mut self, value: usize) {
        match self.focus {
            Focus::Browse => self.browse_cursor = value,
            Focus::Selected => self.selected_cursor = value,
        }
    }

    fn move_cursor(&mut self, session: &Session, delta: i32) {
        let len = self.focused_len(session);
        if len == 0 {
            return;
        }
        let current = match self.focus {
            Focus::Browse => self.browse_cursor,
            Focus::Selected => self.selected_cursor,
        };
        let next = if delta < 0 {
            current.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            (current + delta as usize).min(len - 1)
        };
        self.set_cursor(next);
    }

    /// Keep cursors inside their lists after filters or selection change
    fn clamp_cursors(&mut self, session: &Session) {
        let browse_len = session.visible_items().len();
        self.browse_cursor = self.browse_cursor.min(browse_len.saturating_sub(1));
        let selected_len = selected_entries(session).len();
        self.selected_cursor = self.selected_cursor.min(selected_len.saturating_sub(1));
    }

    fn toggle_highlighted(&mut self, session: &mut Session) {
        let target = session
            .visible_items()
            .get(self.browse_cursor)
            .map(|(kind, item)| (*kind, item.name.clone()));

        if let Some((kind, name)) = target {
            if let Some(outcome) = session.toggle(kind, &name) {
                log::debug!("Toggled {} {}: {:?}", kind.name(), name, outcome);
            }
        }
    }

    fn remove_highlighted(&mut self, session: &mut Session) {
        let target = selected_entries(session)
            .get(self.selected_cursor)
            .map(|(kind, item)| (*kind, item.name.clone()));

        if let Some((kind, name)) = target {
            session.remove(kind, &name);
        }
    }

    /// Render the whole screen
    pub fn render(&self, frame: &mut Frame, session: &Session) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(3)])
            .split(frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[0]);

        self.render_selected(frame, session, columns[0]);
        self.render_browse(frame, session, columns[1]);
        self.render_footer(frame, session, rows[1]);
    }

    fn render_selected(&self, frame: &mut Frame, session: &Session, area: Rect) {
        let selection = session.selection();
        let skill_rows = (ItemKind::Skill.capacity() as u16) * 2 + 2;

        let panes = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(skill_rows), Constraint::Min(4)])
            .split(area);

        let focused = self.focus == Focus::Selected;
        let skill_count = selection.len(ItemKind::Skill);

        for (kind, pane, offset) in [
            (ItemKind::Skill, panes[0], 0),
            (ItemKind::Perk, panes[1], skill_count),
        ] {
            let entries: Vec<(ItemKind, &CatalogItem)> =
                selection.items(kind).iter().map(|item| (kind, item)).collect();

            // Cursor spans both panels; map it into this one
            let cursor = if focused && self.selected_cursor >= offset {
                Some(self.selected_cursor - offset).filter(|c| *c < entries.len())
            } else {
                None
            };

            let title = format!(
                " Selected {}s ({}/{}) ",
                kind.name(),
                entries.len(),
                kind.capacity()
            );
            let empty = match kind {
                ItemKind::Skill => "(no skills selected)",
                ItemKind::Perk => "(no perks selected)",
            };

            frame.render_widget(
                ItemListWidget::new(&entries)
                    .title(title)
                    .cursor(cursor)
                    .focused(focused)
                    .empty_text(empty),
                pane,
            );
        }
    }

    fn render_browse(&self, frame: &mut Frame, session: &Session, area: Rect) {
        let panes = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(4)])
            .split(area);

        self.render_filter_bar(frame, session, panes[0]);

        let entries = session.visible_items();
        let focused = self.focus == Focus::Browse;
        let empty = if session.is_loaded() {
            "(no skills or perks match the filters)"
        } else {
            "Loading catalog..."
        };

        frame.render_widget(
            ItemListWidget::new(&entries)
                .title(format!(" All Skills & Perks ({}) ", entries.len()))
                .selection(session.selection())
                .cursor(if focused { Some(self.browse_cursor) } else { None })
                .show_badge(true)
                .focused(focused)
                .empty_text(empty),
            panes[1],
        );
    }

    fn render_filter_bar(&self, frame: &mut Frame, session: &Session, area: Rect) {
        let filters = session.filters();
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Filters ")
            .border_style(Style::default().fg(Color::Rgb(100, 100, 120)));

        let mut class_spans = vec![Span::styled("Class: ", Style::default().fg(Color::Gray))];
        let all_style = if filters.class.is_all() {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        class_spans.push(Span::styled("0:All ", all_style));

        for (i, class) in CharacterClass::ALL.iter().enumerate() {
            let style = if filters.class.contains(*class) {
                Style::default().fg(class_color(*class)).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            class_spans.push(Span::styled(format!("{}:{} ", i + 1, class.name()), style));
        }

        let type_line = Line::from(vec![
            Span::styled("Type:  ", Style::default().fg(Color::Gray)),
            Span::styled(
                filters.kind.name(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  (t to change)", Style::default().fg(Color::DarkGray)),
        ]);

        let paragraph = Paragraph::new(vec![Line::from(class_spans), type_line]).block(block);
        frame.render_widget(paragraph, area);
    }

    fn render_footer(&self, frame: &mut Frame, session: &Session, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(100, 100, 120)));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height == 0 {
            return;
        }

        let href = session.location().lock().href();
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(inner);

        render_key_help(halves[0], frame.buffer_mut());

        let link = Paragraph::new(Line::from(vec![
            Span::styled("Link: ", Style::default().fg(Color::Gray)),
            Span::styled(href, Style::default().fg(Color::Cyan)),
        ]));
        frame.render_widget(link, halves[1]);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Selected entries in panel order: skills, then perks
fn selected_entries(session: &Session) -> Vec<(ItemKind, &CatalogItem)> {
    let selection = session.selection();
    [ItemKind::Skill, ItemKind::Perk]
        .into_iter()
        .flat_map(|kind| selection.items(kind).iter().map(move |item| (kind, item)))
        .collect()
}
