//! Catalog entry list widget
//!
//! Renders skills and perks two rows per entry: name line, then description.
//! Used for both the browse list and the selected panels.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::catalog::{CatalogItem, CharacterClass, ItemKind};
use crate::picker::Selection;

/// Rows used by a single entry
const ROWS_PER_ITEM: u16 = 2;

/// Widget for rendering a list of catalog entries
pub struct ItemListWidget<'a> {
    entries: &'a [(ItemKind, &'a CatalogItem)],
    selection: Option<&'a Selection>,
    cursor: Option<usize>,
    title: String,
    show_badge: bool,
    focused: bool,
    empty_text: &'a str,
}

impl<'a> ItemListWidget<'a> {
    pub fn new(entries: &'a [(ItemKind, &'a CatalogItem)]) -> Self {
        Self {
            entries,
            selection: None,
            cursor: None,
            title: String::new(),
            show_badge: false,
            focused: false,
            empty_text: "(nothing here)",
        }
    }

    /// Mark entries that are part of this selection
    pub fn selection(mut self, selection: &'a Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn cursor(mut self, cursor: Option<usize>) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Prefix each entry with its kind
    pub fn show_badge(mut self, show: bool) -> Self {
        self.show_badge = show;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn empty_text(mut self, text: &'a str) -> Self {
        self.empty_text = text;
        self
    }

    /// First entry index to draw so the cursor stays on screen
    fn scroll_offset(&self, visible: usize) -> usize {
        match self.cursor {
            Some(cursor) if visible > 0 && cursor >= visible => cursor + 1 - visible,
            _ => 0,
        }
    }

    fn name_line(&self, kind: ItemKind, item: &'a CatalogItem, is_cursor: bool) -> Line<'a> {
        let chosen = self
            .selection
            .map(|s| s.is_selected(kind, &item.name))
            .unwrap_or(false);

        let mut spans = Vec::new();
        spans.push(Span::styled(
            if is_cursor { "> " } else { "  " },
            Style::default().fg(Color::Yellow),
        ));
        if self.selection.is_some() {
            let (mark, style) = if chosen {
                ("[x] ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            } else {
                ("[ ] ", Style::default().fg(Color::DarkGray))
            };
            spans.push(Span::styled(mark, style));
        }
        if self.show_badge {
            spans.push(Span::styled(
                format!("{:<5} ", kind.name()),
                Style::default().fg(kind_color(kind)).add_modifier(Modifier::DIM),
            ));
        }

        let mut name_style = Style::default().fg(class_color(item.class)).add_modifier(Modifier::BOLD);
        if is_cursor && self.focused {
            name_style = name_style.bg(Color::Rgb(40, 40, 50));
        }
        spans.push(Span::styled(item.name.as_str(), name_style));
        spans.push(Span::styled(
            format!(" ({})", item.class.name()),
            Style::default().fg(Color::DarkGray),
        ));

        if let Some(cooldown) = &item.cooldown {
            spans.push(Span::styled(
                format!("  Cooldown: {}", cooldown),
                Style::default().fg(Color::Rgb(200, 180, 100)).add_modifier(Modifier::ITALIC),
            ));
        }

        Line::from(spans)
    }
}

impl<'a> Widget for ItemListWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_color = if self.focused {
            Color::Rgb(200, 170, 90)
        } else {
            Color::Rgb(100, 100, 120)
        };
        let block = Block::default()
            .title(self.title.clone())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if self.entries.is_empty() {
            let style = Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC);
            buf.set_string(inner.x + 1, inner.y, self.empty_text, style);
            return;
        }

        let visible = (inner.height / ROWS_PER_ITEM).max(1) as usize;
        let offset = self.scroll_offset(visible);

        let mut y = inner.y;
        for (index, (kind, item)) in self.entries.iter().enumerate().skip(offset) {
            if y >= inner.y + inner.height {
                break;
            }
            let is_cursor = self.cursor == Some(index);

            let line = self.name_line(*kind, *item, is_cursor);
            buf.set_line(inner.x, y, &line, inner.width);
            y += 1;

            if y < inner.y + inner.height {
                let desc = Line::from(Span::styled(
                    format!("    {}", item.description),
                    Style::default().fg(Color::Gray),
                ));
                buf.set_line(inner.x, y, &desc, inner.width);
                y += 1;
            }
        }
    }
}

/// Get the color for a character class
pub fn class_color(class: CharacterClass) -> Color {
    let (r, g, b) = class.color();
    Color::Rgb(r, g, b)
}

pub fn kind_color(kind: ItemKind) -> Color {
    match kind {
        ItemKind::Skill => Color::Rgb(120, 180, 255),
        ItemKind::Perk => Color::Rgb(255, 170, 90),
    }
}

/// Render the key help row
pub fn render_key_help(area: Rect, buf: &mut Buffer) {
    let help = [
        ("↑↓", "Move"),
        ("Enter", "Toggle"),
        ("Tab", "Switch pane"),
        ("d", "Remove"),
        ("1-8", "Class"),
        ("0", "All classes"),
        ("t", "Type"),
        ("q", "Quit"),
    ];

    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(Color::DarkGray);

    let mut spans = Vec::new();
    for (key, desc) in help {
        spans.push(Span::styled(key, key_style));
        spans.push(Span::styled(format!(" {}  ", desc), desc_style));
    }
    buf.set_line(area.x, area.y, &Line::from(spans), area.width);
}
