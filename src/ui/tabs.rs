//! Tab bar for pages with tabs

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::modules::TaskTab;

const DIVIDER: &str = " │ ";

fn tab_title(tab: TaskTab) -> String {
    format!(" {} ", tab.label())
}

/// Draw the task status tabs; the active one is highlighted
pub fn draw_task_tabs(f: &mut Frame, area: Rect, active: TaskTab) {
    let mut spans = Vec::new();
    for (i, tab) in TaskTab::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(DIVIDER, Style::default().fg(Color::DarkGray)));
        }
        let style = if *tab == active {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(tab_title(*tab), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Which tab sits under column `col` of a bar drawn into `area`.
pub fn tab_at(area: Rect, col: u16) -> Option<TaskTab> {
    if col < area.x {
        return None;
    }
    let mut offset = area.x;
    for (i, tab) in TaskTab::ALL.iter().enumerate() {
        if i > 0 {
            offset = offset.saturating_add(DIVIDER.chars().count() as u16);
        }
        let width = tab_title(*tab).chars().count() as u16;
        if col >= offset && col < offset.saturating_add(width) {
            return Some(*tab);
        }
        offset = offset.saturating_add(width);
    }
    None
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::ui::buffer_to_string;

    #[test]
    fn test_tab_at_maps_columns() {
        let area = Rect::new(10, 0, 80, 1);
        assert_eq!(tab_at(area, 9), None);
        assert_eq!(tab_at(area, 10), Some(TaskTab::All));
        // " All " is 5 wide, then 3 for the divider
        assert_eq!(tab_at(area, 16), None);
        assert_eq!(tab_at(area, 18), Some(TaskTab::Pending));
        assert_eq!(tab_at(area, 79), None);
    }

    #[test]
    fn test_bar_lists_every_tab() {
        let mut terminal = Terminal::new(TestBackend::new(60, 1)).unwrap();
        terminal
            .draw(|f| {
                let area = f.size();
                draw_task_tabs(f, area, TaskTab::Pending)
            })
            .unwrap();
        let output = buffer_to_string(terminal.backend().buffer());
        for tab in TaskTab::ALL {
            assert!(output.contains(tab.label()));
        }
    }

    #[test]
    fn test_only_active_tab_highlighted() {
        let mut terminal = Terminal::new(TestBackend::new(60, 1)).unwrap();
        terminal
            .draw(|f| {
                let area = f.size();
                draw_task_tabs(f, area, TaskTab::Completed)
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let highlighted: String = (0..60)
            .map(|x| buffer.get(x, 0))
            .filter(|cell| cell.modifier.contains(Modifier::UNDERLINED))
            .map(|cell| cell.symbol())
            .collect();
        assert_eq!(highlighted.trim(), "Completed");
    }
}
