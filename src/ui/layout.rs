use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const SIDEBAR_WIDTH: u16 = 22;
pub const SIDEBAR_COLLAPSED_WIDTH: u16 = 7;
pub const TOGGLE_WIDTH: u16 = 5;
pub const SEARCH_WIDTH: u16 = 32;
pub const NOTIFY_WIDTH: u16 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiAreas {
    pub size: Rect,
    pub header: Rect,
    pub toggle: Rect,
    pub title: Rect,
    pub search: Rect,
    pub notify: Rect,
    pub sidebar: Rect,
    pub main: Rect,
    /// Tab bar row; only drawn on pages with tabs
    pub page_tabs: Rect,
    pub page_body: Rect,
    pub status_line: Rect,
    pub hint_line: Rect,
}

impl UiAreas {
    /// Where a page draws its body; pages without tabs get the whole main area.
    pub fn content(&self, has_tabs: bool) -> Rect {
        if has_tabs {
            self.page_body
        } else {
            self.main
        }
    }
}

pub fn areas(size: Rect, sidebar_collapsed: bool) -> UiAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(size);

    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(TOGGLE_WIDTH),
            Constraint::Min(0),
            Constraint::Length(SEARCH_WIDTH),
            Constraint::Length(NOTIFY_WIDTH),
        ])
        .split(vertical[0]);

    let sidebar_width = if sidebar_collapsed {
        SIDEBAR_COLLAPSED_WIDTH
    } else {
        SIDEBAR_WIDTH
    };
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
        .split(vertical[1]);

    let page_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(main_chunks[1]);

    let footer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(vertical[2]);

    UiAreas {
        size,
        header: vertical[0],
        toggle: header_chunks[0],
        title: header_chunks[1],
        search: header_chunks[2],
        notify: header_chunks[3],
        sidebar: main_chunks[0],
        main: main_chunks[1],
        page_tabs: page_chunks[0],
        page_body: page_chunks[1],
        status_line: footer_chunks[0],
        hint_line: footer_chunks[1],
    }
}

pub fn rect_contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Area inside a one-cell border.
pub fn rect_inner(rect: Rect) -> Rect {
    Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapsed_sidebar_gives_room_to_main() {
        let size = Rect::new(0, 0, 120, 40);
        let open = areas(size, false);
        let collapsed = areas(size, true);
        assert_eq!(open.sidebar.width, SIDEBAR_WIDTH);
        assert_eq!(collapsed.sidebar.width, SIDEBAR_COLLAPSED_WIDTH);
        assert!(collapsed.main.width > open.main.width);
    }

    #[test]
    fn test_header_controls_are_disjoint() {
        let a = areas(Rect::new(0, 0, 120, 40), false);
        assert!(a.toggle.x + a.toggle.width <= a.title.x);
        assert!(a.search.x + a.search.width <= a.notify.x);
        assert_eq!(a.notify.x + a.notify.width, 120);
    }

    #[test]
    fn test_rect_contains() {
        let area = Rect::new(2, 3, 4, 2);
        assert!(rect_contains(area, 2, 3));
        assert!(rect_contains(area, 5, 4));
        assert!(!rect_contains(area, 6, 4));
        assert!(!rect_contains(area, 2, 5));
    }

    #[test]
    fn test_rect_inner_of_tiny_rect() {
        assert_eq!(rect_inner(Rect::new(0, 0, 1, 1)), Rect::new(1, 1, 0, 0));
    }
}
