//! Tasks page - status tabs over the task list, with local check boxes

use std::collections::BTreeSet;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::core::{Action, Module};
use crate::domain::{Task, TaskStatus};

/// Status filter tabs; exactly one is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskTab {
    #[default]
    All,
    Pending,
    InProgress,
    Completed,
}

impl TaskTab {
    pub const ALL: [TaskTab; 4] = [
        TaskTab::All,
        TaskTab::Pending,
        TaskTab::InProgress,
        TaskTab::Completed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TaskTab::All => "All",
            TaskTab::Pending => "Pending",
            TaskTab::InProgress => "In progress",
            TaskTab::Completed => "Completed",
        }
    }

    pub fn matches(&self, status: TaskStatus) -> bool {
        match self {
            TaskTab::All => true,
            TaskTab::Pending => status == TaskStatus::Pending,
            TaskTab::InProgress => status == TaskStatus::InProgress,
            TaskTab::Completed => status == TaskStatus::Completed,
        }
    }

    fn index(&self) -> usize {
        TaskTab::ALL.iter().position(|tab| tab == self).unwrap_or(0)
    }
}

/// Checked tasks render dimmed and struck through.
pub fn task_style(checked: bool) -> Style {
    if checked {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM | Modifier::CROSSED_OUT)
    } else {
        Style::default()
    }
}

#[derive(Debug, Default)]
pub struct TaskBoard {
    tasks: Vec<Task>,
    /// Ids of checked tasks; never sent anywhere
    checked: BTreeSet<i64>,
    active_tab: TaskTab,
    selected: usize,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the list; boxes start checked for completed tasks.
    pub fn load(&mut self, tasks: Vec<Task>) {
        self.checked = tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Completed)
            .map(|task| task.id)
            .collect();
        self.tasks = tasks;
        self.clamp_selection();
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn active_tab(&self) -> TaskTab {
        self.active_tab
    }

    pub fn activate_tab(&mut self, tab: TaskTab) {
        self.active_tab = tab;
        self.selected = 0;
    }

    pub fn next_tab(&mut self) {
        let next = (self.active_tab.index() + 1) % TaskTab::ALL.len();
        self.activate_tab(TaskTab::ALL[next]);
    }

    pub fn prev_tab(&mut self) {
        let len = TaskTab::ALL.len();
        let prev = (self.active_tab.index() + len - 1) % len;
        self.activate_tab(TaskTab::ALL[prev]);
    }

    /// Tasks under the active tab, in backend order.
    pub fn visible(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| self.active_tab.matches(task.status))
            .collect()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        let count = self.visible().len();
        if count > 0 && self.selected + 1 < count {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn is_checked(&self, id: i64) -> bool {
        self.checked.contains(&id)
    }

    /// Flips the box of the `index`-th visible task. The selection stays put.
    pub fn toggle_visible(&mut self, index: usize) -> Option<bool> {
        let id = self.visible().get(index).map(|task| task.id)?;
        Some(self.toggle(id))
    }

    /// First visible task when the list is `height` rows tall; the selected
    /// task is always on screen.
    pub fn scroll_offset(&self, height: u16) -> usize {
        let height = height as usize;
        if height > 0 && self.selected >= height {
            self.selected + 1 - height
        } else {
            0
        }
    }

    /// Index into [`Self::visible`] of the task drawn at `row` of a list
    /// `height` rows tall.
    pub fn index_at_row(&self, row: u16, height: u16) -> usize {
        self.scroll_offset(height) + row as usize
    }

    /// Returns the new checked state.
    pub fn toggle(&mut self, id: i64) -> bool {
        if self.checked.remove(&id) {
            false
        } else {
            self.checked.insert(id);
            true
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.visible().len();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }

    fn task_line<'a>(&self, task: &'a Task, selected: bool) -> Line<'a> {
        let checked = self.is_checked(task.id);
        let marker = if checked { "[x] " } else { "[ ] " };
        let mut title_style = task_style(checked);
        if selected {
            title_style = title_style.add_modifier(Modifier::REVERSED);
        }

        let mut spans = vec![
            Span::raw(marker),
            Span::styled(task.title.as_str(), title_style),
            Span::styled(
                format!("  {}", task.status.label()),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if !task.priority.is_empty() {
            spans.push(Span::styled(
                format!("  {}", task.priority),
                Style::default().fg(priority_color(&task.priority)),
            ));
        }
        if let Some(due) = task.due_date {
            spans.push(Span::styled(
                format!("  due {}", due.format("%d.%m %H:%M")),
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    }
}

fn priority_color(priority: &str) -> Color {
    match priority {
        "high" => Color::Red,
        "medium" => Color::Yellow,
        _ => Color::Green,
    }
}

impl Module for TaskBoard {
    fn id(&self) -> &'static str {
        "tasks"
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(),
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.toggle_visible(self.selected);
            }
            KeyCode::Char(']') | KeyCode::Tab => self.next_tab(),
            KeyCode::Char('[') | KeyCode::BackTab => self.prev_tab(),
            KeyCode::Char('a') => return Action::ShowModal("task"),
            _ => {}
        }
        Action::None
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" Tasks - {} ", self.active_tab.label()))
            .borders(Borders::ALL);
        let height = block.inner(area).height;
        let offset = self.scroll_offset(height);
        let visible = self.visible();

        let lines: Vec<Line> = if visible.is_empty() {
            vec![Line::styled(
                "No tasks",
                Style::default().fg(Color::DarkGray),
            )]
        } else {
            visible
                .iter()
                .enumerate()
                .skip(offset)
                .take(height as usize)
                .map(|(i, task)| self.task_line(task, i == self.selected))
                .collect()
        };

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn task(id: i64, status: TaskStatus) -> Task {
        Task {
            id,
            title: format!("task {id}"),
            description: None,
            priority: "medium".to_string(),
            status,
            due_date: None,
            completed_at: None,
            created_at: None,
        }
    }

    fn board() -> TaskBoard {
        let mut board = TaskBoard::new();
        board.load(vec![
            task(1, TaskStatus::Pending),
            task(2, TaskStatus::InProgress),
            task(3, TaskStatus::Completed),
            task(4, TaskStatus::Pending),
        ]);
        board
    }

    fn press(board: &mut TaskBoard, code: KeyCode) -> Action {
        board.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_completed_tasks_start_checked() {
        let board = board();
        assert!(board.is_checked(3));
        assert!(!board.is_checked(1));
    }

    #[test]
    fn test_toggle_is_local_and_reversible() {
        let mut board = board();
        assert!(board.toggle(1));
        assert!(board.is_checked(1));
        assert!(!board.toggle(1));
        assert!(!board.is_checked(1));
    }

    #[test]
    fn test_checked_style_is_struck_through() {
        let style = task_style(true);
        assert!(style.add_modifier.contains(Modifier::CROSSED_OUT));
        assert!(style.add_modifier.contains(Modifier::DIM));
        assert_eq!(task_style(false), Style::default());
    }

    #[test]
    fn test_tab_filters_by_status() {
        let mut board = board();
        board.activate_tab(TaskTab::Pending);
        let ids: Vec<i64> = board.visible().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 4]);

        board.activate_tab(TaskTab::All);
        assert_eq!(board.visible().len(), 4);
    }

    #[test]
    fn test_only_one_tab_active() {
        let mut board = board();
        press(&mut board, KeyCode::Char(']'));
        assert_eq!(board.active_tab(), TaskTab::Pending);
        press(&mut board, KeyCode::Char(']'));
        assert_eq!(board.active_tab(), TaskTab::InProgress);
        press(&mut board, KeyCode::Char('['));
        press(&mut board, KeyCode::Char('['));
        press(&mut board, KeyCode::Char('['));
        assert_eq!(board.active_tab(), TaskTab::Completed);
    }

    #[test]
    fn test_space_toggles_selected_visible_task() {
        let mut board = board();
        board.activate_tab(TaskTab::Pending);
        press(&mut board, KeyCode::Char('j'));
        press(&mut board, KeyCode::Char(' '));
        assert!(board.is_checked(4));
        assert!(!board.is_checked(1));
    }

    #[test]
    fn test_selection_stops_at_ends() {
        let mut board = board();
        for _ in 0..10 {
            press(&mut board, KeyCode::Down);
        }
        assert_eq!(board.selected(), 3);
        for _ in 0..10 {
            press(&mut board, KeyCode::Up);
        }
        assert_eq!(board.selected(), 0);
    }

    #[test]
    fn test_toggle_outside_list() {
        let mut board = TaskBoard::new();
        assert_eq!(board.toggle_visible(0), None);
    }

    #[test]
    fn test_add_asks_for_modal() {
        let mut board = board();
        assert_eq!(press(&mut board, KeyCode::Char('a')), Action::ShowModal("task"));
    }

    #[test]
    fn test_list_scrolls_with_selection() {
        let mut board = board();
        assert_eq!(board.scroll_offset(2), 0);
        board.select_next();
        board.select_next();
        board.select_next();
        assert_eq!(board.scroll_offset(2), 2);
        assert_eq!(board.index_at_row(0, 2), 2);
        assert_eq!(board.scroll_offset(10), 0);
        assert_eq!(board.scroll_offset(0), 0);
    }

    #[test]
    fn test_selected_task_stays_on_screen() {
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        use crate::ui::buffer_to_string;

        let mut board = board();
        for _ in 0..3 {
            press(&mut board, KeyCode::Down);
        }
        // two rows inside the border
        let mut terminal = Terminal::new(TestBackend::new(40, 4)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.size();
                board.render(frame, area)
            })
            .unwrap();
        let output = buffer_to_string(terminal.backend().buffer());
        assert!(output.contains("task 4"));
        assert!(output.contains("task 3"));
        assert!(!output.contains("task 1"));
    }

    #[test]
    fn test_toggle_keeps_selection() {
        let mut board = board();
        board.select_next();
        board.toggle_visible(3);
        assert!(board.is_checked(4));
        assert_eq!(board.selected(), 1);
    }

    #[test]
    fn test_reload_clamps_selection() {
        let mut board = board();
        board.select_next();
        board.select_next();
        board.load(vec![task(9, TaskStatus::Pending)]);
        assert_eq!(board.selected(), 0);
    }
}
