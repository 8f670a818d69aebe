use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

pub mod layout;
pub mod tabs;
pub mod widgets;

use crate::app::{App, InputMode, Page, StatusLevel};
use crate::core::Module;
use crate::domain::TaskStatus;

pub fn draw(f: &mut Frame, app: &App) {
    let areas = layout::areas(f.size(), app.sidebar_collapsed);

    draw_header(f, areas, app);
    draw_sidebar(f, areas.sidebar, app);

    let content = areas.content(app.page.has_tabs());
    match app.page {
        Page::Overview => draw_overview(f, content, app),
        Page::Tasks => {
            tabs::draw_task_tabs(f, areas.page_tabs, app.tasks.active_tab());
            app.tasks.render(f, content);
        }
        Page::Calendar => app.calendar.render(f, content),
        Page::Fleet => draw_fleet(f, content, app),
    }

    draw_status_line(f, areas.status_line, app);
    draw_hint_line(f, areas.hint_line, app);

    if let Some(dialog) = app.car_dialog.as_ref() {
        dialog.render(f, centered_rect(70, 80, areas.size));
    }
    if app.help_open {
        draw_help_popup(f, areas.size);
    }
    if let Some(message) = app.current_alert() {
        draw_alert(f, areas.size, message, app.alerts.len());
    }
}

fn draw_header(f: &mut Frame, areas: layout::UiAreas, app: &App) {
    let toggle = Paragraph::new(if app.sidebar_collapsed { "»" } else { "«" })
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(toggle, areas.toggle);

    let title = Line::from(vec![
        Span::styled(
            "Fleetdesk",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("API", Style::default().fg(Color::DarkGray)),
        Span::raw(format!(" {} ", app.api_endpoint)),
        Span::styled("Today", Style::default().fg(Color::DarkGray)),
        Span::raw(format!(" {}", app.clock.format("%d.%m.%Y %H:%M"))),
    ]);
    f.render_widget(
        Paragraph::new(title).block(Block::default().borders(Borders::ALL)),
        areas.title,
    );

    let searching = app.input_mode == InputMode::Search;
    let search_line = if app.search.is_empty() && !searching {
        Line::styled("/ Search…", Style::default().fg(Color::DarkGray))
    } else {
        let mut spans = vec![Span::raw(app.search.as_str())];
        if searching {
            spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
        }
        Line::from(spans)
    };
    let search_border = if searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    f.render_widget(
        Paragraph::new(search_line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(search_border),
        ),
        areas.search,
    );

    f.render_widget(
        Paragraph::new("!")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        areas.notify,
    );
}

fn draw_sidebar(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = Page::ALL
        .iter()
        .map(|page| {
            let is_active = *page == app.page;
            let text = if app.sidebar_collapsed {
                format!(" {}", page.shortcut())
            } else {
                format!("{} {}", page.shortcut(), page.title())
            };
            let style = if is_active {
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(text)).style(style)
        })
        .collect();

    let title = if app.sidebar_collapsed { "" } else { "Pages" };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD));

    let mut state = ListState::default();
    state.select(Page::ALL.iter().position(|page| *page == app.page));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_overview(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let count = |status: TaskStatus| {
        app.tasks
            .all()
            .iter()
            .filter(|task| task.status == status)
            .count()
    };
    let task_lines = if app.loading {
        vec![Line::from("Loading…")]
    } else {
        vec![
            Line::from(vec![
                Span::styled("Total       ", Style::default().fg(Color::DarkGray)),
                Span::raw(app.tasks.len().to_string()),
            ]),
            Line::from(vec![
                Span::styled("Pending     ", Style::default().fg(Color::DarkGray)),
                Span::raw(count(TaskStatus::Pending).to_string()),
            ]),
            Line::from(vec![
                Span::styled("In progress ", Style::default().fg(Color::DarkGray)),
                Span::raw(count(TaskStatus::InProgress).to_string()),
            ]),
            Line::from(vec![
                Span::styled("Completed   ", Style::default().fg(Color::DarkGray)),
                Span::raw(count(TaskStatus::Completed).to_string()),
            ]),
        ]
    };
    f.render_widget(
        Paragraph::new(task_lines).block(Block::default().borders(Borders::ALL).title("Tasks")),
        chunks[0],
    );

    let events = app.calendar.events();
    let event_lines: Vec<Line> = if events.is_empty() {
        vec![Line::styled(
            "Nothing scheduled today",
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        events
            .iter()
            .map(|event| {
                Line::from(vec![
                    Span::styled(
                        format!("{} ", event.start.format("%H:%M")),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::raw(event.title.as_str()),
                ])
            })
            .collect()
    };
    f.render_widget(
        Paragraph::new(event_lines)
            .block(Block::default().borders(Borders::ALL).title("Today"))
            .wrap(Wrap { trim: true }),
        chunks[1],
    );
}

fn draw_fleet(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("  n", Style::default().fg(Color::Yellow)),
            Span::raw("  New car (leave id empty) or edit one by id"),
        ]),
        Line::from(""),
    ];
    if app.saves_in_flight > 0 {
        lines.push(Line::styled(
            format!("  Saving {} car(s)…", app.saves_in_flight),
            Style::default().fg(Color::Yellow),
        ));
    }
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Fleet")),
        area,
    );
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let content = if let Some((text, level)) = app.status_text() {
        let color = match level {
            StatusLevel::Info => Color::LightGreen,
            StatusLevel::Warn => Color::LightYellow,
            StatusLevel::Error => Color::LightRed,
        };
        Line::from(vec![
            Span::styled("msg: ", Style::default().fg(Color::DarkGray)),
            Span::styled(text, Style::default().fg(color)),
        ])
    } else {
        Line::from(vec![
            Span::styled("Page ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{}  ", app.page.title())),
            Span::styled("Tasks ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{}  ", app.tasks.len())),
            Span::styled("Events ", Style::default().fg(Color::DarkGray)),
            Span::raw(app.calendar.events().len().to_string()),
        ])
    };
    f.render_widget(Paragraph::new(content), area);
}

fn draw_hint_line(f: &mut Frame, area: Rect, app: &App) {
    let hints = match (app.input_mode, app.page) {
        (InputMode::Search, _) => "Enter search  Esc leave",
        (_, Page::Tasks) => "j/k move  Space check  [ ] tab  a add  ? help  q quit",
        (_, Page::Calendar) => "a add event  click event drag  ? help  q quit",
        (_, Page::Fleet) => "n car dialog  ? help  q quit",
        (_, Page::Overview) => "1-4 pages  b sidebar  / search  ! notifications  ? help  q quit",
    };
    f.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from("Navigation"),
        Line::from("  1-4        Jump to page"),
        Line::from("  b          Collapse / expand sidebar"),
        Line::from("  Mouse      Click pages, tabs, tasks, header"),
        Line::from(""),
        Line::from("Actions"),
        Line::from("  /          Search"),
        Line::from("  !          Notifications"),
        Line::from("  r          Reload"),
        Line::from("  n          Car dialog (Fleet)"),
        Line::from("  Space      Check task (Tasks)"),
        Line::from("  [ / ]      Prev/Next tab (Tasks)"),
        Line::from("  a          Add task / event"),
        Line::from("  ?          Toggle help"),
        Line::from("  q          Quit"),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Help").borders(Borders::ALL))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, popup_area);
}

fn draw_alert(f: &mut Frame, area: Rect, message: &str, queued: usize) {
    let popup_area = centered_rect(50, 20, area);
    f.render_widget(Clear, popup_area);

    let title = if queued > 1 {
        format!(" Notice (1/{queued}) ")
    } else {
        " Notice ".to_string()
    };
    let lines = vec![
        Line::from(message),
        Line::from(""),
        Line::styled("[ OK ]  Enter", Style::default().fg(Color::DarkGray)),
    ];
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
pub(crate) fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer.get(x, y).symbol());
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::domain::Task;

    fn app() -> App {
        let now = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        App::new("http://127.0.0.1:5000", now)
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn test_header_and_sidebar() {
        let output = render(&app());
        assert!(output.contains("Fleetdesk"));
        assert!(output.contains("http://127.0.0.1:5000"));
        assert!(output.contains("1 Overview"));
        assert!(output.contains("4 Fleet"));
    }

    #[test]
    fn test_collapsed_sidebar_hides_titles() {
        let mut app = app();
        app.toggle_sidebar();
        let output = render(&app);
        assert!(!output.contains("1 Overview"));
    }

    #[test]
    fn test_tasks_page_shows_marks() {
        let mut app = app();
        app.page = Page::Tasks;
        app.apply_dashboard(
            vec![Task {
                id: 1,
                title: "Change oil".to_string(),
                description: None,
                priority: "high".to_string(),
                status: TaskStatus::Completed,
                due_date: None,
                completed_at: None,
                created_at: None,
            }],
            vec![],
        );
        let output = render(&app);
        assert!(output.contains("[x] Change oil"));
        assert!(output.contains("In progress"));
    }

    #[test]
    fn test_alert_popup_drawn_on_top() {
        let mut app = app();
        app.show_notifications();
        let output = render(&app);
        assert!(output.contains("Уведомления будут реализованы позже"));
    }

    #[test]
    fn test_car_dialog_overlay() {
        let mut app = app();
        app.page = Page::Fleet;
        app.open_car_dialog();
        let output = render(&app);
        assert!(output.contains("New car"));
        assert!(output.contains("Brand"));
    }

    #[test]
    fn test_calendar_time_line_rendered() {
        let mut app = app();
        app.page = Page::Calendar;
        app.on_tick(app.clock);
        let output = render(&app);
        assert!(output.contains("now"));
        assert!(output.contains("08:00"));
    }
}
