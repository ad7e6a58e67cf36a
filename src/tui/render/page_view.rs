use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{Goal, GoalType};
use crate::tui::app::App;
use crate::tui::form::{Form, FormKind};
use crate::tui::motion::Page;

use super::form_view;
use super::helpers::{display_width, progress_bar, truncate_to_width};

const BAR_WIDTH: usize = 10;

/// Render the page designated by the last crumb
pub fn render_page(frame: &mut Frame, app: &App, area: Rect) {
    let selection = app.motions.selection();
    let page = app.motions.page();

    // Form pages show the open form, or an inactive preview before Enter
    if let Some(kind) = FormKind::for_page(page)
        && kind != FormKind::ToggleElement
    {
        let preview;
        let (form, active) = match &app.form {
            Some(form) => (form, true),
            None => {
                preview = Form::new(kind, selection, &app.records);
                (&preview, false)
            }
        };
        let title = form_title(app, kind);
        form_view::render_form(frame, app, area, &title, form, active);
        return;
    }

    let lines = match page {
        Page::Home => home_lines(app),
        Page::Goals => goal_list_lines(app, area.width as usize),
        Page::Goal => match selection.goal(&app.records) {
            Some(goal) => goal_lines(app, goal),
            None => vec![missing_line(app, "goal")],
        },
        Page::Element => match selection.element(&app.records) {
            Some(element) => {
                let (mark, color) = if element.is_done {
                    ("[x]", app.theme.done)
                } else {
                    ("[ ]", app.theme.text)
                };
                vec![Line::from(vec![
                    Span::styled(format!(" {} ", mark), Style::default().fg(color)),
                    Span::styled(element.name.clone(), title_style(app)),
                ])]
            }
            None => vec![missing_line(app, "element")],
        },
        Page::Tasks => task_list_lines(app, area.width as usize),
        Page::Task => match selection.task(&app.records) {
            Some(task) => vec![
                Line::from(Span::styled(format!(" {}", task.name), title_style(app))),
                field_line(app, "index", task.index.to_string()),
            ],
            None => vec![missing_line(app, "task")],
        },
        Page::Config => config_lines(app),
        Page::NewGoal | Page::NewTask | Page::Progress | Page::NewElement => Vec::new(),
    };

    let paragraph = Paragraph::new(lines).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}

fn title_style(app: &App) -> Style {
    Style::default()
        .fg(app.theme.text_bright)
        .add_modifier(Modifier::BOLD)
}

fn missing_line(app: &App, kind: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!(" this {} no longer exists", kind),
        Style::default().fg(app.theme.dim),
    ))
}

fn field_line(app: &App, key: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<14}", key), Style::default().fg(app.theme.dim)),
        Span::styled(value, Style::default().fg(app.theme.text)),
    ])
}

fn form_title(app: &App, kind: FormKind) -> String {
    let goal_name = app
        .motions
        .selection()
        .goal(&app.records)
        .map(|g| g.name.clone())
        .unwrap_or_default();
    match kind {
        FormKind::NewGoal => "New goal".to_string(),
        FormKind::NewTask => "New task".to_string(),
        FormKind::Progress => format!("Progress of {}", goal_name),
        FormKind::NewElement => format!("New element for {}", goal_name),
        FormKind::ToggleElement => String::new(),
    }
}

fn home_lines(app: &App) -> Vec<Line<'static>> {
    let records = &app.records;
    let complete = records
        .goals
        .iter()
        .filter(|g| g.is_complete())
        .count();
    vec![
        field_line(
            app,
            "goals",
            format!("{} ({} complete)", records.goals.len(), complete),
        ),
        field_line(app, "tasks", records.tasks.len().to_string()),
    ]
}

/// ` 0  Name ....... [#####-----] 5/10`
fn goal_list_lines(app: &App, width: usize) -> Vec<Line<'static>> {
    if app.records.goals.is_empty() {
        return vec![Line::from(Span::styled(
            " no goals",
            Style::default().fg(app.theme.dim),
        ))];
    }
    app.records
        .goals
        .iter()
        .enumerate()
        .map(|(pos, goal)| {
            let (done, total) = goal.completion();
            let figure = format!(" {} {}/{}", progress_bar(done, total, BAR_WIDTH), done, total);
            let name_width = width.saturating_sub(4 + display_width(&figure) + 1);
            let name = truncate_to_width(&goal.name, name_width);
            let pad = name_width.saturating_sub(display_width(&name));
            Line::from(vec![
                Span::styled(format!(" {:<2} ", pos), Style::default().fg(app.theme.dim)),
                Span::styled(name, Style::default().fg(app.theme.text)),
                Span::raw(" ".repeat(pad)),
                Span::styled(
                    figure,
                    Style::default().fg(app.theme.completion_color(done, total)),
                ),
            ])
        })
        .collect()
}

fn goal_lines(app: &App, goal: &Goal) -> Vec<Line<'static>> {
    let (done, total) = goal.completion();
    let mut lines = vec![
        Line::from(Span::styled(format!(" {}", goal.name), title_style(app))),
        field_line(app, "index", goal.index.to_string()),
        field_line(app, "type", goal.goal_type.to_string()),
        Line::from(vec![
            Span::styled(format!(" {:<14}", "progress"), Style::default().fg(app.theme.dim)),
            Span::styled(
                format!("{} {}/{}", progress_bar(done, total, BAR_WIDTH), done, total),
                Style::default().fg(app.theme.completion_color(done, total)),
            ),
        ]),
    ];
    if goal.goal_type == GoalType::Elements {
        lines.push(Line::default());
        for (pos, element) in goal.elements.iter().enumerate() {
            let (mark, color) = if element.is_done {
                ("[x]", app.theme.done)
            } else {
                ("[ ]", app.theme.text)
            };
            lines.push(Line::from(vec![
                Span::styled(format!(" {:<2} ", pos), Style::default().fg(app.theme.dim)),
                Span::styled(format!("{} ", mark), Style::default().fg(color)),
                Span::styled(element.name.clone(), Style::default().fg(app.theme.text)),
            ]));
        }
    }
    lines
}

fn task_list_lines(app: &App, width: usize) -> Vec<Line<'static>> {
    if app.records.tasks.is_empty() {
        return vec![Line::from(Span::styled(
            " no tasks",
            Style::default().fg(app.theme.dim),
        ))];
    }
    app.records
        .tasks
        .iter()
        .enumerate()
        .map(|(pos, task)| {
            Line::from(vec![
                Span::styled(format!(" {:<2} ", pos), Style::default().fg(app.theme.dim)),
                Span::styled(
                    truncate_to_width(&task.name, width.saturating_sub(4)),
                    Style::default().fg(app.theme.text),
                ),
            ])
        })
        .collect()
}

fn config_lines(app: &App) -> Vec<Line<'static>> {
    let config = &app.config;
    let or_unset = |s: &str| {
        if s.is_empty() {
            "(unset)".to_string()
        } else {
            s.to_string()
        }
    };
    let token = if config.git.token.is_empty() {
        "(unset)".to_string()
    } else {
        "\u{2022}".repeat(8)
    };
    vec![
        field_line(app, "data_path", config.data_path.clone()),
        field_line(app, "debug", if config.debug { "on" } else { "off" }.to_string()),
        field_line(app, "git.username", or_unset(&config.git.username)),
        field_line(app, "git.mail", or_unset(&config.git.mail)),
        field_line(app, "git.token", token),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Config, Records};
    use crate::tui::render::test_helpers::*;

    fn render(app: &App) -> String {
        render_to_string(TERM_W, TERM_H, |frame, area| {
            render_page(frame, app, area);
        })
    }

    #[test]
    fn home_summarises_counts() {
        let app = sample_app();
        let output = render(&app);
        assert!(output.contains("goals         2 (0 complete)"), "{output}");
        assert!(output.contains("tasks         2"), "{output}");
    }

    #[test]
    fn goal_list_by_position() {
        let mut app = sample_app();
        navigate(&mut app, "g");
        let output = render(&app);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with(" 0  Read books"), "{output}");
        assert!(lines[0].ends_with("[#####-----] 5/10"), "{output}");
        assert!(lines[1].starts_with(" 1  Trip"), "{output}");
        assert!(lines[1].ends_with("[#####-----] 1/2"), "{output}");
    }

    #[test]
    fn empty_lists() {
        let mut app = App::new(Config::default(), Records::default());
        navigate(&mut app, "g");
        assert_eq!(render(&app), " no goals");
        app.motions.back();
        navigate(&mut app, "t");
        assert_eq!(render(&app), " no tasks");
    }

    #[test]
    fn checklist_goal_detail() {
        let mut app = sample_app();
        navigate(&mut app, "g1");
        let output = render(&app);
        assert!(output.starts_with(" Trip"), "{output}");
        assert!(output.contains("type          elements"), "{output}");
        assert!(output.contains(" 0  [x] Tickets"), "{output}");
        assert!(output.contains(" 1  [ ] Hotel"), "{output}");
    }

    #[test]
    fn goal_detail_follows_live_position() {
        let mut app = sample_app();
        navigate(&mut app, "g1");
        app.records.goals.remove(0);
        let output = render(&app);
        assert_eq!(output, " this goal no longer exists");
    }

    #[test]
    fn task_detail() {
        let mut app = sample_app();
        navigate(&mut app, "t1");
        let output = render(&app);
        assert!(output.starts_with(" Pay rent"), "{output}");
        assert!(output.contains("index         1"), "{output}");
    }

    #[test]
    fn config_masks_token() {
        let mut app = sample_app();
        app.config.git.token = "secret".into();
        navigate(&mut app, "c");
        let output = render(&app);
        assert!(output.contains("git.username  (unset)"), "{output}");
        assert!(!output.contains("secret"), "{output}");
        assert!(output.contains("debug         off"), "{output}");
    }

    #[test]
    fn form_page_shows_preview_before_enter() {
        let mut app = sample_app();
        navigate(&mut app, "g+");
        let output = render(&app);
        assert!(output.starts_with(" New goal"), "{output}");
        assert!(output.contains("name"), "{output}");
        assert!(output.contains("max"), "{output}");
    }
}
