// UI rendering logic
use std::borrow::Cow;

use crate::app::{App, InputMode, Section};
use folio_core::contact::{Field, MESSAGE_MAX_CHARS, SERVICE_TYPES};
use folio_core::Project;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

const ACCENT: Color = Color::Cyan;
const MUTED: Color = Color::Gray;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Section tabs
            Constraint::Min(5),    // Section body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_section_tabs(frame, app, chunks[0]);

    match app.section {
        Section::About => render_about(frame, app, chunks[1]),
        Section::Services => render_services(frame, app, chunks[1]),
        Section::Projects => render_projects(frame, app, chunks[1]),
        Section::Activity => render_activity(frame, app, chunks[1]),
        Section::Skills => render_skills(frame, app, chunks[1]),
        Section::Education => render_education(frame, app, chunks[1]),
        Section::Resume => render_resume(frame, app, chunks[1]),
        Section::Contact => render_contact(frame, app, chunks[1]),
    }

    if app.show_detail {
        if let Some(project) = app.selected_project() {
            let area = frame.area();
            render_detail_modal(frame, project, area);
        }
    }

    render_status_bar(frame, app, chunks[2]);
}

fn render_section_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Section::ALL
        .iter()
        .enumerate()
        .map(|(i, section)| Line::from(format!("{} {}", i + 1, section.title())))
        .collect();

    let title = if app.loading {
        format!("{} · loading GitHub projects…", app.profile.hero.name)
    } else {
        app.profile.hero.name.clone()
    };

    let tabs = Tabs::new(titles)
        .select(app.section.index())
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));

    frame.render_widget(tabs, area);
}

/// Bordered, wrapped, scrollable paragraph used by the plain text sections
fn render_text(frame: &mut Frame, app: &App, title: &str, lines: Vec<Line>, area: Rect) {
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .border_style(Style::default().fg(ACCENT)),
        )
        .wrap(Wrap { trim: true })
        .scroll((app.scroll, 0));

    frame.render_widget(paragraph, area);
}

fn heading(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ))
}

fn muted<'a>(text: impl Into<Cow<'a, str>>) -> Line<'a> {
    Line::from(Span::styled(text, Style::default().fg(MUTED)))
}

fn tags_line(tags: &[String]) -> Line<'_> {
    let mut spans = Vec::new();
    for (i, tag) in tags.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!("[{}]", tag),
            Style::default().fg(Color::Magenta),
        ));
    }
    Line::from(spans)
}

fn render_about(frame: &mut Frame, app: &App, area: Rect) {
    let hero = &app.profile.hero;
    let mut lines = vec![
        Line::from(vec![
            Span::raw("Hi, I'm "),
            Span::styled(
                &hero.name,
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            &hero.title,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(hero.description.as_str()),
        Line::from(""),
    ];

    if let Some(image) = &hero.image_url {
        lines.push(muted(image));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Press 3 for projects, 8 to get in touch",
        Style::default().fg(Color::Yellow),
    )));
    if let Some(footer) = &app.profile.footer {
        lines.push(Line::from(""));
        lines.push(muted(footer));
    }

    render_text(frame, app, "About", lines, area);
}

fn render_services(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    for service in &app.profile.services {
        lines.push(heading(&service.title));
        lines.push(Line::from(service.description.as_str()));
        lines.push(tags_line(&service.tags));
        lines.push(Line::from(""));
    }
    render_text(frame, app, "Services", lines, area);
}

fn render_skills(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    for group in &app.profile.skills {
        lines.push(heading(&group.name));
        for item in &group.items {
            lines.push(Line::from(format!("  • {}", item)));
        }
        lines.push(Line::from(""));
    }
    render_text(frame, app, "Skills", lines, area);
}

fn render_education(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    for entry in &app.profile.education {
        lines.push(heading(&entry.degree));
        lines.push(Line::from(entry.school.as_str()));
        if let Some(expected) = &entry.expected {
            lines.push(muted(expected));
        }
        if !entry.coursework.is_empty() {
            lines.push(Line::from(format!("Coursework: {}", entry.coursework.join(", "))));
        }
        for honor in &entry.honors {
            lines.push(Line::from(Span::styled(
                format!("  ★ {}", honor),
                Style::default().fg(Color::Yellow),
            )));
        }
        lines.push(Line::from(""));
    }
    render_text(frame, app, "Education", lines, area);
}

fn render_resume(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    for entry in &app.profile.resume {
        lines.push(Line::from(vec![
            Span::styled(
                &entry.role,
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", entry.period), Style::default().fg(MUTED)),
        ]));
        lines.push(Line::from(entry.organization.as_str()));
        for highlight in &entry.highlights {
            lines.push(Line::from(format!("  • {}", highlight)));
        }
        lines.push(Line::from(""));
    }
    if let Some(pdf) = &app.profile.contact.resume_pdf {
        lines.push(muted(format!("Full resume: {}", pdf)));
    }
    render_text(frame, app, "Resume", lines, area);
}

fn render_activity(frame: &mut Frame, app: &App, area: Rect) {
    let summary = &app.activity;
    let links = &app.links;

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Repositories: ", Style::default().fg(MUTED)),
            Span::styled(summary.repo_count.to_string(), Style::default().fg(Color::Green)),
            Span::styled("  •  ", Style::default().fg(MUTED)),
            Span::styled("Stars: ", Style::default().fg(MUTED)),
            Span::styled(
                format_number(summary.total_stars),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(""),
    ];

    if summary.languages.is_empty() {
        let text = if app.loading {
            "Waiting for GitHub…"
        } else {
            "No GitHub projects loaded"
        };
        lines.push(muted(text));
    } else {
        lines.push(heading("Top languages"));
        let widest = summary.languages.first().map_or(1, |(_, n)| *n).max(1);
        for (language, count) in &summary.languages {
            let bar = "█".repeat(count * 20 / widest);
            lines.push(Line::from(vec![
                Span::raw(format!("  {:<12} ", language)),
                Span::styled(bar, Style::default().fg(Color::Green)),
                Span::styled(format!(" {}", count), Style::default().fg(MUTED)),
            ]));
        }
    }

    if let Some(latest) = &summary.latest {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Last updated: ", Style::default().fg(MUTED)),
            Span::raw(latest.title.clone()),
            Span::styled(
                format!(" ({})", latest.updated_at.format("%b %-d, %Y")),
                Style::default().fg(MUTED),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(heading("Links"));
    for (label, url) in [
        ("Profile", &links.profile),
        ("Contributions", &links.contributions),
        ("Contribution chart", &links.contribution_chart),
        ("Streak stats", &links.streak_card),
        ("Readme stats", &links.stats_card),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}: ", label), Style::default().fg(MUTED)),
            Span::raw(url.clone()),
        ]));
    }

    render_text(frame, app, "GitHub Activity", lines, area);
}

fn render_projects(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Category tabs
            Constraint::Length(3), // Search input
            Constraint::Min(6),    // Cards
            Constraint::Length(1), // Page indicator
        ])
        .split(area);

    let categories = app.gallery.categories();
    let selected = categories
        .iter()
        .position(|c| *c == app.gallery.filter())
        .unwrap_or(0);
    let tabs = Tabs::new(
        categories
            .iter()
            .map(|c| Line::from(c.label()))
            .collect::<Vec<_>>(),
    )
    .select(selected)
    .block(Block::default().borders(Borders::ALL).title("Categories ([ / ])"))
    .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, chunks[0]);

    render_search_input(frame, app, chunks[1]);
    render_cards(frame, app, chunks[2]);

    let indicator = Line::from(vec![
        Span::styled(
            format!("Page {} of {}", app.gallery.page(), app.gallery.total_pages()),
            Style::default().fg(ACCENT),
        ),
        Span::styled(
            format!("  ·  {} projects", app.gallery.visible().len()),
            Style::default().fg(MUTED),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(indicator).alignment(ratatui::layout::Alignment::Center),
        chunks[3],
    );
}

fn render_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let searching = app.input_mode == InputMode::Searching;
    let input_style = if searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let text = if searching {
        app.search_input.as_str()
    } else {
        app.gallery.search()
    };

    let input = Paragraph::new(text).style(input_style).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Search (/ to type, ESC to clear)")
            .border_style(input_style),
    );
    frame.render_widget(input, area);

    if searching {
        frame.set_cursor_position((
            area.x + app.search_input.chars().count() as u16 + 1,
            area.y + 1,
        ));
    }
}

fn render_cards(frame: &mut Frame, app: &App, area: Rect) {
    let items = app.gallery.page_items();

    if items.is_empty() {
        let message = if app.loading {
            "Loading projects…"
        } else {
            "No projects match the current filters"
        };
        let empty = Paragraph::new(muted(message))
            .alignment(ratatui::layout::Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    // Narrow terminals get two columns
    let (rows, cols) = if area.width < 90 { (3u32, 2u32) } else { (2, 3) };

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows); rows as usize])
        .split(area);

    let cells: Vec<Rect> = row_areas
        .iter()
        .flat_map(|row| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, cols); cols as usize])
                .split(*row)
                .to_vec()
        })
        .collect();

    for (i, (project, cell)) in items.iter().zip(cells).enumerate() {
        render_card(frame, project, i == app.selected, cell);
    }
}

fn render_card(frame: &mut Frame, project: &Project, selected: bool, area: Rect) {
    let border = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut lines = vec![Line::from(Span::styled(
        project.category.label(),
        Style::default().fg(Color::Magenta),
    ))];

    if !project.description.is_empty() {
        lines.push(Line::from(Span::styled(
            project.description.as_str(),
            Style::default().fg(MUTED),
        )));
    }
    lines.push(Line::from(Span::styled(
        project.technologies.join(" · "),
        Style::default().fg(ACCENT),
    )));

    let mut footer = Vec::new();
    if let Some(stars) = project.stars {
        footer.push(Span::styled(
            format!("★ {}  ", format_number(stars)),
            Style::default().fg(Color::Yellow),
        ));
    }
    if project.github_url.is_some() {
        footer.push(Span::styled("[o] code  ", Style::default().fg(Color::Green)));
    }
    if project.demo_url.is_some() {
        footer.push(Span::styled("[d] demo", Style::default().fg(Color::Green)));
    }
    lines.push(Line::from(footer));

    let card = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(project.title.as_str())
                .border_style(border),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(card, area);
}

fn render_detail_modal(frame: &mut Frame, project: &Project, area: Rect) {
    let popup = centered_rect(70, 60, area);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                project.title.as_str(),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} · {}", project.category, project.source),
                Style::default().fg(MUTED),
            ),
        ]),
        Line::from(""),
    ];

    if !project.description.is_empty() {
        lines.push(Line::from(project.description.as_str()));
        lines.push(Line::from(""));
    }
    if !project.technologies.is_empty() {
        lines.push(tags_line(&project.technologies));
        lines.push(Line::from(""));
    }
    if let Some(stars) = project.stars {
        lines.push(Line::from(format!("★ {} stars", stars)));
    }
    if let Some(updated) = project.updated_at {
        lines.push(muted(format!("Updated {}", updated.format("%b %-d, %Y"))));
    }
    if !project.image.is_empty() {
        lines.push(muted(format!("Preview: {}", project.image)));
    }

    lines.push(Line::from(""));
    if let Some(url) = &project.github_url {
        lines.push(Line::from(vec![
            Span::styled("[o] View code  ", Style::default().fg(Color::Green)),
            Span::raw(url.as_str()),
        ]));
    }
    if let Some(url) = &project.demo_url {
        lines.push(Line::from(vec![
            Span::styled("[d] Live demo  ", Style::default().fg(Color::Green)),
            Span::raw(url.as_str()),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Project (ESC to close)")
                .border_style(Style::default().fg(Color::Yellow))
                .style(Style::default().bg(Color::Black)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

fn render_contact(frame: &mut Frame, app: &App, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let contact = &app.profile.contact;
    let mut info = vec![Line::from(contact.blurb.as_str()), Line::from("")];
    for link in &contact.links {
        info.push(Line::from(vec![
            Span::styled(format!("{}: ", link.label), Style::default().fg(ACCENT)),
            Span::raw(link.url.as_str()),
        ]));
    }
    if let Some(pdf) = &contact.resume_pdf {
        info.push(Line::from(""));
        info.push(muted(format!("Resume: {}", pdf)));
    }
    render_text(frame, app, "Get in touch", info, halves[0]);

    let editing = app.input_mode == InputMode::Contact;
    let mut lines = Vec::new();
    for (i, field) in Field::ALL.iter().enumerate() {
        let current = editing && i == app.contact_field;
        let label_style = if current {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(MUTED)
        };

        let value = match field {
            Field::ServiceType => SERVICE_TYPES
                .iter()
                .find(|(value, _)| *value == app.contact.service_type)
                .map(|(_, label)| label.to_string())
                .unwrap_or_else(|| "(space to choose)".to_string()),
            Field::Message => format!(
                "{}  ({}/{})",
                app.contact.message,
                app.contact.message.chars().count(),
                MESSAGE_MAX_CHARS
            ),
            other => app.contact.field(*other).to_string(),
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{:<8} ", field.label()), label_style),
            Span::raw(value),
            Span::styled(if current { "▏" } else { "" }, Style::default().fg(Color::Yellow)),
        ]));
        if let Some(error) = app.error_for(*field) {
            lines.push(Line::from(Span::styled(
                format!("         {}", error),
                Style::default().fg(Color::Red),
            )));
        }
    }

    lines.push(Line::from(""));
    if let Some(status) = &app.status_message {
        lines.push(Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(Color::Green),
        )));
    }

    let title = if editing {
        "Message (TAB: next field, ENTER: send, ESC: stop editing)"
    } else {
        "Message (i to start typing)"
    };
    let form = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(if editing {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(ACCENT)
                }),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(form, halves[1]);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = if let Some(error) = &app.error_message {
        Span::styled(error.as_str(), Style::default().fg(Color::Red))
    } else {
        match app.input_mode {
            InputMode::Searching => Span::styled(
                "SEARCH | type to filter | ENTER/ESC: done",
                Style::default().fg(Color::Yellow),
            ),
            InputMode::Contact => Span::styled(
                "CONTACT | TAB/↑↓: field | SPACE: service | ENTER: send | ESC: stop",
                Style::default().fg(Color::Yellow),
            ),
            InputMode::Normal if app.show_detail => Span::styled(
                "o: open code | d: open demo | ESC: close",
                Style::default().fg(ACCENT),
            ),
            InputMode::Normal if app.section == Section::Projects => Span::raw(
                "1-8/TAB: sections | [ ]: category | h/l: card | n/p: page | /: search | ENTER: details | o/d: open | q: quit",
            ),
            InputMode::Normal => Span::raw("1-8/TAB: sections | j/k: scroll | q: quit"),
        }
    };

    frame.render_widget(Paragraph::new(Line::from(status)), area);
}

/// Rect of `percent_x` by `percent_y` centered in `area`
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn format_number(num: u32) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}k", num as f64 / 1_000.0)
    } else {
        num.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::Profile;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_every_section_renders() {
        let mut app = App::new(Profile::bundled().unwrap(), "sdnssr1").unwrap();
        for section in Section::ALL {
            app.select_section(section);
            let screen = draw(&app);
            assert!(screen.contains(section.title()));
        }
    }

    #[test]
    fn test_projects_show_cards_and_page_indicator() {
        let mut app = App::new(Profile::bundled().unwrap(), "sdnssr1").unwrap();
        app.select_section(Section::Projects);
        app.open_detail();
        let screen = draw(&app);
        assert!(screen.contains("Hannah Loaa"));
        assert!(screen.contains("Page 1 of 2"));
        assert!(screen.contains("Live demo"));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_500), "1.5k");
        assert_eq!(format_number(2_000_000), "2.0M");
    }
}
