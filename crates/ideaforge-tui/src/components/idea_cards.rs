use crossterm::event::{KeyCode, KeyEvent};
use ideaforge_core::Idea;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Side-by-side cards, one per idea, in the order the gateway returned them.
#[derive(Debug, Default)]
pub struct IdeaCards {
    selected: usize,
    scroll: u16,
}

impl IdeaCards {
    pub fn reset(&mut self) {
        self.selected = 0;
        self.scroll = 0;
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn handle_key(&mut self, key: KeyEvent, count: usize) {
        match key.code {
            KeyCode::Char('h') | KeyCode::Left => {
                if self.selected > 0 {
                    self.selected -= 1;
                    self.scroll = 0;
                }
            }
            KeyCode::Char('l') | KeyCode::Right => {
                if self.selected + 1 < count {
                    self.selected += 1;
                    self.scroll = 0;
                }
            }
            KeyCode::Char('j') | KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Char('g') => self.scroll = 0,
            _ => {}
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, ideas: &[Idea], focused: bool) {
        if ideas.is_empty() {
            return;
        }

        let count = u32::try_from(ideas.len()).unwrap_or(u32::MAX);
        let constraints: Vec<Constraint> = ideas.iter().map(|_| Constraint::Ratio(1, count)).collect();
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (i, (idea, chunk)) in ideas.iter().zip(chunks.iter()).enumerate() {
            let is_selected = i == self.selected;
            let border_style = match (is_selected, focused) {
                (true, true) => Style::default().fg(Color::Cyan),
                (true, false) => Style::default().fg(Color::Gray),
                _ => Style::default().fg(Color::DarkGray),
            };
            let block = Block::default()
                .title(format!(" {}. {} ", i + 1, idea.title))
                .borders(Borders::ALL)
                .border_style(border_style);
            let scroll = if is_selected { self.scroll } else { 0 };
            let card = Paragraph::new(card_lines(idea))
                .block(block)
                .wrap(Wrap { trim: false })
                .scroll((scroll, 0));
            frame.render_widget(card, *chunk);
        }
    }
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::Yellow).bold(),
    ))
}

fn bullet(text: &str) -> Line<'_> {
    Line::from(format!("  • {text}"))
}

/// Text content of one card.
pub(crate) fn card_lines(idea: &Idea) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(Span::styled(
            idea.tagline.as_str(),
            Style::default().italic().fg(Color::Gray),
        )),
        Line::default(),
        heading("Problem"),
        Line::from(idea.problem.as_str()),
        Line::default(),
        heading("Solution"),
        Line::from(idea.solution.as_str()),
        Line::default(),
        heading("Features"),
    ];
    lines.extend(idea.features.iter().map(|f| bullet(f)));

    lines.push(Line::default());
    lines.push(heading("Tech stack"));
    lines.push(Line::from(idea.tech_stack.join(", ")));

    lines.push(Line::default());
    lines.push(heading("Architecture"));
    // Diagrams rely on alignment, keep them monospaced and unstyled
    lines.extend(idea.architecture.lines().map(Line::raw));

    lines.push(Line::default());
    lines.push(heading("Roadmap"));
    for phase in &idea.roadmap {
        lines.push(Line::from(Span::styled(
            phase.phase.as_str(),
            Style::default().bold(),
        )));
        lines.extend(phase.tasks.iter().map(|t| bullet(t)));
    }

    let f = idea.feasibility;
    lines.push(Line::default());
    lines.push(heading("Feasibility"));
    lines.push(Line::from(format!(
        "Technical {}/10  Market fit {}/10  Time {} days",
        f.technical, f.market_fit, f.time_days
    )));

    lines.push(Line::default());
    lines.push(heading("Persona"));
    lines.push(Line::from(idea.persona.as_str()));
    lines.push(Line::default());
    lines.push(heading("Monetization"));
    lines.push(Line::from(idea.monetization.as_str()));

    lines.push(Line::default());
    lines.push(heading("Task breakdown"));
    for package in &idea.task_breakdown {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ({}h)", package.area, package.estimated_hours),
                Style::default().fg(Color::Magenta),
            ),
            Span::raw(format!(" {}", package.tasks.join(", "))),
        ]));
    }
    lines.push(Line::from(Span::styled(
        format!("Total: {}h", idea.total_estimated_hours()),
        Style::default().bold(),
    )));

    lines
}
