use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ideaforge_service::IdeaService;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tokio::runtime::Runtime;

use crate::components::idea_cards::IdeaCards;
use crate::controller::{Completion, GenerationState, Notice, ResultsView};
use crate::form::{Field, FormAction, ProjectForm};

/// Which half of the screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form,
    Results,
}

pub struct App {
    service: Arc<dyn IdeaService>,
    runtime: Runtime,
    form: ProjectForm,
    generation: GenerationState,
    cards: IdeaCards,
    focus: Focus,
    completions_tx: Sender<Completion>,
    completions_rx: Receiver<Completion>,
    status_message: Option<Notice>,
}

impl App {
    pub fn new(service: Arc<dyn IdeaService>) -> Result<Self> {
        let (completions_tx, completions_rx) = mpsc::channel();
        Ok(Self {
            service,
            runtime: Runtime::new()?,
            form: ProjectForm::default(),
            generation: GenerationState::default(),
            cards: IdeaCards::default(),
            focus: Focus::Form,
            completions_tx,
            completions_rx,
            status_message: None,
        })
    }

    /// Block until the gateway answers its health check.
    pub fn wait_for_server(&self, timeout: Duration) -> Result<()> {
        let start = Instant::now();
        loop {
            if self.runtime.block_on(self.service.health_check()).is_ok() {
                return Ok(());
            }
            if start.elapsed() > timeout {
                bail!(
                    "ideaforge-server did not become ready within {}s",
                    timeout.as_secs()
                );
            }
            thread::sleep(Duration::from_millis(50));
        }
    }

    pub fn form(&self) -> &ProjectForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProjectForm {
        &mut self.form
    }

    pub fn generation(&self) -> &GenerationState {
        &self.generation
    }

    pub fn cards(&self) -> &IdeaCards {
        &self.cards
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn status_message(&self) -> Option<&Notice> {
        self.status_message.as_ref()
    }

    pub fn is_input_mode(&self) -> bool {
        self.focus == Focus::Form && self.form.focus().is_text()
    }

    pub fn needs_polling(&self) -> bool {
        self.generation.is_loading()
    }

    /// Send the form to the gateway. The reply arrives through
    /// [`App::poll_generation`].
    pub fn generate(&mut self) {
        let request = self.form.to_request();
        let seq = self.generation.begin();
        self.cards.reset();
        self.focus = Focus::Form;

        let service = Arc::clone(&self.service);
        let tx = self.completions_tx.clone();
        self.runtime.spawn(async move {
            let result = service.generate_ideas(&request).await;
            // Receiver only goes away when the app is dropped
            let _ = tx.send(Completion { seq, result });
        });
    }

    /// Drain finished requests. Returns how many arrived, stale ones included.
    pub fn poll_generation(&mut self) -> usize {
        let mut received = 0;
        while let Ok(completion) = self.completions_rx.try_recv() {
            received += 1;
            if self.generation.complete(completion) {
                self.cards.reset();
                self.status_message = self.generation.latest_notice().cloned();
            }
        }
        received
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.status_message = None;

        if key.code == KeyCode::Char('g') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.generate();
            return;
        }

        if key.code == KeyCode::Esc {
            self.focus = match self.focus {
                Focus::Form if !self.generation.results().is_empty() => Focus::Results,
                _ => Focus::Form,
            };
            return;
        }

        match self.focus {
            Focus::Form => {
                if self.form.handle_key(key) == FormAction::Submit {
                    self.generate();
                }
            }
            Focus::Results => {
                let count = self.generation.results().len();
                self.cards.handle_key(key, count);
            }
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(44), Constraint::Min(0)])
            .split(layout[1]);

        self.render_title_bar(frame, layout[0]);
        self.render_form(frame, body[0]);
        self.render_results(frame, body[1]);
        self.render_status_bar(frame, layout[2]);
    }

    fn render_title_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(" ideaforge ", Style::default().bold().fg(Color::Cyan)),
            Span::raw("| "),
            Span::styled(
                self.form.mode.display_name(),
                Style::default().fg(Color::Yellow),
            ),
        ];
        if self.generation.is_loading() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                "generating...",
                Style::default().fg(Color::Magenta),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focus == Focus::Form {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .title(" Project ")
            .borders(Borders::ALL)
            .border_style(border_style);

        let mut lines = Vec::new();
        for field in Field::ALL {
            let focused = self.focus == Focus::Form && self.form.focus() == *field;
            let marker = if focused { "> " } else { "  " };
            if *field == Field::Submit {
                lines.push(Line::default());
                let style = if focused {
                    Style::default().fg(Color::Black).bg(Color::Cyan).bold()
                } else {
                    Style::default().fg(Color::Cyan)
                };
                lines.push(Line::from(vec![
                    Span::raw(marker),
                    Span::styled(format!("[ {} ]", field.label()), style),
                ]));
                continue;
            }

            let value = self.form.value(*field);
            let shown = if field.is_text() {
                if focused {
                    format!("{value}_")
                } else {
                    value.to_string()
                }
            } else {
                format!("< {value} >")
            };
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(
                    format!("{:<15}", field.label()),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(shown),
            ]));
        }

        let form = Paragraph::new(lines).block(block);
        frame.render_widget(form, area);
    }

    fn render_results(&self, frame: &mut Frame, area: Rect) {
        match self.generation.view() {
            ResultsView::Cards => self.cards.render(
                frame,
                area,
                self.generation.results(),
                self.focus == Focus::Results,
            ),
            ResultsView::Generating => {
                let text = vec![
                    Line::default(),
                    Line::from(Span::styled(
                        "Generating ideas...",
                        Style::default().fg(Color::Magenta).bold(),
                    )),
                    Line::from("This can take up to a minute."),
                ];
                let panel = Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL));
                frame.render_widget(panel, area);
            }
            ResultsView::Empty => {
                let text = vec![
                    Line::default(),
                    Line::from(Span::styled(
                        "No ideas yet",
                        Style::default().fg(Color::Cyan).bold(),
                    )),
                    Line::default(),
                    Line::from("Describe what you want to build on the left,"),
                    Line::from("then press Ctrl+G to get three project ideas."),
                ];
                let panel = Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true })
                    .block(Block::default().borders(Borders::ALL));
                frame.render_widget(panel, area);
            }
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        if let Some(ref notice) = self.status_message {
            let color = match notice {
                Notice::Success(_) => Color::Green,
                Notice::Error(_) => Color::Red,
            };
            let line = Line::from(Span::styled(
                format!(" {}", notice.text()),
                Style::default().fg(color),
            ));
            frame.render_widget(line, area);
            return;
        }

        let hints = match self.focus {
            Focus::Form => vec![
                ("Tab", "next"),
                ("←/→", "choose"),
                ("^G", "generate"),
                ("Esc", "cards"),
                ("^C", "quit"),
            ],
            Focus::Results => vec![
                ("h/l", "card"),
                ("j/k", "scroll"),
                ("Esc", "form"),
                ("q", "quit"),
            ],
        };
        let spans: Vec<Span> = hints
            .into_iter()
            .flat_map(|(key, desc)| {
                [
                    Span::styled(
                        format!(" {key}"),
                        Style::default().fg(Color::Yellow).bold(),
                    ),
                    Span::raw(format!(" {desc} ")),
                ]
            })
            .collect();
        frame.render_widget(Line::from(spans), area);
    }
}
