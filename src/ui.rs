use crate::controller::{ExportFile, Host, ViewController};
use crate::error::Result;
use crate::view::{Focus, JournalView};
use async_trait::async_trait;
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::{
    fs,
    io::{stdout, Stdout},
    path::PathBuf,
};
use tracing::debug;

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    events: EventStream,
    export_dir: PathBuf,
}

impl Tui {
    pub fn new(export_dir: PathBuf) -> Result<Self> {
        enable_raw_mode()?;
        let terminal = or_restore(Self::enter(), restore_terminal)?;

        Ok(Tui {
            terminal,
            events: EventStream::new(),
            export_dir,
        })
    }

    fn enter() -> std::io::Result<Terminal<CrosstermBackend<Stdout>>> {
        stdout().execute(EnterAlternateScreen)?;
        Terminal::new(CrosstermBackend::new(stdout()))
    }

    pub fn draw(&mut self, view: &JournalView) -> Result<()> {
        self.terminal.draw(|f| render(f, view))?;
        Ok(())
    }

    /// Runs the event loop until the user quits or the input stream ends.
    pub async fn run(&mut self, controller: &mut ViewController) -> Result<()> {
        loop {
            self.draw(controller.view())?;

            let Some(event) = self.events.next().await else {
                break;
            };
            if let Event::Key(key) = event? {
                if !controller.handle_key(key, self).await? {
                    break;
                }
            }
        }
        Ok(())
    }

    async fn next_key_press(&mut self) -> Result<Option<KeyEvent>> {
        while let Some(event) = self.events.next().await {
            if let Event::Key(key) = event? {
                if key.kind == KeyEventKind::Press {
                    return Ok(Some(key));
                }
            }
        }
        Ok(None)
    }

    fn draw_dialog(&mut self, title: &str, message: &str, hint: &str) -> Result<()> {
        self.terminal.draw(|f| {
            let area = centered(f.area(), 60, 7);
            let text = vec![
                Line::from(message.to_string()),
                Line::from(""),
                Line::from(Span::styled(
                    hint.to_string(),
                    Style::default().fg(Color::Yellow),
                )),
            ];
            let dialog = Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(title.to_string())
                        .border_style(Style::default().fg(Color::Cyan)),
                );
            f.render_widget(Clear, area);
            f.render_widget(dialog, area);
        })?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl Host for Tui {
    async fn confirm(&mut self, message: &str) -> Result<bool> {
        loop {
            self.draw_dialog("Confirm", message, "y / Enter: Yes, n / Esc: No")?;
            let Some(key) = self.next_key_press().await? else {
                return Ok(false);
            };
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => return Ok(true),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return Ok(false),
                _ => {}
            }
        }
    }

    async fn alert(&mut self, message: &str) -> Result<()> {
        self.draw_dialog("Notice", message, "Press any key")?;
        self.next_key_press().await?;
        Ok(())
    }

    fn download(&mut self, file: &ExportFile) -> Result<PathBuf> {
        fs::create_dir_all(&self.export_dir)?;
        let path = self.export_dir.join(file.filename);
        debug!(mime = file.mime, bytes = file.contents.len(), "writing export");
        fs::write(&path, &file.contents)?;
        Ok(path)
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);
}

/// Runs `restore` when terminal setup fails, since `Drop` never runs for a
/// `Tui` that was not built.
fn or_restore<T>(result: std::io::Result<T>, restore: impl FnOnce()) -> std::io::Result<T> {
    if result.is_err() {
        restore();
    }
    result
}

pub fn render(f: &mut Frame, view: &JournalView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let title = Paragraph::new("Devlog")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let textarea = Paragraph::new(view.textarea.value())
        .block(focus_block("New entry", view.focus == Focus::Textarea));
    f.render_widget(textarea, chunks[1]);

    let search = Paragraph::new(view.search.value())
        .block(focus_block("Search", view.focus == Focus::Search));
    f.render_widget(search, chunks[2]);

    let items: Vec<ListItem> = view
        .visible_rows()
        .map(|(_, row)| {
            let mut lines: Vec<Line> = row
                .content
                .lines()
                .map(|l| Line::from(l.to_string()))
                .collect();
            let delete = Span::styled("  [del]", Style::default().fg(Color::DarkGray));
            match lines.first_mut() {
                Some(first) => first.spans.push(delete),
                None => lines.push(Line::from(delete)),
            }
            ListItem::new(lines)
        })
        .collect();

    let entries_list = List::new(items)
        .block(focus_block("Entries", view.focus == Focus::List))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    let selected = match view.focus {
        Focus::List => view.selected_position(),
        _ => None,
    };
    f.render_stateful_widget(
        entries_list,
        chunks[3],
        &mut ListState::default().with_selected(selected),
    );

    f.render_widget(Paragraph::new(view.count_text.as_str()), chunks[4]);

    let notice = if view.no_results {
        Line::from(Span::styled(
            "No matching entries found.",
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::from(view.status.clone().unwrap_or_default())
    };
    f.render_widget(Paragraph::new(notice), chunks[5]);

    let controls = Line::from(vec![
        Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" focus, "),
        Span::styled("Ctrl+Enter", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("/"),
        Span::styled("Ctrl+S", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" save, "),
        Span::styled("Del", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" delete, "),
        Span::styled("Ctrl+E", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" download, "),
        Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" quit"),
    ]);
    let controls_paragraph = Paragraph::new(controls)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    f.render_widget(controls_paragraph, chunks[6]);

    let cursor = match view.focus {
        Focus::Textarea => Some((chunks[1], view.textarea.cursor_position())),
        Focus::Search => Some((chunks[2], view.search.cursor_position())),
        Focus::List => None,
    };
    if let Some((area, (row, col))) = cursor {
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(col)
            .min(area.right().saturating_sub(2));
        let y = area
            .y
            .saturating_add(1)
            .saturating_add(row)
            .min(area.bottom().saturating_sub(2));
        f.set_cursor_position((x, y));
    }
}

fn focus_block(title: &str, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .border_style(style)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
