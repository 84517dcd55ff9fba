//! Interactive chat over one analyzed statement. The assistant sees the
//! pipeline summary as context; when it is unreachable the loop falls back
//! to deterministic replies computed from the same aggregates.

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Terminal,
};
use std::io::{self, Stdout};
use std::path::PathBuf;

use spendlens_core::BudgetStatus;

use crate::config;
use crate::llm;
use crate::report::Analysis;
use crate::state;

#[derive(Clone, Debug)]
struct Msg {
    role: Role,
    content: String,
}

#[derive(Clone, Debug)]
enum Role {
    User,
    Assistant,
    System,
}

struct ChatLog {
    path: PathBuf,
}

impl ChatLog {
    fn open_today() -> Result<Self> {
        let home = state::ensure_spendlens_home()?;
        let dir = home.join("chat");
        std::fs::create_dir_all(&dir)?;
        let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
        let path = dir.join(format!("{today}.md"));
        Ok(Self { path })
    }

    fn append_system(&mut self, msg: &str) -> Result<()> {
        self.append("system", msg)
    }

    fn append_user(&mut self, msg: &str) -> Result<()> {
        self.append("user", msg)
    }

    fn append_assistant(&mut self, msg: &str) -> Result<()> {
        self.append("assistant", msg)
    }

    fn append(&mut self, role: &str, msg: &str) -> Result<()> {
        use std::io::Write;
        let mut f = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(
            f,
            "- {} [{}] {}",
            chrono::Utc::now().to_rfc3339(),
            role,
            msg.replace('\n', " ")
        )?;
        Ok(())
    }
}

pub fn run_chat(analysis: &Analysis) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = chat_loop(&mut terminal, analysis);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

fn chat_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, analysis: &Analysis) -> Result<()> {
    let cfg = config::load_config()?;
    let system = system_prompt(analysis);

    let mut messages: Vec<Msg> = vec![Msg {
        role: Role::Assistant,
        content: "Hi — I've read your statement. Ask me anything about your spending.".to_string(),
    }];

    let mut input = String::new();
    let mut show_help = true;

    // daily log file
    let mut log = ChatLog::open_today()?;
    log.append_system("session_start")?;

    loop {
        let metrics_line = format!(
            "income {:.2} | expense {:.2} | balance {:.2}",
            analysis.aggregates.total_income,
            analysis.aggregates.total_expense,
            analysis.aggregates.balance,
        );

        terminal.draw(|f| {
            let size = f.area();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(5),
                    Constraint::Min(5),
                    Constraint::Length(3),
                ])
                .split(size);

            let splash = Paragraph::new(Text::from(vec![
                Line::from(Span::styled(
                    "Spendlens",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    metrics_line.clone(),
                    Style::default().fg(Color::Cyan),
                )),
                Line::from(Span::styled(
                    "type /help or ? for shortcuts",
                    Style::default().fg(Color::Gray),
                )),
            ]))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(splash, chunks[0]);

            let header = Block::default().borders(Borders::ALL).title("conversation");

            let mut lines: Vec<Line> = Vec::new();
            if show_help {
                lines.push(Line::from(Span::styled(
                    "Shortcuts: Enter=send, q=quit, ?=help",
                    Style::default().fg(Color::Gray),
                )));
                lines.push(Line::raw("Commands: /help /summary /advice /months"));
                lines.push(Line::raw(""));
            }

            for m in &messages {
                let (tag, color) = match m.role {
                    Role::User => ("you", Color::Cyan),
                    Role::Assistant => ("spendlens", Color::Magenta),
                    Role::System => ("system", Color::Gray),
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("{}: ", tag), Style::default().fg(color)),
                    Span::raw(m.content.clone()),
                ]));
                lines.push(Line::raw(""));
            }

            let history = Paragraph::new(Text::from(lines))
                .block(header)
                .wrap(Wrap { trim: false });
            f.render_widget(history, chunks[1]);

            let input_block = Block::default().borders(Borders::ALL).title("question");
            let input_widget = Paragraph::new(input.as_str())
                .block(input_block)
                .style(Style::default().fg(Color::White));
            f.render_widget(input_widget, chunks[2]);
        })?;

        if event::poll(std::time::Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char('?') => {
                        show_help = !show_help;
                    }
                    KeyCode::Enter => {
                        let trimmed = input.trim().to_string();
                        if !trimmed.is_empty() {
                            log.append_user(&trimmed)?;

                            if let Some(reply) = handle_slash(analysis, &trimmed) {
                                messages.push(Msg {
                                    role: Role::Assistant,
                                    content: reply.clone(),
                                });
                                log.append_assistant(&reply)?;
                            } else {
                                messages.push(Msg {
                                    role: Role::User,
                                    content: trimmed.clone(),
                                });

                                // Ask the configured assistant; fall back to a
                                // deterministic reply computed from the aggregates.
                                let turns =
                                    to_llm_turns(&messages, cfg.chat.max_turns_context);
                                let reply = match llm::chat_complete(
                                    &cfg.assistant,
                                    &system,
                                    &turns,
                                ) {
                                    Ok(s) if !s.trim().is_empty() => s,
                                    _ => local_reply(analysis, &trimmed),
                                };

                                messages.push(Msg {
                                    role: Role::Assistant,
                                    content: reply.clone(),
                                });
                                log.append_assistant(&reply)?;
                            }
                        }
                        input.clear();
                    }
                    KeyCode::Backspace => {
                        input.pop();
                    }
                    KeyCode::Char(c) => {
                        input.push(c);
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

fn handle_slash(analysis: &Analysis, input: &str) -> Option<String> {
    let s = input.trim();
    if !s.starts_with('/') {
        return None;
    }
    match s {
        "/help" => Some(
            "Commands:\n\
- /help\n\
- /summary (the brief sent to the assistant)\n\
- /advice (top-category guidance)\n\
- /months (per-month overspending check)\n\
\nShortcuts: Enter=send, q=quit, ?=toggle help"
                .to_string(),
        ),
        "/summary" => Some(analysis.summary.clone()),
        "/advice" => {
            if analysis.advice.is_empty() {
                Some("No expense categories yet — nothing to advise on.".to_string())
            } else {
                Some(analysis.advice.join("\n"))
            }
        }
        "/months" => Some(months_reply(analysis)),
        _ => Some("Unknown command. Try /help".to_string()),
    }
}

fn months_reply(analysis: &Analysis) -> String {
    if analysis.assessments.is_empty() {
        return "No expense months in this statement.".to_string();
    }
    analysis
        .assessments
        .iter()
        .map(|a| format!("{}  {:.2}  {}", a.month, a.expense, a.status))
        .collect::<Vec<_>>()
        .join("\n")
}

fn to_llm_turns(messages: &[Msg], max_turns: usize) -> Vec<llm::ChatTurn> {
    let mut turns = Vec::new();

    // Include only recent conversation to keep it fast.
    let start = messages.len().saturating_sub(max_turns);
    for m in &messages[start..] {
        match m.role {
            Role::User => turns.push(llm::ChatTurn {
                role: "user".to_string(),
                content: m.content.clone(),
            }),
            Role::Assistant => turns.push(llm::ChatTurn {
                role: "assistant".to_string(),
                content: m.content.clone(),
            }),
            Role::System => {}
        }
    }

    turns
}

fn system_prompt(analysis: &Analysis) -> String {
    format!(
        "{}\nThe user's statement has already been analyzed. Summary:\n{}",
        llm::SYSTEM_PROMPT,
        analysis.summary
    )
}

/// Deterministic reply when no assistant is reachable: answer from the
/// aggregates that were computed regardless.
fn local_reply(analysis: &Analysis, user: &str) -> String {
    let u = user.to_lowercase();
    let agg = &analysis.aggregates;

    if u.contains("income") {
        return format!("Your total income for this statement is {:.2}.", agg.total_income);
    }

    if u.contains("spend") || u.contains("expense") {
        return match analysis.top.first() {
            Some(top) => format!(
                "Total expenses are {:.2}; the biggest category is {} at {:.2}.",
                agg.total_expense, top.category, top.total
            ),
            None => "No expenses found in this statement.".to_string(),
        };
    }

    if u.contains("month") || u.contains("overspend") {
        let risky: Vec<String> = analysis
            .assessments
            .iter()
            .filter(|a| a.status == BudgetStatus::AtRisk)
            .map(|a| a.month.to_string())
            .collect();
        return if risky.is_empty() {
            "Every month in this statement is within budget.".to_string()
        } else {
            format!("Months at risk of overspending: {}.", risky.join(", "))
        };
    }

    format!(
        "Your balance is {:.2}. Ask about income, expenses, or months — or /summary for the brief.",
        agg.balance
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use spendlens_core::Transaction;

    fn analysis() -> Analysis {
        let d = |m, day| NaiveDate::from_ymd_opt(2024, m, day).unwrap();
        Analysis::from_ledger(vec![
            Transaction::new(d(1, 3), "Salary credit", 50000.0),
            Transaction::new(d(1, 5), "Zomato order", -450.0),
        ])
    }

    #[test]
    fn test_local_reply_income() {
        let reply = local_reply(&analysis(), "what is my income?");
        assert!(reply.contains("50000.00"));
    }

    #[test]
    fn test_local_reply_expenses_names_top_category() {
        let reply = local_reply(&analysis(), "where do I spend the most?");
        assert!(reply.contains("Food"));
    }

    #[test]
    fn test_slash_summary_returns_brief() {
        let a = analysis();
        let reply = handle_slash(&a, "/summary").unwrap();
        assert_eq!(reply, a.summary);
        assert!(handle_slash(&a, "not a command").is_none());
    }
}
