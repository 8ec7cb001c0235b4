//! UI rendering for the romaji quiz.

use crate::app::App;
use crate::models::{Bucket, Card};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Card
            Constraint::Length(3), // Actions
            Constraint::Length(4), // Counts
        ])
        .split(f.area());

    let header = Paragraph::new("Romaji SRS Quiz (By Example)")
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let card_area = match &app.warning {
        Some(warning) => {
            let inner = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(0)])
                .split(chunks[1]);
            let warning = Paragraph::new(warning.as_str())
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL).title(" Warning "))
                .wrap(Wrap { trim: true });
            f.render_widget(warning, inner[0]);
            inner[1]
        }
        None => chunks[1],
    };

    match app.session.current() {
        Some((_, card)) if app.session.is_revealed() => draw_answer(f, card, card_area),
        Some((_, card)) => draw_question(f, card, card_area),
        None => {
            let done = Paragraph::new("No examples to review right now!")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
                .block(Block::default().borders(Borders::ALL));
            f.render_widget(done, card_area);
        }
    }

    draw_actions(f, app, chunks[2]);
    draw_counts(f, app, chunks[3]);

    if app.show_help {
        draw_help(f);
    }
}

fn draw_question(f: &mut Frame, card: &Card, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            format!("Quiz: {}", card.romaji),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("What does this mean?"),
    ];
    let question = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Question "))
        .wrap(Wrap { trim: true });
    f.render_widget(question, area);
}

fn draw_answer(f: &mut Frame, card: &Card, area: Rect) {
    let inner = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let question = Paragraph::new(format!("Quiz: {}", card.romaji))
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title(" Question "));
    f.render_widget(question, inner[0]);

    let label = Style::default().add_modifier(Modifier::BOLD);
    let text = vec![
        Line::from(vec![
            Span::styled("English: ", label),
            Span::styled(card.english.as_str(), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled("Meaning Breakdown: ", label),
            Span::styled(card.romaji_meaning.as_str(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled("Original Sentence: ", label),
            Span::raw(card.sentence.as_str()),
        ]),
        Line::from(Span::styled(
            format!("Root Word: {}", card.root_word),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from("How difficult was this example?"),
    ];
    let answer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(" Answer "))
        .wrap(Wrap { trim: true });
    f.render_widget(answer, inner[1]);
}

fn draw_actions(f: &mut Frame, app: &App, area: Rect) {
    let buttons: Vec<(String, &str, Color)> = if app.session.is_revealed() {
        Bucket::JUDGMENTS
            .iter()
            .map(|b| (b.key().to_string(), b.button_label(), judgment_color(*b)))
            .collect()
    } else if app.session.is_idle() {
        vec![("r".to_string(), "Refresh", Color::White)]
    } else {
        vec![("Space".to_string(), "Show Answer", Color::White)]
    };

    let mut spans: Vec<Span> = buttons
        .iter()
        .flat_map(|(key, label, color)| {
            vec![
                Span::styled(format!("[{}]", key), Style::default().fg(*color).add_modifier(Modifier::BOLD)),
                Span::raw(format!(" {} ", label)),
                Span::raw("  "),
            ]
        })
        .collect();
    spans.push(Span::styled("?:Help  q:Quit", Style::default().fg(Color::DarkGray)));

    // Status from the last judgment rides on the action bar's border.
    let mut block = Block::default().borders(Borders::ALL);
    if let Some(msg) = &app.message {
        block = block.title(Span::styled(format!(" {} ", msg), Style::default().fg(Color::Cyan)));
    }

    let actions = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(actions, area);
}

fn judgment_color(bucket: Bucket) -> Color {
    match bucket {
        Bucket::Difficult => Color::Yellow,
        Bucket::Hard => Color::Red,
        Bucket::Easy => Color::Green,
        Bucket::Unknown => Color::Blue,
    }
}

fn draw_counts(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Examples count per list: ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(inner);

    for (i, (bucket, count)) in app.lists.counts().into_iter().enumerate() {
        let metric = Paragraph::new(vec![
            Line::from(Span::styled(bucket.title(), Style::default().fg(Color::DarkGray))),
            Line::from(Span::styled(count.to_string(), Style::default().add_modifier(Modifier::BOLD))),
        ])
        .alignment(Alignment::Center);
        f.render_widget(metric, columns[i]);
    }
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(60, 70, f.area());
    f.render_widget(Clear, area);

    let help = r#"
Romaji SRS Quiz Keybindings

Question:
  Space, Enter    Show answer

Answer:
  1               Difficult (due in 5 min)
  2               Hard (due in 1 min)
  3               Easy (due in 120 min)
  4               Unknown (due in 1 min)

General:
  r               Reload lists and source data
  ?               Show this help
  q, Ctrl-C       Quit

Press any key to close
"#;

    let popup = Paragraph::new(help)
        .block(Block::default().borders(Borders::ALL).title(" Help "))
        .wrap(Wrap { trim: false });
    f.render_widget(popup, area);
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
