//! TUI rendering with ratatui
//!
//! Layout for a level: picture, answer slots, letter keyboard, wallet,
//! set progress and a message log.

use super::app::{App, InputMode, MessageStyle};
use crate::game::Navigation;
use crate::storage::KeyValueStore;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

/// Main UI rendering function
pub fn ui<K: KeyValueStore>(f: &mut Frame, app: &App<'_, K>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Main content
            Constraint::Length(4), // Hints
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_board(f, app, main_chunks[0]);
    render_info_panel(f, app, main_chunks[1]);
    render_hints(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

fn render_header<K: KeyValueStore>(f: &mut Frame, app: &App<'_, K>, area: Rect) {
    let title = format!(
        "🖼  WORDPICS - {}  ·  Level {}/{}",
        app.set.name,
        app.session.level(),
        app.session.total_levels()
    );
    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_board<K: KeyValueStore>(f: &mut Frame, app: &App<'_, K>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35), // Picture
            Constraint::Percentage(25), // Slots
            Constraint::Percentage(40), // Keyboard
        ])
        .split(area);

    render_picture(f, app, chunks[0]);
    render_slots(f, app, chunks[1]);
    render_keyboard(f, app, chunks[2]);
}

fn render_picture<K: KeyValueStore>(f: &mut Frame, app: &App<'_, K>, area: Rect) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            app.session.puzzle().image_ref().to_string(),
            Style::default().fg(Color::White),
        )),
    ];
    let paragraph = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Picture ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(paragraph, area);
}

fn render_slots<K: KeyValueStore>(f: &mut Frame, app: &App<'_, K>, area: Rect) {
    let guess = app.session.guess();
    let solved = matches!(app.input_mode, InputMode::LevelComplete(_));

    let mut spans = Vec::with_capacity(guess.len() * 2);
    for i in 0..guess.len() {
        let (text, style) = match guess.slot(i) {
            Some(c) if solved => (
                format!(" {c} "),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Some(c) if guess.is_locked(i) => (
                format!(" {c} "),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Some(c) => (
                format!(" {c} "),
                Style::default()
                    .fg(Color::White)
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            ),
            None => (" _ ".to_string(), Style::default().fg(Color::DarkGray)),
        };
        let style = if !solved && i == app.cursor {
            style.add_modifier(Modifier::UNDERLINED | Modifier::REVERSED)
        } else {
            style
        };
        spans.push(Span::styled(text, style));
        spans.push(Span::raw(" "));
    }

    let numbers: String = (1..=guess.len()).map(|n| format!(" {} ", n % 10) + " ").collect();

    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(spans),
        Line::from(Span::styled(numbers, Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(" Answer ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(paragraph, area);
}

fn render_keyboard<K: KeyValueStore>(f: &mut Frame, app: &App<'_, K>, area: Rect) {
    let lines: Vec<Line> = app
        .session
        .pool()
        .chunks(7)
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .flat_map(|c| {
                    [
                        Span::styled(
                            format!(" {c} "),
                            Style::default()
                                .fg(Color::Black)
                                .bg(Color::Cyan)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(" "),
                    ]
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Keyboard ")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(paragraph, area);
}

fn render_info_panel<K: KeyValueStore>(f: &mut Frame, app: &App<'_, K>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Wallet
            Constraint::Length(3), // Set progress
            Constraint::Min(4),    // Messages
        ])
        .split(area);

    render_wallet(f, app, chunks[0]);
    render_set_progress(f, app, chunks[1]);
    render_messages(f, app, chunks[2]);
}

fn render_wallet<K: KeyValueStore>(f: &mut Frame, app: &App<'_, K>, area: Rect) {
    let wallet = app.store.wallet();
    let content = vec![
        Line::from(vec![
            Span::raw("🪙 Coins:    "),
            Span::styled(
                wallet.coins().to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw("🏆 Trophies: "),
            Span::styled(
                wallet.trophies().to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    let paragraph = Paragraph::new(content).block(
        Block::default()
            .title(" Wallet ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(paragraph, area);
}

fn render_set_progress<K: KeyValueStore>(f: &mut Frame, app: &App<'_, K>, area: Rect) {
    let total = app.set.total_levels();
    let done = app.store.ledger().game(&app.set.id).completed_levels.len() as u32;
    let percent = if total == 0 {
        0
    } else {
        (done * 100 / total).min(100) as u16
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Set Progress ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .percent(percent)
        .label(format!("{done}/{total} levels"));
    f.render_widget(gauge, area);
}

fn render_messages<K: KeyValueStore>(f: &mut Frame, app: &App<'_, K>, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));
    f.render_widget(messages_list, area);
}

fn render_hints<K: KeyValueStore>(f: &mut Frame, app: &App<'_, K>, area: Rect) {
    let economy = &app.config.economy;
    let wallet = app.store.wallet();
    let affordable = |cost: u32, available: bool| {
        if available && wallet.can_afford(cost) {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };
    let open = app.session.is_open();

    let (title, content, color) = match app.input_mode {
        InputMode::LevelComplete(outcome) => {
            let next = match outcome.next {
                Navigation::NextLevel(level) => format!("Enter: level {level}"),
                Navigation::AllLevelsComplete => "Enter: finish, set complete!".to_string(),
            };
            (
                " 🎉 LEVEL COMPLETE 🎉 ",
                Line::from(format!("{next}  |  r: replay  |  q: quit")),
                Color::Green,
            )
        }
        InputMode::Playing => (
            " Hints ",
            Line::from(vec![
                Span::styled(
                    format!("^R reveal ({})", economy.reveal_cost),
                    affordable(economy.reveal_cost, open),
                ),
                Span::raw("   "),
                Span::styled(
                    format!("^E remove wrong letter ({})", economy.remove_cost),
                    affordable(economy.remove_cost, open && !app.session.eraser_used()),
                ),
                Span::raw("   "),
                Span::styled(
                    format!("^S skip ({})", economy.skip_cost),
                    affordable(economy.skip_cost, open),
                ),
            ]),
            Color::Yellow,
        ),
    };

    let hints = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .style(Style::default().fg(color)),
    );
    f.render_widget(hints, area);
}

fn render_status<K: KeyValueStore>(f: &mut Frame, app: &App<'_, K>, area: Rect) {
    let help_text = match app.input_mode {
        InputMode::LevelComplete(_) => "n/Enter: Next | r: Replay | q/Esc: Quit",
        InputMode::Playing => "Letters: Type | ←/→: Pick slot | Del or 1-9: Clear slot | Backspace: Undo | Esc: Quit",
    };
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, area);
}
