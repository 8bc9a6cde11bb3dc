//! Title bar with the connect affordance or the connected account chip.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tokio::sync::mpsc::UnboundedSender;
use uds_wallet::{action::Action, domain::address::format_address};

use crate::tui::Frame;

use super::Component;

pub const APP_TITLE: &str = "SakkarinToken";

pub struct HeaderComponent {
    action_tx: UnboundedSender<Action>,
    pub network: String,
    /// Connected account, `None` while the session is inactive.
    pub account: Option<String>,
    pub is_connecting: bool,
}

impl HeaderComponent {
    pub fn new(action_tx: UnboundedSender<Action>, network: &str) -> Self {
        Self {
            action_tx,
            network: network.to_string(),
            account: None,
            is_connecting: false,
        }
    }

    pub fn set_account(&mut self, account: Option<String>) {
        self.account = account;
    }

    pub fn draw_static(
        f: &mut Frame,
        area: Rect,
        network: &str,
        account: Option<&str>,
        is_connecting: bool,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::horizontal([Constraint::Min(0), Constraint::Length(44)]).split(inner);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                APP_TITLE,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(format!("[{network}]"), Style::default().fg(Color::Yellow)),
        ]));
        f.render_widget(title, chunks[0]);

        let controls = match account {
            Some(account) => Line::from(vec![
                Span::styled(
                    format!(" {} ", format_address(Some(account))),
                    Style::default().fg(Color::White).bg(Color::DarkGray),
                ),
                Span::raw("  "),
                Span::styled(
                    "[ Disconnect ]",
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Gray)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" (d)", Style::default().fg(Color::DarkGray)),
            ]),
            None if is_connecting => Line::from(Span::styled(
                "Waiting for wallet...",
                Style::default().fg(Color::Yellow),
            )),
            None => Line::from(vec![
                Span::styled(
                    "[ Connect Wallet ]",
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" (c)", Style::default().fg(Color::DarkGray)),
            ]),
        };
        f.render_widget(Paragraph::new(controls).alignment(Alignment::Right), chunks[1]);
    }
}

impl Component for HeaderComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('c') if self.account.is_none() && !self.is_connecting => {
                self.action_tx.send(Action::Connect)?;
            }
            KeyCode::Char('d') if self.account.is_some() => {
                self.action_tx.send(Action::RequestDisconnect)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame, area: Rect) {
        Self::draw_static(
            f,
            area,
            &self.network,
            self.account.as_deref(),
            self.is_connecting,
        );
    }
}
