//! Disconnect confirmation popup.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use tokio::sync::mpsc::UnboundedSender;
use uds_wallet::action::Action;

use crate::tui::Frame;

use super::Component;

/// Shown after a local disconnect. The wallet keeps its authorisation.
pub const REVOKE_NOTICE: &str =
    "Please remove this app from your wallet's connected sites to fully disconnect.";

pub struct ConfirmDisconnect {
    action_tx: UnboundedSender<Action>,
    pub is_open: bool,
}

impl ConfirmDisconnect {
    pub fn new(action_tx: UnboundedSender<Action>) -> Self {
        Self {
            action_tx,
            is_open: false,
        }
    }

    pub fn open(&mut self) {
        self.is_open = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    fn popup_area(area: Rect) -> Rect {
        let [area] = Layout::vertical([Constraint::Length(7)])
            .flex(Flex::Center)
            .areas(area);
        let [area] = Layout::horizontal([Constraint::Length(56)])
            .flex(Flex::Center)
            .areas(area);
        area
    }

    pub fn draw_static(f: &mut Frame, area: Rect) {
        let area = Self::popup_area(area);
        f.render_widget(Clear, area);

        let popup = Paragraph::new(vec![
            Line::from(""),
            Line::from("Disconnect from the wallet?"),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    "[y] Disconnect",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("[n] Cancel", Style::default().fg(Color::Gray)),
            ]),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title("Disconnect")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        f.render_widget(popup, area);
    }
}

impl Component for ConfirmDisconnect {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                self.close();
                self.action_tx.send(Action::ConfirmDisconnect)?;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.close();
                self.action_tx.send(Action::CancelDisconnect)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame, area: Rect) {
        if self.is_open {
            Self::draw_static(f, area);
        }
    }
}
