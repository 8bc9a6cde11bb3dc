//! Purchase form: account, token balance, ETH amount input and the Buy button.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tokio::sync::mpsc::UnboundedSender;
use uds_wallet::{
    action::Action,
    config::ContractConfig,
    domain::{address::format_address_with, purchase::PurchaseOutcome},
};

use crate::tui::Frame;

use super::Component;

/// Input field focus state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseField {
    Amount,
    Buy,
}

pub struct PurchaseComponent {
    action_tx: UnboundedSender<Action>,
    pub token_symbol: String,
    pub tokens_per_eth: u64,
    pub account: Option<String>,
    pub balance: String,
    pub amount: String,
    pub focused_field: PurchaseField,
    pub is_editing: bool,
    pub is_submitting: bool,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
}

/// Everything [`PurchaseComponent::draw_static`] needs to render the form.
pub struct PurchaseView<'a> {
    pub token_symbol: &'a str,
    pub tokens_per_eth: u64,
    pub account: &'a str,
    pub balance: &'a str,
    pub amount: &'a str,
    pub focused_field: PurchaseField,
    pub is_editing: bool,
    pub is_submitting: bool,
    pub error_message: Option<&'a str>,
    pub success_message: Option<&'a str>,
}

impl PurchaseComponent {
    pub fn new(action_tx: UnboundedSender<Action>, contract: &ContractConfig) -> Self {
        Self {
            action_tx,
            token_symbol: contract.token_symbol.clone(),
            tokens_per_eth: contract.tokens_per_eth,
            account: None,
            balance: String::new(),
            amount: String::new(),
            focused_field: PurchaseField::Amount,
            is_editing: false,
            is_submitting: false,
            error_message: None,
            success_message: None,
        }
    }

    /// Set the connected account. Switching away from an account drops the
    /// balance shown for it; a balance loaded before the first account
    /// arrives is kept.
    pub fn set_account(&mut self, account: Option<String>) {
        if self.account.is_some() && account != self.account {
            self.balance.clear();
        }
        self.account = account;
    }

    pub fn set_balance(&mut self, balance: String) {
        self.balance = balance;
    }

    /// Reflect the result of a submit attempt in the feedback line.
    pub fn apply_outcome(&mut self, outcome: &PurchaseOutcome) {
        self.is_submitting = false;
        match outcome {
            PurchaseOutcome::Skipped => {}
            PurchaseOutcome::Submitted(tx_hash) => {
                self.error_message = None;
                self.success_message = Some(format!(
                    "Transaction sent! Hash: {}",
                    format_address_with(Some(&tx_hash.to_string()), 10, 8)
                ));
            }
            PurchaseOutcome::InsufficientFunds { .. } | PurchaseOutcome::Failed => {
                self.success_message = None;
                self.error_message = outcome.feedback().map(str::to_string);
            }
        }
    }

    /// Clear the form.
    pub fn clear(&mut self) {
        self.amount.clear();
        self.focused_field = PurchaseField::Amount;
        self.is_editing = false;
        self.error_message = None;
        self.success_message = None;
    }

    pub fn paste(&mut self, text: &str) {
        if self.focused_field == PurchaseField::Amount {
            for c in text.trim().chars() {
                self.handle_char(c);
            }
        }
    }

    fn next_field(&mut self) {
        self.focused_field = match self.focused_field {
            PurchaseField::Amount => PurchaseField::Buy,
            PurchaseField::Buy => PurchaseField::Amount,
        };
    }

    fn handle_char(&mut self, c: char) {
        // Only allow digits and a single decimal point
        if c.is_ascii_digit() || (c == '.' && !self.amount.contains('.')) {
            self.amount.push(c);
            self.success_message = None;
        }
    }

    fn submit(&mut self) -> Result<()> {
        self.is_editing = false;
        self.is_submitting = true;
        self.action_tx.send(Action::Buy)?;
        Ok(())
    }

    pub fn draw_static(f: &mut Frame, area: Rect, view: &PurchaseView) {
        let chunks = Layout::vertical([
            Constraint::Length(6), // Account + balance
            Constraint::Length(5), // Amount
            Constraint::Length(3), // Buy button
            Constraint::Min(0),    // Feedback/help
        ])
        .split(area);

        let label = Style::default().fg(Color::DarkGray);
        let account_widget = Paragraph::new(vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("Address: ", label),
                Span::styled(view.account, Style::default().fg(Color::White)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("{} Balance: ", view.token_symbol), label),
                Span::styled(
                    if view.balance.is_empty() {
                        "-"
                    } else {
                        view.balance
                    },
                    Style::default().fg(Color::Green),
                ),
            ]),
        ])
        .block(
            Block::default()
                .title(view.token_symbol)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(account_widget, chunks[0]);

        let amount_focused = view.focused_field == PurchaseField::Amount;
        let amount_style = match (amount_focused, view.is_editing) {
            (true, true) => Style::default().fg(Color::Yellow),
            (true, false) => Style::default().fg(Color::Cyan),
            _ => Style::default().fg(Color::White),
        };
        let mut amount_display = if view.amount.is_empty() && !amount_focused {
            "Enter amount in ETH (e.g., 0.1)".to_string()
        } else {
            view.amount.to_string()
        };
        if view.is_editing && amount_focused {
            amount_display.push('│');
        }

        let amount_widget = Paragraph::new(vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(amount_display, amount_style),
                Span::raw(" ETH"),
            ]),
        ])
        .block(
            Block::default()
                .title(format!(
                    "{}Buy {} (1 ETH = {} {})",
                    if amount_focused { "> " } else { "  " },
                    view.token_symbol,
                    view.tokens_per_eth,
                    view.token_symbol
                ))
                .borders(Borders::ALL)
                .border_style(if amount_focused {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                }),
        );
        f.render_widget(amount_widget, chunks[1]);

        let buy_focused = view.focused_field == PurchaseField::Buy;
        let buy_style = if buy_focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green)
        };
        let buy_label = if view.is_submitting {
            "  [ Waiting for wallet... ]  "
        } else {
            "  [ Buy ]  "
        };
        let buy_widget = Paragraph::new(Line::from(Span::styled(buy_label, buy_style))).block(
            Block::default().borders(Borders::ALL).border_style(if buy_focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            }),
        );
        f.render_widget(buy_widget, chunks[2]);

        let mut status_lines = vec![Line::from("")];
        if let Some(err) = view.error_message {
            status_lines.push(Line::from(Span::styled(err, Style::default().fg(Color::Red))));
        } else if let Some(success) = view.success_message {
            status_lines.push(Line::from(Span::styled(
                success,
                Style::default().fg(Color::Green),
            )));
        }
        status_lines.push(Line::from(""));
        status_lines.push(Line::from(Span::styled(
            if view.is_editing {
                "[Esc] Stop editing  [Tab] Next field"
            } else {
                "[Enter/e] Edit amount  [Tab/j/k] Move  [Enter on Buy] Buy  [x] Clear  [r] Refresh"
            },
            Style::default().fg(Color::DarkGray),
        )));

        let status_widget = Paragraph::new(status_lines).block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(status_widget, chunks[3]);
    }
}

impl Component for PurchaseComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        let on_amount = self.focused_field == PurchaseField::Amount;

        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
                self.is_editing = false;
                self.next_field();
            }
            KeyCode::Esc => {
                self.is_editing = false;
            }
            KeyCode::Enter => {
                if on_amount {
                    self.is_editing = !self.is_editing;
                } else {
                    self.submit()?;
                }
            }
            KeyCode::Char(c) if self.is_editing && on_amount => {
                self.error_message = None;
                self.handle_char(c);
            }
            KeyCode::Char(c) if !self.is_editing => match c {
                'j' | 'k' => self.next_field(),
                'x' => self.clear(),
                'e' if on_amount => self.is_editing = true,
                _ => {}
            },
            KeyCode::Backspace if self.is_editing && on_amount => {
                self.error_message = None;
                self.amount.pop();
            }
            _ => {}
        }
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let view = PurchaseView {
            token_symbol: &self.token_symbol,
            tokens_per_eth: self.tokens_per_eth,
            account: self.account.as_deref().unwrap_or_default(),
            balance: &self.balance,
            amount: &self.amount,
            focused_field: self.focused_field,
            is_editing: self.is_editing,
            is_submitting: self.is_submitting,
            error_message: self.error_message.as_deref(),
            success_message: self.success_message.as_deref(),
        };
        Self::draw_static(f, area, &view);
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{B256, U256};
    use crossterm::event::KeyModifiers;
    use ratatui::{Terminal, backend::TestBackend};
    use tokio::sync::mpsc;
    use uds_wallet::{
        config::Config,
        domain::purchase::{INSUFFICIENT_FUNDS, TRANSACTION_FAILED},
    };

    use super::*;

    fn component() -> (PurchaseComponent, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (PurchaseComponent::new(tx, &Config::sepolia().contract), rx)
    }

    fn press(component: &mut PurchaseComponent, code: KeyCode) {
        component
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap();
    }

    #[test]
    fn test_amount_input_filters_characters() {
        let (mut form, _rx) = component();
        press(&mut form, KeyCode::Enter);
        for c in "1a.2.5".chars() {
            press(&mut form, KeyCode::Char(c));
        }
        assert_eq!(form.amount, "1.25");

        form.clear();
        form.paste(" 0.5x ");
        assert_eq!(form.amount, "0.5");
    }

    #[test]
    fn test_enter_on_buy_dispatches() {
        let (mut form, mut rx) = component();
        press(&mut form, KeyCode::Tab);
        assert_eq!(form.focused_field, PurchaseField::Buy);

        press(&mut form, KeyCode::Enter);

        assert_eq!(rx.try_recv().unwrap(), Action::Buy);
        assert!(form.is_submitting);
    }

    #[test]
    fn test_apply_outcome() {
        let (mut form, _rx) = component();

        form.apply_outcome(&PurchaseOutcome::Failed);
        assert_eq!(form.error_message.as_deref(), Some(TRANSACTION_FAILED));

        form.apply_outcome(&PurchaseOutcome::Skipped);
        assert_eq!(form.error_message.as_deref(), Some(TRANSACTION_FAILED));

        form.apply_outcome(&PurchaseOutcome::InsufficientFunds {
            balance: U256::from(1u64),
            value: U256::from(2u64),
        });
        assert_eq!(form.error_message.as_deref(), Some(INSUFFICIENT_FUNDS));

        form.apply_outcome(&PurchaseOutcome::Submitted(B256::repeat_byte(0xab)));
        assert_eq!(form.error_message, None);
        assert!(form.success_message.unwrap().starts_with("Transaction sent! Hash: 0xabababab"));
    }

    #[test]
    fn test_failure_keeps_balance() {
        let (mut form, _rx) = component();
        form.set_balance("3.0".to_string());

        form.apply_outcome(&PurchaseOutcome::Failed);

        assert_eq!(form.balance, "3.0");
    }

    #[test]
    fn test_account_switch_clears_balance() {
        let (mut form, _rx) = component();
        form.set_account(Some("0xaaaa".to_string()));
        form.set_balance("3.0".to_string());

        form.set_account(Some("0xaaaa".to_string()));
        assert_eq!(form.balance, "3.0");

        form.set_account(Some("0xbbbb".to_string()));
        assert!(form.balance.is_empty());

        form.set_balance("4.0".to_string());
        form.set_account(None);
        assert!(form.balance.is_empty());
    }

    #[test]
    fn test_first_account_keeps_early_balance() {
        let (mut form, _rx) = component();
        form.set_balance("2.5".to_string());

        form.set_account(Some("0xaaaa".to_string()));

        assert_eq!(form.balance, "2.5");
    }

    #[test]
    fn test_draw_shows_balance_and_feedback() {
        let (mut form, _rx) = component();
        form.set_account(Some("0xAbCdEf1234567890abcdef1234567890ABCDEF12".to_string()));
        form.set_balance("12.5".to_string());
        form.apply_outcome(&PurchaseOutcome::Failed);

        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| form.draw(f, f.area())).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("UDS Balance: 12.5"));
        assert!(screen.contains("Buy UDS (1 ETH = 10 UDS)"));
        assert!(screen.contains(TRANSACTION_FAILED));
    }
}
