use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tokio::sync::{
    mpsc::{self, UnboundedReceiver, UnboundedSender},
    watch,
};
use tracing::{debug, error, info};
use uds_wallet::{
    action::Action,
    config::Config,
    domain::{
        balance::BalanceReader,
        purchase::{PurchaseOutcome, PurchaseSubmitter},
        session::Session,
    },
    infra::{connector::Connector, provider::WalletProvider, rpc::RpcWallet},
};

use crate::{
    cli::Args,
    components::{
        Component,
        confirm::{ConfirmDisconnect, REVOKE_NOTICE},
        header::HeaderComponent,
        purchase::PurchaseComponent,
    },
    tui::{Event, Frame, Tui},
};

/// How often the wallet is polled for account or network changes.
const SYNC_INTERVAL: Duration = Duration::from_secs(5);

const REFRESHING_BALANCE: &str = "Refreshing balance...";

const KEY_HELP: &str = "[c]Connect [d]Disconnect [r]Refresh [q]Quit [?]Help";

pub struct App {
    pub should_quit: bool,
    pub should_suspend: bool,
    pub config: Config,
    pub action_tx: UnboundedSender<Action>,
    pub action_rx: UnboundedReceiver<Action>,
    pub tick_rate: f64,
    pub frame_rate: f64,
    pub connector: Connector,
    pub session_rx: watch::Receiver<Session>,
    pub balance_reader: BalanceReader,
    pub submitter: PurchaseSubmitter,
    pub header_component: HeaderComponent,
    pub purchase_component: PurchaseComponent,
    pub confirm_component: ConfirmDisconnect,
    pub status_message: String,
    pub is_syncing: bool,
    pub last_sync: Option<Instant>,
}

impl App {
    pub fn new(args: &Args) -> Result<Self> {
        let config = Config::new(&args.network, args.wallet_url.as_deref());
        let wallet = RpcWallet::new(&config)?;
        info!("Using wallet at {}", wallet.url());

        let mut app = Self::with_wallet(config, Arc::new(wallet));
        app.tick_rate = args.tick_rate;
        app.frame_rate = args.frame_rate;
        Ok(app)
    }

    /// Build the app around any wallet provider. The terminal is only
    /// opened by [`App::run`].
    pub fn with_wallet(config: Config, wallet: Arc<dyn WalletProvider>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let connector = Connector::new(wallet);
        let session_rx = connector.subscribe();
        let balance_reader = BalanceReader::new(config.contract.address, action_tx.clone());
        let submitter = PurchaseSubmitter::new(config.contract.address);
        let header_component = HeaderComponent::new(action_tx.clone(), &config.network.name);
        let purchase_component = PurchaseComponent::new(action_tx.clone(), &config.contract);
        let confirm_component = ConfirmDisconnect::new(action_tx.clone());

        Self {
            should_quit: false,
            should_suspend: false,
            config,
            action_tx,
            action_rx,
            tick_rate: 4.0,
            frame_rate: 60.0,
            connector,
            session_rx,
            balance_reader,
            submitter,
            header_component,
            purchase_component,
            confirm_component,
            status_message: "Ready".to_string(),
            is_syncing: false,
            last_sync: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?
            .tick_rate(self.tick_rate)
            .frame_rate(self.frame_rate)
            .paste(true);
        tui.enter()?;

        let balance_task = self.balance_reader.clone().watch(self.connector.subscribe());

        let connector = self.connector.clone();
        tokio::spawn(async move {
            connector.connect_eagerly().await;
        });

        loop {
            // Handle events
            if let Some(event) = tui.next().await {
                self.handle_event(&mut tui, event)?;
            }

            self.sync_session();

            // Handle actions
            self.drain_actions()?;

            if self.should_suspend {
                tui.suspend()?;
                self.should_suspend = false;
                tui.resume()?;
            }

            if self.should_quit {
                break;
            }
        }

        balance_task.abort();
        tui.exit()?;
        Ok(())
    }

    /// Bring the view in line with the latest published session.
    fn sync_session(&mut self) {
        if self.session_rx.has_changed().unwrap_or(false) {
            let session = self.session_rx.borrow_and_update().clone();
            self.on_session_changed(&session);
        }
    }

    fn drain_actions(&mut self) -> Result<()> {
        while let Ok(action) = self.action_rx.try_recv() {
            self.handle_action(action)?;
        }
        Ok(())
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) -> Result<()> {
        match event {
            Event::Tick => {
                self.action_tx.send(Action::Tick)?;
            }
            Event::Render => {
                self.draw_ui(tui)?;
            }
            Event::Key(key_event) => {
                self.handle_key_event(key_event)?;
            }
            Event::Resize(w, h) => {
                tui.resize(Rect::new(0, 0, w, h))?;
                self.draw_ui(tui)?;
            }
            Event::Init => {
                info!("Application initialized");
            }
            Event::Paste(text) => {
                if self.connector.is_active() {
                    self.purchase_component.paste(&text);
                }
            }
            Event::Error => {}
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.action_tx.send(Action::Quit)?;
            return Ok(());
        }

        if self.confirm_component.is_open {
            return self.confirm_component.handle_key_event(key);
        }

        let is_active = self.connector.is_active();
        if is_active && self.purchase_component.is_editing {
            return self.purchase_component.handle_key_event(key);
        }

        match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => {
                self.action_tx.send(Action::Quit)?;
            }
            KeyCode::Char('z') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.action_tx.send(Action::Suspend)?;
            }
            KeyCode::Char('?') => {
                self.action_tx.send(Action::Help)?;
            }
            KeyCode::Char('c') | KeyCode::Char('d') if key.modifiers.is_empty() => {
                self.header_component.handle_key_event(key)?;
            }
            KeyCode::Char('r') if key.modifiers.is_empty() && is_active => {
                self.action_tx.send(Action::RefreshBalance)?;
            }
            _ if is_active => {
                self.purchase_component.handle_key_event(key)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_action(&mut self, action: Action) -> Result<()> {
        if action != Action::Tick {
            debug!("Handling action: {action:?}");
        }
        match action {
            Action::Tick => {
                let due = self
                    .last_sync
                    .is_none_or(|last| last.elapsed() >= SYNC_INTERVAL);
                if due && !self.is_syncing && self.connector.is_active() {
                    self.is_syncing = true;
                    let connector = self.connector.clone();
                    let action_tx = self.action_tx.clone();
                    tokio::spawn(async move {
                        connector.sync().await;
                        let _ = action_tx.send(Action::SyncFinished);
                    });
                }
            }
            Action::SyncFinished => {
                self.is_syncing = false;
                self.last_sync = Some(Instant::now());
            }
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Suspend => {
                self.should_suspend = true;
            }
            Action::Help => {
                self.status_message = KEY_HELP.to_string();
            }
            Action::Error(message) => {
                error!("{message}");
                self.header_component.is_connecting = false;
                self.status_message = format!("Error: {message}");
            }
            Action::Connect => {
                self.header_component.is_connecting = true;
                self.status_message = "Waiting for wallet approval...".to_string();

                let connector = self.connector.clone();
                let action_tx = self.action_tx.clone();
                let chain_id = self.config.network.chain_id;
                tokio::spawn(async move {
                    if let Err(e) = connector.connect(chain_id).await {
                        let _ = action_tx.send(Action::Error(format!("{e:#}")));
                    }
                });
            }
            Action::RequestDisconnect => {
                self.confirm_component.open();
            }
            Action::ConfirmDisconnect => {
                self.connector.disconnect();
                self.status_message = REVOKE_NOTICE.to_string();
            }
            Action::CancelDisconnect => {
                self.status_message = "Ready".to_string();
            }
            Action::RefreshBalance => {
                if let Some(fetch) = self.balance_reader.refresh(&self.connector.session()) {
                    self.status_message = REFRESHING_BALANCE.to_string();
                    let action_tx = self.action_tx.clone();
                    tokio::spawn(async move {
                        let _ = fetch.await;
                        let _ = action_tx.send(Action::RefreshFinished);
                    });
                }
            }
            Action::RefreshFinished => {
                // Still set only if no balance arrived for this refresh.
                if self.status_message == REFRESHING_BALANCE {
                    self.status_message = "Could not refresh balance".to_string();
                }
            }
            Action::BalanceLoaded { account, balance } => {
                // The reader may answer before the loop has seen the session
                // it read for.
                self.sync_session();
                if self.connector.session().account() == Some(account) {
                    self.purchase_component.set_balance(balance);
                    if self.status_message == REFRESHING_BALANCE {
                        self.status_message = "Balance updated".to_string();
                    }
                } else {
                    debug!("Dropping balance read for previous account {account}");
                }
            }
            Action::Buy => {
                let session = self.connector.session();
                let amount = self.purchase_component.amount.clone();
                let submitter = self.submitter.clone();
                let action_tx = self.action_tx.clone();
                tokio::spawn(async move {
                    let outcome = submitter.submit(&session, &amount).await;
                    let _ = action_tx.send(Action::PurchaseFinished(outcome));
                });
            }
            Action::PurchaseFinished(outcome) => {
                self.purchase_component.apply_outcome(&outcome);
                match outcome {
                    PurchaseOutcome::Skipped => {}
                    PurchaseOutcome::Submitted(tx_hash) => {
                        self.status_message = format!("Purchase submitted: {tx_hash}");
                    }
                    PurchaseOutcome::InsufficientFunds { .. } => {
                        self.status_message = "Purchase failed: insufficient funds".to_string();
                    }
                    PurchaseOutcome::Failed => {
                        self.status_message = "Purchase failed".to_string();
                    }
                }
            }
        }
        Ok(())
    }

    fn on_session_changed(&mut self, session: &Session) {
        let account = session.account().map(|a| a.to_string());
        self.header_component.is_connecting = false;
        self.header_component.set_account(account.clone());
        self.purchase_component.set_account(account);

        if !session.is_active() {
            self.purchase_component.clear();
            self.confirm_component.close();
            return;
        }

        let expected = self.config.network.chain_id;
        self.status_message = match session.chain_id {
            Some(chain_id) if chain_id != expected => {
                format!("Wallet is on chain {chain_id}, expected {expected}")
            }
            Some(chain_id) => format!("Connected on chain {chain_id}"),
            None => "Connected".to_string(),
        };
    }

    fn draw_ui(&mut self, tui: &mut Tui) -> Result<()> {
        let is_active = self.connector.is_active();
        let chain_id = self.connector.chain_id();
        let wallet_url = &self.config.network.wallet_url;
        let header = &mut self.header_component;
        let purchase = &mut self.purchase_component;
        let confirm = &mut self.confirm_component;
        let status_message = &self.status_message;

        tui.draw(|f| {
            let area = f.area();
            let chunks = Layout::vertical([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Content
                Constraint::Length(3), // Status
            ])
            .split(area);

            header.draw(f, chunks[0]);

            let [content] = Layout::horizontal([Constraint::Max(100)])
                .flex(Flex::Center)
                .areas(chunks[1]);
            if is_active {
                purchase.draw(f, content);
            } else {
                draw_disconnected(f, content, wallet_url);
            }

            draw_status(f, chunks[2], status_message, chain_id);

            confirm.draw(f, area);
        })?;
        Ok(())
    }
}

fn draw_disconnected(f: &mut Frame, area: Rect, wallet_url: &str) {
    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from("Connect a wallet to view your balance and buy tokens."),
        Line::from(""),
        Line::from(vec![
            Span::styled("Wallet endpoint: ", Style::default().fg(Color::DarkGray)),
            Span::styled(wallet_url, Style::default().fg(Color::Cyan)),
        ]),
    ])
    .block(
        Block::default()
            .title("Wallet")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .style(Style::default().fg(Color::Gray));
    f.render_widget(paragraph, area);
}

fn draw_status(f: &mut Frame, area: Rect, status_message: &str, chain_id: Option<u64>) {
    let chain = chain_id
        .map(|id| format!("Chain: {id}"))
        .unwrap_or_else(|| "Chain: -".to_string());
    let status = Paragraph::new(vec![Line::from(vec![
        Span::styled("Status: ", Style::default().fg(Color::DarkGray)),
        Span::styled(status_message, Style::default().fg(Color::Green)),
        Span::raw("  |  "),
        Span::styled(chain, Style::default().fg(Color::Yellow)),
        Span::raw("  |  "),
        Span::styled(KEY_HELP, Style::default().fg(Color::DarkGray)),
    ])])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(status, area);
}
