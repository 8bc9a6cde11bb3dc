use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "uds-wallet")]
#[command(author = "sakkarin")]
#[command(version)]
#[command(about = "A TUI client for buying UDS tokens through an external wallet")]
pub struct Args {
    /// Tick rate in ticks per second
    #[arg(short, long, default_value_t = 4.0)]
    pub tick_rate: f64,

    /// Frame rate in frames per second
    #[arg(short, long, default_value_t = 60.0)]
    pub frame_rate: f64,

    /// Network to connect to (sepolia, devnet)
    #[arg(short, long, default_value = "sepolia")]
    pub network: String,

    /// Wallet JSON-RPC endpoint (overrides network default)
    #[arg(long)]
    pub wallet_url: Option<String>,

    /// Data directory path (logs)
    #[arg(long)]
    pub data_dir: Option<String>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
