//! Demo binary: builds, signs and submits one transaction, then waits for its receipt.
//!
//! Runs against the in-memory mock transport unless `--node` names a gRPC endpoint.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ledger_sdk::{
    AccountCreateTransaction, AccountId, Client, ClientConfig, GrpcTransport, Hbar, MockTransport,
    PrivateKey, TokenId, TokenMintTransaction, Transport, TransferTransaction,
};
use tracing::info;

const MOCK_NODE: &str = "127.0.0.1:50211";

#[derive(Parser, Debug)]
#[command(name = "ledger-demo", about = "Submit a transaction and print its receipt")]
struct Cli {
    /// JSON client config; overrides the ledger and operator flags.
    #[arg(long)]
    config: Option<PathBuf>,

    /// `mainnet`, `testnet`, `previewnet` or a hex ledger id.
    #[arg(long, default_value = "testnet")]
    ledger: String,

    /// Account paying for the transaction.
    #[arg(long, default_value = "0.0.1001")]
    operator: AccountId,

    /// Operator key as `ed25519:<hex>` or `ecdsa:<hex>`; generated when omitted.
    #[arg(long)]
    operator_key: Option<String>,

    /// gRPC node as `host:port`. Without it the mock transport answers.
    #[arg(long)]
    node: Option<String>,

    /// Node account of `--node`.
    #[arg(long, default_value = "0.0.3")]
    node_account: AccountId,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Move hbar from the operator to another account.
    Transfer {
        #[arg(long)]
        to: AccountId,
        #[arg(long)]
        hbars: i64,
    },
    /// Create an account keyed and aliased by a fresh ECDSA key.
    CreateAccount {
        #[arg(long, default_value = "1")]
        initial_hbars: i64,
    },
    /// Mint fungible supply of a token.
    Mint {
        #[arg(long)]
        token: TokenId,
        #[arg(long)]
        amount: u64,
    },
}

fn build_client(cli: &Cli) -> Result<Client, Box<dyn std::error::Error>> {
    if let Some(path) = &cli.config {
        let text = std::fs::read_to_string(path)?;
        return Ok(Client::from_config(&ClientConfig::from_json(&text)?)?);
    }

    let mut client = Client::for_ledger(cli.ledger.parse()?);
    let key = match &cli.operator_key {
        Some(text) => text.parse::<PrivateKey>()?,
        None => PrivateKey::generate_ed25519(),
    };
    let node = cli.node.clone().unwrap_or_else(|| MOCK_NODE.to_owned());
    client
        .set_network([(node, cli.node_account)])
        .set_operator(cli.operator, key);
    Ok(client)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let client = build_client(&cli)?;
    let transport: Box<dyn Transport> = match &cli.node {
        Some(node) => Box::new(GrpcTransport::connect_lazy(node, client.request_timeout())?),
        None => Box::new(MockTransport::new()),
    };
    info!(
        ledger = %client.ledger_id(),
        nodes = client.node_account_ids().len(),
        mock = cli.node.is_none(),
        "client ready"
    );

    let response = match &cli.command {
        Command::Transfer { to, hbars } => {
            let operator = client
                .operator_account_id()
                .ok_or("client config has no operator")?;
            let mut tx = TransferTransaction::new();
            tx.hbar_transfer(operator, Hbar::new(-hbars))?
                .hbar_transfer(*to, Hbar::new(*hbars))?;
            tx.execute(&client, transport.as_ref()).await?
        }
        Command::CreateAccount { initial_hbars } => {
            let key = PrivateKey::generate_ecdsa();
            info!(alias = %key.to_evm_address()?, "generated account key");
            let mut tx = AccountCreateTransaction::new();
            tx.set_ecdsa_key_with_alias(&key)?
                .set_initial_balance(Hbar::new(*initial_hbars))?;
            tx.execute(&client, transport.as_ref()).await?
        }
        Command::Mint { token, amount } => {
            let mut tx = TokenMintTransaction::new();
            tx.set_token_id(*token)?.set_amount(*amount)?;
            tx.execute(&client, transport.as_ref()).await?
        }
    };
    info!(
        transaction_id = %response.transaction_id,
        hash = %response.transaction_hash,
        "submitted"
    );

    let receipt = response.get_receipt(&client, transport.as_ref()).await?;
    info!(status = %receipt.status, account_id = ?receipt.account_id, "receipt");
    Ok(())
}
