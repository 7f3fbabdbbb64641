use clap::Parser;
use meshkv::config::Config;
use meshkv::node::Node;
use meshkv::server::ReplicaServer;
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "meshkv-server")]
#[command(about = "Mesh-replicated key-value store node", long_about = None)]
struct Args {
    #[arg(short, long)]
    name: String,

    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    #[arg(short, long)]
    port: u16,

    #[arg(long, value_delimiter = ',')]
    peers: Vec<SocketAddr>,

    #[arg(long, default_value = "1000")]
    send_timeout_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meshkv=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let bind_addr: SocketAddr =
        format!("{}:{}", args.host, args.port).parse()?;

    let mut config = Config::new(args.name, bind_addr, args.peers);
    config.send_timeout = Duration::from_millis(args.send_timeout_ms);

    tracing::info!("Starting node {} on {}", config.name, config.bind_addr);
    tracing::info!("Peers: {:?}", config.peers);

    let node = Node::new(config.clone());

    let server = ReplicaServer::new(node.name(), node.store());
    tokio::spawn(async move {
        if let Err(e) = server.run(config.bind_addr).await {
            tracing::error!("Listener terminated: {}", e);
        }
    });

    println!("Node ready. Type 'help' for commands.");
    repl(&node).await
}

async fn repl(node: &Node) -> anyhow::Result<()> {
    use std::io::{self, Write};

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        match process_command(node, input).await {
            Ok(Some(output)) => println!("{}", output),
            Ok(None) => break,
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    Ok(())
}

async fn process_command(
    node: &Node,
    input: &str,
) -> anyhow::Result<Option<String>> {
    let mut parts = input.split_whitespace();
    let command = match parts.next() {
        Some(cmd) => cmd,
        None => return Ok(Some(String::new())),
    };

    match command {
        "help" => Ok(Some(format_help())),
        "put" => {
            let key = parts
                .next()
                .ok_or_else(|| anyhow::anyhow!("Usage: put <key> <value>"))?
                .to_string();
            let value = parts
                .next()
                .ok_or_else(|| anyhow::anyhow!("Usage: put <key> <value>"))?
                .to_string();
            // The wire encoding is space-delimited, so multi-token values
            // cannot be replicated and are rejected up front.
            if parts.next().is_some() {
                return Err(anyhow::anyhow!(
                    "Values must be a single token"
                ));
            }
            node.put(key, value).await;
            Ok(Some("OK".to_string()))
        }
        "get" => {
            let key = parts
                .next()
                .ok_or_else(|| anyhow::anyhow!("Usage: get <key>"))?;
            if parts.next().is_some() {
                return Err(anyhow::anyhow!("Usage: get <key>"));
            }
            match node.get(key).await {
                Some(v) => Ok(Some(v)),
                None => Ok(Some("(nil)".to_string())),
            }
        }
        "delete" | "del" => {
            let key = parts
                .next()
                .ok_or_else(|| anyhow::anyhow!("Usage: delete <key>"))?;
            if parts.next().is_some() {
                return Err(anyhow::anyhow!("Usage: delete <key>"));
            }
            node.delete(key).await;
            Ok(Some("OK".to_string()))
        }
        "exit" | "quit" => Ok(None),
        _ => Err(anyhow::anyhow!(
            "Unknown command: {}. Type 'help' for available commands.",
            command
        )),
    }
}

fn format_help() -> String {
    r#"Available commands:
  put <key> <value> - Set a key-value pair and replicate it to all peers
  get <key>         - Get the value for a key (local read)
  delete <key>      - Delete a key and replicate the delete to all peers
  help              - Show this help message
  exit              - Exit"#
        .to_string()
}
