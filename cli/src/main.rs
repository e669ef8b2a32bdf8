//! nodeprobe CLI — probe node health from the terminal.
//!
//! Usage:
//! ```bash
//! # One health check against a node (exit code 1 when DOWN)
//! nodeprobe health --url http://localhost:8545
//!
//! # Send a raw JSON-RPC call
//! nodeprobe call --url http://localhost:8545 --method eth_blockNumber
//! ```

use std::env;
use std::process;
use std::time::Duration;

use nodeprobe_core::transport::RpcTransport;
use nodeprobe_core::NodeHealthChecker;
use nodeprobe_http::{HttpRpcClient, NodeProperties};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "health" => cmd_health(&args[2..]).await,
        "call" => cmd_call(&args[2..]).await,
        "version" | "--version" | "-V" => {
            println!("nodeprobe {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn print_usage() {
    println!("nodeprobe {}", env!("CARGO_PKG_VERSION"));
    println!("Probe the health of an Ethereum-compatible node\n");
    println!("USAGE:");
    println!("    nodeprobe <COMMAND>\n");
    println!("COMMANDS:");
    println!("    health     Run one health check (exit code 1 when DOWN)");
    println!("    call       Send a raw JSON-RPC call");
    println!("    version    Print version");
    println!("    help       Print this help\n");
    println!("HEALTH FLAGS:");
    println!("    --url <URL>         Node JSON-RPC endpoint  [default: http://localhost:8545]");
    println!("    --timeout-ms <N>    Bound the wait on the status queries");
}

async fn cmd_health(args: &[String]) -> Result<(), String> {
    let props = NodeProperties {
        client_address: parse_flag(args, "--url").unwrap_or_default(),
        ..NodeProperties::default()
    };
    let client = props.connect().map_err(|e| e.to_string())?;

    let mut checker = NodeHealthChecker::new(client);
    if let Some(ms) = parse_flag(args, "--timeout-ms") {
        let ms: u64 = ms.parse().map_err(|_| "--timeout-ms must be an integer")?;
        checker = checker.with_join_timeout(Duration::from_millis(ms));
    }

    let report = checker.check().await;
    println!(
        "{}",
        serde_json::to_string_pretty(&report).unwrap_or_default()
    );

    if !report.is_up() {
        process::exit(1);
    }
    Ok(())
}

async fn cmd_call(args: &[String]) -> Result<(), String> {
    let url = parse_flag(args, "--url").ok_or("--url is required")?;
    let method = parse_flag(args, "--method").ok_or("--method is required")?;

    let client = HttpRpcClient::default_for(&url).map_err(|e| e.to_string())?;
    let result: serde_json::Value = client
        .call(1, &method, vec![])
        .await
        .map_err(|e| e.to_string())?;

    println!("{}", serde_json::to_string_pretty(&result).unwrap_or_default());
    Ok(())
}

fn parse_flag(args: &[String], flag: &str) -> Option<String> {
    let pos = args.iter().position(|a| a == flag)?;
    args.get(pos + 1).cloned()
}
