mod node;

use crate::node::Node;
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::error;
use serde_json::json;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Turn debugging information on.
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// The command to execute.
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a new keypair.
    Keys {
        /// The file where to print the new key pair.
        #[clap(short, long, value_parser, value_name = "FILE")]
        filename: String,
    },
    /// Sign and record a submission for a round.
    Submit {
        /// The file containing the node keys.
        #[clap(short, long, value_parser, value_name = "FILE")]
        keys: String,
        /// The file containing the task information.
        #[clap(short, long, value_parser, value_name = "FILE")]
        task: String,
        /// The path of the ledger store.
        #[clap(short, long, value_parser, value_name = "PATH")]
        store: String,
        #[clap(short, long, value_parser)]
        round: u64,
        /// Reportable identity to embed in the submission.
        #[clap(short, long, value_parser)]
        identity: Option<String>,
    },
    /// Record an audit vote against a submission.
    Flag {
        #[clap(short, long, value_parser, value_name = "FILE")]
        task: String,
        #[clap(short, long, value_parser, value_name = "PATH")]
        store: String,
        #[clap(short, long, value_parser)]
        round: u64,
        /// Key of the audited participant.
        #[clap(short, long, value_parser)]
        key: String,
        /// Key of the participant casting the vote.
        #[clap(long, value_parser)]
        voter: String,
        /// Vote the submission invalid.
        #[clap(long)]
        invalid: bool,
    },
    /// Tell whether this node leads a round.
    Role {
        #[clap(short, long, value_parser, value_name = "FILE")]
        keys: String,
        #[clap(short, long, value_parser, value_name = "FILE")]
        task: String,
        #[clap(short, long, value_parser, value_name = "PATH")]
        store: String,
        /// Optional file containing the election parameters.
        #[clap(short, long, value_parser, value_name = "FILE")]
        parameters: Option<String>,
        #[clap(short, long, value_parser, allow_hyphen_values = true)]
        round: Option<i64>,
        /// Derive the round from this slot instead.
        #[clap(long, value_parser, conflicts_with = "round")]
        slot: Option<u64>,
    },
    /// Draw participants of the previous round for audit.
    Sample {
        #[clap(short, long, value_parser, value_name = "FILE")]
        task: String,
        #[clap(short, long, value_parser, value_name = "PATH")]
        store: String,
        #[clap(short, long, value_parser, value_name = "FILE")]
        parameters: Option<String>,
        #[clap(short, long, value_parser, allow_hyphen_values = true)]
        round: i64,
        #[clap(short, long, value_parser)]
        count: Option<usize>,
    },
    /// Check a submission of a round.
    Audit {
        #[clap(short, long, value_parser, value_name = "FILE")]
        task: String,
        #[clap(short, long, value_parser, value_name = "PATH")]
        store: String,
        #[clap(short, long, value_parser, value_name = "FILE")]
        parameters: Option<String>,
        #[clap(short, long, value_parser, allow_hyphen_values = true)]
        round: i64,
        /// Key of the submitter.
        #[clap(short, long, value_parser)]
        key: String,
        /// Content address of the submission.
        #[clap(short, long, value_parser)]
        address: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    };
    let mut logger = env_logger::Builder::from_env(Env::default().default_filter_or(log_level));
    #[cfg(feature = "benchmark")]
    logger.format_timestamp_millis();
    logger.init();

    match cli.command {
        Command::Keys { filename } => {
            if let Err(e) = Node::print_key_file(&filename) {
                error!("{}", e);
            }
        }
        Command::Submit {
            keys,
            task,
            store,
            round,
            identity,
        } => match Node::new(&task, &store, None) {
            Ok(node) => match node.submit(&keys, round, identity.as_deref()).await {
                Ok(address) => println!("{}", address),
                Err(e) => error!("{}", e),
            },
            Err(e) => error!("{}", e),
        },
        Command::Flag {
            task,
            store,
            round,
            key,
            voter,
            invalid,
        } => match Node::new(&task, &store, None) {
            Ok(node) => {
                if let Err(e) = node.flag(round, &key, &voter, !invalid).await {
                    error!("{}", e);
                }
            }
            Err(e) => error!("{}", e),
        },
        Command::Role {
            keys,
            task,
            store,
            parameters,
            round,
            slot,
        } => match Node::new(&task, &store, parameters.as_deref()) {
            Ok(node) => match node.role(&keys, round, slot).await {
                Ok(role) => println!(
                    "{}",
                    json!({ "isLeader": role.is_leader, "leaderNode": role.leader_node })
                ),
                Err(e) => error!("{}", e),
            },
            Err(e) => error!("{}", e),
        },
        Command::Sample {
            task,
            store,
            parameters,
            round,
            count,
        } => match Node::new(&task, &store, parameters.as_deref()) {
            Ok(node) => {
                let sample: Vec<_> = node
                    .sample(round, count)
                    .await
                    .iter()
                    .map(|key| key.to_string())
                    .collect();
                println!("{}", json!(sample));
            }
            Err(e) => error!("{}", e),
        },
        Command::Audit {
            task,
            store,
            parameters,
            round,
            key,
            address,
        } => match Node::new(&task, &store, parameters.as_deref()) {
            Ok(node) => match node.audit(&address, round, &key).await {
                Ok(valid) => println!("{}", json!({ "isValid": valid })),
                Err(e) => error!("{}", e),
            },
            Err(e) => error!("{}", e),
        },
    }
}
