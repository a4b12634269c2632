//! skysync CLI
//!
//! Offline tooling over the save codec: decompress and decode saves to
//! JSON, re-encode them, compare two saves the way the servers would, and
//! compute request signatures for debugging recorded traffic.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use skysync::auth::{fields, DirectSigner, Signer};
use skysync::codec::catalog::save_schema;
use skysync::codec::{compress_save, concat, decompress_save, parse, SaveValue};
use skysync::save::{which_save_is_better, BetterSave};

#[derive(Parser)]
#[command(name = "skysync")]
#[command(about = "Save codec tools for the tower game's cloud sync", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decompress and decode a save to JSON
    Decode {
        /// Path to the compressed save (base64 text)
        input: PathBuf,

        /// Print the raw block string instead of JSON
        #[arg(long)]
        raw: bool,
    },

    /// Encode a JSON save and compress it
    Encode {
        /// Path to the JSON save
        input: PathBuf,
    },

    /// Compare two compressed saves the way the servers would
    Compare {
        first: PathBuf,
        second: PathBuf,
    },

    /// Compute a standard-family request signature
    Hash {
        #[arg(long)]
        player_id: String,

        #[arg(long)]
        salt: u32,

        #[arg(long)]
        player_ss: String,

        /// Shared signing secret
        #[arg(long)]
        secret: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .init();

    if let Err(message) = run(Cli::parse()) {
        eprintln!("error: {message}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Decode { input, raw } => {
            let payload = read_trimmed(&input)?;
            let blocks = decompress_save(&payload).map_err(|e| e.to_string())?;
            if raw {
                println!("{blocks}");
            } else {
                let record = parse(&blocks, save_schema());
                let json = serde_json::to_string_pretty(&record.to_json())
                    .map_err(|e| e.to_string())?;
                println!("{json}");
            }
            Ok(())
        }
        Commands::Encode { input } => {
            let text = read_trimmed(&input)?;
            let json: serde_json::Value = serde_json::from_str(&text).map_err(|e| e.to_string())?;
            let value = SaveValue::from_json(&json);
            let record = value
                .as_record()
                .ok_or_else(|| "JSON save must be an object".to_string())?;
            let blocks = concat(record, save_schema()).map_err(|e| e.to_string())?;
            println!("{}", compress_save(&blocks).map_err(|e| e.to_string())?);
            Ok(())
        }
        Commands::Compare { first, second } => {
            let first_record = parse(
                &decompress_save(&read_trimmed(&first)?).map_err(|e| e.to_string())?,
                save_schema(),
            );
            let second_record = parse(
                &decompress_save(&read_trimmed(&second)?).map_err(|e| e.to_string())?,
                save_schema(),
            );
            match which_save_is_better(&first_record, &second_record) {
                BetterSave::First => println!("{}", first.display()),
                BetterSave::Second => println!("{}", second.display()),
            }
            Ok(())
        }
        Commands::Hash {
            player_id,
            salt,
            player_ss,
            secret,
        } => {
            let input = fields::standard(&player_id, salt, &player_ss);
            println!("{}", DirectSigner::new(secret).sign(&input));
            Ok(())
        }
    }
}

fn read_trimmed(path: &PathBuf) -> Result<String, String> {
    std::fs::read_to_string(path)
        .map(|text| text.trim().to_string())
        .map_err(|e| format!("{}: {e}", path.display()))
}
