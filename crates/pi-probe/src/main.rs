//! paste-probe: inspect the current clipboard as the paste pipeline sees it.

use anyhow::Result;
use clap::{Parser, Subcommand};

use pi_core::clipboard::{ClipboardContent, ClipboardItem};
use pi_core::ports::{ClipboardReaderPort, TempStorePort};
use pi_core::{classify, Payload};
use pi_platform::{platform_version_string, FileTempStore, SystemClipboardReader};

#[derive(Parser)]
#[command(
    name = "paste-probe",
    about = "Inspect the current clipboard as the paste pipeline sees it"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Read the clipboard, classify it, and print the result (default)
    Read {
        /// Print the normalized payload as JSON
        #[arg(long)]
        json: bool,

        /// Use the text-only fallback read path
        #[arg(long)]
        text_only: bool,
    },

    /// Remove temp files left behind by file-backed deliveries
    ClearTemp,

    /// Print the platform version string
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Read {
        json: false,
        text_only: false,
    }) {
        Command::Read { json, text_only } => read_command(json, text_only),
        Command::ClearTemp => {
            let removed = FileTempStore::new().clear().await?;
            println!("removed {} temp artifact(s)", removed);
            Ok(())
        }
        Command::Version => {
            println!("{}", platform_version_string());
            Ok(())
        }
    }
}

fn read_command(json: bool, text_only: bool) -> Result<()> {
    let reader = SystemClipboardReader::new()?;
    let content = if text_only {
        reader.read_text()?
    } else {
        reader.read()?
    };

    let payload = classify(&content);

    if json {
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    print_snapshot(&content);
    print_payload(&payload);
    Ok(())
}

fn print_snapshot(content: &ClipboardContent) {
    println!("snapshot.ts_ms: {}", content.ts_ms);
    println!("items: {}", content.items.len());

    for (idx, item) in content.items.iter().enumerate() {
        println!("  item[{idx}]: {}", describe_item(item));
    }
}

fn print_payload(payload: &Payload) {
    match payload {
        Payload::Text(text) => {
            println!("payload: text ({} bytes)", text.text.len());
            println!("  \"{}\"", text_preview(text.text.as_bytes(), 160));
        }
        Payload::Image(image) => {
            println!("payload: image ({} item(s))", image.items.len());
            for item in &image.items {
                println!("  {} ({} bytes)", item.mime, item.bytes.len());
            }
        }
        Payload::FileImage(file_image) => {
            println!("payload: file-backed image ({} file(s))", file_image.uris().len());
            for (uri, mime) in file_image.uris().iter().zip(file_image.mimes()) {
                println!("  {} ({})", uri.display(), mime);
            }
        }
        Payload::Unsupported => println!("payload: unsupported"),
    }
}

fn describe_item(item: &ClipboardItem) -> String {
    let preview = if item.mime.is_text() {
        format!("\"{}\"", text_preview(&item.data, 160))
    } else {
        format!("hex:{}", hex_preview(&item.data, 24))
    };

    format!("mime={} bytes={} preview={}", item.mime, item.data_len(), preview)
}

fn text_preview(bytes: &[u8], max_len: usize) -> String {
    let clipped_len = bytes.len().min(max_len);
    let text = String::from_utf8_lossy(&bytes[..clipped_len]);
    let mut escaped = text.escape_default().to_string();

    if bytes.len() > max_len {
        escaped.push_str("...");
    }

    escaped
}

fn hex_preview(bytes: &[u8], max_len: usize) -> String {
    if bytes.is_empty() {
        return "(empty)".to_string();
    }

    let mut out = String::new();
    for (idx, byte) in bytes.iter().take(max_len).enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        out.push_str(&format!("{:02x}", byte));
    }

    if bytes.len() > max_len {
        out.push_str(" ...");
    }

    out
}
