use anyhow::Result;
use sentiment_relay::{config, frontend::BackendClient};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const TITLE: &str = "Sentiment Analyzer (Mistral)";

#[tokio::main]
async fn main() -> Result<()> {
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let client = BackendClient::new(&config.frontend)?;

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(format!("{}\n{}\n\n", TITLE, "=".repeat(TITLE.len())).as_bytes())
        .await?;

    loop {
        stdout
            .write_all(b"Enter your sentence here (blank line to Analyze, Ctrl-D to quit):\n")
            .await?;
        stdout.flush().await?;

        // A blank line submits, end of input submits what was typed and exits.
        let mut text = Vec::new();
        let mut finished = false;
        loop {
            match lines.next_line().await? {
                Some(line) if line.trim().is_empty() => break,
                Some(line) => text.push(line),
                None => {
                    finished = true;
                    break;
                }
            }
        }

        if finished && text.is_empty() {
            break;
        }

        let outcome = client.analyze(&text.join("\n")).await;
        stdout.write_all(format!("\n{}\n\n", outcome).as_bytes()).await?;

        if finished {
            break;
        }
    }

    stdout.flush().await?;
    Ok(())
}
