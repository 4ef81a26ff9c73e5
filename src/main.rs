use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use msgwire::config::{OutputFormat, ToolConfig, DEFAULT_CONFIG_FILE};
use msgwire::document::MessageDocument;
use msgwire::utils::io::{read_bounded, read_message, write_message};
use msgwire::{encode, inspect};

#[derive(Parser)]
#[command(name = "msgwire")]
#[command(about = "Encode, decode and inspect msgwire messages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, help = "Config file path")]
    config: Option<String>,

    #[arg(long, global = true, help = "Output as JSON")]
    json: bool,

    #[arg(long, global = true, help = "Strict decoding (overrides config)")]
    strict: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Encode a JSON message document
    Encode {
        #[arg(long, help = "JSON message document")]
        input: String,
        #[arg(long, help = "Write the encoded message to this file")]
        output: Option<String>,
    },
    /// Decode an encoded message file
    Decode {
        #[arg(long)]
        input: String,
    },
    /// Show the layout of an encoded message file
    Inspect {
        #[arg(long)]
        input: String,
    },
    GenerateConfig {
        #[arg(long, default_value = DEFAULT_CONFIG_FILE, help = "Config file path")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ToolConfig::load_or_default(cli.config.as_deref())?;
    if cli.strict {
        config.strict_decode = true;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli, &config).await {
        Err(e) if cli.json => {
            println!("{}", serde_json::json!({"error": format!("{:#}", e)}));
            std::process::exit(1);
        }
        result => result,
    }
}

async fn run(cli: &Cli, config: &ToolConfig) -> Result<()> {
    match &cli.command {
        Commands::Encode { input, output } => {
            let text =
                std::fs::read_to_string(input).with_context(|| format!("reading {}", input))?;
            let document: MessageDocument =
                serde_json::from_str(&text).with_context(|| format!("parsing {}", input))?;
            let message = document.into_message()?;
            debug!("Loaded message with {} headers", message.header_count());

            match output {
                Some(path) => {
                    let mut file = tokio::fs::File::create(path)
                        .await
                        .with_context(|| format!("creating {}", path))?;
                    let written = write_message(&mut file, &message).await?;
                    info!("Encoded {} bytes to {}", written, path);
                    if cli.json {
                        println!("{}", serde_json::json!({"output": path, "bytes": written}));
                    }
                }
                None => {
                    let bytes = encode(&message)?;
                    match config.output_format {
                        OutputFormat::Hex if cli.json => {
                            let summary = serde_json::json!({
                                "bytes": bytes.len(),
                                "hex": hex::encode(&bytes),
                            });
                            println!("{}", summary);
                        }
                        OutputFormat::Hex => println!("{}", hex::encode(&bytes)),
                        OutputFormat::Binary => {
                            let mut stdout = std::io::stdout().lock();
                            stdout.write_all(&bytes)?;
                            stdout.flush()?;
                        }
                    }
                }
            }
        }
        Commands::Decode { input } => {
            let mut file = tokio::fs::File::open(input)
                .await
                .with_context(|| format!("opening {}", input))?;
            let mode = config.decode_mode();
            let message = read_message(&mut file, config.max_input_size, mode).await?;
            info!(
                "Decoded {} headers and {} payload bytes ({:?} mode)",
                message.header_count(),
                message.payload().len(),
                mode
            );
            let document = MessageDocument::from_message(&message);
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        Commands::Inspect { input } => {
            let mut file = tokio::fs::File::open(input)
                .await
                .with_context(|| format!("opening {}", input))?;
            let bytes = read_bounded(&mut file, config.max_input_size).await?;
            let report = inspect(&bytes)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Message layout: {}", input);
                println!("==============");
                println!("   Total size: {} bytes", report.total_len);
                println!("   Headers: {}", report.header_count);
                for header in &report.headers {
                    println!(
                        "     {} (name {} bytes, value {} bytes)",
                        header.name, header.name_len, header.value_len
                    );
                }
                let duplicates = report.duplicate_names();
                if !duplicates.is_empty() {
                    println!("   Duplicate names: {}", duplicates.join(", "));
                }
                println!("   Payload: {} bytes", report.payload_len);
                if report.trailing_bytes > 0 {
                    println!("   Trailing bytes: {}", report.trailing_bytes);
                }
                println!("   CRC32: {:08x}", report.crc32);
                println!("   SHA-256: {}", report.sha256);
            }
        }
        Commands::GenerateConfig { output } => {
            ToolConfig::default().save(output)?;
            if cli.json {
                println!("{}", serde_json::json!({"config": output}));
            } else {
                println!("Generated config at {}", output);
            }
        }
    }
    Ok(())
}
