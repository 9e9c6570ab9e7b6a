use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use xfilios::logging::{Verbosity, init_logging};
use xfilios::{Config, DocxHandler, ExcelHandler, FileKind, Handler, Record, TableHandler, codec};

#[derive(Parser)]
#[command(name = "xfilios")]
#[command(about = "Convert .docx and .xlsx files to and from base64 and download links")]
#[command(version)]
struct Cli {
    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Print debug logs (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a file as base64
    Encode { file: PathBuf },

    /// Decode a base64 payload (file or '-' for stdin) and write it out
    Decode {
        input: PathBuf,

        /// Output path; defaults to the configured document name in the current directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Expected payload kind; inferred from the output extension if omitted
        #[arg(short, long, value_enum)]
        kind: Option<FileKind>,
    },

    /// Print an HTML download link for a file
    Link {
        file: PathBuf,

        /// File name offered to the browser; defaults to the input name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Print table and paragraph counts of a .docx file as JSON
    Stat { file: PathBuf },

    /// Print the first sheet of an .xlsx file as JSON records
    Records { file: PathBuf },

    /// Write a JSON array of records to a single-sheet .xlsx file
    Sheet {
        input: PathBuf,
        output: PathBuf,

        /// Worksheet name; defaults to the configured sheet label
        #[arg(short, long)]
        label: Option<String>,
    },

    /// Combine the first sheet of several workbooks into one workbook
    Merge {
        output: PathBuf,

        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Write the default configuration file
    InitConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(Verbosity::from_flags(cli.quiet, cli.verbose));

    let config = Config::load()?;

    match cli.command {
        Command::Encode { file } => {
            let handler = load_handler(&file).await?;
            println!("{}", handler.to_base64_str()?);
        }
        Command::Decode {
            input,
            output,
            kind,
        } => {
            let payload = if input.as_os_str() == "-" {
                std::io::read_to_string(std::io::stdin())?
            } else {
                tokio::fs::read_to_string(&input)
                    .await
                    .with_context(|| format!("failed to read {}", input.display()))?
            };

            let (kind, output) = match (kind, output) {
                (Some(kind), Some(output)) => (kind, output),
                (None, Some(output)) => (kind_of(&output)?, output),
                (Some(kind), None) => (kind, PathBuf::from(config.output_file_name(kind.into()))),
                (None, None) => bail!("decode needs --output or --kind to pick the file type"),
            };
            let (dir, filename) = split_output(&output)?;

            let written = match kind {
                FileKind::Docx => {
                    let handler = DocxHandler::from_base64_or(
                        &payload,
                        Some(&filename),
                        &config.default_document_name,
                    )?;
                    handler.write_to_local(&dir, &filename).await?
                }
                FileKind::Xlsx => {
                    // Parse before writing so a corrupt payload is reported
                    let bytes = codec::decode(&payload)?;
                    TableHandler::from_bytes(bytes.clone())?;
                    let full_path = dir.join(&filename);
                    tokio::fs::write(&full_path, bytes).await?;
                    full_path
                }
            };
            eprintln!("Wrote {}", written.display());
        }
        Command::Link { file, name } => {
            let handler = load_handler(&file).await?;
            let filename = match name {
                Some(name) => name,
                None => file_name(&file)?,
            };
            println!("{}", handler.create_download_link_with(&filename, &config.link)?);
        }
        Command::Stat { file } => {
            let handler = DocxHandler::from_path(&file).await?;
            println!("{}", serde_json::to_string_pretty(&handler.stats())?);
        }
        Command::Records { file } => {
            let handler = TableHandler::from_path(&file).await?;
            println!("{}", serde_json::to_string_pretty(&handler.records())?);
        }
        Command::Sheet {
            input,
            output,
            label,
        } => {
            let content = tokio::fs::read_to_string(&input)
                .await
                .with_context(|| format!("failed to read {}", input.display()))?;
            let records: Vec<Record> = serde_json::from_str(&content)
                .with_context(|| format!("{} is not a JSON array of objects", input.display()))?;

            let label = config.sheet_label(label.as_deref());
            let table = TableHandler::from_records(&records, None, label)?;
            let excel = ExcelHandler::new(vec![table]);
            let (dir, filename) = split_output(&output)?;
            let written = excel.write_to_local(&dir, &filename).await?;
            eprintln!("Wrote sheet {label} to {}", written.display());
        }
        Command::Merge { output, inputs } => {
            let mut excel = ExcelHandler::default();
            for input in &inputs {
                let table = TableHandler::from_path(input)
                    .await
                    .with_context(|| format!("failed to read {}", input.display()))?;
                excel.push(table);
            }
            let (dir, filename) = split_output(&output)?;
            let written = excel.write_to_local(&dir, &filename).await?;
            eprintln!("Wrote {} sheets to {}", excel.len(), written.display());
        }
        Command::InitConfig => {
            match Config::init_default()? {
                Some(path) => eprintln!("Wrote {}", path.display()),
                None => bail!("no configuration directory is available"),
            }
        }
    }

    Ok(())
}

/// Load a .docx or .xlsx file as a handler, chosen by extension
async fn load_handler(path: &Path) -> Result<Box<dyn Handler>> {
    let handler: Box<dyn Handler> = match kind_of(path)? {
        FileKind::Docx => Box::new(DocxHandler::from_path(path).await?),
        FileKind::Xlsx => {
            let table = TableHandler::from_path(path).await?;
            Box::new(ExcelHandler::new(vec![table]))
        }
    };
    Ok(handler)
}

fn kind_of(path: &Path) -> Result<FileKind> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    match extension {
        "docx" => Ok(FileKind::Docx),
        "xlsx" => Ok(FileKind::Xlsx),
        other => bail!(
            "Unsupported file type .{}\n\
            Note: only .docx and .xlsx files are supported",
            other
        ),
    }
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .with_context(|| format!("{} has no file name", path.display()))
}

fn split_output(path: &Path) -> Result<(PathBuf, String)> {
    let filename = file_name(path)?;
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    Ok((dir, filename))
}
