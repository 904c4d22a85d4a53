//! unresume CLI - résumé parsing tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use unresume::{
    detect_format_from_bytes, extract_lines, split_sections, DocumentFormat, JsonFormat,
    ParseOptions, ResumeParser, Section,
};

#[derive(Parser)]
#[command(name = "unresume")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Parse PDF and DOCX résumés into structured JSON", long_about = None)]
struct Cli {
    /// Input résumé file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a résumé into a JSON record
    Parse {
        /// Input résumé file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Declared document format (inferred from the file when omitted)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Minimum characters of extracted text
        #[arg(long, value_name = "N", env = "UNRESUME_MIN_CHARS")]
        min_chars: Option<usize>,

        /// Fail instead of retrying in reduced mode
        #[arg(long)]
        no_fallback: bool,
    },

    /// Print the reconstructed text lines
    Lines {
        /// Input résumé file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Declared document format (inferred from the file when omitted)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Print the lines as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Print the lines of each detected section
    Sections {
        /// Input résumé file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Declared document format (inferred from the file when omitted)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Print the buckets as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
enum FormatArg {
    /// Page-based document (PDF)
    Pdf,
    /// Flow-text document (DOCX)
    Docx,
}

impl From<FormatArg> for DocumentFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Pdf => DocumentFormat::PageBased,
            FormatArg::Docx => DocumentFormat::FlowText,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Parse {
            input,
            format,
            output,
            compact,
            min_chars,
            no_fallback,
        }) => cmd_parse(&input, format, output.as_deref(), compact, min_chars, no_fallback),
        Some(Commands::Lines {
            input,
            format,
            json,
        }) => cmd_lines(&input, format, json),
        Some(Commands::Sections {
            input,
            format,
            json,
        }) => cmd_sections(&input, format, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: parse if input is provided
            if let Some(input) = cli.input {
                cmd_parse(&input, None, None, false, None, false)
            } else {
                println!("{}", "Usage: unresume <FILE>".yellow());
                println!("       unresume --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Read a file and settle its format: the flag, then the extension, then the content.
fn load(
    input: &Path,
    format: Option<FormatArg>,
) -> Result<(Vec<u8>, DocumentFormat), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let format = match format {
        Some(arg) => arg.into(),
        None => match DocumentFormat::from_path(input) {
            Ok(format) => format,
            Err(_) => detect_format_from_bytes(&data)?,
        },
    };
    log::debug!("{} treated as {}", input.display(), format);
    Ok((data, format))
}

fn cmd_parse(
    input: &Path,
    format: Option<FormatArg>,
    output: Option<&Path>,
    compact: bool,
    min_chars: Option<usize>,
    no_fallback: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (data, format) = load(input, format)?;

    let mut options = ParseOptions::new().with_fallback(!no_fallback);
    if let Some(chars) = min_chars {
        options = options.with_min_content_chars(chars);
    }
    let record = ResumeParser::with_options(options).parse_bytes(&data, format)?;

    let json_format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = unresume::render::to_json(&record, json_format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_lines(
    input: &Path,
    format: Option<FormatArg>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (data, format) = load(input, format)?;
    let lines = extract_lines(&data, format, &ParseOptions::default())?;

    if json {
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        println!("{}", serde_json::to_string_pretty(&texts)?);
        return Ok(());
    }

    let width = lines.len().to_string().len();
    for line in &lines {
        println!("{:>width$} {}", line.index.to_string().dimmed(), line.text);
    }
    Ok(())
}

fn cmd_sections(
    input: &Path,
    format: Option<FormatArg>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (data, format) = load(input, format)?;
    let lines = extract_lines(&data, format, &ParseOptions::default())?;
    let buckets = split_sections(&lines);

    if json {
        println!("{}", unresume::render::to_json(&buckets, JsonFormat::Pretty)?);
        return Ok(());
    }

    for section in Section::ALL {
        let bucket = buckets.get(section);
        println!(
            "{} {}",
            section.key().to_uppercase().cyan().bold(),
            format!("({} lines)", bucket.len()).dimmed()
        );
        println!("{}", "─".repeat(40).dimmed());
        for line in bucket {
            println!("  {}", line.text);
        }
        println!();
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unresume".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Résumé parsing tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unresume".dimmed());
    println!("License: MIT");
}
