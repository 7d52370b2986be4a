//! sectionize CLI - split PDF documents into titled sections

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use sectionize::render::{to_json, to_markdown};
use sectionize::{
    HeadingOutcome, HeadingVocabulary, JsonFormat, PageSelection, SegmentOptions, SegmentReport,
    Sectionizer,
};

#[derive(Parser)]
#[command(name = "sectionize")]
#[command(version)]
#[command(about = "Split PDF documents into titled sections by heading detection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a PDF into titled chunks
    Chunks {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        segment: SegmentArgs,
    },

    /// Show the font size profile of a PDF
    Profile {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the profile as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        segment: SegmentArgs,
    },

    /// List detected headings
    Headings {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        segment: SegmentArgs,
    },

    /// Show version information
    Version,
}

/// Segmentation settings shared by all document commands.
#[derive(Args, Debug)]
struct SegmentArgs {
    /// Ignore spans smaller than this font size
    #[arg(long, env = "SECTIONIZE_MIN_FONT_SIZE", default_value_t = sectionize::segment::DEFAULT_MIN_FONT_SIZE)]
    min_font_size: f32,

    /// Word budget per chunk
    #[arg(long, env = "SECTIONIZE_MAX_WORDS", default_value_t = sectionize::segment::DEFAULT_MAX_WORDS_PER_CHUNK)]
    max_words: usize,

    /// Sections with fewer words are merged into the next heading
    #[arg(long, env = "SECTIONIZE_MIN_SECTION_WORDS", default_value_t = sectionize::segment::DEFAULT_MIN_SECTION_WORDS)]
    min_section_words: usize,

    /// Heading threshold as a multiple of the body font size
    #[arg(long, env = "SECTIONIZE_FONT_RATIO", default_value_t = sectionize::segment::DEFAULT_FONT_THRESHOLD_RATIO)]
    font_ratio: f32,

    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long)]
    pages: Option<String>,

    /// JSON file with skip and major heading patterns
    #[arg(long, value_name = "FILE")]
    vocabulary: Option<PathBuf>,
}

impl SegmentArgs {
    fn sectionizer(&self) -> Result<Sectionizer, Box<dyn std::error::Error>> {
        let page_selection = if let Some(p) = &self.pages {
            PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?
        } else {
            PageSelection::All
        };

        let options = SegmentOptions::new()
            .with_min_font_size(self.min_font_size)
            .with_max_words_per_chunk(self.max_words)
            .with_min_section_words(self.min_section_words)
            .with_font_threshold_ratio(self.font_ratio)
            .with_pages(page_selection);
        options.validate()?;
        log::debug!("Segment options: {:?}", options);

        let mut sectionizer = Sectionizer::new().with_options(options);
        if let Some(path) = &self.vocabulary {
            let json = fs::read_to_string(path)?;
            sectionizer = sectionizer.with_vocabulary(HeadingVocabulary::from_json(&json)?);
        }
        Ok(sectionizer)
    }

    fn run(&self, input: &Path) -> Result<SegmentReport, Box<dyn std::error::Error>> {
        let sectionizer = self.sectionizer()?;
        sectionizer
            .run(input)
            .map_err(|e| format!("could not extract sections: {}", e).into())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// JSON array of {title, text}
    Json,
    /// One "## title" block per chunk
    Markdown,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Chunks {
            input,
            output,
            format,
            compact,
            segment,
        } => cmd_chunks(&input, output.as_deref(), format, compact, &segment),
        Commands::Profile {
            input,
            json,
            segment,
        } => cmd_profile(&input, json, &segment),
        Commands::Headings { input, segment } => cmd_headings(&input, &segment),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_chunks(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    compact: bool,
    segment: &SegmentArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = output.map(|_| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Segmenting PDF...");
        pb
    });

    let report = segment.run(input)?;

    let rendered = match format {
        OutputFormat::Json => {
            let json_format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            to_json(&report.chunks, json_format)?
        }
        OutputFormat::Markdown => to_markdown(&report.chunks),
    };

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if let Some(path) = output {
        write_output(path, &rendered)?;
        println!(
            "{} {} ({} chunks, {} words)",
            "Saved to".green(),
            path.display(),
            report.chunks.len(),
            report.total_words()
        );
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn cmd_profile(
    input: &Path,
    json: bool,
    segment: &SegmentArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = segment.run(input)?;
    let profile = &report.profile;

    if json {
        let summary = serde_json::json!({
            "body_font": profile.body_font,
            "heading_threshold": profile.heading_threshold,
            "line_count": report.line_count,
            "font_distribution": profile.top_sizes(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", "Font Profile".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Lines".bold(), report.line_count);
    println!("{}: {:.1}pt", "Body font".bold(), profile.body_font);
    println!(
        "{}: {:.1}pt",
        "Heading threshold".bold(),
        profile.heading_threshold
    );

    println!();
    println!("{}", "Size Distribution".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (size, count) in profile.top_sizes() {
        let marker = if *size >= profile.heading_threshold {
            "heading".yellow()
        } else {
            "".normal()
        };
        println!("{:>7.1}pt  {:>6} lines  {}", size, count, marker);
    }

    Ok(())
}

fn cmd_headings(input: &Path, segment: &SegmentArgs) -> Result<(), Box<dyn std::error::Error>> {
    let report = segment.run(input)?;

    if report.headings.is_empty() {
        println!("{}", "No headings detected".yellow());
        return Ok(());
    }

    for heading in &report.headings {
        let outcome = match heading.outcome {
            HeadingOutcome::Started => "started".green(),
            HeadingOutcome::Merged => "merged".yellow(),
        };
        println!(
            "{:>6.1}pt  {:<8} {}",
            heading.font_size, outcome, heading.text
        );
    }

    println!(
        "\n{} {} headings, {} chunks",
        "Done!".green().bold(),
        report.headings.len(),
        report.chunks.len()
    );

    Ok(())
}

fn write_output(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}

fn cmd_version() {
    println!("{} {}", "sectionize".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Heading detection and section chunking for PDF documents");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_chunks() {
        let cli = Cli::parse_from([
            "sectionize",
            "chunks",
            "car.pdf",
            "--format",
            "markdown",
            "--max-words",
            "400",
            "--pages",
            "1-3",
        ]);
        match cli.command {
            Commands::Chunks {
                input,
                format,
                segment,
                ..
            } => {
                assert_eq!(input, PathBuf::from("car.pdf"));
                assert!(format == OutputFormat::Markdown);
                assert_eq!(segment.max_words, 400);
                let sectionizer = segment.sectionizer().unwrap();
                assert_eq!(sectionizer.options().max_words_per_chunk, 400);
                assert_eq!(sectionizer.options().pages, PageSelection::Range(1..=3));
            }
            _ => panic!("expected chunks command"),
        }
    }

    #[test]
    fn test_invalid_page_range() {
        let cli = Cli::parse_from(["sectionize", "headings", "car.pdf", "--pages", "x"]);
        match cli.command {
            Commands::Headings { segment, .. } => assert!(segment.sectionizer().is_err()),
            _ => panic!("expected headings command"),
        }
    }

    #[test]
    fn test_vocabulary_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.json");
        fs::write(&path, r#"{"skip": [], "major": [{"pattern": "^holding\\b"}]}"#).unwrap();

        let cli = Cli::parse_from([
            "sectionize",
            "headings",
            "case.pdf",
            "--vocabulary",
            path.to_str().unwrap(),
        ]);
        match cli.command {
            Commands::Headings { segment, .. } => assert!(segment.sectionizer().is_ok()),
            _ => panic!("expected headings command"),
        }
    }

    #[test]
    fn test_write_output_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("chunks.md");
        write_output(&path, "## Introduction\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "## Introduction\n");
    }
}
