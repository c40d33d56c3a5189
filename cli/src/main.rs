//! docoutline CLI - document structure inference tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use docoutline::{
    render, total_stats, Analysis, AnalysisStats, CleanupPreset, DuplicatePolicy, Engine,
    EngineOptions, JsonFormat, MatchTier, RenderOptions, UnitSelection,
};

#[derive(Parser)]
#[command(name = "docoutline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Infer course outlines and content blocks from document paragraphs", long_about = None)]
struct Cli {
    /// Input paragraph file (.json records or blank-line separated text)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Engine options JSON file
    #[arg(long, global = true, value_name = "FILE", env = "DOCOUTLINE_CONFIG")]
    config: Option<PathBuf>,

    /// Source identifier used when no title is found (defaults to the file name)
    #[arg(long, global = true, value_name = "NAME")]
    source_name: Option<String>,

    /// Text cleanup preset
    #[arg(long, global = true, value_enum)]
    cleanup: Option<CleanupLevel>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the document outline
    Outline {
        /// Input paragraph file
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

        /// Keep detected units without size normalization
        #[arg(long)]
        no_normalize: bool,

        /// Infer sections for units without decimal headings
        #[arg(long)]
        infer_sections: bool,

        /// Which copy of a repeated unit to keep (overrides the config file)
        #[arg(long, value_enum)]
        duplicates: Option<DuplicateMode>,

        /// Include front matter in Markdown output
        #[arg(long)]
        front_matter: bool,

        /// Unit range for Markdown output (e.g., "1-3", "1,4")
        #[arg(long)]
        units: Option<String>,

        /// Split text output into pages of at most N characters
        #[arg(long, value_name = "N")]
        page_chars: Option<usize>,
    },

    /// Classify unit content into blocks
    Blocks {
        /// Input paragraph file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Only this unit (all units if not specified)
        #[arg(short, long)]
        unit: Option<u32>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Render blocks as Markdown instead of JSON
        #[arg(long)]
        markdown: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Detect code listings (Python, SQL, JavaScript, HTML)
    Code {
        /// Input paragraph file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Only this unit (whole document if not specified)
        #[arg(short, long)]
        unit: Option<u32>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Match document content to declared units
    Match {
        /// Input paragraph file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Declared units JSON file
        #[arg(short, long, value_name = "FILE")]
        declared: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document structure statistics
    Info {
        /// Input paragraph files (totals are shown for more than one)
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Minimal cleanup (Unicode normalization only)
    Minimal,
    /// Standard cleanup
    Standard,
    /// Aggressive cleanup (page numbers, hyphenation)
    Aggressive,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
            CleanupLevel::Aggressive => CleanupPreset::Aggressive,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Full analysis as JSON
    Json,
    /// Outline as Markdown
    Markdown,
    /// Outline as plain text
    Text,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum DuplicateMode {
    /// Keep the last copy (tables of contents come first)
    Last,
    /// Keep the first copy
    First,
}

impl From<DuplicateMode> for DuplicatePolicy {
    fn from(mode: DuplicateMode) -> Self {
        match mode {
            DuplicateMode::Last => DuplicatePolicy::LastWins,
            DuplicateMode::First => DuplicatePolicy::FirstWins,
        }
    }
}

/// Options shared by every subcommand.
struct GlobalArgs {
    config: Option<PathBuf>,
    source_name: Option<String>,
    cleanup: Option<CleanupLevel>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let globals = GlobalArgs {
        config: cli.config,
        source_name: cli.source_name,
        cleanup: cli.cleanup,
    };

    let result = match cli.command {
        Some(Commands::Outline {
            input,
            output,
            format,
            compact,
            no_normalize,
            infer_sections,
            duplicates,
            front_matter,
            units,
            page_chars,
        }) => cmd_outline(
            &globals,
            &input,
            output.as_deref(),
            format,
            compact,
            no_normalize,
            infer_sections,
            duplicates,
            front_matter,
            units.as_deref(),
            page_chars,
        ),
        Some(Commands::Blocks {
            input,
            unit,
            output,
            markdown,
            compact,
        }) => cmd_blocks(&globals, &input, unit, output.as_deref(), markdown, compact),
        Some(Commands::Code {
            input,
            unit,
            output,
            compact,
        }) => cmd_code(&globals, &input, unit, output.as_deref(), compact),
        Some(Commands::Match {
            input,
            declared,
            output,
            compact,
        }) => cmd_match(&globals, &input, &declared, output.as_deref(), compact),
        Some(Commands::Info { inputs }) => cmd_info(&globals, &inputs),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: print the outline as JSON
            if let Some(input) = cli.input {
                cmd_outline(
                    &globals,
                    &input,
                    None,
                    OutputFormat::Json,
                    false,
                    false,
                    false,
                    None,
                    false,
                    None,
                    None,
                )
            } else {
                println!("{}", "Usage: docoutline <FILE>".yellow());
                println!("       docoutline --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Build the engine from the config file and global flags.
fn build_engine(globals: &GlobalArgs) -> Result<Engine, Box<dyn std::error::Error>> {
    let options = match &globals.config {
        Some(path) => {
            log::debug!("Loading engine options from {}", path.display());
            EngineOptions::from_json(&fs::read_to_string(path)?)?
        }
        None => EngineOptions::default(),
    };

    let mut engine = Engine::new().with_options(options);
    if let Some(name) = &globals.source_name {
        engine = engine.with_source_name(name.clone());
    }
    if let Some(level) = globals.cleanup {
        engine = engine.with_cleanup(level.into());
    }
    Ok(engine)
}

fn analyze(engine: &Engine, input: &Path) -> Result<Analysis, Box<dyn std::error::Error>> {
    let analysis = engine.analyze_file(input)?;
    for warning in &analysis.warnings {
        eprintln!("{}: {}", "Warning".yellow().bold(), warning);
    }
    Ok(analysis)
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_outline(
    globals: &GlobalArgs,
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    compact: bool,
    no_normalize: bool,
    infer_sections: bool,
    duplicates: Option<DuplicateMode>,
    front_matter: bool,
    units: Option<&str>,
    page_chars: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = build_engine(globals)?;
    if let Some(mode) = duplicates {
        engine = engine.with_duplicate_policy(mode.into());
    }
    if no_normalize {
        engine = engine.without_normalization();
    }
    if infer_sections {
        engine = engine.with_section_inference();
    }
    let analysis = analyze(&engine, input)?;

    let content = match format {
        OutputFormat::Json => analysis.to_json(json_format(compact))?,
        OutputFormat::Markdown => {
            let selection = match units {
                Some(u) => UnitSelection::parse(u).map_err(|e| format!("Invalid unit range: {}", e))?,
                None => UnitSelection::All,
            };
            let options = RenderOptions::new()
                .with_front_matter(front_matter)
                .with_units(selection);
            analysis.to_markdown(&options)
        }
        OutputFormat::Text => match page_chars {
            Some(chars) => {
                let options = RenderOptions::new().with_page_chars(chars);
                render::paginate(&analysis.to_text(), options.page_chars).join("\n\n\x0c\n\n")
            }
            None => analysis.to_text(),
        },
    };

    write_output(output, &content)
}

fn cmd_blocks(
    globals: &GlobalArgs,
    input: &Path,
    unit: Option<u32>,
    output: Option<&Path>,
    markdown: bool,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let analysis = analyze(&build_engine(globals)?, input)?;

    let numbers: Vec<u32> = match unit {
        Some(n) => {
            if analysis.unit(n).is_none() {
                return Err(format!("Unit {} not found", n).into());
            }
            vec![n]
        }
        None => analysis.units.iter().map(|u| u.number).collect(),
    };

    let content = if markdown {
        let options = RenderOptions::default();
        numbers
            .iter()
            .filter_map(|&n| {
                let blocks = analysis.unit_blocks(n)?;
                Some(format!(
                    "## Unit {}\n\n{}",
                    n,
                    render::blocks_to_markdown(&blocks, &options)
                ))
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    } else {
        let by_unit: serde_json::Map<String, serde_json::Value> = numbers
            .iter()
            .filter_map(|&n| {
                let blocks = analysis.unit_blocks(n)?;
                Some(serde_json::to_value(blocks).map(|v| (n.to_string(), v)))
            })
            .collect::<Result<_, _>>()?;
        render::to_json(&by_unit, json_format(compact))?
    };

    write_output(output, &content)
}

fn cmd_code(
    globals: &GlobalArgs,
    input: &Path,
    unit: Option<u32>,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let analysis = analyze(&build_engine(globals)?, input)?;

    let blocks = match unit {
        Some(n) => analysis
            .unit_code(n)
            .ok_or_else(|| format!("Unit {} not found", n))?,
        None => analysis.code_blocks(),
    };
    eprintln!("{}: {}", "Code blocks".bold(), blocks.len());

    let content = render::to_json(&blocks, json_format(compact))?;
    write_output(output, &content)
}

fn cmd_match(
    globals: &GlobalArgs,
    input: &Path,
    declared: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let analysis = analyze(&build_engine(globals)?, input)?;
    let declared = docoutline::input::parse_declared_file(declared)?;
    let outcome = analysis.match_declared(&declared);

    let tier = match outcome.tier {
        MatchTier::DirectNumber => "direct number match".green(),
        MatchTier::Redistribution => "chapter redistribution".cyan(),
        MatchTier::FlatSplit => "flat split".yellow(),
        MatchTier::Unmatched => "unmatched".red(),
    };
    eprintln!("{}: {}", "Tier".bold(), tier);
    for warning in &outcome.warnings {
        eprintln!("{}: {}", "Warning".yellow().bold(), warning);
    }

    let content = render::to_json(&outcome.contents, json_format(compact))?;
    write_output(output, &content)
}

fn cmd_info(globals: &GlobalArgs, inputs: &[PathBuf]) -> Result<(), Box<dyn std::error::Error>> {
    let engine = build_engine(globals)?;
    let mut analyses = Vec::with_capacity(inputs.len());
    for (i, input) in inputs.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let analysis = analyze(&engine, input)?;
        print_info(input, &analysis);
        analyses.push(analysis);
    }

    if analyses.len() > 1 {
        println!();
        println!("{}", format!("Totals ({} files)", analyses.len()).cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        let total = total_stats(&analyses);
        print_structure(&total);
        print_content_stats(&total);
    }

    Ok(())
}

fn print_info(input: &Path, analysis: &Analysis) {
    let outline = &analysis.outline;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    if !outline.module_title.is_empty() {
        println!("{}: {}", "Module".bold(), outline.module_title);
    }
    if let Some(ref code) = outline.module_code {
        println!("{}: {}", "Module code".bold(), code);
    }
    if !outline.document_title.is_empty() {
        println!("{}: {}", "Title".bold(), outline.document_title);
    }

    println!();
    println!("{}", "Structure".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    print_structure(&analysis.stats);

    for unit in &analysis.units {
        println!(
            "  {} {} {}",
            "├─".dimmed(),
            format!("Unit {}:", unit.number).bold(),
            unit.title
        );
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    print_content_stats(&analysis.stats);
}

fn print_structure(stats: &AnalysisStats) {
    println!("{}: {}", "Units".bold(), stats.unit_count);
    println!("{}: {}", "Normalized units".bold(), stats.normalized_unit_count);
    println!("{}: {}", "Sections".bold(), stats.section_count);
    println!("{}: {}", "Subsections".bold(), stats.subsection_count);
    println!("{}: {}", "Chapters".bold(), stats.chapter_count);
    println!("{}: {}", "Suppressed copies".bold(), stats.suppressed_unit_count);
}

fn print_content_stats(stats: &AnalysisStats) {
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "List items".bold(), stats.list_item_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
}

fn cmd_version() {
    println!("{} {}", "docoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document structure inference tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/docoutline".dimmed());
    println!("License: MIT");
}
