//! pagecodec CLI - capture paged documents and render them to template source

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use pagecodec::capture::{capture_component_tree, capture_markup, parse_markup};
use pagecodec::render::{to_json, to_source_with_stats};
use pagecodec::style::{export_dictionary, format_subset, StyleInliner, DEFAULT_STYLE_SET};
use pagecodec::{
    CaptureOptions, CleanupPipeline, CleanupPreset, ComponentNode, Document, FormatPolicy,
    InlineOptions, JsonFormat, RenderOptions, StyleRegistry, TemplateFile,
};

#[derive(Parser)]
#[command(name = "pagecodec")]
#[command(version)]
#[command(about = "Capture paged documents and render them to template source", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON template file to source
    Render {
        /// Template file (`-` for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Layout policy
        #[arg(long, value_enum, default_value = "detailed", env = "PAGECODEC_POLICY")]
        policy: Policy,

        /// Import line opening the emitted block
        #[arg(long)]
        import_line: Option<String>,

        /// Print render statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Capture a markup snapshot (HTML) into source or a template file
    #[command(alias = "markup")]
    CaptureMarkup {
        /// Markup file (`-` for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "source")]
        emit: Emit,

        /// Layout policy for source output
        #[arg(long, value_enum, default_value = "detailed", env = "PAGECODEC_POLICY")]
        policy: Policy,

        /// Reserved attribute prefix
        #[arg(long, default_value = pagecodec::capture::DEFAULT_PRIVATE_PREFIX)]
        prefix: String,
    },

    /// Capture a rendered component tree (JSON) into source or a template file
    #[command(alias = "tree")]
    CaptureTree {
        /// Component tree file (`-` for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "source")]
        emit: Emit,

        /// Layout policy for source output
        #[arg(long, value_enum, default_value = "detailed", env = "PAGECODEC_POLICY")]
        policy: Policy,

        /// Reserved attribute prefix
        #[arg(long, default_value = pagecodec::capture::DEFAULT_PRIVATE_PREFIX)]
        prefix: String,
    },

    /// Replace style dictionary references with literal values
    Inline {
        /// Source file (`-` for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Style set name
        #[arg(short, long, default_value = DEFAULT_STYLE_SET)]
        set: String,

        /// Registry JSON file (built-in registry if not specified)
        #[arg(short, long, value_name = "FILE", env = "PAGECODEC_REGISTRY")]
        registry: Option<PathBuf>,

        /// Local binding holding the dictionary
        #[arg(long, default_value = pagecodec::style::DEFAULT_BINDING)]
        binding: String,

        /// Keep the dictionary import lines
        #[arg(long)]
        keep_imports: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Clean generated source text (code fences, line endings, whitespace)
    Clean {
        /// Text file (`-` for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Cleanup preset
        #[arg(long, value_enum, default_value = "standard")]
        cleanup: CleanupLevel,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print a style dictionary as a source literal
    Styles {
        /// Style set name
        #[arg(short, long, default_value = DEFAULT_STYLE_SET)]
        set: String,

        /// Registry JSON file (built-in registry if not specified)
        #[arg(short, long, value_name = "FILE", env = "PAGECODEC_REGISTRY")]
        registry: Option<PathBuf>,

        /// Only these dotted paths (e.g. `colors.primary`)
        #[arg(short, long = "path", value_name = "PATH")]
        paths: Vec<String>,

        /// Layout policy
        #[arg(long, value_enum, default_value = "detailed")]
        policy: Policy,

        /// List registered sets instead
        #[arg(long)]
        list: bool,
    },

    /// Show template information
    Info {
        /// Template file (`-` for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Policy {
    /// Inline styles, unit-suffixed numbers
    Compact,
    /// Wrapped styles, bare numbers, grouping blank lines
    Detailed,
}

impl From<Policy> for FormatPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Compact => FormatPolicy::Compact,
            Policy::Detailed => FormatPolicy::Detailed,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// Template source
    Source,
    /// Pretty JSON template file
    Json,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Fence extraction and line endings only
    Minimal,
    /// Full cleanup (default)
    Standard,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
        }
    }
}

type CmdResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            input,
            output,
            policy,
            import_line,
            stats,
        } => cmd_render(&input, output.as_deref(), policy, import_line, stats),
        Commands::CaptureMarkup {
            input,
            output,
            emit,
            policy,
            prefix,
        } => cmd_capture_markup(&input, output.as_deref(), emit, policy, prefix),
        Commands::CaptureTree {
            input,
            output,
            emit,
            policy,
            prefix,
        } => cmd_capture_tree(&input, output.as_deref(), emit, policy, prefix),
        Commands::Inline {
            input,
            set,
            registry,
            binding,
            keep_imports,
            output,
        } => cmd_inline(
            &input,
            &set,
            registry.as_deref(),
            binding,
            keep_imports,
            output.as_deref(),
        ),
        Commands::Clean {
            input,
            cleanup,
            output,
        } => cmd_clean(&input, cleanup, output.as_deref()),
        Commands::Styles {
            set,
            registry,
            paths,
            policy,
            list,
        } => cmd_styles(&set, registry.as_deref(), &paths, policy, list),
        Commands::Info { input, json } => cmd_info(&input, json),
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

fn cmd_render(
    input: &Path,
    output: Option<&Path>,
    policy: Policy,
    import_line: Option<String>,
    stats: bool,
) -> CmdResult {
    let template = TemplateFile::from_json_str(&read_input(input)?)?;

    let mut options = RenderOptions::new().with_policy(policy.into());
    if let Some(line) = import_line {
        options = options.with_import_line(line);
    }

    let result = to_source_with_stats(&template.document, &options)?;
    write_output(output, &result.source)?;

    if stats {
        let s = &result.stats;
        eprintln!("{}", "Render Statistics".cyan().bold());
        eprintln!("{}", "─".repeat(40).dimmed());
        eprintln!("{}: {}", "Pages".bold(), s.page_count);
        eprintln!("{}: {}", "Text".bold(), s.text_count);
        eprintln!("{}: {}", "Images".bold(), s.image_count);
        eprintln!("{}: {}", "Containers".bold(), s.container_count);
        eprintln!("{}: {}", "Shapes".bold(), s.shape_count);
        eprintln!("{}: {}", "Wrapped styles".bold(), s.wrapped_style_count);
        eprintln!("{}: {}", "Lines".bold(), s.line_count);
    }

    Ok(())
}

fn cmd_capture_markup(
    input: &Path,
    output: Option<&Path>,
    emit: Emit,
    policy: Policy,
    prefix: String,
) -> CmdResult {
    let snapshot = parse_markup(&read_input(input)?)?;
    let options = CaptureOptions::new().with_private_prefix(prefix);
    let doc = capture_markup(&snapshot, &options)
        .ok_or("no document found in markup snapshot")?;
    emit_document(&doc, output, emit, policy)
}

fn cmd_capture_tree(
    input: &Path,
    output: Option<&Path>,
    emit: Emit,
    policy: Policy,
    prefix: String,
) -> CmdResult {
    let tree = ComponentNode::from_json_str(&read_input(input)?)?;
    let options = CaptureOptions::new().with_private_prefix(prefix);
    let doc = capture_component_tree(&tree, &options)
        .ok_or("no document found in component tree")?;
    emit_document(&doc, output, emit, policy)
}

fn emit_document(doc: &Document, output: Option<&Path>, emit: Emit, policy: Policy) -> CmdResult {
    let text = match emit {
        Emit::Source => {
            let options = RenderOptions::new().with_policy(policy.into());
            pagecodec::render::to_source(doc, &options)?
        }
        Emit::Json => to_json(doc, JsonFormat::Pretty)?,
    };
    write_output(output, &text)
}

fn cmd_inline(
    input: &Path,
    set: &str,
    registry: Option<&Path>,
    binding: String,
    keep_imports: bool,
    output: Option<&Path>,
) -> CmdResult {
    let source = read_input(input)?;
    let registry = load_registry(registry)?;

    let options = InlineOptions::new()
        .with_binding(binding)
        .with_strip_imports(!keep_imports);
    let result = StyleInliner::new(&registry)
        .with_options(options)
        .inline(&source, set);

    for diagnostic in &result.diagnostics {
        eprintln!("{}: {}", "Warning".yellow().bold(), diagnostic);
    }
    write_output(output, &result.source)?;

    if output.is_some() {
        println!(
            "{} {} references inlined",
            "Done!".green().bold(),
            result.replacements
        );
    }

    Ok(())
}

fn cmd_clean(input: &Path, cleanup: CleanupLevel, output: Option<&Path>) -> CmdResult {
    let text = read_input(input)?;
    let cleaned = CleanupPipeline::from_preset(cleanup.into()).process(&text);
    write_output(output, &cleaned)
}

fn cmd_styles(
    set: &str,
    registry: Option<&Path>,
    paths: &[String],
    policy: Policy,
    list: bool,
) -> CmdResult {
    let registry = load_registry(registry)?;

    if list {
        for name in registry.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let dictionary = registry
        .resolve(set)
        .ok_or_else(|| format!("style set '{}' is not registered", set))?;

    if paths.is_empty() {
        print!("{}", export_dictionary(set, dictionary, policy.into()));
    } else {
        let paths: Vec<&str> = paths.iter().map(String::as_str).collect();
        println!("{}", format_subset(dictionary, &paths, policy.into()));
    }

    Ok(())
}

fn cmd_info(input: &Path, json: bool) -> CmdResult {
    let template = TemplateFile::from_json_str(&read_input(input)?)?;
    let doc = &template.document;

    if json {
        let info = serde_json::json!({
            "version": template.version,
            "title": doc.title,
            "type": doc.doc_type.as_str(),
            "paperSize": doc.paper_size,
            "pages": doc.page_count(),
            "elements": doc.element_count(),
            "description": doc.description,
            "metadata": doc.metadata,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", "Template Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Version".bold(), template.version);
    println!("{}: {}", "Title".bold(), doc.title);
    println!("{}: {}", "Type".bold(), doc.doc_type);
    println!("{}: {}", "Paper".bold(), doc.paper_size);
    println!("{}: {}", "Pages".bold(), doc.page_count());
    println!("{}: {}", "Elements".bold(), doc.element_count());

    if let Some(ref description) = doc.description {
        println!("{}: {}", "Description".bold(), description);
    }
    if let Some(ref metadata) = doc.metadata {
        if let Some(ref author) = metadata.author {
            println!("{}: {}", "Author".bold(), author);
        }
        if let Some(ref created) = metadata.created_at {
            println!("{}: {}", "Created".bold(), created.to_rfc3339());
        }
        if let Some(ref updated) = metadata.updated_at {
            println!("{}: {}", "Updated".bold(), updated.to_rfc3339());
        }
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let text = doc.plain_text();
    println!("{}: {}", "Words".bold(), text.split_whitespace().count());
    println!("{}: {}", "Characters".bold(), text.chars().count());

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pagecodec".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Paged document capture and template source codec");
    println!();
    println!("License: MIT");
}

fn load_registry(path: Option<&Path>) -> Result<StyleRegistry, pagecodec::Error> {
    match path {
        Some(path) => {
            log::debug!("Loading style registry from {}", path.display());
            StyleRegistry::from_json_file(path)
        }
        None => Ok(StyleRegistry::builtin()),
    }
}

/// Read a file, or stdin for `-`.
fn read_input(path: &Path) -> std::io::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        fs::read_to_string(path)
    }
}

fn write_output(output: Option<&Path>, text: &str) -> CmdResult {
    if let Some(path) = output {
        fs::write(path, text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", text);
        if !text.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}
