//! tailor CLI - resume extraction, tailoring, and rendering tool

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use resume_tailor::render::{self, download_file_name, JsonFormat};
use resume_tailor::tailor::{ResumeStore, SavedResume, TailoringService};
use resume_tailor::{
    extract_file, ClassifiedLine, Classifier, ClassifierConfig, OutputFormat, ParseOptions,
    RenderMeta, RenderOptions, ResumeTailor, Role, SourceFile, TailorConfig, TailorRequest,
    TailoringSession,
};

#[derive(Parser)]
#[command(name = "tailor")]
#[command(version)]
#[command(about = "Extract, classify, tailor, and render resumes", long_about = None)]
struct Cli {
    /// Input resume (txt, docx, or pdf)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a resume to every output format
    Convert {
        /// Input resume
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Job title used in headers and file names
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Print the raw extracted text
    Extract {
        /// Input resume
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        pdf: PdfArgs,
    },

    /// Show the role assigned to each line
    Classify {
        /// Input resume
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Use the strict rule set (no keyword headings or date subheadings)
        #[arg(long)]
        strict: bool,

        /// Output JSON instead of a colored listing
        #[arg(long)]
        json: bool,
    },

    /// Render a resume in one format
    Render {
        /// Input resume
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Job title used in headers and file names
        #[arg(short, long)]
        title: Option<String>,

        /// Use the strict rule set
        #[arg(long)]
        strict: bool,

        /// Omit the header and footer from markup output
        #[arg(long)]
        no_shell: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Tailor a resume to a job description through the configured service
    Tailor {
        /// Input resume
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// File holding the job description
        #[arg(short, long, value_name = "FILE", conflicts_with = "job_text")]
        job: Option<PathBuf>,

        /// Job description given inline
        #[arg(long, value_name = "TEXT")]
        job_text: Option<String>,

        /// Job title
        #[arg(short, long)]
        title: Option<String>,

        /// Output format for the tailored resume
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        /// Output directory (stdout if not specified)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Webhook that tailors resumes
        #[arg(long, env = "TAILOR_WEBHOOK_URL", hide_env_values = true)]
        webhook_url: Option<String>,

        /// API key for the chat-completion fallback
        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Chat model
        #[arg(long, env = "TAILOR_MODEL")]
        model: Option<String>,

        /// Endpoint that saves tailored resumes
        #[arg(long, env = "TAILOR_STORE_URL")]
        store_url: Option<String>,

        /// User id attached to saved resumes
        #[arg(long, env = "TAILOR_USER_ID", default_value = "anonymous")]
        user_id: String,

        /// Request timeout in seconds
        #[arg(long, default_value = "120")]
        timeout: u64,
    },

    /// List tailored resumes saved for a user
    History {
        /// Endpoint that stores tailored resumes
        #[arg(long, env = "TAILOR_STORE_URL")]
        store_url: Option<String>,

        /// User whose resumes to list
        #[arg(long, env = "TAILOR_USER_ID", default_value = "anonymous")]
        user_id: String,

        /// Output JSON
        #[arg(long)]
        json: bool,

        /// Request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout: u64,
    },

    /// Show extraction details
    Info {
        /// Input resume
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        pdf: PdfArgs,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args)]
struct PdfArgs {
    /// Maximum PDF pages to read
    #[arg(long, default_value = "15")]
    max_pages: u32,

    /// Seconds to wait for each PDF loader
    #[arg(long, default_value = "15")]
    load_timeout: u64,

    /// Process PDF pages in parallel
    #[arg(long)]
    parallel: bool,
}

impl PdfArgs {
    fn options(&self) -> ParseOptions {
        ParseOptions::new()
            .with_max_pages(self.max_pages)
            .with_load_timeout(Duration::from_secs(self.load_timeout))
            .with_parallel(self.parallel)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Plain text with underlined headings
    Text,
    /// Word-compatible HTML document (.doc)
    Word,
    /// Print-ready HTML page
    Print,
    /// Role-tagged lines as JSON
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Word => OutputFormat::Word,
            Format::Print => OutputFormat::Print,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            title,
        }) => cmd_convert(&input, output.as_deref(), title),
        Some(Commands::Extract { input, output, pdf }) => {
            cmd_extract(&input, output.as_deref(), &pdf)
        }
        Some(Commands::Classify {
            input,
            strict,
            json,
        }) => cmd_classify(&input, strict, json),
        Some(Commands::Render {
            input,
            format,
            output,
            title,
            strict,
            no_shell,
            compact,
        }) => cmd_render(
            &input,
            format.into(),
            output.as_deref(),
            title,
            strict,
            no_shell,
            compact,
        ),
        Some(Commands::Tailor {
            input,
            job,
            job_text,
            title,
            format,
            output,
            webhook_url,
            api_key,
            model,
            store_url,
            user_id,
            timeout,
        }) => {
            let mut config = TailorConfig::new().with_timeout(Duration::from_secs(timeout));
            if let Some(url) = webhook_url {
                config = config.with_webhook_url(url);
            }
            if let Some(key) = api_key {
                config = config.with_api_key(key);
            }
            if let Some(model) = model {
                config = config.with_model(model);
            }
            if let Some(url) = store_url {
                config = config.with_store_url(url);
            }
            cmd_tailor(TailorArgs {
                input,
                job,
                job_text,
                title,
                format: format.into(),
                output,
                user_id,
                config,
            })
        }
        Some(Commands::History {
            store_url,
            user_id,
            json,
            timeout,
        }) => {
            let mut config = TailorConfig::new().with_timeout(Duration::from_secs(timeout));
            if let Some(url) = store_url {
                config = config.with_store_url(url);
            }
            cmd_history(&config, &user_id, json)
        }
        Some(Commands::Info { input, json, pdf }) => cmd_info(&input, json, &pdf),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), None)
            } else {
                println!("{}", "Usage: tailor <FILE> [OUTPUT]".yellow());
                println!("       tailor --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        let (headline, message) = describe_error(e.as_ref());
        eprintln!("{}: {}", headline.red().bold(), message);
        std::process::exit(1);
    }
}

/// Headline and message for a failed command. Extraction failures are shown
/// under their class with the actionable message, tailoring failures under
/// their own headline.
fn describe_error(err: &(dyn std::error::Error + 'static)) -> (&'static str, String) {
    match err.downcast_ref::<resume_tailor::Error>() {
        Some(e) => match e.class() {
            Some(class) => (class.label(), e.user_message()),
            None if e.is_tailoring() => ("Tailoring failed", e.user_message()),
            None => ("Error", e.user_message()),
        },
        None => ("Error", err.to_string()),
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    title: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let formats = [
        OutputFormat::Text,
        OutputFormat::Word,
        OutputFormat::Print,
        OutputFormat::Json,
    ];

    let pb = ProgressBar::new(formats.len() as u64 + 1);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Extracting text...");
    let mut builder = ResumeTailor::new();
    if let Some(title) = title {
        builder = builder.with_title(title);
    }
    let result = builder.process_path(input)?;
    pb.inc(1);

    let mut written = Vec::with_capacity(formats.len());
    for format in formats {
        pb.set_message(format!("Rendering {}...", format.extension()));
        let rendered = result.render_download(format)?;
        fs::write(output_dir.join(&rendered.file_name), &rendered.content)?;
        written.push(rendered.file_name);
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for (i, name) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), name);
    }

    Ok(())
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    pdf: &PdfArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = ResumeTailor::new()
        .with_parse_options(pdf.options())
        .process_path(input)?;

    write_or_print(output, result.text())
}

fn cmd_classify(input: &Path, strict: bool, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let doc = extract_file(input)?;
    let classifier = if strict {
        Classifier::strict()
    } else {
        Classifier::default()
    };
    let lines = classifier.classify_document(&doc);

    if json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
        return Ok(());
    }

    for line in &lines {
        println!("{:<11} {}", role_label(line), line.content);
    }

    Ok(())
}

fn role_label(line: &ClassifiedLine) -> colored::ColoredString {
    let label = line.role.as_str();
    match line.role {
        Role::Heading => label.cyan().bold(),
        Role::Subheading => label.blue(),
        Role::Bullet => label.green(),
        Role::Contact => label.yellow(),
        Role::Paragraph => label.dimmed(),
    }
}

fn cmd_render(
    input: &Path,
    format: OutputFormat,
    output: Option<&Path>,
    title: Option<String>,
    strict: bool,
    no_shell: bool,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let render_options = RenderOptions::new()
        .with_shell(!no_shell)
        .with_json_format(if compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        });

    let mut builder = ResumeTailor::new().with_render_options(render_options);
    if strict {
        builder = builder.with_classifier(ClassifierConfig::strict());
    }
    if let Some(title) = title {
        builder = builder.with_title(title);
    }

    let content = builder.process_path(input)?.render(format)?;
    write_or_print(output, &content)
}

struct TailorArgs {
    input: PathBuf,
    job: Option<PathBuf>,
    job_text: Option<String>,
    title: Option<String>,
    format: OutputFormat,
    output: Option<PathBuf>,
    user_id: String,
    config: TailorConfig,
}

fn cmd_tailor(args: TailorArgs) -> Result<(), Box<dyn std::error::Error>> {
    let resume = extract_file(&args.input)?;

    let job_description = match (&args.job, args.job_text) {
        (Some(path), _) => extract_file(path)?.into_text(),
        (None, Some(text)) => text,
        (None, None) => return Err("a job description is required (--job or --job-text)".into()),
    };

    let mut request = TailorRequest::new(resume.text(), job_description);
    if let Some(title) = &args.title {
        request = request.with_job_title(title.as_str());
    }

    let client = args.config.http_client()?;
    let chain = args.config.build_chain(&client);
    if chain.is_empty() {
        println!(
            "{}",
            "No tailoring service configured; set TAILOR_WEBHOOK_URL or OPENAI_API_KEY.".yellow()
        );
    }
    log::debug!("Tailoring services: {:?}", chain.names());

    let service: Arc<dyn TailoringService> = Arc::new(chain);
    let session = TailoringSession::new(service, args.config.build_store(&client), args.user_id);

    let pb = ProgressBar::new_spinner();
    pb.set_message("Tailoring resume...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let rt = tokio::runtime::Runtime::new()?;
    let outcome = rt.block_on(session.submit(&request));
    pb.finish_and_clear();
    let outcome = outcome?;

    let lines = outcome.lines(&Classifier::default());
    let meta = RenderMeta::new(args.title);
    let rendered = render::render_download(&lines, args.format, &meta, &RenderOptions::default())?;

    match args.output {
        Some(dir) => {
            fs::create_dir_all(&dir)?;
            let path = dir.join(&rendered.file_name);
            fs::write(&path, &rendered.content)?;
            println!("{} {}", "Saved to".green(), path.display());
        }
        None => println!("{}", rendered.content),
    }

    if let Some(id) = outcome.record_id {
        eprintln!("{} {}", "Saved as".dimmed(), id);
    }

    Ok(())
}

fn cmd_history(
    config: &TailorConfig,
    user_id: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if config.store_url.is_none() {
        return Err("no resume store configured; set TAILOR_STORE_URL".into());
    }

    let client = config.http_client()?;
    let store = config.build_store(&client);
    let rt = tokio::runtime::Runtime::new()?;
    let saved = rt.block_on(store.list(user_id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&saved)?);
        return Ok(());
    }

    if saved.is_empty() {
        println!("{}", "No saved resumes.".yellow());
        return Ok(());
    }

    println!("{}", format!("Saved resumes for {}", user_id).cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for resume in &saved {
        print_saved(resume);
    }

    Ok(())
}

fn print_saved(resume: &SavedResume) {
    let date = resume
        .created_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown date".to_string());
    println!(
        "{}  {}  {}",
        date.dimmed(),
        resume.job_title.bold(),
        resume.id.as_deref().unwrap_or("-").dimmed()
    );
    if let Some(first) = resume.tailored_resume.lines().find(|l| !l.trim().is_empty()) {
        println!("    {}", first.trim());
    }
}

fn cmd_info(input: &Path, json: bool, pdf: &PdfArgs) -> Result<(), Box<dyn std::error::Error>> {
    let file = SourceFile::from_path(input)?;
    let size = file.len();
    let result = ResumeTailor::new()
        .with_parse_options(pdf.options())
        .process(&file)?;
    let metadata = result.document.metadata();

    if json {
        println!("{}", serde_json::to_string_pretty(metadata)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {} bytes", "Size".bold(), size);
    if let Some(format) = metadata.source_format {
        println!("{}: {}", "Format".bold(), format);
    }
    if let Some(ref version) = metadata.pdf_version {
        println!("{}: PDF {}", "Version".bold(), version);
    }
    if let Some(pages) = metadata.page_count {
        println!(
            "{}: {} ({} extracted)",
            "Pages".bold(),
            pages,
            metadata.pages_extracted
        );
    }
    if !metadata.pages_failed.is_empty() {
        println!(
            "{}: {:?}",
            "Skipped pages".yellow().bold(),
            metadata.pages_failed
        );
    }
    if metadata.truncated {
        println!("{}: {}", "Truncated".bold(), "Yes".yellow());
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let text = result.text();
    println!("{}: {}", "Lines".bold(), result.document.line_count());
    println!("{}: {}", "Words".bold(), text.split_whitespace().count());
    println!("{}: {}", "Characters".bold(), result.document.char_count());

    for role in [
        Role::Heading,
        Role::Subheading,
        Role::Bullet,
        Role::Contact,
        Role::Paragraph,
    ] {
        let count = result.lines.iter().filter(|l| l.role == role).count();
        println!("{}: {}", role.as_str().bold(), count);
    }

    println!();
    println!(
        "{}: {}",
        "Suggested name".bold(),
        download_file_name(result.meta().title.as_deref(), OutputFormat::Word)
    );

    Ok(())
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "tailor".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Resume extraction, tailoring, and rendering tool");
    println!();
    println!("License: MIT");
}
