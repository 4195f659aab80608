//! lessonpack CLI - sort PDF pages into teaching and exercise packs

mod remote;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use lessonpack::{
    assignment_events, Bucket, Child, DocumentLoader, ExtraSource, JsonResourceStore, LessonPack,
    LoadOptions, LocalStorage, MaterializeOptions, ObjectStorage, PageList, PlaceholderRenderer,
    ResourceDetails, ResourceMaterializer, ResourceStore, Session, DEFAULT_SUBJECT, DEFAULT_TITLE,
};

use remote::{RestConfig, RestResourceStore, RestStorage};

#[derive(Parser)]
#[command(name = "lessonpack")]
#[command(version)]
#[command(about = "Sort PDF pages into teaching and exercise packs", long_about = None)]
struct Cli {
    #[command(flatten)]
    store: StoreArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Where packs and resource records are kept.
#[derive(Args)]
struct StoreArgs {
    /// Directory uploaded packs are written to
    #[arg(long, global = true, env = "LESSONPACK_STORAGE_DIR", default_value = "lessonpack-data/packs")]
    storage_dir: PathBuf,

    /// JSON file resource records are kept in
    #[arg(long, global = true, env = "LESSONPACK_RECORDS", default_value = "lessonpack-data/resources.json")]
    records: PathBuf,

    /// Owner prefix for uploaded packs
    #[arg(long, global = true, env = "LESSONPACK_OWNER", default_value = "local")]
    owner: String,

    /// Base URL of a REST storage/records service (overrides the local store)
    #[arg(long, global = true, env = "LESSONPACK_REST_URL")]
    rest_url: Option<String>,

    /// API key for the REST service
    #[arg(long, global = true, env = "LESSONPACK_REST_KEY", hide_env_values = true)]
    rest_key: Option<String>,
}

#[derive(Args)]
struct DetailsArgs {
    /// Subject tag
    #[arg(long, default_value = DEFAULT_SUBJECT)]
    subject: String,

    /// Grade tag
    #[arg(long)]
    grade: Option<String>,

    /// Free-form notes
    #[arg(long, default_value = "")]
    notes: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Render page thumbnails and report their sizes
    Thumbs {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Scale relative to 72 dpi
        #[arg(long, default_value = "0.2")]
        scale: f32,
    },

    /// Copy selected pages into a new PDF
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page list (e.g., "1,3,5-7")
        #[arg(long)]
        pages: String,

        /// Output file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Sort every page into a pack and save both packs as one resource
    Sort {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Pages for the teaching pack (e.g., "1-3")
        #[arg(long, default_value = "")]
        teaching: String,

        /// Pages for the exercise pack (e.g., "4,5,8-10")
        #[arg(long, default_value = "")]
        exercise: String,

        /// Resource title
        #[arg(long, default_value = DEFAULT_TITLE)]
        title: String,

        #[command(flatten)]
        details: DetailsArgs,
    },

    /// Add a resource from a link or a whole PDF, without sorting
    Add {
        /// Resource title
        #[arg(value_name = "TITLE")]
        title: String,

        /// External link
        #[arg(long, conflicts_with = "pdf", required_unless_present = "pdf")]
        link: Option<String>,

        /// PDF uploaded as the exercise pack
        #[arg(long, value_name = "FILE")]
        pdf: Option<PathBuf>,

        #[command(flatten)]
        details: DetailsArgs,
    },

    /// List saved resources, newest first
    List,

    /// Schedule a resource for a child, one event per day
    Assign {
        /// Resource id
        #[arg(value_name = "RESOURCE_ID")]
        resource: String,

        /// Child name
        #[arg(long)]
        child: String,

        /// Child record id
        #[arg(long)]
        child_id: Option<String>,

        /// Child grade
        #[arg(long)]
        grade: Option<String>,

        /// First day (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// Last day, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Info { input } => cmd_info(&input),
        Commands::Thumbs { input, scale } => cmd_thumbs(&input, scale),
        Commands::Extract {
            input,
            pages,
            output,
        } => cmd_extract(&input, &pages, output.as_deref()),
        Commands::Sort {
            input,
            teaching,
            exercise,
            title,
            details,
        } => cmd_sort(&cli.store, &input, &teaching, &exercise, details.into_details(title)),
        Commands::Add {
            title,
            link,
            pdf,
            details,
        } => cmd_add(
            &cli.store,
            details.into_details(title),
            link.as_deref(),
            pdf.as_deref(),
        ),
        Commands::List => cmd_list(&cli.store),
        Commands::Assign {
            resource,
            child,
            child_id,
            grade,
            start,
            end,
        } => {
            let mut child = Child::named(child);
            child.id = child_id;
            child.grade = grade;
            cmd_assign(&cli.store, &resource, &child, start, end)
        }
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

impl DetailsArgs {
    fn into_details(self, title: String) -> ResourceDetails {
        let mut details = ResourceDetails::new(title)
            .with_subject(self.subject)
            .with_notes(self.notes);
        details.grade = self.grade;
        details
    }
}

/// Storage and record collaborators selected by [`StoreArgs`].
struct Collaborators {
    storage: Box<dyn ObjectStorage>,
    records: Box<dyn ResourceStore>,
}

impl StoreArgs {
    fn open(&self) -> Result<Collaborators, Box<dyn std::error::Error>> {
        if let Some(url) = &self.rest_url {
            let key = self
                .rest_key
                .clone()
                .ok_or("LESSONPACK_REST_KEY is required with a REST URL")?;
            let config = RestConfig::new(url.clone(), key);
            log::debug!("using REST collaborators at {}", url);
            return Ok(Collaborators {
                storage: Box::new(RestStorage::new(config.clone())),
                records: Box::new(RestResourceStore::new(config)),
            });
        }

        if let Some(parent) = self.records.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Collaborators {
            storage: Box::new(LocalStorage::new(&self.storage_dir)),
            records: Box::new(JsonResourceStore::new(&self.records)),
        })
    }

    fn materialize_options(&self) -> MaterializeOptions {
        MaterializeOptions::new().with_owner(self.owner.clone())
    }
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = lessonpack::load_file(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), doc.version());
    println!("{}: {}", "Pages".bold(), doc.page_count());
    println!("{}: {} bytes", "Size".bold(), doc.bytes().len());

    println!();
    println!("{}", "Pages".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for surface in doc.surfaces() {
        let geometry = surface.geometry()?;
        let orientation = if geometry.is_landscape() {
            "landscape"
        } else {
            "portrait"
        };
        println!(
            "{:>4}  {:.0} x {:.0} pt  {:>3}°  {}",
            surface.index(),
            geometry.width,
            geometry.height,
            geometry.rotation,
            orientation.dimmed()
        );
    }

    Ok(())
}

fn cmd_thumbs(input: &Path, scale: f32) -> Result<(), Box<dyn std::error::Error>> {
    let options = LoadOptions::new().lenient().with_thumbnail_scale(scale);
    let doc = DocumentLoader::with_options(options.clone()).load_file(input)?;
    let renderer = PlaceholderRenderer::default();

    let pb = ProgressBar::new(u64::from(doc.page_count()));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut rendered = Vec::new();
    for surface in doc.surfaces() {
        pb.set_message(format!("page {}", surface.index()));
        match surface.render(&renderer, options.thumbnail_scale) {
            Ok(thumb) => rendered.push(thumb),
            Err(e) => log::warn!("Failed rendering page {}: {}", surface.index(), e),
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    println!();
    for thumb in &rendered {
        println!(
            "{:>4}  {} x {} px",
            thumb.page,
            thumb.width,
            thumb.height
        );
    }
    let skipped = doc.page_count() as usize - rendered.len();
    if skipped > 0 {
        println!("{} {} page(s) skipped", "Warning:".yellow(), skipped);
    }

    Ok(())
}

fn cmd_extract(
    input: &Path,
    pages: &str,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let pages = PageList::parse(pages)?;
    let pack = lessonpack::split_file(input, pages.as_slice())?;

    let output = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_pages.pdf", stem))
    });
    fs::write(&output, &pack.bytes)?;

    println!(
        "{} {} page(s) to {}",
        "Saved".green(),
        pack.page_count(),
        output.display()
    );
    Ok(())
}

/// Select `pages` and drop them on `bucket`, the way a drag from the grid does.
fn sort_into(
    session: &mut Session,
    pages: &PageList,
    bucket: Bucket,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(&origin) = pages.as_slice().first() else {
        return Ok(());
    };
    session.store().validate(pages.as_slice())?;
    for &page in pages.as_slice() {
        session.click(page, true)?;
    }
    let payload = session.drag_start(origin)?;
    let moved = session.drop_on(payload, bucket)?;
    log::debug!("moved {:?} to {}", moved, bucket);
    Ok(())
}

fn cmd_sort(
    store: &StoreArgs,
    input: &Path,
    teaching: &str,
    exercise: &str,
    details: ResourceDetails,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = LessonPack::new().open(input)?;

    sort_into(&mut session, &PageList::parse(teaching)?, Bucket::Teaching)?;
    sort_into(&mut session, &PageList::parse(exercise)?, Bucket::Exercise)?;

    println!("{}", session.summary());
    if !session.can_save() {
        let left: Vec<String> = session
            .visible_pages()
            .iter()
            .map(|p| p.to_string())
            .collect();
        println!("{} {}", "Unsorted pages:".yellow(), left.join(","));
    }

    let collaborators = store.open()?;
    let materializer = ResourceMaterializer::with_options(
        collaborators.storage.as_ref(),
        collaborators.records.as_ref(),
        store.materialize_options(),
    );

    let pb = ProgressBar::new_spinner();
    pb.set_message("Saving packs...");
    let saved = session.save(&materializer, &details);
    pb.finish_and_clear();
    let stored = saved?;

    println!("{} {}", "Saved resource".green().bold(), stored.id);
    if let Some(url) = &stored.resource.teaching_pack_url {
        println!("  {} teaching: {}", "├─".dimmed(), url);
    }
    if let Some(url) = &stored.resource.exercise_pack_url {
        println!("  {} exercise: {}", "└─".dimmed(), url);
    }
    Ok(())
}

fn cmd_add(
    store: &StoreArgs,
    details: ResourceDetails,
    link: Option<&str>,
    pdf: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let collaborators = store.open()?;
    let materializer = ResourceMaterializer::with_options(
        collaborators.storage.as_ref(),
        collaborators.records.as_ref(),
        store.materialize_options(),
    );

    let stored = match (link, pdf) {
        (Some(link), _) => materializer.add_extra(&details, ExtraSource::Link(link))?,
        (None, Some(path)) => {
            let doc = lessonpack::load_file(path)?;
            materializer.add_extra(&details, ExtraSource::Pdf(&doc))?
        }
        (None, None) => return Err("provide --link or --pdf".into()),
    };

    println!("{} {}", "Added resource".green().bold(), stored.id);
    Ok(())
}

fn cmd_list(store: &StoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    let collaborators = store.open()?;
    let resources = collaborators.records.list()?;

    if resources.is_empty() {
        println!("{}", "No resources yet".yellow());
        return Ok(());
    }

    for stored in &resources {
        let record = &stored.resource;
        let packs = match (stored.has_teaching_pack(), stored.has_exercise_pack()) {
            (true, true) => "teaching+exercise",
            (true, false) => "teaching",
            (false, true) => "exercise",
            (false, false) => "-",
        };
        println!(
            "{}  {}  {}  {}{}",
            stored.id.bold(),
            stored.uploaded_at.format("%Y-%m-%d %H:%M"),
            record.title,
            record.subject.dimmed(),
            record
                .grade
                .as_deref()
                .map(|g| format!(" / {}", g))
                .unwrap_or_default()
                .dimmed()
        );
        println!("    {}", packs.dimmed());
    }
    Ok(())
}

fn cmd_assign(
    store: &StoreArgs,
    resource_id: &str,
    child: &Child,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<(), Box<dyn std::error::Error>> {
    let collaborators = store.open()?;
    let resource = collaborators
        .records
        .get(resource_id)?
        .ok_or_else(|| format!("no resource with id {}", resource_id))?;

    let events = assignment_events(&resource, child, start, end)?;
    println!("{}", serde_json::to_string_pretty(&events)?);
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "lessonpack".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Sort PDF pages into teaching and exercise packs");
    println!();
    println!("License: MIT");
}
