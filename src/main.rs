use clap::{Args, Parser, Subcommand};
use modelshoot::{
    catalog,
    logger::{self, LogLevel, LoggerConfig},
    studio, BodyShape, CompositionRequest, Config, GarmentImage, GarmentSelection, Pose,
    SkinTone, TryOnStudio, ValidationError, VtonCategory,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "modelshoot", version, about = "AI virtual try-on model shoots")]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a try-on image and write it to disk.
    Generate(GenerateArgs),
    /// Print the composed prompt and image order without calling the model.
    Prompt(ShootArgs),
    /// List garment types by category.
    Catalog(CatalogArgs),
}

#[derive(Args, Debug)]
struct ShootArgs {
    /// Garment image as "<Label>=<path>", e.g. "Kurti (Long)=kurti.jpg". Repeatable; order is kept.
    #[arg(long = "garment", short = 'g', value_parser = parse_garment_arg)]
    garments: Vec<(String, PathBuf)>,

    /// Model type or group: women, men, girls, boys, kids, unisex, mother-daughter, father-son, mother-son.
    #[arg(long, default_value = "women")]
    category: VtonCategory,

    /// Photo of the person to dress; their face and build are preserved.
    #[arg(long)]
    reference: Option<PathBuf>,

    #[arg(long, default_value = "Wheatish")]
    skin_tone: SkinTone,

    #[arg(long, default_value = "Average")]
    body_shape: BodyShape,

    #[arg(long, default_value = "Standing")]
    pose: Pose,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    shoot: ShootArgs,

    /// Output image path.
    #[arg(long, short = 'o', default_value = "model-shoot.png")]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct CatalogArgs {
    /// Only this category, e.g. "Outerwear".
    #[arg(long)]
    group: Option<String>,

    /// Case-insensitive filter on garment names.
    #[arg(long, default_value = "")]
    search: String,
}

fn parse_garment_arg(raw: &str) -> Result<(String, PathBuf), String> {
    let (label, path) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected <Label>=<path>, got '{}'", raw))?;
    let label = label.trim();
    if label.is_empty() || path.trim().is_empty() {
        return Err(format!("expected <Label>=<path>, got '{}'", raw));
    }
    Ok((label.to_string(), PathBuf::from(path.trim())))
}

fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

fn load_image(path: &Path) -> modelshoot::Result<GarmentImage> {
    let mime_type =
        mime_for_path(path).ok_or_else(|| ValidationError::UnsupportedFile(path.to_path_buf()))?;
    let data = std::fs::read(path)?;
    log::debug!("Loaded {} ({} bytes, {})", path.display(), data.len(), mime_type);
    Ok(GarmentImage::new(data, mime_type))
}

fn build_request(args: &ShootArgs) -> modelshoot::Result<CompositionRequest> {
    let mut garments = GarmentSelection::new();
    for (label, path) in &args.garments {
        garments.insert(label.clone(), load_image(path)?);
    }

    let mut request = CompositionRequest::new(garments)
        .with_category(args.category)
        .with_skin_tone(args.skin_tone)
        .with_body_shape(args.body_shape)
        .with_pose(args.pose);
    if let Some(path) = &args.reference {
        request = request.with_reference(load_image(path)?);
    }
    Ok(request)
}

fn print_catalog(args: &CatalogArgs) -> modelshoot::Result<()> {
    let groups: Vec<_> = match &args.group {
        Some(name) => vec![catalog::group(name).ok_or_else(|| ValidationError::InvalidOption {
            kind: "garment category",
            value: name.clone(),
        })?],
        None => catalog::groups().collect(),
    };

    for group in groups {
        let labels = catalog::search(group, &args.search);
        if labels.is_empty() {
            continue;
        }
        println!("{}", group.name);
        for label in labels {
            println!("  {}", label);
        }
    }
    Ok(())
}

fn print_prompt(config: &Config, args: &ShootArgs) -> modelshoot::Result<()> {
    let request = build_request(args)?;
    let composed = studio::preview(config, &request)?;

    println!("Scene: {:?}", composed.scene_class);
    println!("Image parts:");
    let mut index = 1;
    if let Some(reference) = &request.reference_image {
        println!("  {}. reference photo ({}, {} bytes)", index, reference.mime_type, reference.len());
        index += 1;
    }
    for (label, image) in request.garments.iter() {
        println!("  {}. {} ({}, {} bytes)", index, label, image.mime_type, image.len());
        index += 1;
    }
    println!();
    println!("{}", composed.prompt_text);
    Ok(())
}

async fn run_generate(config: &Config, args: &GenerateArgs) -> modelshoot::Result<()> {
    // Credentials are checked before any file is read or request is built.
    let studio = TryOnStudio::from_config(config)?;
    let request = build_request(&args.shoot)?;

    log::info!(
        "🎨 Generating {} shoot with {} garment(s)",
        request.category.label(),
        request.garments.len()
    );
    let image = studio.generate(&request).await?;
    image.save(&args.out)?;
    log::info!("💾 Image saved to: {}", args.out.display());
    println!("{}", args.out.display());
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    let cli = Cli::parse();
    let config = Config::from_env();

    let level = LogLevel::parse(&cli.log_level).unwrap_or(LogLevel::Info);
    let logger_config = if config.log_json {
        LoggerConfig::production().with_level(level)
    } else {
        LoggerConfig::default().with_level(level)
    };
    if let Err(e) = logger::init_with_config(logger_config) {
        eprintln!("Failed to initialise logging: {}", e);
    }
    if dotenv_loaded {
        log::debug!("✅ .env file loaded");
    }

    let outcome = match &cli.cmd {
        Command::Generate(args) => {
            logger::log_config_info(&config);
            run_generate(&config, args).await
        }
        Command::Prompt(args) => print_prompt(&config, args),
        Command::Catalog(args) => print_catalog(args),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("Full error: {:?}", err);
            eprintln!("Error: {}", err.user_message());
            ExitCode::FAILURE
        }
    }
}
