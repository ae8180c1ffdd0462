use anyhow::{Context, Result};
use clap::Parser;
use reddit_media::{config::Config, media::Variant, Media, MediaExtractor, Submission};
use tracing::info;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a submission JSON file (post object or `.json` listing)
    submission: String,

    /// Resolution (`640x480`) or quality (`720p`) to look up
    #[arg(short, long)]
    resolution: Option<String>,

    /// Variant of an animated image: gif or mp4
    #[arg(long, default_value = "mp4")]
    variant: Variant,

    /// Path to the config file
    #[arg(short, long)]
    config: Option<String>,
}

fn load_config(args: &Args) -> Result<Config> {
    match reddit_media::config::get_config_path(args.config.as_deref()) {
        Some(path) => Config::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn print_media(media: &Media, args: &Args) -> Result<()> {
    let requested = args.resolution.as_deref();

    match media {
        Media::Image(image) => {
            println!("extension: {}", image.extension.as_deref().unwrap_or("-"));
            println!("resolutions: {}", image.resolutions().join(", "));
            let url = match requested {
                Some(resolution) => image.url_for(resolution),
                None => image.best_url(),
            };
            println!("url: {}", url.unwrap_or("-"));
        }
        Media::Animated(clip) => {
            let variant = args.variant;
            println!("extension: {}", clip.extension.as_deref().unwrap_or("-"));
            println!("resolutions: {}", clip.resolutions().join(", "));
            let url = match requested {
                Some(resolution) => clip.url_for(resolution, variant),
                None => clip.best_url(variant),
            };
            println!("url ({}): {}", variant, url.unwrap_or("-"));
        }
        Media::Gallery(gallery) => {
            for image in gallery.images() {
                println!(
                    "{} [{}]: {}",
                    image.id,
                    image.extension.as_deref().unwrap_or("-"),
                    image.url_for(requested).unwrap_or("-")
                );
            }
        }
        Media::Video(video) => {
            println!("extension: {}", video.extension.as_deref().unwrap_or("-"));
            println!("video qualities: {}", video.video_qualities().join(", "));
            println!("audio qualities: {}", video.audio_qualities().join(", "));
            println!("video: {}", video.video_url(requested).unwrap_or("-"));
            println!("audio: {}", video.audio_url(None).unwrap_or("-"));
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    if config.get_logging_format() == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    info!("Reading submission from: {}", args.submission);
    let contents = std::fs::read_to_string(&args.submission)
        .with_context(|| format!("Failed to read {}", args.submission))?;
    let submission = Submission::from_json_str(&contents).context("Failed to decode submission")?;

    let extractor =
        MediaExtractor::new(&config.http).context("Failed to initialize media extractor")?;
    let media = extractor
        .extract(&submission)
        .await
        .context("Failed to extract media")?;

    println!("kind: {}", media.kind());
    print_media(&media, &args)
}
