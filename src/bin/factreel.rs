use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "factreel", version, about = "Render today's random fact as a short video")]
struct Cli {
    /// Output MP4 path. Defaults to `videos/<today>_daily_fact.mp4`; numbered if taken.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Directory of `.mp3`/`.wav` background music.
    #[arg(long, default_value = "music")]
    music: PathBuf,

    /// Render without background music.
    #[arg(long, default_value_t = false)]
    no_music: bool,

    /// Append-only log of fetched facts.
    #[arg(long, default_value = "facts.txt")]
    facts_log: PathBuf,

    /// Font used for the fact and the title.
    #[arg(long, default_value = factreel::DEFAULT_FONT_PATH)]
    font: PathBuf,

    /// Fact API endpoint.
    #[arg(long, default_value = factreel::DEFAULT_FACT_ENDPOINT)]
    endpoint: String,

    /// Reel length in seconds.
    #[arg(long, default_value_t = 10.0)]
    duration: f64,

    /// Output frame rate.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Seed for music choice and offset.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let cli = Cli::parse();

    let client = factreel::FactClient::new(cli.endpoint);
    let log = factreel::FactLog::new(cli.facts_log);
    let fact = factreel::get_random_fact(&client, &log)?;

    let today = chrono::Local::now().date_naive();
    let out = cli.out.unwrap_or_else(|| {
        PathBuf::from("videos").join(format!("{}_daily_fact.mp4", today.format("%Y-%m-%d")))
    });

    let mut opts = factreel::ReelOpts {
        fps: factreel::Fps::whole(cli.fps)?,
        duration_secs: cli.duration,
        seed: cli.seed,
        ..factreel::ReelOpts::default()
    };
    opts.fact.font_path = cli.font;

    let music = (!cli.no_music).then_some(cli.music.as_path());
    let written = factreel::create_fact_video(&fact, &out, music, &opts)?;

    eprintln!("wrote {}", written.display());
    Ok(())
}
