// src/cli.rs
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use color_eyre::eyre::WrapErr;

use crate::config::consts::{
    DEFAULT_CHANNEL_FILE, DEFAULT_OUT_DIR, DEFAULT_VIDEOS_DIR, FFMPEG, LOG_FILE,
    OVERSIZED_THRESHOLD,
};
use crate::config::options::ExportOptions;
use crate::config::{AppOptions, Curation};
use crate::core::{Fetch, Http};
use crate::progress::LogProgress;
use crate::runner;

/// Scrape the Israeli Sign Language dictionary and index it by playlist category.
#[derive(Parser, Debug)]
#[command(name = "isl_scrape", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output directory for the JSON and text files
    #[arg(long, global = true, default_value = DEFAULT_OUT_DIR)]
    pub out: PathBuf,

    /// Curation JSON replacing the built-in corrections, exclusions and overrides
    #[arg(long, global = true)]
    pub curation: Option<PathBuf>,

    /// More output (-v debug, -vv trace). RUST_LOG wins when set.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Also append log lines to this file
    #[arg(long, global = true, default_value = LOG_FILE)]
    pub log_file: PathBuf,

    #[arg(long, global = true)]
    pub no_log_file: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Alphabet sweep, then group the words into words/groups/combined.json
    Build,
    /// Fetch the video sources of every word in words.json
    Sources,
    /// Reconcile the channel's playlists against combined.json
    Playlists(PlaylistArgs),
    /// Transcode the videos listed in sources.json
    Media(MediaArgs),
    /// build, sources and playlists in one go
    All {
        #[command(flatten)]
        playlists: PlaylistArgs,
        #[command(flatten)]
        media: MediaArgs,
        /// Run the media stage last
        #[arg(long)]
        with_media: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct PlaylistArgs {
    /// Saved HTML of the channel's playlists page
    #[arg(long, default_value = DEFAULT_CHANNEL_FILE)]
    pub channel: PathBuf,

    /// Where fetched playlist pages are cached
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Use cached playlist pages only
    #[arg(long)]
    pub offline: bool,

    /// Fail when a video title stays unresolved
    #[arg(long)]
    pub strict: bool,

    /// Let override entries win over automatic matches
    #[arg(long)]
    pub overrides_win: bool,

    /// Distinct videos at which a category is left out of the index
    #[arg(long, default_value_t = OVERSIZED_THRESHOLD)]
    pub threshold: usize,
}

#[derive(Args, Debug, Clone)]
pub struct MediaArgs {
    /// Directory for the transcoded videos
    #[arg(long, default_value = DEFAULT_VIDEOS_DIR)]
    pub videos: PathBuf,

    /// ffmpeg executable
    #[arg(long, default_value = FFMPEG)]
    pub ffmpeg: PathBuf,
}

impl Cli {
    pub fn options(&self) -> AppOptions {
        let mut opts = AppOptions {
            export: ExportOptions::new(&self.out),
            ..Default::default()
        };
        let (playlists, media) = match &self.command {
            Command::Playlists(p) => (Some(p), None),
            Command::Media(m) => (None, Some(m)),
            Command::All { playlists, media, .. } => (Some(playlists), Some(media)),
            Command::Build | Command::Sources => (None, None),
        };
        if let Some(p) = playlists {
            opts.playlists.channel_file = p.channel.clone();
            if let Some(dir) = &p.cache_dir {
                opts.playlists.cache_dir = dir.clone();
            }
            opts.playlists.offline = p.offline;
            opts.playlists.strict = p.strict;
            opts.playlists.reconcile.overrides_take_precedence = p.overrides_win;
            opts.playlists.reconcile.oversized_threshold = p.threshold;
        }
        if let Some(m) = media {
            opts.media.videos_dir = m.videos.clone();
            opts.media.ffmpeg = m.ffmpeg.clone();
        }
        opts
    }
}

pub fn run() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let log_file = (!cli.no_log_file).then_some(cli.log_file.as_path());
    crate::log::init(cli.verbose, log_file)?;

    let opts = cli.options();
    let curation = Curation::load_or_builtin(cli.curation.as_deref())
        .wrap_err("loading curation data")?;

    match &cli.command {
        Command::Build => build(&opts, &curation),
        Command::Sources => sources(&opts, &curation),
        Command::Playlists(_) => playlists(&opts, &curation),
        Command::Media(_) => media(&opts),
        Command::All { with_media, .. } => {
            build(&opts, &curation)?;
            sources(&opts, &curation)?;
            playlists(&opts, &curation)?;
            if *with_media {
                media(&opts)?;
            }
            Ok(())
        }
    }
}

fn build(opts: &AppOptions, curation: &Curation) -> color_eyre::Result<()> {
    let net = Http::new()?;
    let mut progress = LogProgress::new("Search", 5);
    let summary =
        runner::run_build(opts, curation, &net, Some(&mut progress)).wrap_err("build stage")?;
    logf!(
        "Build: {} entries in {} groups, {} excluded",
        summary.entries,
        summary.groups,
        summary.excluded.len()
    );
    for path in &summary.files_written {
        logd!("Build: wrote {}", path.display());
    }
    Ok(())
}

fn sources(opts: &AppOptions, curation: &Curation) -> color_eyre::Result<()> {
    let net = Http::new()?;
    let mut progress = LogProgress::new("Sources", 50);
    let sources = runner::run_sources(opts, curation, &net, Some(&mut progress))
        .wrap_err("sources stage")?;
    logf!("Sources: {} ids with at least one video", sources.len());
    Ok(())
}

fn playlists(opts: &AppOptions, curation: &Curation) -> color_eyre::Result<()> {
    let http = if opts.playlists.offline { None } else { Some(Http::new()?) };
    let net = http.as_ref().map(|h| h as &dyn Fetch);
    let mut progress = LogProgress::new("Playlists", 10);
    let recon = runner::run_playlists(opts, curation, net, Some(&mut progress))
        .wrap_err("playlists stage")?;
    logf!(
        "Playlists: {} categories, {} oversized, {} collisions, {} unresolved",
        recon.categories.len(),
        recon.oversized.len(),
        recon.collisions.len(),
        recon.unresolved.len()
    );
    Ok(())
}

fn media(opts: &AppOptions) -> color_eyre::Result<()> {
    let mut progress = LogProgress::new("Media", 10);
    let report = runner::run_media(opts, Some(&mut progress)).wrap_err("media stage")?;
    if report.interrupted {
        logw!("Media: stopped early; run again to continue");
    }
    Ok(())
}
