// src/media.rs
//! Download and shrink the dictionary videos with ffmpeg.
//!
//! The originals are large, so each one is re-encoded without audio at 480p. The videos
//! directory is the checkpoint: an id whose `<id>.mp4` exists is skipped, and ffmpeg
//! writes to `<id>.part.mp4` which is renamed only after a successful exit. Ctrl-C
//! stops the loop after the running ffmpeg exits and keeps everything finished so far.

use std::collections::{BTreeMap, HashSet};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::consts::{VIDEO_BITRATE, VIDEO_SCALE};
use crate::config::options::MediaOptions;
use crate::error::Result;
use crate::progress::Progress;
use crate::scrape::Sources;

const PART_SUFFIX: &str = ".part";

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MediaReport {
    pub transcoded: Vec<String>,
    /// Already present on disk.
    pub skipped: usize,
    /// Every source failed, or the id had no sources.
    pub errored: Vec<String>,
    pub interrupted: bool,
}

enum Outcome {
    Done,
    Failed,
    Interrupted,
}

/// Ids already transcoded: stems of the finished `*.mp4` files in `dir`.
pub fn visited(dir: &Path) -> Result<HashSet<String>> {
    let mut out = HashSet::new();
    if !dir.exists() {
        return Ok(out);
    }
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("mp4") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            if !stem.ends_with(PART_SUFFIX) {
                out.insert(s!(stem));
            }
        }
    }
    Ok(out)
}

/// Source URLs of one id in preference order; unknown MIME types go last.
pub fn ordered_sources<'a>(
    sources: &'a BTreeMap<String, String>,
    preference: &[String],
) -> Vec<&'a str> {
    let mut out: Vec<&str> = preference
        .iter()
        .filter_map(|mime| sources.get(mime).map(String::as_str))
        .collect();
    for (mime, url) in sources {
        if !preference.contains(mime) {
            out.push(url.as_str());
        }
    }
    out
}

/// The arguments handed to ffmpeg. Spaces in the URL are percent-encoded because the
/// site serves file names with spaces.
pub fn ffmpeg_args(url: &str, out: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-y", "-loglevel", "error", "-i"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(url.replace(' ', "%20").into());
    for a in ["-an", "-b:v", VIDEO_BITRATE, "-vf", VIDEO_SCALE] {
        args.push(a.into());
    }
    args.push(out.as_os_str().to_owned());
    args
}

fn part_path(dir: &Path, id: &str) -> PathBuf {
    dir.join(format!("{id}{PART_SUFFIX}.mp4"))
}

fn final_path(dir: &Path, id: &str) -> PathBuf {
    dir.join(format!("{id}.mp4"))
}

fn transcode(url: &str, id: &str, opts: &MediaOptions) -> Result<Outcome> {
    let part = part_path(&opts.videos_dir, id);
    let status = Command::new(&opts.ffmpeg)
        .args(ffmpeg_args(url, &part))
        .stdin(Stdio::null())
        .status()?;

    if INTERRUPTED.load(Ordering::SeqCst) || killed_by_signal(&status) {
        let _ = fs::remove_file(&part);
        return Ok(Outcome::Interrupted);
    }
    if !status.success() {
        logd!("ffmpeg {status} for {id} from {url}");
        let _ = fs::remove_file(&part);
        return Ok(Outcome::Failed);
    }
    fs::rename(&part, final_path(&opts.videos_dir, id))?;
    Ok(Outcome::Done)
}

#[cfg(unix)]
fn killed_by_signal(status: &std::process::ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    status.signal().is_some()
}

#[cfg(not(unix))]
fn killed_by_signal(_status: &std::process::ExitStatus) -> bool {
    false
}

/// Transcode every id in `ids` that is not already on disk.
pub fn run(
    ids: &[String],
    sources: &Sources,
    opts: &MediaOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<MediaReport> {
    fs::create_dir_all(&opts.videos_dir)?;
    let done = visited(&opts.videos_dir)?;
    let _guard = interrupt::install();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(ids.len());
    }

    let mut report = MediaReport::default();
    'ids: for id in ids {
        if done.contains(id) {
            report.skipped += 1;
            continue;
        }
        let urls = sources
            .get(id)
            .map(|s| ordered_sources(s, &opts.source_preference))
            .unwrap_or_default();
        if urls.is_empty() {
            logw!("Media: no sources for {id}");
            report.errored.push(id.clone());
            continue;
        }

        let mut ok = false;
        for url in urls {
            match transcode(url, id, opts)? {
                Outcome::Done => {
                    ok = true;
                    break;
                }
                Outcome::Failed => continue,
                Outcome::Interrupted => {
                    logf!("Media: interrupted at {id}; finished videos are kept");
                    report.interrupted = true;
                    break 'ids;
                }
            }
        }
        if ok {
            report.transcoded.push(id.clone());
        } else {
            loge!("Media: every source failed for {id}");
            report.errored.push(id.clone());
        }
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(id);
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!(
            "{} transcoded, {} already present, {} errored",
            report.transcoded.len(),
            report.skipped,
            report.errored.len()
        ));
        p.finish();
    }
    Ok(report)
}

mod interrupt {
    use super::INTERRUPTED;
    use std::sync::atomic::Ordering;

    /// Restores the previous SIGINT disposition on drop.
    pub struct Guard {
        #[cfg(unix)]
        previous: Option<nix::sys::signal::SigAction>,
    }

    #[cfg(unix)]
    extern "C" fn on_sigint(_: nix::libc::c_int) {
        INTERRUPTED.store(true, Ordering::SeqCst);
    }

    #[cfg(unix)]
    pub fn install() -> Guard {
        use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, sigaction};

        INTERRUPTED.store(false, Ordering::SeqCst);
        let action = SigAction::new(
            SigHandler::Handler(on_sigint),
            SaFlags::empty(),
            SigSet::empty(),
        );
        // SAFETY: the handler only stores to an atomic.
        let previous = match unsafe { sigaction(Signal::SIGINT, &action) } {
            Ok(prev) => Some(prev),
            Err(e) => {
                logw!("Media: could not install Ctrl-C handler: {e}");
                None
            }
        };
        Guard { previous }
    }

    #[cfg(not(unix))]
    pub fn install() -> Guard {
        INTERRUPTED.store(false, Ordering::SeqCst);
        Guard {}
    }

    #[cfg(unix)]
    impl Drop for Guard {
        fn drop(&mut self) {
            use nix::sys::signal::{Signal, sigaction};

            if let Some(prev) = self.previous.take() {
                // SAFETY: restores the disposition that was active before `install`.
                let _ = unsafe { sigaction(Signal::SIGINT, &prev) };
            }
        }
    }
}
