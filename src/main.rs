use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use repcount::{
    CaptureProfile, Clock, FrameResult, Hardware, Landmark, ManualClock, Pose, Renderer, Session,
};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};
use structopt::StructOpt;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;

/// One line of a recorded landmark stream.
#[derive(Debug, serde::Deserialize)]
struct Frame {
    /// Capture time in seconds.
    t: f64,
    /// BlazePose landmarks as `[x, y, visibility]`, or null if nobody was
    /// detected.
    landmarks: Option<Vec<Landmark>>,
}

/// Prints completed reps and, optionally, a live status spinner.
struct ConsoleRenderer {
    progress: Option<ProgressBar>,
}

impl Renderer for ConsoleRenderer {
    fn render(&mut self, _pose: Option<&Pose>, result: &FrameResult) {
        let line = format!("rep {}: {}", result.rep_count, result.feedback);
        match &self.progress {
            Some(progress) => {
                if result.rep_completed {
                    progress.println(line);
                }
                progress.set_message(format!("{} | {}", result.rep_count, result.feedback));
                progress.inc(1);
            }
            None if result.rep_completed => println!("{}", line),
            None => {}
        }
    }
}

#[derive(structopt::StructOpt)]
struct Opt {
    /// JSON-lines landmark recording, or `-` for stdin.
    #[structopt(default_value = "-")]
    input: PathBuf,

    /// Exercise identifier, e.g. push-up or plank.
    #[structopt(short, long)]
    exercise: String,

    /// Process only every n-th frame. Defaults to the capture profile's
    /// cadence.
    #[structopt(short = "n", long)]
    every: Option<usize>,

    /// Free VRAM of a dedicated GPU, used to pick the capture profile.
    #[structopt(long)]
    gpu_vram_mb: Option<u32>,

    #[structopt(short, long, default_value = "info", env = "RUST_LOG")]
    log_level: tracing_subscriber::filter::EnvFilter,

    #[structopt(short, long)]
    show_progress: bool,
}

fn open(input: &Path) -> Result<Box<dyn BufRead>> {
    if input.as_os_str() == "-" {
        Ok(Box::new(BufReader::new(io::stdin())))
    } else {
        let file = File::open(input)
            .with_context(|| format!("failed opening {}", input.display()))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Every `every`-th non-blank line with its 1-based line number. Blank lines
/// do not count towards the cadence.
fn sampled_lines<R: BufRead>(
    reader: R,
    every: usize,
) -> impl Iterator<Item = (usize, io::Result<String>)> {
    reader
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .filter(|(_, line)| line.as_ref().map_or(true, |line| !line.trim().is_empty()))
        .enumerate()
        .filter(move |(frame, _)| frame % every == 0)
        .map(|(_, numbered)| numbered)
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .with(opt.log_level),
    )?;

    let profile = CaptureProfile::for_hardware(&Hardware::detect(opt.gpu_vram_mb));
    let every = opt.every.unwrap_or(profile.process_every_n_frames).max(1);

    let running = Arc::new(AtomicBool::new(true));
    let running_ctrl_c = running.clone();

    ctrlc::set_handler(move || {
        running_ctrl_c.store(false, Ordering::SeqCst);
    })
    .context("failed setting Ctrl-C handler")?;

    let progress = if opt.show_progress {
        Some(
            ProgressBar::new_spinner().with_style(
                ProgressStyle::default_spinner()
                    .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
                    .template("{prefix:.bold.dim} {spinner} {wide_msg}"),
            ),
        )
    } else {
        None
    };
    if let Some(progress) = &progress {
        progress.set_prefix(opt.exercise.clone());
    }

    let clock = ManualClock::default();
    let mut session = Session::with_clock(&opt.exercise, clock.clone())
        .context("failed starting session")?
        .with_renderer(ConsoleRenderer { progress });
    let exercise = session.exercise();

    info!(
        message = "replaying",
        input = %opt.input.display(),
        exercise = exercise.display_name(),
        every
    );

    let reader = open(&opt.input)?;
    for (lineno, line) in sampled_lines(reader, every) {
        if !running.load(Ordering::SeqCst) {
            info!(message = "interrupted");
            break;
        }

        let line = line.with_context(|| format!("failed reading line {}", lineno))?;

        let frame: Frame = serde_json::from_str(&line)
            .with_context(|| format!("failed parsing frame on line {}", lineno))?;
        let now = Duration::try_from_secs_f64(frame.t)
            .with_context(|| format!("invalid timestamp {} on line {}", frame.t, lineno))?;
        clock.set(now);

        let result = session.process_landmarks(frame.landmarks.as_deref());
        debug!(
            message = "frame",
            lineno,
            t = ?clock.now(),
            rep_count = result.rep_count,
            feedback = %result.feedback
        );
    }

    if let Some(progress) = &session.renderer().progress {
        progress.finish_and_clear();
    }

    let unit = if exercise.is_timed() { "seconds" } else { "reps" };
    println!("{}: {} {}", exercise.display_name(), session.rep_count(), unit);
    Ok(())
}
