use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use hough_profile::core::{rotate_about_center, Verbosity};
use hough_profile::io::{AnalysisConfig, AnalysisReport};
use hough_profile::raster::{load_raster, raster_to_luma};
use hough_profile::{AnalysisSession, LineDetectionParams, ProfileKind, ReductionMode};
use log::{info, warn};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    SumOfSquares,
    PeakCount,
}

/// Dominant line orientations of a drawing, via a Hough angular profile.
#[derive(Parser, Debug)]
#[command(name = "hough-profile", version, about)]
struct Cli {
    /// Input image; overrides `image_path` from `--config`.
    image: Option<PathBuf>,
    /// JSON config with `image_path`, `rotation_deg` and `params`.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Rotate the image about its center before analysis (degrees, 0..=360).
    #[arg(long)]
    rotate: Option<i32>,
    /// Binarization threshold.
    #[arg(long)]
    threshold: Option<u8>,
    /// Treat pixels equal to the threshold as foreground (`--inclusive=false`
    /// restores the strict comparison over a config file).
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    inclusive: Option<bool>,
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,
    /// Vote threshold for peak-count mode.
    #[arg(long)]
    vote_threshold: Option<u32>,
    /// Keep at most this many lines in peak-count mode.
    #[arg(long)]
    max_lines: Option<usize>,
    /// Cap profile outliers at mean + FACTOR * std.
    #[arg(long, value_name = "FACTOR")]
    clamp: Option<f64>,
    #[arg(long)]
    theta_step: Option<f64>,
    #[arg(long)]
    rho_step: Option<f64>,
    /// Report JSON path.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Also save the analyzed (rotated) raster as an image.
    #[arg(long)]
    save_raster: Option<PathBuf>,
    /// More log output; repeat for trace level.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Only warnings and errors on stderr.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn build_config(&self) -> Result<AnalysisConfig, Box<dyn std::error::Error>> {
        let mut cfg = match (&self.config, &self.image) {
            (Some(path), _) => AnalysisConfig::load_json(path)?,
            (None, Some(image)) => AnalysisConfig::new(image.to_string_lossy()),
            (None, None) => return Err("no input image: pass IMAGE or --config".into()),
        };

        if let Some(image) = &self.image {
            cfg.image_path = image.to_string_lossy().into_owned();
        }
        if let Some(output) = &self.output {
            cfg.output_path = Some(output.to_string_lossy().into_owned());
        }
        if let Some(rotate) = self.rotate {
            cfg.rotation_deg = rotate;
        }

        let params = &mut cfg.params;
        if let Some(threshold) = self.threshold {
            params.binarize.threshold = threshold;
        }
        if let Some(inclusive) = self.inclusive {
            params.binarize.inclusive = inclusive;
        }
        if let Some(step) = self.theta_step {
            params.sampling.theta_step_deg = step;
        }
        if let Some(step) = self.rho_step {
            params.sampling.rho_step = step;
        }
        if let Some(factor) = self.clamp {
            params.clamp_factor = Some(factor);
        }

        let mut lines = match params.reduction {
            ReductionMode::PeakCount(lines) => lines,
            ReductionMode::SumOfSquares => LineDetectionParams::default(),
        };
        if let Some(votes) = self.vote_threshold {
            lines.vote_threshold = votes;
        }
        if self.max_lines.is_some() {
            lines.max_lines = self.max_lines;
        }
        params.reduction = match self.mode {
            Some(ModeArg::SumOfSquares) => ReductionMode::SumOfSquares,
            Some(ModeArg::PeakCount) => ReductionMode::PeakCount(lines),
            None => match params.reduction {
                ReductionMode::PeakCount(_) => ReductionMode::PeakCount(lines),
                ReductionMode::SumOfSquares => ReductionMode::SumOfSquares,
            },
        };

        Ok(cfg)
    }
}

#[cfg(feature = "tracing")]
fn init_logging(verbosity: Verbosity) {
    hough_profile::core::init_tracing(verbosity);
}

#[cfg(not(feature = "tracing"))]
fn init_logging(verbosity: Verbosity) {
    if let Err(err) = hough_profile::core::init_logging(verbosity) {
        eprintln!("logging disabled: {err}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(Verbosity::from_flags(cli.quiet, cli.verbose));

    let cfg = cli.build_config()?;
    let raster = load_raster(&cfg.image_path)?;
    info!("loaded {} ({}x{})", cfg.image_path, raster.width, raster.height);

    let (width, height) = (raster.width, raster.height);
    let mut report = AnalysisReport::new(&cfg, cli.config.as_deref(), width, height);
    let mut session = AnalysisSession::new(cfg.params);

    let mut outcome = session.on_raster_ready(raster).map(|_| ());
    if outcome.is_ok() && cfg.rotation_deg != 0 {
        outcome = session.on_rotate(cfg.rotation_deg).map(|_| ());
    }

    if let Err(err) = &outcome {
        report.set_error(err);
    } else if let Some(frame) = session.last_frame() {
        report.set_frame(frame);
    }

    if let (Some(path), Some(original)) = (cli.save_raster.as_ref(), session.cached_raster()) {
        let analyzed = match session.last_frame() {
            Some(frame) if frame.rotation_deg != 0 => {
                rotate_about_center(&original.view(), frame.rotation_deg as f64, 0)
            }
            _ => original.clone(),
        };
        match raster_to_luma(&analyzed) {
            Some(img) => {
                img.save(path)?;
                info!("wrote analyzed raster to {}", path.display());
            }
            None => warn!("raster too large to save to {}", path.display()),
        }
    }

    let output_path = cfg.output_path();
    report.write_json(&output_path)?;
    println!("wrote report JSON to {}", output_path.display());

    outcome?;
    match (report.kind, report.dominant_theta_deg) {
        (Some(ProfileKind::PeakCount), Some(theta)) => {
            let lines: f64 = report.values.iter().sum();
            println!("{lines} line(s), most at theta = {theta} deg");
        }
        (_, Some(theta)) => println!("dominant orientation: theta = {theta} deg"),
        (_, None) => println!("no lines found: profile is all zero"),
    }
    Ok(())
}
