use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, ValueEnum};
use quakescope::input::load_csv;
use quakescope::ui::{date_label, RatePreset, TimescaleControl};
use quakescope::view::{TracingDateDisplay, TracingPopup, TracingRenderer};
use quakescope::{Catalog, PlaybackEngine, PlayerConfig};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// Headless earthquake catalog playback
#[derive(Parser, Debug)]
#[command(name = "quakescope", version, about)]
struct Args {
    /// CSV catalog with time, latitude, longitude, depth, mag and place columns
    catalog: PathBuf,

    /// JSON config file (default: user config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Speed in simulated days per second
    #[arg(long, conflicts_with_all = ["slider", "preset"])]
    rate: Option<f64>,

    /// Speed slider position in [0, 1]
    #[arg(long, conflicts_with = "preset")]
    slider: Option<f64>,

    /// Named speed
    #[arg(long, value_enum)]
    preset: Option<PresetArg>,

    /// Jump to this date (YYYY-MM-DD) before playing
    #[arg(long)]
    jump: Option<NaiveDate>,

    /// Real seconds to run for
    #[arg(long, default_value_t = 10.0)]
    duration: f64,

    /// Ticks per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Play an empty catalog instead of failing when loading fails
    #[arg(long)]
    lenient: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PresetArg {
    Hour,
    Day,
    Month,
    Year,
}

impl From<PresetArg> for RatePreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Hour => RatePreset::HourPerSecond,
            PresetArg::Day => RatePreset::DayPerSecond,
            PresetArg::Month => RatePreset::MonthPerSecond,
            PresetArg::Year => RatePreset::YearPerSecond,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PlayerConfig::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PlayerConfig::load(),
    };

    let catalog = match load_csv(&args.catalog, config.globe.radius) {
        Ok(catalog) => catalog,
        Err(e) if args.lenient => {
            warn!("Catalog failed to load ({}), continuing with no events", e);
            Catalog::default()
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to load catalog {}", args.catalog.display()));
        }
    };

    if let Some((first, last)) = catalog.time_bounds() {
        info!("Catalog spans {} .. {}", date_label(first), date_label(last));
    }

    let mut engine = PlaybackEngine::new(catalog, &config.playback, config.markers.clone());
    engine.attach_renderer(Box::new(TracingRenderer::new()));
    engine.attach_date_display(Box::new(TracingDateDisplay::new()));
    engine.attach_popup(Box::new(TracingPopup));

    let mut timescale = TimescaleControl::new(config.timescale);
    let days = if let Some(rate) = args.rate {
        timescale.apply_rate(rate)
    } else if let Some(u) = args.slider {
        timescale.apply_position(u)
    } else if let Some(preset) = args.preset {
        timescale.apply_preset(preset.into())
    } else {
        timescale.apply_rate(config.playback.days_per_second)
    };
    engine.set_rate(days);
    info!("Speed: {}", timescale.label());

    if let Some(date) = args.jump {
        engine.jump_to_date(date.year(), date.month(), date.day());
    }

    if config.playback.autoplay && !engine.catalog().is_empty() {
        engine.play();
    } else {
        info!("Not playing (autoplay off or empty catalog)");
    }

    let frame = Duration::from_secs_f64(1.0 / f64::from(args.fps.max(1)));
    let deadline = Duration::try_from_secs_f64(args.duration.max(0.0))
        .ok()
        .and_then(|run_for| Instant::now().checked_add(run_for));

    let mut interval = tokio::time::interval(frame);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut last_tick = Instant::now();
    let mut dispatched = 0usize;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    // Main loop
    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = &mut ctrl_c => {
                info!("Interrupted");
                break;
            }
        }

        let now = Instant::now();
        let summary = engine.tick(now - last_tick);
        last_tick = now;
        dispatched += summary.dispatched.len();

        if engine.is_finished() {
            info!("Reached the end of the playback range");
            break;
        }
        if deadline.is_some_and(|deadline| now >= deadline) {
            break;
        }
    }

    info!(
        "Dispatched {} of {} events; stopped at {}",
        dispatched,
        engine.catalog().len(),
        date_label(engine.sim_time())
    );

    Ok(())
}
