//! Siteswap simulator entry point
//!
//! Drives the simulation clock and prints ball positions each step.
//! Drawing is left to whatever consumes the output.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;

use siteswap_sim::{BallCountPolicy, JuggleEvent, Juggler, Result, Settings};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Siteswap pattern, e.g. 333 or 531 (non-digits are ignored)
    pattern: String,

    /// Number of time steps to simulate
    #[arg(long, default_value_t = 250)]
    steps: u64,

    /// Seconds per time step
    #[arg(long)]
    dt: Option<f64>,

    /// Seconds per beat
    #[arg(long)]
    beat: Option<f64>,

    /// Downward acceleration
    #[arg(long)]
    gravity: Option<f64>,

    /// Seconds a ball stays in hand past its scheduled throw
    #[arg(long)]
    delay: Option<f64>,

    /// Reject patterns whose throw sum is not divisible by the period
    #[arg(long)]
    strict: bool,

    /// JSON settings file (command line flags override it)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit one JSON array of snapshots per step
    #[arg(long)]
    json: bool,

    /// Print throw/catch events
    #[arg(long)]
    events: bool,
}

impl Args {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(dt) = self.dt {
            settings.time_step = dt;
        }
        if let Some(beat) = self.beat {
            settings.beat_duration = beat;
        }
        if let Some(gravity) = self.gravity {
            settings.gravity = gravity;
        }
        if let Some(delay) = self.delay {
            settings.throw_release_delay = delay;
        }
        if self.strict {
            settings.ball_count_policy = BallCountPolicy::Strict;
        }
        Ok(settings)
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let mut juggler = Juggler::from_siteswap(&args.pattern, args.settings()?)?;
    log::info!(
        "Simulating {} steps of {:.3}s",
        args.steps,
        juggler.settings().time_step
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for _ in 0..args.steps {
        let events = juggler.step();

        if args.events {
            for event in &events {
                writeln!(out, "{}", describe(event))?;
            }
        }

        if args.json {
            writeln!(out, "{}", serde_json::to_string(&juggler.snapshots())?)?;
        } else {
            write!(out, "{:8.3}", juggler.time())?;
            for snap in juggler.snapshots() {
                write!(
                    out,
                    "  #{} {} {:>9} ({:7.3}, {:7.3})",
                    snap.id,
                    snap.hand.as_str(),
                    snap.state.as_str(),
                    snap.position.x,
                    snap.position.y
                )?;
            }
            writeln!(out)?;
        }
    }

    let (held, in_flight) = juggler.counts();
    log::info!("Finished at {:.3}s: {} held, {} in flight", juggler.time(), held, in_flight);
    Ok(())
}

fn describe(event: &JuggleEvent) -> String {
    match *event {
        JuggleEvent::Throw {
            ball,
            time,
            from,
            to,
            value,
        } => format!(
            "# {:.3} ball {} thrown {} -> {} ({})",
            time,
            ball,
            from.as_str(),
            to.as_str(),
            value
        ),
        JuggleEvent::Catch { ball, time, hand } => {
            format!("# {:.3} ball {} caught in {}", time, ball, hand.as_str())
        }
        JuggleEvent::Hold { ball, time, hand } => {
            format!("# {:.3} ball {} held in {}", time, ball, hand.as_str())
        }
    }
}
