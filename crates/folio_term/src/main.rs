//! folio - drive the portfolio widgets from a terminal
//!
//! Subcommands:
//! - `score`: evaluate the risk gauge for one transaction
//! - `chat`: talk to the canned-response companion (`/quit` to leave)
//! - `cartpole`: run the cart-pole loop, animated or headless
//!
//! Configuration is read from `--config`, else from the OS config directory:
//! - Linux: ~/.config/folio/config.json
//! - Windows: %APPDATA%\folio\config.json
//! - MacOS: ~/Library/Application Support/folio/config.json

use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use clap::{Parser, Subcommand};
use folio::config::{FolioConfig, MAX_REPLY_DELAY_MS};
use folio::prng::Prng;
use folio::schedule::ManualScheduler;
use folio::surface::DrawList;
use folio_widgets::animation::CartPoleAnimation;
use folio_widgets::cartpole::{CartPole, CartPoleParams, CartPoleSnapshot, StepOutcome};
use folio_widgets::responder::{ChatEntry, ChatSession, Sender};
use folio_widgets::risk::{self, RiskBreakdown, RiskFeatures, RiskReading};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod clock;
mod grid;
mod paths;

use clock::IntervalScheduler;
use grid::CharGrid;
use paths::AppPaths;

#[derive(Parser, Debug)]
#[command(name = "folio", about = "Portfolio widgets in a terminal")]
struct Cli {
    /// Config file (defaults to the OS config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score one transaction with the fixed risk rules.
    Score {
        #[arg(long, default_value_t = 0.0)]
        amount: f64,
        /// Hour of day, 0-23.
        #[arg(long, default_value_t = 12.0)]
        hour: f64,
        /// Day of week, 0 = Sunday .. 6 = Saturday.
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(0..=6))]
        day: u8,
        /// Merchant risk in [0, 1].
        #[arg(long, default_value_t = 0.0)]
        merchant_risk: f64,
        /// Distance from home.
        #[arg(long, default_value_t = 0.0)]
        distance: f64,
        /// Purchase category is unusual for this customer.
        #[arg(long)]
        unusual: bool,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Chat with the scripted responder on stdin.
    Chat {
        #[arg(long)]
        seed: Option<u64>,
        /// Reply delay override in milliseconds (at most 60000).
        #[arg(long, value_parser = clap::value_parser!(u64).range(..=MAX_REPLY_DELAY_MS))]
        delay_ms: Option<u64>,
    },
    /// Run the cart-pole loop.
    Cartpole {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        fps: Option<u32>,
        /// Stop after this many episodes.
        #[arg(long)]
        episodes: Option<u32>,
        /// Step as fast as possible without drawing; requires --episodes.
        #[arg(long, requires = "episodes")]
        headless: bool,
        #[arg(long, default_value_t = 80)]
        cols: usize,
        #[arg(long, default_value_t = 20)]
        rows: usize,
        /// Print the final summary as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<FolioConfig, Box<dyn std::error::Error>> {
    let path = match path {
        Some(p) => return Ok(FolioConfig::load(p)?),
        None => AppPaths::new()?.config_file(),
    };
    Ok(FolioConfig::load_or_default(&path)?)
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(default_filter).unwrap_or_else(|_| EnvFilter::new("info"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Seed from config/flag, else from the wall clock.
fn make_rng(seed: Option<u64>) -> Prng {
    match seed {
        Some(s) => Prng::new(s),
        None => {
            let hint = Local::now().timestamp_nanos_opt().unwrap_or_default() as u64;
            Prng::from_entropy_hint(hint)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// score
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Serialize)]
struct ScoreReport {
    reading: RiskReading,
    label: &'static str,
    color: &'static str,
    raw: f64,
    breakdown: RiskBreakdown,
}

fn run_score(features: RiskFeatures, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (score, breakdown) = risk::score_with_breakdown(&features);
    let reading = RiskReading::from_score(score);
    debug!(?features, score, "scored");

    if json {
        let report = ScoreReport {
            reading,
            label: reading.tier.label(),
            color: reading.tier.color(),
            raw: breakdown.raw(),
            breakdown,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{}% {} (gauge {} deg)",
        reading.percent,
        reading.tier.label(),
        folio::numfmt::fixed(reading.gauge_degrees, 0)
    );
    for (rule, w) in &breakdown.contributions {
        println!("  {:<26} {}", rule.label(), folio::numfmt::signed_fixed(*w, 2));
    }
    if breakdown.raw() > 1.0 {
        println!(
            "  raw {} clamped to 1.00",
            folio::numfmt::fixed(breakdown.raw(), 2)
        );
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// chat
// ═══════════════════════════════════════════════════════════════════════════

fn print_entry(e: &ChatEntry) {
    let who = match e.sender {
        Sender::User => "you",
        Sender::Assistant => "bot",
    };
    println!("[{}] {}: {}", e.timestamp(), who, e.text);
}

async fn run_chat(cfg: &FolioConfig, seed: Option<u64>, delay_ms: Option<u64>) -> std::io::Result<()> {
    let mut rng = make_rng(seed.or(cfg.chat.seed));
    let delay = Duration::from_millis(delay_ms.unwrap_or(cfg.chat.reply_delay_ms));
    let now = || Local::now().time();

    let mut chat = if cfg.chat.greet_on_open {
        ChatSession::with_greeting(delay, now())
    } else {
        ChatSession::new(delay)
    };
    for e in chat.transcript().entries() {
        print_entry(e);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else { break };
        if line.trim() == "/quit" {
            break;
        }

        let Some(reply) = chat.submit(&line, now(), &mut rng) else {
            continue;
        };
        println!("bot is typing...");
        tokio::time::sleep(reply.delay()).await;
        print_entry(chat.deliver(reply, now()));
    }

    info!(messages = chat.transcript().len(), "chat closed");
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// cartpole
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Serialize)]
struct CartPoleSummary {
    episodes: usize,
    scores: Vec<u32>,
    best: u32,
    trailing_average: f32,
    final_state: CartPoleSnapshot,
}

fn summarize<S, R>(anim: &CartPoleAnimation<S, R>) -> CartPoleSummary
where
    S: folio::schedule::FrameScheduler,
    R: folio::prng::RandomSource,
{
    let log = anim.sim().log();
    CartPoleSummary {
        episodes: log.len(),
        scores: log.scores().to_vec(),
        best: log.best(),
        trailing_average: log.trailing_average(anim.average_window()),
        final_state: anim.sim().snapshot(anim.average_window()),
    }
}

fn print_summary(summary: &CartPoleSummary, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        println!(
            "{} episodes, best {}, trailing average {}",
            summary.episodes,
            summary.best,
            folio::numfmt::fixed(summary.trailing_average as f64, 1)
        );
    }
    Ok(())
}

fn log_outcome(out: StepOutcome, sim: &CartPole, average_window: usize) {
    if let StepOutcome::EpisodeEnded { score, reason } = out {
        info!(episode = sim.episode() - 1, score, ?reason, "episode ended");
        debug!(snapshot = ?sim.snapshot(average_window), "next episode");
    }
}

fn run_cartpole_headless(
    cfg: &FolioConfig,
    seed: Option<u64>,
    episodes: u32,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut anim = CartPoleAnimation::new(
        CartPoleParams::default(),
        ManualScheduler::new(),
        make_rng(seed.or(cfg.cartpole.seed)),
        cfg.cartpole.average_window,
    );
    let mut surface = DrawList::new(600.0, 300.0);

    anim.start();
    while anim.sim().log().len() < episodes as usize {
        if anim.scheduler_mut().fire().is_none() {
            break;
        }
        let out = anim.on_frame(&mut surface);
        log_outcome(out, anim.sim(), anim.average_window());
    }
    anim.stop();

    print_summary(&summarize(&anim), json)
}

async fn run_cartpole_animated(
    cfg: &FolioConfig,
    seed: Option<u64>,
    fps: Option<u32>,
    episodes: Option<u32>,
    (cols, rows): (usize, usize),
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let fps = fps.unwrap_or(cfg.cartpole.fps).clamp(1, 240);
    let mut anim = CartPoleAnimation::new(
        CartPoleParams::default(),
        IntervalScheduler::new(fps),
        make_rng(seed.or(cfg.cartpole.seed)),
        cfg.cartpole.average_window,
    );
    let mut grid = CharGrid::new(cols, rows);

    anim.start();
    info!(fps, "cart-pole running; Enter pauses/resumes, q quits");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        if !anim.is_running() && !stdin_open {
            break;
        }
        tokio::select! {
            frame = anim.scheduler_mut().next_frame(), if anim.is_running() => {
                if frame.is_none() {
                    continue;
                }
                let out = anim.on_frame(&mut grid);
                // Clear screen, cursor home.
                println!("\x1b[2J\x1b[H{}", grid.render());
                debug!(timestep = anim.sim().timestep(), "frame");
                log_outcome(out, anim.sim(), anim.average_window());
                if episodes.is_some_and(|n| anim.sim().log().len() >= n as usize) {
                    anim.stop();
                    break;
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line {
                    Ok(Some(l)) if l.trim() == "q" => break,
                    Ok(Some(_)) => {
                        let running = anim.toggle();
                        info!(running, "toggled");
                        if !running {
                            // Paused: show the frozen frame with its HUD.
                            anim.draw(&mut grid);
                        }
                    }
                    Ok(None) => stdin_open = false,
                    Err(e) => {
                        warn!("stdin closed: {}", e);
                        stdin_open = false;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    anim.stop();

    print_summary(&summarize(&anim), json)
}

// ═══════════════════════════════════════════════════════════════════════════
// Main
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_ref())?;

    init_tracing(&cfg.log.filter);

    match cli.command {
        Command::Score {
            amount,
            hour,
            day,
            merchant_risk,
            distance,
            unusual,
            json,
        } => {
            let features = RiskFeatures {
                amount,
                hour,
                day: risk::weekday_from_js_index(day),
                merchant_risk,
                distance_from_home: distance,
                unusual_category: unusual,
            };
            run_score(features, json)?;
        }
        Command::Chat { seed, delay_ms } => run_chat(&cfg, seed, delay_ms).await?,
        Command::Cartpole {
            seed,
            fps,
            episodes,
            headless,
            cols,
            rows,
            json,
        } => {
            if headless {
                let episodes = episodes.unwrap_or(1);
                run_cartpole_headless(&cfg, seed, episodes, json)?;
            } else {
                run_cartpole_animated(&cfg, seed, fps, episodes, (cols, rows), json).await?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn delay_flag_shares_the_config_cap() {
        let ok = Cli::try_parse_from(["folio", "chat", "--delay-ms", "60000"]);
        assert!(ok.is_ok());
        let too_long = Cli::try_parse_from(["folio", "chat", "--delay-ms", "60001"]);
        assert!(too_long.is_err());
    }

    #[test]
    fn headless_summary_carries_the_final_state() {
        let cfg = FolioConfig::default();
        let mut anim = CartPoleAnimation::new(
            CartPoleParams::default(),
            ManualScheduler::new(),
            make_rng(Some(5)),
            cfg.cartpole.average_window,
        );
        let mut surface = DrawList::new(600.0, 300.0);
        anim.start();
        for _ in 0..3 {
            anim.scheduler_mut().fire();
            anim.on_frame(&mut surface);
        }
        let summary = summarize(&anim);
        assert_eq!(summary.final_state, anim.sim().snapshot(10));
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["final_state"]["timestep"].is_u64());
    }
}
