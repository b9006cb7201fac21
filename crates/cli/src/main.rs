#![deny(warnings)]

use anyhow::Context;
use chrono::Timelike;
use clap::Parser;
use easyviz_affect_core::config::{
    resolve_environment, resolve_master_volume, resolve_persona, EngineConfig, EnvironmentMode,
    StdEnv,
};
use easyviz_affect_core::emotion::{
    classify_time_of_day, BehaviorSignal, EmotionState, Intensity, InteractionKind,
};
use easyviz_affect_core::engine::FeedbackEngine;
use easyviz_affect_core::persona::{suggestions, FeedbackPayload, PersonaStyle};
use easyviz_affect_core::playback::{AudioPlaybackSink, DummyPlaybackSink, PlaybackSink};
use easyviz_affect_core::tone::SoundEffect;
use easyviz_affect_core::util::BoundedHistory;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::BufRead;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const HISTORY_CAPACITY: usize = 20;

#[derive(Parser, Debug)]
#[command(name = "easyviz-affect")]
#[command(about = "Emotion-aware multimodal feedback: classify, select, synthesize, play")]
struct Args {
    /// Free-text input to classify.
    #[arg(long)]
    text: Option<String>,

    /// Task completion rate in [0,1]; values outside are clamped.
    #[arg(long)]
    completion_rate: Option<f32>,

    /// Interaction pattern: quick_click, hover, repeated_clicks, other.
    #[arg(long)]
    interaction: Option<InteractionKind>,

    /// Interaction duration in milliseconds.
    #[arg(long)]
    interaction_ms: Option<u64>,

    /// Persona style: warm, humor, encourage.
    #[arg(long)]
    persona: Option<PersonaStyle>,

    /// Environment mode: day, night, work. Auto-detected from the local
    /// hour when omitted.
    #[arg(long)]
    environment: Option<EnvironmentMode>,

    /// Master volume in [0,1].
    #[arg(long)]
    volume: Option<f32>,

    /// Sound effect modifier: success, progress, encouragement,
    /// notification, error, achievement.
    #[arg(long)]
    effect: Option<SoundEffect>,

    /// Play the fixed celebration preset and exit.
    #[arg(long)]
    celebration: bool,

    /// Play the welcome preset and exit.
    #[arg(long)]
    welcome: bool,

    /// Play an ambient background tone of this length (seconds) and exit.
    #[arg(long)]
    ambient_secs: Option<f32>,

    /// Render tones without playing them.
    #[arg(long)]
    mute: bool,

    /// Print the full response as JSON.
    #[arg(long)]
    json: bool,

    /// Seed for phrase/emoji selection (reproducible output).
    #[arg(long)]
    seed: Option<u64>,

    /// Read lines from stdin and respond to each.
    #[arg(long)]
    interactive: bool,

    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let env = StdEnv;
    let local_hour = chrono::Local::now().hour();
    let config = EngineConfig {
        persona: resolve_persona(args.persona, &env)?,
        environment: resolve_environment(
            args.environment,
            &env,
            EnvironmentMode::from_hour(local_hour),
        )?,
        master_volume: resolve_master_volume(args.volume, &env)?,
    };

    tracing::info!(
        persona = %config.persona,
        environment = %config.environment,
        volume = config.master_volume.value(),
        "config loaded"
    );

    if args.mute {
        run(args, config, local_hour, DummyPlaybackSink::new()).await
    } else {
        run(args, config, local_hour, AudioPlaybackSink::new()).await
    }
}

async fn run<P: PlaybackSink>(
    args: Args,
    config: EngineConfig,
    local_hour: u32,
    playback: P,
) -> anyhow::Result<()> {
    let engine = FeedbackEngine::new(config, playback);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    if args.celebration {
        let tones = engine.renderer().celebration();
        engine.play(tones).await;
        return Ok(());
    }
    if args.welcome {
        let tones = engine.renderer().welcome();
        engine.play(tones).await;
        return Ok(());
    }
    if let Some(secs) = args.ambient_secs {
        let emotion = classify_time_of_day(local_hour);
        let tones = engine.renderer().ambient(emotion, secs);
        engine.play(tones).await;
        return Ok(());
    }

    if args.interactive {
        return run_interactive(&engine, &mut rng, args.json).await;
    }

    let behavior = BehaviorSignal {
        completion_rate: args.completion_rate,
        duration: args.interaction_ms.map(Duration::from_millis),
        interaction: args.interaction,
    };

    // With nothing to classify, fall back to the day-part mood.
    let response = if args.text.is_none() && behavior == BehaviorSignal::default() {
        let mood = classify_time_of_day(local_hour);
        tracing::debug!(mood = %mood, "no input; using time-of-day mood");
        let state = EmotionState::now(mood, Intensity::default());
        engine.respond_to_state(state, args.effect, &mut rng)
    } else {
        engine.respond_with_rng(args.text.as_deref(), &behavior, args.effect, &mut rng)
    };
    print_response(&response, args.json)?;
    engine.play(response.tones).await;
    Ok(())
}

async fn run_interactive<P: PlaybackSink>(
    engine: &FeedbackEngine<P>,
    rng: &mut StdRng,
    json: bool,
) -> anyhow::Result<()> {
    let mut history: BoundedHistory<FeedbackPayload> = BoundedHistory::new(HISTORY_CAPACITY);
    let stdin = std::io::stdin();

    println!("type something (:history to review, :quit to leave)");
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let trimmed = line.trim();
        match trimmed {
            "" => continue,
            ":quit" => break,
            ":history" => {
                for payload in history.iter() {
                    println!("  {} {}", payload.emojis.join(""), payload.text);
                }
                continue;
            }
            _ => {}
        }

        let response =
            engine.respond_with_rng(Some(trimmed), &BehaviorSignal::default(), None, rng);
        print_response(&response, json)?;
        history.push(response.payload.clone());
        engine.play(response.tones).await;
    }
    Ok(())
}

fn print_response(
    response: &easyviz_affect_core::engine::EngineResponse,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(response)?);
        return Ok(());
    }

    println!(
        "{} ({:.0}%)  {}",
        response.emotion.emotion,
        response.emotion.intensity.value() * 100.0,
        response.payload.emojis.join(" ")
    );
    println!("{}", response.payload.text);
    println!(
        "theme {} / {}  animation {}  tones {}",
        response.payload.visual_theme.primary_color,
        response.payload.visual_theme.secondary_color,
        response.payload.animation_tag,
        response.tones.len()
    );
    for suggestion in suggestions(response.emotion.emotion) {
        println!("  · {suggestion}");
    }
    Ok(())
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .with_context(|| format!("invalid --log-level: {level}"))?,
        )
        .from_env_lossy();

    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}
