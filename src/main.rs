use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Parser;
use raylib::prelude::*;
use tracing::{error, info, warn};

use heroreel::carousel::CarouselScroll;
use heroreel::config::{self, Config};
use heroreel::constants;
use heroreel::logging::{init_logging, Verbosity};
use heroreel::{HeroController, Strategy};

mod ffmpeg;
mod render;
mod texture_loader;

use crate::ffmpeg::Ffmpeg;
use crate::render::{draw_page, strip_max_scroll, RaylibHost, STRIP_HEIGHT};
use crate::texture_loader::items_from_directory;

/// Rotating hero banner with a scrolling partner strip.
#[derive(Debug, Parser)]
#[command(name = "heroreel", version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use every image of this directory as a hero item instead of the configured list
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Advancement strategy, overrides the configuration
    #[arg(long, value_enum)]
    strategy: Option<Strategy>,

    /// Rotation interval for the timed strategy, overrides the configuration
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Encode the rendered frames to this video file (needs ffmpeg on PATH)
    #[arg(long)]
    record: Option<PathBuf>,

    /// Seconds to record before closing
    #[arg(long, default_value_t = 30, requires = "record")]
    record_secs: u32,

    #[arg(short, long)]
    quiet: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => config::load_from_path(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    if let Some(interval) = args.interval_ms {
        config.rotation_interval_ms = interval;
    }
    config.validate().context("invalid settings")?;
    Ok(config)
}

fn main() {
    let args = Args::parse();
    init_logging(Verbosity::from_flags(args.quiet, args.verbose));

    if let Err(e) = run(args) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let palette = config.palette()?;
    let items = match &args.dir {
        Some(dir) => items_from_directory(dir)?,
        None => config.items(),
    };

    let (mut rl, thread) = raylib::init()
        .size(constants::RENDER_WIDTH / 2, constants::RENDER_HEIGHT / 2)
        .title("3-AMS-CELMS")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(constants::FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut recorder = match &args.record {
        Some(path) => Some(Ffmpeg::spawn(constants::RENDER_WIDTH, constants::RENDER_HEIGHT, constants::FPS, path)?),
        None => None,
    };
    let frames_to_record = frames_for(args.record_secs);
    let mut frames_recorded = 0;

    let mut host = RaylibHost::new();
    let mut hero = HeroController::mount(items, config.start_policy(), &config.engine_settings(), &mut host);
    if !hero.is_armed() {
        warn!("no hero items to rotate, showing the partner strip only");
    }

    let mut carousel = CarouselScroll::new(config.carousel_speed);
    carousel.set_max_scroll(strip_max_scroll());

    let mut framebuffer = rl
        .load_render_texture(&thread, constants::RENDER_WIDTH as u32, constants::RENDER_HEIGHT as u32)
        .map_err(|e| anyhow::anyhow!("failed to create render texture: {}", e))?;

    while !rl.window_should_close() {
        // Recording needs a fixed step so the video runs at real speed
        let dt = if recorder.is_some() { constants::FRAME_TIME } else { rl.get_frame_time() };

        // --- Input ---
        let sw = rl.get_screen_width() as f32;
        let sh = rl.get_screen_height() as f32;
        let strip_top = sh * (1.0 - STRIP_HEIGHT as f32 / constants::RENDER_HEIGHT as f32);
        if rl.get_mouse_position().y >= strip_top {
            carousel.pause();
        } else {
            carousel.resume();
        }
        if rl.is_key_pressed(KeyboardKey::KEY_LEFT) {
            carousel.scroll_left(None);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_RIGHT) {
            carousel.scroll_right(None);
        }
        if let Some(index) = hero.frame().current.and_then(|_| number_key_pressed(&rl)) {
            hero.set_index(index, &mut host);
        }

        // --- Update ---
        hero.update(dt, &mut host);
        host.load_pending(&mut rl, &thread);
        carousel.update(dt / constants::FRAME_TIME);

        // --- Render into the fixed size framebuffer ---
        let frame = hero.frame();
        rl.draw_texture_mode(&thread, &mut framebuffer, |mut tmd| {
            let mut d = tmd.begin_drawing(&thread);
            draw_page(&mut d, &frame, &host, &carousel, &palette);
        });

        let mut d = rl.begin_drawing(&thread);
        d.draw_texture_pro(
            &framebuffer,
            Rectangle::new(0.0, 0.0, framebuffer.width() as f32, -(framebuffer.height() as f32)),
            Rectangle::new(0.0, 0.0, sw, sh),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
        drop(d);

        if let Some(ffmpeg) = recorder.as_mut() {
            let image = framebuffer
                .load_image()
                .map_err(|e| anyhow::anyhow!("failed to read back framebuffer: {}", e))?;
            ffmpeg.write(&image).context("writing frame to ffmpeg")?;
            frames_recorded += 1;
            if frames_recorded >= frames_to_record {
                info!(frames = frames_recorded, "recording finished");
                break;
            }
        }
    }

    hero.teardown(&mut host);
    // Closes the pipe and waits for the encoder
    drop(recorder);
    Ok(())
}

/// Frames rendered in `secs` seconds at the fixed recording rate.
fn frames_for(secs: u32) -> u32 {
    secs.saturating_mul(constants::FPS)
}

/// Keys 1-9 jump straight to an item.
fn number_key_pressed(rl: &RaylibHandle) -> Option<usize> {
    const KEYS: [KeyboardKey; 9] = [
        KeyboardKey::KEY_ONE,
        KeyboardKey::KEY_TWO,
        KeyboardKey::KEY_THREE,
        KeyboardKey::KEY_FOUR,
        KeyboardKey::KEY_FIVE,
        KeyboardKey::KEY_SIX,
        KeyboardKey::KEY_SEVEN,
        KeyboardKey::KEY_EIGHT,
        KeyboardKey::KEY_NINE,
    ];
    KEYS.iter().position(|key| rl.is_key_pressed(*key))
}
