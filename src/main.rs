use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use env_logger::{Env, Target};
use log::{debug, info};

use gif_manip::{
    crop_quadrants, load_image, resize_to_canvas, write_gif, write_tiles, Cli, Effect, GifOptions,
};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                println!("{}", err);
                return ExitCode::FAILURE;
            }
        },
    };

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .target(Target::Stdout)
        .format_timestamp(None)
        .format_target(false)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    // Validate before touching any file
    let delay_ms = cli.frame_delay()?;
    let output_path = cli.output_path();

    let img = load_image(&cli.input, cli.size, cli.mode.activity())
        .context("Failed to load input image")?;

    let effect = match cli.effect() {
        Some(effect) => effect,
        None => {
            let tiles = crop_quadrants(&img);
            write_tiles(&tiles, &output_path).context("Failed to write tiles")?;
            return Ok(());
        }
    };

    let resized = resize_to_canvas(&img, cli.size);
    debug!(
        "Canvas: {}x{} -> {}x{} (target: {})",
        img.width(),
        img.height(),
        resized.width(),
        resized.height(),
        cli.size
    );

    match effect {
        Effect::Spin(direction) | Effect::Strobe { direction, .. } => info!(
            "{} {} {} with speed = {} ms.",
            capitalize(cli.mode.activity()),
            cli.input.display(),
            direction,
            delay_ms
        ),
        Effect::Emote => info!("Saving the file as an emote."),
        Effect::Bounce | Effect::Flip => info!(
            "{} {} with speed = {} ms.",
            capitalize(cli.mode.activity()),
            cli.input.display(),
            delay_ms
        ),
    }

    let frames = effect.frames(&resized);
    let frame_count = frames.len();
    let options = GifOptions {
        delay_ms,
        speed: cli.encode_speed,
    };
    write_gif(frames, &output_path, options)
        .with_context(|| format!("Failed to save output: {:?}", output_path))?;

    if effect == Effect::Emote {
        info!("Emote created: {}", output_path.display());
    } else {
        info!(
            "{} GIF created: {} ({} frames)",
            capitalize(cli.mode.activity()),
            output_path.display(),
            frame_count
        );
    }
    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
