use clap::{Parser, ValueEnum};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::effects::{Effect, FlashColor};
use crate::error::{ManipError, Result};

/// What to do with the input image
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Spin through a full turn
    Spin,
    /// Rotate forward, then back again
    Bounce,
    /// Mirror left-right, then upside down
    Flip,
    /// Spin with a colored flash every quarter turn
    Strobe,
    /// Cut the image into four quadrant JPEGs
    Tile,
    /// Just save as a single-frame emote
    Emote,
}

impl Mode {
    /// Activity name used in progress messages
    pub fn activity(self) -> &'static str {
        match self {
            Mode::Spin => "spinning",
            Mode::Bounce => "bouncing",
            Mode::Flip => "flipping",
            Mode::Strobe => "strobing",
            Mode::Tile => "tile creation",
            Mode::Emote => "emote creating",
        }
    }

    /// Modes producing more than one frame need a frame duration.
    pub fn needs_speed(self) -> bool {
        matches!(self, Mode::Spin | Mode::Bounce | Mode::Flip | Mode::Strobe)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_possible_value() {
            Some(value) => f.write_str(value.get_name()),
            None => write!(f, "{:?}", self),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    #[value(alias = "c")]
    Clockwise,
    #[value(alias = "cc")]
    Counterclockwise,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_possible_value() {
            Some(value) => f.write_str(value.get_name()),
            None => write!(f, "{:?}", self),
        }
    }
}

impl Direction {
    /// Multiplier applied to counterclockwise-positive angles
    pub fn sign(self) -> f64 {
        match self {
            Direction::Clockwise => -1.0,
            Direction::Counterclockwise => 1.0,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "gif-manip")]
#[command(version, about = "Manipulate an image and save it as an animated GIF emote (or four tiles)")]
pub struct Cli {
    /// Input file - the image you want to work with
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file - .gif is appended if missing (.jpg for tiles)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Frame duration in ms (50 is a clean spin, 20 is turbo); ignored for emote and tile
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub speed: Option<u32>,

    /// Task to perform
    #[arg(short, long, value_enum)]
    pub mode: Mode,

    /// Rotation direction for spin and strobe
    #[arg(short, long, value_enum, default_value_t = Direction::Clockwise)]
    pub direction: Direction,

    /// Strobe flash color
    #[arg(short, long, value_enum, default_value_t = FlashColor::Red)]
    pub color: FlashColor,

    /// Target canvas side in pixels
    #[arg(long, default_value = "80", value_parser = clap::value_parser!(u32).range(1..))]
    pub size: u32,

    /// GIF quantizer speed (1 = best quality, 30 = fastest)
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(i32).range(1..=30))]
    pub encode_speed: i32,

    /// Show processing details
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Frame duration, required for every animated mode.
    pub fn frame_delay(&self) -> Result<u32> {
        match (self.mode.needs_speed(), self.speed) {
            (true, None) => Err(ManipError::MissingSpeed { mode: self.mode }),
            (true, Some(ms)) => Ok(ms),
            (false, _) => Ok(0),
        }
    }

    /// Transform selected by the flags, `None` for tiling.
    pub fn effect(&self) -> Option<Effect> {
        match self.mode {
            Mode::Spin => Some(Effect::Spin(self.direction)),
            Mode::Bounce => Some(Effect::Bounce),
            Mode::Flip => Some(Effect::Flip),
            Mode::Strobe => Some(Effect::Strobe {
                direction: self.direction,
                color: self.color,
            }),
            Mode::Emote => Some(Effect::Emote),
            Mode::Tile => None,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        match self.mode {
            Mode::Tile => with_extension(&self.output, &["jpg", "jpeg"], "jpg"),
            _ => with_extension(&self.output, &["gif"], "gif"),
        }
    }
}

/// Appends `.{ext}` unless the path already ends in one of `accepted`.
fn with_extension(path: &Path, accepted: &[&str], ext: &str) -> PathBuf {
    let has_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| accepted.iter().any(|a| e.eq_ignore_ascii_case(a)));
    if has_ext {
        return path.to_path_buf();
    }

    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("gif-manip").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_gif_extension_appended() {
        let cli = parse(&["-i", "in.png", "-o", "out", "-m", "emote"]);
        assert_eq!(cli.output_path(), PathBuf::from("out.gif"));

        let cli = parse(&["-i", "in.png", "-o", "out.GIF", "-m", "emote"]);
        assert_eq!(cli.output_path(), PathBuf::from("out.GIF"));

        let cli = parse(&["-i", "in.png", "-o", "out.png", "-m", "emote"]);
        assert_eq!(cli.output_path(), PathBuf::from("out.png.gif"));
    }

    #[test]
    fn test_tile_extension() {
        let cli = parse(&["-i", "in.png", "-o", "tiles", "-m", "tile"]);
        assert_eq!(cli.output_path(), PathBuf::from("tiles.jpg"));

        let cli = parse(&["-i", "in.png", "-o", "tiles.jpeg", "-m", "tile"]);
        assert_eq!(cli.output_path(), PathBuf::from("tiles.jpeg"));
    }

    #[test]
    fn test_direction_aliases() {
        let cli = parse(&["-i", "a", "-o", "b", "-m", "spin", "-d", "cc", "-s", "50"]);
        assert_eq!(cli.direction, Direction::Counterclockwise);
        let cli = parse(&["-i", "a", "-o", "b", "-m", "spin", "-d", "c", "-s", "50"]);
        assert_eq!(cli.direction, Direction::Clockwise);
    }

    #[test]
    fn test_speed_required_for_motion() {
        let cli = parse(&["-i", "a", "-o", "b", "-m", "bounce"]);
        assert!(matches!(
            cli.frame_delay(),
            Err(ManipError::MissingSpeed { mode: Mode::Bounce })
        ));

        let cli = parse(&["-i", "a", "-o", "b", "-m", "emote", "-s", "20"]);
        assert_eq!(cli.frame_delay().unwrap(), 0);
    }

    #[test]
    fn test_zero_speed_rejected() {
        let args = ["gif-manip", "-i", "a", "-o", "b", "-m", "spin", "-s", "0"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_unknown_color_rejected() {
        let args = ["gif-manip", "-i", "a", "-o", "b", "-m", "strobe", "-c", "blue"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(Mode::Strobe.to_string(), "strobe");
    }
}
