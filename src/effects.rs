use clap::ValueEnum;
use image::{Rgba, RgbaImage};

use crate::cli::Direction;
use crate::geometry::{bounce_angles, spin_angles};
use crate::transform::{flip_frames, rotate_frame};

/// Solid color used for strobe flashes
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlashColor {
    #[default]
    Red,
    Orange,
    Yellow,
}

impl FlashColor {
    pub fn rgba(self) -> Rgba<u8> {
        match self {
            FlashColor::Red => Rgba([255, 0, 0, 255]),
            FlashColor::Orange => Rgba([255, 165, 0, 255]),
            FlashColor::Yellow => Rgba([255, 255, 0, 255]),
        }
    }
}

/// Number of flashes in a strobe, one per quarter turn
pub const STROBE_FLASHES: usize = 4;

/// Frame generator selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Spin(Direction),
    Bounce,
    Flip,
    Strobe {
        direction: Direction,
        color: FlashColor,
    },
    Emote,
}

impl Effect {
    /// Build the frame sequence for `base`, in display order.
    pub fn frames(&self, base: &RgbaImage) -> Vec<RgbaImage> {
        match *self {
            Effect::Spin(direction) => rotations(base, &spin_angles(direction)),
            Effect::Bounce => rotations(base, &bounce_angles()),
            Effect::Flip => flip_frames(base),
            Effect::Strobe { direction, color } => {
                let spin = rotations(base, &spin_angles(direction));
                insert_flashes(spin, color)
            }
            Effect::Emote => vec![base.clone()],
        }
    }
}

fn rotations(base: &RgbaImage, angles: &[f64]) -> Vec<RgbaImage> {
    angles.iter().map(|&a| rotate_frame(base, a)).collect()
}

/// Frame counts after which a flash goes in: each quarter of the sweep
fn flash_points(len: usize) -> [usize; STROBE_FLASHES] {
    [len / 4, len / 2, len * 3 / 4, len].map(|p| p.max(1))
}

fn insert_flashes(frames: Vec<RgbaImage>, color: FlashColor) -> Vec<RgbaImage> {
    let Some(first) = frames.first() else {
        return frames;
    };
    let flash = RgbaImage::from_pixel(first.width(), first.height(), color.rgba());
    let points = flash_points(frames.len());

    let mut out = Vec::with_capacity(frames.len() + STROBE_FLASHES);
    for (i, frame) in frames.into_iter().enumerate() {
        out.push(frame);
        // Several points can land on the same frame for very short sweeps
        for _ in points.iter().filter(|&&p| p == i + 1) {
            out.push(flash.clone());
        }
    }
    out
}
