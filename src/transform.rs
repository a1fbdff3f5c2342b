use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbImage, RgbaImage};
use imageproc::geometric_transformations::{warp, Interpolation, Projection};

use crate::geometry::rotation_matrix;

/// Fill for the corners a rotation uncovers
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Crop and scale to exactly `target` x `target`, keeping the aspect ratio.
///
/// Images already at or under the target in either dimension are returned as is.
pub fn resize_to_canvas(img: &RgbaImage, target: u32) -> RgbaImage {
    let (width, height) = img.dimensions();
    if width <= target || height <= target {
        return img.clone();
    }

    DynamicImage::ImageRgba8(img.clone())
        .resize_to_fill(target, target, FilterType::Lanczos3)
        .to_rgba8()
}

/// Rotate about the image center, keeping the canvas size.
///
/// Positive `degrees` turn counterclockwise on screen.
pub fn rotate_frame(img: &RgbaImage, degrees: f64) -> RgbaImage {
    let (width, height) = img.dimensions();
    // Pixel centers sit on integer coordinates
    let center = ((width as f64 - 1.0) / 2.0, (height as f64 - 1.0) / 2.0);
    let m = rotation_matrix(degrees, center);

    let mut entries = [0f32; 9];
    for row in 0..3 {
        for col in 0..3 {
            entries[row * 3 + col] = m[(row, col)] as f32;
        }
    }

    // A pure rotation is always invertible
    match Projection::from_matrix(entries) {
        Some(projection) => warp(img, &projection, Interpolation::Nearest, TRANSPARENT),
        None => img.clone(),
    }
}

/// Left-right mirror, that mirror upside down, then the original upside down
pub fn flip_frames(img: &RgbaImage) -> Vec<RgbaImage> {
    let mirrored = imageops::flip_horizontal(img);
    let turned = imageops::flip_vertical(&mirrored);
    let upside_down = imageops::flip_vertical(img);
    vec![mirrored, turned, upside_down]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    LowerRight,
    LowerLeft,
    UpperRight,
    UpperLeft,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::LowerRight,
        Quadrant::LowerLeft,
        Quadrant::UpperRight,
        Quadrant::UpperLeft,
    ];

    /// File name prefix for this tile
    pub fn prefix(self) -> &'static str {
        match self {
            Quadrant::LowerRight => "lr_",
            Quadrant::LowerLeft => "ll_",
            Quadrant::UpperRight => "ur_",
            Quadrant::UpperLeft => "ul_",
        }
    }

    /// Region (x, y, width, height) of this quadrant, split at the integer midpoint
    pub fn bounds(self, width: u32, height: u32) -> (u32, u32, u32, u32) {
        let (mid_x, mid_y) = (width / 2, height / 2);
        match self {
            Quadrant::LowerRight => (mid_x, mid_y, width - mid_x, height - mid_y),
            Quadrant::LowerLeft => (0, mid_y, mid_x, height - mid_y),
            Quadrant::UpperRight => (mid_x, 0, width - mid_x, mid_y),
            Quadrant::UpperLeft => (0, 0, mid_x, mid_y),
        }
    }
}

#[derive(Debug)]
pub struct Tile {
    pub quadrant: Quadrant,
    pub image: RgbImage,
}

/// Split into four quadrant tiles, flattened to RGB for JPEG output
pub fn crop_quadrants(img: &RgbaImage) -> Vec<Tile> {
    let rgb = DynamicImage::ImageRgba8(img.clone()).to_rgb8();
    let (width, height) = rgb.dimensions();

    Quadrant::ALL
        .iter()
        .map(|&quadrant| {
            let (x, y, w, h) = quadrant.bounds(width, height);
            Tile {
                quadrant,
                image: imageops::crop_imm(&rgb, x, y, w, h).to_image(),
            }
        })
        .collect()
}
