use std::path::Path;

use color_quant::NeuQuant;
use image::{DynamicImage, ImageReader, Rgba, RgbaImage};
use log::{debug, info, warn};

use crate::error::{ManipError, Result};

/// Palette size of the indexed conversion
pub const PALETTE_COLORS: usize = 256;

/// NeuQuant sampling factor (1 = every pixel, 30 = fastest)
const PALETTE_SAMPLE_FACTOR: i32 = 10;

const WHITE: [u8; 3] = [255, 255, 255];

/// Open `path` and normalize it to opaque RGBA.
///
/// Transparent sources are flattened onto white; opaque ones are reduced to a
/// 256-color adaptive palette. `activity` only feeds the progress messages.
pub fn load_image(path: &Path, target: u32, activity: &str) -> Result<RgbaImage> {
    if !path.is_file() {
        return Err(ManipError::InputNotFound(path.to_path_buf()));
    }

    let img = ImageReader::open(path)
        .map_err(|e| ManipError::Decode {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .with_guessed_format()
        .map_err(|e| ManipError::Decode {
            path: path.to_path_buf(),
            source: e.into(),
        })?
        .decode()
        .map_err(|source| ManipError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    info!("Opened {} for {}.", path.display(), activity);
    debug!(
        "Source: {}x{} {:?}",
        img.width(),
        img.height(),
        img.color()
    );

    if img.width() < target || img.height() < target {
        warn!(
            "Image smaller than {}x{}, {} may look weird.",
            target, target, activity
        );
    }

    Ok(normalize(img))
}

/// Flatten alpha, or reduce to an indexed palette when there is none
pub fn normalize(img: DynamicImage) -> RgbaImage {
    if img.color().has_alpha() {
        debug!("Flattening transparency onto white");
        flatten_alpha(&img.to_rgba8(), WHITE)
    } else {
        debug!("Reducing to {} colors", PALETTE_COLORS);
        reduce_palette(&img.to_rgba8())
    }
}

/// Composite onto an opaque background color
pub fn flatten_alpha(img: &RgbaImage, background: [u8; 3]) -> RgbaImage {
    let mut out = img.clone();
    for pixel in out.pixels_mut() {
        let alpha = pixel[3] as u32;
        for c in 0..3 {
            let blended = pixel[c] as u32 * alpha + background[c] as u32 * (255 - alpha);
            pixel[c] = ((blended + 127) / 255) as u8;
        }
        pixel[3] = 255;
    }
    out
}

/// Map every pixel onto an adaptive palette of at most 256 colors
pub fn reduce_palette(img: &RgbaImage) -> RgbaImage {
    if img.width() == 0 || img.height() == 0 {
        return img.clone();
    }

    let quant = NeuQuant::new(PALETTE_SAMPLE_FACTOR, PALETTE_COLORS, img.as_raw());
    let palette = quant.color_map_rgba();

    let mut out = img.clone();
    for pixel in out.pixels_mut() {
        let idx = quant.index_of(&pixel.0) * 4;
        *pixel = Rgba([palette[idx], palette[idx + 1], palette[idx + 2], 255]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::collections::HashSet;

    #[test]
    fn test_flatten_onto_white() {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]));
        img.put_pixel(1, 1, Rgba([200, 100, 50, 255]));
        img.put_pixel(2, 2, Rgba([0, 0, 0, 128]));

        let flat = flatten_alpha(&img, WHITE);
        assert_eq!(*flat.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
        assert_eq!(*flat.get_pixel(1, 1), Rgba([200, 100, 50, 255]));
        let half = flat.get_pixel(2, 2);
        assert!((half[0] as i32 - 127).abs() <= 1);
        assert!(flat.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn test_palette_limit() {
        let img = RgbImage::from_fn(64, 64, |x, y| Rgb([(x * 4) as u8, (y * 4) as u8, 128]));
        let reduced = normalize(DynamicImage::ImageRgb8(img));

        let colors: HashSet<[u8; 4]> = reduced.pixels().map(|p| p.0).collect();
        assert!(colors.len() <= PALETTE_COLORS);
        assert!(reduced.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn test_alpha_source_is_flattened() {
        let img = RgbaImage::from_pixel(8, 8, Rgba([10, 20, 30, 0]));
        let normalized = normalize(DynamicImage::ImageRgba8(img));
        assert!(normalized.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_missing_input() {
        let err = load_image(Path::new("does/not/exist.png"), 80, "spinning").unwrap_err();
        assert!(matches!(err, ManipError::InputNotFound(_)));
    }
}
