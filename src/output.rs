use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, ImageFormat, RgbaImage};
use log::{debug, info};

use crate::error::{ManipError, Result};
use crate::transform::Tile;

/// GIF encoding settings
#[derive(Debug, Clone, Copy)]
pub struct GifOptions {
    /// Duration of every frame in milliseconds
    pub delay_ms: u32,
    /// Quantizer speed, 1 (best) to 30 (fastest)
    pub speed: i32,
}

impl Default for GifOptions {
    fn default() -> Self {
        Self {
            delay_ms: 0,
            speed: 10,
        }
    }
}

/// Write `frames` as a looping animated GIF
pub fn write_gif(frames: Vec<RgbaImage>, path: &Path, options: GifOptions) -> Result<()> {
    let encode_err = |source: image::ImageError| ManipError::Encode {
        path: path.to_path_buf(),
        source,
    };

    debug!(
        "Encoding {} frames at {} ms (speed {})",
        frames.len(),
        options.delay_ms,
        options.speed
    );

    let delay = Delay::from_numer_denom_ms(options.delay_ms, 1);
    let mut buf = Vec::new();
    {
        // The trailer is only written when the encoder drops
        let mut encoder = GifEncoder::new_with_speed(&mut buf, options.speed);
        encoder.set_repeat(Repeat::Infinite).map_err(encode_err)?;
        encoder
            .encode_frames(frames.into_iter().map(|f| Frame::from_parts(f, 0, 0, delay)))
            .map_err(encode_err)?;
    }

    let mut file = File::create(path).map_err(|source| ManipError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    file.write_all(&buf)
        .map_err(|source| ManipError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    debug!("Wrote {} bytes to {}", buf.len(), path.display());
    Ok(())
}

/// Path of a tile: the prefix goes in front of the file name, not the directory
pub fn tile_path(base: &Path, prefix: &str) -> PathBuf {
    let name = base
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    base.with_file_name(format!("{}{}", prefix, name))
}

/// Save each tile as a JPEG next to `base`, returning the written paths
pub fn write_tiles(tiles: &[Tile], base: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(tiles.len());
    for tile in tiles {
        let path = tile_path(base, tile.quadrant.prefix());
        tile.image
            .save_with_format(&path, ImageFormat::Jpeg)
            .map_err(|source| ManipError::Encode {
                path: path.clone(),
                source,
            })?;
        debug!("Wrote {}", path.display());
        written.push(path);
    }

    info!("Tiles created. Filenames prepended with lr_, ll_, ur_, ul_");
    Ok(written)
}
