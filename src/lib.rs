pub mod cli;
pub mod effects;
pub mod error;
pub mod geometry;
pub mod load;
pub mod output;
pub mod transform;

pub use cli::{Cli, Direction, Mode};
pub use effects::{Effect, FlashColor};
pub use error::{ManipError, Result};
pub use geometry::{bounce_angles, rotation_matrix, spin_angles};
pub use load::load_image;
pub use output::{write_gif, write_tiles, GifOptions};
pub use transform::{crop_quadrants, resize_to_canvas, rotate_frame, Quadrant, Tile};
