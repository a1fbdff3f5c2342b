use nalgebra::Matrix3;

use crate::cli::Direction;

/// Degrees in a full turn
pub const FULL_TURN: f64 = 360.0;

/// Spin sweep: 1°, 21°, ... up to a full turn
pub const SPIN_START: f64 = 1.0;
pub const SPIN_STEP: f64 = 20.0;

/// Bounce sweep: 1°, 41°, ... short of a full turn
pub const BOUNCE_START: f64 = 1.0;
pub const BOUNCE_STEP: f64 = 40.0;

/// Angles `start, start + step, ...` while below `end` (or equal when `inclusive`)
fn sweep(start: f64, step: f64, end: f64, inclusive: bool) -> Vec<f64> {
    let mut angles = Vec::new();
    let mut angle = start;
    while angle < end || (inclusive && angle == end) {
        angles.push(angle);
        angle += step;
    }
    angles
}

/// Angles of a full-turn spin in the given direction.
///
/// Positive angles turn counterclockwise on screen, so the clockwise sweep is
/// the counterclockwise one negated.
pub fn spin_angles(direction: Direction) -> Vec<f64> {
    sweep(SPIN_START, SPIN_STEP, FULL_TURN, true)
        .into_iter()
        .map(|a| a * direction.sign())
        .collect()
}

/// Forward sweep followed by the same angles in reverse
pub fn bounce_angles() -> Vec<f64> {
    let forward = sweep(BOUNCE_START, BOUNCE_STEP, FULL_TURN, false);
    let back = forward.iter().rev().copied();
    forward.iter().copied().chain(back).collect()
}

/// Affine matrix rotating by `degrees` (counterclockwise on screen) about `center`.
///
/// Image rows grow downwards, so the sine terms carry the opposite sign of the
/// textbook rotation.
pub fn rotation_matrix(degrees: f64, center: (f64, f64)) -> Matrix3<f64> {
    let (cx, cy) = center;
    let (sin, cos) = degrees.to_radians().sin_cos();

    let translate_to_origin = Matrix3::new(
        1.0, 0.0, -cx,
        0.0, 1.0, -cy,
        0.0, 0.0, 1.0,
    );

    let rotate = Matrix3::new(
        cos, sin, 0.0,
        -sin, cos, 0.0,
        0.0, 0.0, 1.0,
    );

    let translate_back = Matrix3::new(
        1.0, 0.0, cx,
        0.0, 1.0, cy,
        0.0, 0.0, 1.0,
    );

    translate_back * rotate * translate_to_origin
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn apply(matrix: &Matrix3<f64>, x: f64, y: f64) -> (f64, f64) {
        let p = matrix * Vector3::new(x, y, 1.0);
        (p.x / p.z, p.y / p.z)
    }

    #[test]
    fn test_spin_sweeps_mirror_each_other() {
        let cw = spin_angles(Direction::Clockwise);
        let ccw = spin_angles(Direction::Counterclockwise);

        assert_eq!(cw.len(), 18);
        assert_eq!(cw.len(), ccw.len());
        assert_eq!(cw[0], -1.0);
        assert_eq!(*cw.last().unwrap(), -341.0);
        for (a, b) in cw.iter().zip(&ccw) {
            assert_eq!(*a, -*b);
        }
    }

    #[test]
    fn test_bounce_reverses() {
        let angles = bounce_angles();
        let half = angles.len() / 2;

        assert_eq!(angles.len(), 18);
        assert_eq!(angles[0], 1.0);
        assert_eq!(angles[half - 1], 321.0);
        let back: Vec<f64> = angles[half..].iter().rev().copied().collect();
        assert_eq!(&angles[..half], back.as_slice());
    }

    #[test]
    fn test_rotation_keeps_center() {
        let matrix = rotation_matrix(73.0, (40.0, 40.0));
        let (x, y) = apply(&matrix, 40.0, 40.0);
        assert!((x - 40.0).abs() < 1e-9);
        assert!((y - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_positive_angle_turns_counterclockwise() {
        // A point right of center ends up above it after a quarter turn
        let matrix = rotation_matrix(90.0, (0.0, 0.0));
        let (x, y) = apply(&matrix, 10.0, 0.0);
        assert!(x.abs() < 1e-9);
        assert!((y + 10.0).abs() < 1e-9);
    }
}
