// Compass heading from a single magnetometer reading, corrected for the
// local magnetic declination. No tilt compensation.

use core::f32::consts::PI;
use libm::atan2f;

const RAD_TO_DEG: f32 = 180.0 / PI;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeclinationDirection {
    East,
    West,
}

/// Declination in radians from the degrees/minutes form published for the
/// deployment location. East is positive, west negative.
pub fn declination_radians(degrees: i16, minutes: i16, direction: DeclinationDirection) -> f32 {
    let sign = match direction {
        DeclinationDirection::East => 1.0,
        DeclinationDirection::West => -1.0,
    };
    sign * (degrees as f32 + minutes as f32 / 60.0) * (PI / 180.0)
}

/// Heading in degrees, [0, 360). Stateless; identical inputs give identical
/// output.
pub fn compute_heading(mag: (f32, f32, f32), declination_rad: f32) -> f32 {
    let mut heading = atan2f(mag.0, mag.1) + declination_rad;

    // Correct for when signs are reversed
    if heading < 0.0 {
        heading += 2.0 * PI;
    }
    // Check for wrap due to addition of declination
    if heading >= 2.0 * PI {
        heading -= 2.0 * PI;
    }

    heading * RAD_TO_DEG
}
