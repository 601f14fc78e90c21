//! Full-pipeline tests against synthetic sensor streams.
//!
//! No hardware: a mock `ImuSource` plays back stationary or biased samples
//! and encoder ticks are generated across wrap boundaries, verifying:
//! - calibration followed by live operation reads ~zero when stationary
//! - offsets are installed once and survive live updates
//! - wheel velocity accumulation across counter wraps
//!
//! Run with: `cargo test --test odometry`

use approx::assert_relative_eq;
use core::convert::Infallible;
use driftcell::drivers::encoder::EncoderConfig;
use driftcell::drivers::imu::{Axes, ImuScale, ImuSource, RawInertialSample};
use driftcell::filtering::ahrs::calibration::CalibrationConfig;
use driftcell::filtering::ahrs::complementary::ComplementaryConfig;
use driftcell::filtering::heading::{declination_radians, DeclinationDirection};
use driftcell::odometry::{Odometry, OdometryConfig};
use embedded_hal::blocking::delay::DelayMs;

struct PlaybackSource {
    sample: RawInertialSample,
    mag: Axes,
}

impl ImuSource for PlaybackSource {
    type Error = Infallible;

    fn read_inertial(&mut self) -> Result<RawInertialSample, Infallible> {
        Ok(self.sample)
    }

    fn read_mag(&mut self) -> Result<Axes, Infallible> {
        Ok(self.mag)
    }
}

struct NoopDelay;

impl DelayMs<u16> for NoopDelay {
    fn delay_ms(&mut self, _ms: u16) {}
}

fn test_config() -> OdometryConfig {
    OdometryConfig {
        filter: ComplementaryConfig::default(),
        scale: ImuScale::default(),
        sample_period_s: 0.01,
        declination_rad: declination_radians(4, 0, DeclinationDirection::East),
        left_encoder: EncoderConfig {
            wrap_modulus: 65_536,
            ticks_to_dps: 0.5,
        },
        right_encoder: EncoderConfig {
            wrap_modulus: 65_536,
            ticks_to_dps: 0.5,
        },
    }
}

fn stationary_level() -> RawInertialSample {
    RawInertialSample {
        accel: Axes {
            x: 0,
            y: 0,
            z: 16384,
        },
        gyro: Axes::default(),
    }
}

#[test]
fn calibrated_stationary_robot_reports_zero_attitude() {
    let mut odom = Odometry::new(test_config()).unwrap();
    let mut source = PlaybackSource {
        sample: stationary_level(),
        mag: Axes::default(),
    };

    let offsets = odom
        .calibrate(&mut source, &mut NoopDelay, &CalibrationConfig::default())
        .unwrap();
    assert!(offsets.0.abs() < 1e-3);

    let mut last = (0.0, 0.0, 0.0);
    for _ in 0..1_000 {
        last = odom.update_attitude(&stationary_level()).unwrap();
    }
    assert!(last.0.abs() < 1e-2, "roll {}", last.0);
    assert!(last.1.abs() < 1e-2, "pitch {}", last.1);
    assert!(last.2.abs() < 1e-2, "yaw {}", last.2);
}

#[test]
fn degenerate_frame_holds_the_previous_estimate() {
    let mut odom = Odometry::new(test_config()).unwrap();

    let zero = RawInertialSample::default();
    assert!(odom.update_attitude(&zero).is_err());
    assert_eq!(odom.attitude(), (0.0, 0.0, 0.0));

    // the loop recovers on the next valid frame
    assert!(odom.update_attitude(&stationary_level()).is_ok());
}

#[test]
fn heading_uses_configured_declination() {
    let odom = Odometry::new(test_config()).unwrap();
    // magnetic north: atan2(0, y>0) = 0, plus 4 deg east declination
    let heading = odom.heading(Axes {
        x: 0,
        y: 400,
        z: -120,
    });
    assert_relative_eq!(heading, 4.0, epsilon = 1e-3);
    assert!((0.0..360.0).contains(&heading));
}

#[test]
fn wheel_velocities_track_through_wraparound() {
    let mut odom = Odometry::new(test_config()).unwrap();

    // both wheels forward at 100 ticks/sample, left starting near the top
    // of the counter so it wraps mid-run
    let mut left_tick = 65_400u32;
    let mut right_tick = 0u32;
    odom.update_wheel_velocities((left_tick as u16, false), (right_tick as u16, false));

    for _ in 0..10 {
        left_tick = (left_tick + 100) % 65_536;
        right_tick = (right_tick + 100) % 65_536;
        let vel =
            odom.update_wheel_velocities((left_tick as u16, false), (right_tick as u16, false));
        assert_relative_eq!(vel.left, 50.0); // 100 ticks * 0.5 deg/s per tick
        assert_relative_eq!(vel.right, 50.0);
    }
}

#[test]
fn reverse_wheel_velocity_follows_the_sign_convention() {
    let mut odom = Odometry::new(test_config()).unwrap();
    odom.update_wheel_velocities((150, false), (150, false));

    // down-counting, no wrap: delta = -(current - previous)
    let vel = odom.update_wheel_velocities((100, true), (100, true));
    assert_relative_eq!(vel.left, 25.0);
    assert_relative_eq!(vel.right, 25.0);
}

#[test]
fn calibration_offsets_survive_live_updates() {
    let biased = RawInertialSample {
        accel: Axes {
            x: 0,
            y: 0,
            z: 16384,
        },
        gyro: Axes { x: 131, y: 0, z: 0 }, // 1 deg/s roll-rate bias
    };
    let mut odom = Odometry::new(test_config()).unwrap();
    let mut source = PlaybackSource {
        sample: biased,
        mag: Axes::default(),
    };

    let offsets = odom
        .calibrate(&mut source, &mut NoopDelay, &CalibrationConfig::default())
        .unwrap();
    assert!(offsets.0 > 0.0);

    let mut last = (0.0, 0.0, 0.0);
    for _ in 0..2_000 {
        last = odom.update_attitude(&biased).unwrap();
    }
    assert!(last.0.abs() < 0.2, "residual roll bias {}", last.0);
}
