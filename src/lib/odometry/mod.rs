// Robot-level estimation context: one attitude filter, one unit scale, the
// declination constant, and the two wheel encoder channels. The caller runs
// it from a single control loop; exclusive references keep invocations
// serialized.

use crate::drivers::encoder::{EncoderChannel, EncoderConfig};
use crate::drivers::imu::{Axes, ImuScale, ImuSource, RawInertialSample};
use crate::filtering::ahrs::ahrs_filter::{AHRSFilter, FilterError};
use crate::filtering::ahrs::calibration::{calibrate_attitude, CalibrationConfig, CalibrationError};
use crate::filtering::ahrs::complementary::{ComplementaryConfig, ComplementaryFilter};
use crate::filtering::heading::compute_heading;
use crate::ConfigError;
use embedded_hal::blocking::delay::DelayMs;

/// Signed wheel angular velocities in deg/s.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WheelVelocities {
    pub left: f32,
    pub right: f32,
}

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OdometryConfig {
    pub filter: ComplementaryConfig,
    pub scale: ImuScale,
    /// Fixed sampling period in seconds; the control loop must call
    /// `update_attitude` at exactly this rate.
    pub sample_period_s: f32,
    pub declination_rad: f32,
    pub left_encoder: EncoderConfig,
    pub right_encoder: EncoderConfig,
}

pub struct Odometry {
    filter: ComplementaryFilter,
    scale: ImuScale,
    sample_period_s: f32,
    declination_rad: f32,
    left: EncoderChannel,
    right: EncoderChannel,
}

impl Odometry {
    pub fn new(config: OdometryConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            filter: ComplementaryFilter::new(config.filter)?,
            scale: config.scale,
            sample_period_s: config.sample_period_s,
            declination_rad: config.declination_rad,
            left: EncoderChannel::new(config.left_encoder)?,
            right: EncoderChannel::new(config.right_encoder)?,
        })
    }

    /// One-time startup bias estimation; blocks for the whole warm-up
    /// window. The robot must be stationary and level throughout.
    pub fn calibrate<S, D>(
        &mut self,
        source: &mut S,
        delay: &mut D,
        config: &CalibrationConfig,
    ) -> Result<(f32, f32, f32), CalibrationError<S::Error>>
    where
        S: ImuSource,
        D: DelayMs<u16>,
    {
        calibrate_attitude(&mut self.filter, source, delay, &self.scale, config)
    }

    /// (roll, pitch, yaw) in degrees for one fixed-period sample. A
    /// degenerate accelerometer frame leaves the previous estimate in
    /// place and is reported to the caller.
    pub fn update_attitude(
        &mut self,
        raw: &RawInertialSample,
    ) -> Result<(f32, f32, f32), FilterError> {
        self.filter
            .update(self.scale.convert(raw), self.sample_period_s)?;
        Ok(self.filter.get_euler_angles())
    }

    /// Last attitude estimate without consuming a new sample.
    pub fn attitude(&self) -> (f32, f32, f32) {
        self.filter.get_euler_angles()
    }

    /// Declination-corrected compass heading in degrees, [0, 360).
    pub fn heading(&self, mag: Axes) -> f32 {
        compute_heading(
            (mag.x as f32, mag.y as f32, mag.z as f32),
            self.declination_rad,
        )
    }

    /// Consume one (tick, counting_down) sample per wheel.
    pub fn update_wheel_velocities(
        &mut self,
        left: (u16, bool),
        right: (u16, bool),
    ) -> WheelVelocities {
        WheelVelocities {
            left: self.left.update(left.0, left.1),
            right: self.right.update(right.0, right.1),
        }
    }
}
