// Startup bias estimation: run the raw-sample -> convert -> filter pipeline
// over a fixed warm-up window and take the mean output per axis as the
// offset. Requires the robot stationary and level for the whole window.

use crate::drivers::imu::{ImuScale, ImuSource};
use crate::filtering::ahrs::ahrs_filter::AHRSFilter;
use crate::filtering::ahrs::complementary::ComplementaryFilter;
use embedded_hal::blocking::delay::DelayMs;

pub const DEFAULT_CALIBRATION_SAMPLES: u16 = 500;
pub const DEFAULT_CALIBRATION_INTERVAL_MS: u16 = 10;
pub const DEFAULT_SAMPLE_PERIOD_S: f32 = 0.01;

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationConfig {
    pub samples: u16,
    pub interval_ms: u16,
    pub sample_period_s: f32,
}

impl Default for CalibrationConfig {
    fn default() -> CalibrationConfig {
        CalibrationConfig {
            samples: DEFAULT_CALIBRATION_SAMPLES,
            interval_ms: DEFAULT_CALIBRATION_INTERVAL_MS,
            sample_period_s: DEFAULT_SAMPLE_PERIOD_S,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError<E> {
    Bus(E),
}

/// Blocking; runs exactly `config.samples` iterations, then installs the
/// computed offsets on a freshly reset filter and returns them.
pub fn calibrate_attitude<S, D>(
    filter: &mut ComplementaryFilter,
    source: &mut S,
    delay: &mut D,
    scale: &ImuScale,
    config: &CalibrationConfig,
) -> Result<(f32, f32, f32), CalibrationError<S::Error>>
where
    S: ImuSource,
    D: DelayMs<u16>,
{
    debug_assert!(config.samples > 0);

    filter.reset();
    filter.set_offsets((0.0, 0.0, 0.0));

    let mut sum = (0.0f32, 0.0f32, 0.0f32);
    for _ in 0..config.samples {
        let raw = source.read_inertial().map_err(CalibrationError::Bus)?;
        // A degenerate sample holds the previous angles; it still counts
        let _ = filter.update(scale.convert(&raw), config.sample_period_s);
        let (roll, pitch, yaw) = filter.get_euler_angles();
        sum.0 += roll;
        sum.1 += pitch;
        sum.2 += yaw;
        delay.delay_ms(config.interval_ms);
    }

    let n = config.samples as f32;
    let offsets = (sum.0 / n, sum.1 / n, sum.2 / n);

    filter.reset();
    filter.set_offsets(offsets);
    Ok(offsets)
}
