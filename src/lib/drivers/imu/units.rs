// Raw count to physical unit conversion.
//
// Each axis is divided by (corrector / FLOAT_SCALING). The correctors are
// per-axis so sensitivity trims can be absorbed without touching the shared
// scaling constant.

use crate::drivers::imu::RawInertialSample;
use crate::filtering::ahrs::ahrs_filter::ImuData;

pub const FLOAT_SCALING: f32 = 1000.0;

// +/- 2 g full scale, 16384 LSB/g
pub const ACCEL_X_CORRECTOR: f32 = 16_384_000.0;
pub const ACCEL_Y_CORRECTOR: f32 = 16_384_000.0;
pub const ACCEL_Z_CORRECTOR: f32 = 16_384_000.0;

// +/- 250 deg/s full scale, 131 LSB/(deg/s)
pub const GYRO_X_CORRECTOR: f32 = 131_000.0;
pub const GYRO_Y_CORRECTOR: f32 = 131_000.0;
pub const GYRO_Z_CORRECTOR: f32 = 131_000.0;

/// Per-axis scale correctors for one inertial sensor.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImuScale {
    pub accel_corrector: (f32, f32, f32),
    pub gyro_corrector: (f32, f32, f32),
}

impl Default for ImuScale {
    fn default() -> ImuScale {
        ImuScale {
            accel_corrector: (ACCEL_X_CORRECTOR, ACCEL_Y_CORRECTOR, ACCEL_Z_CORRECTOR),
            gyro_corrector: (GYRO_X_CORRECTOR, GYRO_Y_CORRECTOR, GYRO_Z_CORRECTOR),
        }
    }
}

impl ImuScale {
    /// Acceleration in g, angular rate in deg/s.
    pub fn convert(&self, raw: &RawInertialSample) -> ImuData {
        ImuData {
            accel: (
                raw.accel.x as f32 / (self.accel_corrector.0 / FLOAT_SCALING),
                raw.accel.y as f32 / (self.accel_corrector.1 / FLOAT_SCALING),
                raw.accel.z as f32 / (self.accel_corrector.2 / FLOAT_SCALING),
            ),
            gyro: (
                raw.gyro.x as f32 / (self.gyro_corrector.0 / FLOAT_SCALING),
                raw.gyro.y as f32 / (self.gyro_corrector.1 / FLOAT_SCALING),
                raw.gyro.z as f32 / (self.gyro_corrector.2 / FLOAT_SCALING),
            ),
        }
    }
}
