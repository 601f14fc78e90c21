// Complementary filter: accelerometer tilt angles low-passed against
// integrated gyro rates, blended by a fixed weight alpha.

pub use crate::filtering::ahrs::ahrs_filter::*;
use crate::filtering::lowpass::LowPassFilter;
use crate::ConfigError;
use core::f32::consts::PI;
use libm::{atan2f, sqrtf};

const RAD_TO_DEG: f32 = 180.0 / PI;

// Below this the accel vector carries no usable direction
const MIN_ACCEL_NORM: f32 = 1e-6;

pub const DEFAULT_ALPHA: f32 = 0.98;

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ComplementaryConfig {
    // smoothing weight on history, open interval (0, 1)
    pub alpha: f32,
}

impl Default for ComplementaryConfig {
    fn default() -> ComplementaryConfig {
        ComplementaryConfig {
            alpha: DEFAULT_ALPHA,
        }
    }
}

pub struct ComplementaryFilter {
    alpha: f32,
    prev_accel: (f32, f32, f32), // unit-norm smoothed accel from last cycle
    gyro_x: LowPassFilter<f32>,
    gyro_y: LowPassFilter<f32>,
    gyro_z: LowPassFilter<f32>,
    angles: (f32, f32, f32), // (roll, pitch, yaw) accumulators in degrees
    offsets: (f32, f32, f32),
}

impl ComplementaryFilter {
    pub fn new(config: ComplementaryConfig) -> Result<Self, ConfigError> {
        if !(config.alpha > 0.0 && config.alpha < 1.0) {
            return Err(ConfigError::InvalidAlpha);
        }
        Ok(Self {
            alpha: config.alpha,
            prev_accel: (0.0, 0.0, 0.0),
            gyro_x: LowPassFilter::new(config.alpha),
            gyro_y: LowPassFilter::new(config.alpha),
            gyro_z: LowPassFilter::new(config.alpha),
            angles: (0.0, 0.0, 0.0),
            offsets: (0.0, 0.0, 0.0),
        })
    }

    // Written once by calibration; reset() leaves them alone
    pub fn set_offsets(&mut self, offsets: (f32, f32, f32)) {
        self.offsets = offsets;
    }

    pub fn offsets(&self) -> (f32, f32, f32) {
        self.offsets
    }
}

impl AHRSFilter for ComplementaryFilter {
    fn update(&mut self, imu_data: ImuData, deltat: f32) -> Result<(), FilterError> {
        let blend = 1.0 - self.alpha;

        // Smooth the accelerometer against last cycle's unit vector
        let acc_x = self.alpha * self.prev_accel.0 + blend * imu_data.accel.0;
        let acc_y = self.alpha * self.prev_accel.1 + blend * imu_data.accel.1;
        let acc_z = self.alpha * self.prev_accel.2 + blend * imu_data.accel.2;

        let norm = sqrtf(acc_x * acc_x + acc_y * acc_y + acc_z * acc_z);
        if norm < MIN_ACCEL_NORM {
            return Err(FilterError::DegenerateVector);
        }
        let acc_x = acc_x / norm;
        let acc_y = acc_y / norm;
        let acc_z = acc_z / norm;

        // Tilt angles from the normalized vector
        let acc_angle_x = atan2f(acc_y, acc_z) * RAD_TO_DEG;
        let acc_angle_y = atan2f(acc_x, acc_z) * RAD_TO_DEG;
        let acc_angle_z = atan2f(acc_y, acc_x) * RAD_TO_DEG;

        let gyr_x = self.gyro_x.update(imu_data.gyro.0);
        let gyr_y = self.gyro_y.update(imu_data.gyro.1);
        let gyr_z = self.gyro_z.update(imu_data.gyro.2);

        // Integrate the smoothed rates; pitch sign follows the axis convention
        let roll = self.angles.0 + gyr_x * deltat;
        let pitch = self.angles.1 - gyr_y * deltat;
        let yaw = self.angles.2 + gyr_z * deltat;

        // Blend toward the accelerometer angles
        self.angles.0 = self.alpha * roll + blend * acc_angle_x;
        self.angles.1 = self.alpha * pitch - blend * acc_angle_y;
        self.angles.2 = self.alpha * yaw + blend * acc_angle_z;

        self.prev_accel = (acc_x, acc_y, acc_z);
        Ok(())
    }

    fn get_euler_angles(&self) -> (f32, f32, f32) {
        (
            self.angles.0 - self.offsets.0,
            self.angles.1 - self.offsets.1,
            self.angles.2 - self.offsets.2,
        )
    }

    fn reset(&mut self) {
        self.prev_accel = (0.0, 0.0, 0.0);
        self.gyro_x.reset();
        self.gyro_y.reset();
        self.gyro_z.reset();
        self.angles = (0.0, 0.0, 0.0);
    }
}
