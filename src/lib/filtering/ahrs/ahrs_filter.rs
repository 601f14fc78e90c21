#[derive(Debug, Default, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImuData {
    pub accel: (f32, f32, f32), // (ax, ay, az) in g
    pub gyro: (f32, f32, f32),  // (gx, gy, gz) in deg/s
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FilterError {
    // accel vector norm too small to normalize; cycle skipped, state held
    DegenerateVector,
}

pub trait AHRSFilter {
    // accel in g
    // gyro in deg/s
    // deltat (time delta between update calls) in seconds; the caller must
    // invoke at a constant rate equal to deltat, no elapsed time is measured
    fn update(&mut self, imu_data: ImuData, deltat: f32) -> Result<(), FilterError>;

    // (roll, pitch, yaw) in degrees, calibration offsets subtracted
    fn get_euler_angles(&self) -> (f32, f32, f32);

    // reset the filter to initial conditions
    fn reset(&mut self);
}
