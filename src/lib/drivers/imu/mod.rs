// Raw sample types and the provider seam for the inertial/magnetic sensor.
// Register-level bus access lives in the host firmware; this crate only
// consumes the captured counts.

pub mod units;

pub use units::ImuScale;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Axes {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

/// One fixed-period capture of the inertial sensor.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawInertialSample {
    pub accel: Axes,
    pub gyro: Axes,
}

/// Supplier of raw sensor counts, one sample per invocation.
///
/// Reads may block up to the bus timeout; errors are propagated opaquely
/// and never retried here.
pub trait ImuSource {
    type Error;

    fn read_inertial(&mut self) -> Result<RawInertialSample, Self::Error>;

    fn read_mag(&mut self) -> Result<Axes, Self::Error>;
}
