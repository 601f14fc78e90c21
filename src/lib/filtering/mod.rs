pub mod ahrs;
pub mod heading;
pub mod lowpass;
