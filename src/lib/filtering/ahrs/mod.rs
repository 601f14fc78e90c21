pub mod ahrs_filter;
pub mod calibration;
pub mod complementary;
