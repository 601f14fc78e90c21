pub mod quadrature;

pub use quadrature::{EncoderChannel, EncoderConfig, QuadratureEncoder};
