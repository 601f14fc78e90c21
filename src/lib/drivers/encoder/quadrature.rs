// Wheel angular velocity from a free-running, wrapping hardware counter
// sampled once per period. The counter's direction flag selects the delta
// rule; wraparound is resolved against the configured modulus.

use crate::ConfigError;
use embedded_hal::{Direction, Qei};

// 16-bit timer counting 0..=65535
pub const DEFAULT_WRAP_MODULUS: u32 = 65_536;

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderConfig {
    /// Counter modulus: the counter counts 0..modulus-1 and wraps.
    pub wrap_modulus: u32,
    /// Wheel-specific ticks-per-sample to deg/s conversion constant.
    pub ticks_to_dps: f32,
}

/// Per-wheel tick bookkeeping and delta computation.
///
/// The down-counting wrap branch intentionally does not negate its delta,
/// matching the deployed controller; see `wrap_reverse_is_not_negated`.
pub struct EncoderChannel {
    tick: u16,
    tick_prev: u16,
    wrap_modulus: u32,
    ticks_to_dps: f32,
}

impl EncoderChannel {
    pub fn new(config: EncoderConfig) -> Result<Self, ConfigError> {
        if config.wrap_modulus == 0 {
            return Err(ConfigError::ZeroWrapModulus);
        }
        Ok(Self {
            tick: 0,
            tick_prev: 0,
            wrap_modulus: config.wrap_modulus,
            ticks_to_dps: config.ticks_to_dps,
        })
    }

    pub fn reset(&mut self) {
        self.tick = 0;
        self.tick_prev = 0;
    }

    /// Consume one counter sample and return the signed angular velocity
    /// in deg/s for the interval since the previous sample.
    pub fn update(&mut self, tick: u16, counting_down: bool) -> f32 {
        self.tick = tick;

        let tick = i32::from(self.tick);
        let prev = i32::from(self.tick_prev);
        let modulus = self.wrap_modulus as i32;

        let delta = if !counting_down {
            if tick >= prev {
                tick - prev
            } else {
                (modulus - prev) + tick
            }
        } else if prev >= tick {
            -(tick - prev)
        } else {
            (modulus - tick) + prev
        };

        self.tick_prev = self.tick;
        delta as f32 * self.ticks_to_dps
    }
}

/// Hardware seam: feeds an `EncoderChannel` from any `Qei` peripheral.
pub struct QuadratureEncoder<Q> {
    qei: Q,
    channel: EncoderChannel,
}

impl<Q> QuadratureEncoder<Q>
where
    Q: Qei,
    Q::Count: Into<u16>,
{
    pub fn new(qei: Q, config: EncoderConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            qei,
            channel: EncoderChannel::new(config)?,
        })
    }

    pub fn read_angular_speed(&mut self) -> f32 {
        let tick: u16 = self.qei.count().into();
        let counting_down = matches!(self.qei.direction(), Direction::Downcounting);
        self.channel.update(tick, counting_down)
    }
}
