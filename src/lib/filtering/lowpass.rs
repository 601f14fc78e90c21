use num_traits::{Num, NumAssignOps, NumCast, Signed};

// First-order smoothing with the weight on history:
// prev = alpha * prev + (1 - alpha) * data

pub struct LowPassFilter<ItemT> {
    alpha: ItemT,
    prev: ItemT,
}
impl<ItemT> LowPassFilter<ItemT>
where
    ItemT: Num + NumAssignOps + NumCast + Signed + core::marker::Copy,
{
    pub fn new(alpha: ItemT) -> LowPassFilter<ItemT> {
        LowPassFilter {
            alpha,
            prev: ItemT::zero(),
        }
    }

    pub fn reset(&mut self) {
        self.prev = ItemT::zero();
    }

    // Next output without committing state
    pub fn peek(&self, data: ItemT) -> ItemT {
        self.alpha * self.prev + (ItemT::one() - self.alpha) * data
    }

    pub fn update(&mut self, data: ItemT) -> ItemT {
        self.prev = self.peek(data);
        self.prev
    }

    pub fn value(&self) -> ItemT {
        self.prev
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn first_update_weighs_input_by_one_minus_alpha() {
        let mut lp = LowPassFilter::<f32>::new(0.98);
        assert_relative_eq!(lp.update(1.0), 0.02, epsilon = 1e-6);
    }

    #[test]
    fn converges_to_constant_input() {
        let mut lp = LowPassFilter::<f32>::new(0.9);
        for _ in 0..500 {
            lp.update(5.0);
        }
        assert_relative_eq!(lp.value(), 5.0, epsilon = 1e-4);
    }

    #[test]
    fn peek_does_not_commit() {
        let mut lp = LowPassFilter::<f32>::new(0.5);
        lp.update(2.0);
        let before = lp.value();
        let peeked = lp.peek(10.0);
        assert_eq!(lp.value(), before);
        assert_relative_eq!(lp.update(10.0), peeked);
    }

    #[test]
    fn reset_clears_history() {
        let mut lp = LowPassFilter::<f32>::new(0.5);
        lp.update(8.0);
        lp.reset();
        assert_eq!(lp.value(), 0.0);
    }
}
