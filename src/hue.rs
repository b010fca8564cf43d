//! Random hue generation for the `rand` command

/// Source of hues in `[0, 1)`
pub trait HueSource {
    fn next_hue(&mut self) -> f64;
}

impl<F: FnMut() -> f64> HueSource for F {
    fn next_hue(&mut self) -> f64 {
        self()
    }
}

/// Deterministic `SplitMix64` hue generator
///
/// Seed it from something that differs between boots (MAC address, ADC
/// noise, uptime at the first command) to get varying colors.
#[derive(Debug, Clone)]
pub struct SplitMixHue {
    state: u64,
}

impl SplitMixHue {
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    #[allow(clippy::cast_possible_truncation)]
    const fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        ((z ^ (z >> 31)) >> 32) as u32
    }
}

impl HueSource for SplitMixHue {
    fn next_hue(&mut self) -> f64 {
        // 2^32 keeps the result strictly below 1.0
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hues_stay_in_unit_range() {
        let mut hues = SplitMixHue::new(42);
        for _ in 0..1000 {
            let hue = hues.next_hue();
            assert!((0.0..1.0).contains(&hue));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SplitMixHue::new(7);
        let mut b = SplitMixHue::new(7);
        for _ in 0..16 {
            assert_eq!(a.next_hue().to_bits(), b.next_hue().to_bits());
        }
    }
}
