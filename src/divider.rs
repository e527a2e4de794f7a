//! Edge counting frequency divider.
//!
//! Counts comparator edges and reports every `ratio`th one, so an output flipped on
//! each wrap runs at `1 / ratio` of the edge rate. With the default ratio of 200 this
//! doubles as a crude debounce for a noisy input.

/// Edges per secondary toggle on the reference board.
pub const DEFAULT_RATIO: u16 = 200;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DividerError {
    /// A ratio of 0 would never wrap.
    ZeroRatio,
}

/// Result of feeding one edge to the divider.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tick {
    /// The edge was counted; the count is still below the ratio.
    Counted,
    /// The count reached the ratio and was reset to 0.
    Wrapped,
}

/// Counter state. `count` stays in `0..ratio` between edges.
#[derive(Clone, Copy, Debug)]
pub struct EdgeDivider {
    count: u16,
    ratio: u16,
}

impl EdgeDivider {
    pub const fn new(ratio: u16) -> Result<Self, DividerError> {
        if ratio == 0 {
            return Err(DividerError::ZeroRatio);
        }
        Ok(Self { count: 0, ratio })
    }

    /// Feed one edge. Returns `Tick::Wrapped` exactly when the incremented count
    /// reaches the ratio, at which point the count is back to 0.
    pub fn on_edge(&mut self) -> Tick {
        self.count += 1;
        if self.count < self.ratio {
            Tick::Counted
        } else {
            self.count = 0;
            Tick::Wrapped
        }
    }

    /// Edges seen since the last wrap.
    pub fn count(&self) -> u16 {
        self.count
    }

    pub fn ratio(&self) -> u16 {
        self.ratio
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

impl Default for EdgeDivider {
    fn default() -> Self {
        Self {
            count: 0,
            ratio: DEFAULT_RATIO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_ratio_rejected() {
        assert_eq!(EdgeDivider::new(0).unwrap_err(), DividerError::ZeroRatio);
    }

    #[test]
    fn ratio_of_one_wraps_every_edge() {
        let mut d = EdgeDivider::new(1).unwrap();
        for _ in 0..5 {
            assert_eq!(d.on_edge(), Tick::Wrapped);
            assert_eq!(d.count(), 0);
        }
    }

    #[test]
    fn reset_discards_partial_count() {
        let mut d = EdgeDivider::default();
        for _ in 0..150 {
            d.on_edge();
        }
        d.reset();
        assert_eq!(d.count(), 0);
        for _ in 0..199 {
            assert_eq!(d.on_edge(), Tick::Counted);
        }
        assert_eq!(d.on_edge(), Tick::Wrapped);
    }
}
