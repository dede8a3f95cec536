//! Push-up count

/// Press counter
///
/// Only ever goes up; resets only on a cold start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Counter {
    count: u32,
}

impl Counter {
    pub const fn new() -> Self {
        Self { count: 0 }
    }

    /// Count one press
    pub fn increment(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    pub fn get(&self) -> u32 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment() {
        let mut counter = Counter::new();
        counter.increment();
        counter.increment();
        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn test_saturates() {
        let mut counter = Counter { count: u32::MAX };
        counter.increment();
        assert_eq!(counter.get(), u32::MAX);
    }
}
