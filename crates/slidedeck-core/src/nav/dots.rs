/// Slide position indicator, one dot per slide
///
/// Storing a single active index keeps exactly one dot active at all times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavDots {
    count: usize,
    active: usize,
}

impl NavDots {
    /// The first dot starts active
    pub fn new(count: usize) -> Self {
        Self { count, active: 0 }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn active(&self) -> usize {
        self.active
    }

    #[inline]
    pub fn is_active(&self, index: usize) -> bool {
        self.count > 0 && index == self.active
    }

    /// Activate the dot at `index`; out-of-range indices are ignored
    pub fn set_active(&mut self, index: usize) -> bool {
        if index >= self.count {
            return false;
        }
        self.active = index;
        true
    }

    /// Active flag of every dot, in slide order
    pub fn flags(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.count).map(move |i| i == self.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_active() {
        let mut dots = NavDots::new(4);
        assert_eq!(dots.flags().filter(|f| *f).count(), 1);
        assert!(dots.is_active(0));

        assert!(dots.set_active(2));
        assert_eq!(dots.flags().collect::<Vec<_>>(), vec![false, false, true, false]);

        assert!(!dots.set_active(4));
        assert_eq!(dots.active(), 2);
        assert_eq!(dots.flags().filter(|f| *f).count(), 1);
    }
}
