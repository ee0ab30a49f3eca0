/// Evenly spaced samples over a closed interval, like numpy.linspace.
#[derive(Clone, Debug)]
pub struct Linspace {
    start: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Linspace {
    pub fn new(min: f64, max: f64, n: usize) -> Self {
        let step = if n > 1 {
            let num_steps = (n - 1) as f64;
            (max - min) / num_steps
        } else {
            0.
        };
        Linspace {
            start: min,
            step,
            index: 0,
            len: n,
        }
    }

    /// Samples `min..=max` every `step` units.
    ///
    /// `step` must be positive. The count is floored, so a range that is not a
    /// whole multiple of `step` is stretched slightly to keep `max` as the last
    /// sample.
    pub fn with_step(min: f64, max: f64, step: f64) -> Self {
        // Absorb representation error so that e.g. 0.3 / 0.1 counts as 3 steps
        let steps = ((max - min) / step + 1e-9).floor();
        let n = if steps.is_finite() && steps > 0. {
            steps as usize + 1
        } else {
            1
        };

        Self::new(min, max, n)
    }
}

impl Iterator for Linspace {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            None
        } else {
            let i = self.index;
            self.index += 1;
            Some(self.start + self.step * i as f64)
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Linspace {}
