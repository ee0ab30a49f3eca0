use num::Float;

/// Piecewise-linear interpolation through `coords`, similar to numpy.interp.
///
/// Values left of the first point take the first ordinate and values right of
/// the last point take the last one. A vertical segment (two points sharing an
/// abscissa) evaluates to its upper end, so `x == x1 == x2` yields `y2`.
pub(crate) fn interp<F: Float>(x: F, coords: &[(F, F)]) -> F {
    let Some(&(first_x, first_y)) = coords.first() else {
        return F::zero();
    };

    // Base case
    if x < first_x {
        return first_y;
    }

    for pair in coords.windows(2) {
        let &[(x1, y1), (x2, y2)] = pair else {
            continue;
        };

        if x1 <= x && x <= x2 {
            let run = x2 - x1;

            if run <= F::zero() {
                return y2;
            }

            return y1 + (x - x1) * (y2 - y1) / run;
        }
    }

    coords.last().map_or(F::zero(), |&(_, y)| y)
}
