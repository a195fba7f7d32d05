//! "Nice" axis scales: ranges and steps rounded to 1/2/5/10 × 10^k.

/// Rounded axis range. `max - min == step * steps` up to float error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScale {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub steps: u32,
}

impl AxisScale {
    pub fn span(&self) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 {
            1.0
        } else {
            span
        }
    }

    /// Pixel row for `value` inside a plot area starting at `top` with `height` rows.
    /// Larger values map higher up.
    pub fn to_pixel(&self, value: f64, top: f64, height: f64) -> f64 {
        top + (self.max - value) / self.span() * height
    }

    /// Gridline values from `max` down to `min`.
    pub fn ticks(&self) -> impl Iterator<Item = f64> + '_ {
        (0..=self.steps).map(move |i| self.max - self.step * f64::from(i))
    }
}

pub fn nice_scale(min: f64, max: f64, max_ticks: u32) -> AxisScale {
    if min == max {
        let pad = if min == 0.0 { 1.0 } else { (min * 0.1).abs() };
        return AxisScale {
            min: min - pad,
            max: max + pad,
            step: pad,
            steps: 2,
        };
    }

    let ticks = f64::from(max_ticks.max(2));
    let range = nice_num(max - min, false);
    let step = nice_num(range / (ticks - 1.0), true);
    let nice_min = (min / step).floor() * step;
    let nice_max = (max / step).ceil() * step;
    let steps = ((nice_max - nice_min) / step).round().max(1.0) as u32;

    AxisScale {
        min: nice_min,
        max: nice_max,
        step,
        steps,
    }
}

/// Round `range` to a 1/2/5/10 multiple of its power of ten. With `round` the
/// nearest candidate is chosen, otherwise the next one up.
fn nice_num(range: f64, round: bool) -> f64 {
    let exponent = range.log10().floor();
    let magnitude = 10f64.powf(exponent);
    let fraction = range / magnitude;

    let nice_fraction = if round {
        if fraction < 1.5 {
            1.0
        } else if fraction < 3.0 {
            2.0
        } else if fraction < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice_fraction * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_data_range_with_round_steps() {
        let scale = nice_scale(5.0, 95.0, 5);
        assert_eq!(scale.min, 0.0);
        assert_eq!(scale.max, 100.0);
        assert_eq!(scale.step, 20.0);
        assert_eq!(scale.steps, 5);
    }

    #[test]
    fn degenerate_range_is_padded_symmetrically() {
        let scale = nice_scale(10.0, 10.0, 5);
        assert_eq!(scale.min, 9.0);
        assert_eq!(scale.max, 11.0);
        assert_eq!(scale.step, 1.0);
        assert_eq!(scale.steps, 2);

        let zero = nice_scale(0.0, 0.0, 5);
        assert_eq!((zero.min, zero.max), (-1.0, 1.0));
    }

    #[test]
    fn fractional_ranges_use_sub_unit_steps() {
        let scale = nice_scale(0.42, 0.87, 5);
        assert!(scale.min <= 0.42 && scale.max >= 0.87);
        assert!((scale.step - 0.1).abs() < 1e-12);
    }

    #[test]
    fn pixel_mapping_is_inverted_and_linear() {
        let scale = nice_scale(0.0, 100.0, 5);
        assert_eq!(scale.to_pixel(100.0, 24.0, 200.0), 24.0);
        assert_eq!(scale.to_pixel(0.0, 24.0, 200.0), 224.0);
        assert_eq!(scale.to_pixel(50.0, 24.0, 200.0), 124.0);
    }

    #[test]
    fn ticks_run_from_max_to_min() {
        let scale = nice_scale(5.0, 95.0, 5);
        let ticks: Vec<f64> = scale.ticks().collect();
        assert_eq!(ticks, vec![100.0, 80.0, 60.0, 40.0, 20.0, 0.0]);
    }
}
