/// A bounded continuous value moved in fixed steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider {
    value: f32,
    min: f32,
    max: f32,
    step: f32,
}

impl Slider {
    /// Creates a new `Slider`, clamping `value` into `[min, max]`.
    pub fn new(min: f32, max: f32, value: f32, step: f32) -> Self {
        let mut slider = Self {
            value: min,
            min,
            max,
            step,
        };
        slider.set(value);
        slider
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Sets the value, clamped to the slider's range and snapped to its step grid.
    pub fn set(&mut self, value: f32) {
        let snapped = (value / self.step).round() * self.step;
        self.value = snapped.clamp(self.min, self.max);
    }

    /// Moves the slider by `steps` steps, negative steps move it down.
    pub fn nudge(&mut self, steps: i32) {
        self.set(self.value + steps as f32 * self.step);
    }

    /// Where the value sits in the range, from `0` at `min` to `1` at `max`.
    pub fn ratio(&self) -> f64 {
        ((self.value - self.min) / (self.max - self.min)) as f64
    }
}
