/// Defines the strategy for updating the circuit weights based on calculated gradients.
///
/// The `Optimizer` trait is responsible for the mathematical transition of weights from state `t` to `t+1`.
pub trait Optimizer {
    /// Updates the provided slice of weights using the gradient of the cost.
    ///
    /// # Arguments
    /// * `params` - A mutable slice of the current weight values.
    /// * `grad` - The gradient corresponding to the `params` slice.
    fn update_params(&mut self, params: &mut [f32], grad: &[f32]);
}

impl<O: Optimizer + ?Sized> Optimizer for Box<O> {
    fn update_params(&mut self, params: &mut [f32], grad: &[f32]) {
        (**self).update_params(params, grad);
    }
}
