use ml::nn::{mlp, Tensor};

/// Central finite differences through a full tanh MLP. Also pins the
/// alignment between `Sequential::backward`'s gradient list and
/// `params_mut` order, which the optimizer depends on.
#[test]
fn sequential_backward_matches_finite_differences() {
    let mut rng = fastrand::Rng::with_seed(17);
    let mut net = mlp(&[2, 3, 1], &mut rng);
    let x = Tensor::from_vec(vec![2], vec![0.7, -0.3]);

    let (out, acts) = net.forward(&x);
    assert_eq!(out.shape, vec![1]);
    let upstream = Tensor::from_vec(vec![1], vec![1.0]);
    let (_, grads) = net.backward(&acts, &upstream);

    // [w0, b0, w1, b1] for the two dense layers
    assert_eq!(grads.len(), 4);

    let eps = 1e-3f32;
    for k in 0..grads.len() {
        let last = grads[k].len() - 1;
        for idx in [0, last] {
            {
                let mut params = net.params_mut();
                params[k].data[idx] += eps;
            }
            let plus = net.forward(&x).0.data[0];
            {
                let mut params = net.params_mut();
                params[k].data[idx] -= 2.0 * eps;
            }
            let minus = net.forward(&x).0.data[0];
            {
                let mut params = net.params_mut();
                params[k].data[idx] += eps;
            }

            let numeric = (plus - minus) / (2.0 * eps);
            let analytic = grads[k].data[idx];
            assert!(
                (numeric - analytic).abs() < 5e-3,
                "param {k} element {idx}: analytic {analytic} vs numeric {numeric}"
            );
        }
    }
}
