//! Small CPU neural-network toolkit: tensors, dense layers with manual
//! backward passes, and the Adam optimizer.

#[derive(Clone, Debug)]
pub struct Tensor {
    pub data: Vec<f32>,
    pub shape: Vec<usize>,
}

impl Tensor {
    pub fn from_vec(shape: Vec<usize>, data: Vec<f32>) -> Self {
        assert_eq!(shape.iter().product::<usize>(), data.len());
        Self { data, shape }
    }

    pub fn zeros(shape: Vec<usize>) -> Self {
        let len = shape.iter().product();
        Self { data: vec![0.0; len], shape }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Fully connected layer with weights stored row-major as `[out][in]`.
pub struct Dense {
    pub w: Tensor,
    pub b: Tensor,
    in_dim: usize,
    out_dim: usize,
}

impl Dense {
    pub fn new(weights: Vec<f32>, bias: Vec<f32>, in_dim: usize, out_dim: usize) -> Self {
        assert_eq!(weights.len(), in_dim * out_dim);
        assert_eq!(bias.len(), out_dim);
        Self {
            w: Tensor::from_vec(vec![out_dim, in_dim], weights),
            b: Tensor::from_vec(vec![out_dim], bias),
            in_dim,
            out_dim,
        }
    }

    /// Xavier-uniform initialization from an explicit random source.
    pub fn xavier(in_dim: usize, out_dim: usize, rng: &mut fastrand::Rng) -> Self {
        let limit = (6.0f32 / (in_dim as f32 + out_dim as f32)).sqrt();
        let weights: Vec<f32> = (0..in_dim * out_dim)
            .map(|_| (rng.f32() * 2.0 - 1.0) * limit)
            .collect();
        let bias = vec![0.0; out_dim];
        Self::new(weights, bias, in_dim, out_dim)
    }

    pub fn forward(&self, x: &Tensor) -> Tensor {
        let mut y = vec![0f32; self.out_dim];
        for o in 0..self.out_dim {
            let mut sum = self.b.data[o];
            for i in 0..self.in_dim {
                sum += self.w.data[o * self.in_dim + i] * x.data[i];
            }
            y[o] = sum;
        }
        Tensor::from_vec(vec![self.out_dim], y)
    }

    pub fn backward(&self, x: &Tensor, grad: &Tensor) -> (Tensor, Tensor, Tensor) {
        let mut grad_input = vec![0.0; self.in_dim];
        let mut grad_w = vec![0.0; self.in_dim * self.out_dim];
        let mut grad_b = vec![0.0; self.out_dim];
        for o in 0..self.out_dim {
            let go = grad.data[o];
            for i in 0..self.in_dim {
                grad_w[o * self.in_dim + i] += go * x.data[i];
                grad_input[i] += self.w.data[o * self.in_dim + i] * go;
            }
            grad_b[o] += go;
        }
        (
            Tensor::from_vec(vec![self.in_dim], grad_input),
            Tensor::from_vec(vec![self.out_dim, self.in_dim], grad_w),
            Tensor::from_vec(vec![self.out_dim], grad_b),
        )
    }
}

/// Trait representing a differentiable layer.
pub trait Layer {
    fn forward(&self, x: &Tensor) -> Tensor;
    fn backward(&self, x: &Tensor, grad: &Tensor) -> (Tensor, Vec<Tensor>);
    fn params(&self) -> Vec<&Tensor> {
        Vec::new()
    }
    fn params_mut(&mut self) -> Vec<&mut Tensor> {
        Vec::new()
    }
}

impl Layer for Dense {
    fn forward(&self, x: &Tensor) -> Tensor {
        Dense::forward(self, x)
    }

    fn backward(&self, x: &Tensor, grad: &Tensor) -> (Tensor, Vec<Tensor>) {
        let (dx, dw, db) = Dense::backward(self, x, grad);
        (dx, vec![dw, db])
    }

    fn params(&self) -> Vec<&Tensor> {
        vec![&self.w, &self.b]
    }

    fn params_mut(&mut self) -> Vec<&mut Tensor> {
        vec![&mut self.w, &mut self.b]
    }
}

#[derive(Default)]
pub struct TanhAct;

impl Layer for TanhAct {
    fn forward(&self, x: &Tensor) -> Tensor {
        let data: Vec<f32> = x.data.iter().map(|&v| v.tanh()).collect();
        Tensor::from_vec(x.shape.clone(), data)
    }

    fn backward(&self, x: &Tensor, grad: &Tensor) -> (Tensor, Vec<Tensor>) {
        let data: Vec<f32> = x
            .data
            .iter()
            .zip(&grad.data)
            .map(|(&v, &g)| {
                let t = v.tanh();
                g * (1.0 - t * t)
            })
            .collect();
        (Tensor::from_vec(x.shape.clone(), data), Vec::new())
    }
}

/// A stack of layers applied in order.
pub struct Sequential {
    layers: Vec<Box<dyn Layer>>,
}

impl Default for Sequential {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequential {
    #[must_use]
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    pub fn push<L: Layer + 'static>(&mut self, layer: L) {
        self.layers.push(Box::new(layer));
    }

    /// Forward pass; returns the output together with every intermediate
    /// activation (input first), as needed by [`backward`](Self::backward).
    pub fn forward(&self, x: &Tensor) -> (Tensor, Vec<Tensor>) {
        let mut out = x.clone();
        let mut activations = vec![out.clone()];
        for layer in &self.layers {
            out = layer.forward(&out);
            activations.push(out.clone());
        }
        (out, activations)
    }

    /// Reverse-mode pass. Parameter gradients come back aligned with
    /// [`params_mut`](Self::params_mut) order.
    pub fn backward(&self, activations: &[Tensor], grad: &Tensor) -> (Tensor, Vec<Tensor>) {
        let mut grad_out = grad.clone();
        let mut per_layer: Vec<Vec<Tensor>> = Vec::new();
        for (layer, activation) in self
            .layers
            .iter()
            .rev()
            .zip(activations.iter().rev().skip(1))
        {
            let (g_in, p) = layer.backward(activation, &grad_out);
            grad_out = g_in;
            per_layer.push(p);
        }
        let mut param_grads = Vec::new();
        for p in per_layer.into_iter().rev() {
            param_grads.extend(p);
        }
        (grad_out, param_grads)
    }

    pub fn params(&self) -> Vec<&Tensor> {
        self.layers.iter().flat_map(|l| l.params()).collect()
    }

    pub fn params_mut(&mut self) -> Vec<&mut Tensor> {
        let mut out = Vec::new();
        for layer in &mut self.layers {
            out.extend(layer.params_mut());
        }
        out
    }
}

/// Builds a multilayer perceptron with tanh hidden activations and a
/// linear output layer.
#[must_use]
pub fn mlp(sizes: &[usize], rng: &mut fastrand::Rng) -> Sequential {
    assert!(sizes.len() >= 2, "an mlp needs at least input and output sizes");
    let mut net = Sequential::new();
    for (k, pair) in sizes.windows(2).enumerate() {
        net.push(Dense::xavier(pair[0], pair[1], rng));
        if k + 2 < sizes.len() {
            net.push(TanhAct);
        }
    }
    net
}

pub struct Adam {
    lr: f32,
    beta1: f32,
    beta2: f32,
    eps: f32,
    t: usize,
    m: Vec<Vec<f32>>,
    v: Vec<Vec<f32>>,
}

impl Adam {
    #[must_use]
    pub fn new(lr: f32) -> Self {
        Self {
            lr,
            beta1: 0.9,
            beta2: 0.999,
            eps: 1e-8,
            t: 0,
            m: Vec::new(),
            v: Vec::new(),
        }
    }

    pub fn step(&mut self, params: &mut [(&mut Tensor, &Tensor)]) {
        if self.m.is_empty() {
            self.m = params.iter().map(|(p, _)| vec![0.0; p.len()]).collect();
            self.v = params.iter().map(|(p, _)| vec![0.0; p.len()]).collect();
        }
        self.t += 1;
        for ((p, g), (m_vec, v_vec)) in params
            .iter_mut()
            .zip(self.m.iter_mut().zip(self.v.iter_mut()))
        {
            for i in 0..p.len() {
                m_vec[i] = self.beta1 * m_vec[i] + (1.0 - self.beta1) * g.data[i];
                v_vec[i] = self.beta2 * v_vec[i] + (1.0 - self.beta2) * g.data[i] * g.data[i];
                let m_hat = m_vec[i] / (1.0 - self.beta1.powi(self.t as i32));
                let v_hat = v_vec[i] / (1.0 - self.beta2.powi(self.t as i32));
                p.data[i] -= self.lr * m_hat / (v_hat.sqrt() + self.eps);
            }
        }
    }
}
