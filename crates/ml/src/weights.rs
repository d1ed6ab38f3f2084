//! JSON import/export for trained policy weights.
//!
//! The on-disk format is a flat array alternating row-major `[out][in]`
//! weight matrices and bias vectors, one pair per dense layer. Hidden
//! layers are tanh, the output layer is linear; the layout is what the
//! downstream inference code consumes, so it carries no framing metadata.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::nn::{Dense, Sequential, TanhAct};

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WeightArray {
    Matrix(Vec<Vec<f32>>),
    Vector(Vec<f32>),
}

/// Serialize a network's dense-layer parameters to the export format.
///
/// # Errors
///
/// Fails if the network holds no parameters or a weight tensor is not a
/// matrix.
pub fn to_json(net: &Sequential) -> Result<String> {
    let params = net.params();
    if params.is_empty() || params.len() % 2 != 0 {
        bail!("network has no exportable weight/bias pairs");
    }
    let mut out = Vec::with_capacity(params.len());
    for pair in params.chunks(2) {
        let (w, b) = (pair[0], pair[1]);
        if w.shape.len() != 2 {
            bail!("weight tensor has shape {:?}, expected a matrix", w.shape);
        }
        let in_dim = w.shape[1];
        let rows: Vec<Vec<f32>> = w.data.chunks(in_dim).map(<[f32]>::to_vec).collect();
        out.push(WeightArray::Matrix(rows));
        out.push(WeightArray::Vector(b.data.clone()));
    }
    Ok(serde_json::to_string(&out)?)
}

/// Rebuild a tanh-hidden, linear-output network from the export format.
///
/// # Errors
///
/// Fails on malformed JSON, a broken matrix/vector alternation, ragged or
/// empty weight matrices, or a bias whose length disagrees with its
/// matrix's row count.
pub fn from_json(json: &str) -> Result<Sequential> {
    let arrays: Vec<WeightArray> = serde_json::from_str(json)?;
    if arrays.is_empty() || arrays.len() % 2 != 0 {
        bail!("expected alternating weight/bias pairs, got {} arrays", arrays.len());
    }
    let n_layers = arrays.len() / 2;
    let mut net = Sequential::new();
    let mut iter = arrays.into_iter();
    for k in 0..n_layers {
        let Some(WeightArray::Matrix(rows)) = iter.next() else {
            bail!("layer {k}: expected a weight matrix");
        };
        let Some(WeightArray::Vector(bias)) = iter.next() else {
            bail!("layer {k}: expected a bias vector");
        };

        let out_dim = rows.len();
        let in_dim = rows.first().map_or(0, Vec::len);
        if out_dim == 0 || in_dim == 0 {
            bail!("layer {k}: empty weight matrix");
        }
        if rows.iter().any(|r| r.len() != in_dim) {
            bail!("layer {k}: ragged weight matrix");
        }
        if bias.len() != out_dim {
            bail!(
                "layer {k}: bias length {} does not match {out_dim} output rows",
                bias.len()
            );
        }

        let flat: Vec<f32> = rows.into_iter().flatten().collect();
        net.push(Dense::new(flat, bias, in_dim, out_dim));
        if k + 1 < n_layers {
            net.push(TanhAct);
        }
    }
    Ok(net)
}
