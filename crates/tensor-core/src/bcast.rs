// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! NumPy-style shape broadcasting.
//!
//! [`BcastSpec`] turns a set of input shapes into a shared iteration shape
//! plus, per input, the element strides needed to replay size-1 dimensions
//! (stride 0) while walking the output linearly. The plan is computed once
//! per kernel invocation and consumed by the compute loop; it is never
//! persisted.
//!
//! The rule: right-align the shapes, pad the shorter ones on the left with
//! size-1 dimensions, and require each aligned pair of sizes to be equal
//! or 1. The output extent at each position is the non-1 size. A rank-0
//! shape therefore broadcasts against anything. Zero-sized dimensions
//! follow the same rule: 0 against 1 yields 0, and 0 against any other
//! size is incompatible.

use crate::{Shape, TensorError};

/// Per-input iteration descriptor. Strides are in elements, aligned to the
/// output rank; a stride of 0 marks a dimension that replays its single
/// input element across the whole output extent.
#[derive(Debug, Clone)]
struct BcastInput {
    strides: Vec<usize>,
    replay: Vec<bool>,
    identity: bool,
}

/// A broadcast plan over two or more input shapes.
#[derive(Debug, Clone)]
pub struct BcastSpec {
    out_dims: Vec<usize>,
    out_strides: Vec<usize>,
    inputs: Vec<BcastInput>,
}

impl BcastSpec {
    /// Computes the broadcast plan for the given shapes.
    ///
    /// # Errors
    /// Returns [`TensorError::BroadcastIncompatible`] naming the two
    /// offending shapes and the aligned dimension position where the
    /// equal-or-one rule fails.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::{BcastSpec, Shape};
    /// let a = Shape::new(vec![2, 1]);
    /// let b = Shape::new(vec![1, 3]);
    /// let spec = BcastSpec::compute(&[&a, &b]).unwrap();
    /// assert_eq!(spec.out_shape(), Shape::new(vec![2, 3]));
    /// ```
    pub fn compute(shapes: &[&Shape]) -> Result<Self, TensorError> {
        let rank = shapes.iter().map(|s| s.rank()).max().unwrap_or(0);

        // Resolve the output extent per aligned position, remembering which
        // input established each non-1 extent for the error diagnostic.
        let mut out_dims = vec![1usize; rank];
        let mut setter = vec![0usize; rank];
        for (i, shape) in shapes.iter().enumerate() {
            let pad = rank - shape.rank();
            for (d, &size) in shape.dims().iter().enumerate() {
                let pos = pad + d;
                if size == out_dims[pos] || size == 1 {
                    continue;
                }
                if out_dims[pos] == 1 {
                    out_dims[pos] = size;
                    setter[pos] = i;
                } else {
                    return Err(TensorError::BroadcastIncompatible {
                        lhs: (*shapes[setter[pos]]).clone(),
                        rhs: (*shape).clone(),
                        dim: pos,
                    });
                }
            }
        }

        let out_strides = row_major_strides(&out_dims);

        let inputs = shapes
            .iter()
            .map(|shape| {
                let pad = rank - shape.rank();
                let own = shape.strides();
                let mut strides = vec![0usize; rank];
                let mut replay = vec![false; rank];
                for (d, &size) in shape.dims().iter().enumerate() {
                    let pos = pad + d;
                    if size == 1 && out_dims[pos] > 1 {
                        replay[pos] = true; // stride stays 0
                    } else {
                        strides[pos] = own[d];
                    }
                }
                // Left-padded positions replay whenever the output extent
                // there is larger than 1.
                for pos in 0..pad {
                    replay[pos] = out_dims[pos] > 1;
                }
                let identity = pad == 0 && shape.dims() == out_dims.as_slice();
                BcastInput {
                    strides,
                    replay,
                    identity,
                }
            })
            .collect();

        Ok(Self {
            out_dims,
            out_strides,
            inputs,
        })
    }

    /// Returns the combined output shape.
    pub fn out_shape(&self) -> Shape {
        Shape::new(self.out_dims.clone())
    }

    /// Returns the output dimensions.
    pub fn out_dims(&self) -> &[usize] {
        &self.out_dims
    }

    /// Returns the number of elements in the output shape.
    pub fn num_out_elements(&self) -> usize {
        self.out_dims.iter().product()
    }

    /// Returns the number of input shapes in the plan.
    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Returns `true` if `input` already has the output shape, i.e. its
    /// linear indices coincide with output linear indices (fast path).
    pub fn is_identity(&self, input: usize) -> bool {
        self.inputs[input].identity
    }

    /// Per-dimension replay flags for `input`: `true` where the input
    /// contributes a size-1 dimension that must be replayed (stride 0)
    /// across a larger output extent.
    pub fn replay_flags(&self, input: usize) -> &[bool] {
        &self.inputs[input].replay
    }

    /// Maps an output linear index to the linear index inside `input`.
    ///
    /// Iterative over the rank, so arbitrarily deep shapes cannot overflow
    /// the stack. Only meaningful for `lin < num_out_elements()`.
    pub fn src_index(&self, input: usize, lin: usize) -> usize {
        let strides = &self.inputs[input].strides;
        let mut rem = lin;
        let mut src = 0usize;
        for (d, &out_stride) in self.out_strides.iter().enumerate() {
            let coord = rem / out_stride;
            rem %= out_stride;
            src += coord * strides[d];
        }
        src
    }
}

fn row_major_strides(dims: &[usize]) -> Vec<usize> {
    let rank = dims.len();
    let mut strides = vec![1usize; rank];
    for i in (0..rank.saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * dims[i + 1].max(1);
    }
    strides
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bcast(a: &[usize], b: &[usize]) -> Result<BcastSpec, TensorError> {
        BcastSpec::compute(&[&Shape::from(a), &Shape::from(b)])
    }

    #[test]
    fn test_basic_pair() {
        let spec = bcast(&[2, 1], &[1, 3]).unwrap();
        assert_eq!(spec.out_shape(), Shape::new(vec![2, 3]));
        assert_eq!(spec.replay_flags(0), &[false, true]);
        assert_eq!(spec.replay_flags(1), &[true, false]);
    }

    #[test]
    fn test_scalar_broadcasts_into_any_rank() {
        let spec = bcast(&[2, 1, 1, 1], &[1]).unwrap();
        assert_eq!(spec.out_shape(), Shape::new(vec![2, 1, 1, 1]));

        let spec = BcastSpec::compute(&[&Shape::scalar(), &Shape::new(vec![4, 5])]).unwrap();
        assert_eq!(spec.out_shape(), Shape::new(vec![4, 5]));
        assert_eq!(spec.src_index(0, 17), 0);
        assert_eq!(spec.src_index(1, 17), 17);
    }

    #[test]
    fn test_equal_shapes_are_identity() {
        let spec = bcast(&[3, 4], &[3, 4]).unwrap();
        assert!(spec.is_identity(0));
        assert!(spec.is_identity(1));
    }

    #[test]
    fn test_rank_padded_identity_mapping() {
        // [5] against [2, 5]: input 0 is not identity (rank padded) but
        // its stride mapping must still replay across the leading dim.
        let spec = bcast(&[5], &[2, 5]).unwrap();
        assert!(!spec.is_identity(0));
        assert!(spec.is_identity(1));
        assert_eq!(spec.src_index(0, 7), 2); // element (1, 2) -> 2
        assert_eq!(spec.src_index(1, 7), 7);
    }

    #[test]
    fn test_src_index_mapping() {
        let spec = bcast(&[2, 1], &[1, 3]).unwrap();
        // Output (r, c) reads input0[r] and input1[c].
        for r in 0..2 {
            for c in 0..3 {
                let lin = r * 3 + c;
                assert_eq!(spec.src_index(0, lin), r);
                assert_eq!(spec.src_index(1, lin), c);
            }
        }
    }

    #[test]
    fn test_incompatible() {
        let err = bcast(&[2, 3], &[4, 3]).unwrap_err();
        match err {
            TensorError::BroadcastIncompatible { dim, .. } => assert_eq!(dim, 0),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_zero_dim_against_one() {
        let spec = bcast(&[0], &[1]).unwrap();
        assert_eq!(spec.out_shape(), Shape::new(vec![0]));
        assert_eq!(spec.num_out_elements(), 0);

        let spec = bcast(&[2, 0], &[2, 1]).unwrap();
        assert_eq!(spec.out_shape(), Shape::new(vec![2, 0]));
    }

    #[test]
    fn test_zero_dim_against_larger_is_error() {
        assert!(bcast(&[0], &[3]).is_err());
        assert!(bcast(&[2, 0], &[2, 3]).is_err());
    }

    #[test]
    fn test_three_inputs() {
        let a = Shape::new(vec![2, 1, 1]);
        let b = Shape::new(vec![1, 3, 1]);
        let c = Shape::new(vec![1, 1, 4]);
        let spec = BcastSpec::compute(&[&a, &b, &c]).unwrap();
        assert_eq!(spec.out_shape(), Shape::new(vec![2, 3, 4]));
        assert_eq!(spec.num_inputs(), 3);
    }

    #[test]
    fn test_deep_rank_does_not_overflow() {
        // 32 dimensions; the index mapping is iterative, so this must work
        // for any rank the host throws at us.
        let deep: Vec<usize> = std::iter::repeat(1).take(31).chain([6]).collect();
        let spec = bcast(&deep, &[6]).unwrap();
        assert_eq!(spec.out_shape().rank(), 32);
        assert_eq!(spec.num_out_elements(), 6);
        assert_eq!(spec.src_index(0, 5), 5);
        assert_eq!(spec.src_index(1, 5), 5);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// For shapes built by masking an output shape with 1s, the
            /// computed broadcast shape equals the original output shape.
            #[test]
            fn masked_shapes_recover_output(
                dims in proptest::collection::vec(1usize..5, 0..6),
                mask_a in proptest::collection::vec(any::<bool>(), 6),
                mask_b in proptest::collection::vec(any::<bool>(), 6),
            ) {
                let a: Vec<usize> = dims.iter().zip(&mask_a)
                    .map(|(&d, &m)| if m { 1 } else { d }).collect();
                let b: Vec<usize> = dims.iter().zip(&mask_b)
                    .map(|(&d, &m)| if m { d } else { 1 }).collect();
                // Wherever both masks hide the size, the output legitimately
                // stays 1; build the expected shape accordingly.
                let expected: Vec<usize> = a.iter().zip(&b)
                    .map(|(&x, &y)| x.max(y)).collect();
                let spec = BcastSpec::compute(&[&Shape::new(a), &Shape::new(b)]).unwrap();
                prop_assert_eq!(spec.out_shape(), Shape::new(expected));
            }

            /// Two sizes > 1 that differ at an aligned position are always
            /// rejected.
            #[test]
            fn conflicting_sizes_rejected(
                prefix in proptest::collection::vec(1usize..4, 0..4),
                x in 2usize..10,
                delta in 1usize..5,
            ) {
                let mut a = prefix.clone();
                a.push(x);
                let mut b = prefix;
                b.push(x + delta);
                prop_assert!(BcastSpec::compute(&[&Shape::new(a), &Shape::new(b)]).is_err());
            }

            /// src_index never exceeds the input's element count for valid
            /// output indices.
            #[test]
            fn src_index_in_bounds(
                dims in proptest::collection::vec(1usize..4, 1..5),
                mask in proptest::collection::vec(any::<bool>(), 5),
            ) {
                let a: Vec<usize> = dims.iter().zip(&mask)
                    .map(|(&d, &m)| if m { 1 } else { d }).collect();
                let sa = Shape::new(a);
                let sb = Shape::new(dims);
                let spec = BcastSpec::compute(&[&sa, &sb]).unwrap();
                let n_a = sa.num_elements();
                for lin in 0..spec.num_out_elements() {
                    prop_assert!(spec.src_index(0, lin) < n_a);
                }
            }
        }
    }
}
