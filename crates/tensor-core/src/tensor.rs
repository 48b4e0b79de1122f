// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Core tensor type.
//!
//! A [`Tensor`] pairs a [`Shape`] and a [`DType`] tag with a flat buffer
//! that the host runtime allocates before a kernel runs. Kernels only
//! read input tensors and write into pre-sized output tensors; no tensor
//! method allocates or frees backing memory on the compute path, and no
//! kernel ever resizes a tensor.

use crate::{DType, Element, Shape, TensorError};

/// An n-dimensional tensor stored in contiguous row-major memory.
///
/// The backing store is a `Vec<u64>` of 8-byte words rather than raw
/// bytes, so every supported element type (largest alignment: 8) can be
/// reinterpreted safely. Typed access goes through
/// [`as_slice`](Tensor::as_slice) / [`as_slice_mut`](Tensor::as_slice_mut),
/// which verify the element type tag instead of trusting the caller.
#[derive(Debug, Clone)]
pub struct Tensor {
    shape: Shape,
    dtype: DType,
    buf: Vec<u64>,
    len_bytes: usize,
}

impl Tensor {
    /// Creates a tensor filled with zeros.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::{DType, Shape, Tensor};
    /// let t = Tensor::zeros(Shape::matrix(2, 3), DType::F32);
    /// assert_eq!(t.size_bytes(), 24);
    /// ```
    pub fn zeros(shape: Shape, dtype: DType) -> Self {
        let len_bytes = shape.size_bytes(dtype);
        Self {
            buf: vec![0u64; len_bytes.div_ceil(8)],
            shape,
            dtype,
            len_bytes,
        }
    }

    /// Creates a tensor from a slice of typed values; the dtype tag is
    /// derived from `T`.
    ///
    /// # Errors
    /// Returns [`TensorError::BufferSizeMismatch`] if `values.len()` does
    /// not equal `shape.num_elements()`.
    ///
    /// # Examples
    /// ```
    /// use tensor_core::{Shape, Tensor};
    /// let t = Tensor::from_slice(Shape::vector(3), &[1.0f32, 2.0, 3.0]).unwrap();
    /// assert_eq!(t.as_slice::<f32>().unwrap(), &[1.0, 2.0, 3.0]);
    /// ```
    pub fn from_slice<T: Element>(shape: Shape, values: &[T]) -> Result<Self, TensorError> {
        if values.len() != shape.num_elements() {
            return Err(TensorError::BufferSizeMismatch {
                expected: shape.size_bytes(T::DTYPE),
                actual: values.len() * std::mem::size_of::<T>(),
            });
        }
        let mut t = Self::zeros(shape, T::DTYPE);
        t.as_slice_mut::<T>()?.copy_from_slice(values);
        Ok(t)
    }

    /// Creates a scalar (rank-0) tensor holding one value.
    pub fn from_scalar<T: Element>(value: T) -> Self {
        // from_slice cannot fail for a scalar shape with one value.
        Self::from_slice(Shape::scalar(), &[value]).unwrap_or_else(|_| unreachable!())
    }

    /// Returns the tensor's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the tensor's element type tag.
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Returns the number of elements.
    pub fn num_elements(&self) -> usize {
        self.shape.num_elements()
    }

    /// Returns the buffer length in bytes (`num_elements × element width`).
    pub fn size_bytes(&self) -> usize {
        self.len_bytes
    }

    /// Returns the raw bytes backing this tensor.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: the buffer holds at least len_bytes initialised bytes and
        // u8 has no alignment requirement.
        unsafe { std::slice::from_raw_parts(self.buf.as_ptr().cast::<u8>(), self.len_bytes) }
    }

    /// Returns the raw bytes backing this tensor, mutably.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        // SAFETY: as for as_bytes; the exclusive borrow of self covers the buffer.
        unsafe {
            std::slice::from_raw_parts_mut(self.buf.as_mut_ptr().cast::<u8>(), self.len_bytes)
        }
    }

    /// Interprets the buffer as a slice of `T`.
    ///
    /// # Errors
    /// Returns [`TensorError::DTypeMismatch`] if `T`'s tag differs from
    /// this tensor's dtype.
    pub fn as_slice<T: Element>(&self) -> Result<&[T], TensorError> {
        self.check_access::<T>()?;
        // SAFETY: dtype was checked, the word buffer is aligned for every
        // supported element type, and it holds num_elements values of T.
        Ok(unsafe {
            std::slice::from_raw_parts(self.buf.as_ptr().cast::<T>(), self.shape.num_elements())
        })
    }

    /// Interprets the buffer as a mutable slice of `T`.
    ///
    /// # Errors
    /// Returns [`TensorError::DTypeMismatch`] if `T`'s tag differs from
    /// this tensor's dtype.
    pub fn as_slice_mut<T: Element>(&mut self) -> Result<&mut [T], TensorError> {
        self.check_access::<T>()?;
        // SAFETY: as for as_slice, with exclusive access through &mut self.
        Ok(unsafe {
            std::slice::from_raw_parts_mut(
                self.buf.as_mut_ptr().cast::<T>(),
                self.shape.num_elements(),
            )
        })
    }

    fn check_access<T: Element>(&self) -> Result<(), TensorError> {
        if T::DTYPE != self.dtype {
            return Err(TensorError::DTypeMismatch {
                held: self.dtype,
                requested: T::DTYPE,
            });
        }
        Ok(())
    }
}

/// Equality compares shape, dtype, and the exact byte content, which is
/// what identity-style round-trip tests need.
impl PartialEq for Tensor {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape
            && self.dtype == other.dtype
            && self.as_bytes() == other.as_bytes()
    }
}
