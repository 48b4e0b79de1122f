// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Supported tensor element data types and the bridge to concrete Rust types.

use std::fmt;

use num_complex::Complex;

/// Enumerates the element types a [`crate::Tensor`] can hold.
///
/// Every tensor carries a `DType` tag; operator kernels use it to select
/// exactly one compile-time-typed compute path at runtime. The set is
/// closed: a kernel that does not support a tag rejects it up front
/// instead of falling through to a different type's logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DType {
    /// 8-bit signed integer.
    I8,
    /// 16-bit signed integer.
    I16,
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit unsigned integer.
    U16,
    /// 32-bit unsigned integer.
    U32,
    /// 64-bit unsigned integer.
    U64,
    /// 16-bit IEEE 754 floating point.
    F16,
    /// 32-bit IEEE 754 floating point.
    F32,
    /// 64-bit IEEE 754 floating point.
    F64,
    /// Boolean.
    Bool,
    /// Complex number made of two f32 components.
    Complex64,
    /// Complex number made of two f64 components.
    Complex128,
}

impl DType {
    /// Returns the size of a single element in bytes.
    pub fn size_bytes(self) -> usize {
        match self {
            DType::I8 | DType::U8 | DType::Bool => 1,
            DType::I16 | DType::U16 | DType::F16 => 2,
            DType::I32 | DType::U32 | DType::F32 => 4,
            DType::I64 | DType::U64 | DType::F64 | DType::Complex64 => 8,
            DType::Complex128 => 16,
        }
    }

    /// Returns a human-readable label for this data type.
    pub fn as_str(self) -> &'static str {
        match self {
            DType::I8 => "i8",
            DType::I16 => "i16",
            DType::I32 => "i32",
            DType::I64 => "i64",
            DType::U8 => "u8",
            DType::U16 => "u16",
            DType::U32 => "u32",
            DType::U64 => "u64",
            DType::F16 => "f16",
            DType::F32 => "f32",
            DType::F64 => "f64",
            DType::Bool => "bool",
            DType::Complex64 => "complex64",
            DType::Complex128 => "complex128",
        }
    }

    /// Returns `true` for the floating-point tags (f16/f32/f64).
    pub fn is_float(self) -> bool {
        matches!(self, DType::F16 | DType::F32 | DType::F64)
    }

    /// Returns `true` for the signed/unsigned integer tags.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            DType::I8
                | DType::I16
                | DType::I32
                | DType::I64
                | DType::U8
                | DType::U16
                | DType::U32
                | DType::U64
        )
    }

    /// Returns `true` for the complex tags.
    pub fn is_complex(self) -> bool {
        matches!(self, DType::Complex64 | DType::Complex128)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bridges a concrete Rust element type to its runtime [`DType`] tag.
///
/// Implemented for every type in the closed `DType` set, so generic kernel
/// code can be instantiated once per supported tag:
///
/// ```
/// use tensor_core::{DType, Element};
/// fn tag_of<T: Element>() -> DType { T::DTYPE }
/// assert_eq!(tag_of::<f32>(), DType::F32);
/// ```
pub trait Element: Copy + Send + Sync + PartialEq + fmt::Debug + 'static {
    /// The corresponding runtime tag.
    const DTYPE: DType;

    /// Additive identity for this element type.
    fn zero() -> Self;
}

/// Extends [`Element`] with lossy conversions through `f64`, used by
/// value-converting kernels (Cast). Complex types are deliberately not
/// `RealElement`: a complex value has no single-float representation.
pub trait RealElement: Element {
    /// Converts this value to `f64`.
    fn to_f64(self) -> f64;

    /// Creates a value of this type from `f64`.
    fn from_f64(v: f64) -> Self;
}

macro_rules! impl_int_element {
    ($($ty:ty => $tag:ident),+ $(,)?) => {
        $(
            impl Element for $ty {
                const DTYPE: DType = DType::$tag;
                fn zero() -> Self { 0 }
            }
            impl RealElement for $ty {
                fn to_f64(self) -> f64 { self as f64 }
                fn from_f64(v: f64) -> Self { v as $ty }
            }
        )+
    };
}

impl_int_element! {
    i8 => I8, i16 => I16, i32 => I32, i64 => I64,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64,
}

impl Element for half::f16 {
    const DTYPE: DType = DType::F16;
    fn zero() -> Self {
        half::f16::ZERO
    }
}

impl RealElement for half::f16 {
    fn to_f64(self) -> f64 {
        f64::from(self.to_f32())
    }
    fn from_f64(v: f64) -> Self {
        half::f16::from_f64(v)
    }
}

impl Element for f32 {
    const DTYPE: DType = DType::F32;
    fn zero() -> Self {
        0.0
    }
}

impl RealElement for f32 {
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
    fn from_f64(v: f64) -> Self {
        v as f32
    }
}

impl Element for f64 {
    const DTYPE: DType = DType::F64;
    fn zero() -> Self {
        0.0
    }
}

impl RealElement for f64 {
    fn to_f64(self) -> f64 {
        self
    }
    fn from_f64(v: f64) -> Self {
        v
    }
}

impl Element for bool {
    const DTYPE: DType = DType::Bool;
    fn zero() -> Self {
        false
    }
}

impl RealElement for bool {
    fn to_f64(self) -> f64 {
        if self {
            1.0
        } else {
            0.0
        }
    }
    fn from_f64(v: f64) -> Self {
        v != 0.0
    }
}

impl Element for Complex<f32> {
    const DTYPE: DType = DType::Complex64;
    fn zero() -> Self {
        Complex::new(0.0, 0.0)
    }
}

impl Element for Complex<f64> {
    const DTYPE: DType = DType::Complex128;
    fn zero() -> Self {
        Complex::new(0.0, 0.0)
    }
}
