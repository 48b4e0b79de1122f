// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Typed operator attributes.
//!
//! Each operator declares a fixed schema of named, typed attributes
//! (`"axis"`: int, `"paddings"`: int list, ...). The typed getters live on
//! [`crate::KernelContext`] so their diagnostics can name the operator; a
//! missing required attribute is a validation failure there, never a
//! silently substituted default.

use tensor_core::{Shape, Tensor};

/// A single attribute value: a scalar or list of int/float/bool/string,
/// or a shape or tensor constant.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Int(i64),
    IntList(Vec<i64>),
    Float(f32),
    FloatList(Vec<f32>),
    Bool(bool),
    BoolList(Vec<bool>),
    Str(String),
    StrList(Vec<String>),
    Shape(Shape),
    Tensor(Tensor),
}

impl AttrValue {
    /// Returns the attribute's type name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Int(_) => "int",
            AttrValue::IntList(_) => "int list",
            AttrValue::Float(_) => "float",
            AttrValue::FloatList(_) => "float list",
            AttrValue::Bool(_) => "bool",
            AttrValue::BoolList(_) => "bool list",
            AttrValue::Str(_) => "string",
            AttrValue::StrList(_) => "string list",
            AttrValue::Shape(_) => "shape",
            AttrValue::Tensor(_) => "tensor",
        }
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<Vec<i64>> for AttrValue {
    fn from(v: Vec<i64>) -> Self {
        AttrValue::IntList(v)
    }
}

impl From<f32> for AttrValue {
    fn from(v: f32) -> Self {
        AttrValue::Float(v)
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Str(v.to_string())
    }
}

impl From<Shape> for AttrValue {
    fn from(v: Shape) -> Self {
        AttrValue::Shape(v)
    }
}

impl From<Tensor> for AttrValue {
    fn from(v: Tensor) -> Self {
        AttrValue::Tensor(v)
    }
}
