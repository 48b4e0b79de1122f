// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The per-invocation kernel context.
//!
//! The host runtime builds a [`KernelContext`] before invoking a kernel
//! and discards it afterwards: input tensor borrows, pre-allocated output
//! tensor borrows, the operator's typed attributes, and a handle to the
//! execution context's worker pool. Kernels never construct their own
//! context and never outlive it.

use std::collections::BTreeMap;

use compute_sched::SchedPool;
use tensor_core::Tensor;

use crate::{AttrValue, KernelError};

/// Everything a kernel invocation needs: inputs, outputs, attributes, and
/// the shared worker pool.
///
/// Inputs are immutable borrows (kernels must treat input memory as
/// read-only), outputs are exclusive borrows of tensors the host has
/// already sized — the borrow checker enforces both halves of the
/// contract.
#[derive(Debug)]
pub struct KernelContext<'a> {
    op_type: String,
    inputs: Vec<&'a Tensor>,
    outputs: Vec<&'a mut Tensor>,
    attrs: BTreeMap<String, AttrValue>,
    sched: &'a SchedPool,
}

impl<'a> KernelContext<'a> {
    /// Starts building a context for operator `op_type`.
    pub fn build(op_type: impl Into<String>) -> KernelContextBuilder<'a> {
        KernelContextBuilder {
            op_type: op_type.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            attrs: BTreeMap::new(),
        }
    }

    /// Returns the operation-type string used for registry lookup.
    pub fn op_type(&self) -> &str {
        &self.op_type
    }

    /// Returns the number of input tensors.
    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Returns the number of output tensors.
    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Returns input `i`.
    ///
    /// # Errors
    /// `ParamInvalid` if the input is absent.
    pub fn input(&self, i: usize) -> Result<&Tensor, KernelError> {
        self.inputs.get(i).copied().ok_or_else(|| {
            KernelError::param_invalid(&self.op_type, format!("missing input {i}"))
        })
    }

    /// Returns output `i` for shape/dtype inspection.
    ///
    /// # Errors
    /// `ParamInvalid` if the output is absent.
    pub fn output(&self, i: usize) -> Result<&Tensor, KernelError> {
        self.outputs.get(i).map(|t| &**t).ok_or_else(|| {
            KernelError::param_invalid(&self.op_type, format!("missing output {i}"))
        })
    }

    /// Splits the context into input borrows, output borrows, and the
    /// worker pool, so a kernel can read inputs while writing outputs.
    pub fn split(&mut self) -> (&[&'a Tensor], &mut [&'a mut Tensor], &'a SchedPool) {
        let Self {
            inputs,
            outputs,
            sched,
            ..
        } = self;
        (inputs.as_slice(), outputs.as_mut_slice(), sched)
    }

    /// Returns the shared worker pool.
    pub fn sched(&self) -> &'a SchedPool {
        self.sched
    }

    /// Returns the raw attribute value for `key`, if present.
    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    /// Returns the required int attribute `key`.
    ///
    /// # Errors
    /// `ParamInvalid` if the attribute is missing or not an int.
    pub fn attr_int(&self, key: &str) -> Result<i64, KernelError> {
        match self.attrs.get(key) {
            Some(AttrValue::Int(v)) => Ok(*v),
            Some(other) => Err(self.attr_type_error(key, "int", other)),
            None => Err(self.attr_missing(key)),
        }
    }

    /// Returns the optional int attribute `key`, falling back to the
    /// operator schema's declared default when absent.
    ///
    /// # Errors
    /// `ParamInvalid` if the attribute is present with the wrong type.
    pub fn attr_int_or(&self, key: &str, default: i64) -> Result<i64, KernelError> {
        match self.attrs.get(key) {
            Some(AttrValue::Int(v)) => Ok(*v),
            Some(other) => Err(self.attr_type_error(key, "int", other)),
            None => Ok(default),
        }
    }

    /// Returns the required int-list attribute `key`.
    ///
    /// # Errors
    /// `ParamInvalid` if the attribute is missing or not an int list.
    pub fn attr_int_list(&self, key: &str) -> Result<&[i64], KernelError> {
        match self.attrs.get(key) {
            Some(AttrValue::IntList(v)) => Ok(v),
            Some(other) => Err(self.attr_type_error(key, "int list", other)),
            None => Err(self.attr_missing(key)),
        }
    }

    /// Returns the required bool attribute `key`.
    ///
    /// # Errors
    /// `ParamInvalid` if the attribute is missing or not a bool.
    pub fn attr_bool(&self, key: &str) -> Result<bool, KernelError> {
        match self.attrs.get(key) {
            Some(AttrValue::Bool(v)) => Ok(*v),
            Some(other) => Err(self.attr_type_error(key, "bool", other)),
            None => Err(self.attr_missing(key)),
        }
    }

    fn attr_missing(&self, key: &str) -> KernelError {
        KernelError::param_invalid(&self.op_type, format!("missing required attribute '{key}'"))
    }

    fn attr_type_error(&self, key: &str, expected: &str, got: &AttrValue) -> KernelError {
        KernelError::param_invalid(
            &self.op_type,
            format!(
                "attribute '{key}' has type {}, expected {expected}",
                got.type_name()
            ),
        )
    }
}

/// Builder used by the host (and tests) to assemble a [`KernelContext`].
#[derive(Debug)]
pub struct KernelContextBuilder<'a> {
    op_type: String,
    inputs: Vec<&'a Tensor>,
    outputs: Vec<&'a mut Tensor>,
    attrs: BTreeMap<String, AttrValue>,
}

impl<'a> KernelContextBuilder<'a> {
    /// Appends an input tensor.
    pub fn input(mut self, tensor: &'a Tensor) -> Self {
        self.inputs.push(tensor);
        self
    }

    /// Appends a pre-allocated output tensor.
    pub fn output(mut self, tensor: &'a mut Tensor) -> Self {
        self.outputs.push(tensor);
        self
    }

    /// Sets attribute `key`.
    pub fn attr(mut self, key: &str, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(key.to_string(), value.into());
        self
    }

    /// Finishes the context against the execution context's worker pool.
    pub fn finish(self, sched: &'a SchedPool) -> KernelContext<'a> {
        KernelContext {
            op_type: self.op_type,
            inputs: self.inputs,
            outputs: self.outputs,
            attrs: self.attrs,
            sched,
        }
    }
}
