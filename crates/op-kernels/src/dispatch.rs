// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Runtime dtype → compile-time type dispatch.
//!
//! Each operator declares its supported tag set inline and the macro
//! expands to a single `match` over the sealed [`tensor_core::DType`]
//! enumeration: exactly one generic instantiation runs per call, and a
//! tag outside the declared set returns `ParamInvalid` without invoking
//! any typed path. No function-pointer tables, nothing rebuilt per call.

/// Dispatches `$dtype` to `$func::<T>(...)` for the declared tag set.
///
/// ```ignore
/// dispatch_dtype!(OP, dtype, run(ctx), {
///     F32 => f32, F64 => f64,
/// })
/// ```
///
/// The second form threads an already-fixed generic parameter through,
/// for two-level dispatch such as Cast's (source, destination) pair:
///
/// ```ignore
/// dispatch_dtype!(OP, dst_dtype, convert::<S>(ctx), { F32 => f32 })
/// ```
macro_rules! dispatch_dtype {
    // The argument list is captured as one parenthesized token tree so it
    // can be replayed inside the per-variant repetition.
    ($op:expr, $dtype:expr, $func:ident $args:tt, {
        $($variant:ident => $ty:ty),+ $(,)?
    }) => {
        match $dtype {
            $(::tensor_core::DType::$variant => $func::<$ty> $args,)+
            #[allow(unreachable_patterns)]
            other => Err(::kernel_api::KernelError::param_invalid(
                $op,
                format!("unsupported dtype {other}"),
            )),
        }
    };
    ($op:expr, $dtype:expr, $func:ident::<$fixed:ty> $args:tt, {
        $($variant:ident => $ty:ty),+ $(,)?
    }) => {
        match $dtype {
            $(::tensor_core::DType::$variant => $func::<$fixed, $ty> $args,)+
            #[allow(unreachable_patterns)]
            other => Err(::kernel_api::KernelError::param_invalid(
                $op,
                format!("unsupported dtype {other}"),
            )),
        }
    };
}

pub(crate) use dispatch_dtype;

#[cfg(test)]
mod tests {
    use kernel_api::{KernelError, KernelStatus};
    use tensor_core::{DType, Element};

    fn tag_of<T: Element>() -> Result<DType, KernelError> {
        Ok(T::DTYPE)
    }

    fn width_times<T: Element>(factor: usize) -> Result<usize, KernelError> {
        Ok(std::mem::size_of::<T>() * factor)
    }

    fn pair_of<S: Element, D: Element>() -> Result<(DType, DType), KernelError> {
        Ok((S::DTYPE, D::DTYPE))
    }

    #[test]
    fn test_exactly_one_typed_path_runs() {
        let picked = dispatch_dtype!("Test", DType::I16, tag_of(), {
            I8 => i8, I16 => i16, I32 => i32,
        })
        .unwrap();
        assert_eq!(picked, DType::I16);
    }

    #[test]
    fn test_arguments_thread_through() {
        let n = dispatch_dtype!("Test", DType::F64, width_times(3), {
            F32 => f32, F64 => f64,
        })
        .unwrap();
        assert_eq!(n, 24);
    }

    #[test]
    fn test_fixed_parameter_precedes_dispatched_one() {
        let pair = dispatch_dtype!("Test", DType::U8, pair_of::<f32>(), {
            I8 => i8, U8 => u8,
        })
        .unwrap();
        assert_eq!(pair, (DType::F32, DType::U8));
    }

    #[test]
    fn test_unsupported_tag_is_param_invalid() {
        let err = dispatch_dtype!("Test", DType::Bool, tag_of(), {
            F32 => f32, F64 => f64,
        })
        .unwrap_err();
        assert_eq!(err.status(), KernelStatus::ParamInvalid);
        assert!(err.to_string().contains("unsupported dtype bool"));
    }
}
