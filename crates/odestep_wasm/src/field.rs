//! JavaScript callbacks adapted to the core field traits.

use anyhow::{Context, Result};
use js_sys::{Array, Float64Array, Function};
use odestep_core::traits::{ScalarField, VectorField};
use std::cell::RefCell;
use wasm_bindgen::{JsCast, JsValue};

fn describe_js_error(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{err:?}"))
}

/// Wraps `f(x: Float64Array) -> ArrayLike<number>` as a [`VectorField`].
///
/// A field cannot fail mid-step, so the first JS exception or malformed
/// result is recorded and every later evaluation yields NaN. Callers check
/// [`JsField::take_failure`] once integration returns.
pub(crate) struct JsField {
    func: Function,
    dimension: usize,
    input: Float64Array,
    failure: RefCell<Option<String>>,
}

impl JsField {
    pub(crate) fn new(func: Function, dimension: usize) -> Result<Self> {
        let length = u32::try_from(dimension)
            .with_context(|| format!("Dimension {dimension} does not fit a Float64Array."))?;
        Ok(Self {
            func,
            dimension,
            input: Float64Array::new_with_length(length),
            failure: RefCell::new(None),
        })
    }

    pub(crate) fn take_failure(&self) -> Option<String> {
        self.failure.borrow_mut().take()
    }

    fn fail(&self, message: String, out: &mut [f64]) {
        let mut failure = self.failure.borrow_mut();
        if failure.is_none() {
            *failure = Some(message);
        }
        out.fill(f64::NAN);
    }
}

impl VectorField<f64> for JsField {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn apply(&self, x: &[f64], out: &mut [f64]) {
        if self.failure.borrow().is_some() {
            out.fill(f64::NAN);
            return;
        }
        self.input.copy_from(x);
        match self.func.call1(&JsValue::NULL, &self.input) {
            Ok(value) => {
                if !value.is_instance_of::<Float64Array>() && !Array::is_array(&value) {
                    self.fail("Vector field must return an array of numbers.".to_string(), out);
                    return;
                }
                let result = Float64Array::new(&value);
                if result.length() as usize != out.len() {
                    self.fail(
                        format!(
                            "Vector field returned {} values, expected {}.",
                            result.length(),
                            out.len()
                        ),
                        out,
                    );
                    return;
                }
                result.copy_to(out);
            }
            Err(err) => self.fail(format!("Vector field threw: {}", describe_js_error(&err)), out),
        }
    }
}

/// Wraps `f(x: number) -> number` as a [`ScalarField`].
pub(crate) struct JsScalarField {
    func: Function,
    failure: RefCell<Option<String>>,
}

impl JsScalarField {
    pub(crate) fn new(func: Function) -> Self {
        Self {
            func,
            failure: RefCell::new(None),
        }
    }

    pub(crate) fn take_failure(&self) -> Option<String> {
        self.failure.borrow_mut().take()
    }
}

impl ScalarField<f64> for JsScalarField {
    fn apply(&self, x: f64) -> f64 {
        if self.failure.borrow().is_some() {
            return f64::NAN;
        }
        let outcome = self
            .func
            .call1(&JsValue::NULL, &JsValue::from_f64(x))
            .map_err(|err| format!("Scalar field threw: {}", describe_js_error(&err)))
            .and_then(|value| {
                value
                    .as_f64()
                    .ok_or_else(|| "Scalar field must return a number.".to_string())
            });
        match outcome {
            Ok(value) => value,
            Err(message) => {
                *self.failure.borrow_mut() = Some(message);
                f64::NAN
            }
        }
    }
}
