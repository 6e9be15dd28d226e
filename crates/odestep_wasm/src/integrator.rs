//! Fixed-step integrator exposed to JavaScript.

use crate::field::{JsField, JsScalarField};
use anyhow::{anyhow, bail, Context, Result};
use js_sys::Function;
use odestep_core::settings::{simulate, simulate_scalar, IntegrationSettings};
use odestep_core::stepper::WriteMode;
use odestep_core::traits::VectorField;
use odestep_core::Scheme;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Snapshot of an integrator's configuration, handed to JS by `describe`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IntegratorSummary {
    scheme: Scheme,
    order: u32,
    stages: usize,
    dimension: usize,
    step_size: f64,
    steps: usize,
    duration: f64,
    write_mode: WriteMode,
}

pub(crate) fn parse_write_mode(name: Option<&str>) -> Result<WriteMode> {
    match name.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("overwrite") => Ok(WriteMode::Overwrite),
        Some("accumulate") => Ok(WriteMode::Accumulate),
        Some(other) => bail!("Unknown write mode \"{other}\" (expected overwrite or accumulate)."),
    }
}

pub(crate) fn build_settings(
    scheme_name: &str,
    dimension: usize,
    step_size: f64,
    steps: usize,
    write_mode: Option<&str>,
) -> Result<IntegrationSettings> {
    let scheme: Scheme = scheme_name.parse()?;
    if dimension == 0 {
        bail!("Dimension must be greater than zero.");
    }
    if u32::try_from(dimension).is_err() {
        bail!("Dimension {dimension} exceeds the maximum of {}.", u32::MAX);
    }
    let settings = IntegrationSettings {
        scheme,
        step_size,
        steps,
        write_mode: parse_write_mode(write_mode)?,
    };
    settings.validate().context("Invalid integration settings")?;
    Ok(settings)
}

pub(crate) fn run_field(
    settings: &IntegrationSettings,
    field: &impl VectorField<f64>,
    initial_state: &[f64],
) -> Result<Vec<f64>> {
    simulate(settings, field, initial_state)
        .with_context(|| format!("{} integration failed", settings.scheme))
}

fn to_js(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{err:#}"))
}

#[wasm_bindgen]
pub struct WasmIntegrator {
    settings: IntegrationSettings,
    dimension: usize,
}

#[wasm_bindgen]
impl WasmIntegrator {
    #[wasm_bindgen(constructor)]
    pub fn new(
        scheme_name: &str,
        dimension: usize,
        step_size: f64,
        steps: usize,
        write_mode: Option<String>,
    ) -> Result<WasmIntegrator, JsValue> {
        console_error_panic_hook::set_once();

        let settings = build_settings(scheme_name, dimension, step_size, steps, write_mode.as_deref())
            .map_err(to_js)?;
        Ok(WasmIntegrator {
            settings,
            dimension,
        })
    }

    pub fn scheme(&self) -> String {
        self.settings.scheme.name().to_string()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn steps(&self) -> usize {
        self.settings.steps
    }

    /// Integrates `field(x) -> dx/dt` from `initial_state` and returns the
    /// flattened time-major trajectory (`steps * dimension` values).
    pub fn run(&self, field: &Function, initial_state: &[f64]) -> Result<Vec<f64>, JsValue> {
        let js_field = JsField::new(field.clone(), self.dimension).map_err(to_js)?;
        let trajectory = run_field(&self.settings, &js_field, initial_state).map_err(to_js)?;
        if let Some(message) = js_field.take_failure() {
            return Err(JsValue::from_str(&message));
        }
        Ok(trajectory)
    }

    /// Scalar fast path for one-dimensional integrators: `field(x) -> number`.
    pub fn run_scalar(&self, field: &Function, initial_value: f64) -> Result<Vec<f64>, JsValue> {
        if self.dimension != 1 {
            return Err(to_js(anyhow!(
                "run_scalar requires dimension 1, integrator has dimension {}.",
                self.dimension
            )));
        }
        let js_field = JsScalarField::new(field.clone());
        let trajectory = simulate_scalar(&self.settings, &js_field, initial_value)
            .map_err(|err| to_js(err.into()))?;
        if let Some(message) = js_field.take_failure() {
            return Err(JsValue::from_str(&message));
        }
        Ok(trajectory)
    }

    pub fn describe(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.summary())
            .map_err(|err| JsValue::from_str(&format!("Failed to serialize summary: {err}")))
    }
}

impl WasmIntegrator {
    pub(crate) fn summary(&self) -> IntegratorSummary {
        IntegratorSummary {
            scheme: self.settings.scheme,
            order: self.settings.scheme.order(),
            stages: self.settings.scheme.stages(),
            dimension: self.dimension,
            step_size: self.settings.step_size,
            steps: self.settings.steps,
            duration: self.settings.duration(),
            write_mode: self.settings.write_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Spring;

    impl VectorField<f64> for Spring {
        fn dimension(&self) -> usize {
            2
        }

        fn apply(&self, x: &[f64], out: &mut [f64]) {
            out[0] = x[1];
            out[1] = -x[0];
        }
    }

    fn assert_err_contains<T: std::fmt::Debug>(result: Result<T>, needle: &str) {
        let err = result.expect_err("expected error");
        let message = format!("{err:#}");
        assert!(
            message.contains(needle),
            "expected error to contain \"{needle}\", got \"{message}\""
        );
    }

    #[test]
    fn build_settings_accepts_any_case_scheme() {
        let settings = build_settings("rk4", 2, 0.01, 10, None).expect("settings");
        assert_eq!(settings.scheme, Scheme::Rk4);
        assert_eq!(settings.write_mode, WriteMode::Overwrite);

        let settings = build_settings("EULER", 2, 0.01, 10, Some("Accumulate")).expect("settings");
        assert_eq!(settings.scheme, Scheme::Euler);
        assert_eq!(settings.write_mode, WriteMode::Accumulate);
    }

    #[test]
    fn build_settings_rejects_invalid_input() {
        assert_err_contains(build_settings("rk45", 2, 0.01, 10, None), "Unknown ODE scheme");
        assert_err_contains(build_settings("heun", 0, 0.01, 10, None), "Dimension");
        assert_err_contains(build_settings("heun", 2, 0.01, 0, None), "at least 1");
        assert_err_contains(build_settings("heun", 2, f64::NAN, 10, None), "Step size");
        assert_err_contains(build_settings("heun", 2, 0.01, 10, Some("sum")), "write mode");
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn build_settings_rejects_dimension_beyond_u32() {
        let dimension = u32::MAX as usize + 1;
        assert_err_contains(build_settings("heun", dimension, 0.01, 10, None), "exceeds the maximum");
        build_settings("heun", u32::MAX as usize, 0.01, 10, None).expect("largest dimension");
    }

    #[test]
    fn run_field_integrates_rust_field() {
        let settings = build_settings("rk4", 2, 0.01, 101, None).expect("settings");
        let data = run_field(&settings, &Spring, &[1.0, 0.0]).expect("trajectory");
        assert_eq!(data.len(), 202);
        let last = &data[200..];
        assert!((last[0] - 1.0_f64.cos()).abs() < 1e-9);
        assert!((last[1] + 1.0_f64.sin()).abs() < 1e-9);
    }

    #[test]
    fn run_field_reports_scheme_on_failure() {
        let settings = build_settings("heun", 2, 0.01, 5, None).expect("settings");
        assert_err_contains(
            run_field(&settings, &Spring, &[1.0]),
            "Heun integration failed",
        );
    }

    #[test]
    fn integrator_summary_reflects_settings() {
        let integrator = WasmIntegrator {
            settings: build_settings("heun", 3, 0.5, 5, None).expect("settings"),
            dimension: 3,
        };
        let summary = integrator.summary();
        assert_eq!(summary.order, 2);
        assert_eq!(summary.stages, 2);
        assert_eq!(summary.duration, 2.0);
        assert_eq!(integrator.scheme(), "Heun");
    }
}
