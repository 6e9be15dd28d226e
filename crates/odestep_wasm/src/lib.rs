use odestep_core::Scheme;
use wasm_bindgen::prelude::*;

mod field;
mod integrator;

pub use integrator::WasmIntegrator;

/// Canonical names accepted by `WasmIntegrator`, in index order.
#[wasm_bindgen]
pub fn scheme_names() -> Vec<String> {
    Scheme::ALL.iter().map(|s| s.name().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::scheme_names;

    #[test]
    fn scheme_names_are_canonical() {
        assert_eq!(scheme_names(), vec!["Euler", "Heun", "RK4"]);
    }
}
