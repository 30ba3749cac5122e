//! Params-grid expansion

use crate::config::{ParamValue, ParamsGrid};

/// One concrete parameter assignment, in grid declaration order.
pub type Assignment = Vec<(String, ParamValue)>;

/// Expand a grid to the full cartesian product of configurations.
///
/// Deterministic: parameters appear in declaration order and the last
/// parameter varies fastest, so trial numbering is stable across runs.
pub fn expand(grid: &ParamsGrid) -> Vec<Assignment> {
    let specs: Vec<(&str, &[ParamValue])> = grid
        .params
        .iter()
        .map(|spec| (spec.name.as_str(), spec.values.as_slice()))
        .collect();
    cartesian_product(&specs)
}

fn cartesian_product(specs: &[(&str, &[ParamValue])]) -> Vec<Assignment> {
    let Some(((name, values), rest)) = specs.split_first() else {
        return vec![Vec::new()];
    };

    let rest_configs = cartesian_product(rest);
    values
        .iter()
        .flat_map(|value| {
            rest_configs.iter().map(move |config| {
                let mut assignment = Vec::with_capacity(config.len() + 1);
                assignment.push((name.to_string(), value.clone()));
                assignment.extend(config.iter().cloned());
                assignment
            })
        })
        .collect()
}
