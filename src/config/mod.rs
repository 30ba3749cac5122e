//! Configuration: CLI arguments, pipeline manifests, params grids

mod cli;
mod manifest;
mod params;

pub use cli::{
    parse_args, Cli, Command, ExtractArgs, FetchProjectsArgs, FetchTextArgs, GridArgs, InfoArgs,
    LabelsArgs, OutputFormat, ReportArgs, RunArgs, StatusArgs, ValidateArgs,
};
pub use manifest::{
    load_manifest, load_validated_manifest, validate_manifest, Manifest, Stage,
};
pub use params::{
    load_params, load_validated_params, validate_params, ParamSpec, ParamValue, ParamsGrid,
};
