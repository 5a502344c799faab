use clap::Parser;

/// Command line for the `delve` binary.
///
/// Inputs are collected loosely so that missing or extra values can be
/// reported through the JSON usage envelope instead of clap's own errors.
/// There are no help or version flags: `--help` and `-V` are ordinary
/// inputs, so every invocation still ends in one JSON document.
#[derive(Debug, Parser)]
#[command(
    name = "delve",
    about = "Run one research request and print the finding as JSON",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Research instructions, then depth (quick, moderate, deep).
    #[arg(
        value_name = "INPUT",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub inputs: Vec<String>,
}
