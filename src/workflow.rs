//! GitHub Actions boundary: action inputs, workflow commands, step outputs

use std::env;
use std::fs::OpenOptions;
use std::io::{self, Write};

const INPUT_PREFIX: &str = "GHA_PYX_INPUT_";

/// Look up an action input from the environment.
///
/// Input names are upper-cased with dashes mapped to underscores; an
/// empty value counts as unset.
pub fn get_input(name: &str) -> Option<String> {
    let var = format!(
        "{}{}",
        INPUT_PREFIX,
        name.to_uppercase().replace('-', "_")
    );
    env::var(var).ok().filter(|value| !value.is_empty())
}

pub fn debug(msg: &str) {
    println!("::debug::{msg}");
}

pub fn notice(msg: &str) {
    println!("::notice::{msg}");
}

pub fn error(msg: &str) {
    eprintln!("Error: {msg}");
    println!("::error::{msg}");
}

/// Ask the runner to redact a value from all further log output
pub fn add_mask(value: &str) {
    println!("::add-mask::{value}");
}

/// Append a key/value pair to the step's `GITHUB_OUTPUT` file
pub fn set_output(name: &str, value: &str) -> io::Result<()> {
    let path = env::var("GITHUB_OUTPUT").map_err(|_| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "GITHUB_OUTPUT environment variable is not set",
        )
    })?;

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{name}={value}")
}
