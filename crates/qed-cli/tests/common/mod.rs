#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

pub fn qed(args: &[&str]) -> std::io::Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_qed"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn path_arg(path: &Path) -> String {
    path.display().to_string()
}
