use std::error::Error;

use clap::Args;
use qed_core::serde::to_canonical_json_bytes;
use qed_core::SchemaVersion;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Emit JSON with the report schema and strategy list.
    #[arg(long)]
    pub long: bool,
}

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: String,
    schema: SchemaVersion,
    strategies: Vec<String>,
}

pub fn run(args: &VersionArgs) -> Result<(), Box<dyn Error>> {
    if !args.long {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let info = VersionInfo {
        version: env!("CARGO_PKG_VERSION").into(),
        schema: SchemaVersion::default(),
        strategies: qed_engine::ProofMethod::ALL
            .iter()
            .map(|method| method.as_str().to_string())
            .collect(),
    };
    let json = to_canonical_json_bytes(&info)?;
    println!("{}", String::from_utf8(json)?);
    Ok(())
}
