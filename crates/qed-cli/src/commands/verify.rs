use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use qed_core::provenance::RunProvenance;
use qed_engine::{Policy, VerificationReport, Verifier};

use crate::catalog::Catalog;
use crate::render::render_report;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// YAML catalog to verify instead of the built-in one.
    #[arg(long)]
    pub catalog: Option<PathBuf>,
    /// YAML policy overriding the defaults.
    #[arg(long)]
    pub policy: Option<PathBuf>,
    /// Print canonical JSON instead of the glyph report.
    #[arg(long)]
    pub json: bool,
    /// Directory receiving `report.json` and `report.txt`.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn load_policy(path: Option<&PathBuf>) -> Result<Policy, Box<dyn Error>> {
    match path {
        Some(path) => Ok(Policy::from_yaml_str(&fs::read_to_string(path)?)?),
        None => Ok(Policy::default()),
    }
}

pub fn run(args: &VerifyArgs) -> Result<(), Box<dyn Error>> {
    let policy = load_policy(args.policy.as_ref())?;
    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin()?,
    };
    let verifier = Verifier::from_policy(&policy);
    let theory = catalog.verify(&verifier, &policy)?;

    let provenance = RunProvenance::new(catalog.hash()?, policy.hash()?)
        .with_tool("qed-cli", env!("CARGO_PKG_VERSION"));
    let report = VerificationReport::from_theory(&theory, provenance)?;
    let text = render_report(&report);

    if let Some(out) = &args.out {
        fs::create_dir_all(out)?;
        fs::write(out.join("report.json"), report.to_pretty_json()?)?;
        fs::write(out.join("report.txt"), &text)?;
    }
    if args.json {
        println!("{}", String::from_utf8(report.to_bytes()?)?);
    } else {
        print!("{text}");
    }

    if report.all_proven() {
        Ok(())
    } else {
        let open = report.summary.total - report.summary.proven;
        Err(format!("{open} of {} obligations not proven", report.summary.total).into())
    }
}
