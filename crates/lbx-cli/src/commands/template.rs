use std::error::Error;

use clap::{Args, ValueEnum};
use lbx_core::ParameterTable;
use lbx_quark::{registry, required_keys};

use super::canonical_json_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TemplateFormat {
    Yaml,
    Json,
}

#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Process identifier, e.g. "Lambdab->Lambda(1520)".
    #[arg(long)]
    pub process: String,
    /// Output encoding.
    #[arg(long, value_enum, default_value_t = TemplateFormat::Yaml)]
    pub format: TemplateFormat,
}

/// Skeleton table: uncertainty scales at their nominal 1.0, everything else 0.0.
pub fn skeleton(process: &str) -> Result<ParameterTable, Box<dyn Error>> {
    let info = registry::global().lookup(process)?;
    Ok(required_keys(info)
        .into_iter()
        .map(|key| {
            let value = if key.ends_with(" uncertainty") { 1.0 } else { 0.0 };
            (key, value)
        })
        .collect())
}

pub fn run(args: &TemplateArgs) -> Result<(), Box<dyn Error>> {
    let table = skeleton(&args.process)?;
    match args.format {
        TemplateFormat::Yaml => print!("{}", table.to_yaml_string()?),
        TemplateFormat::Json => println!("{}", canonical_json_string(&table)?),
    }
    Ok(())
}
