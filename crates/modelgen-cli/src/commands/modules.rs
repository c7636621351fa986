//! `modelgen modules`: list the modules of a model.

use crate::{cli::ModelArgs, error::CliResult, output::OutputManager};

pub fn execute(args: ModelArgs, output: OutputManager) -> CliResult<()> {
    let (service, model) = super::load_model(&args.model)?;
    let modules = service.modules(&model);

    if output.is_json() {
        output.json(&modules)?;
        return Ok(());
    }

    if modules.is_empty() {
        output.info("Model declares no modules")?;
        return Ok(());
    }

    output.header(&format!("{} module(s)", modules.len()))?;
    for module in &modules {
        let mut line = format!(
            "  {:<24} {} entities, {} enums",
            module.name, module.entities, module.enums
        );
        if let Some(comment) = &module.comment {
            line.push_str(&format!("  {}", output.dim(comment)));
        }
        output.print(&line)?;
    }
    Ok(())
}
