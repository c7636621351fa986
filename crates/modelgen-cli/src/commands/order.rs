//! `modelgen order`: entities of a module, supertypes first.

use modelgen_core::prelude::ResolveService;

use crate::{
    cli::ModuleArgs, config::AppConfig, error::CliResult, output::OutputManager,
};

pub fn execute(args: ModuleArgs, config: &AppConfig, output: OutputManager) -> CliResult<()> {
    let module = super::module_name(&args, config, "order")?;
    let (_, model) = super::load_model(&args.source.model)?;
    let order = ResolveService::new(model).dependency_order(&module)?;

    if output.is_json() {
        output.json(&order)?;
        return Ok(());
    }

    output.header(&format!("Dependency order of {module}"))?;
    for (position, name) in order.iter().enumerate() {
        output.print(&format!("  {:>3}. {name}", position + 1))?;
    }
    Ok(())
}
