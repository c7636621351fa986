//! `modelgen relations`: the relation map of one module.

use modelgen_core::prelude::ResolveService;

use crate::{
    cli::ModuleArgs, config::AppConfig, error::CliResult, output::OutputManager,
};

pub fn execute(args: ModuleArgs, config: &AppConfig, output: OutputManager) -> CliResult<()> {
    let module = super::module_name(&args, config, "relations")?;
    let (_, model) = super::load_model(&args.source.model)?;
    let table = ResolveService::new(model).relation_table(&module)?;

    if output.is_json() {
        output.json(&table)?;
        return Ok(());
    }

    output.header(&format!("Relations of {module}"))?;
    for entry in &table {
        output.print(&format!("  {}", entry.entity))?;
        if entry.relations.is_empty() {
            output.print(&format!("    {}", output.dim("(none)")))?;
        }
        for relation in &entry.relations {
            let side = if relation.owner { "owner" } else { "inverse" };
            output.print(&format!(
                "    {:<10} {:<32} {}",
                relation.cardinality.as_str(),
                relation.target,
                output.dim(side)
            ))?;
        }
    }
    Ok(())
}
