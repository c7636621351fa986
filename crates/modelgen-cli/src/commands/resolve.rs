//! `modelgen resolve`: entities with inherited attributes and relations.

use modelgen_core::prelude::{ResolveService, ResolvedEntity, ResolvedModule};
use tracing::info;

use crate::{
    cli::ResolveArgs, config::AppConfig, error::CliResult, output::OutputManager,
};

pub fn execute(args: ResolveArgs, config: &AppConfig, output: OutputManager) -> CliResult<()> {
    let (_, model) = super::load_model(&args.target.source.model)?;
    let include_abstract = config.resolve.include_abstract && !args.skip_abstract;
    let service = ResolveService::new(model).include_abstract(include_abstract);

    // no module at all means every module
    let module = args
        .target
        .module
        .clone()
        .or_else(|| config.resolve.default_module.clone());
    let modules = match module {
        Some(name) => vec![service.resolve_module(&name)?],
        None => service.resolve_all()?,
    };
    info!(modules = modules.len(), include_abstract, "Resolved");

    if output.is_json() {
        output.json(&modules)?;
        return Ok(());
    }

    for module in &modules {
        render_module(module, &output)?;
    }
    Ok(())
}

fn render_module(module: &ResolvedModule, output: &OutputManager) -> CliResult<()> {
    output.header(&format!("Module {}", module.name))?;
    for entity in &module.entities {
        render_entity(entity, output)?;
    }
    Ok(())
}

fn render_entity(entity: &ResolvedEntity, output: &OutputManager) -> CliResult<()> {
    let mut title = format!("  {}", entity.qualified_name);
    if entity.is_abstract {
        title.push_str(" (abstract)");
    }
    if let Some(parent) = &entity.supertype {
        title.push_str(&format!(" extends {parent}"));
    }
    output.print(&title)?;

    for attribute in &entity.attributes {
        let mut line = format!("    {:<20} {}", attribute.name, attribute.data_type);
        if attribute.unique {
            line.push_str(" unique");
        }
        if attribute.blank {
            line.push_str(" blank");
        }
        output.print(&line)?;
    }
    for relation in &entity.relations {
        let side = if relation.owner { "owner" } else { "inverse" };
        output.print(&format!(
            "    -> {:<17} {} {}",
            relation.target,
            relation.cardinality.as_str(),
            output.dim(side)
        ))?;
    }
    Ok(())
}
