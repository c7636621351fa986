//! `modelgen check`: load, validate and summarise a model.

use modelgen_core::application::ModelReport;
use tracing::info;

use crate::{
    cli::CheckArgs,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: CheckArgs, output: OutputManager) -> CliResult<()> {
    let (service, model) = super::load_model(&args.source.model)?;
    let report = service.check(&model);
    info!(
        source = %report.source,
        unresolved = report.unresolved.len(),
        "Model checked"
    );

    if output.is_json() {
        output.json(&report)?;
    } else {
        render(&report, &output)?;
    }

    if args.strict && !report.is_clean() {
        return Err(CliError::UnresolvedReferences {
            count: report.unresolved.len(),
        });
    }
    Ok(())
}

fn render(report: &ModelReport, output: &OutputManager) -> CliResult<()> {
    output.header(&format!("Model {}", report.source))?;
    output.print(&format!("  modules:            {}", report.modules))?;
    output.print(&format!("  imports:            {}", report.imports))?;
    output.print(&format!("  entities:           {}", report.local_entities))?;
    output.print(&format!("  imported entities:  {}", report.imported_entities))?;
    output.print(&format!("  relations:          {}", report.declared_relations))?;

    for reference in &report.unresolved {
        output.warning(&format!(
            "{} ({}): unresolved reference '{}'",
            reference.entity, reference.site, reference.reference
        ))?;
    }

    if report.is_clean() {
        output.success("Model is valid")?;
    } else {
        output.info(&format!(
            "Model is valid; {} reference(s) will be skipped",
            report.unresolved.len()
        ))?;
    }
    Ok(())
}
