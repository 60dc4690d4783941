// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `aix convert`, `aix process`, and `aix workflow` command implementations.

use std::fmt::Write as _;
use std::path::Path;

use aix_config::model::{AixConfig, SelectionPolicy};
use aix_core::{AixError, MintResult, PricingBundle};
use aix_workflow::{Preferred, ProviderSelector, selector_for};

use crate::pipeline::build_orchestrator;

/// Run the `aix convert` command.
pub async fn run_convert(
    config: &AixConfig,
    input: &Path,
    output: Option<&Path>,
    enhanced: bool,
) -> Result<(), AixError> {
    let orchestrator = build_orchestrator(config, enhanced)?;
    let (path, entries) = orchestrator.convert_file(input, output).await?;
    let mode = if enhanced { " with enhanced resource estimates" } else { "" };
    println!(
        "Converted {} to {} ({} entries){mode}",
        input.display(),
        path.display(),
        entries.len()
    );
    Ok(())
}

/// Run the `aix process` command.
pub async fn run_process(config: &AixConfig, input: &Path, enhanced: bool) -> Result<(), AixError> {
    let orchestrator = build_orchestrator(config, enhanced)?;
    let output = orchestrator.process_file(input).await?;
    println!("Resource estimates written to {}", output.enriched_path.display());
    println!("Provider pricing written to {}", output.priced_path.display());
    Ok(())
}

/// Run the `aix workflow` command.
///
/// An explicit provider key wins over `--cheapest`, which wins over the
/// configured selection policy.
pub async fn run_workflow(
    config: &AixConfig,
    input: &Path,
    provider: Option<&str>,
    cheapest: bool,
    enhanced: bool,
) -> Result<(), AixError> {
    let selector: Box<dyn ProviderSelector> = match provider {
        Some(key) => Box::new(Preferred(key.to_string())),
        None if cheapest => selector_for(SelectionPolicy::Cheapest),
        None => selector_for(config.workflow.selection),
    };

    let orchestrator = build_orchestrator(config, enhanced)?;
    println!("Starting AIX workflow for {}", input.display());

    let report = orchestrator.run_workflow(input, selector.as_ref()).await?;
    println!("Processed file: {}", report.output.priced_path.display());

    if let Some(bundle) = report
        .output
        .entries
        .first()
        .and_then(|e| e.provider_pricing.as_ref())
    {
        print!("{}", format_comparison(bundle));
    }
    println!("Selected provider: {}", report.selected_key);
    print!("{}", format_mint_summary(&report.mint));
    println!("Workflow completed successfully!");
    Ok(())
}

/// Provider comparison table, one line per registered provider.
pub fn format_comparison(bundle: &PricingBundle) -> String {
    let mut out = String::from("Provider Pricing Comparison:\n----------------------------\n");
    for (key, quote) in bundle.iter() {
        match quote {
            Some(q) => {
                let _ = writeln!(out, "{key}: ${:.2}", q.total_cost());
            }
            None => {
                let _ = writeln!(out, "{key}: unavailable");
            }
        }
    }
    out
}

pub fn format_mint_summary(mint: &MintResult) -> String {
    let mut out = String::from("Minting Result:\n---------------\n");
    let _ = writeln!(out, "Task ID: {}", mint.task_id);
    let _ = writeln!(out, "CPU Usage: {} units", mint.cpu_usage);
    let _ = writeln!(out, "GPU Usage: {} units", mint.gpu_usage);
    let _ = writeln!(out, "Provider: {}", mint.provider);
    let _ = writeln!(out, "Cost: ${:.2}", mint.cost);
    let _ = writeln!(out, "Minted: {} AIX tokens", mint.minted_amount);
    out
}
