//! Strategy description command implementation.

use anyhow::Result;
use sagres::signals::registry::get_strategy_info;
use sagres::{PipelineConfig, SagresError};

/// Print the hypothesis, approach and default settings of a strategy.
pub(crate) fn describe_strategy(name: &str) -> Result<()> {
    let info = get_strategy_info(name).ok_or_else(|| {
        SagresError::StrategyNotFound(format!(
            "Unknown strategy: '{}'. Use 'sagres strategies' to list available strategies.",
            name
        ))
    })?;

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{:^62}║", info.kind.display_name());
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Name:      {}", info.name());
    println!("Category:  {:?}", info.category);
    println!("Summary:   {}", info.description);
    println!();

    println!("Hypothesis:");
    for line in info.hypothesis {
        println!("  - {}", line);
    }
    println!();

    println!("Approach:");
    for line in info.approach {
        println!("  - {}", line);
    }
    println!();

    // Config sections are named after the canonical strategy names.
    let defaults = serde_json::to_value(PipelineConfig::default())?;
    if let Some(section) = defaults.get(info.name()) {
        println!("Default configuration:");
        println!("{}", serde_json::to_string_pretty(section)?);
        println!();
    }

    println!("Reference: {}\n", info.reference);
    Ok(())
}
