//! Strategy listing command implementation.

use anyhow::Result;
use sagres::signals::registry::{available_categories, strategies_by_category};

/// List available strategies, optionally filtered by category.
pub(crate) fn list_strategies(category: Option<String>, verbose: bool) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                   Available Strategies                       ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    for cat in available_categories() {
        let cat_name = format!("{cat:?}");
        if let Some(ref filter) = category
            && !cat_name.to_lowercase().contains(&filter.to_lowercase())
        {
            continue;
        }

        println!("{} - {}", cat_name, cat.description());
        println!("{}", "-".repeat(60));

        for info in strategies_by_category(&cat) {
            if verbose {
                let inputs = match (info.requires_statements, info.requires_prices) {
                    (true, true) => "statements, prices",
                    (true, false) => "statements",
                    (false, _) => "prices",
                };
                println!("  {:10} {}", info.name(), info.kind.display_name());
                println!("  {:10} {}", "", info.description);
                println!("  {:10} inputs: {}", "", inputs);
                if !info.kind.aliases().is_empty() {
                    println!("  {:10} aliases: {}", "", info.kind.aliases().join(", "));
                }
            } else {
                println!("  {:10} {}", info.name(), info.kind.display_name());
            }
        }
        println!();
    }

    if !verbose {
        println!("Use --verbose for descriptions and aliases.");
    }
    println!("Use 'sagres describe <strategy>' for the hypothesis behind a strategy.\n");

    Ok(())
}
