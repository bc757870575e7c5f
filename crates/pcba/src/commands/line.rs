//! Sequence commands: inspect, mutate, validate, execute.

use anyhow::Result;
use colored::Colorize;

use pcba_core::{BlockType, Orchestrator, RECIPES, Validation};

use crate::config::Config;
use crate::state;

fn print_sequence(line: &Orchestrator) {
    println!("{}", line.sequence());
    match line.validation() {
        Validation::Valid { number } => {
            println!(
                "{}",
                format!("✓ Valid Combination! (Pattern {number})")
                    .green()
                    .bold()
            );
        }
        Validation::Invalid => {
            println!("{}", "Status: Invalid sequence".yellow());
        }
    }
}

pub fn status(json: bool, config: &Config) -> Result<()> {
    let line = state::load(&config.state_file())?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "sequence": line.sequence(),
                "validation": line.validation(),
            }))?
        );
    } else {
        print_sequence(&line);
    }
    Ok(())
}

pub fn set_block(pos: usize, block: &str, config: &Config) -> Result<()> {
    let mut line = state::load(&config.state_file())?;
    line.set_block_named(pos, block)?;
    state::save(&line, &config.state_file())?;
    print_sequence(&line);
    Ok(())
}

pub fn set_param(pos: usize, value: &str, config: &Config) -> Result<()> {
    let mut line = state::load(&config.state_file())?;
    line.set_sub_param(pos, value)?;
    state::save(&line, &config.state_file())?;
    print_sequence(&line);
    Ok(())
}

pub fn recipe(number: usize, config: &Config) -> Result<()> {
    let mut line = state::load(&config.state_file())?;
    line.apply_recipe(number)?;
    state::save(&line, &config.state_file())?;
    println!("Set to Pattern {number}: {}", RECIPES[number - 1].name);
    print_sequence(&line);
    Ok(())
}

pub fn execute(config: &Config) -> Result<()> {
    let line = state::load(&config.state_file())?;

    match line.execute() {
        Ok(number) => {
            println!(
                "{}",
                format!("✓ Sequence Executed Successfully! (Pattern {number})")
                    .green()
                    .bold()
            );
            println!("  {}", RECIPES[number - 1].name);
            Ok(())
        }
        Err(e) => {
            println!("{}", format!("✗ {e}").red());
            std::process::exit(1);
        }
    }
}

pub fn recipes() -> Result<()> {
    println!("{}", "Valid Patterns:".bold());

    for (idx, recipe) in RECIPES.iter().enumerate() {
        println!();
        println!(
            "{} {}",
            format!("Pattern {}:", idx + 1).cyan().bold(),
            recipe.name
        );
        for (step, (block, param)) in recipe.steps.iter().enumerate() {
            println!("  Step {}: {} ({})", step + 1, block, param);
        }
    }
    Ok(())
}

pub fn catalog() -> Result<()> {
    for block in BlockType::ALL {
        println!(
            "{} {}",
            format!("{block}:").cyan().bold(),
            block.sub_params().join(", ")
        );
    }
    Ok(())
}
