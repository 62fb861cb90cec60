//! Icons command - list the icon catalogue

use anyhow::Result;
use colored::Colorize;

use budget_core::domain::icons;

pub fn run(search: Option<&str>) -> Result<()> {
    let categories = icons::search(search.unwrap_or(""));
    if categories.is_empty() {
        println!("No icons match '{}'", search.unwrap_or_default());
        return Ok(());
    }

    for category in categories {
        println!("{} ({} icons)", category.title.bold(), category.icons.len());
        for url in &category.icons {
            println!("  {}", url);
        }
        println!();
    }
    println!("Default icon: {}", icons::default_icon().dimmed());
    Ok(())
}
