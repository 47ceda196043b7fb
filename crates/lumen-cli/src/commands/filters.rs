use anyhow::Result;
use clap::Args;
use console::Style;
use lumen_core::catalog::{self, FilterCategory, ParamEffect};

const CATEGORIES: [FilterCategory; 4] = [
    FilterCategory::Color,
    FilterCategory::Blur,
    FilterCategory::Detect,
    FilterCategory::Stylize,
];

#[derive(Args)]
pub struct FiltersArgs {
    /// Only list filters in this category (color, blur, detect, stylize)
    #[arg(long)]
    pub category: Option<String>,
}

pub fn run(args: &FiltersArgs) -> Result<()> {
    let title = Style::new().cyan().bold();
    let name = Style::new().green().bold();
    let label = Style::new().dim();
    let value = Style::new().bold().white();
    let disabled = Style::new().dim().yellow();

    let wanted = args.category.as_deref().map(str::to_ascii_lowercase);
    let mut listed = 0usize;

    for category in CATEGORIES {
        if let Some(ref wanted) = wanted {
            if category.to_string().to_ascii_lowercase() != *wanted {
                continue;
            }
        }
        println!();
        println!("  {}", title.apply_to(category));

        for entry in catalog::all().iter().filter(|e| e.category == category) {
            listed += 1;
            println!(
                "    {:<14}{}",
                name.apply_to(entry.kind),
                entry.description
            );
            for param in entry.params {
                let range = param
                    .range
                    .map(|(lo, hi)| format!(" [{lo} .. {hi}]"))
                    .unwrap_or_default();
                let note = match param.effect {
                    ParamEffect::Active => String::new(),
                    ParamEffect::Ignored => format!(" {}", disabled.apply_to("(no effect)")),
                };
                println!(
                    "      {:<12}{}{}{}",
                    label.apply_to(param.name),
                    value.apply_to(param.default.to_value()),
                    label.apply_to(range),
                    note
                );
            }
        }
    }

    if listed == 0 {
        println!("No filters in category '{}'", args.category.as_deref().unwrap_or(""));
    }
    println!();
    Ok(())
}
