use std::path::Path;

use console::Style;
use lumen_core::catalog::ParamEffect;
use lumen_core::chain::FilterChain;
use lumen_core::pipeline::config::PipelineConfig;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_chain_summary(config: &PipelineConfig, chain: &FilterChain, input: &Path, output: &Path) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Lumen Pipeline"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(14)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Snapshot"),
        s.method.apply_to(config.snapshot.format)
    );
    match config.seed {
        Some(seed) => println!(
            "  {:<14}{}",
            s.label.apply_to("Seed"),
            s.value.apply_to(seed)
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Seed"),
            s.disabled.apply_to("random")
        ),
    }
    println!();

    println!(
        "  {} {}",
        s.header.apply_to("Filters"),
        s.label
            .apply_to(format!("({}/{})", chain.len(), chain.max_filters()))
    );
    if chain.is_empty() {
        println!("    {}", s.disabled.apply_to("none, output equals input"));
    }
    for (i, instance) in chain.order().iter().enumerate() {
        println!(
            "    {:>2}. {}",
            i + 1,
            s.method.apply_to(instance.kind.descriptor().display_name)
        );
        let descriptor = instance.kind.descriptor();
        for (name, value) in instance.effective_params() {
            let ignored = descriptor
                .param(&name)
                .is_some_and(|p| p.effect == ParamEffect::Ignored);
            if ignored {
                println!(
                    "        {:<12}{} {}",
                    s.label.apply_to(&name),
                    s.value.apply_to(&value),
                    s.disabled.apply_to("(no effect)")
                );
            } else {
                println!(
                    "        {:<12}{}",
                    s.label.apply_to(&name),
                    s.value.apply_to(&value)
                );
            }
        }
    }
    println!();
}
