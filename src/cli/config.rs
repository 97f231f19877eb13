use crate::models::{Config, LinkMethod, Target};
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Show or update the persisted configuration
///
/// `config` is the value loaded at startup; updates are merged into it and
/// written back to `path`.
pub fn run(
    mut config: Config,
    path: &Path,
    target: Option<&str>,
    method: Option<&str>,
    show: bool,
) -> Result<()> {
    let link_method = method.map(str::parse::<LinkMethod>).transpose()?;

    if target.is_none() && link_method.is_none() {
        print_config(&config, path);
        return Ok(());
    }

    config.merge(Config {
        default_target: target.map(String::from),
        link_method,
    });
    config.save_to(path)?;

    if let Some(key) = target {
        let resolved = Target::from_key(key);
        let note = if resolved.is_builtin() {
            resolved.config.name
        } else {
            "custom target".to_string()
        };
        println!(
            "{} {} {}",
            "✓ Default target:".green(),
            key,
            format!("({})", note).bright_black()
        );
    }
    if let Some(method) = link_method {
        println!("{} {}", "✓ Link method:".green(), method);
    }

    if show {
        println!();
        print_config(&config, path);
    }

    Ok(())
}

fn print_config(config: &Config, path: &Path) {
    println!("{}", "⚙️  Configuration".cyan().bold());
    println!("   {}", path.display().to_string().bright_black());
    println!();

    match &config.default_target {
        Some(target) => println!("   defaultTarget: {}", target),
        None => println!("   defaultTarget: {}", "(not set, prompt)".bright_black()),
    }
    match config.link_method {
        Some(method) => println!("   linkMethod:    {}", method),
        None => println!(
            "   linkMethod:    {}",
            format!("(not set, {})", LinkMethod::default()).bright_black()
        ),
    }
}
