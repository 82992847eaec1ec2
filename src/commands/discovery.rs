use anyhow::Result;
use podshift::{format_descriptors, rule_descriptors};

pub fn cmd_rules(json: bool) -> Result<bool> {
    let rules = rule_descriptors();
    if json {
        crate::ui::json::emit(&rules)?;
        return Ok(true);
    }

    let width = rules.iter().map(|r| r.name.len()).max().unwrap_or(0);
    for (i, rule) in rules.iter().enumerate() {
        println!(
            "{:>2}. {:<width$}  {}",
            i + 1,
            rule.name,
            rule.description,
            width = width
        );
    }
    Ok(true)
}

pub fn cmd_formats(json: bool) -> Result<bool> {
    let formats = format_descriptors();
    if json {
        crate::ui::json::emit(&formats)?;
        return Ok(true);
    }

    let width = formats.iter().map(|f| f.id.len()).max().unwrap_or(0);
    for format in &formats {
        println!(
            "{:<width$}  {} - {}",
            format.id,
            format.name,
            format.description,
            width = width
        );
    }
    Ok(true)
}
