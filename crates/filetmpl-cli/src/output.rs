//! Terminal output for filetmpl commands.
//!
//! Every command opens with a `filetmpl <command>` header, prints its settings
//! as dimmed key/value lines, then one line per template. Per-template results
//! are tagged `[OK]` when an output was written and `[FAIL]` when the template
//! could not be rendered; the run carries on either way.

use console::style;

/// Print the `filetmpl <command>` banner with an underline of the same width.
pub fn print_header(command: &str) {
    let title = format!("filetmpl {command}");
    println!("\n{}", style(&title).bold().cyan());
    println!("{}", style("=".repeat(title.chars().count())).dim());
}

/// Print a completed action prefixed with green `[OK]`.
pub fn print_success(text: &str) {
    println!("{} {}", style("[OK]").green().bold(), text);
}

/// Print a non-fatal problem prefixed with yellow `[WARN]`.
pub fn print_warning(text: &str) {
    println!("{} {}", style("[WARN]").yellow().bold(), text);
}

/// Print a template that failed to render, with the reason.
pub fn print_failed(source: &str, message: &str) {
    println!(
        "{} {}: {}",
        style("[FAIL]").red().bold(),
        source,
        style(message).red()
    );
}

pub fn print_step(step: u32, total: u32, text: &str) {
    println!("{} {}", style(format!("[{step}/{total}]")).dim(), text);
}

pub fn print_key_value(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Print a `template -> output` pair.
pub fn print_mapping(source: &str, target: &str) {
    println!("  {} {} {}", source, style("->").dim(), style(target).bold());
}

/// `"1 template"`, `"3 templates"`.
pub fn templates(count: usize) -> String {
    if count == 1 {
        "1 template".to_string()
    } else {
        format!("{count} templates")
    }
}

/// The naming rule as a file name pattern, e.g. `<name>-tmpl.<ext>`.
pub fn naming_pattern(prefix: &str, suffix: &str) -> String {
    format!("{prefix}<name>{suffix}.<ext>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_count() {
        assert_eq!(templates(0), "0 templates");
        assert_eq!(templates(1), "1 template");
        assert_eq!(templates(12), "12 templates");
    }

    #[test]
    fn test_naming_pattern() {
        assert_eq!(naming_pattern("", "-tmpl"), "<name>-tmpl.<ext>");
        assert_eq!(naming_pattern("pre_", "_suf"), "pre_<name>_suf.<ext>");
    }
}
