use colored::Colorize;
use rhtmx_formguard::{FieldState, Form};

/// Print every field with its state and attached messages
pub fn print_form(form: &Form) {
    for field in &form.fields {
        let marker = match field.state {
            FieldState::Valid => "✓".green(),
            FieldState::Error => "✗".red(),
            FieldState::Untouched => "·".dimmed(),
        };
        let tag = if field.is_validated() { "" } else { " (not validated)" };
        println!("  {} {}{}", marker, field.name.bold(), tag.dimmed());

        for message in form.messages.for_field(&field.name) {
            let text = if message.text.is_empty() {
                "(no translation)".to_string()
            } else {
                message.text.clone()
            };
            println!("      {}", text.yellow());
        }
    }

    println!();
    if form.submit_disabled {
        println!("Submit: {}", "disabled".red());
    } else {
        println!("Submit: {}", "enabled".green());
    }
}
