// ABOUTME: CLI commands operating on the stored club record
// ABOUTME: Show, update, clear and render the record from the terminal

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clubdata_settings::{ClubData, ClubField, ClubSettingsInput, ClubSettingsManager};
use colored::*;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};

pub enum SettingsCommand {
    Show {
        field: Option<String>,
    },
    Set {
        phone: Option<String>,
        email: Option<String>,
        address: Option<String>,
        replace: bool,
    },
    Fragment,
    Form,
    Render {
        file: PathBuf,
    },
    Clear {
        yes: bool,
    },
}

pub async fn handle_settings_command(
    manager: &ClubSettingsManager,
    command: SettingsCommand,
) -> anyhow::Result<()> {
    match command {
        SettingsCommand::Show { field } => show(manager, field.as_deref()).await,
        SettingsCommand::Set {
            phone,
            email,
            address,
            replace,
        } => set(manager, phone, email, address, replace).await,
        SettingsCommand::Fragment => {
            print!("{}", manager.shortcode().await?);
            Ok(())
        }
        SettingsCommand::Form => form(manager).await,
        SettingsCommand::Render { file } => render(manager, &file).await,
        SettingsCommand::Clear { yes } => clear(manager, yes).await,
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

async fn show(manager: &ClubSettingsManager, field: Option<&str>) -> anyhow::Result<()> {
    if let Some(name) = field {
        // Reject typos here, the accessor itself would fall back to the whole record
        let field: ClubField = name.parse()?;
        println!("{}", manager.field_text(field).await?);
        return Ok(());
    }

    match manager.field(None).await? {
        ClubData::All(values) if values.is_empty() => {
            println!("{}", "No club data stored yet".yellow());
            println!("{}", "Use 'clubdata set' to enter phone, email and address".dimmed());
        }
        data => {
            println!("{}", "Vereinsdaten".blue().bold());
            let mut table = new_table();
            table.set_header(vec!["Field", "Value"]);
            if let ClubData::All(values) = data {
                for field in ClubField::ALL {
                    let value = values
                        .get(field.as_str())
                        .map(|v| v.as_str().to_string())
                        .unwrap_or_default();
                    table.add_row(vec![field.title().to_string(), value]);
                }
            }
            println!("{}", table);
        }
    }

    Ok(())
}

async fn set(
    manager: &ClubSettingsManager,
    phone: Option<String>,
    email: Option<String>,
    address: Option<String>,
    replace: bool,
) -> anyhow::Result<()> {
    let mut input = if replace {
        ClubSettingsInput::default()
    } else {
        manager.load().await?.to_input()
    };

    if phone.is_some() {
        input.phone = phone;
    }
    if email.is_some() {
        input.email = email;
    }
    if address.is_some() {
        input.address = address;
    }

    let saved = manager.save(&input).await?;

    println!("{}", "Club data saved".green());
    let mut table = new_table();
    table.set_header(vec!["Field", "Stored value"]);
    for field in ClubField::ALL {
        table.add_row(vec![
            field.title().to_string(),
            saved.get(field).as_str().to_string(),
        ]);
    }
    println!("{}", table);

    Ok(())
}

async fn form(manager: &ClubSettingsManager) -> anyhow::Result<()> {
    for field in manager.render_form().await? {
        println!("{}", format!("{} ({})", field.title, field.id).cyan());
        println!("{}", field.to_html());
        println!();
    }
    Ok(())
}

async fn render(manager: &ClubSettingsManager, file: &Path) -> anyhow::Result<()> {
    let document = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    print!("{}", manager.expand(&document).await?);
    Ok(())
}

async fn clear(manager: &ClubSettingsManager, yes: bool) -> anyhow::Result<()> {
    if !yes {
        print!("Delete the stored club data? [y/N] ");
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            println!("{}", "Aborted".yellow());
            return Ok(());
        }
    }

    if manager.clear().await? {
        println!("{}", "Club data deleted".green());
    } else {
        println!("{}", "Nothing stored".dimmed());
    }
    Ok(())
}
