//! Command implementations. Each returns the process exit code.

use std::io::Write;

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Table};
use localess_fields::{validate_content, SchemaEditor};
use localess_store::SchemaStore;
use tracing::info;

use crate::services::Services;
use crate::EXIT_FAILURE;

pub async fn serve(services: &Services) -> Result<i32> {
    let addr = services.config.server.socket_addr()?;
    info!("Starting {} on {}", services.config.app_name, addr);
    localess_api::serve(addr, services.app_state())
        .await
        .with_context(|| format!("serving on {addr}"))?;
    Ok(0)
}

pub async fn publish(
    services: &Services,
    space_id: &str,
    description: Option<String>,
    out: &mut dyn Write,
) -> Result<i32> {
    let report = services
        .publisher()
        .publish(space_id, description)
        .await
        .with_context(|| format!("publishing space '{space_id}'"))?;
    write!(out, "{}", serde_yaml_ng::to_string(&report)?)?;
    Ok(0)
}

pub async fn schema_list(services: &Services, space_id: &str, out: &mut dyn Write) -> Result<i32> {
    let schemas = services.repo.find_all(space_id).await?;
    if schemas.is_empty() {
        writeln!(out, "No schemas found.")?;
        return Ok(0);
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Id", "Name", "Display Name", "Fields"]);
    for schema in &schemas {
        table.add_row(vec![
            schema.id.clone(),
            schema.name.clone(),
            schema.display_name.clone().unwrap_or_default(),
            schema.fields.len().to_string(),
        ]);
    }
    writeln!(out, "{table}")?;
    Ok(0)
}

pub async fn schema_show(
    services: &Services,
    space_id: &str,
    schema_id: &str,
    out: &mut dyn Write,
) -> Result<i32> {
    let schema = services
        .repo
        .find_by_id(space_id, schema_id)
        .await
        .with_context(|| format!("loading schema '{schema_id}'"))?;
    write!(out, "{}", serde_yaml_ng::to_string(&schema)?)?;
    Ok(0)
}

/// Load the schema into an edit session and report what would block saving it.
pub async fn schema_check(
    services: &Services,
    space_id: &str,
    schema_id: &str,
    out: &mut dyn Write,
) -> Result<i32> {
    let schema = services
        .repo
        .find_by_id(space_id, schema_id)
        .await
        .with_context(|| format!("loading schema '{schema_id}'"))?;
    let all = services.repo.find_all(space_id).await?;
    let issues = SchemaEditor::load(&schema, &all).validate();

    if issues.is_empty() {
        writeln!(out, "Schema '{}' is valid.", schema.name)?;
        return Ok(0);
    }
    writeln!(out, "Schema '{}' has {} issue(s):", schema.name, issues.len())?;
    for issue in &issues {
        writeln!(out, "  {issue}")?;
    }
    Ok(EXIT_FAILURE)
}

pub async fn content_check(
    services: &Services,
    space_id: &str,
    content_id: &str,
    out: &mut dyn Write,
) -> Result<i32> {
    let content = services
        .repo
        .find_content(space_id, content_id)
        .await
        .with_context(|| format!("loading content '{content_id}'"))?;
    let schema_name = content
        .schema
        .as_deref()
        .with_context(|| format!("content '{content_id}' has no schema"))?;
    let schemas = services.repo.find_all(space_id).await?;
    let schema = schemas
        .iter()
        .find(|s| s.name == schema_name)
        .with_context(|| format!("schema '{schema_name}' not found"))?;

    let data = content.data.clone().unwrap_or_else(|| serde_json::json!({}));
    let issues = validate_content(schema, &data, &schemas);
    if issues.is_empty() {
        writeln!(out, "Content '{}' is valid.", content.name)?;
        return Ok(0);
    }
    writeln!(out, "Content '{}' has {} issue(s):", content.name, issues.len())?;
    for issue in &issues {
        writeln!(out, "  {issue}")?;
    }
    Ok(EXIT_FAILURE)
}
