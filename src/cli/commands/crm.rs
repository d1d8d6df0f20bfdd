use anyhow::Context;
use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_error, output_success, output_value};
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::crm::{pagination::MAX_PAGE_SIZE, CrmClient, CrmEntity, CrmError, EspoCrmClient, PaginationQuery, SortOrder};

#[derive(Subcommand)]
pub enum CrmCommands {
    #[command(about = "Show one record")]
    Get {
        #[arg(help = "Entity: contact or lead")]
        entity: CrmEntity,
        #[arg(help = "Record ID")]
        id: String,
    },

    #[command(about = "List a page of records")]
    List {
        #[arg(help = "Entity: contact or lead")]
        entity: CrmEntity,
        #[arg(long, default_value_t = 0)]
        offset: u32,
        #[arg(long, default_value_t = 20)]
        max_size: u32,
        #[arg(long, default_value = "createdAt")]
        order_by: String,
        #[arg(long, default_value = "desc", help = "asc or desc")]
        order: String,
    },

    #[command(about = "Delete one record")]
    Delete {
        #[arg(help = "Entity: contact or lead")]
        entity: CrmEntity,
        #[arg(help = "Record ID")]
        id: String,
    },
}

pub async fn handle(cmd: CrmCommands, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let client = EspoCrmClient::new(&config.crm);

    match cmd {
        CrmCommands::Get { entity, id } => {
            let record = report(&output_format, client.get(entity, &id).await)
                .with_context(|| format!("failed to fetch {} '{}'", entity, id))?;
            output_value(&output_format, &record)
        }
        CrmCommands::List { entity, offset, max_size, order_by, order } => {
            let query = PaginationQuery {
                offset,
                max_size: max_size.clamp(1, MAX_PAGE_SIZE),
                order_by,
                order: SortOrder::parse_lenient(&order),
            };
            let page = report(&output_format, client.list(entity, &query).await)
                .with_context(|| format!("failed to list {} records", entity))?;
            output_value(&output_format, &page)
        }
        CrmCommands::Delete { entity, id } => {
            report(&output_format, client.delete(entity, &id).await)
                .with_context(|| format!("failed to delete {} '{}'", entity, id))?;
            output_success(
                &output_format,
                &format!("Deleted {} '{}'", entity, id),
                Some(json!({ "entity": entity, "id": id })),
            )
        }
    }
}

/// Emit a JSON error document before propagating, so `--json` callers always get JSON
fn report<T>(output_format: &OutputFormat, result: Result<T, CrmError>) -> Result<T, CrmError> {
    if let Err(e) = &result {
        if *output_format == OutputFormat::Json {
            let code = match e {
                CrmError::NotConfigured(_) => "NOT_CONFIGURED",
                CrmError::NotFound { .. } => "NOT_FOUND",
                _ => "CRM_ERROR",
            };
            // Best effort; the CRM error is still propagated
            let _ = output_error(output_format, &e.to_string(), Some(code));
        }
    }
    result
}
