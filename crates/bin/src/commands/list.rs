//! List commands - read and edit lists in the local store.

use shoplist::ListService;

use crate::backend::{create_backend, json_path, save_if_in_memory};
use crate::cli::{ListArgs, ListCommand};
use crate::output::{OutputFormat, print_json, print_list, print_table};

/// Run a `list` subcommand
pub async fn run(args: &ListArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let service = ListService::open(create_backend(&args.backend_config).await?);

    let changed = match &args.command {
        ListCommand::Show { list_id, sort_by } => {
            let list = service.get_list_sorted(list_id, *sort_by).await?;
            show(list_id, list.as_ref(), format)?;
            false
        }
        ListCommand::Add {
            list_id,
            description,
            quantity,
        } => {
            let list = service.add_item(list_id, description, *quantity).await?;
            show(list_id, Some(&list), format)?;
            true
        }
        ListCommand::Remove { list_id, item_id } => {
            let list = service.delete_item(list_id, *item_id).await?;
            show(list_id, list.as_ref(), format)?;
            list.is_some()
        }
        ListCommand::Clear { list_id } => {
            let list = service.delete_all(list_id).await?;
            show(list_id, list.as_ref(), format)?;
            list.is_some()
        }
        ListCommand::SetQuantity {
            list_id,
            item_id,
            quantity,
        } => {
            let list = service
                .update_quantity(list_id, *item_id, *quantity)
                .await?;
            show(list_id, list.as_ref(), format)?;
            list.is_some()
        }
        ListCommand::Ids => {
            let ids = service.list_ids().await?;
            match format {
                OutputFormat::Human if ids.is_empty() => println!("No lists found."),
                OutputFormat::Human => {
                    let rows: Vec<Vec<String>> = ids.into_iter().map(|id| vec![id]).collect();
                    print_table(&["LIST ID"], &rows);
                }
                OutputFormat::Json => print_json(&ids)?,
            }
            false
        }
    };

    if changed {
        save_if_in_memory(&service, &json_path(&args.backend_config)).await?;
    }
    Ok(())
}

fn show(
    list_id: &str,
    list: Option<&shoplist::ShoppingList>,
    format: OutputFormat,
) -> Result<(), serde_json::Error> {
    match (list, format) {
        (Some(list), format) => print_list(list, format),
        (None, OutputFormat::Human) => {
            println!("List '{list_id}' not found.");
            Ok(())
        }
        (None, OutputFormat::Json) => print_json(&serde_json::Value::Null),
    }
}
