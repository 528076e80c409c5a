//! Rollback command
//!
//! Handles: apikit rollback <backup-id>

use serde_json::json;

use apikit_core::backup::{load_backup, restore_from_backup};
use apikit_core::config::OperationType;

use super::Context;

/// Execute `apikit rollback`
pub fn execute(
    ctx: &Context,
    backup_id: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let backup = load_backup(&ctx.settings.backup_dir, backup_id)?;
    restore_from_backup(&backup)?;

    if json {
        let output = json!({
            "success": true,
            "operation": OperationType::Rollback,
            "message": OperationType::Rollback.success_message(),
            "backup_id": backup.id.to_string(),
            "description": backup.description,
            "files_restored": backup
                .files
                .iter()
                .map(|f| f.path.display().to_string())
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", OperationType::Rollback.success_message());
        println!("Rolled back {} files.", backup.files.len());
        if let Some(description) = &backup.description {
            println!("Undid: {description}");
        }
    }
    Ok(())
}
