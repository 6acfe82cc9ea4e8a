use heirloom_core::assets::AssetGroupTable;
use std::path::Path;

use crate::input;

/// Load the asset group table once for the whole command.
///
/// Files ending in `.yaml` or `.yml` are read as YAML, anything else as JSON.
pub fn load_group_table(path: Option<&str>) -> Result<AssetGroupTable, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(AssetGroupTable::default());
    };

    let contents = input::file::read_text(path)?;
    let is_yaml = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let table = if is_yaml {
        AssetGroupTable::from_yaml_str(&contents)
    } else {
        AssetGroupTable::from_json_str(&contents)
    }
    .map_err(|e| format!("Failed to load group table '{}': {}", path, e))?;

    tracing::debug!(path, yaml = is_yaml, "loaded asset group table");
    Ok(table)
}
