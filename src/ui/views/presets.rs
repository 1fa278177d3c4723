use serde_json::{json, Value};

use fndeploy::application::LayeredDefaults;
use fndeploy::domain::entities::NetworkObject;
use fndeploy::domain::services::{ConfigLayer, EXTERNAL_PRESET};

/// One preset as a function in this stage would see it.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetRow {
    pub name: String,
    pub layer: ConfigLayer,
    pub network: NetworkObject,
}

pub fn preset_rows(layers: &LayeredDefaults) -> Vec<PresetRow> {
    let registry = layers.presets();
    registry
        .names()
        .into_iter()
        .filter_map(|(name, from_environment)| {
            registry.lookup(name).map(|network| PresetRow {
                name: name.to_string(),
                layer: if from_environment {
                    ConfigLayer::Environment
                } else {
                    ConfigLayer::Default
                },
                network: network.clone(),
            })
        })
        .collect()
}

pub fn render_presets(stage: &str, rows: &[PresetRow]) -> String {
    let mut out = format!("Network presets (stage: {})\n", stage);
    if rows.is_empty() {
        out.push_str("  (none defined)\n");
        return out;
    }

    let width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);
    for row in rows {
        let marker = if row.name == EXTERNAL_PRESET {
            " (fallback)"
        } else {
            ""
        };
        out.push_str(&format!(
            "  {:<width$}  [{}]{}\n",
            row.name,
            row.layer,
            marker,
            width = width
        ));
        out.push_str(&format!("    subnets: {}\n", list(&row.network.subnet_ids)));
        out.push_str(&format!(
            "    security groups: {}\n",
            list(&row.network.security_group_ids)
        ));
    }
    out
}

pub fn preset_json(stage: &str, row: &PresetRow) -> Value {
    json!({
        "event": "preset",
        "stage": stage,
        "name": row.name,
        "layer": row.layer,
        "network": row.network,
    })
}

fn list(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
