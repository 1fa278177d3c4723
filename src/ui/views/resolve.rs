use serde_json::{json, Value};

use fndeploy::application::ResolvedFunction;
use fndeploy::domain::entities::{ConfigDocument, FunctionConfiguration, NetworkConfig};

pub fn render_resolve(
    stage: &str,
    function: &ResolvedFunction,
    configuration: &FunctionConfiguration,
) -> String {
    let mut out = format!("{} (stage: {})\n", function.id, stage);

    let config = &function.resolved.config;
    let rows: Vec<(&String, String, String)> = function
        .resolved
        .sources
        .iter()
        .filter(|(key, _)| !key.starts_with("NetworkPresets."))
        .filter_map(|(key, layer)| value_of(config, key).map(|v| (key, v, layer.to_string())))
        .collect();
    let width = rows.iter().map(|(k, _, _)| k.len()).max().unwrap_or(0);

    out.push_str("\nConfig\n");
    if rows.is_empty() {
        out.push_str("  (empty)\n");
    }
    for (key, value, layer) in &rows {
        out.push_str(&format!(
            "  {:<width$}  {}  [{}]\n",
            key,
            value,
            layer,
            width = width
        ));
    }

    if !function.resolved.overrides.is_empty() {
        out.push_str("\nOverridden\n");
        for info in &function.resolved.overrides {
            out.push_str(&format!(
                "  {}: {} -> {}\n",
                info.key, info.from_layer, info.by_layer
            ));
        }
    }

    out.push_str("\nNetwork\n");
    if function.network.is_empty() {
        out.push_str("  (no VPC placement)\n");
    } else {
        out.push_str(&format!(
            "  subnets: {}\n",
            function.network.subnet_ids.join(", ")
        ));
        out.push_str(&format!(
            "  security groups: {}\n",
            function.network.security_group_ids.join(", ")
        ));
    }

    out.push_str("\nRequest\n");
    out.push_str(&format!("  FunctionName  {}\n", configuration.function_name));
    out.push_str(&format!("  Handler       {}\n", configuration.handler));
    if let Some(role) = &configuration.role {
        out.push_str(&format!("  Role          {}\n", role));
    }
    out
}

pub fn resolve_json(
    stage: &str,
    function: &ResolvedFunction,
    configuration: &FunctionConfiguration,
) -> Value {
    json!({
        "event": "resolve",
        "stage": stage,
        "function": function.id,
        "config": function.resolved.config,
        "sources": function.resolved.sources,
        "overrides": function.resolved.overrides,
        "network": function.network,
        "request": configuration,
        "warnings": function.warnings.iter().map(|w| w.to_string()).collect::<Vec<_>>(),
    })
}

/// Display value for a dotted key from the merger's source map.
fn value_of(config: &ConfigDocument, key: &str) -> Option<String> {
    if let Some(tag) = key.strip_prefix("Tags.") {
        return config.tags.get(tag).cloned();
    }
    if let Some(name) = key.strip_prefix("Environment.Variables.") {
        return config
            .environment
            .as_ref()
            .and_then(|env| env.variables.get(name).cloned());
    }
    match key {
        "Runtime" => config.runtime.clone(),
        "Role" => config.role.clone(),
        "Timeout" => config.timeout.map(|t| t.to_string()),
        "MemorySize" => config.memory_size.map(|m| m.to_string()),
        "Handler" => config.handler.clone(),
        "Description" => config.description.clone(),
        "NetworkConfig" => config.network_config.as_ref().map(|n| match n {
            NetworkConfig::Preset(name) => format!("preset '{}'", name),
            NetworkConfig::Inline(_) => "inline".to_string(),
        }),
        _ => None,
    }
}
