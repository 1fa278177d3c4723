use fndeploy::application::{DeployOutcome, DeployResult, DeploySummary};

pub fn render_deploy_summary(summary: &DeploySummary) -> String {
    let title = if summary.is_success() {
        "Deploy Complete"
    } else {
        "Deploy Results"
    };

    let mut out = format!("{} (stage: {})\n", title, summary.stage);
    let width = summary
        .results
        .iter()
        .map(|r| r.id.to_string().len())
        .max()
        .unwrap_or(0);

    for result in &summary.results {
        let (label, detail) = describe(result);
        out.push_str(&format!(
            "  {:<9} {:<width$}  {}\n",
            label,
            result.id.to_string(),
            detail,
            width = width
        ));
        for warning in &result.warnings {
            out.push_str(&format!("            warning: {}\n", warning));
        }
    }
    for warning in &summary.warnings {
        out.push_str(&format!("  warning: {}\n", warning));
    }

    out.push('\n');
    out.push_str(&format!(
        "{} deployed, {} partial, {} failed, {} cancelled\n",
        summary.succeeded(),
        summary.partial(),
        summary.failed(),
        summary.cancelled()
    ));
    out
}

fn describe(result: &DeployResult) -> (&'static str, String) {
    match &result.outcome {
        DeployOutcome::Created { alias_handle, .. } => ("created", alias_handle.to_string()),
        DeployOutcome::Updated { function_handle } => ("updated", function_handle.to_string()),
        DeployOutcome::CreatedWithoutAlias {
            function_handle,
            alias_error,
        } => (
            "partial",
            format!("{} (create-alias: {})", function_handle, alias_error),
        ),
        DeployOutcome::Failed { stage, cause } => ("failed", format!("{}: {}", stage, cause)),
        DeployOutcome::Cancelled { before_stage, .. } => {
            ("cancelled", format!("before {}", before_stage))
        }
    }
}
