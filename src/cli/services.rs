//! Services command - list bound services.

use serde_json::json;

use crate::cli::output;
use crate::core::environment::Environment;
use crate::error::Result;

/// List every bound service with its label and plan.
pub fn list(env: &Environment, json: bool) -> Result<()> {
    if json {
        let services: Vec<_> = env
            .services()
            .iter()
            .map(|service| {
                json!({
                    "name": service.name(),
                    "label": service.label(),
                    "plan": service.plan(),
                    "tags": service.tags(),
                })
            })
            .collect();
        let count = services.len();
        let output = json!({
            "services": services,
            "count": count,
        });
        println!("{:#}", output);
    } else if env.is_empty() {
        output::dimmed("no services bound");
    } else {
        output::header(&format!("{} services bound", env.len()));
        for service in env.services() {
            let mut line = format!("{} ({}", output::service(service.name()), service.label());
            if let Some(plan) = service.plan() {
                line.push_str(&format!(", {}", plan));
            }
            line.push(')');
            output::list_item(&line);
        }
    }

    Ok(())
}
