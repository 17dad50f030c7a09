use crate::core::{
    config::AppConfig,
    diagnostics::LogSink,
    error::{CoverageNavigatorError, Result},
    pipeline::QueryPipeline,
    print_json,
    schemas::{builtin_query, resolve_schema},
    validator::ResponseValidator,
};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};

pub struct ValidateOptions {
    /// Built-in schema name or path to a schema description
    pub schema: String,
    pub caller: Option<String>,
    /// Response body file; stdin when absent
    pub input: Option<PathBuf>,
    /// Activation page to link to instead of the configured one
    pub cta_page: Option<String>,
}

/// Validate a response body and print the outcome as JSON.
///
/// Returns `Ok(false)` when the response was classified as a failure; the
/// classified error has already been printed.
pub fn execute_validate(options: ValidateOptions, config: &AppConfig) -> Result<bool> {
    let schema = resolve_schema(&options.schema, &config.validator.discriminant)?;

    let caller_id = match (&options.caller, builtin_query(&options.schema)) {
        (Some(caller), _) if !caller.trim().is_empty() => caller.trim().to_string(),
        (_, Some(query)) => query.caller_id.to_string(),
        _ => return Err(CoverageNavigatorError::missing_caller_id(&options.schema)),
    };
    let raw = read_body(options.input.as_deref())?;

    let pipeline = QueryPipeline::new(ResponseValidator::new(config.validator.clone()), LogSink);
    let mut activation = config.activation_payload();
    if let Some(page) = options.cta_page.as_deref().filter(|p| !p.trim().is_empty()) {
        activation.link.page_name = page.trim().to_string();
    }

    match pipeline.run(&raw, &schema, &caller_id, Some(&activation))? {
        Ok(narrowed) => {
            log::debug!("{caller_id}: response valid, arms {:?}", narrowed.arms);
            print_json(&narrowed)?;
            Ok(true)
        }
        Err(classified) => {
            print_json(&classified)?;
            Ok(false)
        }
    }
}

fn read_body(input: Option<&Path>) -> Result<Value> {
    let (origin, content) = match input {
        Some(path) => {
            let origin = path.display().to_string();
            let content = std::fs::read_to_string(path)
                .map_err(|e| CoverageNavigatorError::input_read_failed(&origin, e))?;
            (origin, content)
        }
        None => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .map_err(|e| CoverageNavigatorError::input_read_failed("stdin", e))?;
            ("stdin".to_string(), content)
        }
    };

    serde_json::from_str(&content).map_err(|e| CoverageNavigatorError::input_parse_failed(origin, e))
}
