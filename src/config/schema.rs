//! JSON Schema validation for pyqa configuration

use anyhow::{Result, anyhow};
use jsonschema::Validator;
use serde_json::Value;

/// Embedded JSON schema for `pyqa.yaml`
const SCHEMA: &str = r##"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "title": "pyqa configuration",
  "type": "object",
  "additionalProperties": false,
  "properties": {
    "pattern": { "type": "string" },
    "tools": {
      "type": "object",
      "additionalProperties": false,
      "properties": {
        "formatter": { "$ref": "#/definitions/tool" },
        "style_checker": { "$ref": "#/definitions/tool" },
        "linter": { "$ref": "#/definitions/tool" },
        "security_scanner": { "$ref": "#/definitions/tool" }
      }
    }
  },
  "definitions": {
    "tool": {
      "type": "object",
      "additionalProperties": false,
      "properties": {
        "program": { "type": "string" },
        "config": { "type": "string" },
        "extra_args": {
          "type": "array",
          "items": { "type": "string" }
        }
      }
    }
  }
}"##;

/// Compile the embedded JSON schema
pub fn get_schema() -> Result<Validator> {
    let schema: Value = serde_json::from_str(SCHEMA)
        .map_err(|e| anyhow!("Failed to parse embedded JSON schema: {e}"))?;

    jsonschema::draft7::new(&schema).map_err(|e| anyhow!("Failed to compile JSON schema: {e}"))
}

/// Validate a configuration value against the schema
pub fn validate_against_schema(config: &Value) -> Result<()> {
    let schema = get_schema()?;

    let error_messages: Vec<String> = schema
        .iter_errors(config)
        .map(|e| format!("  - {e}"))
        .collect();

    if !error_messages.is_empty() {
        return Err(anyhow!(
            "Configuration does not match the schema:\n{}",
            error_messages.join("\n")
        ));
    }

    Ok(())
}
