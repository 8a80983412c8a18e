//! CLI command implementations

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::descriptor::ApiDocument;
use crate::observability;
use crate::server::{MockConfig, MockServer, RouteTable};
use crate::store::{DataStore, MemoryDataStore, Resource};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_json;

/// Parse CLI arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            api,
            config,
            host,
            port,
            data,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            serve(&api, config, data.as_deref())
        }
        Command::Check { api } => check(&api),
    }
}

/// Load the server configuration, or the defaults when no file is given
pub fn load_config(path: Option<&Path>) -> CliResult<MockConfig> {
    let Some(path) = path else {
        return Ok(MockConfig::default());
    };
    let content = fs::read_to_string(path).map_err(|e| {
        CliError::config_error(format!("Cannot read {}: {}", path.display(), e))
    })?;
    MockConfig::from_json(&content)
        .map_err(|e| CliError::config_error(format!("Invalid config {}: {}", path.display(), e)))
}

/// Read seed data: a JSON object mapping resource paths to their data
pub fn load_seed(path: &Path) -> CliResult<Vec<Resource>> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::data_error(format!("Cannot read {}: {}", path.display(), e)))?;
    let value: Value = serde_json::from_str(&content)
        .map_err(|e| CliError::data_error(format!("Invalid seed data {}: {}", path.display(), e)))?;
    seed_resources(value)
}

/// Turn a seed document into resources, in document order
pub fn seed_resources(value: Value) -> CliResult<Vec<Resource>> {
    let Value::Object(entries) = value else {
        return Err(CliError::data_error(
            "Seed data must be an object mapping resource paths to data",
        ));
    };

    Ok(entries
        .into_iter()
        .map(|(path, data)| Resource::from_path(path, data))
        .collect())
}

/// Serve the API document until the process is stopped
pub fn serve(api_path: &Path, config: MockConfig, data_path: Option<&Path>) -> CliResult<()> {
    observability::init(&config.log_filter, config.log_format);

    let document = ApiDocument::load(api_path)?;
    let seed = match data_path {
        Some(path) => load_seed(path)?,
        None => Vec::new(),
    };

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async move {
        let store = Arc::new(MemoryDataStore::new());
        if !seed.is_empty() {
            let saved = store.save(seed).await?;
            tracing::info!(event = "SEED_LOADED", resources = saved.len());
        }

        let server = MockServer::new(&document, store, config)?;
        tracing::info!(
            event = "SERVE_STARTING",
            addr = %server.socket_addr(),
            base_path = %document.base_path()
        );

        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Load an API document and print its operations
pub fn check(api_path: &Path) -> CliResult<()> {
    let document = ApiDocument::load(api_path)?;
    write_json(&describe(&document)?)
}

/// Summary of the operations an API document declares
pub fn describe(document: &ApiDocument) -> CliResult<Value> {
    let table = RouteTable::from_document(document)?;
    let operations: Vec<Value> = table
        .routes()
        .iter()
        .map(|route| {
            let (status, response) = route.operation.success_response();
            json!({
                "method": route.method.as_str(),
                "path": format!("{}{}", table.base_path(), route.template.as_str()),
                "operationId": route.operation_id(),
                "queryParameters": route
                    .operation
                    .query_parameters()
                    .map(|p| p.name.as_str())
                    .collect::<Vec<_>>(),
                "status": status,
                "schema": response.map_or(false, |r| r.schema.is_some()),
            })
        })
        .collect();

    Ok(json!({
        "basePath": table.base_path(),
        "operations": operations,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_seed_resources_keep_order() {
        let resources = seed_resources(json!({
            "/api/pets/Fido": {"Name": "Fido"},
            "/api/pets/Polly": {"Name": "Polly"},
            "/api/pets": "root"
        }))
        .unwrap();

        assert_eq!(resources.len(), 3);
        assert_eq!(resources[0].collection, "/api/pets");
        assert_eq!(resources[0].name, "/Fido");
        assert_eq!(resources[2].collection, "/api");
        assert_eq!(resources[2].name, "/pets");
    }

    #[test]
    fn test_seed_trailing_slash_is_root_resource() {
        let resources = seed_resources(json!({
            "/api/pets/": "This is the root resource",
            "/api/pets/Fido": {"Name": "Fido"}
        }))
        .unwrap();

        assert_eq!(resources[0].collection, "/api/pets");
        assert_eq!(resources[0].name, "/");
        assert!(resources[0].is_root());
        assert_eq!(resources[1].collection, "/api/pets");
    }

    #[test]
    fn test_seed_must_be_object() {
        let err = seed_resources(json!([1, 2])).unwrap_err();
        assert_eq!(err.code_str(), "MOCKAPI_CLI_DATA_ERROR");
    }

    #[test]
    fn test_load_config_defaults_and_file() {
        assert_eq!(load_config(None).unwrap().port, 8000);

        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"port": 9100, "log_filter": "debug"}}"#).unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_describe() {
        let document: ApiDocument = serde_json::from_value(json!({
            "basePath": "/api",
            "paths": {
                "/pets": {
                    "get": {
                        "operationId": "findPets",
                        "parameters": [{"name": "Type", "in": "query", "type": "string"}],
                        "responses": {"200": {"schema": {"type": "array"}}}
                    }
                }
            }
        }))
        .unwrap();

        let summary = describe(&document).unwrap();
        assert_eq!(summary["operations"][0]["path"], json!("/api/pets"));
        assert_eq!(summary["operations"][0]["queryParameters"], json!(["Type"]));
        assert_eq!(summary["operations"][0]["schema"], json!(true));
    }
}
