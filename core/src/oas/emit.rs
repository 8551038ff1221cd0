#![deny(missing_docs)]

//! # Document Emission
//!
//! Renders an `ApiDocument` as an OpenAPI 3.0 JSON value, string or YAML.

use crate::error::{AppError, AppResult};
use crate::oas::document::ApiDocument;
use crate::oas::models::{ContentDescriptor, OperationDoc, Parameter, Schema, SchemaKind};
use serde_json::{json, Map, Value};

/// Output encodings of a rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

impl OutputFormat {
    /// Picks YAML for `.yaml`/`.yml` extensions, JSON otherwise.
    pub fn from_extension(ext: Option<&str>) -> Self {
        match ext.map(str::to_ascii_lowercase).as_deref() {
            Some("yaml") | Some("yml") => OutputFormat::Yaml,
            _ => OutputFormat::Json,
        }
    }
}

/// Renders `doc` in the requested format.
pub fn render(doc: &ApiDocument, format: OutputFormat) -> AppResult<String> {
    let value = document_value(doc);
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&value)
            .map_err(|e| AppError::General(format!("Failed to serialize JSON: {}", e))),
        OutputFormat::Yaml => serde_yaml::to_string(&value)
            .map_err(|e| AppError::General(format!("Failed to serialize YAML: {}", e))),
    }
}

/// The full OpenAPI object.
pub fn document_value(doc: &ApiDocument) -> Value {
    let mut paths = Map::new();
    for (path, operation) in &doc.paths {
        let mut item = Map::new();
        item.insert(
            operation.method.as_str().to_string(),
            operation_value(operation),
        );
        paths.insert(path.clone(), Value::Object(item));
    }

    let mut schemas = Map::new();
    for (title, schema) in doc.components.iter() {
        schemas.insert(title.clone(), schema_value(schema));
    }

    let mut root = Map::new();
    root.insert("openapi".to_string(), json!(doc.openapi));
    root.insert(
        "info".to_string(),
        json!({ "title": doc.title, "version": doc.version }),
    );
    root.insert("paths".to_string(), Value::Object(paths));
    root.insert("components".to_string(), json!({ "schemas": schemas }));
    Value::Object(root)
}

/// One operation object.
pub fn operation_value(operation: &OperationDoc) -> Value {
    let mut op = Map::new();
    if !operation.summary.is_empty() {
        op.insert("summary".to_string(), json!(operation.summary));
    }
    if !operation.parameters.is_empty() {
        let params: Vec<Value> = operation.parameters.iter().map(parameter_value).collect();
        op.insert("parameters".to_string(), Value::Array(params));
    }
    if let Some(body) = &operation.request_body {
        op.insert(
            "requestBody".to_string(),
            json!({ "content": content_value(body), "required": true }),
        );
    }
    op.insert(
        "responses".to_string(),
        json!({
            "200": {
                "description": "OK",
                "content": content_value(&operation.response),
            }
        }),
    );
    Value::Object(op)
}

fn parameter_value(param: &Parameter) -> Value {
    let mut obj = Map::new();
    obj.insert("name".to_string(), json!(param.name));
    obj.insert("in".to_string(), json!("query"));
    if let Some(desc) = &param.description {
        obj.insert("description".to_string(), json!(desc));
    }
    obj.insert("schema".to_string(), schema_value(&param.schema));
    Value::Object(obj)
}

fn content_value(content: &ContentDescriptor) -> Value {
    let mut obj = Map::new();
    obj.insert(
        content.media_type().to_string(),
        json!({ "schema": schema_value(content.schema()) }),
    );
    Value::Object(obj)
}

/// One schema node. References render as a bare `$ref`.
pub fn schema_value(schema: &Schema) -> Value {
    if let Some(path) = schema.ref_path() {
        return json!({ "$ref": path });
    }

    let mut obj = Map::new();
    let ty = match schema.kind {
        SchemaKind::Object => "object",
        SchemaKind::String | SchemaKind::File => "string",
        SchemaKind::Integer => "integer",
        SchemaKind::Boolean => "boolean",
        SchemaKind::Number => "number",
        SchemaKind::Array => "array",
        SchemaKind::Reference => "object",
    };
    obj.insert("type".to_string(), json!(ty));
    if let Some(title) = &schema.title {
        obj.insert("title".to_string(), json!(title));
    }
    if let Some(format) = &schema.format {
        obj.insert("format".to_string(), json!(format));
    }
    if let Some(desc) = &schema.description {
        obj.insert("description".to_string(), json!(desc));
    }
    if let Some(items) = &schema.items {
        obj.insert("items".to_string(), schema_value(items));
    }
    if !schema.properties.is_empty() {
        let mut props = Map::new();
        for (name, prop) in &schema.properties {
            props.insert(name.clone(), schema_value(prop));
        }
        obj.insert("properties".to_string(), Value::Object(props));
    }
    if let Some(value) = &schema.additional_properties {
        obj.insert("additionalProperties".to_string(), schema_value(value));
    }
    Value::Object(obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::models::HttpMethod;
    use crate::oas::registry::ComponentRegistry;
    use crate::parser::models::InterfaceDecl;
    use crate::type_mapping::Scalar;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn document() -> ApiDocument {
        let contract = InterfaceDecl {
            name: "Usersvc".into(),
            methods: Vec::new(),
            package: "service".into(),
            docs: Vec::new(),
        };
        let mut registry = ComponentRegistry::new();
        let mut resp = Schema::object("GetUserResp");
        resp.properties
            .insert("user".into(), Schema::reference("User"));
        registry.register(resp);

        let at = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let mut doc = ApiDocument::new(&contract, registry, at);
        doc.insert_operation(
            "/usersvc/user",
            OperationDoc {
                method: HttpMethod::Get,
                parameters: vec![Parameter {
                    name: "userId".into(),
                    schema: Schema::scalar(Scalar::Int64),
                    description: Some("Primary key".into()),
                }],
                request_body: None,
                response: ContentDescriptor::Json(Schema::reference("GetUserResp")),
                summary: "Get a user".into(),
            },
        );
        doc
    }

    #[test]
    fn test_document_value() {
        let value = document_value(&document());
        let expected = json!({
            "openapi": "3.0.2",
            "info": { "title": "Usersvc", "version": "v20240102030405" },
            "paths": {
                "/usersvc/user": {
                    "get": {
                        "summary": "Get a user",
                        "parameters": [{
                            "name": "userId",
                            "in": "query",
                            "description": "Primary key",
                            "schema": { "type": "integer", "format": "int64" }
                        }],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/GetUserResp" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "GetUserResp": {
                        "type": "object",
                        "title": "GetUserResp",
                        "properties": {
                            "user": { "$ref": "#/components/schemas/User" }
                        }
                    }
                }
            }
        });
        assert_eq!(value, expected);
    }

    #[test]
    fn test_request_body_is_required() {
        let op = OperationDoc {
            method: HttpMethod::Post,
            parameters: Vec::new(),
            request_body: Some(ContentDescriptor::FormUrlEncoded(Schema::reference(
                "PostLoginReq",
            ))),
            response: ContentDescriptor::Stream(Schema::file()),
            summary: String::new(),
        };
        let value = operation_value(&op);
        assert_eq!(value["requestBody"]["required"], json!(true));
        assert!(value["requestBody"]["content"]["application/x-www-form-urlencoded"].is_object());
        assert_eq!(
            value["responses"]["200"]["content"]["application/octet-stream"]["schema"],
            json!({ "type": "string", "format": "binary" })
        );
        assert!(value.get("summary").is_none());
    }

    #[test]
    fn test_maps_and_arrays() {
        let map = Schema::map(Schema::array(Schema::scalar(Scalar::Float32)));
        assert_eq!(
            schema_value(&map),
            json!({
                "type": "object",
                "additionalProperties": {
                    "type": "array",
                    "items": { "type": "number", "format": "float" }
                }
            })
        );
    }

    #[test]
    fn test_property_order_is_preserved() {
        let mut schema = Schema::object("Ordered");
        for key in ["zeta", "alpha", "mid"] {
            schema
                .properties
                .insert(key.into(), Schema::scalar(Scalar::Boolean));
        }
        let rendered = serde_json::to_string(&schema_value(&schema)).unwrap();
        let zeta = rendered.find("zeta").unwrap();
        let alpha = rendered.find("alpha").unwrap();
        assert!(zeta < alpha);
    }

    #[test]
    fn test_render_formats() {
        let doc = document();
        let json = render(&doc, OutputFormat::Json).unwrap();
        assert!(json.contains("\"openapi\": \"3.0.2\""));
        let yaml = render(&doc, OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("openapi:"));
        assert!(yaml.contains("title: Usersvc"));
        assert_eq!(OutputFormat::from_extension(Some("YML")), OutputFormat::Yaml);
        assert_eq!(OutputFormat::from_extension(None), OutputFormat::Json);
    }
}
