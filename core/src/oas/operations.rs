#![deny(missing_docs)]

//! # Operation Synthesis
//!
//! Turns model structs into component schemas and service methods into
//! operations. Every named schema goes through the shared registry.
//!
//! Callers must validate methods first: with more than one body parameter the
//! later one silently replaces the earlier content descriptor.

use crate::config::PropertyCase;
use crate::error::{AppError, AppResult, DeclKind};
use crate::oas::models::{ContentDescriptor, HttpMethod, OperationDoc, Parameter, Schema};
use crate::oas::registry::ComponentRegistry;
use crate::oas::schemas::{schema_of, struct_schema};
use crate::parser::models::{MethodDecl, ParamDecl, StructDecl};

/// Builds schemas and operations into one registry.
pub struct Synthesizer<'a> {
    registry: &'a mut ComponentRegistry,
    case: PropertyCase,
    warnings: Vec<AppError>,
}

impl<'a> Synthesizer<'a> {
    /// Creates a synthesizer writing into `registry`.
    pub fn new(registry: &'a mut ComponentRegistry, case: PropertyCase) -> Self {
        Self {
            registry,
            case,
            warnings: Vec::new(),
        }
    }

    /// Registers the component schema of a flattened struct.
    pub fn register_struct(&mut self, decl: &StructDecl) -> AppResult<()> {
        let schema = struct_schema(decl, self.case)?;
        self.register(schema);
        Ok(())
    }

    /// Synthesizes the operation for `method` bound to `verb`.
    pub fn operation(
        &mut self,
        method: &MethodDecl,
        verb: HttpMethod,
    ) -> AppResult<OperationDoc> {
        let all_simple = method
            .params
            .iter()
            .all(|p| p.ty.is_builtin() || p.ty.is_ignored());

        let (parameters, request_body) = if verb == HttpMethod::Post && all_simple {
            (Vec::new(), Some(self.form_body(method)?))
        } else {
            self.split_params(method)?
        };

        Ok(OperationDoc {
            method: verb,
            parameters,
            request_body,
            response: self.response(method)?,
            summary: method.summary(),
        })
    }

    /// Duplicate-title diagnostics raised so far.
    pub fn into_warnings(self) -> Vec<AppError> {
        self.warnings
    }

    fn register(&mut self, schema: Schema) {
        let title = schema.title.clone().unwrap_or_default();
        if self.registry.register(schema).is_some() {
            tracing::warn!("Schema `{}` registered twice, later definition wins", title);
            self.warnings.push(AppError::DuplicateDeclaration {
                kind: DeclKind::Schema,
                name: title,
            });
        }
    }

    /// POST with only builtin parameters: one urlencoded `<Method>Req` object.
    fn form_body(&mut self, method: &MethodDecl) -> AppResult<ContentDescriptor> {
        let title = format!("{}Req", method.name);
        let mut req = Schema::object(title.clone());
        for param in &method.params {
            if let Some(schema) = self.param_schema(method, param)? {
                req.properties.insert(self.case.apply(&param.name), schema);
            }
        }
        self.register(req);
        Ok(ContentDescriptor::FormUrlEncoded(Schema::reference(title)))
    }

    fn split_params(
        &mut self,
        method: &MethodDecl,
    ) -> AppResult<(Vec<Parameter>, Option<ContentDescriptor>)> {
        let mut parameters = Vec::new();
        let mut body: Option<ContentDescriptor> = None;

        for param in &method.params {
            let Some(schema) = self.param_schema(method, param)? else {
                continue;
            };
            let name = self.case.apply(&param.name);

            if param.ty.is_file() {
                match &mut body {
                    Some(ContentDescriptor::Multipart(form)) => {
                        form.properties.insert(name, schema);
                    }
                    _ => {
                        let mut form = Schema::inline_object();
                        form.properties.insert(name, schema);
                        body = Some(ContentDescriptor::Multipart(form));
                    }
                }
            } else if param.ty.is_builtin() {
                parameters.push(Parameter {
                    name,
                    description: schema.description.clone(),
                    schema: schema.with_description(None),
                });
            } else {
                body = Some(ContentDescriptor::Json(schema));
            }
        }

        Ok((parameters, body))
    }

    fn response(&mut self, method: &MethodDecl) -> AppResult<ContentDescriptor> {
        if let Some(stream) = method.results.iter().find(|r| r.ty.is_stream()) {
            return Ok(ContentDescriptor::Stream(
                Schema::file().with_description(stream.description()),
            ));
        }

        let title = format!("{}Resp", method.name);
        let mut resp = Schema::object(title.clone());
        for result in &method.results {
            if let Some(schema) = self.param_schema(method, result)? {
                resp.properties.insert(self.case.apply(result.key()), schema);
            }
        }
        self.register(resp);
        Ok(ContentDescriptor::Json(Schema::reference(title)))
    }

    fn param_schema(
        &self,
        method: &MethodDecl,
        param: &ParamDecl,
    ) -> AppResult<Option<Schema>> {
        Ok(schema_of(&param.ty, &method.name, param.key())?
            .map(|schema| schema.with_description(param.description())))
    }
}
