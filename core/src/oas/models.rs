#![deny(missing_docs)]

//! # Contract Models
//!
//! The synthesized contract: schemas, content descriptors and operations.

use crate::type_mapping::Scalar;
use indexmap::IndexMap;
use std::fmt;

/// Prefix of every component reference.
pub const COMPONENTS_PREFIX: &str = "#/components/schemas/";

/// The kind of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    /// An object with named properties or a map.
    Object,
    /// A string.
    String,
    /// An integer.
    Integer,
    /// A boolean.
    Boolean,
    /// A floating point number.
    Number,
    /// An array of `items`.
    Array,
    /// Binary file content.
    File,
    /// A pointer to a component.
    Reference,
}

/// A recursive schema node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// The node kind.
    pub kind: SchemaKind,
    /// The component title, for registered objects.
    pub title: Option<String>,
    /// Named properties of an object, in declaration order.
    pub properties: IndexMap<String, Schema>,
    /// Element schema of an array.
    pub items: Option<Box<Schema>>,
    /// Value schema of a map.
    pub additional_properties: Option<Box<Schema>>,
    /// Title of the referenced component.
    pub reference: Option<String>,
    /// Human readable description.
    pub description: Option<String>,
    /// Format qualifier (`int64`, `double`, `binary`, ...).
    pub format: Option<String>,
}

impl Schema {
    fn of_kind(kind: SchemaKind) -> Self {
        Self {
            kind,
            title: None,
            properties: IndexMap::new(),
            items: None,
            additional_properties: None,
            reference: None,
            description: None,
            format: None,
        }
    }

    /// A titled object with no properties yet.
    pub fn object(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::of_kind(SchemaKind::Object)
        }
    }

    /// An untitled inline object.
    pub fn inline_object() -> Self {
        Self::of_kind(SchemaKind::Object)
    }

    /// A pointer to the component titled `title`.
    pub fn reference(title: impl Into<String>) -> Self {
        Self {
            reference: Some(title.into()),
            ..Self::of_kind(SchemaKind::Reference)
        }
    }

    /// The schema of a scalar.
    pub fn scalar(scalar: Scalar) -> Self {
        let (kind, format) = match scalar {
            Scalar::Boolean => (SchemaKind::Boolean, None),
            Scalar::String => (SchemaKind::String, None),
            Scalar::Int32 => (SchemaKind::Integer, Some("int32")),
            Scalar::Int64 => (SchemaKind::Integer, Some("int64")),
            Scalar::Float32 => (SchemaKind::Number, Some("float")),
            Scalar::Float64 => (SchemaKind::Number, Some("double")),
        };
        Self {
            format: format.map(str::to_string),
            ..Self::of_kind(kind)
        }
    }

    /// Binary file content.
    pub fn file() -> Self {
        Self {
            format: Some("binary".to_string()),
            ..Self::of_kind(SchemaKind::File)
        }
    }

    /// An array of `items`.
    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of_kind(SchemaKind::Array)
        }
    }

    /// A string-keyed map of `value`.
    pub fn map(value: Schema) -> Self {
        Self {
            additional_properties: Some(Box::new(value)),
            ..Self::of_kind(SchemaKind::Object)
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// The `$ref` string for reference nodes.
    pub fn ref_path(&self) -> Option<String> {
        self.reference
            .as_ref()
            .map(|title| format!("{}{}", COMPONENTS_PREFIX, title))
    }

    /// Whether the node carries the binary format marker.
    pub fn is_binary(&self) -> bool {
        self.format.as_deref() == Some("binary")
    }
}

/// The single body encoding chosen for a request or response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentDescriptor {
    /// `application/json`
    Json(Schema),
    /// `application/x-www-form-urlencoded`
    FormUrlEncoded(Schema),
    /// `multipart/form-data`
    Multipart(Schema),
    /// `application/octet-stream`
    Stream(Schema),
}

impl ContentDescriptor {
    /// The media type key.
    pub fn media_type(&self) -> &'static str {
        match self {
            ContentDescriptor::Json(_) => "application/json",
            ContentDescriptor::FormUrlEncoded(_) => "application/x-www-form-urlencoded",
            ContentDescriptor::Multipart(_) => "multipart/form-data",
            ContentDescriptor::Stream(_) => "application/octet-stream",
        }
    }

    /// The body schema.
    pub fn schema(&self) -> &Schema {
        match self {
            ContentDescriptor::Json(s)
            | ContentDescriptor::FormUrlEncoded(s)
            | ContentDescriptor::Multipart(s)
            | ContentDescriptor::Stream(s) => s,
        }
    }
}

/// HTTP verbs an operation can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Lowercase verb, as used for path item keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// A query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Wire name.
    pub name: String,
    /// Value schema.
    pub schema: Schema,
    /// Parameter documentation.
    pub description: Option<String>,
}

/// One synthesized operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDoc {
    /// The verb.
    pub method: HttpMethod,
    /// Query parameters, in declaration order.
    pub parameters: Vec<Parameter>,
    /// The request body, if any parameter produces one.
    pub request_body: Option<ContentDescriptor>,
    /// The `200` response body.
    pub response: ContentDescriptor,
    /// Summary text from the method docs.
    pub summary: String,
}
