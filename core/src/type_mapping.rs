#![deny(missing_docs)]

//! # Type Mapping
//!
//! Classifies a textual Rust type signature into the schema taxonomy.
//! Pointer-like wrappers (`&T`, `Box<T>`, `Option<T>`, ...) are stripped before
//! the base type is examined, so `Option<i32>` classifies exactly like `i32`.
//!
//! Classification is total: anything unrecognised becomes a named object.

use crate::config::Conventions;
use ra_ap_edition::Edition;
use ra_ap_syntax::ast::{self, HasGenericArgs};
use ra_ap_syntax::{AstNode, SourceFile};

const POINTERS: &[&str] = &["Box", "Option", "Rc", "Arc", "Cow"];
const SEQUENCES: &[&str] = &["Vec", "VecDeque", "HashSet", "BTreeSet", "IndexSet"];
const MAPS: &[&str] = &["HashMap", "BTreeMap", "IndexMap"];

/// Builtin scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    /// `bool`
    Boolean,
    /// `String`, `str`, `char`
    String,
    /// 32-bit and narrower integers.
    Int32,
    /// 64-bit and wider integers.
    Int64,
    /// `f32`
    Float32,
    /// `f64`
    Float64,
}

impl Scalar {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "bool" => Some(Scalar::Boolean),
            "String" | "str" | "char" => Some(Scalar::String),
            "i8" | "i16" | "i32" | "u8" | "u16" | "u32" => Some(Scalar::Int32),
            "i64" | "u64" | "i128" | "u128" | "isize" | "usize" => Some(Scalar::Int64),
            "f32" => Some(Scalar::Float32),
            "f64" => Some(Scalar::Float64),
            _ => None,
        }
    }
}

/// The taxonomy every type signature maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeClass {
    /// A scalar, or a one-dimensional array of scalars.
    Builtin {
        /// The scalar kind.
        scalar: Scalar,
        /// Whether this is an array of `scalar`.
        array: bool,
    },
    /// An uploaded file or file stream.
    File,
    /// An array of files.
    FileArray,
    /// A string-keyed map with the given value shape.
    MapOf(Box<TypeClass>),
    /// An array of anything that is not a scalar or a file.
    ArrayOf(Box<TypeClass>),
    /// A reference to a named type.
    NamedObject(String),
    /// A tuple or other structure without a name. Never representable.
    AnonymousStructure,
    /// The request-scoped context marker.
    ContextMarker,
    /// `()`. Carries no value and is skipped like the context marker.
    Unit,
}

impl TypeClass {
    /// Scalars and scalar arrays.
    pub fn is_builtin(&self) -> bool {
        matches!(self, TypeClass::Builtin { .. })
    }

    fn array_of(inner: TypeClass) -> TypeClass {
        match inner {
            TypeClass::Builtin {
                scalar,
                array: false,
            } => TypeClass::Builtin {
                scalar,
                array: true,
            },
            TypeClass::File => TypeClass::FileArray,
            TypeClass::AnonymousStructure => TypeClass::AnonymousStructure,
            other => TypeClass::ArrayOf(Box::new(other)),
        }
    }

    fn map_of(key: TypeClass, value: TypeClass) -> TypeClass {
        if key == TypeClass::AnonymousStructure || value == TypeClass::AnonymousStructure {
            TypeClass::AnonymousStructure
        } else {
            TypeClass::MapOf(Box::new(value))
        }
    }
}

/// A classified type signature. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    raw: String,
    class: TypeClass,
    base: String,
    pointer: bool,
    map_key: Option<String>,
    stream: bool,
}

impl TypeRef {
    /// Classifies `raw` under the given conventions.
    ///
    /// # Examples
    /// ```
    /// use svcdoc_core::config::Conventions;
    /// use svcdoc_core::type_mapping::{Scalar, TypeClass, TypeRef};
    ///
    /// let conventions = Conventions::default();
    /// let ty = TypeRef::classify("Option<Vec<i64>>", &conventions);
    /// assert!(ty.is_pointer());
    /// assert_eq!(ty.class(), &TypeClass::Builtin { scalar: Scalar::Int64, array: true });
    /// ```
    pub fn classify(raw: &str, conventions: &Conventions) -> Self {
        let raw = normalize_signature(raw);
        let Some(root) = parse_type(&raw) else {
            return Self::fallback(raw);
        };

        let classifier = Classifier { conventions };
        let (top, pointer) = strip_pointers(root.clone());
        let map_key =
            map_args(&top).map(|(key, _)| normalize_signature(&key.syntax().text().to_string()));

        let mut base = String::new();
        let class = classifier.classify(&root, &mut base);
        let stream = class == TypeClass::File && conventions.is_stream(&base);

        Self {
            raw,
            class,
            base,
            pointer,
            map_key,
            stream,
        }
    }

    fn fallback(raw: String) -> Self {
        Self {
            class: TypeClass::NamedObject(raw.clone()),
            base: raw.clone(),
            raw,
            pointer: false,
            map_key: None,
            stream: false,
        }
    }

    /// The normalized textual signature.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The taxonomy entry.
    pub fn class(&self) -> &TypeClass {
        &self.class
    }

    /// The innermost unqualified type name (`Vec<crate::vo::User>` -> `User`).
    pub fn base_name(&self) -> &str {
        &self.base
    }

    /// Whether the outermost layer is a pointer-like wrapper.
    pub fn is_pointer(&self) -> bool {
        self.pointer
    }

    /// Whether the type is a slice, array or sequence collection.
    pub fn is_array(&self) -> bool {
        matches!(
            self.class,
            TypeClass::Builtin { array: true, .. } | TypeClass::FileArray | TypeClass::ArrayOf(_)
        )
    }

    /// Whether the type is a map.
    pub fn is_map(&self) -> bool {
        matches!(self.class, TypeClass::MapOf(_))
    }

    /// The textual key type for maps.
    pub fn map_key(&self) -> Option<&str> {
        self.map_key.as_deref()
    }

    /// The element classification for arrays.
    pub fn element_type(&self) -> Option<TypeClass> {
        match &self.class {
            TypeClass::Builtin {
                scalar,
                array: true,
            } => Some(TypeClass::Builtin {
                scalar: *scalar,
                array: false,
            }),
            TypeClass::FileArray => Some(TypeClass::File),
            TypeClass::ArrayOf(inner) => Some((**inner).clone()),
            _ => None,
        }
    }

    /// Scalars and scalar arrays.
    pub fn is_builtin(&self) -> bool {
        self.class.is_builtin()
    }

    /// Files and file arrays.
    pub fn is_file(&self) -> bool {
        matches!(self.class, TypeClass::File | TypeClass::FileArray)
    }

    /// A single downloadable file stream.
    pub fn is_stream(&self) -> bool {
        self.stream
    }

    /// The context marker.
    pub fn is_context(&self) -> bool {
        self.class == TypeClass::ContextMarker
    }

    /// Tuple and other unnamed aggregates.
    pub fn is_anonymous(&self) -> bool {
        self.class == TypeClass::AnonymousStructure
    }

    /// The unit type `()`.
    pub fn is_unit(&self) -> bool {
        self.class == TypeClass::Unit
    }

    /// Types that never reach the wire: the context marker and `()`.
    pub fn is_ignored(&self) -> bool {
        matches!(self.class, TypeClass::ContextMarker | TypeClass::Unit)
    }
}

struct Classifier<'a> {
    conventions: &'a Conventions,
}

impl Classifier<'_> {
    fn classify(&self, ty: &ast::Type, base: &mut String) -> TypeClass {
        match ty {
            ast::Type::RefType(r) => self.inner(ty, r.ty(), base),
            ast::Type::PtrType(p) => self.inner(ty, p.ty(), base),
            ast::Type::ParenType(p) => self.inner(ty, p.ty(), base),
            ast::Type::SliceType(s) => TypeClass::array_of(self.inner(ty, s.ty(), base)),
            ast::Type::ArrayType(a) => TypeClass::array_of(self.inner(ty, a.ty(), base)),
            ast::Type::TupleType(t) if t.fields().next().is_none() => TypeClass::Unit,
            ast::Type::TupleType(_) => TypeClass::AnonymousStructure,
            ast::Type::PathType(p) => self.classify_path(ty, p, base),
            other => named(other, base),
        }
    }

    fn inner(&self, outer: &ast::Type, inner: Option<ast::Type>, base: &mut String) -> TypeClass {
        match inner {
            Some(t) => self.classify(&t, base),
            None => named(outer, base),
        }
    }

    fn classify_path(&self, ty: &ast::Type, p: &ast::PathType, base: &mut String) -> TypeClass {
        let Some(segment) = p.path().and_then(|path| path.segment()) else {
            return named(ty, base);
        };
        let Some(name_ref) = segment.name_ref() else {
            return named(ty, base);
        };
        let name = name_ref.text().as_str().to_string();
        let args = type_args(&segment);

        match (name.as_str(), args.as_slice()) {
            (n, [inner]) if POINTERS.contains(&n) => self.classify(inner, base),
            (n, [inner]) if SEQUENCES.contains(&n) => {
                TypeClass::array_of(self.classify(inner, base))
            }
            (n, [key, value]) if MAPS.contains(&n) => {
                let mut key_base = String::new();
                let key = self.classify(key, &mut key_base);
                TypeClass::map_of(key, self.classify(value, base))
            }
            (n, _) => {
                *base = n.to_string();
                if self.conventions.is_context(n) {
                    TypeClass::ContextMarker
                } else if self.conventions.is_file(n) {
                    TypeClass::File
                } else if let Some(scalar) = Scalar::from_name(n) {
                    TypeClass::Builtin {
                        scalar,
                        array: false,
                    }
                } else {
                    TypeClass::NamedObject(n.to_string())
                }
            }
        }
    }
}

fn named(ty: &ast::Type, base: &mut String) -> TypeClass {
    *base = normalize_signature(&ty.syntax().text().to_string());
    TypeClass::NamedObject(base.clone())
}

fn type_args(segment: &ast::PathSegment) -> Vec<ast::Type> {
    segment
        .generic_arg_list()
        .map(|list| {
            list.generic_args()
                .filter_map(|arg| match arg {
                    ast::GenericArg::TypeArg(t) => t.ty(),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Peels reference, raw-pointer, parenthesis and smart-pointer layers.
fn strip_pointers(mut ty: ast::Type) -> (ast::Type, bool) {
    let mut pointer = false;
    loop {
        let next = match &ty {
            ast::Type::RefType(r) => r.ty(),
            ast::Type::PtrType(p) => p.ty(),
            ast::Type::ParenType(p) => p.ty(),
            ast::Type::PathType(p) => p
                .path()
                .and_then(|path| path.segment())
                .filter(|seg| {
                    seg.name_ref()
                        .is_some_and(|n| POINTERS.contains(&n.text().as_str()))
                })
                .and_then(|seg| match type_args(&seg).as_slice() {
                    [inner] => Some(inner.clone()),
                    _ => None,
                }),
            _ => None,
        };
        match next {
            Some(inner) => {
                pointer = true;
                ty = inner;
            }
            None => return (ty, pointer),
        }
    }
}

fn map_args(ty: &ast::Type) -> Option<(ast::Type, ast::Type)> {
    let ast::Type::PathType(p) = ty else {
        return None;
    };
    let segment = p.path()?.segment()?;
    if !MAPS.contains(&segment.name_ref()?.text().as_str()) {
        return None;
    }
    match type_args(&segment).as_slice() {
        [key, value] => Some((key.clone(), value.clone())),
        _ => None,
    }
}

fn parse_type(raw: &str) -> Option<ast::Type> {
    // Wrap in a type alias so the parser accepts a bare type.
    let code = format!("type _Wrapper = {};", raw);
    let parse = SourceFile::parse(&code, Edition::Edition2021);
    if !parse.errors().is_empty() {
        return None;
    }
    parse
        .tree()
        .syntax()
        .descendants()
        .find_map(ast::TypeAlias::cast)?
        .ty()
}

/// Collapses whitespace so signatures compare textually.
///
/// Whitespace survives only between two identifier characters (`dyn Trait`).
pub fn normalize_signature(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;
    for c in raw.trim().chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            let prev_word = out.chars().last().is_some_and(is_word_char);
            if prev_word && is_word_char(c) {
                out.push(' ');
            }
            pending_space = false;
        }
        out.push(c);
    }
    out
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
