//! Type and member descriptors as handed over by the symbol oracle.
//!
//! Everything here deserializes from the JSON surface documents the host
//! produces; nothing is parsed from source text.

use enum_dispatch::enum_dispatch;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::signature::SignatureKey;

pub const OBSOLETE_ATTRIBUTE: &str = "global::System.ObsoleteAttribute";

/// The special type of the underlying type, which drives operator and
/// interface inference.
#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone, Copy, Hash, PartialOrd, Ord, Default)]
pub enum TypeCategory {
    #[serde(rename = "enum")]
    Enum,
    #[serde(rename = "char")]
    Char,
    #[serde(rename = "sbyte")]
    SByte,
    #[serde(rename = "byte")]
    Byte,
    #[serde(rename = "short")]
    Int16,
    #[serde(rename = "int")]
    Int32,
    #[serde(rename = "long")]
    Int64,
    #[serde(rename = "ushort")]
    UInt16,
    #[serde(rename = "uint")]
    UInt32,
    #[serde(rename = "ulong")]
    UInt64,
    #[serde(rename = "decimal")]
    Decimal,
    #[serde(rename = "float")]
    Single,
    #[serde(rename = "double")]
    Double,
    #[serde(rename = "nint")]
    IntPtr,
    #[serde(rename = "nuint")]
    UIntPtr,
    #[serde(rename = "bool")]
    Boolean,
    #[serde(rename = "string")]
    String,
    #[serde(rename = "object")]
    Object,
    #[serde(rename = "delegate")]
    Delegate,
    #[serde(rename = "array")]
    Array,
    /// `IEnumerable`, `IList<T>`, `IReadOnlyCollection<T>` and friends.
    #[serde(rename = "collection")]
    Collection,
    #[serde(rename = "disposable")]
    Disposable,
    #[default]
    #[serde(rename = "other")]
    Other,
}

#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Struct,
    #[default]
    Class,
    Interface,
    Enum,
    Delegate,
    Array,
    Other,
}

#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone)]
pub struct TypeRef {
    /// Fully qualified display name, e.g. `int` or
    /// `global::System.Collections.Generic.List<int>`.
    pub name: String,
    #[serde(default)]
    pub category: TypeCategory,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub is_readonly: bool,
    /// Integral representation, only meaningful for enums.
    #[serde(default)]
    pub enum_underlying: Option<TypeCategory>,
}

impl TypeRef {
    pub fn new<S: AsRef<str>>(name: S, category: TypeCategory, kind: TypeKind) -> Self {
        Self {
            name: name.as_ref().to_string(),
            category,
            kind,
            is_readonly: false,
            enum_underlying: None,
        }
    }
    pub fn is_value_type(&self) -> bool {
        matches!(self.kind, TypeKind::Struct | TypeKind::Enum)
    }
    pub fn is_immutable_value_type(&self) -> bool {
        self.kind == TypeKind::Struct && self.is_readonly
    }
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }
    pub fn is_enum(&self) -> bool {
        self.category == TypeCategory::Enum || self.kind == TypeKind::Enum
    }
    /// Keyword of the enum's integral representation. Enums without one are
    /// treated as `int`, the language default.
    pub fn enum_integral(&self) -> &'static str {
        self.enum_underlying
            .and_then(|c| c.integral_keyword())
            .unwrap_or("int")
    }
}

#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum WrapperKind {
    Struct,
    RefStruct,
    Class,
    RecordStruct,
    RecordClass,
}

impl WrapperKind {
    pub fn is_value_type(self) -> bool {
        matches!(self, Self::Struct | Self::RefStruct | Self::RecordStruct)
    }
    pub fn is_record(self) -> bool {
        matches!(self, Self::RecordStruct | Self::RecordClass)
    }
    pub fn is_ref_only(self) -> bool {
        self == Self::RefStruct
    }
    /// Keywords re-opening the partial declaration.
    pub fn declaration_keywords(self) -> &'static str {
        match self {
            Self::Struct => "partial struct",
            Self::RefStruct => "ref partial struct",
            Self::Class => "partial class",
            Self::RecordStruct => "partial record struct",
            Self::RecordClass => "partial record class",
        }
    }
}

/// Resolved identity of one wrapper declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct WrapSpec {
    /// Simple identifier, e.g. `IntWrapper`.
    pub type_name: String,
    /// `global::`-qualified name without type arguments.
    pub full_type_name: String,
    pub type_parameters: Vec<String>,
    pub kind: WrapperKind,
    pub field_name: String,
    pub is_readonly: bool,
    pub is_sealed: bool,
    pub exclude_converter: bool,
    pub underlying: TypeRef,
}

impl WrapSpec {
    fn type_args(&self) -> String {
        if self.type_parameters.is_empty() {
            String::new()
        } else {
            format!("<{}>", self.type_parameters.join(", "))
        }
    }
    /// `global::NS.Name<T>`
    pub fn qualified_name(&self) -> String {
        format!("{}{}", self.full_type_name, self.type_args())
    }
    /// `Name<T>`, as written in the partial declaration header.
    pub fn declared_name(&self) -> String {
        format!("{}{}", self.type_name, self.type_args())
    }
    /// `global::NS.Name<>`, usable inside `typeof` from an attribute.
    pub fn unbound_name(&self) -> String {
        if self.type_parameters.is_empty() {
            self.full_type_name.clone()
        } else {
            let commas = ",".repeat(self.type_parameters.len() - 1);
            format!("{}<{}>", self.full_type_name, commas)
        }
    }
    pub fn is_wrapper_type(&self, name: &str) -> bool {
        name == self.qualified_name() || name == self.declared_name()
    }
    pub fn is_underlying_type(&self, name: &str) -> bool {
        name == self.underlying.name
    }
    /// Forwarded setters would write through a copy that is thrown away.
    pub fn suppresses_setters(&self) -> bool {
        (self.kind.is_value_type() && self.is_readonly) || self.underlying.is_immutable_value_type()
    }
}

#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    #[default]
    Public,
    Internal,
    Protected,
    ProtectedInternal,
    PrivateProtected,
    Private,
}

#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum RefKind {
    #[default]
    None,
    Ref,
    RefReadonly,
}

impl RefKind {
    pub fn is_ref(self) -> bool {
        self != RefKind::None
    }
    pub fn signature_prefix(self) -> &'static str {
        match self {
            RefKind::None => "",
            RefKind::Ref => "ref ",
            RefKind::RefReadonly => "ref readonly ",
        }
    }
}

#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParamRefKind {
    #[default]
    None,
    Ref,
    Out,
    In,
}

impl ParamRefKind {
    pub fn prefix(self) -> &'static str {
        match self {
            ParamRefKind::None => "",
            ParamRefKind::Ref => "ref ",
            ParamRefKind::Out => "out ",
            ParamRefKind::In => "in ",
        }
    }
}

#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone)]
pub struct MemberHeader {
    pub name: String,
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub ref_kind: RefKind,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub is_implicitly_declared: bool,
    /// Interface this member explicitly implements, fully qualified.
    #[serde(default)]
    pub explicit_interface: Option<String>,
}

impl MemberHeader {
    pub fn new<S: AsRef<str>>(name: S) -> Self {
        Self {
            name: name.as_ref().to_string(),
            accessibility: Accessibility::Public,
            is_static: false,
            ref_kind: RefKind::None,
            deprecated: false,
            attributes: Vec::new(),
            is_implicitly_declared: false,
            explicit_interface: None,
        }
    }
    pub fn is_deprecated(&self) -> bool {
        self.deprecated || self.attributes.iter().any(|a| a == OBSOLETE_ATTRIBUTE)
    }
    pub fn is_public(&self) -> bool {
        self.accessibility == Accessibility::Public
    }
    pub fn is_explicit(&self) -> bool {
        self.explicit_interface.is_some()
    }
    fn key_prefix(&self) -> String {
        self.explicit_interface
            .as_ref()
            .map(|i| format!("{i}."))
            .unwrap_or_default()
    }
}

#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub ref_kind: ParamRefKind,
    #[serde(default)]
    pub attributes: Vec<String>,
}

impl Parameter {
    pub fn new<S: AsRef<str>, T: AsRef<str>>(name: S, ty: T) -> Self {
        Self {
            name: name.as_ref().to_string(),
            ty: ty.as_ref().to_string(),
            ref_kind: ParamRefKind::None,
            attributes: Vec::new(),
        }
    }
}

fn parameter_types(params: &[Parameter]) -> String {
    params
        .iter()
        .map(|p| format!("{}{}", p.ref_kind.prefix(), p.ty))
        .join(", ")
}

#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone, Default)]
#[serde(default)]
pub struct Constraints {
    pub reference_type: bool,
    /// Only meaningful together with `reference_type`: renders `class?`.
    pub nullable_reference_type: bool,
    pub value_type: bool,
    pub unmanaged: bool,
    pub not_null: bool,
    /// Type constraints, already carrying their `?` annotation if any.
    pub types: Vec<String>,
    pub constructor: bool,
}

impl Constraints {
    /// Constraint clauses in the order the language requires them.
    pub fn clauses(&self) -> Vec<String> {
        let mut clauses = Vec::new();
        if self.reference_type {
            clauses.push(if self.nullable_reference_type { "class?" } else { "class" }.to_string());
        }
        if self.value_type {
            clauses.push("struct".to_string());
        }
        if self.unmanaged {
            clauses.push("unmanaged".to_string());
        }
        if self.not_null {
            clauses.push("notnull".to_string());
        }
        clauses.extend(self.types.iter().cloned());
        if self.constructor {
            clauses.push("new()".to_string());
        }
        clauses
    }
}

#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone)]
pub struct TypeParameter {
    pub name: String,
    #[serde(default)]
    pub constraints: Constraints,
}

#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    #[default]
    Ordinary,
    Constructor,
    StaticConstructor,
    Destructor,
    PropertyGet,
    PropertySet,
    EventAdd,
    EventRemove,
    EventRaise,
    ExplicitInterfaceImplementation,
    UserDefinedOperator,
    Conversion,
}

impl MethodKind {
    /// Accessors are reached through their property or event, and
    /// construction belongs to the wrapper itself.
    pub fn is_supported(self) -> bool {
        !matches!(
            self,
            MethodKind::Constructor
                | MethodKind::StaticConstructor
                | MethodKind::Destructor
                | MethodKind::PropertyGet
                | MethodKind::PropertySet
                | MethodKind::EventAdd
                | MethodKind::EventRemove
                | MethodKind::EventRaise
        )
    }
}

const fn yes() -> bool {
    true
}
fn void() -> String {
    "void".to_string()
}

#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone)]
pub struct FieldMember {
    #[serde(flatten)]
    pub header: MemberHeader,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub is_const: bool,
    #[serde(default)]
    pub is_readonly: bool,
}

#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone)]
pub struct PropertyMember {
    #[serde(flatten)]
    pub header: MemberHeader,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub is_indexer: bool,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default = "yes")]
    pub has_getter: bool,
    #[serde(default)]
    pub has_setter: bool,
}

#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone)]
pub struct EventMember {
    #[serde(flatten)]
    pub header: MemberHeader,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone)]
pub struct MethodMember {
    #[serde(flatten)]
    pub header: MemberHeader,
    #[serde(default)]
    pub kind: MethodKind,
    #[serde(default = "void")]
    pub return_type: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default)]
    pub is_readonly: bool,
    /// Kind of the interface member an explicit implementation targets.
    #[serde(default)]
    pub explicit_kind: Option<MethodKind>,
}

impl MethodMember {
    pub fn returns_void(&self) -> bool {
        self.return_type == "void"
    }
    pub fn is_supported(&self) -> bool {
        self.kind.is_supported() && self.explicit_kind.map_or(true, MethodKind::is_supported)
    }
    /// `Equals(object)` and `CompareTo(object)` belong to `object` and the
    /// non-generic interfaces; forwarding them would hide the wrapper's own.
    pub fn is_object_overload(&self) -> bool {
        self.header.is_public()
            && matches!(self.header.name.as_str(), "Equals" | "CompareTo")
            && self.parameters.len() == 1
            && self.parameters[0].ty == "object"
    }
}

#[enum_dispatch]
pub trait Member {
    fn header(&self) -> &MemberHeader;
    /// Canonical owning-type-relative signature used for deduplication.
    fn signature_key(&self) -> SignatureKey;
}

impl Member for FieldMember {
    fn header(&self) -> &MemberHeader {
        &self.header
    }
    fn signature_key(&self) -> SignatureKey {
        format!("{}{}", self.header.key_prefix(), self.header.name).into()
    }
}

impl Member for PropertyMember {
    fn header(&self) -> &MemberHeader {
        &self.header
    }
    fn signature_key(&self) -> SignatureKey {
        let prefix = self.header.key_prefix();
        if self.is_indexer {
            format!("{prefix}this[{}]", parameter_types(&self.parameters)).into()
        } else {
            format!("{prefix}{}", self.header.name).into()
        }
    }
}

impl Member for EventMember {
    fn header(&self) -> &MemberHeader {
        &self.header
    }
    fn signature_key(&self) -> SignatureKey {
        format!("{}{}", self.header.key_prefix(), self.header.name).into()
    }
}

impl Member for MethodMember {
    fn header(&self) -> &MemberHeader {
        &self.header
    }
    fn signature_key(&self) -> SignatureKey {
        let arity = match self.type_parameters.len() {
            0 => String::new(),
            n => format!("`{n}"),
        };
        let key = format!(
            "{}{}{}({})",
            self.header.key_prefix(),
            self.header.name,
            arity,
            parameter_types(&self.parameters)
        );
        // Conversions only differ by their target type.
        if self.kind == MethodKind::Conversion {
            format!("{key}:{}", self.return_type).into()
        } else {
            key.into()
        }
    }
}

#[enum_dispatch(Member)]
#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum MemberDescriptor {
    Field(FieldMember),
    Property(PropertyMember),
    Event(EventMember),
    Method(MethodMember),
}

/// The underlying type together with its member list.
#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone)]
pub struct UnderlyingSurface {
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub members: Vec<MemberDescriptor>,
}
