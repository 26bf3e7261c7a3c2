use serde::Serialize;

use crate::model::{EventMember, FieldMember, Member, MemberDescriptor, MethodMember, PropertyMember, WrapSpec};
use crate::operators::OperatorKind;
use crate::signature::SignatureKey;

#[derive(Serialize, PartialEq, Eq, Debug, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum InterfaceKind {
    Equatable,
    Comparable,
}

impl InterfaceKind {
    pub fn generic_name(self) -> &'static str {
        match self {
            InterfaceKind::Equatable => "global::System.IEquatable",
            InterfaceKind::Comparable => "global::System.IComparable",
        }
    }
}

#[derive(Serialize, PartialEq, Eq, Debug, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum SpecialMethod {
    CompareTo,
    Equals,
    GetHashCode,
    ToString,
}

impl SpecialMethod {
    pub fn name(self) -> &'static str {
        match self {
            SpecialMethod::CompareTo => "CompareTo",
            SpecialMethod::Equals => "Equals",
            SpecialMethod::GetHashCode => "GetHashCode",
            SpecialMethod::ToString => "ToString",
        }
    }
    /// Zero-argument `object` overrides only.
    pub fn from_override_name(name: &str) -> Option<Self> {
        match name {
            "GetHashCode" => Some(SpecialMethod::GetHashCode),
            "ToString" => Some(SpecialMethod::ToString),
            _ => None,
        }
    }
}

/// How a derived `Equals(W)` compares the backing values.
#[derive(Serialize, PartialEq, Eq, Debug, Clone, Copy)]
pub enum EqualsBody {
    Operator,
    Method,
}

#[derive(Serialize, PartialEq, Eq, Debug, Clone)]
pub enum Shape {
    Wrapper,
    Raw(String),
}

impl Shape {
    pub fn raw<S: AsRef<str>>(ty: S) -> Self {
        Shape::Raw(ty.as_ref().to_string())
    }
    pub fn is_wrapper(&self) -> bool {
        matches!(self, Shape::Wrapper)
    }
}

#[derive(Serialize, PartialEq, Eq, Debug, Clone)]
pub struct OperatorPlan {
    pub kind: OperatorKind,
    pub args: Vec<Shape>,
    pub ret: Shape,
}

#[derive(Serialize, PartialEq, Eq, Debug, Clone, Copy)]
pub enum SkipReason {
    Deprecated,
    Inaccessible,
    Conflict,
    UnsupportedKind,
    ObjectOverload,
    FoldedOperator,
    OperatorShaped,
    RefStructInterface,
}

#[derive(Serialize, PartialEq, Eq, Debug, Clone)]
pub struct SkippedMember {
    pub key: SignatureKey,
    pub reason: SkipReason,
}

#[derive(Serialize, PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct ConversionPlan {
    pub from_underlying: bool,
    pub to_underlying: bool,
}

/// Everything the emitter needs to know about one wrapper.
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    pub spec: WrapSpec,
    pub declare_field: bool,
    pub declare_constructor: bool,
    pub fields: Vec<FieldMember>,
    pub properties: Vec<PropertyMember>,
    pub events: Vec<EventMember>,
    pub methods: Vec<MethodMember>,
    /// Interfaces whose members are forwarded explicitly, in first-seen order.
    pub explicit_interfaces: Vec<String>,
    pub implement_interfaces: Vec<InterfaceKind>,
    pub ignore_interfaces: Vec<InterfaceKind>,
    pub special_methods: Vec<SpecialMethod>,
    pub equals_body: EqualsBody,
    /// Poisoned `object` overrides for ref structs the user has not written.
    pub ref_struct_stubs: Vec<SpecialMethod>,
    pub conversions: ConversionPlan,
    pub operators: Vec<OperatorPlan>,
    /// Asymmetric `W - integral` operator for enums, emitted after the table.
    pub enum_offset_operator: Option<OperatorPlan>,
    pub bridge: bool,
    pub skipped: Vec<SkippedMember>,
}

impl GenerationPlan {
    pub fn implements(&self, kind: InterfaceKind) -> bool {
        self.implement_interfaces.contains(&kind)
    }
    pub fn derives(&self, method: SpecialMethod) -> bool {
        self.special_methods.contains(&method)
    }
    pub fn has_operator(&self, kind: OperatorKind) -> bool {
        self.operators.iter().any(|o| o.kind == kind)
    }
    /// Keys of every forwarded member, in emission order.
    pub fn signature_keys(&self) -> Vec<SignatureKey> {
        let fields = self.fields.iter().cloned().map(MemberDescriptor::from);
        let properties = self.properties.iter().cloned().map(MemberDescriptor::from);
        let events = self.events.iter().cloned().map(MemberDescriptor::from);
        let methods = self.methods.iter().cloned().map(MemberDescriptor::from);
        fields
            .chain(properties)
            .chain(events)
            .chain(methods)
            .map(|m| m.signature_key())
            .collect()
    }
}
