//! Surface analysis: decides which members of the underlying type a wrapper
//! forwards, which operators and capability interfaces it gets, and which
//! `object` methods it derives.

use std::collections::BTreeSet;

use common::MyResult;
use log::debug;
use simple_error::simple_error;

use crate::model::{Member, MemberDescriptor, MethodKind, MethodMember, UnderlyingSurface, WrapSpec, WrapperKind};
use crate::operators::{OperatorKind, OperatorSet};
use crate::plan::{
    ConversionPlan, EqualsBody, GenerationPlan, InterfaceKind, OperatorPlan, Shape, SkipReason, SkippedMember,
    SpecialMethod,
};
use crate::signature::{ConflictSet, SignatureKey};

const OBJECT_EQUALS: &str = "Equals(object)";

/// What the user already wrote on the wrapper.
#[derive(Debug)]
pub struct HandAuthored {
    pub conflicts: ConflictSet,
    pub field_declared: bool,
    pub constructor_declared: bool,
    pub suppressed_specials: BTreeSet<SpecialMethod>,
    pub ignore_interfaces: BTreeSet<InterfaceKind>,
    pub ignore_operators: OperatorSet,
    pub from_underlying_declared: bool,
    pub to_underlying_declared: bool,
}

impl HandAuthored {
    pub fn scan(spec: &WrapSpec, own: &[MemberDescriptor]) -> Self {
        let mut field_declared = false;
        let mut constructor_declared = false;
        let mut suppressed_specials = BTreeSet::new();
        let mut ignore_interfaces = BTreeSet::new();
        let mut ignore_operators = OperatorSet::new();
        let mut from_underlying_declared = false;
        let mut to_underlying_declared = false;
        let mut keys = Vec::with_capacity(own.len());

        for member in own {
            match member {
                MemberDescriptor::Field(field) => {
                    if !spec.kind.is_record() && field.header.name == spec.field_name && spec.is_underlying_type(&field.ty)
                    {
                        field_declared = true;
                    }
                }
                MemberDescriptor::Method(method) => {
                    if method.kind == MethodKind::Constructor
                        && !method.header.is_static
                        && method.parameters.len() == 1
                        && spec.is_underlying_type(&method.parameters[0].ty)
                    {
                        constructor_declared = true;
                    }
                    if !method.kind.is_supported() {
                        continue;
                    }
                    scan_method(
                        spec,
                        method,
                        &mut suppressed_specials,
                        &mut ignore_interfaces,
                        &mut ignore_operators,
                    );
                    if method.kind == MethodKind::Conversion && method.parameters.len() == 1 {
                        let param = &method.parameters[0].ty;
                        if spec.is_underlying_type(param) && spec.is_wrapper_type(&method.return_type) {
                            from_underlying_declared = true;
                        }
                        if spec.is_wrapper_type(param) && spec.is_underlying_type(&method.return_type) {
                            to_underlying_declared = true;
                        }
                    }
                }
                _ => {}
            }
            keys.push(member.signature_key());
        }

        // The compiler synthesizes equality operators for records.
        if spec.kind.is_record() {
            ignore_operators.extend([OperatorKind::Equal, OperatorKind::NotEqual]);
        }

        Self {
            conflicts: keys.into_iter().collect(),
            field_declared,
            constructor_declared,
            suppressed_specials,
            ignore_interfaces,
            ignore_operators,
            from_underlying_declared,
            to_underlying_declared,
        }
    }
}

fn scan_method(
    spec: &WrapSpec,
    method: &MethodMember,
    suppressed_specials: &mut BTreeSet<SpecialMethod>,
    ignore_interfaces: &mut BTreeSet<InterfaceKind>,
    ignore_operators: &mut OperatorSet,
) {
    if method.header.is_implicitly_declared {
        return;
    }
    if !method.header.is_static {
        match method.parameters.as_slice() {
            [] => suppressed_specials.extend(SpecialMethod::from_override_name(&method.header.name)),
            [only] if spec.is_wrapper_type(&only.ty) => match method.header.name.as_str() {
                "Equals" => {
                    ignore_interfaces.insert(InterfaceKind::Equatable);
                }
                "CompareTo" => {
                    ignore_interfaces.insert(InterfaceKind::Comparable);
                }
                _ => {}
            },
            _ => {}
        }
    } else if let Some(kind) = OperatorKind::from_method(&method.header.name, method.return_type == "bool") {
        ignore_operators.insert(kind);
    }
}

/// Operator participation and explicitly observed shapes.
struct OperatorTable {
    participating: OperatorSet,
    explicit: Vec<OperatorPlan>,
    has_defaults: bool,
}

impl OperatorTable {
    fn new(spec: &WrapSpec) -> Self {
        let participating = spec.underlying.category.default_operators();
        let has_defaults = !participating.is_empty();
        Self {
            participating,
            explicit: Vec::new(),
            has_defaults,
        }
    }

    /// Returns false when the method is not operator-shaped at all.
    fn fold(&mut self, spec: &WrapSpec, method: &MethodMember) -> bool {
        if !method.header.is_static {
            return false;
        }
        let kind = match OperatorKind::from_method(&method.header.name, method.return_type == "bool") {
            Some(kind) => kind,
            None => return false,
        };
        if !self.has_defaults {
            self.participating.insert(kind);
        }
        let known = self.explicit.iter().any(|o| o.kind == kind);
        if self.participating.contains(&kind) && !known && method.parameters.len() == kind.arity() {
            let args = method
                .parameters
                .iter()
                .map(|p| {
                    if spec.is_underlying_type(&p.ty) {
                        Shape::Wrapper
                    } else {
                        Shape::raw(&p.ty)
                    }
                })
                .collect();
            let ret = if !kind.returns_raw_bool() && spec.is_underlying_type(&method.return_type) {
                Shape::Wrapper
            } else {
                Shape::raw(&method.return_type)
            };
            self.explicit.push(OperatorPlan { kind, args, ret });
        }
        true
    }

    fn plans(&self, spec: &WrapSpec, ignored: &OperatorSet) -> Vec<OperatorPlan> {
        OperatorKind::ALL
            .iter()
            .filter(|k| self.participating.contains(k) && !ignored.contains(k))
            .map(|&kind| {
                self.explicit
                    .iter()
                    .find(|o| o.kind == kind)
                    .cloned()
                    .unwrap_or_else(|| default_operator(spec, kind))
            })
            .collect()
    }
}

fn default_operator(spec: &WrapSpec, kind: OperatorKind) -> OperatorPlan {
    let underlying = &spec.underlying;
    let (args, ret) = if kind.is_unary() {
        let ret = if kind.returns_raw_bool() { Shape::raw("bool") } else { Shape::Wrapper };
        (vec![Shape::Wrapper], ret)
    } else if kind.is_shift() {
        (vec![Shape::Wrapper, Shape::raw("int")], Shape::Wrapper)
    } else if kind.returns_raw_bool() {
        (vec![Shape::Wrapper, Shape::Wrapper], Shape::raw("bool"))
    } else if underlying.is_enum() && kind == OperatorKind::Addition {
        (vec![Shape::Wrapper, Shape::raw(underlying.enum_integral())], Shape::Wrapper)
    } else if underlying.is_enum() && kind == OperatorKind::Subtraction {
        (vec![Shape::Wrapper, Shape::Wrapper], Shape::raw(underlying.enum_integral()))
    } else {
        (vec![Shape::Wrapper, Shape::Wrapper], Shape::Wrapper)
    };
    OperatorPlan { kind, args, ret }
}

fn skip(skipped: &mut Vec<SkippedMember>, key: SignatureKey, reason: SkipReason) {
    debug!("skipping {} ({:?})", key, reason);
    skipped.push(SkippedMember { key, reason });
}

/// Builds the plan for one wrapper from the underlying surface and the
/// wrapper's own members.
pub fn analyze(spec: &WrapSpec, surface: &UnderlyingSurface, own: &[MemberDescriptor]) -> MyResult<GenerationPlan> {
    if surface.ty.name != spec.underlying.name {
        return Err(simple_error!(
            "surface describes {} but {} wraps {}",
            surface.ty.name,
            spec.type_name,
            spec.underlying.name
        )
        .into());
    }
    if spec.field_name.is_empty() {
        return Err(simple_error!("{} has no backing field name", spec.type_name).into());
    }

    let authored = HandAuthored::scan(spec, own);
    let mut operators = OperatorTable::new(spec);
    let mut implement_interfaces: BTreeSet<InterfaceKind> =
        spec.underlying.category.default_interfaces().into_iter().collect();

    let mut fields = Vec::new();
    let mut properties = Vec::new();
    let mut events = Vec::new();
    let mut methods = Vec::new();
    let mut explicit_interfaces: Vec<String> = Vec::new();
    let mut skipped = Vec::new();

    for member in &surface.members {
        let key = member.signature_key();
        let header = member.header();
        if header.is_deprecated() {
            skip(&mut skipped, key, SkipReason::Deprecated);
            continue;
        }
        if !header.is_public() && !header.is_explicit() {
            skip(&mut skipped, key, SkipReason::Inaccessible);
            continue;
        }
        if authored.conflicts.contains(&key) {
            skip(&mut skipped, key, SkipReason::Conflict);
            continue;
        }
        if let MemberDescriptor::Method(method) = member {
            if !method.is_supported() {
                skip(&mut skipped, key, SkipReason::UnsupportedKind);
                continue;
            }
            if method.is_object_overload() {
                skip(&mut skipped, key, SkipReason::ObjectOverload);
                continue;
            }
            if !method.header.is_static
                && method.parameters.len() == 1
                && spec.is_underlying_type(&method.parameters[0].ty)
            {
                match method.header.name.as_str() {
                    "Equals" => {
                        implement_interfaces.insert(InterfaceKind::Equatable);
                    }
                    "CompareTo" => {
                        implement_interfaces.insert(InterfaceKind::Comparable);
                    }
                    _ => {}
                }
            }
            if operators.fold(spec, method) {
                skip(&mut skipped, key, SkipReason::FoldedOperator);
                continue;
            }
            if method.header.is_static && method.header.name.starts_with("op_") {
                skip(&mut skipped, key, SkipReason::OperatorShaped);
                continue;
            }
        }
        if let Some(iface) = &header.explicit_interface {
            // ref structs get no base list to implement the interface on
            if spec.kind.is_ref_only() {
                skip(&mut skipped, key, SkipReason::RefStructInterface);
                continue;
            }
            if !explicit_interfaces.contains(iface) {
                explicit_interfaces.push(iface.clone());
            }
        }
        match member {
            MemberDescriptor::Field(f) => fields.push(f.clone()),
            MemberDescriptor::Property(p) => properties.push(p.clone()),
            MemberDescriptor::Event(e) => events.push(e.clone()),
            MemberDescriptor::Method(m) => methods.push(m.clone()),
        }
    }

    let operator_plans = operators.plans(spec, &authored.ignore_operators);
    let enum_offset_operator = if spec.underlying.is_enum()
        && operators.participating.contains(&OperatorKind::Subtraction)
        && !authored.ignore_operators.contains(&OperatorKind::Subtraction)
    {
        Some(OperatorPlan {
            kind: OperatorKind::Subtraction,
            args: vec![Shape::Wrapper, Shape::raw(spec.underlying.enum_integral())],
            ret: Shape::Wrapper,
        })
    } else {
        None
    };

    let has_equal = operators.participating.contains(&OperatorKind::Equal);
    let is_record_class = spec.kind == WrapperKind::RecordClass;
    let mut special_methods = Vec::new();
    if implement_interfaces.contains(&InterfaceKind::Comparable)
        && !authored.ignore_interfaces.contains(&InterfaceKind::Comparable)
    {
        special_methods.push(SpecialMethod::CompareTo);
    }
    if !is_record_class
        && !authored.ignore_interfaces.contains(&InterfaceKind::Equatable)
        && (implement_interfaces.contains(&InterfaceKind::Equatable) || has_equal)
    {
        special_methods.push(SpecialMethod::Equals);
    }
    if !is_record_class && !spec.kind.is_ref_only() {
        for special in [SpecialMethod::GetHashCode, SpecialMethod::ToString] {
            if !authored.suppressed_specials.contains(&special) {
                special_methods.push(special);
            }
        }
    }

    let mut ref_struct_stubs = Vec::new();
    if spec.kind.is_ref_only() {
        if !authored.suppressed_specials.contains(&SpecialMethod::GetHashCode) {
            ref_struct_stubs.push(SpecialMethod::GetHashCode);
        }
        if !authored.conflicts.contains(&OBJECT_EQUALS.into()) {
            ref_struct_stubs.push(SpecialMethod::Equals);
        }
    }

    let convertible = !spec.underlying.is_interface();
    let plan = GenerationPlan {
        spec: spec.clone(),
        declare_field: !spec.kind.is_record() && !authored.field_declared,
        declare_constructor: !spec.kind.is_record() && !authored.constructor_declared,
        fields,
        properties,
        events,
        methods,
        explicit_interfaces,
        implement_interfaces: implement_interfaces.into_iter().collect(),
        ignore_interfaces: authored.ignore_interfaces.into_iter().collect(),
        special_methods,
        equals_body: if has_equal { EqualsBody::Operator } else { EqualsBody::Method },
        ref_struct_stubs,
        conversions: ConversionPlan {
            from_underlying: convertible && !authored.from_underlying_declared,
            to_underlying: convertible && !authored.to_underlying_declared,
        },
        operators: operator_plans,
        enum_offset_operator,
        bridge: !spec.exclude_converter && !spec.kind.is_ref_only(),
        skipped,
    };
    debug!(
        "{}: {} fields, {} properties, {} events, {} methods, {} operators, {} skipped",
        spec.type_name,
        plan.fields.len(),
        plan.properties.len(),
        plan.events.len(),
        plan.methods.len(),
        plan.operators.len(),
        plan.skipped.len()
    );
    Ok(plan)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{
        FieldMember, MemberHeader, Parameter, PropertyMember, TypeCategory, TypeKind, TypeRef,
    };

    fn spec(kind: WrapperKind, underlying: TypeRef) -> WrapSpec {
        WrapSpec {
            type_name: "Wrapper".into(),
            full_type_name: "global::NS.Wrapper".into(),
            type_parameters: Vec::new(),
            kind,
            field_name: "value".into(),
            is_readonly: false,
            is_sealed: false,
            exclude_converter: false,
            underlying,
        }
    }

    fn method(name: &str, ret: &str, params: &[&str]) -> MethodMember {
        MethodMember {
            header: MemberHeader::new(name),
            kind: MethodKind::Ordinary,
            return_type: ret.into(),
            parameters: params
                .iter()
                .enumerate()
                .map(|(i, t)| Parameter::new(format!("p{i}"), t))
                .collect(),
            type_parameters: Vec::new(),
            is_readonly: false,
            explicit_kind: None,
        }
    }

    fn static_method(name: &str, ret: &str, params: &[&str]) -> MethodMember {
        let mut m = method(name, ret, params);
        m.header.is_static = true;
        m
    }

    fn surface(ty: &TypeRef, members: Vec<MemberDescriptor>) -> UnderlyingSurface {
        UnderlyingSurface { ty: ty.clone(), members }
    }

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn int_gets_builtin_table() {
        init();
        let int = TypeRef::new("int", TypeCategory::Int32, TypeKind::Struct);
        let s = spec(WrapperKind::Struct, int.clone());
        let plan = analyze(
            &s,
            &surface(&int, vec![method("CompareTo", "int", &["int"]).into(), method("Equals", "bool", &["int"]).into()]),
            &[],
        )
        .unwrap();
        assert_eq!(plan.operators.len(), 21);
        assert_eq!(plan.methods.len(), 2);
        assert_eq!(
            plan.special_methods,
            vec![
                SpecialMethod::CompareTo,
                SpecialMethod::Equals,
                SpecialMethod::GetHashCode,
                SpecialMethod::ToString
            ]
        );
        assert_eq!(plan.equals_body, EqualsBody::Operator);
        assert!(plan.bridge && plan.declare_field && plan.declare_constructor);
        let shl = plan.operators.iter().find(|o| o.kind == OperatorKind::LeftShift).unwrap();
        assert_eq!(shl.args, vec![Shape::Wrapper, Shape::raw("int")]);
    }

    #[test]
    fn hand_authored_members_are_not_forwarded() {
        init();
        let ty = TypeRef::new("global::NS.Vector", TypeCategory::Other, TypeKind::Struct);
        let s = spec(WrapperKind::Struct, ty.clone());
        let own: Vec<MemberDescriptor> = vec![
            method("Normalize", "void", &[]).into(),
            method("Equals", "bool", &["global::NS.Wrapper"]).into(),
            method("ToString", "string", &[]).into(),
        ];
        let plan = analyze(
            &s,
            &surface(
                &ty,
                vec![
                    method("Normalize", "void", &[]).into(),
                    method("Normalize", "void", &["float"]).into(),
                    method("ToString", "string", &[]).into(),
                    method("Equals", "bool", &["global::NS.Vector"]).into(),
                ],
            ),
            &own,
        )
        .unwrap();
        let keys: Vec<_> = plan.signature_keys().into_iter().map(|k| k.move_inner()).collect();
        assert_eq!(keys, vec!["Normalize(float)", "Equals(global::NS.Vector)"]);
        assert!(plan.implements(InterfaceKind::Equatable));
        assert!(!plan.derives(SpecialMethod::Equals));
        assert!(!plan.derives(SpecialMethod::ToString));
        assert!(plan.derives(SpecialMethod::GetHashCode));
        assert_eq!(plan.skipped.iter().filter(|s| s.reason == SkipReason::Conflict).count(), 2);
    }

    #[test]
    fn explicit_operators_define_participation_for_plain_types() {
        init();
        let ty = TypeRef::new("global::NS.Money", TypeCategory::Other, TypeKind::Struct);
        let s = spec(WrapperKind::Struct, ty.clone());
        let plan = analyze(
            &s,
            &surface(
                &ty,
                vec![
                    static_method("op_Addition", "global::NS.Money", &["global::NS.Money", "global::NS.Money"]).into(),
                    static_method("op_Multiply", "global::NS.Money", &["global::NS.Money", "decimal"]).into(),
                    static_method("op_Equality", "bool", &["global::NS.Money", "global::NS.Money"]).into(),
                    static_method("op_Implicit", "decimal", &["global::NS.Money"]).into(),
                ],
            ),
            &[],
        )
        .unwrap();
        let kinds: Vec<_> = plan.operators.iter().map(|o| o.kind).collect();
        assert_eq!(kinds, vec![OperatorKind::Addition, OperatorKind::Multiplication, OperatorKind::Equal]);
        assert_eq!(plan.operators[1].args, vec![Shape::Wrapper, Shape::raw("decimal")]);
        assert_eq!(plan.operators[2].ret, Shape::raw("bool"));
        assert!(plan.methods.is_empty());
        assert!(plan.derives(SpecialMethod::Equals));
        assert_eq!(plan.equals_body, EqualsBody::Operator);
    }

    #[test]
    fn records_skip_equality_and_object_methods() {
        init();
        let b = TypeRef::new("bool", TypeCategory::Boolean, TypeKind::Struct);
        let s = spec(WrapperKind::RecordClass, b.clone());
        let plan = analyze(&s, &surface(&b, vec![]), &[]).unwrap();
        assert!(!plan.has_operator(OperatorKind::Equal));
        assert!(!plan.has_operator(OperatorKind::NotEqual));
        assert!(plan.has_operator(OperatorKind::LogicalAnd));
        assert_eq!(plan.special_methods, vec![SpecialMethod::CompareTo]);
        assert!(!plan.declare_field && !plan.declare_constructor);
    }

    #[test]
    fn enum_shapes_use_integral_representation() {
        init();
        let mut e = TypeRef::new("global::NS.Flags", TypeCategory::Enum, TypeKind::Enum);
        e.enum_underlying = Some(TypeCategory::Byte);
        let s = spec(WrapperKind::Struct, e.clone());
        let plan = analyze(&s, &surface(&e, vec![]), &[]).unwrap();
        let add = plan.operators.iter().find(|o| o.kind == OperatorKind::Addition).unwrap();
        assert_eq!(add.args, vec![Shape::Wrapper, Shape::raw("byte")]);
        let sub = plan.operators.iter().find(|o| o.kind == OperatorKind::Subtraction).unwrap();
        assert_eq!(sub.ret, Shape::raw("byte"));
        let extra = plan.enum_offset_operator.as_ref().unwrap();
        assert_eq!(extra.args[1], Shape::raw("byte"));
        assert_eq!(extra.ret, Shape::Wrapper);
    }

    #[test]
    fn filters_run_in_precedence_order() {
        init();
        let ty = TypeRef::new("global::NS.Thing", TypeCategory::Other, TypeKind::Class);
        let s = spec(WrapperKind::Class, ty.clone());
        let mut old = FieldMember {
            header: MemberHeader::new("Old"),
            ty: "int".into(),
            is_const: false,
            is_readonly: false,
        };
        old.header.deprecated = true;
        old.header.accessibility = crate::model::Accessibility::Private;
        let mut hidden = PropertyMember {
            header: MemberHeader::new("Hidden"),
            ty: "int".into(),
            is_indexer: false,
            parameters: Vec::new(),
            has_getter: true,
            has_setter: false,
        };
        hidden.header.accessibility = crate::model::Accessibility::Internal;
        let mut ctor = method(".ctor", "void", &[]);
        ctor.kind = MethodKind::Constructor;
        let plan = analyze(
            &s,
            &surface(
                &ty,
                vec![
                    old.into(),
                    hidden.into(),
                    ctor.into(),
                    method("Equals", "bool", &["object"]).into(),
                ],
            ),
            &[],
        )
        .unwrap();
        let reasons: Vec<_> = plan.skipped.iter().map(|s| s.reason).collect();
        assert_eq!(
            reasons,
            vec![
                SkipReason::Deprecated,
                SkipReason::Inaccessible,
                SkipReason::UnsupportedKind,
                SkipReason::ObjectOverload
            ]
        );
        assert!(plan.operators.is_empty());
        assert!(!plan.derives(SpecialMethod::Equals));
    }

    #[test]
    fn mismatched_surface_is_an_error() {
        let int = TypeRef::new("int", TypeCategory::Int32, TypeKind::Struct);
        let long = TypeRef::new("long", TypeCategory::Int64, TypeKind::Struct);
        let s = spec(WrapperKind::Struct, int);
        assert!(analyze(&s, &surface(&long, vec![]), &[]).is_err());
    }

    #[test]
    fn interface_underlying_has_no_conversions() {
        let ty = TypeRef::new("global::System.IDisposable", TypeCategory::Disposable, TypeKind::Interface);
        let s = spec(WrapperKind::Class, ty.clone());
        let plan = analyze(&s, &surface(&ty, vec![]), &[]).unwrap();
        assert_eq!(plan.conversions, ConversionPlan::default());
        assert_eq!(plan.equals_body, EqualsBody::Operator);
    }
    #[test]
    fn ref_struct_stubs_yield_to_user_overrides() {
        init();
        let ty = TypeRef::new("global::NS.Span", TypeCategory::Other, TypeKind::Struct);
        let s = spec(WrapperKind::RefStruct, ty.clone());
        let plan = analyze(&s, &surface(&ty, vec![]), &[]).unwrap();
        assert_eq!(plan.ref_struct_stubs, vec![SpecialMethod::GetHashCode, SpecialMethod::Equals]);

        let own: Vec<MemberDescriptor> = vec![method("GetHashCode", "int", &[]).into()];
        let plan = analyze(&s, &surface(&ty, vec![]), &own).unwrap();
        assert_eq!(plan.ref_struct_stubs, vec![SpecialMethod::Equals]);

        let own: Vec<MemberDescriptor> = vec![
            method("GetHashCode", "int", &[]).into(),
            method("Equals", "bool", &["object"]).into(),
        ];
        let plan = analyze(&s, &surface(&ty, vec![]), &own).unwrap();
        assert!(plan.ref_struct_stubs.is_empty());
    }

    #[test]
    fn ref_structs_skip_explicit_interface_members() {
        init();
        let ty = TypeRef::new("global::NS.Bag", TypeCategory::Other, TypeKind::Class);
        let mut count = PropertyMember {
            header: MemberHeader::new("Count"),
            ty: "int".into(),
            is_indexer: false,
            parameters: Vec::new(),
            has_getter: true,
            has_setter: false,
        };
        count.header.accessibility = crate::model::Accessibility::Private;
        count.header.explicit_interface = Some("global::System.Collections.ICollection".into());
        let members: Vec<MemberDescriptor> = vec![count.into()];

        let plan = analyze(&spec(WrapperKind::RefStruct, ty.clone()), &surface(&ty, members.clone()), &[]).unwrap();
        assert!(plan.properties.is_empty());
        assert!(plan.explicit_interfaces.is_empty());
        assert_eq!(plan.skipped.last().map(|s| s.reason), Some(SkipReason::RefStructInterface));

        let plan = analyze(&spec(WrapperKind::Struct, ty.clone()), &surface(&ty, members), &[]).unwrap();
        assert_eq!(plan.properties.len(), 1);
        assert_eq!(plan.explicit_interfaces, vec!["global::System.Collections.ICollection".to_string()]);
    }

    #[test]
    fn skipped_members_serialize_with_their_keys() {
        let skipped = SkippedMember {
            key: "Equals(object)".into(),
            reason: SkipReason::ObjectOverload,
        };
        assert_eq!(
            serde_json::to_string(&skipped).unwrap(),
            r#"{"key":"Equals(object)","reason":"ObjectOverload"}"#
        );
    }
}
