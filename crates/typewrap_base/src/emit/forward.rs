//! Members re-exposed on the wrapper by delegating to the backing value.

use itertools::Itertools;

use super::{argument_list, parameter_list, Context, Printer, Render, AGGRESSIVE_INLINING};
use crate::model::{EventMember, FieldMember, MemberHeader, MethodMember, PropertyMember, TypeParameter};

#[derive(Debug, Clone)]
pub struct ForwardedField(pub FieldMember);

#[derive(Debug, Clone)]
pub struct ForwardedProperty(pub PropertyMember);

#[derive(Debug, Clone)]
pub struct ForwardedEvent(pub EventMember);

#[derive(Debug, Clone)]
pub struct ForwardedMethod(pub MethodMember);

/// Instance setters are dropped when they would write into a copy. Static
/// members live on the underlying type itself.
fn setter_allowed(cx: &Context, header: &MemberHeader) -> bool {
    header.is_static || !cx.spec.suppresses_setters()
}

fn accessor(cx: &Context, p: &mut Printer, line: String) {
    p.line(&cx.generated_code).line(super::EXCLUDE_COVERAGE).line(AGGRESSIVE_INLINING).line(line);
}

fn static_prefix(header: &MemberHeader) -> &'static str {
    if header.is_static {
        "static "
    } else {
        ""
    }
}

impl Render for ForwardedField {
    fn render(&self, cx: &Context, p: &mut Printer) {
        let field = &self.0;
        let name = &field.header.name;
        let owner = cx.target(&field.header);
        let wrapper = &cx.wrapper;
        let same_type = cx.spec.is_underlying_type(&field.ty);
        let statik = static_prefix(&field.header);

        if field.is_const || (field.header.is_static && field.is_readonly) {
            cx.generated(p);
            if same_type {
                p.line(format!("public static readonly {wrapper} {name} = new {wrapper}({owner}.{name});"));
            } else if field.is_const {
                p.line(format!("public const {} {name} = {owner}.{name};", field.ty));
            } else {
                p.line(format!("public static {} {name}", field.ty))
                    .open()
                    .line(format!("get => {owner}.{name};"))
                    .close();
            }
            return;
        }

        cx.generated(p);
        p.line(super::EXCLUDE_COVERAGE);
        let ty = if same_type { wrapper.as_str() } else { field.ty.as_str() };
        p.line(format!("public {statik}{ty} {name}")).open();
        if same_type {
            accessor(cx, p, format!("get => new {wrapper}({owner}.{name});"));
        } else {
            accessor(cx, p, format!("get => {owner}.{name};"));
        }
        if !field.is_readonly && setter_allowed(cx, &field.header) {
            p.blank();
            if same_type {
                accessor(cx, p, format!("set => {owner}.{name} = value.{};", cx.field()));
            } else {
                accessor(cx, p, format!("set => {owner}.{name} = value;"));
            }
        }
        p.close();
    }
    fn label(&self) -> &'static str {
        "forwarded_field"
    }
}

impl Render for ForwardedProperty {
    fn render(&self, cx: &Context, p: &mut Printer) {
        let prop = &self.0;
        let header = &prop.header;
        let is_ref = header.ref_kind.is_ref();
        let rewrap = cx.spec.kind.is_value_type() && cx.spec.is_underlying_type(&prop.ty) && !is_ref;
        let ty = if rewrap { cx.wrapper.as_str() } else { prop.ty.as_str() };
        let owner = cx.target(header);

        let (declared, access) = if prop.is_indexer {
            let prefix = header
                .explicit_interface
                .as_ref()
                .map(|i| format!("{i}."))
                .unwrap_or_default();
            (
                format!("{prefix}this[{}]", parameter_list(&prop.parameters)),
                format!("{owner}[{}]", argument_list(&prop.parameters)),
            )
        } else {
            (cx.member_name(header), format!("{owner}.{}", header.name))
        };

        cx.generated(p);
        p.line(super::EXCLUDE_COVERAGE);
        p.line(format!(
            "{}{}{}{ty} {declared}",
            cx.visibility(header),
            static_prefix(header),
            header.ref_kind.signature_prefix()
        ));
        p.open();
        let mut wrote_getter = false;
        if prop.has_getter {
            p.line(AGGRESSIVE_INLINING);
            if is_ref {
                p.line(format!("get => ref {access};"));
            } else if rewrap {
                p.line(format!("get => new {}({access});", cx.wrapper));
            } else {
                p.line(format!("get => {access};"));
            }
            wrote_getter = true;
        }
        if prop.has_setter && !is_ref && setter_allowed(cx, header) {
            if wrote_getter {
                p.blank();
            }
            p.line(AGGRESSIVE_INLINING);
            if rewrap {
                p.line(format!("set => {access} = value.{};", cx.field()));
            } else {
                p.line(format!("set => {access} = value;"));
            }
        }
        p.close();
    }
    fn label(&self) -> &'static str {
        "forwarded_property"
    }
}

impl Render for ForwardedEvent {
    fn render(&self, cx: &Context, p: &mut Printer) {
        let event = &self.0;
        let header = &event.header;
        let access = format!("{}.{}", cx.target(header), header.name);
        cx.generated(p);
        p.line(super::EXCLUDE_COVERAGE);
        p.line(format!(
            "{}{}event {} {}",
            cx.visibility(header),
            static_prefix(header),
            event.ty,
            cx.member_name(header)
        ));
        p.open()
            .line(AGGRESSIVE_INLINING)
            .line(format!("add => {access} += value;"))
            .blank()
            .line(AGGRESSIVE_INLINING)
            .line(format!("remove => {access} -= value;"))
            .close();
    }
    fn label(&self) -> &'static str {
        "forwarded_event"
    }
}

fn type_arguments(params: &[TypeParameter]) -> String {
    if params.is_empty() {
        String::new()
    } else {
        format!("<{}>", params.iter().map(|t| &t.name).join(", "))
    }
}

impl Render for ForwardedMethod {
    fn render(&self, cx: &Context, p: &mut Printer) {
        let method = &self.0;
        let header = &method.header;
        let readonly = cx.spec.kind.is_value_type() && method.is_readonly && !header.is_static;
        let type_args = type_arguments(&method.type_parameters);

        cx.member_attributes(p);
        p.line(format!(
            "{}{}{}{}{} {}{type_args}({})",
            cx.visibility(header),
            static_prefix(header),
            if readonly { "readonly " } else { "" },
            header.ref_kind.signature_prefix(),
            method.return_type,
            cx.member_name(header),
            parameter_list(&method.parameters)
        ));
        p.indent();
        // explicit implementations inherit their constraints
        if !header.is_explicit() {
            for param in &method.type_parameters {
                let clauses = param.constraints.clauses();
                if !clauses.is_empty() {
                    p.line(format!("where {} : {}", param.name, clauses.join(", ")));
                }
            }
        }
        let by_ref = if header.ref_kind.is_ref() { "ref " } else { "" };
        p.line(format!(
            "=> {by_ref}{}.{}{type_args}({});",
            cx.target(header),
            header.name,
            argument_list(&method.parameters)
        ));
        p.dedent();
    }
    fn label(&self) -> &'static str {
        "forwarded_method"
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{
        Constraints, ParamRefKind, Parameter, RefKind, TypeCategory, TypeKind, TypeRef, WrapSpec, WrapperKind,
    };

    fn spec(kind: WrapperKind, readonly: bool, underlying: TypeRef) -> WrapSpec {
        WrapSpec {
            type_name: "W".into(),
            full_type_name: "global::W".into(),
            type_parameters: Vec::new(),
            kind,
            field_name: "value".into(),
            is_readonly: readonly,
            is_sealed: false,
            exclude_converter: false,
            underlying,
        }
    }

    fn vector() -> TypeRef {
        TypeRef::new("global::V", TypeCategory::Other, TypeKind::Struct)
    }

    fn render<R: Render>(item: R, spec: &WrapSpec) -> String {
        let cx = Context::new(spec, "[GC]".to_string());
        let mut p = Printer::new();
        item.render(&cx, &mut p);
        p.finish()
    }

    fn property(name: &str, ty: &str) -> PropertyMember {
        PropertyMember {
            header: MemberHeader::new(name),
            ty: ty.into(),
            is_indexer: false,
            parameters: Vec::new(),
            has_getter: true,
            has_setter: true,
        }
    }

    #[test]
    fn readonly_wrapper_drops_setters() {
        let text = render(
            ForwardedProperty(property("X", "float")),
            &spec(WrapperKind::Struct, true, vector()),
        );
        assert!(text.contains("get => this.value.X;"));
        assert!(!text.contains("set =>"));
        let text = render(
            ForwardedProperty(property("X", "float")),
            &spec(WrapperKind::Struct, false, vector()),
        );
        assert!(text.contains("set => this.value.X = value;"));
    }

    #[test]
    fn readonly_underlying_drops_setters() {
        let mut v = vector();
        v.is_readonly = true;
        let text = render(ForwardedProperty(property("X", "float")), &spec(WrapperKind::Class, false, v));
        assert!(!text.contains("set =>"));
    }

    #[test]
    fn ref_returns_are_threaded() {
        let mut prop = property("Current", "int");
        prop.header.ref_kind = RefKind::RefReadonly;
        let text = render(ForwardedProperty(prop), &spec(WrapperKind::Struct, false, vector()));
        assert!(text.contains("public ref readonly int Current\n{"));
        assert!(text.contains("get => ref this.value.Current;"));
        assert!(!text.contains("set =>"));
    }

    #[test]
    fn same_type_property_is_rewrapped_on_structs() {
        let text = render(
            ForwardedProperty(property("Normalized", "global::V")),
            &spec(WrapperKind::Struct, false, vector()),
        );
        assert!(text.contains("public global::W Normalized"));
        assert!(text.contains("get => new global::W(this.value.Normalized);"));
        assert!(text.contains("set => this.value.Normalized = value.value;"));
    }

    #[test]
    fn explicit_indexer_goes_through_cast() {
        let mut prop = property("this[]", "object");
        prop.is_indexer = true;
        prop.parameters.push(Parameter::new("index", "int"));
        prop.header.explicit_interface = Some("global::System.Collections.IList".into());
        prop.header.accessibility = crate::model::Accessibility::Private;
        let list = TypeRef::new("global::L", TypeCategory::Other, TypeKind::Class);
        let text = render(ForwardedProperty(prop), &spec(WrapperKind::Class, false, list));
        assert!(text.contains("\nobject global::System.Collections.IList.this[int index]\n"));
        assert!(text.contains("get => ((global::System.Collections.IList)this.value)[index];"));
        assert!(text.contains("set => ((global::System.Collections.IList)this.value)[index] = value;"));
    }

    #[test]
    fn static_members_use_the_underlying_type() {
        let mut m = MethodMember {
            header: MemberHeader::new("Parse"),
            kind: Default::default(),
            return_type: "global::V".into(),
            parameters: vec![Parameter::new("s", "string")],
            type_parameters: Vec::new(),
            is_readonly: false,
            explicit_kind: None,
        };
        m.header.is_static = true;
        let text = render(ForwardedMethod(m), &spec(WrapperKind::Struct, false, vector()));
        assert!(text.contains("public static global::V Parse(string s)\n    => global::V.Parse(s);"));
    }

    #[test]
    fn generic_method_with_constraints_and_ref_modes() {
        let mut m = MethodMember {
            header: MemberHeader::new("TryGet"),
            kind: Default::default(),
            return_type: "bool".into(),
            parameters: vec![Parameter::new("key", "string"), Parameter::new("result", "T")],
            type_parameters: vec![TypeParameter {
                name: "T".into(),
                constraints: Constraints {
                    unmanaged: true,
                    ..Default::default()
                },
            }],
            is_readonly: true,
            explicit_kind: None,
        };
        m.parameters[1].ref_kind = ParamRefKind::Out;
        m.parameters[0].attributes.push("global::System.Diagnostics.CodeAnalysis.NotNull".into());
        let text = render(ForwardedMethod(m), &spec(WrapperKind::Struct, false, vector()));
        assert!(text.contains(
            "public readonly bool TryGet<T>([global::System.Diagnostics.CodeAnalysis.NotNull] string key, out T result)\n    where T : unmanaged\n    => this.value.TryGet<T>(key, out result);"
        ));
    }

    #[test]
    fn fields_by_shape() {
        let s = spec(WrapperKind::Struct, false, vector());
        let field = |name: &str, ty: &str, is_const: bool, is_static: bool, is_readonly: bool| {
            let mut f = FieldMember {
                header: MemberHeader::new(name),
                ty: ty.into(),
                is_const,
                is_readonly,
            };
            f.header.is_static = is_static;
            ForwardedField(f)
        };
        assert!(render(field("Zero", "global::V", true, true, false), &s)
            .contains("public static readonly global::W Zero = new global::W(global::V.Zero);"));
        assert!(render(field("Size", "int", true, true, false), &s).contains("public const int Size = global::V.Size;"));
        let ro = render(field("Id", "int", false, false, true), &s);
        assert!(ro.contains("get => this.value.Id;") && !ro.contains("set =>"));
        let same = render(field("Next", "global::V", false, false, true), &s);
        assert!(same.contains("public global::W Next\n{"));
        assert!(same.contains("get => new global::W(this.value.Next);"));
        let mutable = render(field("X", "float", false, false, false), &s);
        assert!(mutable.contains("set => this.value.X = value;"));
    }

    #[test]
    fn events_forward_add_and_remove() {
        let e = EventMember {
            header: MemberHeader::new("Changed"),
            ty: "global::System.Action".into(),
        };
        let text = render(ForwardedEvent(e), &spec(WrapperKind::Class, false, vector()));
        assert!(text.contains("public event global::System.Action Changed\n{"));
        assert!(text.contains("add => this.value.Changed += value;"));
        assert!(text.contains("remove => this.value.Changed -= value;"));
    }
}
