use enum_dispatch::enum_dispatch;

use super::forward::{ForwardedEvent, ForwardedField, ForwardedMethod, ForwardedProperty};
use super::operator::Operator;
use super::{Context, Printer, EXCLUDE_COVERAGE, TYPE_CONVERTER};
use crate::model::WrapperKind;
use crate::plan::{EqualsBody, SpecialMethod};

const OBSOLETE: &str = "[global::System.Obsolete(\"Not supported\", true)]";
const TYPE_DESCRIPTOR_CONTEXT: &str = "global::System.ComponentModel.ITypeDescriptorContext";
const CULTURE_INFO: &str = "global::System.Globalization.CultureInfo";

#[enum_dispatch]
pub trait Render {
    fn render(&self, cx: &Context, p: &mut Printer);
    fn label(&self) -> &'static str;
}

#[enum_dispatch(Render)]
#[derive(Debug, Clone)]
pub enum Item {
    BackingField,
    PrimaryConstructor,
    ForwardedField,
    ForwardedProperty,
    ForwardedEvent,
    ForwardedMethod,
    DerivedMethod,
    RefStructStubs,
    Conversion,
    Operator,
    Bridge,
}

#[derive(Debug, Clone)]
pub struct BackingField;

impl Render for BackingField {
    fn render(&self, cx: &Context, p: &mut Printer) {
        cx.generated(p);
        let readonly = if cx.spec.is_readonly { "readonly " } else { "" };
        p.line(format!("public {readonly}{} {};", cx.underlying(), cx.field()));
    }
    fn label(&self) -> &'static str {
        "backing_field"
    }
}

#[derive(Debug, Clone)]
pub struct PrimaryConstructor;

impl Render for PrimaryConstructor {
    fn render(&self, cx: &Context, p: &mut Printer) {
        cx.member_attributes(p);
        p.line(format!("public {}({} value)", cx.spec.type_name, cx.underlying()));
        p.open();
        p.line(format!("this.{} = value;", cx.field()));
        p.close();
    }
    fn label(&self) -> &'static str {
        "primary_constructor"
    }
}

/// An `object`/capability method implemented on top of the backing value.
#[derive(Debug, Clone)]
pub struct DerivedMethod {
    pub method: SpecialMethod,
    pub equals_body: EqualsBody,
}

impl Render for DerivedMethod {
    fn render(&self, cx: &Context, p: &mut Printer) {
        let field = cx.field();
        let value_type = cx.spec.kind.is_value_type();
        let (signature, body) = match self.method {
            SpecialMethod::CompareTo => (
                format!("public {}int CompareTo({} other)", cx.derived_modifier(), cx.wrapper),
                format!("=> {field}.CompareTo(other.{field});"),
            ),
            SpecialMethod::Equals => (
                format!("public {}bool Equals({} other)", cx.derived_modifier(), cx.wrapper),
                match self.equals_body {
                    EqualsBody::Operator => format!("=> {field} == other.{field};"),
                    EqualsBody::Method => format!("=> {field}.Equals(other.{field});"),
                },
            ),
            SpecialMethod::GetHashCode | SpecialMethod::ToString => {
                let ret = if self.method == SpecialMethod::ToString { "string" } else { "int" };
                let readonly = if value_type { "readonly " } else { "" };
                (
                    format!("public {readonly}override {ret} {}()", self.method.name()),
                    format!("=> {field}.{}();", self.method.name()),
                )
            }
        };
        cx.member_attributes(p);
        p.line(signature).indented(body);
    }
    fn label(&self) -> &'static str {
        "derived_method"
    }
}

/// Ref structs cannot be boxed, so the `object` overrides are poisoned.
#[derive(Debug, Clone)]
pub struct RefStructStubs(pub Vec<SpecialMethod>);

impl Render for RefStructStubs {
    fn render(&self, _cx: &Context, p: &mut Printer) {
        for (i, method) in self.0.iter().enumerate() {
            if i > 0 {
                p.blank();
            }
            p.line(OBSOLETE);
            match method {
                SpecialMethod::Equals => p.line("public override bool Equals(object other) => throw null;"),
                _ => p.line("public override int GetHashCode() => throw null;"),
            };
        }
    }
    fn label(&self) -> &'static str {
        "ref_struct_stubs"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    FromUnderlying,
    ToUnderlying,
}

impl Render for Conversion {
    fn render(&self, cx: &Context, p: &mut Printer) {
        cx.member_attributes(p);
        match self {
            Conversion::FromUnderlying => {
                let mode = match cx.spec.kind {
                    WrapperKind::Struct | WrapperKind::RecordStruct => "implicit",
                    _ => "explicit",
                };
                p.line(format!("public static {mode} operator {}({} value)", cx.wrapper, cx.underlying()))
                    .indented(format!("=> new {}(value);", cx.wrapper));
            }
            Conversion::ToUnderlying => {
                p.line(format!("public static implicit operator {}({} value)", cx.underlying(), cx.wrapper))
                    .indented(format!("=> value.{};", cx.field()));
            }
        }
    }
    fn label(&self) -> &'static str {
        "conversion"
    }
}

/// Nested `TypeConverter` so reflection-driven tooling can move between the
/// wrapper and the underlying type.
#[derive(Debug, Clone)]
pub struct Bridge;

impl Render for Bridge {
    fn render(&self, cx: &Context, p: &mut Printer) {
        let wrapper = &cx.wrapper;
        let underlying = cx.underlying();
        let method_attributes = |p: &mut Printer| {
            cx.generated(p);
            p.line(EXCLUDE_COVERAGE);
        };

        method_attributes(p);
        p.line(format!(
            "private sealed class {}TypeConverter : {TYPE_CONVERTER}",
            cx.spec.type_name
        ));
        p.open();
        p.line(format!("private static readonly global::System.Type s_wrapperType = typeof({wrapper});"))
            .line(format!("private static readonly global::System.Type s_valueType = typeof({underlying});"))
            .blank();

        method_attributes(p);
        p.line(format!(
            "public override bool CanConvertFrom({TYPE_DESCRIPTOR_CONTEXT} context, global::System.Type sourceType)"
        ));
        p.open()
            .line("if (sourceType == s_wrapperType || sourceType == s_valueType) return true;")
            .line("return base.CanConvertFrom(context, sourceType);")
            .close()
            .blank();

        method_attributes(p);
        p.line(format!(
            "public override bool CanConvertTo({TYPE_DESCRIPTOR_CONTEXT} context, global::System.Type destinationType)"
        ));
        p.open()
            .line("if (destinationType == s_wrapperType || destinationType == s_valueType) return true;")
            .line("return base.CanConvertTo(context, destinationType);")
            .close()
            .blank();

        method_attributes(p);
        p.line(format!(
            "public override object ConvertFrom({TYPE_DESCRIPTOR_CONTEXT} context, {CULTURE_INFO} culture, object value)"
        ));
        p.open().line("if (value != null)").open();
        p.line("var t = value.GetType();")
            .line(format!("if (t == typeof({wrapper})) return ({wrapper})value;"))
            .line(format!("if (t == typeof({underlying})) return new {wrapper}(({underlying})value);"));
        p.close()
            .blank()
            .line("return base.ConvertFrom(context, culture, value);")
            .close()
            .blank();

        method_attributes(p);
        p.line(format!(
            "public override object ConvertTo({TYPE_DESCRIPTOR_CONTEXT} context, {CULTURE_INFO} culture, object value, global::System.Type destinationType)"
        ));
        p.open().line(format!("if (value is {wrapper} wrappedValue)")).open();
        p.line("if (destinationType == s_wrapperType) return wrappedValue;")
            .line(format!("if (destinationType == s_valueType) return wrappedValue.{};", cx.field()));
        p.close()
            .blank()
            .line("return base.ConvertTo(context, culture, value, destinationType);")
            .close();
        p.close();
    }
    fn label(&self) -> &'static str {
        "bridge"
    }
}
