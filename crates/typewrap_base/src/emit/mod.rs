//! Renders a [`GenerationPlan`] into C# source.
//!
//! Rendering happens in two steps: [`lower`] turns the plan into a flat list
//! of [`Item`]s in emission order, and each item renders itself through the
//! [`Render`] trait.

use std::collections::{BTreeSet, HashMap};

use common::{forward_slashes, MyResult};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::model::{MemberHeader, WrapSpec};
use crate::plan::{GenerationPlan, InterfaceKind, SpecialMethod};

mod forward;
mod item;
mod operator;
mod printer;

pub use item::{
    BackingField, Bridge, Conversion, DerivedMethod, Item, PrimaryConstructor, RefStructStubs, Render,
};
pub use forward::{ForwardedEvent, ForwardedField, ForwardedMethod, ForwardedProperty};
pub use operator::Operator;
pub use printer::Printer;

pub const AGGRESSIVE_INLINING: &str = "[global::System.Runtime.CompilerServices.MethodImpl(global::System.Runtime.CompilerServices.MethodImplOptions.AggressiveInlining)]";
pub const EXCLUDE_COVERAGE: &str = "[global::System.Diagnostics.CodeAnalysis.ExcludeFromCodeCoverage]";
pub const GENERATED_CODE_TEMPLATE: &str = "[global::System.CodeDom.Compiler.GeneratedCode(\"{name}\", \"{version}\")]";
pub const WRAP_INTERFACE: &str = "global::TypeWrap.IWrap";
pub const TYPE_CONVERTER: &str = "global::System.ComponentModel.TypeConverter";

/// A syntactic scope enclosing the wrapper declaration, outermost first.
#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// `namespace A.B`
    Namespace(String),
    /// Re-opening header of a containing type, e.g. `partial class Outer`.
    Type(String),
}

impl Scope {
    fn header(&self) -> String {
        match self {
            Scope::Namespace(ns) => format!("namespace {ns}"),
            Scope::Type(header) => header.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    pub generator_name: String,
    pub generator_version: String,
    /// Path for a `#line 1` directive, set when the host persists the file.
    pub line_directive: Option<String>,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            generator_name: "TypeWrap.SourceGen.TypeWrapGenerator".to_string(),
            generator_version: "1.0.0".to_string(),
            line_directive: None,
        }
    }
}

impl EmitOptions {
    pub fn generated_code_attribute(&self) -> MyResult<String> {
        let vars = HashMap::from([
            ("name".to_string(), self.generator_name.clone()),
            ("version".to_string(), self.generator_version.clone()),
        ]);
        strfmt::strfmt(GENERATED_CODE_TEMPLATE, &vars).map_err(|e| e.into())
    }
}

/// Names shared by every item of one wrapper.
#[derive(Debug)]
pub struct Context<'a> {
    pub spec: &'a WrapSpec,
    /// Qualified wrapper name with type arguments.
    pub wrapper: String,
    pub generated_code: String,
}

impl<'a> Context<'a> {
    pub fn new(spec: &'a WrapSpec, generated_code: String) -> Self {
        Self {
            spec,
            wrapper: spec.qualified_name(),
            generated_code,
        }
    }
    pub fn underlying(&self) -> &str {
        &self.spec.underlying.name
    }
    pub fn field(&self) -> &str {
        &self.spec.field_name
    }
    /// Expression a forwarded member is reached through.
    pub fn target(&self, header: &MemberHeader) -> String {
        if header.is_static {
            self.underlying().to_string()
        } else if let Some(iface) = &header.explicit_interface {
            format!("(({iface})this.{})", self.field())
        } else {
            format!("this.{}", self.field())
        }
    }
    /// `public ` for ordinary members; explicit implementations take none.
    pub fn visibility(&self, header: &MemberHeader) -> &'static str {
        if header.is_explicit() {
            ""
        } else {
            "public "
        }
    }
    pub fn member_name(&self, header: &MemberHeader) -> String {
        match &header.explicit_interface {
            Some(iface) => format!("{iface}.{}", header.name),
            None => header.name.clone(),
        }
    }
    /// Modifier for derived `CompareTo`/`Equals`.
    pub fn derived_modifier(&self) -> &'static str {
        if self.spec.kind.is_value_type() {
            "readonly "
        } else if self.spec.is_sealed {
            ""
        } else {
            "virtual "
        }
    }
    pub fn generated(&self, p: &mut Printer) {
        p.line(&self.generated_code);
    }
    /// The attribute trio placed on every forwarding member.
    pub fn member_attributes(&self, p: &mut Printer) {
        p.line(AGGRESSIVE_INLINING).line(&self.generated_code).line(EXCLUDE_COVERAGE);
    }
}

/// Flattens the plan into render items in emission order.
pub fn lower(plan: &GenerationPlan) -> Vec<Item> {
    let mut items: Vec<Item> = Vec::new();
    // object overrides already produced by forwarding
    let mut written: BTreeSet<SpecialMethod> = BTreeSet::new();

    if plan.declare_field {
        items.push(BackingField.into());
    }
    if plan.declare_constructor {
        items.push(PrimaryConstructor.into());
    }
    items.extend(plan.fields.iter().cloned().map(|f| ForwardedField(f).into()));
    items.extend(plan.properties.iter().cloned().map(|p| ForwardedProperty(p).into()));
    items.extend(plan.events.iter().cloned().map(|e| ForwardedEvent(e).into()));
    for method in &plan.methods {
        if method.parameters.is_empty() && !method.header.is_explicit() {
            written.extend(SpecialMethod::from_override_name(&method.header.name));
        }
        items.push(ForwardedMethod(method.clone()).into());
    }
    for special in &plan.special_methods {
        if !written.contains(special) {
            items.push(
                DerivedMethod {
                    method: *special,
                    equals_body: plan.equals_body,
                }
                .into(),
            );
        }
    }
    if !plan.ref_struct_stubs.is_empty() {
        items.push(RefStructStubs(plan.ref_struct_stubs.clone()).into());
    }
    if plan.conversions.from_underlying {
        items.push(Conversion::FromUnderlying.into());
    }
    if plan.conversions.to_underlying {
        items.push(Conversion::ToUnderlying.into());
    }
    items.extend(plan.operators.iter().cloned().map(|o| Operator(o).into()));
    if let Some(extra) = &plan.enum_offset_operator {
        items.push(Operator(extra.clone()).into());
    }
    if plan.bridge {
        items.push(Bridge.into());
    }
    items
}

fn base_list(plan: &GenerationPlan, cx: &Context) -> Vec<String> {
    if plan.spec.kind.is_ref_only() {
        return Vec::new();
    }
    let mut bases = vec![format!("{WRAP_INTERFACE}<{}>", cx.underlying())];
    for kind in [InterfaceKind::Equatable, InterfaceKind::Comparable] {
        if plan.implements(kind) {
            bases.push(format!("{}<{}>", kind.generic_name(), cx.wrapper));
            bases.push(format!("{}<{}>", kind.generic_name(), cx.underlying()));
        }
    }
    bases.extend(plan.explicit_interfaces.iter().cloned());
    bases
}

fn type_header(plan: &GenerationPlan, cx: &Context, p: &mut Printer) {
    let spec = &plan.spec;
    if plan.bridge {
        p.line(format!(
            "[{TYPE_CONVERTER}(typeof({}.{}TypeConverter))]",
            spec.unbound_name(),
            spec.type_name
        ));
    }
    p.line(format!("{} {}", spec.kind.declaration_keywords(), spec.declared_name()));
    let bases = base_list(plan, cx);
    if let Some((first, rest)) = bases.split_first() {
        p.indent();
        p.line(format!(": {first}"));
        p.lines(rest.iter().map(|b| format!(", {b}")));
        p.dedent();
    }
}

/// Renders the full generated file for one wrapper.
pub fn emit(plan: &GenerationPlan, scopes: &[Scope], options: &EmitOptions) -> MyResult<String> {
    let cx = Context::new(&plan.spec, options.generated_code_attribute()?);
    let mut p = Printer::new();
    p.line("// <auto-generated/>").line("#pragma warning disable");
    if let Some(path) = &options.line_directive {
        p.line(format!("#line 1 \"{}\"", forward_slashes(path)));
    }
    p.blank();

    for scope in scopes {
        p.line(scope.header()).open();
    }

    type_header(plan, &cx, &mut p);
    p.open();
    let items = lower(plan);
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            p.blank();
        }
        item.render(&cx, &mut p);
    }
    p.close();

    for _ in scopes {
        p.close();
    }
    Ok(p.finish())
}

/// Comma-joined `type name` list with ref modes and inline attributes.
pub(crate) fn parameter_list(params: &[crate::model::Parameter]) -> String {
    params
        .iter()
        .map(|param| {
            let attrs: String = param.attributes.iter().map(|a| format!("[{a}] ")).collect();
            format!("{attrs}{}{} {}", param.ref_kind.prefix(), param.ty, param.name)
        })
        .join(", ")
}

pub(crate) fn argument_list(params: &[crate::model::Parameter]) -> String {
    params
        .iter()
        .map(|param| format!("{}{}", param.ref_kind.prefix(), param.name))
        .join(", ")
}
