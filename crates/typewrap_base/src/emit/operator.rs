use super::{Context, Printer, Render};
use crate::model::TypeCategory;
use crate::operators::OperatorKind;
use crate::plan::{OperatorPlan, Shape};

#[derive(Debug, Clone)]
pub struct Operator(pub OperatorPlan);

impl Operator {
    fn arg_names(&self) -> &'static [&'static str] {
        if self.0.kind.is_unary() {
            &["value"]
        } else {
            &["left", "right"]
        }
    }

    fn type_of<'a>(cx: &'a Context, shape: &'a Shape) -> &'a str {
        match shape {
            Shape::Wrapper => &cx.wrapper,
            Shape::Raw(ty) => ty,
        }
    }

    /// Operand expression: wrapped arguments are unwrapped.
    fn operand(cx: &Context, shape: &Shape, name: &str) -> String {
        match shape {
            Shape::Wrapper => format!("{name}.{}", cx.field()),
            Shape::Raw(_) => name.to_string(),
        }
    }

    fn body(&self, cx: &Context) -> Vec<String> {
        let plan = &self.0;
        let token = plan.kind.token();
        let operands: Vec<String> = plan
            .args
            .iter()
            .zip(self.arg_names())
            .map(|(shape, name)| Self::operand(cx, shape, name))
            .collect();
        let wrap = |expr: String| {
            if plan.ret.is_wrapper() {
                format!("return new {}({expr});", cx.wrapper)
            } else {
                format!("return {expr};")
            }
        };
        let underlying = &cx.spec.underlying;
        match (plan.kind, operands.as_slice()) {
            (OperatorKind::Increment | OperatorKind::Decrement, [operand]) => {
                let last = if plan.ret.is_wrapper() {
                    format!("return new {}(tempValue);", cx.wrapper)
                } else {
                    "return tempValue;".to_string()
                };
                vec![format!("var tempValue = {operand};"), format!("tempValue{token};"), last]
            }
            (OperatorKind::True, [operand]) => vec![format!("return {operand};")],
            (OperatorKind::False, [operand]) => {
                if underlying.category == TypeCategory::Boolean {
                    vec![format!("return !{operand};")]
                } else {
                    vec![format!("return {operand} ? false : true;")]
                }
            }
            (_, [operand]) => vec![wrap(format!("{token}({operand})"))],
            // enums have no shift operators of their own
            (kind, [left, right]) if kind.is_shift() && underlying.is_enum() => {
                let integral = underlying.enum_integral();
                vec![wrap(format!("({})(({integral}){left} {token} {right})", underlying.name))]
            }
            (_, [left, right]) => vec![wrap(format!("{left} {token} {right}"))],
            _ => Vec::new(),
        }
    }
}

impl Render for Operator {
    fn render(&self, cx: &Context, p: &mut Printer) {
        let plan = &self.0;
        let args = plan
            .args
            .iter()
            .zip(self.arg_names())
            .map(|(shape, name)| format!("{} {name}", Self::type_of(cx, shape)))
            .collect::<Vec<_>>()
            .join(", ");
        cx.member_attributes(p);
        p.line(format!(
            "public static {} operator {}({args})",
            Self::type_of(cx, &plan.ret),
            plan.kind.token()
        ));
        p.open().lines(self.body(cx)).close();
    }
    fn label(&self) -> &'static str {
        "operator"
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{TypeKind, TypeRef, WrapSpec, WrapperKind};

    fn spec(underlying: TypeRef) -> WrapSpec {
        WrapSpec {
            type_name: "W".into(),
            full_type_name: "global::W".into(),
            type_parameters: Vec::new(),
            kind: WrapperKind::Struct,
            field_name: "value".into(),
            is_readonly: false,
            is_sealed: false,
            exclude_converter: false,
            underlying,
        }
    }

    fn render(plan: OperatorPlan, spec: &WrapSpec) -> String {
        let cx = Context::new(spec, "[GC]".to_string());
        let mut p = Printer::new();
        Operator(plan).render(&cx, &mut p);
        p.finish()
    }

    fn int() -> WrapSpec {
        spec(TypeRef::new("int", TypeCategory::Int32, TypeKind::Struct))
    }

    #[test]
    fn binary_rewraps() {
        let text = render(
            OperatorPlan {
                kind: OperatorKind::Addition,
                args: vec![Shape::Wrapper, Shape::Wrapper],
                ret: Shape::Wrapper,
            },
            &int(),
        );
        assert!(text.contains(
            "public static global::W operator +(global::W left, global::W right)\n{\n    return new global::W(left.value + right.value);\n}\n"
        ));
    }

    #[test]
    fn relational_returns_raw_bool() {
        let text = render(
            OperatorPlan {
                kind: OperatorKind::LesserEqual,
                args: vec![Shape::Wrapper, Shape::Wrapper],
                ret: Shape::raw("bool"),
            },
            &int(),
        );
        assert!(text.contains("public static bool operator <=(global::W left, global::W right)"));
        assert!(text.contains("    return left.value <= right.value;\n"));
    }

    #[test]
    fn increment_goes_through_temporary() {
        let text = render(
            OperatorPlan {
                kind: OperatorKind::Increment,
                args: vec![Shape::Wrapper],
                ret: Shape::Wrapper,
            },
            &int(),
        );
        assert!(text.contains("operator ++(global::W value)"));
        assert!(text.contains("    var tempValue = value.value;\n    tempValue++;\n    return new global::W(tempValue);\n"));
    }

    #[test]
    fn unary_and_shift() {
        let neg = render(
            OperatorPlan {
                kind: OperatorKind::UnaryMinus,
                args: vec![Shape::Wrapper],
                ret: Shape::Wrapper,
            },
            &int(),
        );
        assert!(neg.contains("return new global::W(-(value.value));"));
        let shl = render(
            OperatorPlan {
                kind: OperatorKind::LeftShift,
                args: vec![Shape::Wrapper, Shape::raw("int")],
                ret: Shape::Wrapper,
            },
            &int(),
        );
        assert!(shl.contains("operator <<(global::W left, int right)"));
        assert!(shl.contains("return new global::W(left.value << right);"));
    }

    #[test]
    fn enum_shift_casts_through_integral() {
        let mut e = TypeRef::new("global::Flags", TypeCategory::Enum, TypeKind::Enum);
        e.enum_underlying = Some(TypeCategory::UInt16);
        let text = render(
            OperatorPlan {
                kind: OperatorKind::RightShift,
                args: vec![Shape::Wrapper, Shape::raw("int")],
                ret: Shape::Wrapper,
            },
            &spec(e),
        );
        assert!(text.contains("return new global::W((global::Flags)((ushort)left.value >> right));"));
    }

    #[test]
    fn bool_true_false() {
        let b = spec(TypeRef::new("bool", TypeCategory::Boolean, TypeKind::Struct));
        let t = render(
            OperatorPlan {
                kind: OperatorKind::True,
                args: vec![Shape::Wrapper],
                ret: Shape::raw("bool"),
            },
            &b,
        );
        assert!(t.contains("public static bool operator true(global::W value)\n{\n    return value.value;\n}"));
        let f = render(
            OperatorPlan {
                kind: OperatorKind::False,
                args: vec![Shape::Wrapper],
                ret: Shape::raw("bool"),
            },
            &b,
        );
        assert!(f.contains("return !value.value;"));
    }
}
