use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Every operator a wrapper can forward. Declaration order is emission order.
#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone, Copy, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum OperatorKind {
    UnaryPlus,
    UnaryMinus,
    Negation,
    OnesComplement,
    Increment,
    Decrement,
    True,
    False,
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Remainder,
    LogicalAnd,
    LogicalOr,
    LogicalXor,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    LeftShift,
    RightShift,
    UnsignedRightShift,
    Equal,
    NotEqual,
    Greater,
    Lesser,
    GreaterEqual,
    LesserEqual,
}

pub type OperatorSet = BTreeSet<OperatorKind>;

use OperatorKind::*;

impl OperatorKind {
    pub const ALL: [OperatorKind; 28] = [
        UnaryPlus,
        UnaryMinus,
        Negation,
        OnesComplement,
        Increment,
        Decrement,
        True,
        False,
        Addition,
        Subtraction,
        Multiplication,
        Division,
        Remainder,
        LogicalAnd,
        LogicalOr,
        LogicalXor,
        BitwiseAnd,
        BitwiseOr,
        BitwiseXor,
        LeftShift,
        RightShift,
        UnsignedRightShift,
        Equal,
        NotEqual,
        Greater,
        Lesser,
        GreaterEqual,
        LesserEqual,
    ];

    pub fn token(self) -> &'static str {
        match self {
            UnaryPlus | Addition => "+",
            UnaryMinus | Subtraction => "-",
            Negation => "!",
            OnesComplement => "~",
            Increment => "++",
            Decrement => "--",
            True => "true",
            False => "false",
            Multiplication => "*",
            Division => "/",
            Remainder => "%",
            LogicalAnd | BitwiseAnd => "&",
            LogicalOr | BitwiseOr => "|",
            LogicalXor | BitwiseXor => "^",
            LeftShift => "<<",
            RightShift => ">>",
            UnsignedRightShift => ">>>",
            Equal => "==",
            NotEqual => "!=",
            Greater => ">",
            Lesser => "<",
            GreaterEqual => ">=",
            LesserEqual => "<=",
        }
    }

    /// Metadata name of the user-defined operator method.
    pub fn method_name(self) -> &'static str {
        match self {
            UnaryPlus => "op_UnaryPlus",
            UnaryMinus => "op_UnaryNegation",
            Negation => "op_LogicalNot",
            OnesComplement => "op_OnesComplement",
            Increment => "op_Increment",
            Decrement => "op_Decrement",
            True => "op_True",
            False => "op_False",
            Addition => "op_Addition",
            Subtraction => "op_Subtraction",
            Multiplication => "op_Multiply",
            Division => "op_Division",
            Remainder => "op_Modulus",
            LogicalAnd | BitwiseAnd => "op_BitwiseAnd",
            LogicalOr | BitwiseOr => "op_BitwiseOr",
            LogicalXor | BitwiseXor => "op_ExclusiveOr",
            LeftShift => "op_LeftShift",
            RightShift => "op_RightShift",
            UnsignedRightShift => "op_UnsignedRightShift",
            Equal => "op_Equality",
            NotEqual => "op_Inequality",
            Greater => "op_GreaterThan",
            Lesser => "op_LessThan",
            GreaterEqual => "op_GreaterThanOrEqual",
            LesserEqual => "op_LessThanOrEqual",
        }
    }

    /// Maps a static method name back to its operator. The `&`, `|` and `^`
    /// methods are logical when they return `bool`.
    pub fn from_method(name: &str, returns_bool: bool) -> Option<OperatorKind> {
        let kind = match name {
            "op_BitwiseAnd" if returns_bool => LogicalAnd,
            "op_BitwiseOr" if returns_bool => LogicalOr,
            "op_ExclusiveOr" if returns_bool => LogicalXor,
            other => *Self::ALL
                .iter()
                .filter(|k| !k.is_logical())
                .find(|k| k.method_name() == other)?,
        };
        Some(kind)
    }

    pub fn arity(self) -> usize {
        match self {
            UnaryPlus | UnaryMinus | Negation | OnesComplement | Increment | Decrement | True | False => 1,
            _ => 2,
        }
    }

    pub fn is_unary(self) -> bool {
        self.arity() == 1
    }

    pub fn is_logical(self) -> bool {
        matches!(self, LogicalAnd | LogicalOr | LogicalXor)
    }

    pub fn is_shift(self) -> bool {
        matches!(self, LeftShift | RightShift | UnsignedRightShift)
    }

    pub fn is_relational(self) -> bool {
        matches!(self, Equal | NotEqual | Greater | Lesser | GreaterEqual | LesserEqual)
    }

    /// Kinds whose result is a plain `bool` no matter what the operands are.
    pub fn returns_raw_bool(self) -> bool {
        matches!(self, True | False) || self.is_logical() || self.is_relational()
    }
}

impl std::fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "operator {}", self.token())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn all_is_in_declaration_order() {
        let sorted: Vec<_> = OperatorSet::from(OperatorKind::ALL).into_iter().collect();
        assert_eq!(sorted, OperatorKind::ALL.to_vec());
    }

    #[test]
    fn bool_returning_bitwise_methods_are_logical() {
        assert_eq!(OperatorKind::from_method("op_BitwiseAnd", true), Some(LogicalAnd));
        assert_eq!(OperatorKind::from_method("op_BitwiseAnd", false), Some(BitwiseAnd));
        assert_eq!(OperatorKind::from_method("op_ExclusiveOr", true), Some(LogicalXor));
        assert_eq!(OperatorKind::from_method("op_Equality", true), Some(Equal));
        assert_eq!(OperatorKind::from_method("op_Implicit", false), None);
    }

    #[test]
    fn raw_bool_kinds() {
        let raw = OperatorKind::ALL.iter().filter(|k| k.returns_raw_bool()).count();
        assert_eq!(raw, 11);
        assert!(!Negation.returns_raw_bool());
        assert_eq!(UnsignedRightShift.token(), ">>>");
    }
}
