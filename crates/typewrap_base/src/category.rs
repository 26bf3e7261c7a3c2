//! Built-in operator and interface tables per underlying category.

use crate::model::TypeCategory;
use crate::operators::{OperatorKind, OperatorKind::*, OperatorSet};
use crate::plan::InterfaceKind;

const RELATIONAL: [OperatorKind; 6] = [Equal, NotEqual, Greater, Lesser, GreaterEqual, LesserEqual];

impl TypeCategory {
    pub fn is_integral(self) -> bool {
        self.integral_keyword().is_some()
    }

    /// Keyword spelling of integral categories, used for enum arithmetic.
    pub fn integral_keyword(self) -> Option<&'static str> {
        Some(match self {
            TypeCategory::SByte => "sbyte",
            TypeCategory::Byte => "byte",
            TypeCategory::Int16 => "short",
            TypeCategory::UInt16 => "ushort",
            TypeCategory::Int32 => "int",
            TypeCategory::UInt32 => "uint",
            TypeCategory::Int64 => "long",
            TypeCategory::UInt64 => "ulong",
            _ => return None,
        })
    }

    /// Operators the language defines for this category. Empty for
    /// categories whose operators can only come from user-defined methods.
    pub fn default_operators(self) -> OperatorSet {
        let mut ops = OperatorSet::new();
        match self {
            TypeCategory::Enum => {
                ops.extend([
                    OnesComplement,
                    Increment,
                    Decrement,
                    Addition,
                    Subtraction,
                    BitwiseAnd,
                    BitwiseOr,
                    BitwiseXor,
                    LeftShift,
                    RightShift,
                ]);
                ops.extend(RELATIONAL);
            }
            TypeCategory::Char
            | TypeCategory::SByte
            | TypeCategory::Byte
            | TypeCategory::Int16
            | TypeCategory::Int32
            | TypeCategory::Int64
            | TypeCategory::UInt16
            | TypeCategory::UInt32
            | TypeCategory::UInt64 => {
                ops.extend([
                    UnaryPlus,
                    UnaryMinus,
                    OnesComplement,
                    Increment,
                    Decrement,
                    Addition,
                    Subtraction,
                    Multiplication,
                    Division,
                    Remainder,
                    BitwiseAnd,
                    BitwiseOr,
                    BitwiseXor,
                    LeftShift,
                    RightShift,
                ]);
                ops.extend(RELATIONAL);
            }
            TypeCategory::Decimal => {
                ops.extend([
                    UnaryPlus,
                    UnaryMinus,
                    Increment,
                    Decrement,
                    Addition,
                    Subtraction,
                    Multiplication,
                    Division,
                    Remainder,
                ]);
                ops.extend(RELATIONAL);
            }
            TypeCategory::Single | TypeCategory::Double | TypeCategory::IntPtr | TypeCategory::UIntPtr => {
                ops.extend([Addition, Subtraction, Multiplication, Division, Remainder]);
                ops.extend(RELATIONAL);
            }
            TypeCategory::Boolean => {
                ops.extend([Negation, True, False, LogicalAnd, LogicalOr, LogicalXor, Equal, NotEqual]);
            }
            TypeCategory::String => {
                ops.extend([Addition, Equal, NotEqual]);
            }
            TypeCategory::Object
            | TypeCategory::Delegate
            | TypeCategory::Array
            | TypeCategory::Collection
            | TypeCategory::Disposable => {
                ops.extend([Equal, NotEqual]);
            }
            TypeCategory::Other => {}
        }
        ops
    }

    pub fn default_interfaces(self) -> Vec<InterfaceKind> {
        match self {
            TypeCategory::Enum
            | TypeCategory::Char
            | TypeCategory::SByte
            | TypeCategory::Byte
            | TypeCategory::Int16
            | TypeCategory::Int32
            | TypeCategory::Int64
            | TypeCategory::UInt16
            | TypeCategory::UInt32
            | TypeCategory::UInt64
            | TypeCategory::Single
            | TypeCategory::Double
            | TypeCategory::Boolean
            | TypeCategory::String
            | TypeCategory::Object => vec![InterfaceKind::Equatable, InterfaceKind::Comparable],
            TypeCategory::IntPtr | TypeCategory::UIntPtr => vec![InterfaceKind::Equatable],
            _ => Vec::new(),
        }
    }
}
