//! Arithmetic operators and the moves built from them.
//!
//! A move consumes two available numbers and produces one. Operand order
//! matters for subtraction and division, so a move always stores them as
//! an ordered pair `(a, b)` meaning `a op b`.

use std::fmt;
use std::str::FromStr;

/// One of the four puzzle operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    /// All operators, in the order legal moves are generated.
    pub const ALL: [Op; 4] = [Op::Add, Op::Sub, Op::Mul, Op::Div];

    /// Applies the operator to `a` and `b`.
    ///
    /// Returns `None` when the result is not a non-negative integer:
    /// subtraction below zero, inexact or by-zero division, or overflow.
    #[inline]
    pub fn apply(self, a: u64, b: u64) -> Option<u64> {
        match self {
            Op::Add => a.checked_add(b),
            Op::Sub => a.checked_sub(b),
            Op::Mul => a.checked_mul(b),
            Op::Div => {
                if b == 0 || a % b != 0 {
                    None
                } else {
                    Some(a / b)
                }
            }
        }
    }

    /// Whether swapping the operands leaves the result unchanged.
    pub const fn is_commutative(self) -> bool {
        matches!(self, Op::Add | Op::Mul)
    }

    pub const fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Op {
    type Err = String;

    /// Accepts either the operator symbol or its name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "+" | "add" => Ok(Op::Add),
            "-" | "sub" => Ok(Op::Sub),
            "*" | "x" | "mul" => Ok(Op::Mul),
            "/" | "div" => Ok(Op::Div),
            other => Err(format!("unknown operator '{other}' (expected + - * /)")),
        }
    }
}

/// An operator applied to an ordered pair of operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub op: Op,
    pub a: u64,
    pub b: u64,
}

impl Move {
    pub const fn new(op: Op, a: u64, b: u64) -> Self {
        Self { op, a, b }
    }

    /// The value this move produces, if the arithmetic is valid at all.
    #[inline]
    pub fn result(&self) -> Option<u64> {
        self.op.apply(self.a, self.b)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.a, self.op, self.b)
    }
}
