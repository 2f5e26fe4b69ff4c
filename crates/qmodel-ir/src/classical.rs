//! Classical expressions and predicates.
//!
//! These are evaluated when a model is lowered, against a [`ClassicalEnv`]
//! of integer inputs. They never observe quantum state.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::error::{IrError, IrResult};

/// Integer-valued classical expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassicalExpr {
    /// Integer literal.
    Int(i64),
    /// Named classical variable.
    Var(String),
    /// Addition.
    Add(Box<ClassicalExpr>, Box<ClassicalExpr>),
    /// Subtraction.
    Sub(Box<ClassicalExpr>, Box<ClassicalExpr>),
    /// Multiplication.
    Mul(Box<ClassicalExpr>, Box<ClassicalExpr>),
    /// Euclidean remainder; the result is never negative.
    Mod(Box<ClassicalExpr>, Box<ClassicalExpr>),
}

impl ClassicalExpr {
    /// Integer literal.
    pub fn int(value: i64) -> Self {
        ClassicalExpr::Int(value)
    }

    /// Variable reference.
    pub fn var(name: impl Into<String>) -> Self {
        ClassicalExpr::Var(name.into())
    }

    /// `self + rhs`.
    #[must_use]
    pub fn plus(self, rhs: impl Into<ClassicalExpr>) -> Self {
        ClassicalExpr::Add(Box::new(self), Box::new(rhs.into()))
    }

    /// `self - rhs`.
    #[must_use]
    pub fn minus(self, rhs: impl Into<ClassicalExpr>) -> Self {
        ClassicalExpr::Sub(Box::new(self), Box::new(rhs.into()))
    }

    /// `self * rhs`.
    #[must_use]
    pub fn times(self, rhs: impl Into<ClassicalExpr>) -> Self {
        ClassicalExpr::Mul(Box::new(self), Box::new(rhs.into()))
    }

    /// `self mod rhs`.
    #[must_use]
    pub fn modulo(self, rhs: impl Into<ClassicalExpr>) -> Self {
        ClassicalExpr::Mod(Box::new(self), Box::new(rhs.into()))
    }

    /// `self == rhs`.
    pub fn equals(self, rhs: impl Into<ClassicalExpr>) -> Predicate {
        Predicate::compare(self, CmpOp::Eq, rhs)
    }

    /// `self != rhs`.
    pub fn not_equals(self, rhs: impl Into<ClassicalExpr>) -> Predicate {
        Predicate::compare(self, CmpOp::Ne, rhs)
    }

    /// `self < rhs`.
    pub fn less_than(self, rhs: impl Into<ClassicalExpr>) -> Predicate {
        Predicate::compare(self, CmpOp::Lt, rhs)
    }

    /// `self <= rhs`.
    pub fn at_most(self, rhs: impl Into<ClassicalExpr>) -> Predicate {
        Predicate::compare(self, CmpOp::Le, rhs)
    }

    /// `self > rhs`.
    pub fn greater_than(self, rhs: impl Into<ClassicalExpr>) -> Predicate {
        Predicate::compare(self, CmpOp::Gt, rhs)
    }

    /// `self >= rhs`.
    pub fn at_least(self, rhs: impl Into<ClassicalExpr>) -> Predicate {
        Predicate::compare(self, CmpOp::Ge, rhs)
    }

    /// Evaluate against `env`.
    pub fn evaluate(&self, env: &ClassicalEnv) -> IrResult<i64> {
        match self {
            ClassicalExpr::Int(v) => Ok(*v),
            ClassicalExpr::Var(name) => env
                .get(name)
                .ok_or_else(|| IrError::UnboundVariable(name.clone())),
            ClassicalExpr::Add(a, b) => checked(a.evaluate(env)?.checked_add(b.evaluate(env)?)),
            ClassicalExpr::Sub(a, b) => checked(a.evaluate(env)?.checked_sub(b.evaluate(env)?)),
            ClassicalExpr::Mul(a, b) => checked(a.evaluate(env)?.checked_mul(b.evaluate(env)?)),
            ClassicalExpr::Mod(a, b) => {
                let lhs = a.evaluate(env)?;
                let rhs = b.evaluate(env)?;
                if rhs == 0 {
                    return Err(IrError::DivisionByZero);
                }
                checked(lhs.checked_rem_euclid(rhs))
            }
        }
    }

    fn collect_variables(&self, set: &mut BTreeSet<String>) {
        match self {
            ClassicalExpr::Int(_) => {}
            ClassicalExpr::Var(name) => {
                set.insert(name.clone());
            }
            ClassicalExpr::Add(a, b)
            | ClassicalExpr::Sub(a, b)
            | ClassicalExpr::Mul(a, b)
            | ClassicalExpr::Mod(a, b) => {
                a.collect_variables(set);
                b.collect_variables(set);
            }
        }
    }
}

fn checked(value: Option<i64>) -> IrResult<i64> {
    value.ok_or(IrError::ArithmeticOverflow)
}

impl From<i64> for ClassicalExpr {
    fn from(value: i64) -> Self {
        ClassicalExpr::Int(value)
    }
}

impl From<i32> for ClassicalExpr {
    fn from(value: i32) -> Self {
        ClassicalExpr::Int(i64::from(value))
    }
}

impl From<u32> for ClassicalExpr {
    fn from(value: u32) -> Self {
        ClassicalExpr::Int(i64::from(value))
    }
}

impl From<&str> for ClassicalExpr {
    fn from(name: &str) -> Self {
        ClassicalExpr::Var(name.to_string())
    }
}

impl fmt::Display for ClassicalExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassicalExpr::Int(v) => write!(f, "{v}"),
            ClassicalExpr::Var(name) => write!(f, "{name}"),
            ClassicalExpr::Add(a, b) => write!(f, "({a} + {b})"),
            ClassicalExpr::Sub(a, b) => write!(f, "({a} - {b})"),
            ClassicalExpr::Mul(a, b) => write!(f, "({a} * {b})"),
            ClassicalExpr::Mod(a, b) => write!(f, "({a} % {b})"),
        }
    }
}

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmpOp {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl CmpOp {
    fn apply(self, lhs: i64, rhs: i64) -> bool {
        match self {
            CmpOp::Eq => lhs == rhs,
            CmpOp::Ne => lhs != rhs,
            CmpOp::Lt => lhs < rhs,
            CmpOp::Le => lhs <= rhs,
            CmpOp::Gt => lhs > rhs,
            CmpOp::Ge => lhs >= rhs,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
        }
    }
}

/// Boolean predicate over classical expressions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Predicate {
    /// Literal truth value.
    Bool(bool),
    /// Comparison of two expressions.
    Compare {
        /// Left operand.
        lhs: ClassicalExpr,
        /// Operator.
        op: CmpOp,
        /// Right operand.
        rhs: ClassicalExpr,
    },
    /// Conjunction.
    And(Box<Predicate>, Box<Predicate>),
    /// Disjunction.
    Or(Box<Predicate>, Box<Predicate>),
    /// Negation.
    Not(Box<Predicate>),
}

impl Predicate {
    /// Build a comparison.
    pub fn compare(
        lhs: impl Into<ClassicalExpr>,
        op: CmpOp,
        rhs: impl Into<ClassicalExpr>,
    ) -> Self {
        Predicate::Compare {
            lhs: lhs.into(),
            op,
            rhs: rhs.into(),
        }
    }

    /// `self && rhs`.
    #[must_use]
    pub fn and(self, rhs: Predicate) -> Self {
        Predicate::And(Box::new(self), Box::new(rhs))
    }

    /// `self || rhs`.
    #[must_use]
    pub fn or(self, rhs: Predicate) -> Self {
        Predicate::Or(Box::new(self), Box::new(rhs))
    }

    /// `!self`.
    #[must_use]
    pub fn negate(self) -> Self {
        Predicate::Not(Box::new(self))
    }

    /// Evaluate against `env`.
    ///
    /// `and`/`or` short-circuit, so the untaken side may reference
    /// variables that are unbound.
    pub fn evaluate(&self, env: &ClassicalEnv) -> IrResult<bool> {
        match self {
            Predicate::Bool(b) => Ok(*b),
            Predicate::Compare { lhs, op, rhs } => {
                Ok(op.apply(lhs.evaluate(env)?, rhs.evaluate(env)?))
            }
            Predicate::And(a, b) => Ok(a.evaluate(env)? && b.evaluate(env)?),
            Predicate::Or(a, b) => Ok(a.evaluate(env)? || b.evaluate(env)?),
            Predicate::Not(p) => Ok(!p.evaluate(env)?),
        }
    }

    /// All variable names this predicate references.
    pub fn variables(&self) -> BTreeSet<String> {
        let mut set = BTreeSet::new();
        self.collect_variables(&mut set);
        set
    }

    fn collect_variables(&self, set: &mut BTreeSet<String>) {
        match self {
            Predicate::Bool(_) => {}
            Predicate::Compare { lhs, rhs, .. } => {
                lhs.collect_variables(set);
                rhs.collect_variables(set);
            }
            Predicate::And(a, b) | Predicate::Or(a, b) => {
                a.collect_variables(set);
                b.collect_variables(set);
            }
            Predicate::Not(p) => p.collect_variables(set),
        }
    }
}

impl From<bool> for Predicate {
    fn from(value: bool) -> Self {
        Predicate::Bool(value)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Bool(b) => write!(f, "{b}"),
            Predicate::Compare { lhs, op, rhs } => write!(f, "{lhs} {} {rhs}", op.symbol()),
            Predicate::And(a, b) => write!(f, "({a} && {b})"),
            Predicate::Or(a, b) => write!(f, "({a} || {b})"),
            Predicate::Not(p) => write!(f, "!({p})"),
        }
    }
}

/// Values of classical variables supplied at lowering time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassicalEnv {
    values: FxHashMap<String, i64>,
}

impl ClassicalEnv {
    /// Empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: i64) -> Self {
        self.set(name, value);
        self
    }

    /// Bind `name` to `value`, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: i64) -> Option<i64> {
        self.values.insert(name.into(), value)
    }

    /// Remove a binding.
    pub fn unset(&mut self, name: &str) -> Option<i64> {
        self.values.remove(name)
    }

    /// Look up a variable.
    pub fn get(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }

    /// Number of bound variables.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no variable is bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for ClassicalEnv {
    fn from_iter<T: IntoIterator<Item = (K, i64)>>(iter: T) -> Self {
        let mut env = ClassicalEnv::new();
        for (k, v) in iter {
            env.set(k, v);
        }
        env
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expr_evaluation() {
        let env = ClassicalEnv::new().with("n", 7);
        let expr = ClassicalExpr::var("n").times(2).plus(1);
        assert_eq!(expr.evaluate(&env).unwrap(), 15);
        assert_eq!(expr.to_string(), "((n * 2) + 1)");
    }

    #[test]
    fn test_mod_is_euclidean() {
        let env = ClassicalEnv::new();
        let expr = ClassicalExpr::int(-3).modulo(2);
        assert_eq!(expr.evaluate(&env).unwrap(), 1);
    }

    #[test]
    fn test_mod_by_zero() {
        let env = ClassicalEnv::new();
        let err = ClassicalExpr::int(4).modulo(0).evaluate(&env).unwrap_err();
        assert!(matches!(err, IrError::DivisionByZero));
    }

    #[test]
    fn test_overflow_is_reported() {
        let env = ClassicalEnv::new();
        let err = ClassicalExpr::int(i64::MAX)
            .plus(1)
            .evaluate(&env)
            .unwrap_err();
        assert!(matches!(err, IrError::ArithmeticOverflow));
    }

    #[test]
    fn test_unbound_variable() {
        let err = ClassicalExpr::var("missing")
            .evaluate(&ClassicalEnv::new())
            .unwrap_err();
        assert!(matches!(err, IrError::UnboundVariable(name) if name == "missing"));
    }

    #[test]
    fn test_predicate_combinators() {
        let env: ClassicalEnv = [("a", 2), ("b", 5)].into_iter().collect();
        let p = ClassicalExpr::var("a")
            .less_than("b")
            .and(ClassicalExpr::var("a").modulo(2).equals(0));
        assert!(p.evaluate(&env).unwrap());
        assert!(!p.clone().negate().evaluate(&env).unwrap());
        assert_eq!(
            p.variables().into_iter().collect::<Vec<_>>(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_predicate_short_circuits() {
        let p = Predicate::Bool(false).and(ClassicalExpr::var("ghost").equals(1));
        assert!(!p.evaluate(&ClassicalEnv::new()).unwrap());

        let q = Predicate::Bool(true).or(ClassicalExpr::var("ghost").equals(1));
        assert!(q.evaluate(&ClassicalEnv::new()).unwrap());
    }

    #[test]
    fn test_env_set_and_unset() {
        let mut env = ClassicalEnv::new();
        assert!(env.is_empty());
        assert_eq!(env.set("i", 3), None);
        assert_eq!(env.set("i", 4), Some(3));
        assert_eq!(env.get("i"), Some(4));
        assert_eq!(env.unset("i"), Some(4));
        assert!(env.is_empty());
    }
}
