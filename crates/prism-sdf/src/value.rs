//! Parameter expressions.
//!
//! A `Value<P>` is a tiny expression over constants and named parameters of
//! type `P` (one enum per scene variant). Trees store expressions, not
//! numbers, so changing a parameter is picked up on the next evaluation
//! without rebuilding the tree.

use core::ops::{Add, Mul, Neg, Sub};

use glam::Vec2;

/// Scalar expression bound to parameters of type `P`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<P> {
    Const(f32),
    Param(P),
    Add(Box<Value<P>>, Box<Value<P>>),
    Mul(Box<Value<P>>, Box<Value<P>>),
    Sin(Box<Value<P>>),
    Cos(Box<Value<P>>),
}

impl<P: Copy> Value<P> {
    #[inline]
    pub fn param(p: P) -> Self {
        Value::Param(p)
    }

    pub fn sin(self) -> Self {
        Value::Sin(Box::new(self))
    }

    pub fn cos(self) -> Self {
        Value::Cos(Box::new(self))
    }

    /// Evaluates the expression with the current parameter values.
    pub fn eval<F>(&self, params: &F) -> f32
    where
        F: Fn(P) -> f32,
    {
        match self {
            Value::Const(v) => *v,
            Value::Param(p) => params(*p),
            Value::Add(a, b) => a.eval(params) + b.eval(params),
            Value::Mul(a, b) => a.eval(params) * b.eval(params),
            Value::Sin(a) => a.eval(params).sin(),
            Value::Cos(a) => a.eval(params).cos(),
        }
    }

    /// Returns `false` if any constant is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        match self {
            Value::Const(v) => v.is_finite(),
            Value::Param(_) => true,
            Value::Add(a, b) | Value::Mul(a, b) => a.is_finite() && b.is_finite(),
            Value::Sin(a) | Value::Cos(a) => a.is_finite(),
        }
    }
}

impl<P> From<f32> for Value<P> {
    #[inline]
    fn from(v: f32) -> Self {
        Value::Const(v)
    }
}

impl<P> Add for Value<P> {
    type Output = Value<P>;
    fn add(self, rhs: Value<P>) -> Value<P> {
        Value::Add(Box::new(self), Box::new(rhs))
    }
}

impl<P> Add<f32> for Value<P> {
    type Output = Value<P>;
    fn add(self, rhs: f32) -> Value<P> {
        self + Value::Const(rhs)
    }
}

impl<P> Sub<f32> for Value<P> {
    type Output = Value<P>;
    fn sub(self, rhs: f32) -> Value<P> {
        self + Value::Const(-rhs)
    }
}

impl<P> Mul for Value<P> {
    type Output = Value<P>;
    fn mul(self, rhs: Value<P>) -> Value<P> {
        Value::Mul(Box::new(self), Box::new(rhs))
    }
}

impl<P> Mul<f32> for Value<P> {
    type Output = Value<P>;
    fn mul(self, rhs: f32) -> Value<P> {
        self * Value::Const(rhs)
    }
}

impl<P> Neg for Value<P> {
    type Output = Value<P>;
    fn neg(self) -> Value<P> {
        self * Value::Const(-1.0)
    }
}

/// 2D vector of parameter expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct V2<P> {
    pub x: Value<P>,
    pub y: Value<P>,
}

impl<P: Copy> V2<P> {
    #[inline]
    pub fn new(x: impl Into<Value<P>>, y: impl Into<Value<P>>) -> Self {
        Self { x: x.into(), y: y.into() }
    }

    #[inline]
    pub fn splat(v: Value<P>) -> Self {
        Self { x: v.clone(), y: v }
    }

    pub fn eval<F>(&self, params: &F) -> Vec2
    where
        F: Fn(P) -> f32,
    {
        Vec2::new(self.x.eval(params), self.y.eval(params))
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl<P> From<Vec2> for V2<P> {
    fn from(v: Vec2) -> Self {
        Self { x: Value::Const(v.x), y: Value::Const(v.y) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Copy, Clone, PartialEq)]
    enum P {
        Time,
        Radius,
    }

    fn params(p: P) -> f32 {
        match p {
            P::Time => 2.0,
            P::Radius => 0.25,
        }
    }

    #[test]
    fn expressions_read_current_parameters() {
        let v = Value::param(P::Radius) * 2.0 + 1.0;
        assert_eq!(v.eval(&params), 1.5);

        let bumped = |p: P| if p == P::Radius { 0.5 } else { params(p) };
        assert_eq!(v.eval(&bumped), 2.0);
    }

    #[test]
    fn trig_and_negation() {
        let v = -(Value::param(P::Time) * 0.0).cos();
        assert_eq!(v.eval(&params), -1.0);
        let s = (Value::<P>::Const(0.0)).sin();
        assert_eq!(s.eval(&params), 0.0);
    }

    #[test]
    fn finiteness_checks_constants_only() {
        assert!((Value::param(P::Time) * 3.0).is_finite());
        assert!(!(Value::<P>::Const(f32::NAN) + 1.0).is_finite());
        assert!(!V2::<P>::new(0.0, f32::INFINITY).is_finite());
    }
}
