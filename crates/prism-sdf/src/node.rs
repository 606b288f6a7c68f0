//! Composition tree.
//!
//! A `Node<P>` is an owned, acyclic tree of primitives and combinators. Its
//! parameters are [`Value<P>`] expressions, so one tree serves every frame:
//! callers pass a resolver for the current parameter values.

use glam::Vec2;

use crate::ops;
use crate::primitives as prim;
use crate::value::{Value, V2};

/// Distance-field composition tree over parameters of type `P`.
///
/// Primitives are centered at the origin; use [`Node::at`] to place them.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<P> {
    Circle { radius: Value<P> },
    Ellipse { radii: V2<P>, angle: Value<P> },
    Box { half_extents: V2<P>, angle: Value<P> },
    Moon { radius: Value<P>, angle: Value<P> },
    Flower { radius: Value<P>, petals: u32, amplitude: Value<P> },
    Butterfly { size: Value<P>, flap: Value<P> },
    Line { a: V2<P>, b: V2<P>, thickness: Value<P> },

    Union(Box<Node<P>>, Box<Node<P>>),
    Intersection(Box<Node<P>>, Box<Node<P>>),
    Subtraction(Box<Node<P>>, Box<Node<P>>),
    SmoothUnion { a: Box<Node<P>>, b: Box<Node<P>>, k: Value<P> },

    Translate { offset: V2<P>, child: Box<Node<P>> },
    /// Infinite repetition along x with a constant period.
    RepeatX { period: f32, child: Box<Node<P>> },
}

impl<P: Copy> Node<P> {
    // ── constructors ──────────────────────────────────────────────────────

    pub fn circle(radius: impl Into<Value<P>>) -> Self {
        Node::Circle { radius: radius.into() }
    }

    pub fn ellipse(radii: V2<P>, angle: impl Into<Value<P>>) -> Self {
        Node::Ellipse { radii, angle: angle.into() }
    }

    pub fn rect(half_extents: V2<P>, angle: impl Into<Value<P>>) -> Self {
        Node::Box { half_extents, angle: angle.into() }
    }

    pub fn moon(radius: impl Into<Value<P>>, angle: impl Into<Value<P>>) -> Self {
        Node::Moon { radius: radius.into(), angle: angle.into() }
    }

    pub fn flower(radius: impl Into<Value<P>>, petals: u32, amplitude: impl Into<Value<P>>) -> Self {
        Node::Flower { radius: radius.into(), petals, amplitude: amplitude.into() }
    }

    pub fn butterfly(size: impl Into<Value<P>>, flap: impl Into<Value<P>>) -> Self {
        Node::Butterfly { size: size.into(), flap: flap.into() }
    }

    pub fn line(a: V2<P>, b: V2<P>, thickness: impl Into<Value<P>>) -> Self {
        Node::Line { a, b, thickness: thickness.into() }
    }

    // ── combinators ───────────────────────────────────────────────────────

    pub fn at(self, offset: V2<P>) -> Self {
        Node::Translate { offset, child: Box::new(self) }
    }

    pub fn repeat_x(self, period: f32) -> Self {
        Node::RepeatX { period, child: Box::new(self) }
    }

    pub fn union(self, other: Node<P>) -> Self {
        Node::Union(Box::new(self), Box::new(other))
    }

    pub fn intersect(self, other: Node<P>) -> Self {
        Node::Intersection(Box::new(self), Box::new(other))
    }

    pub fn subtract(self, other: Node<P>) -> Self {
        Node::Subtraction(Box::new(self), Box::new(other))
    }

    pub fn smooth_union(self, other: Node<P>, k: impl Into<Value<P>>) -> Self {
        Node::SmoothUnion { a: Box::new(self), b: Box::new(other), k: k.into() }
    }

    /// Unions a fixed set of nodes left to right.
    ///
    /// Returns `None` for an empty set.
    pub fn union_all<I>(nodes: I) -> Option<Self>
    where
        I: IntoIterator<Item = Node<P>>,
    {
        nodes.into_iter().reduce(Self::union)
    }

    // ── queries ───────────────────────────────────────────────────────────

    /// Evaluates the tree at `p` with the current parameter values.
    pub fn eval<F>(&self, p: Vec2, params: &F) -> f32
    where
        F: Fn(P) -> f32,
    {
        match self {
            Node::Circle { radius } => prim::sdf_circle(p, radius.eval(params)),
            Node::Ellipse { radii, angle } => {
                prim::sdf_ellipse(p, radii.eval(params), angle.eval(params))
            }
            Node::Box { half_extents, angle } => {
                prim::sdf_box(p, half_extents.eval(params), angle.eval(params))
            }
            Node::Moon { radius, angle } => {
                prim::sdf_moon(p, radius.eval(params), angle.eval(params))
            }
            Node::Flower { radius, petals, amplitude } => prim::sdf_flower(
                p,
                radius.eval(params),
                *petals as f32,
                amplitude.eval(params),
            ),
            Node::Butterfly { size, flap } => {
                prim::sdf_butterfly(p, size.eval(params), flap.eval(params))
            }
            Node::Line { a, b, thickness } => {
                prim::sdf_line(p, a.eval(params), b.eval(params), thickness.eval(params))
            }
            Node::Union(a, b) => ops::union(a.eval(p, params), b.eval(p, params)),
            Node::Intersection(a, b) => ops::intersection(a.eval(p, params), b.eval(p, params)),
            Node::Subtraction(a, b) => ops::subtraction(a.eval(p, params), b.eval(p, params)),
            Node::SmoothUnion { a, b, k } => {
                ops::smooth_union(a.eval(p, params), b.eval(p, params), k.eval(params))
            }
            Node::Translate { offset, child } => child.eval(p - offset.eval(params), params),
            Node::RepeatX { period, child } => child.eval(prim::repeat_x(p, *period), params),
        }
    }

    /// Number of primitive leaves. Evaluation cost is linear in this count.
    pub fn primitive_count(&self) -> usize {
        match self {
            Node::Circle { .. }
            | Node::Ellipse { .. }
            | Node::Box { .. }
            | Node::Moon { .. }
            | Node::Flower { .. }
            | Node::Butterfly { .. }
            | Node::Line { .. } => 1,
            Node::Union(a, b) | Node::Intersection(a, b) | Node::Subtraction(a, b) => {
                a.primitive_count() + b.primitive_count()
            }
            Node::SmoothUnion { a, b, .. } => a.primitive_count() + b.primitive_count(),
            Node::Translate { child, .. } | Node::RepeatX { child, .. } => child.primitive_count(),
        }
    }

    /// Returns `false` if any constant in the tree is non-finite or a
    /// repetition period is not strictly positive.
    pub fn is_well_formed(&self) -> bool {
        match self {
            Node::Circle { radius } => radius.is_finite(),
            Node::Ellipse { radii, angle } => radii.is_finite() && angle.is_finite(),
            Node::Box { half_extents, angle } => half_extents.is_finite() && angle.is_finite(),
            Node::Moon { radius, angle } => radius.is_finite() && angle.is_finite(),
            Node::Flower { radius, amplitude, .. } => radius.is_finite() && amplitude.is_finite(),
            Node::Butterfly { size, flap } => size.is_finite() && flap.is_finite(),
            Node::Line { a, b, thickness } => a.is_finite() && b.is_finite() && thickness.is_finite(),
            Node::Union(a, b) | Node::Intersection(a, b) | Node::Subtraction(a, b) => {
                a.is_well_formed() && b.is_well_formed()
            }
            Node::SmoothUnion { a, b, k } => a.is_well_formed() && b.is_well_formed() && k.is_finite(),
            Node::Translate { offset, child } => offset.is_finite() && child.is_well_formed(),
            Node::RepeatX { period, child } => {
                period.is_finite() && *period > 0.0 && child.is_well_formed()
            }
        }
    }
}
