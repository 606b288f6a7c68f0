//! WGSL emission.
//!
//! [`LIBRARY`] contains WGSL twins of every function in
//! [`primitives`](crate::primitives) and [`ops`](crate::ops). Trees are
//! emitted as a single expression that calls into the library, with
//! parameters rendered by a caller-supplied closure (usually a uniform slot
//! read such as `u.params[1].z`).

use crate::node::Node;
use crate::value::{Value, V2};

/// WGSL source of the distance function library.
pub const LIBRARY: &str = r#"
fn sdf_rotate(p: vec2<f32>, angle: f32) -> vec2<f32> {
    let c = cos(angle);
    let s = sin(angle);
    return vec2<f32>(c * p.x + s * p.y, -s * p.x + c * p.y);
}

fn sd_circle(p: vec2<f32>, r: f32) -> f32 {
    return length(p) - r;
}

fn sd_box(p: vec2<f32>, b: vec2<f32>, angle: f32) -> f32 {
    let d = abs(sdf_rotate(p, angle)) - b;
    return length(max(d, vec2<f32>(0.0))) + min(max(d.x, d.y), 0.0);
}

fn sd_ellipse(p: vec2<f32>, radii: vec2<f32>, angle: f32) -> f32 {
    let s = max(radii, vec2<f32>(1e-6));
    let q = sdf_rotate(p, angle) / s;
    return (length(q) - 1.0) * min(s.x, s.y);
}

fn sd_moon(p: vec2<f32>, r: f32, angle: f32) -> f32 {
    let inner = length(sdf_rotate(p, angle) / 0.8 - vec2<f32>(0.15, 0.0)) - r;
    let outer = length(p) - r;
    return max(-inner, outer);
}

fn sd_flower(p: vec2<f32>, r: f32, petals: f32, amplitude: f32) -> f32 {
    let phi = atan2(p.y, p.x);
    return length(p) - (r + amplitude * cos(petals * phi));
}

fn sd_butterfly(p: vec2<f32>, size: f32, flap: f32) -> f32 {
    let q = vec2<f32>(abs(p.x), p.y);
    let f = max(flap, 0.05);
    let upper = sd_ellipse(q - vec2<f32>(0.55, 0.35) * size, vec2<f32>(0.5 * f, 0.38) * size, 0.5);
    let lower = sd_ellipse(q - vec2<f32>(0.4, -0.35) * size, vec2<f32>(0.35 * f, 0.28) * size, -0.5);
    let body = sd_ellipse(p, vec2<f32>(0.08, 0.55) * size, 0.0);
    return min(min(upper, lower), body);
}

fn sd_line(p: vec2<f32>, a: vec2<f32>, b: vec2<f32>, thickness: f32) -> f32 {
    let pa = p - a;
    let ba = b - a;
    let h = clamp(dot(pa, ba) / max(dot(ba, ba), 1e-12), 0.0, 1.0);
    return length(pa - ba * h) - thickness;
}

fn op_smooth_union(a: f32, b: f32, k: f32) -> f32 {
    let kk = max(k, 1e-10);
    let h = max(kk - abs(a - b), 0.0) / kk;
    return min(a, b) - h * h * kk * 0.25;
}

fn op_repeat_x(p: vec2<f32>, period: f32) -> vec2<f32> {
    return vec2<f32>(p.x - period * round(p.x / period), p.y);
}
"#;

/// Formats an `f32` as a WGSL float literal.
///
/// Non-finite values have no WGSL spelling and are emitted as `0.0`; trees
/// are validated with [`Node::is_well_formed`] before emission.
pub fn literal(v: f32) -> String {
    if !v.is_finite() {
        return "0.0".to_string();
    }
    // `{:?}` always keeps a fractional part or exponent ("1.0", "1e-5").
    let s = format!("{v:?}");
    if v < 0.0 { format!("({s})") } else { s }
}

/// Emits a scalar expression.
pub fn value<P, F>(v: &Value<P>, params: &F) -> String
where
    P: Copy,
    F: Fn(P) -> String,
{
    match v {
        Value::Const(c) => literal(*c),
        Value::Param(p) => params(*p),
        Value::Add(a, b) => format!("({} + {})", value(a, params), value(b, params)),
        Value::Mul(a, b) => format!("({} * {})", value(a, params), value(b, params)),
        Value::Sin(a) => format!("sin({})", value(a, params)),
        Value::Cos(a) => format!("cos({})", value(a, params)),
    }
}

/// Emits a `vec2<f32>` expression.
pub fn vec2<P, F>(v: &V2<P>, params: &F) -> String
where
    P: Copy,
    F: Fn(P) -> String,
{
    format!("vec2<f32>({}, {})", value(&v.x, params), value(&v.y, params))
}

/// Emits the distance expression of `node` sampled at the WGSL expression `p`.
pub fn node<P, F>(n: &Node<P>, p: &str, params: &F) -> String
where
    P: Copy,
    F: Fn(P) -> String,
{
    match n {
        Node::Circle { radius } => format!("sd_circle({p}, {})", value(radius, params)),
        Node::Ellipse { radii, angle } => format!(
            "sd_ellipse({p}, {}, {})",
            vec2(radii, params),
            value(angle, params)
        ),
        Node::Box { half_extents, angle } => format!(
            "sd_box({p}, {}, {})",
            vec2(half_extents, params),
            value(angle, params)
        ),
        Node::Moon { radius, angle } => format!(
            "sd_moon({p}, {}, {})",
            value(radius, params),
            value(angle, params)
        ),
        Node::Flower { radius, petals, amplitude } => format!(
            "sd_flower({p}, {}, {}, {})",
            value(radius, params),
            literal(*petals as f32),
            value(amplitude, params)
        ),
        Node::Butterfly { size, flap } => format!(
            "sd_butterfly({p}, {}, {})",
            value(size, params),
            value(flap, params)
        ),
        Node::Line { a, b, thickness } => format!(
            "sd_line({p}, {}, {}, {})",
            vec2(a, params),
            vec2(b, params),
            value(thickness, params)
        ),
        Node::Union(a, b) => format!("min({}, {})", node(a, p, params), node(b, p, params)),
        Node::Intersection(a, b) => {
            format!("max({}, {})", node(a, p, params), node(b, p, params))
        }
        Node::Subtraction(a, b) => {
            format!("max({}, -({}))", node(a, p, params), node(b, p, params))
        }
        Node::SmoothUnion { a, b, k } => format!(
            "op_smooth_union({}, {}, {})",
            node(a, p, params),
            node(b, p, params),
            value(k, params)
        ),
        Node::Translate { offset, child } => {
            let q = format!("({p} - {})", vec2(offset, params));
            node(child, &q, params)
        }
        Node::RepeatX { period, child } => {
            let q = format!("op_repeat_x({p}, {})", literal(*period));
            node(child, &q, params)
        }
    }
}

/// Emits a complete WGSL function `fn {name}(p: vec2<f32>) -> f32`.
pub fn field_fn<P, F>(name: &str, n: &Node<P>, params: &F) -> String
where
    P: Copy,
    F: Fn(P) -> String,
{
    format!(
        "fn {name}(p: vec2<f32>) -> f32 {{\n    return {};\n}}\n",
        node(n, "p", params)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Copy, Clone, PartialEq)]
    enum P {
        Radius,
        Time,
    }

    fn slot(p: P) -> String {
        match p {
            P::Radius => "u.params[0].y".to_string(),
            P::Time => "u.params[0].x".to_string(),
        }
    }

    #[test]
    fn literals_are_valid_wgsl_floats() {
        assert_eq!(literal(1.0), "1.0");
        assert_eq!(literal(0.25), "0.25");
        assert_eq!(literal(-2.0), "(-2.0)");
        assert_eq!(literal(f32::NAN), "0.0");
        assert!(literal(1e-5).contains('e'));
    }

    #[test]
    fn parameters_emit_uniform_reads() {
        let v = Value::param(P::Time).sin() * 0.5;
        assert_eq!(value(&v, &slot), "(sin(u.params[0].x) * 0.5)");
    }

    #[test]
    fn translate_rewrites_sample_point() {
        let n = Node::circle(Value::param(P::Radius)).at(V2::new(1.0, -1.0));
        assert_eq!(
            node(&n, "p", &slot),
            "sd_circle((p - vec2<f32>(1.0, (-1.0))), u.params[0].y)"
        );
    }

    #[test]
    fn fixed_union_is_fully_unrolled() {
        let wheels = [-3.0f32, -1.0, 1.0, 3.0].map(|x| Node::<P>::circle(0.9).at(V2::new(x, 0.0)));
        let tree = Node::union_all(wheels).unwrap();
        let src = field_fn("wheels", &tree, &slot);
        assert_eq!(src.matches("sd_circle(").count(), 4);
        assert_eq!(src.matches("min(").count(), 3);
        assert!(!src.contains("for"));
        assert!(!src.contains("loop"));
    }

    #[test]
    fn library_defines_every_emitted_function() {
        for f in [
            "fn sd_circle(",
            "fn sd_box(",
            "fn sd_ellipse(",
            "fn sd_moon(",
            "fn sd_flower(",
            "fn sd_butterfly(",
            "fn sd_line(",
            "fn op_smooth_union(",
            "fn op_repeat_x(",
        ] {
            assert!(LIBRARY.contains(f), "missing {f}");
        }
    }
}
