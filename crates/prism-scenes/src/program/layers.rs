//! Layered 2D programs.
//!
//! A 2D scene is an ordered list of layers drawn back to front over a
//! vertical gradient. Each layer is one composition tree plus a style.

use prism_sdf::{wgsl, Node, Value, Vec2};

use crate::uniforms::{accessor_call, ParamSlot};

#[derive(Debug, Clone, PartialEq)]
pub enum LayerStyle<P> {
    /// Distance visualization with the given fade rate.
    Isolines { fade: Value<P> },
    /// Solid fill of the inside region.
    Fill { color: [f32; 3] },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer<P> {
    /// Identifier suffix of the emitted `layer_{name}` function.
    pub name: &'static str,
    pub node: Node<P>,
    pub style: LayerStyle<P>,
}

impl<P: Copy> Layer<P> {
    pub fn isolines(name: &'static str, node: Node<P>, fade: impl Into<Value<P>>) -> Self {
        Self { name, node, style: LayerStyle::Isolines { fade: fade.into() } }
    }

    pub fn fill(name: &'static str, node: Node<P>, color: [f32; 3]) -> Self {
        Self { name, node, style: LayerStyle::Fill { color } }
    }
}

/// Vertical sky/backdrop gradient, `bottom` at `y_range.0`, `top` at `y_range.1`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Backdrop {
    pub bottom: [f32; 3],
    pub top: [f32; 3],
    pub y_range: (f32, f32),
}

/// Union of every layer at `p`, or `+inf` for an empty list.
pub fn scene_distance<P, F>(layers: &[Layer<P>], p: Vec2, params: &F) -> f32
where
    P: Copy,
    F: Fn(P) -> f32,
{
    layers
        .iter()
        .map(|l| l.node.eval(p, params))
        .fold(f32::INFINITY, f32::min)
}

pub fn is_well_formed<P: Copy>(layers: &[Layer<P>]) -> bool {
    !layers.is_empty()
        && layers.iter().all(|l| {
            l.node.is_well_formed()
                && !l.name.is_empty()
                && l.name.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
                && match &l.style {
                    LayerStyle::Isolines { fade } => fade.is_finite(),
                    LayerStyle::Fill { color } => color.iter().all(|c| c.is_finite()),
                }
        })
}

fn color(c: [f32; 3]) -> String {
    format!(
        "vec3<f32>({}, {}, {})",
        wgsl::literal(c[0]),
        wgsl::literal(c[1]),
        wgsl::literal(c[2])
    )
}

/// Emits `layer_*`, `scene_field`, `background` and `paint`.
pub fn emit<P: ParamSlot>(layers: &[Layer<P>], backdrop: &Backdrop) -> String {
    let read = |p: P| accessor_call(p);
    let mut out = String::new();

    for layer in layers {
        out.push_str(&wgsl::field_fn(&format!("layer_{}", layer.name), &layer.node, &read));
    }

    let field = layers
        .iter()
        .rev()
        .map(|l| format!("layer_{}(p)", l.name))
        .reduce(|acc, call| format!("min({call}, {acc})"))
        .unwrap_or_else(|| "1e6".to_string());
    out.push_str(&format!(
        "fn scene_field(p: vec2<f32>) -> f32 {{\n    return {field};\n}}\n"
    ));

    out.push_str(&format!(
        "fn background(p: vec2<f32>) -> vec3<f32> {{\n    return mix({}, {}, smoothstep({}, {}, p.y));\n}}\n",
        color(backdrop.bottom),
        color(backdrop.top),
        wgsl::literal(backdrop.y_range.0),
        wgsl::literal(backdrop.y_range.1),
    ));

    out.push_str("fn paint(p: vec2<f32>, aa: f32) -> vec3<f32> {\n    var col = background(p);\n");
    for layer in layers {
        let d = format!("layer_{}(p)", layer.name);
        let line = match &layer.style {
            LayerStyle::Isolines { fade } => {
                format!("    col = isolines({d}, {}, aa);\n", wgsl::value(fade, &read))
            }
            LayerStyle::Fill { color: c } => {
                format!("    col = fill(col, {d}, {}, aa);\n", color(*c))
            }
        };
        out.push_str(&line);
    }
    out.push_str("    return col;\n}\n");

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    enum P {
        Fade,
    }

    impl ParamSlot for P {
        const ALL: &'static [Self] = &[P::Fade];

        fn slot(self) -> usize {
            0
        }

        fn name(self) -> &'static str {
            "fade"
        }
    }

    fn layers() -> Vec<Layer<P>> {
        vec![
            Layer::isolines("shapes", Node::circle(1.0), Value::param(P::Fade)),
            Layer::fill("dot", Node::circle(0.5).at(Vec2::new(3.0, 0.0).into()), [1.0, 0.5, 0.0]),
        ]
    }

    #[test]
    fn emits_layers_back_to_front() {
        let src = emit(&layers(), &Backdrop { bottom: [0.0; 3], top: [1.0; 3], y_range: (-1.0, 1.0) });
        let iso = src.find("col = isolines(layer_shapes(p), param_fade(), aa);").unwrap();
        let dot = src.find("col = fill(col, layer_dot(p), vec3<f32>(1.0, 0.5, 0.0), aa);").unwrap();
        assert!(iso < dot);
        assert!(src.contains("return min(layer_shapes(p), layer_dot(p));"));
        assert!(src.contains("smoothstep((-1.0), 1.0, p.y)"));
    }

    #[test]
    fn cpu_distance_is_union_of_layers() {
        let params = |_: P| 1.0;
        let l = layers();
        assert!((scene_distance(&l, Vec2::ZERO, &params) + 1.0).abs() < 1e-6);
        assert!((scene_distance(&l, Vec2::new(3.0, 0.0), &params) + 0.5).abs() < 1e-6);
        assert_eq!(scene_distance::<P, _>(&[], Vec2::ZERO, &params), f32::INFINITY);
    }

    #[test]
    fn rejects_bad_layers() {
        assert!(is_well_formed(&layers()));
        assert!(!is_well_formed::<P>(&[]));
        let bad_name = vec![Layer::<P>::fill("Bad-Name", Node::circle(1.0), [0.0; 3])];
        assert!(!is_well_formed(&bad_name));
        let bad_color = vec![Layer::<P>::fill("ok", Node::circle(1.0), [f32::NAN, 0.0, 0.0])];
        assert!(!is_well_formed(&bad_color));
    }
}
