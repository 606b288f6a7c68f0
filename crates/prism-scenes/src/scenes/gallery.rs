//! Gallery of every primitive kind and the boolean combinators.

use prism_sdf::{Node, Value, Vec2, V2};

use crate::camera::Camera;
use crate::mesh::PlaneSpec;
use crate::program::layers::{self, Backdrop, Layer};
use crate::uniforms::{accessors, ParamSlot};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GalleryParam {
    Time,
    Radius,
    Fade,
}

impl ParamSlot for GalleryParam {
    const ALL: &'static [Self] = &[GalleryParam::Time, GalleryParam::Radius, GalleryParam::Fade];

    fn slot(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            GalleryParam::Time => "time",
            GalleryParam::Radius => "radius",
            GalleryParam::Fade => "fade",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GalleryParams {
    pub time: f32,
    pub radius: f32,
    pub fade: f32,
}

impl Default for GalleryParams {
    fn default() -> Self {
        Self { time: 0.0, radius: 0.25, fade: 1.5 }
    }
}

impl GalleryParams {
    pub fn get(&self, p: GalleryParam) -> f32 {
        match p {
            GalleryParam::Time => self.time,
            GalleryParam::Radius => self.radius,
            GalleryParam::Fade => self.fade,
        }
    }
}

const TOP_ROW_Y: f32 = 0.35;
const BOTTOM_ROW_Y: f32 = -0.45;
const TOP_ROW_X: [f32; 7] = [-1.65, -1.1, -0.55, 0.0, 0.55, 1.1, 1.65];
const BOTTOM_ROW_X: [f32; 4] = [-1.5, -0.5, 0.5, 1.5];

fn time() -> Value<GalleryParam> {
    Value::param(GalleryParam::Time)
}

fn radius() -> Value<GalleryParam> {
    Value::param(GalleryParam::Radius)
}

/// Top-row shapes, one per primitive kind, in `TOP_ROW_X` order.
fn primitive_row() -> [Node<GalleryParam>; 7] {
    let r = radius;
    let t = time;
    [
        Node::circle(r()),
        Node::ellipse(V2::new(r() * 1.2, r() * 0.7), t()),
        Node::rect(V2::new(r() * 0.8, r() * 0.6), t() * -0.5),
        Node::moon(r(), t() * 0.7),
        Node::flower(r() * 0.8, 5, (t() * 2.0).sin() * r() * 0.2),
        Node::butterfly(r() * 1.2, (t() * 3.0).sin() * 0.3 + 0.8),
        Node::line(
            V2::new(-(t().cos() * r()), -(t().sin() * r())),
            V2::new(t().cos() * r(), t().sin() * r()),
            r() * 0.15,
        ),
    ]
}

/// Bottom row: a circle and a box sliding across each other, combined by
/// union, intersection, subtraction and smooth union.
fn combinator_row() -> [Node<GalleryParam>; 4] {
    let pair = || {
        let slide = (time() * 1.5).sin() * 0.12;
        let a = Node::circle(radius()).at(V2::new(slide.clone() + -0.12, 0.0));
        let b = Node::rect(V2::splat(radius() * 0.8), time() * 0.3).at(V2::new(-slide + 0.12, 0.0));
        (a, b)
    };
    let (a0, b0) = pair();
    let (a1, b1) = pair();
    let (a2, b2) = pair();
    let (a3, b3) = pair();
    [a0.union(b0), a1.intersect(b1), a2.subtract(b2), a3.smooth_union(b3, 0.15)]
}

fn build_tree() -> Node<GalleryParam> {
    let top = primitive_row().into_iter().zip(TOP_ROW_X).enumerate().map(|(i, (node, x))| {
        let bob = (time() + i as f32).sin() * 0.05 + TOP_ROW_Y;
        node.at(V2::new(x, bob))
    });
    let bottom = combinator_row()
        .into_iter()
        .zip(BOTTOM_ROW_X)
        .map(|(node, x)| node.at(V2::new(x, BOTTOM_ROW_Y)));

    let mut shapes = top.chain(bottom);
    let first = shapes.next().unwrap_or_else(|| Node::circle(radius()));
    shapes.fold(first, Node::union)
}

const BACKDROP: Backdrop = Backdrop {
    bottom: [0.08, 0.08, 0.1],
    top: [0.14, 0.15, 0.2],
    y_range: (-1.0, 1.0),
};

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryScene {
    pub params: GalleryParams,
    layers: Vec<Layer<GalleryParam>>,
}

impl Default for GalleryScene {
    fn default() -> Self {
        Self::new()
    }
}

impl GalleryScene {
    pub const PLANE: PlaneSpec = PlaneSpec::new(8.0, 4.0, 64, 32);
    /// The 8×4 plane spans a `[-2, 2] × [-1, 1]` field domain.
    pub const DOMAIN_SCALE: f32 = 0.5;

    pub fn new() -> Self {
        Self {
            params: GalleryParams::default(),
            layers: vec![Layer::isolines(
                "shapes",
                build_tree(),
                Value::param(GalleryParam::Fade),
            )],
        }
    }

    pub fn camera() -> Camera {
        Camera::contain(Self::PLANE.width, Self::PLANE.height)
    }

    pub fn update(&mut self, dt: f32) {
        self.params.time += dt;
    }

    pub fn is_well_formed(&self) -> bool {
        layers::is_well_formed(&self.layers)
    }

    pub fn primitive_count(&self) -> usize {
        self.layers.iter().map(|l| l.node.primitive_count()).sum()
    }

    pub fn distance(&self, p: Vec2) -> f32 {
        layers::scene_distance(&self.layers, p, &|q| self.params.get(q))
    }

    pub(crate) fn generated_wgsl(&self) -> String {
        let mut out = accessors::<GalleryParam>();
        out.push_str(&layers::emit(&self.layers, &BACKDROP));
        out
    }
}
