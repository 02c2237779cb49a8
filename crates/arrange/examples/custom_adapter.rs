//! Example: Arranging an application's own graph type
//!
//! This example shows how an editor plugs its scene into the layout engine
//! by implementing `GraphAdapter`, then arranges it with both strategies.

use arrange::{
    Arranger, LayoutMode,
    geometry::{Point, Size},
    graph::{Edge, GraphAdapter, Node},
    identifier::NodeId,
};

/// A widget on the editor canvas.
struct Widget {
    name: &'static str,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

/// The editor's scene: widgets plus wires between them by name.
struct Scene {
    widgets: Vec<Widget>,
    wires: Vec<(&'static str, &'static str)>,
    redraws: usize,
}

impl GraphAdapter for Scene {
    fn nodes(&self) -> Vec<Node> {
        self.widgets
            .iter()
            .map(|w| {
                Node::new(
                    w.name,
                    Point::new(w.x, w.y),
                    Size::new(w.width, w.height),
                )
            })
            .collect()
    }

    fn edges(&self) -> Vec<Edge> {
        self.wires
            .iter()
            .map(|&(from, to)| Edge::new(from, to))
            .collect()
    }

    fn set_position(&mut self, id: &NodeId, position: Point) {
        if let Some(widget) = self
            .widgets
            .iter_mut()
            .find(|w| &NodeId::new(w.name) == id)
        {
            widget.x = position.x();
            widget.y = position.y();
        }
    }

    fn mark_dirty(&mut self) {
        self.redraws += 1;
    }
}

fn scene() -> Scene {
    let widget = |name, height| Widget {
        name,
        x: 0.0,
        y: 0.0,
        width: 220.0,
        height,
    };
    Scene {
        widgets: vec![
            widget("camera", 90.0),
            widget("denoise", 140.0),
            widget("sharpen", 120.0),
            widget("merge", 100.0),
            widget("preview", 200.0),
            widget("histogram", 160.0),
        ],
        wires: vec![
            ("camera", "denoise"),
            ("camera", "sharpen"),
            ("denoise", "merge"),
            ("sharpen", "merge"),
            ("merge", "preview"),
        ],
        redraws: 0,
    }
}

fn print_scene(title: &str, scene: &Scene) {
    println!("{title}");
    for w in &scene.widgets {
        println!("  {:<10} at ({:>6.1}, {:>6.1})", w.name, w.x, w.y);
    }
    println!("  redraws: {}\n", scene.redraws);
}

fn main() {
    let arranger = Arranger::default();

    let mut aligned = scene();
    let report = arranger.arrange(&mut aligned, LayoutMode::Align);
    println!(
        "{} nodes in {} components, {} levels deep\n",
        report.nodes(),
        report.components(),
        report.depth() + 1
    );
    print_scene("Align:", &aligned);

    let mut compact = scene();
    arranger.arrange(&mut compact, LayoutMode::Compact);
    print_scene("Compact:", &compact);
}
