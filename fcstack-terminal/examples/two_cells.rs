/// Example: Stack two fuel cells sharing a bipolar plate and view them
///
/// Usage: cargo run --example two_cells [-- --print]
use std::env;
use std::io;

use fcstack_core::preset::Component;
use fcstack_core::{LayerSpec, Scene, SceneConfig};
use fcstack_terminal::{report, TerminalApp};

fn cell_interior() -> Vec<LayerSpec> {
    [
        Component::Gasket,
        Component::Gdl,
        Component::Ccm,
        Component::Gdl,
        Component::Gasket,
    ]
    .iter()
    .map(|c| c.layer())
    .collect()
}

fn main() -> io::Result<()> {
    let mut layers = vec![
        Component::Frame.layer(),
        Component::Collector.layer(),
        Component::Graphite.layer(),
    ];
    layers.extend(cell_interior());
    layers.push(Component::Graphite.layer());
    layers.extend(cell_interior());
    layers.extend([
        Component::Graphite.layer(),
        Component::Collector.layer(),
        Component::Frame.layer(),
    ]);

    let config = SceneConfig {
        layers,
        ..SceneConfig::default()
    };
    let scene = Scene::build(&config)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    if env::args().any(|arg| arg == "--print") {
        return report::write_layout(&mut io::stdout(), &scene.layout);
    }

    println!(
        "Built {} layers, total extent {:.3}",
        scene.layout.len(),
        scene.layout.total_extent()
    );
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(scene)?;
    app.run()
}
