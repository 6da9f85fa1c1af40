/// Fuel-cell component catalogue and the default single-cell stack
use crate::color::Rgb;
use crate::layout::LayerSpec;

/// Slab types found in a PEM fuel-cell stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    /// Frame / end plate
    Frame,
    /// Current collector
    Collector,
    /// Graphite bipolar plate
    Graphite,
    Gasket,
    /// Gas diffusion layer
    Gdl,
    /// Catalyst-coated membrane
    Ccm,
}

impl Component {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Frame => "Frame / End Plate",
            Self::Collector => "Current Collector",
            Self::Graphite => "Graphite Plate",
            Self::Gasket => "Gasket",
            Self::Gdl => "Gas Diffusion Layer",
            Self::Ccm => "Catalyst-Coated Membrane",
        }
    }

    pub fn thickness(self) -> f32 {
        match self {
            Self::Frame => 0.25,
            Self::Collector => 0.15,
            Self::Graphite => 0.15,
            Self::Gasket => 0.08,
            Self::Gdl => 0.1,
            Self::Ccm => 0.12,
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            Self::Frame => Rgb::new(0x606060),
            Self::Collector => Rgb::new(0xffb84d),
            Self::Graphite => Rgb::new(0x1a1a1a),
            Self::Gasket => Rgb::new(0x00ffff),
            Self::Gdl => Rgb::new(0x4444ff),
            Self::Ccm => Rgb::new(0xff4d4d),
        }
    }

    pub fn layer(self) -> LayerSpec {
        LayerSpec::new(self.tag(), self.thickness(), self.color())
    }
}

/// Mirror-symmetric order of a single cell, outermost plate first
pub const SINGLE_CELL: [Component; 11] = [
    Component::Frame,
    Component::Collector,
    Component::Graphite,
    Component::Gasket,
    Component::Gdl,
    Component::Ccm,
    Component::Gdl,
    Component::Gasket,
    Component::Graphite,
    Component::Collector,
    Component::Frame,
];

/// The default single-cell stack.
pub fn fuel_cell_stack() -> Vec<LayerSpec> {
    SINGLE_CELL.iter().map(|c| c.layer()).collect()
}
