/// Plain-text placement table for `--print-layout`.
use std::io::{self, Write};

use fcstack_core::StackResult;

pub fn write_layout<W: Write>(writer: &mut W, layout: &StackResult) -> io::Result<()> {
    writeln!(
        writer,
        "{:>3}  {:<26} {:>8} {:>8} {:>8} {:>9}  {}",
        "#", "layer", "bottom", "center", "top", "thickness", "color"
    )?;
    for (index, placement) in layout.placements().iter().enumerate() {
        writeln!(
            writer,
            "{:>3}  {:<26} {:>8.3} {:>8.3} {:>8.3} {:>9.3}  {}",
            index,
            placement.tag,
            placement.bottom(),
            placement.center,
            placement.top(),
            placement.thickness,
            placement.color
        )?;
    }
    writeln!(writer, "total extent: {:.3}", layout.total_extent())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fcstack_core::{build_stack, preset::fuel_cell_stack};

    #[test]
    fn test_table_lists_every_layer() {
        let layout = build_stack(&fuel_cell_stack(), 0.0).unwrap();
        let mut out = Vec::new();
        write_layout(&mut out, &layout).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 13);
        assert!(lines[1].contains("Frame / End Plate"));
        assert!(lines[1].contains("0.125"));
        assert!(lines[6].contains("Catalyst-Coated Membrane"));
        assert!(lines[6].contains("#ff4d4d"));
        assert_eq!(lines[12], "total extent: 1.580");
    }
}
