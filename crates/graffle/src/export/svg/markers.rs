use svg::node::element::{Definitions, Marker, Path};

use graffle_core::{color::Rgb8, draw::MarkerDefinition};

/// Creates the `<defs>` block holding every arrow marker.
pub fn create_marker_definitions(markers: &[MarkerDefinition]) -> Definitions {
    markers
        .iter()
        .fold(Definitions::new(), |defs, marker| defs.add(create_marker(marker)))
}

fn create_marker(marker: &MarkerDefinition) -> Marker {
    let mut path = Path::new().set("d", marker.path());
    // Unfilled outlines inherit the default paint.
    if marker.filled() {
        path = path.set("fill", Rgb8::BLACK.to_string());
    }

    Marker::new()
        .set("id", marker.id())
        .set("refX", marker.ref_x())
        .set("refY", marker.ref_y())
        .set("markerWidth", marker.width())
        .set("markerHeight", marker.height())
        .set("orient", "auto")
        .add(path)
}

/// Reference to a marker id, as used by `marker-start` and `marker-end`.
pub fn marker_url(id: &str) -> String {
    format!("url(#{id})")
}
