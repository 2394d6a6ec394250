use crate::data_structures::command::MeshKind;

/// The primitive mesh library: owns the geometry of every basic shape and
/// knows how to submit a draw for it.
///
/// `prepare` is called once per geometry during setup; `draw` once per draw
/// command every frame, after all uniforms for that command have been pushed.
pub trait MeshLibrary {
    fn prepare(&mut self, kind: MeshKind);

    fn draw(&mut self, kind: MeshKind);
}

/// Distinct geometries needed to draw `kinds`, in order of first appearance.
///
/// Half variants resolve to their full shape, so a scene that draws both a
/// sphere and a half sphere prepares the sphere once.
pub fn required_geometries(kinds: impl IntoIterator<Item = MeshKind>) -> Vec<MeshKind> {
    let mut geometries = Vec::new();
    for geometry in kinds.into_iter().map(MeshKind::geometry) {
        if !geometries.contains(&geometry) {
            geometries.push(geometry);
        }
    }
    geometries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometries_are_deduplicated_in_first_seen_order() {
        let kinds = [
            MeshKind::Plane,
            MeshKind::Box,
            MeshKind::HalfSphere,
            MeshKind::Box,
            MeshKind::Sphere,
            MeshKind::HalfTorus,
        ];
        assert_eq!(
            required_geometries(kinds),
            vec![MeshKind::Plane, MeshKind::Box, MeshKind::Sphere, MeshKind::Torus]
        );
    }

    #[test]
    fn no_kinds_need_no_geometry() {
        assert!(required_geometries([]).is_empty());
    }
}
