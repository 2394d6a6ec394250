use std::path::{Path, PathBuf};

/**
 * This module contains the seams to the external collaborators: image decoding,
 * GPU textures and the primitive mesh library.
 */
pub mod codec;
pub mod mesh;
pub mod texture;

/// Resolve a texture path from a scene file against the asset root.
///
/// Absolute paths are kept as they are.
pub fn resolve_asset_path(asset_root: Option<&Path>, file_name: &Path) -> PathBuf {
    match asset_root {
        Some(root) if file_name.is_relative() => root.join(file_name),
        _ => file_name.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_land_under_the_asset_root() {
        let resolved = resolve_asset_path(
            Some(Path::new("scenes/textures")),
            Path::new("Wood.jpg"),
        );
        assert_eq!(resolved, Path::new("scenes/textures").join("Wood.jpg"));
    }

    #[test]
    fn without_a_root_paths_are_untouched() {
        assert_eq!(
            resolve_asset_path(None, Path::new("Wood.jpg")),
            PathBuf::from("Wood.jpg")
        );
    }
}
