//! Path geometry extraction using usvg.
//!
//! usvg turns every shape element (`rect`, `circle`, `polygon`, ...) into
//! path data and resolves `use`, groups and transforms. The viewport mapping
//! of the root element is pinned to a plain translation before parsing so
//! that measured boxes come back in document user-space units.

use std::{fs, path::Path};

use usvg::{Group, Node, Transform, Tree};

use super::{BoundingBox, GeometryExtractor, PathGeometry};
use crate::{
    debug,
    error::CropError,
    rewrite::{RootAttributes, edit_root},
    viewbox::ViewBoxRect,
};

/// Extracts path geometry with usvg.
#[derive(Debug, Clone)]
pub struct UsvgExtractor {
    /// DPI used to resolve absolute units (`mm`, `in`, `pt`).
    pub dpi: f32,
}

impl Default for UsvgExtractor {
    fn default() -> Self {
        Self { dpi: 96.0 }
    }
}

impl GeometryExtractor for UsvgExtractor {
    fn extract(&self, source: &Path) -> Result<Vec<Box<dyn PathGeometry>>, CropError> {
        let content = fs::read_to_string(source).map_err(|err| CropError::Io(source.into(), err))?;

        let (normalized, user_space) =
            edit_root(&content, pin_viewport).map_err(|err| CropError::from_rewrite(source, err))?;

        let options = usvg::Options {
            dpi: self.dpi,
            resources_dir: source.parent().map(Path::to_path_buf),
            ..Default::default()
        };
        let tree = Tree::from_str(&normalized, &options).map_err(|err| CropError::parse(source, err))?;

        let mut paths = Vec::new();
        collect_paths(tree.root(), user_space, &mut paths);

        debug!("extract"; "{}: {} path(s)", source.display(), paths.len());
        Ok(paths)
    }
}

/// Make the viewport exactly as large as the viewBox.
///
/// usvg maps the viewBox onto the `width`/`height` viewport. With equal sizes
/// that mapping is a translation by the viewBox origin; the returned
/// transform undoes it.
fn pin_viewport(root: &mut RootAttributes) -> Transform {
    match root.get("viewBox").and_then(|v| v.parse::<ViewBoxRect>().ok()) {
        Some(view_box) => {
            root.set("width", view_box.width.to_string());
            root.set("height", view_box.height.to_string());
            Transform::from_translate(view_box.x, view_box.y)
        }
        None => Transform::identity(),
    }
}

/// Recursively traverse a group and collect the box of every path
fn collect_paths(group: &Group, user_space: Transform, out: &mut Vec<Box<dyn PathGeometry>>) {
    for node in group.children() {
        match node {
            Node::Path(path) => {
                let transform = user_space.pre_concat(path.abs_transform());
                out.push(Box::new(path_bounds(path, transform)));
            }
            Node::Group(nested) => collect_paths(nested, user_space, out),
            // Raster images and text are not path content.
            _ => {}
        }
    }
}

/// Tight (curve extrema) bounds of a path in user space.
fn path_bounds(path: &usvg::Path, transform: Transform) -> Option<BoundingBox> {
    let data = path.data().clone().transform(transform)?;
    let rect = data.compute_tight_bounds()?;
    Some(BoundingBox::new(
        rect.left(),
        rect.right(),
        rect.top(),
        rect.bottom(),
    ))
}
