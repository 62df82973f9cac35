//
// models.rs
// dicom2mesh-rs
//
// Defines the serializable parameter set handed to the mesh pipeline, plus color ramp stops.
//
// Thales Matheus Mendonça Santos - November 2025

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One control point of a volume rendering transfer function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorStop {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
    pub voxel_value: i32,
}

/// How (and whether) the result is shown after conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "coloring", rename_all = "snake_case")]
pub enum Visualization {
    #[default]
    Off,
    Surface,
    /// Direct volume rendering; stops are kept in command-line order.
    Volume(Vec<ColorStop>),
}

/// Mesh file formats the pipeline can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeshFormat {
    Obj,
    Stl,
    Ply,
}

impl MeshFormat {
    /// Picks the format from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "obj" => Some(Self::Obj),
            "stl" => Some(Self::Stl),
            "ply" => Some(Self::Ply),
            _ => None,
        }
    }
}

/// Everything the conversion pipeline needs to know, as derived from the command line.
///
/// Optional features carry their value inside an `Option`, so "enabled" and
/// "value present" can never disagree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub iso_value: i32,
    pub reduction_rate: Option<f32>,
    pub polygon_limit: Option<usize>,
    pub crop: bool,
    pub smoothing: bool,
    pub object_size_ratio: Option<f32>,
    pub center_of_mass_origin: bool,
    pub visualization: Visualization,
}

impl Parameters {
    pub fn path_to_input_available(&self) -> bool {
        self.input_path.is_some()
    }

    pub fn path_to_output_available(&self) -> bool {
        self.output_path.is_some()
    }

    pub fn enable_mesh_reduction(&self) -> bool {
        self.reduction_rate.is_some()
    }

    pub fn enable_polygon_limitation(&self) -> bool {
        self.polygon_limit.is_some()
    }

    pub fn enable_object_filtering(&self) -> bool {
        self.object_size_ratio.is_some()
    }

    pub fn do_visualize(&self) -> bool {
        !matches!(self.visualization, Visualization::Off)
    }

    pub fn show_as_volume(&self) -> bool {
        matches!(self.visualization, Visualization::Volume(_))
    }

    /// Color ramp for volume rendering; empty unless volume mode was requested.
    pub fn volume_rendering_coloring(&self) -> &[ColorStop] {
        match &self.visualization {
            Visualization::Volume(stops) => stops,
            _ => &[],
        }
    }

    /// Output mesh format, if an output path with a known extension was given.
    pub fn output_format(&self) -> Option<MeshFormat> {
        self.output_path.as_deref().and_then(MeshFormat::from_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_disable_every_feature() {
        let params = Parameters::default();
        assert!(!params.path_to_input_available());
        assert!(!params.path_to_output_available());
        assert!(!params.enable_mesh_reduction());
        assert!(!params.enable_polygon_limitation());
        assert!(!params.enable_object_filtering());
        assert!(!params.do_visualize());
        assert!(!params.show_as_volume());
        assert!(params.volume_rendering_coloring().is_empty());
        assert_eq!(params.iso_value, 0);
    }

    #[test]
    fn volume_mode_implies_visualization() {
        let params = Parameters {
            visualization: Visualization::Volume(vec![ColorStop {
                red: 1,
                green: 2,
                blue: 3,
                alpha: 4,
                voxel_value: -5,
            }]),
            ..Parameters::default()
        };
        assert!(params.do_visualize());
        assert!(params.show_as_volume());
        assert_eq!(params.volume_rendering_coloring().len(), 1);
    }

    #[test]
    fn mesh_format_follows_extension() {
        assert_eq!(MeshFormat::from_path(Path::new("out.obj")), Some(MeshFormat::Obj));
        assert_eq!(MeshFormat::from_path(Path::new("dir/Mesh.STL")), Some(MeshFormat::Stl));
        assert_eq!(MeshFormat::from_path(Path::new("a.ply")), Some(MeshFormat::Ply));
        assert_eq!(MeshFormat::from_path(Path::new("a.vtk")), None);
        assert_eq!(MeshFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn serializes_visualization_with_mode_tag() {
        let params = Parameters {
            visualization: Visualization::Surface,
            ..Parameters::default()
        };
        let json_val = serde_json::to_value(&params).unwrap();
        assert_eq!(json_val["visualization"]["mode"], "surface");
        assert!(json_val["input_path"].is_null());
    }
}
