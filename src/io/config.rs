use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub meshes: Vec<MeshConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            camera: CameraConfig::default(),
            meshes: vec![MeshConfig {
                shape: Some("quad_strip".to_string()),
                ..Default::default()
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    // --- Output ---
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    /// Timestamped BMP name when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default = "default_frames")]
    pub frames: usize,

    // --- Clear & Sampling ---
    #[serde(default = "default_background")]
    pub background_color: [f32; 3],
    /// Shared by every mesh when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    #[serde(default = "default_sample_offset")]
    pub sample_offset: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            output: None,
            frames: default_frames(),
            background_color: default_background(),
            texture: None,
            sample_offset: default_sample_offset(),
        }
    }
}

fn default_width() -> usize {
    640
}
fn default_height() -> usize {
    480
}
fn default_frames() -> usize {
    1
}
fn default_background() -> [f32; 3] {
    [100.0 / 255.0; 3]
}
fn default_sample_offset() -> f32 {
    0.5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_origin")]
    pub origin: [f32; 3],
    #[serde(default = "default_forward")]
    pub forward: [f32; 3],
    /// Vertical field of view in degrees.
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,

    // --- Controller ---
    #[serde(default = "default_speed")]
    pub speed: f32,
    /// Degrees per pixel of mouse movement.
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,
    /// Seconds of controller time between consecutive frames.
    #[serde(default = "default_frame_time")]
    pub frame_time: f32,
    /// Input held down between consecutive frames.
    #[serde(default)]
    pub input: InputConfig,
}

/// Scripted controller input, replayed once between every pair of frames.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub boost: bool,
    /// Mouse movement in pixels, `[x, y]`.
    pub mouse_delta: [f32; 2],
    pub left_button: bool,
    pub right_button: bool,
}

impl InputConfig {
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            forward: default_forward(),
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
            speed: default_speed(),
            sensitivity: default_sensitivity(),
            frame_time: default_frame_time(),
            input: InputConfig::default(),
        }
    }
}

fn default_origin() -> [f32; 3] {
    [0.0, 0.0, -10.0]
}
fn default_forward() -> [f32; 3] {
    [0.0, 0.0, 1.0]
}
fn default_fov() -> f32 {
    60.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    100.0
}
fn default_speed() -> f32 {
    5.0
}
fn default_sensitivity() -> f32 {
    0.5
}
fn default_frame_time() -> f32 {
    1.0 / 30.0
}

/// One mesh of the scene. Geometry comes from the first of `path`, `shape`
/// or inline `vertices` that is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshConfig {
    /// Wavefront OBJ file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Built-in geometry: `triangle`, `quad_list` or `quad_strip`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vertices: Vec<VertexConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indices: Vec<u32>,
    /// `list` or `strip`; applies to inline geometry.
    #[serde(default = "default_topology")]
    pub topology: String,

    // --- Transform ---
    #[serde(default)]
    pub position: [f32; 3],
    /// Euler angles in degrees.
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
    #[serde(default)]
    pub normalize: bool,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            path: None,
            shape: None,
            vertices: Vec::new(),
            indices: Vec::new(),
            topology: default_topology(),
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: default_scale(),
            normalize: false,
        }
    }
}

fn default_topology() -> String {
    "list".to_string()
}
fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexConfig {
    pub position: [f32; 3],
    #[serde(default = "default_vertex_color")]
    pub color: [f32; 3],
    #[serde(default)]
    pub uv: [f32; 2],
}

fn default_vertex_color() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {}", e))
    }

    /// Writes this configuration as TOML, e.g. to seed a new scene file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let path = path.as_ref();
        fs::write(path, self.to_toml()?)
            .map_err(|e| format!("Failed to write config '{}': {}", path.display(), e))
    }
}
