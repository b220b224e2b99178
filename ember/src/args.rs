use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
pub struct Args {
    /// Path to the vertex shader source
    #[arg(long, default_value = "shaders/vertex.glsl")]
    pub vertex: PathBuf,
    /// Path to the fragment shader source
    #[arg(long, default_value = "shaders/fragment.glsl")]
    pub fragment: PathBuf,
    /// Window width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,
    /// Window height in pixels
    #[arg(long, default_value_t = 560)]
    pub height: u32,
    /// Horizontal view center
    #[arg(long, default_value_t = -0.75, allow_hyphen_values = true)]
    pub center_x: f32,
    /// Vertical view center
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub center_y: f32,
    /// View scale
    #[arg(long, default_value_t = 1.5)]
    pub scale: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_startup_configuration() {
        let args = Args::parse_from(["ember"]);

        assert_eq!(args.vertex, PathBuf::from("shaders/vertex.glsl"));
        assert_eq!(args.fragment, PathBuf::from("shaders/fragment.glsl"));
        assert_eq!((args.width, args.height), (800, 560));
        assert_eq!(args.center_x, -0.75);
        assert_eq!(args.center_y, 0.0);
        assert_eq!(args.scale, 1.5);
    }

    #[test]
    fn shader_paths_are_overridable() {
        let args = Args::parse_from(["ember", "--vertex", "v.glsl", "--fragment", "f.glsl"]);

        assert_eq!(args.vertex, PathBuf::from("v.glsl"));
        assert_eq!(args.fragment, PathBuf::from("f.glsl"));
    }
}
