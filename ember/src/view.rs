use cgmath::Vector2;

use crate::args::Args;

/// View parameters for the draw path. Built once at startup and passed
/// explicitly to whatever needs it, never stored as ambient globals.
pub struct ViewConfig {
    pub center: Vector2<f32>,
    pub scale: f32,
}

impl From<&Args> for ViewConfig {
    fn from(args: &Args) -> Self {
        Self {
            center: Vector2::new(args.center_x, args.center_y),
            scale: args.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn built_from_parsed_args() {
        let args = Args::parse_from(["ember", "--center-x", "0.5", "--scale", "2.0"]);

        let view = ViewConfig::from(&args);

        assert_eq!(view.center, Vector2::new(0.5, 0.0));
        assert_eq!(view.scale, 2.0);
    }
}
