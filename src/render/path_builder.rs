//! Builder for SVG path data.
//!
//! Every path this crate emits (wedges, rings, text baselines) goes through
//! [`PathData`], so all coordinates share the formatting rule in
//! [`super::format::fmt_num`].
//!
//! # Example
//!
//! ```
//! use spinwheel::render::path_builder::PathData;
//!
//! let d = PathData::new().m(0.0, 0.0).l(10.0, 0.0).z();
//! assert_eq!(d.to_string(), "M 0 0 L 10 0 Z");
//! ```

use std::fmt;

use glam::DVec2;

use super::format::{fmt_num, fmt_point};

/// One path command with absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(DVec2),
    LineTo(DVec2),
    Arc {
        radius: f64,
        large_arc: bool,
        sweep: bool,
        to: DVec2,
    },
    Close,
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathCommand::MoveTo(p) => write!(f, "M {}", fmt_point(*p)),
            PathCommand::LineTo(p) => write!(f, "L {}", fmt_point(*p)),
            PathCommand::Arc {
                radius,
                large_arc,
                sweep,
                to,
            } => {
                let r = fmt_num(*radius);
                write!(
                    f,
                    "A {r} {r} 0 {} {} {}",
                    u8::from(*large_arc),
                    u8::from(*sweep),
                    fmt_point(*to)
                )
            }
            PathCommand::Close => f.write_str("Z"),
        }
    }
}

/// Path data under construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to an absolute point.
    pub fn m(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::MoveTo(DVec2::new(x, y)));
        self
    }

    /// Line to an absolute point.
    pub fn l(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::LineTo(DVec2::new(x, y)));
        self
    }

    /// Circular arc to an absolute point.
    pub fn a(mut self, radius: f64, large_arc: bool, sweep: bool, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::Arc {
            radius,
            large_arc,
            sweep,
            to: DVec2::new(x, y),
        });
        self
    }

    /// Close the current subpath.
    pub fn z(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Number of arc commands, used by callers that assert path shape.
    pub fn arc_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::Arc { .. }))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{cmd}")?;
        }
        Ok(())
    }
}

impl From<PathData> for String {
    fn from(d: PathData) -> String {
        d.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_is_empty_string() {
        let d = PathData::new();
        assert!(d.is_empty());
        assert_eq!(d.to_string(), "");
    }

    #[test]
    fn arc_flags_serialize_as_digits() {
        let d = PathData::new().m(1.0, 2.0).a(5.0, true, false, 3.0, 4.0);
        assert_eq!(d.to_string(), "M 1 2 A 5 5 0 1 0 3 4");
        assert_eq!(d.arc_count(), 1);
    }

    #[test]
    fn coordinates_use_shared_formatting() {
        let d = PathData::new()
            .m(-0.0, 0.1 + 0.2)
            .l(f64::NAN, 1.0 / 3.0)
            .z();
        assert_eq!(d.to_string(), "M 0 0.3 L 0 0.333333 Z");
    }
}
