//! Interpolation kernel definitions.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Interpolation function used when resizing a level raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Kernel {
    NearestNeighbor,
    Bilinear,
    #[default]
    Bicubic,
    MitchellNetravali,
    Lanczos2,
    Lanczos3,
}

/// Error returned when parsing an unrecognised kernel name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown interpolation function '{name}' (valid: {})", Kernel::valid_names())]
pub struct UnknownKernel {
    pub name: String,
}

impl Kernel {
    /// Every supported kernel.
    pub const ALL: [Kernel; 6] = [
        Kernel::NearestNeighbor,
        Kernel::Bilinear,
        Kernel::Bicubic,
        Kernel::MitchellNetravali,
        Kernel::Lanczos2,
        Kernel::Lanczos3,
    ];

    /// Canonical name, as accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Kernel::NearestNeighbor => "NearestNeighbor",
            Kernel::Bilinear => "Bilinear",
            Kernel::Bicubic => "Bicubic",
            Kernel::MitchellNetravali => "MitchellNetravali",
            Kernel::Lanczos2 => "Lanczos2",
            Kernel::Lanczos3 => "Lanczos3",
        }
    }

    /// Space-separated list of all kernel names.
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(Kernel::name)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Kernel radius in source pixels at unit scale.
    pub fn support(&self) -> f64 {
        match self {
            Kernel::NearestNeighbor => 0.5,
            Kernel::Bilinear => 1.0,
            Kernel::Bicubic | Kernel::MitchellNetravali | Kernel::Lanczos2 => 2.0,
            Kernel::Lanczos3 => 3.0,
        }
    }

    /// Kernel weight at distance `x` (in source pixels at unit scale).
    pub fn weight(&self, x: f64) -> f64 {
        let x = x.abs();
        match self {
            Kernel::NearestNeighbor => {
                if x < 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            Kernel::Bilinear => (1.0 - x).max(0.0),
            Kernel::Bicubic => cubic(x, 0.0, 0.5),
            Kernel::MitchellNetravali => cubic(x, 1.0 / 3.0, 1.0 / 3.0),
            Kernel::Lanczos2 => lanczos(x, 2.0),
            Kernel::Lanczos3 => lanczos(x, 3.0),
        }
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kernel {
    type Err = UnknownKernel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kernel| kernel.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownKernel {
                name: s.to_string(),
            })
    }
}

/// Mitchell-Netravali family of cubics; `x` is non-negative.
fn cubic(x: f64, b: f64, c: f64) -> f64 {
    if x < 1.0 {
        ((12.0 - 9.0 * b - 6.0 * c) * x * x * x
            + (-18.0 + 12.0 * b + 6.0 * c) * x * x
            + (6.0 - 2.0 * b))
            / 6.0
    } else if x < 2.0 {
        ((-b - 6.0 * c) * x * x * x
            + (6.0 * b + 30.0 * c) * x * x
            + (-12.0 * b - 48.0 * c) * x
            + (8.0 * b + 24.0 * c))
            / 6.0
    } else {
        0.0
    }
}

fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    }
}

fn lanczos(x: f64, lobes: f64) -> f64 {
    if x < lobes {
        sinc(x) * sinc(x / lobes)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_default_is_bicubic() {
        assert_eq!(Kernel::default(), Kernel::Bicubic);
    }

    #[test]
    fn test_from_str_all_names() {
        for kernel in Kernel::ALL {
            assert_eq!(kernel.name().parse::<Kernel>(), Ok(kernel));
        }
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!("lanczos3".parse::<Kernel>(), Ok(Kernel::Lanczos3));
        assert_eq!("BILINEAR".parse::<Kernel>(), Ok(Kernel::Bilinear));
    }

    #[test]
    fn test_from_str_unknown_lists_valid_names() {
        let err = "Foo".parse::<Kernel>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'Foo'"));
        for kernel in Kernel::ALL {
            assert!(message.contains(kernel.name()), "missing {}", kernel);
        }
    }

    #[test]
    fn test_interpolating_kernels_are_one_at_zero() {
        for kernel in [
            Kernel::NearestNeighbor,
            Kernel::Bilinear,
            Kernel::Bicubic,
            Kernel::Lanczos2,
            Kernel::Lanczos3,
        ] {
            assert!((kernel.weight(0.0) - 1.0).abs() < EPS, "{}", kernel);
        }
    }

    #[test]
    fn test_interpolating_kernels_vanish_at_integers() {
        for kernel in [Kernel::Bilinear, Kernel::Bicubic, Kernel::Lanczos2, Kernel::Lanczos3] {
            for n in 1..4 {
                assert!(kernel.weight(n as f64).abs() < EPS, "{} at {}", kernel, n);
            }
        }
    }

    #[test]
    fn test_mitchell_values() {
        let k = Kernel::MitchellNetravali;
        assert!((k.weight(0.0) - 16.0 / 18.0).abs() < EPS);
        assert!((k.weight(1.0) - 1.0 / 18.0).abs() < EPS);
        assert!(k.weight(2.0).abs() < EPS);
    }

    #[test]
    fn test_weights_are_symmetric() {
        for kernel in Kernel::ALL {
            for i in 0..30 {
                let x = i as f64 * 0.1;
                assert!((kernel.weight(x) - kernel.weight(-x)).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_weights_zero_beyond_support() {
        for kernel in Kernel::ALL {
            assert_eq!(kernel.weight(kernel.support() + 0.01), 0.0, "{}", kernel);
        }
    }

    #[test]
    fn test_bicubic_negative_lobe() {
        // Catmull-Rom undershoots between 1 and 2
        assert!(Kernel::Bicubic.weight(1.5) < 0.0);
    }

    #[test]
    fn test_display_matches_name() {
        assert_eq!(Kernel::MitchellNetravali.to_string(), "MitchellNetravali");
    }
}
