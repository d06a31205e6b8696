// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! GLSL ES 2.0 programs for the GPU rendering mode.
//!
//! The fragment program runs the same recurrence as the CPU
//! evaluators, but in single precision, for only `ITERATIONS` steps,
//! and without smoothing or the distance term: the escape count is
//! divided by 20 and used directly as a palette texture coordinate.
//! It is a coarser preview, not a bit-for-bit match.
//!
//! Compiling, linking and binding are the GPU collaborator's job.  It
//! needs a new program only when the kernel changes (see
//! `Changes::requires_relink`); palette and viewport changes are just
//! a texture upload and new uniform values.

use kernel::FractalKernel;
use viewport::Viewport;

/// Iteration bound of the fragment program.
pub const ITERATIONS: usize = 32;

/// Vertex program shared by every kernel: a textured quad.
pub const VERTEX_SHADER: &str = "uniform mat4 uMVPMatrix;
attribute vec4 vPosition;
attribute vec2 texcoord;
varying vec2 v_texcoord;

void main() {
  gl_Position = vPosition * uMVPMatrix;
  v_texcoord = texcoord;
}
";

const FRAGMENT_HEADER: &str = "#ifdef GL_FRAGMENT_PRECISION_HIGH
precision highp float;
#else
precision mediump float;
#endif

uniform vec2 center;
uniform float scale;
uniform float ratio;
uniform sampler2D palette;
varying vec2 v_texcoord;
";

/// Values for the fragment program's uniforms.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Uniforms {
    /// `center`: the viewport's center offset.
    pub center: [f32; 2],
    /// `scale`: extent of the imaginary axis.
    pub scale: f32,
    /// `ratio`: width over height.
    pub ratio: f32,
}

impl Uniforms {
    /// Uniform values that show the same window as `viewport`.
    pub fn for_viewport(viewport: &Viewport) -> Uniforms {
        let center = viewport.center();
        Uniforms {
            center: [center.re as f32, center.im as f32],
            scale: viewport.scale() as f32,
            ratio: viewport.aspect_ratio() as f32,
        }
    }
}

/// Formats a constant as a signed GLSL float literal to append to an
/// expression.  Zero produces nothing at all.
fn signed_literal(value: f32) -> String {
    if value == 0.0 {
        return String::new();
    }
    let mut literal = if value > 0.0 {
        format!("+{}", value)
    } else {
        format!("{}", value)
    };
    if !literal.contains('.') {
        literal.push_str(".0");
    }
    literal
}

/// The `main` function for `kernel`.
pub fn fragment_body(kernel: &FractalKernel) -> String {
    let (real, imaginary) = match *kernel {
        FractalKernel::Mandelbrot => (" + r0".to_string(), " + i0".to_string()),
        FractalKernel::Julia { re, im } => (signed_literal(re), signed_literal(im)),
    };
    format!(
        "
void main() {{
	int n;
	float r0 = ratio * (v_texcoord.x - 0.5) * scale - center.x;
	float i0 = (v_texcoord.y - 0.5) * scale - center.y;

	float i = i0;
	float r = r0;

	for(n=0; n < {iterations}; n++) {{
		float nr = r * r - i * i{real};
		float ni = 2.0 * r * i{imaginary};

		if (nr * nr + ni * ni > 4.0)
			break;
		i = ni;
		r = nr;
	}}
	gl_FragColor = texture2D(palette, vec2(float(n) / 20.0, 1.0));
}}
",
        iterations = ITERATIONS,
        real = real,
        imaginary = imaginary
    )
}

/// The complete fragment program for `kernel`: precision and uniform
/// declarations followed by its `main`.
pub fn fragment_shader(kernel: &FractalKernel) -> String {
    let mut source = String::from(FRAGMENT_HEADER);
    source.push_str(&fragment_body(kernel));
    source
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::PRESETS;
    use num::Complex;

    #[test]
    fn literals_carry_a_sign_and_a_decimal_point() {
        assert_eq!(signed_literal(0.8), "+0.8");
        assert_eq!(signed_literal(-0.6), "-0.6");
        assert_eq!(signed_literal(0.39), "+0.39");
        assert_eq!(signed_literal(-1.0), "-1.0");
        assert_eq!(signed_literal(2.0), "+2.0");
        assert_eq!(signed_literal(0.0), "");
        assert_eq!(signed_literal(-0.0), "");
    }

    #[test]
    fn mandelbrot_adds_the_pixel_point() {
        let body = fragment_body(&FractalKernel::Mandelbrot);
        assert!(body.contains("float nr = r * r - i * i + r0;"));
        assert!(body.contains("float ni = 2.0 * r * i + i0;"));
        assert!(body.contains("n < 32"));
        assert!(body.contains("float(n) / 20.0"));
    }

    #[test]
    fn julia_substitutes_its_constants() {
        let body = fragment_body(&FractalKernel::julia(-0.8, 0.2));
        assert!(body.contains("float nr = r * r - i * i-0.8;"));
        assert!(body.contains("float ni = 2.0 * r * i+0.2;"));
    }

    #[test]
    fn zero_constants_are_omitted() {
        let body = fragment_body(&FractalKernel::julia(0.0, 0.8));
        assert!(body.contains("float nr = r * r - i * i;"));
        assert!(body.contains("float ni = 2.0 * r * i+0.8;"));

        let body = fragment_body(&FractalKernel::julia(-1.0, 0.0));
        assert!(body.contains("float nr = r * r - i * i-1.0;"));
        assert!(body.contains("float ni = 2.0 * r * i;"));
    }

    #[test]
    fn every_preset_gets_a_full_program() {
        for kernel in PRESETS.iter() {
            let source = fragment_shader(kernel);
            assert!(source.starts_with("#ifdef GL_FRAGMENT_PRECISION_HIGH"));
            assert!(source.contains("uniform sampler2D palette;"));
            assert_eq!(source.matches("void main()").count(), 1);
        }
    }

    #[test]
    fn uniforms_follow_the_viewport() {
        let vp = Viewport::new(Complex::new(0.5, -0.25), 2.0, 200, 100).unwrap();
        assert_eq!(
            Uniforms::for_viewport(&vp),
            Uniforms {
                center: [0.5, -0.25],
                scale: 2.0,
                ratio: 2.0,
            }
        );
    }
}
