//! Gaussian blur for shadow and glow silhouettes.
//!
//! A canvas `shadowBlur` of `b` is a gaussian with sigma `b / 2`, reaching three sigmas out.
//! Weights are Q16 fixed point and always sum to exactly `1 << 16`, so flat regions stay flat.

const Q16_ONE: f64 = 65536.0;

/// Separable blur kernel for one shadow blur length.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ShadowKernel {
    weights: Vec<u32>,
}

impl ShadowKernel {
    /// Kernel for a canvas blur length, reaching at most `max_reach` pixels each way.
    ///
    /// `None` when the blur leaves the silhouette sharp.
    pub(crate) fn for_blur(blur: f64, max_reach: u32) -> Option<Self> {
        if !blur.is_finite() || blur <= 0.0 || max_reach == 0 {
            return None;
        }
        let sigma = blur / 2.0;
        let reach = (sigma * 3.0).ceil().min(f64::from(max_reach)) as i64;
        let denom = 2.0 * sigma * sigma;
        let raw: Vec<f64> = (-reach..=reach)
            .map(|i| {
                let x = i as f64;
                (-x * x / denom).exp()
            })
            .collect();
        let sum: f64 = raw.iter().sum();
        if !(sum.is_finite() && sum > 0.0) {
            return None;
        }

        // Quantize the running total so rounding never drifts away from Q16_ONE.
        let mut weights = Vec::with_capacity(raw.len());
        let (mut running, mut prev) = (0.0, 0u32);
        for w in raw {
            running += w;
            let q = ((running / sum).min(1.0) * Q16_ONE).round() as u32;
            weights.push(q - prev);
            prev = q;
        }
        Some(Self { weights })
    }

    pub(crate) fn reach(&self) -> usize {
        self.weights.len() / 2
    }

    /// Blur a premultiplied RGBA8 region in place. Samples past the edge repeat the edge.
    pub(crate) fn apply(&self, region: &mut [u8], width: usize, height: usize) {
        if width == 0 || height == 0 || region.len() != width * height * 4 {
            return;
        }
        let mut tmp = vec![0u8; region.len()];
        self.convolve(region, &mut tmp, height, width, width, 1);
        self.convolve(&tmp, region, width, height, 1, width);
    }

    /// One pass along `lines` lines of `len` pixels. Pixel `i` of line `l` sits at
    /// `l * line_step + i * px_step`.
    fn convolve(
        &self,
        src: &[u8],
        dst: &mut [u8],
        lines: usize,
        len: usize,
        line_step: usize,
        px_step: usize,
    ) {
        let reach = self.reach() as isize;
        let last = len as isize - 1;
        for line in 0..lines {
            let at = |i: isize| (line * line_step + i.clamp(0, last) as usize * px_step) * 4;
            for i in 0..len as isize {
                let mut acc = [0u64; 4];
                for (k, &w) in self.weights.iter().enumerate() {
                    let idx = at(i + k as isize - reach);
                    for (a, &v) in acc.iter_mut().zip(&src[idx..idx + 4]) {
                        *a += u64::from(w) * u64::from(v);
                    }
                }
                let out = at(i);
                for (d, a) in dst[out..out + 4].iter_mut().zip(acc) {
                    *d = ((a + 0x8000) >> 16).min(255) as u8;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
