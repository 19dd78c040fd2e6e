use super::*;

fn single_pixel(w: usize, h: usize, x: usize, y: usize) -> Vec<u8> {
    let mut buf = vec![0u8; w * h * 4];
    let idx = (y * w + x) * 4;
    buf[idx..idx + 4].copy_from_slice(&[255, 255, 255, 255]);
    buf
}

#[test]
fn sharp_blur_lengths_have_no_kernel() {
    assert!(ShadowKernel::for_blur(0.0, 100).is_none());
    assert!(ShadowKernel::for_blur(-3.0, 100).is_none());
    assert!(ShadowKernel::for_blur(f64::NAN, 100).is_none());
    assert!(ShadowKernel::for_blur(f64::INFINITY, 100).is_none());
    assert!(ShadowKernel::for_blur(4.0, 0).is_none());
}

#[test]
fn reach_is_three_sigma_of_half_the_blur() {
    assert_eq!(ShadowKernel::for_blur(4.0, 100).unwrap().reach(), 6);
    assert_eq!(ShadowKernel::for_blur(10.0, 100).unwrap().reach(), 15);
}

#[test]
fn huge_blur_reach_is_capped() {
    let kernel = ShadowKernel::for_blur(1e10, 64).unwrap();
    assert_eq!(kernel.reach(), 64);
    let sum: u32 = kernel.weights.iter().sum();
    assert_eq!(sum, 1 << 16);
}

#[test]
fn constant_region_is_unchanged() {
    let (w, h) = (4usize, 3usize);
    let src = [10u8, 20, 30, 40].repeat(w * h);
    let mut out = src.clone();
    ShadowKernel::for_blur(4.0, 100).unwrap().apply(&mut out, w, h);
    assert_eq!(out, src);
}

#[test]
fn blur_spreads_a_single_pixel_and_keeps_its_energy() {
    let (w, h) = (9usize, 9usize);
    let mut buf = single_pixel(w, h, 4, 4);
    ShadowKernel::for_blur(2.4, 100).unwrap().apply(&mut buf, w, h);

    let nonzero = buf.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);
    let sum_a: u32 = buf.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 8);
}

#[test]
fn mismatched_region_is_left_alone() {
    let mut buf = vec![7u8; 7];
    ShadowKernel::for_blur(4.0, 100).unwrap().apply(&mut buf, 1, 2);
    assert_eq!(buf, vec![7u8; 7]);
}
