// Deterministic image generators shared by the integration tests.

#![allow(dead_code)]

/// Small linear congruential generator; enough to make incompressible-looking data
/// without pulling in a random number crate.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u16(&mut self) -> u16 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 48) as u16
    }
}

pub fn constant(width: usize, height: usize, value: u16) -> Vec<u16> {
    vec![value; width * height]
}

pub fn gradient(width: usize, height: usize) -> Vec<u16> {
    (0..height)
        .flat_map(|y| (0..width).map(move |x| ((x * 257 + y * 113) % 65536) as u16))
        .collect()
}

pub fn noise(width: usize, height: usize, seed: u64) -> Vec<u16> {
    let mut rng = Lcg::new(seed);
    (0..width * height).map(|_| rng.next_u16()).collect()
}

/// Smooth 12-bit ramp with a little noise, similar to a CT slice.
pub fn smooth_with_noise(width: usize, height: usize, seed: u64) -> Vec<u16> {
    let mut rng = Lcg::new(seed);
    (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| {
            let base = 1024 + ((x * x + y * 3 * y) % 2048) as i32;
            let jitter = (rng.next_u16() % 9) as i32 - 4;
            (base + jitter) as u16
        })
        .collect()
}

/// Flat areas separated by hard edges, including the extremes 0 and 65535.
pub fn blocks(width: usize, height: usize) -> Vec<u16> {
    (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| match ((x / 5) + (y / 3)) % 4 {
                0 => 0,
                1 => 65535,
                2 => 1000,
                _ => 32768,
            })
        })
        .collect()
}

/// Alternating extremes: every residual is large.
pub fn checkerboard(width: usize, height: usize) -> Vec<u16> {
    (0..height)
        .flat_map(|y| (0..width).map(move |x| if (x + y) % 2 == 0 { 0 } else { 65535 }))
        .collect()
}
