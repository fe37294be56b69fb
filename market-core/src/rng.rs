//! Deterministic seeded randomness for the market engine.
//!
//! Every random draw in the engine flows through one of two stream types,
//! both built on the same 32-bit mulberry32 mixer:
//!
//! - [`NoiseStream`]: per-tick price noise, seeded from the tick counter.
//! - [`MerchantStream`]: merchant generation, seeded from the spawn seed.
//!
//! The streams are separate types on purpose: price rolls and merchant rolls
//! must never consume from the same sequence, so adding a merchant spawn can
//! never shift the noise applied to prices (and vice versa). Call order
//! within a stream is part of the determinism contract.

use rand::RngCore;

/// mulberry32: a small, fast 32-bit generator with full reproducibility
/// from a `u32` seed. Identical seed + identical call order reproduces an
/// identical sequence.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    fn step(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut z = self.state;
        z = (z ^ (z >> 15)).wrapping_mul(z | 1);
        z ^= z.wrapping_add((z ^ (z >> 7)).wrapping_mul(z | 61));
        z ^ (z >> 14)
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.step() as f64 / 4_294_967_296.0
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        let lo = self.step() as u64;
        let hi = self.step() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.step().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

/// Price-noise stream: one per `update_prices` call, seeded from the tick.
/// Consumed exactly once per catalog item, in catalog order.
#[derive(Debug, Clone)]
pub struct NoiseStream(Mulberry32);

impl NoiseStream {
    pub fn for_tick(tick: u64) -> Self {
        Self(Mulberry32::new(tick as u32))
    }

    /// Draw a noise value in `[-1, 1]`.
    pub fn noise(&mut self) -> f64 {
        self.0.next_f64() * 2.0 - 1.0
    }
}

/// Merchant-generation stream: one per spawn call, seeded independently of
/// the price noise so the two subsystems never perturb each other.
#[derive(Debug, Clone)]
pub struct MerchantStream(Mulberry32);

impl MerchantStream {
    pub fn new(seed: u32) -> Self {
        Self(Mulberry32::new(seed))
    }
}

impl RngCore for MerchantStream {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }
}
