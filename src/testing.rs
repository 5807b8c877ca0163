use rand::{CryptoRng, RngCore};

/// Entropy source whose every draw fails, standing in for a dead OS RNG.
pub struct BrokenRng;

impl RngCore for BrokenRng {
    fn next_u32(&mut self) -> u32 {
        panic!("entropy pool closed")
    }

    fn next_u64(&mut self) -> u64 {
        panic!("entropy pool closed")
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        panic!("entropy pool closed")
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        Err(rand::Error::new("entropy pool closed"))
    }
}

impl CryptoRng for BrokenRng {}
