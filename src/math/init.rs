use rand::Rng;

/// Initial connection weight for a neuron with `fan_in` inputs, drawn from the
/// process-wide thread RNG.
pub fn weight(fan_in: usize) -> f64 {
    weight_with(&mut rand::thread_rng(), fan_in)
}

/// Uniform sample from `[-1/sqrt(fan_in), 1/sqrt(fan_in)]`.
///
/// The range shrinks as fan-in grows so that a neuron's weighted sum starts
/// out in the responsive part of its activation. Exactly `0.0` is rejected
/// and redrawn; a zero weight never receives a gradient on its first pass.
pub fn weight_with<R: Rng + ?Sized>(rng: &mut R, fan_in: usize) -> f64 {
    let range = 1.0 / (fan_in.max(1) as f64).sqrt();
    loop {
        let w = rng.gen::<f64>() * 2.0 * range - range;
        if w != 0.0 {
            return w;
        }
    }
}

/// Initial neuron bias: same distribution as a single-input weight.
pub fn bias_with<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    weight_with(rng, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn weights_stay_inside_the_fan_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for fan_in in [1, 2, 4, 16, 100] {
            let range = 1.0 / (fan_in as f64).sqrt();
            for _ in 0..500 {
                let w = weight_with(&mut rng, fan_in);
                assert!(w.abs() <= range, "fan_in {fan_in}: {w}");
                assert!(w != 0.0);
            }
        }
    }

    #[test]
    fn magnitude_shrinks_with_fan_in() {
        let mut rng = StdRng::seed_from_u64(11);
        let mean_abs = |rng: &mut StdRng, fan_in| {
            (0..2000).map(|_| weight_with(rng, fan_in).abs()).sum::<f64>() / 2000.0
        };
        let small = mean_abs(&mut rng, 1);
        let large = mean_abs(&mut rng, 64);
        assert!(large < small);
    }

    #[test]
    fn zero_fan_in_is_treated_as_one() {
        let w = weight(0);
        assert!(w.abs() <= 1.0);
    }

    #[test]
    fn seeded_rngs_agree() {
        let a = weight_with(&mut StdRng::seed_from_u64(3), 5);
        let b = weight_with(&mut StdRng::seed_from_u64(3), 5);
        assert_eq!(a, b);
    }
}
