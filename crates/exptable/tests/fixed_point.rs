use exptable::{FixedPoint, FixedTables};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SAMPLES: usize = 2000;

#[test]
fn test_exp_matches_f64() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..SAMPLES {
        let x = FixedPoint::from_f64(rng.gen_range(-12.0..4.8));
        let expected = x.to_f64().exp();
        let actual = x.exp().to_f64();
        let tolerance = 1e-5 * expected.max(1.0);

        assert!(
            (actual - expected).abs() <= tolerance,
            "exp({}) = {}, expected {}",
            x,
            actual,
            expected
        );
    }
}

#[test]
fn test_ln_matches_f64() {
    let mut rng = StdRng::seed_from_u64(0x1096);

    for _ in 0..SAMPLES {
        let x = FixedPoint::from_f64(rng.gen_range(0.001..127.0));
        let expected = x.to_f64().ln();
        let actual = x.ln().unwrap().to_f64();

        assert!(
            (actual - expected).abs() <= 1e-5,
            "ln({}) = {}, expected {}",
            x,
            actual,
            expected
        );
    }
}

#[test]
fn test_exp_of_ln_roundtrip() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..SAMPLES {
        let x = FixedPoint::from_f64(rng.gen_range(0.5..100.0));
        let back = x.ln().unwrap().exp().to_f64();

        assert!(
            (back - x.to_f64()).abs() <= 1e-4 * x.to_f64(),
            "exp(ln({})) = {}",
            x,
            back
        );
    }
}

#[test]
fn test_exp_monotonic_on_grid() {
    let tables = FixedTables::new();
    let mut previous = FixedPoint::ZERO;

    for step in -500..=480 {
        let x = FixedPoint::from_f64(step as f64 / 100.0);
        let y = tables.exp(x);
        assert!(y >= previous, "exp not monotonic at {}", x);
        previous = y;
    }
}

#[test]
fn test_shared_tables_match_fresh() {
    assert_eq!(FixedTables::shared(), &FixedTables::new());
}
