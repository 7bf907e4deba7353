//! Synthetic 2D dataset generators.
//!
//! Each generator produces labeled points normalized roughly into [-2, 2],
//! with fresh random noise on every invocation. The visualizer's dataset
//! buttons map directly onto the keys in [`DATASETS`].

use std::f64::consts::PI;

use rand::Rng;

use super::types::DataPoint;

/// Dataset keys and their display names, in menu order.
pub const DATASETS: &[(&str, &str)] = &[
    ("spiral", "Spiral"),
    ("circle", "Circle"),
    ("xor", "XOR"),
    ("gaussians", "Clusters"),
];

/// Generate the named dataset with a thread-local RNG. Unknown keys fall back
/// to the spiral.
pub fn generate(name: &str) -> Vec<DataPoint> {
    generate_with(name, &mut rand::thread_rng())
}

/// Generate the named dataset from an explicit RNG, for reproducible tests.
pub fn generate_with<R: Rng + ?Sized>(name: &str, rng: &mut R) -> Vec<DataPoint> {
    match name {
        "circle" => circle(200, 0.1, rng),
        "xor" => xor(200, 0.2, rng),
        "gaussians" => two_gaussians(200, 0.5, rng),
        _ => spiral(100, 0.2, rng),
    }
}

/// Two interleaved spiral arms, one per class.
fn spiral<R: Rng + ?Sized>(points_per_arm: usize, noise: f64, rng: &mut R) -> Vec<DataPoint> {
    let mut data = Vec::with_capacity(points_per_arm * 2);

    for i in 0..points_per_arm {
        let fraction = i as f64 / points_per_arm as f64;
        let radius = fraction * 5.0;
        let theta = 1.75 * fraction * 2.0 * PI;

        let x1 = radius * theta.sin() + (rng.gen::<f64>() - 0.5) * noise;
        let y1 = radius * theta.cos() + (rng.gen::<f64>() - 0.5) * noise;
        data.push(DataPoint::new(x1 / 5.0, y1 / 5.0, 0));

        let x2 = radius * (theta + PI).sin() + (rng.gen::<f64>() - 0.5) * noise;
        let y2 = radius * (theta + PI).cos() + (rng.gen::<f64>() - 0.5) * noise;
        data.push(DataPoint::new(x2 / 5.0, y2 / 5.0, 1));
    }

    data
}

/// A disc where the inner 60% of the radius is class 1.
fn circle<R: Rng + ?Sized>(num_points: usize, noise: f64, rng: &mut R) -> Vec<DataPoint> {
    let radius = 2.0;
    let mut data = Vec::with_capacity(num_points);

    for _ in 0..num_points {
        let r = rng.gen::<f64>() * radius;
        let angle = rng.gen::<f64>() * 2.0 * PI;
        let x = r * angle.sin();
        let y = r * angle.cos();
        let label = u8::from(r < radius * 0.6);

        data.push(DataPoint::new(
            x + (rng.gen::<f64>() - 0.5) * noise,
            y + (rng.gen::<f64>() - 0.5) * noise,
            label,
        ));
    }

    data
}

/// Quadrant-parity labels over [-2, 2]^2, scaled down by half.
fn xor<R: Rng + ?Sized>(num_points: usize, noise: f64, rng: &mut R) -> Vec<DataPoint> {
    let mut data = Vec::with_capacity(num_points);

    for _ in 0..num_points {
        let x = rng.gen::<f64>() * 4.0 - 2.0;
        let y = rng.gen::<f64>() * 4.0 - 2.0;
        let label = u8::from((x > 0.0) != (y > 0.0));

        let noisy_x = x + (rng.gen::<f64>() - 0.5) * noise;
        let noisy_y = y + (rng.gen::<f64>() - 0.5) * noise;
        data.push(DataPoint::new(noisy_x / 2.0, noisy_y / 2.0, label));
    }

    data
}

/// Two linearly separable clusters centered at (2, 2) and (-2, -2), scaled
/// down by a third.
fn two_gaussians<R: Rng + ?Sized>(num_points: usize, noise: f64, rng: &mut R) -> Vec<DataPoint> {
    let mut data = Vec::with_capacity(num_points);
    let (cx1, cy1, cx2, cy2) = (2.0, 2.0, -2.0, -2.0);

    for _ in 0..num_points / 2 {
        let x1 = cx1 + (rng.gen::<f64>() - 0.5) * noise * 4.0;
        let y1 = cy1 + (rng.gen::<f64>() - 0.5) * noise * 4.0;
        data.push(DataPoint::new(x1 / 3.0, y1 / 3.0, 1));

        let x2 = cx2 + (rng.gen::<f64>() - 0.5) * noise * 4.0;
        let y2 = cy2 + (rng.gen::<f64>() - 0.5) * noise * 4.0;
        data.push(DataPoint::new(x2 / 3.0, y2 / 3.0, 0));
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn check_shape(data: &[DataPoint]) {
        assert!(!data.is_empty());
        for point in data {
            assert_eq!(point.inputs.len(), 2);
            assert!(point.label <= 1);
            assert!(point.inputs.iter().all(|v| v.abs() <= 2.5), "{:?}", point);
        }
    }

    #[test]
    fn test_every_named_dataset_is_well_formed() {
        let mut rng = StdRng::seed_from_u64(1);
        for (name, _) in DATASETS {
            let data = generate_with(name, &mut rng);
            assert_eq!(data.len(), 200, "dataset {name}");
            check_shape(&data);
        }
    }

    #[test]
    fn test_both_classes_are_present() {
        let mut rng = StdRng::seed_from_u64(2);
        for (name, _) in DATASETS {
            let data = generate_with(name, &mut rng);
            assert!(data.iter().any(|p| p.label == 0), "dataset {name}");
            assert!(data.iter().any(|p| p.label == 1), "dataset {name}");
        }
    }

    #[test]
    fn test_unknown_key_falls_back_to_spiral() {
        let mut rng = StdRng::seed_from_u64(3);
        let data = generate_with("no-such-dataset", &mut rng);
        assert_eq!(data.len(), 200);
        check_shape(&data);
    }

    #[test]
    fn test_gaussian_clusters_are_separated() {
        let mut rng = StdRng::seed_from_u64(4);
        let data = generate_with("gaussians", &mut rng);
        for point in &data {
            let sum = point.inputs[0] + point.inputs[1];
            if point.label == 1 {
                assert!(sum > 0.0);
            } else {
                assert!(sum < 0.0);
            }
        }
    }
}
