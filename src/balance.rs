// This file has code from https://github.com/LIHPC-Computational-Geometry/coupe
use num_traits::ToPrimitive;
use crate::graph::Color;

/// Counts the nodes of each color.
pub fn compute_color_loads(colors: &[Color], num_colors: usize) -> Vec<usize> {
    let mut loads = vec![0; num_colors];

    for &color in colors {
        if color < num_colors {
            loads[color] += 1;
        }
    }

    loads
}

/// Compute imbalance after passing color loads.
pub fn compute_imbalance_from_color_loads(color_loads: &[usize]) -> f64 {
    if color_loads.is_empty() {
        return 0.0;
    }
    let total: usize = color_loads.iter().sum();

    let ideal_load = total.to_f64().unwrap_or(0.0) / color_loads.len().to_f64().unwrap_or(1.0);
    if ideal_load == 0.0 {
        return 0.0;
    }

    color_loads
        .iter()
        .map(|load| {
            let load = load.to_f64().unwrap_or(0.0);
            (load - ideal_load) / ideal_load
        })
        .fold(0.0f64, |acc, dev| acc.max(dev))
}

/// Compute the imbalance of the given coloring.
pub fn imbalance(num_colors: usize, colors: &[Color]) -> f64 {
    if num_colors == 0 {
        return 0.0;
    }

    compute_imbalance_from_color_loads(&compute_color_loads(colors, num_colors))
}
