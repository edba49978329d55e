/// Percentage of an approximate diagonal built from the shorter side and an
/// aspect-ratio-adjusted height. Not the rectangle's true diagonal: the shorter side is
/// both the scale base and one leg of the sum.
pub fn percentage_of_diagonal(device_width: f64, device_height: f64, percentage: f64) -> f64 {
    let dimension = js_min(device_height, device_width);
    let aspect_ratio = device_height / device_width;
    let aspect_ratio_based_height = aspect_ratio * dimension;
    let diagonal = (aspect_ratio_based_height.powi(2) + dimension.powi(2)).sqrt();
    (diagonal * percentage) / 100.0
}

// `f64::min` drops a NaN operand; a NaN side must poison the result instead.
fn js_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}
