use taylor_atan::{remainder_bound, taylor_atan, ErrorSeries};

fn atan_approx() {
    // Approximate atan(x) at x = 0.7 using 9 series terms
    let value_approx = taylor_atan(0.7, 9);
    // Get the actual value at x = 0.7
    let value_actual = 0.7_f64.atan();
    // Compute the approximation error at x = 0.7 and make sure it stays within the
    // bound given by the first omitted term
    let error = value_actual - value_approx;
    println!("atan(0.7) ~ {value_approx} (error {error:e})");
    assert!(error.abs() <= remainder_bound(0.7, 9));
}

fn error_profile() {
    // Largest relative error on [-1, 1] for a few term counts
    for terms in [3, 5, 7, 9, 11] {
        let series = ErrorSeries::new(terms);
        if let Some(max) = series.max_error() {
            println!("{terms:>2} terms: max relative error {max:.3}%");
        }
    }
}

fn main() {
    atan_approx();
    error_profile();
}
