use std::fs;
use std::path::Path;

use taylor_atan::chart::{render_svg, ChartConfig, DEFAULT_TERMS};
use taylor_atan::generate_data_points;

fn write_csv_columns(columns: &[Vec<f64>], header: &[String], csv_path: &Path) -> std::io::Result<()> {
    let n_samples = columns[0].len();

    let mut csv_string = header.join(",");
    csv_string.push('\n');

    for row_idx in 0..n_samples {
        let row: Vec<String> = columns.iter().map(|col| col[row_idx].to_string()).collect();
        csv_string.push_str(&row.join(","));
        csv_string.push('\n');
    }
    fs::write(csv_path, csv_string)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate a csv file with one error column per term count, plus the svg chart
    let out_dir = Path::new("plots");
    fs::create_dir_all(out_dir)?;

    let mut header = vec!["x".to_string()];
    let mut columns: Vec<Vec<f64>> = vec![generate_data_points(DEFAULT_TERMS[0])
        .iter()
        .map(|s| s.x)
        .collect()];
    for terms in DEFAULT_TERMS {
        header.push(format!("error_{terms}"));
        columns.push(generate_data_points(terms).iter().map(|s| s.error).collect());
    }
    write_csv_columns(&columns, &header, &out_dir.join("plot_data.csv"))?;

    render_svg(&ChartConfig::default(), &out_dir.join("atan_error.svg"))?;
    Ok(())
}
