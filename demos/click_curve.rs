extern crate click_spline;

use std::error::Error;
use std::io::{self, BufRead};

use click_spline::{flatten_points, ControlPointStore, CurveConfig, Viewport};
use log::{info, LevelFilter};

const WINDOW_SIZE: u32 = 800;
const SAMPLES: usize = 20;

/// Reads `n d`, `umin umax` and the knots on the first three lines, followed by one `x y` pixel
/// position per line for every click. Prints the sampled curve as `x;y` rows.
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::new().filter_level(LevelFilter::Debug).init();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let mut header = String::new();
    for _ in 0..3 {
        match lines.next() {
            Some(line) => {
                header.push_str(&line?);
                header.push('\n');
            }
            None => break,
        }
    }
    let config = CurveConfig::parse(&header)?;
    info!("Please input {} control points:(by cursor)", config.control_point_count());

    let viewport = Viewport::new(WINDOW_SIZE, WINDOW_SIZE)?;
    let mut store = ControlPointStore::with_batch_size(config.control_point_count());

    for line in lines {
        let line = line?;
        let mut coordinates = line.split_whitespace().map(str::parse::<f64>);
        let (x, y) = match (coordinates.next(), coordinates.next()) {
            (Some(x), Some(y)) => (x?, y?),
            _ => continue,
        };
        info!("getCursorPos: ({}, {})", x, y);
        let point = store.add_click(x, y, &viewport);
        info!("getCursorPos(NDC): ({}, {})", point.x, point.y);

        if let Some(points) = store.take_batch() {
            let curve = config.sample(points.clone(), SAMPLES)?;
            info!("control points: {:?}", flatten_points(&points));

            println!("x;y");
            for point in curve.iter() {
                println!("{:.4};{:.4}", point.x, point.y);
            }
            info!("DRAWED.");
        }
    }

    Ok(())
}
