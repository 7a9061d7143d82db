#![allow(dead_code)]

use meshcut::{Dataset, Variable};
use ndarray::Array2;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Regular `nx` x `ny` node grid starting at `(lon0, lat0)` with `step`
/// degree spacing, two triangles per cell.
pub fn grid_mesh(lon0: f64, lat0: f64, step: f64, nx: usize, ny: usize) -> Dataset {
    let mut lon = Vec::with_capacity(nx * ny);
    let mut lat = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            lon.push(lon0 + i as f64 * step);
            lat.push(lat0 + j as f64 * step);
        }
    }

    let mut faces = Vec::with_capacity(2 * (nx - 1) * (ny - 1));
    for j in 0..ny - 1 {
        for i in 0..nx - 1 {
            let n = j * nx + i;
            faces.push([n, n + 1, n + nx]);
            faces.push([n + 1, n + nx + 1, n + nx]);
        }
    }

    Dataset::new(lon, lat)
        .expect("Failed to create dataset")
        .with_faces(faces)
        .expect("Failed to attach faces")
}

/// Grid mesh with a `time` axis and a `temp` variable whose value encodes
/// `time_index * 1000 + node`.
pub fn ocean_dataset() -> Dataset {
    let ds = grid_mesh(-5.0, 40.0, 1.0, 11, 11);
    let nodes = ds.dim_len("nod2").expect("node dimension");
    let times = vec![0.0, 86_400.0, 172_800.0];

    let values = Array2::from_shape_fn((times.len(), nodes), |(t, n)| (t * 1000 + n) as f64);
    let temp = Variable::new(vec!["time", "nod2"], values.into_dyn())
    .expect("Failed to create variable")
    .with_attr("units", "degC");
    let salt = Variable::from_vec("nod2", vec![35.0; nodes]);

    ds.with_coord("time", Variable::from_vec("time", times))
        .expect("Failed to add time")
        .with_data_var("temp", temp)
        .expect("Failed to add temp")
        .with_data_var("salt", salt)
        .expect("Failed to add salt")
}
