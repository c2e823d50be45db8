#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid coordinate: {axis} = {value} (expected {min}..={max})")]
    InvalidCoordinate {
        axis: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}
