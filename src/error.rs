#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("not enough signal to measure a joint angle")]
    InsufficientSignal,

    #[error("failed to construct NotNan from f32: {1}")]
    ConstructNotNan(#[source] ordered_float::FloatIsNan, f32),

    #[error("landmark index {index} missing from pose with {len} landmarks")]
    MissingLandmark { index: usize, len: usize },

    #[error("failed to convert usize value to joint: {0}")]
    ConvertUSizeToJoint(usize),

    #[error("unsupported exercise: {0}")]
    UnsupportedExercise(String),
}
