use thiserror::Error;

/// The fill tessellator's result type.
pub type TessellationResult = Result<(), TessellationError>;

/// An error that can happen while generating geometry.
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GeometryBuilderError {
    #[error("Too many vertices")]
    TooManyVertices,
}

/// The fill tessellator's error enumeration.
///
/// Malformed input never produces an error: degenerate or non-finite geometry
/// results in degenerate (possibly empty) output instead.
#[non_exhaustive]
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TessellationError {
    #[error("Geometry builder error: {0}")]
    GeometryBuilder(#[from] GeometryBuilderError),
}

#[test]
fn error_messages() {
    use std::string::ToString;

    let err: TessellationError = GeometryBuilderError::TooManyVertices.into();
    let expected = TessellationError::GeometryBuilder(GeometryBuilderError::TooManyVertices);
    assert_eq!(err, expected);
    assert_eq!(err.to_string(), "Geometry builder error: Too many vertices");
}
