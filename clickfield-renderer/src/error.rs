/// Error categories.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Failed to initialize WebGL context or retrieve DOM elements.
    #[error("Initialization error: {0}")]
    Initialization(String),

    /// Shader lookup, compilation, linking, or program creation errors.
    #[error("Shader error: {0}")]
    Shader(String),

    /// WebGL resource creation or management errors.
    #[error("Resource error: {0}")]
    Resource(String),

    /// Event listener and animation frame registration errors.
    #[error("Event listener error: {0}")]
    Callback(String),

    /// Invalid scene configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Broken internal invariant; aborts the current render operation.
    #[error("Invariant violation: {0}")]
    Invariant(String),
}

impl Error {
    // Initialization errors
    pub fn window_not_found() -> Self {
        Self::Initialization("Unable to retrieve window".to_string())
    }

    pub fn document_not_found() -> Self {
        Self::Initialization("Unable to retrieve document".to_string())
    }

    pub fn canvas_not_found() -> Self {
        Self::Initialization("Unable to retrieve canvas".to_string())
    }

    pub fn webgl_context_failed() -> Self {
        Self::Initialization("Failed to retrieve WebGL2 rendering context".to_string())
    }

    pub fn canvas_context_failed() -> Self {
        Self::Initialization("Failed to retrieve canvas rendering context".to_string())
    }

    // Shader errors
    pub fn shader_source_not_found(id: &str) -> Self {
        Self::Shader(format!("No shader source found for element: {id}"))
    }

    pub fn shader_creation_failed(detail: &str) -> Self {
        Self::Shader(format!("Shader creation failed: {detail}"))
    }

    pub fn shader_compile_failed(log: String) -> Self {
        Self::Shader(format!("Shader compilation failed: {log}"))
    }

    pub fn shader_program_creation_failed() -> Self {
        Self::Shader("Shader program creation failed".to_string())
    }

    pub fn shader_link_failed(log: String) -> Self {
        Self::Shader(format!("Shader linking failed: {log}"))
    }

    // Resource errors
    pub fn buffer_creation_failed(buffer_type: &str) -> Self {
        Self::Resource(format!("Failed to create {buffer_type} buffer"))
    }

    pub fn vertex_array_creation_failed() -> Self {
        Self::Resource("Failed to create vertex array object".to_string())
    }

    pub fn uniform_location_failed(name: &str) -> Self {
        Self::Resource(format!("Failed to get uniform location: {name}"))
    }

    pub fn attribute_location_failed(name: &str) -> Self {
        Self::Resource(format!("Failed to get attribute location: {name}"))
    }

    // Callback errors
    pub fn listener_failed(event: &str) -> Self {
        Self::Callback(format!("Failed to add {event} listener"))
    }

    pub fn animation_frame_failed() -> Self {
        Self::Callback("Failed to request animation frame".to_string())
    }

    // Configuration errors
    pub fn invalid_viewport(width: u32, height: u32) -> Self {
        Self::Config(format!("Viewport must be non-empty, got {width}x{height}"))
    }

    pub fn invalid_camera(detail: &str) -> Self {
        Self::Config(format!("Invalid camera: {detail}"))
    }

    // Invariant violations
    pub fn matrix_stack_underflow() -> Self {
        Self::Invariant("Matrix stack popped while empty".to_string())
    }

    pub fn singular_matrix(name: &str) -> Self {
        Self::Invariant(format!("Matrix is not invertible: {name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_category() {
        let err = Error::matrix_stack_underflow();
        assert_eq!(err.to_string(), "Invariant violation: Matrix stack popped while empty");

        let err = Error::invalid_viewport(0, 600);
        assert_eq!(
            err.to_string(),
            "Configuration error: Viewport must be non-empty, got 0x600"
        );
    }
}
