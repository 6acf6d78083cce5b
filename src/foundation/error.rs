pub type SignResult<T> = Result<T, SignError>;

#[derive(thiserror::Error, Debug)]
pub enum SignError {
    #[error("lifecycle error: {0}")]
    Lifecycle(String),

    #[error("task fault in '{task}': {message}")]
    TaskFault { task: String, message: String },

    #[error("frame length error: expected {expected} bytes, got {actual}")]
    FrameLength { expected: usize, actual: usize },

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SignError {
    pub fn lifecycle(msg: impl Into<String>) -> Self {
        Self::Lifecycle(msg.into())
    }

    pub fn task_fault(task: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TaskFault {
            task: task.into(),
            message: message.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Short message suitable for the status LCD.
    pub fn lcd_message(&self) -> String {
        match self {
            Self::TaskFault { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
