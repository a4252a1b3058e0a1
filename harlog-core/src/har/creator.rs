use once_cell::sync::Lazy;
use serde::Serialize;

/// Process-wide identity of the software producing the archive.
static PROCESS_CREATOR: Lazy<Creator> = Lazy::new(Creator::detect);

/// HAR `creator` block embedded in every log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Creator {
    pub name: String,
    pub version: String,
    pub comment: String,
}

impl Creator {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            comment: comment.into(),
        }
    }

    /// The creator computed once at first use and shared for the life of the process.
    pub fn process() -> &'static Creator {
        &PROCESS_CREATOR
    }

    fn detect() -> Self {
        Self::new(
            "harlog",
            env!("CARGO_PKG_VERSION"),
            format!(
                "{}-{}/rust",
                std::env::consts::ARCH,
                std::env::consts::OS
            ),
        )
    }
}
