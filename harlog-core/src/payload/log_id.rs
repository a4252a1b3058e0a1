use std::fmt::{Display, Formatter};
use uuid::Uuid;

#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct LogId(pub String);

impl Default for LogId {
    fn default() -> Self {
        LogId(Uuid::new_v4().to_string())
    }
}

impl From<String> for LogId {
    fn from(s: String) -> Self {
        LogId(s)
    }
}

impl From<&str> for LogId {
    fn from(s: &str) -> Self {
        LogId(s.to_owned())
    }
}

impl Display for LogId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
