mod headers;
mod query;
mod uri;

pub use self::headers::*;
pub use self::query::*;
pub use self::uri::*;
