use crate::redaction::FieldFilter;

/// Caller-supplied redaction lists.
///
/// When `allow_list` is non-empty it wins outright and `deny_list` is ignored.
/// Names are matched case-sensitively. Duplicates are dropped, first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedactionConfig {
    deny_list: Vec<String>,
    allow_list: Vec<String>,
}

impl RedactionConfig {
    pub fn new<D, A>(deny_list: D, allow_list: A) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            deny_list: dedupe(deny_list),
            allow_list: dedupe(allow_list),
        }
    }

    pub fn deny<D>(deny_list: D) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
    {
        Self::new(deny_list, Vec::<String>::new())
    }

    pub fn allow<A>(allow_list: A) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self::new(Vec::<String>::new(), allow_list)
    }

    pub fn deny_list(&self) -> &[String] {
        &self.deny_list
    }

    pub fn allow_list(&self) -> &[String] {
        &self.allow_list
    }

    /// True when neither list names anything, i.e. every field passes through.
    pub fn is_empty(&self) -> bool {
        self.deny_list.is_empty() && self.allow_list.is_empty()
    }

    /// Compiles the lists into a reusable filter.
    pub fn filter(&self) -> FieldFilter {
        FieldFilter::from_config(self)
    }
}

fn dedupe<I>(items: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for item in items {
        let item = item.into();
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
