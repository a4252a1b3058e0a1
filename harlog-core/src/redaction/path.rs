use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// A field name split into its dot/bracket path segments.
///
/// `user.email`, `user[email]` and `items[0].id` all parse into segments; a name
/// that uses neither `.` nor `[` is a single key. Malformed names (unbalanced
/// brackets, empty segments) are kept as one literal key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn parse(name: &str) -> Self {
        if !name.contains(&['.', '[', ']'][..]) {
            return Self::key(name);
        }

        match tokenize(name) {
            Some(segments) => Self { segments },
            None => Self::key(name),
        }
    }

    pub fn key(name: &str) -> Self {
        Self {
            segments: vec![Segment::Key(name.to_owned())],
        }
    }

    pub fn child_key(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Key(key.to_owned()));
        Self { segments }
    }

    pub fn child_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index));
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The last named segment, skipping trailing array indexes.
    pub fn leaf_key(&self) -> Option<&str> {
        self.segments.iter().rev().find_map(|s| match s {
            Segment::Key(k) => Some(k.as_str()),
            Segment::Index(_) => None,
        })
    }

    /// True when `self` equals `other` or is one of its ancestors.
    pub fn is_prefix_of(&self, other: &FieldPath) -> bool {
        !self.is_root() && other.segments.starts_with(&self.segments)
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(k) if i == 0 => write!(f, "{k}")?,
                Segment::Key(k) => write!(f, ".{k}")?,
                Segment::Index(n) => write!(f, "[{n}]")?,
            }
        }
        Ok(())
    }
}

fn tokenize(name: &str) -> Option<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = name.chars();
    // Set after a closing bracket, where a following key needs no dot of its own.
    let mut after_bracket = false;

    while let Some(c) = chars.next() {
        match c {
            '.' => {
                if current.is_empty() && !after_bracket {
                    return None;
                }
                if !current.is_empty() {
                    segments.push(Segment::Key(std::mem::take(&mut current)));
                }
                after_bracket = false;
            }
            '[' => {
                if !current.is_empty() {
                    segments.push(Segment::Key(std::mem::take(&mut current)));
                } else if segments.is_empty() {
                    return None;
                }

                let mut inner = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == ']' {
                        closed = true;
                        break;
                    }
                    if c == '[' {
                        return None;
                    }
                    inner.push(c);
                }
                if !closed || inner.is_empty() {
                    return None;
                }

                segments.push(match inner.parse::<usize>() {
                    Ok(n) => Segment::Index(n),
                    Err(_) => Segment::Key(inner),
                });
                after_bracket = true;
            }
            ']' => return None,
            c => {
                if after_bracket && current.is_empty() && !segments.is_empty() {
                    // `a[0]b` is not a path.
                    return None;
                }
                current.push(c);
            }
        }
    }

    if !current.is_empty() {
        segments.push(Segment::Key(current));
    } else if !after_bracket {
        // trailing dot
        return None;
    }

    Some(segments)
}
