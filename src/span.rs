use derive_more::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("[{start}:{end}]")]
pub struct Span {
    // inclusive range of byte offsets
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn one(start: usize) -> Self {
        Span { start, end: start }
    }

    pub fn two(start: usize) -> Self {
        Span {
            start,
            end: start + 1,
        }
    }

    pub fn str_from_source<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start..=self.end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_inclusive_range() {
        let input = "1 >= 2";
        assert_eq!(Span::two(2).str_from_source(input), ">=");
        assert_eq!(Span::one(0).str_from_source(input), "1");
        assert_eq!(Span::new(2, 5).to_string(), "[2:5]");
    }
}
