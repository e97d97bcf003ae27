use std::fmt;

/// Cell count printed with `'` between groups of three digits, e.g. `1'048'576`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NiceInt(usize);

impl From<usize> for NiceInt {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl fmt::Display for NiceInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let head = digits.len() % 3;
        let mut groups = Vec::with_capacity(digits.len() / 3 + 1);
        if head != 0 {
            groups.push(&digits[..head]);
        }
        groups.extend((head..digits.len()).step_by(3).map(|i| &digits[i..i + 3]));
        f.write_str(&groups.join("'"))
    }
}
